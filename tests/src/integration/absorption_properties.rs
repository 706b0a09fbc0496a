//! # Absorption Properties
//!
//! Property tests over a five-member federation with real ECDSA keys:
//!
//! - Output order depends only on which signers signed, never on input order
//! - Success exactly when at least `threshold` distinct signers are present
//! - A failed absorb leaves the header untouched
//! - Parallel and sequential verification agree

#[cfg(test)]
mod tests {
    use fc_consensus::{AbsorptionConfig, EcdsaVerifier, MultisigCondition, ProofAbsorber};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use shared_crypto::Secp256k1KeyPair;
    use shared_types::{BlockHeader, Hash256, Proof};

    const SIGNERS: usize = 5;

    struct Federation {
        keys: Vec<Secp256k1KeyPair>,
        header: BlockHeader,
    }

    impl Federation {
        /// Keys ordered to match their quorum positions.
        fn new() -> Self {
            let mut keys: Vec<_> = (1..=SIGNERS as u8)
                .map(|i| Secp256k1KeyPair::from_bytes([i; 32]).unwrap())
                .collect();
            keys.sort_by_key(|k| k.public_key());
            let header = BlockHeader {
                version: 1,
                prev_block_hash: Hash256::double_sha256(b"parent"),
                merkle_root: Hash256::double_sha256(b"transactions"),
                time: 1_700_000_000,
                proof: Proof::new(),
            };
            Self { keys, header }
        }

        fn quorum(&self, threshold: usize) -> MultisigCondition {
            MultisigCondition::new(self.keys.iter().map(|k| k.public_key()).collect(), threshold)
                .unwrap()
        }

        fn signatures(&self) -> Vec<Vec<u8>> {
            let message = self.header.signing_hash();
            self.keys
                .iter()
                .map(|k| k.sign_prehash(message.as_bytes()).unwrap())
                .collect()
        }
    }

    fn absorber(parallel_min_work: usize) -> ProofAbsorber<EcdsaVerifier> {
        ProofAbsorber::with_config(EcdsaVerifier, AbsorptionConfig { parallel_min_work })
    }

    /// Signed-by mask, threshold, junk entries, shuffle seed, duplicate flag.
    fn scenario() -> impl Strategy<Value = (Vec<bool>, usize, Vec<Vec<u8>>, u64, bool)> {
        (
            prop::collection::vec(any::<bool>(), SIGNERS),
            1..=SIGNERS,
            prop::collection::vec(prop::collection::vec(any::<u8>(), 0..80), 0..3),
            any::<u64>(),
            any::<bool>(),
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_canonical_order_and_threshold(
            (signed, threshold, junk, seed, duplicate) in scenario()
        ) {
            let fed = Federation::new();
            let quorum = fed.quorum(threshold);
            let sigs = fed.signatures();

            let expected: Proof = sigs
                .iter()
                .zip(&signed)
                .filter(|(_, s)| **s)
                .map(|(sig, _)| sig.clone())
                .collect();
            let signer_count = expected.len();

            let mut candidate: Vec<Vec<u8>> = expected.iter().map(<[u8]>::to_vec).collect();
            if duplicate {
                if let Some(first) = candidate.first().cloned() {
                    candidate.push(first);
                }
            }
            candidate.extend(junk);
            candidate.shuffle(&mut StdRng::seed_from_u64(seed));
            let candidate = Proof::from(candidate);

            let previous = Proof::from(vec![vec![0xEE]]);
            let mut header = BlockHeader { proof: previous.clone(), ..fed.header.clone() };
            let ok = absorber(usize::MAX).absorb(&mut header, &candidate, &quorum);

            prop_assert_eq!(ok, signer_count >= threshold);
            if ok {
                prop_assert_eq!(&header.proof, &expected);
                prop_assert!(header.proof.len() >= threshold);
            } else {
                prop_assert_eq!(&header.proof, &previous);
            }
        }

        #[test]
        fn prop_parallel_matches_sequential(
            (signed, threshold, junk, seed, duplicate) in scenario()
        ) {
            let fed = Federation::new();
            let quorum = fed.quorum(threshold);
            let mut candidate: Vec<Vec<u8>> = fed
                .signatures()
                .into_iter()
                .zip(&signed)
                .filter(|(_, s)| **s)
                .map(|(sig, _)| sig)
                .collect();
            if duplicate {
                candidate.extend(candidate.clone());
            }
            candidate.extend(junk);
            candidate.shuffle(&mut StdRng::seed_from_u64(seed));
            let candidate = Proof::from(candidate);

            let seq = absorber(usize::MAX).evaluate(&fed.header, &candidate, &quorum);
            let par = absorber(0).evaluate(&fed.header, &candidate, &quorum);
            prop_assert_eq!(seq, par);
        }
    }

    #[test]
    fn test_absorbing_output_again_is_stable() {
        let fed = Federation::new();
        let quorum = fed.quorum(3);
        let mut sigs = fed.signatures();
        sigs.reverse();

        let mut header = fed.header.clone();
        assert!(absorber(16).absorb(&mut header, &Proof::from(sigs), &quorum));
        let first = header.proof.clone();
        assert_eq!(first.len(), SIGNERS);

        assert!(absorber(16).absorb(&mut header, &first, &quorum));
        assert_eq!(header.proof, first);
    }
}

//! # Proof Absorption
//!
//! Turns a candidate proof (any order, possibly with junk) into the canonical
//! proof stored on a block.
//!
//! ## Algorithm
//!
//! 1. `message = header.signing_hash()`, computed once.
//! 2. Identical candidate byte strings are collapsed to their first
//!    occurrence.
//! 3. For each signer in quorum order, take the first candidate not yet
//!    consumed that verifies against that signer's key.
//! 4. The output proof lists the matched signatures in signer order.
//! 5. The header's proof is replaced only when the number of matched signers
//!    reaches the threshold. Otherwise the header is left untouched.
//!
//! ## Parallel Verification
//!
//! When `signer_count * candidate_len` reaches
//! `AbsorptionConfig::parallel_min_work`, the full signer-by-candidate
//! verification matrix is computed with rayon and then merged by the same
//! sequential first-match pass. Verification is pure, so both paths produce
//! identical proofs.

use super::MultisigCondition;
use crate::ports::SignatureVerifier;
use rayon::prelude::*;
use shared_types::{BlockHeader, Hash256, Proof};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Tuning knobs for the absorption engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbsorptionConfig {
    /// Minimum `signers * candidates` product before verification runs in parallel.
    pub parallel_min_work: usize,
}

impl Default for AbsorptionConfig {
    fn default() -> Self {
        Self {
            parallel_min_work: 16,
        }
    }
}

/// Result of matching a candidate proof against a quorum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Absorption {
    /// Matched signatures in ascending signer order.
    pub proof: Proof,
    /// For each signer, the index into the candidate proof it was matched to.
    pub assignments: Vec<Option<usize>>,
    /// Number of signers that contributed a signature.
    pub accepted: usize,
    /// Signatures required by the quorum.
    pub threshold: usize,
}

impl Absorption {
    /// Whether the threshold was reached.
    pub fn is_sufficient(&self) -> bool {
        self.accepted >= self.threshold
    }
}

/// Matches, filters and orders block signatures against a quorum.
#[derive(Clone, Debug)]
pub struct ProofAbsorber<V: SignatureVerifier> {
    verifier: V,
    config: AbsorptionConfig,
}

impl<V: SignatureVerifier> ProofAbsorber<V> {
    pub fn new(verifier: V) -> Self {
        Self::with_config(verifier, AbsorptionConfig::default())
    }

    pub fn with_config(verifier: V, config: AbsorptionConfig) -> Self {
        Self { verifier, config }
    }

    pub fn config(&self) -> &AbsorptionConfig {
        &self.config
    }

    /// Match `candidate` against `quorum` without touching the header.
    pub fn evaluate(
        &self,
        header: &BlockHeader,
        candidate: &Proof,
        quorum: &MultisigCondition,
    ) -> Absorption {
        let message = header.signing_hash();
        self.evaluate_message(&message, candidate, quorum)
    }

    /// Match `candidate` against `quorum` for an already computed signing hash.
    pub fn evaluate_message(
        &self,
        message: &Hash256,
        candidate: &Proof,
        quorum: &MultisigCondition,
    ) -> Absorption {
        let distinct = distinct_candidates(candidate);
        let signers = quorum.signers();
        let work = signers.len().saturating_mul(distinct.len());

        let picks = if work >= self.config.parallel_min_work && work > 0 {
            let matrix: Vec<Vec<bool>> = signers
                .par_iter()
                .map(|pubkey| {
                    distinct
                        .iter()
                        .map(|&j| self.verifier.verify(pubkey, message, as_bytes(candidate, j)))
                        .collect()
                })
                .collect();
            assign(signers.len(), distinct.len(), |i, k| matrix[i][k])
        } else {
            assign(signers.len(), distinct.len(), |i, k| {
                self.verifier
                    .verify(&signers[i], message, as_bytes(candidate, distinct[k]))
            })
        };

        let assignments: Vec<Option<usize>> =
            picks.iter().map(|pick| pick.map(|k| distinct[k])).collect();

        let mut proof = Proof::new();
        for (signer, assignment) in assignments.iter().enumerate() {
            if let Some(j) = assignment {
                trace!(signer, candidate = j, "signature matched");
                proof.append(as_bytes(candidate, *j).to_vec());
            }
        }

        let accepted = proof.len();
        Absorption {
            proof,
            assignments,
            accepted,
            threshold: quorum.threshold(),
        }
    }

    /// Install the canonical form of `candidate` as the header's proof.
    ///
    /// Returns `false` and leaves `header` unchanged when fewer than
    /// `quorum.threshold()` signers are matched.
    pub fn absorb(
        &self,
        header: &mut BlockHeader,
        candidate: &Proof,
        quorum: &MultisigCondition,
    ) -> bool {
        let outcome = self.evaluate(header, candidate, quorum);
        let sufficient = outcome.is_sufficient();
        debug!(
            accepted = outcome.accepted,
            threshold = outcome.threshold,
            candidates = candidate.len(),
            sufficient,
            "proof absorption"
        );
        if sufficient {
            header.proof = outcome.proof;
        }
        sufficient
    }
}

/// Indices of the first occurrence of each distinct candidate, in input order.
fn distinct_candidates(candidate: &Proof) -> Vec<usize> {
    let mut seen: HashSet<&[u8]> = HashSet::with_capacity(candidate.len());
    candidate
        .iter()
        .enumerate()
        .filter(|(_, sig)| seen.insert(*sig))
        .map(|(j, _)| j)
        .collect()
}

fn as_bytes(candidate: &Proof, index: usize) -> &[u8] {
    &candidate.as_slice()[index]
}

/// First-match assignment in signer order.
///
/// `matches(i, k)` tells whether candidate `k` verifies for signer `i`. Each
/// candidate is given to at most one signer.
fn assign(
    signer_count: usize,
    candidate_count: usize,
    mut matches: impl FnMut(usize, usize) -> bool,
) -> Vec<Option<usize>> {
    let mut consumed = vec![false; candidate_count];
    (0..signer_count)
        .map(|i| {
            let pick = (0..candidate_count).find(|&k| !consumed[k] && matches(i, k));
            if let Some(k) = pick {
                consumed[k] = true;
            }
            pick
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::EcdsaVerifier;
    use shared_crypto::{Secp256k1KeyPair, Secp256k1PublicKey};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Verifier driven by an explicit (pubkey, signature) table.
    struct TableVerifier {
        valid: HashSet<(Vec<u8>, Vec<u8>)>,
        calls: AtomicUsize,
    }

    impl TableVerifier {
        fn new(entries: &[(&Secp256k1PublicKey, &[u8])]) -> Self {
            Self {
                valid: entries
                    .iter()
                    .map(|(pk, sig)| (pk.as_bytes().to_vec(), sig.to_vec()))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl SignatureVerifier for TableVerifier {
        fn verify(&self, pubkey: &Secp256k1PublicKey, _message: &Hash256, signature: &[u8]) -> bool {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.valid
                .contains(&(pubkey.as_bytes().to_vec(), signature.to_vec()))
        }
    }

    struct Fixture {
        keys: Vec<Secp256k1KeyPair>,
        quorum: MultisigCondition,
        header: BlockHeader,
    }

    impl Fixture {
        fn new(n: usize, threshold: usize) -> Self {
            let keys: Vec<_> = (0..n).map(|_| Secp256k1KeyPair::generate()).collect();
            let quorum =
                MultisigCondition::new(keys.iter().map(|k| k.public_key()).collect(), threshold)
                    .unwrap();
            let header = BlockHeader {
                version: 1,
                prev_block_hash: Hash256::double_sha256(b"prev"),
                merkle_root: Hash256::double_sha256(b"merkle"),
                time: 1_600_000_000,
                proof: Proof::new(),
            };
            Self {
                keys,
                quorum,
                header,
            }
        }

        fn sign(&self, i: usize) -> Vec<u8> {
            self.keys[i]
                .sign_prehash(self.header.signing_hash().as_bytes())
                .unwrap()
        }
    }

    fn sequential() -> ProofAbsorber<EcdsaVerifier> {
        ProofAbsorber::with_config(
            EcdsaVerifier,
            AbsorptionConfig {
                parallel_min_work: usize::MAX,
            },
        )
    }

    fn parallel() -> ProofAbsorber<EcdsaVerifier> {
        ProofAbsorber::with_config(
            EcdsaVerifier,
            AbsorptionConfig {
                parallel_min_work: 0,
            },
        )
    }

    fn tampered(mut sig: Vec<u8>) -> Vec<u8> {
        sig[2] = 0x30;
        sig
    }

    #[test]
    fn test_three_of_three_scenario() {
        let mut fx = Fixture::new(3, 3);
        let (s0, s1, s2) = (fx.sign(0), fx.sign(1), fx.sign(2));

        // Two valid signatures and one tampered: fails, header untouched.
        let candidate: Proof = vec![s2.clone(), s0.clone(), tampered(s1.clone())].into();
        assert!(!sequential().absorb(&mut fx.header, &candidate, &fx.quorum));
        assert!(fx.header.proof.is_empty());

        let outcome = sequential().evaluate(&fx.header, &candidate, &fx.quorum);
        assert_eq!(outcome.accepted, 2);
        assert_eq!(outcome.assignments, vec![Some(1), None, Some(0)]);

        // Adding the good S1 completes the quorum in signer order.
        let candidate: Proof =
            vec![s2.clone(), s0.clone(), tampered(s1.clone()), s1.clone()].into();
        assert!(sequential().absorb(&mut fx.header, &candidate, &fx.quorum));
        assert_eq!(fx.header.proof, Proof::from(vec![s0, s1, s2]));
    }

    #[test]
    fn test_failed_absorb_keeps_existing_proof() {
        let mut fx = Fixture::new(3, 2);
        let existing: Proof = vec![vec![0xAA], vec![0xBB]].into();
        fx.header.proof = existing.clone();

        let candidate: Proof = vec![fx.sign(1)].into();
        assert!(!parallel().absorb(&mut fx.header, &candidate, &fx.quorum));
        assert_eq!(fx.header.proof, existing);
    }

    #[test]
    fn test_success_drops_unmatched_and_extra_signatures() {
        let mut fx = Fixture::new(3, 2);
        let outsider = Secp256k1KeyPair::generate()
            .sign_prehash(fx.header.signing_hash().as_bytes())
            .unwrap();
        let (s0, s2) = (fx.sign(0), fx.sign(2));

        let candidate: Proof = vec![vec![0x01, 0x02], outsider, s2.clone(), s0.clone()].into();
        assert!(sequential().absorb(&mut fx.header, &candidate, &fx.quorum));
        assert_eq!(fx.header.proof, Proof::from(vec![s0, s2]));
    }

    #[test]
    fn test_empty_candidate_fails() {
        let mut fx = Fixture::new(1, 1);
        assert!(!sequential().absorb(&mut fx.header, &Proof::new(), &fx.quorum));
        assert!(!parallel().absorb(&mut fx.header, &Proof::new(), &fx.quorum));
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let mut fx = Fixture::new(4, 3);
        let candidate: Proof = vec![fx.sign(3), fx.sign(1), fx.sign(0)].into();
        assert!(sequential().absorb(&mut fx.header, &candidate, &fx.quorum));
        let first = fx.header.proof.clone();

        let again = first.clone();
        assert!(sequential().absorb(&mut fx.header, &again, &fx.quorum));
        assert_eq!(fx.header.proof, first);
    }

    #[test]
    fn test_signing_hash_unaffected_by_absorb() {
        let mut fx = Fixture::new(2, 2);
        let before = fx.header.signing_hash();
        let candidate: Proof = vec![fx.sign(0), fx.sign(1)].into();
        assert!(sequential().absorb(&mut fx.header, &candidate, &fx.quorum));
        assert_eq!(fx.header.signing_hash(), before);
    }

    #[test]
    fn test_same_signature_is_attributed_once() {
        let fx = Fixture::new(2, 2);
        let shared = vec![0x30, 0x01, 0x01];
        let pk0 = fx.quorum.pubkey_at(0).unwrap();
        let pk1 = fx.quorum.pubkey_at(1).unwrap();
        let verifier = TableVerifier::new(&[(pk0, shared.as_slice()), (pk1, shared.as_slice())]);
        let absorber = ProofAbsorber::new(verifier);

        let single: Proof = vec![shared.clone()].into();
        let outcome = absorber.evaluate(&fx.header, &single, &fx.quorum);
        assert_eq!(outcome.accepted, 1);
        assert_eq!(outcome.assignments, vec![Some(0), None]);

        // Supplying the same bytes twice still counts once.
        let doubled: Proof = vec![shared.clone(), shared.clone()].into();
        let outcome = absorber.evaluate(&fx.header, &doubled, &fx.quorum);
        assert_eq!(outcome.accepted, 1);
        assert_eq!(outcome.proof, single);
        assert!(!outcome.is_sufficient());
    }

    #[test]
    fn test_first_unconsumed_match_wins() {
        let fx = Fixture::new(2, 2);
        let pk0 = fx.quorum.pubkey_at(0).unwrap();
        let pk1 = fx.quorum.pubkey_at(1).unwrap();
        let a = vec![0xA0];
        let b = vec![0xB0];
        // `a` is good for both signers, `b` only for signer 0.
        let verifier = TableVerifier::new(&[(pk0, a.as_slice()), (pk1, a.as_slice()), (pk0, b.as_slice())]);
        let absorber = ProofAbsorber::new(verifier);

        let candidate: Proof = vec![a.clone(), b.clone()].into();
        let outcome = absorber.evaluate(&fx.header, &candidate, &fx.quorum);
        // Signer 0 takes `a` first; signer 1 has nothing left that verifies.
        assert_eq!(outcome.assignments, vec![Some(0), None]);
        assert_eq!(outcome.accepted, 1);
    }

    #[test]
    fn test_sequential_scan_stops_at_first_match() {
        let fx = Fixture::new(1, 1);
        let pk0 = fx.quorum.pubkey_at(0).unwrap();
        let good = vec![0x01];
        let verifier = TableVerifier::new(&[(pk0, good.as_slice())]);
        let absorber = ProofAbsorber::with_config(
            verifier,
            AbsorptionConfig {
                parallel_min_work: usize::MAX,
            },
        );

        let candidate: Proof = vec![good, vec![0x02], vec![0x03]].into();
        let outcome = absorber.evaluate(&fx.header, &candidate, &fx.quorum);
        assert_eq!(outcome.accepted, 1);
        assert_eq!(absorber.verifier.calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let fx = Fixture::new(5, 3);
        let mut sigs: Vec<Vec<u8>> = (0..5).map(|i| fx.sign(i)).collect();
        sigs.reverse();
        sigs.push(tampered(fx.sign(2)));
        sigs.push(vec![0x00; 8]);
        sigs.push(sigs[0].clone());
        let candidate = Proof::from(sigs);

        let seq = sequential().evaluate(&fx.header, &candidate, &fx.quorum);
        let par = parallel().evaluate(&fx.header, &candidate, &fx.quorum);
        assert_eq!(seq, par);
        assert_eq!(seq.accepted, 5);
    }

    #[test]
    fn test_assign_respects_consumption() {
        // Every candidate verifies for every signer.
        let picks = assign(3, 2, |_, _| true);
        assert_eq!(picks, vec![Some(0), Some(1), None]);
    }
}

//! # Signed Block Vector
//!
//! A block from a reference network signed by a 3-of-3 federation. The proof
//! it carries was produced by absorbing three signatures, so absorbing the
//! same signatures in any order onto the bare header must reproduce the
//! serialized block byte for byte.

#[cfg(test)]
mod tests {
    use fc_chainparams::{ChainParams, ChainParamsConfig};
    use fc_consensus::{EcdsaVerifier, MultisigCondition, ProofAbsorber};
    use shared_crypto::Secp256k1KeyPair;
    use shared_types::block::HEADER_SIZE_WITHOUT_PROOF;
    use shared_types::{deserialize, serialize, Block, Proof};

    // =========================================================================
    // FIXTURES
    // =========================================================================

    const SIGNED_BLOCK_HEX: &str = include_str!("../../fixtures/signed_block.hex");

    const SIGNING_HASH: &str = "01ca66a8f3f99db7971c31e26634ea981cd827f2dee853969e0c9462563f264a";

    const K0: &str = "03831a69b8009833ab5b0326012eaf489bfea35a7321b1ca15b11d88131423fafc";
    const K1: &str = "02ce7edc292d7b747fab2f23584bbafaffde5c8ff17cf689969614441e0527b900";
    const K2: &str = "02785a891f323acd6cef0fc509bb14304410595914267c50467e51c87142acbb5e";

    /// Signatures in the fixture's proof, i.e. in signer order K2, K1, K0.
    const SIG_K2: &str = "304402200e85b4a88774fb62b2c8c4ee1372bd7bc617e3b0063d0606057b3c19f84eec6502200fec80d11fdc29497a35b8757a14b284641ff4c2c35ce67fa1d30fb5e22d320a";
    const SIG_K1: &str = "304402205807837bc71328560dadac26608fa5b0d44ce81d772c1dd43aebcf5ce33a565802204987121ae4166063028b0050af5f7e84994b4130ad32a994eb50f78c1ef5fb53";
    const SIG_K0: &str = "3044022071f1e3217fab13a8f9d4aec53af7bdb93913a15e1cc01b33a20227415a5ed3e202201a26441d61fcc9a890c29599b2aa848ea406299d0bb8090ce6027ec82abdd6ec";

    fn block_bytes() -> Vec<u8> {
        hex::decode(SIGNED_BLOCK_HEX.trim()).unwrap()
    }

    fn signed_block() -> Block {
        deserialize(&block_bytes()).unwrap()
    }

    fn unsigned_block() -> Block {
        let mut block = signed_block();
        block.header.proof = Proof::new();
        block
    }

    fn sig(text: &str) -> Vec<u8> {
        hex::decode(text).unwrap()
    }

    /// Quorum as configured on the reference network: keys listed in any
    /// order, positions fixed by sorting.
    fn quorum() -> MultisigCondition {
        let config = ChainParamsConfig {
            signer_pubkeys: vec![K0.into(), K1.into(), K2.into()],
            threshold: 3,
            ..Default::default()
        };
        ChainParams::from_config(&config)
            .unwrap()
            .signed_blocks_condition()
            .clone()
    }

    fn tampered(mut sig: Vec<u8>) -> Vec<u8> {
        sig[2] = 0x30;
        sig
    }

    // =========================================================================
    // DECODING
    // =========================================================================

    #[test]
    fn test_fixture_layout() {
        let bytes = block_bytes();
        let block = signed_block();

        assert_eq!(bytes.len(), 3260);
        assert_eq!(block.header.version, 1);
        assert_eq!(block.transactions.len(), 9);
        assert_eq!(
            block.header.proof,
            Proof::from(vec![sig(SIG_K2), sig(SIG_K1), sig(SIG_K0)])
        );
        // The proof count directly follows the fixed-size header fields.
        assert_eq!(bytes[HEADER_SIZE_WITHOUT_PROOF], 0x03);
        assert_eq!(serialize(&block), bytes);
    }

    #[test]
    fn test_signing_hash_and_merkle_root() {
        let block = signed_block();
        assert_eq!(hex::encode(block.signing_hash().as_bytes()), SIGNING_HASH);
        assert_eq!(unsigned_block().signing_hash(), block.signing_hash());
        assert_ne!(unsigned_block().hash(), block.hash());
        assert_eq!(block.compute_merkle_root(), block.header.merkle_root);
    }

    #[test]
    fn test_signatures_verify_for_their_signers() {
        let quorum = quorum();
        let message = signed_block().signing_hash();
        for (i, expected) in [K2, K1, K0].iter().enumerate() {
            assert_eq!(quorum.pubkey_at(i).unwrap().to_hex(), *expected);
        }
        for (i, s) in [SIG_K2, SIG_K1, SIG_K0].iter().enumerate() {
            assert!(quorum
                .pubkey_at(i)
                .unwrap()
                .verify_prehash(message.as_bytes(), &sig(s)));
        }
    }

    // =========================================================================
    // ABSORPTION
    // =========================================================================

    #[test]
    fn test_absorb_any_order_reproduces_block() {
        let quorum = quorum();
        let absorber = ProofAbsorber::new(EcdsaVerifier);
        let expected = block_bytes();
        let sigs = [sig(SIG_K0), sig(SIG_K1), sig(SIG_K2)];

        for order in [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]] {
            let candidate: Proof = order.iter().map(|&i| sigs[i].clone()).collect();
            let mut block = unsigned_block();
            assert!(absorber.absorb(&mut block.header, &candidate, &quorum));
            assert_eq!(serialize(&block), expected, "order {:?}", order);
        }
    }

    #[test]
    fn test_tampered_signature_blocks_threshold() {
        let quorum = quorum();
        let absorber = ProofAbsorber::new(EcdsaVerifier);
        let mut block = unsigned_block();

        let candidate: Proof = vec![sig(SIG_K2), sig(SIG_K0), tampered(sig(SIG_K1))].into();
        assert!(!absorber.absorb(&mut block.header, &candidate, &quorum));
        assert!(block.header.proof.is_empty());

        let outcome = absorber.evaluate(&block.header, &candidate, &quorum);
        assert_eq!(outcome.accepted, 2);
        assert_eq!(outcome.assignments, vec![Some(0), None, Some(1)]);

        let candidate: Proof = vec![
            sig(SIG_K2),
            sig(SIG_K0),
            tampered(sig(SIG_K1)),
            sig(SIG_K1),
        ]
        .into();
        assert!(absorber.absorb(&mut block.header, &candidate, &quorum));
        assert_eq!(serialize(&block), block_bytes());
    }

    #[test]
    fn test_reabsorbing_stored_proof_is_identity() {
        let quorum = quorum();
        let absorber = ProofAbsorber::new(EcdsaVerifier);
        let mut block = signed_block();
        let stored = block.header.proof.clone();

        assert!(absorber.absorb(&mut block.header, &stored, &quorum));
        assert_eq!(block.header.proof, stored);
    }

    #[test]
    fn test_resigning_with_reference_keys() {
        // Fresh signatures from the reference keys land in signer order.
        let secrets = [
            "dbb9d19637018267268dfc2cc7aec07e7217c1a2d6733e1184a0909273bf078b",
            "ae6ae8e5ccbfb04590405997ee2d52d2b330726137b875053c36d94e974d162f",
            "0dbbe8e4ae425a6d2687f1a7e3ba17bc98c673636790f1b8ad91193c05875ef1",
        ];
        let mut block = unsigned_block();
        let message = block.signing_hash();
        let candidate: Proof = secrets
            .iter()
            .map(|s| {
                Secp256k1KeyPair::from_slice(&hex::decode(s).unwrap())
                    .unwrap()
                    .sign_prehash(message.as_bytes())
                    .unwrap()
            })
            .collect();

        let quorum = quorum();
        assert!(ProofAbsorber::new(EcdsaVerifier).absorb(&mut block.header, &candidate, &quorum));
        for (i, s) in block.header.proof.iter().enumerate() {
            assert!(quorum.pubkey_at(i).unwrap().verify_prehash(message.as_bytes(), s));
        }
    }
}

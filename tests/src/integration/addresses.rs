//! # Addresses
//!
//! Signer keys from the chain parameters rendered as addresses on each
//! network, and colored destinations carried through output scripts.

#[cfg(test)]
mod tests {
    use fc_chainparams::{Base58Type, ChainParams, ChainParamsConfig, NetworkMode};
    use fc_key_io::{
        decode_base58check, decode_destination, encode_destination, extract_destination,
        script_for_destination, ColorIdentifier, Destination,
    };
    use shared_types::{Hash256, OutPoint};

    const K0: &str = "03831a69b8009833ab5b0326012eaf489bfea35a7321b1ca15b11d88131423fafc";
    const K1: &str = "02ce7edc292d7b747fab2f23584bbafaffde5c8ff17cf689969614441e0527b900";

    fn params(mode: NetworkMode) -> ChainParams {
        ChainParams::from_config(&ChainParamsConfig {
            mode,
            signer_pubkeys: vec![K0.into(), K1.into()],
            threshold: 1,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_signer_addresses_per_network() {
        for mode in [NetworkMode::Prod, NetworkMode::Dev] {
            let params = params(mode);
            let prefixes = params.base58_prefixes();
            for signer in params.signed_blocks_condition().signers() {
                let dest = Destination::for_pubkey(signer);
                let address = encode_destination(&dest, prefixes).unwrap();

                let payload = decode_base58check(&address).unwrap();
                assert_eq!(&payload[..1], params.base58_prefix(Base58Type::PubkeyAddress));
                assert_eq!(decode_destination(&address, prefixes), dest);
            }
        }
    }

    #[test]
    fn test_colored_destination_through_script_and_address() {
        let params = params(NetworkMode::Dev);
        let prefixes = params.base58_prefixes();
        let signer = params.signed_blocks_condition().pubkey_at(0).unwrap();
        let color = ColorIdentifier::non_reissuable(&OutPoint::new(
            Hash256::double_sha256(b"funding"),
            0,
        ));

        let dest = Destination::for_pubkey(signer).with_color(color);
        let script = script_for_destination(&dest);
        assert_eq!(extract_destination(&script), dest);

        let address = encode_destination(&dest, prefixes).unwrap();
        let payload = decode_base58check(&address).unwrap();
        assert_eq!(payload.len(), 1 + 33 + 20);
        assert_eq!(payload[0], 0x70);
        assert_eq!(decode_destination(&address, prefixes), dest);
        assert_eq!(decode_destination(&address, self::params(NetworkMode::Prod).base58_prefixes()), Destination::None);
    }
}

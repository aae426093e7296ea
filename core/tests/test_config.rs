// TokenConfig: serde defaults, validation, service construction.

#[cfg(test)]
mod tests {
    use pollster::block_on;
    use opaque_token::prelude::*;

    const KEY: &[u8] = b"onvIzKsW6Ec2Q5VqS49zrNlmvrvibh8e";

    #[test]
    fn empty_object_is_default() -> anyhow::Result<()> {
        let cfg: TokenConfig = serde_json::from_str("{}")?;
        assert_eq!(cfg, TokenConfig::default());
        assert_eq!(cfg.cipher, CipherSuite::ChaCha20Poly1305);
        assert_eq!(cfg.hash, HashAlg::Sha256);
        assert_eq!(cfg.encoding, TokenEncoding::Base64UrlNoPad);
        assert_eq!(cfg.csrf_nonce_size, 16);
        Ok(())
    }

    #[test]
    fn names_on_the_wire() -> anyhow::Result<()> {
        let cfg: TokenConfig = serde_json::from_str(
            r#"{ "cipher": "aes_gcm", "hash": "sha512_256", "encoding": "hex", "csrf_nonce_size": 24 }"#,
        )?;
        assert_eq!(cfg.cipher, CipherSuite::AesGcm);
        assert_eq!(cfg.hash, HashAlg::Sha512_256);
        assert_eq!(cfg.encoding, TokenEncoding::Hex);
        assert_eq!(cfg.csrf_nonce_size, 24);

        let json = serde_json::to_value(TokenConfig::default())?;
        assert_eq!(json["cipher"], "chacha20_poly1305");
        assert_eq!(json["encoding"], "base64_url_no_pad");
        Ok(())
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<TokenConfig>(r#"{ "cypher": "aes_gcm" }"#).is_err());
        assert!(serde_json::from_str::<TokenConfig>(r#"{ "hash": "md5" }"#).is_err());
    }

    #[test]
    fn zero_csrf_nonce_fails_validation() -> anyhow::Result<()> {
        let cfg: TokenConfig = serde_json::from_str(r#"{ "csrf_nonce_size": 0 }"#)?;
        assert!(matches!(cfg.validate(), Err(TokenError::Configuration(_))));
        assert!(matches!(cfg.csrf(StaticKey::new(KEY)), Err(TokenError::Configuration(_))));
        Ok(())
    }

    #[test]
    fn builds_working_services() -> anyhow::Result<()> {
        let cfg = TokenConfig { cipher: CipherSuite::AesGcm, encoding: TokenEncoding::Hex, ..Default::default() };

        let codec = cfg.codec(StaticKey::new(KEY))?;
        assert_eq!(codec.cipher(), CipherSuite::AesGcm);
        let token = block_on(codec.encode_to_string(b"cursor"))?;
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(block_on(codec.decode_string(&token))?, b"cursor");

        let signer = cfg.signer(StaticKey::new(KEY))?;
        assert_eq!(signer.hash(), HashAlg::Sha256);

        let csrf = cfg.csrf(StaticKey::new(KEY))?;
        let t = block_on(csrf.issue("sid"))?;
        assert!(block_on(csrf.validate(&t, "sid"))?);
        Ok(())
    }
}

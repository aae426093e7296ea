// TLV envelope framing: layout, strict parsing and hostile input.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use opaque_token::envelope::{
        decode_envelope, encode_envelope, EnvelopeError, KeyVersion, ParseOptions, Tag, VersionKind,
    };

    fn codec_opts() -> ParseOptions {
        ParseOptions::codec(VersionKind::Label)
    }

    fn signer_opts() -> ParseOptions {
        ParseOptions::signer(VersionKind::Label)
    }

// # ✅ 1. Exact byte layout

    #[test]
    fn unversioned_envelope_is_terminal_only() {
        let out = encode_envelope(None, None, b"ct").unwrap();
        assert_eq!(out, vec![0x00, b'c', b't']);
    }

    #[test]
    fn label_version_then_nonce_then_terminal() {
        let v = KeyVersion::from("v1");
        let out = encode_envelope(Some(&v), Some(b"n0"), b"mac").unwrap();
        assert_eq!(out, vec![0x01, 2, b'v', b'1', 0x02, 2, b'n', b'0', 0x00, b'm', b'a', b'c']);
    }

    #[test]
    fn number_version_is_u64_little_endian() {
        let v = KeyVersion::Number(0x0102);
        let out = encode_envelope(Some(&v), None, b"").unwrap();
        assert_eq!(out, vec![0x01, 8, 0x02, 0x01, 0, 0, 0, 0, 0, 0, 0x00]);

        let view = decode_envelope(&out, ParseOptions::codec(VersionKind::Number)).unwrap();
        assert_eq!(view.version, Some(KeyVersion::Number(0x0102)));
        assert!(view.payload.is_empty());
    }

    #[test]
    fn empty_nonce_is_omitted() {
        let out = encode_envelope(None, Some(b""), b"mac").unwrap();
        assert_eq!(out, vec![0x00, b'm', b'a', b'c']);
    }

    #[test]
    fn terminal_consumes_everything_including_tag_bytes() {
        let buf = [0x00, 0x01, 0x02, 0x00, 0xFF];
        let view = decode_envelope(&buf, codec_opts()).unwrap();
        assert_eq!(view.version, None);
        assert_eq!(view.payload, &[0x01, 0x02, 0x00, 0xFF]);
    }

    #[test]
    fn signer_view_exposes_nonce() {
        let buf = [0x02, 3, 1, 2, 3, 0x00, 9, 9];
        let view = decode_envelope(&buf, signer_opts()).unwrap();
        assert_eq!(view.nonce, Some(&[1u8, 2, 3][..]));
        assert_eq!(view.payload, &[9, 9]);
    }

// # ✅ 2. Encode-side limits

    #[test]
    fn label_of_255_bytes_fits_256_does_not() {
        let ok = KeyVersion::Label("a".repeat(255));
        let out = encode_envelope(Some(&ok), None, b"x").unwrap();
        assert_eq!(out[1], 255);

        let too_long = KeyVersion::Label("a".repeat(256));
        let err = encode_envelope(Some(&too_long), None, b"x").unwrap_err();
        assert_eq!(err, EnvelopeError::VersionTooLong { have: 256, max: 255 });
        assert!(err.is_encode_side());
    }

    #[test]
    fn nonce_over_255_bytes_is_rejected() {
        let err = encode_envelope(None, Some(&[0u8; 256]), b"x").unwrap_err();
        assert_eq!(err, EnvelopeError::NonceTooLong { have: 256, max: 255 });
    }

// # ✅ 3. Malformed input

    #[test]
    fn empty_input_has_no_terminal() {
        assert_eq!(decode_envelope(&[], codec_opts()), Err(EnvelopeError::MissingTerminal));
    }

    #[test]
    fn version_without_terminal() {
        let buf = [0x01, 2, b'v', b'1'];
        assert_eq!(decode_envelope(&buf, codec_opts()), Err(EnvelopeError::MissingTerminal));
    }

    #[test]
    fn missing_length_byte() {
        assert_eq!(
            decode_envelope(&[0x01], codec_opts()),
            Err(EnvelopeError::Truncated { tag: Tag::Version })
        );
    }

    #[test]
    fn declared_length_past_end() {
        let buf = [0x01, 10, b'v', b'1'];
        assert_eq!(
            decode_envelope(&buf, codec_opts()),
            Err(EnvelopeError::LengthOutOfRange { tag: Tag::Version, declared: 10, remaining: 2 })
        );
    }

    #[test]
    fn unknown_tag() {
        let err = decode_envelope(&[0x07, 0x00], codec_opts()).unwrap_err();
        assert_eq!(err, EnvelopeError::UnexpectedTag { raw: 0x07 });
        assert_eq!(err.to_string(), "unexpected tag: 0x7");
    }

    #[test]
    fn nonce_rejected_on_codec_path() {
        let buf = [0x02, 1, 0xAA, 0x00];
        assert_eq!(
            decode_envelope(&buf, codec_opts()),
            Err(EnvelopeError::UnexpectedTag { raw: 0x02 })
        );
        assert!(decode_envelope(&buf, signer_opts()).is_ok());
    }

    #[test]
    fn duplicate_entries() {
        let versions = [0x01, 1, b'a', 0x01, 1, b'b', 0x00];
        assert_eq!(
            decode_envelope(&versions, codec_opts()),
            Err(EnvelopeError::DuplicateEntry { tag: Tag::Version })
        );

        let nonces = [0x02, 1, 1, 0x02, 1, 2, 0x00];
        assert_eq!(
            decode_envelope(&nonces, signer_opts()),
            Err(EnvelopeError::DuplicateEntry { tag: Tag::Nonce })
        );
    }

    #[test]
    fn number_version_of_wrong_width() {
        let buf = [0x01, 4, 1, 0, 0, 0, 0x00];
        let err = decode_envelope(&buf, ParseOptions::codec(VersionKind::Number)).unwrap_err();
        assert!(matches!(err, EnvelopeError::InvalidVersion(_)));
        assert!(!err.is_encode_side());
    }

    #[test]
    fn label_must_be_utf8() {
        let buf = [0x01, 2, 0xC3, 0x28, 0x00];
        assert!(matches!(
            decode_envelope(&buf, codec_opts()),
            Err(EnvelopeError::InvalidVersion(_))
        ));
    }

// # ✅ 4. Hostile input never panics

    proptest! {
        #[test]
        fn prop_decode_never_panics(buf in proptest::collection::vec(any::<u8>(), 0..64), nonce_ok in any::<bool>()) {
            let opts = ParseOptions { version_kind: VersionKind::Label, allow_nonce: nonce_ok };
            let _ = decode_envelope(&buf, opts);
            let _ = decode_envelope(&buf, ParseOptions::codec(VersionKind::Number));
        }

        #[test]
        fn prop_payload_survives_framing(
            label in "[a-z0-9-]{1,32}",
            nonce in proptest::collection::vec(any::<u8>(), 1..32),
            payload in proptest::collection::vec(any::<u8>(), 0..64),
        ) {
            let v = KeyVersion::Label(label);
            let out = encode_envelope(Some(&v), Some(&nonce), &payload).unwrap();
            let view = decode_envelope(&out, signer_opts()).unwrap();
            prop_assert_eq!(view.version, Some(v));
            prop_assert_eq!(view.nonce, Some(&nonce[..]));
            prop_assert_eq!(view.payload, &payload[..]);
        }
    }
}

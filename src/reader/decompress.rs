use std::borrow::Cow;
use std::io::Read;

use flate2::read::MultiGzDecoder;

use crate::error::{Error, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const GZIP_CONTENT_TYPES: [&str; 2] = ["application/x-gzip", "application/gzip"];

/// Content metadata reported by the object store alongside an object body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentHint<'a> {
    pub content_type: Option<&'a str>,
    pub content_encoding: Option<&'a str>,
}

impl<'a> ContentHint<'a> {
    pub const fn new(content_type: Option<&'a str>, content_encoding: Option<&'a str>) -> Self {
        Self {
            content_type,
            content_encoding,
        }
    }

    pub fn declares_gzip(&self) -> bool {
        let by_type = self
            .content_type
            .is_some_and(|t| GZIP_CONTENT_TYPES.iter().any(|g| t.eq_ignore_ascii_case(g)));
        let by_encoding = self
            .content_encoding
            .is_some_and(|e| e.eq_ignore_ascii_case("gzip"));
        by_type || by_encoding
    }
}

/// Returns the decompressed body when it starts with the gzip magic number, otherwise the body
/// unchanged. Every member of a multi-member stream is decompressed. The hint only affects
/// logging: a body labelled gzip that isn't is read as-is.
pub(super) fn maybe_decompress<'b>(body: &'b [u8], hint: &ContentHint<'_>) -> Result<Cow<'b, [u8]>> {
    if !body.starts_with(&GZIP_MAGIC) {
        if hint.declares_gzip() {
            log::warn!("Log file is labelled {hint:?} but is not gzipped; reading it as-is.");
        }
        return Ok(Cow::Borrowed(body));
    }

    let mut decompressed = Vec::with_capacity(body.len() * 4);
    MultiGzDecoder::new(body)
        .read_to_end(&mut decompressed)
        .map_err(|e| {
            log::error!("Error unzipping log file: {e}");
            Error::Decompress(e)
        })?;
    Ok(Cow::Owned(decompressed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::gzip;

    #[test]
    fn test_declares_gzip() {
        assert!(ContentHint::new(Some("application/x-gzip"), None).declares_gzip());
        assert!(ContentHint::new(Some("application/gzip"), None).declares_gzip());
        assert!(ContentHint::new(Some("application/json"), Some("GZIP")).declares_gzip());
        assert!(!ContentHint::new(Some("application/json"), None).declares_gzip());
        assert!(!ContentHint::default().declares_gzip());
    }

    #[test]
    fn test_plain_body_is_borrowed() {
        let body = br#"{"Records":[]}"#;
        let out = maybe_decompress(body, &ContentHint::default()).unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(&*out, body);
    }

    #[test]
    fn test_sniffs_gzip_without_hint() {
        let body = gzip(br#"{"Records":[]}"#);
        let out = maybe_decompress(&body, &ContentHint::default()).unwrap();
        assert_eq!(&*out, br#"{"Records":[]}"#);
    }

    #[test]
    fn test_declared_gzip_with_plain_body_is_read_as_is() {
        let hint = ContentHint::new(Some("application/x-gzip"), None);
        let out = maybe_decompress(br#"{"Records":[]}"#, &hint).unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(&*out, br#"{"Records":[]}"#);
    }

    #[test]
    fn test_reads_every_gzip_member() {
        let mut body = gzip(b"hello, ");
        body.extend(gzip(b"world"));
        let out = maybe_decompress(&body, &ContentHint::default()).unwrap();
        assert_eq!(&*out, b"hello, world");
    }

    #[test]
    fn test_corrupt_gzip_fails() {
        let mut body = gzip(br#"{"Records":[]}"#);
        body[10..].iter_mut().for_each(|b| *b = 0xff);
        let err = maybe_decompress(&body, &ContentHint::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_truncated_gzip_fails() {
        let body = gzip(br#"{"Records":[{"foo":"bar"}]}"#);
        let err = maybe_decompress(&body[..body.len() / 2], &ContentHint::default()).unwrap_err();
        assert!(matches!(err, Error::Decompress(_)));
    }
}

//! Session token codec
//!
//! The backend issues compact `header.payload.signature` tokens. The client
//! never verifies signatures; it only reads the payload to learn who is
//! signed in and when the session ends. Every failure mode collapses to
//! `None` so a damaged token degrades to "signed out".

use base64::{Engine as _, engine::general_purpose};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::client::wire::opt_seconds_from_any;

/// Claims carried in the token payload segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub rol: String,

    #[serde(
        default,
        deserialize_with = "opt_seconds_from_any",
        skip_serializing_if = "Option::is_none"
    )]
    pub iat: Option<i64>,

    #[serde(
        default,
        deserialize_with = "opt_seconds_from_any",
        skip_serializing_if = "Option::is_none"
    )]
    pub exp: Option<i64>,
}

/// Decode base64url (URL-safe base64, padding optional)
fn base64_decode_url(input: &str) -> Option<Vec<u8>> {
    // Base64url uses - instead of + and _ instead of /
    let standard_b64 = input.replace('-', "+").replace('_', "/");

    let padding = match standard_b64.len() % 4 {
        0 => "",
        2 => "==",
        3 => "=",
        _ => return None,
    };

    let padded = format!("{}{}", standard_b64, padding);

    general_purpose::STANDARD.decode(padded).ok()
}

/// Interpret decoded bytes as UTF-8, falling back to one char per byte.
fn bytes_to_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    }
}

/// Decode the payload segment of a token.
///
/// Returns `None` unless the token has exactly three dot-separated segments
/// and the middle one is base64url-encoded JSON.
pub fn decode(token: &str) -> Option<TokenPayload> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let bytes = base64_decode_url(parts[1])?;
    let text = bytes_to_text(bytes);
    serde_json::from_str(&text).ok()
}

/// Whether the token is past its `exp` claim at `now_secs`.
///
/// Undecodable tokens and tokens without `exp` are treated as not expired.
pub fn is_expired_at(token: &str, now_secs: i64) -> bool {
    match decode(token).and_then(|payload| payload.exp) {
        Some(exp) => exp <= now_secs,
        None => false,
    }
}

/// Whether the token is past its `exp` claim now.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now().timestamp())
}

/// Build an unsigned token around a payload.
///
/// The signature segment is a placeholder; the codec never inspects it.
pub fn encode_unsigned(payload: &TokenPayload) -> String {
    let engine = general_purpose::URL_SAFE_NO_PAD;
    let header = engine.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = serde_json::to_vec(payload).unwrap_or_default();
    format!("{}.{}.unsigned", header, engine.encode(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn payload(exp: Option<i64>) -> TokenPayload {
        TokenPayload {
            id: 1,
            username: "AdminUser".to_string(),
            rol: "admin".to_string(),
            iat: None,
            exp,
        }
    }

    #[test]
    fn test_decode_valid_token() {
        let token = encode_unsigned(&payload(None));
        let decoded = decode(&token).unwrap();
        assert_eq!(decoded.id, 1);
        assert_eq!(decoded.username, "AdminUser");
        assert_eq!(decoded.rol, "admin");
    }

    #[test]
    fn test_decode_rejects_wrong_segment_count() {
        for token in ["", "abc", "a.b", "a.b.c.d", "...."] {
            assert!(decode(token).is_none(), "expected None for {:?}", token);
        }
    }

    #[test]
    fn test_decode_rejects_non_json_payload() {
        let body = general_purpose::URL_SAFE_NO_PAD.encode("not json at all");
        let token = format!("header.{}.sig", body);
        assert!(decode(&token).is_none());
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert!(decode("header.@@@@.sig").is_none());
        // length % 4 == 1 can never be valid base64
        assert!(decode("header.abcde.sig").is_none());
    }

    #[test]
    fn test_decode_handles_padding_variants() {
        let json = r#"{"id":7,"username":"ana","rol":"user"}"#;
        let padded = general_purpose::URL_SAFE.encode(json);
        let unpadded = general_purpose::URL_SAFE_NO_PAD.encode(json);

        let a = decode(&format!("h.{}.s", padded)).unwrap();
        let b = decode(&format!("h.{}.s", unpadded)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.id, 7);
    }

    #[test]
    fn test_decode_non_ascii_username() {
        let mut p = payload(None);
        p.username = "José Núñez".to_string();
        let decoded = decode(&encode_unsigned(&p)).unwrap();
        assert_eq!(decoded.username, "José Núñez");
    }

    #[test]
    fn test_expired_one_second_in_the_past() {
        let now = 1_700_000_000;
        let token = encode_unsigned(&payload(Some(now - 1)));
        assert!(is_expired_at(&token, now));
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let now = 1_700_000_000;
        let token = encode_unsigned(&payload(Some(now)));
        assert!(is_expired_at(&token, now));
    }

    #[test]
    fn test_not_expired_one_second_in_the_future() {
        let now = 1_700_000_000;
        let token = encode_unsigned(&payload(Some(now + 1)));
        assert!(!is_expired_at(&token, now));
    }

    fn raw_token(payload_json: &str) -> String {
        format!("h.{}.s", general_purpose::URL_SAFE_NO_PAD.encode(payload_json))
    }

    #[test]
    fn test_fractional_timestamps_are_truncated() {
        let token =
            raw_token(r#"{"id":1,"username":"a","rol":"admin","iat":1700000000.9,"exp":1999999999.5}"#);
        let decoded = decode(&token).unwrap();
        assert_eq!(decoded.exp, Some(1_999_999_999));
        assert_eq!(decoded.iat, Some(1_700_000_000));
        assert!(!is_expired_at(&token, 1_999_999_998));
        assert!(is_expired_at(&token, 1_999_999_999));
    }

    #[test]
    fn test_string_exp_is_accepted() {
        let token = raw_token(r#"{"id":1,"username":"a","rol":"user","exp":"1999999999"}"#);
        assert_eq!(decode(&token).unwrap().exp, Some(1_999_999_999));
    }

    #[test]
    fn test_zero_exp_counts_as_expired() {
        let token = raw_token(r#"{"id":1,"username":"a","rol":"user","exp":0}"#);
        assert_eq!(decode(&token).unwrap().exp, Some(0));
        assert!(is_expired(&token));
    }

    #[test]
    fn test_null_exp_never_expires() {
        let token = raw_token(r#"{"id":1,"username":"a","rol":"user","exp":null}"#);
        assert_eq!(decode(&token).unwrap().exp, None);
        assert!(!is_expired(&token));
    }

    #[test]
    fn test_missing_exp_is_not_expired() {
        let token = encode_unsigned(&payload(None));
        assert!(!is_expired(&token));
    }

    #[test]
    fn test_malformed_token_is_not_expired() {
        assert!(!is_expired("garbage"));
    }

    #[test]
    fn test_is_expired_uses_wall_clock() {
        let past = encode_unsigned(&payload(Some(Utc::now().timestamp() - 60)));
        let future = encode_unsigned(&payload(Some(Utc::now().timestamp() + 3600)));
        assert!(is_expired(&past));
        assert!(!is_expired(&future));
    }

    proptest! {
        #[test]
        fn prop_round_trip(id in any::<i64>(), username in "\\PC{0,24}", rol in "[a-zA-Z]{0,12}") {
            let original = TokenPayload { id, username, rol, iat: None, exp: None };
            let decoded = decode(&encode_unsigned(&original));
            prop_assert_eq!(decoded, Some(original));
        }

        #[test]
        fn prop_wrong_segment_count_is_none(parts in proptest::collection::vec("[A-Za-z0-9_-]{0,8}", 0..8)) {
            prop_assume!(parts.len() != 3);
            let token = parts.join(".");
            prop_assume!(token.split('.').count() != 3);
            prop_assert!(decode(&token).is_none());
        }
    }
}

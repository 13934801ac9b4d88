//! Request ID generation and response header helpers.

use salvo::{http::header::HeaderValue, prelude::Response};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest client-supplied request id that is echoed back.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Reuse the caller's request id when it is short, visible ASCII; otherwise mint one.
pub(super) fn resolve_request_id(header_value: Option<String>) -> String {
    header_value
        .map(|value| value.trim().to_owned())
        .filter(|value| is_acceptable(value))
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

pub(super) fn set_request_id_header(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => {
            warn!(
                request_id,
                "could not encode request id for response header: {source}"
            );
        }
    }
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_request_id_is_kept() {
        assert_eq!(resolve_request_id(Some(" abc-123 ".to_string())), "abc-123");
    }

    #[test]
    fn blank_or_oversized_ids_are_replaced() {
        let oversized = "x".repeat(MAX_REQUEST_ID_LEN + 1);

        for value in [String::new(), "has space".to_string(), oversized] {
            let resolved = resolve_request_id(Some(value.clone()));

            assert_ne!(resolved, value);
            assert!(Uuid::parse_str(&resolved).is_ok(), "expected a uuid, got {resolved}");
        }
    }
}

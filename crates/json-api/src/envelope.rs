//! Success response envelope.

use salvo::{oapi::ToSchema, prelude::Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum EnvelopeStatus {
    Success,
}

/// Every successful JSON body is `{"status": "success", "data": ...}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct Envelope<T> {
    pub status: EnvelopeStatus,
    pub data: T,
}

pub(crate) fn success<T>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        status: EnvelopeStatus::Success,
        data,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn wraps_data_with_success_status() -> TestResult {
        let Json(body) = success(json!({ "id": 1 }));

        assert_eq!(
            serde_json::to_value(body)?,
            json!({ "status": "success", "data": { "id": 1 } })
        );

        Ok(())
    }
}

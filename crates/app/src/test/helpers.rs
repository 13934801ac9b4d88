//! Test Helpers

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::auth::credentials::MockCredentialService;

fn test_verifier(input: &[u8]) -> String {
    format!("test:v1:{}", BASE64.encode(input))
}

/// A credential service whose verifiers are a reversible encoding of the input.
pub(crate) fn mock_credentials() -> MockCredentialService {
    let mut credentials = MockCredentialService::new();

    credentials
        .expect_hmac()
        .returning(|input| Ok(test_verifier(input)));

    credentials
        .expect_verify()
        .returning(|input, verifier| Ok(test_verifier(input) == verifier));

    credentials
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::auth::credentials::CredentialService;

    use super::*;

    #[tokio::test]
    async fn mock_credentials_verify_their_own_output() -> TestResult {
        let credentials = mock_credentials();

        let verifier = credentials.hmac(b"secret").await?;

        assert!(credentials.verify(b"secret", &verifier).await?);
        assert!(!credentials.verify(b"other", &verifier).await?);

        Ok(())
    }
}

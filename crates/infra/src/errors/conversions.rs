//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use veriprint_domain::VeriprintError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub VeriprintError);

impl From<InfraError> for VeriprintError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<VeriprintError> for InfraError {
    fn from(value: VeriprintError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoVeriprintError {
    fn into_veriprint(self) -> VeriprintError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → VeriprintError */
/* -------------------------------------------------------------------------- */

impl IntoVeriprintError for HttpError {
    fn into_veriprint(self) -> VeriprintError {
        if self.is_timeout() {
            return VeriprintError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return VeriprintError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return VeriprintError::MalformedResponse(format!("undecodable body: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message = status.canonical_reason().unwrap_or("unknown status").to_string();

            return match code {
                404 => VeriprintError::NotFound(format!("HTTP {code} {message}")),
                _ => VeriprintError::Upstream { status: code, message },
            };
        }

        if self.is_builder() {
            return VeriprintError::Internal(format!("invalid HTTP request: {self}"));
        }

        VeriprintError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_veriprint())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → VeriprintError */
/* -------------------------------------------------------------------------- */

impl IntoVeriprintError for JsonError {
    fn into_veriprint(self) -> VeriprintError {
        VeriprintError::MalformedResponse(format!(
            "invalid JSON at line {} column {}: {}",
            self.line(),
            self.column(),
            self
        ))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_veriprint())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

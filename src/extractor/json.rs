use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::error::{
    ApiError, BodyError, ErrorVerbosity, ErrorVerbosityProvider, InternalServerError,
};

/// Extracts the request body as JSON consuming the request, rejecting with an [`ApiError`].
///
/// The `Content-Type` header is not inspected. Only an unreadable body or one that does
/// not decode into `T` is a [`BodyError`].
pub struct ApiJson<T>(pub T);

impl<T> ApiJson<T>
where
    T: DeserializeOwned + JsonSchema,
{
    fn decode(verbosity: ErrorVerbosity, bytes: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(bytes).map_err(|err| {
            tracing::warn!(%err, "Undecodable body");

            Self::body_error(verbosity, err.to_string())
        })
    }

    fn body_error(verbosity: ErrorVerbosity, body_error_reason: String) -> ApiError {
        match serde_yaml::to_string(&schema_for!(T)) {
            Ok(body_expected_schema) => {
                BodyError::new(verbosity, body_error_reason, body_expected_schema).into()
            }
            Err(err) => InternalServerError::from_generic_error(verbosity, err).into(),
        }
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + JsonSchema + Debug + Send,
    S: Send + Sync + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "json_extractor", skip_all)]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let verbosity = state.error_verbosity();

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::warn!(?rejection, "Unreadable body");

            Self::body_error(verbosity, rejection.body_text())
        })?;

        let value = Self::decode(verbosity, &bytes)?;
        tracing::trace!(json=?value, "Extracted");

        Ok(ApiJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::book::BookPayload;

    #[test]
    fn decode_reports_reason_and_schema() {
        let err = ApiJson::<BookPayload>::decode(ErrorVerbosity::Full, br#"{"year":"1965"}"#)
            .err()
            .expect("Wrong typed year decoded");

        let err = serde_json::to_value(&err).expect("Error not serializable");
        assert_eq!(err["error_type"], "Body");
        assert!(err["error"]["body_error_reason"]
            .as_str()
            .is_some_and(|reason| reason.contains("invalid type")));
        assert!(err["error"]["body_expected_schema"].is_string());
    }

    #[test]
    fn decode_accepts_book_payload() {
        let payload = ApiJson::<BookPayload>::decode(
            ErrorVerbosity::Full,
            br#"{"title":"Dune","author":"Frank Herbert","year":1965}"#,
        )
        .expect("Valid body rejected");

        assert_eq!(payload, BookPayload::new("Dune", "Frank Herbert", 1965));
    }
}

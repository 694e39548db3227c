//! HTTP mapping for domain errors.
//!
//! The domain [`Error`] stays transport agnostic; this module gives it a
//! status code and a JSON body. Messages are redacted so storage or session
//! details never reach the client, but the trace id survives so the response
//! can be matched to the server logs.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redacted(error: &Error) -> Error {
    let redacted = Error::internal("Internal server error");
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(redacted(self))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use actix_web::body::to_bytes;
    use rstest::rstest;

    use super::*;

    const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

    async fn body_of(error: &Error) -> (StatusCode, Option<String>, Error) {
        let response = ResponseError::error_response(error);
        let status = response.status();
        let header = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = to_bytes(response.into_body()).await.expect("read body");
        let body = serde_json::from_slice(&bytes).expect("error json");
        (status, header, body)
    }

    #[rstest]
    fn internal_errors_are_server_errors() {
        let error = Error::internal("boom");
        assert_eq!(
            ResponseError::status_code(&error),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn internal_messages_are_redacted() {
        let error = Error::internal("session cookie exceeded 4096 bytes").with_trace_id(TRACE_ID);

        let (status, header, body) = body_of(&error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(header.as_deref(), Some(TRACE_ID));
        assert_eq!(body.message(), "Internal server error");
        assert_eq!(body.trace_id(), Some(TRACE_ID));
    }

    #[actix_web::test]
    async fn errors_without_trace_id_omit_the_header() {
        let error = Error::internal("bungalow 9 lookup failed");

        let (status, header, body) = body_of(&error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(header, None);
        assert_eq!(body.message(), "Internal server error");
        assert_eq!(body.trace_id(), None);
    }
}

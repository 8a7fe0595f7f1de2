//! Mapping of pipeline errors onto HTTP responses

use crate::domain::Ga4Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error returned by handlers, rendered as `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError(pub Ga4Error);

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    /// HTTP status for the underlying error
    pub fn status(&self) -> StatusCode {
        match self.0.root() {
            Ga4Error::Authentication(_) => StatusCode::UNAUTHORIZED,
            Ga4Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Ga4Error::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Ga4Error::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Ga4Error> for ApiError {
    fn from(err: Ga4Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(status = status.as_u16(), error = %self.0, "Request failed");
        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PipelineStep;
    use test_case::test_case;

    #[test_case(Ga4Error::Authentication("x".into()), StatusCode::UNAUTHORIZED ; "authentication")]
    #[test_case(Ga4Error::InvalidRequest("x".into()), StatusCode::BAD_REQUEST ; "invalid request")]
    #[test_case(Ga4Error::UpstreamUnavailable("x".into()), StatusCode::SERVICE_UNAVAILABLE ; "upstream")]
    #[test_case(Ga4Error::InvalidResponse("x".into()), StatusCode::BAD_GATEWAY ; "invalid response")]
    #[test_case(Ga4Error::write("out.csv", "disk full"), StatusCode::INTERNAL_SERVER_ERROR ; "write")]
    #[test_case(Ga4Error::Configuration("x".into()), StatusCode::INTERNAL_SERVER_ERROR ; "configuration")]
    fn test_status_mapping(error: Ga4Error, expected: StatusCode) {
        assert_eq!(ApiError(error).status(), expected);
    }

    #[test]
    fn test_status_looks_through_property_context() {
        let err = Ga4Error::Authentication("expired".into())
            .in_property("123", PipelineStep::Fetch { batch: 2 });
        assert_eq!(ApiError(err).status(), StatusCode::UNAUTHORIZED);
    }
}

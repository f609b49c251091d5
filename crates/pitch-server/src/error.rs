use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pitch_core::PitchError;
use tmdb_client::TmdbError;

// ---------------------------------------------------------------------------
// Internal sentinel for an explicit 404
// ---------------------------------------------------------------------------

/// Carries an explicit HTTP 404 through the `anyhow::Error` chain.
#[derive(Debug)]
struct NotFoundError(String);

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for NotFoundError {}

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self(NotFoundError(msg.into()).into())
    }

    fn status(&self) -> StatusCode {
        if self.0.downcast_ref::<NotFoundError>().is_some() {
            return StatusCode::NOT_FOUND;
        }
        if let Some(e) = self.0.downcast_ref::<PitchError>() {
            return match e {
                PitchError::SegmentNotFound(_)
                | PitchError::CheckpointNotConfigured(_)
                | PitchError::ConfigNotFound(_) => StatusCode::NOT_FOUND,
                PitchError::InvalidCheckpoint(_)
                | PitchError::InvalidMode(_)
                | PitchError::InvalidConfig(_)
                | PitchError::DuplicateSegment(_) => StatusCode::BAD_REQUEST,
                PitchError::Io(_) | PitchError::Yaml(_) | PitchError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
        }
        if let Some(e) = self.0.downcast_ref::<TmdbError>() {
            return match e {
                TmdbError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
                TmdbError::Http(_)
                | TmdbError::Status { .. }
                | TmdbError::Parse { .. }
                | TmdbError::NoResults(_) => StatusCode::BAD_GATEWAY,
            };
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(%status, error = %self.0, "request failed");
        }
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn segment_not_found_maps_to_404() {
        let err = AppError(PitchError::SegmentNotFound("Nope".into()).into());
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unconfigured_checkpoint_maps_to_404() {
        let err = AppError(PitchError::CheckpointNotConfigured(15).into());
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_checkpoint_maps_to_400() {
        let err = AppError(PitchError::InvalidCheckpoint("soon".into()).into());
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_mode_maps_to_400() {
        let err = AppError(PitchError::InvalidMode("turbo".into()).into());
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_tmdb_key_maps_to_503() {
        let err = AppError(TmdbError::NotConfigured.into());
        assert_eq!(status_of(err), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn upstream_failure_maps_to_502() {
        let err = AppError(
            TmdbError::Status {
                status: 401,
                message: "Invalid API key".into(),
            }
            .into(),
        );
        assert_eq!(status_of(err), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_of(AppError(TmdbError::NoResults("none".into()).into())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn io_error_maps_to_500() {
        let err = AppError(PitchError::Io(std::io::Error::other("disk full")).into());
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unknown_error_maps_to_500() {
        assert_eq!(
            status_of(AppError(anyhow::anyhow!("something unexpected"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_constructor_maps_to_404() {
        assert_eq!(status_of(AppError::not_found("x")), StatusCode::NOT_FOUND);
    }

    #[test]
    fn response_body_is_json() {
        let response = AppError(PitchError::SegmentNotFound("x".into()).into()).into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(ct.to_str().unwrap().contains("application/json"));
    }
}

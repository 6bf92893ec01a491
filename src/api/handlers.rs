use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use super::{HealthResponse, SpeakRequest, SpeakResponse};
use crate::api::routes::AppState;
use crate::error::AppError;

/// Header carrying the proxy key. Header names are matched case-insensitively.
pub const PROXY_KEY_HEADER: &str = "miguel";

/// Body limit for synthesis requests (1 MiB)
const BODY_LIMIT_BYTES: usize = 1 << 20;

pub async fn speak(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<SpeakResponse>, AppError> {
    // Configuration comes before auth and validation
    let api_key = state
        .config
        .elevenlabs_api_key
        .as_ref()
        .ok_or(AppError::MissingApiKey)?;

    authorize(state.config.proxy_key.as_ref(), &headers)?;

    let body = read_body(body).await?;
    // Only JSON bodies carry fields; anything else reads as an empty request
    let request = if is_json(&headers) {
        SpeakRequest::from_body(&body)?
    } else {
        SpeakRequest::default()
    };
    let text = request.validated_text()?;
    let voice = request.voice_id();

    let audio = state.tts.speak(&text, voice.as_deref(), api_key).await?;

    Ok(Json(audio.into()))
}

fn authorize(proxy_key: Option<&SecretString>, headers: &HeaderMap) -> Result<(), AppError> {
    let Some(expected) = proxy_key else {
        return Ok(());
    };

    let presented = headers
        .get(PROXY_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if presented == Some(expected.expose_secret()) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

async fn read_body(body: Body) -> Result<axum::body::Bytes, AppError> {
    axum::body::to_bytes(body, BODY_LIMIT_BYTES)
        .await
        .map_err(|err| {
            if std::error::Error::source(&err)
                .is_some_and(|source| source.is::<http_body_util::LengthLimitError>())
            {
                AppError::PayloadTooLarge(BODY_LIMIT_BYTES)
            } else {
                AppError::Internal(format!("Failed to read request body: {}", err))
            }
        })
}

pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        message: "OK - ElevenLabs TTS Proxy",
    })
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_key(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Miguel", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_json_content_type() {
        let with = |value: &str| {
            let mut headers = HeaderMap::new();
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(value).unwrap());
            headers
        };

        assert!(is_json(&with("application/json")));
        assert!(is_json(&with("Application/JSON; charset=utf-8")));
        assert!(!is_json(&with("text/plain")));
        assert!(!is_json(&HeaderMap::new()));
    }

    #[test]
    fn test_open_proxy_when_unconfigured() {
        assert!(authorize(None, &HeaderMap::new()).is_ok());
        assert!(authorize(None, &headers_with_key("anything")).is_ok());
    }

    #[test]
    fn test_matching_key() {
        let key = SecretString::from("s3cret".to_string());
        assert!(authorize(Some(&key), &headers_with_key("s3cret")).is_ok());
    }

    #[test]
    fn test_mismatched_or_missing_key() {
        let key = SecretString::from("s3cret".to_string());
        assert!(matches!(
            authorize(Some(&key), &headers_with_key("S3CRET")),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            authorize(Some(&key), &HeaderMap::new()),
            Err(AppError::Unauthorized)
        ));
    }
}

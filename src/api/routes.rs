use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use super::handlers;
use crate::config::Config;
use crate::error::AppError;
use crate::tts::{ElevenLabsClient, TtsService};

pub struct AppState {
    pub config: Config,
    pub tts: TtsService,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let client = ElevenLabsClient::new(&config.elevenlabs_base_url)?;
        Ok(Self {
            config,
            tts: TtsService::new(client),
        })
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // HEAD is routed explicitly so it does not fall through to the GET handler
    let proxy = get(handlers::health)
        .post(handlers::speak)
        .options(handlers::preflight)
        .head(handlers::method_not_allowed)
        .fallback(handlers::method_not_allowed);

    Router::new()
        .route("/", proxy.clone())
        .route("/api/tts", proxy)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type, Miguel"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS, GET"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

use reqwest::{header, Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::error::AppError;

pub const MODEL_ID: &str = "eleven_multilingual_v2";
pub const AUDIO_MIME: &str = "audio/mpeg";

#[derive(Debug, Serialize)]
pub struct VoiceSettings {
    pub stability: f64,
    pub similarity_boost: f64,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.4,
            similarity_boost: 0.8,
        }
    }
}

/// JSON body sent to the text-to-speech endpoint
#[derive(Debug, Serialize)]
pub struct ProviderPayload<'a> {
    pub text: &'a str,
    pub model_id: &'a str,
    pub voice_settings: VoiceSettings,
}

impl<'a> ProviderPayload<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            model_id: MODEL_ID,
            voice_settings: VoiceSettings::default(),
        }
    }
}

pub struct ElevenLabsClient {
    client: Client,
    base_url: Url,
}

impl ElevenLabsClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::Internal(format!("Invalid ElevenLabs base URL '{}': {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(AppError::Internal(format!(
                "ElevenLabs base URL '{}' cannot carry a path",
                base_url
            )));
        }

        let client = Client::builder()
            .pool_idle_timeout(std::time::Duration::from_secs(30))
            .tcp_nodelay(true)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// `{base}/text-to-speech/{voice_id}/stream`, with the voice id as one path segment.
    pub fn stream_url(&self, voice_id: &str) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Internal(format!("Base URL '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(["text-to-speech", voice_id, "stream"]);
        Ok(url)
    }

    /// Synthesize `text` with `voice_id` and return the raw MP3 bytes.
    pub async fn synthesize(
        &self,
        text: &str,
        voice_id: &str,
        api_key: &SecretString,
    ) -> Result<Vec<u8>, AppError> {
        let url = self.stream_url(voice_id)?;

        tracing::debug!(
            "ElevenLabs TTS request: voice={}, model={}, input_len={}",
            voice_id,
            MODEL_ID,
            text.len()
        );

        let response = self
            .client
            .post(url)
            .header("xi-api-key", api_key.expose_secret())
            .header(header::ACCEPT, AUDIO_MIME)
            .json(&ProviderPayload::new(text))
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream {
                status: upstream_status(status),
                details,
            });
        }

        let audio = response.bytes().await?;

        tracing::debug!("ElevenLabs TTS synthesis complete, {} bytes", audio.len());

        Ok(audio.to_vec())
    }
}

// Informational statuses are not valid final responses for the client
fn upstream_status(status: StatusCode) -> StatusCode {
    if status.is_informational() {
        StatusCode::BAD_GATEWAY
    } else {
        status
    }
}

pub mod elevenlabs;
pub mod voice;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use secrecy::SecretString;

use crate::error::AppError;

pub use elevenlabs::{ElevenLabsClient, AUDIO_MIME};
pub use voice::resolve_voice_id;

/// Synthesized speech, base64-encoded for a JSON response.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedAudio {
    pub audio_base64: String,
    pub mime: &'static str,
}

impl EncodedAudio {
    pub fn from_bytes(audio: &[u8]) -> Self {
        Self {
            audio_base64: STANDARD.encode(audio),
            mime: AUDIO_MIME,
        }
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.audio_base64)
    }
}

pub struct TtsService {
    client: ElevenLabsClient,
}

impl TtsService {
    pub fn new(client: ElevenLabsClient) -> Self {
        Self { client }
    }

    pub async fn speak(
        &self,
        text: &str,
        voice: Option<&str>,
        api_key: &SecretString,
    ) -> Result<EncodedAudio, AppError> {
        // 1. Map alias -> provider id
        let voice_id = resolve_voice_id(voice);

        // 2. Call provider
        let audio = self.client.synthesize(text, &voice_id, api_key).await?;

        // 3. Encode
        Ok(EncodedAudio::from_bytes(&audio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_audio() {
        let encoded = EncodedAudio::from_bytes(b"ID3\x04\x00");
        assert_eq!(encoded.audio_base64, "SUQzBAA=");
        assert_eq!(encoded.mime, "audio/mpeg");
        assert_eq!(encoded.data_url(), "data:audio/mpeg;base64,SUQzBAA=");
    }

    #[test]
    fn test_encoded_audio_empty() {
        let encoded = EncodedAudio::from_bytes(&[]);
        assert_eq!(encoded.audio_base64, "");
        assert_eq!(encoded.data_url(), "data:audio/mpeg;base64,");
    }
}

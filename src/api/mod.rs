pub mod handlers;
pub mod routes;

#[cfg(test)]
mod mock_provider;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::AppError;
use crate::tts::EncodedAudio;

/// Longest accepted text, counted in UTF-16 code units.
pub const MAX_TEXT_LEN: usize = 1200;

/// Body of a synthesis request. Fields are kept loosely typed and coerced to
/// text, so `{"text": 42}` speaks "42".
#[derive(Debug, Default, Deserialize)]
pub struct SpeakRequest {
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default)]
    pub voice_id: Option<Value>,
}

impl SpeakRequest {
    /// Parse a raw body. An empty body, or JSON that is not an object, has no fields.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(body)? {
            fields @ Value::Object(_) => Ok(serde_json::from_value(fields)?),
            _ => Ok(Self::default()),
        }
    }

    pub fn text(&self) -> String {
        self.text.as_ref().map(coerce_to_string).unwrap_or_default()
    }

    pub fn voice_id(&self) -> Option<String> {
        self.voice_id
            .as_ref()
            .filter(|voice| !is_unset(voice))
            .map(coerce_to_string)
            .filter(|voice| !voice.is_empty())
    }

    /// The validated text to synthesize.
    pub fn validated_text(&self) -> Result<String, AppError> {
        let text = self.text();

        if text.is_empty() {
            return Err(AppError::BadRequest("Missing 'text' (string)".into()));
        }

        if text.encode_utf16().count() > MAX_TEXT_LEN {
            return Err(AppError::BadRequest(format!(
                "Text too long (max {} chars)",
                MAX_TEXT_LEN
            )));
        }

        Ok(text)
    }
}

/// Text form of a loosely typed field. Whole floats drop their fraction,
/// arrays join their elements with commas and objects render as
/// `[object Object]`, so an empty array reads as empty text.
fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::Array(items) => items
            .iter()
            .map(coerce_to_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_to_string(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

/// `null`, `false`, zero and the empty string select the default voice.
fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[derive(Debug, Serialize)]
pub struct SpeakResponse {
    pub audio_base64: String,
    pub data_url: String,
    pub mime: &'static str,
}

impl From<EncodedAudio> for SpeakResponse {
    fn from(audio: EncodedAudio) -> Self {
        Self {
            data_url: audio.data_url(),
            audio_base64: audio.audio_base64,
            mime: audio.mime,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub message: &'static str,
}

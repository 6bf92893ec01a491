use lazy_static::lazy_static;
use std::collections::HashMap;

/// Alias used when the caller does not pick a voice.
pub const DEFAULT_VOICE: &str = "rachel";

lazy_static! {
    /// Friendly voice names mapped to ElevenLabs voice ids. Keys are lowercase.
    static ref VOICE_ALIASES: HashMap<&'static str, &'static str> = HashMap::from([
        ("rachel", "21m00Tcm4TlvDq8ikWAM"),
        ("adam", "pNInz6obpgDQGcFmaJgB"),
        ("bella", "EXAVITQu4vr4xnSDxMaL"),
        ("antoni", "ErXwobaYiN019PkySvjV"),
        ("domi", "AZnzlk1XvdvUeBnXmlld"),
    ]);
}

/// Look up a friendly name, ignoring case.
pub fn lookup_alias(name: &str) -> Option<&'static str> {
    VOICE_ALIASES.get(name.to_lowercase().as_str()).copied()
}

/// Resolve the voice a request asked for into a provider voice id.
///
/// `None` or an empty string selects the default voice. Known aliases are
/// replaced by their id; anything else is assumed to already be a provider
/// id and is returned untouched.
pub fn resolve_voice_id(requested: Option<&str>) -> String {
    match requested.filter(|v| !v.is_empty()) {
        None => VOICE_ALIASES[DEFAULT_VOICE].to_string(),
        Some(voice) => lookup_alias(voice)
            .map(str::to_string)
            .unwrap_or_else(|| voice.to_string()),
    }
}

use std::net::SocketAddr;

use secrecy::SecretString;

pub const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io/v1";

/// Process configuration, read once at startup.
#[derive(Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub elevenlabs_base_url: String,
    /// Provider key. POST requests fail with 500 while this is unset.
    pub elevenlabs_api_key: Option<SecretString>,
    /// When set, callers must present it in the `Miguel` header.
    pub proxy_key: Option<SecretString>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| format!("PORT must be a number, got '{}'", raw))?,
            None => 3000,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            elevenlabs_base_url: var("ELEVENLABS_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ELEVENLABS_BASE_URL.to_string()),
            elevenlabs_api_key: var("ELEVENLABS_API_KEY").map(SecretString::from),
            proxy_key: var("PROXY_KEY").map(SecretString::from),
        })
    }

    pub fn addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("Invalid address {}:{}: {}", self.host, self.port, e))
    }
}

use anyhow::Result;
use serde::Deserialize;

use crate::encoder::Platform;
use crate::error::Language;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub capture: CaptureConfig,
    pub transcription: TranscriptionConfig,
    pub interpretation: InterpretationConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct CaptureConfig {
    pub recordings_path: String,
    /// Selects the encoder profile and upload strategy; the profiles
    /// themselves are fixed and not configurable
    pub platform: Platform,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptionConfig {
    pub base_url: String,
    /// Request timeout in seconds; unset means no timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct InterpretationConfig {
    pub base_url: String,
    /// Request timeout in seconds; unset means no timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

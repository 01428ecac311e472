use serde::{Deserialize, Serialize};

/// Runtime environment the capture core is embedded in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    Browser,
}

/// Audio container written by the recorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFormat {
    /// MPEG-4 audio (native mobile recorders)
    Mp4,
    /// WebM (browser MediaRecorder)
    WebM,
    /// Uncompressed WAV (in-process dev backend)
    Wav,
}

/// Codec used inside the container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodec {
    Aac,
    Opus,
    Pcm,
}

/// Fixed, per-platform capture configuration.
///
/// Selected once at session construction and never user-configurable:
/// mono 16 kHz speech-optimized encoding on every platform, with the
/// container/codec pair varying by environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderProfile {
    pub container: ContainerFormat,
    pub codec: AudioCodec,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Target bit rate in bits per second
    pub bit_rate: u32,
}

impl EncoderProfile {
    /// Profile for the platform the session runs on
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Ios => Self::ios(),
            Platform::Android => Self::android(),
            Platform::Browser => Self::browser(),
        }
    }

    pub fn ios() -> Self {
        Self {
            container: ContainerFormat::Mp4,
            codec: AudioCodec::Aac,
            sample_rate: 16000,
            channels: 1,
            bit_rate: 128_000,
        }
    }

    pub fn android() -> Self {
        Self {
            container: ContainerFormat::Mp4,
            codec: AudioCodec::Aac,
            sample_rate: 16000,
            channels: 1,
            bit_rate: 128_000,
        }
    }

    pub fn browser() -> Self {
        Self {
            container: ContainerFormat::WebM,
            codec: AudioCodec::Opus,
            sample_rate: 16000,
            channels: 1,
            bit_rate: 128_000,
        }
    }

    /// PCM/WAV profile used by the in-process recorder backend
    pub fn wav_dev() -> Self {
        Self {
            container: ContainerFormat::Wav,
            codec: AudioCodec::Pcm,
            sample_rate: 16000,
            channels: 1,
            bit_rate: 256_000, // 16-bit PCM at 16 kHz mono
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self.container {
            ContainerFormat::Mp4 => "m4a",
            ContainerFormat::WebM => "webm",
            ContainerFormat::Wav => "wav",
        }
    }

    /// Declared media type for the upload form
    pub fn mime_type(&self) -> &'static str {
        match self.container {
            ContainerFormat::Mp4 => "audio/m4a",
            ContainerFormat::WebM => "audio/webm",
            ContainerFormat::Wav => "audio/wav",
        }
    }

    /// Fixed filename the backend expects in the multipart form
    pub fn upload_file_name(&self) -> String {
        format!("recording.{}", self.file_extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_profiles_are_speech_optimized_m4a() {
        for profile in [EncoderProfile::ios(), EncoderProfile::android()] {
            assert_eq!(profile.sample_rate, 16000);
            assert_eq!(profile.channels, 1);
            assert_eq!(profile.bit_rate, 128_000);
            assert_eq!(profile.file_extension(), "m4a");
            assert_eq!(profile.mime_type(), "audio/m4a");
        }
    }

    #[test]
    fn test_browser_profile_is_webm() {
        let profile = EncoderProfile::for_platform(Platform::Browser);
        assert_eq!(profile.codec, AudioCodec::Opus);
        assert_eq!(profile.upload_file_name(), "recording.webm");
        assert_eq!(profile.mime_type(), "audio/webm");
    }
}

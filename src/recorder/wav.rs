use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::encoder::EncoderProfile;
use crate::error::CaptureError;

use super::backend::{ArtifactLocation, AudioArtifact, AudioFrame, RecorderBackend};

const FRAME_CHANNEL_CAPACITY: usize = 100;

/// In-process recorder backend writing WAV via `hound`.
///
/// PCM frames are pushed into the channel returned by [`input`] by whatever
/// capture layer the embedding shell provides. `begin` spawns a writer task
/// draining that channel into a WAV file; `finalize` stops the task and
/// derives the elapsed duration from the sample count. The audio-session
/// methods only track mode here; native backends switch the real OS audio
/// session in their place.
///
/// [`input`]: WavRecorderBackend::input
pub struct WavRecorderBackend {
    input_tx: mpsc::Sender<AudioFrame>,
    idle_rx: Option<mpsc::Receiver<AudioFrame>>,
    active: Option<ActiveRecording>,
    capture_configured: bool,
}

struct ActiveRecording {
    stop_tx: oneshot::Sender<()>,
    task: JoinHandle<(mpsc::Receiver<AudioFrame>, Result<u64, CaptureError>)>,
    path: PathBuf,
}

impl WavRecorderBackend {
    pub fn new() -> Self {
        let (input_tx, idle_rx) = mpsc::channel(FRAME_CHANNEL_CAPACITY);
        Self {
            input_tx,
            idle_rx: Some(idle_rx),
            active: None,
            capture_configured: false,
        }
    }

    /// Handle for pushing PCM frames into the active recording
    pub fn input(&self) -> mpsc::Sender<AudioFrame> {
        self.input_tx.clone()
    }
}

impl Default for WavRecorderBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RecorderBackend for WavRecorderBackend {
    async fn configure_capture(&mut self) -> Result<(), CaptureError> {
        self.capture_configured = true;
        debug!("audio session configured for capture");
        Ok(())
    }

    async fn begin(
        &mut self,
        profile: &EncoderProfile,
        output: &Path,
    ) -> Result<(), CaptureError> {
        if self.active.is_some() {
            return Err(CaptureError::OsResource(
                "recorder resource already allocated".to_string(),
            ));
        }

        if !self.capture_configured {
            debug!("recorder starting without a capture audio session");
        }

        let mut rx = self.idle_rx.take().ok_or_else(|| {
            CaptureError::OsResource("frame input disconnected".to_string())
        })?;

        // Frames queued while no recording was active belong to nobody
        while rx.try_recv().is_ok() {}

        let spec = hound::WavSpec {
            channels: profile.channels,
            sample_rate: profile.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        // On failure the receiver must go back, or the frame channel is
        // closed for good and every later begin fails too
        let mut writer = match hound::WavWriter::create(output, spec) {
            Ok(writer) => writer,
            Err(e) => {
                self.idle_rx = Some(rx);
                return Err(CaptureError::OsResource(format!(
                    "failed to create {}: {e}",
                    output.display()
                )));
            }
        };

        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let samples_per_second = u64::from(profile.sample_rate) * u64::from(profile.channels);

        let task = tokio::spawn(async move {
            let mut samples_written: u64 = 0;
            let mut write_err: Option<hound::Error> = None;

            let write_frame = |frame: &AudioFrame,
                                   writer: &mut hound::WavWriter<_>,
                                   samples_written: &mut u64|
             -> Result<(), hound::Error> {
                for &sample in &frame.samples {
                    writer.write_sample(sample)?;
                }
                *samples_written += frame.samples.len() as u64;
                Ok(())
            };

            loop {
                tokio::select! {
                    _ = &mut stop_rx => {
                        // Frames already pushed before the stop must land in
                        // the file; drain what is queued, then close
                        while let Ok(frame) = rx.try_recv() {
                            if let Err(e) = write_frame(&frame, &mut writer, &mut samples_written) {
                                write_err = Some(e);
                                break;
                            }
                        }
                        break;
                    }
                    frame = rx.recv() => match frame {
                        Some(frame) => {
                            if let Err(e) = write_frame(&frame, &mut writer, &mut samples_written) {
                                write_err = Some(e);
                                break;
                            }
                        }
                        None => break,
                    },
                }
            }

            let result = match write_err {
                Some(e) => Err(CaptureError::OsResource(format!("wav write failed: {e}"))),
                None => writer
                    .finalize()
                    .map(|_| samples_written * 1000 / samples_per_second)
                    .map_err(|e| {
                        CaptureError::OsResource(format!("wav finalize failed: {e}"))
                    }),
            };

            (rx, result)
        });

        info!("wav recorder started: {}", output.display());

        self.active = Some(ActiveRecording {
            stop_tx,
            task,
            path: output.to_path_buf(),
        });

        Ok(())
    }

    async fn finalize(&mut self) -> Result<AudioArtifact, CaptureError> {
        let ActiveRecording { stop_tx, task, path } = self.active.take().ok_or_else(|| {
            CaptureError::OsResource("no recorder resource allocated".to_string())
        })?;

        // Writer may already have exited on its own; the signal is advisory
        let _ = stop_tx.send(());

        let (rx, result) = task.await.map_err(|e| {
            CaptureError::OsResource(format!("recorder task panicked: {e}"))
        })?;
        self.idle_rx = Some(rx);

        let duration_ms = result?;
        info!(
            "wav recorder finalized: {} ({duration_ms} ms)",
            path.display()
        );

        Ok(AudioArtifact {
            location: ArtifactLocation::new(path),
            duration_ms,
            created_at: Utc::now(),
        })
    }

    async fn restore_playback(&mut self) -> Result<(), CaptureError> {
        self.capture_configured = false;
        debug!("audio session restored for playback");
        Ok(())
    }

    async fn discard(&mut self, location: &ArtifactLocation) -> Result<(), CaptureError> {
        tokio::fs::remove_file(location.as_path())
            .await
            .map_err(|e| {
                CaptureError::OsResource(format!("failed to delete {location}: {e}"))
            })?;
        info!("recording deleted: {location}");
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.active.is_some()
    }

    fn name(&self) -> &str {
        "wav"
    }
}

//! Desktop recorder backed by cpal capture and hound WAV encoding.
//!
//! Each handle owns one cpal input stream. The stream callback folds frames
//! to mono and forwards them over a channel; `stop()` drains the channel and
//! writes the accumulated samples to a WAV file in the recordings directory.

use crate::platform::{
    AudioMode, RecorderConfig, RecorderFactory, RecorderHandle, RecorderStatus, StatusObserver,
};
use crate::{Result, TapenoteError};
use chrono::Utc;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use crossbeam_channel::{unbounded, Receiver};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Recorder factory writing WAV files into a fixed directory.
pub struct CpalRecorder {
    recordings_dir: PathBuf,
}

impl CpalRecorder {
    /// Create a recorder storing files under the local data directory.
    pub fn new() -> Result<Self> {
        let dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tapenote")
            .join("recordings");
        Self::with_dir(dir)
    }

    /// Create a recorder storing files under the given directory.
    pub fn with_dir(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            recordings_dir: dir,
        })
    }
}

impl RecorderFactory for CpalRecorder {
    fn set_audio_mode(&self, mode: AudioMode) -> Result<()> {
        // Desktops have no silent-mode switch; only the recording flag is
        // meaningful here
        if !mode.allows_recording {
            return Err(TapenoteError::RecorderError(
                "audio mode does not allow recording".into(),
            ));
        }
        Ok(())
    }

    fn create_handle(&self) -> Result<Box<dyn RecorderHandle>> {
        Ok(Box::new(CpalHandle::new(self.recordings_dir.clone())))
    }
}

/// One in-progress capture, finalized to a WAV file on stop.
pub struct CpalHandle {
    dir: PathBuf,
    device: Option<Device>,
    stream_config: Option<StreamConfig>,
    recorder_config: Option<RecorderConfig>,
    stream: Option<Stream>,
    samples_rx: Option<Receiver<Vec<f32>>>,
    is_recording: Arc<Mutex<bool>>,
    observer: Option<StatusObserver>,
    started_at: Option<Instant>,
    uri: Option<String>,
}

impl CpalHandle {
    fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            device: None,
            stream_config: None,
            recorder_config: None,
            stream: None,
            samples_rx: None,
            is_recording: Arc::new(Mutex::new(false)),
            observer: None,
            started_at: None,
            uri: None,
        }
    }

    fn notify(&self, can_record: bool, is_recording: bool) {
        if let Some(observer) = &self.observer {
            let duration_ms = self
                .started_at
                .map(|t| t.elapsed().as_millis() as u64)
                .unwrap_or(0);
            observer(RecorderStatus {
                can_record,
                is_recording,
                duration_ms,
            });
        }
    }

    fn write_wav(&self, samples: &[f32], sample_rate: u32) -> Result<PathBuf> {
        let extension = self
            .recorder_config
            .as_ref()
            .map(|c| c.extension.clone())
            .unwrap_or_else(|| "wav".to_string());
        let path = self.dir.join(format!(
            "recording-{}.{}",
            Utc::now().timestamp_millis(),
            extension
        ));

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(&path, spec)
            .map_err(|e| TapenoteError::RecorderError(format!("Failed to create wav: {}", e)))?;

        for &sample in samples {
            let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer
                .write_sample(value)
                .map_err(|e| TapenoteError::RecorderError(format!("Failed to write wav: {}", e)))?;
        }

        writer
            .finalize()
            .map_err(|e| TapenoteError::RecorderError(format!("Failed to finalize wav: {}", e)))?;

        Ok(path)
    }
}

impl RecorderHandle for CpalHandle {
    fn prepare(&mut self, config: &RecorderConfig) -> Result<()> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or_else(|| TapenoteError::AudioDeviceError("No input device available".into()))?;

        let stream_config: StreamConfig = device
            .default_input_config()
            .map_err(|e| {
                TapenoteError::AudioDeviceError(format!("Failed to get input config: {}", e))
            })?
            .into();

        debug!(
            "Prepared recorder: requested {}Hz, device {}Hz, {} channel(s)",
            config.sample_rate, stream_config.sample_rate.0, stream_config.channels
        );

        self.device = Some(device);
        self.stream_config = Some(stream_config);
        self.recorder_config = Some(config.clone());
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        if self.stream.is_some() {
            // Resume in place without rebuilding the stream
            *self.is_recording.lock() = true;
            self.notify(true, true);
            return Ok(());
        }

        let device = self
            .device
            .as_ref()
            .ok_or_else(|| TapenoteError::RecorderError("handle not prepared".into()))?;
        let stream_config = self
            .stream_config
            .clone()
            .ok_or_else(|| TapenoteError::RecorderError("handle not prepared".into()))?;

        let (tx, rx) = unbounded();
        let channels = stream_config.channels as usize;
        let is_recording = Arc::clone(&self.is_recording);

        let err_fn = |err| {
            error!("Audio input stream error: {}", err);
        };

        let stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if !*is_recording.lock() {
                        return;
                    }

                    // Fold interleaved frames to mono
                    let samples: Vec<f32> = if channels == 1 {
                        data.to_vec()
                    } else {
                        data.chunks(channels)
                            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
                            .collect()
                    };

                    if tx.send(samples).is_err() {
                        debug!("Capture channel closed, dropping samples");
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| {
                TapenoteError::AudioDeviceError(format!("Failed to build input stream: {}", e))
            })?;

        stream.play().map_err(|e| {
            TapenoteError::AudioDeviceError(format!("Failed to start input stream: {}", e))
        })?;

        *self.is_recording.lock() = true;
        self.stream = Some(stream);
        self.samples_rx = Some(rx);
        self.started_at = Some(Instant::now());

        info!("Started audio capture");
        self.notify(true, true);
        Ok(())
    }

    fn stop(&mut self) -> Result<String> {
        *self.is_recording.lock() = false;

        let stream = self.stream.take().ok_or_else(|| {
            TapenoteError::RecorderError("stop called without an active capture".into())
        })?;
        drop(stream);

        let mut samples = Vec::new();
        if let Some(rx) = self.samples_rx.take() {
            while let Ok(chunk) = rx.try_recv() {
                samples.extend_from_slice(&chunk);
            }
        }

        let sample_rate = self
            .stream_config
            .as_ref()
            .map(|c| c.sample_rate.0)
            .unwrap_or(44_100);

        let path = self.write_wav(&samples, sample_rate)?;
        let uri = format!("file://{}", path.display());

        info!(
            "Stopped audio capture: {} sample(s) -> {}",
            samples.len(),
            uri
        );

        self.uri = Some(uri.clone());
        self.notify(false, false);
        Ok(uri)
    }

    fn set_status_observer(&mut self, observer: StatusObserver) {
        self.observer = Some(observer);
    }

    fn uri(&self) -> Option<String> {
        self.uri.clone()
    }
}

impl Drop for CpalHandle {
    fn drop(&mut self) {
        *self.is_recording.lock() = false;
        self.stream.take();
    }
}

//! Desktop playback backed by hound decoding and a cpal output stream.
//!
//! `load_and_play` decodes the whole WAV file up front, resamples it to the
//! output device rate and hands it to an output stream that fills silence
//! once the samples run out. Starting a new playback drops the previous
//! stream, which stops it.

use crate::platform::AudioOutput;
use crate::{Result, TapenoteError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::Stream;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info};

pub struct CpalPlayer {
    stream: Option<Stream>,
}

impl CpalPlayer {
    pub fn new() -> Self {
        Self { stream: None }
    }

    fn decode(path: &str) -> Result<(Vec<f32>, u32)> {
        let reader = hound::WavReader::open(path)
            .map_err(|e| TapenoteError::PlaybackError(format!("Failed to open {}: {}", path, e)))?;

        let spec = reader.spec();
        let channels = spec.channels as usize;

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Int => {
                let scale = (1_i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .filter_map(|s| s.ok())
                    .map(|s| s as f32 / scale)
                    .collect()
            }
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .filter_map(|s| s.ok())
                .collect(),
        };

        // Fold interleaved frames to mono
        let mono: Vec<f32> = if channels == 1 {
            samples
        } else {
            samples
                .chunks(channels)
                .map(|frame| frame.iter().sum::<f32>() / channels as f32)
                .collect()
        };

        Ok((mono, spec.sample_rate))
    }

    fn resample(samples: Vec<f32>, from_rate: u32, to_rate: u32) -> Vec<f32> {
        if from_rate == to_rate || samples.is_empty() {
            return samples;
        }

        let ratio = from_rate as f64 / to_rate as f64;
        let out_len = (samples.len() as f64 / ratio) as usize;

        (0..out_len)
            .map(|i| {
                let pos = i as f64 * ratio;
                let index = pos as usize;
                let frac = (pos - index as f64) as f32;
                let a = samples[index.min(samples.len() - 1)];
                let b = samples[(index + 1).min(samples.len() - 1)];
                a + (b - a) * frac
            })
            .collect()
    }
}

impl Default for CpalPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioOutput for CpalPlayer {
    fn load_and_play(&mut self, uri: &str) -> Result<()> {
        let path = uri.strip_prefix("file://").unwrap_or(uri);
        let (samples, source_rate) = Self::decode(path)?;

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| TapenoteError::AudioDeviceError("No output device available".into()))?;

        let config: cpal::StreamConfig = device
            .default_output_config()
            .map_err(|e| {
                TapenoteError::AudioDeviceError(format!("Failed to get output config: {}", e))
            })?
            .into();

        let samples = Arc::new(Self::resample(samples, source_rate, config.sample_rate.0));
        let position = Arc::new(Mutex::new(0_usize));
        let channels = config.channels as usize;

        let err_fn = |err| {
            error!("Audio output stream error: {}", err);
        };

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let mut pos = position.lock();
                    for frame in data.chunks_mut(channels) {
                        let sample = samples.get(*pos).copied().unwrap_or(0.0);
                        for out in frame.iter_mut() {
                            *out = sample;
                        }
                        if *pos < samples.len() {
                            *pos += 1;
                        }
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| {
                TapenoteError::AudioDeviceError(format!("Failed to build output stream: {}", e))
            })?;

        stream.play().map_err(|e| {
            TapenoteError::AudioDeviceError(format!("Failed to start output stream: {}", e))
        })?;

        // Replacing the stream stops any playback already in progress
        self.stream = Some(stream);
        info!("Playing {}", uri);
        Ok(())
    }
}

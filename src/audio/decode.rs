//! Container decoding to mono PCM via symphonia.
//!
//! Handles WAV, MP3, M4A/AAC, OGG/Vorbis, and FLAC input. The declared file
//! extension is passed to the probe as a hint only; the actual container is
//! detected from content.

use crate::defaults::SAMPLE_RATE;
use crate::error::{RecapError, Result};
use std::io::Cursor;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decoded audio: mono 16-bit PCM at the source sample rate.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl DecodedAudio {
    /// Duration in seconds, derived from mono sample count and source rate.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Decode audio bytes into mono i16 samples plus the source sample rate.
///
/// Stereo input is downmixed by averaging channel pairs. Fails with
/// `UnsupportedAudioFormat` when the container cannot be probed or decoded.
pub fn decode(data: Vec<u8>, extension: &str) -> Result<DecodedAudio> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(data)), Default::default());

    let mut hint = Hint::new();
    if !extension.is_empty() {
        let _ = hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| RecapError::UnsupportedAudioFormat {
            message: format!("probe failed: {e}"),
        })?;

    let mut format = probed.format;

    // Find the first audio track
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| RecapError::UnsupportedAudioFormat {
            message: "no audio track found".to_string(),
        })?;

    let codec_params = track.codec_params.clone();
    let track_id = track.id;
    let sample_rate = codec_params.sample_rate.unwrap_or(SAMPLE_RATE);
    let channels = codec_params.channels.map_or(1, |c| c.count());

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| RecapError::UnsupportedAudioFormat {
            message: format!("codec init failed: {e}"),
        })?;

    let mut samples: Vec<i16> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(RecapError::UnsupportedAudioFormat {
                    message: format!("packet read: {e}"),
                });
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded =
            decoder
                .decode(&packet)
                .map_err(|e| RecapError::UnsupportedAudioFormat {
                    message: format!("decode: {e}"),
                })?;

        let spec = *decoded.spec();
        let mut sample_buf = SampleBuffer::<i16>::new(decoded.capacity() as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        let interleaved = sample_buf.samples();

        if channels > 1 {
            for frame in interleaved.chunks(channels) {
                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                samples.push((sum / channels as i32) as i16);
            }
        } else {
            samples.extend_from_slice(interleaved);
        }
    }

    if samples.is_empty() {
        return Err(RecapError::UnsupportedAudioFormat {
            message: "no audio samples decoded".to_string(),
        });
    }

    Ok(DecodedAudio {
        samples,
        sample_rate,
    })
}

/// Simple linear interpolation resampling.
pub fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let source_pos = i as f64 * ratio;
            let source_idx = source_pos.floor() as usize;
            let fraction = source_pos - source_idx as f64;

            if source_idx + 1 >= samples.len() {
                samples[source_idx]
            } else {
                let left = samples[source_idx] as f64;
                let right = samples[source_idx + 1] as f64;
                (left + (right - left) * fraction) as i16
            }
        })
        .collect()
}

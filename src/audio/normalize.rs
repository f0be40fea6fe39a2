//! Canonical-format audio normalization.
//!
//! Uploads arrive in whatever container the client recorded (webm, mp3, m4a...).
//! The normalizer decodes the input, re-encodes non-WAV audio to a temporary
//! canonical WAV at the original sample rate, and reports the measured duration.
//! The returned temp file handle owns the file; dropping it deletes it.

use crate::audio::decode::{decode, resample};
use crate::defaults::{CANONICAL_EXTENSION, SAMPLE_RATE};
use crate::error::{RecapError, Result};
use tempfile::NamedTempFile;

/// Normalized audio ready for transcription.
pub struct NormalizedAudio {
    /// Mono 16-bit PCM at 16kHz, the transcriber's input contract.
    pub samples: Vec<i16>,
    /// Sample rate of the source recording.
    pub source_rate: u32,
    /// Duration of the source recording in seconds.
    pub duration_seconds: f64,
    /// Canonical WAV re-encoding, present only when the input was not WAV.
    /// The caller owns cleanup; the file is deleted when this handle drops.
    pub canonical_wav: Option<NamedTempFile>,
}

impl std::fmt::Debug for NormalizedAudio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NormalizedAudio")
            .field("samples", &self.samples.len())
            .field("source_rate", &self.source_rate)
            .field("duration_seconds", &self.duration_seconds)
            .field("canonical_wav", &self.canonical_wav.is_some())
            .finish()
    }
}

/// Normalize uploaded audio bytes with a declared file extension.
///
/// # Errors
/// Returns `RecapError::UnsupportedAudioFormat` when the container cannot be
/// decoded (corrupt file, unknown codec).
pub fn normalize(data: Vec<u8>, extension: &str) -> Result<NormalizedAudio> {
    let extension = extension.trim_start_matches('.').to_ascii_lowercase();

    let decoded = decode(data, &extension)?;
    let duration_seconds = decoded.duration_seconds();

    let canonical_wav = if extension == CANONICAL_EXTENSION {
        None
    } else {
        Some(write_canonical_wav(&decoded.samples, decoded.sample_rate)?)
    };

    let samples = if decoded.sample_rate == SAMPLE_RATE {
        decoded.samples
    } else {
        resample(&decoded.samples, decoded.sample_rate, SAMPLE_RATE)
    };

    Ok(NormalizedAudio {
        samples,
        source_rate: decoded.sample_rate,
        duration_seconds,
        canonical_wav,
    })
}

/// Re-encode mono samples as a temporary WAV at the original sample rate.
fn write_canonical_wav(samples: &[i16], sample_rate: u32) -> Result<NamedTempFile> {
    let file = tempfile::Builder::new()
        .prefix("recap-")
        .suffix(".wav")
        .tempfile()
        .map_err(|e| RecapError::Other(format!("Failed to create temp WAV: {e}")))?;

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(file.path(), spec).map_err(|e| {
        RecapError::Other(format!("Failed to write canonical WAV: {e}"))
    })?;
    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| RecapError::Other(format!("Failed to write WAV sample: {e}")))?;
    }
    writer
        .finalize()
        .map_err(|e| RecapError::Other(format!("Failed to finalize WAV: {e}")))?;

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn make_wav_data(sample_rate: u32, channels: u16, samples: &[i16]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn wav_input_skips_reencoding() {
        let wav = make_wav_data(16000, 1, &vec![100i16; 16000]);

        let normalized = normalize(wav, "wav").unwrap();

        assert!(normalized.canonical_wav.is_none());
        assert_eq!(normalized.source_rate, 16000);
        assert!((normalized.duration_seconds - 1.0).abs() < 0.001);
        assert_eq!(normalized.samples.len(), 16000);
    }

    #[test]
    fn extension_is_case_insensitive_with_optional_dot() {
        let wav = make_wav_data(16000, 1, &vec![100i16; 100]);
        let normalized = normalize(wav.clone(), ".WAV").unwrap();
        assert!(normalized.canonical_wav.is_none());

        let normalized = normalize(wav, "Wav").unwrap();
        assert!(normalized.canonical_wav.is_none());
    }

    #[test]
    fn non_wav_extension_writes_canonical_wav_at_source_rate() {
        // Content probing still decodes the WAV data; the declared extension
        // alone decides whether the canonical re-encode happens.
        let wav = make_wav_data(44100, 1, &vec![500i16; 44100]);

        let normalized = normalize(wav, "webm").unwrap();

        let temp = normalized.canonical_wav.expect("canonical WAV expected");
        let reader = hound::WavReader::open(temp.path()).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44100, "re-encode keeps the source rate");
        assert_eq!(spec.bits_per_sample, 16);

        // Duration of the re-encoded file matches the source within tolerance
        let reencoded_duration = reader.duration() as f64 / spec.sample_rate as f64;
        assert!((reencoded_duration - 1.0).abs() < 0.1);
    }

    #[test]
    fn canonical_wav_is_deleted_when_handle_drops() {
        let wav = make_wav_data(16000, 1, &vec![1i16; 1600]);
        let normalized = normalize(wav, "mp3").unwrap();

        let path = normalized
            .canonical_wav
            .as_ref()
            .expect("canonical WAV expected")
            .path()
            .to_path_buf();
        assert!(path.exists());

        drop(normalized);
        assert!(!path.exists(), "temp WAV should be cleaned up on drop");
    }

    #[test]
    fn samples_are_resampled_to_16khz_for_transcription() {
        let wav = make_wav_data(48000, 1, &vec![0i16; 48000]); // 1 second

        let normalized = normalize(wav, "wav").unwrap();

        assert_eq!(normalized.source_rate, 48000);
        assert!(normalized.samples.len() >= 15900 && normalized.samples.len() <= 16100);
        assert!((normalized.duration_seconds - 1.0).abs() < 0.001);
    }

    #[test]
    fn stereo_source_duration_counts_frames_not_samples() {
        // 1 second of stereo at 16kHz: 32000 interleaved samples, 16000 frames
        let wav = make_wav_data(16000, 2, &vec![100i16; 32000]);

        let normalized = normalize(wav, "wav").unwrap();

        assert!((normalized.duration_seconds - 1.0).abs() < 0.001);
    }

    #[test]
    fn corrupt_input_fails_with_unsupported_format() {
        let garbage = vec![0xDEu8; 300];

        let result = normalize(garbage, "wav");

        assert!(matches!(
            result,
            Err(RecapError::UnsupportedAudioFormat { .. })
        ));
    }

    #[test]
    fn corrupt_input_with_audio_extension_still_fails() {
        let garbage = b"not really an mp3 file at all".to_vec();

        let result = normalize(garbage, "mp3");

        assert!(matches!(
            result,
            Err(RecapError::UnsupportedAudioFormat { .. })
        ));
    }
}

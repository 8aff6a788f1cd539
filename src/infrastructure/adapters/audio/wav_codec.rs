//! WAV Codec - 基于 symphonia 的 WAV 编解码
//!
//! 支持：
//! - 运行时输出的 WAV → 单声道波形（多声道取平均）
//! - 波形 → 16 位 PCM WAV

use std::io::Cursor;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioCodecError, AudioEncoderPort, EncodedAudio};
use crate::domain::Waveform;

/// WAV 编解码器
#[derive(Debug, Default, Clone, Copy)]
pub struct WavCodec;

impl WavCodec {
    pub fn new() -> Self {
        Self
    }

    /// 使用 symphonia 解码 WAV，输出单声道波形
    pub fn decode(&self, data: &[u8]) -> Result<Waveform, AudioCodecError> {
        if data.len() < 12 || &data[0..4] != b"RIFF" || &data[8..12] != b"WAVE" {
            return Err(AudioCodecError::InvalidInput(
                "Invalid WAV: missing RIFF/WAVE header".to_string(),
            ));
        }

        let cursor = Cursor::new(data.to_vec());
        let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

        let mut hint = Hint::new();
        hint.with_extension("wav");

        let detected = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| AudioCodecError::DecodingError(format!("Format detection failed: {}", e)))?;

        let mut format = detected.format;

        let track = format
            .default_track()
            .ok_or_else(|| AudioCodecError::DecodingError("No audio track found".to_string()))?;

        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| AudioCodecError::DecodingError("Unknown sample rate".to_string()))?;

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| {
                AudioCodecError::DecodingError(format!("Decoder creation failed: {}", e))
            })?;

        let track_id = track.id;
        let mut samples: Vec<f32> = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(symphonia::core::errors::Error::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => {
                    return Err(AudioCodecError::DecodingError(format!(
                        "Packet read error: {}",
                        e
                    )));
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!("Decode error (skipping packet): {}", e);
                    continue;
                }
            };

            let spec = *decoded.spec();
            let channels = spec.channels.count().max(1);
            let num_frames = decoded.frames();
            let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);

            let interleaved = &sample_buf.samples()[..num_frames * channels];
            if channels == 1 {
                samples.extend_from_slice(interleaved);
            } else {
                samples.extend(
                    interleaved
                        .chunks(channels)
                        .map(|frame| frame.iter().sum::<f32>() / channels as f32),
                );
            }
        }

        Ok(Waveform::new(samples, sample_rate))
    }

    /// 将波形编码为 16 位 PCM 单声道 WAV
    pub fn encode_wav(&self, waveform: &Waveform) -> Result<Vec<u8>, AudioCodecError> {
        if waveform.sample_rate == 0 {
            return Err(AudioCodecError::EncodingError(
                "Sample rate cannot be 0".to_string(),
            ));
        }

        let bits_per_sample: u16 = 16;
        let num_channels: u16 = 1;
        let sample_rate = waveform.sample_rate;
        let byte_rate = sample_rate * num_channels as u32 * (bits_per_sample / 8) as u32;
        let block_align = num_channels * (bits_per_sample / 8);

        let data_size = waveform.samples.len() * 2;
        let file_size = 36 + data_size;

        let mut wav = Vec::with_capacity(44 + data_size);

        // RIFF header
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(file_size as u32).to_le_bytes());
        wav.extend_from_slice(b"WAVE");

        // fmt chunk
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&num_channels.to_le_bytes());
        wav.extend_from_slice(&sample_rate.to_le_bytes());
        wav.extend_from_slice(&byte_rate.to_le_bytes());
        wav.extend_from_slice(&block_align.to_le_bytes());
        wav.extend_from_slice(&bits_per_sample.to_le_bytes());

        // data chunk
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&(data_size as u32).to_le_bytes());

        for &sample in &waveform.samples {
            let value = (sample.clamp(-1.0, 1.0) * 32767.0) as i16;
            wav.extend_from_slice(&value.to_le_bytes());
        }

        Ok(wav)
    }
}

impl AudioEncoderPort for WavCodec {
    fn encode(&self, waveform: &Waveform) -> Result<EncodedAudio, AudioCodecError> {
        Ok(EncodedAudio {
            data: self.encode_wav(waveform)?,
            content_type: "audio/wav",
        })
    }
}

//! Tests for the WAV writer module.

use super::format::{WavFormat, HEADER_LEN};
use super::pcm::{compute_pcm_hash, extract_pcm_data, read_format};
use super::result::WavResult;
use super::streaming::{build_header, StreamingWavWriter, UNBOUNDED_SIZE};
use super::writer::{quantize_sample, write_wav, write_wav_to_vec};

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn samples_to_pcm16(samples: &[f64]) -> Vec<u8> {
    samples
        .iter()
        .flat_map(|&s| quantize_sample(s).to_le_bytes())
        .collect()
}

fn result_from(samples: &[f64], sample_rate: u32) -> WavResult {
    WavResult::from_pcm(&samples_to_pcm16(samples), sample_rate)
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

// =========================================================================
// WavFormat tests
// =========================================================================

#[test]
fn test_wav_format_mono() {
    let format = WavFormat::mono(44100);
    assert_eq!(format.channels, 1);
    assert_eq!(format.sample_rate, 44100);
    assert_eq!(format.bits_per_sample, 16);
    assert_eq!(format.bytes_per_sample(), 2);
    assert_eq!(format.block_align(), 2);
    // 44100 samples/sec * 1 channel * 2 bytes/sample = 88200 bytes/sec
    assert_eq!(format.byte_rate(), 88200);
}

#[test]
fn test_wav_format_various_sample_rates() {
    for &rate in &[8000, 11025, 22050, 44100, 48000, 96000, 192000] {
        let mono = WavFormat::mono(rate);
        assert_eq!(mono.sample_rate, rate);
        assert_eq!(mono.byte_rate(), rate * 2);
    }
}

// =========================================================================
// PCM conversion tests
// =========================================================================

#[test]
fn test_samples_to_pcm16_normal_range() {
    let samples = vec![0.0, 0.5, -0.5, 0.25, -0.25];
    let pcm = samples_to_pcm16(&samples);

    assert_eq!(pcm.len(), 10); // 5 samples * 2 bytes
    assert_eq!(i16::from_le_bytes([pcm[0], pcm[1]]), 0);
    // (0.5 * 32767).round() = 16384
    assert_eq!(i16::from_le_bytes([pcm[2], pcm[3]]), 16384);
    assert_eq!(i16::from_le_bytes([pcm[4], pcm[5]]), -16384);
}

#[test]
fn test_quantize_boundaries_are_symmetric() {
    assert_eq!(quantize_sample(1.0), 32767);
    assert_eq!(quantize_sample(-1.0), -32767);
    assert_eq!(quantize_sample(7.5), 32767);
    assert_eq!(quantize_sample(-7.5), -32767);
    assert_eq!(quantize_sample(f64::MAX), 32767);
    assert_eq!(quantize_sample(f64::MIN), -32767);
    assert_eq!(quantize_sample(f64::NAN), 0);
}

#[test]
fn test_quantize_precision() {
    // 0.0001 * 32767 = 3.2767 -> rounds to 3
    assert_eq!(quantize_sample(0.0001), 3);
    assert_eq!(quantize_sample(-0.0001), -3);
    // 0.9999 * 32767 = 32763.7233 -> rounds to 32764
    assert_eq!(quantize_sample(0.9999), 32764);
    assert_eq!(quantize_sample(-0.9999), -32764);
}

// =========================================================================
// Finite header tests
// =========================================================================

#[test]
fn test_wav_header_fields() {
    let format = WavFormat::mono(44100);
    let pcm = samples_to_pcm16(&[0.0; 10]);
    let wav = write_wav_to_vec(&format, &pcm);

    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(&wav[12..16], b"fmt ");
    assert_eq!(read_u32(&wav, 16), 16); // fmt chunk size
    assert_eq!(read_u16(&wav, 20), 1); // PCM
    assert_eq!(read_u16(&wav, 22), 1); // mono
    assert_eq!(read_u32(&wav, 24), 44100);
    assert_eq!(read_u32(&wav, 28), 88200);
    assert_eq!(read_u16(&wav, 32), 2);
    assert_eq!(read_u16(&wav, 34), 16);
    assert_eq!(&wav[36..40], b"data");
    assert_eq!(read_u32(&wav, 40), 20); // 10 samples * 2 bytes
}

#[test]
fn test_wav_header_file_size() {
    let format = WavFormat::mono(44100);
    let pcm = samples_to_pcm16(&[0.0; 100]);
    let wav = write_wav_to_vec(&format, &pcm);

    // File size field (bytes 4-7) = total size - 8
    assert_eq!(read_u32(&wav, 4), wav.len() as u32 - 8);
    assert_eq!(wav.len(), HEADER_LEN + 200);
}

#[test]
fn test_empty_audio() {
    let wav = write_wav_to_vec(&WavFormat::mono(44100), &[]);
    assert_eq!(wav.len(), HEADER_LEN);
    assert_eq!(read_u32(&wav, 40), 0);
}

#[test]
fn test_write_wav_to_writer_matches_vec() {
    let format = WavFormat::mono(22050);
    let pcm = samples_to_pcm16(&[0.1, -0.2, 0.3]);
    let mut out = Vec::new();
    write_wav(&mut out, &format, &pcm).unwrap();
    assert_eq!(out, write_wav_to_vec(&format, &pcm));
}

// =========================================================================
// Streaming header tests
// =========================================================================

#[test]
fn test_streaming_header_layout() {
    let header = build_header(44100);
    assert_eq!(header.len(), HEADER_LEN);
    assert_eq!(&header[0..4], b"RIFF");
    assert_eq!(read_u32(&header, 4), UNBOUNDED_SIZE);
    assert_eq!(&header[8..12], b"WAVE");
    assert_eq!(read_u16(&header, 22), 1);
    assert_eq!(read_u32(&header, 24), 44100);
    assert_eq!(read_u32(&header, 28), 88200);
    assert_eq!(read_u16(&header, 32), 2);
    assert_eq!(read_u16(&header, 34), 16);
    assert_eq!(&header[36..40], b"data");
    assert_eq!(read_u32(&header, 40), UNBOUNDED_SIZE);
}

#[test]
fn test_streaming_header_differs_from_finite_only_in_sizes() {
    let streaming = build_header(48000);
    let finite = write_wav_to_vec(&WavFormat::mono(48000), &[]);
    assert_eq!(streaming[..4], finite[..4]);
    assert_eq!(streaming[8..40], finite[8..40]);
}

#[test]
fn test_streaming_writer_emits_header_once() {
    let mut writer = StreamingWavWriter::new(Vec::new(), 44100);
    writer.write_header().unwrap();
    writer.write_chunk(&[1, 2, 3, 4]).unwrap();
    writer.write_chunk(&[5, 6]).unwrap();
    assert_eq!(writer.bytes_written(), 6);

    let out = writer.into_inner();
    assert_eq!(out.len(), HEADER_LEN + 6);
    assert_eq!(&out[..HEADER_LEN], build_header(44100).as_slice());
    assert_eq!(&out[HEADER_LEN..], &[1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_streaming_writer_header_is_lazy() {
    let writer = StreamingWavWriter::new(Vec::new(), 8000);
    assert!(writer.into_inner().is_empty());

    let mut writer = StreamingWavWriter::new(Vec::new(), 8000);
    writer.write_chunk(&[]).unwrap();
    assert_eq!(writer.into_inner().len(), HEADER_LEN);
}

// =========================================================================
// PCM extraction and hashing tests
// =========================================================================

#[test]
fn test_extract_pcm_from_finite_file() {
    let pcm = samples_to_pcm16(&[0.5, -0.5, 0.25]);
    let wav = write_wav_to_vec(&WavFormat::mono(44100), &pcm);
    assert_eq!(extract_pcm_data(&wav), Some(pcm.as_slice()));
}

#[test]
fn test_extract_pcm_from_unbounded_stream() {
    let mut writer = StreamingWavWriter::new(Vec::new(), 44100);
    writer.write_chunk(&[9, 8, 7, 6]).unwrap();
    let captured = writer.into_inner();
    assert_eq!(extract_pcm_data(&captured), Some(&[9u8, 8, 7, 6][..]));
}

#[test]
fn test_extract_pcm_rejects_garbage() {
    assert!(extract_pcm_data(b"not a wav").is_none());
    assert!(extract_pcm_data(&[0u8; 64]).is_none());
}

#[test]
fn test_compute_pcm_hash_matches_result_hash() {
    let samples = vec![0.5, -0.5, 0.3, -0.3, 0.0];
    let result = result_from(&samples, 44100);

    let hash_from_wav = compute_pcm_hash(&result.wav_data).expect("should compute hash");
    assert_eq!(hash_from_wav, result.pcm_hash);
    assert_eq!(result.pcm_hash.len(), 64); // BLAKE3 produces 64 hex chars
    assert_eq!(result.num_samples, 5);
}

#[test]
fn test_pcm_hash_different_for_different_samples() {
    let a = result_from(&[0.5, -0.5, 0.3], 44100);
    let b = result_from(&[0.5, -0.5, 0.31], 44100);
    assert_ne!(a.pcm_hash, b.pcm_hash);
}

#[test]
fn test_result_duration() {
    let result = result_from(&[0.0; 22050], 44100);
    assert!((result.duration_seconds() - 0.5).abs() < 1e-12);
}

// =========================================================================
// Format read-back tests
// =========================================================================

#[test]
fn test_read_format_from_finite_and_streaming() {
    let finite = write_wav_to_vec(&WavFormat::mono(22050), &[0, 0]);
    assert_eq!(read_format(&finite), Some(WavFormat::mono(22050)));
    assert_eq!(read_format(&build_header(48000)), Some(WavFormat::mono(48000)));
}

#[test]
fn test_read_format_rejects_stereo() {
    let mut wav = build_header(44100);
    wav[22] = 2;
    assert_eq!(read_format(&wav), None);
    assert_eq!(read_format(b"RIFF"), None);
}

#[test]
fn test_compute_pcm_hash_of_captured_stream() {
    let mut writer = StreamingWavWriter::new(Vec::new(), 44100);
    writer.write_chunk(&[1, 0, 2, 0]).unwrap();
    let captured = writer.into_inner();
    assert_eq!(
        compute_pcm_hash(&captured),
        Some(blake3::hash(&[1, 0, 2, 0]).to_hex().to_string())
    );
}

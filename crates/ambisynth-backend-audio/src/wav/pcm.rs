//! PCM data extraction and hashing utilities.

use super::format::WavFormat;
use super::streaming::UNBOUNDED_SIZE;

/// Finds a RIFF sub-chunk by id and returns its body.
///
/// A `data` chunk whose size is [`UNBOUNDED_SIZE`] extends to the end of the
/// buffer.
fn find_chunk<'a>(wav_data: &'a [u8], id: &[u8; 4]) -> Option<&'a [u8]> {
    if wav_data.len() < 44 {
        return None;
    }

    // Verify RIFF header
    if &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let chunk_id = &wav_data[pos..pos + 4];
        let size_field = u32::from_le_bytes([
            wav_data[pos + 4],
            wav_data[pos + 5],
            wav_data[pos + 6],
            wav_data[pos + 7],
        ]);

        if chunk_id == id {
            let body_start = pos + 8;
            if id == b"data" && size_field == UNBOUNDED_SIZE {
                return Some(&wav_data[body_start..]);
            }
            let body_end = body_start + size_field as usize;
            if body_end <= wav_data.len() {
                return Some(&wav_data[body_start..body_end]);
            }
            return None;
        }

        let chunk_size = size_field as usize;
        pos += 8 + chunk_size;
        // Align to word boundary
        if !chunk_size.is_multiple_of(2) {
            pos += 1;
        }
    }

    None
}

/// Extracts PCM data from a WAV buffer.
///
/// A data chunk whose size is [`UNBOUNDED_SIZE`] extends to the end of the
/// buffer, which is how a captured stream is read back.
///
/// # Returns
/// PCM data if found, or None if the format is invalid
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    find_chunk(wav_data, b"data")
}

/// Reads the format of a 16-bit mono PCM WAV buffer.
///
/// Returns None for anything else (stereo, float, other bit depths).
pub fn read_format(wav_data: &[u8]) -> Option<WavFormat> {
    let fmt = find_chunk(wav_data, b"fmt ")?;
    if fmt.len() < 16 {
        return None;
    }
    let audio_format = u16::from_le_bytes([fmt[0], fmt[1]]);
    let channels = u16::from_le_bytes([fmt[2], fmt[3]]);
    let sample_rate = u32::from_le_bytes([fmt[4], fmt[5], fmt[6], fmt[7]]);
    let bits_per_sample = u16::from_le_bytes([fmt[14], fmt[15]]);

    let format = WavFormat::mono(sample_rate);
    (audio_format == 1 && channels == format.channels && bits_per_sample == format.bits_per_sample)
        .then_some(format)
}

/// Computes the BLAKE3 hash of a WAV buffer's PCM data.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}

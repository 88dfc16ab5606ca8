//! 16-bit mono PCM WAV containers.
//!
//! Two shapes are written: a complete file with exact size fields for batch
//! renders, and a streaming header whose size fields hold the unbounded
//! sentinel so a response can begin before its length is known.

mod format;
mod pcm;
mod result;
mod streaming;
mod writer;

#[cfg(test)]
mod tests;

// Re-export public API
pub use format::{WavFormat, HEADER_LEN};
pub use pcm::{compute_pcm_hash, extract_pcm_data, read_format};
pub use result::WavResult;
pub use streaming::{build_header, StreamingWavWriter, UNBOUNDED_SIZE};
pub use writer::{quantize_sample, write_header, write_wav, write_wav_to_vec};

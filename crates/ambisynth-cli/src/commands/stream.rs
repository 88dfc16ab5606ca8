//! Stream command implementation
//!
//! Writes an unbounded WAV stream (header, then chunks) to stdout or a file.
//! Chunk synthesis runs on the blocking pool; with `--realtime` the loop is
//! paced at one chunk per chunk duration.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use ambisynth_backend_audio::{build_header, ListenerStream, StreamRegistry};
use anyhow::{Context, Result};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::time::MissedTickBehavior;

use super::source::ProfileArgs;

/// Stream options besides the profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamOptions {
    /// Output file; stdout when `None`.
    pub output: Option<String>,
    /// Number of chunks; unbounded when `None`.
    pub chunks: Option<u64>,
    /// Pace output at playback speed.
    pub realtime: bool,
}

/// Totals for a finished stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamStats {
    /// Chunks written.
    pub chunks: u64,
    /// PCM bytes written after the header.
    pub bytes: u64,
}

/// Run the stream command
///
/// # Arguments
/// * `source` - Profile selection
/// * `options` - Output, chunk limit and pacing
///
/// # Returns
/// Exit code: 0 when the stream ends (limit reached, interrupted or the
/// reader went away)
pub fn run(source: &ProfileArgs, options: &StreamOptions) -> Result<ExitCode> {
    let resolved = source.resolve()?;
    let chunk_samples = resolved.chunk_samples();
    let chunk_period = Duration::from_secs_f64(resolved.chunk_seconds);

    let registry = Arc::new(StreamRegistry::new(resolved.sample_rate)?);
    let name = resolved.profile.name().to_string();
    registry.register(resolved.profile);
    let listener = registry.open_stream(&name)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    let options = options.clone();

    let stats = rt.block_on(async move {
        match options.output.as_deref() {
            Some(path) => {
                let file = tokio::fs::File::create(path)
                    .await
                    .with_context(|| format!("Failed to create {}", path))?;
                pump(listener, file, chunk_samples, chunk_period, &options).await
            }
            None => pump(listener, tokio::io::stdout(), chunk_samples, chunk_period, &options).await,
        }
    })?;

    tracing::info!(profile = %name, chunks = stats.chunks, bytes = stats.bytes, "stream finished");
    Ok(ExitCode::SUCCESS)
}

/// Writes the header and then chunks until the limit, Ctrl-C, or a closed
/// sink.
pub async fn pump<W>(
    mut listener: ListenerStream,
    mut sink: W,
    chunk_samples: usize,
    chunk_period: Duration,
    options: &StreamOptions,
) -> Result<StreamStats>
where
    W: AsyncWrite + Unpin,
{
    let mut stats = StreamStats { chunks: 0, bytes: 0 };

    if let Err(e) = sink.write_all(&build_header(listener.sample_rate())).await {
        return closed_or_error(e, stats);
    }

    let mut ticker = options.realtime.then(|| {
        let mut interval = tokio::time::interval(chunk_period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    });

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        if options.chunks.is_some_and(|limit| stats.chunks >= limit) {
            break;
        }

        let next = async {
            if let Some(ticker) = ticker.as_mut() {
                ticker.tick().await;
            }
            tokio::task::spawn_blocking(move || {
                let chunk = listener.next_chunk(chunk_samples);
                (listener, chunk)
            })
            .await
        };

        let (returned, chunk) = tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("interrupted");
                break;
            }
            joined = next => joined.context("chunk producer task failed")?,
        };
        listener = returned;

        if let Err(e) = sink.write_all(&chunk).await {
            return closed_or_error(e, stats);
        }
        stats.chunks += 1;
        stats.bytes += chunk.len() as u64;
    }

    if let Err(e) = sink.flush().await {
        return closed_or_error(e, stats);
    }
    Ok(stats)
}

/// A reader hanging up ends the stream normally; other write errors fail it.
fn closed_or_error(error: std::io::Error, stats: StreamStats) -> Result<StreamStats> {
    if error.kind() == std::io::ErrorKind::BrokenPipe {
        tracing::info!(chunks = stats.chunks, "reader closed the stream");
        Ok(stats)
    } else {
        Err(error).context("Failed to write audio")
    }
}

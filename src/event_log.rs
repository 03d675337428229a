//! JSON-lines event log.
//!
//! One JSON object per line: a `session` record when the host starts and stops,
//! one `lock` record per lock and one `reset` record per reset. Nothing is
//! written to the terminal, which is in raw mode while the game runs.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::HostConfig;
use crate::core::LockEvent;
use crate::types::CellPos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStage {
    Start,
    End,
}

/// One log line.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogRecord<'a> {
    Session {
        ts: u64,
        stage: SessionStage,
        seed: u32,
        tick_ms: u32,
        bounds: &'static str,
        spawn_attempts: u8,
        episode_id: u32,
    },
    Lock {
        ts: u64,
        episode_id: u32,
        piece_id: u32,
        shape: &'static str,
        rot: u8,
        flip: u8,
        cells: &'a [CellPos],
        written: u8,
        cleared_columns: &'a [u8],
        phase: &'static str,
    },
    Reset {
        ts: u64,
        episode_id: u32,
    },
}

impl<'a> LogRecord<'a> {
    pub fn session(stage: SessionStage, config: &HostConfig, seed: u32, episode_id: u32) -> Self {
        LogRecord::Session {
            ts: now_ms(),
            stage,
            seed,
            tick_ms: config.tick_ms,
            bounds: config.bounds.as_str(),
            spawn_attempts: config.spawn_attempts,
            episode_id,
        }
    }

    pub fn lock(event: &'a LockEvent, episode_id: u32) -> Self {
        LogRecord::Lock {
            ts: now_ms(),
            episode_id,
            piece_id: event.piece_id,
            shape: event.shape.as_str(),
            rot: event.orientation.rot.index(),
            flip: event.orientation.flip.index(),
            cells: &event.cells,
            written: event.written,
            cleared_columns: &event.cleared_columns,
            phase: event.phase.as_str(),
        }
    }

    pub fn reset(episode_id: u32) -> Self {
        LogRecord::Reset {
            ts: now_ms(),
            episode_id,
        }
    }
}

/// Append-only JSONL writer.
pub struct EventLog<W: Write> {
    out: W,
    buf: Vec<u8>,
}

impl EventLog<BufWriter<File>> {
    /// Open (or create) `path` for appending.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open event log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(512),
        }
    }

    pub fn write(&mut self, record: &LogRecord<'_>) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, record).context("failed to encode log record")?;
        self.buf.push(b'\n');
        self.out
            .write_all(&self.buf)
            .context("failed to write log record")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("failed to flush event log")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

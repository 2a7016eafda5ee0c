//! Per-collision event records.
//!
//! One record per resolved collision, delivered to a host-supplied sink.
//! The tab-separated file format matches the resolver's reporting
//! convention: time, outcome code, target id and post-collision mass,
//! projectile id, then id and mass of every new body in creation order.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use bodies::BodyId;
use log::warn;

use crate::outcome::OutcomeKind;

/// What happened in one resolved collision.
#[derive(Debug, Clone)]
pub struct CollisionRecord {
    pub time: f64,
    pub outcome: OutcomeKind,
    pub target: BodyId,
    /// Target mass after resolution.
    pub target_mass: f64,
    pub projectile: BodyId,
    /// Identifier and mass of every newly created body, in creation order.
    pub fragments: Vec<(BodyId, f64)>,
}

/// Host-supplied sink for collision records.
pub trait CollisionRecorder {
    fn record(&mut self, record: &CollisionRecord);
}

/// Discards every record.
pub struct NullRecorder;

impl CollisionRecorder for NullRecorder {
    fn record(&mut self, _record: &CollisionRecord) {}
}

/// Retains records in memory; the test and inspection sink.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    pub records: Vec<CollisionRecord>,
}

impl CollisionRecorder for MemoryRecorder {
    fn record(&mut self, record: &CollisionRecord) {
        self.records.push(record.clone());
    }
}

/// Appends one tab-separated line per collision to a file.
pub struct FileRecorder {
    writer: BufWriter<File>,
}

impl FileRecorder {
    /// Opens the report file for appending, creating it if absent.
    pub fn append(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new().append(true).create(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl CollisionRecorder for FileRecorder {
    fn record(&mut self, record: &CollisionRecord) {
        let mut line = format!(
            "{:e}\t{}\t{}\t{:e}\t{}",
            record.time,
            record.outcome.report_code(),
            record.target.0,
            record.target_mass,
            record.projectile.0,
        );
        for (id, mass) in &record.fragments {
            line.push_str(&format!("\t{}\t{:e}", id.0, mass));
        }

        if let Err(err) = writeln!(self.writer, "{line}").and_then(|_| self.writer.flush()) {
            warn!("failed to write collision record: {err}");
        }
    }
}

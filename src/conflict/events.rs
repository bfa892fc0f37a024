//! Transient civilization events and the bounded event log

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// Kind of transient per-civilization modifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Crisis,
    Boom,
    Recon,
}

impl EventKind {
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Crisis => "CRISIS",
            EventKind::Boom => "BOOM",
            EventKind::Recon => "RECON",
        }
    }
}

/// An event currently modifying one civilization
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub kind: EventKind,
    pub remaining: u32,
}

impl ActiveEvent {
    pub fn new(kind: EventKind, duration: u32) -> Self {
        Self {
            kind,
            remaining: duration.max(1),
        }
    }
}

/// Category of a log entry, for filtering by display collaborators
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogKind {
    War,
    Peace,
    Reconstruction,
    Crisis,
    Boom,
    Recovery,
    Singularity,
    AsteroidMining,
    Combat,
    ResourceShortage,
    Trade,
    Extinction,
}

impl LogKind {
    pub fn tag(self) -> &'static str {
        match self {
            LogKind::War => "WAR",
            LogKind::Peace => "PEACE",
            LogKind::Reconstruction => "RECONSTRUCTION",
            LogKind::Crisis => "CRISIS",
            LogKind::Boom => "BOOM",
            LogKind::Recovery => "RECOVERY",
            LogKind::Singularity => "SINGULARITY",
            LogKind::AsteroidMining => "ASTEROID MINING",
            LogKind::Combat => "COMBAT",
            LogKind::ResourceShortage => "RESOURCE SHORTAGE",
            LogKind::Trade => "TRADE",
            LogKind::Extinction => "EXTINCTION",
        }
    }
}

/// A single log line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub tick: Tick,
    pub kind: LogKind,
    pub message: String,
}

impl LogEntry {
    pub fn new(tick: Tick, kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            tick,
            kind,
            message: message.into(),
        }
    }

    /// "[TAG] message" as shown in the log panel
    pub fn display(&self) -> String {
        format!("[{}] {}", self.kind.tag(), self.message)
    }
}

/// Append-only log that evicts its oldest entries past a fixed capacity
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        tracing::debug!(tick = entry.tick, kind = entry.kind.tag(), "{}", entry.message);
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = LogEntry>) {
        for entry in entries {
            self.push(entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// The most recent `n` entries, oldest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().skip(self.entries.len().saturating_sub(n))
    }

    pub fn entries_of_kind(&self, kind: LogKind) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

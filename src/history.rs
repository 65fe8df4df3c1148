//! In-memory calculation history.
//!
//! Append-only and capacity-bounded: the newest entry sits at the front and
//! the oldest entries fall off once the cap is reached. Nothing is persisted;
//! the log starts empty on every restart.

use crate::math::BinaryOp;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::RwLock;

/// Origin of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    /// Structured {op, a, b} request
    Calc,
    /// Natural-language query routed through the phrase parser
    NlCalc,
}

/// One performed calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    /// RFC 3339 UTC timestamp
    pub ts: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub op: BinaryOp,
    pub a: f64,
    pub b: f64,
    pub result: f64,
    /// Original natural-language query (nl-calc entries only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Canonical `a <op> b` rendering of the parsed query (nl-calc only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
}

/// Thread-safe bounded history log, newest first.
pub struct HistoryStore {
    entries: RwLock<VecDeque<HistoryEntry>>,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        HistoryStore {
            entries: RwLock::new(VecDeque::new()),
            capacity,
        }
    }

    /// Record a structured calculation. Returns the stored entry.
    pub fn record_calc(&self, op: BinaryOp, a: f64, b: f64, result: f64) -> HistoryEntry {
        self.push(HistoryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            ts: chrono::Utc::now().to_rfc3339(),
            kind: EntryKind::Calc,
            op,
            a,
            b,
            result,
            query: None,
            normalized: None,
        })
    }

    /// Record a natural-language calculation. Returns the stored entry.
    pub fn record_nl_calc(
        &self,
        op: BinaryOp,
        a: f64,
        b: f64,
        result: f64,
        query: &str,
        normalized: &str,
    ) -> HistoryEntry {
        self.push(HistoryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            ts: chrono::Utc::now().to_rfc3339(),
            kind: EntryKind::NlCalc,
            op,
            a,
            b,
            result,
            query: Some(query.to_string()),
            normalized: Some(normalized.to_string()),
        })
    }

    fn push(&self, entry: HistoryEntry) -> HistoryEntry {
        let mut entries = self.entries.write().unwrap();
        entries.push_front(entry.clone());
        entries.truncate(self.capacity);
        entry
    }

    /// All entries, newest first.
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.entries.read().unwrap().iter().cloned().collect()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}

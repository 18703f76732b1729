//! Transposition table shared by the search strategies
//!
//! Two independent stores live side by side:
//!
//! - the **exact** store, used by plain minimax, whose entries are exact values
//!   for the depth they were searched at;
//! - the **bounded** store, used by alpha-beta and SCOUT, whose entries carry a
//!   [`Bound`] classifying the value against the window it was searched with.
//!
//! An entry only answers a query when it was searched at least as deep as the
//! query asks for. Entries are never evicted: the table grows with the number
//! of distinct positions searched and is meant to live for one comparative
//! run. Capping it would silently change which results are reused.

use std::{collections::HashMap, hash::Hash};

use serde::{Deserialize, Serialize};

use crate::{
    ports::Game,
    search::{Value, Window},
};

/// How a stored value relates to the true value of the position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bound {
    /// The value is exact
    Exact,
    /// The search failed high: the true value is at least the stored value
    LowerBound,
    /// The search failed low: the true value is at most the stored value
    UpperBound,
}

impl Bound {
    /// Classify `value` against the window that was active before the search
    /// of its children began.
    pub fn classify(value: Value, window: Window) -> Bound {
        if value <= window.alpha {
            Bound::UpperBound
        } else if value >= window.beta {
            Bound::LowerBound
        } else {
            Bound::Exact
        }
    }
}

/// Entry in the exact-depth (minimax) store
#[derive(Debug, Clone, PartialEq)]
pub struct ExactEntry<M> {
    pub depth: u32,
    pub value: Value,
    pub best_move: Option<M>,
}

/// Entry in the bounded (alpha-beta / SCOUT) store
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedEntry<M> {
    pub depth: u32,
    pub value: Value,
    pub best_move: Option<M>,
    pub bound: Bound,
    /// Window the value was searched with
    pub window: Window,
}

/// A usable answer returned by a probe
#[derive(Debug, Clone, PartialEq)]
pub struct TableHit<M> {
    pub best_move: Option<M>,
    pub value: Value,
}

/// Running counters for one table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

impl TableStats {
    /// Fraction of probes answered from the table
    pub fn hit_rate(&self) -> f64 {
        if self.probes == 0 {
            0.0
        } else {
            self.hits as f64 / self.probes as f64
        }
    }
}

/// Memo store keyed by canonical state key
#[derive(Debug, Clone)]
pub struct TranspositionTable<K, M> {
    exact: HashMap<K, ExactEntry<M>>,
    bounded: HashMap<K, BoundedEntry<M>>,
    stats: TableStats,
}

/// The table type for a particular game
pub type GameTable<G> = TranspositionTable<<G as Game>::Key, <G as Game>::Move>;

impl<K, M> TranspositionTable<K, M>
where
    K: Eq + Hash,
    M: Clone,
{
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            exact: HashMap::new(),
            bounded: HashMap::new(),
            stats: TableStats::default(),
        }
    }

    /// Look up an exact minimax result searched at least `depth` plies deep
    pub fn probe_exact(&mut self, key: &K, depth: u32) -> Option<TableHit<M>> {
        self.stats.probes += 1;
        let entry = self.exact.get(key).filter(|entry| entry.depth >= depth)?;
        self.stats.hits += 1;
        Some(TableHit {
            best_move: entry.best_move.clone(),
            value: entry.value,
        })
    }

    /// Record an exact minimax result, replacing any previous entry
    pub fn store_exact(&mut self, key: K, depth: u32, value: Value, best_move: Option<M>) {
        self.stats.stores += 1;
        self.exact.insert(
            key,
            ExactEntry {
                depth,
                value,
                best_move,
            },
        );
    }

    /// Look up a bounded result usable for a `depth`-ply search in `window`.
    ///
    /// Exact entries are always usable. A lower bound raises alpha and an
    /// upper bound lowers beta; the entry is usable only when that closes the
    /// window. The tightening is local to the probe: a miss leaves the
    /// caller's window untouched.
    pub fn probe_bounded(&mut self, key: &K, depth: u32, window: Window) -> Option<TableHit<M>> {
        self.stats.probes += 1;
        let entry = self.bounded.get(key).filter(|entry| entry.depth >= depth)?;

        let mut local = window;
        let usable = match entry.bound {
            Bound::Exact => true,
            Bound::LowerBound => {
                local.alpha = local.alpha.max(entry.value);
                local.is_closed()
            }
            Bound::UpperBound => {
                local.beta = local.beta.min(entry.value);
                local.is_closed()
            }
        };
        if !usable {
            return None;
        }

        self.stats.hits += 1;
        Some(TableHit {
            best_move: entry.best_move.clone(),
            value: entry.value,
        })
    }

    /// Record a full-window result, classifying it against `window`, the
    /// window that was active before the children were searched.
    pub fn store_bounded(
        &mut self,
        key: K,
        depth: u32,
        value: Value,
        best_move: Option<M>,
        window: Window,
    ) {
        self.stats.stores += 1;
        self.bounded.insert(
            key,
            BoundedEntry {
                depth,
                value,
                best_move,
                bound: Bound::classify(value, window),
                window,
            },
        );
    }

    /// Inspect the exact store
    pub fn exact_entry(&self, key: &K) -> Option<&ExactEntry<M>> {
        self.exact.get(key)
    }

    /// Inspect the bounded store
    pub fn bounded_entry(&self, key: &K) -> Option<&BoundedEntry<M>> {
        self.bounded.get(key)
    }

    /// Number of entries in the exact store
    pub fn exact_len(&self) -> usize {
        self.exact.len()
    }

    /// Number of entries in the bounded store
    pub fn bounded_len(&self) -> usize {
        self.bounded.len()
    }

    /// Total entries across both stores
    pub fn len(&self) -> usize {
        self.exact.len() + self.bounded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.bounded.is_empty()
    }

    /// Counters accumulated since creation or the last [`clear`](Self::clear)
    pub fn stats(&self) -> TableStats {
        self.stats
    }

    /// Drop every entry and reset the counters
    pub fn clear(&mut self) {
        self.exact.clear();
        self.bounded.clear();
        self.stats = TableStats::default();
    }
}

impl<K, M> Default for TranspositionTable<K, M>
where
    K: Eq + Hash,
    M: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

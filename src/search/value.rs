//! Search values and alpha-beta windows

use std::fmt;

use serde::{Deserialize, Serialize};

/// A totally ordered search score from the maximizer's point of view.
///
/// `+∞` and `−∞` are proven wins and losses. Heuristic scores are clamped
/// strictly between them, so bound classification never confuses an estimate
/// with a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Value(i32);

impl Value {
    /// The maximizer has won
    pub const INFINITY: Value = Value(i32::MAX);

    /// The maximizer has lost
    pub const NEG_INFINITY: Value = Value(-i32::MAX);

    /// Drawn game
    pub const DRAW: Value = Value(0);

    /// Largest score a heuristic can produce
    pub const MAX_HEURISTIC: Value = Value(i32::MAX - 1);

    /// Smallest score a heuristic can produce
    pub const MIN_HEURISTIC: Value = Value(-(i32::MAX - 1));

    /// Wrap a heuristic score, clamping it into the open interval `(−∞, +∞)`
    pub fn heuristic(score: i32) -> Value {
        Value(score.clamp(Self::MIN_HEURISTIC.0, Self::MAX_HEURISTIC.0))
    }

    /// Get the raw score
    pub fn get(self) -> i32 {
        self.0
    }

    /// Whether this is a proven win or loss
    pub fn is_proven(self) -> bool {
        self == Self::INFINITY || self == Self::NEG_INFINITY
    }

    /// The next value up, saturating at `+∞`
    pub fn succ(self) -> Value {
        Value(self.0.saturating_add(1).min(Self::INFINITY.0))
    }

    /// The next value down, saturating at `−∞`
    pub fn pred(self) -> Value {
        Value(self.0.saturating_sub(1).max(Self::NEG_INFINITY.0))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Value::INFINITY => write!(f, "+inf"),
            Value::NEG_INFINITY => write!(f, "-inf"),
            Value(score) => write!(f, "{score}"),
        }
    }
}

/// An alpha-beta search window `[alpha, beta]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub alpha: Value,
    pub beta: Value,
}

impl Window {
    /// The unbounded window used at the root
    pub const FULL: Window = Window {
        alpha: Value::NEG_INFINITY,
        beta: Value::INFINITY,
    };

    pub fn new(alpha: Value, beta: Value) -> Self {
        Self { alpha, beta }
    }

    /// Minimal window just above `pivot`: `[pivot, pivot + 1]`.
    ///
    /// A search in this window answers "can the value exceed `pivot`?".
    pub fn null_above(pivot: Value) -> Self {
        Self::new(pivot, pivot.succ())
    }

    /// Minimal window just below `pivot`: `[pivot - 1, pivot]`.
    pub fn null_below(pivot: Value) -> Self {
        Self::new(pivot.pred(), pivot)
    }

    /// Whether the window has closed (`alpha >= beta`)
    pub fn is_closed(&self) -> bool {
        self.alpha >= self.beta
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::FULL
    }
}

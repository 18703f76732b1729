//! Normal-play Nim
//!
//! Players alternately take one or more objects from a single heap. The player
//! who takes the last object wins, so a player facing only empty heaps has
//! lost.

use std::{fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    identifiers::StateKey,
    ports::{Evaluator, Game, Role},
};

/// Heuristic magnitude for a position whose nim-sum decides the game
pub const NIM_SCORE: i32 = 100;

/// Largest heap produced by [`Nim::random`]
pub const RANDOM_MAX_HEAP: u32 = 7;

/// Number of heaps produced by [`Nim::random`]
pub const RANDOM_HEAPS: usize = 3;

/// A move: remove `count` objects from heap `heap`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Take {
    pub heap: usize,
    pub count: u32,
}

impl fmt::Display for Take {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "take {} from heap {}", self.count, self.heap)
    }
}

/// A Nim position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nim {
    heaps: Vec<u32>,
}

impl Nim {
    pub fn new(heaps: Vec<u32>) -> Self {
        Self { heaps }
    }

    /// Random heaps: [`RANDOM_HEAPS`] heaps of 1 to [`RANDOM_MAX_HEAP`] each
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let heaps = (0..RANDOM_HEAPS)
            .map(|_| rng.random_range(1..=RANDOM_MAX_HEAP))
            .collect();
        Self { heaps }
    }

    pub fn heaps(&self) -> &[u32] {
        &self.heaps
    }

    /// XOR of all heap sizes. Zero means the player to move loses with
    /// perfect play.
    pub fn nim_sum(&self) -> u32 {
        self.heaps.iter().fold(0, |acc, &heap| acc ^ heap)
    }

    /// Objects left on the table
    pub fn remaining(&self) -> u32 {
        self.heaps.iter().sum()
    }

    /// Apply `mv` for `role`, checking that it is legal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] when every heap is empty, and
    /// [`Error::IllegalMove`] for a missing heap or a bad count.
    pub fn play(&mut self, mv: Take, role: Role) -> Result<()> {
        if self.is_terminal() {
            return Err(Error::GameOver);
        }
        let Some(&size) = self.heaps.get(mv.heap) else {
            return Err(Error::IllegalMove {
                mv: mv.to_string(),
                reason: format!("there are only {} heaps", self.heaps.len()),
            });
        };
        if mv.count == 0 || mv.count > size {
            return Err(Error::IllegalMove {
                mv: mv.to_string(),
                reason: format!("heap {} holds {size}", mv.heap),
            });
        }
        self.apply_move(&mv, role);
        Ok(())
    }
}

impl Default for Nim {
    fn default() -> Self {
        Self::new(vec![3, 5, 7])
    }
}

impl FromStr for Nim {
    type Err = Error;

    /// Parse a comma separated heap list such as `3,5,7`
    fn from_str(s: &str) -> Result<Self> {
        let heaps = s
            .split(',')
            .map(|part| {
                part.trim().parse::<u32>().map_err(|e| Error::InvalidHeaps {
                    input: s.to_string(),
                    reason: format!("'{}': {e}", part.trim()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if heaps.iter().all(|&heap| heap == 0) {
            return Err(Error::InvalidHeaps {
                input: s.to_string(),
                reason: "at least one heap must be non-empty".to_string(),
            });
        }

        Ok(Self::new(heaps))
    }
}

impl Game for Nim {
    type Move = Take;
    type Key = StateKey;

    fn is_terminal(&self) -> bool {
        self.heaps.iter().all(|&heap| heap == 0)
    }

    /// The player who took the last object wins, which is never the one to
    /// move.
    fn winner(&self, to_move: Role) -> Option<Role> {
        self.is_terminal().then(|| to_move.opponent())
    }

    fn legal_moves(&self) -> Vec<Take> {
        self.heaps
            .iter()
            .enumerate()
            .flat_map(|(heap, &size)| (1..=size).map(move |count| Take { heap, count }))
            .collect()
    }

    fn apply_move(&mut self, mv: &Take, _role: Role) {
        debug_assert!(self.heaps[mv.heap] >= mv.count, "{mv} on {self:?}");
        self.heaps[mv.heap] -= mv.count;
    }

    fn undo_move(&mut self, mv: &Take, _role: Role) {
        self.heaps[mv.heap] += mv.count;
    }

    fn state_key(&self, to_move: Role) -> StateKey {
        let heaps: Vec<String> = self.heaps.iter().map(u32::to_string).collect();
        StateKey::new(format!("{}_{}", heaps.join(","), to_move.symbol()))
    }
}

impl fmt::Display for Nim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &heap) in self.heaps.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "Heap {i}: {} ({heap})", "|".repeat(heap as usize))?;
        }
        Ok(())
    }
}

/// Nim-sum heuristic: a zero nim-sum loses for the side to move
#[derive(Debug, Clone, Copy, Default)]
pub struct NimHeuristic;

impl Evaluator<Nim> for NimHeuristic {
    fn heuristic(&self, game: &Nim, to_move: Role) -> i32 {
        let to_move_wins = game.nim_sum() != 0;
        match (to_move, to_move_wins) {
            (Role::Maximizer, true) | (Role::Minimizer, false) => NIM_SCORE,
            (Role::Maximizer, false) | (Role::Minimizer, true) => -NIM_SCORE,
        }
    }
}

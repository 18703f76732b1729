//! Game port - the capability set the search core consumes
//!
//! A game adapter owns a single mutable position. The search core borrows it
//! for the length of one search and applies and undoes moves in strict stack
//! order, so `apply_move` and `undo_move` must be exact inverses.

use std::{fmt, hash::Hash};

use serde::{Deserialize, Serialize};

/// Which side of the minimax tree a player sits on.
///
/// The maximizer is the side the root search is run for; every score is
/// reported from its point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Maximizer,
    Minimizer,
}

impl Role {
    /// Get the other role
    pub fn opponent(self) -> Role {
        match self {
            Role::Maximizer => Role::Minimizer,
            Role::Minimizer => Role::Maximizer,
        }
    }

    /// Board symbol: `X` for the maximizer, `O` for the minimizer
    pub fn symbol(self) -> char {
        match self {
            Role::Maximizer => 'X',
            Role::Minimizer => 'O',
        }
    }

    /// Map the boolean "is maximizing" flag used by classic minimax formulations
    pub fn from_maximizing(is_maximizing: bool) -> Role {
        if is_maximizing {
            Role::Maximizer
        } else {
            Role::Minimizer
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Maximizer => write!(f, "max"),
            Role::Minimizer => write!(f, "min"),
        }
    }
}

/// Game trait - the adapter every searchable game implements
///
/// # Contract
///
/// - `legal_moves` is deterministic and finite, and non-empty on every
///   non-terminal position.
/// - `undo_move(m, r)` immediately after `apply_move(m, r)` restores the
///   position exactly (deep equality).
/// - `state_key(r)` is collision-free: two positions with equal keys have the
///   same legal continuations and the same terminal status. The role to move
///   is part of the key.
///
/// # Examples
///
/// ```
/// use gamesearch::{
///     games::Nim,
///     ports::{Game, Role},
/// };
///
/// let mut nim = Nim::new(vec![1, 2]);
/// let moves = nim.legal_moves();
/// nim.apply_move(&moves[0], Role::Maximizer);
/// nim.undo_move(&moves[0], Role::Maximizer);
/// assert_eq!(nim, Nim::new(vec![1, 2]));
/// ```
pub trait Game {
    /// A single game-specific move (column, heap/count pair, line)
    type Move: Clone + PartialEq + fmt::Debug + fmt::Display;

    /// Canonical memo key for a position plus the role to move
    type Key: Clone + Eq + Hash + fmt::Debug;

    /// Whether the game is over
    fn is_terminal(&self) -> bool;

    /// The winner of a finished game, if any.
    ///
    /// `to_move` is the role whose turn it would be; games where the last
    /// mover wins (such as Nim) need it. `None` means a draw or an undecided
    /// position.
    fn winner(&self, to_move: Role) -> Option<Role>;

    /// All legal moves in a fixed, deterministic order
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Play `mv` for `role`
    fn apply_move(&mut self, mv: &Self::Move, role: Role);

    /// Take back `mv` previously played by `role`
    fn undo_move(&mut self, mv: &Self::Move, role: Role);

    /// Canonical key of the current position with `to_move` to play
    fn state_key(&self, to_move: Role) -> Self::Key;
}

//! Common test utilities for the gamesearch test suite.
//!
//! Provides a mock game over a hand-built tree with known leaf values, so the
//! search strategies can be checked in isolation from any real game.

#![allow(dead_code)]

use gamesearch::{
    ports::{Game, Role},
    search::Value,
};

/// A node of a hand-built game tree
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// Interior node; moves are indices into the child list
    Inner(Vec<usize>),
    /// Depth-limit leaf scored by [`leaf_heuristic`]
    Leaf(i32),
    /// Finished game
    Over(Option<Role>),
}

/// Mock game walking a fixed tree
#[derive(Debug, Clone, PartialEq)]
pub struct TreeGame {
    nodes: Vec<TreeNode>,
    current: usize,
    path: Vec<usize>,
}

impl TreeGame {
    /// Build a tree from explicit nodes; node 0 is the root
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self {
            nodes,
            current: 0,
            path: Vec::new(),
        }
    }

    /// Complete tree with `branching` children per interior node and the
    /// given leaves, left to right. `leaves.len()` must be a power of
    /// `branching`.
    pub fn uniform(branching: usize, leaves: &[i32]) -> Self {
        let mut level: Vec<TreeNode> = leaves.iter().map(|&v| TreeNode::Leaf(v)).collect();
        let mut levels = Vec::new();
        while level.len() > 1 {
            assert_eq!(level.len() % branching, 0, "leaves must fill the tree");
            let parents = level.len() / branching;
            levels.push(level);
            level = (0..parents).map(|_| TreeNode::Inner(Vec::new())).collect();
        }
        levels.push(level);
        levels.reverse();

        // Flatten root first, wiring child indices level by level
        let mut nodes = Vec::new();
        let mut offset = 0;
        for depth in 0..levels.len() {
            let next_offset = offset + levels[depth].len();
            for (i, node) in levels[depth].iter().enumerate() {
                nodes.push(match node {
                    TreeNode::Inner(_) => TreeNode::Inner(
                        (0..branching)
                            .map(|c| next_offset + i * branching + c)
                            .collect(),
                    ),
                    other => other.clone(),
                });
            }
            offset = next_offset;
        }

        Self::new(nodes)
    }

    /// Height of the tree below the current node
    pub fn height(&self) -> u32 {
        fn height_of(nodes: &[TreeNode], idx: usize) -> u32 {
            match &nodes[idx] {
                TreeNode::Inner(children) => {
                    1 + children.iter().map(|&c| height_of(nodes, c)).max().unwrap_or(0)
                }
                _ => 0,
            }
        }
        height_of(&self.nodes, self.current)
    }

    /// Number of nodes in the whole tree
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self) -> &TreeNode {
        &self.nodes[self.current]
    }
}

impl Game for TreeGame {
    type Move = usize;
    type Key = (usize, Role);

    fn is_terminal(&self) -> bool {
        matches!(self.node(), TreeNode::Over(_))
    }

    fn winner(&self, _to_move: Role) -> Option<Role> {
        match self.node() {
            TreeNode::Over(winner) => *winner,
            _ => None,
        }
    }

    fn legal_moves(&self) -> Vec<usize> {
        match self.node() {
            TreeNode::Inner(children) => (0..children.len()).collect(),
            _ => Vec::new(),
        }
    }

    fn apply_move(&mut self, mv: &usize, _role: Role) {
        let TreeNode::Inner(children) = &self.nodes[self.current] else {
            panic!("move {mv} from a leaf");
        };
        let next = children[*mv];
        self.path.push(self.current);
        self.current = next;
    }

    fn undo_move(&mut self, _mv: &usize, _role: Role) {
        self.current = self.path.pop().expect("undo without a move");
    }

    fn state_key(&self, to_move: Role) -> (usize, Role) {
        (self.current, to_move)
    }
}

/// Evaluator reading the value stored at a leaf
pub fn leaf_heuristic(game: &TreeGame, _to_move: Role) -> i32 {
    match game.node() {
        TreeNode::Leaf(value) => *value,
        _ => 0,
    }
}

/// Depth-2 tree with branching 3: root value 3 via the first move
pub fn textbook_tree() -> TreeGame {
    TreeGame::uniform(3, &[3, 12, 8, 2, 4, 6, 14, 5, 2])
}

/// Depth-4 binary tree with a mix of values
pub fn deep_tree() -> TreeGame {
    TreeGame::uniform(
        2,
        &[5, 6, 7, 4, 5, 3, 6, 6, 9, 7, 5, 9, 8, 6, -2, 1],
    )
}

/// Shorthand for a finite value
pub fn v(score: i32) -> Value {
    Value::heuristic(score)
}

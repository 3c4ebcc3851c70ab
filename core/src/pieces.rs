//! Identity and capability model for the pieces placed on a board.
//!
//! Blocks occupy cells and may be pushed; targets mark goal cells and never
//! move. Both are identified by their label: two blocks carrying the same
//! label compare equal regardless of their capabilities, so labels must be
//! unique within an arrangement.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

use crate::geometry::{Cell, Vector};

/// Effort charged for pushing an ordinary block.
pub const DEFAULT_EFFORT: u32 = 1;

/// Push budget granted to a player when none is configured.
pub const DEFAULT_PUSH_STRENGTH: u32 = 1;

/// Prefix reserved for labels generated for wall blocks.
pub const WALL_LABEL_PREFIX: char = '#';

/// Label identifying a block within an arrangement.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(String);

impl BlockId {
    /// Creates an identifier from the provided label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Label generated for the wall occupying the provided cell.
    #[must_use]
    pub fn wall_at(cell: Cell) -> Self {
        Self(format!(
            "{WALL_LABEL_PREFIX}{},{}",
            cell.row(),
            cell.column()
        ))
    }

    /// Underlying label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for BlockId {
    fn from(label: String) -> Self {
        Self(label)
    }
}

/// Label identifying a target within an arrangement.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(String);

impl TargetId {
    /// Creates an identifier from the provided label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Underlying label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for TargetId {
    fn from(label: String) -> Self {
        Self(label)
    }
}

/// Resistance a block offers when pushed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effort {
    /// The block moves once this much push budget is spent on it.
    Finite(u32),
    /// No budget is ever enough.
    Immovable,
}

impl Effort {
    /// Spends the effort from the provided budget.
    ///
    /// Returns the budget left over, or `None` when the budget cannot cover
    /// the cost.
    #[must_use]
    pub const fn spend(self, budget: u32) -> Option<u32> {
        match self {
            Self::Finite(cost) => budget.checked_sub(cost),
            Self::Immovable => None,
        }
    }

    /// Reports whether any budget could ever move the block.
    #[must_use]
    pub const fn is_movable(self) -> bool {
        matches!(self, Self::Finite(_))
    }
}

/// Closed set of block behaviours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// Ordinary pushable block.
    Movable {
        /// Budget consumed when the block is pushed.
        effort: u32,
    },
    /// The piece driven by input. It can itself be pushed like a block.
    Player {
        /// Budget consumed when the player is pushed.
        effort: u32,
        /// Total effort the player may spend pushing during one move.
        push_strength: u32,
    },
    /// Permanent obstacle placed at build time.
    Wall,
}

impl BlockKind {
    /// Resistance offered when this block is pushed.
    #[must_use]
    pub const fn effort_to_move(&self) -> Effort {
        match *self {
            Self::Movable { effort } | Self::Player { effort, .. } => Effort::Finite(effort),
            Self::Wall => Effort::Immovable,
        }
    }

    /// Push budget available when this block initiates a move.
    #[must_use]
    pub const fn push_strength(&self) -> u32 {
        match *self {
            Self::Player { push_strength, .. } => push_strength,
            Self::Movable { .. } | Self::Wall => 0,
        }
    }

    /// Direction this block travels when pushed along `push`.
    ///
    /// Every current kind moves the way it is pushed.
    #[must_use]
    pub const fn translate_push_vector(&self, push: Vector) -> Vector {
        match self {
            Self::Movable { .. } | Self::Player { .. } | Self::Wall => push,
        }
    }
}

/// A piece occupying exactly one cell.
///
/// Equality and hashing consider only the label.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Block {
    id: BlockId,
    kind: BlockKind,
}

impl Block {
    /// Ordinary block with the default effort.
    #[must_use]
    pub fn movable(id: impl Into<BlockId>) -> Self {
        Self {
            id: id.into(),
            kind: BlockKind::Movable {
                effort: DEFAULT_EFFORT,
            },
        }
    }

    /// Player piece with the provided push budget.
    #[must_use]
    pub fn player(id: impl Into<BlockId>, push_strength: u32) -> Self {
        Self {
            id: id.into(),
            kind: BlockKind::Player {
                effort: DEFAULT_EFFORT,
                push_strength,
            },
        }
    }

    /// Immovable wall piece.
    #[must_use]
    pub fn wall(id: impl Into<BlockId>) -> Self {
        Self {
            id: id.into(),
            kind: BlockKind::Wall,
        }
    }

    /// Replaces the push cost of a movable block or player. Walls stay immovable.
    #[must_use]
    pub fn with_effort(mut self, effort: u32) -> Self {
        match &mut self.kind {
            BlockKind::Movable { effort: current } | BlockKind::Player { effort: current, .. } => {
                *current = effort;
            }
            BlockKind::Wall => {}
        }
        self
    }

    /// Label of the block.
    #[must_use]
    pub fn id(&self) -> &BlockId {
        &self.id
    }

    /// Behaviour of the block.
    #[must_use]
    pub const fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Resistance offered when this block is pushed.
    #[must_use]
    pub const fn effort_to_move(&self) -> Effort {
        self.kind.effort_to_move()
    }

    /// Push budget available when this block initiates a move.
    #[must_use]
    pub const fn push_strength(&self) -> u32 {
        self.kind.push_strength()
    }

    /// Direction this block travels when pushed along `push`.
    #[must_use]
    pub const fn translate_push_vector(&self, push: Vector) -> Vector {
        self.kind.translate_push_vector(push)
    }

    /// Reports whether the block is a wall.
    #[must_use]
    pub const fn is_wall(&self) -> bool {
        matches!(self.kind, BlockKind::Wall)
    }

    /// Reports whether the block is a player piece.
    #[must_use]
    pub const fn is_player(&self) -> bool {
        matches!(self.kind, BlockKind::Player { .. })
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Block {}

impl Hash for Block {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Which blocks satisfy a target by standing on it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Acceptance {
    /// Any block co-located with the target satisfies it.
    #[default]
    AnyBlock,
    /// Only the named block satisfies the target.
    Block(BlockId),
}

/// Fixed goal marker. Targets never move and never block movement.
///
/// Equality and hashing consider only the label.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Target {
    id: TargetId,
    acceptance: Acceptance,
}

impl Target {
    /// Target satisfied by any block.
    #[must_use]
    pub fn new(id: impl Into<TargetId>) -> Self {
        Self {
            id: id.into(),
            acceptance: Acceptance::AnyBlock,
        }
    }

    /// Target satisfied only by the named block.
    #[must_use]
    pub fn for_block(id: impl Into<TargetId>, block: impl Into<BlockId>) -> Self {
        Self {
            id: id.into(),
            acceptance: Acceptance::Block(block.into()),
        }
    }

    /// Label of the target.
    #[must_use]
    pub fn id(&self) -> &TargetId {
        &self.id
    }

    /// Rule deciding which blocks satisfy the target.
    #[must_use]
    pub fn acceptance(&self) -> &Acceptance {
        &self.acceptance
    }

    /// Reports whether the block satisfies the target when placed on it.
    #[must_use]
    pub fn is_valid_block(&self, block: &Block) -> bool {
        match &self.acceptance {
            Acceptance::AnyBlock => true,
            Acceptance::Block(expected) => block.id() == expected,
        }
    }
}

impl PartialEq for Target {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Target {}

impl Hash for Target {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

//! Accumulates placements and finalises them into an [`Arrangement`].

use std::collections::BTreeMap;

use box_pusher_core::{Block, BlockId, Cell, CellBounds, Target, TargetId};
use thiserror::Error;

use crate::arrangement::{Arrangement, Parts, Placement};

/// Reasons an arrangement cannot be constructed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// A block with the same label was already placed.
    #[error("block label `{0}` is already placed")]
    DuplicateBlock(BlockId),
    /// A target with the same label was already placed.
    #[error("target label `{0}` is already placed")]
    DuplicateTarget(TargetId),
    /// A second player piece was placed.
    #[error("cannot place player `{requested}`: player `{existing}` is already placed")]
    SecondPlayer {
        /// Player already present in the builder.
        existing: BlockId,
        /// Player whose placement was refused.
        requested: BlockId,
    },
    /// A wall segment was requested between cells sharing neither row nor column.
    #[error("cannot create non-horizontal or non-vertical walls; wall requested from {from} to {to}")]
    DiagonalWall {
        /// First end of the requested segment.
        from: Cell,
        /// Second end of the requested segment.
        to: Cell,
    },
    /// Two blocks ended up on the same cell.
    #[error("blocks `{first}` and `{second}` both occupy {cell}")]
    CellOccupied {
        /// Contested cell.
        cell: Cell,
        /// Block placed on the cell first, in label order.
        first: BlockId,
        /// Block that collided with it.
        second: BlockId,
    },
    /// Two targets mark the same cell.
    #[error("targets `{first}` and `{second}` both mark {cell}")]
    TargetCellTaken {
        /// Contested cell.
        cell: Cell,
        /// Target marking the cell first, in label order.
        first: TargetId,
        /// Target that collided with it.
        second: TargetId,
    },
    /// A block that was never placed was asked to move.
    #[error("block `{0}` is not placed")]
    UnknownBlock(BlockId),
    /// A block or target lies outside the configured playfield.
    #[error("{cell} lies outside the playfield")]
    OutsidePlayfield {
        /// Offending cell.
        cell: Cell,
    },
}

/// Builder producing immutable [`Arrangement`] values.
///
/// Placement methods consume the builder and hand it back, so construction
/// chains with `?` or [`Result::and_then`]. Cell collisions are checked when
/// the arrangement is finalised, which lets [`ArrangementBuilder::relocate`]
/// shuffle several blocks through each other's cells.
#[derive(Clone, Debug, Default)]
pub struct ArrangementBuilder {
    blocks: BTreeMap<BlockId, Placement<Block>>,
    targets: BTreeMap<TargetId, Placement<Target>>,
    player: Option<BlockId>,
    playfield: Option<CellBounds>,
}

impl ArrangementBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a builder with a copy of every placement in the arrangement.
    #[must_use]
    pub fn derive_from(arrangement: &Arrangement) -> Self {
        Self {
            blocks: arrangement.block_placements().clone(),
            targets: arrangement.target_placements().clone(),
            player: arrangement.player().map(|player| player.id().clone()),
            playfield: arrangement.playfield(),
        }
    }

    /// Places a block on a cell. Placing a player block also records it as
    /// the arrangement's player.
    pub fn place(mut self, block: Block, cell: Cell) -> Result<Self, ConstructionError> {
        if self.blocks.contains_key(block.id()) {
            return Err(ConstructionError::DuplicateBlock(block.id().clone()));
        }

        if block.is_player() {
            if let Some(existing) = &self.player {
                return Err(ConstructionError::SecondPlayer {
                    existing: existing.clone(),
                    requested: block.id().clone(),
                });
            }
            self.player = Some(block.id().clone());
        }

        let _ = self.blocks.insert(
            block.id().clone(),
            Placement {
                piece: block,
                cell,
            },
        );
        Ok(self)
    }

    /// Places the player piece with the provided push budget.
    pub fn player(
        self,
        id: impl Into<BlockId>,
        push_strength: u32,
        cell: Cell,
    ) -> Result<Self, ConstructionError> {
        self.place(Block::player(id, push_strength), cell)
    }

    /// Places an ordinary block with the default effort.
    pub fn movable(self, id: impl Into<BlockId>, cell: Cell) -> Result<Self, ConstructionError> {
        self.place(Block::movable(id), cell)
    }

    /// Marks a cell with a target.
    pub fn target(mut self, target: Target, cell: Cell) -> Result<Self, ConstructionError> {
        if self.targets.contains_key(target.id()) {
            return Err(ConstructionError::DuplicateTarget(target.id().clone()));
        }

        let _ = self.targets.insert(
            target.id().clone(),
            Placement {
                piece: target,
                cell,
            },
        );
        Ok(self)
    }

    /// Places a wall on a single cell.
    ///
    /// Walls carry generated labels, so placing a wall where one already
    /// stands is a no-op.
    pub fn wall(self, cell: Cell) -> Result<Self, ConstructionError> {
        let id = BlockId::wall_at(cell);
        if let Some(existing) = self.blocks.get(&id) {
            if existing.piece.is_wall() && existing.cell == cell {
                return Ok(self);
            }
        }
        self.place(Block::wall(id), cell)
    }

    /// Places a straight run of walls covering both ends.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::DiagonalWall`] unless the ends share a
    /// row or a column.
    pub fn wall_segment(self, from: Cell, to: Cell) -> Result<Self, ConstructionError> {
        if from.row() != to.row() && from.column() != to.column() {
            return Err(ConstructionError::DiagonalWall { from, to });
        }

        Cell::range(from, to)
            .iter()
            .try_fold(self, |builder, cell| builder.wall(cell))
    }

    /// Confines every block and target to the provided rectangle.
    #[must_use]
    pub fn playfield(mut self, bounds: CellBounds) -> Self {
        self.playfield = Some(bounds);
        self
    }

    /// Moves an already placed block to a new cell.
    pub fn relocate(mut self, id: &BlockId, cell: Cell) -> Result<Self, ConstructionError> {
        let placement = self
            .blocks
            .get_mut(id)
            .ok_or_else(|| ConstructionError::UnknownBlock(id.clone()))?;
        placement.cell = cell;
        Ok(self)
    }

    /// Validates the placements and finalises the arrangement.
    ///
    /// # Errors
    ///
    /// Fails when two blocks share a cell, two targets share a cell, or a
    /// piece lies outside the playfield.
    pub fn build(self) -> Result<Arrangement, ConstructionError> {
        let mut occupancy: BTreeMap<Cell, BlockId> = BTreeMap::new();
        let mut bounds: Option<CellBounds> = None;
        for (id, placement) in &self.blocks {
            let cell = placement.cell;
            self.check_playfield(cell)?;
            if let Some(first) = occupancy.insert(cell, id.clone()) {
                return Err(ConstructionError::CellOccupied {
                    cell,
                    first,
                    second: id.clone(),
                });
            }
            bounds = Some(match bounds {
                Some(bounds) => bounds.include(cell),
                None => CellBounds::single(cell),
            });
        }

        let mut target_cells: BTreeMap<Cell, TargetId> = BTreeMap::new();
        for (id, placement) in &self.targets {
            let cell = placement.cell;
            self.check_playfield(cell)?;
            if let Some(first) = target_cells.insert(cell, id.clone()) {
                return Err(ConstructionError::TargetCellTaken {
                    cell,
                    first,
                    second: id.clone(),
                });
            }
        }

        Ok(Arrangement::from_parts(Parts {
            blocks: self.blocks,
            occupancy,
            targets: self.targets,
            target_cells,
            player: self.player,
            bounds,
            playfield: self.playfield,
        }))
    }

    fn check_playfield(&self, cell: Cell) -> Result<(), ConstructionError> {
        match self.playfield {
            Some(playfield) if !playfield.contains(cell) => {
                Err(ConstructionError::OutsidePlayfield { cell })
            }
            _ => Ok(()),
        }
    }
}

//! Immutable snapshot of where every block and target sits.

use std::collections::BTreeMap;

use box_pusher_core::{Block, BlockId, Cell, CellBounds, Target, TargetId};

/// A piece together with the cell it occupies.
#[derive(Clone, Debug)]
pub(crate) struct Placement<T> {
    pub(crate) piece: T,
    pub(crate) cell: Cell,
}

/// Immutable board state.
///
/// An arrangement is produced once by [`crate::ArrangementBuilder`] and never
/// mutated afterwards; moving a piece derives a new arrangement through
/// [`crate::attempt_move`]. Every derived arrangement owns its own maps.
///
/// Blocks and targets are kept in label order and no two blocks share a
/// cell. A target's cell may or may not hold a block.
#[derive(Clone, Debug)]
pub struct Arrangement {
    blocks: BTreeMap<BlockId, Placement<Block>>,
    occupancy: BTreeMap<Cell, BlockId>,
    targets: BTreeMap<TargetId, Placement<Target>>,
    target_cells: BTreeMap<Cell, TargetId>,
    player: Option<BlockId>,
    bounds: Option<CellBounds>,
    playfield: Option<CellBounds>,
}

/// Validated pieces handed over by the builder.
pub(crate) struct Parts {
    pub(crate) blocks: BTreeMap<BlockId, Placement<Block>>,
    pub(crate) occupancy: BTreeMap<Cell, BlockId>,
    pub(crate) targets: BTreeMap<TargetId, Placement<Target>>,
    pub(crate) target_cells: BTreeMap<Cell, TargetId>,
    pub(crate) player: Option<BlockId>,
    pub(crate) bounds: Option<CellBounds>,
    pub(crate) playfield: Option<CellBounds>,
}

impl Arrangement {
    pub(crate) fn from_parts(parts: Parts) -> Self {
        Self {
            blocks: parts.blocks,
            occupancy: parts.occupancy,
            targets: parts.targets,
            target_cells: parts.target_cells,
            player: parts.player,
            bounds: parts.bounds,
            playfield: parts.playfield,
        }
    }

    pub(crate) fn block_placements(&self) -> &BTreeMap<BlockId, Placement<Block>> {
        &self.blocks
    }

    pub(crate) fn target_placements(&self) -> &BTreeMap<TargetId, Placement<Target>> {
        &self.targets
    }

    /// The player piece, if one was placed.
    #[must_use]
    pub fn player(&self) -> Option<&Block> {
        self.player.as_ref().and_then(|id| self.block(id))
    }

    /// Cell occupied by the player piece, if one was placed.
    #[must_use]
    pub fn player_cell(&self) -> Option<Cell> {
        self.player.as_ref().and_then(|id| self.block_cell(id))
    }

    /// Looks up a block by label.
    #[must_use]
    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.get(id).map(|placement| &placement.piece)
    }

    /// Cell occupied by the labelled block, if it is placed.
    #[must_use]
    pub fn block_cell(&self, id: &BlockId) -> Option<Cell> {
        self.blocks.get(id).map(|placement| placement.cell)
    }

    /// Block occupying the cell, if any.
    ///
    /// # Panics
    ///
    /// Panics when the occupancy index names a block that is not placed,
    /// which means the arrangement itself is corrupt.
    #[must_use]
    pub fn block_at(&self, cell: Cell) -> Option<&Block> {
        let id = self.occupancy.get(&cell)?;
        match self.blocks.get(id) {
            Some(placement) => Some(&placement.piece),
            None => panic!("occupancy index names block `{id}` at {cell} but no such block is placed"),
        }
    }

    /// Iterates every block with its cell, in label order.
    pub fn blocks(&self) -> impl Iterator<Item = (&Block, Cell)> + '_ {
        self.blocks
            .values()
            .map(|placement| (&placement.piece, placement.cell))
    }

    /// Number of placed blocks, walls and player included.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Looks up a target by label.
    #[must_use]
    pub fn target(&self, id: &TargetId) -> Option<&Target> {
        self.targets.get(id).map(|placement| &placement.piece)
    }

    /// Cell marked by the labelled target, if it is placed.
    #[must_use]
    pub fn target_cell(&self, id: &TargetId) -> Option<Cell> {
        self.targets.get(id).map(|placement| placement.cell)
    }

    /// Cell marked by a target the caller knows is placed.
    ///
    /// # Panics
    ///
    /// Panics when the target is not part of this arrangement.
    #[must_use]
    pub fn require_target_cell(&self, id: &TargetId) -> Cell {
        match self.target_cell(id) {
            Some(cell) => cell,
            None => panic!("target `{id}` is not part of this arrangement"),
        }
    }

    /// Target marking the cell, if any.
    #[must_use]
    pub fn target_at(&self, cell: Cell) -> Option<&Target> {
        self.target_cells.get(&cell).and_then(|id| self.target(id))
    }

    /// Iterates every target with its cell, in label order.
    pub fn targets(&self) -> impl Iterator<Item = (&Target, Cell)> + '_ {
        self.targets
            .values()
            .map(|placement| (&placement.piece, placement.cell))
    }

    /// Number of placed targets.
    #[must_use]
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Smallest rectangle covering every block, or `None` when empty.
    #[must_use]
    pub const fn bounds(&self) -> Option<CellBounds> {
        self.bounds
    }

    /// Upper-left corner of [`Arrangement::bounds`].
    #[must_use]
    pub fn min_cell(&self) -> Option<Cell> {
        self.bounds.map(|bounds| bounds.min())
    }

    /// Lower-right corner of [`Arrangement::bounds`].
    #[must_use]
    pub fn max_cell(&self) -> Option<Cell> {
        self.bounds.map(|bounds| bounds.max())
    }

    /// Rows spanned by the bounding box.
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.bounds.map_or(0, |bounds| bounds.row_count())
    }

    /// Columns spanned by the bounding box.
    #[must_use]
    pub fn column_count(&self) -> u32 {
        self.bounds.map_or(0, |bounds| bounds.column_count())
    }

    /// Region blocks must stay inside, when the arrangement is bounded.
    ///
    /// Unbounded arrangements rely on walls alone to confine movement.
    #[must_use]
    pub const fn playfield(&self) -> Option<CellBounds> {
        self.playfield
    }

    /// Reports whether a block may stand on the cell as far as the
    /// playfield is concerned.
    #[must_use]
    pub fn is_within_playfield(&self, cell: Cell) -> bool {
        self.playfield.map_or(true, |playfield| playfield.contains(cell))
    }

    /// Whether the labelled target currently holds a block it accepts.
    ///
    /// Returns `None` when the target is not placed.
    #[must_use]
    pub fn is_target_satisfied(&self, id: &TargetId) -> Option<bool> {
        let placement = self.targets.get(id)?;
        Some(
            self.block_at(placement.cell)
                .is_some_and(|block| placement.piece.is_valid_block(block)),
        )
    }

    /// Labels of every satisfied target, in label order.
    pub fn satisfied_targets(&self) -> impl Iterator<Item = &TargetId> + '_ {
        self.targets
            .keys()
            .filter(|id| self.is_target_satisfied(id) == Some(true))
    }

    /// Whether every target is satisfied. Vacuously true without targets.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.satisfied_targets().count() == self.targets.len()
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Textual level definitions and their conversion into arrangements.
//!
//! A level is a grid of characters, one row per line:
//!
//! * `X` or `#` is a wall,
//! * `@` is the player,
//! * an upper-case letter is a block labelled by that letter,
//! * a lower-case letter is a target labelled by that letter,
//! * anything else is floor.
//!
//! The level is as wide as its longest row. Cells past the end of a shorter
//! row count as walls. A block is linked to the target carrying its
//! lower-case label, and a linked target only accepts that block.

use std::collections::BTreeMap;

use box_pusher_core::{
    Block, BlockId, Cell, CellBounds, Target, TargetId, DEFAULT_EFFORT, DEFAULT_PUSH_STRENGTH,
};
use box_pusher_world::{Arrangement, ArrangementBuilder, ConstructionError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Label given to the player piece of every parsed level.
pub const PLAYER_LABEL: &str = "@";

/// Failures raised while reading or converting a level definition.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LevelError {
    /// The definition holds no rows.
    #[error("level definition cannot be empty")]
    Empty,
    /// The same block letter appears twice.
    #[error("block `{label}` appears at both {first} and {second}")]
    DuplicateBlock {
        /// Repeated block letter.
        label: char,
        /// First cell carrying the letter.
        first: Cell,
        /// Second cell carrying the letter.
        second: Cell,
    },
    /// The same target letter appears twice.
    #[error("target `{label}` appears at both {first} and {second}")]
    DuplicateTarget {
        /// Repeated target letter.
        label: char,
        /// First cell carrying the letter.
        first: Cell,
        /// Second cell carrying the letter.
        second: Cell,
    },
    /// More than one player marker was found.
    #[error("level places more than one player: {first} and {second}")]
    MultiplePlayers {
        /// First player marker.
        first: Cell,
        /// Second player marker.
        second: Cell,
    },
    /// The level is too large to address with board coordinates.
    #[error("level exceeds the addressable board size")]
    TooLarge,
    /// The parsed pieces could not be assembled into an arrangement.
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

/// Player capabilities applied when a level becomes an arrangement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Total effort the player may spend pushing during one move.
    pub push_strength: u32,
    /// Effort charged when the player is itself pushed.
    pub player_effort: u32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            push_strength: DEFAULT_PUSH_STRENGTH,
            player_effort: DEFAULT_EFFORT,
        }
    }
}

/// Parsed level layout, independent of any player configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelDefinition {
    width: u32,
    height: u32,
    walls: Vec<Vec<bool>>,
    player: Option<Cell>,
    blocks: BTreeMap<BlockId, Cell>,
    targets: BTreeMap<TargetId, Cell>,
    links: BTreeMap<BlockId, TargetId>,
}

impl LevelDefinition {
    /// Parses a textual level.
    ///
    /// # Errors
    ///
    /// Fails for an empty definition, repeated block or target letters, more
    /// than one player, or a level too large to address.
    #[instrument(level = "debug", skip_all)]
    pub fn parse(definition: &str) -> Result<Self, LevelError> {
        let mut rows: Vec<&str> = definition
            .split('\n')
            .map(|row| row.strip_suffix('\r').unwrap_or(row))
            .collect();
        while rows.last().is_some_and(|row| row.is_empty()) {
            let _ = rows.pop();
        }
        if rows.is_empty() {
            return Err(LevelError::Empty);
        }

        let mut walls = Vec::with_capacity(rows.len());
        let mut player: Option<Cell> = None;
        let mut block_letters: BTreeMap<char, Cell> = BTreeMap::new();
        let mut target_letters: BTreeMap<char, Cell> = BTreeMap::new();
        let mut width = 0_usize;

        for (row_index, text) in rows.iter().enumerate() {
            let row = i32::try_from(row_index).map_err(|_| LevelError::TooLarge)?;
            let mut row_walls = Vec::new();

            for (column_index, symbol) in text.chars().enumerate() {
                let column = i32::try_from(column_index).map_err(|_| LevelError::TooLarge)?;
                let cell = Cell::new(row, column);
                row_walls.push(matches!(symbol, 'X' | '#'));

                match symbol {
                    'X' | '#' => {}
                    '@' => {
                        if let Some(first) = player.replace(cell) {
                            return Err(LevelError::MultiplePlayers {
                                first,
                                second: cell,
                            });
                        }
                    }
                    letter if letter.is_uppercase() => {
                        if let Some(first) = block_letters.insert(letter, cell) {
                            return Err(LevelError::DuplicateBlock {
                                label: letter,
                                first,
                                second: cell,
                            });
                        }
                    }
                    letter if letter.is_lowercase() => {
                        if let Some(first) = target_letters.insert(letter, cell) {
                            return Err(LevelError::DuplicateTarget {
                                label: letter,
                                first,
                                second: cell,
                            });
                        }
                    }
                    _ => {}
                }
            }

            width = width.max(row_walls.len());
            walls.push(row_walls);
        }

        let blocks: BTreeMap<BlockId, Cell> = block_letters
            .into_iter()
            .map(|(letter, cell)| (BlockId::new(letter.to_string()), cell))
            .collect();
        let targets: BTreeMap<TargetId, Cell> = target_letters
            .into_iter()
            .map(|(letter, cell)| (TargetId::new(letter.to_string()), cell))
            .collect();
        let links: BTreeMap<BlockId, TargetId> = blocks
            .keys()
            .filter_map(|block| {
                let target = TargetId::new(block.as_str().to_lowercase());
                targets
                    .contains_key(&target)
                    .then(|| (block.clone(), target))
            })
            .collect();

        let width = u32::try_from(width).map_err(|_| LevelError::TooLarge)?;
        let height = u32::try_from(walls.len()).map_err(|_| LevelError::TooLarge)?;
        debug!(
            width,
            height,
            blocks = blocks.len(),
            targets = targets.len(),
            "parsed level"
        );

        Ok(Self {
            width,
            height,
            walls,
            player,
            blocks,
            targets,
            links,
        })
    }

    /// Number of columns, taken from the longest row.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the cell is a wall. Cells outside the level count as walls.
    #[must_use]
    pub fn is_wall(&self, row: u32, column: u32) -> bool {
        let Ok(row) = usize::try_from(row) else {
            return true;
        };
        let Ok(column) = usize::try_from(column) else {
            return true;
        };
        self.walls
            .get(row)
            .map_or(true, |walls| walls.get(column).copied().unwrap_or(true))
    }

    /// Cell of the player marker, when the level has one.
    #[must_use]
    pub const fn player_cell(&self) -> Option<Cell> {
        self.player
    }

    /// Starting cell of every block, keyed by label.
    #[must_use]
    pub fn block_cells(&self) -> &BTreeMap<BlockId, Cell> {
        &self.blocks
    }

    /// Cell of every target, keyed by label.
    #[must_use]
    pub fn target_cells(&self) -> &BTreeMap<TargetId, Cell> {
        &self.targets
    }

    /// Blocks that have a target carrying their lower-case label.
    #[must_use]
    pub fn block_target_links(&self) -> &BTreeMap<BlockId, TargetId> {
        &self.links
    }

    /// Rectangle covering the whole level.
    #[must_use]
    pub fn playfield(&self) -> CellBounds {
        let max_row = i32::try_from(self.height).map_or(i32::MAX, |rows| rows - 1);
        let max_column = i32::try_from(self.width).map_or(i32::MAX, |columns| columns - 1);
        CellBounds::from_corners(Cell::new(0, 0), Cell::new(max_row, max_column))
    }

    /// Builds the starting arrangement for the level.
    ///
    /// Walls become wall blocks, the playfield is the level rectangle, and
    /// linked targets accept only their block.
    ///
    /// # Errors
    ///
    /// Propagates any [`ConstructionError`] raised while assembling the pieces.
    #[instrument(level = "debug", skip_all, fields(push_strength = settings.push_strength))]
    pub fn to_arrangement(&self, settings: PlayerSettings) -> Result<Arrangement, LevelError> {
        let mut builder = ArrangementBuilder::new().playfield(self.playfield());

        for cell in self.playfield().cells() {
            if self.cell_is_wall(cell) {
                builder = builder.wall(cell)?;
            }
        }

        if let Some(cell) = self.player {
            let player = Block::player(PLAYER_LABEL, settings.push_strength)
                .with_effort(settings.player_effort);
            builder = builder.place(player, cell)?;
        }

        for (id, cell) in &self.blocks {
            builder = builder.place(Block::movable(id.clone()), *cell)?;
        }

        for (id, cell) in &self.targets {
            let linked = self
                .links
                .iter()
                .find_map(|(block, target)| (target == id).then_some(block));
            let target = match linked {
                Some(block) => Target::for_block(id.clone(), block.clone()),
                None => Target::new(id.clone()),
            };
            builder = builder.target(target, *cell)?;
        }

        Ok(builder.build()?)
    }

    fn cell_is_wall(&self, cell: Cell) -> bool {
        match (u32::try_from(cell.row()), u32::try_from(cell.column())) {
            (Ok(row), Ok(column)) => self.is_wall(row, column),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_newlines_do_not_add_rows() {
        let level = LevelDefinition::parse("X@X\n\n\n").expect("parses");
        assert_eq!(level.height(), 1);
        assert_eq!(level.width(), 3);
    }

    #[test]
    fn carriage_returns_are_ignored() {
        let level = LevelDefinition::parse("X@ \r\nXXX\r\n").expect("parses");
        assert_eq!(level.width(), 3);
        assert!(!level.is_wall(0, 2));
    }

    #[test]
    fn only_newlines_is_empty() {
        assert_eq!(LevelDefinition::parse("\n\n"), Err(LevelError::Empty));
    }

    #[test]
    fn default_settings_match_piece_defaults() {
        let settings = PlayerSettings::default();
        assert_eq!(settings.push_strength, DEFAULT_PUSH_STRENGTH);
        assert_eq!(settings.player_effort, DEFAULT_EFFORT);
    }
}

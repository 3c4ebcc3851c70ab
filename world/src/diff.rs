//! Comparison of two arrangements, used to drive change notifications.
//!
//! Diffs are only meaningful between chronologically adjacent arrangements.
//! Every report is sorted by label.

use box_pusher_core::{BlockId, Cell, TargetId};

use crate::arrangement::Arrangement;

/// A block that occupies different cells in two arrangements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockMove {
    /// Label of the block.
    pub block: BlockId,
    /// Cell in the earlier arrangement.
    pub from: Cell,
    /// Cell in the later arrangement.
    pub to: Cell,
}

/// Read-only comparison between an earlier and a later arrangement.
#[derive(Clone, Copy, Debug)]
pub struct ArrangementDiff<'a> {
    before: &'a Arrangement,
    after: &'a Arrangement,
}

impl<'a> ArrangementDiff<'a> {
    /// Prepares a comparison of `before` against `after`.
    #[must_use]
    pub const fn new(before: &'a Arrangement, after: &'a Arrangement) -> Self {
        Self { before, after }
    }

    /// Blocks present in both arrangements whose cell differs, with both cells.
    #[must_use]
    pub fn block_moves(&self) -> Vec<BlockMove> {
        self.before
            .blocks()
            .filter_map(|(block, from)| {
                let to = self.after.block_cell(block.id())?;
                (from != to).then(|| BlockMove {
                    block: block.id().clone(),
                    from,
                    to,
                })
            })
            .collect()
    }

    /// Labels of blocks present in both arrangements whose cell differs.
    #[must_use]
    pub fn moved_blocks(&self) -> Vec<BlockId> {
        self.block_moves()
            .into_iter()
            .map(|block_move| block_move.block)
            .collect()
    }

    /// Targets present in both arrangements that went from unsatisfied to satisfied.
    #[must_use]
    pub fn newly_completed_targets(&self) -> Vec<TargetId> {
        self.target_transitions(false, true)
    }

    /// Targets present in both arrangements that went from satisfied to unsatisfied.
    #[must_use]
    pub fn newly_uncompleted_targets(&self) -> Vec<TargetId> {
        self.target_transitions(true, false)
    }

    fn target_transitions(&self, was: bool, now: bool) -> Vec<TargetId> {
        self.before
            .targets()
            .filter_map(|(target, _)| {
                let before = self.before.is_target_satisfied(target.id())?;
                let after = self.after.is_target_satisfied(target.id())?;
                (before == was && after == now).then(|| target.id().clone())
            })
            .collect()
    }
}

/// Labels of blocks present in both arrangements whose cell differs.
#[must_use]
pub fn moved_blocks(before: &Arrangement, after: &Arrangement) -> Vec<BlockId> {
    ArrangementDiff::new(before, after).moved_blocks()
}

/// Targets that became satisfied between the two arrangements.
#[must_use]
pub fn newly_completed_targets(before: &Arrangement, after: &Arrangement) -> Vec<TargetId> {
    ArrangementDiff::new(before, after).newly_completed_targets()
}

/// Targets that stopped being satisfied between the two arrangements.
#[must_use]
pub fn newly_uncompleted_targets(before: &Arrangement, after: &Arrangement) -> Vec<TargetId> {
    ArrangementDiff::new(before, after).newly_uncompleted_targets()
}

//! Selection remapping across a composed [`ReplacementSet`].
//!
//! Each endpoint goes `(line, column)` -> old offset -> new offset -> `(line, column)`.
//! Because [`ReplacementSet::translate`] is monotonic, an ordered selection stays ordered. A
//! cursor inside a rewritten span may widen to cover part of the new text when its endpoints land
//! at different snapped positions; that is expected.

use crate::offset_index::OffsetIndex;
use crate::replacement::ReplacementSet;
use crate::selection::{Position, Selection};

/// Result of remapping a whole selection set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemappedSelections {
    /// Remapped selections, in input order.
    pub selections: Vec<Selection>,
    /// Number of input selections that did not resolve in the old buffer.
    pub dropped: usize,
    /// `true` if nothing survived and a cursor at `(0, 0)` was synthesized.
    pub fallback_cursor: bool,
}

/// Remaps selections from one buffer snapshot to its formatted successor.
#[derive(Debug, Clone, Copy)]
pub struct SelectionRemapper<'a> {
    old_index: &'a OffsetIndex,
    replacements: &'a ReplacementSet,
    new_index: &'a OffsetIndex,
}

impl<'a> SelectionRemapper<'a> {
    /// Create a remapper.
    ///
    /// `old_index` must be built from the buffer `replacements` was computed over, and
    /// `new_index` from the result of composing them.
    pub fn new(
        old_index: &'a OffsetIndex,
        replacements: &'a ReplacementSet,
        new_index: &'a OffsetIndex,
    ) -> Self {
        Self {
            old_index,
            replacements,
            new_index,
        }
    }

    /// Remap one position, or `None` if it is not inside the old buffer.
    pub fn remap_position(&self, position: Position) -> Option<Position> {
        let old_offset = self.old_index.checked_offset_of_position(position)?;
        let new_offset = self.replacements.translate(old_offset);
        Some(self.new_index.position_of(new_offset))
    }

    /// Remap one selection, or `None` if either endpoint is not inside the old buffer.
    pub fn remap(&self, selection: &Selection) -> Option<Selection> {
        Some(Selection::new(
            self.remap_position(selection.start)?,
            self.remap_position(selection.end)?,
        ))
    }

    /// Remap every selection, dropping the ones that do not resolve.
    ///
    /// If no selection survives (including when `selections` is empty), the result is exactly
    /// one cursor at `(0, 0)`.
    pub fn remap_all(&self, selections: &[Selection]) -> RemappedSelections {
        let mut remapped = Vec::with_capacity(selections.len());
        let mut dropped = 0;

        for selection in selections {
            match self.remap(selection) {
                Some(selection) => remapped.push(selection),
                None => {
                    tracing::warn!(?selection, "selection is outside the buffer, dropping it");
                    dropped += 1;
                }
            }
        }

        let fallback_cursor = remapped.is_empty();
        if fallback_cursor {
            tracing::debug!("no selection survived remapping, placing cursor at origin");
            remapped.push(Selection::cursor(0, 0));
        }

        RemappedSelections {
            selections: remapped,
            dropped,
            fallback_cursor,
        }
    }
}

//! Replacement sets: ordered, disjoint text edits over one buffer snapshot.
//!
//! All offsets are **character offsets** into the *original* buffer. A [`ReplacementSet`] is
//! applied in a single pass ([`ReplacementSet::compose`]) and can translate any original offset
//! into the composed buffer ([`ReplacementSet::translate`]).

use crate::error::ReplacementError;

/// A single edit: remove `length` characters starting at `offset`, then insert `text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Replacement {
    /// Start character offset in the original buffer.
    pub offset: usize,
    /// Number of original characters removed.
    pub length: usize,
    /// Text inserted in place of the removed range.
    pub text: String,
}

impl Replacement {
    /// Create a replacement.
    pub fn new(offset: usize, length: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            length,
            text: text.into(),
        }
    }

    /// Create a pure insertion at `offset`.
    pub fn insertion(offset: usize, text: impl Into<String>) -> Self {
        Self::new(offset, 0, text)
    }

    /// Exclusive end offset of the removed range.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }

    /// Length of `text` in characters.
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Change in buffer length caused by this replacement.
    pub fn delta(&self) -> isize {
        self.text_len() as isize - self.length as isize
    }
}

/// An ordered set of disjoint replacements over a single buffer snapshot.
///
/// Entries are kept sorted by `(offset, end)`, so an insertion sorts before a replacement that
/// starts at the same offset. Two entries are disjoint when each starts at or after the end of
/// the previous one; touching ranges are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementSet {
    replacements: Vec<Replacement>,
    /// `cumulative[i]` = sum of deltas of `replacements[..=i]`.
    cumulative: Vec<isize>,
}

impl ReplacementSet {
    /// Create an empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a set from replacements in any order.
    ///
    /// The entries are sorted but not validated; [`ReplacementSet::compose`] rejects overlapping
    /// or out-of-bounds input.
    pub fn new(replacements: Vec<Replacement>) -> Self {
        let mut set = Self {
            replacements,
            cumulative: Vec::new(),
        };
        set.reindex();
        set
    }

    /// Returns `true` if there is nothing to apply.
    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    /// Number of replacements.
    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    /// Iterate over the replacements in offset order.
    pub fn iter(&self) -> std::slice::Iter<'_, Replacement> {
        self.replacements.iter()
    }

    /// The replacements in offset order.
    pub fn as_slice(&self) -> &[Replacement] {
        &self.replacements
    }

    /// Total change in character count once every replacement is applied.
    pub fn char_delta(&self) -> isize {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Merge another set computed over the same original buffer.
    ///
    /// Fails without modifying `self` if the combined set would contain overlapping ranges.
    pub fn merge(&mut self, other: ReplacementSet) -> Result<(), ReplacementError> {
        if other.is_empty() {
            return Ok(());
        }

        let mut combined = self.replacements.clone();
        combined.extend(other.replacements);
        let merged = Self::new(combined);
        merged.validate()?;

        *self = merged;
        Ok(())
    }

    /// Check that the entries are mutually disjoint.
    pub fn validate(&self) -> Result<(), ReplacementError> {
        for pair in self.replacements.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            if next.offset < previous.end() {
                return Err(ReplacementError::Overlapping {
                    previous_offset: previous.offset,
                    previous_end: previous.end(),
                    offset: next.offset,
                });
            }
        }
        Ok(())
    }

    /// Apply every replacement to `buffer` in a single pass and return the new buffer.
    pub fn compose(&self, buffer: &str) -> Result<String, ReplacementError> {
        self.validate()?;

        let mut out = String::with_capacity(buffer.len().saturating_add_signed(self.char_delta()));
        let mut cursor = CharCursor::new(buffer);
        let mut copied_to = 0;

        for replacement in &self.replacements {
            let out_of_bounds = || ReplacementError::OutOfBounds {
                offset: replacement.offset,
                length: replacement.length,
                buffer_len: buffer.chars().count(),
            };

            let start = cursor.seek(replacement.offset).ok_or_else(out_of_bounds)?;
            let end = cursor.seek(replacement.end()).ok_or_else(out_of_bounds)?;

            out.push_str(&buffer[copied_to..start]);
            out.push_str(&replacement.text);
            copied_to = end;
        }
        out.push_str(&buffer[copied_to..]);

        Ok(out)
    }

    /// Translate a character offset in the original buffer into the composed buffer.
    ///
    /// - Every replacement ending at or before `old_offset` shifts it by its delta; an insertion
    ///   exactly at `old_offset` therefore moves the offset past the inserted text.
    /// - An offset strictly inside a replaced range keeps its distance from the range start,
    ///   clamped to the length of the new text.
    ///
    /// The mapping is monotonic non-decreasing for a valid set.
    pub fn translate(&self, old_offset: usize) -> usize {
        let index = self
            .replacements
            .partition_point(|replacement| replacement.end() <= old_offset);
        let shift = match index {
            0 => 0,
            i => self.cumulative[i - 1],
        };

        if let Some(replacement) = self.replacements.get(index)
            && replacement.offset < old_offset
        {
            let new_start = replacement.offset.saturating_add_signed(shift);
            let within = (old_offset - replacement.offset).min(replacement.text_len());
            return new_start + within;
        }

        old_offset.saturating_add_signed(shift)
    }

    fn reindex(&mut self) {
        self.replacements
            .sort_by_key(|replacement| (replacement.offset, replacement.end()));

        let mut running = 0isize;
        self.cumulative = self
            .replacements
            .iter()
            .map(|replacement| {
                running += replacement.delta();
                running
            })
            .collect();
    }
}

impl FromIterator<Replacement> for ReplacementSet {
    fn from_iter<T: IntoIterator<Item = Replacement>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ReplacementSet {
    type Item = &'a Replacement;
    type IntoIter = std::slice::Iter<'a, Replacement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Forward-only char-offset to byte-offset cursor over a `&str`.
struct CharCursor<'a> {
    chars: std::str::CharIndices<'a>,
    position: usize,
}

impl<'a> CharCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.char_indices(),
            position: 0,
        }
    }

    /// Advance to char offset `target` and return its byte offset.
    ///
    /// `target` must not be behind the current position; `None` if it is past the end.
    fn seek(&mut self, target: usize) -> Option<usize> {
        while self.position < target {
            self.chars.next()?;
            self.position += 1;
        }
        Some(self.chars.offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(replacements: &[(usize, usize, &str)]) -> ReplacementSet {
        replacements
            .iter()
            .map(|&(offset, length, text)| Replacement::new(offset, length, text))
            .collect()
    }

    #[test]
    fn test_compose_applies_in_offset_order() {
        let buffer = "int y  =2;\n";
        // Given out of order on purpose.
        let replacements = set(&[(8, 0, " "), (5, 2, " ")]);

        assert_eq!(replacements.compose(buffer).unwrap(), "int y = 2;\n");
        assert_eq!(replacements.char_delta(), 0);
    }

    #[test]
    fn test_compose_empty_set_is_identity() {
        let replacements = ReplacementSet::empty();
        assert!(replacements.is_empty());
        assert_eq!(replacements.compose("abc").unwrap(), "abc");
    }

    #[test]
    fn test_compose_multibyte() {
        let replacements = set(&[(1, 1, "--"), (3, 0, "!")]);
        assert_eq!(replacements.compose("你好世").unwrap(), "你--世!");
    }

    #[test]
    fn test_compose_insertion_at_end() {
        let replacements = set(&[(3, 0, "\n")]);
        assert_eq!(replacements.compose("abc").unwrap(), "abc\n");
    }

    #[test]
    fn test_compose_out_of_bounds() {
        let replacements = set(&[(2, 5, "x")]);
        assert_eq!(
            replacements.compose("abc"),
            Err(ReplacementError::OutOfBounds {
                offset: 2,
                length: 5,
                buffer_len: 3,
            })
        );
    }

    #[test]
    fn test_compose_rejects_overlap() {
        let replacements = set(&[(0, 3, "a"), (2, 1, "b")]);
        assert!(matches!(
            replacements.compose("abcdef"),
            Err(ReplacementError::Overlapping { offset: 2, .. })
        ));
    }

    #[test]
    fn test_touching_ranges_are_disjoint() {
        let replacements = set(&[(0, 2, "X"), (2, 2, "Y"), (4, 0, "Z")]);
        assert_eq!(replacements.validate(), Ok(()));
        assert_eq!(replacements.compose("abcdef").unwrap(), "XYZef");
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut reformat = set(&[(10, 1, ""), (2, 0, " ")]);
        let sorting = set(&[(5, 2, "zz"), (2, 3, "abc")]);

        reformat.merge(sorting).unwrap();
        let offsets: Vec<(usize, usize)> =
            reformat.iter().map(|r| (r.offset, r.length)).collect();
        assert_eq!(offsets, vec![(2, 0), (2, 3), (5, 2), (10, 1)]);
    }

    #[test]
    fn test_merge_conflict_leaves_set_unchanged() {
        let mut reformat = set(&[(4, 2, " ")]);
        let before = reformat.clone();

        let err = reformat.merge(set(&[(5, 3, "x")])).unwrap_err();
        assert!(matches!(err, ReplacementError::Overlapping { .. }));
        assert_eq!(reformat, before);
    }

    #[test]
    fn test_translate_before_between_and_after() {
        // "int y  =2;\n" -> "int y = 2;\n"
        let replacements = set(&[(5, 2, " "), (8, 0, " ")]);

        assert_eq!(replacements.translate(4), 4); // 'y'
        assert_eq!(replacements.translate(5), 5); // start of first gap
        assert_eq!(replacements.translate(6), 6); // inside the gap, clamped to " "
        assert_eq!(replacements.translate(7), 6); // '='
        assert_eq!(replacements.translate(8), 8); // '2', after the inserted space
        assert_eq!(replacements.translate(11), 11); // EOF
    }

    #[test]
    fn test_translate_inside_shrinking_range() {
        let replacements = set(&[(2, 6, "ab")]);

        assert_eq!(replacements.translate(2), 2);
        assert_eq!(replacements.translate(3), 3);
        assert_eq!(replacements.translate(4), 4);
        assert_eq!(replacements.translate(7), 4);
        assert_eq!(replacements.translate(8), 4);
        assert_eq!(replacements.translate(9), 5);
    }

    #[test]
    fn test_translate_inside_growing_range() {
        let replacements = set(&[(1, 2, "wxyz")]);

        assert_eq!(replacements.translate(1), 1);
        assert_eq!(replacements.translate(2), 2);
        assert_eq!(replacements.translate(3), 5);
    }

    #[test]
    fn test_translate_deletion() {
        let replacements = set(&[(1, 3, "")]);

        assert_eq!(replacements.translate(0), 0);
        assert_eq!(replacements.translate(2), 1);
        assert_eq!(replacements.translate(4), 1);
        assert_eq!(replacements.translate(5), 2);
    }

    #[test]
    fn test_translate_empty_set() {
        assert_eq!(ReplacementSet::empty().translate(42), 42);
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// A season or episode span found in a release name.
///
/// `total` follows `end - begin + 1` whenever `end` is recorded. A range
/// with only `total` set describes a pack size without a starting number
/// (e.g. "全24集").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct UnitRange {
    /// First number in the span.
    pub begin: Option<u32>,
    /// Last number in the span, if it covers more than one unit.
    pub end: Option<u32>,
    /// Number of units covered.
    pub total: Option<u32>,
}

impl UnitRange {
    /// Starts the range at `begin` with a total of one.
    pub fn set_begin(&mut self, begin: u32) {
        self.begin = Some(begin);
        self.end = None;
        self.total = Some(1);
    }

    /// Extends the range to `end` when it lies past `begin`.
    ///
    /// For a single file the span cannot exceed `file_cap` units; a wider
    /// span collapses back to the begin value alone.
    pub fn extend_to(&mut self, end: u32, isfile: bool, file_cap: u32) {
        let Some(begin) = self.begin else {
            return;
        };
        if end <= begin {
            return;
        }
        let total = end - begin + 1;
        if isfile && total > file_cap {
            self.end = None;
            self.total = Some(1);
        } else {
            self.end = Some(end);
            self.total = Some(total);
        }
    }

    /// Returns `true` if a begin value is known.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.begin.is_some()
    }

    /// Every number covered by the range, in order.
    #[must_use]
    pub fn list(&self) -> Vec<u32> {
        match (self.begin, self.end) {
            (Some(begin), Some(end)) if end >= begin => (begin..=end).collect(),
            (Some(begin), _) => vec![begin],
            _ => Vec::new(),
        }
    }

    /// Returns `true` if `n` falls inside the range.
    #[must_use]
    pub fn contains(&self, n: u32) -> bool {
        match (self.begin, self.end) {
            (Some(begin), Some(end)) => (begin..=end).contains(&n),
            (Some(begin), None) => begin == n,
            _ => false,
        }
    }

    /// Formats the range with a marker prefix, e.g. `S01-S03` or `E05`.
    #[must_use]
    pub fn label(&self, prefix: char) -> Option<String> {
        let begin = self.begin?;
        Some(match self.end {
            Some(end) => format!("{prefix}{begin:02}-{prefix}{end:02}"),
            None => format!("{prefix}{begin:02}"),
        })
    }
}

impl fmt::Display for UnitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.begin, self.end) {
            (Some(begin), Some(end)) => write!(f, "{begin:02}-{end:02}"),
            (Some(begin), None) => write!(f, "{begin:02}"),
            _ => match self.total {
                Some(total) => write!(f, "x{total}"),
                None => Ok(()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_sets_total_one() {
        let mut range = UnitRange::default();
        range.set_begin(3);
        assert_eq!(range.begin, Some(3));
        assert_eq!(range.total, Some(1));
        assert!(range.is_set());
    }

    #[test]
    fn extend_recomputes_total() {
        let mut range = UnitRange::default();
        range.set_begin(1);
        range.extend_to(3, false, 2);
        assert_eq!(range.end, Some(3));
        assert_eq!(range.total, Some(3));
    }

    #[test]
    fn extend_ignores_smaller_or_equal_end() {
        let mut range = UnitRange::default();
        range.set_begin(5);
        range.extend_to(5, false, 2);
        range.extend_to(2, false, 2);
        assert_eq!(range.end, None);
        assert_eq!(range.total, Some(1));
    }

    #[test]
    fn extend_without_begin_is_noop() {
        let mut range = UnitRange::default();
        range.extend_to(4, false, 2);
        assert_eq!(range, UnitRange::default());
    }

    #[test]
    fn file_cap_collapses_range() {
        let mut range = UnitRange::default();
        range.set_begin(1);
        range.extend_to(3, true, 2);
        assert_eq!(range.end, None);
        assert_eq!(range.total, Some(1));

        range.extend_to(2, true, 2);
        assert_eq!(range.end, Some(2));
        assert_eq!(range.total, Some(2));
    }

    #[test]
    fn list_and_contains() {
        let mut range = UnitRange::default();
        assert!(range.list().is_empty());
        assert!(!range.contains(1));

        range.set_begin(2);
        range.extend_to(4, false, 2);
        assert_eq!(range.list(), vec![2, 3, 4]);
        assert!(range.contains(3));
        assert!(!range.contains(5));
    }

    #[test]
    fn labels() {
        let mut range = UnitRange::default();
        assert_eq!(range.label('S'), None);
        range.set_begin(1);
        assert_eq!(range.label('S').as_deref(), Some("S01"));
        range.extend_to(3, false, 1);
        assert_eq!(range.label('E').as_deref(), Some("E01-E03"));
        assert_eq!(range.to_string(), "01-03");
    }
}

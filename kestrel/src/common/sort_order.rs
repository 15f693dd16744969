/// Specifies the direction for sorting documents.
///
/// # Variants
/// - `Ascending`: smallest to largest under the value order
/// - `Descending`: largest to smallest, the "reverse" flag of a [crate::common::Column]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortOrder {
    /// Sort in ascending order
    #[default]
    Ascending,
    /// Sort in descending order
    Descending,
}

impl SortOrder {
    /// Maps a `reverse` flag to a sort order.
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }

    pub fn is_reverse(&self) -> bool {
        matches!(self, SortOrder::Descending)
    }

    /// Applies this direction to an ascending comparison result.
    #[inline]
    pub fn apply(&self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

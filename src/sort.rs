use std::fmt;

use crate::query::{Queryable, SortDirection, SortKey};

/// One conditional ordering level.
///
/// The key is type-erased behind [`SortKey`], so entries ordering by keys of
/// different types live side by side in one [`Sorts`].
pub enum Sort<Q> {
    Disabled,
    Enabled {
        key: Box<dyn SortKey<Q>>,
        direction: SortDirection,
    },
}

impl<Q> Sort<Q> {
    pub fn when<K>(condition: bool, key: K, direction: SortDirection) -> Self
    where
        K: SortKey<Q> + 'static,
    {
        if condition {
            Self::Enabled {
                key: Box::new(key),
                direction,
            }
        } else {
            Self::Disabled
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled { .. })
    }

    pub fn direction(&self) -> Option<SortDirection> {
        match self {
            Self::Enabled { direction, .. } => Some(*direction),
            Self::Disabled => None,
        }
    }

    /// Appends this ordering level to `query`; disabled entries return it as is.
    pub fn apply(&self, query: Q) -> Q {
        match self {
            Self::Enabled { key, direction } => key.order_by(query, *direction),
            Self::Disabled => query,
        }
    }
}

impl<Q> fmt::Debug for Sort<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("Sort::Disabled"),
            Self::Enabled { direction, .. } => f
                .debug_struct("Sort::Enabled")
                .field("direction", direction)
                .finish_non_exhaustive(),
        }
    }
}

/// Ordered set of conditional ordering levels for queries of type `Q`.
///
/// The first enabled entry becomes the primary order, every following enabled
/// entry breaks the ties left by the ones before it.
///
/// ```rust,ignore
/// let mut sorts = Sorts::new();
/// sorts
///     .add(params.sort_by_age, person::Column::Age, params.descending)
///     .add(true, person::Column::Id, false);
/// ```
pub struct Sorts<Q> {
    entries: Vec<Sort<Q>>,
}

impl<Q> Sorts<Q> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an ordering level that takes part only when `condition` holds.
    pub fn add<K>(&mut self, condition: bool, key: K, descending: bool) -> &mut Self
    where
        K: SortKey<Q> + 'static,
    {
        self.entries.push(Sort::when(
            condition,
            key,
            SortDirection::from_descending(descending),
        ));
        self
    }

    /// Appends an ordering level whose key is only built when `condition` holds.
    pub fn add_with<K, F>(&mut self, condition: bool, make: F, descending: bool) -> &mut Self
    where
        K: SortKey<Q> + 'static,
        F: FnOnce() -> K,
    {
        let entry = if condition {
            Sort::when(true, make(), SortDirection::from_descending(descending))
        } else {
            Sort::Disabled
        };
        self.entries.push(entry);
        self
    }

    pub fn push(&mut self, sort: Sort<Q>) -> &mut Self {
        self.entries.push(sort);
        self
    }

    /// True when at least one entry is enabled.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.entries.iter().any(Sort::is_enabled)
    }

    /// Enabled entries in insertion order; index 0 is the primary order.
    pub fn get(&self) -> impl Iterator<Item = &Sort<Q>> {
        self.entries.iter().filter(|sort| sort.is_enabled())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<Q> Default for Sorts<Q> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q> fmt::Debug for Sorts<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sorts")
            .field("entries", &self.entries)
            .finish()
    }
}

impl<Q> FromIterator<Sort<Q>> for Sorts<Q> {
    fn from_iter<I: IntoIterator<Item = Sort<Q>>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Orders `query` by every enabled entry of `sorts`.
///
/// When nothing is enabled the query keeps whatever order it already had.
/// Otherwise the existing order is discarded and the enabled entries are
/// applied in sequence, primary first.
pub fn apply_sorts<Q: Queryable>(query: Q, sorts: &Sorts<Q>) -> Q {
    if !sorts.is_valid() {
        return query;
    }
    sorts
        .get()
        .fold(query.clear_order(), |query, sort| sort.apply(query))
}

use std::fmt;

use crate::query::{IntoPredicate, Queryable};

/// One conditional restriction.
///
/// A disabled filter carries no predicate, so there is nothing to evaluate
/// when its condition is false.
pub enum Filter<P> {
    Disabled,
    Enabled(P),
}

impl<P> Filter<P> {
    /// Enabled with `predicate` when `condition` holds, disabled otherwise.
    pub fn when(condition: bool, predicate: P) -> Self {
        if condition {
            Self::Enabled(predicate)
        } else {
            Self::Disabled
        }
    }

    /// Like [`Filter::when`], but `make` is only called when `condition` holds.
    pub fn when_with(condition: bool, make: impl FnOnce() -> P) -> Self {
        if condition {
            Self::Enabled(make())
        } else {
            Self::Disabled
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }

    pub fn predicate(&self) -> Option<&P> {
        match self {
            Self::Enabled(predicate) => Some(predicate),
            Self::Disabled => None,
        }
    }

    pub fn into_inner(self) -> Option<P> {
        match self {
            Self::Enabled(predicate) => Some(predicate),
            Self::Disabled => None,
        }
    }
}

impl<P> fmt::Debug for Filter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("Filter::Disabled"),
            Self::Enabled(_) => f.write_str("Filter::Enabled(..)"),
        }
    }
}

/// Ordered set of conditional restrictions for queries of type `Q`.
///
/// ```rust,ignore
/// let mut filters = Filters::new();
/// filters
///     .add(params.min_age.is_some(), person::Column::Age.gte(params.min_age))
///     .add_with(params.name.is_some(), || {
///         person::Column::Name.contains(params.name.clone().unwrap_or_default())
///     });
/// ```
pub struct Filters<Q: Queryable> {
    entries: Vec<Filter<Q::Predicate>>,
}

impl<Q: Queryable> Filters<Q> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a filter that takes part in the query only when `condition` holds.
    pub fn add(&mut self, condition: bool, predicate: impl IntoPredicate<Q>) -> &mut Self {
        self.entries
            .push(Filter::when(condition, predicate.into_predicate()));
        self
    }

    /// Appends a filter whose predicate is only built when `condition` holds.
    pub fn add_with<P, F>(&mut self, condition: bool, make: F) -> &mut Self
    where
        P: IntoPredicate<Q>,
        F: FnOnce() -> P,
    {
        self.entries
            .push(Filter::when_with(condition, || make().into_predicate()));
        self
    }

    /// Appends an already built entry.
    pub fn push(&mut self, filter: Filter<Q::Predicate>) -> &mut Self {
        self.entries.push(filter);
        self
    }

    /// True when at least one entry is enabled.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.entries.iter().any(Filter::is_enabled)
    }

    /// Enabled predicates in insertion order.
    pub fn get(&self) -> impl Iterator<Item = &Q::Predicate> {
        self.entries.iter().filter_map(Filter::predicate)
    }

    /// Consumes the set, yielding the enabled predicates in insertion order.
    pub fn into_enabled(self) -> impl Iterator<Item = Q::Predicate> {
        self.entries.into_iter().filter_map(Filter::into_inner)
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

impl<Q: Queryable> Default for Filters<Q> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q: Queryable> fmt::Debug for Filters<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filters")
            .field("entries", &self.entries)
            .finish()
    }
}

impl<Q: Queryable> FromIterator<Filter<Q::Predicate>> for Filters<Q> {
    fn from_iter<I: IntoIterator<Item = Filter<Q::Predicate>>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Restricts `query` by every enabled filter (logical AND).
///
/// The query is returned untouched when no filter is enabled.
pub fn apply_filters<Q: Queryable>(query: Q, filters: Filters<Q>) -> Q {
    if !filters.is_valid() {
        return query;
    }
    filters.into_enabled().fold(query, Q::restrict)
}

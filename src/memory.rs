//! # In-Memory Queries
//!
//! [`MemoryQuery`] is a deferred query over a shared in-memory collection.
//! Restrictions and orderings are recorded, and only evaluated when the query
//! is counted or fetched. It supports the blocking [`Execute`] form as well as
//! [`ExecuteAsync`], which completes without suspending.
//!
//! ```rust,ignore
//! let people = MemoryQuery::new(vec![alice, bob, carol]);
//!
//! let mut sorts = Sorts::new();
//! sorts.add(true, by_key(|p: &Person| p.age), false);
//!
//! let mut filters = Filters::new();
//! filters.add(true, |p: &Person| p.age > 20);
//!
//! let page = paginate_filtered(people, 1, 10, &sorts, filters)?;
//! ```

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::query::{Execute, ExecuteAsync, IntoPredicate, Queryable, SortDirection, SortKey};

/// Restriction of a [`MemoryQuery`].
pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Deferred query over a shared, immutable collection.
pub struct MemoryQuery<T> {
    source: Arc<[T]>,
    predicates: Vec<Predicate<T>>,
    ordering: Vec<Comparator<T>>,
}

impl<T> MemoryQuery<T> {
    pub fn new(source: impl Into<Arc<[T]>>) -> Self {
        Self {
            source: source.into(),
            predicates: Vec::new(),
            ordering: Vec::new(),
        }
    }

    /// Restricts the query by a closure.
    #[must_use]
    pub fn filter(self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.restrict(Arc::new(predicate))
    }

    /// Appends one ordering level by the key `f` extracts.
    #[must_use]
    pub fn order_by<K, F>(self, f: F, direction: SortDirection) -> Self
    where
        T: 'static,
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        by_key(f).order_by(self, direction)
    }

    fn push_ordering(mut self, comparator: Comparator<T>) -> Self {
        self.ordering.push(comparator);
        self
    }

    fn matches(&self, item: &T) -> bool {
        self.predicates.iter().all(|predicate| predicate(item))
    }

    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.ordering
            .iter()
            .map(|comparator| comparator(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Matching records, in query order.
    fn evaluate(&self) -> Vec<&T> {
        let mut matching: Vec<&T> = self.source.iter().filter(|item| self.matches(item)).collect();
        if !self.ordering.is_empty() {
            // Stable, so equal keys keep source order.
            matching.sort_by(|a, b| self.compare(a, b));
        }
        matching
    }
}

impl<T> Clone for MemoryQuery<T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            predicates: self.predicates.clone(),
            ordering: self.ordering.clone(),
        }
    }
}

impl<T> fmt::Debug for MemoryQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryQuery")
            .field("source_len", &self.source.len())
            .field("predicates", &self.predicates.len())
            .field("ordering", &self.ordering.len())
            .finish()
    }
}

impl<T> Queryable for MemoryQuery<T> {
    type Predicate = Predicate<T>;

    fn restrict(mut self, predicate: Predicate<T>) -> Self {
        self.predicates.push(predicate);
        self
    }

    fn clear_order(mut self) -> Self {
        self.ordering.clear();
        self
    }
}

impl<T, F> IntoPredicate<MemoryQuery<T>> for F
where
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    fn into_predicate(self) -> Predicate<T> {
        Arc::new(self)
    }
}

/// Ordering key of a [`MemoryQuery`], with the key type erased.
pub struct ByKey<T> {
    comparator: Comparator<T>,
}

/// Orders by the key `f` extracts; `K` can differ between entries of one `Sorts`.
pub fn by_key<T, K, F>(f: F) -> ByKey<T>
where
    T: 'static,
    K: Ord,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    ByKey {
        comparator: Arc::new(move |a: &T, b: &T| f(a).cmp(&f(b))),
    }
}

impl<T: 'static> SortKey<MemoryQuery<T>> for ByKey<T> {
    fn order_by(&self, query: MemoryQuery<T>, direction: SortDirection) -> MemoryQuery<T> {
        let comparator = Arc::clone(&self.comparator);
        match direction {
            SortDirection::Ascending => query.push_ordering(comparator),
            SortDirection::Descending => {
                query.push_ordering(Arc::new(move |a: &T, b: &T| comparator(b, a)))
            }
        }
    }
}

impl<T: Clone> Execute for MemoryQuery<T> {
    type Item = T;
    type Error = Infallible;

    fn count(self) -> Result<u64, Infallible> {
        let count = self.source.iter().filter(|item| self.matches(item)).count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    fn fetch(self, offset: u64, limit: u64) -> Result<Vec<T>, Infallible> {
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .evaluate()
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> ExecuteAsync for MemoryQuery<T> {
    type Item = T;
    type Error = Infallible;

    async fn count_async(self) -> Result<u64, Infallible> {
        Execute::count(self)
    }

    async fn fetch_async(self, offset: u64, limit: u64) -> Result<Vec<T>, Infallible> {
        Execute::fetch(self, offset, limit)
    }
}

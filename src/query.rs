//! # Deferred Query Contract
//!
//! The pagination service never talks to a database directly. It composes
//! restrictions and orderings onto a lazily-evaluated query and then asks the
//! query to count itself and to materialise a slice. Any source that implements
//! the traits in this module can be paginated:
//!
//! - [`Queryable`]: lazy composition of restrictions and orderings
//! - [`SortKey`]: one ordering level, closing over its own key type
//! - [`Execute`]: blocking count and slice
//! - [`ExecuteAsync`]: suspending count and slice
//!
//! Two sources ship with the crate: [`EntityQuery`](crate::entity::EntityQuery)
//! over a Sea-ORM `Select`, and [`MemoryQuery`](crate::memory::MemoryQuery) over
//! an in-memory collection.

use async_trait::async_trait;
use sea_orm::Order;
use serde::{Deserialize, Serialize};

/// A composable query that has not been executed yet.
pub trait Queryable: Sized {
    /// Restriction accepted by [`Queryable::restrict`].
    type Predicate;

    /// Narrows the query to records matching `predicate`, in addition to every
    /// restriction already applied.
    #[must_use]
    fn restrict(self, predicate: Self::Predicate) -> Self;

    /// Drops any ordering applied so far.
    #[must_use]
    fn clear_order(self) -> Self;
}

/// Conversion of a user-facing expression into the predicate type of `Q`.
pub trait IntoPredicate<Q: Queryable> {
    fn into_predicate(self) -> Q::Predicate;
}

/// One ordering level.
///
/// Implementations append a single ordering to the query. The first call on a
/// query with no ordering establishes the primary order, each further call
/// breaks the ties left by the previous ones.
pub trait SortKey<Q>: Send + Sync {
    #[must_use]
    fn order_by(&self, query: Q, direction: SortDirection) -> Q;
}

/// Blocking execution of a query.
pub trait Execute: Queryable + Clone {
    type Item;
    type Error;

    /// Number of records matching the query.
    ///
    /// # Errors
    ///
    /// Returns the engine's error when the query cannot be evaluated.
    fn count(self) -> Result<u64, Self::Error>;

    /// Materialises at most `limit` records starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns the engine's error when the query cannot be evaluated.
    fn fetch(self, offset: u64, limit: u64) -> Result<Vec<Self::Item>, Self::Error>;
}

/// Suspending execution of a query, for engines performing I/O.
#[async_trait]
pub trait ExecuteAsync: Queryable + Clone + Send {
    type Item: Send;
    type Error: Send;

    /// Number of records matching the query.
    async fn count_async(self) -> Result<u64, Self::Error>;

    /// Materialises at most `limit` records starting at `offset`.
    async fn fetch_async(self, offset: u64, limit: u64) -> Result<Vec<Self::Item>, Self::Error>;
}

/// Direction of one ordering level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn from_descending(descending: bool) -> Self {
        if descending {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    #[must_use]
    pub fn is_descending(self) -> bool {
        self == Self::Descending
    }
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Ascending => Order::Asc,
            SortDirection::Descending => Order::Desc,
        }
    }
}

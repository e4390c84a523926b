//! # pagecrate
//!
//! Conditional filtering, conditional sorting and offset pagination for
//! deferred queries.
//!
//! Build a [`Filters`] and a [`Sorts`] where every entry is switched on or off
//! by a condition evaluated at call time, then hand them to one of the
//! `paginate*` functions together with the query, a 1-based page number and a
//! page size. The result is a [`Page`] holding the slice and the total record
//! and page counts.
//!
//! ```rust,ignore
//! use pagecrate::{Filters, SelectExt, Sorts, paginate_filtered_async};
//!
//! let mut sorts = Sorts::new();
//! sorts
//!     .add(params.sort_by_age, person::Column::Age, params.descending)
//!     .add(true, person::Column::Id, false);
//!
//! let mut filters = Filters::new();
//! filters.add_with(params.min_age.is_some(), || {
//!     person::Column::Age.gte(params.min_age.unwrap_or_default())
//! });
//!
//! let page = paginate_filtered_async(person::Entity::find().bind(&db), 2, 25, &sorts, filters)
//!     .await?;
//! ```
//!
//! ## Modules
//!
//! - [`query`]: traits a query source implements
//! - [`filter`] / [`sort`]: conditional entries and their composition
//! - [`pagination`]: the `paginate*` operations
//! - [`entity`]: Sea-ORM source
//! - [`memory`]: in-memory source
//! - [`models`] / [`response`]: axum request parameters and responses

pub mod entity;
pub mod errors;
pub mod filter;
pub mod memory;
pub mod models;
pub mod page;
pub mod pagination;
pub mod query;
pub mod response;
pub mod sort;

pub use entity::{EntityQuery, SelectExt};
pub use errors::PaginateError;
pub use filter::{Filter, Filters, apply_filters};
pub use memory::{MemoryQuery, by_key};
pub use models::PageRequest;
pub use page::Page;
pub use pagination::{
    compose, paginate, paginate_async, paginate_filtered, paginate_filtered_async,
    paginate_sorted, paginate_sorted_async,
};
pub use query::{Execute, ExecuteAsync, IntoPredicate, Queryable, SortDirection, SortKey};
pub use response::content_range;
pub use sort::{Sort, Sorts, apply_sorts};

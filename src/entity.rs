//! # Sea-ORM Queries
//!
//! [`EntityQuery`] pairs a `sea_orm::Select<E>` with the connection it runs on,
//! so the pagination service can count and fetch without knowing about
//! databases.
//!
//! - predicates are anything implementing `IntoCondition`, such as
//!   `Column::Age.gt(20)` or a `Condition`
//! - sort keys are anything implementing `IntoSimpleExpr`, such as a column or
//!   an expression
//!
//! Sea-ORM only executes asynchronously, so this source implements
//! [`ExecuteAsync`] and is paginated with the `_async` operations.
//!
//! ```rust,ignore
//! use pagecrate::{Filters, SelectExt, Sorts, paginate_filtered_async};
//!
//! let mut sorts = Sorts::new();
//! sorts
//!     .add(true, person::Column::Age, false)
//!     .add(true, person::Column::Id, false);
//!
//! let mut filters = Filters::new();
//! filters.add(min_age.is_some(), person::Column::Age.gt(min_age.unwrap_or_default()));
//!
//! let page = paginate_filtered_async(person::Entity::find().bind(&db), 1, 10, &sorts, filters)
//!     .await?;
//! ```

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, IntoCondition, SimpleExpr};
use sea_orm::{
    Condition, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, IntoSimpleExpr,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::query::{ExecuteAsync, IntoPredicate, Queryable, SortDirection, SortKey};

/// A Sea-ORM `Select` bound to the connection it will run on.
pub struct EntityQuery<'db, E: EntityTrait, C> {
    select: Select<E>,
    db: &'db C,
}

impl<'db, E: EntityTrait, C> EntityQuery<'db, E, C> {
    pub fn new(select: Select<E>, db: &'db C) -> Self {
        Self { select, db }
    }

    /// The composed statement, e.g. to inspect the SQL it builds.
    #[must_use]
    pub fn into_select(self) -> Select<E> {
        self.select
    }

    pub fn select(&self) -> &Select<E> {
        &self.select
    }
}

impl<E: EntityTrait, C> Clone for EntityQuery<'_, E, C> {
    fn clone(&self) -> Self {
        Self {
            select: self.select.clone(),
            db: self.db,
        }
    }
}

/// Binds a `Select` to a connection.
pub trait SelectExt<E: EntityTrait>: Sized {
    fn bind<C: ConnectionTrait>(self, db: &C) -> EntityQuery<'_, E, C>;
}

impl<E: EntityTrait> SelectExt<E> for Select<E> {
    fn bind<C: ConnectionTrait>(self, db: &C) -> EntityQuery<'_, E, C> {
        EntityQuery::new(self, db)
    }
}

impl<E: EntityTrait, C> Queryable for EntityQuery<'_, E, C> {
    type Predicate = Condition;

    fn restrict(mut self, predicate: Condition) -> Self {
        self.select = self.select.filter(predicate);
        self
    }

    fn clear_order(mut self) -> Self {
        QueryOrder::query(&mut self.select).clear_order_by();
        self
    }
}

impl<'db, E, C, X> IntoPredicate<EntityQuery<'db, E, C>> for X
where
    E: EntityTrait,
    X: IntoCondition,
{
    fn into_predicate(self) -> Condition {
        self.into_condition()
    }
}

impl<'db, E, C, X> SortKey<EntityQuery<'db, E, C>> for X
where
    E: EntityTrait,
    X: IntoSimpleExpr + Clone + Send + Sync,
{
    fn order_by(
        &self,
        query: EntityQuery<'db, E, C>,
        direction: SortDirection,
    ) -> EntityQuery<'db, E, C> {
        EntityQuery {
            select: query.select.order_by(self.clone(), direction.into()),
            db: query.db,
        }
    }
}

/// Sort key from a raw SQL fragment, e.g. `LOWER(name)`.
#[must_use]
pub fn by_sql(sql: &str) -> SimpleExpr {
    Expr::cust(sql.to_owned())
}

/// Database drivers bind `OFFSET` and `LIMIT` as signed 64-bit integers.
fn sql_bound(name: &str, value: u64) -> Result<u64, DbErr> {
    if i64::try_from(value).is_ok() {
        return Ok(value);
    }
    tracing::warn!(value, "{name} exceeds the range the database accepts");
    Err(DbErr::Custom(format!(
        "{name} {value} exceeds the maximum of {}",
        i64::MAX
    )))
}

#[async_trait]
impl<'db, E, C> ExecuteAsync for EntityQuery<'db, E, C>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync + 'db,
    C: ConnectionTrait,
{
    type Item = E::Model;
    type Error = DbErr;

    async fn count_async(self) -> Result<u64, DbErr> {
        PaginatorTrait::count(self.select, self.db).await
    }

    async fn fetch_async(self, offset: u64, limit: u64) -> Result<Vec<E::Model>, DbErr> {
        let offset = sql_bound("offset", offset)?;
        let limit = sql_bound("limit", limit)?;
        self.select.offset(offset).limit(limit).all(self.db).await
    }
}

//! Thin model mapper over the statement builders.
//!
//! A model describes how it selects, inserts, or updates itself by
//! filling in a builder; the generic helpers here render and execute the
//! statement. No reflection, no registry: row decoding goes through the
//! driver's `FromRow` and collection building is ordinary generics.
//!
//! # Example
//!
//! ```ignore
//! use mysqlkit::model::{self, Filter, Selector};
//! use mysqlkit::qb::Select;
//!
//! struct User {
//!     id: i64,
//!     username: String,
//! }
//!
//! impl Selector for User {
//!     fn select(b: &mut Select) {
//!         b.columns(["id", "username"]);
//!         b.from("users");
//!     }
//! }
//!
//! let user: User = model::fetch_one(&ctx, vec![Filter::equal("id", 1)]).await?;
//! ```

use mysql_async::prelude::FromRow;

use crate::ctx::Ctx;
use crate::error::DbResult;
use crate::executor::ExecResult;
use crate::qb::{Cond, Insert, Select, Term, Update};

/// A model that knows how to select itself.
pub trait Selector: FromRow {
    fn select(b: &mut Select);
}

/// A model that knows how to insert itself.
pub trait Inserter {
    fn insert(&self, b: &mut Insert);
}

/// A model that knows how to update itself.
pub trait Updater {
    fn update(&self, b: &mut Update);
}

type CondFn = Box<dyn FnOnce(&mut Cond) + Send>;

enum FilterKind {
    Where(CondFn),
    Having(CondFn),
    OrderBy(String),
    Limit(u64),
    Offset(u64),
}

/// A query refinement applied on top of a model's own statement.
///
/// All filters apply to selects. On updates only where-filters apply;
/// having, order-by, limit, and offset are ignored there.
pub struct Filter(FilterKind);

impl Filter {
    /// Equality predicate on the where clause.
    pub fn equal(column: &str, value: impl Into<Term>) -> Filter {
        let column = column.to_owned();
        let term = value.into();
        Filter::where_with(move |c| c.eq(&column, term))
    }

    /// Arbitrary predicates on the where clause.
    pub fn where_with(f: impl FnOnce(&mut Cond) + Send + 'static) -> Filter {
        Filter(FilterKind::Where(Box::new(f)))
    }

    /// Arbitrary predicates on the having clause.
    pub fn having_with(f: impl FnOnce(&mut Cond) + Send + 'static) -> Filter {
        Filter(FilterKind::Having(Box::new(f)))
    }

    /// Append an order-by expression.
    pub fn order_by(expr: impl Into<String>) -> Filter {
        Filter(FilterKind::OrderBy(expr.into()))
    }

    pub fn limit(n: u64) -> Filter {
        Filter(FilterKind::Limit(n))
    }

    pub fn offset(n: u64) -> Filter {
        Filter(FilterKind::Offset(n))
    }

    fn apply_select(self, b: &mut Select) {
        match self.0 {
            FilterKind::Where(f) => b.where_with(f),
            FilterKind::Having(f) => b.having_with(f),
            FilterKind::OrderBy(expr) => {
                b.order_by(expr);
            }
            FilterKind::Limit(n) => b.limit(n),
            FilterKind::Offset(n) => b.offset(n),
        }
    }

    fn apply_update(self, b: &mut Update) {
        match self.0 {
            FilterKind::Where(f) => b.where_with(f),
            // Meaningless on an update statement.
            FilterKind::Having(_)
            | FilterKind::OrderBy(_)
            | FilterKind::Limit(_)
            | FilterKind::Offset(_) => {}
        }
    }
}

fn select_query<M: Selector>(filters: Vec<Filter>) -> crate::query::Query {
    let mut b = Select::new();
    M::select(&mut b);
    for filter in filters {
        filter.apply_select(&mut b);
    }
    b.build()
}

/// Fetch a single model instance.
pub async fn fetch_one<M: Selector>(ctx: &Ctx, filters: Vec<Filter>) -> DbResult<M> {
    select_query::<M>(filters).fetch_one(ctx).await
}

/// Fetch a single model instance if any row matches.
pub async fn fetch_opt<M: Selector>(ctx: &Ctx, filters: Vec<Filter>) -> DbResult<Option<M>> {
    select_query::<M>(filters).fetch_opt(ctx).await
}

/// Fetch all matching model instances.
pub async fn fetch_all<M: Selector>(ctx: &Ctx, filters: Vec<Filter>) -> DbResult<Vec<M>> {
    select_query::<M>(filters).fetch_all(ctx).await
}

/// Insert a model instance.
pub async fn insert<M: Inserter>(ctx: &Ctx, model: &M) -> DbResult<ExecResult> {
    let mut b = Insert::new();
    model.insert(&mut b);
    b.build().execute(ctx).await
}

/// Update from a model instance, refined by where-filters.
pub async fn update<M: Updater>(ctx: &Ctx, model: &M, filters: Vec<Filter>) -> DbResult<ExecResult> {
    let mut b = Update::new();
    model.update(&mut b);
    for filter in filters {
        filter.apply_update(&mut b);
    }
    b.build().execute(ctx).await
}

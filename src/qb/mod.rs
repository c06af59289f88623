//! SQL statement builders.
//!
//! Statements are plain mutable structs rendered once by `build()` into a
//! [`Query`](crate::query::Query) holding the SQL string and its bound
//! arguments in placeholder order. Sub-builders (conditions, joins,
//! sub-selects) are configured through closures.
//!
//! # Example
//!
//! ```ignore
//! use mysqlkit::qb;
//!
//! let q = qb::select(|b| {
//!     b.columns(["id", "name"]);
//!     b.from("users");
//!     b.where_with(|c| c.eq("id", 1));
//! });
//! assert_eq!(q.sql(), "select id, name from users where (id = ?)");
//! ```

pub(crate) mod buffer;
mod cond;
mod delete;
mod insert;
mod select;
mod term;
mod union;
mod update;

pub use cond::{Cond, ModeChoice};
pub use delete::Delete;
pub use insert::{Insert, OnDuplicateKey};
pub use select::{DistinctOn, Expr, JoinOn, OrderBy, Select};
pub use term::{arg, not_arg, raw, Term};
pub use union::Union;
pub use update::{Assign, AssignMany, SetClause, Update};

use crate::query::Query;

/// Build a select statement.
pub fn select(f: impl FnOnce(&mut Select)) -> Query {
    let mut b = Select::new();
    f(&mut b);
    b.build()
}

/// Build an insert statement.
pub fn insert(f: impl FnOnce(&mut Insert)) -> Query {
    let mut b = Insert::new();
    f(&mut b);
    b.build()
}

/// Build an update statement.
pub fn update(f: impl FnOnce(&mut Update)) -> Query {
    let mut b = Update::new();
    f(&mut b);
    b.build()
}

/// Build a delete statement.
pub fn delete(f: impl FnOnce(&mut Delete)) -> Query {
    let mut b = Delete::new();
    f(&mut b);
    b.build()
}

/// Build a union statement.
pub fn union(f: impl FnOnce(&mut Union)) -> Query {
    let mut b = Union::new();
    f(&mut b);
    b.build()
}

#[cfg(test)]
mod tests;

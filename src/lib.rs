//! # mysqlkit
//!
//! Composable SQL builders and a transactional execution layer for MySQL.
//!
//! ## Features
//!
//! - **SQL explicit**: statements render to plain SQL with `?`
//!   placeholders; arguments always match placeholder order
//! - **Composable builders**: select/insert/update/delete/union with
//!   nested condition groups and sub-selects
//! - **Context-driven execution**: the same [`Query`] runs against the
//!   pool or inside a transaction through a [`Ctx`]
//! - **Transaction engine**: flat nesting, abort marker, post-commit
//!   hooks, bounded retry on deadlocks and lock wait timeouts
//! - **Thin model mapper**: traits plus generics, no reflection
//!
//! ## Example
//!
//! ```ignore
//! use mysqlkit::{qb, query, run_in_tx, Ctx, Db, DbResult};
//!
//! # async fn demo() -> DbResult<()> {
//! let db = Db::connect("mysql://root@localhost:3306/app")?;
//! let ctx = Ctx::new(db);
//!
//! let q = qb::select(|b| {
//!     b.columns(["id", "name"]);
//!     b.from("users");
//!     b.where_with(|c| c.eq("id", 1));
//! });
//! let user: Option<(i64, String)> = q.fetch_opt(&ctx).await?;
//!
//! run_in_tx(&ctx, |ctx| async move {
//!     query("update users set name = ? where id = ?")
//!         .bind("renamed")
//!         .bind(1_i64)
//!         .execute(&ctx)
//!         .await?;
//!     Ok(())
//! })
//! .await?;
//! # Ok(()) }
//! ```

pub mod ctx;
pub mod error;
pub mod executor;
pub mod model;
pub mod prelude;
pub mod qb;
pub mod query;
pub mod tx;
pub mod types;

pub use ctx::Ctx;
pub use error::{DbError, DbResult};
pub use executor::{Db, ExecResult, Queryer};
pub use query::{query, Query};
pub use tx::{on_committed, run_in_tx, run_in_tx_options, IsolationLevel, TxOptions};
pub use types::{Json, Time};

// Re-export the driver for direct access to its types (Value, Row, Params).
pub use mysql_async;

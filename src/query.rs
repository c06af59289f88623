//! Rendered queries and their execution adapters.
//!
//! A [`Query`] is an immutable pair of SQL text and bound arguments. It
//! comes out of the statement builders, or from [`query`] for
//! hand-written SQL with `.bind(...)` arguments. Execution goes through a
//! [`Ctx`](crate::ctx::Ctx), so the same query runs against the pool or
//! inside a transaction unchanged.
//!
//! # Example
//!
//! ```ignore
//! use mysqlkit::query;
//!
//! let name: Option<String> = query("select name from users where id = ?")
//!     .bind(1_i64)
//!     .fetch_opt(&ctx)
//!     .await?;
//! ```

use mysql_async::prelude::FromRow;
use mysql_async::{Params, Row, Value};

use crate::ctx::Ctx;
use crate::error::{DbError, DbResult};
use crate::executor::ExecResult;
use crate::qb::buffer::Buffer;

/// Create a query from hand-written SQL.
pub fn query(sql: impl Into<String>) -> Query {
    Query {
        sql: sql.into(),
        args: Vec::new(),
    }
}

/// A rendered SQL statement with its arguments in placeholder order.
#[derive(Debug, Clone)]
pub struct Query {
    sql: String,
    args: Vec<Value>,
}

impl Query {
    pub(crate) fn from_buffer(buffer: Buffer) -> Self {
        let (sql, args) = buffer.finish();
        Self { sql, args }
    }

    /// Append a positional argument.
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// The SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The bound arguments, in placeholder order.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Split into SQL text and arguments.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.args)
    }

    fn params(&self) -> Params {
        if self.args.is_empty() {
            Params::Empty
        } else {
            Params::Positional(self.args.clone())
        }
    }

    /// Fetch the first row, decoded into `T`. Errors with
    /// [`DbError::NotFound`] when the result set is empty.
    pub async fn fetch_one<T: FromRow>(&self, ctx: &Ctx) -> DbResult<T> {
        match ctx.query_first(&self.sql, self.params()).await? {
            Some(row) => decode(row),
            None => Err(DbError::NotFound),
        }
    }

    /// Fetch the first row if any.
    pub async fn fetch_opt<T: FromRow>(&self, ctx: &Ctx) -> DbResult<Option<T>> {
        match ctx.query_first(&self.sql, self.params()).await? {
            Some(row) => decode(row).map(Some),
            None => Ok(None),
        }
    }

    /// Fetch all rows.
    pub async fn fetch_all<T: FromRow>(&self, ctx: &Ctx) -> DbResult<Vec<T>> {
        let rows = ctx.query(&self.sql, self.params()).await?;
        rows.into_iter().map(decode).collect()
    }

    /// Execute without returning rows.
    pub async fn execute(&self, ctx: &Ctx) -> DbResult<ExecResult> {
        ctx.exec(&self.sql, self.params()).await
    }

    /// Stream rows through a callback without collecting them.
    ///
    /// Stops at the first callback error; the remaining result set is
    /// drained so the connection stays usable.
    pub async fn iterate<T, F>(&self, ctx: &Ctx, mut f: F) -> DbResult<()>
    where
        T: FromRow,
        F: FnMut(T) -> DbResult<()> + Send,
    {
        let mut on_row = |row: Row| f(decode(row)?);
        ctx.each(&self.sql, self.params(), &mut on_row).await
    }
}

pub(crate) fn decode<T: FromRow>(row: Row) -> DbResult<T> {
    T::from_row_opt(row).map_err(|err| DbError::Decode(err.to_string()))
}

//! Explicit execution context.
//!
//! A [`Ctx`] carries the database handle plus the currently active
//! executor: the pool outside a transaction, the live transaction inside
//! one. Application code passes `Ctx` down by value and never needs to
//! know whether it is running transactionally;
//! [`run_in_tx`](crate::tx::run_in_tx) swaps the executor for the scope
//! of the callback.

use std::sync::Arc;

use mysql_async::{Params, Row, Statement};

use crate::error::DbResult;
use crate::executor::{Db, ExecResult, Queryer};
use crate::tx::TxState;

#[derive(Clone)]
pub(crate) enum Executor {
    Db(Db),
    Tx(Arc<TxState>),
}

/// Execution context handed to queries and transaction callbacks.
///
/// Cloning is cheap.
#[derive(Clone)]
pub struct Ctx {
    db: Db,
    executor: Executor,
}

impl Ctx {
    /// Create a context executing directly against the pool.
    pub fn new(db: Db) -> Self {
        let executor = Executor::Db(db.clone());
        Self { db, executor }
    }

    /// The database handle this context was created from.
    pub fn db(&self) -> &Db {
        &self.db
    }

    /// Whether this context executes inside a transaction.
    pub fn is_in_tx(&self) -> bool {
        matches!(self.executor, Executor::Tx(_))
    }

    pub(crate) fn with_tx(&self, state: Arc<TxState>) -> Ctx {
        Ctx {
            db: self.db.clone(),
            executor: Executor::Tx(state),
        }
    }

    pub(crate) fn tx_state(&self) -> Option<&Arc<TxState>> {
        match &self.executor {
            Executor::Tx(state) => Some(state),
            Executor::Db(_) => None,
        }
    }

    /// Run a statement and return the first row, if any.
    pub async fn query_first(&self, sql: &str, params: Params) -> DbResult<Option<Row>> {
        tracing::debug!(sql, in_tx = self.is_in_tx(), "query_first");
        match &self.executor {
            Executor::Db(db) => db.query_first(sql, params).await,
            Executor::Tx(tx) => tx.query_first(sql, params).await,
        }
    }

    /// Run a statement and collect all rows.
    pub async fn query(&self, sql: &str, params: Params) -> DbResult<Vec<Row>> {
        tracing::debug!(sql, in_tx = self.is_in_tx(), "query");
        match &self.executor {
            Executor::Db(db) => db.query(sql, params).await,
            Executor::Tx(tx) => tx.query(sql, params).await,
        }
    }

    /// Run a statement without returning rows.
    pub async fn exec(&self, sql: &str, params: Params) -> DbResult<ExecResult> {
        tracing::debug!(sql, in_tx = self.is_in_tx(), "exec");
        match &self.executor {
            Executor::Db(db) => db.exec(sql, params).await,
            Executor::Tx(tx) => tx.exec(sql, params).await,
        }
    }

    /// Stream rows through a callback.
    pub async fn each(
        &self,
        sql: &str,
        params: Params,
        f: &mut (dyn FnMut(Row) -> DbResult<()> + Send),
    ) -> DbResult<()> {
        tracing::debug!(sql, in_tx = self.is_in_tx(), "each");
        match &self.executor {
            Executor::Db(db) => db.each(sql, params, f).await,
            Executor::Tx(tx) => tx.each(sql, params, f).await,
        }
    }

    /// Prepare a statement on the active executor.
    pub async fn prepare(&self, sql: &str) -> DbResult<Statement> {
        match &self.executor {
            Executor::Db(db) => db.prepare(sql).await,
            Executor::Tx(tx) => tx.prepare(sql).await,
        }
    }
}

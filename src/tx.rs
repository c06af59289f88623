//! Transactional execution engine.
//!
//! [`run_in_tx`] wraps a callback in a database transaction with flat
//! nesting, an abort marker, deferred post-commit hooks, and bounded
//! retry on transient conflicts:
//!
//! - A nested call on a transactional context runs the callback directly;
//!   one transaction spans the whole nesting and commit/rollback happens
//!   exactly once, at the outermost level.
//! - `Ok(())` commits, then runs hooks registered via [`on_committed`]
//!   in registration order against the original non-transactional
//!   context.
//! - [`DbError::TxAborted`] commits but skips the hooks and surfaces as
//!   `Ok(())`.
//! - Any other error rolls back and is returned verbatim.
//! - Retryable errors (deadlock, lock wait timeout) re-run the callback
//!   with a fresh transaction, up to [`TxOptions::max_attempts`] total
//!   invocations.
//!
//! # Example
//!
//! ```ignore
//! use mysqlkit::{query, run_in_tx, on_committed, DbResult};
//!
//! run_in_tx(&ctx, |ctx| async move {
//!     query("update accounts set balance = balance - ? where id = ?")
//!         .bind(100_i64)
//!         .bind(1_i64)
//!         .execute(&ctx)
//!         .await?;
//!     on_committed(&ctx, |_ctx| async move {
//!         // runs only after a successful commit
//!     })
//!     .await;
//!     Ok(())
//! })
//! .await?;
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use mysql_async::prelude::Queryable as _;
use mysql_async::{Params, Row, Statement, Transaction};
use tokio::sync::Mutex;

use crate::ctx::Ctx;
use crate::error::{DbError, DbResult};
use crate::executor::{run_each, run_exec, run_prepare, ExecResult, Queryer};

pub use mysql_async::IsolationLevel;

/// Transaction behavior knobs.
#[derive(Debug, Clone, Copy)]
pub struct TxOptions {
    /// Isolation level, or the server default when `None`.
    pub isolation: Option<IsolationLevel>,
    /// Start the transaction read-only.
    pub read_only: bool,
    /// Total callback invocations allowed when retrying transient
    /// conflicts. `1` disables retry.
    pub max_attempts: u32,
}

impl Default for TxOptions {
    fn default() -> Self {
        Self {
            isolation: None,
            read_only: false,
            max_attempts: 3,
        }
    }
}

type CommitHook = Box<dyn FnOnce(Ctx) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send>;

/// Shared state of one live transaction: the driver handle plus the
/// deferred post-commit hooks.
pub(crate) struct TxState {
    tx: Mutex<Option<Transaction<'static>>>,
    hooks: std::sync::Mutex<Vec<CommitHook>>,
}

impl TxState {
    fn new(tx: Transaction<'static>) -> Self {
        Self {
            tx: Mutex::new(Some(tx)),
            hooks: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn push_hook(&self, hook: CommitHook) {
        let mut hooks = self.hooks.lock().unwrap_or_else(|e| e.into_inner());
        hooks.push(hook);
    }

    fn take_hooks(&self) -> Vec<CommitHook> {
        let mut hooks = self.hooks.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *hooks)
    }

    async fn commit(&self) -> DbResult<()> {
        let tx = self.tx.lock().await.take().ok_or(DbError::TxFinished)?;
        tx.commit().await?;
        Ok(())
    }

    async fn rollback(&self) -> DbResult<()> {
        let tx = self.tx.lock().await.take().ok_or(DbError::TxFinished)?;
        tx.rollback().await?;
        Ok(())
    }
}

impl Queryer for TxState {
    async fn query_first(&self, sql: &str, params: Params) -> DbResult<Option<Row>> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or(DbError::TxFinished)?;
        Ok(tx.exec_first(sql, params).await?)
    }

    async fn query(&self, sql: &str, params: Params) -> DbResult<Vec<Row>> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or(DbError::TxFinished)?;
        Ok(tx.exec(sql, params).await?)
    }

    async fn exec(&self, sql: &str, params: Params) -> DbResult<ExecResult> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or(DbError::TxFinished)?;
        run_exec(tx, sql, params).await
    }

    async fn each(
        &self,
        sql: &str,
        params: Params,
        f: &mut (dyn FnMut(Row) -> DbResult<()> + Send),
    ) -> DbResult<()> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or(DbError::TxFinished)?;
        run_each(tx, sql, params, f).await
    }

    async fn prepare(&self, sql: &str) -> DbResult<Statement> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or(DbError::TxFinished)?;
        run_prepare(tx, sql).await
    }
}

/// Run `f` inside a transaction with default [`TxOptions`].
pub async fn run_in_tx<F, Fut>(ctx: &Ctx, f: F) -> DbResult<()>
where
    F: Fn(Ctx) -> Fut,
    Fut: Future<Output = DbResult<()>>,
{
    run_in_tx_options(ctx, &TxOptions::default(), f).await
}

/// Run `f` inside a transaction with the given options.
///
/// The callback takes the context by value and may be invoked several
/// times when retrying, so it must be re-runnable; side effects that must
/// happen at most once belong in [`on_committed`] hooks.
pub async fn run_in_tx_options<F, Fut>(ctx: &Ctx, options: &TxOptions, f: F) -> DbResult<()>
where
    F: Fn(Ctx) -> Fut,
    Fut: Future<Output = DbResult<()>>,
{
    if ctx.is_in_tx() {
        return f(ctx.clone()).await;
    }

    let mut attempt: u32 = 0;
    loop {
        attempt += 1;

        let tx = ctx.db().begin(options).await?;
        let state = Arc::new(TxState::new(tx));
        let tx_ctx = ctx.with_tx(Arc::clone(&state));

        match f(tx_ctx).await {
            Ok(()) => {
                state.commit().await?;
                for hook in state.take_hooks() {
                    hook(ctx.clone()).await;
                }
                return Ok(());
            }
            Err(err) if err.is_tx_abort() => {
                state.commit().await?;
                return Ok(());
            }
            Err(err) => {
                if let Err(rollback_err) = state.rollback().await {
                    tracing::warn!(error = %rollback_err, "transaction rollback failed");
                }
                if err.is_retryable() && attempt < options.max_attempts {
                    tracing::debug!(attempt, "retrying transaction after transient conflict");
                    continue;
                }
                return Err(err);
            }
        }
    }
}

/// Defer `f` until after the enclosing transaction commits.
///
/// Hooks run in registration order against the original
/// non-transactional context; an aborted or rolled-back transaction
/// never runs them. Outside a transaction `f` runs immediately.
pub async fn on_committed<F, Fut>(ctx: &Ctx, f: F)
where
    F: FnOnce(Ctx) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    match ctx.tx_state() {
        Some(state) => state.push_hook(Box::new(move |c| Box::pin(f(c)))),
        None => f(ctx.clone()).await,
    }
}

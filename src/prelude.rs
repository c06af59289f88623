//! Convenience re-exports.

pub use crate::ctx::Ctx;
pub use crate::error::{DbError, DbResult};
pub use crate::executor::{Db, ExecResult, Queryer};
pub use crate::model::{Filter, Inserter, Selector, Updater};
pub use crate::qb::{self, arg, not_arg, raw, Cond, Delete, Insert, Select, Term, Union, Update};
pub use crate::query::{query, Query};
pub use crate::row;
pub use crate::tx::{on_committed, run_in_tx, run_in_tx_options, IsolationLevel, TxOptions};
pub use crate::types::{Json, Time};

pub use mysql_async::prelude::FromRow;
pub use mysql_async::{Params, Row, Value};

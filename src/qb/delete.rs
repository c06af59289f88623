//! Delete statement builder.

use super::buffer::Buffer;
use super::cond::Cond;
use crate::query::Query;

/// Delete statement builder.
#[derive(Debug, Default)]
pub struct Delete {
    from: String,
    where_cond: Cond,
}

impl Delete {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(&mut self, table: impl Into<String>) {
        self.from = table.into();
    }

    /// Add predicates to the where clause.
    pub fn where_with(&mut self, f: impl FnOnce(&mut Cond)) {
        f(&mut self.where_cond);
    }

    pub(crate) fn make(&self) -> Buffer {
        let mut b = Buffer::new();
        b.push_text("delete from");
        if !self.from.is_empty() {
            b.push_text(self.from.clone());
        }
        if !self.where_cond.is_empty() {
            b.push_text("where");
            b.push_nested(self.where_cond.build());
        }
        b
    }

    /// Render the statement into a [`Query`].
    pub fn build(&self) -> Query {
        Query::from_buffer(self.make())
    }
}

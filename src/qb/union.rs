//! Union statement builder.

use super::buffer::{Buffer, Group};
use super::select::{write_tail, OrderBy, OrderEntry, Select};
use crate::query::Query;

#[derive(Debug, Clone, Copy)]
enum UnionKind {
    Plain,
    All,
    Distinct,
}

impl UnionKind {
    fn keyword(self) -> &'static str {
        match self {
            UnionKind::Plain => "union",
            UnionKind::All => "union all",
            UnionKind::Distinct => "union distinct",
        }
    }
}

/// Union statement builder.
///
/// Each arm renders individually parenthesized; order by, limit, and
/// offset apply to the whole union.
#[derive(Debug, Default)]
pub struct Union {
    arms: Vec<(UnionKind, Select)>,
    order_by: Vec<OrderEntry>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Union {
    pub fn new() -> Self {
        Self::default()
    }

    fn arm(&mut self, kind: UnionKind, f: impl FnOnce(&mut Select)) {
        let mut select = Select::new();
        f(&mut select);
        self.arms.push((kind, select));
    }

    /// Add an arm joined with `union`.
    pub fn select(&mut self, f: impl FnOnce(&mut Select)) {
        self.arm(UnionKind::Plain, f);
    }

    /// Add an arm joined with `union all`.
    pub fn all_select(&mut self, f: impl FnOnce(&mut Select)) {
        self.arm(UnionKind::All, f);
    }

    /// Add an arm joined with `union distinct`.
    pub fn distinct_select(&mut self, f: impl FnOnce(&mut Select)) {
        self.arm(UnionKind::Distinct, f);
    }

    /// Append an order-by entry for the whole union.
    pub fn order_by(&mut self, expr: impl Into<String>) -> OrderBy<'_> {
        push_order_entry(&mut self.order_by, expr.into())
    }

    pub fn limit(&mut self, n: u64) {
        self.limit = Some(n);
    }

    pub fn offset(&mut self, n: u64) {
        self.offset = Some(n);
    }

    pub(crate) fn make(&self) -> Buffer {
        let mut b = Buffer::new();
        for (i, (kind, select)) in self.arms.iter().enumerate() {
            if i > 0 {
                b.push_text(kind.keyword());
            }
            b.push_group(Group::wrap(select.make()));
        }
        write_tail(&mut b, &self.order_by, self.limit, self.offset);
        b
    }

    /// Render the statement into a [`Query`].
    pub fn build(&self) -> Query {
        Query::from_buffer(self.make())
    }
}

fn push_order_entry(entries: &mut Vec<OrderEntry>, expr: String) -> OrderBy<'_> {
    entries.push(OrderEntry::new(expr));
    let last = entries.len() - 1;
    OrderBy::new(&mut entries[last])
}

//! Update statement builder and the assignment clause shared with
//! `insert ... on duplicate key update`.

use std::fmt;

use super::buffer::{Buffer, Group};
use super::cond::Cond;
use super::select::{Join, JoinOn, Select};
use super::term::Term;
use crate::query::Query;

/// Collects `set` assignments in call order.
#[derive(Debug, Default)]
pub struct SetClause {
    assigns: Vec<Buffer>,
}

impl SetClause {
    /// Assign a single column; finish with `.to(...)`, `.to_raw(...)`, or
    /// `.select(...)`.
    pub fn set(&mut self, column: &str) -> Assign<'_> {
        Assign {
            list: &mut self.assigns,
            column: column.to_owned(),
        }
    }

    /// Assign several columns at once; finish with `.to(...)` for
    /// `(cols) = row(values)` or `.select(...)` for `(cols) = (select ...)`.
    pub fn set_many<I>(&mut self, columns: I) -> AssignMany<'_>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        AssignMany {
            list: &mut self.assigns,
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.assigns.is_empty()
    }

    pub(crate) fn make(&self) -> Group {
        let mut group = Group::bare(", ");
        for assign in &self.assigns {
            group.push(assign.clone());
        }
        group
    }
}

/// Pending single-column assignment.
pub struct Assign<'a> {
    list: &'a mut Vec<Buffer>,
    column: String,
}

impl Assign<'_> {
    /// Assign a term: `col = ?` for arguments, inline text for raw terms.
    pub fn to(self, value: impl Into<Term>) {
        let mut b = Buffer::new();
        b.push_text(format!("{} =", self.column));
        b.push_term(value.into());
        self.list.push(b);
    }

    /// Assign inline SQL text: `col = now()`.
    pub fn to_raw(self, value: impl fmt::Display) {
        let mut b = Buffer::new();
        b.push_text(format!("{} = {}", self.column, value));
        self.list.push(b);
    }

    /// Assign from a sub-select: `col = (select ...)`.
    pub fn select(self, f: impl FnOnce(&mut Select)) {
        let mut select = Select::new();
        f(&mut select);
        let mut b = Buffer::new();
        b.push_text(format!("{} =", self.column));
        b.push_group(Group::wrap(select.make()));
        self.list.push(b);
    }
}

/// Pending multi-column assignment.
pub struct AssignMany<'a> {
    list: &'a mut Vec<Buffer>,
    columns: Vec<String>,
}

impl AssignMany<'_> {
    fn columns_group(&self) -> Group {
        let mut group = Group::parens(", ");
        for col in &self.columns {
            group.push_text(col.clone());
        }
        group
    }

    /// Assign a row of terms: `(c1, c2) = row(v1, v2)`.
    pub fn to<I>(self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<Term>,
    {
        let mut b = Buffer::new();
        b.push_group(self.columns_group());
        b.push_text("=");
        let mut row = Group::prefixed("row", ", ");
        for value in values {
            row.push_term(value.into());
        }
        b.push_group(row);
        self.list.push(b);
    }

    /// Assign from a sub-select: `(c1, c2) = (select ...)`.
    pub fn select(self, f: impl FnOnce(&mut Select)) {
        let mut select = Select::new();
        f(&mut select);
        let mut b = Buffer::new();
        b.push_group(self.columns_group());
        b.push_text("=");
        b.push_group(Group::wrap(select.make()));
        self.list.push(b);
    }
}

/// Update statement builder.
#[derive(Debug, Default)]
pub struct Update {
    table: String,
    set: SetClause,
    from: Vec<String>,
    joins: Vec<Join>,
    where_cond: Cond,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&mut self, table: impl Into<String>) {
        self.table = table.into();
    }

    /// Assign a single column.
    pub fn set(&mut self, column: &str) -> Assign<'_> {
        self.set.set(column)
    }

    /// Assign several columns at once.
    pub fn set_many<I>(&mut self, columns: I) -> AssignMany<'_>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.set.set_many(columns)
    }

    /// Append a from item for multi-table updates.
    pub fn from(&mut self, table: impl Into<String>) {
        self.from.push(table.into());
    }

    fn join(&mut self, join: Join) -> JoinOn<'_> {
        self.joins.push(join);
        let last = self.joins.len() - 1;
        JoinOn::new(&mut self.joins[last])
    }

    pub fn inner_join(&mut self, table: impl Into<String>) -> JoinOn<'_> {
        self.join(Join::table("inner join", table.into()))
    }

    pub fn left_join(&mut self, table: impl Into<String>) -> JoinOn<'_> {
        self.join(Join::table("left join", table.into()))
    }

    pub fn right_join(&mut self, table: impl Into<String>) -> JoinOn<'_> {
        self.join(Join::table("right join", table.into()))
    }

    pub fn full_join(&mut self, table: impl Into<String>) -> JoinOn<'_> {
        self.join(Join::table("full join", table.into()))
    }

    /// Add predicates to the where clause.
    pub fn where_with(&mut self, f: impl FnOnce(&mut Cond)) {
        f(&mut self.where_cond);
    }

    pub(crate) fn make(&self) -> Buffer {
        let mut b = Buffer::new();
        b.push_text("update");
        if !self.table.is_empty() {
            b.push_text(self.table.clone());
        }
        if !self.set.is_empty() {
            b.push_text("set");
            b.push_group(self.set.make());
        }
        if !self.from.is_empty() {
            b.push_text("from");
            let mut group = Group::bare(", ");
            for table in &self.from {
                group.push_text(table.clone());
            }
            b.push_group(group);
        }
        for join in &self.joins {
            join.write_to(&mut b);
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

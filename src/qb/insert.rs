//! Insert statement builder.

use super::buffer::{Buffer, Group};
use super::select::Select;
use super::term::Term;
use super::update::SetClause;
use crate::query::Query;

/// Insert statement builder.
#[derive(Debug, Default)]
pub struct Insert {
    table: String,
    columns: Vec<String>,
    overriding: Option<&'static str>,
    default_values: bool,
    rows: Vec<Vec<Term>>,
    select: Option<Box<Select>>,
    on_duplicate: Option<SetClause>,
}

impl Insert {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into(&mut self, table: impl Into<String>) {
        self.table = table.into();
    }

    /// Append column names for the column list.
    pub fn columns<I>(&mut self, columns: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
    }

    pub fn overriding_system_value(&mut self) {
        self.overriding = Some("system");
    }

    pub fn overriding_user_value(&mut self) {
        self.overriding = Some("user");
    }

    /// Insert a row of default values: `insert into t default values`.
    pub fn default_values(&mut self) {
        self.default_values = true;
    }

    /// Append one parenthesized value row. `Term::Default` renders as the
    /// bare `default` keyword inside the row.
    pub fn value<I>(&mut self, row: I)
    where
        I: IntoIterator,
        I::Item: Into<Term>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Append many single-column rows, one per value.
    pub fn values<I>(&mut self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<Term>,
    {
        for value in values {
            self.rows.push(vec![value.into()]);
        }
    }

    /// Insert from a sub-select. If value rows are also configured, both
    /// render in order; configuring both is caller misuse.
    pub fn select(&mut self, f: impl FnOnce(&mut Select)) {
        let mut select = Select::new();
        f(&mut select);
        self.select = Some(Box::new(select));
    }

    /// Start an `on duplicate key update` clause.
    pub fn on_duplicate_key(&mut self) -> OnDuplicateKey<'_> {
        OnDuplicateKey(&mut self.on_duplicate)
    }

    pub(crate) fn make(&self) -> Buffer {
        let mut b = Buffer::new();
        b.push_text("insert");
        if !self.table.is_empty() {
            b.push_text("into");
            b.push_text(self.table.clone());
        }
        if !self.columns.is_empty() {
            let mut group = Group::parens(", ");
            for col in &self.columns {
                group.push_text(col.clone());
            }
            b.push_group(group);
        }
        if let Some(overriding) = self.overriding {
            b.push_text(format!("overriding {overriding} value"));
        }
        if self.default_values {
            b.push_text("default values");
        }
        if !self.rows.is_empty() {
            b.push_text("values");
            let mut rows = Group::bare(", ");
            for row in &self.rows {
                let mut item = Buffer::new();
                let mut group = Group::parens(", ");
                for term in row {
                    group.push_term(term.clone());
                }
                item.push_group(group);
                rows.push(item);
            }
            b.push_group(rows);
        }
        if let Some(select) = &self.select {
            b.push_nested(select.make());
        }
        if let Some(set) = &self.on_duplicate {
            if !set.is_empty() {
                b.push_text("on duplicate key update");
                b.push_group(set.make());
            }
        }
        b
    }

    /// Render the statement into a [`Query`].
    pub fn build(&self) -> Query {
        Query::from_buffer(self.make())
    }
}

/// Pending `on duplicate key update` clause.
pub struct OnDuplicateKey<'a>(&'a mut Option<SetClause>);

impl OnDuplicateKey<'_> {
    /// Configure the assignment list applied on a duplicate key.
    pub fn update(self, f: impl FnOnce(&mut SetClause)) {
        let set = self.0.get_or_insert_with(SetClause::default);
        f(set);
    }
}

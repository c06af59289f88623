//! Select statement builder.

use super::buffer::{Buffer, Group};
use super::cond::Cond;
use super::term::Term;
use crate::query::Query;

/// A select-list expression.
///
/// Strings convert to raw SQL text; a [`Term`] keeps its own rendering,
/// so `columns([arg("x")])` renders a placeholder column.
pub struct Expr(pub(crate) Term);

impl From<&str> for Expr {
    fn from(text: &str) -> Self {
        Expr(Term::Raw(text.to_owned()))
    }
}

impl From<String> for Expr {
    fn from(text: String) -> Self {
        Expr(Term::Raw(text))
    }
}

impl From<Term> for Expr {
    fn from(term: Term) -> Self {
        Expr(term)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct OrderEntry {
    expr: String,
    dir: Option<&'static str>,
    nulls: Option<&'static str>,
}

impl OrderEntry {
    pub(crate) fn new(expr: String) -> Self {
        Self {
            expr,
            dir: None,
            nulls: None,
        }
    }
}

/// Chainable handle over the order-by entry just added.
pub struct OrderBy<'a>(&'a mut OrderEntry);

impl<'a> OrderBy<'a> {
    pub(crate) fn new(entry: &'a mut OrderEntry) -> Self {
        OrderBy(entry)
    }
}

impl OrderBy<'_> {
    pub fn asc(self) -> Self {
        self.0.dir = Some("asc");
        self
    }

    pub fn desc(self) -> Self {
        self.0.dir = Some("desc");
        self
    }

    pub fn nulls_first(self) -> Self {
        self.0.nulls = Some("nulls first");
        self
    }

    pub fn nulls_last(self) -> Self {
        self.0.nulls = Some("nulls last");
        self
    }
}

// Shared tail rendering for select and union.
pub(crate) fn write_tail(
    b: &mut Buffer,
    order_by: &[OrderEntry],
    limit: Option<u64>,
    offset: Option<u64>,
) {
    if !order_by.is_empty() {
        b.push_text("order by");
        let mut group = Group::bare(", ");
        for entry in order_by {
            let mut item = Buffer::new();
            item.push_text(entry.expr.clone());
            if let Some(dir) = entry.dir {
                item.push_text(dir);
            }
            if let Some(nulls) = entry.nulls {
                item.push_text(nulls);
            }
            group.push(item);
        }
        b.push_group(group);
    }
    if let Some(n) = limit {
        b.push_text(format!("limit {n}"));
    }
    if let Some(n) = offset {
        b.push_text(format!("offset {n}"));
    }
}

#[derive(Debug)]
enum JoinTarget {
    Table(String),
    Subquery { select: Box<Select>, alias: String },
}

#[derive(Debug)]
pub(crate) struct Join {
    kind: &'static str,
    lateral: bool,
    target: JoinTarget,
    on: Cond,
    using: Vec<String>,
}

impl Join {
    pub(crate) fn table(kind: &'static str, table: String) -> Self {
        Self {
            kind,
            lateral: false,
            target: JoinTarget::Table(table),
            on: Cond::new(),
            using: Vec::new(),
        }
    }

    fn subquery(kind: &'static str, lateral: bool, select: Select, alias: String) -> Self {
        Self {
            kind,
            lateral,
            target: JoinTarget::Subquery {
                select: Box::new(select),
                alias,
            },
            on: Cond::new(),
            using: Vec::new(),
        }
    }

    pub(crate) fn write_to(&self, b: &mut Buffer) {
        b.push_text(self.kind);
        if self.lateral {
            b.push_text("lateral");
        }
        match &self.target {
            JoinTarget::Table(name) => b.push_text(name.clone()),
            JoinTarget::Subquery { select, alias } => {
                b.push_group(Group::wrap(select.make()));
                b.push_text(alias.clone());
            }
        }
        if !self.on.is_empty() {
            b.push_text("on");
            b.push_nested(self.on.build());
        }
        if !self.using.is_empty() {
            b.push_text("using");
            let mut group = Group::parens(", ");
            for col in &self.using {
                group.push_text(col.clone());
            }
            b.push_group(group);
        }
    }
}

/// Refines the join just added with an `on` condition or a `using` list.
pub struct JoinOn<'a>(&'a mut Join);

impl<'a> JoinOn<'a> {
    pub(crate) fn new(join: &'a mut Join) -> Self {
        JoinOn(join)
    }
}

impl JoinOn<'_> {
    pub fn on(self, f: impl FnOnce(&mut Cond)) {
        f(&mut self.0.on);
    }

    pub fn using<I>(self, columns: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.0.using.extend(columns.into_iter().map(Into::into));
    }
}

/// Extends the `distinct` just enabled into `distinct on (...)`.
pub struct DistinctOn<'a>(&'a mut Vec<String>);

impl DistinctOn<'_> {
    pub fn on<I>(self, columns: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.0.extend(columns.into_iter().map(Into::into));
    }
}

/// Select statement builder.
///
/// Clauses render in fixed order regardless of call order: distinct,
/// columns, from, joins, where, group by, having, order by, limit,
/// offset.
#[derive(Debug, Default)]
pub struct Select {
    distinct: Option<Vec<String>>,
    columns: Vec<Term>,
    from: Vec<String>,
    joins: Vec<Join>,
    where_cond: Cond,
    group_by: Vec<String>,
    having: Cond,
    order_by: Vec<OrderEntry>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append select-list expressions.
    pub fn columns<I>(&mut self, columns: I)
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        self.columns
            .extend(columns.into_iter().map(|c| c.into().0));
    }

    /// Enable `select distinct`; chain `.on(...)` for `distinct on`.
    pub fn distinct(&mut self) -> DistinctOn<'_> {
        DistinctOn(self.distinct.get_or_insert_with(Vec::new))
    }

    /// Append a from item. Call repeatedly for a comma-joined list.
    pub fn from(&mut self, table: impl Into<String>) {
        self.from.push(table.into());
    }

    fn join(&mut self, join: Join) -> JoinOn<'_> {
        self.joins.push(join);
        let last = self.joins.len() - 1;
        JoinOn(&mut self.joins[last])
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

    /// Join a derived table: `inner join (select ...) alias`.
    pub fn inner_join_select(
        &mut self,
        f: impl FnOnce(&mut Select),
        alias: impl Into<String>,
    ) -> JoinOn<'_> {
        let mut select = Select::new();
        f(&mut select);
        self.join(Join::subquery("inner join", false, select, alias.into()))
    }

    /// Join a derived table: `left join (select ...) alias`.
    pub fn left_join_select(
        &mut self,
        f: impl FnOnce(&mut Select),
        alias: impl Into<String>,
    ) -> JoinOn<'_> {
        let mut select = Select::new();
        f(&mut select);
        self.join(Join::subquery("left join", false, select, alias.into()))
    }

    /// Join a lateral derived table: `inner join lateral (select ...) alias`.
    pub fn inner_join_lateral_select(
        &mut self,
        f: impl FnOnce(&mut Select),
        alias: impl Into<String>,
    ) -> JoinOn<'_> {
        let mut select = Select::new();
        f(&mut select);
        self.join(Join::subquery("inner join", true, select, alias.into()))
    }

    /// Join a lateral derived table: `left join lateral (select ...) alias`.
    pub fn left_join_lateral_select(
        &mut self,
        f: impl FnOnce(&mut Select),
        alias: impl Into<String>,
    ) -> JoinOn<'_> {
        let mut select = Select::new();
        f(&mut select);
        self.join(Join::subquery("left join", true, select, alias.into()))
    }

    /// Add predicates to the where clause. Repeated calls extend the same
    /// root condition group.
    pub fn where_with(&mut self, f: impl FnOnce(&mut Cond)) {
        f(&mut self.where_cond);
    }

    /// Append group-by columns, rendered as a parenthesized list.
    pub fn group_by<I>(&mut self, columns: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.group_by.extend(columns.into_iter().map(Into::into));
    }

    /// Add predicates to the having clause.
    pub fn having_with(&mut self, f: impl FnOnce(&mut Cond)) {
        f(&mut self.having);
    }

    /// Append an order-by entry; chain direction and nulls placement.
    pub fn order_by(&mut self, expr: impl Into<String>) -> OrderBy<'_> {
        self.order_by.push(OrderEntry::new(expr.into()));
        let last = self.order_by.len() - 1;
        OrderBy::new(&mut self.order_by[last])
    }

    pub fn limit(&mut self, n: u64) {
        self.limit = Some(n);
    }

    pub fn offset(&mut self, n: u64) {
        self.offset = Some(n);
    }

    pub(crate) fn make(&self) -> Buffer {
        let mut b = Buffer::new();
        b.push_text("select");
        if let Some(on) = &self.distinct {
            b.push_text("distinct");
            if !on.is_empty() {
                b.push_text("on");
                let mut group = Group::parens(", ");
                for col in on {
                    group.push_text(col.clone());
                }
                b.push_group(group);
            }
        }
        if !self.columns.is_empty() {
            let mut group = Group::bare(", ");
            for col in &self.columns {
                group.push_term(col.clone());
            }
            b.push_group(group);
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
        if !self.group_by.is_empty() {
            b.push_text("group by");
            let mut group = Group::parens(", ");
            for col in &self.group_by {
                group.push_text(col.clone());
            }
            b.push_group(group);
        }
        if !self.having.is_empty() {
            b.push_text("having");
            b.push_nested(self.having.build());
        }
        write_tail(&mut b, &self.order_by, self.limit, self.offset);
        b
    }

    /// Render the statement into a [`Query`].
    pub fn build(&self) -> Query {
        Query::from_buffer(self.make())
    }
}

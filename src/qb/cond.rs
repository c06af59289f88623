//! Condition tree for where, having, and join-on clauses.
//!
//! A [`Cond`] collects simple predicates and nested child groups. Simple
//! predicates render as one parenthesized run joined by the group's own
//! combine mode; each child group renders after the joiner keyword it was
//! added with (`and`/`or`) and is parenthesized only when its rendering
//! spans more than one segment. A group holding nothing but a single
//! child collapses to that child, and an empty group renders nothing.

use std::fmt;

use super::buffer::{Buffer, Group};
use super::select::Select;
use super::term::Term;

/// Combine mode for the simple predicates of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Mode {
    #[default]
    And,
    Or,
}

impl Mode {
    fn keyword(self) -> &'static str {
        match self {
            Mode::And => "and",
            Mode::Or => "or",
        }
    }

    fn sep(self) -> &'static str {
        match self {
            Mode::And => " and ",
            Mode::Or => " or ",
        }
    }
}

/// Chooses the combine mode of the current group.
pub struct ModeChoice<'a>(&'a mut Mode);

impl ModeChoice<'_> {
    pub fn and(self) {
        *self.0 = Mode::And;
    }

    pub fn or(self) {
        *self.0 = Mode::Or;
    }
}

/// One group of the condition tree.
#[derive(Debug, Default)]
pub struct Cond {
    mode: Mode,
    ops: Vec<Buffer>,
    chunks: Vec<(Mode, Cond)>,
}

impl Cond {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Set the combine mode for this group's simple predicates
    /// (default `and`).
    pub fn mode(&mut self) -> ModeChoice<'_> {
        ModeChoice(&mut self.mode)
    }

    fn cmp(&mut self, column: &str, op: &str, value: Term) {
        let mut b = Buffer::new();
        b.push_text(format!("{column} {op}"));
        b.push_term(value);
        self.ops.push(b);
    }

    fn cmp_raw(&mut self, column: &str, op: &str, value: impl fmt::Display) {
        let mut b = Buffer::new();
        b.push_text(format!("{column} {op} {value}"));
        self.ops.push(b);
    }

    pub fn eq(&mut self, column: &str, value: impl Into<Term>) {
        self.cmp(column, "=", value.into());
    }

    pub fn eq_raw(&mut self, column: &str, value: impl fmt::Display) {
        self.cmp_raw(column, "=", value);
    }

    pub fn ne(&mut self, column: &str, value: impl Into<Term>) {
        self.cmp(column, "!=", value.into());
    }

    pub fn ne_raw(&mut self, column: &str, value: impl fmt::Display) {
        self.cmp_raw(column, "!=", value);
    }

    pub fn lt(&mut self, column: &str, value: impl Into<Term>) {
        self.cmp(column, "<", value.into());
    }

    pub fn lt_raw(&mut self, column: &str, value: impl fmt::Display) {
        self.cmp_raw(column, "<", value);
    }

    pub fn le(&mut self, column: &str, value: impl Into<Term>) {
        self.cmp(column, "<=", value.into());
    }

    pub fn le_raw(&mut self, column: &str, value: impl fmt::Display) {
        self.cmp_raw(column, "<=", value);
    }

    pub fn gt(&mut self, column: &str, value: impl Into<Term>) {
        self.cmp(column, ">", value.into());
    }

    pub fn gt_raw(&mut self, column: &str, value: impl fmt::Display) {
        self.cmp_raw(column, ">", value);
    }

    pub fn ge(&mut self, column: &str, value: impl Into<Term>) {
        self.cmp(column, ">=", value.into());
    }

    pub fn ge_raw(&mut self, column: &str, value: impl fmt::Display) {
        self.cmp_raw(column, ">=", value);
    }

    /// Membership test against a value list.
    ///
    /// An empty list renders the constant-false predicate `1=0` to keep
    /// the statement valid; callers should not rely on that rendering.
    pub fn in_list<I>(&mut self, column: &str, values: I)
    where
        I: IntoIterator,
        I::Item: Into<Term>,
    {
        self.membership(column, "in", "1=0", values);
    }

    /// Negated membership test. An empty list renders `1=1`.
    pub fn not_in<I>(&mut self, column: &str, values: I)
    where
        I: IntoIterator,
        I::Item: Into<Term>,
    {
        self.membership(column, "not in", "1=1", values);
    }

    fn membership<I>(&mut self, column: &str, op: &str, empty: &str, values: I)
    where
        I: IntoIterator,
        I::Item: Into<Term>,
    {
        let mut group = Group::parens(", ");
        for value in values {
            group.push_term(value.into());
        }
        let mut b = Buffer::new();
        if group.is_empty() {
            b.push_text(empty);
        } else {
            b.push_text(format!("{column} {op}"));
            b.push_group(group);
        }
        self.ops.push(b);
    }

    /// Membership test against a sub-select.
    pub fn in_select(&mut self, column: &str, f: impl FnOnce(&mut Select)) {
        self.membership_select(column, "in", f);
    }

    /// Negated membership test against a sub-select.
    pub fn not_in_select(&mut self, column: &str, f: impl FnOnce(&mut Select)) {
        self.membership_select(column, "not in", f);
    }

    fn membership_select(&mut self, column: &str, op: &str, f: impl FnOnce(&mut Select)) {
        let mut select = Select::new();
        f(&mut select);
        let mut b = Buffer::new();
        b.push_text(format!("{column} {op}"));
        b.push_group(Group::wrap(select.make()));
        self.ops.push(b);
    }

    pub fn is_null(&mut self, column: &str) {
        let mut b = Buffer::new();
        b.push_text(format!("{column} is null"));
        self.ops.push(b);
    }

    pub fn is_not_null(&mut self, column: &str) {
        let mut b = Buffer::new();
        b.push_text(format!("{column} is not null"));
        self.ops.push(b);
    }

    /// Add a raw SQL predicate fragment.
    pub fn raw(&mut self, fragment: impl Into<String>) {
        let mut b = Buffer::new();
        b.push_text(fragment);
        self.ops.push(b);
    }

    /// Add a child group joined to its siblings with `and`.
    pub fn and(&mut self, f: impl FnOnce(&mut Cond)) {
        let mut child = Cond::new();
        f(&mut child);
        self.chunks.push((Mode::And, child));
    }

    /// Add a child group joined to its siblings with `or`.
    pub fn or(&mut self, f: impl FnOnce(&mut Cond)) {
        let mut child = Cond::new();
        f(&mut child);
        self.chunks.push((Mode::Or, child));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.ops.is_empty() && self.chunks.iter().all(|(_, c)| c.is_empty())
    }

    pub(crate) fn build(&self) -> Buffer {
        let mut out = Buffer::new();

        if !self.ops.is_empty() {
            let mut group = Group::parens(self.mode.sep());
            for op in &self.ops {
                group.push(op.clone());
            }
            out.push_group(group);
        }

        let chunks: Vec<(Mode, Buffer)> = self
            .chunks
            .iter()
            .filter(|(_, child)| !child.is_empty())
            .map(|(joiner, child)| (*joiner, child.build()))
            .collect();

        // A group with no predicates of its own and one child collapses
        // to that child, avoiding double parens.
        if out.is_empty() && chunks.len() == 1 {
            if let Some((_, chunk)) = chunks.into_iter().next() {
                return chunk;
            }
            return out;
        }

        for (joiner, chunk) in chunks {
            if !out.is_empty() {
                out.push_text(joiner.keyword());
            }
            if chunk.len() > 1 {
                out.push_group(Group::wrap(chunk));
            } else {
                out.push_nested(chunk);
            }
        }

        out
    }
}

//! Ordered segment buffer that statements render through.
//!
//! A buffer holds SQL fragments in order: literal text, `?` placeholders
//! with their bound values, nested buffers, and comma-joined groups.
//! Rendering is a pure left-to-right pass, so the argument list always
//! matches placeholder order.

use mysql_async::Value;

use super::term::Term;

#[derive(Debug, Clone)]
pub(crate) enum Segment {
    Text(String),
    Arg(Value),
    Default,
    Nested(Buffer),
    Group(Group),
}

/// A run of buffers joined by a separator, optionally parenthesized.
///
/// `prefix` is glued to the opening paren without a space, which is how
/// `row(?, ?)` renders.
#[derive(Debug, Clone)]
pub(crate) struct Group {
    prefix: &'static str,
    parens: bool,
    sep: &'static str,
    items: Vec<Buffer>,
}

impl Group {
    pub fn parens(sep: &'static str) -> Self {
        Self {
            prefix: "",
            parens: true,
            sep,
            items: Vec::new(),
        }
    }

    pub fn bare(sep: &'static str) -> Self {
        Self {
            prefix: "",
            parens: false,
            sep,
            items: Vec::new(),
        }
    }

    pub fn prefixed(prefix: &'static str, sep: &'static str) -> Self {
        Self {
            prefix,
            parens: true,
            sep,
            items: Vec::new(),
        }
    }

    /// Parenthesize a single item; no separator involved.
    pub fn wrap(item: Buffer) -> Self {
        Self {
            prefix: "",
            parens: true,
            sep: "",
            items: vec![item],
        }
    }

    pub fn push(&mut self, item: Buffer) {
        self.items.push(item);
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        let mut b = Buffer::new();
        b.push_text(text);
        self.items.push(b);
    }

    pub fn push_term(&mut self, term: Term) {
        let mut b = Buffer::new();
        b.push_term(term);
        self.items.push(b);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn render(&self, args: &mut Vec<Value>) -> String {
        let items: Vec<String> = self
            .items
            .iter()
            .map(|b| b.render(args))
            .filter(|s| !s.is_empty())
            .collect();
        let body = items.join(self.sep);
        if self.parens {
            format!("{}({})", self.prefix, body)
        } else {
            body
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Buffer {
    segments: Vec<Segment>,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.segments.push(Segment::Text(text.into()));
    }

    pub fn push_term(&mut self, term: Term) {
        match term {
            Term::Arg(value) => self.segments.push(Segment::Arg(value)),
            Term::Raw(text) => self.segments.push(Segment::Text(text)),
            Term::Default => self.segments.push(Segment::Default),
        }
    }

    pub fn push_nested(&mut self, buffer: Buffer) {
        self.segments.push(Segment::Nested(buffer));
    }

    pub fn push_group(&mut self, group: Group) {
        self.segments.push(Segment::Group(group));
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of top-level segments. Condition rendering parenthesizes a
    /// child only when it spans more than one segment.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    fn render(&self, args: &mut Vec<Value>) -> String {
        let parts: Vec<String> = self
            .segments
            .iter()
            .map(|seg| match seg {
                Segment::Text(text) => text.clone(),
                Segment::Arg(value) => {
                    args.push(value.clone());
                    "?".to_owned()
                }
                Segment::Default => "default".to_owned(),
                Segment::Nested(buffer) => buffer.render(args),
                Segment::Group(group) => group.render(args),
            })
            .filter(|s| !s.is_empty())
            .collect();
        parts.join(" ")
    }

    pub fn finish(&self) -> (String, Vec<Value>) {
        let mut args = Vec::new();
        let sql = self.render(&mut args);
        (sql, args)
    }
}

//! Expression nodes.

use std::{fmt, str::FromStr};

use crate::{Error, Object, ident::is_bare_identifier};

/// A Jsonnet expression.
///
/// The set of kinds is closed: every consumer matches exhaustively, so a
/// new kind cannot silently fall through a default arm.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Object(Object),
    Array(Vec<Node>),
    Str(StringLiteral),
    Number(Number),
    Bool(bool),
    Null,
    Var(String),
    SelfRef,
    Binary(Box<Binary>),
    Conditional(Box<Conditional>),
    Apply(Box<Apply>),
    Index(Box<Index>),
    Local(Box<Local>),
    Import(String),
    Function(Box<Function>),
}

impl Node {
    /// Double-quoted string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self::Str(StringLiteral::double(value))
    }

    /// Single-quoted string literal.
    pub fn single_quoted(value: impl Into<String>) -> Self {
        Self::Str(StringLiteral::single(value))
    }

    pub fn int(value: i64) -> Self {
        Self::Number(Number::int(value))
    }

    pub fn float(value: f64) -> Self {
        Self::Number(Number::float(value))
    }

    pub fn bool(value: bool) -> Self {
        Self::Bool(value)
    }

    pub fn var(id: impl Into<String>) -> Self {
        Self::Var(id.into())
    }

    pub fn array(elements: impl IntoIterator<Item = Node>) -> Self {
        Self::Array(elements.into_iter().collect())
    }

    pub fn binary(left: Node, op: BinaryOp, right: Node) -> Self {
        Self::Binary(Box::new(Binary { left, op, right }))
    }

    pub fn conditional(cond: Node, then: Node, otherwise: Option<Node>) -> Self {
        Self::Conditional(Box::new(Conditional {
            cond,
            then,
            otherwise,
        }))
    }

    /// Apply `target` to positional arguments.
    pub fn apply(target: Node, args: impl IntoIterator<Item = Node>) -> Self {
        Self::Apply(Box::new(Apply {
            target,
            args: args.into_iter().collect(),
            named: Vec::new(),
        }))
    }

    /// Apply the dotted path `method` (e.g. `std.type`) to positional arguments.
    pub fn apply_call(method: &str, args: impl IntoIterator<Item = Node>) -> Self {
        Self::apply(Self::call(method), args)
    }

    /// Build the index chain for a dotted path.
    ///
    /// `a.b.c` becomes `Index(Index(Var(a), b), c)`: the innermost node holds
    /// the leftmost segment. A leading `self` segment becomes [`Node::SelfRef`].
    pub fn call(path: &str) -> Self {
        let mut parts = path.split('.');
        let mut node = match parts.next() {
            Some("self") => Self::SelfRef,
            Some(base) => Self::Var(base.to_string()),
            None => Self::Var(String::new()),
        };

        for part in parts {
            node = Self::index(node, Selector::for_name(part));
        }

        node
    }

    pub fn index(target: Node, selector: Selector) -> Self {
        Self::Index(Box::new(Index { target, selector }))
    }

    pub fn local(name: impl Into<String>, value: Node, body: Option<Node>) -> Self {
        Self::Local(Box::new(Local {
            name: name.into(),
            value,
            body,
        }))
    }

    pub fn import(path: impl Into<String>) -> Self {
        Self::Import(path.into())
    }

    pub fn function(params: impl IntoIterator<Item = impl Into<String>>, body: Node) -> Self {
        Self::Function(Box::new(Function {
            params: params.into_iter().map(Into::into).collect(),
            body,
        }))
    }

    /// Short name of this node's kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::Str(_) => "string literal",
            Self::Number(_) => "number literal",
            Self::Bool(_) => "boolean literal",
            Self::Null => "null",
            Self::Var(_) => "var",
            Self::SelfRef => "self",
            Self::Binary(_) => "binary",
            Self::Conditional(_) => "conditional",
            Self::Apply(_) => "apply",
            Self::Index(_) => "index",
            Self::Local(_) => "local",
            Self::Import(_) => "import",
            Self::Function(_) => "function",
        }
    }
}

impl From<Object> for Node {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

/// Combine nodes with `+`, left to right.
///
/// One node is returned unchanged; no nodes yields an empty object.
pub fn combine(nodes: impl IntoIterator<Item = Node>) -> Node {
    let mut nodes = nodes.into_iter();
    let Some(first) = nodes.next() else {
        return Node::Object(Object::new());
    };
    nodes.fold(first, |sum, node| Node::binary(sum, BinaryOp::Plus, node))
}

/// Quote style for string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Double,
    Single,
}

/// A string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    pub value: String,
    pub quote: Quote,
}

impl StringLiteral {
    pub fn double(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote: Quote::Double,
        }
    }

    pub fn single(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote: Quote::Single,
        }
    }
}

/// A numeric literal.
///
/// When an original textual form is known it is printed verbatim, so that
/// `1.50` does not drift to `1.5` across runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    pub value: f64,
    pub original: Option<String>,
}

impl Number {
    pub fn int(value: i64) -> Self {
        Self {
            value: value as f64,
            original: Some(value.to_string()),
        }
    }

    pub fn float(value: f64) -> Self {
        Self {
            value,
            original: None,
        }
    }

    /// A number with an explicit textual representation.
    pub fn with_text(value: f64, text: impl Into<String>) -> Self {
        Self {
            value,
            original: Some(text.into()),
        }
    }

    /// The text to print. NaN and infinities have no Jsonnet literal.
    pub fn text(&self) -> crate::Result<String> {
        match &self.original {
            Some(text) => Ok(text.clone()),
            None if !self.value.is_finite() => {
                Err(Error::NonFiniteNumber(self.value.to_string()))
            }
            None => Ok(self.value.to_string()),
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Mult,
    Div,
    Percent,
    Plus,
    Minus,
    ShiftL,
    ShiftR,
    Greater,
    GreaterEq,
    Less,
    LessEq,
    In,
    Equal,
    NotEqual,
    BitwiseAnd,
    BitwiseXor,
    BitwiseOr,
    And,
    Or,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mult => "*",
            Self::Div => "/",
            Self::Percent => "%",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::ShiftL => "<<",
            Self::ShiftR => ">>",
            Self::Greater => ">",
            Self::GreaterEq => ">=",
            Self::Less => "<",
            Self::LessEq => "<=",
            Self::In => "in",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::BitwiseAnd => "&",
            Self::BitwiseXor => "^",
            Self::BitwiseOr => "|",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

impl FromStr for BinaryOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s {
            "*" => Self::Mult,
            "/" => Self::Div,
            "%" => Self::Percent,
            "+" => Self::Plus,
            "-" => Self::Minus,
            "<<" => Self::ShiftL,
            ">>" => Self::ShiftR,
            ">" => Self::Greater,
            ">=" => Self::GreaterEq,
            "<" => Self::Less,
            "<=" => Self::LessEq,
            "in" => Self::In,
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "&" => Self::BitwiseAnd,
            "^" => Self::BitwiseXor,
            "|" => Self::BitwiseOr,
            "&&" => Self::And,
            "||" => Self::Or,
            other => return Err(Error::UnknownOperator(other.to_string())),
        };
        Ok(op)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub left: Node,
    pub op: BinaryOp,
    pub right: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub cond: Node,
    pub then: Node,
    pub otherwise: Option<Node>,
}

/// A named argument in a function application (`name=value`).
#[derive(Debug, Clone, PartialEq)]
pub struct NamedArg {
    pub name: String,
    pub value: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Apply {
    pub target: Node,
    pub args: Vec<Node>,
    pub named: Vec<NamedArg>,
}

impl Apply {
    /// Add a named argument.
    pub fn with_named(mut self, name: impl Into<String>, value: Node) -> Self {
        self.named.push(NamedArg {
            name: name.into(),
            value,
        });
        self
    }
}

/// What an [`Index`] selects from its target.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// A bare identifier: `target.id`.
    Id(String),
    /// An expression; only string literals are printable.
    Expr(Node),
}

impl Selector {
    /// Identifier selector when `name` can be written bare, string otherwise.
    pub fn for_name(name: &str) -> Self {
        if is_bare_identifier(name) {
            Self::Id(name.to_string())
        } else {
            Self::Expr(Node::string(name))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    pub target: Node,
    pub selector: Selector,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Local {
    pub name: String,
    pub value: Node,
    pub body: Option<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub params: Vec<String>,
    pub body: Node,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_builds_right_nested_chain() {
        let node = Node::call("a.b.c");
        let Node::Index(outer) = node else {
            panic!("expected index");
        };
        assert_eq!(outer.selector, Selector::Id("c".into()));
        let Node::Index(inner) = outer.target else {
            panic!("expected nested index");
        };
        assert_eq!(inner.selector, Selector::Id("b".into()));
        assert_eq!(inner.target, Node::var("a"));
    }

    #[test]
    fn test_call_single_segment_is_var() {
        assert_eq!(Node::call("alpha"), Node::var("alpha"));
    }

    #[test]
    fn test_call_self_base() {
        let Node::Index(index) = Node::call("self.foo") else {
            panic!("expected index");
        };
        assert_eq!(index.target, Node::SelfRef);
    }

    #[test]
    fn test_selector_for_reserved_name_is_string() {
        assert_eq!(
            Selector::for_name("error"),
            Selector::Expr(Node::string("error"))
        );
        assert_eq!(Selector::for_name("errors"), Selector::Id("errors".into()));
    }

    #[test]
    fn test_combine() {
        assert_eq!(combine([]), Node::Object(Object::new()));
        assert_eq!(combine([Node::var("a")]), Node::var("a"));
        assert_eq!(
            combine([Node::var("a"), Node::var("b"), Node::var("c")]),
            Node::binary(
                Node::binary(Node::var("a"), BinaryOp::Plus, Node::var("b")),
                BinaryOp::Plus,
                Node::var("c"),
            )
        );
    }

    #[test]
    fn test_binary_op_round_trips_symbol() {
        for symbol in ["+", "==", ">", "&&", "in", "<<"] {
            let op: BinaryOp = symbol.parse().expect("known operator");
            assert_eq!(op.as_str(), symbol);
        }
    }

    #[test]
    fn test_unknown_binary_op() {
        assert_eq!(
            "=~".parse::<BinaryOp>(),
            Err(Error::UnknownOperator("=~".into()))
        );
    }

    #[test]
    fn test_number_text() {
        assert_eq!(Number::int(42).text().unwrap(), "42");
        assert_eq!(Number::float(1.5).text().unwrap(), "1.5");
        assert_eq!(Number::float(100.0).text().unwrap(), "100");
        assert_eq!(Number::with_text(1.5, "1.50").text().unwrap(), "1.50");
        assert_eq!(
            Number::float(f64::NAN).text(),
            Err(Error::NonFiniteNumber("NaN".into()))
        );
        assert!(Number::float(f64::NEG_INFINITY).text().is_err());
    }
}

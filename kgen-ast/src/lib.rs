//! Jsonnet AST model and printer.
//!
//! Trees are built with the constructors on [`Node`], [`Object`] and [`Key`]
//! and rendered with [`print`] or [`Config::print`]. Rendering is a pure
//! function of the tree: equal trees print byte-identical text.

mod error;
pub mod ident;
mod indent;
mod node;
mod object;
mod printer;

pub use error::{Error, Result};
pub use indent::Indent;
pub use node::{
    Apply, Binary, BinaryOp, Conditional, Function, Index, Local, NamedArg, Node, Number, Quote,
    Selector, StringLiteral, combine,
};
pub use object::{Field, Key, KeyKind, Object, OptionalParam, Signature, Visibility};
pub use printer::{Config, print};

//! Embedded-expression templates.
//!
//! Each function returns a small Jsonnet expression that becomes part of the
//! generated library and runs when the library is evaluated, never inside
//! the generator.

use kgen_ast::{BinaryOp, Key, Node, Object};
use kgen_schema::Property;

/// `std.type(p) == "array"`
pub fn std_type_is_array(param: &str) -> Node {
    Node::binary(
        Node::apply_call("std.type", [Node::var(param)]),
        BinaryOp::Equal,
        Node::string("array"),
    )
}

/// `if std.type(p) == "array" then p else [p]`
pub fn array_autobox(param: &str) -> Node {
    Node::conditional(
        std_type_is_array(param),
        Node::var(param),
        Some(Node::array([Node::var(param)])),
    )
}

/// `{ field: value, }`
pub fn set_field(field: &str, value: Node) -> Node {
    Object::single(Key::inherited(field), value).into()
}

/// `{ field+: value, }`
pub fn merge_field(field: &str, value: Node) -> Node {
    Object::single(Key::inherited(field).with_mixin(), value).into()
}

/// `if std.type(p) == "array" then { field+: p, } else { field+: [p], }`
pub fn array_merge(field: &str, param: &str) -> Node {
    Node::conditional(
        std_type_is_array(param),
        merge_field(field, Node::var(param)),
        Some(merge_field(field, Node::array([Node::var(param)]))),
    )
}

/// `helper(target(p))`, where `target` is a dotted path.
pub fn mixin_call(helper: &str, target: &str, param: &str) -> Node {
    Node::apply(
        Node::var(helper),
        [Node::apply_call(target, [Node::var(param)])],
    )
}

/// Constructor default for an optional property: `[]` for arrays, `{}` for
/// objects and references, nothing for scalars.
pub fn empty_default(property: &Property) -> Option<Node> {
    if property.is_array() {
        Some(Node::array([]))
    } else if property.is_complex() {
        Some(Object::new().into())
    } else {
        None
    }
}

//! JSON rendering of expression trees.
//!
//! Used to inspect the shape the parser produced. Every node becomes an
//! object with its `tag` and its `args`; raw payloads become JSON strings and
//! sub-nodes nest.
//!
//! # Examples
//!
//! ```
//! use infa_expr::{parse, output::to_json};
//!
//! let tree = parse("ABS(-1)", &[]).unwrap();
//! assert_eq!(
//!     to_json(&tree),
//!     r#"{"args":[{"args":["-1.000000"],"tag":"NUMBER"}],"tag":"ABS"}"#
//! );
//! ```

use serde_json::{Map, Value, json};

use crate::ast::{Arg, Node};

/// Converts a node (recursively) into a JSON value.
pub fn node_to_json(node: &Node) -> Value {
    let args = node
        .args
        .iter()
        .map(|arg| match arg {
            Arg::Value(v) => Value::String(v.clone()),
            Arg::Node(n) => node_to_json(n),
        })
        .collect();

    let mut object = Map::new();
    object.insert("tag".to_string(), json!(node.tag));
    object.insert("args".to_string(), Value::Array(args));
    Value::Object(object)
}

/// Compact JSON, keys sorted.
pub fn to_json(node: &Node) -> String {
    node_to_json(node).to_string()
}

/// Human-readable JSON with 2-space indentation.
pub fn to_json_pretty(node: &Node) -> String {
    format!("{:#}", node_to_json(node))
}

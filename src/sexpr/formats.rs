//! Serializable tree form of values
//!
//! [`ValueNode`] mirrors [`Value`] with owned, acyclic data so that read
//! results can be dumped as JSON or YAML. Proper and improper lists become
//! a `list` node with its items and, for improper lists, the final tail.

use serde::Serialize;

use crate::sexpr::value::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ValueNode {
    Void,
    EmptyList,
    Eof,
    Boolean {
        value: bool,
    },
    Integer {
        value: i64,
    },
    Float {
        value: f64,
    },
    String {
        value: String,
    },
    Symbol {
        name: String,
    },
    List {
        items: Vec<ValueNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tail: Option<Box<ValueNode>>,
    },
    Port {
        kind: String,
    },
}

impl From<&Value> for ValueNode {
    fn from(value: &Value) -> Self {
        match value {
            Value::Void => ValueNode::Void,
            Value::Nil => ValueNode::EmptyList,
            Value::Eof => ValueNode::Eof,
            Value::Boolean(value) => ValueNode::Boolean { value: *value },
            Value::Integer(value) => ValueNode::Integer { value: *value },
            Value::Float(value) => ValueNode::Float { value: *value },
            Value::String(value) => ValueNode::String {
                value: value.clone(),
            },
            Value::Symbol(symbol) => ValueNode::Symbol {
                name: symbol.name().to_string(),
            },
            Value::Port(port) => ValueNode::Port {
                kind: port.kind_name().to_string(),
            },
            Value::Pair(_) => {
                let mut items = Vec::new();
                let mut rest = value.clone();
                while let Value::Pair(pair) = rest {
                    items.push(ValueNode::from(&pair.car()));
                    rest = pair.cdr();
                }
                let tail = match rest {
                    Value::Nil => None,
                    tail => Some(Box::new(ValueNode::from(&tail))),
                };
                ValueNode::List { items, tail }
            }
        }
    }
}

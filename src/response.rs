//! Replies from the marketplace and field extraction.
//!
//! A [`Response`] wraps the raw reply of one operation. Fields are pulled out
//! with a slash-separated path (`"HIT/HITId"`), trimmed, coerced to a
//! [`FieldKind`] and kept under a friendly name for later lookup.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::error::{CommunicationError, Error, Result};
use crate::operation::Operation;

/// Walks `reply` along a `/`-separated path.
///
/// Returns `None` when a key is missing, a value on the way is `null`, or an
/// intermediate value is not an object. Empty strings and zeros at the end of
/// the path are returned as found.
pub fn find<'a>(reply: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = reply;
    for key in path.split('/') {
        current = current.as_object()?.get(key)?;
        if current.is_null() {
            return None;
        }
    }
    Some(current)
}

/// Target type for a stored field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Integer => write!(f, "integer"),
            FieldKind::Float => write!(f, "float"),
        }
    }
}

/// A coerced value extracted from a reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Field {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Field::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Field::Float(n) => Some(*n),
            Field::Integer(n) => Some(*n as f64),
            Field::Text(_) => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Text(s) => f.write_str(s),
            Field::Integer(n) => write!(f, "{n}"),
            Field::Float(n) => write!(f, "{n}"),
        }
    }
}

/// Reply to a single marketplace operation.
#[derive(Debug, Clone)]
pub struct Response {
    operation: Operation,
    reply: Value,
    values: BTreeMap<String, Field>,
}

impl Response {
    pub fn new(operation: Operation, reply: Value) -> Self {
        Self {
            operation,
            reply,
            values: BTreeMap::new(),
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The raw reply as returned by the marketplace.
    pub fn reply(&self) -> &Value {
        &self.reply
    }

    pub fn find(&self, path: &str) -> Option<&Value> {
        find(&self.reply, path)
    }

    /// Extracts the value at `path`, coerces it to `kind` and stores it as `name`.
    ///
    /// # Errors
    ///
    /// - [`Error::Communication`] when nothing is found at `path`.
    /// - [`Error::InvalidField`] when the value cannot be coerced.
    pub fn store(&mut self, path: &str, name: &str, kind: FieldKind) -> Result<&Field> {
        let raw = match self.find(path) {
            Some(value) => scalar_text(value).ok_or_else(|| Error::InvalidField {
                path: path.to_string(),
                kind,
                value: value.to_string(),
            })?,
            None => {
                return Err(CommunicationError::new(
                    format!("Client response malformed (cannot find {path})"),
                    self.clone(),
                )
                .into())
            }
        };

        let field = coerce(raw.trim(), kind).ok_or_else(|| Error::InvalidField {
            path: path.to_string(),
            kind,
            value: raw.clone(),
        })?;

        self.values.insert(name.to_string(), field);
        Ok(&self.values[name])
    }

    /// Looks up a stored field. `None` means it was never stored.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.values.get(name)
    }

    /// Like [`Response::get`], failing with [`Error::NotStored`] for unknown names.
    pub fn attr(&self, name: &str) -> Result<&Field> {
        self.get(name)
            .ok_or_else(|| Error::NotStored(name.to_string()))
    }

    /// A stored text field.
    pub fn text(&self, name: &str) -> Result<&str> {
        let field = self.attr(name)?;
        field.as_str().ok_or_else(|| Error::InvalidField {
            path: name.to_string(),
            kind: FieldKind::Text,
            value: field.to_string(),
        })
    }

    /// Id of the created task, set by `create_hit`.
    pub fn task_id(&self) -> Option<&str> {
        self.get("task_id").and_then(Field::as_str)
    }

    /// Group id of the created task, set by `create_hit`.
    pub fn task_type_id(&self) -> Option<&str> {
        self.get("task_type_id").and_then(Field::as_str)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce(raw: &str, kind: FieldKind) -> Option<Field> {
    match kind {
        FieldKind::Text => Some(Field::Text(raw.to_string())),
        FieldKind::Integer => raw.parse().ok().map(Field::Integer),
        FieldKind::Float => raw.parse().ok().map(Field::Float),
    }
}

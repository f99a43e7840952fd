//! Rich query selectors
//!
//! A selector is a set of field-equality constraints over ledger documents,
//! written in the CouchDB-style text form `{"selector":{"field":value}}`.
//! Only plain equality is supported; operator objects such as `{"$gt": 1}`
//! are rejected at parse time. Dotted field names (`a.b`) address nested
//! fields.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while parsing a selector expression
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// The expression is not valid JSON
    #[error("Selector is not valid JSON: {0}")]
    Json(String),

    /// The expression has no `selector` object at the top level
    #[error("Query must be an object with a \"selector\" object")]
    MissingSelector,

    /// A field uses an operator or a compound value
    #[error("Unsupported condition on field '{0}': only equality on scalar values is supported")]
    UnsupportedCondition(String),
}

/// Field-equality selector
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selector {
    fields: BTreeMap<String, Value>,
}

impl Selector {
    /// Selector matching documents whose `field` equals `value`
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::default().and_eq(field, value)
    }

    /// Add another equality constraint
    pub fn and_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Render the selector in its query text form
    ///
    /// Field order is sorted, so equal selectors always render identically.
    pub fn to_query_string(&self) -> String {
        let fields: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let mut root = Map::new();
        root.insert("selector".to_string(), Value::Object(fields));
        Value::Object(root).to_string()
    }

    /// Parse a selector from its query text form
    pub fn parse(expression: &str) -> Result<Self, SelectorError> {
        let root: Value =
            serde_json::from_str(expression).map_err(|e| SelectorError::Json(e.to_string()))?;

        let fields = root
            .get("selector")
            .and_then(Value::as_object)
            .ok_or(SelectorError::MissingSelector)?;

        let mut selector = Self::default();
        for (field, value) in fields {
            if value.is_object() || value.is_array() {
                return Err(SelectorError::UnsupportedCondition(field.clone()));
            }
            selector.fields.insert(field.clone(), value.clone());
        }

        Ok(selector)
    }

    /// Whether `document` satisfies every constraint
    ///
    /// An empty selector matches every object document.
    pub fn matches(&self, document: &Value) -> bool {
        if !document.is_object() {
            return false;
        }

        self.fields
            .iter()
            .all(|(field, expected)| lookup(document, field) == Some(expected))
    }
}

fn lookup<'a>(document: &'a Value, field: &str) -> Option<&'a Value> {
    field
        .split('.')
        .try_fold(document, |current, part| current.get(part))
}

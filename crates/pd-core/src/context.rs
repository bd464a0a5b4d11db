//! Contexts: named boolean expressions over the entities of one dimension type.
//!
//! Expressions are JSON-logic objects and are evaluated by the data API. The
//! only structure inspected locally is the single-entity equality used by raw
//! slice dimensions.

use crate::names::DimensionTypeName;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named boolean expression selecting entities of `dimension_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// Display name, used in axis labels
    pub name: String,

    /// Dimension type of the entities the expression ranges over
    pub dimension_type: DimensionTypeName,

    /// JSON-logic expression, e.g. `{"==": [{"var": "entity_label"}, "TP53"]}`
    pub expr: Value,
}

/// How an equality selector names its entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    /// Matched against display labels (`entity_label`)
    Label,
    /// Matched against ids (`entity_id`, `given_id`)
    Id,
}

/// The entity picked out by a top-level `==` expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualitySelector {
    /// Name of the compared variable
    pub var: String,

    /// The literal it is compared with
    pub value: String,
}

impl EqualitySelector {
    /// Whether the selector compares ids or labels
    pub fn kind(&self) -> SelectorKind {
        match self.var.as_str() {
            "entity_id" | "given_id" | "id" => SelectorKind::Id,
            _ => SelectorKind::Label,
        }
    }
}

impl Context {
    /// Create a context from its parts
    pub fn new(name: impl Into<String>, dimension_type: DimensionTypeName, expr: Value) -> Self {
        Self {
            name: name.into(),
            dimension_type,
            expr,
        }
    }

    /// Extract the single entity of a `{"==": [{"var": v}, "literal"]}` expression.
    ///
    /// Operand order is not significant. Returns `None` for any other shape,
    /// including `==` nested under `and`/`or`.
    pub fn equality_selector(&self) -> Option<EqualitySelector> {
        let obj = self.expr.as_object()?;
        if obj.len() != 1 {
            return None;
        }
        let operands = obj.get("==")?.as_array()?;
        if operands.len() != 2 {
            return None;
        }

        let (var, literal) = match (var_name(&operands[0]), var_name(&operands[1])) {
            (Some(var), None) => (var, &operands[1]),
            (None, Some(var)) => (var, &operands[0]),
            _ => return None,
        };

        Some(EqualitySelector {
            var: var.to_string(),
            value: literal.as_str()?.to_string(),
        })
    }
}

fn var_name(operand: &Value) -> Option<&str> {
    operand.as_object()?.get("var")?.as_str()
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;

//! Declarative input schemas.
//!
//! A [`Schema`] is an ordered list of field rules checked against untyped
//! JSON. Every rule is evaluated, so one rejected request reports every
//! problem at once.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

/// Shape constraint applied to a single field.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// String whose trimmed length is within `min..=max` characters.
    Text { min: usize, max: usize },
    /// `local@domain.tld` address.
    Email,
    /// JSON integer greater than zero.
    PositiveInt,
    /// One of a fixed set of string literals.
    OneOf(&'static [&'static str]),
    /// Array of non-empty strings.
    StringArray { min_items: usize, max_items: usize },
}

#[derive(Debug, Clone)]
struct FieldRule {
    name: &'static str,
    required: bool,
    constraint: Constraint,
}

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All violations found for one input, in schema declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.joined())]
pub struct ValidationErrors {
    pub schema: &'static str,
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn single(schema: &'static str, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            schema,
            errors: vec![FieldError {
                field: field.into(),
                message: message.into(),
            }],
        }
    }

    /// Messages joined with `"; "`.
    pub fn joined(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A named, ordered set of field rules.
#[derive(Debug, Clone)]
pub struct Schema {
    name: &'static str,
    fields: Vec<FieldRule>,
}

impl Schema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Add a field that must be present and non-null.
    pub fn required(mut self, name: &'static str, constraint: Constraint) -> Self {
        self.fields.push(FieldRule {
            name,
            required: true,
            constraint,
        });
        self
    }

    /// Add a field that may be absent or null.
    pub fn optional(mut self, name: &'static str, constraint: Constraint) -> Self {
        self.fields.push(FieldRule {
            name,
            required: false,
            constraint,
        });
        self
    }

    /// Check `input` against every rule without converting it.
    pub fn check(&self, input: &Value) -> Result<(), ValidationErrors> {
        let object = match input {
            Value::Object(map) => map,
            _ => {
                return Err(ValidationErrors::single(
                    self.name,
                    "",
                    "request body must be a JSON object",
                ))
            }
        };

        let errors: Vec<FieldError> = self
            .fields
            .iter()
            .flat_map(|rule| check_field(rule, object))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                schema: self.name,
                errors,
            })
        }
    }

    /// Check `input` and convert it into `T`. `Text` fields are trimmed first.
    pub fn parse<T: DeserializeOwned>(&self, mut input: Value) -> Result<T, ValidationErrors> {
        self.check(&input)?;
        self.trim_text_fields(&mut input);
        serde_json::from_value(input)
            .map_err(|e| ValidationErrors::single(self.name, "", format!("invalid request: {}", e)))
    }

    fn trim_text_fields(&self, input: &mut Value) {
        let Value::Object(object) = input else {
            return;
        };
        for rule in &self.fields {
            if !matches!(rule.constraint, Constraint::Text { .. }) {
                continue;
            }
            if let Some(Value::String(s)) = object.get_mut(rule.name) {
                let trimmed = s.trim();
                if trimmed.len() != s.len() {
                    *s = trimmed.to_string();
                }
            }
        }
    }

    /// Check query parameters. Values stay strings.
    pub fn parse_query<T: DeserializeOwned>(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<T, ValidationErrors> {
        self.parse(query_to_value(params))
    }
}

/// Turn flat query parameters into a JSON object of strings.
pub fn query_to_value(params: &HashMap<String, String>) -> Value {
    let map: Map<String, Value> = params
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    Value::Object(map)
}

fn check_field(rule: &FieldRule, object: &Map<String, Value>) -> Vec<FieldError> {
    let name = rule.name;
    let error = |message: String| {
        vec![FieldError {
            field: name.to_string(),
            message,
        }]
    };

    let value = match object.get(name) {
        None | Some(Value::Null) if rule.required => {
            return error(format!("{} is required", name));
        }
        None | Some(Value::Null) => return Vec::new(),
        Some(value) => value,
    };

    match &rule.constraint {
        Constraint::Text { min, max } => match value.as_str() {
            None => error(format!("{} must be a string", name)),
            Some(s) => {
                let len = s.trim().chars().count();
                if len < *min {
                    error(format!("{} must be at least {} characters", name, min))
                } else if len > *max {
                    error(format!("{} must be at most {} characters", name, max))
                } else {
                    Vec::new()
                }
            }
        },
        Constraint::Email => match value.as_str() {
            Some(s) if is_email(s) => Vec::new(),
            _ => error(format!("{} must be a valid email address", name)),
        },
        Constraint::PositiveInt => match value.as_u64() {
            Some(n) if n > 0 => Vec::new(),
            _ => error(format!("{} must be a positive integer", name)),
        },
        Constraint::OneOf(allowed) => match value.as_str() {
            Some(s) if allowed.contains(&s) => Vec::new(),
            _ => error(format!("{} must be one of: {}", name, allowed.join(", "))),
        },
        Constraint::StringArray {
            min_items,
            max_items,
        } => {
            let items = match value.as_array() {
                Some(items) => items,
                None => return error(format!("{} must be an array", name)),
            };
            if items.len() < *min_items {
                return error(format!("{} must contain at least {} item(s)", name, min_items));
            }
            if items.len() > *max_items {
                return error(format!("{} must contain at most {} items", name, max_items));
            }
            items
                .iter()
                .enumerate()
                .filter(|(_, item)| !matches!(item.as_str(), Some(s) if !s.trim().is_empty()))
                .map(|(i, _)| FieldError {
                    field: format!("{}[{}]", name, i),
                    message: format!("{}[{}] must be a non-empty string", name, i),
                })
                .collect()
        }
    }
}

fn is_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

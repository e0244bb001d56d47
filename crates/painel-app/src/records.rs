// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde_json::{Map, Value};

use crate::LoadError;

/// One flat value inside a backend record.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Default string conversion used by every table cell.
    pub fn display(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(value) => value.to_string(),
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Text(value) => value.clone(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Text(value) => value.trim().parse().ok(),
            Self::Null | Self::Bool(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Float(value) if value.fract() == 0.0 => Some(*value as i64),
            Self::Text(value) => value.trim().parse().ok(),
            Self::Null | Self::Bool(_) | Self::Float(_) => None,
        }
    }

    fn from_json(field: &str, value: Value) -> Result<Self, LoadError> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(value) => Ok(Self::Bool(value)),
            Value::Number(number) => Ok(match number.as_i64() {
                Some(value) => Self::Integer(value),
                None => Self::Float(number.as_f64().unwrap_or(f64::NAN)),
            }),
            Value::String(value) => Ok(Self::Text(value)),
            Value::Array(_) | Value::Object(_) => Err(LoadError::shape(format!(
                "field {field:?} holds a nested value; records must be flat"
            ))),
        }
    }
}

/// A flat backend row. Field order is the order the backend sent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Scalar)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by tests and fixtures.
    pub fn with(mut self, field: impl Into<String>, value: Scalar) -> Self {
        self.insert(field, value);
        self
    }

    /// Replaces an existing field in place, otherwise appends it.
    pub fn insert(&mut self, field: impl Into<String>, value: Scalar) {
        let field = field.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Scalar> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn text(&self, field: &str) -> Option<String> {
        match self.get(field)? {
            Scalar::Null => None,
            value => Some(value.display()),
        }
    }

    pub fn integer(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Scalar::as_i64)
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Scalar::as_f64)
    }

    pub fn require_text(&self, field: &str) -> Result<String, LoadError> {
        self.text(field)
            .ok_or_else(|| LoadError::shape(format!("record is missing field {field:?}")))
    }

    pub fn from_json(value: Value) -> Result<Self, LoadError> {
        match value {
            Value::Object(map) => Self::from_object(map),
            other => Err(LoadError::shape(format!(
                "expected a record object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn from_object(map: Map<String, Value>) -> Result<Self, LoadError> {
        let mut fields = Vec::with_capacity(map.len());
        for (name, value) in map {
            let scalar = Scalar::from_json(&name, value)?;
            fields.push((name, scalar));
        }
        Ok(Self { fields })
    }
}

/// Parses a response that must be a sequence of flat records.
pub fn records_from_json(value: Value) -> Result<Vec<Record>, LoadError> {
    match value {
        Value::Array(items) => items.into_iter().map(Record::from_json).collect(),
        other => Err(LoadError::shape(format!(
            "expected a list of records, got {}",
            json_kind(&other)
        ))),
    }
}

pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

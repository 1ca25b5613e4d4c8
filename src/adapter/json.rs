//! serde_json-backed adapter implementation

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};

use super::{AdapterError, ArrayAdapter, ObjectAdapter};

/// Object adapter over a serde_json map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonObjectAdapter {
    values: Map<String, Value>,
}

/// Array adapter over a serde_json vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonArrayAdapter {
    values: Vec<Value>,
}

impl JsonObjectAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object from text.
    pub fn parse(text: &str) -> Result<Self, AdapterError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| AdapterError::Malformed(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, AdapterError> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(AdapterError::Malformed(format!(
                "expected a JSON object, got {}",
                value_kind(&other)
            ))),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }

    pub fn to_json_string(&self) -> String {
        Value::Object(self.values.clone()).to_string()
    }

    fn fetch(&self, key: &str) -> Result<&Value, AdapterError> {
        self.values
            .get(key)
            .ok_or_else(|| AdapterError::MissingKey(key.to_string()))
    }
}

impl JsonArrayAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: Value) -> Result<Self, AdapterError> {
        match value {
            Value::Array(values) => Ok(Self { values }),
            other => Err(AdapterError::Malformed(format!(
                "expected a JSON array, got {}",
                value_kind(&other)
            ))),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Array(self.values)
    }

    fn fetch(&self, index: usize) -> Result<&Value, AdapterError> {
        self.values
            .get(index)
            .ok_or(AdapterError::MissingIndex(index))
    }

    /// Replace the slot at `index`, padding any gap with nulls.
    fn set(&mut self, index: usize, value: Value) {
        if index >= self.values.len() {
            self.values.resize(index, Value::Null);
            self.values.push(value);
        } else {
            self.values[index] = value;
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn as_long(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    }
}

/// Doubles round-trip through JSON numbers except for the non-finite values,
/// which JSON cannot carry and are stored as their string tokens instead.
fn as_double(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.as_str() {
            "NaN" => Some(f64::NAN),
            "Infinity" => Some(f64::INFINITY),
            "-Infinity" => Some(f64::NEG_INFINITY),
            _ => None,
        },
        _ => None,
    }
}

fn double_to_value(value: f64) -> Value {
    match serde_json::Number::from_f64(value) {
        Some(number) => Value::Number(number),
        None => {
            let token = if value.is_nan() {
                "NaN"
            } else if value.is_sign_positive() {
                "Infinity"
            } else {
                "-Infinity"
            };
            Value::String(token.to_string())
        }
    }
}

fn millis_to_date(millis: i64) -> Result<DateTime<Utc>, AdapterError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or(AdapterError::InvalidDate(millis))
}

impl ObjectAdapter for JsonObjectAdapter {
    type Array = JsonArrayAdapter;

    fn get_string(&self, key: &str) -> Result<String, AdapterError> {
        match self.fetch(key)? {
            Value::String(s) => Ok(s.clone()),
            _ => Err(AdapterError::TypeMismatch {
                key: key.to_string(),
                expected: "string",
            }),
        }
    }

    fn get_long(&self, key: &str) -> Result<i64, AdapterError> {
        as_long(self.fetch(key)?).ok_or_else(|| AdapterError::TypeMismatch {
            key: key.to_string(),
            expected: "long",
        })
    }

    fn get_double(&self, key: &str) -> Result<f64, AdapterError> {
        as_double(self.fetch(key)?).ok_or_else(|| AdapterError::TypeMismatch {
            key: key.to_string(),
            expected: "double",
        })
    }

    fn get_boolean(&self, key: &str) -> Result<bool, AdapterError> {
        self.fetch(key)?
            .as_bool()
            .ok_or_else(|| AdapterError::TypeMismatch {
                key: key.to_string(),
                expected: "boolean",
            })
    }

    fn get_date(&self, key: &str) -> Result<DateTime<Utc>, AdapterError> {
        millis_to_date(self.get_long(key)?)
    }

    fn get_object(&self, key: &str) -> Result<Self, AdapterError> {
        match self.fetch(key)? {
            Value::Object(values) => Ok(Self {
                values: values.clone(),
            }),
            _ => Err(AdapterError::TypeMismatch {
                key: key.to_string(),
                expected: "object",
            }),
        }
    }

    fn get_array(&self, key: &str) -> Result<Self::Array, AdapterError> {
        match self.fetch(key)? {
            Value::Array(values) => Ok(JsonArrayAdapter {
                values: values.clone(),
            }),
            _ => Err(AdapterError::TypeMismatch {
                key: key.to_string(),
                expected: "array",
            }),
        }
    }

    fn is_null(&self, key: &str) -> bool {
        self.values.get(key).map(Value::is_null).unwrap_or(true)
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    fn put_string(&mut self, key: &str, value: &str) {
        self.values
            .insert(key.to_string(), Value::String(value.to_string()));
    }

    fn put_long(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), Value::from(value));
    }

    fn put_double(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_string(), double_to_value(value));
    }

    fn put_boolean(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_string(), Value::Bool(value));
    }

    fn put_date(&mut self, key: &str, value: DateTime<Utc>) {
        self.put_long(key, value.timestamp_millis());
    }

    fn put_object(&mut self, key: &str, value: Self) {
        self.values.insert(key.to_string(), value.into_value());
    }

    fn put_array(&mut self, key: &str, value: Self::Array) {
        self.values.insert(key.to_string(), value.into_value());
    }

    fn put_null(&mut self, key: &str) {
        self.values.insert(key.to_string(), Value::Null);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn create_new(&self) -> Self {
        Self::new()
    }

    fn create_new_array(&self) -> Self::Array {
        JsonArrayAdapter::new()
    }
}

impl ArrayAdapter for JsonArrayAdapter {
    type Object = JsonObjectAdapter;

    fn length(&self) -> usize {
        self.values.len()
    }

    fn get_string(&self, index: usize) -> Result<String, AdapterError> {
        match self.fetch(index)? {
            Value::String(s) => Ok(s.clone()),
            _ => Err(AdapterError::TypeMismatch {
                key: index.to_string(),
                expected: "string",
            }),
        }
    }

    fn get_long(&self, index: usize) -> Result<i64, AdapterError> {
        as_long(self.fetch(index)?).ok_or_else(|| AdapterError::TypeMismatch {
            key: index.to_string(),
            expected: "long",
        })
    }

    fn get_double(&self, index: usize) -> Result<f64, AdapterError> {
        as_double(self.fetch(index)?).ok_or_else(|| AdapterError::TypeMismatch {
            key: index.to_string(),
            expected: "double",
        })
    }

    fn get_boolean(&self, index: usize) -> Result<bool, AdapterError> {
        self.fetch(index)?
            .as_bool()
            .ok_or_else(|| AdapterError::TypeMismatch {
                key: index.to_string(),
                expected: "boolean",
            })
    }

    fn get_date(&self, index: usize) -> Result<DateTime<Utc>, AdapterError> {
        millis_to_date(self.get_long(index)?)
    }

    fn get_object(&self, index: usize) -> Result<Self::Object, AdapterError> {
        match self.fetch(index)? {
            Value::Object(values) => Ok(JsonObjectAdapter {
                values: values.clone(),
            }),
            _ => Err(AdapterError::TypeMismatch {
                key: index.to_string(),
                expected: "object",
            }),
        }
    }

    fn get_array(&self, index: usize) -> Result<Self, AdapterError> {
        match self.fetch(index)? {
            Value::Array(values) => Ok(Self {
                values: values.clone(),
            }),
            _ => Err(AdapterError::TypeMismatch {
                key: index.to_string(),
                expected: "array",
            }),
        }
    }

    fn is_null(&self, index: usize) -> bool {
        self.values.get(index).map(Value::is_null).unwrap_or(true)
    }

    fn put_string(&mut self, index: usize, value: &str) {
        self.set(index, Value::String(value.to_string()));
    }

    fn put_long(&mut self, index: usize, value: i64) {
        self.set(index, Value::from(value));
    }

    fn put_double(&mut self, index: usize, value: f64) {
        self.set(index, double_to_value(value));
    }

    fn put_boolean(&mut self, index: usize, value: bool) {
        self.set(index, Value::Bool(value));
    }

    fn put_date(&mut self, index: usize, value: DateTime<Utc>) {
        self.put_long(index, value.timestamp_millis());
    }

    fn put_object(&mut self, index: usize, value: Self::Object) {
        self.set(index, value.into_value());
    }

    fn put_array(&mut self, index: usize, value: Self) {
        self.set(index, value.into_value());
    }

    fn put_null(&mut self, index: usize) {
        self.set(index, Value::Null);
    }

    fn create_new(&self) -> Self::Object {
        JsonObjectAdapter::new()
    }

    fn create_new_array(&self) -> Self {
        Self::new()
    }
}

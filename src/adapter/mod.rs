//! JSON adapter contract
//!
//! Generated classes marshal through an adapter interface rather than a
//! concrete JSON library, so callers can plug in whatever implementation
//! their platform ships. This module defines the Rust counterpart of that
//! contract; [`json`] provides the serde_json-backed implementation the
//! generator and its tests use.
//!
//! The contract is what makes schema evolution work: absent keys and null
//! values are indistinguishable through [`ObjectAdapter::is_null`], writers
//! skip null fields, and readers leave fields at their defaults when a key
//! is missing.

pub mod json;

use chrono::{DateTime, Utc};
use thiserror::Error;

pub use json::{JsonArrayAdapter, JsonObjectAdapter};

/// Adapter access errors
#[derive(Error, Debug, PartialEq)]
pub enum AdapterError {
    #[error("No value found for key: {0}")]
    MissingKey(String),
    #[error("No value found at index: {0}")]
    MissingIndex(usize),
    #[error("The value for {key} is not a {expected}")]
    TypeMismatch { key: String, expected: &'static str },
    #[error("Not a valid millisecond timestamp: {0}")]
    InvalidDate(i64),
    #[error("Malformed JSON: {0}")]
    Malformed(String),
}

/// Keyed access to one JSON object.
pub trait ObjectAdapter: Sized {
    type Array: ArrayAdapter<Object = Self>;

    fn get_string(&self, key: &str) -> Result<String, AdapterError>;
    fn get_long(&self, key: &str) -> Result<i64, AdapterError>;
    fn get_double(&self, key: &str) -> Result<f64, AdapterError>;
    fn get_boolean(&self, key: &str) -> Result<bool, AdapterError>;
    /// Dates are stored as epoch milliseconds.
    fn get_date(&self, key: &str) -> Result<DateTime<Utc>, AdapterError>;
    fn get_object(&self, key: &str) -> Result<Self, AdapterError>;
    fn get_array(&self, key: &str) -> Result<Self::Array, AdapterError>;

    /// True when the key is absent or holds an explicit null.
    fn is_null(&self, key: &str) -> bool;
    /// Every key currently present, including null-valued ones.
    fn keys(&self) -> Vec<String>;

    fn put_string(&mut self, key: &str, value: &str);
    fn put_long(&mut self, key: &str, value: i64);
    fn put_double(&mut self, key: &str, value: f64);
    fn put_boolean(&mut self, key: &str, value: bool);
    fn put_date(&mut self, key: &str, value: DateTime<Utc>);
    fn put_object(&mut self, key: &str, value: Self);
    fn put_array(&mut self, key: &str, value: Self::Array);
    fn put_null(&mut self, key: &str);
    fn remove(&mut self, key: &str);

    fn create_new(&self) -> Self;
    fn create_new_array(&self) -> Self::Array;
}

/// Indexed access to one JSON array.
pub trait ArrayAdapter: Sized {
    type Object: ObjectAdapter<Array = Self>;

    fn length(&self) -> usize;
    fn get_string(&self, index: usize) -> Result<String, AdapterError>;
    fn get_long(&self, index: usize) -> Result<i64, AdapterError>;
    fn get_double(&self, index: usize) -> Result<f64, AdapterError>;
    fn get_boolean(&self, index: usize) -> Result<bool, AdapterError>;
    fn get_date(&self, index: usize) -> Result<DateTime<Utc>, AdapterError>;
    fn get_object(&self, index: usize) -> Result<Self::Object, AdapterError>;
    fn get_array(&self, index: usize) -> Result<Self, AdapterError>;

    /// True when the index is out of range or holds an explicit null.
    fn is_null(&self, index: usize) -> bool;

    /// Writes beyond the current length pad the gap with nulls.
    fn put_string(&mut self, index: usize, value: &str);
    fn put_long(&mut self, index: usize, value: i64);
    fn put_double(&mut self, index: usize, value: f64);
    fn put_boolean(&mut self, index: usize, value: bool);
    fn put_date(&mut self, index: usize, value: DateTime<Utc>);
    fn put_object(&mut self, index: usize, value: Self::Object);
    fn put_array(&mut self, index: usize, value: Self);
    fn put_null(&mut self, index: usize);

    fn create_new(&self) -> Self::Object;
    fn create_new_array(&self) -> Self;
}

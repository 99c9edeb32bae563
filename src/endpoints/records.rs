//! Typed projections of normalized records
//!
//! Normalized records are flat JSON objects with a fixed key set; these
//! structs give the common ones a typed shape for callers that prefer
//! fields over map lookups. Normalization emits `null` for absent data,
//! so scalar fields deserialize through a null-tolerant default.

use crate::error::{Error, Result};
use crate::types::JsonObject;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn from_object<T: serde::de::DeserializeOwned>(record: &JsonObject) -> Result<T> {
    serde_json::from_value(Value::Object(record.clone())).map_err(Error::from)
}

fn null_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A database on an instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub character_set: String,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Database {
    pub fn from_record(record: &JsonObject) -> Result<Self> {
        from_object(record)
    }
}

/// A database account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub hosts: Vec<String>,
}

impl Account {
    pub fn from_record(record: &JsonObject) -> Result<Self> {
        from_object(record)
    }
}

/// An instance backup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub backup_type: String,
    #[serde(default, deserialize_with = "null_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_default")]
    pub size: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub instance_id: String,
    #[serde(default)]
    pub begin_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub engine_version: Option<String>,
}

impl Backup {
    pub fn from_record(record: &JsonObject) -> Result<Self> {
        from_object(record)
    }
}

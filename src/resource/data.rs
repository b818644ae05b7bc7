//! Attribute Store
//!
//! The host owns resource state; handlers only see it through the
//! [`AttributeStore`] capability. Values are JSON values keyed by schema
//! field name. Absent and null values read as the zero value of the
//! requested type, matching how the host presents unset optional fields.

use super::error::ResourceError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn kind_of(value: &Value) -> String {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
    .to_string()
}

fn mismatch(key: &str, expected: &'static str, found: &Value) -> ResourceError {
    ResourceError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: kind_of(found),
    }
}

/// Read access to a set of attributes (a resource or one nested block)
pub trait AttributeReader {
    fn get(&self, key: &str) -> Option<&Value>;

    fn get_string(&self, key: &str) -> Result<String, ResourceError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(mismatch(key, "a string", other)),
        }
    }

    fn get_int(&self, key: &str) -> Result<i64, ResourceError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(0),
            Some(value @ Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| mismatch(key, "an integer", value)),
            Some(other) => Err(mismatch(key, "an integer", other)),
        }
    }

    fn get_bool(&self, key: &str) -> Result<bool, ResourceError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(mismatch(key, "a bool", other)),
        }
    }

    fn get_list(&self, key: &str) -> Result<Vec<Value>, ResourceError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(other) => Err(mismatch(key, "a list", other)),
        }
    }

    fn get_string_list(&self, key: &str) -> Result<Vec<String>, ResourceError> {
        self.get_list(key)?
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(mismatch(key, "a list of strings", &other)),
            })
            .collect()
    }

    fn get_map(&self, key: &str) -> Result<Map<String, Value>, ResourceError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(Map::new()),
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(other) => Err(mismatch(key, "a map", other)),
        }
    }

    /// Every element of a list-of-blocks attribute
    fn get_block_list(&self, key: &str) -> Result<Vec<Map<String, Value>>, ResourceError> {
        self.get_list(key)?
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => Ok(map),
                other => Err(mismatch(key, "a list of blocks", &other)),
            })
            .collect()
    }

    /// The single element of a 1-item block attribute, if configured
    fn get_block(&self, key: &str) -> Result<Option<Map<String, Value>>, ResourceError> {
        Ok(self.get_block_list(key)?.into_iter().next())
    }
}

/// Read/write access to one resource instance's identifier and attributes
pub trait AttributeStore: AttributeReader {
    fn id(&self) -> &str;

    /// An empty id tells the host the resource no longer exists
    fn set_id(&mut self, id: &str);

    fn set(&mut self, key: &str, value: Value);
}

impl AttributeReader for Map<String, Value> {
    fn get(&self, key: &str) -> Option<&Value> {
        Map::get(self, key)
    }
}

/// In-memory attribute store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl ResourceData {
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self {
            id: String::new(),
            attributes,
        }
    }

    pub fn with_id(id: &str, attributes: Map<String, Value>) -> Self {
        Self {
            id: id.to_string(),
            attributes,
        }
    }

    /// Whether the resource still exists as far as the host is concerned
    pub fn is_managed(&self) -> bool {
        !self.id.is_empty()
    }
}

impl AttributeReader for ResourceData {
    fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

impl AttributeStore for ResourceData {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    fn set(&mut self, key: &str, value: Value) {
        self.attributes.insert(key.to_string(), value);
    }
}

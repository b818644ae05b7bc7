//! Resource Schema
//!
//! Static descriptors of the attributes a resource type accepts. The host
//! uses them for planning and validation; handlers only rely on the field
//! names. Descriptors serialize to JSON so they can be inspected from the
//! command line.

use serde::Serialize;
use serde_json::{Map, Value};

/// Type of a single attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Int,
    Bool,
    /// Free-form string map
    Map,
    List {
        elem: Box<FieldKind>,
    },
    /// List of nested blocks
    Block {
        fields: Vec<Field>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min_items: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_items: Option<usize>,
    },
}

/// One attribute declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub computed: bool,
    /// Changing the value replaces the resource
    #[serde(skip_serializing_if = "is_false")]
    pub force_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// String-enum validator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<&'static [&'static str]>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Field {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            optional: false,
            computed: false,
            force_new: false,
            default: None,
            allowed_values: None,
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn int(name: &'static str) -> Self {
        Self::new(name, FieldKind::Int)
    }

    pub fn bool(name: &'static str) -> Self {
        Self::new(name, FieldKind::Bool)
    }

    pub fn map(name: &'static str) -> Self {
        Self::new(name, FieldKind::Map)
    }

    pub fn list(name: &'static str, elem: FieldKind) -> Self {
        Self::new(
            name,
            FieldKind::List {
                elem: Box::new(elem),
            },
        )
    }

    pub fn block(name: &'static str, fields: Vec<Field>) -> Self {
        Self::new(
            name,
            FieldKind::Block {
                fields,
                min_items: None,
                max_items: None,
            },
        )
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.allowed_values = Some(values);
        self
    }

    /// Restrict a block to exactly one element
    pub fn single(mut self) -> Self {
        if let FieldKind::Block {
            min_items,
            max_items,
            ..
        } = &mut self.kind
        {
            *min_items = Some(1);
            *max_items = Some(1);
        }
        self
    }
}

/// Schema of one resource type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceSchema {
    pub name: &'static str,
    pub fields: Vec<Field>,
}

impl ResourceSchema {
    pub fn new(name: &'static str, fields: Vec<Field>) -> Self {
        Self { name, fields }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fill declared defaults for attributes the configuration leaves unset
    pub fn apply_defaults(&self, attributes: &mut Map<String, Value>) {
        for field in &self.fields {
            let Some(default) = &field.default else {
                continue;
            };

            let unset = attributes.get(field.name).map_or(true, Value::is_null);
            if unset {
                attributes.insert(field.name.to_string(), default.clone());
            }
        }
    }
}

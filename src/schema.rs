//! Declared schema for the bucket-backed log source.
//!
//! Describes the attribute surface the host framework exposes to callers:
//! attribute types, required/optional/computed flags, defaults, and the
//! positional nested-block structure (each nesting level is a list capped
//! at one element).

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;

/// The type of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// A string value.
    String,
    /// A 64-bit integer.
    Int64,
    /// A boolean value.
    Bool,
}

/// Describes how an attribute can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AttributeFlags {
    /// The attribute is required in configuration.
    pub required: bool,
    /// The attribute is optional in configuration.
    pub optional: bool,
    /// The attribute may be computed by the server (its value is written
    /// back after every lifecycle operation when left unset).
    pub computed: bool,
}

impl AttributeFlags {
    /// Flags for a required attribute.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Default::default()
        }
    }

    /// Flags for an optional attribute.
    pub fn optional() -> Self {
        Self {
            optional: true,
            ..Default::default()
        }
    }

    /// Flags for an optional attribute with a server-assigned default.
    pub fn optional_computed() -> Self {
        Self {
            optional: true,
            computed: true,
            ..Default::default()
        }
    }
}

/// A single attribute in the declared schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// The type of the attribute.
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    /// Flags describing how the attribute can be used.
    #[serde(flatten)]
    pub flags: AttributeFlags,
    /// Default value for the attribute (JSON-encoded).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl Attribute {
    /// Create a new attribute with the given type and flags.
    pub fn new(attr_type: AttributeType, flags: AttributeFlags) -> Self {
        Self {
            attr_type,
            flags,
            default: None,
        }
    }

    /// Create a required string attribute.
    pub fn required_string() -> Self {
        Self::new(AttributeType::String, AttributeFlags::required())
    }

    /// Create a required int64 attribute.
    pub fn required_int64() -> Self {
        Self::new(AttributeType::Int64, AttributeFlags::required())
    }

    /// Create an optional string attribute.
    pub fn optional_string() -> Self {
        Self::new(AttributeType::String, AttributeFlags::optional())
    }

    /// Create an optional+computed string attribute.
    pub fn optional_computed_string() -> Self {
        Self::new(AttributeType::String, AttributeFlags::optional_computed())
    }

    /// Create an optional+computed bool attribute.
    pub fn optional_computed_bool() -> Self {
        Self::new(AttributeType::Bool, AttributeFlags::optional_computed())
    }

    /// Set a default value for this attribute.
    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// A set of attributes and nested blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Block {
    /// The attributes within this block.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, Attribute>,
    /// Nested blocks within this block.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub blocks: HashMap<String, NestedBlock>,
}

impl Block {
    /// Create a new empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute to this block.
    pub fn with_attribute(mut self, name: impl Into<String>, attr: Attribute) -> Self {
        self.attributes.insert(name.into(), attr);
        self
    }

    /// Add a nested block to this block.
    pub fn with_block(mut self, name: impl Into<String>, block: NestedBlock) -> Self {
        self.blocks.insert(name.into(), block);
        self
    }
}

/// A list-nested block with item-count constraints.
///
/// Every nested block in this schema is a list capped at one element:
/// the list shape exists only because the declared representation models
/// single nested objects that way, so element access is positional at
/// index zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedBlock {
    /// The block definition.
    #[serde(flatten)]
    pub block: Block,
    /// Minimum number of entries (1 when the block is required).
    #[serde(default)]
    pub min_items: u32,
    /// Maximum number of entries.
    #[serde(default)]
    pub max_items: u32,
}

impl NestedBlock {
    /// Create an optional single-entry nested block (0 or 1 entries).
    pub fn one(block: Block) -> Self {
        Self {
            block,
            min_items: 0,
            max_items: 1,
        }
    }

    /// Require exactly one entry.
    pub fn required(mut self) -> Self {
        self.min_items = 1;
        self
    }
}

/// Schema for the log source resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Schema {
    /// The version of this schema (for state upgrades).
    #[serde(default)]
    pub version: u64,
    /// The root block containing all attributes and nested blocks.
    #[serde(flatten)]
    pub block: Block,
}

impl Schema {
    /// Create a schema at version 0.
    pub fn v0() -> Self {
        Self::default()
    }

    /// Add an attribute to the schema.
    pub fn with_attribute(mut self, name: impl Into<String>, attr: Attribute) -> Self {
        self.block.attributes.insert(name.into(), attr);
        self
    }

    /// Add a nested block to the schema.
    pub fn with_block(mut self, name: impl Into<String>, block: NestedBlock) -> Self {
        self.block.blocks.insert(name.into(), block);
        self
    }
}

/// The declared attribute surface of the bucket-backed log source.
pub fn log_source_schema() -> Schema {
    let path = Block::new()
        .with_attribute("type", Attribute::required_string())
        .with_attribute("bucket_name", Attribute::required_string())
        .with_attribute("path_expression", Attribute::required_string());

    let authentication = Block::new()
        .with_attribute("type", Attribute::required_string())
        .with_attribute("role_arn", Attribute::required_string());

    let resources = Block::new()
        .with_attribute("service_type", Attribute::required_string())
        .with_block("path", NestedBlock::one(path).required())
        .with_block("authentication", NestedBlock::one(authentication).required());

    let third_party_ref =
        Block::new().with_block("resources", NestedBlock::one(resources).required());

    Schema::v0()
        .with_attribute("name", Attribute::required_string())
        .with_attribute("collector_id", Attribute::required_int64())
        .with_attribute("source_type", Attribute::required_string())
        .with_attribute("scan_interval", Attribute::required_int64())
        .with_attribute("content_type", Attribute::required_string())
        .with_attribute(
            "description",
            Attribute::optional_string().with_default(json!("")),
        )
        .with_attribute(
            "category",
            Attribute::optional_string().with_default(json!("")),
        )
        .with_attribute("timezone", Attribute::optional_computed_string())
        .with_attribute("paused", Attribute::optional_computed_bool())
        .with_attribute("cutoff_relative_time", Attribute::optional_computed_string())
        .with_attribute(
            "multiline_processing_enabled",
            Attribute::optional_computed_bool(),
        )
        .with_attribute("use_autoline_matching", Attribute::optional_computed_bool())
        .with_attribute("manual_prefix_regexp", Attribute::optional_computed_string())
        .with_attribute("url", Attribute::optional_computed_string())
        .with_block("third_party_ref", NestedBlock::one(third_party_ref))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_flags() {
        let required = AttributeFlags::required();
        assert!(required.required);
        assert!(!required.optional);
        assert!(!required.computed);

        let optional_computed = AttributeFlags::optional_computed();
        assert!(!optional_computed.required);
        assert!(optional_computed.optional);
        assert!(optional_computed.computed);
    }

    #[test]
    fn test_required_scalars() {
        let schema = log_source_schema();
        for name in ["name", "source_type", "content_type"] {
            let attr = &schema.block.attributes[name];
            assert!(attr.flags.required, "{} should be required", name);
            assert_eq!(attr.attr_type, AttributeType::String);
        }
        for name in ["collector_id", "scan_interval"] {
            let attr = &schema.block.attributes[name];
            assert!(attr.flags.required, "{} should be required", name);
            assert_eq!(attr.attr_type, AttributeType::Int64);
        }
    }

    #[test]
    fn test_computed_attributes_accept_server_values() {
        let schema = log_source_schema();
        for name in [
            "timezone",
            "paused",
            "cutoff_relative_time",
            "multiline_processing_enabled",
            "use_autoline_matching",
            "manual_prefix_regexp",
            "url",
        ] {
            let attr = &schema.block.attributes[name];
            assert!(attr.flags.optional, "{} should be optional", name);
            assert!(attr.flags.computed, "{} should be computed", name);
        }
    }

    #[test]
    fn test_defaults() {
        let schema = log_source_schema();
        assert_eq!(schema.block.attributes["description"].default, Some(json!("")));
        assert_eq!(schema.block.attributes["category"].default, Some(json!("")));
        assert_eq!(schema.block.attributes["name"].default, None);
    }

    #[test]
    fn test_nested_blocks_are_capped_at_one() {
        let schema = log_source_schema();

        let third_party_ref = &schema.block.blocks["third_party_ref"];
        assert_eq!(third_party_ref.max_items, 1);
        assert_eq!(third_party_ref.min_items, 0);

        let resources = &third_party_ref.block.blocks["resources"];
        assert_eq!(resources.max_items, 1);
        assert_eq!(resources.min_items, 1);

        let path = &resources.block.blocks["path"];
        assert_eq!(path.max_items, 1);
        assert_eq!(path.min_items, 1);
        assert!(path.block.attributes.contains_key("bucket_name"));

        let auth = &resources.block.blocks["authentication"];
        assert_eq!(auth.max_items, 1);
        assert_eq!(auth.min_items, 1);
        assert!(auth.block.attributes.contains_key("role_arn"));
    }
}

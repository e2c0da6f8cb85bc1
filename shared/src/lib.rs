use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ===== Workflow I/O =====

/// Payload HubSpot hands to a custom-code workflow action.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEvent {
    #[serde(default)]
    pub input_fields: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<EventObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<EventOrigin>,
}

/// The record that enrolled in the workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventObject {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub object_id: String,
    pub object_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventOrigin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portal_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_definition_id: Option<u64>,
}

impl WorkflowEvent {
    pub fn with_input(mut self, name: &str, value: &str) -> Self {
        self.input_fields.insert(name.to_string(), value.to_string());
        self
    }

    pub fn input(&self, name: &str) -> Option<&str> {
        self.input_fields.get(name).map(String::as_str)
    }

    pub fn object_id(&self) -> Option<&str> {
        self.object.as_ref().map(|o| o.object_id.as_str())
    }
}

/// What the action reports back through the workflow callback.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutput {
    pub output_fields: HashMap<String, serde_json::Value>,
}

impl ActionOutput {
    pub fn empty() -> Self {
        Self::default()
    }
}

// ===== Properties =====

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    pub name: String,
    #[serde(default)]
    pub options: Vec<PropertyOption>,
    /// Every other attribute the API returned; `to_update` picks the writable ones.
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

/// The writable subset of a property, as accepted by the update endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub options: Vec<PropertyOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_field: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation_formula: Option<String>,
}

impl PropertyDefinition {
    /// Everything the update endpoint accepts; read-only metadata such as
    /// `createdAt` or `hubspotDefined` is left out.
    pub fn to_update(&self) -> PropertyUpdate {
        let text = |key: &str| {
            self.attributes
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };
        let flag = |key: &str| self.attributes.get(key).and_then(|v| v.as_bool());

        PropertyUpdate {
            label: text("label"),
            property_type: text("type"),
            field_type: text("fieldType"),
            group_name: text("groupName"),
            description: text("description"),
            options: self.options.clone(),
            display_order: self.attributes.get("displayOrder").and_then(|v| v.as_i64()),
            hidden: flag("hidden"),
            form_field: flag("formField"),
            calculation_formula: text("calculationFormula"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyOption {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

impl PropertyOption {
    /// An option whose label doubles as its stored value.
    pub fn labelled(value: &str) -> Self {
        Self {
            label: value.to_string(),
            value: value.to_string(),
            description: None,
            display_order: None,
            hidden: None,
        }
    }
}

// ===== Search =====

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOperator {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    HasProperty,
    NotHasProperty,
    ContainsToken,
    NotContainsToken,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub property_name: String,
    pub operator: FilterOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterGroup {
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub filter_groups: Vec<FilterGroup>,
    pub sorts: Vec<String>,
    pub properties: Vec<String>,
    pub limit: u32,
    pub after: String,
}

impl SearchRequest {
    /// First record whose `property` equals `value`, returning only that property.
    pub fn first_match(property: &str, value: &str) -> Self {
        Self {
            filter_groups: vec![FilterGroup {
                filters: vec![Filter {
                    property_name: property.to_string(),
                    operator: FilterOperator::Eq,
                    value: Some(value.to_string()),
                }],
            }],
            sorts: vec![property.to_string()],
            properties: vec![property.to_string()],
            limit: 1,
            after: "0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub results: Vec<CrmObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CrmObject {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived: bool,
}

// ===== Associations =====

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectRef {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssociationInput {
    pub from: ObjectRef,
    pub to: ObjectRef,
    #[serde(rename = "type")]
    pub association_type: String,
}

impl AssociationInput {
    pub fn new(from_id: &str, to_id: &str, association_type: &str) -> Self {
        Self {
            from: ObjectRef { id: from_id.to_string() },
            to: ObjectRef { id: to_id.to_string() },
            association_type: association_type.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssociationBatch {
    pub inputs: Vec<AssociationInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssociationBatchResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

// HubSpot sends ids as numbers in some payloads and strings in others.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

//! Firestore REST request and response types
//!
//! Field values arrive in Firestore's typed encoding
//! (`{"integerValue": "2"}`, `{"arrayValue": {"values": [...]}}`, ...) and are
//! flattened here into plain JSON before being decoded into records.

use chrono::{DateTime, Utc};
use dnaret_common::{DnaretError, Result as CommonResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number};
use std::collections::BTreeMap;

/// A typed Firestore field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    BooleanValue(bool),
    /// int64 transmitted as a decimal string
    IntegerValue(String),
    DoubleValue(f64),
    TimestampValue(String),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(LatLng),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value::StringValue(value.into())
    }

    /// Flatten into plain JSON; `path` names the field for error messages
    pub fn to_json(&self, path: &str) -> CommonResult<serde_json::Value> {
        use serde_json::Value as Json;

        Ok(match self {
            Value::NullValue(()) => Json::Null,
            Value::BooleanValue(b) => Json::Bool(*b),
            Value::IntegerValue(raw) => {
                let n: i64 = raw
                    .parse()
                    .map_err(|_| DnaretError::invalid_value(path, format!("bad integer '{}'", raw)))?;
                Json::Number(n.into())
            }
            Value::DoubleValue(d) => Number::from_f64(*d)
                .map(Json::Number)
                .ok_or_else(|| DnaretError::invalid_value(path, "non-finite double"))?,
            Value::TimestampValue(s)
            | Value::StringValue(s)
            | Value::BytesValue(s)
            | Value::ReferenceValue(s) => Json::String(s.clone()),
            Value::GeoPointValue(p) => serde_json::json!({
                "latitude": p.latitude,
                "longitude": p.longitude,
            }),
            Value::ArrayValue(array) => Json::Array(
                array
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| v.to_json(&format!("{}[{}]", path, i)))
                    .collect::<CommonResult<Vec<_>>>()?,
            ),
            Value::MapValue(map) => Json::Object(fields_to_json(&map.fields, Some(path))?),
        })
    }
}

fn fields_to_json(
    fields: &BTreeMap<String, Value>,
    parent: Option<&str>,
) -> CommonResult<Map<String, serde_json::Value>> {
    let mut out = Map::new();
    for (key, value) in fields {
        let path = match parent {
            Some(p) => format!("{}.{}", p, key),
            None => key.clone(),
        };
        out.insert(key.clone(), value.to_json(&path)?);
    }
    Ok(out)
}

/// A stored document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name, `projects/{p}/databases/{d}/documents/{path}`
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub update_time: Option<DateTime<Utc>>,
}

impl Document {
    /// Last path segment of the resource name
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// The document as a plain key-value mapping
    pub fn to_mapping(&self) -> CommonResult<Map<String, serde_json::Value>> {
        fields_to_json(&self.fields, None)
    }
}

/// Response of a collection list call
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Body of a `:runQuery` call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQueryRequest {
    pub structured_query: StructuredQuery,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    pub from: Vec<CollectionSelector>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
}

impl StructuredQuery {
    /// Equality query on one field, ordered by document name
    pub fn field_equals(collection: &str, field: &str, value: Value, limit: Option<i32>) -> Self {
        Self {
            from: vec![CollectionSelector {
                collection_id: collection.to_string(),
            }],
            filter: Some(Filter {
                field_filter: FieldFilter {
                    field: FieldReference::new(field),
                    op: FieldOperator::Equal,
                    value,
                },
            }),
            order_by: vec![Order {
                field: FieldReference::new("__name__"),
                direction: Direction::Ascending,
            }],
            limit,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSelector {
    pub collection_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub field_filter: FieldFilter,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldFilter {
    pub field: FieldReference,
    pub op: FieldOperator,
    pub value: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReference {
    pub field_path: String,
}

impl FieldReference {
    pub fn new(path: &str) -> Self {
        Self {
            field_path: path.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldOperator {
    Equal,
}

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub field: FieldReference,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Ascending,
}

/// One element of the streamed `:runQuery` response array
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQueryResponse {
    #[serde(default)]
    pub document: Option<Document>,
    #[serde(default)]
    pub read_time: Option<String>,
}

/// Google API error envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorStatus {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

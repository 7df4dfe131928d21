use crate::errors::CampdirSerializationError;
use crate::{CampdirError, CampdirResult, CampdirValue};
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// A single record in a named collection.
///
/// Documents are schema-free: `fields` is a flat map of dynamic values, with
/// nesting expressed through [`CampdirValue::Map`]. The `create_time` /
/// `update_time` stamps are store metadata, not data fields, and are never
/// part of the serialized payload.
#[derive(Debug, PartialEq, Clone)]
pub struct CampdirDocument {
    pub id: String,
    pub fields: HashMap<String, CampdirValue>,
    pub create_time: Option<DateTime<Utc>>,
    pub update_time: Option<DateTime<Utc>>,
}

impl CampdirDocument {
    pub fn new(id: String) -> Self {
        Self {
            id,
            fields: HashMap::new(),
            create_time: None,
            update_time: None,
        }
    }

    pub fn with_field<S, V>(mut self, field_name: S, value: V) -> Self
    where
        S: AsRef<str>,
        V: Into<CampdirValue>,
    {
        self.fields
            .insert(field_name.as_ref().to_string(), value.into());
        self
    }

    pub fn field(&self, field_name: &str) -> Option<&CampdirValue> {
        self.fields.get(field_name)
    }
}

// Responses embed documents as one flat object: the id next to the data
// fields, metadata stamps omitted.
impl Serialize for CampdirDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry("id", &self.id)?;
        for (field_name, value) in &self.fields {
            map.serialize_entry(field_name, value)?;
        }
        map.end()
    }
}

/// Serializes an object into a [`CampdirDocument`].
///
/// The object must serialize to a JSON object. When `document_id` is `None`
/// and the object carries its own `id` field, that field becomes the document
/// id; otherwise the id is left empty for the store to generate.
pub fn to_document<T>(document_id: Option<&str>, obj: &T) -> CampdirResult<CampdirDocument>
where
    T: Serialize,
{
    let serialized = serde_json::to_value(obj)?;
    match serialized {
        serde_json::Value::Object(mut json_fields) => {
            let embedded_id = match json_fields.remove("id") {
                Some(serde_json::Value::String(id)) => Some(id),
                _ => None,
            };

            let id = document_id
                .map(|id| id.to_string())
                .or(embedded_id)
                .unwrap_or_default();

            Ok(CampdirDocument {
                id,
                fields: json_fields
                    .into_iter()
                    .map(|(field_name, value)| (field_name, CampdirValue::from_json(value)))
                    .collect(),
                create_time: None,
                update_time: None,
            })
        }
        other => Err(CampdirError::SerializeError(
            CampdirSerializationError::from_message(format!(
                "Expected a JSON object to become a document, got: {}",
                other
            )),
        )),
    }
}

/// Deserializes a [`CampdirDocument`] into an object.
///
/// The document id is exposed to the target type as an `id` field; types that
/// do not declare one simply ignore it.
pub fn from_document<T>(doc: &CampdirDocument) -> CampdirResult<T>
where
    for<'de> T: Deserialize<'de>,
{
    let mut json_fields: serde_json::Map<String, serde_json::Value> = doc
        .fields
        .iter()
        .map(|(field_name, value)| (field_name.clone(), value.clone().into_json()))
        .collect();

    json_fields
        .entry("id".to_string())
        .or_insert_with(|| serde_json::Value::String(doc.id.clone()));

    Ok(serde_json::from_value(serde_json::Value::Object(
        json_fields,
    ))?)
}

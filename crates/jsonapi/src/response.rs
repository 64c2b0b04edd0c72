//! Generic JSON:API response decoding and projection.
//!
//! Drupal answers a collection query with `"data": [...]` and a single
//! resource with `"data": {...}`. Both shapes normalize into a sequence of
//! untyped resource objects, which can then be projected into any typed
//! structure that mirrors the document.

use drupal_verify_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An untyped resource object: field name to JSON value.
pub type ResourceObject = Map<String, Value>;

/// The `data` member of a response, resolved once at decode time.
#[derive(Debug, Clone, PartialEq)]
pub enum DataPayload {
    /// `data` was a single object.
    Single(ResourceObject),
    /// `data` was an array of objects.
    Collection(Vec<ResourceObject>),
}

impl DataPayload {
    /// Classify a `data` value.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(object) => Ok(Self::Single(object)),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::Object(object) => Ok(object),
                    other => Err(unexpected_shape(json_kind(&other))
                        .with_metadata("index", index.to_string())),
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::Collection),
            other => Err(unexpected_shape(json_kind(&other))),
        }
    }

    /// Normalize into a sequence; a single object becomes one element.
    #[must_use]
    pub fn into_vec(self) -> Vec<ResourceObject> {
        match self {
            Self::Single(object) => vec![object],
            Self::Collection(items) => items,
        }
    }
}

/// The top-level `jsonapi` member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonApiInfo {
    /// Spec version, e.g. `1.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Free-form meta object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// A decoded response whose `data` is always a sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonApiResponse {
    data: Vec<ResourceObject>,
    jsonapi: Option<JsonApiInfo>,
}

impl JsonApiResponse {
    /// Decode a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let root: Value = serde_json::from_slice(body).map_err(|error| {
            ErrorEnvelope::unexpected(
                ErrorCode::new("jsonapi", "invalid_response"),
                format!("error decoding JSON:API response body: {error}"),
                ErrorClass::NonRetriable,
            )
        })?;
        let mut root = match root {
            Value::Object(root) => root,
            other => {
                let kind = json_kind(&other);
                return Err(ErrorEnvelope::unexpected(
                    ErrorCode::new("jsonapi", "invalid_response"),
                    format!("JSON:API response must be an object, found {kind}"),
                    ErrorClass::NonRetriable,
                )
                .with_metadata("kind", kind));
            },
        };

        let data = root.remove("data").ok_or_else(|| {
            ErrorEnvelope::unexpected(
                ErrorCode::new("jsonapi", "missing_data"),
                "missing 'data' key in JSON:API response",
                ErrorClass::NonRetriable,
            )
        })?;
        let data = DataPayload::from_value(data)?.into_vec();

        // A malformed `jsonapi` member is informational only.
        let jsonapi = root
            .remove("jsonapi")
            .and_then(|value| serde_json::from_value(value).ok());

        tracing::debug!(elements = data.len(), "decoded JSON:API response");
        Ok(Self { data, jsonapi })
    }

    /// Decode a response body that must hold exactly one resource.
    pub fn single_from_slice(body: &[u8]) -> Result<Self> {
        Self::from_slice(body)?.into_single()
    }

    /// Build a response from already-normalized resources.
    #[must_use]
    pub fn from_resources(data: Vec<ResourceObject>) -> Self {
        Self {
            data,
            jsonapi: None,
        }
    }

    /// Fail unless exactly one resource is present.
    pub fn ensure_single(&self) -> Result<()> {
        if self.data.len() == 1 {
            Ok(())
        } else {
            Err(cardinality_mismatch(self.data.len()))
        }
    }

    /// Keep the response only if exactly one resource is present.
    pub fn into_single(self) -> Result<Self> {
        self.ensure_single()?;
        Ok(self)
    }

    /// Resources in response order.
    #[must_use]
    pub fn data(&self) -> &[ResourceObject] {
        &self.data
    }

    /// Consume the response into its resources.
    #[must_use]
    pub fn into_data(self) -> Vec<ResourceObject> {
        self.data
    }

    /// The `jsonapi` member, if present and well-formed.
    #[must_use]
    pub const fn jsonapi(&self) -> Option<&JsonApiInfo> {
        self.jsonapi.as_ref()
    }

    /// Number of resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether there are no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The normalized envelope as a JSON value: `{"data": [...], "jsonapi": ...}`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut root = Map::new();
        root.insert(
            "data".to_string(),
            Value::Array(self.data.iter().cloned().map(Value::Object).collect()),
        );
        if let Some(value) = self
            .jsonapi
            .as_ref()
            .and_then(|jsonapi| serde_json::to_value(jsonapi).ok())
        {
            root.insert("jsonapi".to_string(), value);
        }
        Value::Object(root)
    }

    /// Convert the normalized envelope into a typed structure.
    ///
    /// Fields the target does not declare are ignored.
    pub fn project<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.to_value()).map_err(|error| {
            ErrorEnvelope::unexpected(
                ErrorCode::new("jsonapi", "projection_failed"),
                format!(
                    "unable to project JSON:API response into {}: {error}",
                    std::any::type_name::<T>()
                ),
                ErrorClass::NonRetriable,
            )
            .with_metadata("target", std::any::type_name::<T>())
        })
    }
}

pub(crate) fn cardinality_mismatch(found: usize) -> ErrorEnvelope {
    ErrorEnvelope::expected(
        ErrorCode::new("jsonapi", "cardinality_mismatch"),
        format!(
            "exactly one JSON:API data element is expected in the response, but found {found} element(s)"
        ),
    )
    .with_metadata("expected", "1")
    .with_metadata("found", found.to_string())
}

fn unexpected_shape(kind: &'static str) -> ErrorEnvelope {
    ErrorEnvelope::unexpected(
        ErrorCode::new("jsonapi", "unexpected_data_shape"),
        format!("unable to determine type of JSON:API key 'data': found {kind}"),
        ErrorClass::NonRetriable,
    )
    .with_metadata("kind", kind)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const STUB_RESPONSE: &str = r#"{
        "jsonapi": {
            "version": "1.0",
            "meta": { "links": { "self": { "href": "http://jsonapi.org/format/1.0/" } } }
        },
        "data": [
            { "type": "media--document", "id": "fd0b8969-ecc9-4a0d-81d3-537ba95bd5a8" }
        ]
    }"#;

    #[test]
    fn array_data_decodes_in_order() -> Result<()> {
        let body = json!({ "data": [{ "id": "a" }, { "id": "b" }, { "id": "c" }] }).to_string();
        let response = JsonApiResponse::from_slice(body.as_bytes())?;
        let ids: Vec<&str> = response
            .data()
            .iter()
            .filter_map(|object| object.get("id").and_then(Value::as_str))
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        Ok(())
    }

    #[test]
    fn object_data_becomes_one_element() -> Result<()> {
        let body = json!({ "data": { "type": "node--page", "id": "x" } }).to_string();
        let response = JsonApiResponse::single_from_slice(body.as_bytes())?;
        assert_eq!(response.len(), 1);
        Ok(())
    }

    #[test]
    fn jsonapi_member_is_retained() -> Result<()> {
        let response = JsonApiResponse::from_slice(STUB_RESPONSE.as_bytes())?;
        assert_eq!(
            response.jsonapi().and_then(|info| info.version.as_deref()),
            Some("1.0")
        );
        assert_eq!(response.to_value()["jsonapi"]["version"], json!("1.0"));
        Ok(())
    }

    #[test]
    fn decode_failures_carry_codes() {
        let cases: [(&str, &str); 5] = [
            ("not json", "invalid_response"),
            ("[1, 2]", "invalid_response"),
            (r#"{"links": {}}"#, "missing_data"),
            (r#"{"data": "nope"}"#, "unexpected_data_shape"),
            (r#"{"data": null}"#, "unexpected_data_shape"),
        ];
        for (body, code) in cases {
            let result = JsonApiResponse::from_slice(body.as_bytes());
            assert_eq!(
                result.err().map(|error| error.code),
                Some(ErrorCode::new("jsonapi", code)),
                "{body}"
            );
        }
    }

    #[test]
    fn non_object_array_elements_report_their_index() {
        let body = br#"{"data": [{"id": "a"}, 7]}"#;
        let error = JsonApiResponse::from_slice(body).err();
        assert_eq!(
            error.as_ref().and_then(|error| error.metadata_value("index")),
            Some("1")
        );
        assert_eq!(
            error.as_ref().and_then(|error| error.metadata_value("kind")),
            Some("number")
        );
    }

    #[test]
    fn single_reports_observed_count() {
        for body in [r#"{"data": []}"#, r#"{"data": [{}, {}]}"#] {
            let error = JsonApiResponse::single_from_slice(body.as_bytes()).err();
            assert_eq!(
                error.as_ref().map(|error| error.code.clone()),
                Some(ErrorCode::new("jsonapi", "cardinality_mismatch"))
            );
            assert_eq!(
                error.as_ref().and_then(|error| error.metadata_value("expected")),
                Some("1")
            );
        }
        let error = JsonApiResponse::single_from_slice(br#"{"data": [{}, {}]}"#).err();
        assert_eq!(
            error.as_ref().and_then(|error| error.metadata_value("found")),
            Some("2")
        );
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Names {
        data: Vec<Named>,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Named {
        id: String,
        attributes: NamedAttributes,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct NamedAttributes {
        name: String,
    }

    #[test]
    fn projection_matches_direct_decoding() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let body = json!({
            "data": [
                { "type": "taxonomy_term--genre", "id": "1", "attributes": { "name": "Maps", "weight": 3 } },
                { "type": "taxonomy_term--genre", "id": "2", "attributes": { "name": "Charts" } }
            ],
            "links": { "self": { "href": "http://localhost/jsonapi/taxonomy_term/genre" } }
        })
        .to_string();

        let projected: Names = JsonApiResponse::from_slice(body.as_bytes())?.project()?;
        let direct: Names = serde_json::from_slice(body.as_bytes())?;
        assert_eq!(projected, direct);
        Ok(())
    }

    #[test]
    fn projection_failure_names_the_target() {
        let response = JsonApiResponse::from_resources(vec![Map::new()]);
        let error = response.project::<Names>().err();
        assert_eq!(
            error.as_ref().map(|error| error.code.clone()),
            Some(ErrorCode::new("jsonapi", "projection_failed"))
        );
        assert!(
            error
                .as_ref()
                .and_then(|error| error.metadata_value("target"))
                .is_some_and(|target| target.ends_with("Names"))
        );
    }
}

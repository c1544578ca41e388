use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// JSON:API top-level document
#[derive(Debug, Serialize, ToSchema)]
pub struct JsonApiResponse<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub meta: Option<JsonApiMeta>,
}

impl<T> JsonApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data, meta: None }
    }

    pub fn with_meta(mut self, meta: JsonApiMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// JSON:API resource object
#[derive(Debug, Serialize, ToSchema)]
pub struct JsonApiResource<T> {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    pub attributes: T,
}

impl<T> JsonApiResource<T> {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>, attributes: T) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
            attributes,
        }
    }
}

/// Free-form meta object
#[derive(Debug, Default, Serialize)]
pub struct JsonApiMeta {
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl JsonApiMeta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the keys of a JSON object into the meta object
    pub fn with_extra(mut self, extra: Value) -> Self {
        if let Value::Object(map) = extra {
            self.extra.extend(map);
        }
        self
    }
}

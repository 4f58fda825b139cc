// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! OpenAPI 3 document types produced by the translator.
//!
//! Only the subset of the format the translator emits is modelled. All maps
//! are [`IndexMap`]s so that serialized key order follows insertion order,
//! which keeps the output stable and diffable.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// The OpenAPI version written to every document.
pub const OPENAPI_VERSION: &str = "3.0.0";

/// The API version written to every document's `info` block.
pub const DEFAULT_API_VERSION: &str = "1.0.0";

/// Media type used for every request and response body.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Name of the bearer security scheme registered in `components`.
pub const BEARER_AUTH: &str = "BearerAuth";

/// A complete OpenAPI document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// OpenAPI format version.
    pub openapi: String,

    /// Title and version of the described API.
    pub info: Info,

    /// Path templates mapped to their operations.
    pub paths: IndexMap<String, PathItem>,

    /// Shared definitions referenced from operations.
    pub components: Components,
}

impl Document {
    /// Creates an empty document with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            openapi: OPENAPI_VERSION.into(),
            info: Info {
                title: title.into(),
                version: DEFAULT_API_VERSION.into(),
            },
            paths: IndexMap::new(),
            components: Components::default(),
        }
    }

    /// Stores `operation` under `path` and `method`.
    ///
    /// Returns the operation it replaced, if the pair was already present.
    pub fn insert_operation(
        &mut self,
        path: String,
        method: String,
        operation: Operation,
    ) -> Option<Operation> {
        self.paths.entry(path).or_default().insert(method, operation)
    }
}

/// API title and version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Info {
    /// API title.
    pub title: String,

    /// API version.
    pub version: String,
}

/// Lowercase HTTP methods mapped to operations.
pub type PathItem = IndexMap<String, Operation>;

/// A security requirement: scheme name mapped to required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Shared component definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    /// Named schemas. Never populated by the translator.
    pub schemas: IndexMap<String, Schema>,

    /// Named responses. Never populated by the translator.
    pub responses: IndexMap<String, Response>,

    /// Named security schemes.
    pub security_schemes: IndexMap<String, SecurityScheme>,
}

/// A security scheme definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityScheme {
    /// Scheme type, e.g. `"http"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// HTTP authorization scheme, e.g. `"bearer"`.
    pub scheme: String,
}

impl SecurityScheme {
    /// HTTP bearer token authentication.
    #[must_use]
    pub fn bearer() -> Self {
        Self {
            kind: "http".into(),
            scheme: "bearer".into(),
        }
    }
}

/// One HTTP method on one path template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Short summary.
    pub summary: String,

    /// Longer description.
    pub description: String,

    /// Path parameters followed by query parameters.
    pub parameters: Vec<Parameter>,

    /// Status code (or `"default"`) mapped to response.
    pub responses: IndexMap<String, Response>,

    /// Security requirements; empty when the operation is unauthenticated.
    pub security: Vec<SecurityRequirement>,

    /// Request body, for methods that carry one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// A templated path segment.
    Path,
    /// A URL query parameter.
    Query,
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,

    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterLocation,

    /// Whether the parameter must be supplied.
    pub required: bool,

    /// Parameter schema.
    pub schema: Schema,

    /// Human-readable description.
    pub description: String,
}

/// A schema with an optional literal example.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    /// Schema type, e.g. `"string"` or `"object"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Example value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl Schema {
    /// A plain string schema.
    #[must_use]
    pub fn string() -> Self {
        Self {
            kind: "string".into(),
            example: None,
        }
    }

    /// An object schema annotated with `example`.
    #[must_use]
    pub fn object_example(example: Value) -> Self {
        Self {
            kind: "object".into(),
            example: Some(example),
        }
    }
}

/// Media type entry of a body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaType {
    /// Body schema.
    pub schema: Schema,
}

/// Media type name mapped to its entry.
pub type Content = IndexMap<String, MediaType>;

/// Builds a JSON content map whose object schema carries `example`.
#[must_use]
pub fn json_content(example: Value) -> Content {
    let mut content = Content::new();
    content.insert(
        JSON_MEDIA_TYPE.into(),
        MediaType {
            schema: Schema::object_example(example),
        },
    );
    content
}

/// An operation's request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    /// Accepted media types.
    pub content: Content,
}

/// An operation response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// Human-readable description.
    pub description: String,

    /// Returned media types, if documented.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

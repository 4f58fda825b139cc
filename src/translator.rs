// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Translation of a parsed [`Collection`] into an OpenAPI [`Document`].
//!
//! Every request item is translated on its own into a path template, a
//! lowercase method, and an [`Operation`]. The results are folded into the
//! document in collection order; when two items produce the same path and
//! method the later one replaces the earlier one entirely.
//!
//! # Mapping
//!
//! - `{{name}}` placeholders in the URL path become `{name}` path parameters
//! - Query parameters are deduplicated by name, first occurrence wins
//! - Raw JSON bodies of POST, PUT and PATCH requests become request body examples
//! - The first saved example response becomes the `200` response example
//! - An `Authorization` header marks the operation as bearer-authenticated
//!
//! # Example
//!
//! ```
//! use postman2openapi::collection::parse_collection;
//! use postman2openapi::translator::translate;
//!
//! let json = r#"{
//!     "info": { "name": "Users" },
//!     "item": [{
//!         "item": [{
//!             "name": "Get user",
//!             "request": { "method": "GET", "url": { "path": ["users", "{{id}}"] } }
//!         }]
//!     }]
//! }"#;
//!
//! let collection = parse_collection(json).unwrap();
//! let doc = translate(&collection).unwrap();
//!
//! let op = &doc.paths["/users/{id}"]["get"];
//! assert_eq!(op.summary, "Get user");
//! assert_eq!(op.parameters[0].name, "id");
//! ```

use crate::collection::{Collection, Header, QueryParam, RequestItem};
use crate::openapi::{
    BEARER_AUTH, Document, Operation, Parameter, ParameterLocation, RequestBody, Response, Schema,
    SecurityRequirement, SecurityScheme, json_content,
};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use snafu::prelude::*;
use std::collections::HashSet;

static DOUBLE_BRACE_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(.*?)\}\}").expect("Invalid regex"));
static PATH_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(.*?)\}").expect("Invalid regex"));

/// Methods whose requests may carry a body.
const BODY_METHODS: [&str; 3] = ["post", "put", "patch"];

/// Error type for translation failures.
#[derive(Debug, Snafu)]
pub enum TranslateError {
    /// A request's raw body is present but is not valid JSON.
    #[snafu(display("invalid JSON in request body of {item:?}: {source}"))]
    RequestBody {
        /// Name of the request item carrying the body.
        item: String,
        /// The underlying JSON parsing error.
        source: serde_json::Error,
    },

    /// A saved example response body is present but is not valid JSON.
    #[snafu(display("invalid JSON in example response of {item:?}: {source}"))]
    ResponseBody {
        /// Name of the request item carrying the response.
        item: String,
        /// The underlying JSON parsing error.
        source: serde_json::Error,
    },
}

/// A single request item translated in isolation.
struct TranslatedItem {
    path: String,
    method: String,
    operation: Operation,
    uses_bearer_auth: bool,
}

/// Translates a parsed collection into an OpenAPI document.
///
/// This is the main entry point for translation. Items without a request,
/// or whose request has no URL, are skipped.
///
/// # Errors
///
/// Returns an error if any request body or example response body is
/// present, non-empty, and not valid JSON. No partial document is returned.
pub fn translate(collection: &Collection) -> Result<Document, TranslateError> {
    let mut items = collection.item.iter().flat_map(|folder| &folder.item);

    items.try_fold(Document::new(&collection.info.name), |mut doc, item| {
        let Some(translated) = translate_item(item)? else {
            return Ok(doc);
        };

        if translated.uses_bearer_auth {
            doc.components
                .security_schemes
                .insert(BEARER_AUTH.into(), SecurityScheme::bearer());
        }
        doc.insert_operation(translated.path, translated.method, translated.operation);

        Ok(doc)
    })
}

fn translate_item(item: &RequestItem) -> Result<Option<TranslatedItem>, TranslateError> {
    let Some(request) = &item.request else {
        return Ok(None);
    };
    let Some(url) = &request.url else {
        return Ok(None);
    };

    let method = request
        .method
        .as_deref()
        .map_or_else(|| "get".to_owned(), str::to_lowercase);
    let path = path_template(&url.path);

    let mut parameters = path_parameters(&path);
    parameters.extend(query_parameters(&url.query));

    let request_body = match &request.body {
        Some(body) if BODY_METHODS.contains(&method.as_str()) => {
            let example = parse_example(body.raw.as_deref())
                .context(RequestBodySnafu { item: &item.name })?;
            Some(RequestBody {
                content: json_content(example),
            })
        }
        _ => None,
    };

    let mut responses = IndexMap::new();
    if let Some(sample) = item.response.first() {
        let example = parse_example(sample.body.as_deref())
            .context(ResponseBodySnafu { item: &item.name })?;
        responses.insert(
            "200".to_owned(),
            Response {
                description: "Successful response".into(),
                content: Some(json_content(example)),
            },
        );
    } else {
        responses.insert(
            "default".to_owned(),
            Response {
                description: "Default response".into(),
                content: None,
            },
        );
    }

    let uses_bearer_auth = has_authorization_header(&request.header);
    let security = if uses_bearer_auth {
        vec![SecurityRequirement::from([(BEARER_AUTH.to_owned(), Vec::new())])]
    } else {
        Vec::new()
    };

    Ok(Some(TranslatedItem {
        path,
        method,
        operation: Operation {
            summary: item.name.clone(),
            description: item.name.clone(),
            parameters,
            responses,
            security,
            request_body,
        },
        uses_bearer_auth,
    }))
}

/// Joins URL path segments into an OpenAPI path template.
///
/// Segments are joined literally with `/` and every `{{name}}` placeholder
/// is rewritten to `{name}`. An empty segment list yields `/`.
///
/// ```
/// use postman2openapi::translator::path_template;
///
/// let segments = ["users".to_owned(), "{{id}}".to_owned(), "orders".to_owned()];
/// assert_eq!(path_template(&segments), "/users/{id}/orders");
/// ```
#[must_use]
pub fn path_template(segments: &[String]) -> String {
    let joined = format!("/{}", segments.join("/"));
    DOUBLE_BRACE_PLACEHOLDER
        .replace_all(&joined, "{$1}")
        .into_owned()
}

/// Returns the names of all `{name}` placeholders in a path template.
///
/// Names are returned in order of appearance. A placeholder that occurs
/// twice is returned twice.
#[must_use]
pub fn path_parameter_names(template: &str) -> Vec<String> {
    PATH_PLACEHOLDER
        .find_iter(template)
        .map(|m| m.as_str().replace(['{', '}'], ""))
        .collect()
}

fn path_parameters(template: &str) -> Vec<Parameter> {
    path_parameter_names(template)
        .into_iter()
        .map(|name| Parameter {
            description: format!("Path parameter: {name}"),
            name,
            location: ParameterLocation::Path,
            required: true,
            schema: Schema::string(),
        })
        .collect()
}

/// Builds query parameters, keeping only the first entry for each name.
fn query_parameters(query: &[QueryParam]) -> Vec<Parameter> {
    let mut seen = HashSet::new();
    query
        .iter()
        .filter(|param| seen.insert(param.key.as_str()))
        .map(|param| Parameter {
            name: param.key.clone(),
            location: ParameterLocation::Query,
            required: !param.disabled,
            schema: Schema::string(),
            description: param.key.clone(),
        })
        .collect()
}

/// Parses raw example text strictly, treating absent or empty text as `{}`.
fn parse_example(raw: Option<&str>) -> Result<Value, serde_json::Error> {
    match raw {
        Some(text) if !text.is_empty() => serde_json::from_str(text),
        _ => Ok(Value::Object(serde_json::Map::new())),
    }
}

/// Only the header name is inspected; any `Authorization` header counts as
/// bearer authentication, whatever scheme its value names.
fn has_authorization_header(headers: &[Header]) -> bool {
    headers
        .iter()
        .any(|header| header.key.eq_ignore_ascii_case("authorization"))
}

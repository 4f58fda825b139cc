// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! JSON parsing for Postman collection exports.
//!
//! This module handles deserialization of the collection format produced by
//! Postman's export feature. Only the parts needed to describe an API are
//! modelled: folders of requests, their URLs, headers, raw bodies, and saved
//! example responses.
//!
//! # Format Overview
//!
//! A collection export contains:
//! - An `info` block carrying the collection's display name
//! - A list of folders, each holding a list of request items
//! - Each request item may carry a request and saved example responses
//!
//! Only two levels of grouping are understood. A top-level entry without an
//! `item` array is a parse error.
//!
//! # Example
//!
//! ```
//! use postman2openapi::collection::parse_collection;
//!
//! let json = r#"{
//!     "info": { "name": "Pet Store" },
//!     "item": [{
//!         "name": "Pets",
//!         "item": [{
//!             "name": "List pets",
//!             "request": { "method": "GET", "url": { "path": ["pets"] } }
//!         }]
//!     }]
//! }"#;
//!
//! let collection = parse_collection(json).unwrap();
//! assert_eq!(collection.info.name, "Pet Store");
//! assert_eq!(collection.item[0].item.len(), 1);
//! ```

use serde::Deserialize;
use snafu::prelude::*;

/// Error type for collection parsing failures.
#[derive(Debug, Snafu)]
pub enum ParseError {
    /// Failed to parse JSON content, or the JSON lacks the expected shape.
    #[snafu(display("failed to parse collection JSON: {source}"))]
    Json {
        /// The underlying JSON parsing error.
        source: serde_json::Error,
    },
}

/// The root structure of a Postman collection export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Collection {
    /// Collection metadata.
    pub info: Info,

    /// The top-level folders, in export order.
    pub item: Vec<Folder>,
}

/// Collection metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Info {
    /// The collection's display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// A folder grouping request items.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Folder {
    /// The folder's display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// The request items in this folder, in export order.
    pub item: Vec<RequestItem>,
}

/// A single saved request, with optional example responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RequestItem {
    /// The item's display name. Empty when the export omits it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// The HTTP request. Items without one are skipped during translation.
    #[serde(default)]
    pub request: Option<Request>,

    /// Saved example responses, in export order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: Vec<SampleResponse>,
}

/// An HTTP request definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Request {
    /// The HTTP method, in any letter case. `None` means GET.
    #[serde(default)]
    pub method: Option<String>,

    /// The request URL. Requests without one are skipped during translation.
    #[serde(default)]
    pub url: Option<Url>,

    /// Request headers, in export order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub header: Vec<Header>,

    /// The request body, if any.
    #[serde(default)]
    pub body: Option<Body>,
}

/// A request header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Header {
    /// Header name.
    pub key: String,

    /// Header value.
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,

    /// Whether the header is switched off in the collection.
    #[serde(default, deserialize_with = "null_as_default")]
    pub disabled: bool,
}

/// A request body.
///
/// Only raw bodies carry content; other modes (form data, files) leave
/// `raw` empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Body {
    /// Body mode, e.g. `"raw"` or `"formdata"`.
    #[serde(default)]
    pub mode: Option<String>,

    /// Raw body text, expected to hold JSON.
    #[serde(default)]
    pub raw: Option<String>,
}

/// A request URL broken into path segments and query parameters.
///
/// Postman writes URLs either as an object (`{"raw", "host", "path",
/// "query"}`) or as a bare string. Both forms deserialize into this type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Url {
    /// The URL as typed by the user, when present.
    pub raw: Option<String>,

    /// Path segments; placeholders appear as `{{name}}`.
    pub path: Vec<String>,

    /// Query parameters, in export order.
    pub query: Vec<QueryParam>,
}

/// A URL query parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QueryParam {
    /// Parameter name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,

    /// Example value.
    #[serde(default)]
    pub value: Option<String>,

    /// Whether the parameter is switched off in the collection.
    #[serde(default, deserialize_with = "null_as_default")]
    pub disabled: bool,
}

/// A saved example response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SampleResponse {
    /// The example's display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Raw response body text, expected to hold JSON.
    #[serde(default)]
    pub body: Option<String>,
}

/// Deserializes a field, treating an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Object form of a URL as it appears in the export.
#[derive(Deserialize)]
struct UrlObject {
    #[serde(default)]
    raw: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    path: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    query: Vec<QueryParam>,
}

impl<'de> Deserialize<'de> for Url {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        if let Some(raw) = value.as_str() {
            return Ok(Self::from_raw(raw));
        }

        let object: UrlObject = serde_json::from_value(value).map_err(serde::de::Error::custom)?;
        Ok(Self {
            raw: object.raw,
            path: object.path,
            query: object.query,
        })
    }
}

impl Url {
    /// Splits a raw URL string into path segments and query parameters.
    ///
    /// The scheme is dropped and the first remaining segment is taken as the
    /// host, which also covers `{{baseUrl}}/path` style URLs.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let without_fragment = raw.split('#').next().unwrap_or_default();
        let (location, query) = without_fragment
            .split_once('?')
            .unwrap_or((without_fragment, ""));
        let location = location
            .split_once("://")
            .map_or(location, |(_, rest)| rest);

        let path = location
            .split('/')
            .skip(1)
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
            .collect();

        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                QueryParam {
                    key: key.to_owned(),
                    value: Some(value.to_owned()),
                    disabled: false,
                }
            })
            .collect();

        Self {
            raw: Some(raw.to_owned()),
            path,
            query,
        }
    }
}

/// Parses a JSON string into a [`Collection`] structure.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or doesn't match the expected
/// collection shape (for example a missing `item` array).
pub fn parse_collection(json_str: &str) -> Result<Collection, ParseError> {
    serde_json::from_str(json_str).context(JsonSnafu)
}

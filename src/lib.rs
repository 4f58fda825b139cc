// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Convert Postman collection exports to OpenAPI 3 documents.
//!
//! This crate provides parsing and translation functionality for turning a
//! Postman collection (folders of saved HTTP requests with example
//! responses) into an OpenAPI description of the same API.
//!
//! # Overview
//!
//! Postman exports collections as JSON files. This crate:
//!
//! 1. Parses the JSON structure into typed Rust representations
//! 2. Translates the requests into OpenAPI paths, operations, parameters
//!    and security requirements
//!
//! Reading and writing files is left to the caller.
//!
//! # Example
//!
//! ```no_run
//! use postman2openapi::{collection, translator};
//!
//! let json = std::fs::read_to_string("postman_collection.json").unwrap();
//! let collection = collection::parse_collection(&json).unwrap();
//!
//! let document = translator::translate(&collection).unwrap();
//! println!("{}", serde_json::to_string_pretty(&document).unwrap());
//! ```
//!
//! # Modules
//!
//! - [`collection`]: JSON parsing and type definitions for Postman collections
//! - [`openapi`]: OpenAPI document types
//! - [`translator`]: Mapping from a collection to an OpenAPI document

#![deny(missing_docs)]

pub mod collection;
pub mod openapi;
pub mod translator;

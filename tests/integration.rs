// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Integration tests for postman2openapi parsing, translation and output.

use postman2openapi::{collection, translator};
use serde_json::json;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const SAMPLE_COLLECTION: &str = r#"{
    "info": { "name": "Shop API", "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json" },
    "item": [
        {
            "name": "Users",
            "item": [
                {
                    "name": "Get user",
                    "request": {
                        "method": "GET",
                        "header": [{ "key": "Authorization", "value": "Bearer {{token}}" }],
                        "url": {
                            "raw": "{{baseUrl}}/users/{{userId}}?expand=orders",
                            "host": ["{{baseUrl}}"],
                            "path": ["users", "{{userId}}"],
                            "query": [
                                { "key": "expand", "value": "orders" },
                                { "key": "fields", "value": "name", "disabled": true }
                            ]
                        }
                    },
                    "response": [
                        { "name": "Found", "code": 200, "body": "{\"id\": 7, \"name\": \"Ada\"}" }
                    ]
                },
                {
                    "name": "Create user",
                    "request": {
                        "method": "post",
                        "header": [{ "key": "Content-Type", "value": "application/json" }],
                        "body": { "mode": "raw", "raw": "{\"name\": \"Ada\"}" },
                        "url": { "path": ["users"] }
                    }
                }
            ]
        },
        {
            "name": "Misc",
            "item": [
                { "name": "Just a note" },
                { "name": "Broken request", "request": { "method": "GET" } },
                { "name": "Health", "request": { "url": "https://shop.example.com/health" } }
            ]
        }
    ]
}"#;

/// Translates the sample collection and compares the whole serialized document.
#[test]
fn translates_sample_collection() {
    let collection = collection::parse_collection(SAMPLE_COLLECTION).unwrap();
    let document = translator::translate(&collection).unwrap();
    let value = serde_json::to_value(&document).unwrap();

    let expected = json!({
        "openapi": "3.0.0",
        "info": { "title": "Shop API", "version": "1.0.0" },
        "paths": {
            "/users/{userId}": {
                "get": {
                    "summary": "Get user",
                    "description": "Get user",
                    "parameters": [
                        {
                            "name": "userId",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string" },
                            "description": "Path parameter: userId"
                        },
                        {
                            "name": "expand",
                            "in": "query",
                            "required": true,
                            "schema": { "type": "string" },
                            "description": "expand"
                        },
                        {
                            "name": "fields",
                            "in": "query",
                            "required": false,
                            "schema": { "type": "string" },
                            "description": "fields"
                        }
                    ],
                    "responses": {
                        "200": {
                            "description": "Successful response",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "example": { "id": 7, "name": "Ada" }
                                    }
                                }
                            }
                        }
                    },
                    "security": [{ "BearerAuth": [] }]
                }
            },
            "/users": {
                "post": {
                    "summary": "Create user",
                    "description": "Create user",
                    "parameters": [],
                    "responses": { "default": { "description": "Default response" } },
                    "security": [],
                    "requestBody": {
                        "content": {
                            "application/json": {
                                "schema": { "type": "object", "example": { "name": "Ada" } }
                            }
                        }
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Health",
                    "description": "Health",
                    "parameters": [],
                    "responses": { "default": { "description": "Default response" } },
                    "security": []
                }
            }
        },
        "components": {
            "schemas": {},
            "responses": {},
            "securitySchemes": {
                "BearerAuth": { "type": "http", "scheme": "bearer" }
            }
        }
    });

    assert_eq!(value, expected);
}

/// Tests that serialized keys follow collection order.
#[test]
fn output_preserves_collection_order() {
    let collection = collection::parse_collection(SAMPLE_COLLECTION).unwrap();
    let document = translator::translate(&collection).unwrap();
    let text = serde_json::to_string_pretty(&document).unwrap();

    let users = text.find("\"/users/{userId}\"").unwrap();
    let create = text.find("\"/users\":").unwrap();
    let health = text.find("\"/health\"").unwrap();
    assert!(users < create && create < health);
    assert!(text.starts_with("{\n  \"openapi\": \"3.0.0\""));
}

/// Tests that a malformed body aborts the whole translation.
#[test]
fn malformed_body_fails_whole_collection() {
    let json = r#"{
        "info": { "name": "Bad" },
        "item": [{
            "item": [
                { "name": "Fine", "request": { "url": { "path": ["ok"] } } },
                {
                    "name": "Bad body",
                    "request": {
                        "method": "PUT",
                        "body": { "mode": "raw", "raw": "{'single': 'quotes'}" },
                        "url": { "path": ["bad"] }
                    }
                }
            ]
        }]
    }"#;

    let collection = collection::parse_collection(json).unwrap();
    let err = translator::translate(&collection).unwrap_err();

    assert!(
        err.to_string().contains("Bad body"),
        "Error should name the request item: {err}"
    );
}

/// Tests that explicit nulls in optional fields behave like missing fields.
#[test]
fn null_fields_translate_like_absent_ones() {
    let json = r#"{
        "info": { "name": "Nulls" },
        "item": [{
            "item": [{
                "name": null,
                "request": {
                    "method": "GET",
                    "header": null,
                    "url": { "path": ["a"], "query": null }
                },
                "response": null
            }]
        }]
    }"#;

    let collection = collection::parse_collection(json).unwrap();
    let document = translator::translate(&collection).unwrap();
    let value = serde_json::to_value(&document).unwrap();

    assert_eq!(
        value["paths"],
        json!({
            "/a": {
                "get": {
                    "summary": "",
                    "description": "",
                    "parameters": [],
                    "responses": { "default": { "description": "Default response" } },
                    "security": []
                }
            }
        })
    );
}

fn run_cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_postman2openapi"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run postman2openapi")
}

/// Tests the default input and output paths and the confirmation line.
#[test]
fn cli_uses_default_paths() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("postman_collection.json"), SAMPLE_COLLECTION).unwrap();

    let output = run_cli(dir.path(), &[]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "OpenAPI JSON saved to openapi_output.json\n"
    );
    let written = fs::read_to_string(dir.path().join("openapi_output.json")).unwrap();
    assert!(written.contains("\n  \"paths\": {"), "Output should use 2-space indentation");
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["info"]["title"], "Shop API");
    assert!(!dir.path().join("openapi_output.json.tmp").exists());
}

/// Tests explicit paths, overwriting an existing file, and quiet mode.
#[test]
fn cli_overwrites_explicit_output_quietly() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("shop.json"), SAMPLE_COLLECTION).unwrap();
    fs::write(dir.path().join("api.json"), "stale").unwrap();

    let output = run_cli(dir.path(), &["shop.json", "-o", "api.json", "--quiet"]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let written = fs::read_to_string(dir.path().join("api.json")).unwrap();
    assert!(written.starts_with("{\n  \"openapi\""));
}

/// Tests writing the document to stdout.
#[test]
fn cli_writes_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("postman_collection.json"), SAMPLE_COLLECTION).unwrap();

    let output = run_cli(dir.path(), &["-o", "-"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["openapi"], "3.0.0");
    assert!(!dir.path().join("openapi_output.json").exists());
}

/// Tests that a missing input file is reported and nothing is written.
#[test]
fn cli_reports_missing_input() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_cli(dir.path(), &[]);

    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());
    assert!(!dir.path().join("openapi_output.json").exists());
}

/// Tests that a translation failure leaves an existing output file untouched.
#[test]
fn cli_failure_keeps_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let bad = r#"{
        "info": { "name": "Bad" },
        "item": [{ "item": [{ "name": "x", "response": [{ "body": "oops" }], "request": { "url": { "path": [] } } }] }]
    }"#;
    fs::write(dir.path().join("postman_collection.json"), bad).unwrap();
    fs::write(dir.path().join("openapi_output.json"), "previous").unwrap();

    let output = run_cli(dir.path(), &[]);

    assert!(!output.status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("openapi_output.json")).unwrap(),
        "previous"
    );
}

/// Tests that input lacking the folder array is rejected.
#[test]
fn cli_rejects_collection_without_items() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("postman_collection.json"), r#"{ "info": { "name": "x" } }"#).unwrap();

    let output = run_cli(dir.path(), &[]);

    assert!(!output.status.success());
    assert!(!dir.path().join("openapi_output.json").exists());
}

/// Tests that an output path without a file name is rejected without leftovers.
#[test]
fn cli_rejects_output_without_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let work = dir.path().join("work");
    fs::create_dir(&work).unwrap();
    fs::write(work.join("postman_collection.json"), SAMPLE_COLLECTION).unwrap();

    let output = run_cli(&work, &["-o", ".."]);

    assert!(!output.status.success());
    assert!(!dir.path().join(".tmp").exists());
    assert!(!work.join(".tmp").exists());
}

/// Tests that a failed rename removes the temporary file.
#[test]
fn cli_failed_write_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("postman_collection.json"), SAMPLE_COLLECTION).unwrap();
    fs::create_dir(dir.path().join("taken")).unwrap();
    fs::write(dir.path().join("taken").join("inner"), "keep").unwrap();

    let output = run_cli(dir.path(), &["-o", "taken"]);

    assert!(!output.status.success());
    assert!(!dir.path().join("taken.tmp").exists());
    assert!(dir.path().join("taken").join("inner").exists());
}

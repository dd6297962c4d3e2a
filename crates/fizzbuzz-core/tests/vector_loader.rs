//! JSON test vector loader for validation tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;
use std::fs;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ValidationVector {
    pub description: String,
    pub query: HashMap<String, String>,
    #[serde(default)]
    pub expect: Option<ExpectedRequest>,
    #[serde(default)]
    pub expect_error: Option<ExpectError>,
}

#[derive(Debug, Deserialize)]
pub struct ExpectedRequest {
    pub int1: i64,
    pub int2: i64,
    pub limit: i64,
    pub start: i64,
    pub str1: String,
    pub str2: String,
}

#[derive(Debug, Deserialize)]
pub struct ExpectError {
    pub field: String,
    pub has_constraint: bool,
}

pub fn load(name: &str) -> Vec<ValidationVector> {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).expect("invalid test vector file")
}

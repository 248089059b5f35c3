use std::collections::HashMap;

use serde::Deserialize;

pub const EXTRACTION_TESTS_FILE: &str = "tests/extraction_tests.toml";

#[derive(Deserialize, Debug, Clone)]
pub struct TestExtraction {
    pub sql: String,
    pub objects: Vec<String>,
    #[serde(default)]
    pub procedures: Vec<String>,
    /// Expected category label to object names, checked when present.
    #[serde(default)]
    pub categories: Option<HashMap<String, Vec<String>>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TestExtractionData {
    pub tests: Vec<TestExtraction>,
}

pub fn load_extraction_tests(path: &str) -> anyhow::Result<TestExtractionData> {
    let test_file = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&test_file)?)
}

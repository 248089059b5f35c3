use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use strum_macros::{Display, EnumString};

use crate::error::Error;
use crate::extractor::ExtractionOptions;

pub const INPUT_FILE_PATH: &str = "input_file_path";
pub const OUTPUT_FOLDER_PATH: &str = "output_folder_path";
pub const OUTPUT_FILE_NAME: &str = "output_file_name";
pub const EXTRA_RESERVED_KEYWORDS: &str = "extra_reserved_keywords";
pub const OUTPUT_FORMAT: &str = "output_format";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input_file_path: PathBuf,
    pub output_folder_path: PathBuf,
    pub output_file_name: String,
    pub extra_reserved_keywords: Vec<String>,
    pub output_format: OutputFormat,
}

/// Reads `key=value` lines. Keys and values are trimmed, the value is everything after the
/// first `=`, and lines without `=` are skipped. A repeated key keeps its last value.
pub fn parse_key_values(text: &str) -> IndexMap<String, String> {
    text.lines()
        .filter_map(|line| line.trim().split_once('='))
        .map(|(key, value)| (key.trim().to_owned(), value.trim().to_owned()))
        .collect()
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, Error> {
        let values = parse_key_values(text);
        let required = |key: &'static str| {
            values
                .get(key)
                .cloned()
                .ok_or(Error::MissingConfigKey(key))
        };

        let output_format = match values.get(OUTPUT_FORMAT) {
            Some(value) => value.parse().map_err(|_| Error::InvalidConfigValue {
                key: OUTPUT_FORMAT.to_owned(),
                value: value.clone(),
            })?,
            None => OutputFormat::default(),
        };

        Ok(Config {
            input_file_path: required(INPUT_FILE_PATH)?.into(),
            output_folder_path: required(OUTPUT_FOLDER_PATH)?.into(),
            output_file_name: required(OUTPUT_FILE_NAME)?,
            extra_reserved_keywords: values
                .get(EXTRA_RESERVED_KEYWORDS)
                .map(|list| {
                    list.split(',')
                        .map(|kw| kw.trim().to_owned())
                        .filter(|kw| !kw.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            output_format,
        })
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_folder_path.join(&self.output_file_name)
    }

    pub fn extraction_options(&self) -> ExtractionOptions {
        ExtractionOptions::default().with_extra_reserved_keywords(&self.extra_reserved_keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config = Config::parse(
            "# comment line without separator\n\
             input_file_path = scripts/load.sql\n\
             output_folder_path=out\n\
             output_file_name=objects.txt\n\
             unknown_key=1\n",
        )
        .unwrap();
        assert_eq!(config.input_file_path, PathBuf::from("scripts/load.sql"));
        assert_eq!(config.output_path(), PathBuf::from("out").join("objects.txt"));
        assert_eq!(config.output_format, OutputFormat::Text);
        assert!(config.extra_reserved_keywords.is_empty());
    }

    #[test]
    fn test_value_keeps_later_separators() {
        let values = parse_key_values("a=b=c\nnot a pair\n  k  =  v  ");
        assert_eq!(values.get("a").map(String::as_str), Some("b=c"));
        assert_eq!(values.get("k").map(String::as_str), Some("v"));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_missing_key() {
        let err = Config::parse("input_file_path=a.sql\noutput_folder_path=out").unwrap_err();
        assert!(matches!(err, Error::MissingConfigKey(OUTPUT_FILE_NAME)));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_optional_keys() {
        let config = Config::parse(
            "input_file_path=a.sql\noutput_folder_path=out\noutput_file_name=o.json\n\
             output_format=JSON\nextra_reserved_keywords=dual, qualify,,",
        )
        .unwrap();
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.extra_reserved_keywords, vec!["dual", "qualify"]);
        assert!(config.extraction_options().is_reserved("QUALIFY"));
    }

    #[test]
    fn test_invalid_output_format() {
        let err = Config::parse(
            "input_file_path=a.sql\noutput_folder_path=out\noutput_file_name=o\noutput_format=xml",
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }
}

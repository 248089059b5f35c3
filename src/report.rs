use std::fmt::Write as _;
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::categorizer::{Category, CategoryMap};
use crate::config::OutputFormat;
use crate::error::Error;

pub const REPORT_BANNER: &str = "===== CLASSIFIED DATABASE OBJECTS (SCHEMA INCLUDED) =====";

/// Categorized objects of one script plus its stored procedures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionReport {
    pub objects: CategoryMap,
    pub procedures: Vec<String>,
}

impl ExtractionReport {
    /// Object categories in priority order followed by `STORED_PROCEDURES`, which is always
    /// present even when empty.
    pub fn sections(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.objects
            .iter()
            .map(|(category, names)| (*category, names.as_slice()))
            .chain(std::iter::once((
                Category::StoredProcedures,
                self.procedures.as_slice(),
            )))
    }

    pub fn object_count(&self) -> usize {
        self.objects.values().map(Vec::len).sum()
    }

    pub fn to_text(&self) -> String {
        let mut out = format!("{}\n\n", REPORT_BANNER);
        for (category, names) in self.sections() {
            let mut names = names.to_vec();
            names.sort();
            // Writing into a String cannot fail.
            let _ = writeln!(out, "{} ({} items)", category, names.len());
            for name in names {
                let _ = writeln!(out, "  - {}", name);
            }
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.to_text(),
            // A map of strings to string lists always serializes.
            OutputFormat::Json => self.to_json(true).unwrap_or_default(),
        }
    }

    pub fn write_to(&self, path: &Path, format: OutputFormat) -> Result<(), Error> {
        std::fs::write(path, self.render(format)).map_err(|source| Error::OutputWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Serialize for ExtractionReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sections = self.sections().collect::<Vec<_>>();
        let mut map = serializer.serialize_map(Some(sections.len()))?;
        for (category, names) in sections {
            let mut names = names.to_vec();
            names.sort();
            map.serialize_entry(&category, &names)?;
        }
        map.end()
    }
}

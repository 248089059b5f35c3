use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::extractor::leaf_name;

/// Report sections. The display label is what appears in the rendered report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
)]
pub enum Category {
    #[strum(serialize = "LP_OBJECTS")]
    #[serde(rename = "LP_OBJECTS")]
    Lp,
    #[strum(serialize = "DDT_OBJECTS")]
    #[serde(rename = "DDT_OBJECTS")]
    Ddt,
    #[strum(serialize = "E_OBJECTS")]
    #[serde(rename = "E_OBJECTS")]
    E,
    #[strum(serialize = "SA_OBJECTS")]
    #[serde(rename = "SA_OBJECTS")]
    Sa,
    #[strum(serialize = "DW_OBJECTS")]
    #[serde(rename = "DW_OBJECTS")]
    Dw,
    #[strum(serialize = "OTHER Table/Views/SP's")]
    #[serde(rename = "OTHER Table/Views/SP's")]
    Other,
    /// Filled by the procedure extractor, never by [`categorize`].
    #[strum(serialize = "STORED_PROCEDURES")]
    #[serde(rename = "STORED_PROCEDURES")]
    StoredProcedures,
}

/// Name prefixes in priority order; the first prefix the leaf name starts with wins.
pub const PREFIX_RULES: &[(&str, Category)] = &[
    ("LP_", Category::Lp),
    ("DDT_", Category::Ddt),
    ("E_", Category::E),
    ("SA_", Category::Sa),
    ("DW_", Category::Dw),
];

pub type CategoryMap = IndexMap<Category, Vec<String>>;

pub fn category_of(object: &str) -> Category {
    let leaf = leaf_name(object);
    PREFIX_RULES
        .iter()
        .find(|(prefix, _)| leaf.starts_with(*prefix))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Other)
}

/// Groups resolved objects by prefix convention.
///
/// Only non-empty categories are present, in declaration order of [`Category`], and the
/// names inside each category are sorted.
pub fn categorize(objects: &HashSet<String>) -> CategoryMap {
    let mut grouped: IndexMap<Category, Vec<String>> = IndexMap::new();
    for obj in objects {
        grouped.entry(category_of(obj)).or_default().push(obj.clone());
    }

    Category::iter()
        .filter_map(|category| {
            grouped.swap_remove(&category).map(|mut names| {
                names.sort();
                (category, names)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_priority() {
        assert_eq!(category_of("LP_DW_STAGE"), Category::Lp);
        assert_eq!(category_of("STG.DDT_E_X"), Category::Ddt);
        assert_eq!(category_of("E_SA_X"), Category::E);
        assert_eq!(category_of("RAW.SA_ORDERS"), Category::Sa);
        assert_eq!(category_of("DW_FACT"), Category::Dw);
    }

    #[test]
    fn test_prefix_is_checked_on_leaf_only() {
        assert_eq!(category_of("LP_SCHEMA.ORDERS"), Category::Other);
        assert_eq!(category_of("XLP_ORDERS"), Category::Other);
        assert_eq!(category_of("LP"), Category::Other);
    }

    #[test]
    fn test_categorize_orders_sections_and_names() {
        let objects = ["OTHER_B", "DW_Z", "A.LP_2", "LP_1", "OTHER_A"]
            .iter()
            .map(|s| s.to_string())
            .collect::<HashSet<_>>();
        let categories = categorize(&objects);

        assert_eq!(
            categories.keys().copied().collect::<Vec<_>>(),
            vec![Category::Lp, Category::Dw, Category::Other]
        );
        assert_eq!(categories[&Category::Lp], vec!["A.LP_2", "LP_1"]);
        assert_eq!(categories[&Category::Other], vec!["OTHER_A", "OTHER_B"]);
        assert_eq!(
            categories.values().map(|v| v.len()).sum::<usize>(),
            objects.len()
        );
    }

    #[test]
    fn test_categorize_empty() {
        assert!(categorize(&HashSet::new()).is_empty());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Category::Other.to_string(), "OTHER Table/Views/SP's");
        assert_eq!(Category::StoredProcedures.as_ref(), "STORED_PROCEDURES");
        assert_eq!("DW_OBJECTS".parse::<Category>().unwrap(), Category::Dw);
    }
}

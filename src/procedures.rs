use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

static DEFINITION_RE: OnceLock<Regex> = OnceLock::new();
static INVOCATION_RE: OnceLock<Regex> = OnceLock::new();

/// Collects stored procedures that are defined (`create [or replace] procedure`) or invoked
/// (`exec`, `execute`, `call`) in normalized `sql`. Names are upper-cased, deduplicated
/// across definitions and invocations, and sorted.
pub fn extract_procedures(sql: &str) -> Vec<String> {
    let definition_re = DEFINITION_RE.get_or_init(|| {
        Regex::new(r"(?i)create\s+(?:or\s+replace\s+)?procedure\s+([\w.$]+)").unwrap()
    });
    let invocation_re = INVOCATION_RE
        .get_or_init(|| Regex::new(r"(?i)\b(?:exec|execute|call)\s+([\w.$]+)").unwrap());

    let procedures = [definition_re, invocation_re]
        .into_iter()
        .flat_map(|re| re.captures_iter(sql))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_uppercase())
        .collect::<BTreeSet<_>>();

    log::debug!("Found {} stored procedures", procedures.len());
    procedures.into_iter().collect()
}

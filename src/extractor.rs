use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

/// Words that can follow a rule's keyword phrase without being an object name,
/// e.g. `delete from where ...` in a truncated script or `... in (select ...)`.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "IF", "EXISTS", "THEN", "ELSE", "END", "CASE", "WHEN", "ON", "USING", "VALUES", "SELECT",
    "WHERE", "GROUP", "ORDER", "HAVING", "BY", "AS", "AND", "OR", "NOT", "IN", "IS", "NULL",
    "LIKE", "SET", "BEGIN", "DECLARE", "RETURN", "LOOP", "FOR", "WHILE", "BETWEEN", "DISTINCT",
    "TOP", "LIMIT", "FETCH", "OVER", "PARTITION", "INNER", "LEFT", "RIGHT", "FULL", "OUTER",
    "CROSS", "UNION", "EXCEPT", "INTERSECT", "ALL", "WITH", "DESC", "ASC", "INTO",
];

const IDENT: &str = r"([a-z0-9_.]+)";
const TABLE_KIND: &str = r"(?:transient\s+|temporary\s+)?";

/// Statement rules as `(name, keyword phrase)` pairs, evaluated independently. Each phrase
/// starts at a word boundary and ends right before the captured identifier; `{kind}` stands
/// for an optional `TRANSIENT` or `TEMPORARY` modifier.
pub const OBJECT_RULES: &[(&str, &str)] = &[
    ("from", r"from\s+"),
    ("join", r"join\s+"),
    ("update", r"update\s+"),
    ("insert_into", r"insert\s+into\s+{kind}"),
    ("merge_into", r"merge\s+into\s+{kind}"),
    ("delete_from", r"delete\s+from\s+"),
    ("truncate_table", r"truncate\s+table\s+{kind}"),
    ("alter_table", r"alter\s+table\s+{kind}"),
    ("create_table", r"create\s+(?:or\s+replace\s+)?{kind}table\s+"),
    ("create_view", r"create\s+(?:or\s+replace\s+)?view\s+"),
    ("drop_table", r"drop\s+table\s+{kind}"),
];

#[derive(Debug)]
pub struct ObjectRule {
    pub name: &'static str,
    pattern: Regex,
}

impl ObjectRule {
    fn new(name: &'static str, phrase: &str) -> Self {
        let pattern = format!(r"(?i)\b{}{}", phrase.replace("{kind}", TABLE_KIND), IDENT);
        Self {
            name,
            pattern: Regex::new(&pattern)
                .unwrap_or_else(|err| panic!("Invalid object rule {}: {}", name, err)),
        }
    }

    /// Yields every identifier this rule captures in `sql`, in text order.
    pub fn captures<'a>(&'a self, sql: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pattern
            .captures_iter(sql)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

static RULES: OnceLock<Vec<ObjectRule>> = OnceLock::new();

pub fn object_rules() -> &'static [ObjectRule] {
    RULES.get_or_init(|| {
        OBJECT_RULES
            .iter()
            .map(|(name, phrase)| ObjectRule::new(name, phrase))
            .collect()
    })
}

/// Options shared by the extraction stages of one run.
#[derive(Debug, Clone)]
pub struct ExtractionOptions {
    reserved_keywords: HashSet<String>,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            reserved_keywords: RESERVED_KEYWORDS.iter().map(|kw| kw.to_string()).collect(),
        }
    }
}

impl ExtractionOptions {
    /// Adds keywords on top of the built-in reserved set. Keywords are compared upper-cased.
    pub fn with_extra_reserved_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.reserved_keywords.extend(
            keywords
                .into_iter()
                .map(|kw| kw.as_ref().trim().to_uppercase())
                .filter(|kw| !kw.is_empty()),
        );
        self
    }

    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved_keywords.contains(word)
    }
}

/// Last `.`-separated segment of an object name, or the whole name if unqualified.
pub fn leaf_name(object: &str) -> &str {
    object.rsplit('.').next().unwrap_or(object)
}

fn clean_candidate(raw: &str) -> String {
    raw.trim().replace(';', "").to_uppercase()
}

/// Collects the object names referenced in already normalized `sql`.
///
/// Every rule runs over the whole text on its own, so an identifier following two
/// qualifying phrases (`delete from t` matches both `delete_from` and `from`) is captured
/// twice and collapses in the set.
pub fn extract_objects(sql: &str, options: &ExtractionOptions) -> HashSet<String> {
    let mut objects = HashSet::new();
    for rule in object_rules() {
        for raw in rule.captures(sql) {
            let candidate = clean_candidate(raw);
            if options.is_reserved(leaf_name(&candidate)) {
                log::debug!("Rule {} skipped reserved word {}", rule.name, candidate);
                continue;
            }
            log::debug!("Rule {} captured {}", rule.name, candidate);
            objects.insert(candidate);
        }
    }
    objects
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(sql: &str) -> HashSet<String> {
        extract_objects(sql, &ExtractionOptions::default())
    }

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_rule_table_is_complete() {
        let names = object_rules().iter().map(|r| r.name).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "from",
                "join",
                "update",
                "insert_into",
                "merge_into",
                "delete_from",
                "truncate_table",
                "alter_table",
                "create_table",
                "create_view",
                "drop_table"
            ]
        );
    }

    #[test]
    fn test_every_statement_rule() {
        let sql = "
            select * from a join b on a.id = b.id;
            update c set x = 1;
            insert into d select 1;
            insert into transient d2 select 1;
            merge into temporary e using f on 1 = 1;
            delete from g;
            truncate table h;
            alter table transient i add column z int;
            create or replace transient table j as select 1;
            create view k as select 1;
            create or replace view k2 as select 1;
            drop table temporary l;
        ";
        assert_eq!(
            extract(sql),
            set(&[
                "A", "B", "C", "D", "D2", "E", "G", "H", "I", "J", "K", "K2", "L"
            ])
        );
    }

    #[test]
    fn test_keeps_schema_qualification() {
        assert_eq!(
            extract("select * from db.sales.orders o join sales.items i on 1=1"),
            set(&["DB.SALES.ORDERS", "SALES.ITEMS"])
        );
    }

    #[test]
    fn test_strips_statement_terminator() {
        assert_eq!(extract("truncate table stage.t;"), set(&["STAGE.T"]));
    }

    #[test]
    fn test_reserved_words_are_filtered() {
        let objects = extract("delete from where; select * from (select 1) join select x in y");
        assert!(objects.is_empty(), "{:?}", objects);
        assert!(extract("select * from s.where").is_empty());
    }

    #[test]
    fn test_extra_reserved_keywords() {
        let options = ExtractionOptions::default().with_extra_reserved_keywords(["dual", " "]);
        assert!(extract_objects("select 1 from dual", &options).is_empty());
        assert_eq!(extract("select 1 from dual"), set(&["DUAL"]));
    }

    #[test]
    fn test_keyword_needs_word_boundary() {
        assert!(extract("select datefrom x, my_join y").is_empty());
    }

    #[test]
    fn test_uppercase_input_is_matched() {
        assert_eq!(extract("SELECT * FROM Foo"), set(&["FOO"]));
    }

    #[test]
    fn test_malformed_sql_finds_nothing() {
        assert!(extract("").is_empty());
        assert!(extract("from").is_empty());
        assert!(extract("insert into (").is_empty());
    }

    #[test]
    fn test_leaf_name() {
        assert_eq!(leaf_name("A.B.C"), "C");
        assert_eq!(leaf_name("C"), "C");
        assert_eq!(leaf_name("A."), "");
    }
}

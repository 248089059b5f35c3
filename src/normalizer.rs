use regex::Regex;
use std::sync::OnceLock;

static BLOCK_COMMENT_RE: OnceLock<Regex> = OnceLock::new();
static LINE_COMMENT_RE: OnceLock<Regex> = OnceLock::new();

/// Strips `/* ... */` and `--` comments from `sql` and lower-cases what is left.
///
/// Block comments are removed over the whole text before line comments are considered, so a
/// `--` that only survives inside a block comment never swallows the rest of its line. String
/// literals are not tokenized: a comment marker inside a literal still starts a comment.
/// An unterminated `/*` is kept as-is.
pub fn normalize_sql(sql: &str) -> String {
    let block_re = BLOCK_COMMENT_RE.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
    let line_re = LINE_COMMENT_RE.get_or_init(|| Regex::new(r"--.*").unwrap());

    let without_blocks = block_re.replace_all(sql, "");
    let without_lines = line_re.replace_all(&without_blocks, "");
    without_lines.to_lowercase()
}

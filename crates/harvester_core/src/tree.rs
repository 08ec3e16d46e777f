//! Safe navigation over schema-less response trees.
//!
//! Every accessor tolerates missing keys, wrong node types and out-of-range
//! indices; the `*_at` helpers fall back to an empty default.

use serde_json::Value;

/// One hop in a path through a response tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Key(&'static str),
    Index(usize),
    /// Last element of a list.
    Last,
}

pub type Path = &'static [Step];

pub fn at<'a>(node: &'a Value, path: &[Step]) -> Option<&'a Value> {
    path.iter().try_fold(node, |current, step| match step {
        Step::Key(key) => current.get(*key),
        Step::Index(idx) => current.get(*idx),
        Step::Last => current.as_array().and_then(|list| list.last()),
    })
}

pub fn str_at<'a>(node: &'a Value, path: &[Step]) -> Option<&'a str> {
    at(node, path).and_then(Value::as_str)
}

pub fn string_at(node: &Value, path: &[Step]) -> String {
    str_at(node, path).unwrap_or_default().to_string()
}

/// Non-empty string at `path`, used for identity fields.
pub fn id_at(node: &Value, path: &[Step]) -> Option<String> {
    str_at(node, path)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToOwned::to_owned)
}

pub fn list_at<'a>(node: &'a Value, path: &[Step]) -> &'a [Value] {
    at(node, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

pub fn text_at(node: &Value, path: &[Step]) -> String {
    at(node, path).map(text).unwrap_or_default()
}

pub fn count_at(node: &Value, path: &[Step]) -> u64 {
    match at(node, path) {
        Some(Value::Number(n)) => n.as_u64().unwrap_or_default(),
        Some(Value::String(s)) => parse_count(s),
        Some(other) => parse_count(&text(other)),
        None => 0,
    }
}

pub fn bool_at(node: &Value, path: &[Step]) -> bool {
    at(node, path).and_then(Value::as_bool).unwrap_or(false)
}

/// Dotted rendering of a path for diagnostics, e.g. `contents.tabs[0]`.
pub fn describe(path: &[Step]) -> String {
    let mut out = String::new();
    for step in path {
        match step {
            Step::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            Step::Index(idx) => out.push_str(&format!("[{idx}]")),
            Step::Last => out.push_str("[-1]"),
        }
    }
    out
}

/// Display text from any of the renderer text shapes:
/// a bare string, `simpleText`, `runs[*].text` or view-model `content`.
pub fn text(node: &Value) -> String {
    if let Some(s) = node.as_str() {
        return s.to_string();
    }
    if let Some(s) = node.get("simpleText").and_then(Value::as_str) {
        return s.to_string();
    }
    if let Some(runs) = node.get("runs").and_then(Value::as_array) {
        return runs
            .iter()
            .filter_map(|run| run.get("text").and_then(Value::as_str))
            .collect();
    }
    if let Some(s) = node.get("content").and_then(Value::as_str) {
        return s.to_string();
    }
    String::new()
}

/// Parse a display count such as `"1,234"`, `"1.2K"` or `"3M views"`.
/// Unparseable input counts as zero.
pub fn parse_count(raw: &str) -> u64 {
    let token = raw.split_whitespace().next().unwrap_or_default();
    let cleaned: String = token.chars().filter(|c| *c != ',').collect();
    let (number, multiplier) = match cleaned.chars().last() {
        Some('K') | Some('k') => (&cleaned[..cleaned.len() - 1], 1_000f64),
        Some('M') | Some('m') => (&cleaned[..cleaned.len() - 1], 1_000_000f64),
        Some('B') | Some('b') => (&cleaned[..cleaned.len() - 1], 1_000_000_000f64),
        _ => (cleaned.as_str(), 1f64),
    };
    number
        .parse::<f64>()
        .map(|n| (n * multiplier).round() as u64)
        .unwrap_or_default()
}

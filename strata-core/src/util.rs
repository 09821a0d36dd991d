use std::cmp::min;
use syn::Path;

/// Whether the trailing segments of `path` match `expect`: `Date`,
/// `time::Date` and `::time::Date` all match `["time", "Date"]`.
pub fn matches_path(path: &Path, expect: &[&str]) -> bool {
    let len = min(path.segments.len(), expect.len());
    path.segments
        .iter()
        .rev()
        .take(len)
        .map(|v| &v.ident)
        .eq(expect.iter().rev().take(len))
}

pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

/// Shortens long queries for error messages and logs.
pub fn truncate_long(query: &str) -> String {
    const LIMIT: usize = 497;
    if query.len() <= LIMIT {
        return query.to_string();
    }
    let end = (0..=LIMIT)
        .rev()
        .find(|i| query.is_char_boundary(*i))
        .unwrap_or(0);
    format!("{}...", query[..end].trim_end())
}

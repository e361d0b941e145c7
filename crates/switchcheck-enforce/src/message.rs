/// Sentinel appended when more uncovered constants exist than are shown.
pub const MORE: &str = "more";

/// Render uncovered constant names as `no case of A, B, and C`.
///
/// `truncated` appends the `more` sentinel. Two or more items put `and `
/// before the last one. Empty input (and no sentinel) renders as an empty
/// string; callers report nothing in that case.
pub fn format_missing(names: &[String], truncated: bool) -> String {
    let mut items: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
    if truncated {
        items.push(MORE);
    }
    match items.split_last() {
        None => String::new(),
        Some((last, [])) => format!("no case of {last}"),
        Some((last, init)) => format!("no case of {}, and {last}", init.join(", ")),
    }
}

//! Roster import: one student per line, `name[,contact]`.

/// Parse roster text into `(name, contact)` pairs.
///
/// Lines are trimmed; blank lines and lines with an empty name are skipped.
/// Columns after the second are ignored.
pub fn parse_roster(text: &str) -> Vec<(String, String)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let mut parts = line.split(',').map(str::trim);
            let name = parts.next().unwrap_or("");
            if name.is_empty() {
                return None;
            }
            let contact = parts.next().unwrap_or("");
            Some((name.to_string(), contact.to_string()))
        })
        .collect()
}

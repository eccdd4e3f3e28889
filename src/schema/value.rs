/// Parses user-edited text leniently.
///
/// The text is first attempted as a structured JSON parse (numbers, booleans,
/// arrays, objects); when that fails the raw string is stored verbatim.
/// Parameter defaults and constraints are loosely typed by design, so input
/// that fails to parse as structured data is never rejected.
pub fn parse_lenient(raw: &str) -> serde_json::Value {
    match serde_json::from_str(raw.trim()) {
        Ok(value) => value,
        Err(_) => serde_json::Value::String(raw.to_string()),
    }
}

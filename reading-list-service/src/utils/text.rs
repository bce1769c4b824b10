/// Last segment of a slash-delimited resource path (`/works/OL123W` -> `OL123W`).
pub fn work_key_from_path(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Two decimals, ties rounded away from zero (`4.125` -> `4.13`).
pub fn format_rating(average: f64) -> String {
    format!("{:.2}", (average * 100.0).round() / 100.0)
}

pub fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

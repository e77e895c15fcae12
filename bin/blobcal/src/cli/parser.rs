//! Parser functions for CLI arguments.

/// Parse a string slice into a [reqwest::Url].
pub fn parse_url(s: &str) -> Result<reqwest::Url, String> {
    reqwest::Url::parse(s).map_err(|e| format!("Invalid URL {s}: {e}"))
}

/// Parse a string slice into a positive, finite compression ratio.
pub fn parse_ratio(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(ratio) if ratio.is_finite() && ratio > 0.0 => Ok(ratio),
        Ok(ratio) => Err(format!("Compression ratio must be positive, got {ratio}")),
        Err(e) => Err(format!("Invalid compression ratio {s}: {e}")),
    }
}

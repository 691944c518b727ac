use crate::currency::ExchangeRate;
use crate::error_handling::*;
use std::fs;
use std::path::Path;
use tracing::info;

pub const DEFAULT_CONFIG_FILE: &str = "config.txt";

pub fn parse_rate(text: &str) -> Result<ExchangeRate> {
    text.parse()
}

/// Reads the rate from the first line of `path`. Anything after the first
/// line is ignored.
pub fn read_rate_file(path: &Path) -> Result<ExchangeRate> {
    let contents = fs::read_to_string(path).map_err(|source| CalcError::unreadable_config {
        path: path.display().to_string(),
        source,
    })?;
    let rate = parse_rate(contents.lines().next().unwrap_or_default())?;
    info!("loaded exchange rate {} from {}", rate, path.display());
    Ok(rate)
}

/// An explicitly supplied rate wins over the config file, which is then
/// never opened.
pub fn load_rate(explicit: Option<&str>, file: &Path) -> Result<ExchangeRate> {
    match explicit {
        Some(text) => {
            let rate = parse_rate(text)?;
            info!("using explicit exchange rate {}", rate);
            Ok(rate)
        },
        None => read_rate_file(file),
    }
}

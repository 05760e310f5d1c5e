use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ScanError;

static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("valid address regex"));

/// Accepts `0x` followed by exactly 40 hex characters, any case
pub fn validate_address(address: &str) -> Result<&str, ScanError> {
    if ADDRESS_RE.is_match(address) {
        Ok(address)
    } else {
        Err(ScanError::InvalidAddress(address.to_string()))
    }
}

use std::{env, time::Duration};

use crate::analyzers::liquidity::lockers;

mod defaults {
    pub const SCAN_STAGE_TIMEOUT_SECS: &str = "45";
}

/// Engine settings
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Time budget for identity resolution and for each analyzer
    pub stage_timeout: Duration,
    /// Lowercased addresses whose pair holdings count as locked
    pub known_lockers: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            stage_timeout: Duration::from_secs(45),
            known_lockers: lockers::defaults(),
        }
    }
}

impl ScanConfig {
    /// Read `SCAN_STAGE_TIMEOUT_SECS` and `KNOWN_LOCKERS` (comma separated)
    pub fn from_env() -> Result<Self, std::num::ParseIntError> {
        let stage_timeout = env::var("SCAN_STAGE_TIMEOUT_SECS")
            .unwrap_or(String::from(defaults::SCAN_STAGE_TIMEOUT_SECS))
            .parse::<u64>()
            .map(Duration::from_secs)?;

        let known_lockers = match env::var("KNOWN_LOCKERS") {
            Ok(list) => parse_lockers(&list),
            Err(_) => lockers::defaults(),
        };

        Ok(Self {
            stage_timeout,
            known_lockers,
        })
    }
}

fn parse_lockers(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lockers() {
        assert_eq!(
            parse_lockers(" 0xABC , ,0xdef"),
            vec!["0xabc".to_string(), "0xdef".to_string()]
        );
        assert!(parse_lockers("").is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = ScanConfig::default();
        assert_eq!(config.stage_timeout, Duration::from_secs(45));
        assert_eq!(config.known_lockers.len(), 4);
    }
}

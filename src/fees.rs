//! Taker fee table - per-exchange bps lookup with a safe default on miss.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

const DEFAULT_TAKER_BPS: u32 = 50;

/// Per-exchange taker fee schedule, in basis points.
#[derive(Debug, Clone)]
pub struct FeeTable {
    taker_bps: HashMap<String, u32>,
    default_bps: u32,
}

#[derive(Debug, Deserialize)]
struct FeeDocument {
    #[serde(default)]
    taker_bps: HashMap<String, u32>,
    /// Parsed for parity with the original fee schedule but unused by the
    /// core, which only ever takes liquidity.
    #[allow(dead_code)]
    #[serde(default)]
    maker_bps: HashMap<String, u32>,
}

impl FeeTable {
    pub fn new(taker_bps: HashMap<String, u32>) -> Self {
        Self {
            taker_bps,
            default_bps: DEFAULT_TAKER_BPS,
        }
    }

    pub fn with_default(mut self, default_bps: u32) -> Self {
        self.default_bps = default_bps;
        self
    }

    /// Taker fee in bps for `exchange`, or the configured safe default on miss.
    pub fn taker_bps(&self, exchange: &str) -> u32 {
        self.taker_bps
            .get(exchange)
            .copied()
            .unwrap_or(self.default_bps)
    }

    pub fn from_toml_str(s: &str) -> crate::core::Result<Self> {
        let doc: FeeDocument = toml::from_str(s)
            .map_err(|e| crate::core::Error::Config(format!("failed to parse fee table: {e}")))?;
        Ok(Self::new(doc.taker_bps))
    }

    pub fn load(path: impl AsRef<Path>) -> crate::core::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::core::Error::Config(format!("failed to read {path:?}: {e}")))?;
        Self::from_toml_str(&content)
    }
}

impl Default for FeeTable {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_default_on_miss() {
        let fees = FeeTable::default();
        assert_eq!(fees.taker_bps("unknown"), DEFAULT_TAKER_BPS);
    }

    #[test]
    fn returns_configured_value() {
        let mut m = HashMap::new();
        m.insert("binance".to_string(), 10);
        let fees = FeeTable::new(m);
        assert_eq!(fees.taker_bps("binance"), 10);
        assert_eq!(fees.taker_bps("okx"), DEFAULT_TAKER_BPS);
    }

    #[test]
    fn loads_from_toml() {
        let fees = FeeTable::from_toml_str(
            r#"
            [taker_bps]
            binance = 10
            okx = 15
            "#,
        )
        .unwrap();
        assert_eq!(fees.taker_bps("binance"), 10);
        assert_eq!(fees.taker_bps("okx"), 15);
        assert_eq!(fees.taker_bps("kraken"), DEFAULT_TAKER_BPS);
    }

    #[test]
    fn custom_default_applies() {
        let fees = FeeTable::default().with_default(25);
        assert_eq!(fees.taker_bps("unknown"), 25);
    }
}

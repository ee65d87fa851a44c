//! Configuration - runtime thresholds consumed by the scanners, plus
//! host-only fields carried through unused (rest_poll_ms, dashboard_*).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Immutable for the life of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// AUD cap on direct-arb notional.
    pub max_trade_aud: Decimal,
    /// Emission threshold on `net_bps` for both scanners.
    pub min_profit_bps_after_fees: Decimal,
    /// Emission threshold on confidence, in [0, 1].
    pub min_confidence: f64,
    /// Freshness window in milliseconds.
    pub stale_ms: u64,
    /// Extra bps deducted as slippage allowance, beyond fees.
    pub slippage_bps_buffer: Decimal,
    /// Notional propagated through the triangular scanner.
    pub tri_start_aud: Decimal,

    /// Host-side only; not read by the core. Poll interval for REST adapters.
    #[serde(default = "RuntimeConfig::default_rest_poll_ms")]
    pub rest_poll_ms: u64,
    /// Host-side only; not read by the core.
    #[serde(default = "RuntimeConfig::default_dashboard_host")]
    pub dashboard_host: String,
    /// Host-side only; not read by the core.
    #[serde(default = "RuntimeConfig::default_dashboard_port")]
    pub dashboard_port: u16,
}

impl RuntimeConfig {
    fn default_rest_poll_ms() -> u64 {
        1000
    }

    fn default_dashboard_host() -> String {
        "127.0.0.1".to_string()
    }

    fn default_dashboard_port() -> u16 {
        8080
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> crate::core::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::core::Error::Config(format!("failed to read {path:?}: {e}")))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> crate::core::Result<Self> {
        toml::from_str(s)
            .map_err(|e| crate::core::Error::Config(format!("failed to parse runtime config: {e}")))
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_trade_aud: Decimal::from(10_000),
            min_profit_bps_after_fees: Decimal::from(15),
            min_confidence: 0.5,
            stale_ms: 5_000,
            slippage_bps_buffer: Decimal::from(5),
            tri_start_aud: Decimal::from(1_000),
            rest_poll_ms: Self::default_rest_poll_ms(),
            dashboard_host: Self::default_dashboard_host(),
            dashboard_port: Self::default_dashboard_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_minimal_toml() {
        let cfg = RuntimeConfig::from_toml_str(
            r#"
            max_trade_aud = "10000"
            min_profit_bps_after_fees = "0"
            min_confidence = 0.0
            stale_ms = 5000
            slippage_bps_buffer = "0"
            tri_start_aud = "1000"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.rest_poll_ms, 1000);
        assert_eq!(cfg.dashboard_port, 8080);
        assert_eq!(cfg.max_trade_aud, Decimal::from(10_000));
    }

    #[test]
    fn default_is_runnable_without_a_config_file() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.min_confidence, 0.5);
        assert_eq!(cfg.stale_ms, 5_000);
        assert_eq!(cfg.dashboard_port, 8080);
    }
}

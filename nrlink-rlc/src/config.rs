//! UM entity configuration.

use nrlink_common::Result;
use serde::{Deserialize, Serialize};

/// Configuration for one [`crate::RlcUmEntity`].
///
/// All fields have defaults matching a typical data-radio-bearer setup, so
/// a YAML document only needs to name the fields it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RlcUmConfig {
    /// Maximum bytes buffered on the transmit side before SDUs are dropped.
    pub max_tx_buffer_size: usize,
    /// t-Reordering duration in milliseconds.
    pub reordering_timer_ms: u64,
    /// Reordering window size in sequence numbers. Half the SN space.
    pub window_size: u16,
    /// Drop the head-of-line SDU when its queueing delay exceeds the
    /// discard timer, checked on each new submission.
    pub enable_pdcp_discarding: bool,
    /// Discard timer in milliseconds; 0 means fall back to
    /// `packet_delay_budget_ms`.
    pub discard_timer_ms: u64,
    /// Packet delay budget of the bearer, in milliseconds.
    pub packet_delay_budget_ms: u64,
    /// Deliver reassembled SDUs without waiting for the reordering timer.
    pub out_of_order_delivery: bool,
}

impl Default for RlcUmConfig {
    fn default() -> Self {
        Self {
            max_tx_buffer_size: 10 * 1024,
            reordering_timer_ms: 100,
            window_size: 512,
            enable_pdcp_discarding: true,
            discard_timer_ms: 0,
            packet_delay_budget_ms: 100,
            out_of_order_delivery: false,
        }
    }
}

impl RlcUmConfig {
    /// Parses a configuration from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Effective discard timer, applying the delay-budget fallback.
    pub fn effective_discard_timer_ms(&self) -> u64 {
        if self.discard_timer_ms > 0 {
            self.discard_timer_ms
        } else {
            self.packet_delay_budget_ms
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = RlcUmConfig::default();
        assert_eq!(cfg.max_tx_buffer_size, 10240);
        assert_eq!(cfg.reordering_timer_ms, 100);
        assert_eq!(cfg.window_size, 512);
        assert!(cfg.enable_pdcp_discarding);
        assert!(!cfg.out_of_order_delivery);
        assert_eq!(cfg.effective_discard_timer_ms(), 100);
    }

    #[test]
    fn test_from_yaml_partial_override() {
        let cfg = RlcUmConfig::from_yaml("reordering_timer_ms: 40\ndiscard_timer_ms: 50\n")
            .unwrap();
        assert_eq!(cfg.reordering_timer_ms, 40);
        assert_eq!(cfg.effective_discard_timer_ms(), 50);
        assert_eq!(cfg.window_size, 512);
    }

    #[test]
    fn test_from_yaml_rejects_unknown_field() {
        assert!(RlcUmConfig::from_yaml("reordering_tmr_ms: 40\n").is_err());
    }
}

//! Runtime configuration for a [`crate::decoder::Decoder`].
//!
//! Stands in for the reference implementation's compile-time
//! `F_INTERRUPTS`/`IRMP_SUPPORT_*` macros: a value built once by the host and
//! passed to `Decoder::new`, from which every timing window in the
//! descriptor table is derived.

use serde::{Deserialize, Serialize};

use crate::error::DecoderConfigError;
use crate::protocol::ProtocolSet;

/// Canonical sample rate used throughout the reference timing diagrams.
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 10_000;

/// Timeout while waiting for a start pause or mid-frame data, in
/// milliseconds, for every protocol except Nikon (which uses a longer gap
/// between its start pulses).
const TIMEOUT_MS: f64 = 16.5;
const TIMEOUT_NIKON_MS: f64 = 29.0;
const NEC_FRAME_REPEAT_PAUSE_MAX_MS: f64 = 50.0;
const KEY_REPETITION_MS: f64 = 150.0;
const AUTO_FRAME_REPETITION_MS: f64 = 350.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    pub sample_rate_hz: u32,
    pub enabled: ProtocolSet,
    pub(crate) timeout_ticks: u32,
    pub(crate) timeout_nikon_ticks: u32,
    pub(crate) nec_frame_repeat_pause_ticks_max: u32,
    pub(crate) key_repetition_ticks: u32,
    pub(crate) auto_frame_repetition_ticks: u32,
}

impl DecoderConfig {
    /// Build a configuration at the canonical 10 kHz sample rate with every
    /// protocol enabled.
    pub fn new() -> Self {
        Self::build(DEFAULT_SAMPLE_RATE_HZ, ProtocolSet::ALL)
            .expect("default configuration is always valid")
    }

    pub fn with_sample_rate(sample_rate_hz: u32) -> Result<Self, DecoderConfigError> {
        Self::build(sample_rate_hz, ProtocolSet::ALL)
    }

    pub fn with_protocols(enabled: ProtocolSet) -> Result<Self, DecoderConfigError> {
        Self::build(DEFAULT_SAMPLE_RATE_HZ, enabled)
    }

    pub fn build(sample_rate_hz: u32, enabled: ProtocolSet) -> Result<Self, DecoderConfigError> {
        if sample_rate_hz == 0 {
            return Err(DecoderConfigError::ZeroSampleRate);
        }
        if enabled.is_empty() {
            return Err(DecoderConfigError::NoProtocolsEnabled);
        }

        let ticks = |ms: f64| -> u32 { (sample_rate_hz as f64 * ms / 1000.0 + 0.5) as u32 };

        Ok(DecoderConfig {
            sample_rate_hz,
            enabled,
            timeout_ticks: ticks(TIMEOUT_MS),
            timeout_nikon_ticks: ticks(TIMEOUT_NIKON_MS),
            nec_frame_repeat_pause_ticks_max: ticks(NEC_FRAME_REPEAT_PAUSE_MAX_MS),
            key_repetition_ticks: ticks(KEY_REPETITION_MS),
            auto_frame_repetition_ticks: ticks(AUTO_FRAME_REPETITION_MS),
        })
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sample_rate_is_rejected() {
        assert_eq!(
            DecoderConfig::with_sample_rate(0),
            Err(DecoderConfigError::ZeroSampleRate)
        );
    }

    #[test]
    fn empty_protocol_set_is_rejected() {
        assert_eq!(
            DecoderConfig::with_protocols(ProtocolSet::empty()),
            Err(DecoderConfigError::NoProtocolsEnabled)
        );
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = DecoderConfig::new();
        assert_eq!(cfg.sample_rate_hz, DEFAULT_SAMPLE_RATE_HZ);
        assert!(cfg.timeout_ticks > 0);
    }
}

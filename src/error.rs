//! Error types surfaced to callers of this crate.
//!
//! Per the design notes, decoding itself never fails visibly beyond "no
//! frame returned" — the only fallible operation is building a decoder from
//! a configuration.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecoderConfigError {
    #[error("sample rate must be greater than zero")]
    ZeroSampleRate,

    #[error("no protocols enabled in configuration")]
    NoProtocolsEnabled,
}

//! A multi-protocol infrared remote-control frame decoder core.
//!
//! Consumes a tick-synchronous stream of active-low IR receiver samples and
//! reconstructs the logical frames emitted by consumer remotes across some
//! thirty historically incompatible wire protocols (SIRCS, the NEC family,
//! Samsung, Matsushita, Kaseikyo, RECS80/EXT, RC5/RC6/RC6A, Denon, Apple,
//! Nubert, Bang & Olufsen, Grundig/Nokia/IR60, Siemens/Ruwido, FDC, RCCAR,
//! JVC, Thomson, Nikon, Kathrein, Netbox, LEGO).
//!
//! Build a [`Decoder`] from a [`DecoderConfig`], feed it one sample per
//! call to [`Decoder::tick`], and retrieve completed frames with
//! [`Decoder::get_data`]:
//!
//! ```
//! use irmp_core::{Decoder, DecoderConfig};
//!
//! let mut decoder = Decoder::new(DecoderConfig::new());
//! while let Some(sample) = next_sample() {
//!     if decoder.tick(sample) {
//!         if let Some(frame) = decoder.get_data() {
//!             println!("{:?} address={:#x} command={:#x}", frame.protocol, frame.address, frame.command);
//!         }
//!     }
//! }
//! # fn next_sample() -> Option<bool> { None }
//! ```

mod config;
mod decoder;
mod error;
mod frame;
mod protocol;
mod table;

pub use config::DecoderConfig;
pub use decoder::Decoder;
pub use error::DecoderConfigError;
pub use frame::Frame;
pub use protocol::{FrameFlags, Protocol, ProtocolSet};

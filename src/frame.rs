//! The decoded output of a completed, validated frame.

use serde::{Deserialize, Serialize};

use crate::protocol::{FrameFlags, Protocol};

/// A single decoded remote-control frame, latched by the decoder and
/// retrieved once via [`crate::decoder::Decoder::get_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub protocol: Protocol,
    pub address: u16,
    pub command: u16,
    pub flags: FrameFlags,
    /// `false` only for a LEGO frame whose nibble checksum failed; every
    /// other protocol always publishes `true` (a checksum failure elsewhere
    /// drops the frame instead of publishing it, see `decoder::validate`).
    pub checksum_valid: bool,
}

impl Frame {
    pub fn new(protocol: Protocol, address: u16, command: u16) -> Self {
        Frame {
            protocol,
            address,
            command,
            flags: FrameFlags::empty(),
            checksum_valid: true,
        }
    }

    pub fn is_repetition(&self) -> bool {
        self.flags.contains(FrameFlags::REPETITION)
    }
}

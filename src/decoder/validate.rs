//! Per-protocol frame validation, run once a frame is fully decoded and
//! before it is latched. See §4.9. Returns `None` to drop the frame
//! silently (a validation failure, or an internal start/sync frame that is
//! never meant to reach the consumer).

use crate::frame::Frame;
use crate::protocol::Protocol;

use super::state::DecoderState;

pub struct ValidationContext {
    /// Held first half of a Denon frame pair, awaiting its complement.
    pub pending_denon_command: Option<u16>,
}

impl ValidationContext {
    pub fn new() -> Self {
        ValidationContext { pending_denon_command: None }
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn validate(state: &DecoderState, ctx: &mut ValidationContext) -> Option<Frame> {
    let d = state.active?;
    let address = state.tmp_address;
    let mut command = state.tmp_command;

    match d.protocol {
        Protocol::Nec => {
            let lo = command & 0xFF;
            let hi = (command >> 8) & 0xFF;
            if hi != (!lo) & 0xFF {
                return None;
            }
            // Apple remotes are plain NEC frames with a fixed address and
            // the payload packed into the command field.
            if address == 0x87EE {
                return Some(finish(Protocol::Apple, (command >> 8) as u16 & 0xFF, command as u16 & 0xFF));
            }
            Some(finish(Protocol::Nec, address as u16, lo as u16))
        }
        Protocol::Nec16 => {
            let lo = command & 0xFF;
            let hi = (command >> 8) & 0xFF;
            if hi != (!lo) & 0xFF {
                return None;
            }
            Some(finish(Protocol::Nec16, address as u16, lo as u16))
        }
        Protocol::Samsung => {
            let lo = command & 0xFF;
            let hi = (command >> 8) & 0xFF;
            if hi != (!lo) & 0xFF {
                return None;
            }
            command = (state.tmp_id << 8) | lo;
            Some(finish(Protocol::Samsung, address as u16, command as u16))
        }
        Protocol::Samsung32 => Some(finish(Protocol::Samsung32, address as u16, command as u16)),
        Protocol::Siemens => {
            if (command & 0x1) == ((command >> 1) & 0x1) {
                return None;
            }
            command >>= 1;
            Some(finish(Protocol::Siemens, address as u16, command as u16))
        }
        Protocol::Kathrein => {
            if command == 0 {
                return None;
            }
            Some(finish(Protocol::Kathrein, address as u16, command as u16))
        }
        Protocol::Rc5 => {
            let address = address & !0x20;
            Some(finish(Protocol::Rc5, address as u16, command as u16))
        }
        Protocol::Ir60 => {
            if command == 0x7D {
                return None;
            }
            Some(finish(Protocol::Ir60, address as u16, command as u16))
        }
        // The descriptor's address/command bit offsets already carve the
        // 13-bit field into its 2-bit address and 11-bit (V, C1C0, D7..D0)
        // command; no further rearrangement is needed here.
        Protocol::Rccar => Some(finish(Protocol::Rccar, address as u16, command as u16)),
        Protocol::Netbox => {
            if address & 0x1000 == 0 {
                return None;
            }
            let low5 = address & 0x1F;
            if low5 != 0b10101 && low5 != 0b10000 {
                return None;
            }
            let mut frame = finish(Protocol::Netbox, 0, ((address >> 5) & 0x7F) as u16);
            if low5 == 0b10000 {
                frame.flags |= crate::protocol::FrameFlags::RELEASE;
            }
            Some(frame)
        }
        Protocol::Lego => {
            let nibble0 = command & 0xF;
            let nibble1 = (command >> 4) & 0xF;
            let nibble2 = (command >> 8) & 0xF;
            let nibble3 = (command >> 12) & 0xF;
            let expected = 0xF ^ nibble3 ^ nibble2 ^ nibble1;
            let stripped = command >> 4;
            let mut frame = finish(Protocol::Lego, address as u16, stripped as u16);
            frame.checksum_valid = expected == nibble0;
            Some(frame)
        }
        Protocol::Kaseikyo => {
            let x0 = state.xor_check[0];
            let x1 = state.xor_check[1];
            let customer_id_xor = (x0 & 0xF) ^ (x0 >> 4) ^ (x1 & 0xF) ^ (x1 >> 4);
            if customer_id_xor != (state.xor_check[2] & 0xF) {
                return None;
            }
            let parity = state.xor_check[2] ^ state.xor_check[3] ^ state.xor_check[4];
            if parity != state.xor_check[5] {
                return None;
            }
            Some(finish(Protocol::Kaseikyo, address as u16, command as u16))
        }
        Protocol::Denon => {
            let complement = (!command) & 0x3FF;
            if let Some(pending) = ctx.pending_denon_command.take() {
                if pending == complement as u16 || (!pending as u32 & 0x3FF) as u16 == command as u16 {
                    return Some(finish(Protocol::Denon, address as u16, command.min(pending as u32) as u16));
                }
                ctx.pending_denon_command = Some(command as u16);
                None
            } else {
                ctx.pending_denon_command = Some(command as u16);
                None
            }
        }
        Protocol::Grundig => {
            // All-ones is Grundig's own start/sync frame, never a key press.
            if command == 0x1FF {
                return None;
            }
            Some(finish(Protocol::Grundig, address as u16, command as u16))
        }
        Protocol::Nokia => {
            if address == 0x00FF && command == 0x00FE {
                return None;
            }
            Some(finish(Protocol::Nokia, address as u16, command as u16))
        }
        other => Some(finish(other, address as u16, command as u16)),
    }
}

fn finish(protocol: Protocol, address: u16, command: u16) -> Frame {
    Frame::new(protocol, address, command)
}

//! The decoder's mutable working state, carried between ticks.
//!
//! Grounded on the teacher's `kia_v0::KiaV0Decoder` shape: a small `Step`
//! enum driving a `match`, plus a handful of named accumulator fields,
//! rather than one opaque blob.

use crate::table::Descriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingStartPause,
    Decoding,
}

#[derive(Debug, Clone)]
pub struct DecoderState {
    pub phase: Phase,
    pub pulse_ticks: u32,
    pub pause_ticks: u32,

    pub active: Option<Descriptor>,
    pub secondary: Option<Descriptor>,

    pub bit_index: u8,
    pub tmp_address: u32,
    pub tmp_command: u32,
    pub tmp_address2: u32,
    pub tmp_command2: u32,
    pub tmp_id: u32,

    /// Running XOR-parity bytes, used only by Kaseikyo.
    pub xor_check: [u8; 6],

    /// Manchester/bi-phase half-bit memory.
    pub last_value: bool,
    pub last_pause: u32,

    /// Grundig pre-bit memory.
    pub first_bit: bool,

    /// RC5X inverted command MSB, set when the start pair indicated a
    /// double-length half-bit.
    pub rc5_cmd_bit6: bool,

    /// Secondary-candidate accumulators (RC5 vs. FDC/RCCAR ambiguity).
    pub tmp_address_secondary: u32,
    pub tmp_command_secondary: u32,
    pub bit_index_secondary: u8,

    /// Set once all data bits are in and only a trailing stop pulse remains.
    pub awaiting_stop: bool,

    /// RC6 has switched to the long (RC6A) frame geometry mid-decode.
    pub rc6a_mode: bool,
}

impl DecoderState {
    pub fn new() -> Self {
        DecoderState {
            phase: Phase::Idle,
            pulse_ticks: 0,
            pause_ticks: 0,
            active: None,
            secondary: None,
            bit_index: 0,
            tmp_address: 0,
            tmp_command: 0,
            tmp_address2: 0,
            tmp_command2: 0,
            tmp_id: 0,
            xor_check: [0; 6],
            last_value: false,
            last_pause: 0,
            first_bit: false,
            rc5_cmd_bit6: false,
            tmp_address_secondary: 0,
            tmp_command_secondary: 0,
            bit_index_secondary: 0,
            awaiting_stop: false,
            rc6a_mode: false,
        }
    }

    pub fn reset_to_idle(&mut self) {
        *self = DecoderState::new();
    }

    /// Drops the primary candidate in favor of the shadow FDC/RCCAR
    /// decoder running alongside RC5 (§4.3, §9), carrying its accumulated
    /// bits over into the primary fields so the rest of the pipeline
    /// (promotion, validation) doesn't need to know a swap happened.
    pub fn adopt_secondary(&mut self) {
        if let Some(d) = self.secondary.take() {
            self.active = Some(d);
            self.tmp_address = self.tmp_address_secondary;
            self.tmp_command = self.tmp_command_secondary;
            self.bit_index = self.bit_index_secondary;
        }
    }

    pub fn start_decoding(&mut self, descriptor: Descriptor) {
        self.active = Some(descriptor);
        self.secondary = None;
        self.bit_index = 0;
        self.tmp_address = 0;
        self.tmp_command = 0;
        self.tmp_address2 = 0;
        self.tmp_command2 = 0;
        self.tmp_id = 0;
        self.xor_check = [0; 6];
        self.last_value = false;
        self.last_pause = 0;
        self.first_bit = false;
        self.rc5_cmd_bit6 = false;
        self.rc6a_mode = false;
        self.phase = Phase::Decoding;
        // Descriptors with no data bits of their own (the NEC repeat-burst
        // descriptor) go straight to "only the stop pulse remains".
        self.awaiting_stop = descriptor.complete_len == 0 && descriptor.stop_bit;
    }
}

impl Default for DecoderState {
    fn default() -> Self {
        Self::new()
    }
}

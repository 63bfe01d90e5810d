//! Per-run data-bit decoding, split by coding family: pulse-distance,
//! pulse-width, Manchester/bi-phase, and the Netbox serial-burst mode.
//!
//! Bit storage respects each descriptor's `lsb_first` flag and also handles
//! the handful of protocols that accumulate into a field other than
//! `tmp_address`/`tmp_command` for part of their frame (NEC42's extended
//! address nibble, Samsung's ID nibble, Kaseikyo's running XOR-parity
//! bytes).

use crate::protocol::Protocol;

use super::state::DecoderState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// More runs are expected.
    Continue,
    /// The frame is complete; hand off to validation.
    Complete,
    /// The run did not match any known timing window; abort to Idle.
    Abort,
}

fn store_into(field: &mut u32, bit_index: u8, bit: bool, lsb_first: bool) {
    if lsb_first {
        *field |= (bit as u32) << bit_index;
    } else {
        *field = (*field << 1) | bit as u32;
    }
}

/// Accumulate one decoded bit at the current `bit_index` into the address
/// or command field as dictated by the active descriptor, with the
/// protocol-specific extra bookkeeping §4.4 calls for.
fn store_bit(state: &mut DecoderState, bit: bool) {
    let d = state.active.expect("store_bit called outside Decoding");
    let idx = state.bit_index;

    match d.protocol {
        Protocol::Nec42 if (13..25).contains(&idx) => {
            store_into(&mut state.tmp_address2, idx - 13, bit, d.lsb_first);
        }
        Protocol::Samsung if idx >= 16 && idx < 20 => {
            store_into(&mut state.tmp_id, idx - 16, bit, d.lsb_first);
        }
        // The trailing inverted-command byte lands past the descriptor's own
        // command_end (28); fold it into tmp_command's upper byte so
        // validate()'s complement check has something to compare against.
        Protocol::Samsung if idx >= 28 && idx < 36 => {
            store_into(&mut state.tmp_command, idx - 28 + 8, bit, d.lsb_first);
        }
        Protocol::Kaseikyo => {
            if idx < 48 {
                let byte = (idx / 8) as usize;
                if bit {
                    state.xor_check[byte] |= 1 << (idx % 8);
                }
            }
            if (20..24).contains(&idx) {
                store_into(&mut state.tmp_command, idx - 20 + 8, bit, d.lsb_first);
                state.bit_index += 1;
                return;
            }
            if idx >= d.address_offset && idx < d.address_end {
                store_into(&mut state.tmp_address, idx - d.address_offset, bit, d.lsb_first);
            } else if idx >= d.command_offset && idx < d.command_end {
                store_into(&mut state.tmp_command, idx - d.command_offset, bit, d.lsb_first);
            }
            state.bit_index += 1;
            return;
        }
        _ => {}
    }

    if idx >= d.address_offset && idx < d.address_end {
        store_into(&mut state.tmp_address, idx - d.address_offset, bit, d.lsb_first);
    } else if idx >= d.command_offset && idx < d.command_end {
        store_into(&mut state.tmp_command, idx - d.command_offset, bit, d.lsb_first);
    }
    state.bit_index += 1;
}

fn bits_remain(state: &DecoderState) -> bool {
    let d = state.active.expect("bits_remain called outside Decoding");
    state.bit_index < d.complete_len
}

/// Called only with a pair that still belongs to a protocol's data bits —
/// the trailing stop pulse is detected and finalized one level earlier, at
/// the 0->1 edge that closes it (see `decoder::mod::Decoder::tick`), since
/// it need not be paired with a following pause to be recognized.
pub fn feed_run(state: &mut DecoderState, pulse_ticks: u32, pause_ticks: u32) -> RunOutcome {
    let d = state.active.expect("feed_run called outside Decoding");

    if d.is_manchester {
        feed_manchester(state, pulse_ticks, pause_ticks)
    } else if d.is_serial {
        feed_serial(state, pulse_ticks, pause_ticks)
    } else if d.is_pulse_width {
        feed_pulse_width(state, pulse_ticks, pause_ticks)
    } else {
        feed_pulse_distance(state, pulse_ticks, pause_ticks)
    }
}

fn clamp16(ticks: u32) -> u16 {
    ticks.min(u16::MAX as u32) as u16
}

fn finish_bit(state: &mut DecoderState) -> RunOutcome {
    let d = state.active.unwrap();
    if state.bit_index >= d.complete_len {
        if d.stop_bit {
            state.awaiting_stop = true;
            RunOutcome::Continue
        } else {
            state.phase = super::state::Phase::Idle;
            RunOutcome::Complete
        }
    } else {
        RunOutcome::Continue
    }
}

fn feed_pulse_distance(state: &mut DecoderState, pulse_ticks: u32, pause_ticks: u32) -> RunOutcome {
    let d = state.active.unwrap();
    let pulse = clamp16(pulse_ticks);
    let pause = clamp16(pause_ticks);

    if d.pulse_1.contains(pulse) && d.pause_1.contains(pause) {
        store_bit(state, true);
        finish_bit(state)
    } else if d.pulse_0.contains(pulse) && d.pause_0.contains(pause) {
        store_bit(state, false);
        finish_bit(state)
    } else if d.protocol == Protocol::Sircs {
        feed_sircs_extra(state, pulse_ticks, pause_ticks)
    } else {
        RunOutcome::Abort
    }
}

/// SIRCS frames are variable length (12, 15 or 20 bits): a pause longer
/// than the bit-0 pause window after at least 12 bits closes the frame,
/// and any bits beyond 12 are packed into the upper byte of the address.
fn feed_sircs_extra(state: &mut DecoderState, pulse_ticks: u32, pause_ticks: u32) -> RunOutcome {
    let d = state.active.unwrap();
    let pulse = clamp16(pulse_ticks);
    if state.bit_index >= 12 && (d.pulse_1.contains(pulse) || d.pulse_0.contains(pulse)) {
        let bit = d.pulse_1.contains(pulse);
        store_bit(state, bit);
        if state.bit_index >= 20 {
            state.phase = super::state::Phase::Idle;
            return RunOutcome::Complete;
        }
        RunOutcome::Continue
    } else if state.bit_index >= 12 {
        let _ = pause_ticks;
        state.phase = super::state::Phase::Idle;
        RunOutcome::Complete
    } else {
        RunOutcome::Abort
    }
}

fn feed_pulse_width(state: &mut DecoderState, pulse_ticks: u32, pause_ticks: u32) -> RunOutcome {
    let d = state.active.unwrap();
    let pulse = clamp16(pulse_ticks);
    let pause = clamp16(pause_ticks);

    if d.protocol == Protocol::Sircs {
        return feed_pulse_distance(state, pulse_ticks, pause_ticks);
    }

    if d.pulse_1.contains(pulse) {
        store_bit(state, true);
    } else if d.pulse_0.contains(pulse) {
        store_bit(state, false);
    } else {
        return RunOutcome::Abort;
    }
    let _ = pause;
    finish_bit(state)
}

/// Manchester/bi-phase decoding (RC5, RC6/6A, Grundig, Nokia, IR60,
/// Siemens, Ruwido). `last_value` and `last_pause` carry half-bit memory
/// across runs, per §4.6.
fn feed_manchester(state: &mut DecoderState, pulse_ticks: u32, pause_ticks: u32) -> RunOutcome {
    let d = state.active.unwrap();
    let pulse = clamp16(pulse_ticks);

    // A pulse shorter than the short half-bit window is noise, not a
    // boundary-crossing long half-bit; same timing-error-abort contract
    // every other coding family applies (§4.4).
    if pulse < d.pulse_1.min {
        return RunOutcome::Abort;
    }

    let bit = if pulse > d.pulse_1.max {
        !d.first_pulse_is_one
    } else if !state.last_value {
        d.first_pulse_is_one
    } else if state.last_pause <= d.pause_1.max as u32 {
        state.last_value
    } else {
        !state.last_value
    };

    state.last_value = bit;
    state.last_pause = pause_ticks;

    if d.protocol == Protocol::Rc6 && state.bit_index == 1 && bit {
        state.rc6a_mode = true;
    }

    store_bit(state, bit);

    let closing_gap = pause_ticks > 2 * d.pause_1.max as u32;
    if closing_gap && state.bit_index + 2 >= d.complete_len {
        state.phase = super::state::Phase::Idle;
        return RunOutcome::Complete;
    }
    if state.bit_index >= d.complete_len {
        state.phase = super::state::Phase::Idle;
        return RunOutcome::Complete;
    }
    RunOutcome::Continue
}

/// Netbox's serial-burst mode: a single long run may encode several
/// consecutive identical bits, split by repeatedly subtracting one unit
/// from the run length (§4.7).
fn feed_serial(state: &mut DecoderState, pulse_ticks: u32, pause_ticks: u32) -> RunOutcome {
    let d = state.active.unwrap();
    let mut remaining_pulse = pulse_ticks;
    while remaining_pulse > d.pulse_1.max as u32 && bits_remain(state) {
        store_bit(state, true);
        remaining_pulse = remaining_pulse.saturating_sub(d.pulse_1.min as u32);
    }
    let mut remaining_pause = pause_ticks;
    while remaining_pause > d.pause_1.max as u32 && bits_remain(state) {
        store_bit(state, false);
        remaining_pause = remaining_pause.saturating_sub(d.pause_1.min as u32);
    }

    if !bits_remain(state) {
        state.phase = super::state::Phase::Idle;
        RunOutcome::Complete
    } else {
        RunOutcome::Continue
    }
}

/// Feeds the shadow candidate installed alongside RC5 on an ambiguous start
/// pair (§4.3, §9): both FDC and RCCAR are plain pulse-distance protocols,
/// so this needs only that one family, run against the secondary
/// accumulators rather than the primary ones. Returns `Continue` with no
/// effect if no secondary candidate is installed.
pub fn feed_secondary_run(state: &mut DecoderState, pulse_ticks: u32, pause_ticks: u32) -> RunOutcome {
    let Some(d) = state.secondary else { return RunOutcome::Continue };
    let pulse = clamp16(pulse_ticks);
    let pause = clamp16(pause_ticks);
    let idx = state.bit_index_secondary;

    let bit = if d.pulse_1.contains(pulse) && d.pause_1.contains(pause) {
        true
    } else if d.pulse_0.contains(pulse) && d.pause_0.contains(pause) {
        false
    } else {
        return RunOutcome::Abort;
    };

    if idx >= d.address_offset && idx < d.address_end {
        store_into(&mut state.tmp_address_secondary, idx - d.address_offset, bit, d.lsb_first);
    } else if idx >= d.command_offset && idx < d.command_end {
        store_into(&mut state.tmp_command_secondary, idx - d.command_offset, bit, d.lsb_first);
    }
    state.bit_index_secondary += 1;

    if state.bit_index_secondary >= d.complete_len {
        RunOutcome::Complete
    } else {
        RunOutcome::Continue
    }
}

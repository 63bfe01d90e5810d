//! Protocol promotions: mid-frame and end-of-frame rewrites of the active
//! descriptor when accumulated evidence narrows (or rules out) the
//! originally classified protocol. See §4.8.

use crate::protocol::Protocol;

use super::state::DecoderState;

/// Checked once per stored data bit, for the two promotions that change
/// frame geometry *before* decoding finishes (Samsung/Samsung32, NEC/NEC16).
pub fn maybe_promote_mid(state: &mut DecoderState, pause_ticks: u32) {
    let Some(mut d) = state.active else { return };

    match d.protocol {
        Protocol::Samsung if state.bit_index == 16 => {
            if !d.pause_1.contains((pause_ticks.min(u16::MAX as u32)) as u16)
                || pause_ticks < d.pause_1.min as u32
            {
                // Sync pause absent: this is a Samsung32 frame, not classic
                // Samsung. Rewrite geometry; data bits continue at bit 16.
                d.protocol = Protocol::Samsung32;
                d.address_offset = 0;
                d.address_end = 16;
                d.command_offset = 16;
                d.command_end = 32;
                d.complete_len = 32;
                state.active = Some(d);
            }
        }
        Protocol::Nec | Protocol::Nec42 if state.bit_index == 8 => {
            let nec_start_pause = d.start_pause;
            if nec_start_pause.contains((pause_ticks.min(u16::MAX as u32)) as u16) {
                d.protocol = Protocol::Nec16;
                d.address_offset = 0;
                d.address_end = 8;
                d.command_offset = 8;
                d.command_end = 24;
                d.complete_len = 24;
                state.active = Some(d);
            }
        }
        _ => {}
    }
}

/// Checked once the frame is fully decoded, for promotions keyed on final
/// length or downstream evidence rather than a mid-frame timing anomaly.
pub fn finalize_promotions(state: &mut DecoderState) {
    let Some(mut d) = state.active else { return };

    match d.protocol {
        // NEC42 promotes to plain NEC when it runs all the way to its own
        // regular 42-bit stop (address = tmp_addr | addr2[0..3] << 13,
        // command = (addr2 >> 3) | (cmd << 10)). A NEC42-classified frame
        // that is actually a 32- or 16-bit NEC/JVC frame never reaches
        // this arm -- it is recovered earlier, from the mid-decode timeout
        // that fires when no bit 33 (or 17) ever arrives; see
        // `promote_on_timeout`, which applies the identical reshuffle.
        Protocol::Nec42 => {
            let address =
                (state.tmp_address & 0x1FFF) | ((state.tmp_address2 & 0x7) << 13);
            let command =
                ((state.tmp_address2 >> 3) & 0xFF) | ((state.tmp_command & 0xFF) << 10);
            state.tmp_address = address;
            state.tmp_command = command;
            d.protocol = Protocol::Nec;
            d.address_offset = 0;
            d.address_end = 16;
            d.command_offset = 0;
            d.command_end = 16;
            state.active = Some(d);
        }
        // A Grundig-classified frame that ran past its own native length
        // (the descriptor's `complete_len` is carried out to Nokia's
        // longer length precisely so this can happen) was Nokia all
        // along; one still sitting at its native length publishes as
        // plain Grundig and falls through untouched.
        Protocol::Grundig if state.bit_index > crate::table::GRUNDIG_NATIVE_LEN => {
            d.protocol = Protocol::Nokia;
            if state.tmp_command & 0x300 != 0 {
                let address = (state.tmp_command >> 8) & 0xFF;
                state.tmp_address = address;
                state.tmp_command &= 0xFF;
            }
            state.active = Some(d);
        }
        Protocol::Ruwido => {
            let address = (state.tmp_address << 2) | ((state.tmp_command >> 6) & 0x3);
            let mut command = (state.tmp_command & 0x3F) << 4;
            if state.last_value {
                command |= 1;
            }
            state.tmp_address = address;
            state.tmp_command = command;
            d.protocol = Protocol::Siemens;
            state.active = Some(d);
        }
        Protocol::Rc6 if state.rc6a_mode => {
            d.protocol = Protocol::Rc6a;
            state.active = Some(d);
        }
        _ => {}
    }
}

/// Promotions keyed on a pause that never closes: mid-decode silence past
/// the normal timeout where the spec reads that silence itself as the stop
/// bit of a shorter, different frame than the one currently classified
/// (§4.8, `irmp_ISR`'s `irmp_pause_time > IRMP_TIMEOUT_LEN` branch).
pub fn promote_on_timeout(state: &mut DecoderState, last_protocol: Option<Protocol>) {
    let Some(mut d) = state.active else { return };

    match d.protocol {
        // Grundig promotes to IR60 when the frame is cut short by a long
        // timeout rather than running to its usual length.
        Protocol::Grundig if state.bit_index == 6 => {
            d.protocol = Protocol::Ir60;
            let prefix = state.first_bit as u32;
            state.tmp_command = (prefix << 6) | (state.tmp_command & 0x3F);
            state.active = Some(d);
        }
        // A plain NEC start pair that silently stops at 16 or 17 bits
        // (rather than running to NEC's own 32-bit stop) was actually a
        // JVC frame, recognizable only once the previous decode was NEC
        // too (JVC reuses NEC's timing wholesale).
        Protocol::Nec
            if (state.bit_index == 16 || state.bit_index == 17)
                && last_protocol == Some(Protocol::Nec) =>
        {
            let command = (state.tmp_address >> 4) | (state.tmp_address2 << 9);
            let address = state.tmp_address & 0x0F;
            state.tmp_command = command;
            state.tmp_address = address;
            d.protocol = Protocol::Jvc;
            d.complete_len = state.bit_index;
            state.active = Some(d);
        }
        // A NEC42-classified start pair that silently stops at 16 bits was
        // a JVC frame (NEC42 and JVC share NEC's raw low 16 bits).
        Protocol::Nec42 if state.bit_index == 16 => {
            let command = (state.tmp_address >> 4) | (state.tmp_address2 << 9);
            let address = state.tmp_address & 0x0F;
            state.tmp_command = command;
            state.tmp_address = address;
            d.protocol = Protocol::Jvc;
            d.complete_len = 16;
            state.active = Some(d);
        }
        // A NEC42-classified start pair that silently stops at 32 bits was
        // a plain NEC frame; same reshuffle as the full 42-bit completion
        // in `finalize_promotions`, just recovered before NEC42's own stop.
        Protocol::Nec42 if state.bit_index == 32 => {
            let address = (state.tmp_address & 0x1FFF) | ((state.tmp_address2 & 0x7) << 13);
            let command = ((state.tmp_address2 >> 3) & 0xFF) | ((state.tmp_command & 0xFF) << 10);
            state.tmp_address = address;
            state.tmp_command = command;
            d.protocol = Protocol::Nec;
            d.address_offset = 0;
            d.address_end = 16;
            d.command_offset = 0;
            d.command_end = 16;
            d.complete_len = 32;
            state.active = Some(d);
        }
        _ => {}
    }
}

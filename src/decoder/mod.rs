//! The public decoder: a single owned value driven by [`Decoder::tick`] and
//! read back with [`Decoder::get_data`]. See SPEC_FULL.md §4, §5.

mod bits;
mod classify;
mod promote;
mod repeat;
mod state;
mod validate;

use crate::config::DecoderConfig;
use crate::frame::Frame;
use crate::protocol::Protocol;
use crate::table::{build_table, Descriptor};

use self::repeat::RepeatTracker;
use self::state::{DecoderState, Phase};
use self::validate::ValidationContext;

/// A multi-protocol infrared frame decoder. Owns all of its working state;
/// callers drive it with [`tick`](Decoder::tick) at the configured sample
/// rate and retrieve completed frames with [`get_data`](Decoder::get_data).
///
/// `tick` and `get_data` are the only two entry points and are not
/// re-entrant with respect to each other; see SPEC_FULL.md §5 for the
/// concurrency contract a host must uphold.
pub struct Decoder {
    config: DecoderConfig,
    table: Vec<Descriptor>,
    state: DecoderState,
    ctx: ValidationContext,
    repeat: RepeatTracker,
    output: Option<Frame>,
    last_protocol: Option<Protocol>,

    prev_level: bool,
    pulse_ticks: u32,
    pause_ticks: u32,

    callback: Option<Box<dyn FnMut(bool) + Send>>,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        let table = build_table(&config);
        Decoder {
            config,
            table,
            state: DecoderState::new(),
            ctx: ValidationContext::new(),
            repeat: RepeatTracker::new(),
            output: None,
            last_protocol: None,
            prev_level: true,
            pulse_ticks: 0,
            pause_ticks: 0,
            callback: None,
        }
    }

    /// Install a callback invoked synchronously inside `tick` whenever the
    /// (inverted) input level changes. Must not call back into the decoder.
    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: FnMut(bool) + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Consume one sample. `level` is active-low: `false` means the carrier
    /// is present (a pulse), `true` means no carrier (a pause). Returns
    /// `true` if a frame was latched by this call.
    pub fn tick(&mut self, level: bool) -> bool {
        self.repeat.advance_ticks(1);

        if level != self.prev_level {
            if let Some(cb) = self.callback.as_mut() {
                cb(level);
            }
            let closed_pulse = self.pulse_ticks;
            let closed_pause = self.pause_ticks;
            self.prev_level = level;

            if level {
                // 0 -> 1: a pulse just finished; wait for the pause to
                // finish too before the pair can be classified/decoded --
                // unless this pulse was the trailing stop bit, which needs
                // no following pause to be recognized.
                self.pulse_ticks = 0;
                self.pause_ticks = 1;
                if self.state.phase == Phase::Idle && closed_pulse > 0 {
                    self.state.phase = Phase::AwaitingStartPause;
                    self.state.pulse_ticks = closed_pulse;
                } else if self.state.phase == Phase::Decoding && self.state.awaiting_stop {
                    promote::finalize_promotions(&mut self.state);
                    return self.complete_frame();
                } else if self.state.phase == Phase::Decoding {
                    // Stash the pulse that just closed so the following
                    // 1->0 edge can pair it with its pause (mirrors the
                    // Idle->AwaitingStartPause stash above).
                    self.state.pulse_ticks = closed_pulse;
                }
                return false;
            } else {
                // 1 -> 0: the pause just finished, full (pulse, pause) pair
                // known from the run that is now closing.
                let pulse = self.state.pulse_ticks_or(closed_pulse);
                let pause = closed_pause;
                self.pulse_ticks = 1;
                self.pause_ticks = 0;
                return self.process_pair(pulse, pause);
            }
        }

        if level {
            self.pause_ticks += 1;
            if self.is_awaiting_timeout_sensitive() && self.pause_ticks > self.current_timeout() {
                tracing::debug!(phase = ?self.state.phase, "timeout waiting for pause to close, resetting to idle");
                if self.state.phase == Phase::Decoding {
                    promote::promote_on_timeout(&mut self.state, self.last_protocol);
                    return self.complete_frame();
                }
                self.state.reset_to_idle();
            }
        } else {
            self.pulse_ticks += 1;
        }
        false
    }

    fn is_awaiting_timeout_sensitive(&self) -> bool {
        matches!(self.state.phase, Phase::AwaitingStartPause | Phase::Decoding)
    }

    fn current_timeout(&self) -> u32 {
        if self.state.active.map(|d| d.protocol) == Some(Protocol::Nikon) {
            self.config.timeout_nikon_ticks
        } else {
            self.config.timeout_ticks
        }
    }

    fn process_pair(&mut self, pulse_ticks: u32, pause_ticks: u32) -> bool {
        match self.state.phase {
            Phase::Idle => false,
            Phase::AwaitingStartPause => {
                let classified = classify::classify(&self.table, pulse_ticks, pause_ticks, self.last_protocol);
                match classified {
                    Some(c) => {
                        tracing::trace!(protocol = c.descriptor.protocol.name(), "classified start pair");
                        self.state.start_decoding(c.descriptor);
                        self.state.secondary = c.secondary;
                        self.state.rc5_cmd_bit6 = c.rc5_double_length;
                        self.state.last_value = !c.rc5_double_length;
                        false
                    }
                    None => {
                        tracing::trace!(pulse_ticks, pause_ticks, "no protocol matched start pair");
                        self.state.reset_to_idle();
                        false
                    }
                }
            }
            Phase::Decoding => {
                // The RC5 vs. FDC/RCCAR shadow candidate, if installed, is
                // fed the same run in lockstep; whichever of the two fails
                // or finishes first decides the outcome (§4.3, §9).
                let secondary_outcome = self.state.secondary.is_some().then(|| {
                    bits::feed_secondary_run(&mut self.state, pulse_ticks, pause_ticks)
                });

                let outcome = bits::feed_run(&mut self.state, pulse_ticks, pause_ticks);
                if self.state.active.is_some() {
                    promote::maybe_promote_mid(&mut self.state, pause_ticks);
                }

                match (outcome, secondary_outcome) {
                    (bits::RunOutcome::Complete, _) => {
                        // Primary (RC5) ran to completion; the shadow
                        // candidate, if still alive, is discarded.
                        promote::finalize_promotions(&mut self.state);
                        self.complete_frame()
                    }
                    (bits::RunOutcome::Abort, Some(bits::RunOutcome::Continue)) => {
                        tracing::trace!("primary candidate aborted, adopting shadow candidate");
                        self.state.adopt_secondary();
                        false
                    }
                    (bits::RunOutcome::Abort, Some(bits::RunOutcome::Complete)) => {
                        tracing::trace!("primary candidate aborted, shadow candidate completed");
                        self.state.adopt_secondary();
                        promote::finalize_promotions(&mut self.state);
                        self.complete_frame()
                    }
                    (bits::RunOutcome::Abort, _) => {
                        tracing::debug!(protocol = ?self.state.active.map(|d| d.protocol.name()), "timing violation, aborting frame");
                        self.state.reset_to_idle();
                        false
                    }
                    (bits::RunOutcome::Continue, Some(bits::RunOutcome::Complete)) => {
                        tracing::trace!("shadow candidate completed ahead of primary");
                        self.state.adopt_secondary();
                        promote::finalize_promotions(&mut self.state);
                        self.complete_frame()
                    }
                    (bits::RunOutcome::Continue, Some(bits::RunOutcome::Abort)) => {
                        self.state.secondary = None;
                        false
                    }
                    (bits::RunOutcome::Continue, _) => false,
                }
            }
        }
    }

    /// Validate the just-completed frame, fold it through repetition
    /// tracking, reset to `Idle`, and latch the result if published.
    fn complete_frame(&mut self) -> bool {
        let frame = validate::validate(&self.state, &mut self.ctx);
        self.state.reset_to_idle();
        match frame {
            Some(frame) => {
                self.last_protocol = Some(frame.protocol);
                match self.repeat.process(frame, &self.config) {
                    Some(out) => {
                        tracing::debug!(protocol = out.protocol.name(), address = out.address, command = out.command, "frame decoded");
                        self.output = Some(out);
                        true
                    }
                    None => {
                        tracing::trace!("frame dropped as suppressed auto-repeat");
                        false
                    }
                }
            }
            None => {
                tracing::trace!("frame dropped by validation");
                false
            }
        }
    }

    /// Retrieve and clear the latched frame, if any.
    pub fn get_data(&mut self) -> Option<Frame> {
        self.output.take()
    }
}

impl DecoderState {
    /// Helper used only by `Decoder::tick`'s edge handling: the pulse that
    /// closed `AwaitingStartPause` or a `Decoding` data bit was already
    /// stashed in `self.pulse_ticks` by the preceding 0->1 edge; fall back
    /// to the caller-supplied value otherwise.
    fn pulse_ticks_or(&self, fallback: u32) -> u32 {
        if matches!(self.phase, Phase::AwaitingStartPause | Phase::Decoding) && self.pulse_ticks > 0 {
            self.pulse_ticks
        } else {
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ProtocolSet;

    fn push_run(decoder: &mut Decoder, level: bool, ticks: u32) -> bool {
        let mut fired = false;
        for _ in 0..ticks {
            if decoder.tick(level) {
                fired = true;
            }
        }
        fired
    }

    fn nec_waveform_ticks(address: u16, command: u16) -> Vec<(bool, u32)> {
        let mut runs = vec![(false, 90), (true, 45)];
        // NEC address is sent address-lo, address-hi, cmd, ~cmd, LSB first.
        let word = ((address & 0xFF) as u32)
            | (((address >> 8) & 0xFF) << 8)
            | ((command & 0xFF) << 16)
            | (((!command) & 0xFF) << 24);
        for i in 0..32 {
            let bit = (word >> i) & 1 == 1;
            runs.push((false, 6));
            runs.push((true, if bit { 17 } else { 6 }));
        }
        runs.push((false, 6));
        // NEC42 (not NEC) wins the start-pair match by default, so this
        // 32-bit frame only recovers to plain NEC via the mid-decode
        // timeout at bit 32 (`promote::promote_on_timeout`); the trailing
        // gap must outlast `DecoderConfig::timeout_ticks` (165 ticks at
        // 10kHz) to trigger it.
        runs.push((true, 200));
        runs
    }

    #[test]
    fn decodes_a_nec_frame() {
        let cfg = DecoderConfig::build(10_000, ProtocolSet::ALL).unwrap();
        let mut decoder = Decoder::new(cfg);
        let mut got = None;
        for (level, ticks) in nec_waveform_ticks(0x1234, 0x56) {
            if push_run(&mut decoder, level, ticks) {
                got = decoder.get_data();
            }
        }
        let frame = got.expect("expected a decoded frame");
        assert_eq!(frame.protocol, Protocol::Nec);
        assert_eq!(frame.address, 0x1234);
        assert_eq!(frame.command, 0x56);
        assert!(!frame.is_repetition());
    }

    #[test]
    fn unknown_start_pair_never_publishes() {
        let cfg = DecoderConfig::new();
        let mut decoder = Decoder::new(cfg);
        assert!(!push_run(&mut decoder, false, 3));
        assert!(!push_run(&mut decoder, true, 3));
        assert!(decoder.get_data().is_none());
    }

    #[test]
    fn retrieval_is_idempotent() {
        let cfg = DecoderConfig::new();
        let mut decoder = Decoder::new(cfg);
        for (level, ticks) in nec_waveform_ticks(0x1234, 0x56) {
            push_run(&mut decoder, level, ticks);
        }
        assert!(decoder.get_data().is_some());
        assert!(decoder.get_data().is_none());
    }
}

//! Repetition detection and auto-repeat suppression (§4.10).
//!
//! Tracks the previously published frame and how many ticks have elapsed
//! since, to (a) fold NEC's dedicated repeat-burst encoding and the generic
//! 150 ms key-repeat window into a `REPETITION`-flagged republish of the
//! prior frame, and (b) drop the handful of protocols whose transmitters
//! emit known-redundant duplicate frames per key press.

use crate::config::DecoderConfig;
use crate::frame::Frame;
use crate::protocol::{FrameFlags, Protocol};

#[derive(Debug, Clone, Default)]
pub struct RepeatTracker {
    last_protocol: Option<Protocol>,
    last_address: u16,
    last_command: u16,
    ticks_since_publish: u32,
    consecutive_count: u32,
}

impl RepeatTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_ticks(&mut self, ticks: u32) {
        self.ticks_since_publish = self.ticks_since_publish.saturating_add(ticks);
    }

    /// Returns `Some(frame)` if the decoded frame should be published,
    /// `None` if it should be dropped as a suppressed auto-repeat.
    pub fn process(&mut self, mut candidate: Frame, config: &DecoderConfig) -> Option<Frame> {
        if candidate.protocol == Protocol::NecRepeat {
            return self.process_nec_repeat(config);
        }

        let is_same_as_last = self.last_protocol == Some(candidate.protocol)
            && self.last_address == candidate.address
            && self.last_command == candidate.command;

        self.consecutive_count = if is_same_as_last { self.consecutive_count + 1 } else { 1 };

        if is_same_as_last && self.ticks_since_publish < config.key_repetition_ticks {
            candidate.flags |= FrameFlags::REPETITION;
        }

        let suppress = match candidate.protocol {
            Protocol::Sircs => self.consecutive_count == 2 || self.consecutive_count == 3,
            Protocol::Kaseikyo => self.consecutive_count == 2,
            Protocol::Samsung32 | Protocol::Nubert => self.consecutive_count % 2 == 0,
            _ => false,
        };

        self.last_protocol = Some(candidate.protocol);
        self.last_address = candidate.address;
        self.last_command = candidate.command;
        self.ticks_since_publish = 0;

        if suppress {
            None
        } else {
            Some(candidate)
        }
    }

    fn process_nec_repeat(&mut self, config: &DecoderConfig) -> Option<Frame> {
        if self.last_protocol != Some(Protocol::Nec) {
            return None;
        }
        if self.ticks_since_publish > config.nec_frame_repeat_pause_ticks_max {
            return None;
        }
        let mut frame = Frame::new(Protocol::Nec, self.last_address, self.last_command);
        frame.flags |= FrameFlags::REPETITION;
        self.ticks_since_publish = 0;
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sircs_second_and_third_repeat_are_suppressed() {
        let cfg = DecoderConfig::new();
        let mut tracker = RepeatTracker::new();
        let f = Frame::new(Protocol::Sircs, 1, 2);
        assert!(tracker.process(f, &cfg).is_some());
        assert!(tracker.process(f, &cfg).is_none());
        assert!(tracker.process(f, &cfg).is_none());
        assert!(tracker.process(f, &cfg).is_some());
    }

    #[test]
    fn nec_repeat_replays_last_frame_within_window() {
        let cfg = DecoderConfig::new();
        let mut tracker = RepeatTracker::new();
        let f = Frame::new(Protocol::Nec, 0x1234, 0x56);
        tracker.process(f, &cfg).unwrap();
        tracker.advance_ticks(10);
        let repeat = Frame::new(Protocol::NecRepeat, 0, 0);
        let got = tracker.process(repeat, &cfg).unwrap();
        assert_eq!(got.address, 0x1234);
        assert_eq!(got.command, 0x56);
        assert!(got.is_repetition());
    }

    #[test]
    fn nec_repeat_without_prior_frame_is_dropped() {
        let cfg = DecoderConfig::new();
        let mut tracker = RepeatTracker::new();
        let repeat = Frame::new(Protocol::NecRepeat, 0, 0);
        assert!(tracker.process(repeat, &cfg).is_none());
    }
}

//! The protocol descriptor table: one immutable row per protocol, built
//! once from a [`DecoderConfig`] and never mutated afterward (the decoder
//! works from a local copy it is free to rewrite during promotion).
//!
//! Nominal timings are grounded on the ASCII diagrams carried in the
//! reference decoder's header comment for SIRCS, NEC(+42), Samsung(32),
//! Matsushita, Kaseikyo, RECS80(EXT), RC5(X), Denon, RC6, Nubert,
//! Bang & Olufsen, Grundig/Nokia and Siemens/Ruwido. Protocols whose
//! diagrams were not present in the retrieved source (Thomson, FDC, RCCAR,
//! JVC, Nikon, Kathrein, Netbox, LEGO) use commonly published IRMP timing
//! values instead and are marked `// approximated` below; see DESIGN.md.

use crate::config::DecoderConfig;
use crate::protocol::{Protocol, ProtocolSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub min: u16,
    pub max: u16,
}

impl Window {
    pub const fn new(min: u16, max: u16) -> Self {
        Window { min, max }
    }

    pub fn contains(self, ticks: u16) -> bool {
        ticks >= self.min && ticks <= self.max
    }
}

/// Grundig's own native frame length in bits. The shared Grundig/Nokia
/// descriptor's `complete_len` is set longer than this (see below); a
/// frame that closes exactly here is genuine Grundig, one that runs past
/// it is Nokia.
pub const GRUNDIG_NATIVE_LEN: u8 = 9;

/// Nokia's frame length in bits, carried as the shared descriptor's
/// working `complete_len` so decoding keeps going past Grundig's own
/// shorter native length when the frame is actually Nokia's.
const NOKIA_COMPLETE_LEN: u8 = 10;

#[derive(Debug, Clone, Copy)]
pub struct Descriptor {
    pub protocol: Protocol,

    pub start_pulse: Window,
    pub start_pause: Window,

    pub pulse_0: Window,
    pub pause_0: Window,
    pub pulse_1: Window,
    pub pause_1: Window,

    pub address_offset: u8,
    pub address_end: u8,
    pub command_offset: u8,
    pub command_end: u8,
    pub complete_len: u8,

    pub stop_bit: bool,
    pub lsb_first: bool,
    pub is_manchester: bool,
    pub is_serial: bool,
    pub is_pulse_width: bool,
    pub first_pulse_is_one: bool,
}

impl Descriptor {
    pub fn address_len(&self) -> u8 {
        self.address_end - self.address_offset
    }

    pub fn command_len(&self) -> u8 {
        self.command_end - self.command_offset
    }
}

/// `(actual * sample_rate_hz) / 1_000_000`, rounded to nearest, as the
/// reference's `F_INTERRUPTS * TIME + 0.5` integer cast.
fn scale(us: f64, sample_rate_hz: u32) -> f64 {
    us * sample_rate_hz as f64 / 1_000_000.0
}

/// Build an asymmetric tolerance window around `nominal_us`, in ticks.
fn win(nominal_us: f64, min_tol: f64, max_tol: f64, sample_rate_hz: u32) -> Window {
    let min = scale(nominal_us * (1.0 - min_tol) + 0.5, sample_rate_hz).floor().max(0.0);
    let max = scale(nominal_us * (1.0 + max_tol) + 0.5, sample_rate_hz).ceil();
    Window::new(min as u16, max as u16)
}

/// Symmetric-tolerance convenience wrapper.
fn wins(nominal_us: f64, tol: f64, sample_rate_hz: u32) -> Window {
    win(nominal_us, tol, tol, sample_rate_hz)
}

pub fn build_table(config: &DecoderConfig) -> Vec<Descriptor> {
    let hz = config.sample_rate_hz;
    let has = |p: ProtocolSet| config.enabled.contains(p);
    let mut table = Vec::new();

    if has(ProtocolSet::SIRCS) {
        // Tightened to +5% (vs. the nominal +20/-20%) whenever NETBOX or
        // RC6 share the table: both would otherwise overlap SIRCS' start
        // pause window.
        let tighten = has(ProtocolSet::NETBOX) || has(ProtocolSet::RC6);
        let start_pause_max_tol = if tighten { 0.05 } else { 0.20 };
        table.push(Descriptor {
            protocol: Protocol::Sircs,
            start_pulse: wins(2400.0, 0.20, hz),
            start_pause: win(600.0, 0.20, start_pause_max_tol, hz),
            pulse_0: wins(600.0, 0.20, hz),
            pause_0: wins(600.0, 0.20, hz),
            pulse_1: wins(1200.0, 0.20, hz),
            pause_1: wins(600.0, 0.20, hz),
            address_offset: 7,
            address_end: 12,
            command_offset: 0,
            command_end: 7,
            complete_len: 12,
            stop_bit: false,
            lsb_first: true,
            is_manchester: false,
            is_serial: false,
            is_pulse_width: true,
            first_pulse_is_one: false,
        });
    }

    if has(ProtocolSet::NEC42) {
        table.push(Descriptor {
            protocol: Protocol::Nec42,
            start_pulse: wins(9000.0, 0.10, hz),
            start_pause: wins(4500.0, 0.10, hz),
            pulse_0: wins(560.0, 0.20, hz),
            pause_0: wins(560.0, 0.30, hz),
            pulse_1: wins(560.0, 0.20, hz),
            pause_1: wins(1690.0, 0.20, hz),
            address_offset: 0,
            address_end: 13,
            command_offset: 25,
            command_end: 34,
            complete_len: 42,
            stop_bit: true,
            lsb_first: true,
            is_manchester: false,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: false,
        });
    }

    if has(ProtocolSet::NEC) {
        table.push(Descriptor {
            protocol: Protocol::Nec,
            start_pulse: wins(9000.0, 0.10, hz),
            start_pause: wins(4500.0, 0.10, hz),
            pulse_0: wins(560.0, 0.20, hz),
            pause_0: wins(560.0, 0.30, hz),
            pulse_1: wins(560.0, 0.20, hz),
            pause_1: wins(1690.0, 0.20, hz),
            address_offset: 0,
            address_end: 16,
            command_offset: 16,
            command_end: 32,
            complete_len: 32,
            stop_bit: true,
            lsb_first: true,
            is_manchester: false,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: false,
        });
        // Repeat-burst descriptor: same start pulse, half-length start pause,
        // a single stop bit and no data bits of its own.
        table.push(Descriptor {
            protocol: Protocol::NecRepeat,
            start_pulse: wins(9000.0, 0.10, hz),
            start_pause: wins(2250.0, 0.20, hz),
            pulse_0: Window::new(0, 0),
            pause_0: Window::new(0, 0),
            pulse_1: Window::new(0, 0),
            pause_1: Window::new(0, 0),
            address_offset: 0,
            address_end: 0,
            command_offset: 0,
            command_end: 0,
            complete_len: 0,
            stop_bit: true,
            lsb_first: true,
            is_manchester: false,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: false,
        });
    }

    if has(ProtocolSet::NIKON) {
        // approximated: diagram not retrieved, pattern follows public IRMP
        // Nikon timing (NEC-family pulse-distance with a longer start gap,
        // hence the longer AwaitingStartPause timeout for this protocol).
        table.push(Descriptor {
            protocol: Protocol::Nikon,
            start_pulse: wins(2000.0, 0.20, hz),
            start_pause: wins(27_000.0, 0.20, hz),
            pulse_0: wins(500.0, 0.30, hz),
            pause_0: wins(1500.0, 0.30, hz),
            pulse_1: wins(500.0, 0.30, hz),
            pause_1: wins(3500.0, 0.30, hz),
            address_offset: 0,
            address_end: 0,
            command_offset: 0,
            command_end: 16,
            complete_len: 16,
            stop_bit: true,
            lsb_first: true,
            is_manchester: false,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: false,
        });
    }

    if has(ProtocolSet::SAMSUNG) {
        table.push(Descriptor {
            protocol: Protocol::Samsung,
            start_pulse: wins(4500.0, 0.20, hz),
            start_pause: wins(4500.0, 0.20, hz),
            pulse_0: wins(550.0, 0.30, hz),
            pause_0: wins(450.0, 0.30, hz),
            pulse_1: wins(550.0, 0.30, hz),
            pause_1: wins(1450.0, 0.30, hz),
            address_offset: 0,
            address_end: 16,
            command_offset: 20,
            command_end: 28,
            complete_len: 36,
            stop_bit: true,
            lsb_first: true,
            is_manchester: false,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: false,
        });
    }

    if has(ProtocolSet::SAMSUNG32) {
        table.push(Descriptor {
            protocol: Protocol::Samsung32,
            start_pulse: wins(4500.0, 0.20, hz),
            start_pause: wins(4500.0, 0.20, hz),
            pulse_0: wins(550.0, 0.30, hz),
            pause_0: wins(450.0, 0.30, hz),
            pulse_1: wins(550.0, 0.30, hz),
            pause_1: wins(1450.0, 0.30, hz),
            address_offset: 0,
            address_end: 16,
            command_offset: 16,
            command_end: 32,
            complete_len: 32,
            stop_bit: true,
            lsb_first: true,
            is_manchester: false,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: false,
        });
    }

    if has(ProtocolSet::MATSUSHITA) {
        table.push(Descriptor {
            protocol: Protocol::Matsushita,
            start_pulse: wins(3488.0, 0.20, hz),
            start_pause: wins(3488.0, 0.20, hz),
            pulse_0: wins(872.0, 0.30, hz),
            pause_0: wins(872.0, 0.30, hz),
            pulse_1: wins(872.0, 0.30, hz),
            pause_1: wins(2616.0, 0.30, hz),
            address_offset: 6,
            address_end: 18,
            command_offset: 0,
            command_end: 6,
            complete_len: 24,
            stop_bit: true,
            lsb_first: true,
            is_manchester: false,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: false,
        });
    }

    if has(ProtocolSet::KASEIKYO) {
        table.push(Descriptor {
            protocol: Protocol::Kaseikyo,
            start_pulse: wins(3380.0, 0.20, hz),
            start_pause: wins(1690.0, 0.20, hz),
            pulse_0: wins(423.0, 0.30, hz),
            pause_0: wins(423.0, 0.30, hz),
            pulse_1: wins(423.0, 0.30, hz),
            pause_1: wins(1269.0, 0.30, hz),
            address_offset: 0,
            address_end: 24,
            command_offset: 24,
            command_end: 34,
            complete_len: 48,
            stop_bit: true,
            lsb_first: true,
            is_manchester: false,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: false,
        });
    }

    if has(ProtocolSet::RECS80) {
        table.push(Descriptor {
            protocol: Protocol::Recs80,
            start_pulse: wins(158.0, 0.30, hz),
            start_pause: wins(7432.0, 0.30, hz),
            pulse_0: wins(158.0, 0.30, hz),
            pause_0: wins(4902.0, 0.30, hz),
            pulse_1: wins(158.0, 0.30, hz),
            pause_1: wins(7432.0, 0.30, hz),
            address_offset: 1,
            address_end: 4,
            command_offset: 4,
            command_end: 10,
            complete_len: 10,
            stop_bit: true,
            lsb_first: false,
            is_manchester: false,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: false,
        });
    }

    if has(ProtocolSet::RECS80EXT) {
        table.push(Descriptor {
            protocol: Protocol::Recs80Ext,
            start_pulse: wins(158.0, 0.30, hz),
            start_pause: wins(3637.0, 0.30, hz),
            pulse_0: wins(158.0, 0.30, hz),
            pause_0: wins(4902.0, 0.30, hz),
            pulse_1: wins(158.0, 0.30, hz),
            pause_1: wins(7432.0, 0.30, hz),
            address_offset: 1,
            address_end: 5,
            command_offset: 5,
            command_end: 11,
            complete_len: 11,
            stop_bit: true,
            lsb_first: false,
            is_manchester: false,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: false,
        });
    }

    if has(ProtocolSet::RC5) {
        table.push(Descriptor {
            protocol: Protocol::Rc5,
            start_pulse: wins(889.0, 0.30, hz),
            start_pause: wins(889.0, 0.30, hz),
            pulse_1: wins(889.0, 0.30, hz),
            pause_1: wins(889.0, 0.30, hz),
            pulse_0: wins(889.0, 0.30, hz),
            pause_0: wins(889.0, 0.30, hz),
            address_offset: 1,
            address_end: 6,
            command_offset: 6,
            command_end: 12,
            complete_len: 13,
            stop_bit: false,
            lsb_first: false,
            is_manchester: true,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: true,
        });
    }

    if has(ProtocolSet::DENON) {
        // Practice timings (the diagram's "Practice" section, closer to
        // what real transmitters emit than the theoretical figures above
        // it); tightened lower bound to not overlap RUWIDO's start window.
        table.push(Descriptor {
            protocol: Protocol::Denon,
            start_pulse: wins(310.0, 0.30, hz),
            start_pause: wins(745.0, 0.30, hz),
            pulse_0: wins(310.0, 0.30, hz),
            pause_0: wins(745.0, 0.30, hz),
            pulse_1: wins(310.0, 0.30, hz),
            pause_1: wins(1780.0, 0.30, hz),
            address_offset: 0,
            address_end: 5,
            command_offset: 5,
            command_end: 15,
            complete_len: 16,
            stop_bit: true,
            lsb_first: true,
            is_manchester: false,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: false,
        });
    }

    if has(ProtocolSet::THOMSON) {
        // approximated: no diagram retrieved; pulse-distance NEC-family
        // shape with a shorter frame, per published IRMP Thomson timing.
        table.push(Descriptor {
            protocol: Protocol::Thomson,
            start_pulse: wins(2400.0, 0.30, hz),
            start_pause: wins(4000.0, 0.30, hz),
            pulse_0: wins(500.0, 0.30, hz),
            pause_0: wins(2000.0, 0.30, hz),
            pulse_1: wins(500.0, 0.30, hz),
            pause_1: wins(4000.0, 0.30, hz),
            address_offset: 6,
            address_end: 10,
            command_offset: 0,
            command_end: 6,
            complete_len: 10,
            stop_bit: true,
            lsb_first: false,
            is_manchester: false,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: false,
        });
    }

    if has(ProtocolSet::RC6) {
        table.push(Descriptor {
            protocol: Protocol::Rc6,
            start_pulse: wins(2666.0, 0.30, hz),
            start_pause: wins(889.0, 0.30, hz),
            pulse_1: wins(444.0, 0.30, hz),
            pause_1: wins(444.0, 0.30, hz),
            pulse_0: wins(444.0, 0.30, hz),
            pause_0: wins(444.0, 0.30, hz),
            address_offset: 5,
            address_end: 13,
            command_offset: 13,
            command_end: 21,
            complete_len: 21,
            stop_bit: false,
            lsb_first: false,
            is_manchester: true,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: true,
        });
    }

    if has(ProtocolSet::NUBERT) {
        table.push(Descriptor {
            protocol: Protocol::Nubert,
            start_pulse: wins(1340.0, 0.30, hz),
            start_pause: wins(340.0, 0.30, hz),
            pulse_0: wins(500.0, 0.30, hz),
            pause_0: wins(1300.0, 0.30, hz),
            pulse_1: wins(1340.0, 0.30, hz),
            pause_1: wins(340.0, 0.30, hz),
            address_offset: 0,
            address_end: 0,
            command_offset: 0,
            command_end: 10,
            complete_len: 10,
            stop_bit: true,
            lsb_first: true,
            is_manchester: false,
            is_serial: false,
            is_pulse_width: true,
            first_pulse_is_one: false,
        });
    }

    if has(ProtocolSet::BANG_OLUFSEN) {
        table.push(Descriptor {
            protocol: Protocol::BangOlufsen,
            start_pulse: wins(210.0, 0.30, hz),
            start_pause: wins(3000.0, 0.30, hz),
            pulse_0: wins(210.0, 0.30, hz),
            pause_0: wins(3000.0, 0.30, hz),
            pulse_1: wins(210.0, 0.30, hz),
            pause_1: wins(9000.0, 0.30, hz),
            address_offset: 0,
            address_end: 0,
            command_offset: 0,
            command_end: 16,
            complete_len: 16,
            stop_bit: true,
            lsb_first: true,
            is_manchester: false,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: false,
        });
    }

    if has(ProtocolSet::GRUNDIG) {
        // The Grundig/Nokia start pair and half-bit timing are shared, so
        // one descriptor covers both; its own native frame is 9 bits
        // (GRUNDIG_NATIVE_LEN below), but `complete_len` is carried out to
        // Nokia's full 10-bit length so decoding does not stop prematurely
        // on a Nokia frame riding the same timing. `decoder::promote`
        // decides between "genuine Grundig" and "promote to Nokia" by
        // comparing the bit count actually reached against
        // `GRUNDIG_NATIVE_LEN` once the frame closes.
        table.push(Descriptor {
            protocol: Protocol::Grundig,
            start_pulse: wins(528.0, 0.30, hz),
            start_pause: wins(528.0, 0.30, hz),
            pulse_1: wins(528.0, 0.30, hz),
            pause_1: wins(528.0, 0.30, hz),
            pulse_0: wins(528.0, 0.30, hz),
            pause_0: wins(528.0, 0.30, hz),
            address_offset: 0,
            address_end: 0,
            command_offset: 0,
            command_end: NOKIA_COMPLETE_LEN,
            complete_len: NOKIA_COMPLETE_LEN,
            stop_bit: false,
            lsb_first: false,
            is_manchester: true,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: false,
        });
    }

    if has(ProtocolSet::SIEMENS) {
        // Ruwido shares identical start/bit timing with Siemens; the two
        // share one descriptor slot and are disambiguated only by frame
        // length at promotion time (decoder::promote).
        table.push(Descriptor {
            protocol: Protocol::Ruwido,
            start_pulse: wins(250.0, 0.30, hz),
            start_pause: wins(250.0, 0.30, hz),
            pulse_1: wins(250.0, 0.30, hz),
            pause_1: wins(250.0, 0.30, hz),
            pulse_0: wins(250.0, 0.30, hz),
            pause_0: wins(250.0, 0.30, hz),
            address_offset: 0,
            address_end: 13,
            command_offset: 13,
            command_end: 21,
            complete_len: 22,
            stop_bit: false,
            lsb_first: false,
            is_manchester: true,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: true,
        });
    }

    if has(ProtocolSet::FDC) {
        // approximated: start overlaps RC5's half-bit window and is
        // tightened to +5% when NETBOX is enabled, per the reference's
        // explicit anti-collision comment.
        let tighten = has(ProtocolSet::NETBOX);
        let max_tol = if tighten { 0.05 } else { 0.30 };
        table.push(Descriptor {
            protocol: Protocol::Fdc,
            start_pulse: win(889.0, 0.30, max_tol, hz),
            start_pause: win(889.0, 0.30, max_tol, hz),
            pulse_0: wins(515.0, 0.30, hz),
            pause_0: wins(565.0, 0.30, hz),
            pulse_1: wins(515.0, 0.30, hz),
            pause_1: wins(1400.0, 0.30, hz),
            address_offset: 0,
            address_end: 8,
            command_offset: 8,
            command_end: 16,
            complete_len: 16,
            stop_bit: true,
            lsb_first: true,
            is_manchester: false,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: false,
        });
    }

    if has(ProtocolSet::RCCAR) {
        // approximated: shares RC5's half-bit start window as a secondary
        // candidate (decoder::classify installs RC5 primary / RCCAR
        // secondary on an ambiguous start pair).
        table.push(Descriptor {
            protocol: Protocol::Rccar,
            start_pulse: wins(889.0, 0.30, hz),
            start_pause: wins(889.0, 0.30, hz),
            pulse_0: wins(500.0, 0.30, hz),
            pause_0: wins(500.0, 0.30, hz),
            pulse_1: wins(500.0, 0.30, hz),
            pause_1: wins(1500.0, 0.30, hz),
            address_offset: 11,
            address_end: 13,
            command_offset: 0,
            command_end: 11,
            complete_len: 13,
            stop_bit: true,
            lsb_first: true,
            is_manchester: false,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: false,
        });
    }

    if has(ProtocolSet::KATHREIN) {
        // approximated
        table.push(Descriptor {
            protocol: Protocol::Kathrein,
            start_pulse: wins(2000.0, 0.30, hz),
            start_pause: wins(4500.0, 0.30, hz),
            pulse_0: wins(500.0, 0.30, hz),
            pause_0: wins(2000.0, 0.30, hz),
            pulse_1: wins(500.0, 0.30, hz),
            pause_1: wins(4000.0, 0.30, hz),
            address_offset: 0,
            address_end: 0,
            command_offset: 0,
            command_end: 14,
            complete_len: 14,
            stop_bit: true,
            lsb_first: true,
            is_manchester: false,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: false,
        });
    }

    if has(ProtocolSet::NETBOX) {
        // approximated: serial-burst coding, unit pulse length drives
        // decoder::bits::decode_serial's run-splitting loop.
        table.push(Descriptor {
            protocol: Protocol::Netbox,
            start_pulse: wins(2000.0, 0.10, hz),
            start_pause: wins(2000.0, 0.10, hz),
            pulse_0: wins(2000.0, 0.10, hz),
            pause_0: wins(2000.0, 0.10, hz),
            pulse_1: wins(2000.0, 0.10, hz),
            pause_1: wins(2000.0, 0.10, hz),
            address_offset: 0,
            address_end: 0,
            command_offset: 0,
            command_end: 12,
            complete_len: 15,
            stop_bit: false,
            lsb_first: false,
            is_manchester: false,
            is_serial: true,
            is_pulse_width: false,
            first_pulse_is_one: false,
        });
    }

    if has(ProtocolSet::LEGO) {
        // approximated: LEGO Power Functions timing (short mark, variable
        // space), per published IRMP constants.
        table.push(Descriptor {
            protocol: Protocol::Lego,
            start_pulse: wins(158.0, 0.30, hz),
            start_pause: wins(1026.0, 0.30, hz),
            pulse_0: wins(158.0, 0.30, hz),
            pause_0: wins(421.0, 0.30, hz),
            pulse_1: wins(158.0, 0.30, hz),
            pause_1: wins(842.0, 0.30, hz),
            address_offset: 0,
            address_end: 4,
            command_offset: 4,
            command_end: 16,
            complete_len: 16,
            stop_bit: true,
            lsb_first: false,
            is_manchester: false,
            is_serial: false,
            is_pulse_width: false,
            first_pulse_is_one: false,
        });
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nec_start_window_covers_nominal() {
        let cfg = DecoderConfig::new();
        let table = build_table(&cfg);
        let nec = table.iter().find(|d| d.protocol == Protocol::Nec).unwrap();
        assert!(nec.start_pulse.contains(90));
        assert!(nec.start_pause.contains(45));
    }

    #[test]
    fn disabling_a_protocol_removes_it_from_the_table() {
        let cfg = DecoderConfig::build(10_000, ProtocolSet::ALL - ProtocolSet::LEGO).unwrap();
        let table = build_table(&cfg);
        assert!(!table.iter().any(|d| d.protocol == Protocol::Lego));
    }
}

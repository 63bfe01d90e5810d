//! The closed set of protocols this decoder recognizes, and small bitflag
//! sets derived from it.
//!
//! [`Protocol`] is listed in the exact priority order the start-bit
//! classifier evaluates candidates in (see `decoder::classify`), recovered
//! from the reference `irmp_ISR` dispatch chain. The order is part of the
//! contract: several protocols share start timings and are disambiguated
//! only by which one is tried first.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Protocol {
    Sircs,
    Jvc,
    Nec,
    Nec16,
    Nec42,
    NecRepeat,
    Nikon,
    Samsung,
    Samsung32,
    Matsushita,
    Kaseikyo,
    Recs80,
    Rc5,
    Denon,
    Thomson,
    Rc6,
    Rc6a,
    Recs80Ext,
    Nubert,
    BangOlufsen,
    Grundig,
    Nokia,
    Ir60,
    Siemens,
    Ruwido,
    Fdc,
    Rccar,
    Kathrein,
    Netbox,
    Lego,
    Apple,
}

impl Protocol {
    /// Fixed classifier evaluation order (see `decoder::classify::classify`).
    pub const PRIORITY_ORDER: &'static [Protocol] = &[
        Protocol::Sircs,
        Protocol::Nec42,
        Protocol::Nec,
        Protocol::NecRepeat,
        Protocol::Nikon,
        Protocol::Samsung,
        Protocol::Matsushita,
        Protocol::Kaseikyo,
        Protocol::Recs80,
        Protocol::Rc5,
        Protocol::Denon,
        Protocol::Thomson,
        Protocol::Rc6,
        Protocol::Recs80Ext,
        Protocol::Nubert,
        Protocol::BangOlufsen,
        Protocol::Grundig,
        Protocol::Siemens,
        Protocol::Fdc,
        Protocol::Rccar,
        Protocol::Kathrein,
        Protocol::Netbox,
        Protocol::Lego,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Protocol::Sircs => "SIRCS",
            Protocol::Jvc => "JVC",
            Protocol::Nec => "NEC",
            Protocol::Nec16 => "NEC16",
            Protocol::Nec42 => "NEC42",
            Protocol::NecRepeat => "NEC_REPEAT",
            Protocol::Nikon => "NIKON",
            Protocol::Samsung => "SAMSUNG",
            Protocol::Samsung32 => "SAMSUNG32",
            Protocol::Matsushita => "MATSUSHITA",
            Protocol::Kaseikyo => "KASEIKYO",
            Protocol::Recs80 => "RECS80",
            Protocol::Rc5 => "RC5",
            Protocol::Denon => "DENON",
            Protocol::Thomson => "THOMSON",
            Protocol::Rc6 => "RC6",
            Protocol::Rc6a => "RC6A",
            Protocol::Recs80Ext => "RECS80EXT",
            Protocol::Nubert => "NUBERT",
            Protocol::BangOlufsen => "BANG_OLUFSEN",
            Protocol::Grundig => "GRUNDIG",
            Protocol::Nokia => "NOKIA",
            Protocol::Ir60 => "IR60",
            Protocol::Siemens => "SIEMENS",
            Protocol::Ruwido => "RUWIDO",
            Protocol::Fdc => "FDC",
            Protocol::Rccar => "RCCAR",
            Protocol::Kathrein => "KATHREIN",
            Protocol::Netbox => "NETBOX",
            Protocol::Lego => "LEGO",
            Protocol::Apple => "APPLE",
        }
    }
}

bitflags! {
    /// Which protocols a [`crate::config::DecoderConfig`] admits into its
    /// descriptor table. Defaults to every protocol this crate implements.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ProtocolSet: u32 {
        const SIRCS        = 1 << 0;
        const NEC          = 1 << 1;
        const NEC16        = 1 << 2;
        const NEC42        = 1 << 3;
        const NIKON        = 1 << 4;
        const SAMSUNG      = 1 << 5;
        const SAMSUNG32    = 1 << 6;
        const MATSUSHITA   = 1 << 7;
        const KASEIKYO     = 1 << 8;
        const RECS80       = 1 << 9;
        const RC5          = 1 << 10;
        const DENON        = 1 << 11;
        const THOMSON      = 1 << 12;
        const RC6          = 1 << 13;
        const RC6A         = 1 << 14;
        const RECS80EXT    = 1 << 15;
        const NUBERT       = 1 << 16;
        const BANG_OLUFSEN = 1 << 17;
        const GRUNDIG      = 1 << 18;
        const NOKIA        = 1 << 19;
        const IR60         = 1 << 20;
        const SIEMENS      = 1 << 21;
        const RUWIDO       = 1 << 22;
        const FDC          = 1 << 23;
        const RCCAR        = 1 << 24;
        const JVC          = 1 << 25;
        const KATHREIN     = 1 << 26;
        const NETBOX       = 1 << 27;
        const LEGO         = 1 << 28;
        const APPLE        = 1 << 29;

        const ALL = u32::MAX;
    }
}

impl Default for ProtocolSet {
    fn default() -> Self {
        ProtocolSet::ALL
    }
}

impl ProtocolSet {
    pub fn contains_protocol(self, p: Protocol) -> bool {
        let bit = match p {
            Protocol::Sircs => ProtocolSet::SIRCS,
            Protocol::Jvc => ProtocolSet::JVC,
            Protocol::Nec => ProtocolSet::NEC,
            Protocol::Nec16 => ProtocolSet::NEC16,
            Protocol::Nec42 => ProtocolSet::NEC42,
            Protocol::NecRepeat => ProtocolSet::NEC,
            Protocol::Nikon => ProtocolSet::NIKON,
            Protocol::Samsung => ProtocolSet::SAMSUNG,
            Protocol::Samsung32 => ProtocolSet::SAMSUNG32,
            Protocol::Matsushita => ProtocolSet::MATSUSHITA,
            Protocol::Kaseikyo => ProtocolSet::KASEIKYO,
            Protocol::Recs80 => ProtocolSet::RECS80,
            Protocol::Rc5 => ProtocolSet::RC5,
            Protocol::Denon => ProtocolSet::DENON,
            Protocol::Thomson => ProtocolSet::THOMSON,
            Protocol::Rc6 => ProtocolSet::RC6,
            Protocol::Rc6a => ProtocolSet::RC6A,
            Protocol::Recs80Ext => ProtocolSet::RECS80EXT,
            Protocol::Nubert => ProtocolSet::NUBERT,
            Protocol::BangOlufsen => ProtocolSet::BANG_OLUFSEN,
            Protocol::Grundig => ProtocolSet::GRUNDIG,
            Protocol::Nokia => ProtocolSet::NOKIA,
            Protocol::Ir60 => ProtocolSet::IR60,
            Protocol::Siemens => ProtocolSet::SIEMENS,
            Protocol::Ruwido => ProtocolSet::RUWIDO,
            Protocol::Fdc => ProtocolSet::FDC,
            Protocol::Rccar => ProtocolSet::RCCAR,
            Protocol::Kathrein => ProtocolSet::KATHREIN,
            Protocol::Netbox => ProtocolSet::NETBOX,
            Protocol::Lego => ProtocolSet::LEGO,
            Protocol::Apple => ProtocolSet::APPLE,
        };
        self.contains(bit)
    }
}

bitflags! {
    /// Flags carried alongside a decoded [`crate::frame::Frame`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct FrameFlags: u8 {
        /// This frame is a repeat of the previously published frame, either
        /// via a protocol's dedicated repeat-burst encoding or because it
        /// arrived within the generic key-repetition window.
        const REPETITION = 1 << 0;
        /// Set on a release event for protocols that distinguish press from
        /// release in-band (currently only Netbox).
        const RELEASE = 1 << 1;
    }
}

//! Responses for Network service Commands
use heapless::String;
use serde::Serialize;

use super::types::RegistrationStatus;
use crate::parse::{copy_field, to_u8, Cursor};

/// +CREG
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NetworkRegistration {
    /// Unsolicited reporting mode `<n>`, 0xFF when missing
    pub urc: u8,
    pub status: RegistrationStatus,
}

impl NetworkRegistration {
    pub const INVALID: Self = Self {
        urc: 0xFF,
        status: RegistrationStatus::Invalid,
    };

    pub fn parse(reply: &[u8]) -> Self {
        let Some(body) = Cursor::new(reply).after_str(b"+CREG:").map(|c| c.line()) else {
            return Self::INVALID;
        };

        let urc = body.integer().map_or(0xFF, |n| to_u8(n, 0xFF));
        let status = body
            .after_nth(b',', 0)
            .and_then(|c| c.integer())
            .map_or(RegistrationStatus::Invalid, RegistrationStatus::from);

        Self { urc, status }
    }
}

/// +CSQ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalQuality {
    /// 0..=31, 99 when not known
    pub rssi: u8,
    /// 0..=7, 99 when not known
    pub ber: u8,
}

impl SignalQuality {
    pub const UNKNOWN: u8 = 99;

    pub fn parse(reply: &[u8]) -> Self {
        let Some(body) = Cursor::new(reply).after_str(b"+CSQ:").map(|c| c.line()) else {
            return Self {
                rssi: Self::UNKNOWN,
                ber: Self::UNKNOWN,
            };
        };

        let rssi = body
            .integer()
            .map_or(Self::UNKNOWN, |n| to_u8(n, Self::UNKNOWN));
        let ber = body
            .after_nth(b',', 0)
            .and_then(|c| c.integer())
            .map_or(Self::UNKNOWN, |n| to_u8(n, Self::UNKNOWN));

        Self { rssi, ber }
    }

    /// Received signal strength in dBm
    pub fn dbm(&self) -> Option<i16> {
        match self.rssi {
            0 => Some(-115),
            1 => Some(-111),
            n @ 2..=30 => Some(-114 + 2 * i16::from(n)),
            31 => Some(-52),
            _ => None,
        }
    }
}

/// +CFUN `<fun>`, 0xFF when missing
pub fn parse_functionality(reply: &[u8]) -> u8 {
    Cursor::new(reply)
        .after_str(b"+CFUN:")
        .and_then(|c| c.integer())
        .map_or(0xFF, |n| to_u8(n, 0xFF))
}

/// +CCLK `<time>` without its quotes, empty when missing
pub fn parse_clock(reply: &[u8]) -> String<20> {
    let mut time = String::new();
    if let Some(quoted) = Cursor::new(reply)
        .after_str(b"+CCLK:")
        .and_then(|c| c.after_nth(b'"', 0))
    {
        copy_field(&mut time, quoted.until(b'"'));
    }
    time
}

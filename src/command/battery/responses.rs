//! Responses for Power supply Commands
use serde::Serialize;

use crate::parse::{to_u8, Cursor};

/// +CBC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryCharge {
    /// Capacity in percent, 0xFF when unknown
    pub percent: u8,
    /// Voltage in mV, 0 when unknown
    pub voltage: u16,
}

impl BatteryCharge {
    pub fn parse(reply: &[u8]) -> Self {
        let Some(body) = Cursor::new(reply).after_str(b"+CBC:") else {
            return Self {
                percent: 0xFF,
                voltage: 0,
            };
        };
        let line = body.line();

        let percent = line
            .after_nth(b',', 0)
            .and_then(|c| c.integer())
            .map_or(0xFF, |n| to_u8(n, 0xFF));
        // The voltage is the last field, whatever precedes it
        let voltage = line
            .after_last(b',')
            .filter(|_| line.find_nth(b',', 1).is_some())
            .and_then(|c| c.integer())
            .and_then(|n| u16::try_from(n).ok())
            .unwrap_or(0);

        Self { percent, voltage }
    }
}

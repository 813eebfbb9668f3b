//! Responses for GNSS Commands
use heapless::String;
use serde::Serialize;

use crate::parse::Cursor;

/// Subset of the `+CGNSINF` navigation record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GnssInfo {
    /// GNSS run status, 1 when the engine is on
    pub run: u8,
    /// UTC date and time, `yyyyMMddhhmmss.sss`
    pub datetime: String<18>,
    /// Degrees, `±dd.dddddd`
    pub latitude: String<10>,
    /// Degrees, `±ddd.dddddd`
    pub longitude: String<11>,
    /// GPS satellites in view
    pub gps_satellites: u8,
    /// GNSS satellites in use
    pub gnss_satellites: u8,
    /// GLONASS satellites in view
    pub glonass_satellites: u8,
}

impl GnssInfo {
    const RUN: usize = 0;
    const DATETIME: usize = 3;
    const LATITUDE: usize = 4;
    const LONGITUDE: usize = 5;
    const GPS_SATELLITES: usize = 15;
    const GNSS_SATELLITES: usize = 16;
    const GLONASS_SATELLITES: usize = 17;

    /// Read the comma separated record in one pass. Fields that are missing
    /// or empty stay at their default.
    pub fn parse(reply: &[u8]) -> Self {
        let record = Cursor::new(reply)
            .after_str(b"+CGNSINF:")
            .map_or(reply, |c| c.as_bytes());

        let mut info = Self::default();
        let mut field = 0;
        // Spaces are only skipped before the first byte of a field
        let mut started = false;

        for &b in record {
            match b {
                0 | b'\r' | b'\n' => break,
                b',' => {
                    field += 1;
                    started = false;
                    continue;
                }
                b' ' if !started => continue,
                _ => started = true,
            }

            match field {
                Self::RUN => push_digit(&mut info.run, b),
                Self::DATETIME => push_char(&mut info.datetime, b),
                Self::LATITUDE => push_char(&mut info.latitude, b),
                Self::LONGITUDE => push_char(&mut info.longitude, b),
                Self::GPS_SATELLITES => push_digit(&mut info.gps_satellites, b),
                Self::GNSS_SATELLITES => push_digit(&mut info.gnss_satellites, b),
                Self::GLONASS_SATELLITES => push_digit(&mut info.glonass_satellites, b),
                _ => {}
            }
        }

        info
    }

    /// A record with a position
    pub fn has_fix(&self) -> bool {
        !self.latitude.is_empty() && !self.longitude.is_empty()
    }
}

fn push_char<const N: usize>(dst: &mut String<N>, b: u8) {
    if (0x20..0x7f).contains(&b) {
        // Overlong fields are truncated
        let _ = dst.push(b as char);
    }
}

fn push_digit(dst: &mut u8, b: u8) {
    if b.is_ascii_digit() {
        *dst = dst.saturating_mul(10).saturating_add(b - b'0');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &[u8] =
        b"1,1,,20240101120000.000,12.345678,-98.765432,0.0,0.0,0,0,,,,,,08,07,06,,,,,";

    #[test]
    fn navigation_record() {
        let info = GnssInfo::parse(RECORD);
        assert_eq!(info.run, 1);
        assert_eq!(info.datetime.as_str(), "20240101120000.000");
        assert_eq!(info.latitude.as_str(), "12.345678");
        assert_eq!(info.longitude.as_str(), "-98.765432");
        assert_eq!(info.gps_satellites, 8);
        assert_eq!(info.gnss_satellites, 7);
        assert_eq!(info.glonass_satellites, 6);
        assert!(info.has_fix());
    }

    #[test]
    fn navigation_record_with_prefix() {
        let mut reply: heapless::Vec<u8, 160> = heapless::Vec::new();
        reply
            .extend_from_slice(b"AT+CGNSINF\r\r\n+CGNSINF: ")
            .unwrap();
        reply.extend_from_slice(RECORD).unwrap();
        reply.extend_from_slice(b"\r\n\r\n0\r").unwrap();

        assert_eq!(GnssInfo::parse(&reply), GnssInfo::parse(RECORD));
    }

    #[test]
    fn engine_off() {
        let info = GnssInfo::parse(b"+CGNSINF: 0,,,,,,,,,,,,,,,,,,,,\r\n\r\n0\r");
        assert_eq!(info, GnssInfo::default());
        assert!(!info.has_fix());
        assert_eq!(GnssInfo::parse(b""), GnssInfo::default());
    }
}

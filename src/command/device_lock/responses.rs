//! Responses for Device lock Commands
use crate::parse::Cursor;

/// +CPIN `<code>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinStatus {
    /// MT is not pending for any password
    Ready,
    /// MT is waiting SIM PIN to be given
    SimPin,
    /// MT is waiting for SIM PUK to be given
    SimPuk,
    /// MT is waiting for phone to SIM card password
    PhSimPin,
    /// MT is waiting SIM PIN2 to be given
    SimPin2,
    /// MT is waiting SIM PUK2 to be given
    SimPuk2,
    /// MT is waiting network personalization password
    PhNetPin,
    /// No reply, or a reply that could not be read
    Unknown,
}

impl PinStatus {
    pub fn parse(reply: &[u8]) -> Self {
        let Some(body) = Cursor::new(reply).after_str(b"+CPIN:") else {
            return Self::Unknown;
        };

        let code = body.until(b'\r');
        let code = match code.iter().position(|&b| b != b' ') {
            Some(start) => &code[start..],
            None => return Self::Unknown,
        };

        match code {
            b"READY" => Self::Ready,
            b"SIM PIN" => Self::SimPin,
            b"SIM PUK" => Self::SimPuk,
            b"PH_SIM PIN" | b"PH-SIM PIN" => Self::PhSimPin,
            b"SIM PIN2" => Self::SimPin2,
            b"SIM PUK2" => Self::SimPuk2,
            b"PH-NET PIN" => Self::PhNetPin,
            _ => Self::Unknown,
        }
    }

    pub fn is_ready(self) -> bool {
        self == Self::Ready
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_pin_status() {
        assert_eq!(PinStatus::parse(b"+CPIN: READY"), PinStatus::Ready);
        assert_eq!(
            PinStatus::parse(b"AT+CPIN?\r\r\n+CPIN: READY\r\n\r\n0\r"),
            PinStatus::Ready
        );
        assert_eq!(PinStatus::parse(b"+CPIN: SIM PIN\r\n"), PinStatus::SimPin);
        assert_eq!(PinStatus::parse(b"+CPIN: SIM PIN2\r\n"), PinStatus::SimPin2);
        assert!(!PinStatus::parse(b"+CPIN: SIM PUK\r\n").is_ready());
    }

    #[test]
    fn parse_pin_status_garbage() {
        assert_eq!(PinStatus::parse(b""), PinStatus::Unknown);
        assert_eq!(PinStatus::parse(b"+CPIN:"), PinStatus::Unknown);
        assert_eq!(PinStatus::parse(b"+CPIN: BOGUS\r\n"), PinStatus::Unknown);
    }
}

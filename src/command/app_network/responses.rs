//! Responses for APP network Commands
use heapless::String;
use serde::Serialize;

use crate::parse::{copy_field, text_to_integer, to_u8, Cursor};

/// One `+CNACT` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppNetworkInfo {
    /// PDP context index, 0xFF when unknown
    pub index: u8,
    /// 0: deactived, 1: actived, 2: in operation. 0xFF when unknown
    pub status: u8,
    /// Dotted IPv4 address, empty when unknown
    pub address: String<15>,
}

impl Default for AppNetworkInfo {
    fn default() -> Self {
        Self {
            index: 0xFF,
            status: 0xFF,
            address: String::new(),
        }
    }
}

impl AppNetworkInfo {
    /// Pick the line describing context `index` out of a `+CNACT?` reply.
    pub fn parse(reply: &[u8], index: u8) -> Self {
        let mut rest = Cursor::new(reply);
        while let Some(next) = rest.after_str(b"+CNACT:") {
            rest = next;
            let line = next.line();

            if line.integer() != Some(i64::from(index)) {
                continue;
            }

            let mut info = Self {
                index,
                ..Self::default()
            };
            if let Some(status) = line.after_nth(b',', 0).and_then(|c| c.integer()) {
                info.status = to_u8(status, 0xFF);
            }
            if let Some(quoted) = line.after_nth(b'"', 0) {
                let address = quoted.until(b'"');
                if address != b"255.255.255.255" {
                    copy_field(&mut info.address, address);
                }
            }
            return info;
        }

        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.status == 1
    }
}

/// Outcome of a `+SNPING4` run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PingResult {
    /// Number of echo replies received
    pub replies: u16,
    /// Average round trip time in milliseconds, -1 without replies
    pub rtt: i64,
}

impl PingResult {
    /// Reply time the modem reports for a request that timed out
    pub const LOST_RTT: i64 = 60_000;

    pub fn parse(reply: &[u8]) -> Self {
        let mut rest = Cursor::new(reply);
        let mut replies: u16 = 0;
        let mut total: i64 = 0;

        while let Some(next) = rest.after_str(b"+SNPING4:") {
            rest = next;
            let line = next.line();

            // `<seq>,<ip>,<time>`: the time follows the second comma
            let Some(rtt) = line
                .after_nth(b',', 1)
                .and_then(|c| c.digits())
                .map(|d| text_to_integer(d, None))
            else {
                continue;
            };
            if rtt >= Self::LOST_RTT {
                continue;
            }
            replies = replies.saturating_add(1);
            total = total.saturating_add(rtt);
        }

        let rtt = if replies == 0 {
            -1
        } else {
            total / i64::from(replies)
        };
        Self { replies, rtt }
    }
}

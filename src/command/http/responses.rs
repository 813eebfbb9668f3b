//! Responses for HTTP(S) Commands
use crate::parse::{text_to_integer, Cursor};

/// Completion line of `+SHREQ`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HttpResult {
    /// HTTP status code, 0 when unknown
    pub status: u16,
    /// Length of the response body, -1 when unknown
    pub length: i64,
}

impl Default for HttpResult {
    fn default() -> Self {
        Self {
            status: 0,
            length: -1,
        }
    }
}

impl HttpResult {
    /// Read `+SHREQ: "<type>",<StatusCode>,<DataLen>`.
    pub fn parse(reply: &[u8]) -> Self {
        let mut rest = Cursor::new(reply);
        while let Some(next) = rest.after_str(b"+SHREQ:") {
            rest = next;
            let line = next.line();

            let Some(quoted) = line.after_nth(b'"', 1) else {
                continue;
            };

            let mut result = Self::default();
            if let Some(status) = quoted.after_nth(b',', 0).and_then(|c| c.digits()) {
                result.status = u16::try_from(text_to_integer(status, None)).unwrap_or(0);
            }
            if let Some(length) = quoted.after_nth(b',', 1).and_then(|c| c.digits()) {
                result.length = text_to_integer(length, None);
            }
            return result;
        }

        Self::default()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// `+SHSTATE: <status>`, `true` when connected
pub fn parse_connection_state(reply: &[u8]) -> bool {
    Cursor::new(reply)
        .after_str(b"+SHSTATE:")
        .and_then(|c| c.integer())
        == Some(1)
}

/// Header of a `+SHREAD: <data_len>\r\n<data>` block: the announced length
/// and the offset in `reply` where the data starts.
pub fn parse_read_header(reply: &[u8]) -> Option<(usize, usize)> {
    let cursor = Cursor::new(reply);
    let start = cursor.find_str(b"+SHREAD:")?;
    let header = Cursor::new(&cursor.as_bytes()[start..]);

    let len = header
        .after_nth(b':', 0)?
        .integer()
        .and_then(|n| usize::try_from(n).ok())?;
    let newline = header.find(b'\n')?;

    Some((len, start + newline + 1))
}

/// `>` prompt of `+SHBOD`
pub fn is_body_prompt(reply: &[u8]) -> bool {
    Cursor::new(reply).find(b'>').is_some()
}

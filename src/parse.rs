//! Scanning helpers for the fixed-format text replies of the modem.
//!
//! Replies are never fully tokenized. Each reader locates a delimiter (comma,
//! space or quote) and reads a digit run or a fixed span right after it. Every
//! lookup returns an `Option`, and the callers fall back to a per-field
//! sentinel value when the expected delimiter is missing.

use heapless::String;

/// Parse a decimal integer out of `text`.
///
/// Without `len` an optional leading `-` followed by a run of digits is read,
/// and the run ends at the first non-digit. With `len` the span
/// `text[..len]` is scanned: every `-` in it sets the sign flag, digits
/// accumulate and any other byte ends the scan.
///
/// Empty input, or input without digits (e.g. a lone `-`), yields `0`.
/// Values beyond the `i64` range saturate.
pub fn text_to_integer(text: &[u8], len: Option<usize>) -> i64 {
    let mut negative = false;
    let mut magnitude: u64 = 0;

    match len {
        Some(len) => {
            for &b in &text[..len.min(text.len())] {
                match b {
                    b'-' => negative = true,
                    b'0'..=b'9' => {
                        magnitude = magnitude
                            .saturating_mul(10)
                            .saturating_add(u64::from(b - b'0'))
                    }
                    _ => break,
                }
            }
        }
        None => {
            let digits = match text.first() {
                Some(b'-') => {
                    negative = true;
                    &text[1..]
                }
                _ => text,
            };
            for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
                magnitude = magnitude
                    .saturating_mul(10)
                    .saturating_add(u64::from(b - b'0'));
            }
        }
    }

    let value = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    value.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Read-only view over a reply with offset based lookups.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    buf: &'a [u8],
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        // Stop at the NUL the transport appends after each fill.
        let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
        Self { buf: &buf[..end] }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Offset of the first `needle`
    pub fn find(&self, needle: u8) -> Option<usize> {
        self.buf.iter().position(|&b| b == needle)
    }

    /// Offset of the last `needle`
    pub fn rfind(&self, needle: u8) -> Option<usize> {
        self.buf.iter().rposition(|&b| b == needle)
    }

    /// Offset of the `n`th (zero based) occurrence of `needle`
    pub fn find_nth(&self, needle: u8, n: usize) -> Option<usize> {
        self.buf
            .iter()
            .enumerate()
            .filter(|(_, &b)| b == needle)
            .nth(n)
            .map(|(i, _)| i)
    }

    /// Offset of the first occurrence of the byte string `needle`
    pub fn find_str(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() || needle.len() > self.buf.len() {
            return None;
        }
        self.buf.windows(needle.len()).position(|w| w == needle)
    }

    /// Cursor positioned right after the first `needle` byte string
    pub fn after_str(&self, needle: &[u8]) -> Option<Cursor<'a>> {
        self.find_str(needle)
            .map(|i| Cursor::new(&self.buf[i + needle.len()..]))
    }

    /// Cursor positioned right after the `n`th occurrence of `needle`
    pub fn after_nth(&self, needle: u8, n: usize) -> Option<Cursor<'a>> {
        self.find_nth(needle, n)
            .map(|i| Cursor::new(&self.buf[i + 1..]))
    }

    /// Cursor positioned right after the last occurrence of `needle`
    pub fn after_last(&self, needle: u8) -> Option<Cursor<'a>> {
        self.rfind(needle).map(|i| Cursor::new(&self.buf[i + 1..]))
    }

    /// Bytes up to (not including) the first `end`, or everything left
    pub fn until(&self, end: u8) -> &'a [u8] {
        match self.find(end) {
            Some(i) => &self.buf[..i],
            None => self.buf,
        }
    }

    /// The rest of the current line, without its terminator
    pub fn line(&self) -> Cursor<'a> {
        let end = self
            .buf
            .iter()
            .position(|&b| b == b'\r' || b == b'\n')
            .unwrap_or(self.buf.len());
        Cursor { buf: &self.buf[..end] }
    }

    /// Optional `-` followed by the digit run at the start of the cursor
    pub fn digits(&self) -> Option<&'a [u8]> {
        let sign = usize::from(self.buf.first() == Some(&b'-'));
        let run = self.buf[sign..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if run == 0 {
            None
        } else {
            Some(&self.buf[..sign + run])
        }
    }

    /// Integer at the start of the cursor, skipping leading spaces
    pub fn integer(&self) -> Option<i64> {
        let start = self.buf.iter().take_while(|&&b| b == b' ').count();
        Cursor::new(&self.buf[start..])
            .digits()
            .map(|d| text_to_integer(d, None))
    }
}

/// Copy `src` into a fixed-capacity string, truncating at capacity and at
/// the first byte that is not printable ASCII.
pub fn copy_field<const N: usize>(dst: &mut String<N>, src: &[u8]) {
    dst.clear();
    for &b in src {
        if !(0x20..0x7f).contains(&b) || dst.push(b as char).is_err() {
            break;
        }
    }
}

/// Clamp an integer into the `u8` range, mapping negatives to `sentinel`.
pub(crate) fn to_u8(value: i64, sentinel: u8) -> u8 {
    u8::try_from(value).unwrap_or(sentinel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    fn format(n: i64) -> String<24> {
        let mut s = String::new();
        write!(s, "{}", n).unwrap();
        s
    }

    #[test]
    fn integer_round_trip() {
        for n in [
            0,
            7,
            -7,
            42,
            -1_000,
            123_456_789,
            -987_654_321_012,
            i64::MAX,
            i64::MIN,
        ] {
            let text = format(n);
            assert_eq!(text_to_integer(text.as_bytes(), None), n);
            assert_eq!(text_to_integer(text.as_bytes(), Some(text.len())), n);
        }
    }

    #[test]
    fn integer_degenerate_input() {
        assert_eq!(text_to_integer(b"-", None), 0);
        assert_eq!(text_to_integer(b"-", Some(1)), 0);
        assert_eq!(text_to_integer(b"", None), 0);
        assert_eq!(text_to_integer(b"", Some(0)), 0);
        assert_eq!(text_to_integer(b"abc", None), 0);
    }

    #[test]
    fn integer_stops_at_delimiter() {
        assert_eq!(text_to_integer(b"1360\r\n", None), 1360);
        assert_eq!(text_to_integer(b"12,34", None), 12);
        assert_eq!(text_to_integer(b"12,34", Some(5)), 12);
        // Explicit span shorter than the run
        assert_eq!(text_to_integer(b"98765", Some(2)), 98);
        // Span longer than the input
        assert_eq!(text_to_integer(b"55", Some(10)), 55);
    }

    #[test]
    fn integer_sign_anywhere_in_span() {
        assert_eq!(text_to_integer(b"12-3", Some(4)), -123);
        assert_eq!(text_to_integer(b"12-3", None), 12);
    }

    #[test]
    fn integer_saturates() {
        assert_eq!(text_to_integer(b"99999999999999999999999", None), i64::MAX);
        assert_eq!(text_to_integer(b"-99999999999999999999999", None), i64::MIN);
    }

    #[test]
    fn cursor_lookups() {
        let c = Cursor::new(b"+CREG: 0,5\r\n\0garbage,9");
        assert_eq!(c.len(), 12);
        assert_eq!(c.find(b','), Some(8));
        assert_eq!(c.find_nth(b',', 1), None);
        assert_eq!(c.after_nth(b' ', 0).and_then(|c| c.integer()), Some(0));
        assert_eq!(c.after_last(b',').and_then(|c| c.integer()), Some(5));
        assert!(c.find_str(b"garbage").is_none());
        assert_eq!(c.after_str(b"+CREG:").and_then(|c| c.integer()), Some(0));
    }

    #[test]
    fn cursor_until_and_digits() {
        let c = Cursor::new(b"\"10.0.0.5\",x");
        let ip = c.after_nth(b'"', 0).map(|c| c.until(b'"'));
        assert_eq!(ip, Some(&b"10.0.0.5"[..]));
        assert_eq!(Cursor::new(b"-").digits(), None);
        assert_eq!(Cursor::new(b"-12a").digits(), Some(&b"-12"[..]));
        assert_eq!(Cursor::new(b"").integer(), None);
    }

    #[test]
    fn cursor_line_stops_at_line_end() {
        let c = Cursor::new(b" 0,1\r\n+CNACT: 1,1,\"10.0.0.9\"");
        assert_eq!(c.line().as_bytes(), b" 0,1");
        assert!(c.line().find_str(b"10.0.0.9").is_none());
        assert_eq!(Cursor::new(b"5\n6").line().as_bytes(), b"5");
        assert_eq!(Cursor::new(b"5,6").line().as_bytes(), b"5,6");
    }

    #[test]
    fn copy_field_truncates() {
        let mut s: String<4> = String::new();
        copy_field(&mut s, b"123456");
        assert_eq!(s.as_str(), "1234");
        copy_field(&mut s, b"ab\r\n");
        assert_eq!(s.as_str(), "ab");
    }
}

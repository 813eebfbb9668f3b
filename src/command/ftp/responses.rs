//! Responses for FTP Commands
use crate::parse::{to_u8, Cursor};

/// A `+FTPPUT` status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PutStatus {
    /// `+FTPPUT: 1,<code>[,<maxlength>]`
    Session { code: u8, max_len: Option<usize> },
    /// `+FTPPUT: 2,<cnflength>`
    Accepted { len: usize },
}

impl PutStatus {
    /// The last `+FTPPUT:` line of `reply`, `None` when there is none or it
    /// can not be read.
    pub fn parse(reply: &[u8]) -> Option<Self> {
        let mut rest = Cursor::new(reply);
        let mut last = None;
        while let Some(line) = rest.after_str(b"+FTPPUT:") {
            rest = line;
            last = Some(line);
        }
        let line = last?.line();

        let field = |n: usize| line.after_nth(b',', n).and_then(|c| c.integer());

        match line.integer()? {
            1 => {
                let code = to_u8(field(0)?, 0xFF);
                let max_len = field(1).and_then(|n| usize::try_from(n).ok());
                Some(Self::Session { code, max_len })
            }
            2 => {
                let len = usize::try_from(field(0)?).ok()?;
                Some(Self::Accepted { len })
            }
            _ => None,
        }
    }
}

/// `+FTPSTATE: <state>`, 0 idle, 1 session open, 0xFF unknown
pub fn parse_ftp_state(reply: &[u8]) -> u8 {
    Cursor::new(reply)
        .after_str(b"+FTPSTATE:")
        .and_then(|c| c.integer())
        .map_or(0xFF, |n| to_u8(n, 0xFF))
}

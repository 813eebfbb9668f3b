//! Argument and parameter types used by HTTP(S) Commands

/// `<type>` of `+SHREQ`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum HttpMethod {
    Get = 1,
    Put = 2,
    Post = 3,
    Patch = 4,
    Head = 5,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
        }
    }
}

/// Parameter names accepted by `+SHCONF`
pub mod param {
    pub const URL: &str = "URL";
    pub const BODY_LEN: &str = "BODYLEN";
    pub const HEADER_LEN: &str = "HEADERLEN";
}

/// Largest body the module accepts in `+SHCONF="BODYLEN"` and `+SHBOD`
pub const MAX_BODY_LEN: usize = 4096;

/// Largest header buffer the module accepts in `+SHCONF="HEADERLEN"`
pub const MAX_HEADER_LEN: usize = 350;

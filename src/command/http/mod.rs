//! ### HTTP(S) application commands
//!
//! The module keeps a single HTTP connection. The URL and buffer sizes are
//! set with `+SHCONF` before `+SHCONN`; a request is issued with `+SHREQ` and
//! completes asynchronously with a `+SHREQ: "<method>",<status>,<length>`
//! line. The body is then fetched in pieces with `+SHREAD`.

pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;

use super::NoResponse;

/// +SHCONF Set HTTP(S) parameter, string value
#[derive(Clone, AtatCmd)]
#[at_cmd("+SHCONF", NoResponse)]
pub struct ConfigureHttp<'a> {
    #[at_arg(position = 0, len = 16)]
    pub param: &'a str,
    #[at_arg(position = 1, len = 128)]
    pub value: &'a str,
}

/// +SHCONF Set HTTP(S) parameter, integer value
#[derive(Clone, AtatCmd)]
#[at_cmd("+SHCONF", NoResponse)]
pub struct ConfigureHttpSize<'a> {
    #[at_arg(position = 0, len = 16)]
    pub param: &'a str,
    #[at_arg(position = 1)]
    pub value: u32,
}

/// +SHCONN HTTP(S) connection
#[derive(Clone, AtatCmd)]
#[at_cmd("+SHCONN", NoResponse, timeout_ms = 30000)]
pub struct Connect;

/// +SHDISC Disconnect HTTP(S)
#[derive(Clone, AtatCmd)]
#[at_cmd("+SHDISC", NoResponse)]
pub struct Disconnect;

/// +SHSTATE Query HTTP(S) connection status
#[derive(Clone, AtatCmd)]
#[at_cmd("+SHSTATE?", NoResponse)]
pub struct GetConnectionState;

/// +SHCHEAD Clear HTTP(S) header
#[derive(Clone, AtatCmd)]
#[at_cmd("+SHCHEAD", NoResponse)]
pub struct ClearHeaders;

/// +SHAHEAD Add HTTP(S) header
#[derive(Clone, AtatCmd)]
#[at_cmd("+SHAHEAD", NoResponse)]
pub struct AddHeader<'a> {
    #[at_arg(position = 0, len = 64)]
    pub name: &'a str,
    #[at_arg(position = 1, len = 128)]
    pub value: &'a str,
}

/// +SHBOD Set body
///
/// The module answers with a `>` prompt, after which exactly `len` raw bytes
/// are expected within `timeout` milliseconds.
#[derive(Clone, AtatCmd)]
#[at_cmd("+SHBOD", NoResponse)]
pub struct SetBody {
    #[at_arg(position = 0)]
    pub len: usize,
    #[at_arg(position = 1)]
    pub timeout: u32,
}

/// +SHREQ Set request type
#[derive(Clone, AtatCmd)]
#[at_cmd("+SHREQ", NoResponse, timeout_ms = 60000)]
pub struct Request<'a> {
    #[at_arg(position = 0, len = 128)]
    pub path: &'a str,
    /// See [`types::HttpMethod`]
    #[at_arg(position = 1)]
    pub method: u8,
}

/// +SHREAD Read response value
#[derive(Clone, AtatCmd)]
#[at_cmd("+SHREAD", NoResponse, timeout_ms = 10000)]
pub struct ReadBody {
    #[at_arg(position = 0)]
    pub offset: usize,
    #[at_arg(position = 1)]
    pub len: usize,
}

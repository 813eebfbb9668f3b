//! ### APP network (PDP context) commands
//!
//! The SIM7080 keeps up to four PDP contexts for its internal IP stack. A
//! context has to be configured with `+CNCFG` before it can be activated with
//! `+CNACT`; HTTP, FTP and ping all run on top of an active context.

pub mod responses;

use atat::atat_derive::AtatCmd;

use super::NoResponse;

/// +CNCFG PDP configure
#[derive(Clone, AtatCmd)]
#[at_cmd("+CNCFG", NoResponse)]
pub struct ConfigureAppNetwork<'a> {
    #[at_arg(position = 0)]
    pub pdp_index: u8,
    /// 0: dual PDN stack, 1: IPv4, 2: IPv6
    #[at_arg(position = 1)]
    pub ip_type: u8,
    #[at_arg(position = 2, len = 64)]
    pub apn: &'a str,
}

/// +CNACT APP network active
#[derive(Clone, AtatCmd)]
#[at_cmd("+CNACT", NoResponse, timeout_ms = 10000)]
pub struct SetAppNetwork {
    #[at_arg(position = 0)]
    pub pdp_index: u8,
    /// 0: deactive, 1: active, 2: auto active
    #[at_arg(position = 1)]
    pub action: u8,
}

/// +CNACT APP network active, read command
///
/// Reports one `+CNACT: <pdpidx>,<statusx>,<address>` line per context.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CNACT?", NoResponse)]
pub struct GetAppNetwork;

/// +SNPING4 Send IPv4 ping
#[derive(Clone, AtatCmd)]
#[at_cmd("+SNPING4", NoResponse, timeout_ms = 10000)]
pub struct Ping<'a> {
    #[at_arg(position = 0, len = 15)]
    pub address: &'a str,
    #[at_arg(position = 1)]
    pub count: u16,
    #[at_arg(position = 2)]
    pub size: u16,
    /// Per request timeout in milliseconds
    #[at_arg(position = 3)]
    pub timeout: u32,
}

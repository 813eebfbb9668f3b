//! ### Network service and mobile equipment control commands

pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;

use super::NoResponse;

/// +CREG Network registration
///
/// Reports `+CREG: <n>,<stat>[,<lac>,<ci>]`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CREG?", NoResponse)]
pub struct GetNetworkRegistration;

/// +CSQ Signal quality report
#[derive(Clone, AtatCmd)]
#[at_cmd("+CSQ", NoResponse)]
pub struct GetSignalQuality;

/// +COPS Operator selection, test command
///
/// Lists every operator present in the network. A full scan can take several
/// minutes.
#[derive(Clone, AtatCmd)]
#[at_cmd("+COPS=?", NoResponse, timeout_ms = 180000)]
pub struct GetOperators;

/// +COPS Operator selection
#[derive(Clone, AtatCmd)]
#[at_cmd("+COPS", NoResponse, timeout_ms = 120000)]
pub struct SetOperator<'a> {
    /// 1: manual selection
    #[at_arg(position = 0)]
    pub mode: u8,
    /// 0: long alphanumeric, 1: short alphanumeric, 2: numeric
    #[at_arg(position = 1)]
    pub format: u8,
    #[at_arg(position = 2, len = 24)]
    pub oper: &'a str,
}

/// +CFUN Set phone functionality
#[derive(Clone, AtatCmd)]
#[at_cmd("+CFUN", NoResponse, timeout_ms = 10000)]
pub struct SetFunctionality {
    #[at_arg(position = 0)]
    pub fun: u8,
}

/// +CFUN Read phone functionality
#[derive(Clone, AtatCmd)]
#[at_cmd("+CFUN?", NoResponse)]
pub struct GetFunctionality;

/// +CCLK Clock
///
/// Reports `+CCLK: "yy/MM/dd,hh:mm:ss±zz"`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CCLK?", NoResponse)]
pub struct GetClock;

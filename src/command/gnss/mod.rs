//! ### GNSS commands

pub mod responses;

use atat::atat_derive::AtatCmd;

use super::NoResponse;

/// +CGNSPWR GNSS power control
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGNSPWR", NoResponse)]
pub struct SetGnssPower {
    #[at_arg(position = 0)]
    pub on: u8,
}

/// +CGNSCOLD GNSS cold start
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGNSCOLD", NoResponse)]
pub struct ColdStart;

/// +CGNSWARM GNSS warm start
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGNSWARM", NoResponse)]
pub struct WarmStart;

/// +CGNSHOT GNSS hot start
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGNSHOT", NoResponse)]
pub struct HotStart;

/// +CGNSINF GNSS navigation information parsed from NMEA sentences
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGNSINF", NoResponse, timeout_ms = 2000)]
pub struct GetNavigationInfo;

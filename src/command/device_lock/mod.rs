//! ### Device lock

pub mod responses;

use atat::atat_derive::AtatCmd;

use super::NoResponse;

/// +CPIN Enter PIN, read command
#[derive(Clone, AtatCmd)]
#[at_cmd("+CPIN?", NoResponse, timeout_ms = 5000)]
pub struct GetPinStatus;

/// +CPIN Enter PIN
///
/// If no PIN request is pending, the corresponding error code is returned.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CPIN", NoResponse, timeout_ms = 5000)]
pub struct SetPin<'a> {
    #[at_arg(position = 0, len = 4)]
    pub pin: &'a str,
}

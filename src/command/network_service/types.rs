//! Argument and parameter types used by Network service Commands and Responses

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistrationStatus {
    /// 0: not registered, the MT is not currently searching an operator
    NotRegistered,
    /// 1: registered, home network
    Home,
    /// 2: not registered, but the MT is currently searching an operator
    Searching,
    /// 3: registration denied
    Denied,
    /// 4: unknown
    Unknown,
    /// 5: registered, roaming
    Roaming,
    /// The reply could not be read
    Invalid,
}

impl From<i64> for RegistrationStatus {
    fn from(v: i64) -> Self {
        match v {
            0 => Self::NotRegistered,
            1 => Self::Home,
            2 => Self::Searching,
            3 => Self::Denied,
            4 => Self::Unknown,
            5 => Self::Roaming,
            _ => Self::Invalid,
        }
    }
}

impl RegistrationStatus {
    pub fn is_registered(self) -> bool {
        matches!(self, Self::Home | Self::Roaming)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Functionality {
    /// Minimum functionality
    Minimum = 0,
    /// Full functionality (default)
    Full = 1,
    /// Disable phone both transmit and receive RF circuits
    DisableRf = 4,
    /// Factory test mode
    FactoryTest = 5,
    /// Reset
    Reset = 6,
    /// Offline mode
    Offline = 7,
}

impl Functionality {
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::Minimum,
            1 => Self::Full,
            4 => Self::DisableRf,
            5 => Self::FactoryTest,
            6 => Self::Reset,
            7 => Self::Offline,
            _ => return None,
        })
    }
}

/// Format of `<oper>` in +COPS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OperatorFormat {
    Long = 0,
    Short = 1,
    Numeric = 2,
}

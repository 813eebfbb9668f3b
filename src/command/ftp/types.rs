//! Argument and parameter types used by FTP Commands
use heapless::String;

/// `+FTPTYPE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferType {
    Ascii,
    #[default]
    Binary,
}

impl TransferType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascii => "A",
            Self::Binary => "I",
        }
    }
}

/// `+FTPPUTOPT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PutOption {
    /// Append to an existing file
    Append,
    /// Store a file, replacing any existing one
    #[default]
    Store,
    /// Store under a server chosen unique name
    StoreUnique,
}

impl PutOption {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Append => "APPE",
            Self::Store => "STOR",
            Self::StoreUnique => "STOU",
        }
    }
}

/// Parameters of an FTP session
#[derive(Debug, Clone)]
pub struct FtpConfig {
    /// PDP context the session runs on
    pub cid: u8,
    pub server: String<64>,
    pub port: u16,
    pub user: String<32>,
    pub password: String<32>,
    pub transfer_type: TransferType,
    pub put_option: PutOption,
}

impl Default for FtpConfig {
    fn default() -> Self {
        Self {
            cid: 0,
            server: String::new(),
            port: 21,
            user: String::new(),
            password: String::new(),
            transfer_type: TransferType::default(),
            put_option: PutOption::default(),
        }
    }
}

/// Outcome of an FTP put
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FtpResult {
    Success,
    NetError,
    DnsError,
    ConnectError,
    /// The module gave up on the server (code 64)
    SessionTimeout,
    ServerError,
    OperationNotAllowed,
    ReplayError,
    UserError,
    PasswordError,
    TypeError,
    RestError,
    PassiveError,
    ActiveError,
    OperateError,
    UploadError,
    DownloadError,
    ManualQuit,
    /// No `+FTPPUT` line arrived in time
    Timeout,
    /// The module answered something the put sequence does not allow
    ProtocolError,
    Other(u8),
}

impl FtpResult {
    /// Map a `+FTPPUT: 1,<error>` code
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Success,
            61 => Self::NetError,
            62 => Self::DnsError,
            63 => Self::ConnectError,
            64 => Self::SessionTimeout,
            65 => Self::ServerError,
            66 => Self::OperationNotAllowed,
            70 => Self::ReplayError,
            71 => Self::UserError,
            72 => Self::PasswordError,
            73 => Self::TypeError,
            74 => Self::RestError,
            75 => Self::PassiveError,
            76 => Self::ActiveError,
            77 => Self::OperateError,
            78 => Self::UploadError,
            79 => Self::DownloadError,
            86 => Self::ManualQuit,
            n => Self::Other(n),
        }
    }

    /// Codes the module reports for a failed session
    pub fn is_module_error(code: u8) -> bool {
        (61..=94).contains(&code)
    }
}

/// Progress of a put session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FtpState {
    Idle,
    SessionOpen,
    ChunkInFlight,
    ChunkConfirmed,
    Closing,
    Closed,
    Error,
}

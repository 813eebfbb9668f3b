#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    // Channel errors
    Serial(embedded_io::ErrorKind),
    UartClosed,
    IoPin,

    // Command errors
    CommandTooLong,
    InvalidParameter,
}

impl From<embedded_io::ErrorKind> for Error {
    fn from(e: embedded_io::ErrorKind) -> Self {
        Self::Serial(e)
    }
}

/// Map any serial channel error onto its [`embedded_io::ErrorKind`].
pub(crate) fn from_serial<E: embedded_io::Error>(e: E) -> Error {
    Error::Serial(e.kind())
}

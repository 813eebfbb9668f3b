use embassy_time::Duration;

/// Low time of `PWRKEY` to toggle the module on or off
pub fn pwr_key_pulse_time() -> Duration {
    Duration::from_millis(1100)
}

/// Time to wait after a power-on pulse before the UART accepts commands.
/// The hardware design manual asks for at least 1.8 s.
pub fn boot_time() -> Duration {
    Duration::from_millis(1800)
}

/// Blind wait between writing a command and reading its reply
pub fn command_delay() -> Duration {
    Duration::from_millis(100)
}

/// Default time to wait for the first byte of a reply
pub fn response_timeout() -> Duration {
    Duration::from_millis(1000)
}

/// Granularity of the "any bytes available" wait
pub fn poll_interval() -> Duration {
    Duration::from_millis(10)
}

/// Time to wait for the FTP server to answer a put request
pub fn ftp_response_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Time to wait for an HTTP request to complete
pub fn http_response_timeout() -> Duration {
    Duration::from_secs(60)
}

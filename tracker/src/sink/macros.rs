//! log macro's for sink logging

/// Writes a debug! message to the app::sink logger
#[macro_export]
macro_rules! sink_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "app::sink", $($arg)+)
    };
}

/// Writes an info! message to the app::sink logger
#[macro_export]
macro_rules! sink_info {
    ($($arg:tt)+) => {
        log::info!(target: "app::sink", $($arg)+)
    };
}

/// Writes an warn! message to the app::sink logger
#[macro_export]
macro_rules! sink_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "app::sink", $($arg)+)
    };
}

/// Writes an error! message to the app::sink logger
#[macro_export]
macro_rules! sink_error {
    ($($arg:tt)+) => {
        log::error!(target: "app::sink", $($arg)+)
    };
}

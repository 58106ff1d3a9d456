//! log macro's for sampler logging

/// Writes a debug! message to the app::sampler logger
#[macro_export]
macro_rules! sampler_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "app::sampler", $($arg)+)
    };
}

/// Writes an info! message to the app::sampler logger
#[macro_export]
macro_rules! sampler_info {
    ($($arg:tt)+) => {
        log::info!(target: "app::sampler", $($arg)+)
    };
}

/// Writes an warn! message to the app::sampler logger
#[macro_export]
macro_rules! sampler_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "app::sampler", $($arg)+)
    };
}

/// Writes an error! message to the app::sampler logger
#[macro_export]
macro_rules! sampler_error {
    ($($arg:tt)+) => {
        log::error!(target: "app::sampler", $($arg)+)
    };
}

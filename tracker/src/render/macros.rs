//! log macro's for render logging

/// Writes a debug! message to the app::render logger
#[macro_export]
macro_rules! render_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "app::render", $($arg)+)
    };
}

/// Writes an info! message to the app::render logger
#[macro_export]
macro_rules! render_info {
    ($($arg:tt)+) => {
        log::info!(target: "app::render", $($arg)+)
    };
}

/// Writes an warn! message to the app::render logger
#[macro_export]
macro_rules! render_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "app::render", $($arg)+)
    };
}

/// Writes an error! message to the app::render logger
#[macro_export]
macro_rules! render_error {
    ($($arg:tt)+) => {
        log::error!(target: "app::render", $($arg)+)
    };
}

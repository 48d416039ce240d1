//! Reazo logging
//!
//! Small, environment-controlled logging used across the Reazo crates.
//!
//! # Usage
//!
//! ```rust
//! use reazo_log::{debug, info, trace, warn};
//!
//! info!("schema loaded with {} forms", 3);
//! debug!(target: "reazo::forms", "field {} is invalid", "username");
//! trace!("evaluating rule");
//! warn!("falling back to defaults");
//! ```
//!
//! # Environment Variables
//!
//! - `REAZO_DEBUG=1` - enable debug output
//! - `REAZO_LOG_LEVEL=trace|debug|info|warn|error|off`
//! - `REAZO_LOG_FORMAT=pretty|compact|json` (default `json`)
//! - `REAZO_LOG_COLOR=1|0`
//! - `REAZO_LOG_TIMESTAMPS=1|0`
//!
//! Records emitted through the `log` facade can be routed into the same
//! output with [`install_log_bridge`].

mod level;
mod settings;
mod sink;

pub use level::{Format, Level};
pub use settings::{
    ENV_COLOR, ENV_DEBUG, ENV_FORMAT, ENV_LEVEL, ENV_TIMESTAMPS, LogSettings,
};
pub use sink::render;

use once_cell::sync::Lazy;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

// ============================================================================
// Global State
// ============================================================================

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

static SETTINGS: Lazy<LogSettings> = Lazy::new(|| {
    let settings = LogSettings::from_env();
    DEBUG_ENABLED.store(settings.debug, Ordering::SeqCst);
    LOG_LEVEL.store(settings.level as u8, Ordering::SeqCst);
    settings
});

/// Read settings from the environment now instead of on first use.
pub fn init() {
    Lazy::force(&SETTINGS);
}

/// Settings captured from the environment.
pub fn settings() -> &'static LogSettings {
    &SETTINGS
}

/// Whether debug mode is on.
#[inline]
pub fn is_debug_enabled() -> bool {
    init();
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Whether records at `level` are emitted.
#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    init();
    if level == Level::Debug && is_debug_enabled() {
        return true;
    }
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

/// Current minimum level.
pub fn current_level() -> Level {
    init();
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Change the minimum level at runtime.
pub fn set_level(level: Level) {
    init();
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
    log::set_max_level(level.to_level_filter());
}

/// Toggle debug mode at runtime. Enabling it lowers the level to `Debug`.
pub fn set_debug(enabled: bool) {
    init();
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        set_level(Level::Debug);
    }
}

// ============================================================================
// Emission
// ============================================================================

/// Emit a record. Used by the macros.
#[doc(hidden)]
pub fn emit(level: Level, target: &str, args: fmt::Arguments<'_>) {
    let settings = settings();
    if !is_level_enabled(level) {
        return;
    }
    let message = match args.as_str() {
        Some(s) => s.to_string(),
        None => args.to_string(),
    };
    sink::write(level, target, &message, settings);
}

// ============================================================================
// `log` facade bridge
// ============================================================================

struct Bridge;

impl log::Log for Bridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        is_level_enabled(metadata.level().into())
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            emit(record.level().into(), record.target(), *record.args());
        }
    }

    fn flush(&self) {}
}

static BRIDGE: Bridge = Bridge;

/// Install this crate as the global `log` logger.
///
/// Fails if another logger has already been registered.
pub fn install_log_bridge() -> Result<(), log::SetLoggerError> {
    init();
    log::set_logger(&BRIDGE)?;
    log::set_max_level(current_level().to_level_filter());
    Ok(())
}

// ============================================================================
// Macros
// ============================================================================

/// Log at trace level.
#[macro_export]
macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Trace) {
            $crate::emit($crate::Level::Trace, $target, format_args!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::trace!(target: module_path!(), $($arg)+)
    };
}

/// Log at debug level (also on when `REAZO_DEBUG=1`).
///
/// ```rust
/// use reazo_log::debug;
///
/// let field = "password";
/// debug!("field {} failed validation", field);
/// debug!(target: "reazo::engine", "rule list empty");
/// ```
#[macro_export]
macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Debug) {
            $crate::emit($crate::Level::Debug, $target, format_args!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::debug!(target: module_path!(), $($arg)+)
    };
}

/// Log at info level.
#[macro_export]
macro_rules! info {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Info) {
            $crate::emit($crate::Level::Info, $target, format_args!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::info!(target: module_path!(), $($arg)+)
    };
}

/// Log at warn level.
#[macro_export]
macro_rules! warn {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Warn) {
            $crate::emit($crate::Level::Warn, $target, format_args!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::warn!(target: module_path!(), $($arg)+)
    };
}

/// Log at error level.
#[macro_export]
macro_rules! error {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Error) {
            $crate::emit($crate::Level::Error, $target, format_args!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::error!(target: module_path!(), $($arg)+)
    };
}

// ============================================================================
// Tracing Integration
// ============================================================================

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! A `tracing` subscriber honoring the `REAZO_*` settings.

    use super::*;

    /// Subscriber filtered at the configured level unless `RUST_LOG` is set.
    pub fn subscriber() -> impl tracing::Subscriber {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{EnvFilter, fmt};

        let settings = settings();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(settings.level.as_str().to_ascii_lowercase()));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(settings.color))
    }
}

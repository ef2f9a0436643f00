//! Categorized logging for the vela crates.
//!
//! Messages are sent through the [`log`] facade, with the category name used as the log target, so any `log` backend can
//! consume them. [`init`] installs the default `env_logger` backend.

use core::fmt::Display;

pub use log::SetLoggerError;

#[doc(hidden)]
pub mod __private {
    pub use log;
}

/// Logging level
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum LogLevel {
    /// Severe error: will probably result in a crash
    Severe,
    /// Error: may not result in a crash
    Error,
    /// Warning: While not as bad as an error, it may result to something like a performance regression
    Warning,
    /// General info
    Info,
    /// Verbose info
    Verbose,
    /// Debug info (includes verbose info)
    Debug,
}

impl LogLevel {
    /// Get the `log` level messages of this level are emitted at
    pub const fn to_level(self) -> log::Level {
        match self {
            LogLevel::Severe  => log::Level::Error,
            LogLevel::Error   => log::Level::Error,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Info    => log::Level::Info,
            LogLevel::Verbose => log::Level::Debug,
            LogLevel::Debug   => log::Level::Trace,
        }
    }

    /// Get the filter directive that lets through this level and all more severe levels
    pub const fn filter_directive(self) -> &'static str {
        match self {
            LogLevel::Severe  => "error",
            LogLevel::Error   => "error",
            LogLevel::Warning => "warn",
            LogLevel::Info    => "info",
            LogLevel::Verbose => "debug",
            LogLevel::Debug   => "trace",
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Severe  => f.write_str("SEVERE"),
            LogLevel::Error   => f.write_str("ERROR"),
            LogLevel::Warning => f.write_str("WARNING"),
            LogLevel::Info    => f.write_str("INFO"),
            LogLevel::Verbose => f.write_str("VERBOSE"),
            LogLevel::Debug   => f.write_str("DEBUG"),
        }
    }
}

/// Log category
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LogCategory {
    category     : &'static str,
    sub_category : Option<&'static str>
}

impl LogCategory {
    pub const fn new(name: &'static str) -> Self {
        Self { category: name, sub_category: None }
    }

    pub const fn new_with_sub(name: &'static str, sub_name: &'static str) -> Self {
        Self { category: name, sub_category: Some(sub_name) }
    }

    /// Log target used for messages in this category, this is the top-level category name
    pub const fn target(&self) -> &'static str {
        self.category
    }
}

impl Display for LogCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.sub_category {
            Some(sub) => f.write_fmt(format_args!("{}({sub})", self.category)),
            None => f.write_str(self.category),
        }
    }
}

//------------------------------------------------------------------------------------------------------------------------------

/// Configuration of the default logger
#[derive(Clone, Debug)]
pub struct LoggerConfig {
    /// Least severe level that is logged when the environment does not override it
    pub level      : LogLevel,
    /// Environment variable containing `env_logger` filter directives, e.g. `VELA_LOG=Math=debug`
    pub env_var    : &'static str,
    /// Prefix each message with a timestamp
    pub timestamps : bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warning,
            env_var: "VELA_LOG",
            timestamps: true,
        }
    }
}

/// Install `env_logger` as the global logger.
///
/// Fails if a global logger was already set.
pub fn init(config: &LoggerConfig) -> Result<(), SetLoggerError> {
    let env = env_logger::Env::new().filter_or(config.env_var, config.level.filter_directive());
    let mut builder = env_logger::Builder::from_env(env);
    if config.timestamps {
        builder.format_timestamp_millis();
    } else {
        builder.format_timestamp(None);
    }
    builder.try_init()
}

/// Check if a message with the given category and level would be logged
pub fn is_enabled(category: LogCategory, level: LogLevel) -> bool {
    log::log_enabled!(target: category.target(), level.to_level())
}

//------------------------------------------------------------------------------------------------------------------------------

#[macro_export]
macro_rules! log {
    ($category:expr, $level:expr, $($arg:tt)+) => {{
        let category : $crate::LogCategory = $category;
        let level : $crate::LogLevel = $level;
        $crate::__private::log::log!(target: category.target(), level.to_level(), "{}: {}", category, format_args!($($arg)+));
    }};
}

#[macro_export]
macro_rules! log_severe {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Severe, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_warning {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_info {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_verbose {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Verbose, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAT : LogCategory = LogCategory::new_with_sub("Test", "Sub");

    #[test]
    fn category_display() {
        assert_eq!(format!("{CAT}"), "Test(Sub)");
        assert_eq!(format!("{}", LogCategory::new("Test")), "Test");
        assert_eq!(CAT.target(), "Test");
    }

    #[test]
    fn level_mapping() {
        assert_eq!(LogLevel::Severe.to_level(), log::Level::Error);
        assert_eq!(LogLevel::Verbose.to_level(), log::Level::Debug);
        assert_eq!(LogLevel::Debug.to_level(), log::Level::Trace);
        assert!(LogLevel::Warning < LogLevel::Info);
        assert_eq!(LogLevel::Info.filter_directive(), "info");
    }

    #[test]
    fn init_only_once() {
        let config = LoggerConfig { level: LogLevel::Debug, timestamps: false, ..Default::default() };
        assert!(init(&config).is_ok());
        assert!(init(&config).is_err());

        log_info!(CAT, "logger initialized at {}", config.level);
        log_debug!(CAT, "plain message");
        log_severe!(CAT, "{} + {} = {}", 1, 2, 1 + 2);
    }
}

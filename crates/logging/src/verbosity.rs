//! crates/logging/src/verbosity.rs
//! Level-gated logging macros backed by the thread-local verbosity state.

/// Record an info diagnostic when the flag is enabled at `level` or higher.
///
/// ```
/// use logging::{info_log, drain_events, init, VerbosityConfig};
///
/// init(VerbosityConfig::from_verbose_level(1));
/// drain_events();
/// info_log!(Del, 1, "deleted {}", "a/b");
/// assert_eq!(drain_events()[0].message(), "deleted a/b");
/// ```
#[macro_export]
macro_rules! info_log {
    ($flag:ident, $level:expr, $($arg:tt)*) => {
        if $crate::info_gte($crate::InfoFlag::$flag, $level) {
            $crate::emit_info($crate::InfoFlag::$flag, $level, ::std::format!($($arg)*));
        }
    };
}

/// Record a debug diagnostic when the flag is enabled at `level` or higher.
///
/// The message arguments are only formatted when the event is recorded.
#[macro_export]
macro_rules! debug_log {
    ($flag:ident, $level:expr, $($arg:tt)*) => {
        if $crate::debug_gte($crate::DebugFlag::$flag, $level) {
            $crate::emit_debug($crate::DebugFlag::$flag, $level, ::std::format!($($arg)*));
        }
    };
}

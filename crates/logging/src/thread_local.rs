//! crates/logging/src/thread_local.rs
//! Thread-local storage for verbosity configuration and event collection.

use super::config::VerbosityConfig;
use super::levels::{DebugFlag, InfoFlag};
use std::cell::RefCell;

thread_local! {
    static VERBOSITY: RefCell<VerbosityConfig> = RefCell::new(VerbosityConfig::default());
    #[allow(clippy::missing_const_for_thread_local)]
    static EVENTS: RefCell<Vec<DiagnosticEvent>> = RefCell::new(Vec::new());
}

/// Diagnostic event collected during execution.
#[derive(Clone, Debug)]
pub enum DiagnosticEvent {
    /// Info-level diagnostic event.
    Info {
        /// The info flag category.
        flag: InfoFlag,
        /// The verbosity level.
        level: u8,
        /// The diagnostic message.
        message: String,
    },
    /// Debug-level diagnostic event.
    Debug {
        /// The debug flag category.
        flag: DebugFlag,
        /// The verbosity level.
        level: u8,
        /// The diagnostic message.
        message: String,
    },
}

impl DiagnosticEvent {
    /// Returns the rendered message regardless of category.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Info { message, .. } | Self::Debug { message, .. } => message,
        }
    }
}

/// Initialize verbosity configuration for the current thread.
///
/// Events that pass the configured levels accumulate in a per-thread buffer
/// that grows without bound until [`drain_events`] is called. Long-running
/// consumers with non-zero verbosity must drain periodically.
pub fn init(config: VerbosityConfig) {
    VERBOSITY.with(|v| {
        *v.borrow_mut() = config;
    });
}

/// Check if the info flag is at or above the specified level.
pub fn info_gte(flag: InfoFlag, level: u8) -> bool {
    VERBOSITY.with(|v| v.borrow().info.get(flag) >= level)
}

/// Check if the debug flag is at or above the specified level.
pub fn debug_gte(flag: DebugFlag, level: u8) -> bool {
    VERBOSITY.with(|v| v.borrow().debug.get(flag) >= level)
}

/// Emit an info diagnostic event.
pub fn emit_info(flag: InfoFlag, level: u8, message: String) {
    EVENTS.with(|e| {
        e.borrow_mut().push(DiagnosticEvent::Info {
            flag,
            level,
            message,
        });
    });
}

/// Emit a debug diagnostic event.
pub fn emit_debug(flag: DebugFlag, level: u8, message: String) {
    EVENTS.with(|e| {
        e.borrow_mut().push(DiagnosticEvent::Debug {
            flag,
            level,
            message,
        });
    });
}

/// Drain all collected events, clearing the internal buffer.
pub fn drain_events() -> Vec<DiagnosticEvent> {
    EVENTS.with(|e| e.borrow_mut().drain(..).collect())
}

/// Apply an info flag token to the current configuration.
pub fn apply_info_flag(token: &str) -> Result<(), String> {
    VERBOSITY.with(|v| v.borrow_mut().apply_info_flag(token))
}

/// Apply a debug flag token to the current configuration.
pub fn apply_debug_flag(token: &str) -> Result<(), String> {
    VERBOSITY.with(|v| v.borrow_mut().apply_debug_flag(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_and_check() {
        let mut config = VerbosityConfig::default();
        config.info.del = 2;
        config.debug.io = 3;

        init(config);

        assert!(info_gte(InfoFlag::Del, 1));
        assert!(info_gte(InfoFlag::Del, 2));
        assert!(!info_gte(InfoFlag::Del, 3));

        assert!(debug_gte(DebugFlag::Io, 1));
        assert!(debug_gte(DebugFlag::Io, 3));
        assert!(!debug_gte(DebugFlag::Io, 4));
    }

    #[test]
    fn test_emit_and_drain() {
        init(VerbosityConfig::default());
        drain_events();

        emit_info(InfoFlag::Walk, 1, "test info".to_string());
        emit_debug(DebugFlag::Close, 2, "test debug".to_string());

        let events = drain_events();
        assert_eq!(events.len(), 2);

        match &events[0] {
            DiagnosticEvent::Info {
                flag,
                level,
                message,
            } => {
                assert_eq!(*flag, InfoFlag::Walk);
                assert_eq!(*level, 1);
                assert_eq!(message, "test info");
            }
            other => panic!("expected info event, got {other:?}"),
        }

        match &events[1] {
            DiagnosticEvent::Debug {
                flag,
                level,
                message,
            } => {
                assert_eq!(*flag, DebugFlag::Close);
                assert_eq!(*level, 2);
                assert_eq!(message, "test debug");
            }
            other => panic!("expected debug event, got {other:?}"),
        }

        assert_eq!(drain_events().len(), 0);
    }

    #[test]
    fn message_accessor_covers_both_variants() {
        let info = DiagnosticEvent::Info {
            flag: InfoFlag::Del,
            level: 1,
            message: "removed".to_string(),
        };
        let debug = DiagnosticEvent::Debug {
            flag: DebugFlag::Io,
            level: 1,
            message: "read".to_string(),
        };
        assert_eq!(info.message(), "removed");
        assert_eq!(debug.message(), "read");
    }

    #[test]
    fn apply_flag_tokens_update_current_thread() {
        init(VerbosityConfig::default());
        assert!(apply_info_flag("walk2").is_ok());
        assert!(info_gte(InfoFlag::Walk, 2));

        assert!(apply_debug_flag("iconv").is_ok());
        assert!(debug_gte(DebugFlag::Iconv, 1));

        assert!(apply_debug_flag("not_a_flag").is_err());
    }

    #[test]
    fn reinit_overwrites_config() {
        let mut config = VerbosityConfig::default();
        config.info.misc = 5;
        init(config);
        assert!(info_gte(InfoFlag::Misc, 5));

        init(VerbosityConfig::default());
        assert!(!info_gte(InfoFlag::Misc, 1));
    }

    #[test]
    fn verbosity_is_per_thread() {
        let mut config = VerbosityConfig::default();
        config.debug.walk = 2;
        init(config);

        let other = std::thread::spawn(|| debug_gte(DebugFlag::Walk, 1))
            .join()
            .expect("thread joins");
        assert!(!other);
        assert!(debug_gte(DebugFlag::Walk, 2));
    }
}

//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the lazyfs verbosity system.
//!
//! [`LazyfsLayer`] is a `tracing-subscriber` layer that maps events emitted
//! under the `lazyfs::*` targets onto info and debug flags, filters them
//! against the configuration the layer was built with, and records the events
//! that pass into the same buffer used by [`debug_log!`](crate::debug_log) and
//! [`info_log!`](crate::info_log).
//!
//! Each lazyfs log site emits through exactly one channel: either the
//! `*_log!` macros or a `trace_*!` macro, never both. Installing the layer
//! therefore never records an event twice.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(VerbosityConfig::from_verbose_level(2));
//! tracing::debug!(target: "lazyfs::walk", "listing root");
//! ```

use super::config::VerbosityConfig;
use super::levels::{DebugFlag, InfoFlag};
use super::thread_local::{emit_debug, emit_info};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// A tracing layer that bridges tracing events to the lazyfs verbosity system.
///
/// Filtering uses the layer's own configuration, not the thread-local one, so
/// events emitted on any thread are gated the same way.
pub struct LazyfsLayer {
    config: VerbosityConfig,
}

impl LazyfsLayer {
    /// Create a new layer for the given verbosity configuration.
    #[must_use]
    pub const fn new(config: VerbosityConfig) -> Self {
        Self { config }
    }

    /// The configuration events are filtered against.
    #[must_use]
    pub const fn config(&self) -> &VerbosityConfig {
        &self.config
    }

    /// Map a tracing target to an info flag.
    fn target_to_info_flag(target: &str) -> Option<InfoFlag> {
        match target {
            t if t.contains("::delete") || t.contains("::del") || t == "del" => Some(InfoFlag::Del),
            t if t.contains("::walk") || t == "walk" => Some(InfoFlag::Walk),
            t if t.contains("::misc") || t == "misc" => Some(InfoFlag::Misc),
            _ => None,
        }
    }

    /// Map a tracing target to a debug flag.
    fn target_to_debug_flag(target: &str) -> Option<DebugFlag> {
        match target {
            t if t.contains("::close") || t == "close" => Some(DebugFlag::Close),
            t if t.contains("::delete") || t.contains("::del") || t == "del" => {
                Some(DebugFlag::Del)
            }
            t if t.contains("::iconv") || t == "iconv" => Some(DebugFlag::Iconv),
            t if t.contains("::io") || t == "io" => Some(DebugFlag::Io),
            t if t.contains("::walk") || t == "walk" => Some(DebugFlag::Walk),
            _ => None,
        }
    }

    /// Map a tracing level to a verbosity level.
    const fn level_to_verbosity_level(level: &Level) -> u8 {
        match *level {
            Level::ERROR | Level::WARN | Level::INFO => 1,
            Level::DEBUG => 2,
            Level::TRACE => 3,
        }
    }
}

impl<S> Layer<S> for LazyfsLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();
        let level = metadata.level();
        let verbosity_level = Self::level_to_verbosity_level(level);

        // Info-level events go to info flags; everything chattier goes to debug flags.
        if verbosity_level == 1 {
            if let Some(info_flag) = Self::target_to_info_flag(target) {
                if self.config.info.get(info_flag) >= verbosity_level {
                    if let Some(message) = MessageVisitor::collect(event) {
                        emit_info(info_flag, verbosity_level, message);
                    }
                }
                return;
            }
        }

        if let Some(debug_flag) = Self::target_to_debug_flag(target) {
            // Debug flag levels start at 1, tracing DEBUG maps to 2.
            let flag_level = verbosity_level.saturating_sub(1).max(1);
            if self.config.debug.get(debug_flag) >= flag_level {
                if let Some(message) = MessageVisitor::collect(event) {
                    emit_debug(debug_flag, flag_level, message);
                }
            }
        }
    }
}

/// Visitor to extract message from tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl MessageVisitor {
    fn collect(event: &tracing::Event<'_>) -> Option<String> {
        let mut visitor = Self::default();
        event.record(&mut visitor);
        visitor.message
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Initialize tracing with a lazyfs verbosity configuration.
///
/// Also installs `config` as the current thread's verbosity. Panics if a
/// global subscriber is already installed; see [`try_init_tracing`].
pub fn init_tracing(config: VerbosityConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    super::thread_local::init(config.clone());

    tracing_subscriber::registry()
        .with(LazyfsLayer::new(config))
        .init();
}

/// Like [`init_tracing`], but reports an already-installed subscriber as an error.
pub fn try_init_tracing(config: VerbosityConfig) -> Result<(), String> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    super::thread_local::init(config.clone());

    tracing_subscriber::registry()
        .with(LazyfsLayer::new(config))
        .try_init()
        .map_err(|error| error.to_string())
}

/// Initialize tracing with an additional filter layer (for example an
/// `EnvFilter` built from `RUST_LOG`).
pub fn init_tracing_with_filter<F>(config: VerbosityConfig, filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    super::thread_local::init(config.clone());

    tracing_subscriber::registry()
        .with(filter)
        .with(LazyfsLayer::new(config))
        .init();
}

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` provides the diagnostics layer shared by the lazyfs workspace.
//! Diagnostics are grouped into categories ([`InfoFlag`] for user-facing
//! progress, [`DebugFlag`] for internals) and each category carries its own
//! verbosity level, so callers can ask for "deletions at level 2, resource
//! release at level 1" without drowning in line-read chatter.
//!
//! # Design
//!
//! - [`VerbosityConfig`] holds per-flag levels. It can be derived from a
//!   single `-v` count via [`VerbosityConfig::from_verbose_level`] or built
//!   from tokens such as `"del2"` and `"io"`.
//! - The active configuration lives in thread-local storage ([`init`]).
//!   [`info_log!`] and [`debug_log!`] check it before formatting and push
//!   [`DiagnosticEvent`]s into a thread-local buffer drained by
//!   [`drain_events`].
//! - [`LazyfsLayer`] bridges `tracing` events emitted under `lazyfs::*`
//!   targets (see the `trace_*!` macros) into the same buffer.
//!
//! # Invariants
//!
//! - All state is per thread. The lazyfs primitives are single-threaded pull
//!   producers, so a consumer that drives a sequence on one thread sees every
//!   event that sequence produced.
//! - Logging never fails and never panics.
//!
//! # Examples
//!
//! ```
//! use logging::{debug_log, drain_events, init, VerbosityConfig};
//!
//! let mut config = VerbosityConfig::default();
//! config.apply_debug_flag("close2").unwrap();
//! init(config);
//! drain_events();
//!
//! debug_log!(Close, 1, "released {}", "notes.txt");
//! debug_log!(Io, 1, "suppressed");
//!
//! let events = drain_events();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].message(), "released notes.txt");
//! ```

mod config;
mod levels;
mod thread_local;
mod tracing_bridge;
mod tracing_macros;
mod verbosity;

pub use config::VerbosityConfig;
pub use levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};
pub use thread_local::{
    DiagnosticEvent, apply_debug_flag, apply_info_flag, debug_gte, drain_events, emit_debug,
    emit_info, info_gte, init,
};
pub use tracing_bridge::{LazyfsLayer, init_tracing, init_tracing_with_filter, try_init_tracing};

//! crates/logging/src/tracing_macros.rs
//! Convenience macros for lazyfs-specific tracing.
//!
//! These wrap the standard tracing macros with the `lazyfs::*` targets that
//! [`LazyfsLayer`](crate::LazyfsLayer) maps onto verbosity flags. Callers must
//! depend on `tracing` themselves.

/// Emit a line read trace.
///
/// # Example
/// ```ignore
/// trace_io!("read line {} from {}", index, path.display());
/// ```
#[macro_export]
macro_rules! trace_io {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "lazyfs::io", $($arg)*)
    };
}

/// Emit a resource release trace.
///
/// # Example
/// ```ignore
/// trace_close!("closed {}", path.display());
/// ```
#[macro_export]
macro_rules! trace_close {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "lazyfs::close", $($arg)*)
    };
}

/// Emit a traversal trace.
///
/// # Example
/// ```ignore
/// trace_walk!("listing {}", path.display());
/// ```
#[macro_export]
macro_rules! trace_walk {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "lazyfs::walk", $($arg)*)
    };
}

/// Emit a character set trace.
///
/// # Example
/// ```ignore
/// trace_iconv!("decoding {} as {}", path.display(), charset);
/// ```
#[macro_export]
macro_rules! trace_iconv {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "lazyfs::iconv", $($arg)*)
    };
}

/// Emit a warning that is never filtered by target-specific flags.
///
/// # Example
/// ```ignore
/// trace_warn!("failed to release {}: {}", path.display(), error);
/// ```
#[macro_export]
macro_rules! trace_warn {
    ($($arg:tt)*) => {
        ::tracing::warn!(target: "lazyfs::misc", $($arg)*)
    };
}

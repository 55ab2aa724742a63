//! Logging abstraction
//!
//! Provides unified logging macros that work across different targets:
//! - Embedded (`embedded` feature): Uses defmt
//! - Host (`tracing` feature): Uses tracing, subscriber installed by the binary
//! - Host tests: Uses println!
//! - Host non-test: No-op
//!
//! Arguments are restricted to strings and integers so the same call site
//! formats under defmt and `core::fmt` alike. Use `.name()` on states,
//! events and sectors.

/// Log info message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "embedded"), feature = "tracing"))]
        ::tracing::info!($($arg)*);

        #[cfg(all(not(feature = "embedded"), not(feature = "tracing"), test))]
        println!("[INFO] {}", format_args!($($arg)*));

        #[cfg(not(any(feature = "embedded", feature = "tracing", test)))]
        let _ = format_args!($($arg)*);
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "embedded"), feature = "tracing"))]
        ::tracing::warn!($($arg)*);

        #[cfg(all(not(feature = "embedded"), not(feature = "tracing"), test))]
        println!("[WARN] {}", format_args!($($arg)*));

        #[cfg(not(any(feature = "embedded", feature = "tracing", test)))]
        let _ = format_args!($($arg)*);
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        ::defmt::error!($($arg)*);

        #[cfg(all(not(feature = "embedded"), feature = "tracing"))]
        ::tracing::error!($($arg)*);

        #[cfg(all(not(feature = "embedded"), not(feature = "tracing"), test))]
        eprintln!("[ERROR] {}", format_args!($($arg)*));

        #[cfg(not(any(feature = "embedded", feature = "tracing", test)))]
        let _ = format_args!($($arg)*);
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "embedded"), feature = "tracing"))]
        ::tracing::debug!($($arg)*);

        #[cfg(all(not(feature = "embedded"), not(feature = "tracing"), test))]
        println!("[DEBUG] {}", format_args!($($arg)*));

        #[cfg(not(any(feature = "embedded", feature = "tracing", test)))]
        let _ = format_args!($($arg)*);
    }};
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        ::defmt::trace!($($arg)*);

        #[cfg(all(not(feature = "embedded"), feature = "tracing"))]
        ::tracing::trace!($($arg)*);

        #[cfg(all(not(feature = "embedded"), not(feature = "tracing"), test))]
        println!("[TRACE] {}", format_args!($($arg)*));

        #[cfg(not(any(feature = "embedded", feature = "tracing", test)))]
        let _ = format_args!($($arg)*);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_accept_format_arguments() {
        let state = "gateway";
        let line: u16 = 3;
        crate::log_info!("nav: entered {} at line {}", state, line);
        crate::log_warn!("nav: rejected {}", state);
        crate::log_error!("nav: fault {}", line);
        crate::log_debug!("nav: checkpoint {}", 30u8);
        crate::log_trace!("nav: tick");
    }
}

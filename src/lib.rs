//! Hierarchical page permissions: layered configuration, tree inheritance,
//! group/user evaluation, visibility propagation and locked-field enforcement.

pub mod perms;
pub mod identity;
pub mod content;
pub mod config;
pub mod resolver;
pub mod evaluator;
pub mod visibility;
pub mod locked;
pub mod gate;
pub mod loader;
pub mod error;

// Test-only printing helper: expands to eprintln! during tests and debug builds.
// Usage in tests: tprintln!("debug: {}", value);
#[cfg(any(test, debug_assertions))]
#[macro_export]
macro_rules! tprintln {
    ($($arg:tt)*) => ( eprintln!($($arg)*) );
}

// In non-test builds, provide a no-op tprintln! so calls compile without effect.
#[cfg(not(any(test, debug_assertions)))]
#[macro_export]
macro_rules! tprintln {
    ($($arg:tt)*) => ({
        // Preserve formatting checks in release without producing code
        if false { let _ = format!($($arg)*); }
    });
}

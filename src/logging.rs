/// Conditional logging module for development builds
///
/// The `log!` macro provides informational logging that is compiled out in
/// production (release) builds by default. Warnings and errors should use
/// `leptos::logging::warn!` and `leptos::logging::error!` directly so they
/// survive release builds.
///
/// Logging is enabled when either:
/// - Building in debug mode (`cfg(debug_assertions)`)
/// - The `console_logging` feature is explicitly enabled
///
/// Output goes through `leptos::logging`, which writes to the browser console
/// under wasm and to stdout on native targets (tests, benches).
///
/// # Examples
///
/// ```ignore
/// use crate::logging::log;
///
/// log!("Selected station {}", code);
/// log!("Render took {:.2}ms", duration);
/// ```
#[macro_export]
macro_rules! log {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(any(debug_assertions, feature = "console_logging"))]
        {
            leptos::logging::log!($($arg),+);
        }
    };
}

pub use log;

use once_cell::sync::Lazy;

/// Environment variable that turns on diagnostic output
pub const DEBUG_ENV: &str = "METERBOOK_DEBUG";

/// Global debug mode flag, initialized once at startup
pub static DEBUG_MODE: Lazy<bool> = Lazy::new(|| std::env::var(DEBUG_ENV).is_ok());

/// Conditional debug output macro
///
/// Prints to stderr only when `METERBOOK_DEBUG` is set.
///
/// # Examples
///
/// ```
/// use meterbook::debug_println;
///
/// debug_println!("Loaded {} units", 3);
/// ```
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {
        if *$crate::utils::debug::DEBUG_MODE {
            eprintln!("[meterbook] {}", format_args!($($arg)*));
        }
    };
}

//! Logging shims.
//!
//! Hardware builds log through `defmt`, the desktop emulator through
//! `tracing`, and a build with neither feature compiles every call away.
//! Arguments must be primitives or `&str` so that both backends accept them.

#![allow(unused_macros)]

macro_rules! log_at {
    ($defmt:ident, $tracing:ident, $s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::$defmt!($s $(, $x)*);
        #[cfg(feature = "tracing")]
        ::tracing::$tracing!($s $(, $x)*);
        #[cfg(not(any(feature = "defmt", feature = "tracing")))]
        {
            let _ = ($( & $x ),*);
        }
    }};
}

macro_rules! trace {
    ($($arg:tt)*) => { log_at!(trace, trace, $($arg)*) };
}

macro_rules! debug {
    ($($arg:tt)*) => { log_at!(debug, debug, $($arg)*) };
}

macro_rules! info {
    ($($arg:tt)*) => { log_at!(info, info, $($arg)*) };
}

macro_rules! warn {
    ($($arg:tt)*) => { log_at!(warn, warn, $($arg)*) };
}

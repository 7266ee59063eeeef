/// Prints a timestamped line to stdout, similar to `info!` in tracing.
/// You can pass in the starting time and it will also print how long it took from starting time to now.
/// ```ignore
/// info_time!("str {}, {}", 1, 2);
/// let time = chrono::Local::now();
/// info_time!(time, "str {}, {}", 1, 2);
/// ```
#[macro_export]
macro_rules! info_time {
    ($strfm:literal $(,)? $($arg:expr),*) => {{
        println!("{}", $crate::__stamp!($strfm, $($arg),*));
    }};
    ($time:expr, $strfm:literal $(,)? $($arg:expr),*) => {{
        let run_time = (::chrono::Local::now() - $time)
            .num_microseconds()
            .map(|n| n as f64 / 1_000_000.0)
            .unwrap_or(0.0);
        println!("{}\nRUNTIME: {} sec", $crate::__stamp!($strfm, $($arg),*), run_time);
    }};
}

/// Same as `info_time!` without the runtime form, but goes to stderr.
#[macro_export]
macro_rules! warn_time {
    ($strfm:literal $(,)? $($arg:expr),*) => {{
        eprintln!("{}", $crate::__stamp!($strfm, $($arg),*));
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __stamp {
    ($strfm:literal $(,)? $($arg:expr),*) => {
        format!("{:<30} : {}", ::chrono::Local::now(), format!($strfm, $($arg),*))
    };
}

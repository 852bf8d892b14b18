//! Helpers related to generation of error messages.

/// Returns the description of an [`Error`] followed by the descriptions of all its [`source`]s.
///
/// Used to display the cause of an internal error on the error page when running in a
/// [`Development`](crate::service_env::ServiceEnv::Development) environment.
///
/// [`Error`]: std::error::Error
/// [`source`]: std::error::Error::source
pub fn error_chain<E>(error: &E) -> Vec<String>
where
    E: std::error::Error,
{
    let mut chain = vec![error.to_string()];

    let mut current: &dyn std::error::Error = error;
    while let Some(source) = current.source() {
        chain.push(source.to_string());
        current = source;
    }

    chain
}

/// Generates a recursive error message for an [`Error`].
///
/// The message lists the [error chain](error_chain), one cause per line. If backtrace support
/// is available (see [`backtrace_message`]), the error's [`Backtrace`](std::backtrace::Backtrace)
/// is appended.
///
/// [`Error`]: std::error::Error
#[cfg(not(tarpaulin_include))]
pub fn recursive_error_message<E>(error: &E) -> String
where
    E: std::error::Error,
{
    let mut message = error_chain(error).join("\ncaused by: ");

    if let Some(backtrace_msg) = backtrace_message(error) {
        message += &format!("\n\nBacktrace: {}", backtrace_msg);
    }

    message
}

/// Attempts to get backtrace information for an [`Error`].
///
/// Requires a `Nightly` Rust version; tied to the `backtrace_support` config set by the build
/// script.
///
/// [`Error`]: std::error::Error
#[cfg(not(tarpaulin_include))]
#[cfg(backtrace_support)]
pub fn backtrace_message<E>(error: &E) -> Option<String>
where
    E: std::error::Error,
{
    std::error::request_ref::<std::backtrace::Backtrace>(error)
        .map(|backtrace| format!("{:#}", backtrace))
}

#[cfg(not(tarpaulin_include))]
#[cfg(not(backtrace_support))]
#[doc(hidden)]
pub fn backtrace_message<E>(_error: &E) -> Option<String>
where
    E: std::error::Error,
{
    None
}

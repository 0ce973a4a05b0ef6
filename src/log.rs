use std::fmt;

/// Sink for the reloader's human-readable messages.
///
/// The reloader never makes decisions based on logging; implementations are
/// free to drop messages.
pub trait Logger: Send + Sync + 'static {
    fn log(&self, args: fmt::Arguments<'_>);
}

/// Any `fn(fmt::Arguments)` works as a logger, e.g. a small wrapper around `println!`.
impl<F> Logger for F
where
    F: Fn(fmt::Arguments<'_>) + Send + Sync + 'static,
{
    fn log(&self, args: fmt::Arguments<'_>) {
        self(args)
    }
}

/// Writes each message on its own line to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrLogger;

impl Logger for StderrLogger {
    fn log(&self, args: fmt::Arguments<'_>) {
        eprintln!("{args}");
    }
}

/// Forwards messages to `tracing` at INFO level under the `reload` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, args: fmt::Arguments<'_>) {
        tracing::info!(target: "reload", "{args}");
    }
}

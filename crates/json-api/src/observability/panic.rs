//! Panic logging.

use std::backtrace::Backtrace;

use tracing::error;

/// Route panics through `tracing` with a captured backtrace.
///
/// `CatchPanic` still turns a request panic into a 500; this only makes
/// sure the panic itself lands in the structured log.
pub(super) fn install_hook() {
    std::panic::set_hook(Box::new(|info| {
        let backtrace = Backtrace::force_capture();

        let location = info
            .location()
            .map_or_else(|| "unknown".to_string(), ToString::to_string);

        let message = info.payload_as_str().unwrap_or("non-string panic payload");

        error!(%location, %backtrace, "panic: {message}");
    }));
}

//! Traces for tokens the parser drops on the floor.
//!
//! Parsing is total, so nothing malformed ever reaches the caller as an error.
//! Each drop is logged at `Trace` on the `mongo_query::dev` target. Tests can also
//! collect the messages for their own thread with [`enable_thread_sink`].

use std::cell::RefCell;

thread_local! {
    static CAPTURED: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

/// Stops capture for this thread when dropped.
pub struct CaptureGuard;

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        CAPTURED.with(|c| c.borrow_mut().take());
    }
}

/// Starts collecting drop traces on the calling thread.
pub fn enable_thread_sink() -> CaptureGuard {
    CAPTURED.with(|c| *c.borrow_mut() = Some(Vec::new()));
    CaptureGuard
}

#[doc(hidden)]
pub fn record(msg: &str) {
    CAPTURED.with(|c| {
        if let Some(lines) = c.borrow_mut().as_mut() {
            lines.push(msg.to_owned());
        }
    });
}

/// Takes everything captured so far. Empty when capture is off.
pub fn drain() -> Vec<String> {
    CAPTURED.with(|c| c.borrow_mut().as_mut().map(std::mem::take).unwrap_or_default())
}

#[macro_export]
macro_rules! devlog {
    ($($arg:tt)*) => {{
        let msg = format!($($arg)*);
        $crate::utils::devlog::record(&msg);
        log::trace!(target: "mongo_query::dev", "{}", msg);
    }};
}

//! Holds diagnostics back while the terminal UI owns the screen.

use std::sync::Mutex;

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

/// Start holding messages instead of printing them.
pub fn activate() {
    if let Ok(mut guard) = BUFFER.lock() {
        *guard = Some(Vec::new());
    }
}

/// Stop holding messages and return everything collected so far.
pub fn drain() -> Vec<String> {
    BUFFER
        .lock()
        .ok()
        .and_then(|mut guard| guard.take())
        .unwrap_or_default()
}

/// Stop holding messages and print the backlog to stderr.
pub fn flush() {
    for msg in drain() {
        eprintln!("{}", msg);
    }
}

/// Store the message while buffering is active, otherwise print it.
pub fn warn(msg: String) {
    if let Ok(mut guard) = BUFFER.lock() {
        if let Some(buf) = guard.as_mut() {
            buf.push(msg);
            return;
        }
    }
    eprintln!("{}", msg);
}

/// `eprintln!` that respects the buffer.
#[macro_export]
macro_rules! buffered_eprintln {
    ($($arg:tt)*) => {
        $crate::stderr_buffer::warn(format!($($arg)*))
    };
}

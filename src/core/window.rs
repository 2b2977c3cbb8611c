//! core::window
//!
//! The process-wide static-time window.
//!
//! # Lifecycle
//!
//! ```text
//! first descriptor built ("load") --> OPEN --(deferred close task | close())--> CLOSED
//! ```
//!
//! - The window opens the first time the library is touched. Every
//!   [`Type::new`] calls [`start`], so building descriptors during the
//!   definition phase is enough to open it.
//! - At that moment, if a current-thread Tokio runtime is current, a
//!   zero-delay task is spawned that closes the window. The task runs only
//!   once the definition phase yields back to the executor, so every contract
//!   attached synchronously before that gets the full budget.
//! - On a multi-thread runtime a spawned task could run on another worker
//!   while definitions are still executing, so no close is scheduled. A
//!   warning is logged and the host calls [`close`] itself.
//! - Without a runtime the host also closes the window with [`close`].
//! - Closing is one-way. Nothing reopens the window.
//!
//! # Invariants
//!
//! - Single writer, write once: the flag only ever goes from open to closed.
//! - Readers never block.
//!
//! [`Type::new`]: crate::core::descriptor::Type::new

use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::Lazy;
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{debug, warn};

use super::config::VerificationSettings;

static WINDOW: Lazy<StaticWindow> = Lazy::new(StaticWindow::load);

struct StaticWindow {
    open: AtomicBool,
}

impl StaticWindow {
    fn load() -> Self {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::CurrentThread => {
                debug!("static-time window open, close deferred to executor");
                handle.spawn(async { close() });
            }
            Ok(handle) => warn!(
                flavor = ?handle.runtime_flavor(),
                "static-time window cannot defer its close on this runtime; \
                 call window::close() once definitions are done"
            ),
            Err(_) => debug!("static-time window open until closed explicitly"),
        }
        Self {
            open: AtomicBool::new(true),
        }
    }
}

/// Open the window now if nothing has touched it yet.
///
/// Every descriptor constructor calls this. Hosts may also call it at the top
/// of their definition phase so that the deferred close is scheduled on the
/// executor they are running on.
pub fn start() {
    Lazy::force(&WINDOW);
}

/// Whether the static-time window is still open.
pub fn is_open() -> bool {
    WINDOW.open.load(Ordering::Acquire)
}

/// Close the window. Idempotent.
pub fn close() {
    if WINDOW.open.swap(false, Ordering::AcqRel) {
        debug!("static-time window closed");
    }
}

/// Number of verification calls a function contract gets right now.
pub fn iterations(settings: &VerificationSettings) -> usize {
    if is_open() {
        settings.static_iterations
    } else {
        settings.dynamic_iterations
    }
}

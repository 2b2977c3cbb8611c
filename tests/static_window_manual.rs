//! Static-time window without an async runtime.
//!
//! With no executor to defer to, the window stays open until the host
//! closes it. One test per binary because the flag is process-global.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use typeshape::core::{config, window};
use typeshape::{attach, types, Function, Value};

#[test]
fn host_closes_the_window() {
    let settings = &config::current().verification;

    window::start();
    assert!(window::is_open());
    assert_eq!(window::iterations(settings), settings.static_iterations);

    window::close();
    assert!(!window::is_open());
    assert_eq!(window::iterations(settings), settings.dynamic_iterations);

    // Closing is one-way and idempotent.
    window::close();
    window::start();
    assert!(!window::is_open());

    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let negate = Function::pure(1, move |args| {
        seen.fetch_add(1, Ordering::SeqCst);
        Value::from(-args[0].as_f64().unwrap_or(0.0))
    });
    attach(&types::function([types::number()], types::number()), negate).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), settings.dynamic_iterations);
}

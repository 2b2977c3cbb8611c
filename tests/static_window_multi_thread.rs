//! Static-time window on a multi-thread Tokio runtime.
//!
//! Workers may run spawned tasks while the definition phase is still
//! executing, so the window does not schedule its own close there. Every
//! synchronous definition gets the full budget until the host closes the
//! window. One test per binary because the flag is process-global.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use typeshape::core::{config, window};
use typeshape::{attach, types, Function, Value};

fn counted_attach(contract: &typeshape::Type) -> usize {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let halve = Function::pure(1, move |a| {
        seen.fetch_add(1, Ordering::SeqCst);
        Value::from(a[0].as_f64().unwrap_or(0.0) / 2.0)
    });
    attach(contract, halve).unwrap();
    calls.load(Ordering::SeqCst)
}

#[test]
fn synchronous_definitions_share_the_full_budget() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap();

    runtime.block_on(async {
        let settings = &config::current().verification;
        let contract = types::function([types::number()], types::number());

        let budgets: Vec<usize> = (0..5).map(|_| counted_attach(&contract)).collect();
        assert_eq!(budgets, vec![settings.static_iterations; 5]);

        // No worker closes the window behind the host's back.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(window::is_open());

        window::close();
        assert_eq!(counted_attach(&contract), settings.dynamic_iterations);
    });
}

//! Namespaced event routing example
//!
//! Run with: cargo run --example namespaces
//!
//! Set `RUST_LOG=mediator_rs=trace` to see every registration and every
//! node visited by a dispatch.
//!
//! The example wires a small application event tree:
//!
//! ```text
//! app
//! ├── user          (audit log)
//! │   ├── login     (session counter)
//! │   └── logout    (session counter)
//! └── billing
//!     └── invoice   (fails on empty payloads)
//! ```

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use mediator_rs::{Mediator, MediatorError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), MediatorError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let sessions = Arc::new(AtomicI64::new(0));
    let mut mediator: Mediator<Bytes> = Mediator::new();

    mediator
        .on("app:user", |_, data| {
            tracing::info!(payload = ?data, "audit");
            Ok(())
        })
        .on_with("app:user:login", Arc::clone(&sessions), |count, _, _| {
            count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .on_with("app:user:logout", Arc::clone(&sessions), |count, _, _| {
            count.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        })
        .on("app:billing:invoice", |mediator, data| {
            if data.is_empty() {
                return Err("empty invoice".into());
            }
            // Handlers may dispatch further channels through the mediator
            mediator.trigger("app:user", data)?;
            Ok(())
        });

    println!("Channels:\n{}", mediator.storage());

    mediator.trigger("app:user:login", &Bytes::from_static(b"ada"))?;
    mediator.trigger("app:user:login", &Bytes::from_static(b"grace"))?;
    mediator.trigger("app:user:logout", &Bytes::from_static(b"ada"))?;
    println!("Active sessions: {}", sessions.load(Ordering::SeqCst));

    // Audit, then login and logout handlers
    mediator.broadcast("app:user", &Bytes::from_static(b"system"))?;
    println!("Active sessions after broadcast: {}", sessions.load(Ordering::SeqCst));

    mediator.trigger("app:billing:invoice", &Bytes::from_static(b"INV-1"))?;

    if let Err(err) = mediator.trigger("app:billing:invoice", &Bytes::new()) {
        println!("Invoice rejected: {}", err);
    }

    if let Err(err) = mediator.trigger("app:shipping", &Bytes::new()) {
        println!("Expected failure: {}", err);
    }

    mediator.off_nested("app:user", true);
    println!("After pruning app:user:\n{}", mediator.storage());

    let stats = mediator.stats();
    println!(
        "nodes={} handlers={} dispatches={} invoked={} failures={}",
        stats.node_count,
        stats.handler_count,
        stats.dispatch.dispatches(),
        stats.dispatch.handlers_invoked,
        stats.dispatch.handler_failures
    );

    mediator.clean();
    assert!(!mediator.has("app"));

    Ok(())
}

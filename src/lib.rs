//! In-process hierarchical publish/subscribe mediator
//!
//! Channels are addressed by delimiter-separated paths such as
//! `"app:user:login"`. Handlers registered on a channel can be invoked on
//! their own with [`Mediator::trigger`], or together with the handlers of
//! every descendant channel with [`Mediator::broadcast`].
//!
//! ```
//! use mediator_rs::Mediator;
//!
//! let mut mediator: Mediator<String> = Mediator::new();
//! mediator
//!     .on("app:user", |_, name| {
//!         println!("user event for {}", name);
//!         Ok(())
//!     })
//!     .on("app:user:login", |_, name| {
//!         println!("{} logged in", name);
//!         Ok(())
//!     });
//!
//! // Only the handler registered on "app:user:login"
//! mediator.trigger("app:user:login", &"ada".to_string())?;
//!
//! // "app:user" first, then "app:user:login"
//! mediator.broadcast("app:user", &"ada".to_string())?;
//!
//! assert!(mediator.has("app"));
//! assert!(!mediator.has("app:admin"));
//! # Ok::<(), mediator_rs::MediatorError>(())
//! ```

pub mod registry;
pub mod stats;

pub use registry::{
    Bound, ChannelPath, Handler, HandlerError, HandlerResult, Mediator, MediatorError,
    RegistryConfig, SharedMediator,
};
pub use stats::{DispatchCounters, NamespaceSnapshot, RegistryStats};

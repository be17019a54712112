//! Namespace registry for hierarchical pub/sub
//!
//! The registry maps delimiter-separated channel paths onto a tree of
//! namespace nodes and dispatches payloads to the handlers registered on
//! them, either on one exact channel or on a whole subtree.
//!
//! # Architecture
//!
//! ```text
//!                        Mediator<D>
//!              ┌──────────────────────────────┐
//!              │ roots: NamespaceNode {       │
//!              │   "app" ─► NamespaceNode {   │
//!              │     handlers: [h1],          │
//!              │     "user" ─► { [h2, h3] }   │
//!              │     "admin" ─► { [] }        │
//!              │   }                          │
//!              │ }                            │
//!              └──────────────┬───────────────┘
//!                             │
//!          ┌──────────────────┴──────────────────┐
//!          ▼                                     ▼
//!   trigger("app:user")                   broadcast("app")
//!   h2, h3                                h1, h2, h3 (pre-order)
//! ```
//!
//! # Dispatch
//!
//! Dispatch is synchronous and runs on the caller's stack. Handlers receive
//! the dispatching mediator and may mutate it; a broadcast looks up every
//! node when it reaches it, so such changes are visible to the nodes it has
//! not visited yet. A failing handler aborts the dispatch immediately.

pub mod config;
pub mod error;
pub mod handler;
pub mod node;
pub mod path;
pub mod shared;
pub mod store;

pub use config::{RegistryConfig, DEFAULT_DELIMITER};
pub use error::{HandlerError, HandlerResult, MediatorError};
pub use handler::{Bound, Handler};
pub use node::NamespaceNode;
pub use path::ChannelPath;
pub use shared::SharedMediator;
pub use store::Mediator;

//! # System Lifecycle
//!
//! Creates the three resource actors, wires their dependencies through context
//! injection, and shuts them down in order.
//!
//! ```rust,ignore
//! let (user_actor, user_client) = user_actor::new(buffer);
//! let (course_actor, course_client) = course_actor::new(buffer);
//! let (content_actor, content_client) = content_actor::new(buffer);
//!
//! tokio::spawn(user_actor.run(encoder));
//! tokio::spawn(course_actor.run(()));
//! tokio::spawn(content_actor.run(course_client.clone()));
//! ```
//!
//! The dependency graph is acyclic (contents depend on courses), so dropping every
//! client closes every channel and each actor exits on its own. The content actor
//! holds a course client clone, which is released when the content actor stops.
//!
//! [`setup_tracing`] installs the subscriber; filter with `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle and mutations
//! RUST_LOG=debug cargo run     # every request
//! ```

pub mod course_system;
pub mod telemetry;

pub use course_system::*;
pub use telemetry::*;

//! User and Task registries exposed as two independently deployed HTTP
//! services.
//!
//! The Task service stores an optional reference to a User owned by the User
//! service and validates it across the service boundary at write time. The
//! crate is laid out hexagonally:
//!
//! - [`domain`] holds the identity model, the merge engine, both resource
//!   services and the ports they depend on.
//! - [`inbound`] adapts HTTP requests onto the driving ports.
//! - [`outbound`] implements the driven ports (PostgreSQL, in-memory store,
//!   remote user directory).
//! - [`server`] and [`config`] wire everything together for the binaries.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod telemetry;

pub use domain::TraceId;
pub use middleware::Trace;

//! Domain primitives, services, and ports.
//!
//! Purpose: define the record model shared by the user and task registries,
//! the update semantics applied to it, and the services that enforce the
//! registries' invariants. Nothing in here knows about HTTP or SQL.
//!
//! Public surface:
//! - ExternalId / SurrogateKey: the dual identifier scheme.
//! - Draft / NewRecord / Record: the record lifecycle.
//! - Update / Mergeable: full replace and partial merge.
//! - UserService / TaskService: driving port implementations.
//! - Error / ErrorCode: problem descriptions returned to inbound adapters.

pub mod assignee;
pub mod error;
pub mod failure;
pub mod identity;
pub mod merge;
pub mod ports;
pub mod record;
pub mod task;
mod task_service;
pub mod trace_id;
pub mod user;
mod user_service;
pub mod validation;

pub use self::assignee::{AssigneeValidationFailure, AssigneeValidator};
pub use self::error::{Error, ErrorCode};
pub use self::failure::{RegistryFailure, ResourceKind};
pub use self::identity::{ExternalId, SurrogateKey};
pub use self::merge::{Mergeable, Update, UpdateMode, merge_value};
pub use self::record::{Draft, NewRecord, Record};
pub use self::task::{DESCRIPTION_MAX_CHARS, Task, TaskFields, TaskInput, TaskPatch};
pub use self::task_service::TaskService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, EmailValidationError, User, UserFields, UserInput, UserPatch};
pub use self::user_service::UserService;
pub use self::validation::{FieldError, FieldErrors};

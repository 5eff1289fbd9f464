pub mod backend;
pub mod dispatcher;
pub mod error;

pub use backend::{AggregateTarget, Backend};
pub use dispatcher::{CompiledQuery, Compiler, apply};
pub use error::{BackendError, CompileError};

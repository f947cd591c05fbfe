//! Schema text serialization.
//!
//! [`emit_schema`] renders a compiled [`Schema`](tyrpc_ir::Schema) as proto3
//! text. Output is a pure function of the schema: type blocks are sorted by
//! name, methods keep the order they were given in.
//!
//! # Modules
//!
//! - [`emitter`]: output abstraction for string and `io::Write` targets
//! - [`proto`]: the proto3 renderer

pub mod emitter;
pub mod proto;

pub use emitter::{Emitter, StringEmitter, WriteEmitter, INDENT_WIDTH};
pub use proto::{emit_schema, render};

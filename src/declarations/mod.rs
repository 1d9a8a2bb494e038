// Copyright (c) 2025 John Wilger
// SPDX-License-Identifier: MIT

//! The in-memory schema model produced by the parser.
//!
//! All declarations are created and mutated during parsing; once
//! [`parse`](crate::parser::parse) returns they are treated as immutable
//! by downstream generators, which only use the read accessors and the
//! deterministic sorted views.

mod enums;
mod exception;
mod interface;
mod service;
mod structs;
mod types;

pub use enums::{Enum, EnumValue};
pub use exception::Exception;
pub use interface::{DefinitionName, Interface};
pub use service::{Function, FunctionArgument, Service};
pub use structs::{Field, Struct};
pub use types::{PrimitiveKind, Type};

//! Type, method-type and interface models for the strut type checker.
//!
//! This crate holds the immutable data model only:
//!
//! - [`Type`]: the closed algebraic representation of every type shape,
//!   with set-semantic unions/intersections and structural equality.
//! - [`MethodType`]/[`Params`]/[`Block`]: callable signatures.
//! - [`Interface`]/[`MethodEntry`]: resolved method tables.
//! - [`ast`]: the declaration-syntax AST and its round-trip
//!   conversions.
//!
//! Interface synthesis and subtyping live in `strut-solver`.

pub mod ast;
pub mod interface;
pub mod method_type;
pub mod name;
pub mod types;

pub use ast::{BlockExpr, MethodTypeExpr, ParamsExpr, TypeExpr};
pub use interface::{CombinationOperator, Interface, MethodEntry};
pub use method_type::{Block, MethodType, Params};
pub use name::{Namespace, TypeName};
pub use types::{LiteralValue, ProcType, Type};

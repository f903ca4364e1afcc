//! Interface synthesis and structural subtyping for strut.
//!
//! The pipeline: declarations from signature files land in a
//! [`SignatureRegistry`]; an [`InterfaceBuilder`] turns any type into
//! its callable [`strut_types::Interface`]; a [`SubtypeChecker`]
//! decides assignability by comparing those interfaces method by
//! method, co-inductively for recursive types.

pub mod factory;
pub mod registry;
pub mod signature;
pub mod subst;
pub mod subtype;

pub use factory::InterfaceBuilder;
pub use registry::{RegistryError, SignatureRegistry};
pub use signature::{
    AliasSignature, ClassSignature, InterfaceSignature, MethodDecl, MethodKind, ModuleSignature,
    NominalRef, Signature, Visibility,
};
pub use subst::Substitution;
pub use subtype::SubtypeChecker;

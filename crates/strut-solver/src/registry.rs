//! The signature registry: every known declaration, keyed by its
//! absolute name.

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::trace;

use strut_types::TypeName;

use crate::signature::{
    AliasSignature, ClassSignature, InterfaceSignature, ModuleSignature, Signature,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate signature: {0}")]
    Duplicate(TypeName),
}

#[derive(Debug, Default)]
pub struct SignatureRegistry {
    signatures: FxHashMap<TypeName, Signature>,
}

impl SignatureRegistry {
    pub fn new() -> Self {
        SignatureRegistry::default()
    }

    /// Registers a declaration. Re-declaring a name is an error.
    pub fn add_signature(&mut self, signature: Signature) -> Result<(), RegistryError> {
        let name = signature.name().clone();
        if self.signatures.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        trace!(name = %name, "registering signature");
        self.signatures.insert(name, signature);
        Ok(())
    }

    pub fn contains(&self, name: &TypeName) -> bool {
        self.signatures.contains_key(name)
    }

    pub fn signature(&self, name: &TypeName) -> Option<&Signature> {
        self.signatures.get(name)
    }

    pub fn class(&self, name: &TypeName) -> Option<&ClassSignature> {
        match self.signatures.get(name)? {
            Signature::Class(sig) => Some(sig),
            _ => None,
        }
    }

    pub fn module(&self, name: &TypeName) -> Option<&ModuleSignature> {
        match self.signatures.get(name)? {
            Signature::Module(sig) => Some(sig),
            _ => None,
        }
    }

    pub fn interface(&self, name: &TypeName) -> Option<&InterfaceSignature> {
        match self.signatures.get(name)? {
            Signature::Interface(sig) => Some(sig),
            _ => None,
        }
    }

    pub fn alias(&self, name: &TypeName) -> Option<&AliasSignature> {
        match self.signatures.get(name)? {
            Signature::Alias(sig) => Some(sig),
            _ => None,
        }
    }
}

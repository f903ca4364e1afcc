//! The method-type model: parameter lists, blocks, and signatures.

use std::collections::BTreeMap;
use std::fmt;

use crate::types::Type;

/// A method's parameter list: ordered positionals (required, then
/// optional, then an optional rest) plus keyword parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Params {
    pub required: Vec<Type>,
    pub optional: Vec<Type>,
    pub rest: Option<Type>,
    pub required_keywords: BTreeMap<String, Type>,
    pub optional_keywords: BTreeMap<String, Type>,
    pub rest_keywords: Option<Type>,
}

impl Params {
    pub fn empty() -> Self {
        Params::default()
    }

    /// Parameters consisting only of required positionals.
    pub fn positional(required: Vec<Type>) -> Self {
        Params {
            required,
            ..Params::default()
        }
    }

    /// Number of fixed (non-rest) positional slots.
    pub fn fixed_len(&self) -> usize {
        self.required.len() + self.optional.len()
    }

    /// The type accepted at positional index `i`, falling through
    /// required, optional, then the rest parameter.
    pub fn type_at(&self, i: usize) -> Option<&Type> {
        if i < self.required.len() {
            return Some(&self.required[i]);
        }
        let i = i - self.required.len();
        if i < self.optional.len() {
            return Some(&self.optional[i]);
        }
        self.rest.as_ref()
    }

    /// The type of keyword `name`, whether declared required or optional.
    pub fn keyword(&self, name: &str) -> Option<&Type> {
        self.required_keywords
            .get(name)
            .or_else(|| self.optional_keywords.get(name))
    }

    /// Declared keyword names, required and optional.
    pub fn keyword_names(&self) -> impl Iterator<Item = &String> {
        self.required_keywords
            .keys()
            .chain(self.optional_keywords.keys())
    }

    pub fn has_keywords(&self) -> bool {
        !self.required_keywords.is_empty()
            || !self.optional_keywords.is_empty()
            || self.rest_keywords.is_some()
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        let mut first = true;
        let mut sep = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
            if first {
                first = false;
                Ok(())
            } else {
                write!(f, ", ")
            }
        };
        for ty in &self.required {
            sep(f)?;
            ty.fmt_grouped(f)?;
        }
        for ty in &self.optional {
            sep(f)?;
            write!(f, "?")?;
            ty.fmt_grouped(f)?;
        }
        if let Some(rest) = &self.rest {
            sep(f)?;
            write!(f, "*")?;
            rest.fmt_grouped(f)?;
        }
        for (name, ty) in &self.required_keywords {
            sep(f)?;
            write!(f, "{name}: ")?;
            ty.fmt_grouped(f)?;
        }
        for (name, ty) in &self.optional_keywords {
            sep(f)?;
            write!(f, "?{name}: ")?;
            ty.fmt_grouped(f)?;
        }
        if let Some(rest) = &self.rest_keywords {
            sep(f)?;
            write!(f, "**")?;
            rest.fmt_grouped(f)?;
        }
        write!(f, ")")
    }
}

/// A block attached to a method type. `required` distinguishes
/// `{ ... }` from `?{ ... }`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Block {
    pub params: Params,
    pub return_type: Type,
    pub required: bool,
}

impl Block {
    pub fn required(params: Params, return_type: Type) -> Self {
        Block {
            params,
            return_type,
            required: true,
        }
    }

    pub fn optional(params: Params, return_type: Type) -> Self {
        Block {
            params,
            return_type,
            required: false,
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.required {
            write!(f, "?")?;
        }
        write!(f, "{{ {} -> ", self.params)?;
        self.return_type.fmt_grouped(f)?;
        write!(f, " }}")
    }
}

/// A callable signature: generic parameters scoped to this signature
/// only, a parameter list, an optional block, and a return type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MethodType {
    pub type_params: Vec<String>,
    pub params: Params,
    pub block: Option<Block>,
    pub return_type: Type,
}

impl MethodType {
    pub fn new(params: Params, return_type: Type) -> Self {
        MethodType {
            type_params: Vec::new(),
            params,
            block: None,
            return_type,
        }
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.block = Some(block);
        self
    }

    pub fn with_type_params(mut self, type_params: Vec<String>) -> Self {
        self.type_params = type_params;
        self
    }
}

impl fmt::Display for MethodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.type_params.is_empty() {
            write!(f, "[{}] ", self.type_params.join(", "))?;
        }
        write!(f, "{}", self.params)?;
        if let Some(block) = &self.block {
            write!(f, " {block}")?;
        }
        write!(f, " -> ")?;
        self.return_type.fmt_grouped(f)
    }
}

#[cfg(test)]
#[path = "tests/method_type_tests.rs"]
mod tests;

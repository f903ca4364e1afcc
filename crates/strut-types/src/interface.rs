//! Synthesized interfaces: the resolved method tables of types.
//!
//! A method's entry is either a single [`MethodType`] or a recursive
//! [`MethodEntry::Combination`] tagged `overload`, `union` or
//! `intersection`. `overload` means the caller picks whichever
//! alternative matches the call shape; `union`/`intersection` mean the
//! method's effective contract is the union/intersection of the listed
//! alternatives (produced when the owning type is itself a union or
//! intersection).

use std::fmt;

use indexmap::IndexMap;

use crate::method_type::MethodType;
use crate::types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombinationOperator {
    Overload,
    Union,
    Intersection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodEntry {
    Method(MethodType),
    Combination {
        operator: CombinationOperator,
        entries: Vec<MethodEntry>,
    },
}

impl MethodEntry {
    pub fn overload(entries: Vec<MethodEntry>) -> Self {
        MethodEntry::Combination {
            operator: CombinationOperator::Overload,
            entries,
        }
    }

    pub fn union(entries: Vec<MethodEntry>) -> Self {
        MethodEntry::Combination {
            operator: CombinationOperator::Union,
            entries,
        }
    }

    pub fn intersection(entries: Vec<MethodEntry>) -> Self {
        MethodEntry::Combination {
            operator: CombinationOperator::Intersection,
            entries,
        }
    }

    /// Wraps declared overloads: a single signature stays a plain
    /// method, several become an `overload` combination.
    pub fn from_overloads(mut overloads: Vec<MethodType>) -> Self {
        if overloads.len() == 1 {
            MethodEntry::Method(overloads.remove(0))
        } else {
            MethodEntry::overload(overloads.into_iter().map(MethodEntry::Method).collect())
        }
    }

    pub fn operator(&self) -> Option<CombinationOperator> {
        match self {
            MethodEntry::Method(_) => None,
            MethodEntry::Combination { operator, .. } => Some(*operator),
        }
    }

    /// Formats the entry without the outer braces.
    fn fmt_inner(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodEntry::Method(method_type) => write!(f, "{method_type}"),
            MethodEntry::Combination { operator, entries } => {
                let sep = match operator {
                    CombinationOperator::Overload | CombinationOperator::Union => " | ",
                    CombinationOperator::Intersection => " & ",
                };
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{sep}")?;
                    }
                    entry.fmt_inner(f)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for MethodEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        self.fmt_inner(f)?;
        write!(f, " }}")
    }
}

/// The complete callable surface of one type: the owning type plus a
/// name-indexed table of method entries, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    pub type_: Type,
    pub methods: IndexMap<String, MethodEntry>,
}

impl Interface {
    pub fn new(type_: Type) -> Self {
        Interface {
            type_,
            methods: IndexMap::new(),
        }
    }

    pub fn method(&self, name: &str) -> Option<&MethodEntry> {
        self.methods.get(name)
    }
}

#[cfg(test)]
#[path = "tests/interface_tests.rs"]
mod tests;

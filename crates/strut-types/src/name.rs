//! Namespaces and qualified type names.
//!
//! A [`Namespace`] is a (possibly absolute) path of module components;
//! a [`TypeName`] is a namespace plus a base name. Names print in the
//! source language's `::Foo::Bar` form.

use std::fmt;

/// A module path, either absolute (rooted at `::`) or relative.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Namespace {
    components: Vec<String>,
    absolute: bool,
}

impl Namespace {
    /// The root namespace `::`.
    pub fn root() -> Self {
        Namespace {
            components: Vec::new(),
            absolute: true,
        }
    }

    /// The empty relative namespace.
    pub fn empty() -> Self {
        Namespace {
            components: Vec::new(),
            absolute: false,
        }
    }

    pub fn new(components: Vec<String>, absolute: bool) -> Self {
        Namespace {
            components,
            absolute,
        }
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Extends this namespace with one more component.
    pub fn append(&self, component: impl Into<String>) -> Self {
        let mut components = self.components.clone();
        components.push(component.into());
        Namespace {
            components,
            absolute: self.absolute,
        }
    }

    /// Concatenates a relative namespace onto this one.
    pub fn concat(&self, other: &Namespace) -> Self {
        let mut components = self.components.clone();
        components.extend(other.components.iter().cloned());
        Namespace {
            components,
            absolute: self.absolute,
        }
    }

    /// The enclosing namespace, or `None` at the root / empty path.
    pub fn parent(&self) -> Option<Namespace> {
        if self.components.is_empty() {
            return None;
        }
        let mut components = self.components.clone();
        components.pop();
        Some(Namespace {
            components,
            absolute: self.absolute,
        })
    }

    /// Scope chain from this namespace up to (and including) its outermost
    /// enclosing namespace, innermost first.
    pub fn ascending(&self) -> impl Iterator<Item = Namespace> + '_ {
        let mut current = Some(self.clone());
        std::iter::from_fn(move || {
            let ns = current.take()?;
            current = ns.parent();
            Some(ns)
        })
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute {
            write!(f, "::")?;
        }
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, "::")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

/// A namespace-qualified name of a class, module, interface or alias.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeName {
    pub namespace: Namespace,
    pub name: String,
}

impl TypeName {
    /// A name directly under the root namespace (`::Foo`).
    pub fn absolute(name: impl Into<String>) -> Self {
        TypeName {
            namespace: Namespace::root(),
            name: name.into(),
        }
    }

    /// An unqualified relative name (`Foo`).
    pub fn relative(name: impl Into<String>) -> Self {
        TypeName {
            namespace: Namespace::empty(),
            name: name.into(),
        }
    }

    pub fn new(namespace: Namespace, name: impl Into<String>) -> Self {
        TypeName {
            namespace,
            name: name.into(),
        }
    }

    pub fn is_absolute(&self) -> bool {
        self.namespace.is_absolute()
    }

    /// This name re-qualified under the given (absolute) namespace.
    pub fn qualified_under(&self, namespace: &Namespace) -> TypeName {
        TypeName {
            namespace: namespace.concat(&self.namespace),
            name: self.name.clone(),
        }
    }

    /// This name re-qualified under the root namespace, keeping any
    /// intermediate relative components.
    pub fn to_root(&self) -> TypeName {
        self.qualified_under(&Namespace::root())
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}{}", self.namespace, self.name)
        } else {
            write!(f, "{}::{}", self.namespace, self.name)
        }
    }
}

#[cfg(test)]
#[path = "tests/name_tests.rs"]
mod tests;

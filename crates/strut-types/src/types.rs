//! The algebraic type model.
//!
//! [`Type`] is a closed tagged union over every type shape the checker
//! can reason about. Types are immutable value objects: identity is
//! structural equality, union/intersection members live in ordered sets
//! so equality is order-independent, and the smart constructors flatten
//! nested same-operator combinators on the way in.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::method_type::{Block, Params};
use crate::name::TypeName;

/// A value a literal type is pinned to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LiteralValue {
    Int(i64),
    Str(String),
    Sym(String),
    Bool(bool),
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Int(value) => write!(f, "{value}"),
            LiteralValue::Str(value) => write!(f, "\"{value}\""),
            LiteralValue::Sym(value) => write!(f, ":{value}"),
            LiteralValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// The callable shape of a proc type: parameters, optional block, return.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcType {
    pub params: Params,
    pub block: Option<Block>,
    pub return_type: Type,
}

/// Every type shape, nominal and structural.
///
/// `SelfType`, `ClassSelf` and `InstanceSelf` are receiver placeholders
/// resolved away during interface synthesis. `Any` is "unchecked" — it
/// is deliberately not a lattice extreme like `Top`/`Bot`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Type {
    Any,
    Void,
    Top,
    Bot,
    Bool,
    Nil,
    /// The `self` placeholder.
    SelfType,
    /// The `class` placeholder: the singleton of the enclosing declaration.
    ClassSelf,
    /// The `instance` placeholder: the instance of the enclosing declaration.
    InstanceSelf,
    Literal(LiteralValue),
    /// A bound type parameter.
    Var(String),
    /// `singleton(::Foo)`
    Singleton { name: TypeName, args: Vec<Type> },
    /// `::Foo[T, U]`
    Instance { name: TypeName, args: Vec<Type> },
    /// `_Foo[T, U]`
    Interface { name: TypeName, args: Vec<Type> },
    /// `::foo[T]` — a reference to a type alias, not yet unfolded.
    Alias { name: TypeName, args: Vec<Type> },
    Union(BTreeSet<Type>),
    Intersection(BTreeSet<Type>),
    Tuple(Vec<Type>),
    Record(BTreeMap<LiteralValue, Type>),
    Proc(Box<ProcType>),
}

impl Type {
    pub fn instance(name: TypeName, args: Vec<Type>) -> Type {
        Type::Instance { name, args }
    }

    pub fn singleton(name: TypeName) -> Type {
        Type::Singleton {
            name,
            args: Vec::new(),
        }
    }

    pub fn interface(name: TypeName, args: Vec<Type>) -> Type {
        Type::Interface { name, args }
    }

    pub fn alias(name: TypeName, args: Vec<Type>) -> Type {
        Type::Alias { name, args }
    }

    pub fn literal(value: LiteralValue) -> Type {
        Type::Literal(value)
    }

    pub fn proc(params: Params, block: Option<Block>, return_type: Type) -> Type {
        Type::Proc(Box::new(ProcType {
            params,
            block,
            return_type,
        }))
    }

    /// Builds a union, flattening nested unions and deduplicating members.
    /// A single surviving member is returned unwrapped; an empty member
    /// list collapses to `Bot`.
    pub fn union(types: impl IntoIterator<Item = Type>) -> Type {
        let mut members = BTreeSet::new();
        for ty in types {
            match ty {
                Type::Union(inner) => members.extend(inner),
                other => {
                    members.insert(other);
                }
            }
        }
        match members.len() {
            0 => Type::Bot,
            1 => members.into_iter().next().unwrap(),
            _ => Type::Union(members),
        }
    }

    /// Builds an intersection, flattening and deduplicating like
    /// [`Type::union`]. An empty member list collapses to `Top`.
    pub fn intersection(types: impl IntoIterator<Item = Type>) -> Type {
        let mut members = BTreeSet::new();
        for ty in types {
            match ty {
                Type::Intersection(inner) => members.extend(inner),
                other => {
                    members.insert(other);
                }
            }
        }
        match members.len() {
            0 => Type::Top,
            1 => members.into_iter().next().unwrap(),
            _ => Type::Intersection(members),
        }
    }

    /// `T?` — sugar for `T | nil`.
    pub fn optional(ty: Type) -> Type {
        Type::union([ty, Type::Nil])
    }

    /// The nominal name this type refers to, if any.
    pub fn nominal_name(&self) -> Option<&TypeName> {
        match self {
            Type::Singleton { name, .. }
            | Type::Instance { name, .. }
            | Type::Interface { name, .. }
            | Type::Alias { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Formats this type, parenthesizing unions and intersections. Used
    /// for nested positions (parameters, returns) where the combinator
    /// would otherwise be ambiguous.
    pub(crate) fn fmt_grouped(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Union(_) | Type::Intersection(_) => write!(f, "({self})"),
            _ => write!(f, "{self}"),
        }
    }
}

fn fmt_name_args(
    f: &mut fmt::Formatter<'_>,
    name: &TypeName,
    args: &[Type],
) -> fmt::Result {
    write!(f, "{name}")?;
    if !args.is_empty() {
        write!(f, "[")?;
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, "]")?;
    }
    Ok(())
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Any => write!(f, "any"),
            Type::Void => write!(f, "void"),
            Type::Top => write!(f, "top"),
            Type::Bot => write!(f, "bot"),
            Type::Bool => write!(f, "bool"),
            Type::Nil => write!(f, "nil"),
            Type::SelfType => write!(f, "self"),
            Type::ClassSelf => write!(f, "class"),
            Type::InstanceSelf => write!(f, "instance"),
            Type::Literal(value) => write!(f, "{value}"),
            Type::Var(name) => write!(f, "{name}"),
            Type::Singleton { name, .. } => write!(f, "singleton({name})"),
            Type::Instance { name, args }
            | Type::Interface { name, args }
            | Type::Alias { name, args } => fmt_name_args(f, name, args),
            Type::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    member.fmt_grouped(f)?;
                }
                Ok(())
            }
            Type::Intersection(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " & ")?;
                    }
                    member.fmt_grouped(f)?;
                }
                Ok(())
            }
            Type::Tuple(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            }
            Type::Record(fields) => {
                write!(f, "{{ ")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key} => {value}")?;
                }
                write!(f, " }}")
            }
            Type::Proc(proc) => {
                write!(f, "^{}", proc.params)?;
                if let Some(block) = &proc.block {
                    write!(f, " {block}")?;
                }
                write!(f, " -> ")?;
                proc.return_type.fmt_grouped(f)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;

//! The declaration-level type syntax AST and its round-trip
//! conversions with the internal [`Type`] model.
//!
//! [`TypeExpr`] mirrors what a signature file can spell. Converting a
//! syntactic type in and back out is identity for every directly
//! representable shape; converting an internal algebraic type out and
//! back in is identity for the combinator shapes (`Optional` sugar
//! lowers to `T | nil` on the way in and never resurfaces).

use crate::method_type::{Block, MethodType, Params};
use crate::name::TypeName;
use crate::types::{LiteralValue, Type};

/// A type as written in declaration syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Any,
    Void,
    Top,
    Bot,
    Bool,
    Nil,
    SelfType,
    ClassSelf,
    InstanceSelf,
    Literal(LiteralValue),
    Var(String),
    Singleton { name: TypeName },
    Instance { name: TypeName, args: Vec<TypeExpr> },
    Interface { name: TypeName, args: Vec<TypeExpr> },
    Alias { name: TypeName, args: Vec<TypeExpr> },
    Optional(Box<TypeExpr>),
    Union(Vec<TypeExpr>),
    Intersection(Vec<TypeExpr>),
    Tuple(Vec<TypeExpr>),
    Record(Vec<(LiteralValue, TypeExpr)>),
    Proc(Box<MethodTypeExpr>),
}

/// A parameter list as written, keyword order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamsExpr {
    pub required: Vec<TypeExpr>,
    pub optional: Vec<TypeExpr>,
    pub rest: Option<TypeExpr>,
    pub required_keywords: Vec<(String, TypeExpr)>,
    pub optional_keywords: Vec<(String, TypeExpr)>,
    pub rest_keywords: Option<TypeExpr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockExpr {
    pub params: ParamsExpr,
    pub return_type: TypeExpr,
    pub required: bool,
}

/// A method type as written: `[A] (A) { (A) -> nil } -> void`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodTypeExpr {
    pub type_params: Vec<String>,
    pub params: ParamsExpr,
    pub block: Option<BlockExpr>,
    pub return_type: TypeExpr,
}

fn types_from(exprs: &[TypeExpr]) -> Vec<Type> {
    exprs.iter().map(Type::from_expr).collect()
}

fn exprs_from(types: &[Type]) -> Vec<TypeExpr> {
    types.iter().map(Type::to_expr).collect()
}

impl Params {
    pub fn from_expr(expr: &ParamsExpr) -> Params {
        Params {
            required: types_from(&expr.required),
            optional: types_from(&expr.optional),
            rest: expr.rest.as_ref().map(Type::from_expr),
            required_keywords: expr
                .required_keywords
                .iter()
                .map(|(name, ty)| (name.clone(), Type::from_expr(ty)))
                .collect(),
            optional_keywords: expr
                .optional_keywords
                .iter()
                .map(|(name, ty)| (name.clone(), Type::from_expr(ty)))
                .collect(),
            rest_keywords: expr.rest_keywords.as_ref().map(Type::from_expr),
        }
    }

    pub fn to_expr(&self) -> ParamsExpr {
        ParamsExpr {
            required: exprs_from(&self.required),
            optional: exprs_from(&self.optional),
            rest: self.rest.as_ref().map(Type::to_expr),
            required_keywords: self
                .required_keywords
                .iter()
                .map(|(name, ty)| (name.clone(), Type::to_expr(ty)))
                .collect(),
            optional_keywords: self
                .optional_keywords
                .iter()
                .map(|(name, ty)| (name.clone(), Type::to_expr(ty)))
                .collect(),
            rest_keywords: self.rest_keywords.as_ref().map(Type::to_expr),
        }
    }
}

impl Block {
    pub fn from_expr(expr: &BlockExpr) -> Block {
        Block {
            params: Params::from_expr(&expr.params),
            return_type: Type::from_expr(&expr.return_type),
            required: expr.required,
        }
    }

    pub fn to_expr(&self) -> BlockExpr {
        BlockExpr {
            params: self.params.to_expr(),
            return_type: self.return_type.to_expr(),
            required: self.required,
        }
    }
}

impl MethodType {
    pub fn from_expr(expr: &MethodTypeExpr) -> MethodType {
        MethodType {
            type_params: expr.type_params.clone(),
            params: Params::from_expr(&expr.params),
            block: expr.block.as_ref().map(Block::from_expr),
            return_type: Type::from_expr(&expr.return_type),
        }
    }

    pub fn to_expr(&self) -> MethodTypeExpr {
        MethodTypeExpr {
            type_params: self.type_params.clone(),
            params: self.params.to_expr(),
            block: self.block.as_ref().map(Block::to_expr),
            return_type: self.return_type.to_expr(),
        }
    }
}

impl Type {
    /// Lowers a syntactic type into the internal model.
    pub fn from_expr(expr: &TypeExpr) -> Type {
        match expr {
            TypeExpr::Any => Type::Any,
            TypeExpr::Void => Type::Void,
            TypeExpr::Top => Type::Top,
            TypeExpr::Bot => Type::Bot,
            TypeExpr::Bool => Type::Bool,
            TypeExpr::Nil => Type::Nil,
            TypeExpr::SelfType => Type::SelfType,
            TypeExpr::ClassSelf => Type::ClassSelf,
            TypeExpr::InstanceSelf => Type::InstanceSelf,
            TypeExpr::Literal(value) => Type::Literal(value.clone()),
            TypeExpr::Var(name) => Type::Var(name.clone()),
            TypeExpr::Singleton { name } => Type::singleton(name.clone()),
            TypeExpr::Instance { name, args } => Type::instance(name.clone(), types_from(args)),
            TypeExpr::Interface { name, args } => Type::interface(name.clone(), types_from(args)),
            TypeExpr::Alias { name, args } => Type::alias(name.clone(), types_from(args)),
            TypeExpr::Optional(inner) => Type::optional(Type::from_expr(inner)),
            TypeExpr::Union(members) => Type::union(members.iter().map(Type::from_expr)),
            TypeExpr::Intersection(members) => {
                Type::intersection(members.iter().map(Type::from_expr))
            }
            TypeExpr::Tuple(elements) => Type::Tuple(types_from(elements)),
            TypeExpr::Record(fields) => Type::Record(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), Type::from_expr(value)))
                    .collect(),
            ),
            TypeExpr::Proc(method_type) => {
                let mt = MethodType::from_expr(method_type);
                Type::proc(mt.params, mt.block, mt.return_type)
            }
        }
    }

    /// Lifts an internal type back into declaration syntax.
    pub fn to_expr(&self) -> TypeExpr {
        match self {
            Type::Any => TypeExpr::Any,
            Type::Void => TypeExpr::Void,
            Type::Top => TypeExpr::Top,
            Type::Bot => TypeExpr::Bot,
            Type::Bool => TypeExpr::Bool,
            Type::Nil => TypeExpr::Nil,
            Type::SelfType => TypeExpr::SelfType,
            Type::ClassSelf => TypeExpr::ClassSelf,
            Type::InstanceSelf => TypeExpr::InstanceSelf,
            Type::Literal(value) => TypeExpr::Literal(value.clone()),
            Type::Var(name) => TypeExpr::Var(name.clone()),
            Type::Singleton { name, .. } => TypeExpr::Singleton { name: name.clone() },
            Type::Instance { name, args } => TypeExpr::Instance {
                name: name.clone(),
                args: exprs_from(args),
            },
            Type::Interface { name, args } => TypeExpr::Interface {
                name: name.clone(),
                args: exprs_from(args),
            },
            Type::Alias { name, args } => TypeExpr::Alias {
                name: name.clone(),
                args: exprs_from(args),
            },
            Type::Union(members) => TypeExpr::Union(members.iter().map(Type::to_expr).collect()),
            Type::Intersection(members) => {
                TypeExpr::Intersection(members.iter().map(Type::to_expr).collect())
            }
            Type::Tuple(elements) => TypeExpr::Tuple(exprs_from(elements)),
            Type::Record(fields) => TypeExpr::Record(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), Type::to_expr(value)))
                    .collect(),
            ),
            Type::Proc(proc) => TypeExpr::Proc(Box::new(MethodTypeExpr {
                type_params: Vec::new(),
                params: proc.params.to_expr(),
                block: proc.block.as_ref().map(Block::to_expr),
                return_type: proc.return_type.to_expr(),
            })),
        }
    }
}

#[cfg(test)]
#[path = "tests/ast_tests.rs"]
mod tests;

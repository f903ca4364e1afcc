//! Substitution of type variables and receiver placeholders.

use rustc_hash::FxHashMap;

use strut_types::{Block, MethodType, Params, ProcType, Type};

/// Maps bound type variables to types and optionally resolves the
/// `self` / `instance` / `class` receiver placeholders. Placeholders
/// without a mapping pass through unchanged.
#[derive(Debug, Clone, Default)]
pub struct Substitution {
    vars: FxHashMap<String, Type>,
    self_type: Option<Type>,
    instance_type: Option<Type>,
    class_type: Option<Type>,
}

impl Substitution {
    pub fn new() -> Self {
        Substitution::default()
    }

    /// Pairs declared type parameters with arguments positionally.
    /// Missing arguments default to `any`.
    pub fn build(params: &[String], args: &[Type]) -> Self {
        let mut vars = FxHashMap::default();
        for (i, param) in params.iter().enumerate() {
            let arg = args.get(i).cloned().unwrap_or(Type::Any);
            vars.insert(param.clone(), arg);
        }
        Substitution {
            vars,
            ..Substitution::default()
        }
    }

    pub fn with_self(mut self, ty: Type) -> Self {
        self.self_type = Some(ty);
        self
    }

    pub fn with_instance(mut self, ty: Type) -> Self {
        self.instance_type = Some(ty);
        self
    }

    pub fn with_class(mut self, ty: Type) -> Self {
        self.class_type = Some(ty);
        self
    }

    pub fn insert_var(&mut self, name: impl Into<String>, ty: Type) {
        self.vars.insert(name.into(), ty);
    }

    /// A copy of this substitution with the given variables unbound.
    pub fn without(&self, names: &[String]) -> Substitution {
        let mut scoped = self.clone();
        for name in names {
            scoped.vars.remove(name);
        }
        scoped
    }

    pub fn apply(&self, ty: &Type) -> Type {
        match ty {
            Type::Var(name) => self.vars.get(name).cloned().unwrap_or_else(|| ty.clone()),
            Type::SelfType => self.self_type.clone().unwrap_or(Type::SelfType),
            Type::InstanceSelf => self.instance_type.clone().unwrap_or(Type::InstanceSelf),
            Type::ClassSelf => self.class_type.clone().unwrap_or(Type::ClassSelf),
            Type::Singleton { name, args } => Type::Singleton {
                name: name.clone(),
                args: self.apply_all(args),
            },
            Type::Instance { name, args } => Type::Instance {
                name: name.clone(),
                args: self.apply_all(args),
            },
            Type::Interface { name, args } => Type::Interface {
                name: name.clone(),
                args: self.apply_all(args),
            },
            Type::Alias { name, args } => Type::Alias {
                name: name.clone(),
                args: self.apply_all(args),
            },
            Type::Union(members) => Type::union(members.iter().map(|m| self.apply(m))),
            Type::Intersection(members) => {
                Type::intersection(members.iter().map(|m| self.apply(m)))
            }
            Type::Tuple(elements) => Type::Tuple(self.apply_all(elements)),
            Type::Record(fields) => Type::Record(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), self.apply(value)))
                    .collect(),
            ),
            Type::Proc(proc) => Type::Proc(Box::new(ProcType {
                params: self.apply_params(&proc.params),
                block: proc.block.as_ref().map(|b| self.apply_block(b)),
                return_type: self.apply(&proc.return_type),
            })),
            _ => ty.clone(),
        }
    }

    pub fn apply_params(&self, params: &Params) -> Params {
        Params {
            required: self.apply_all(&params.required),
            optional: self.apply_all(&params.optional),
            rest: params.rest.as_ref().map(|ty| self.apply(ty)),
            required_keywords: params
                .required_keywords
                .iter()
                .map(|(name, ty)| (name.clone(), self.apply(ty)))
                .collect(),
            optional_keywords: params
                .optional_keywords
                .iter()
                .map(|(name, ty)| (name.clone(), self.apply(ty)))
                .collect(),
            rest_keywords: params.rest_keywords.as_ref().map(|ty| self.apply(ty)),
        }
    }

    pub fn apply_block(&self, block: &Block) -> Block {
        Block {
            params: self.apply_params(&block.params),
            return_type: self.apply(&block.return_type),
            required: block.required,
        }
    }

    /// Applies this substitution under a method's own type parameters:
    /// variables the method re-binds are left alone.
    pub fn apply_method_type(&self, method_type: &MethodType) -> MethodType {
        let scoped = self.without(&method_type.type_params);
        MethodType {
            type_params: method_type.type_params.clone(),
            params: scoped.apply_params(&method_type.params),
            block: method_type.block.as_ref().map(|b| scoped.apply_block(b)),
            return_type: scoped.apply(&method_type.return_type),
        }
    }

    fn apply_all(&self, types: &[Type]) -> Vec<Type> {
        types.iter().map(|ty| self.apply(ty)).collect()
    }
}

#[cfg(test)]
#[path = "tests/subst_tests.rs"]
mod tests;

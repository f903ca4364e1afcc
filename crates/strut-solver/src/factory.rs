//! Interface synthesis: computing the callable surface of a type from
//! the registered signatures.
//!
//! Every type shape resolves to an [`Interface`] whose method types
//! have type arguments applied and receiver placeholders (`self`,
//! `instance`, `class`) replaced. Synthesis is total: unknown nominal
//! names, unresolvable aliases and the opaque variants (`any`, `top`,
//! type variables, bare placeholders) all degrade to an empty method
//! table, so a missing declaration surfaces as missing methods rather
//! than aborting the check. Synthesized interfaces are cached per
//! `(type, include_private)` pair; types are immutable so cached
//! entries never go stale.

use std::cell::RefCell;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use strut_types::{
    Interface, LiteralValue, MethodEntry, MethodType, Namespace, Params, ProcType, Type, TypeName,
};

use crate::registry::SignatureRegistry;
use crate::signature::{ClassSignature, MethodDecl, MethodKind, NominalRef, Signature, Visibility};
use crate::subst::Substitution;

pub struct InterfaceBuilder<'a> {
    registry: &'a SignatureRegistry,
    cache: RefCell<FxHashMap<(Type, bool), Interface>>,
}

impl<'a> InterfaceBuilder<'a> {
    pub fn new(registry: &'a SignatureRegistry) -> Self {
        InterfaceBuilder {
            registry,
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn registry(&self) -> &SignatureRegistry {
        self.registry
    }

    /// The interface of `ty`. Private methods are listed only when
    /// `include_private` is set.
    pub fn interface(&self, ty: &Type, include_private: bool) -> Interface {
        let key = (ty.clone(), include_private);
        if let Some(cached) = self.cache.borrow().get(&key) {
            return cached.clone();
        }
        trace!(ty = %ty, include_private, "synthesizing interface");
        let interface = self.build(ty, include_private);
        self.cache.borrow_mut().insert(key, interface.clone());
        interface
    }

    fn build(&self, ty: &Type, include_private: bool) -> Interface {
        match ty {
            Type::Instance { name, args } | Type::Interface { name, args } => {
                self.nominal_interface(ty, name, args, include_private)
            }
            Type::Singleton { name, .. } => self.singleton_interface(ty, name),
            Type::Literal(value) => {
                self.nominal_interface(ty, &literal_counterpart(value), &[], include_private)
            }
            Type::Bool => {
                let both = Type::union([
                    Type::instance(TypeName::absolute("TrueClass"), vec![]),
                    Type::instance(TypeName::absolute("FalseClass"), vec![]),
                ]);
                let mut interface = self.interface(&both, include_private);
                interface.type_ = Type::Bool;
                interface
            }
            Type::Nil => {
                self.nominal_interface(ty, &TypeName::absolute("NilClass"), &[], include_private)
            }
            Type::Tuple(elements) => self.tuple_interface(ty, elements, include_private),
            Type::Record(fields) => self.record_interface(ty, fields, include_private),
            Type::Proc(proc) => self.proc_interface(ty, proc, include_private),
            Type::Union(members) => self.union_interface(ty, members.iter(), include_private),
            Type::Intersection(members) => {
                self.intersection_interface(ty, members.iter(), include_private)
            }
            Type::Alias { .. } => {
                let expanded = self.expand_alias(ty);
                if expanded == *ty {
                    // unknown alias or a cycle
                    Interface::new(ty.clone())
                } else {
                    self.interface(&expanded, include_private)
                }
            }
            _ => Interface::new(ty.clone()),
        }
    }

    fn nominal_interface(
        &self,
        receiver: &Type,
        name: &TypeName,
        args: &[Type],
        include_private: bool,
    ) -> Interface {
        let mut interface = Interface::new(receiver.clone());
        let mut visited = FxHashSet::default();
        self.add_instance_methods(
            &mut interface,
            name,
            args,
            receiver,
            include_private,
            &mut visited,
        );
        interface
    }

    /// Merges the instance methods of `name` and its ancestors into
    /// `interface`. Ancestors go first so the declaration's own
    /// methods override inherited entries. Unknown names contribute
    /// nothing.
    fn add_instance_methods(
        &self,
        interface: &mut Interface,
        name: &TypeName,
        args: &[Type],
        self_type: &Type,
        include_private: bool,
        visited: &mut FxHashSet<TypeName>,
    ) {
        if !visited.insert(name.clone()) {
            return;
        }
        let (type_params, superclass, includes, methods) = match self.registry.signature(name) {
            Some(Signature::Class(sig)) => (
                &sig.type_params,
                sig.superclass.as_ref(),
                &sig.includes,
                &sig.methods,
            ),
            Some(Signature::Module(sig)) => {
                (&sig.type_params, None, &sig.includes, &sig.methods)
            }
            Some(Signature::Interface(sig)) => {
                (&sig.type_params, None, &sig.includes, &sig.methods)
            }
            Some(Signature::Alias(_)) | None => {
                trace!(name = %name, "no nominal signature, skipping");
                return;
            }
        };

        let subst = Substitution::build(type_params, args)
            .with_self(self_type.clone())
            .with_instance(Type::instance(
                name.clone(),
                vec![Type::Any; type_params.len()],
            ))
            .with_class(Type::singleton(name.clone()));

        if let Some(superclass) = superclass {
            let superclass_args = apply_ref_args(&subst, superclass);
            self.add_instance_methods(
                interface,
                &superclass.name,
                &superclass_args,
                self_type,
                include_private,
                visited,
            );
        }
        for include in includes {
            let include_args = apply_ref_args(&subst, include);
            self.add_instance_methods(
                interface,
                &include.name,
                &include_args,
                self_type,
                include_private,
                visited,
            );
        }

        for decl in methods {
            if decl.kind != MethodKind::Instance {
                continue;
            }
            if !include_private && decl.visibility == Visibility::Private {
                continue;
            }
            let overloads = decl
                .overloads
                .iter()
                .map(|mt| subst.apply_method_type(mt))
                .collect();
            interface
                .methods
                .insert(decl.name.clone(), MethodEntry::from_overloads(overloads));
        }
    }

    fn singleton_interface(&self, receiver: &Type, name: &TypeName) -> Interface {
        let mut interface = Interface::new(receiver.clone());
        let mut visited = FxHashSet::default();
        self.add_singleton_methods(&mut interface, name, receiver, &mut visited);

        if let Some(class_sig) = self.registry.class(name) {
            if !interface.methods.contains_key("new") {
                let entry = self.synthesize_new(class_sig);
                interface.methods.insert("new".into(), entry);
            }
        }
        interface
    }

    fn add_singleton_methods(
        &self,
        interface: &mut Interface,
        name: &TypeName,
        self_type: &Type,
        visited: &mut FxHashSet<TypeName>,
    ) {
        if !visited.insert(name.clone()) {
            return;
        }
        let (type_params, superclass, methods) = match self.registry.signature(name) {
            Some(Signature::Class(sig)) => (&sig.type_params, sig.superclass.as_ref(), &sig.methods),
            Some(Signature::Module(sig)) => (&sig.type_params, None, &sig.methods),
            _ => return,
        };

        // Class type parameters are not in scope on the singleton side.
        let subst = Substitution::build(type_params, &[])
            .with_self(self_type.clone())
            .with_instance(Type::instance(
                name.clone(),
                vec![Type::Any; type_params.len()],
            ))
            .with_class(Type::singleton(name.clone()));

        if let Some(superclass) = superclass {
            self.add_singleton_methods(interface, &superclass.name, self_type, visited);
        }
        for decl in methods {
            if decl.kind != MethodKind::Singleton {
                continue;
            }
            let overloads = decl
                .overloads
                .iter()
                .map(|mt| subst.apply_method_type(mt))
                .collect();
            interface
                .methods
                .insert(decl.name.clone(), MethodEntry::from_overloads(overloads));
        }
    }

    /// Builds the `new` entry of a class singleton from the nearest
    /// `initialize`, generalizing the class type parameters into the
    /// method and returning a fresh instance.
    fn synthesize_new(&self, sig: &ClassSignature) -> MethodEntry {
        let fresh = Type::instance(
            sig.name.clone(),
            sig.type_params.iter().cloned().map(Type::Var).collect(),
        );
        let identity_args: Vec<Type> = sig.type_params.iter().cloned().map(Type::Var).collect();
        let subst = Substitution::build(&sig.type_params, &identity_args)
            .with_self(fresh.clone())
            .with_instance(Type::instance(
                sig.name.clone(),
                vec![Type::Any; sig.type_params.len()],
            ))
            .with_class(Type::singleton(sig.name.clone()));

        let overloads = self
            .initialize_overloads(sig, &subst, &fresh)
            .unwrap_or_else(|| vec![MethodType::new(Params::empty(), fresh.clone())]);

        let methods = overloads
            .into_iter()
            .map(|mt| {
                let mt = freshen_type_params(&sig.type_params, mt);
                let raw = mt.return_type;
                let return_type = if raw == Type::Void || raw == fresh {
                    fresh.clone()
                } else {
                    Type::union([fresh.clone(), raw])
                };
                let mut type_params = sig.type_params.clone();
                type_params.extend(mt.type_params);
                MethodType {
                    type_params,
                    params: mt.params,
                    block: mt.block,
                    return_type,
                }
            })
            .collect();
        MethodEntry::from_overloads(methods)
    }

    /// The substituted `initialize` overloads of `sig` or its nearest
    /// ancestor declaring one.
    fn initialize_overloads(
        &self,
        sig: &ClassSignature,
        subst: &Substitution,
        fresh: &Type,
    ) -> Option<Vec<MethodType>> {
        if let Some(decl) = find_initialize(&sig.methods) {
            let overloads = decl
                .overloads
                .iter()
                .map(|mt| subst.apply_method_type(mt))
                .collect();
            return Some(overloads);
        }
        let superclass = sig.superclass.as_ref()?;
        let superclass_sig = self.registry.class(&superclass.name)?;
        let superclass_args = apply_ref_args(subst, superclass);
        let superclass_subst = Substitution::build(&superclass_sig.type_params, &superclass_args)
            .with_self(fresh.clone())
            .with_instance(Type::instance(
                superclass.name.clone(),
                vec![Type::Any; superclass_sig.type_params.len()],
            ))
            .with_class(Type::singleton(superclass.name.clone()));
        self.initialize_overloads(superclass_sig, &superclass_subst, fresh)
    }

    fn tuple_interface(
        &self,
        receiver: &Type,
        elements: &[Type],
        include_private: bool,
    ) -> Interface {
        let element_union = Type::union(elements.iter().cloned());
        let mut interface = self.nominal_interface(
            receiver,
            &TypeName::absolute("Array"),
            &[element_union.clone()],
            include_private,
        );

        let integer = Type::instance(TypeName::absolute("Integer"), vec![]);

        let mut readers: Vec<MethodType> = elements
            .iter()
            .enumerate()
            .map(|(i, element)| {
                MethodType::new(
                    Params::positional(vec![Type::literal(LiteralValue::Int(i as i64))]),
                    element.clone(),
                )
            })
            .collect();
        readers.push(MethodType::new(
            Params::positional(vec![integer.clone()]),
            element_union.clone(),
        ));
        interface
            .methods
            .insert("[]".into(), MethodEntry::from_overloads(readers));

        let mut writers: Vec<MethodType> = elements
            .iter()
            .enumerate()
            .map(|(i, element)| {
                MethodType::new(
                    Params::positional(vec![
                        Type::literal(LiteralValue::Int(i as i64)),
                        element.clone(),
                    ]),
                    element.clone(),
                )
            })
            .collect();
        writers.push(MethodType::new(
            Params::positional(vec![integer, element_union.clone()]),
            element_union,
        ));
        interface
            .methods
            .insert("[]=".into(), MethodEntry::from_overloads(writers));

        interface
    }

    fn record_interface(
        &self,
        receiver: &Type,
        fields: &std::collections::BTreeMap<LiteralValue, Type>,
        include_private: bool,
    ) -> Interface {
        let key_union = Type::union(fields.keys().cloned().map(Type::Literal));
        let value_union = Type::union(fields.values().cloned());
        let mut interface = self.nominal_interface(
            receiver,
            &TypeName::absolute("Hash"),
            &[key_union.clone(), value_union.clone()],
            include_private,
        );

        let mut readers: Vec<MethodType> = fields
            .iter()
            .map(|(key, value)| {
                MethodType::new(
                    Params::positional(vec![Type::Literal(key.clone())]),
                    value.clone(),
                )
            })
            .collect();
        readers.push(MethodType::new(
            Params::positional(vec![key_union.clone()]),
            value_union.clone(),
        ));
        interface
            .methods
            .insert("[]".into(), MethodEntry::from_overloads(readers));

        let mut writers: Vec<MethodType> = fields
            .iter()
            .map(|(key, value)| {
                MethodType::new(
                    Params::positional(vec![Type::Literal(key.clone()), value.clone()]),
                    value.clone(),
                )
            })
            .collect();
        writers.push(MethodType::new(
            Params::positional(vec![key_union, value_union.clone()]),
            value_union,
        ));
        interface
            .methods
            .insert("[]=".into(), MethodEntry::from_overloads(writers));

        interface
    }

    fn proc_interface(
        &self,
        receiver: &Type,
        proc: &ProcType,
        include_private: bool,
    ) -> Interface {
        let mut interface = self.nominal_interface(
            receiver,
            &TypeName::absolute("Proc"),
            &[],
            include_private,
        );
        let call = MethodType {
            type_params: Vec::new(),
            params: proc.params.clone(),
            block: proc.block.clone(),
            return_type: proc.return_type.clone(),
        };
        // Always an overload combination, even with one alternative.
        let entry = MethodEntry::overload(vec![MethodEntry::Method(call)]);
        interface.methods.insert("call".into(), entry.clone());
        interface.methods.insert("[]".into(), entry);
        interface
    }

    /// A union responds to the methods every member responds to, each
    /// entry tagged as a union of the members' entries.
    fn union_interface<'t>(
        &self,
        receiver: &Type,
        members: impl Iterator<Item = &'t Type>,
        include_private: bool,
    ) -> Interface {
        let interfaces: Vec<Interface> = members
            .map(|member| self.interface(member, include_private))
            .collect();
        let mut interface = Interface::new(receiver.clone());
        let Some((first, rest)) = interfaces.split_first() else {
            return interface;
        };
        for (name, entry) in &first.methods {
            let mut entries = vec![entry.clone()];
            let everywhere = rest.iter().all(|other| {
                if let Some(other_entry) = other.method(name) {
                    entries.push(other_entry.clone());
                    true
                } else {
                    false
                }
            });
            if everywhere {
                interface
                    .methods
                    .insert(name.clone(), MethodEntry::union(entries));
            }
        }
        interface
    }

    /// An intersection responds to the methods any member responds to.
    /// A method owned by one member keeps that member's entry;
    /// competing plain signatures collapse to an overload when their
    /// parameter shapes are distinct.
    fn intersection_interface<'t>(
        &self,
        receiver: &Type,
        members: impl Iterator<Item = &'t Type>,
        include_private: bool,
    ) -> Interface {
        let interfaces: Vec<Interface> = members
            .map(|member| self.interface(member, include_private))
            .collect();
        let mut interface = Interface::new(receiver.clone());
        for owner in &interfaces {
            for name in owner.methods.keys() {
                if interface.methods.contains_key(name) {
                    continue;
                }
                let mut entries: Vec<MethodEntry> = interfaces
                    .iter()
                    .filter_map(|i| i.method(name).cloned())
                    .collect();
                let entry = if entries.len() == 1 {
                    entries.remove(0)
                } else {
                    combine_intersection_entries(entries)
                };
                interface.methods.insert(name.clone(), entry);
            }
        }
        interface
    }

    /// Resolves an alias reference to its underlying type, stopping on
    /// unknown names and cycles. The guard tracks alias *names*, not
    /// unfolded types: a generic cycle can grow its arguments on every
    /// step (`loop[T] = loop[Array[T]]`), so revisiting a name means
    /// the reference comes back unresolved.
    pub fn expand_alias(&self, ty: &Type) -> Type {
        let mut current = ty.clone();
        let mut visited = FxHashSet::default();
        while let Type::Alias { name, args } = &current {
            if !visited.insert(name.clone()) {
                return ty.clone();
            }
            match self.unfold(name, args) {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    /// One unfolding step of an alias: the substituted body, or `None`
    /// if no alias of that name is registered.
    pub fn unfold(&self, name: &TypeName, args: &[Type]) -> Option<Type> {
        let sig = self.registry.alias(name)?;
        let subst = Substitution::build(&sig.type_params, args);
        Some(subst.apply(&sig.body))
    }

    /// Rewrites relative nominal names in `ty` to absolute ones,
    /// resolving against the registry from the innermost enclosing
    /// namespace outwards. Names found nowhere resolve to the root.
    pub fn absolute_type(&self, ty: &Type, namespace: &Namespace) -> Type {
        match ty {
            Type::Singleton { name, args } => Type::Singleton {
                name: self.absolute_name(name, namespace),
                args: self.absolute_all(args, namespace),
            },
            Type::Instance { name, args } => Type::Instance {
                name: self.absolute_name(name, namespace),
                args: self.absolute_all(args, namespace),
            },
            Type::Interface { name, args } => Type::Interface {
                name: self.absolute_name(name, namespace),
                args: self.absolute_all(args, namespace),
            },
            Type::Alias { name, args } => Type::Alias {
                name: self.absolute_name(name, namespace),
                args: self.absolute_all(args, namespace),
            },
            Type::Union(members) => {
                Type::union(members.iter().map(|m| self.absolute_type(m, namespace)))
            }
            Type::Intersection(members) => {
                Type::intersection(members.iter().map(|m| self.absolute_type(m, namespace)))
            }
            Type::Tuple(elements) => Type::Tuple(self.absolute_all(elements, namespace)),
            Type::Record(fields) => Type::Record(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), self.absolute_type(value, namespace)))
                    .collect(),
            ),
            Type::Proc(proc) => Type::Proc(Box::new(ProcType {
                params: self.absolute_params(&proc.params, namespace),
                block: proc.block.as_ref().map(|block| strut_types::Block {
                    params: self.absolute_params(&block.params, namespace),
                    return_type: self.absolute_type(&block.return_type, namespace),
                    required: block.required,
                }),
                return_type: self.absolute_type(&proc.return_type, namespace),
            })),
            _ => ty.clone(),
        }
    }

    fn absolute_name(&self, name: &TypeName, namespace: &Namespace) -> TypeName {
        if name.is_absolute() {
            return name.clone();
        }
        for scope in namespace.ascending() {
            let candidate = name.qualified_under(&scope);
            if self.registry.contains(&candidate) {
                return candidate;
            }
        }
        name.to_root()
    }

    fn absolute_params(&self, params: &Params, namespace: &Namespace) -> Params {
        Params {
            required: self.absolute_all(&params.required, namespace),
            optional: self.absolute_all(&params.optional, namespace),
            rest: params
                .rest
                .as_ref()
                .map(|ty| self.absolute_type(ty, namespace)),
            required_keywords: params
                .required_keywords
                .iter()
                .map(|(name, ty)| (name.clone(), self.absolute_type(ty, namespace)))
                .collect(),
            optional_keywords: params
                .optional_keywords
                .iter()
                .map(|(name, ty)| (name.clone(), self.absolute_type(ty, namespace)))
                .collect(),
            rest_keywords: params
                .rest_keywords
                .as_ref()
                .map(|ty| self.absolute_type(ty, namespace)),
        }
    }

    fn absolute_all(&self, types: &[Type], namespace: &Namespace) -> Vec<Type> {
        types
            .iter()
            .map(|ty| self.absolute_type(ty, namespace))
            .collect()
    }
}

fn apply_ref_args(subst: &Substitution, nominal: &NominalRef) -> Vec<Type> {
    nominal.args.iter().map(|arg| subst.apply(arg)).collect()
}

/// Renames the generic parameters of `mt` away from `outer` so the two
/// lists can be concatenated without duplicate binders.
fn freshen_type_params(outer: &[String], mt: MethodType) -> MethodType {
    if mt.type_params.iter().all(|param| !outer.contains(param)) {
        return mt;
    }
    let mut rename = Substitution::new();
    let mut fresh_params: Vec<String> = Vec::with_capacity(mt.type_params.len());
    for param in &mt.type_params {
        if !outer.contains(param) {
            fresh_params.push(param.clone());
            continue;
        }
        let mut n = 1;
        let mut candidate = format!("{param}{n}");
        while outer.contains(&candidate)
            || mt.type_params.contains(&candidate)
            || fresh_params.contains(&candidate)
        {
            n += 1;
            candidate = format!("{param}{n}");
        }
        rename.insert_var(param.clone(), Type::Var(candidate.clone()));
        fresh_params.push(candidate);
    }
    MethodType {
        type_params: fresh_params,
        params: rename.apply_params(&mt.params),
        block: mt.block.map(|b| rename.apply_block(&b)),
        return_type: rename.apply(&mt.return_type),
    }
}

fn find_initialize(methods: &[MethodDecl]) -> Option<&MethodDecl> {
    methods
        .iter()
        .find(|decl| decl.kind == MethodKind::Instance && decl.name == "initialize")
}

fn literal_counterpart(value: &LiteralValue) -> TypeName {
    match value {
        LiteralValue::Int(_) => TypeName::absolute("Integer"),
        LiteralValue::Str(_) => TypeName::absolute("String"),
        LiteralValue::Sym(_) => TypeName::absolute("Symbol"),
        LiteralValue::Bool(true) => TypeName::absolute("TrueClass"),
        LiteralValue::Bool(false) => TypeName::absolute("FalseClass"),
    }
}

/// Combines entries a method gets from several intersection members.
/// Plain signatures with pairwise-distinct parameter shapes become a
/// single overload; anything else stays an intersection of the
/// original entries.
fn combine_intersection_entries(entries: Vec<MethodEntry>) -> MethodEntry {
    let mut methods = Vec::new();
    for entry in &entries {
        match entry {
            MethodEntry::Method(mt) => methods.push(mt.clone()),
            MethodEntry::Combination { .. } => return MethodEntry::intersection(entries),
        }
    }
    let mut unique: Vec<MethodType> = Vec::new();
    for mt in methods {
        if unique.contains(&mt) {
            continue;
        }
        if unique.iter().any(|other| other.params == mt.params) {
            // same shape, different contract
            return MethodEntry::intersection(entries);
        }
        unique.push(mt);
    }
    MethodEntry::from_overloads(unique)
}

//! Structural subtyping over synthesized interfaces.
//!
//! `check(sub, sup)` asks whether a value of `sub` can stand wherever
//! `sup` is expected. Recursive types are handled co-inductively: the
//! pair under proof is assumed to hold while its method tables are
//! compared, so self-referential interfaces terminate.

use std::cell::RefCell;

use rustc_hash::FxHashSet;
use tracing::trace;

use strut_types::{Block, CombinationOperator, MethodEntry, MethodType, Params, Type};

use crate::factory::InterfaceBuilder;
use crate::subst::Substitution;

pub struct SubtypeChecker<'a> {
    builder: &'a InterfaceBuilder<'a>,
    proving: RefCell<FxHashSet<(Type, Type)>>,
}

impl<'a> SubtypeChecker<'a> {
    pub fn new(builder: &'a InterfaceBuilder<'a>) -> Self {
        SubtypeChecker {
            builder,
            proving: RefCell::new(FxHashSet::default()),
        }
    }

    pub fn check(&self, sub: &Type, sup: &Type) -> bool {
        if self
            .proving
            .borrow()
            .contains(&(sub.clone(), sup.clone()))
        {
            return true;
        }
        if sub == sup {
            return true;
        }
        match (sub, sup) {
            (Type::Any, _) | (_, Type::Any) => true,
            (_, Type::Top) => true,
            (Type::Bot, _) => true,
            (Type::Alias { .. }, _) => {
                let expanded = self.builder.expand_alias(sub);
                if expanded == *sub {
                    self.check_structural(sub, sup)
                } else {
                    self.check(&expanded, sup)
                }
            }
            (_, Type::Alias { .. }) => {
                let expanded = self.builder.expand_alias(sup);
                if expanded == *sup {
                    self.check_structural(sub, sup)
                } else {
                    self.check(sub, &expanded)
                }
            }
            (Type::Union(members), _) => members.iter().all(|member| self.check(member, sup)),
            (_, Type::Union(members)) => members.iter().any(|member| self.check(sub, member)),
            (Type::Intersection(members), _) => {
                members.iter().any(|member| self.check(member, sup))
            }
            (_, Type::Intersection(members)) => {
                members.iter().all(|member| self.check(sub, member))
            }
            (Type::Var(_), _) | (_, Type::Var(_)) => false,
            _ => self.check_structural(sub, sup),
        }
    }

    fn check_structural(&self, sub: &Type, sup: &Type) -> bool {
        let sub_interface = self.builder.interface(sub, false);
        let sup_interface = self.builder.interface(sup, false);
        trace!(sub = %sub, sup = %sup, "comparing interfaces");

        let pair = (sub.clone(), sup.clone());
        self.proving.borrow_mut().insert(pair.clone());
        let holds = sup_interface.methods.iter().all(|(name, sup_entry)| {
            sub_interface
                .method(name)
                .is_some_and(|sub_entry| self.check_entry(sub_entry, sup_entry))
        });
        self.proving.borrow_mut().remove(&pair);
        holds
    }

    fn check_entry(&self, sub: &MethodEntry, sup: &MethodEntry) -> bool {
        use CombinationOperator::{Intersection, Overload, Union};
        match (sub, sup) {
            (
                MethodEntry::Combination {
                    operator: Union,
                    entries,
                },
                _,
            ) => entries.iter().all(|entry| self.check_entry(entry, sup)),
            (
                _,
                MethodEntry::Combination {
                    operator: Union,
                    entries,
                },
            ) => entries.iter().any(|entry| self.check_entry(sub, entry)),
            (
                MethodEntry::Combination {
                    operator: Intersection,
                    entries,
                },
                _,
            ) => entries.iter().any(|entry| self.check_entry(entry, sup)),
            (
                _,
                MethodEntry::Combination {
                    operator: Intersection,
                    entries,
                },
            ) => entries.iter().all(|entry| self.check_entry(sub, entry)),
            (
                _,
                MethodEntry::Combination {
                    operator: Overload,
                    entries,
                },
            ) => entries.iter().all(|entry| self.check_entry(sub, entry)),
            (
                MethodEntry::Combination {
                    operator: Overload,
                    entries,
                },
                _,
            ) => entries.iter().any(|entry| self.check_entry(entry, sup)),
            (MethodEntry::Method(sub_mt), MethodEntry::Method(sup_mt)) => {
                self.check_method(sub_mt, sup_mt)
            }
        }
    }

    fn check_method(&self, sub: &MethodType, sup: &MethodType) -> bool {
        if sub.type_params.len() != sup.type_params.len() {
            return false;
        }
        let renamed;
        let sup = if sup.type_params == sub.type_params {
            sup
        } else {
            // Align the generic names so the variables compare equal.
            let mut rename = Substitution::new();
            for (theirs, ours) in sup.type_params.iter().zip(&sub.type_params) {
                rename.insert_var(theirs.clone(), Type::Var(ours.clone()));
            }
            renamed = MethodType {
                type_params: sub.type_params.clone(),
                params: rename.apply_params(&sup.params),
                block: sup.block.as_ref().map(|b| rename.apply_block(b)),
                return_type: rename.apply(&sup.return_type),
            };
            &renamed
        };

        self.check_params(&sub.params, &sup.params)
            && self.check_block(sub.block.as_ref(), sup.block.as_ref())
            && self.check(&sub.return_type, &sup.return_type)
    }

    /// Parameters are contravariant: every call shape the supertype
    /// accepts must be accepted by the subtype.
    fn check_params(&self, sub: &Params, sup: &Params) -> bool {
        if sub.required.len() > sup.required.len() {
            return false;
        }
        if sup.rest.is_some() && sub.rest.is_none() {
            return false;
        }

        let upper = if sup.rest.is_some() {
            sup.fixed_len().max(sub.fixed_len())
        } else {
            sup.fixed_len()
        };
        for i in 0..upper {
            let Some(sup_ty) = sup.type_at(i) else {
                break;
            };
            let Some(sub_ty) = sub.type_at(i) else {
                return false;
            };
            if !self.check(sup_ty, sub_ty) {
                return false;
            }
        }
        if let (Some(sup_rest), Some(sub_rest)) = (&sup.rest, &sub.rest) {
            if !self.check(sup_rest, sub_rest) {
                return false;
            }
        }

        // Keywords the supertype may pass must be accepted.
        for (name, sup_ty) in sup.required_keywords.iter().chain(&sup.optional_keywords) {
            match sub.keyword(name).or(sub.rest_keywords.as_ref()) {
                Some(sub_ty) => {
                    if !self.check(sup_ty, sub_ty) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        // Keywords the subtype insists on must be guaranteed.
        for (name, sub_ty) in &sub.required_keywords {
            if sup.required_keywords.contains_key(name) {
                continue;
            }
            match &sup.rest_keywords {
                Some(sup_rest) => {
                    if !self.check(sup_rest, sub_ty) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        if let Some(sup_rest) = &sup.rest_keywords {
            for (name, sub_ty) in &sub.optional_keywords {
                if sup.keyword(name).is_some() {
                    continue;
                }
                if !self.check(sup_rest, sub_ty) {
                    return false;
                }
            }
            match &sub.rest_keywords {
                Some(sub_rest) => {
                    if !self.check(sup_rest, sub_rest) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        true
    }

    /// Blocks compare leniently on arity: only positions both sides
    /// declare are related.
    fn check_block(&self, sub: Option<&Block>, sup: Option<&Block>) -> bool {
        match (sub, sup) {
            (None, _) => true,
            (Some(sub_block), None) => !sub_block.required,
            (Some(sub_block), Some(sup_block)) => {
                let upper = sub_block
                    .params
                    .fixed_len()
                    .max(sup_block.params.fixed_len());
                for i in 0..upper {
                    if let (Some(sub_ty), Some(sup_ty)) =
                        (sub_block.params.type_at(i), sup_block.params.type_at(i))
                    {
                        if !self.check(sup_ty, sub_ty) {
                            return false;
                        }
                    }
                }
                if let (Some(sub_rest), Some(sup_rest)) =
                    (&sub_block.params.rest, &sup_block.params.rest)
                {
                    if !self.check(sup_rest, sub_rest) {
                        return false;
                    }
                }
                self.check(&sub_block.return_type, &sup_block.return_type)
            }
        }
    }
}

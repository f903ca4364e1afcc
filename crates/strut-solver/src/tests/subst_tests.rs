use super::*;

use strut_types::TypeName;

fn var(name: &str) -> Type {
    Type::Var(name.into())
}

fn instance(name: &str) -> Type {
    Type::instance(TypeName::absolute(name), vec![])
}

#[test]
fn build_pads_missing_args_with_any() {
    let subst = Substitution::build(&["A".into(), "B".into()], &[instance("Integer")]);
    assert_eq!(subst.apply(&var("A")), instance("Integer"));
    assert_eq!(subst.apply(&var("B")), Type::Any);
    assert_eq!(subst.apply(&var("C")), var("C"));
}

#[test]
fn placeholders_resolve_only_when_mapped() {
    let subst = Substitution::new().with_self(instance("Foo"));
    assert_eq!(subst.apply(&Type::SelfType), instance("Foo"));
    assert_eq!(subst.apply(&Type::InstanceSelf), Type::InstanceSelf);
    assert_eq!(subst.apply(&Type::ClassSelf), Type::ClassSelf);
}

#[test]
fn applies_under_combinators() {
    let subst = Substitution::build(&["A".into()], &[instance("Integer")]);
    let ty = Type::union([var("A"), Type::Nil]);
    assert_eq!(subst.apply(&ty), Type::union([instance("Integer"), Type::Nil]));

    let nested = Type::instance(TypeName::absolute("Array"), vec![var("A")]);
    assert_eq!(
        subst.apply(&nested),
        Type::instance(TypeName::absolute("Array"), vec![instance("Integer")])
    );
}

#[test]
fn substituted_union_renormalizes() {
    // A | Integer collapses once A maps to Integer.
    let subst = Substitution::build(&["A".into()], &[instance("Integer")]);
    let ty = Type::union([var("A"), instance("Integer")]);
    assert_eq!(subst.apply(&ty), instance("Integer"));
}

#[test]
fn method_type_params_shadow_outer_vars() {
    let subst = Substitution::build(&["A".into()], &[instance("Integer")]);
    let mt = MethodType::new(Params::positional(vec![var("A")]), var("A"))
        .with_type_params(vec!["A".into()]);

    let applied = subst.apply_method_type(&mt);
    assert_eq!(applied.params.required, vec![var("A")]);
    assert_eq!(applied.return_type, var("A"));

    let unshadowed = MethodType::new(Params::positional(vec![var("A")]), var("A"));
    let applied = subst.apply_method_type(&unshadowed);
    assert_eq!(applied.params.required, vec![instance("Integer")]);
    assert_eq!(applied.return_type, instance("Integer"));
}

#[test]
fn block_params_are_substituted() {
    let subst = Substitution::build(&["A".into()], &[instance("Integer")]);
    let mt = MethodType::new(Params::empty(), Type::Void).with_block(Block::required(
        Params::positional(vec![var("A")]),
        Type::Nil,
    ));

    let applied = subst.apply_method_type(&mt);
    let block = applied.block.as_ref().unwrap();
    assert_eq!(block.params.required, vec![instance("Integer")]);
}

use super::*;
use crate::name::TypeName;

fn instance(name: &str) -> Type {
    Type::instance(TypeName::absolute(name), vec![])
}

#[test]
fn union_flattens_and_deduplicates() {
    let inner = Type::union([instance("A"), instance("B")]);
    let outer = Type::union([inner, instance("B"), instance("C")]);

    match &outer {
        Type::Union(members) => assert_eq!(members.len(), 3),
        other => panic!("expected union, got {other:?}"),
    }
}

#[test]
fn union_equality_is_order_independent() {
    let left = Type::union([instance("A"), instance("B")]);
    let right = Type::union([instance("B"), instance("A")]);
    assert_eq!(left, right);
}

#[test]
fn singleton_member_collapses() {
    assert_eq!(Type::union([instance("A"), instance("A")]), instance("A"));
    assert_eq!(Type::intersection([instance("A")]), instance("A"));
}

#[test]
fn optional_is_union_with_nil() {
    let ty = Type::optional(instance("Integer"));
    assert_eq!(ty, Type::union([Type::Nil, instance("Integer")]));
}

#[test]
fn record_equality_ignores_field_order() {
    let mut a = std::collections::BTreeMap::new();
    a.insert(LiteralValue::Sym("foo".into()), instance("A"));
    a.insert(LiteralValue::Int(1), instance("B"));

    let mut b = std::collections::BTreeMap::new();
    b.insert(LiteralValue::Int(1), instance("B"));
    b.insert(LiteralValue::Sym("foo".into()), instance("A"));

    assert_eq!(Type::Record(a), Type::Record(b));
}

#[test]
fn display_forms() {
    assert_eq!(Type::Any.to_string(), "any");
    assert_eq!(Type::SelfType.to_string(), "self");
    assert_eq!(Type::ClassSelf.to_string(), "class");
    assert_eq!(Type::InstanceSelf.to_string(), "instance");
    assert_eq!(Type::Literal(LiteralValue::Int(30)).to_string(), "30");
    assert_eq!(Type::Literal(LiteralValue::Sym("S".into())).to_string(), ":S");

    assert_eq!(
        Type::singleton(TypeName::absolute("Object")).to_string(),
        "singleton(::Object)"
    );
    assert_eq!(
        Type::instance(TypeName::absolute("Array"), vec![instance("Object")]).to_string(),
        "::Array[::Object]"
    );
    assert_eq!(
        Type::interface(TypeName::relative("_Each"), vec![Type::SelfType, Type::Void]).to_string(),
        "_Each[self, void]"
    );
    assert_eq!(
        Type::union([instance("Integer"), Type::Nil]).to_string(),
        "nil | ::Integer"
    );
    assert_eq!(
        Type::intersection([instance("Integer"), Type::Nil]).to_string(),
        "nil & ::Integer"
    );
    assert_eq!(
        Type::Tuple(vec![instance("Integer"), instance("String")]).to_string(),
        "[::Integer, ::String]"
    );
}

#[test]
fn proc_display() {
    let params = crate::method_type::Params::positional(vec![instance("String")]);
    let ty = Type::proc(params, None, instance("Integer"));
    assert_eq!(ty.to_string(), "^(::String) -> ::Integer");
}

use super::*;
use crate::method_type::{MethodType, Params};
use crate::name::TypeName;
use crate::types::Type;

fn instance(name: &str) -> Type {
    Type::instance(TypeName::absolute(name), vec![])
}

fn mt(params: Vec<Type>, ret: Type) -> MethodType {
    MethodType::new(Params::positional(params), ret)
}

#[test]
fn single_overload_stays_plain() {
    let entry = MethodEntry::from_overloads(vec![mt(vec![], instance("String"))]);
    assert!(matches!(entry, MethodEntry::Method(_)));
    assert_eq!(entry.to_string(), "{ () -> ::String }");
}

#[test]
fn several_overloads_become_a_combination() {
    let entry = MethodEntry::from_overloads(vec![
        mt(vec![instance("Integer")], instance("Integer")),
        mt(vec![], instance("Integer")),
    ]);
    assert_eq!(entry.operator(), Some(CombinationOperator::Overload));
    assert_eq!(
        entry.to_string(),
        "{ (::Integer) -> ::Integer | () -> ::Integer }"
    );
}

#[test]
fn method_lookup_by_name() {
    let mut interface = Interface::new(instance("Foo"));
    interface.methods.insert(
        "to_s".into(),
        MethodEntry::from_overloads(vec![mt(vec![], instance("String"))]),
    );

    assert!(interface.method("to_s").is_some());
    assert!(interface.method("missing").is_none());
}

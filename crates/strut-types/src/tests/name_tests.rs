use super::*;

#[test]
fn display_absolute_and_relative() {
    assert_eq!(TypeName::absolute("Foo").to_string(), "::Foo");
    assert_eq!(TypeName::relative("Foo").to_string(), "Foo");

    let nested = TypeName::new(Namespace::root().append("Foo"), "Bar");
    assert_eq!(nested.to_string(), "::Foo::Bar");

    let relative_nested = TypeName::new(Namespace::empty().append("Foo"), "Bar");
    assert_eq!(relative_nested.to_string(), "Foo::Bar");
}

#[test]
fn ascending_walks_to_root() {
    let ns = Namespace::root().append("A").append("B");
    let chain: Vec<String> = ns.ascending().map(|ns| ns.to_string()).collect();
    assert_eq!(chain, vec!["::A::B", "::A", "::"]);
}

#[test]
fn qualified_under_keeps_intermediate_components() {
    let name = TypeName::new(Namespace::empty().append("Inner"), "Thing");
    let scope = Namespace::root().append("Outer");
    assert_eq!(name.qualified_under(&scope).to_string(), "::Outer::Inner::Thing");
    assert_eq!(name.to_root().to_string(), "::Inner::Thing");
}

#[test]
fn parent_of_root_is_none() {
    assert!(Namespace::root().parent().is_none());
    assert!(Namespace::empty().parent().is_none());
    assert_eq!(
        Namespace::root().append("A").parent(),
        Some(Namespace::root())
    );
}

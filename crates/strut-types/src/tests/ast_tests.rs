use super::*;
use crate::name::Namespace;

fn instance_expr(name: &str) -> TypeExpr {
    TypeExpr::Instance {
        name: TypeName::absolute(name),
        args: vec![],
    }
}

fn syntactic_primitives() -> Vec<TypeExpr> {
    vec![
        TypeExpr::Any,
        TypeExpr::Void,
        TypeExpr::Top,
        TypeExpr::Bot,
        TypeExpr::Bool,
        TypeExpr::Nil,
        TypeExpr::SelfType,
        TypeExpr::ClassSelf,
        TypeExpr::InstanceSelf,
        TypeExpr::Var("A".into()),
        TypeExpr::Singleton {
            name: TypeName::absolute("Object"),
        },
        TypeExpr::Instance {
            name: TypeName::absolute("Array"),
            args: vec![instance_expr("Object")],
        },
        TypeExpr::Interface {
            name: TypeName::relative("_Each"),
            args: vec![TypeExpr::SelfType, TypeExpr::Void],
        },
        TypeExpr::Alias {
            name: TypeName::new(Namespace::empty().append("Super"), "duper"),
            args: vec![],
        },
    ]
}

#[test]
fn syntactic_primitives_round_trip() {
    for expr in syntactic_primitives() {
        let ty = Type::from_expr(&expr);
        assert_eq!(ty.to_expr(), expr, "round trip failed for {expr:?}");
    }
}

#[test]
fn internal_types_round_trip() {
    let record = Type::Record(
        [
            (LiteralValue::Int(1), Type::instance(TypeName::absolute("Integer"), vec![])),
            (LiteralValue::Sym("foo".into()), Type::Bool),
        ]
        .into_iter()
        .collect(),
    );
    let types = vec![
        Type::union([
            Type::instance(TypeName::absolute("Integer"), vec![]),
            Type::Nil,
        ]),
        Type::intersection([
            Type::instance(TypeName::absolute("Integer"), vec![]),
            Type::instance(TypeName::absolute("String"), vec![]),
        ]),
        Type::Literal(LiteralValue::Int(30)),
        Type::Tuple(vec![
            Type::instance(TypeName::absolute("Integer"), vec![]),
            Type::instance(TypeName::absolute("String"), vec![]),
        ]),
        record,
        Type::proc(
            Params::positional(vec![Type::instance(TypeName::absolute("String"), vec![])]),
            None,
            Type::instance(TypeName::absolute("Integer"), vec![]),
        ),
    ];

    for ty in types {
        assert_eq!(Type::from_expr(&ty.to_expr()), ty, "round trip failed for {ty}");
    }
}

#[test]
fn optional_sugar_lowers_to_union_with_nil() {
    let expr = TypeExpr::Optional(Box::new(instance_expr("Integer")));
    let ty = Type::from_expr(&expr);
    assert_eq!(
        ty,
        Type::union([
            Type::instance(TypeName::absolute("Integer"), vec![]),
            Type::Nil,
        ])
    );
    // The sugar never resurfaces.
    assert!(matches!(ty.to_expr(), TypeExpr::Union(_)));
}

#[test]
fn proc_expr_round_trips_params_and_block() {
    let expr = TypeExpr::Proc(Box::new(MethodTypeExpr {
        type_params: vec![],
        params: ParamsExpr {
            required: vec![instance_expr("String")],
            optional: vec![instance_expr("Integer")],
            rest: None,
            required_keywords: vec![("x".into(), TypeExpr::Bool)],
            optional_keywords: vec![],
            rest_keywords: None,
        },
        block: Some(BlockExpr {
            params: ParamsExpr::default(),
            return_type: TypeExpr::Void,
            required: true,
        }),
        return_type: TypeExpr::Void,
    }));

    let ty = Type::from_expr(&expr);
    assert_eq!(Type::from_expr(&ty.to_expr()), ty);
}

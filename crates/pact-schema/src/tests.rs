//! Tests for the type algebra

use crate::*;
use pact_core::literal::Literal;
use pact_core::names::Field;

type Ty = Type<String>;

fn var(name: &str) -> Ty {
    Type::TyVar(name.to_string())
}

fn field(name: &str) -> Field {
    Field::new(name)
}

fn object(fields: &[(&str, Ty)]) -> Ty {
    Type::TyRow(Row::closed(fields.iter().map(|(k, t)| (field(k), t.clone()))))
}

mod rendering {
    use super::*;

    #[test]
    fn test_primitives() {
        let rendered: Vec<String> =
            PrimType::ALL.iter().map(|p| Ty::TyPrim(*p).to_string()).collect();
        assert_eq!(rendered, ["integer", "decimal", "time", "bool", "string", "unit"]);
        assert_eq!(Ty::TyCap.to_string(), "capability");
    }

    #[test]
    fn test_function_arrows_associate_right() {
        let f = Ty::fun_n([Ty::INTEGER, Ty::STRING], Ty::BOOL);
        assert_eq!(f.to_string(), "integer -> string -> bool");

        let higher = Ty::fun(Ty::fun(Ty::INTEGER, Ty::STRING), Ty::BOOL);
        assert_eq!(higher.to_string(), "(integer -> string) -> bool");
    }

    #[test]
    fn test_forall_on_left_is_parenthesized() {
        let poly = Ty::forall(vec!["a".into()], Ty::fun(var("a"), var("a"))).unwrap();
        assert_eq!(poly.to_string(), "∀(a:TYPE).a -> a");
        assert_eq!(Ty::fun(poly, Ty::UNIT).to_string(), "(∀(a:TYPE).a -> a) -> unit");
    }

    #[test]
    fn test_lists() {
        assert_eq!(Ty::list(Ty::INTEGER).to_string(), "list integer");
        assert_eq!(Ty::list(var("a")).to_string(), "list a");
        assert_eq!(Ty::list(Ty::list(Ty::STRING)).to_string(), "list (list string)");
        assert_eq!(Ty::list(Ty::fun(Ty::INTEGER, Ty::BOOL)).to_string(), "list (integer -> bool)");
        assert_eq!(Ty::list(object(&[("a", Ty::INTEGER)])).to_string(), "list {a:integer}");
    }

    #[test]
    fn test_rows() {
        let closed = object(&[("b", Ty::STRING), ("a", Ty::INTEGER)]);
        assert_eq!(closed.to_string(), "{a:integer, b:string}");

        let open = Ty::TyRow(Row::open([(field("a"), Ty::INTEGER)], "r".to_string()));
        assert_eq!(open.to_string(), "{a:integer | r}");

        let only_tail = Ty::TyRow(Row::open([], "r".to_string()));
        assert_eq!(only_tail.to_string(), "{| r}");

        assert_eq!(Ty::TyRow(Row::EmptyRow).to_string(), "{}");
        assert_eq!(Ty::TyRow(Row::RowVar("r".into())).to_string(), "r");
    }

    #[test]
    fn test_tables() {
        let table = Ty::TyTable(Row::closed([(field("balance"), Ty::DECIMAL)]));
        assert_eq!(table.to_string(), "table{balance:decimal}");
        assert_eq!(Ty::TyTable(Row::RowVar("r".into())).to_string(), "table{r}");
        assert_eq!(Ty::TyTable(Row::EmptyRow).to_string(), "table{}");
    }

    #[test]
    fn test_constraints() {
        assert_eq!(Ty::constrained(BuiltinTC::Eq, var("a")).to_string(), "Eq(a)");
        let without = Ty::constrained(
            BuiltinTC::WithoutField(field("x")),
            Ty::TyRow(Row::RowVar("r".into())),
        );
        assert_eq!(without.to_string(), "WithoutField(x)(r)");
    }

    #[test]
    fn test_multi_var_forall() {
        let ty = Ty::forall(vec!["a".into(), "b".into()], Ty::fun(var("a"), var("b"))).unwrap();
        assert_eq!(ty.to_string(), "∀(a:TYPE)(b:TYPE).a -> b");
    }

    #[test]
    fn test_instance_display() {
        let classes = builtin_classes("a".to_string());
        let eq = &classes[0];
        let lifted = eq.instances.iter().find(|i| !i.is_fact()).unwrap();
        assert_eq!(lifted.to_string(), "Eq(a) => Eq(list a)");
        assert_eq!(eq.instances[0].to_string(), "Eq(integer)");
    }
}

mod construction {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::{DateTime, Utc};
    use std::str::FromStr;

    #[test]
    fn test_type_of_literal() {
        let cases = [
            (Literal::LString("x".into()), PrimType::String),
            (Literal::LInteger(1.into()), PrimType::Integer),
            (Literal::LDecimal(BigDecimal::from_str("1.5").unwrap()), PrimType::Decimal),
            (Literal::LBool(true), PrimType::Bool),
            (Literal::LTime(DateTime::<Utc>::UNIX_EPOCH), PrimType::Time),
            (Literal::LUnit, PrimType::Unit),
        ];
        for (lit, prim) in cases {
            assert_eq!(type_of_literal::<String>(&lit), Ty::TyPrim(prim));
        }
    }

    #[test]
    fn test_forall_rejects_empty_and_duplicate_binders() {
        assert_eq!(Ty::forall(vec![], Ty::UNIT), Err(TypeError::EmptyForall));
        assert_eq!(
            Ty::forall(vec!["a".into(), "a".into()], var("a")),
            Err(TypeError::DuplicateBinder { var: "a".into() })
        );
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(NonEmpty::<u8>::from_vec(vec![]), Err(TypeError::EmptyList));
        let ne = NonEmpty::from_vec(vec![1, 2, 3]).unwrap();
        assert_eq!(ne.len(), 3);
        assert_eq!(*ne.first(), 1);
        assert_eq!(ne.clone().map(|n| n * 2).into_vec(), vec![2, 4, 6]);

        assert_eq!(serde_json::to_string(&ne).unwrap(), "[1,2,3]");
        assert!(serde_json::from_str::<NonEmpty<u8>>("[]").is_err());
    }

    #[test]
    fn test_type_json_round_trip() {
        let ty = Ty::forall(
            vec!["a".into()],
            Ty::fun(
                Ty::constrained(BuiltinTC::Ord, var("a")),
                Ty::TyTable(Row::open([(field("k"), Ty::list(var("a")))], "r".into())),
            ),
        )
        .unwrap();
        let json = serde_json::to_string(&ty).unwrap();
        assert_eq!(serde_json::from_str::<Ty>(&json).unwrap(), ty);
    }

    #[test]
    fn test_alpha_equivalent_foralls_are_unequal() {
        let a = Ty::forall(vec!["a".into()], var("a")).unwrap();
        let b = Ty::forall(vec!["b".into()], var("b")).unwrap();
        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), std::cmp::Ordering::Equal);
    }
}

mod operations {
    use super::*;

    #[test]
    fn test_decompose_function_flattens_right_nesting() {
        let f = Ty::fun(var("a"), Ty::fun(var("b"), var("c")));
        assert_eq!(decompose_function(&f), Some((vec![var("a"), var("b")], var("c"))));
    }

    #[test]
    fn test_decompose_function_keeps_left_nesting() {
        let arg = Ty::fun(var("a"), var("b"));
        let f = Ty::fun(arg.clone(), var("c"));
        assert_eq!(decompose_function(&f), Some((vec![arg], var("c"))));
    }

    #[test]
    fn test_decompose_non_function() {
        assert_eq!(decompose_function(&Ty::INTEGER), None);
        assert_eq!(decompose_function(&Ty::list(Ty::fun(Ty::INTEGER, Ty::BOOL))), None);
    }

    #[test]
    fn test_map_row_types() {
        let row = Row::open([(field("a"), Ty::INTEGER), (field("b"), var("x"))], "r".to_string());
        let mapped = map_row_types(row, Ty::list);
        assert_eq!(
            mapped,
            Row::open(
                [(field("a"), Ty::list(Ty::INTEGER)), (field("b"), Ty::list(var("x")))],
                "r".to_string(),
            )
        );

        assert_eq!(map_row_types(Row::<String>::EmptyRow, Ty::list), Row::EmptyRow);
        let row_var = Row::RowVar("r".to_string());
        assert_eq!(map_row_types(row_var.clone(), Ty::list), row_var);
    }

    #[test]
    fn test_row_fields_are_key_ordered_objects() {
        let row = Row::closed([(field("b"), Ty::STRING), (field("a"), Ty::INTEGER)]);
        let fields = row.field_types().unwrap();
        assert_eq!(fields.get(&field("a")), Some(&Ty::INTEGER));
        let labels: Vec<&str> = fields.field_names().map(Field::as_str).collect();
        assert_eq!(labels, ["a", "b"]);

        let failed: Result<Row<String>, &str> = types::try_map_row_types(row, |t| match t {
            Type::TyPrim(PrimType::String) => Err("string field"),
            other => Ok(other),
        });
        assert_eq!(failed, Err("string field"));
    }

    #[test]
    fn test_map_children_is_one_layer() {
        let ty = Ty::list(Ty::list(Ty::INTEGER));
        let mapped = ty.map_children(|_| Ty::BOOL);
        assert_eq!(mapped, Ty::list(Ty::BOOL));
    }

    #[test]
    fn test_map_children_leaves() {
        for leaf in [var("a"), Ty::INTEGER, Ty::TyCap, Ty::constrained(BuiltinTC::Eq, var("a"))] {
            assert_eq!(leaf.clone().map_children(|_| Ty::UNIT), leaf);
        }
    }

    #[test]
    fn test_transform_does_not_enter_constraints() {
        let ty = Ty::fun(var("a"), Ty::constrained(BuiltinTC::Show, var("a")));
        let renamed = ty.transform(|t| match t {
            Type::TyVar(v) if v == "a" => var("z"),
            other => other,
        });
        assert_eq!(renamed, Ty::fun(var("z"), Ty::constrained(BuiltinTC::Show, var("a"))));
    }

    #[test]
    fn test_transform_is_bottom_up() {
        let ty = Ty::list(Ty::list(Ty::INTEGER));
        let mut seen = Vec::new();
        let _ = ty.transform(|t| {
            seen.push(t.to_string());
            t
        });
        assert_eq!(seen, ["integer", "list integer", "list (list integer)"]);
    }

    #[test]
    fn test_try_map_children_stops_on_error() {
        let ty = Ty::fun(Ty::INTEGER, var("a"));
        let result: Result<Ty, String> = ty.try_map_children(|t| match t {
            Type::TyVar(v) => Err(v),
            other => Ok(other),
        });
        assert_eq!(result, Err("a".to_string()));
    }

    #[test]
    fn test_universe_is_pre_order() {
        let ty = Ty::fun(Ty::list(var("a")), object(&[("x", Ty::INTEGER)]));
        let subterms: Vec<String> = ty.universe().iter().map(|t| t.to_string()).collect();
        assert_eq!(
            subterms,
            ["list a -> {x:integer}", "list a", "a", "{x:integer}", "integer"]
        );
    }

    #[test]
    fn test_universe_of_forall_includes_body() {
        let ty = Ty::forall(vec!["a".into()], var("a")).unwrap();
        assert_eq!(ty.universe().len(), 2);
    }

    #[test]
    fn test_free_vars_respect_binders() {
        let body = Ty::fun(
            var("a"),
            Ty::TyRow(Row::open([(field("f"), var("b"))], "r".to_string())),
        );
        let ty = Ty::forall(vec!["a".into()], body).unwrap();
        let free: Vec<&String> = ty.free_vars().into_iter().collect();
        assert_eq!(free, ["b", "r"]);

        let constrained = Ty::constrained(BuiltinTC::Eq, var("c"));
        assert_eq!(constrained.free_vars().len(), 1);
    }
}

mod typeclasses {
    use super::*;

    #[test]
    fn test_superclasses() {
        assert_eq!(BuiltinTC::Ord.superclasses(), vec![BuiltinTC::Eq]);
        assert_eq!(BuiltinTC::Num.superclasses(), vec![BuiltinTC::Add]);
        assert!(BuiltinTC::Show.superclasses().is_empty());
        assert!(BuiltinTC::WithoutField(field("x")).superclasses().is_empty());
    }

    #[test]
    fn test_builtin_class_table() {
        let classes = builtin_classes("a".to_string());
        let tags: Vec<&BuiltinTC> = classes.iter().map(|c| &c.tag).collect();
        assert_eq!(
            tags,
            [&BuiltinTC::Eq, &BuiltinTC::Ord, &BuiltinTC::Show, &BuiltinTC::Add, &BuiltinTC::Num]
        );
        for class in &classes {
            assert_eq!(class.superclasses, class.tag.superclasses());
            assert!(class.instances.iter().all(|i| i.head.class == class.tag));
        }

        let num = &classes[4];
        let heads: Vec<&Ty> = num.instances.iter().map(|i| &i.head.ty).collect();
        assert_eq!(heads, [&Ty::INTEGER, &Ty::DECIMAL]);
    }

    #[test]
    fn test_pred_into_type() {
        let pred = Pred::new(BuiltinTC::Num, var("a"));
        assert_eq!(pred.clone().into_type(), Ty::constrained(BuiltinTC::Num, var("a")));
        assert_eq!(pred.to_string(), "Num(a)");
    }
}

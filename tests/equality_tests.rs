use opdispatch::{
    dispatch_binary, register_instance_handler, Handler, Object, OperatorSelector, TypeDef,
    Value,
};

/// Type whose `Equals` compares the `n` field numerically
fn numeric_equals_type(name: &str) -> std::rc::Rc<TypeDef> {
    TypeDef::define(name)
        .handler(
            OperatorSelector::Equals,
            Handler::binary(|obj, rhs| {
                let own = obj.borrow().get("n").and_then(|v| v.as_number());
                let other = rhs
                    .as_object()
                    .and_then(|o| o.borrow().get("n").and_then(|v| v.as_number()));
                Ok(Value::Bool(own.is_some() && own == other))
            }),
        )
        .build()
        .unwrap()
}

fn instance_with_n(ty: &std::rc::Rc<TypeDef>, n: f64) -> Value {
    let obj = Object::instance_of(ty);
    obj.borrow_mut().set("n", Value::Number(n));
    Value::Object(obj)
}

fn eq(op: &str, lhs: &Value, rhs: &Value) -> bool {
    dispatch_binary(op, lhs, rhs).unwrap().as_bool().unwrap()
}

#[test]
fn identity_precedes_any_handler() {
    // A StrictEquals handler that always answers false must be ignored for
    // the identical instance
    let ty = TypeDef::define("Contrarian")
        .handler(
            OperatorSelector::Equals,
            Handler::binary(|_, _| Ok(Value::Bool(false))),
        )
        .handler(
            OperatorSelector::StrictEquals,
            Handler::binary(|_, _| Ok(Value::Bool(false))),
        )
        .build()
        .unwrap();
    let x = Value::Object(Object::instance_of(&ty));

    assert!(eq("===", &x, &x));
    assert!(eq("==", &x, &x));
    assert!(!eq("!==", &x, &x));
}

#[test]
fn primitive_equality_is_value_identity() {
    let n = |x: f64| Value::Number(x);

    assert!(eq("==", &n(1.0), &n(1.0)));
    assert!(eq("===", &n(1.0), &n(1.0)));
    assert!(!eq("==", &n(1.0), &n(2.0)));
    assert!(!eq("==", &n(1.0), &Value::Str("1".to_string())));
    assert!(eq(
        "==",
        &Value::Str("a".to_string()),
        &Value::Str("a".to_string())
    ));
    assert!(eq("==", &Value::Bool(true), &Value::Bool(true)));

    // NaN is never identical to anything, including itself
    assert!(!eq("==", &Value::nan(), &Value::nan()));
    assert!(!eq("===", &Value::nan(), &Value::nan()));
}

#[test]
fn no_silent_structural_fallback() {
    // Two untagged objects with identical fields are still not equal
    let a = Object::untagged();
    a.borrow_mut().set("n", Value::Number(1.0));
    let b = Object::untagged();
    b.borrow_mut().set("n", Value::Number(1.0));

    assert!(!eq("==", &Value::Object(a), &Value::Object(b)));
}

#[test]
fn equals_handler_drives_loose_equality() {
    let ty = numeric_equals_type("Num");
    let a = instance_with_n(&ty, 5.0);
    let b = instance_with_n(&ty, 5.0);
    let c = instance_with_n(&ty, 6.0);

    assert!(eq("==", &a, &b));
    assert!(!eq("==", &a, &c));
}

#[test]
fn strict_equals_derived_from_equals_checks_nominal_type() {
    let ty = numeric_equals_type("Num");
    let a = instance_with_n(&ty, 5.0);
    let b = instance_with_n(&ty, 5.0);
    let c = instance_with_n(&ty, 6.0);

    // Same type, equals holds
    assert!(eq("===", &a, &b));
    // Same type, equals fails
    assert!(!eq("===", &a, &c));

    // Distinct type definition with the same handler: loose equality still
    // holds, derived strict equality does not
    let other_ty = numeric_equals_type("OtherNum");
    let d = instance_with_n(&other_ty, 5.0);
    assert!(eq("==", &a, &d));
    assert!(!eq("===", &a, &d));

    // Primitive RHS never passes the nominal check
    assert!(!eq("===", &a, &Value::Number(5.0)));
}

#[test]
fn untagged_lhs_derivation_accepts_any_non_primitive() {
    let a = Object::untagged();
    a.borrow_mut().set("n", Value::Number(5.0));
    register_instance_handler(
        &a,
        OperatorSelector::Equals,
        Handler::binary(|obj, rhs| {
            let own = obj.borrow().get("n").and_then(|v| v.as_number());
            let other = rhs
                .as_object()
                .and_then(|o| o.borrow().get("n").and_then(|v| v.as_number()));
            Ok(Value::Bool(own.is_some() && own == other))
        }),
    )
    .unwrap();
    let a = Value::Object(a);

    // Tagged RHS is acceptable when the LHS is untagged
    let ty = numeric_equals_type("Num");
    let b = instance_with_n(&ty, 5.0);
    assert!(eq("===", &a, &b));

    // Primitive RHS is not, even though equals would hold by payload
    assert!(!eq("===", &a, &Value::Number(5.0)));
}

#[test]
fn explicit_strict_equals_handler_takes_over() {
    // StrictEquals always true (plus the required Equals): distinct
    // instances of different payloads still compare strictly equal
    let ty = TypeDef::define("AlwaysStrict")
        .handler(
            OperatorSelector::Equals,
            Handler::binary(|_, _| Ok(Value::Bool(false))),
        )
        .handler(
            OperatorSelector::StrictEquals,
            Handler::binary(|_, _| Ok(Value::Bool(true))),
        )
        .build()
        .unwrap();
    let a = Value::Object(Object::instance_of(&ty));
    let b = Value::Object(Object::instance_of(&ty));

    assert!(eq("===", &a, &b));
    // Loose equality still consults Equals
    assert!(!eq("==", &a, &b));
}

#[test]
fn truthiness_reduces_handler_results() {
    // Equals may return any value; the engine reduces it to a boolean:
    // non-zero non-NaN numbers, non-empty strings and every object count
    // as true
    let ty = TypeDef::define("Echo")
        .handler(
            OperatorSelector::Equals,
            Handler::binary(|obj, _| {
                Ok(obj.borrow().get("answer").cloned().unwrap_or(Value::Number(0.0)))
            }),
        )
        .build()
        .unwrap();

    let cases = [
        (Value::Number(1.0), true),
        (Value::Number(0.0), false),
        (Value::Number(f64::NAN), false),
        (Value::Str("x".to_string()), true),
        (Value::Str(String::new()), false),
        (Value::Bool(true), true),
        (Value::Bool(false), false),
        (Value::Object(Object::untagged()), true),
    ];

    for (answer, expected) in cases {
        let obj = Object::instance_of(&ty);
        obj.borrow_mut().set("answer", answer.clone());
        let probe = Value::Object(Object::untagged());
        assert_eq!(
            eq("==", &Value::Object(obj), &probe),
            expected,
            "handler result {:?} should reduce to {}",
            answer,
            expected
        );
    }
}

#[test]
fn negation_symmetry_holds_for_all_configurations() {
    let ty = numeric_equals_type("Num");
    let values = [
        Value::Number(1.0),
        Value::Number(f64::NAN),
        Value::Str("x".to_string()),
        Value::Bool(false),
        Value::Object(Object::untagged()),
        instance_with_n(&ty, 5.0),
        instance_with_n(&ty, 6.0),
    ];

    for lhs in &values {
        for rhs in &values {
            assert_eq!(
                eq("!=", lhs, rhs),
                !eq("==", lhs, rhs),
                "!= must negate == for {:?} vs {:?}",
                lhs,
                rhs
            );
            assert_eq!(
                eq("!==", lhs, rhs),
                !eq("===", lhs, rhs),
                "!== must negate === for {:?} vs {:?}",
                lhs,
                rhs
            );
        }
    }
}

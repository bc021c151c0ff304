//! End-to-end scenario: a three-component vector type with componentwise
//! arithmetic and relational handlers, driven purely through the dispatch
//! boundary the way a host evaluator would drive it.

use std::rc::Rc;

use opdispatch::{
    dispatch_binary, EngineError, Handler, HandlerError, Object, OperatorSelector, TypeDef,
    Value,
};

const AXES: [&str; 3] = ["x", "y", "z"];

fn axis(obj: &opdispatch::ObjRef, name: &str) -> Result<f64, HandlerError> {
    obj.borrow()
        .get(name)
        .and_then(|v| v.as_number())
        .ok_or_else(|| HandlerError::TypeMismatch {
            expected: "Vec3".to_string(),
            got: "object without numeric components".to_string(),
        })
}

fn componentwise_compare(cmp: fn(f64, f64) -> bool) -> Handler {
    Handler::binary(move |obj, rhs| {
        let Some(rhs_obj) = rhs.as_object() else {
            return Err(HandlerError::TypeMismatch {
                expected: "Vec3".to_string(),
                got: rhs.kind_name().to_string(),
            });
        };
        for name in AXES {
            if !cmp(axis(obj, name)?, axis(rhs_obj, name)?) {
                return Ok(Value::Bool(false));
            }
        }
        Ok(Value::Bool(true))
    })
}

fn vec3_type() -> Rc<TypeDef> {
    let add = Handler::binary(|obj, rhs| {
        let result = Object::instance_of(obj.borrow().type_def().expect("tagged vector"));
        match rhs {
            // Scalar: add to every component
            Value::Number(scalar) => {
                for name in AXES {
                    let sum = axis(obj, name)? + scalar;
                    result.borrow_mut().set(name, Value::Number(sum));
                }
            }
            // Same-family vector: componentwise sum
            Value::Object(rhs_obj) => {
                for name in AXES {
                    let sum = axis(obj, name)? + axis(rhs_obj, name)?;
                    result.borrow_mut().set(name, Value::Number(sum));
                }
            }
            other => {
                return Err(HandlerError::TypeMismatch {
                    expected: "number or Vec3".to_string(),
                    got: other.kind_name().to_string(),
                })
            }
        }
        Ok(Value::Object(result))
    });

    TypeDef::define("Vec3")
        .handler(OperatorSelector::Add, add)
        .handler(OperatorSelector::GreaterThan, componentwise_compare(|a, b| a > b))
        .handler(
            OperatorSelector::GreaterThanEqual,
            componentwise_compare(|a, b| a >= b),
        )
        .handler(OperatorSelector::LessThan, componentwise_compare(|a, b| a < b))
        .handler(
            OperatorSelector::LessThanEqual,
            componentwise_compare(|a, b| a <= b),
        )
        .build()
        .unwrap()
}

fn vec3(ty: &Rc<TypeDef>, x: f64, y: f64, z: f64) -> Value {
    let obj = Object::instance_of(ty);
    {
        let mut borrowed = obj.borrow_mut();
        borrowed.set("x", Value::Number(x));
        borrowed.set("y", Value::Number(y));
        borrowed.set("z", Value::Number(z));
    }
    Value::Object(obj)
}

fn components(value: &Value) -> [f64; 3] {
    let obj = value.as_object().expect("vector result").borrow();
    AXES.map(|name| obj.get(name).and_then(|v| v.as_number()).unwrap())
}

#[test]
fn vector_plus_scalar_adds_componentwise() {
    let ty = vec3_type();
    let v = vec3(&ty, 1.0, 1.0, 1.0);

    let sum = dispatch_binary("+", &v, &Value::Number(1.0)).unwrap();
    assert_eq!(components(&sum), [2.0, 2.0, 2.0]);

    // The original vector is untouched
    assert_eq!(components(&v), [1.0, 1.0, 1.0]);
}

#[test]
fn vector_plus_vector_adds_componentwise() {
    let ty = vec3_type();
    let v = vec3(&ty, 1.0, 1.0, 1.0);
    let w = vec3(&ty, 3.0, 4.0, 5.0);

    let sum = dispatch_binary("+", &v, &w).unwrap();
    assert_eq!(components(&sum), [4.0, 5.0, 6.0]);
}

#[test]
fn vector_plus_bare_object_is_a_handler_error() {
    let ty = vec3_type();
    let v = vec3(&ty, 1.0, 1.0, 1.0);
    let bare = Value::Object(Object::untagged());

    // The handler rejects the operand; the engine passes its error through
    // rather than raising its own
    match dispatch_binary("+", &v, &bare) {
        Err(EngineError::Handler(HandlerError::TypeMismatch { .. })) => {}
        other => panic!("expected handler type mismatch, got {:?}", other),
    }
}

#[test]
fn componentwise_relational_comparisons() {
    let ty = vec3_type();
    let v = vec3(&ty, 0.0, 0.0, 0.0);

    let gt = dispatch_binary(">", &v, &vec3(&ty, -1.0, -1.0, -1.0)).unwrap();
    assert_eq!(gt.as_bool(), Some(true));

    let gt = dispatch_binary(">", &v, &vec3(&ty, 0.0, 0.0, 0.0)).unwrap();
    assert_eq!(gt.as_bool(), Some(false));

    let ge = dispatch_binary(">=", &v, &vec3(&ty, 0.0, 0.0, 0.0)).unwrap();
    assert_eq!(ge.as_bool(), Some(true));

    let lt = dispatch_binary("<", &v, &vec3(&ty, 1.0, 1.0, 1.0)).unwrap();
    assert_eq!(lt.as_bool(), Some(true));
}

#[test]
fn compound_assignment_is_plain_binary_dispatch_plus_rebind() {
    // What a host does for `v += 1`: dispatch the underlying operator, then
    // rebind the slot. No engine entry point exists for `+=` itself.
    let ty = vec3_type();
    let mut slot = vec3(&ty, 1.0, 1.0, 1.0);

    slot = dispatch_binary("+", &slot, &Value::Number(1.0)).unwrap();
    assert_eq!(components(&slot), [2.0, 2.0, 2.0]);
}

#[test]
fn subtraction_is_not_inferred_from_addition() {
    let ty = vec3_type();
    let v = vec3(&ty, 1.0, 1.0, 1.0);

    match dispatch_binary("-", &v, &Value::Number(1.0)) {
        Err(err @ EngineError::OperatorNotDefined { .. }) => {
            assert_eq!(err.to_string(), "No behavior defined for operator '-'");
        }
        other => panic!("expected OperatorNotDefined, got {:?}", other),
    }
}

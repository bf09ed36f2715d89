use hogan_runtime as hr;
use hr::{ContextStack, Node, Partials, Program, Template, Value};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

fn stack(frames: &[serde_json::Value]) -> ContextStack {
    ContextStack::from(frames.iter().cloned().map(Value::from).collect::<Vec<_>>())
}

#[test]
fn test_innermost_frame_wins() {
    let tpl = Template::default();
    let mut ctx = stack(&[json!({"x": 1}), json!({"x": 2})]);
    assert_eq!(tpl.get("x", &mut ctx, &Partials::new(), false), Value::from(2));
}

#[test]
fn test_falls_back_to_outer_frames() {
    let tpl = Template::default();
    let mut ctx = stack(&[json!({"x": 1, "y": "outer"}), json!("scalar"), json!({"x": 2})]);
    assert_eq!(tpl.get("y", &mut ctx, &Partials::new(), false), Value::from("outer"));
}

#[test]
fn test_found_falsy_value_is_returned_as_is() {
    let tpl = Template::default();
    let mut ctx = stack(&[json!({"n": 0, "s": ""})]);
    let partials = Partials::new();
    assert_eq!(tpl.get("n", &mut ctx, &partials, true), Value::from(0));
    assert_eq!(tpl.get("s", &mut ctx, &partials, true), Value::from(""));
}

#[test]
fn test_dotted_degrades_to_empty() {
    let tpl = Template::default();
    let partials = Partials::new();
    let mut ctx = stack(&[json!({"a": {"b": 1}})]);
    assert_eq!(tpl.get_dotted("a.b", &mut ctx, &partials, false), Value::from(1));
    assert_eq!(tpl.get_dotted("a.c", &mut ctx, &partials, false), Value::from(""));
    assert_eq!(tpl.get_dotted("a.c.d.e", &mut ctx, &partials, false), Value::from(""));
    assert_eq!(tpl.get_dotted("zz.b", &mut ctx, &partials, false), Value::from(""));
}

#[test]
fn test_dotted_existence_check() {
    let tpl = Template::default();
    let partials = Partials::new();
    let mut ctx = stack(&[json!({"a": {"b": 1, "zero": 0, "obj": {}}})]);
    assert_eq!(tpl.get_dotted("a.b", &mut ctx, &partials, true), Value::from(1));
    assert_eq!(tpl.get_dotted("a.zero", &mut ctx, &partials, true), Value::Bool(false));
    assert_eq!(tpl.get_dotted("a.c", &mut ctx, &partials, true), Value::Bool(false));
    assert_eq!(tpl.get_dotted("a.obj", &mut ctx, &partials, true), Value::from(json!({})));
}

#[test]
fn test_dotted_array_index() {
    let tpl = Template::default();
    let partials = Partials::new();
    let mut ctx = stack(&[json!({"list": ["a", "b"]})]);
    assert_eq!(tpl.get_dotted("list.1", &mut ctx, &partials, false), Value::from("b"));
    assert_eq!(tpl.get_dotted("list.5", &mut ctx, &partials, false), Value::from(""));
}

#[test]
fn test_dot_returns_current_element_in_iteration() {
    let tpl = Template::default();
    let partials = Partials::new();
    let mut ctx = stack(&[json!({"items": [1, 2, 3]}), json!([1, 2, 3]), json!(2)]);
    assert_eq!(tpl.get_dotted(".", &mut ctx, &partials, false), Value::from(2));
}

#[test]
fn test_lambda_gets_partials() {
    let tpl = Template::default();
    let partials = Partials::new().with("p", Template::default());
    let f = Value::lambda(|_, partials| Value::from(partials.len() as i64));
    let mut ctx = ContextStack::new(Value::object([("count", f)]));
    assert_eq!(tpl.get("count", &mut ctx, &partials, false), Value::from(1));
}

#[test]
fn test_lambda_pushes_do_not_outlive_the_lookup() {
    let pushy = Value::lambda(|ctx, _| {
        ctx.push(Value::object([("name", Value::from("inner"))]));
        Value::from("f")
    });
    let root = Value::object([
        ("f", pushy.clone()),
        ("o", Value::object([("f", pushy)])),
        ("name", Value::from("root")),
    ]);

    for key in ["f", "o.f"] {
        let program = Program::new(vec![
            Node::Var { name: key.into() },
            Node::Text { text: " ".into() },
            Node::Var { name: "name".into() },
        ]);
        let tpl = Template::from_program(program, "");
        assert_eq!(tpl.render_default(root.clone()).unwrap(), "f root", "key {key}");
    }

    let tpl = Template::default();
    let mut ctx = ContextStack::new(root);
    assert_eq!(tpl.get("f", &mut ctx, &Partials::new(), false), Value::from("f"));
    assert_eq!(ctx.len(), 1);
}

proptest! {
    #[test]
    fn absent_keys_resolve_to_empty_or_false(key in "[a-z]{1,8}") {
        let tpl = Template::default();
        let partials = Partials::new();
        let mut ctx = stack(&[json!({"A": 1}), json!({"B": {"C": 2}}), json!([1, 2])]);
        prop_assert_eq!(tpl.get(&key, &mut ctx, &partials, false), Value::from(""));
        prop_assert_eq!(tpl.get(&key, &mut ctx, &partials, true), Value::Bool(false));
        prop_assert_eq!(ctx.len(), 3);
    }
}

use ploon::{ploon, Number, PloonMap, Value};

#[test]
fn test_ploon_macro_null() {
    assert_eq!(ploon!(null), Value::Null);
}

#[test]
fn test_ploon_macro_booleans() {
    assert_eq!(ploon!(true), Value::Bool(true));
    assert_eq!(ploon!(false), Value::Bool(false));
}

#[test]
fn test_ploon_macro_numbers() {
    assert_eq!(ploon!(42), Value::Number(Number::from(42)));
    assert_eq!(ploon!(3.5), Value::Number(Number::from(3.5)));
    assert_eq!(ploon!(-123), Value::Number(Number::from(-123)));
}

#[test]
fn test_ploon_macro_strings() {
    assert_eq!(ploon!("hello world"), Value::String("hello world".to_string()));
    assert_eq!(ploon!(""), Value::String(String::new()));
}

#[test]
fn test_ploon_macro_arrays() {
    assert_eq!(ploon!([]), Value::Array(vec![]));

    assert_eq!(
        ploon!([1, 2, 3]),
        Value::Array(vec![
            Value::Number(Number::from(1)),
            Value::Number(Number::from(2)),
            Value::Number(Number::from(3)),
        ])
    );

    assert_eq!(
        ploon!([1, "hello", true, null]),
        Value::Array(vec![
            Value::Number(Number::from(1)),
            Value::String("hello".to_string()),
            Value::Bool(true),
            Value::Null,
        ])
    );
}

#[test]
fn test_ploon_macro_objects() {
    assert_eq!(ploon!({}), Value::Object(PloonMap::new()));

    let value = ploon!({"id": 7, "name": "Widget"});
    let map = value.as_object().unwrap();
    assert_eq!(map.get("id").unwrap(), &Value::Number(Number::from(7)));
    assert_eq!(map.get("name").unwrap(), &Value::String("Widget".to_string()));
}

#[test]
fn test_ploon_macro_nested() {
    let value = ploon!({
        "orders": [
            {
                "id": 101,
                "customer": {"name": "Alice"},
                "tags": ["a", "b"]
            }
        ]
    });

    let orders = value.as_object().unwrap().get("orders").unwrap();
    let order = orders.as_array().unwrap()[0].as_object().unwrap();
    assert_eq!(order.get("id").unwrap(), &Value::Number(Number::from(101)));
    assert_eq!(
        order
            .get("customer")
            .unwrap()
            .as_object()
            .unwrap()
            .get("name")
            .unwrap(),
        &Value::String("Alice".to_string())
    );
    assert_eq!(order.get("tags").unwrap().as_array().unwrap().len(), 2);
}

#[test]
fn test_ploon_macro_expressions() {
    let id = 9usize;
    let name = String::from("Eve");
    let value = ploon!({"id": id, "name": name});
    let map = value.as_object().unwrap();
    assert_eq!(map.get("id").unwrap().as_str(), None);
    assert_eq!(map.get("name").unwrap(), &Value::String("Eve".to_string()));
}

#[test]
fn test_ploon_macro_feeds_stringify() {
    let value = ploon!({"items": [{"id": 1}, {"id": 2}]});
    assert_eq!(
        ploon::stringify(&value).unwrap(),
        "[items#2](id)\n\n1:1|1\n1:2|2"
    );
}

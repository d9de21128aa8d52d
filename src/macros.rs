#[macro_export]
macro_rules! ploon {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::ploon!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::Value::Object($crate::PloonMap::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::PloonMap::new();
        $(
            object.insert($key.to_string(), $crate::ploon!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Fallback for any expression (numbers, strings, variables)
    ($other:expr) => {{
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    }};
}

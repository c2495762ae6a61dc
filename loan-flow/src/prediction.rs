use serde_json::Value;

/// Message shown in place of a prediction when the service cannot be reached
/// or answers with something that is not JSON.
pub const SERVER_ERROR: &str = "Server Error";

/// Canonical outcome of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction {
    Approved,
    Rejected,
    /// Anything else the service said, or [`SERVER_ERROR`].
    Message(String),
}

impl Prediction {
    pub fn server_error() -> Self {
        Prediction::Message(SERVER_ERROR.to_string())
    }

    /// Coerce a raw `prediction` value into the canonical type.
    /// Both `1` and `"1"` approve; both `0` and `"0"` reject.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) if n.as_f64() == Some(1.0) => Prediction::Approved,
            Value::Number(n) if n.as_f64() == Some(0.0) => Prediction::Rejected,
            Value::String(s) if s == "1" => Prediction::Approved,
            Value::String(s) if s == "0" => Prediction::Rejected,
            Value::String(s) => Prediction::Message(s.clone()),
            other => Prediction::Message(other.to_string()),
        }
    }
}

/// Normalize a decoded response body.
///
/// Only a JSON object is looked into: `prediction` wins over `error`, and
/// an object with neither (or both null) yields an empty message. A bare
/// `null` body is treated like a broken response; any other non-object
/// body (array, string, number, bool) has no fields and yields an empty
/// message.
pub fn from_body(body: Value) -> Prediction {
    let mut object = match body {
        Value::Object(object) => object,
        Value::Null => return Prediction::server_error(),
        _ => return Prediction::Message(String::new()),
    };
    let field = |object: &mut serde_json::Map<String, Value>, key: &str| {
        object.remove(key).filter(|value| !value.is_null())
    };
    match (field(&mut object, "prediction"), field(&mut object, "error")) {
        (Some(value), _) => Prediction::from_value(&value),
        (None, Some(Value::String(message))) => Prediction::Message(message),
        (None, Some(other)) => Prediction::Message(other.to_string()),
        (None, None) => Prediction::Message(String::new()),
    }
}

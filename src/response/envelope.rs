//! JSON response envelope shared by the built-in handlers

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

/// Wrap a payload as `{status, creator, timestamp, ...payload}`.
///
/// Object payloads are merged in and may override `status`; any other
/// payload is placed under `data`.
pub fn envelope(creator: &str, payload: Value) -> Value {
    let mut body = Map::new();
    body.insert("status".to_string(), Value::from("success"));
    body.insert("creator".to_string(), Value::from(creator));
    body.insert(
        "timestamp".to_string(),
        Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );

    match payload {
        Value::Object(fields) => body.extend(fields),
        Value::Null => {}
        other => {
            body.insert("data".to_string(), other);
        }
    }

    Value::Object(body)
}

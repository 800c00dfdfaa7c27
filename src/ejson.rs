//! Strict (canonical) extended-JSON encoding for trailing arguments.
//!
//! The server-side reset function receives its extra parameters as one encoded
//! string. Plain JSON would collapse `2` and `2.0` into the same wire value,
//! so numbers are wrapped in canonical type markers (`$numberInt`,
//! `$numberLong`, `$numberDouble`) before serialization. Everything else is
//! passed through structurally unchanged.

use serde_json::{json, Map, Value};

use crate::error::Error;

/// Encode a trailing-argument sequence as a canonical extended-JSON string.
///
/// # Errors
///
/// Returns an error if the wrapped sequence cannot be serialized.
pub fn encode_canonical(values: &[Value]) -> Result<String, Error> {
    let wrapped: Vec<Value> = values.iter().map(canonical).collect();
    Ok(serde_json::to_string(&Value::Array(wrapped))?)
}

fn canonical(value: &Value) -> Value {
    match value {
        Value::Number(number) => {
            if let Some(signed) = number.as_i64() {
                match i32::try_from(signed) {
                    Ok(int) => json!({ "$numberInt": int.to_string() }),
                    Err(_) => json!({ "$numberLong": signed.to_string() }),
                }
            } else if let Some(unsigned) = number.as_u64() {
                json!({ "$numberLong": unsigned.to_string() })
            } else {
                json!({ "$numberDouble": number.to_string() })
            }
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        Value::Object(fields) => {
            let mut out = Map::with_capacity(fields.len());
            for (key, item) in fields {
                out.insert(key.clone(), canonical(item));
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

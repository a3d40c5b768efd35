//! ESI response bodies with default test values.

use serde_json::{json, Value};

/// Response body of `GET /universe/types/{type_id}/` for an ore named `Ore {type_id}`
pub fn mock_type(type_id: i64) -> Value {
    json!({
        "type_id": type_id,
        "group_id": 1884,
        "name": format!("Ore {}", type_id),
        "description": "Common moon ore",
        "published": true,
        "volume": 10.0
    })
}

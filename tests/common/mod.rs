#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::Once;

static LOGGING: Once = Once::new();

/// Installs a logger once per test binary. Level comes from LOG_LEVEL.
pub fn logging() {
    LOGGING.call_once(|| {
        badlog::init_from_env("LOG_LEVEL");
    });
}

/// A kid as the dashboards store it, owned by `parent` and assigned to
/// instructor `ins-1`.
pub fn kid(parent: &str) -> Value {
    json!({
        "participantNumber": 42,
        "status": "registered",
        "teamId": "team-7",
        "teamName": "Sparks",
        "instructorId": "ins-1",
        "personalInfo": {
            "firstName": "Ada",
            "lastName": "Lovelace",
            "dateOfBirth": "2013-12-10",
            "photo": "photos/ada.png",
            "photoUrl": "https://example.invalid/ada.png",
            "address": "1 Analytical Way",
            "emergencyContact": { "name": "Byron", "phone": "555-0100" }
        },
        "parentInfo": {
            "parentIds": [parent],
            "firstName": "Anne",
            "email": "anne@example.invalid",
            "phone": "555-0101",
            "grandparentsInfo": { "names": "Judith", "phone": "555-0102" }
        },
        "medicalInfo": { "allergies": "none", "notes": "inhaler in bag" },
        "comments": {
            "parent": "Loves gears.",
            "teamLeader": "Needs help with wiring.",
            "organization": "Paid in full."
        },
        "notes": "Arrives early."
    })
}

/// What redaction leaves of `record` when nothing in it is visible: every
/// object, emptied of everything but the objects inside it.
pub fn skeleton(record: &Value) -> Value {
    match record.as_object() {
        Some(map) => Value::Object(map.iter()
            .filter(|(_, value)| value.is_object())
            .map(|(key, value)| (key.clone(), skeleton(value)))
            .collect()),
        None => Value::Null
    }
}

pub fn vehicle() -> Value {
    json!({
        "name": "Bolt",
        "number": 12,
        "batteryType": "LiFePO4",
        "motorType": "brushed",
        "photo": "photos/bolt.png"
    })
}

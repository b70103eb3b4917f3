//! Bodies for the small catalog resources: positions, job sites, schedules.

use serde_json::Value;

pub fn encode_new_position(name: &str) -> Value {
    serde_json::json!({ "name": name })
}

/// Job sites hang off a schedule; the remote field name is `location_id`.
pub fn encode_new_jobsite(name: &str, schedule_id: u64) -> Value {
    serde_json::json!({ "name": name, "location_id": schedule_id })
}

pub fn encode_new_schedule(name: &str) -> Value {
    serde_json::json!({ "name": name })
}

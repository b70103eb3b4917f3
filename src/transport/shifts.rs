use serde::Serialize;
use serde_json::Value;

use crate::domain::{NewShift, ShiftFilter};
use crate::transport::envelope::TransportError;

/// Query pairs for `GET /shifts`. Remote field name for a schedule filter is
/// `location_id`. `all_locations` clears both narrowing filters.
pub fn encode_shift_filter(filter: &ShiftFilter) -> Vec<(String, String)> {
    let (schedule_id, position_id) = if filter.all_locations {
        (None, None)
    } else {
        (filter.schedule_id, filter.position_id)
    };

    let mut query = vec![
        ("start".to_owned(), filter.start.clone()),
        ("end".to_owned(), filter.end.clone()),
        ("unpublished".to_owned(), filter.unpublished.to_string()),
        ("include_open".to_owned(), filter.include_open.to_string()),
        ("deleted".to_owned(), filter.deleted.to_string()),
        ("all_locations".to_owned(), filter.all_locations.to_string()),
    ];
    if let Some(id) = schedule_id {
        query.push(("location_id".to_owned(), id.to_string()));
    }
    if let Some(id) = position_id {
        query.push(("position_id".to_owned(), id.to_string()));
    }
    query
}

#[derive(Debug, Serialize)]
struct NewShiftBody<'a> {
    user_id: u64,
    location_id: u64,
    position_id: u64,
    site_id: u64,
    start_time: &'a str,
    end_time: &'a str,
    instances: u32,
}

pub fn encode_new_shift(shift: &NewShift) -> Result<Value, TransportError> {
    Ok(serde_json::to_value(NewShiftBody {
        user_id: shift.user_id(),
        location_id: shift.schedule_id(),
        position_id: shift.position_id(),
        site_id: shift.site_id(),
        start_time: shift.start_time(),
        end_time: shift.end_time(),
        instances: shift.instances(),
    })?)
}

pub fn encode_shift_ids(ids: &[u64]) -> Value {
    serde_json::json!({ "ids": ids })
}

pub fn encode_unassign(shift_ids: &[u64]) -> Value {
    serde_json::json!({ "shift_ids": shift_ids })
}

use serde::Serialize;
use serde_json::Value;

use crate::domain::{NewUser, UserFilter, UserUpdate};
use crate::transport::envelope::TransportError;

pub fn encode_user_filter(filter: &UserFilter) -> Vec<(String, String)> {
    let mut query = Vec::<(String, String)>::new();
    if let Some(show_pending) = filter.show_pending {
        query.push(("show_pending".to_owned(), show_pending.to_string()));
    }
    if let Some(only_pending) = filter.only_pending {
        query.push(("only_pending".to_owned(), only_pending.to_string()));
    }
    if let Some(search) = filter.search.as_deref() {
        query.push(("search".to_owned(), search.to_owned()));
    }
    // filter.schedule_id never goes on the wire; the upstream call dropped it.
    query
}

#[derive(Debug, Serialize)]
struct NewUserBody<'a> {
    email: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    employee_code: &'a str,
    positions: Option<&'a [u64]>,
    locations: Option<&'a [u64]>,
    is_hidden: bool,
    is_payroll: bool,
    is_private: bool,
    is_trusted: bool,
}

/// Wire body for `POST /users`. The four account flags are fixed: new
/// accounts are visible, off payroll, private, and untrusted.
pub fn encode_new_user(user: &NewUser) -> Result<Value, TransportError> {
    Ok(serde_json::to_value(NewUserBody {
        email: user.email(),
        first_name: user.first_name(),
        last_name: user.last_name(),
        employee_code: user.employee_code(),
        positions: user.positions(),
        locations: user.schedules(),
        is_hidden: false,
        is_payroll: false,
        is_private: true,
        is_trusted: false,
    })?)
}

#[derive(Debug, Serialize)]
struct UserUpdateBody<'a> {
    positions: Option<&'a [u64]>,
    locations: Option<&'a [u64]>,
    email: Option<&'a str>,
    first_name: &'a str,
    last_name: &'a str,
    employee_code: Option<&'a str>,
    reactivate: Option<bool>,
}

pub fn encode_user_update(update: &UserUpdate) -> Result<Value, TransportError> {
    Ok(serde_json::to_value(UserUpdateBody {
        positions: update.positions(),
        locations: update.schedules(),
        email: update.email(),
        first_name: update.first_name(),
        last_name: update.last_name(),
        employee_code: update.employee_code(),
        reactivate: update.reactivate(),
    })?)
}

pub fn encode_invite(ids: &[u64]) -> Value {
    serde_json::json!({ "ids": ids })
}

pub fn encode_position_list(positions: &[u64]) -> Value {
    serde_json::json!({ "positions": positions })
}

/// Read the position id list off a decoded user object.
pub fn position_ids(user: &Value) -> Result<Vec<u64>, TransportError> {
    let positions = user
        .get("positions")
        .ok_or(TransportError::MissingKey { key: "positions" })?
        .as_array()
        .ok_or(TransportError::UnexpectedShape {
            key: "positions",
            expected: "an array",
        })?;

    positions
        .iter()
        .map(|item| {
            item.as_u64().ok_or(TransportError::UnexpectedShape {
                key: "positions",
                expected: "numeric position ids",
            })
        })
        .collect()
}

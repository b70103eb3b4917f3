//! Transport layer: wire-format details (query/body encoding, envelopes).

mod catalog;
mod envelope;
mod shifts;
mod users;

pub use catalog::{encode_new_jobsite, encode_new_position, encode_new_schedule};
pub use envelope::{TransportError, unwrap_key, unwrap_list};
pub use shifts::{encode_new_shift, encode_shift_filter, encode_shift_ids, encode_unassign};
pub use users::{
    encode_invite, encode_new_user, encode_position_list, encode_user_filter, encode_user_update,
    position_ids,
};

//! Typed Rust client for the When I Work scheduling HTTP API.
//!
//! The crate is a thin request/response wrapper: a client layer composes the
//! base endpoint, the `W-Token` credential header, and any configured headers
//! into every call; a transport layer handles wire-format quirks (query and
//! body encoding, the JSON envelopes the API nests resources under); and a
//! small domain layer validates request parameters before anything is sent.
//!
//! ```rust,no_run
//! use wheniwork::{ApiToken, ShiftFilter, WiwClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), wheniwork::WiwError> {
//!     let client = WiwClient::new(ApiToken::new("iworksomuchitsnotfunny")?);
//!     let schedules = client.get_schedules().await?;
//!     let shifts = client
//!         .list_shifts(&ShiftFilter::new("2024-01-01", "2024-01-07", false))
//!         .await?;
//!     println!("{} schedules, shifts: {shifts}", schedules.len());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Headers, USER_ID_HEADER, WiwClient, WiwClientBuilder, WiwError};
pub use domain::{
    ApiToken, NewShift, NewUser, ShiftFilter, UserFilter, UserUpdate, ValidationError,
};

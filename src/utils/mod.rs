//! Common utilities and helpers

pub mod time;

pub use time::{format_timestamp, round_centis, TimeParser};

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod client;
pub mod coord;
pub mod display;
pub mod event;
pub mod force;
pub mod lobby;
pub mod position;
pub mod status;

pub mod hub;
pub mod ws;

pub use hub::{ChatHub, HubEvent, Topic};

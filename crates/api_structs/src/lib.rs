mod notification;
mod schedule;
mod status;

pub mod dtos {
    pub use crate::notification::dtos::*;
    pub use crate::schedule::dtos::*;
}

pub use crate::notification::api::*;
pub use crate::schedule::api::*;
pub use crate::status::api::*;

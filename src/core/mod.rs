pub mod bot;
pub mod catalogue;
pub mod commands;
pub mod drawer;
pub mod presentation;
pub mod spread;

pub use crate::domain::model::{CardDefinition, DrawnCard, OutgoingMessage, Reading};
pub use crate::domain::ports::{ConfigProvider, Messenger};
pub use crate::utils::error::Result;

// Domain layer: card and message models plus the ports (interfaces) to the chat platform.

pub mod model;
pub mod ports;

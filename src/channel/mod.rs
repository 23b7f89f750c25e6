pub mod transport;
pub mod types;
pub mod websocket;

pub use transport::{Channel, ChannelError};
pub use types::{Command, EventKind, EventPayload, InboundEvent};
pub use websocket::WsChannel;

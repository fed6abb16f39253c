pub mod channel_message;
pub mod context;
pub mod id_name;
pub mod message;

pub use channel_message::ChannelMessage;
pub use context::RequestContext;
pub use id_name::IdNamePair;
pub use message::{Message, RecordRef, SERVER_DATETIME_FORMAT};

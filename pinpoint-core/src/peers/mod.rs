//! Peers heard over the radio and the conversations held with them

pub mod conversation;
pub mod registry;

pub use conversation::{Conversation, Direction, Draft, DraftEdit, Message};
pub use registry::{Peer, PeerRegistry, PeerUpdate, Upserted};

//! Producers that start a grouping pipeline.

/// Push-based producer fed through a tokio channel.
pub mod channel;
/// Producer that replays a vector.
pub mod vec;

pub use channel::ChannelProducer;
pub use vec::VecProducer;

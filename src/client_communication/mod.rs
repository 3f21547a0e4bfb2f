//! Transport for pose clients: a TCP endpoint exchanging length-prefixed
//! protobuf messages, one flight session per connection.

mod client_endpoint;
mod client_messages;
#[cfg(test)]
mod tests;

pub use client_endpoint::{ClientEndpoint, EndpointError};
pub use client_messages::{
    Bird, Command, Downstream, DownstreamContent, Entity, EntityKind, FlightMode, FrameResult, FrameSkipped, Ping,
    Pickup, Pong, PoseSample, SkipReason, Turn, Upstream, UpstreamContent, WireLandmark,
};

//! The Ethernet → VLAN → IPv4/IPv6 → UDP protocol-stack walker.
//!
//! Each layer is a pure `(validate, next)` pair of functions over a
//! [`crate::frame::FrameBuffer`]; there is no trait object or inheritance here,
//! just a tagged-variant [`Protocol`] the walker in [`walker`] switches on.

mod ethernet;
mod ipv4;
mod ipv6;
mod protocol;
mod udp;
mod vlan;
mod walker;

pub use protocol::Protocol;
pub use walker::{walk, WalkOutcome};

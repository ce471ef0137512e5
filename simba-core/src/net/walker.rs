use crate::frame::FrameBuffer;

use super::protocol::Protocol;
use super::{ethernet, ipv4, ipv6, udp, vlan};
use crate::error::Result;

fn validate(protocol: Protocol, frame: &mut FrameBuffer) -> Result<()> {
	match protocol {
		Protocol::Ethernet => ethernet::validate(frame),
		Protocol::Vlan => vlan::validate(frame),
		Protocol::IPv4 => ipv4::validate(frame),
		Protocol::IPv6 => ipv6::validate(frame),
		Protocol::Udp => udp::validate(frame),
		Protocol::End => Ok(()),
	}
}

fn advance(protocol: Protocol, frame: &mut FrameBuffer) -> Result<Protocol> {
	match protocol {
		Protocol::Ethernet => ethernet::next(frame),
		Protocol::Vlan => vlan::next(frame),
		Protocol::IPv4 => ipv4::next(frame),
		Protocol::IPv6 => ipv6::next(frame),
		Protocol::Udp => udp::next(frame),
		Protocol::End => Ok(Protocol::End),
	}
}

/// The sequence of protocols a walk over `frame` encountered, and whether it ended
/// with `head` positioned at a UDP payload (as opposed to having aborted partway
/// through the stack).
pub struct WalkOutcome {
	pub protocols: Vec<Protocol>,
	pub reached_udp_payload: bool,
}

/// Advances `frame`'s `head` through Ethernet, optional VLAN tags, IPv4 or IPv6, and
/// UDP, validating and trimming at each layer.
///
/// `udp::next` itself advances past the 8-byte UDP header and reports `End`, so the
/// loop below naturally leaves `head` at the first byte of the UDP payload the
/// moment it reports `Udp` — no special-casing of "stop at Udp, then skip its
/// header" is needed beyond running the same validate/advance loop to completion.
pub fn walk(frame: &mut FrameBuffer) -> WalkOutcome {
	let mut protocols = Vec::new();
	let mut state = Protocol::Ethernet;

	loop {
		if state == Protocol::End {
			protocols.push(Protocol::End);
			break;
		}
		if validate(state, frame).is_err() {
			protocols.push(Protocol::End);
			break;
		}
		protocols.push(state);
		state = advance(state, frame).unwrap_or(Protocol::End);
	}

	let reached_udp_payload = protocols.contains(&Protocol::Udp);
	WalkOutcome {
		protocols,
		reached_udp_payload,
	}
}

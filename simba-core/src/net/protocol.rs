/// The closed set of protocol layers the stack walker can be positioned at.
///
/// `End` is both "no more layers" and the result of any validation failure; the
/// walker does not distinguish "ran out of layers cleanly" from "a layer rejected
/// its header" at the type level — callers that care inspect the `Result` the
/// validator returned before the state collapsed to `End`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
	Ethernet,
	Vlan,
	IPv4,
	IPv6,
	Udp,
	End,
}

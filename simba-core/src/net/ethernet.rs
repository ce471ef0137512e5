use std::io::Cursor;

use crate::error::{Error, Result};
use crate::frame::FrameBuffer;
use crate::read_write::BigEndianReader;

use super::protocol::Protocol;

/// On-wire size of an Ethernet II header: 6-byte dst MAC, 6-byte src MAC, 2-byte EtherType.
pub const HEADER_LEN: usize = 14;

/// IEEE 802.3 minimum frame size. Deliberately stricter than [`HEADER_LEN`] to reject
/// obviously malformed captures (see design note in the expanded spec).
pub const MIN_FRAME_LEN: usize = 64;

const ETHERTYPE_IPV4: u16 = 0x0800;
const ETHERTYPE_IPV6: u16 = 0x86DD;
const ETHERTYPE_VLAN: u16 = 0x8100;

/// Requires at least [`MIN_FRAME_LEN`] bytes available; does not consume anything.
pub fn validate(frame: &FrameBuffer) -> Result<()> {
	if !frame.has_available(MIN_FRAME_LEN) {
		return Err(Error::ProtocolValidation {
			protocol: Protocol::Ethernet,
			reason: format!(
				"frame has {} bytes, minimum is {MIN_FRAME_LEN}",
				frame.available()
			),
		});
	}
	Ok(())
}

/// Advances past the 14-byte header and maps the EtherType to the next layer.
pub fn next(frame: &mut FrameBuffer) -> Result<Protocol> {
	let available = frame.available();
	let bytes = frame.take(HEADER_LEN).ok_or(Error::ShortRead {
		needed: HEADER_LEN,
		available,
	})?;
	let mut c = Cursor::new(&bytes[12..14]);
	let ethertype: u16 = c.read_val()?;

	Ok(match ethertype {
		ETHERTYPE_IPV4 => Protocol::IPv4,
		ETHERTYPE_IPV6 => Protocol::IPv6,
		ETHERTYPE_VLAN => Protocol::Vlan,
		other => return Err(Error::UnknownNextProtocol(other)),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn frame_with(bytes: &[u8]) -> FrameBuffer {
		let mut f = FrameBuffer::new();
		assert!(f.reset(bytes.len(), 0));
		f.fill_slice().copy_from_slice(bytes);
		f
	}

	#[test]
	fn short_frame_fails_validation() {
		let f = frame_with(&[0u8; 63]);
		assert!(validate(&f).is_err());
	}

	#[test]
	fn maps_known_ethertypes() {
		let mut header = vec![0u8; 12];
		header.extend_from_slice(&ETHERTYPE_IPV4.to_be_bytes());
		header.resize(MIN_FRAME_LEN, 0);
		let mut f = frame_with(&header);
		assert!(validate(&f).is_ok());
		assert_eq!(next(&mut f).unwrap(), Protocol::IPv4);
		assert_eq!(f.offset(), HEADER_LEN);
	}

	#[test]
	fn unknown_ethertype_is_an_error() {
		let mut header = vec![0u8; 12];
		header.extend_from_slice(&0x1234u16.to_be_bytes());
		header.resize(MIN_FRAME_LEN, 0);
		let mut f = frame_with(&header);
		assert!(next(&mut f).is_err());
	}
}

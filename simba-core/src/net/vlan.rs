use std::io::Cursor;

use crate::error::{Error, Result};
use crate::frame::FrameBuffer;
use crate::read_write::BigEndianReader;

use super::protocol::Protocol;

/// 802.1Q tag: 2-byte TCI + 2-byte inner EtherType, both big-endian.
pub const HEADER_LEN: usize = 4;

const ETHERTYPE_IPV4: u16 = 0x0800;
const ETHERTYPE_IPV6: u16 = 0x86DD;
const ETHERTYPE_VLAN: u16 = 0x8100;

pub fn validate(frame: &FrameBuffer) -> Result<()> {
	if !frame.has_available(HEADER_LEN) {
		return Err(Error::ProtocolValidation {
			protocol: Protocol::Vlan,
			reason: format!("frame has {} bytes, need {HEADER_LEN}", frame.available()),
		});
	}
	Ok(())
}

/// Advances past the tag and maps the inner EtherType. Nested tags re-enter this
/// module via the walker.
pub fn next(frame: &mut FrameBuffer) -> Result<Protocol> {
	let available = frame.available();
	let bytes = frame.take(HEADER_LEN).ok_or(Error::ShortRead {
		needed: HEADER_LEN,
		available,
	})?;
	let mut c = Cursor::new(&bytes[2..4]);
	let inner_ethertype: u16 = c.read_val()?;

	Ok(match inner_ethertype {
		ETHERTYPE_IPV4 => Protocol::IPv4,
		ETHERTYPE_IPV6 => Protocol::IPv6,
		ETHERTYPE_VLAN => Protocol::Vlan,
		other => return Err(Error::UnknownNextProtocol(other)),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn maps_inner_ethertype_and_advances() {
		let mut bytes = vec![0u8, 0u8];
		bytes.extend_from_slice(&ETHERTYPE_IPV4.to_be_bytes());
		let mut f = FrameBuffer::new();
		assert!(f.reset(bytes.len(), 0));
		f.fill_slice().copy_from_slice(&bytes);

		assert!(validate(&f).is_ok());
		assert_eq!(next(&mut f).unwrap(), Protocol::IPv4);
		assert_eq!(f.offset(), HEADER_LEN);
	}
}

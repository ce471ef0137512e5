use std::io::Cursor;

use crate::error::{Error, Result};
use crate::frame::FrameBuffer;
use crate::read_write::BigEndianReader;

use super::protocol::Protocol;

/// UDP header: src_port, dst_port, length, checksum, all 16-bit big-endian fields.
pub const HEADER_LEN: usize = 8;

fn declared_length(bytes: &[u8]) -> Result<u16> {
	let mut c = Cursor::new(&bytes[4..6]);
	Ok(c.read_val()?)
}

/// Requires `length >= 8` and `available >= length`, then trims `tail` to `length`.
pub fn validate(frame: &mut FrameBuffer) -> Result<()> {
	let bytes = frame.peek(HEADER_LEN).ok_or(Error::ShortRead {
		needed: HEADER_LEN,
		available: frame.available(),
	})?;
	let length = declared_length(bytes)? as usize;

	if length < HEADER_LEN {
		return Err(Error::ProtocolValidation {
			protocol: Protocol::Udp,
			reason: format!("declared length {length} is shorter than the UDP header"),
		});
	}
	if !frame.has_available(length) {
		return Err(Error::ProtocolValidation {
			protocol: Protocol::Udp,
			reason: format!(
				"frame has {} bytes, header declares length={length}",
				frame.available()
			),
		});
	}

	let trim = frame.available() - length;
	if trim > 0 && !frame.tail_move_back(trim) {
		return Err(Error::ProtocolValidation {
			protocol: Protocol::Udp,
			reason: "failed to trim padding to declared length".into(),
		});
	}
	Ok(())
}

/// Advances past the 8-byte header. UDP has no further layer: the walker treats
/// the remaining bytes as the payload and stops here.
pub fn next(frame: &mut FrameBuffer) -> Result<Protocol> {
	if !frame.head_move(HEADER_LEN) {
		return Err(Error::ShortRead {
			needed: HEADER_LEN,
			available: frame.available(),
		});
	}
	Ok(Protocol::End)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn udp_header(length: u16) -> Vec<u8> {
		let mut v = Vec::new();
		v.extend_from_slice(&1234u16.to_be_bytes());
		v.extend_from_slice(&5678u16.to_be_bytes());
		v.extend_from_slice(&length.to_be_bytes());
		v.extend_from_slice(&0u16.to_be_bytes());
		v
	}

	#[test]
	fn trims_to_declared_length() {
		let mut bytes = udp_header(8);
		bytes.extend_from_slice(&[0u8; 4]); // trailing padding beyond declared length
		let mut f = FrameBuffer::new();
		assert!(f.reset(bytes.len(), 0));
		f.fill_slice().copy_from_slice(&bytes);

		assert!(validate(&mut f).is_ok());
		assert_eq!(f.available(), 8);
		assert_eq!(f.padding(), 4);

		assert_eq!(next(&mut f).unwrap(), Protocol::End);
		assert_eq!(f.available(), 0);
	}

	#[test]
	fn length_below_header_size_fails() {
		let bytes = udp_header(4);
		let mut f = FrameBuffer::new();
		assert!(f.reset(bytes.len(), 0));
		f.fill_slice().copy_from_slice(&bytes);
		assert!(validate(&mut f).is_err());
	}
}

use std::io::Cursor;

use crate::error::{Error, Result};
use crate::frame::FrameBuffer;
use crate::read_write::BigEndianReader;

use super::protocol::Protocol;

/// Fixed IPv6 header length (extension headers are not supported).
pub const HEADER_LEN: usize = 40;

const PROTO_UDP: u8 = 17;

struct ParsedHeader {
	version: u8,
	payload_len: usize,
	next_header: u8,
}

fn parse(bytes: &[u8]) -> Result<ParsedHeader> {
	let mut c = Cursor::new(bytes);
	let version_tc_fl: u32 = c.read_val()?;
	let version = (version_tc_fl >> 28) as u8;
	let payload_len: u16 = c.read_val()?;
	let next_header: u8 = c.read_val()?;
	let _hop_limit: u8 = c.read_val()?;

	Ok(ParsedHeader {
		version,
		payload_len: payload_len as usize,
		next_header,
	})
}

/// Checks `version == 6` and that the frame holds `40 + payload_len` bytes, then
/// trims `tail` to exactly that span.
pub fn validate(frame: &mut FrameBuffer) -> Result<()> {
	let bytes = frame.peek(HEADER_LEN).ok_or(Error::ShortRead {
		needed: HEADER_LEN,
		available: frame.available(),
	})?;
	let parsed = parse(bytes)?;

	if parsed.version != 6 {
		return Err(Error::ProtocolValidation {
			protocol: Protocol::IPv6,
			reason: format!("version field is {}, expected 6", parsed.version),
		});
	}

	let declared = HEADER_LEN + parsed.payload_len;
	if !frame.has_available(declared) {
		return Err(Error::ProtocolValidation {
			protocol: Protocol::IPv6,
			reason: format!(
				"frame has {} bytes, header declares {declared}",
				frame.available()
			),
		});
	}

	let trim = frame.available() - declared;
	if trim > 0 && !frame.tail_move_back(trim) {
		return Err(Error::ProtocolValidation {
			protocol: Protocol::IPv6,
			reason: "failed to trim padding to declared payload_len".into(),
		});
	}
	Ok(())
}

/// Advances past the fixed 40-byte header and maps `next_header`. Extension headers
/// are not walked; any `next_header` other than UDP terminates the walk.
pub fn next(frame: &mut FrameBuffer) -> Result<Protocol> {
	let bytes = frame.peek(HEADER_LEN).ok_or(Error::ShortRead {
		needed: HEADER_LEN,
		available: frame.available(),
	})?;
	let parsed = parse(bytes)?;

	if !frame.head_move(HEADER_LEN) {
		return Err(Error::ShortRead {
			needed: HEADER_LEN,
			available: frame.available(),
		});
	}

	Ok(match parsed.next_header {
		PROTO_UDP => Protocol::Udp,
		other => return Err(Error::UnknownNextProtocol(other as u16)),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ipv6_header(payload_len: u16, next_header: u8) -> Vec<u8> {
		let mut v = Vec::new();
		let version_tc_fl: u32 = 6 << 28;
		v.extend_from_slice(&version_tc_fl.to_be_bytes());
		v.extend_from_slice(&payload_len.to_be_bytes());
		v.push(next_header);
		v.push(64); // hop limit
		v.extend_from_slice(&[0u8; 16]); // src
		v.extend_from_slice(&[0u8; 16]); // dst
		v
	}

	#[test]
	fn trims_tail_to_header_plus_payload_len() {
		let mut header = ipv6_header(8, PROTO_UDP);
		header.extend_from_slice(&[0u8; 8]); // udp payload
		header.extend_from_slice(&[0u8; 5]); // trailing padding
		let mut f = FrameBuffer::new();
		assert!(f.reset(header.len(), 0));
		f.fill_slice().copy_from_slice(&header);

		assert!(validate(&mut f).is_ok());
		assert_eq!(f.available(), HEADER_LEN + 8);
		assert_eq!(f.padding(), 5);

		assert_eq!(next(&mut f).unwrap(), Protocol::Udp);
		assert_eq!(f.offset(), HEADER_LEN);
	}

	#[test]
	fn wrong_version_fails_validation() {
		let mut version_tc_fl_bytes = [0u8; 4];
		version_tc_fl_bytes[0] = 4 << 4;
		let mut header = version_tc_fl_bytes.to_vec();
		header.extend_from_slice(&0u16.to_be_bytes());
		header.push(PROTO_UDP);
		header.push(64);
		header.extend_from_slice(&[0u8; 32]);
		let mut f = FrameBuffer::new();
		assert!(f.reset(header.len(), 0));
		f.fill_slice().copy_from_slice(&header);
		assert!(validate(&mut f).is_err());
	}
}

use std::io::Cursor;

use crate::error::{Error, Result};
use crate::frame::FrameBuffer;
use crate::read_write::BigEndianReader;

use super::protocol::Protocol;

/// Minimum IPv4 header length (no options), per RFC 791.
pub const MIN_HEADER_LEN: usize = 20;

const PROTO_UDP: u8 = 17;
const EVIL_BIT: u16 = 0x8000;
const MORE_FRAGMENTS: u16 = 0x2000;
const FRAGMENT_OFFSET_MASK: u16 = 0x1FFF;

struct ParsedHeader {
	hdr_len: usize,
	total_len: usize,
	protocol: u8,
	flags_and_offset: u16,
}

fn parse(bytes: &[u8]) -> Result<ParsedHeader> {
	let mut c = Cursor::new(bytes);
	let version_ihl: u8 = c.read_val()?;
	let version = version_ihl >> 4;
	let ihl = version_ihl & 0x0F;
	let _tos: u8 = c.read_val()?;
	let total_len: u16 = c.read_val()?;
	let _id: u16 = c.read_val()?;
	let flags_and_offset: u16 = c.read_val()?;
	let _ttl: u8 = c.read_val()?;
	let protocol: u8 = c.read_val()?;

	if version != 4 {
		return Err(Error::ProtocolValidation {
			protocol: Protocol::IPv4,
			reason: format!("version field is {version}, expected 4"),
		});
	}
	if flags_and_offset & EVIL_BIT != 0 {
		return Err(Error::ProtocolValidation {
			protocol: Protocol::IPv4,
			reason: "reserved (evil) flag bit is set".into(),
		});
	}

	Ok(ParsedHeader {
		hdr_len: ihl as usize * 4,
		total_len: total_len as usize,
		protocol,
		flags_and_offset,
	})
}

/// Checks version, the reserved flag bit, and that the frame holds at least
/// `hdr_len`/`total_len` bytes, then trims `tail` to the declared `total_len`.
pub fn validate(frame: &mut FrameBuffer) -> Result<()> {
	let bytes = frame.peek(MIN_HEADER_LEN).ok_or(Error::ShortRead {
		needed: MIN_HEADER_LEN,
		available: frame.available(),
	})?;
	let parsed = parse(bytes)?;

	if !frame.has_available(parsed.hdr_len) || !frame.has_available(parsed.total_len) {
		return Err(Error::ProtocolValidation {
			protocol: Protocol::IPv4,
			reason: format!(
				"frame has {} bytes, header declares hdr_len={} total_len={}",
				frame.available(),
				parsed.hdr_len,
				parsed.total_len
			),
		});
	}

	let trim = frame.available() - parsed.total_len;
	if trim > 0 && !frame.tail_move_back(trim) {
		return Err(Error::ProtocolValidation {
			protocol: Protocol::IPv4,
			reason: "failed to trim padding to declared total_len".into(),
		});
	}
	Ok(())
}

/// Advances past the (possibly option-bearing) header and maps the protocol byte.
/// Fragmented datagrams are rejected rather than reassembled.
pub fn next(frame: &mut FrameBuffer) -> Result<Protocol> {
	let header_bytes = frame.peek(MIN_HEADER_LEN).ok_or(Error::ShortRead {
		needed: MIN_HEADER_LEN,
		available: frame.available(),
	})?;
	let parsed = parse(header_bytes)?;

	if parsed.flags_and_offset & MORE_FRAGMENTS != 0 || parsed.flags_and_offset & FRAGMENT_OFFSET_MASK != 0 {
		return Err(Error::FragmentedIp);
	}

	if !frame.head_move(parsed.hdr_len) {
		return Err(Error::ShortRead {
			needed: parsed.hdr_len,
			available: frame.available(),
		});
	}

	Ok(match parsed.protocol {
		PROTO_UDP => Protocol::Udp,
		other => return Err(Error::UnknownNextProtocol(other as u16)),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ipv4_header(total_len: u16, protocol: u8, flags_and_offset: u16) -> Vec<u8> {
		let mut v = Vec::new();
		v.push(0x45); // version 4, ihl 5
		v.push(0); // tos
		v.extend_from_slice(&total_len.to_be_bytes());
		v.extend_from_slice(&0u16.to_be_bytes()); // id
		v.extend_from_slice(&flags_and_offset.to_be_bytes());
		v.push(64); // ttl
		v.push(protocol);
		v.extend_from_slice(&0u16.to_be_bytes()); // checksum
		v.extend_from_slice(&[10, 0, 0, 1]); // src
		v.extend_from_slice(&[10, 0, 0, 2]); // dst
		v
	}

	#[test]
	fn trims_tail_to_total_len() {
		let mut header = ipv4_header(28, PROTO_UDP, 0);
		header.extend_from_slice(&[0u8; 8]); // udp payload region
		header.extend_from_slice(&[0u8; 8]); // extra padding beyond declared total_len
		let mut f = FrameBuffer::new();
		assert!(f.reset(header.len(), 0));
		f.fill_slice().copy_from_slice(&header);

		assert!(validate(&mut f).is_ok());
		assert_eq!(f.available(), 28);
		assert_eq!(f.padding(), 8);

		assert_eq!(next(&mut f).unwrap(), Protocol::Udp);
		assert_eq!(f.offset(), MIN_HEADER_LEN);
	}

	#[test]
	fn fragmented_packet_is_rejected() {
		let header = ipv4_header(28, PROTO_UDP, 1); // fragment offset = 1
		let mut f = FrameBuffer::new();
		assert!(f.reset(header.len(), 0));
		f.fill_slice().copy_from_slice(&header);

		assert!(validate(&mut f).is_ok());
		assert!(matches!(next(&mut f), Err(Error::FragmentedIp)));
	}

	#[test]
	fn evil_bit_fails_validation() {
		let header = ipv4_header(20, PROTO_UDP, EVIL_BIT);
		let mut f = FrameBuffer::new();
		assert!(f.reset(header.len(), 0));
		f.fill_slice().copy_from_slice(&header);
		assert!(validate(&mut f).is_err());
	}
}

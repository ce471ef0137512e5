//! Classic pcap capture file reading: the 24-byte global header and the
//! sequence of 16-byte-header-prefixed records that follow it.

use std::io::Read;

use anyhow::{bail, Context, Result};
use byteorder::{BigEndian, ByteOrder, LittleEndian};

const MAGIC_LE: u32 = 0xA1B2_C3D4;
const MAGIC_SWAPPED: u32 = 0xD4C3_B2A1;
const GLOBAL_HEADER_LEN: usize = 24;
const RECORD_HEADER_LEN: usize = 16;
const ETHERNET_LINKTYPE: u32 = 1;

/// Whether the file's multi-byte fields after the magic need swapping to
/// reach host-native order, determined once from which magic value matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrderMode {
	Native,
	Swapped,
}

impl ByteOrderMode {
	fn read_u16(self, bytes: &[u8]) -> u16 {
		match self {
			ByteOrderMode::Native => LittleEndian::read_u16(bytes),
			ByteOrderMode::Swapped => BigEndian::read_u16(bytes),
		}
	}

	fn read_u32(self, bytes: &[u8]) -> u32 {
		match self {
			ByteOrderMode::Native => LittleEndian::read_u32(bytes),
			ByteOrderMode::Swapped => BigEndian::read_u32(bytes),
		}
	}
}

pub struct CaptureReader<R> {
	inner: R,
	order: ByteOrderMode,
}

impl<R: Read> CaptureReader<R> {
	/// Reads and validates the 24-byte global header: magic (with byte-swap
	/// fallback), version `>= 2.3`, and an Ethernet linktype.
	pub fn open(mut inner: R) -> Result<Self> {
		let mut header = [0u8; GLOBAL_HEADER_LEN];
		inner
			.read_exact(&mut header)
			.context("reading pcap global header")?;

		let magic = LittleEndian::read_u32(&header[0..4]);
		let order = match magic {
			MAGIC_LE => ByteOrderMode::Native,
			MAGIC_SWAPPED => ByteOrderMode::Swapped,
			other => bail!("unrecognised pcap magic: 0x{other:08x}"),
		};

		let version_major = order.read_u16(&header[4..6]);
		let version_minor = order.read_u16(&header[6..8]);
		if version_major < 2 || (version_major == 2 && version_minor < 3) {
			bail!("unsupported pcap version: {version_major}.{version_minor}");
		}

		let snaplen = order.read_u32(&header[16..20]);
		if snaplen > u16::MAX as u32 {
			bail!("snaplen {snaplen} exceeds 65535");
		}

		let network = order.read_u32(&header[20..24]);
		if network != ETHERNET_LINKTYPE {
			bail!("unsupported linktype {network}, only Ethernet (1) is supported");
		}

		Ok(CaptureReader { inner, order })
	}

	/// Reads the next record's payload bytes, or `None` at end of file.
	pub fn next_record(&mut self) -> Result<Option<Vec<u8>>> {
		let mut header = [0u8; RECORD_HEADER_LEN];
		match read_exact_or_eof(&mut self.inner, &mut header)? {
			false => return Ok(None),
			true => {}
		}

		let incl_len = self.order.read_u32(&header[8..12]) as usize;
		let mut data = vec![0u8; incl_len];
		self.inner
			.read_exact(&mut data)
			.context("reading pcap record data")?;
		Ok(Some(data))
	}
}

/// Like `Read::read_exact`, but a clean end-of-file on the very first byte
/// returns `Ok(false)` instead of erroring, so the record loop can tell
/// "no more records" from "truncated record".
fn read_exact_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<bool> {
	let mut filled = 0;
	while filled < buf.len() {
		match reader.read(&mut buf[filled..]) {
			Ok(0) if filled == 0 => return Ok(false),
			Ok(0) => bail!("truncated pcap record header"),
			Ok(n) => filled += n,
			Err(e) => return Err(e).context("reading pcap record header"),
		}
	}
	Ok(true)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn global_header(magic: [u8; 4]) -> Vec<u8> {
		let mut v = Vec::new();
		v.extend_from_slice(&magic);
		v.extend_from_slice(&2u16.to_le_bytes());
		v.extend_from_slice(&4u16.to_le_bytes());
		v.extend_from_slice(&0i32.to_le_bytes());
		v.extend_from_slice(&0u32.to_le_bytes());
		v.extend_from_slice(&65535u32.to_le_bytes());
		v.extend_from_slice(&1u32.to_le_bytes());
		v
	}

	#[test]
	fn opens_little_endian_capture() {
		let header = global_header([0xD4, 0xC3, 0xB2, 0xA1]);
		let reader = CaptureReader::open(std::io::Cursor::new(header)).unwrap();
		assert_eq!(reader.order, ByteOrderMode::Native);
	}

	#[test]
	fn rejects_unsupported_linktype() {
		let mut header = global_header([0xD4, 0xC3, 0xB2, 0xA1]);
		header[20..24].copy_from_slice(&105u32.to_le_bytes());
		assert!(CaptureReader::open(std::io::Cursor::new(header)).is_err());
	}

	#[test]
	fn reads_record_and_detects_eof() {
		let mut bytes = global_header([0xD4, 0xC3, 0xB2, 0xA1]);
		bytes.extend_from_slice(&0u32.to_le_bytes()); // ts_sec
		bytes.extend_from_slice(&0u32.to_le_bytes()); // ts_usec
		bytes.extend_from_slice(&3u32.to_le_bytes()); // incl_len
		bytes.extend_from_slice(&3u32.to_le_bytes()); // orig_len
		bytes.extend_from_slice(&[1, 2, 3]);

		let mut reader = CaptureReader::open(std::io::Cursor::new(bytes)).unwrap();
		let record = reader.next_record().unwrap().unwrap();
		assert_eq!(record, vec![1, 2, 3]);
		assert!(reader.next_record().unwrap().is_none());
	}
}

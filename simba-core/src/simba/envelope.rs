use std::io::Cursor;

use crate::error::{Error, Result};
use crate::frame::FrameBuffer;
use crate::read_write::LittleEndianReader;

use super::primitives::MsgFlags;

/// Recognised SBE schema identifier; messages bearing any other schema are
/// silently skipped (see [`crate::simba::decoder`]).
pub const SCHEMA_ID: u16 = 19_780;

/// Leads every UDP payload this decoder is handed.
#[derive(Debug, Clone, Copy)]
pub struct MarketDataPacketHeader {
	pub msg_seq_num: u32,
	pub msg_size: u16,
	pub msg_flags: MsgFlags,
	pub sending_time: u64,
}

impl MarketDataPacketHeader {
	pub const SIZE: usize = 16;

	pub fn decode(frame: &mut FrameBuffer) -> Result<Self> {
		let available = frame.available();
		let bytes = frame.take(Self::SIZE).ok_or(Error::ShortRead {
			needed: Self::SIZE,
			available,
		})?;
		let mut c = Cursor::new(bytes);
		let msg_seq_num: u32 = c.read_val()?;
		let msg_size: u16 = c.read_val()?;
		let raw_flags: u16 = c.read_val()?;
		let sending_time: u64 = c.read_val()?;
		Ok(MarketDataPacketHeader {
			msg_seq_num,
			msg_size,
			msg_flags: MsgFlags::from_bits_truncate(raw_flags),
			sending_time,
		})
	}
}

/// Present only when `MarketDataPacketHeader.msg_flags` has `IncrementalPacket` set;
/// precedes each SBE message in that case.
#[derive(Debug, Clone, Copy)]
pub struct IncrementalHeader {
	pub transact_time: u64,
	pub exchange_trading_session_id: u32,
}

impl IncrementalHeader {
	pub const SIZE: usize = 12;

	pub fn decode(frame: &mut FrameBuffer) -> Result<Self> {
		let available = frame.available();
		let bytes = frame.take(Self::SIZE).ok_or(Error::ShortRead {
			needed: Self::SIZE,
			available,
		})?;
		let mut c = Cursor::new(bytes);
		let transact_time: u64 = c.read_val()?;
		let exchange_trading_session_id: u32 = c.read_val()?;
		Ok(IncrementalHeader {
			transact_time,
			exchange_trading_session_id,
		})
	}
}

/// The SBE message envelope: selects the template (message shape) and schema.
#[derive(Debug, Clone, Copy)]
pub struct SbeMessageHeader {
	pub block_length: u16,
	pub template_id: u16,
	pub schema_id: u16,
	pub version: u16,
}

impl SbeMessageHeader {
	pub const SIZE: usize = 8;

	pub fn decode(frame: &mut FrameBuffer) -> Result<Self> {
		let available = frame.available();
		let bytes = frame.take(Self::SIZE).ok_or(Error::ShortRead {
			needed: Self::SIZE,
			available,
		})?;
		let mut c = Cursor::new(bytes);
		let block_length: u16 = c.read_val()?;
		let template_id: u16 = c.read_val()?;
		let schema_id: u16 = c.read_val()?;
		let version: u16 = c.read_val()?;
		Ok(SbeMessageHeader {
			block_length,
			template_id,
			schema_id,
			version,
		})
	}

	pub fn is_recognised_schema(&self) -> bool {
		self.schema_id == SCHEMA_ID
	}
}

/// Introduces a repeating group: `num_in_group` entries follow, each exactly
/// `block_length` bytes.
#[derive(Debug, Clone, Copy)]
pub struct GroupSizeHeader {
	pub block_length: u16,
	pub num_in_group: u8,
}

impl GroupSizeHeader {
	pub const SIZE: usize = 3;

	pub fn decode(frame: &mut FrameBuffer) -> Result<Self> {
		let available = frame.available();
		let bytes = frame.take(Self::SIZE).ok_or(Error::ShortRead {
			needed: Self::SIZE,
			available,
		})?;
		let mut c = Cursor::new(bytes);
		let block_length: u16 = c.read_val()?;
		let num_in_group: u8 = c.read_val()?;
		Ok(GroupSizeHeader {
			block_length,
			num_in_group,
		})
	}

	/// "The declared group must fit in the remaining buffer":
	/// `block_length * num_in_group <= available`, applied uniformly whether the
	/// group's entries are decoded (OrderBookSnapshot) or skipped whole
	/// (BestPrices/DiscreteAuction). See the expanded spec's Open Question decision.
	pub fn total_bytes(&self) -> usize {
		self.block_length as usize * self.num_in_group as usize
	}
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
	fn decodes_market_data_packet_header() {
		let mut bytes = Vec::new();
		bytes.extend_from_slice(&7u32.to_le_bytes());
		bytes.extend_from_slice(&40u16.to_le_bytes());
		bytes.extend_from_slice(&0b1000u16.to_le_bytes()); // IncrementalPacket
		bytes.extend_from_slice(&123456789u64.to_le_bytes());

		let mut f = frame_with(&bytes);
		let header = MarketDataPacketHeader::decode(&mut f).unwrap();
		assert_eq!(header.msg_seq_num, 7);
		assert_eq!(header.msg_size, 40);
		assert!(header.msg_flags.contains(MsgFlags::INCREMENTAL_PACKET));
		assert_eq!(header.sending_time, 123456789);
		assert_eq!(f.offset(), MarketDataPacketHeader::SIZE);
	}

	#[test]
	fn schema_mismatch_is_detected() {
		let mut bytes = Vec::new();
		bytes.extend_from_slice(&0u16.to_le_bytes());
		bytes.extend_from_slice(&5u16.to_le_bytes());
		bytes.extend_from_slice(&0u16.to_le_bytes()); // schema_id = 0
		bytes.extend_from_slice(&1u16.to_le_bytes());

		let mut f = frame_with(&bytes);
		let header = SbeMessageHeader::decode(&mut f).unwrap();
		assert!(!header.is_recognised_schema());
	}

	#[test]
	fn group_size_total_bytes() {
		let g = GroupSizeHeader {
			block_length: 10,
			num_in_group: 3,
		};
		assert_eq!(g.total_bytes(), 30);
	}
}

//! The SBE message catalogue: fixed message roots keyed by template id, plus the
//! `OrderBookSnapshot` repeating-group entry shape.
//!
//! Field lists and nullability come from `original_source/src/simba/types.h`
//! (§3.4.1-3.4.3 of the expanded spec), which resolves the placeholders the
//! distilled spec left as "fixed root only" / "repeating group of entries".

use std::io::Cursor;

use crate::read_write::LittleEndianReader;

use super::primitives::{Decimal5, MDEntryType, MDFlagsSet, MDUpdateAction, Nullable};

/// `template_id = 5`.
#[derive(Debug, Clone, Copy)]
pub struct OrderUpdate {
	pub md_entry_id: i64,
	pub md_entry_px: Decimal5,
	pub md_entry_size: Nullable<i64>,
	pub md_flags: MDFlagsSet,
	pub md_flags2: u64,
	pub security_id: i32,
	pub rpt_seq: u32,
	pub md_update_action: MDUpdateAction,
	pub md_entry_type: MDEntryType,
}

impl OrderUpdate {
	pub const BLOCK_LENGTH: u16 = 50;

	pub fn decode(bytes: &[u8]) -> std::io::Result<Self> {
		let mut c = Cursor::new(bytes);
		Ok(OrderUpdate {
			md_entry_id: c.read_val()?,
			md_entry_px: Decimal5::from_raw(c.read_val()?),
			md_entry_size: Nullable::from_raw(c.read_val()?),
			md_flags: MDFlagsSet::from_bits_truncate(c.read_val()?),
			md_flags2: c.read_val()?,
			security_id: c.read_val()?,
			rpt_seq: c.read_val()?,
			md_update_action: MDUpdateAction::from_byte(c.read_val()?),
			md_entry_type: MDEntryType::from_byte(c.read_val()?),
		})
	}
}

/// `template_id = 6`.
#[derive(Debug, Clone, Copy)]
pub struct OrderExecution {
	pub md_entry_id: i64,
	pub md_entry_px: Decimal5,
	pub md_entry_size: Nullable<i64>,
	pub last_px: Decimal5,
	pub last_qty: Nullable<i64>,
	pub trade_id: i64,
	pub md_flags: MDFlagsSet,
	pub md_flags2: u64,
	pub security_id: i32,
	pub rpt_seq: u32,
	pub md_update_action: MDUpdateAction,
	pub md_entry_type: MDEntryType,
}

impl OrderExecution {
	pub const BLOCK_LENGTH: u16 = 74;

	pub fn decode(bytes: &[u8]) -> std::io::Result<Self> {
		let mut c = Cursor::new(bytes);
		Ok(OrderExecution {
			md_entry_id: c.read_val()?,
			md_entry_px: Decimal5::from_raw(c.read_val()?),
			md_entry_size: Nullable::from_raw(c.read_val()?),
			last_px: Decimal5::from_raw(c.read_val()?),
			last_qty: Nullable::from_raw(c.read_val()?),
			trade_id: c.read_val()?,
			md_flags: MDFlagsSet::from_bits_truncate(c.read_val()?),
			md_flags2: c.read_val()?,
			security_id: c.read_val()?,
			rpt_seq: c.read_val()?,
			md_update_action: MDUpdateAction::from_byte(c.read_val()?),
			md_entry_type: MDEntryType::from_byte(c.read_val()?),
		})
	}
}

/// `template_id = 7`, fixed root (the repeating group follows separately).
#[derive(Debug, Clone, Copy)]
pub struct OrderBookSnapshot {
	pub security_id: i32,
	pub last_msg_seq_num_processed: u32,
	pub rpt_seq: u32,
	pub exchange_trading_session_id: u32,
}

impl OrderBookSnapshot {
	pub const BLOCK_LENGTH: u16 = 16;

	pub fn decode(bytes: &[u8]) -> std::io::Result<Self> {
		let mut c = Cursor::new(bytes);
		Ok(OrderBookSnapshot {
			security_id: c.read_val()?,
			last_msg_seq_num_processed: c.read_val()?,
			rpt_seq: c.read_val()?,
			exchange_trading_session_id: c.read_val()?,
		})
	}
}

/// One entry of an `OrderBookSnapshot` repeating group.
#[derive(Debug, Clone, Copy)]
pub struct OrderBookSnapshotEntry {
	pub md_entry_id: Nullable<i64>,
	pub transact_time: u64,
	pub md_entry_px: Decimal5,
	pub md_entry_size: Nullable<i64>,
	pub trade_id: Nullable<i64>,
	pub md_flags: MDFlagsSet,
	pub md_flags2: u64,
	pub md_entry_type: MDEntryType,
}

impl OrderBookSnapshotEntry {
	pub fn decode(bytes: &[u8]) -> std::io::Result<Self> {
		let mut c = Cursor::new(bytes);
		Ok(OrderBookSnapshotEntry {
			md_entry_id: Nullable::from_raw(c.read_val()?),
			transact_time: c.read_val()?,
			md_entry_px: Decimal5::from_raw(c.read_val()?),
			md_entry_size: Nullable::from_raw(c.read_val()?),
			trade_id: Nullable::from_raw(c.read_val()?),
			md_flags: MDFlagsSet::from_bits_truncate(c.read_val()?),
			md_flags2: c.read_val()?,
			md_entry_type: MDEntryType::from_byte(c.read_val()?),
		})
	}
}

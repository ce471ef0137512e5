//! Renders decoded headers and messages as one `name [ field=value ... ]` line
//! per call, the textual format the CLI driver writes to stdout.

use std::io::Write;

use super::envelope::{GroupSizeHeader, IncrementalHeader, MarketDataPacketHeader};
use super::messages::{OrderBookSnapshot, OrderBookSnapshotEntry, OrderExecution, OrderUpdate};

fn line(writer: &mut dyn Write, name: &str, fields: &str) {
	let _ = writeln!(writer, "{name} [ {fields} ]");
}

pub fn market_data_packet_header(writer: &mut dyn Write, h: &MarketDataPacketHeader) {
	line(
		writer,
		"MarketDataPacketHeader",
		&format!(
			"msg_seq_num={} msg_size={} msg_flags={:?} sending_time={}",
			h.msg_seq_num, h.msg_size, h.msg_flags, h.sending_time
		),
	);
}

pub fn incremental_header(writer: &mut dyn Write, h: &IncrementalHeader) {
	line(
		writer,
		"IncrementalHeader",
		&format!(
			"transact_time={} exchange_trading_session_id={}",
			h.transact_time, h.exchange_trading_session_id
		),
	);
}

pub fn group_size(writer: &mut dyn Write, g: &GroupSizeHeader) {
	line(
		writer,
		"GroupSize",
		&format!("block_length={} num_in_group={}", g.block_length, g.num_in_group),
	);
}

pub fn skipped_message(writer: &mut dyn Write, template_id: u16, block_length: u16) {
	line(
		writer,
		"SkippedMessage",
		&format!("template_id={template_id} block_length={block_length}"),
	);
}

pub fn order_update(writer: &mut dyn Write, m: &OrderUpdate) {
	line(
		writer,
		"OrderUpdate",
		&format!(
			"md_entry_id={} md_entry_px={} md_entry_size={} md_flags={:?} md_flags2={} \
			 security_id={} rpt_seq={} md_update_action={} md_entry_type={}",
			m.md_entry_id,
			m.md_entry_px,
			m.md_entry_size,
			m.md_flags,
			m.md_flags2,
			m.security_id,
			m.rpt_seq,
			m.md_update_action,
			m.md_entry_type,
		),
	);
}

pub fn order_execution(writer: &mut dyn Write, m: &OrderExecution) {
	line(
		writer,
		"OrderExecution",
		&format!(
			"md_entry_id={} md_entry_px={} md_entry_size={} last_px={} last_qty={} trade_id={} \
			 md_flags={:?} md_flags2={} security_id={} rpt_seq={} md_update_action={} md_entry_type={}",
			m.md_entry_id,
			m.md_entry_px,
			m.md_entry_size,
			m.last_px,
			m.last_qty,
			m.trade_id,
			m.md_flags,
			m.md_flags2,
			m.security_id,
			m.rpt_seq,
			m.md_update_action,
			m.md_entry_type,
		),
	);
}

pub fn order_book_snapshot_root(writer: &mut dyn Write, m: &OrderBookSnapshot) {
	line(
		writer,
		"OrderBookSnapshot",
		&format!(
			"security_id={} last_msg_seq_num_processed={} rpt_seq={} exchange_trading_session_id={}",
			m.security_id, m.last_msg_seq_num_processed, m.rpt_seq, m.exchange_trading_session_id
		),
	);
}

pub fn order_book_snapshot_entry(writer: &mut dyn Write, e: &OrderBookSnapshotEntry) {
	line(
		writer,
		"OrderBookSnapshotEntry",
		&format!(
			"md_entry_id={} transact_time={} md_entry_px={} md_entry_size={} trade_id={} \
			 md_flags={:?} md_flags2={} md_entry_type={}",
			e.md_entry_id,
			e.transact_time,
			e.md_entry_px,
			e.md_entry_size,
			e.trade_id,
			e.md_flags,
			e.md_flags2,
			e.md_entry_type,
		),
	);
}

#[cfg(test)]
mod tests {
	use super::*;
	use super::super::primitives::{MDEntryType, MDFlagsSet, MDUpdateAction, Nullable};
	use super::super::primitives::Decimal5;

	#[test]
	fn order_update_line_is_bracketed_and_named() {
		let m = OrderUpdate {
			md_entry_id: 1,
			md_entry_px: Decimal5::from_raw(12_345),
			md_entry_size: Nullable::Known(10),
			md_flags: MDFlagsSet::CANCEL,
			md_flags2: 0,
			security_id: 7,
			rpt_seq: 1,
			md_update_action: MDUpdateAction::New,
			md_entry_type: MDEntryType::Bid,
		};
		let mut out = Vec::new();
		order_update(&mut out, &m);
		let text = String::from_utf8(out).unwrap();
		assert!(text.starts_with("OrderUpdate [ "));
		assert!(text.trim_end().ends_with(']'));
		assert!(text.contains("md_entry_id=1"));
	}
}

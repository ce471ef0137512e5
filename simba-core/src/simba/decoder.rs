//! Reads the Simba envelope(s) and dispatches each SBE message to its catalogue
//! entry, emitting one dump line per header/message as it goes.

use std::io::Write;

use crate::error::{Error, Result};
use crate::frame::FrameBuffer;

use super::dump;
use super::envelope::{GroupSizeHeader, IncrementalHeader, MarketDataPacketHeader, SbeMessageHeader};
use super::messages::{OrderBookSnapshot, OrderBookSnapshotEntry, OrderExecution, OrderUpdate};
use super::primitives::MsgFlags;

/// Template ids that carry no body beyond their declared `block_length` and no
/// repeating group: control/meta messages the dump only needs to skip past.
const SKIP_ONLY_TEMPLATES: &[u16] = &[1, 2, 4, 8, 10, 11, 12, 1000, 1001, 1002];

/// Template ids whose root is skipped (`block_length` bytes) but which are
/// followed by a repeating group that is itself skipped whole.
const SKIPPED_ROOT_WITH_GROUP_TEMPLATES: &[u16] = &[3, 13];

fn skip_group(frame: &mut FrameBuffer, writer: &mut dyn Write) -> Result<()> {
	let group = GroupSizeHeader::decode(frame)?;
	let total = group.total_bytes();
	if total > frame.available() {
		return Err(Error::GroupOverflow {
			block_length: group.block_length,
			num_in_group: group.num_in_group,
			available: frame.available(),
		});
	}
	dump::group_size(writer, &group);
	if !frame.head_move(total) {
		return Err(Error::ShortRead {
			needed: total,
			available: frame.available(),
		});
	}
	Ok(())
}

/// Reads one SBE message: the envelope header, then the body selected by
/// `template_id`. Returns `Ok(())` for both a fully-decoded message and a
/// silently-skipped schema mismatch (§3.4).
fn decode_message(frame: &mut FrameBuffer, writer: &mut dyn Write) -> Result<()> {
	let header = SbeMessageHeader::decode(frame)?;
	if !header.is_recognised_schema() {
		// Silently skipped: the message body has already been logically consumed
		// by nothing, since we never know its shape without the schema. We stop
		// at the header, matching "messages bearing any other schema are silently
		// skipped" rather than guessing a length to skip.
		return Ok(());
	}

	match header.template_id {
		5 => {
			expect_block_length(&header, "OrderUpdate", OrderUpdate::BLOCK_LENGTH)?;
			let available = frame.available();
			let bytes = frame
				.take(OrderUpdate::BLOCK_LENGTH as usize)
				.ok_or(Error::ShortRead {
					needed: OrderUpdate::BLOCK_LENGTH as usize,
					available,
				})?;
			let msg = OrderUpdate::decode(bytes)?;
			dump::order_update(writer, &msg);
			Ok(())
		}
		6 => {
			expect_block_length(&header, "OrderExecution", OrderExecution::BLOCK_LENGTH)?;
			let available = frame.available();
			let bytes = frame
				.take(OrderExecution::BLOCK_LENGTH as usize)
				.ok_or(Error::ShortRead {
					needed: OrderExecution::BLOCK_LENGTH as usize,
					available,
				})?;
			let msg = OrderExecution::decode(bytes)?;
			dump::order_execution(writer, &msg);
			Ok(())
		}
		7 => {
			expect_block_length(&header, "OrderBookSnapshot", OrderBookSnapshot::BLOCK_LENGTH)?;
			let available = frame.available();
			let root_bytes = frame
				.take(OrderBookSnapshot::BLOCK_LENGTH as usize)
				.ok_or(Error::ShortRead {
					needed: OrderBookSnapshot::BLOCK_LENGTH as usize,
					available,
				})?;
			let root = OrderBookSnapshot::decode(root_bytes)?;
			dump::order_book_snapshot_root(writer, &root);

			let group = GroupSizeHeader::decode(frame)?;
			let total = group.total_bytes();
			if total > frame.available() {
				return Err(Error::GroupOverflow {
					block_length: group.block_length,
					num_in_group: group.num_in_group,
					available: frame.available(),
				});
			}
			dump::group_size(writer, &group);

			for _ in 0..group.num_in_group {
				let entry_available = frame.available();
				let entry_bytes = frame
					.take(group.block_length as usize)
					.ok_or(Error::ShortRead {
						needed: group.block_length as usize,
						available: entry_available,
					})?;
				let entry = OrderBookSnapshotEntry::decode(entry_bytes)?;
				dump::order_book_snapshot_entry(writer, &entry);
			}
			Ok(())
		}
		id if SKIPPED_ROOT_WITH_GROUP_TEMPLATES.contains(&id) => {
			if !frame.head_move(header.block_length as usize) {
				return Err(Error::ShortRead {
					needed: header.block_length as usize,
					available: frame.available(),
				});
			}
			dump::skipped_message(writer, id, header.block_length);
			skip_group(frame, writer)
		}
		id if SKIP_ONLY_TEMPLATES.contains(&id) => {
			if !frame.head_move(header.block_length as usize) {
				return Err(Error::ShortRead {
					needed: header.block_length as usize,
					available: frame.available(),
				});
			}
			dump::skipped_message(writer, id, header.block_length);
			Ok(())
		}
		other => Err(Error::UnknownTemplate(other)),
	}
}

fn expect_block_length(header: &SbeMessageHeader, name: &'static str, expected: u16) -> Result<()> {
	if header.block_length != expected {
		return Err(Error::BlockLengthMismatch {
			message: name,
			declared: header.block_length,
			expected,
		});
	}
	Ok(())
}

/// Decodes one UDP payload, assumed to be positioned at the start of a Simba
/// `MarketDataPacketHeader`. Writes one dump line per header/message encountered.
///
/// Message-level failures (block-length mismatch, group overflow, unknown
/// template) abort only the message they occur in; the caller sees the first
/// such error but every message decoded before it has already been written.
pub fn decode_payload(frame: &mut FrameBuffer, writer: &mut dyn Write) -> Result<()> {
	let packet_header = MarketDataPacketHeader::decode(frame)?;
	dump::market_data_packet_header(writer, &packet_header);

	if packet_header.msg_flags.contains(MsgFlags::INCREMENTAL_PACKET) {
		let inc = IncrementalHeader::decode(frame)?;
		dump::incremental_header(writer, &inc);
		while frame.available() > 0 {
			decode_message(frame, writer)?;
		}
	} else {
		decode_message(frame, writer)?;
	}
	Ok(())
}

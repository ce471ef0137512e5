use std::io;
use thiserror::Error;

use crate::net::Protocol;

/// Failures that can abort decoding of a single frame or a single SBE message.
///
/// Every variant here is locally contained: the caller (the per-frame driver loop)
/// catches the error, reports it, and moves on to the next frame or capture. None
/// of these are process-fatal; see `simba-dump`'s `main` for the one layer that
/// does turn a failure into a non-zero exit code (capture open/header failures,
/// which this crate does not model since it never touches capture files).
#[derive(Error, Debug)]
pub enum Error {
	/// Fewer bytes were available than the read required.
	#[error("short read: needed {needed} bytes, {available} available")]
	ShortRead { needed: usize, available: usize },

	/// A field read failed inside an already-bounds-checked slice. This should be
	/// unreachable in practice (every `Cursor` this crate builds is sized to exactly
	/// the fields it reads), but `std::io::Read` still returns a `Result`.
	#[error("i/o error decoding a fixed-size record")]
	Io(#[from] io::Error),

	/// A protocol layer's header failed validation (bad version, bad flags, declared
	/// length past the end of the frame, etc).
	#[error("{protocol:?} header failed validation: {reason}")]
	ProtocolValidation { protocol: Protocol, reason: String },

	/// An IPv4 header declared a non-zero fragment offset or the more-fragments bit.
	#[error("fragmented IPv4 datagram is not supported")]
	FragmentedIp,

	/// An EtherType or IP next-header/protocol value has no mapping to a known layer.
	#[error("unrecognised next-protocol identifier: 0x{0:04x}")]
	UnknownNextProtocol(u16),

	/// `sbe_header.block_length` did not match the compiled-in size of the message body.
	#[error("{message} block_length mismatch: header says {declared}, expected {expected}")]
	BlockLengthMismatch {
		message: &'static str,
		declared: u16,
		expected: u16,
	},

	/// A repeating group's `block_length * num_in_group` exceeds the bytes remaining
	/// in the frame.
	#[error("repeating group of {num_in_group} x {block_length} bytes overflows {available} available")]
	GroupOverflow {
		block_length: u16,
		num_in_group: u8,
		available: usize,
	},

	/// `template_id` is not in the message catalogue.
	#[error("unknown SBE template id: {0}")]
	UnknownTemplate(u16),
}

pub type Result<T> = std::result::Result<T, Error>;

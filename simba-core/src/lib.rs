//! Cursor-based Ethernet/VLAN/IPv4/IPv6/UDP walker and MOEX SIMBA/SBE
//! market-data decoder.
//!
//! Given a raw Ethernet frame, [`net::walk`] advances a [`frame::FrameBuffer`]
//! through the protocol stack until it lands on a UDP payload (or stalls on a
//! layer it can't validate). From there, [`simba::decode_payload`] reads the
//! Simba envelope and dispatches each SBE message to its catalogue entry,
//! writing one textual line per header or message.
//!
//! # Reserved fields
//! Fields documented as reserved are read but not validated; unexpected values
//! there are not treated as a decode failure.

mod error;
mod frame;
mod net;
mod read_write;
pub mod simba;

pub use error::{Error, Result};
pub use frame::FrameBuffer;
pub use net::{walk, Protocol, WalkOutcome};
pub use read_write::{BigEndianReader, LittleEndianReader};

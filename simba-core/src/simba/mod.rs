//! MOEX SIMBA/SBE market-data decoding: envelope headers, the message
//! catalogue, and the entry point that ties them together over a UDP payload.

mod decoder;
mod dump;
mod envelope;
mod messages;
mod primitives;

pub use decoder::decode_payload;
pub use envelope::{GroupSizeHeader, IncrementalHeader, MarketDataPacketHeader, SbeMessageHeader, SCHEMA_ID};
pub use messages::{OrderBookSnapshot, OrderBookSnapshotEntry, OrderExecution, OrderUpdate};
pub use primitives::{Decimal2, Decimal5, MDEntryType, MDFlagsSet, MDUpdateAction, MsgFlags, Nullable};

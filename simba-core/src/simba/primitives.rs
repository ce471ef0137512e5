//! SBE primitive types: nullable integers, fixed-point decimals, and the small
//! enumerations used by Simba message fields.
//!
//! Null sentinels are exposed as a tagged variant ([`Nullable::Known`] /
//! [`Nullable::Null`]) rather than a raw integer, per the design note that this
//! keeps accidental arithmetic on sentinel values from compiling downstream.

use std::fmt;

use bitflags::bitflags;

/// A value that may be the documented "no value" bit pattern for its wire type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nullable<T> {
	Known(T),
	Null,
}

/// The reserved bit pattern a nullable signed integer uses to mean "no value":
/// the minimum negative value for that width.
pub trait NullSentinel: Copy + PartialEq {
	const NULL: Self;
}

macro_rules! impl_null_sentinel_min {
	($($t:ty),*) => {
		$(impl NullSentinel for $t {
			const NULL: $t = <$t>::MIN;
		})*
	};
}
impl_null_sentinel_min!(i8, i16, i32, i64);

impl<T: NullSentinel> Nullable<T> {
	pub fn from_raw(raw: T) -> Self {
		if raw == T::NULL {
			Nullable::Null
		} else {
			Nullable::Known(raw)
		}
	}
}

impl<T: fmt::Display> fmt::Display for Nullable<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Nullable::Known(v) => write!(f, "{v}"),
			Nullable::Null => write!(f, "'null'"),
		}
	}
}

/// Mantissa bit pattern reserved for "no value" in `Decimal2`/`Decimal5` fields.
/// Unlike plain nullable integers this is the maximum positive `i64`, not the
/// minimum negative one — the two null conventions are deliberately distinct on
/// the wire, so `Decimal2`/`Decimal5` do not reuse [`NullSentinel`].
pub const DECIMAL_NULL_MANTISSA: i64 = 0x7FFF_FFFF_FFFF_FFFF;

macro_rules! decimal_type {
	($name:ident, $divisor:expr, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq)]
		pub struct $name(i64);

		impl $name {
			pub const DIVISOR: i64 = $divisor;

			pub fn from_raw(mantissa: i64) -> Self {
				$name(mantissa)
			}

			pub fn is_null(self) -> bool {
				self.0 == DECIMAL_NULL_MANTISSA
			}

			pub fn mantissa(self) -> Option<i64> {
				if self.is_null() {
					None
				} else {
					Some(self.0)
				}
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				if self.is_null() {
					write!(f, "'null'")
				} else {
					write!(f, "{}", self.0 as f64 / Self::DIVISOR as f64)
				}
			}
		}
	};
}

decimal_type!(Decimal2, 100, "Signed 64-bit mantissa with an implicit divisor of 10^2.");
decimal_type!(Decimal5, 100_000, "Signed 64-bit mantissa with an implicit divisor of 10^5.");

/// `MDEntryType`: a single ASCII byte selecting a book-entry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MDEntryType {
	Bid,
	Ask,
	EmptyBook,
	Unknown(u8),
}

impl MDEntryType {
	pub fn from_byte(b: u8) -> Self {
		match b {
			b'0' => MDEntryType::Bid,
			b'1' => MDEntryType::Ask,
			b'J' => MDEntryType::EmptyBook,
			other => MDEntryType::Unknown(other),
		}
	}
}

impl fmt::Display for MDEntryType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			MDEntryType::Bid => write!(f, "Bid"),
			MDEntryType::Ask => write!(f, "Ask"),
			MDEntryType::EmptyBook => write!(f, "EmptyBook"),
			MDEntryType::Unknown(b) => write!(f, "UNKNOWN(0x{b:02x})"),
		}
	}
}

/// `md_update_action`: `0=New, 1=Change, 2=Delete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MDUpdateAction {
	New,
	Change,
	Delete,
	Unknown(u8),
}

impl MDUpdateAction {
	pub fn from_byte(b: u8) -> Self {
		match b {
			0 => MDUpdateAction::New,
			1 => MDUpdateAction::Change,
			2 => MDUpdateAction::Delete,
			other => MDUpdateAction::Unknown(other),
		}
	}
}

impl fmt::Display for MDUpdateAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			MDUpdateAction::New => write!(f, "New"),
			MDUpdateAction::Change => write!(f, "Change"),
			MDUpdateAction::Delete => write!(f, "Delete"),
			MDUpdateAction::Unknown(b) => write!(f, "UNKNOWN({b})"),
		}
	}
}

bitflags! {
	/// Named bit positions of the 64-bit `MDFlagsSet` attached to book entries.
	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	pub struct MDFlagsSet: u64 {
		const DAY                     = 1 << 0;
		const IOC                     = 1 << 1;
		const NON_QUOTE                = 1 << 2;
		const END_OF_TRANSACTION       = 1 << 12;
		const SECOND_LEG               = 1 << 14;
		const FOK                     = 1 << 19;
		const REPLACE                  = 1 << 20;
		const CANCEL                   = 1 << 21;
		const MASS_CANCEL               = 1 << 22;
		const NEGOTIATED               = 1 << 26;
		const MULTI_LEG                = 1 << 27;
		const CROSS_TRADE               = 1 << 29;
		const COD                     = 1 << 32;
		const ACTIVE_SIDE               = 1 << 41;
		const PASSIVE_SIDE              = 1 << 42;
		const SYNTHETIC                = 1 << 45;
		const RFS                     = 1 << 46;
		const SYNTHETIC_PASSIVE          = 1 << 57;
		const BOC                     = 1 << 60;
		const DURING_DISCRETE_AUCTION    = 1 << 62;
	}
}

bitflags! {
	/// Named bits of `MarketDataPacketHeader.msg_flags`.
	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	pub struct MsgFlags: u16 {
		const LAST_FRAGMENT      = 1 << 0;
		const START_OF_SNAPSHOT   = 1 << 1;
		const END_OF_SNAPSHOT     = 1 << 2;
		const INCREMENTAL_PACKET  = 1 << 3;
		const POSS_DUP_FLAG       = 1 << 4;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn nullable_sentinel_renders_as_null() {
		let v: Nullable<i64> = Nullable::from_raw(i64::MIN);
		assert_eq!(v, Nullable::Null);
		assert_eq!(v.to_string(), "'null'");
	}

	#[test]
	fn nullable_non_sentinel_renders_as_value() {
		let v: Nullable<i64> = Nullable::from_raw(42);
		assert_eq!(v, Nullable::Known(42));
		assert_eq!(v.to_string(), "42");
	}

	#[test]
	fn decimal5_null_sentinel_renders_as_null() {
		let d = Decimal5::from_raw(DECIMAL_NULL_MANTISSA);
		assert!(d.is_null());
		assert_eq!(d.to_string(), "'null'");
	}

	#[test]
	fn decimal5_renders_mantissa_over_divisor() {
		let d = Decimal5::from_raw(12_345);
		assert_eq!(d.to_string(), "0.12345");
	}

	#[test]
	fn md_entry_type_mapping() {
		assert_eq!(MDEntryType::from_byte(b'0'), MDEntryType::Bid);
		assert_eq!(MDEntryType::from_byte(b'1'), MDEntryType::Ask);
		assert_eq!(MDEntryType::from_byte(b'J'), MDEntryType::EmptyBook);
		assert_eq!(MDEntryType::from_byte(b'x'), MDEntryType::Unknown(b'x'));
	}

	#[test]
	fn md_flags_named_bits() {
		let flags = MDFlagsSet::from_bits_truncate((1 << 0) | (1 << 21));
		assert!(flags.contains(MDFlagsSet::DAY));
		assert!(flags.contains(MDFlagsSet::CANCEL));
		assert!(!flags.contains(MDFlagsSet::IOC));
	}
}

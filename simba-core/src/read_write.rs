use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io;

/// Pulls fixed-width integers off a `Read` in little-endian order.
///
/// SBE is little-endian end to end, so every Simba envelope/message field is read
/// through this trait.
pub trait LittleEndianReader<T> {
	fn read_val(&mut self) -> Result<T, io::Error>;
}
impl<R: ReadBytesExt> LittleEndianReader<u8> for R {
	fn read_val(&mut self) -> Result<u8, io::Error> {
		self.read_u8()
	}
}
impl<R: ReadBytesExt> LittleEndianReader<i8> for R {
	fn read_val(&mut self) -> Result<i8, io::Error> {
		self.read_i8()
	}
}
macro_rules! derive_le_reader {
{ $( $m:ident: $t:ty ),*} => {
		$(
			impl<T: ReadBytesExt> LittleEndianReader<$t> for T {
				fn read_val(&mut self) -> Result<$t, io::Error> {
						self . $m ::<LittleEndian>()
				}
			}
		)*

}
}
derive_le_reader! { read_u16: u16, read_i16: i16, read_u32: u32, read_i32: i32, read_u64: u64, read_i64: i64 }

/// Pulls fixed-width integers off a `Read` in big-endian (network) order.
///
/// Ethernet, VLAN, IPv4/IPv6 and UDP headers are all network-byte-order; this is the
/// symmetric counterpart to [`LittleEndianReader`] used by the protocol-stack layers.
pub trait BigEndianReader<T> {
	fn read_val(&mut self) -> Result<T, io::Error>;
}
impl<R: ReadBytesExt> BigEndianReader<u8> for R {
	fn read_val(&mut self) -> Result<u8, io::Error> {
		self.read_u8()
	}
}
macro_rules! derive_be_reader {
{ $( $m:ident: $t:ty ),*} => {
		$(
			impl<T: ReadBytesExt> BigEndianReader<$t> for T {
				fn read_val(&mut self) -> Result<$t, io::Error> {
						self . $m ::<BigEndian>()
				}
			}
		)*

}
}
derive_be_reader! { read_u16: u16, read_u32: u32, read_u64: u64 }

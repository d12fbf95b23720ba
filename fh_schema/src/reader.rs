use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width of every fixed name buffer (species, government, colony, ship).
pub const NAME_LEN: usize = 32;

/// Byte order of the integers stored in the data files.
///
/// The files are not self-describing; the caller has to know which machine
/// wrote them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::Little => f.write_str("little"),
            ByteOrder::Big => f.write_str("big"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown byte order `{0}` (expected `little` or `big`)")]
pub struct ParseByteOrderError(String);

impl FromStr for ByteOrder {
    type Err = ParseByteOrderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "little" | "le" => Ok(ByteOrder::Little),
            "big" | "be" => Ok(ByteOrder::Big),
            other => Err(ParseByteOrderError(other.to_string())),
        }
    }
}

/// Error raised while decoding records from a byte buffer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("truncated {record} data: need {needed} bytes, {remaining} remaining")]
    Truncated {
        record: &'static str,
        needed: usize,
        remaining: usize,
    },
    #[error("negative {what} count {value}")]
    NegativeCount { what: &'static str, value: i32 },
}

/// A fixed-size record with a byte-exact layout.
///
/// `decode` is handed a [`Fields`] cursor spanning exactly [`Record::SIZE`]
/// bytes and must consume all of them, reserved fields included. `encode`
/// writes zeros wherever the layout reserves space.
pub trait Record: Sized {
    const NAME: &'static str;
    const SIZE: usize;

    fn decode(fields: &mut Fields<'_>) -> Self;
    fn encode(&self, out: &mut RecordWriter);
}

/// Cursor over the bytes of a single record.
///
/// Bounds were checked against [`Record::SIZE`] before the cursor was built,
/// so reads here are infallible.
pub struct Fields<'a> {
    bytes: &'a [u8],
    pos: usize,
    order: ByteOrder,
}

impl<'a> Fields<'a> {
    fn new(bytes: &'a [u8], order: ByteOrder) -> Self {
        Self {
            bytes,
            pos: 0,
            order,
        }
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    pub fn consumed(&self) -> usize {
        self.pos
    }

    pub fn skip(&mut self, len: usize) {
        self.pos += len;
        debug_assert!(self.pos <= self.bytes.len(), "skipped past end of record");
    }

    pub fn u8(&mut self) -> u8 {
        self.take::<1>()[0]
    }

    pub fn i8(&mut self) -> i8 {
        self.take::<1>()[0] as i8
    }

    pub fn i16(&mut self) -> i16 {
        let raw = self.take::<2>();
        match self.order {
            ByteOrder::Little => i16::from_le_bytes(raw),
            ByteOrder::Big => i16::from_be_bytes(raw),
        }
    }

    pub fn i32(&mut self) -> i32 {
        let raw = self.take::<4>();
        match self.order {
            ByteOrder::Little => i32::from_le_bytes(raw),
            ByteOrder::Big => i32::from_be_bytes(raw),
        }
    }

    pub fn u64(&mut self) -> u64 {
        let raw = self.take::<8>();
        match self.order {
            ByteOrder::Little => u64::from_le_bytes(raw),
            ByteOrder::Big => u64::from_be_bytes(raw),
        }
    }

    pub fn flag(&mut self) -> bool {
        self.u8() != 0
    }

    /// A 32-byte name buffer: everything up to the first zero byte.
    pub fn name(&mut self) -> String {
        let raw = self.take::<NAME_LEN>();
        let end = raw.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
        String::from_utf8_lossy(&raw[..end]).into_owned()
    }

    pub fn i8_array<const N: usize>(&mut self) -> [i8; N] {
        std::array::from_fn(|_| self.i8())
    }

    pub fn u8_array<const N: usize>(&mut self) -> [u8; N] {
        self.take::<N>()
    }

    pub fn i16_array<const N: usize>(&mut self) -> [i16; N] {
        std::array::from_fn(|_| self.i16())
    }

    pub fn i32_array<const N: usize>(&mut self) -> [i32; N] {
        std::array::from_fn(|_| self.i32())
    }

    pub fn u64_pair(&mut self) -> [u64; 2] {
        [self.u64(), self.u64()]
    }
}

/// Sequential reader over a whole data file.
pub struct RecordReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    order: ByteOrder,
}

impl<'a> RecordReader<'a> {
    pub fn new(bytes: &'a [u8], order: ByteOrder) -> Self {
        Self {
            bytes,
            pos: 0,
            order,
        }
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn require(&self, record: &'static str, needed: usize) -> Result<(), DecodeError> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(DecodeError::Truncated {
                record,
                needed,
                remaining,
            });
        }
        Ok(())
    }

    /// Decode one record, failing without consuming anything if the buffer is short.
    pub fn read_record<R: Record>(&mut self) -> Result<R, DecodeError> {
        self.require(R::NAME, R::SIZE)?;
        let mut fields = Fields::new(&self.bytes[self.pos..self.pos + R::SIZE], self.order);
        let record = R::decode(&mut fields);
        debug_assert_eq!(
            fields.consumed(),
            R::SIZE,
            "{} decoder did not consume its layout",
            R::NAME
        );
        self.pos += R::SIZE;
        Ok(record)
    }

    /// Decode `count` back-to-back records.
    ///
    /// The whole run is checked against the remaining bytes up front, so a
    /// corrupt count fails before anything is allocated.
    pub fn read_records<R: Record>(&mut self, count: usize) -> Result<Vec<R>, DecodeError> {
        let needed = count.checked_mul(R::SIZE).unwrap_or(usize::MAX);
        self.require(R::NAME, needed)?;
        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            records.push(self.read_record::<R>()?);
        }
        Ok(records)
    }

    /// A 32-bit count prefix, rejecting negative values.
    pub fn read_count(&mut self, what: &'static str) -> Result<usize, DecodeError> {
        self.require(what, 4)?;
        let mut fields = Fields::new(&self.bytes[self.pos..self.pos + 4], self.order);
        let value = fields.i32();
        self.pos += 4;
        usize::try_from(value).map_err(|_| DecodeError::NegativeCount { what, value })
    }

    /// A count prefix followed by that many records.
    pub fn read_counted<R: Record>(&mut self) -> Result<Vec<R>, DecodeError> {
        let count = self.read_count(R::NAME)?;
        self.read_records(count)
    }
}

/// Encoder producing the same packed layout the reader consumes.
#[derive(Debug, Clone)]
pub struct RecordWriter {
    buf: Vec<u8>,
    order: ByteOrder,
}

impl RecordWriter {
    pub fn new(order: ByteOrder) -> Self {
        Self {
            buf: Vec::new(),
            order,
        }
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn zeros(&mut self, len: usize) {
        self.buf.resize(self.buf.len() + len, 0);
    }

    pub fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn put_i8(&mut self, value: i8) {
        self.buf.push(value as u8);
    }

    pub fn put_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    pub fn put_i16(&mut self, value: i16) {
        let raw = match self.order {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        };
        self.buf.extend_from_slice(&raw);
    }

    pub fn put_i32(&mut self, value: i32) {
        let raw = match self.order {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        };
        self.buf.extend_from_slice(&raw);
    }

    pub fn put_u64(&mut self, value: u64) {
        let raw = match self.order {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        };
        self.buf.extend_from_slice(&raw);
    }

    /// Write `name` into a 32-byte zero-filled buffer, truncating to leave a terminator.
    pub fn put_name(&mut self, name: &str) {
        let bytes = name.as_bytes();
        let len = bytes.len().min(NAME_LEN - 1);
        self.buf.extend_from_slice(&bytes[..len]);
        self.zeros(NAME_LEN - len);
    }

    pub fn put_i8_slice(&mut self, values: &[i8]) {
        values.iter().for_each(|&v| self.put_i8(v));
    }

    pub fn put_u8_slice(&mut self, values: &[u8]) {
        self.buf.extend_from_slice(values);
    }

    pub fn put_i16_slice(&mut self, values: &[i16]) {
        values.iter().for_each(|&v| self.put_i16(v));
    }

    pub fn put_i32_slice(&mut self, values: &[i32]) {
        values.iter().for_each(|&v| self.put_i32(v));
    }

    pub fn put_count(&mut self, count: usize) {
        self.put_i32(i32::try_from(count).unwrap_or(i32::MAX));
    }

    pub fn write_record<R: Record>(&mut self, record: &R) {
        let start = self.buf.len();
        record.encode(self);
        debug_assert_eq!(
            self.buf.len() - start,
            R::SIZE,
            "{} encoder did not fill its layout",
            R::NAME
        );
    }

    /// A count prefix followed by every record.
    pub fn write_counted<R: Record>(&mut self, records: &[R]) {
        self.put_count(records.len());
        records.iter().for_each(|record| self.write_record(record));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_honour_byte_order() {
        let bytes = [0x01, 0x02, 0x03, 0x04];
        let mut little = Fields::new(&bytes, ByteOrder::Little);
        assert_eq!(little.i32(), 0x0403_0201);
        let mut big = Fields::new(&bytes, ByteOrder::Big);
        assert_eq!(big.i16(), 0x0102);
        assert_eq!(big.i16(), 0x0304);
    }

    #[test]
    fn name_stops_at_first_zero() {
        let mut raw = [0u8; NAME_LEN];
        raw[..5].copy_from_slice(b"Earth");
        raw[6] = b'X';
        let mut fields = Fields::new(&raw, ByteOrder::Little);
        assert_eq!(fields.name(), "Earth");
        assert_eq!(fields.consumed(), NAME_LEN);
    }

    #[test]
    fn name_without_terminator_uses_whole_buffer() {
        let raw = [b'a'; NAME_LEN];
        let mut fields = Fields::new(&raw, ByteOrder::Big);
        assert_eq!(fields.name().len(), NAME_LEN);
    }

    #[test]
    fn writer_truncates_long_names() {
        let mut writer = RecordWriter::new(ByteOrder::Little);
        writer.put_name(&"z".repeat(40));
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), NAME_LEN);
        assert_eq!(bytes[NAME_LEN - 1], 0);
    }

    #[test]
    fn negative_count_is_rejected() {
        let mut writer = RecordWriter::new(ByteOrder::Big);
        writer.put_i32(-3);
        let bytes = writer.into_bytes();
        let mut reader = RecordReader::new(&bytes, ByteOrder::Big);
        assert_eq!(
            reader.read_count("star"),
            Err(DecodeError::NegativeCount {
                what: "star",
                value: -3
            })
        );
    }

    #[test]
    fn short_count_prefix_is_truncated() {
        let bytes = [0u8; 3];
        let mut reader = RecordReader::new(&bytes, ByteOrder::Little);
        assert!(matches!(
            reader.read_count("planet"),
            Err(DecodeError::Truncated { needed: 4, remaining: 3, .. })
        ));
    }

    #[test]
    fn byte_order_parses_from_text() {
        assert_eq!("little".parse::<ByteOrder>().unwrap(), ByteOrder::Little);
        assert_eq!("BE".parse::<ByteOrder>().unwrap(), ByteOrder::Big);
        assert!("middle".parse::<ByteOrder>().is_err());
    }
}

//! On-disk record layouts for Far Horizons data files.
//!
//! The game writes its state as packed, fixed-size binary records whose byte
//! order depends on the machine that produced them. This crate knows how to
//! read and write those records and nothing else; linking them into a
//! navigable universe lives in `fh_cluster`.

mod reader;
mod records;
mod species_bits;

pub use reader::{
    ByteOrder, DecodeError, Fields, ParseByteOrderError, Record, RecordReader, RecordWriter,
    NAME_LEN,
};
pub use records::{
    GalaxyRecord, NamplaRecord, PlanetRecord, ShipRecord, SpeciesRecord, StarRecord, MAX_ITEMS,
    NUM_TECH_LEVELS,
};
pub use species_bits::SpeciesBits;

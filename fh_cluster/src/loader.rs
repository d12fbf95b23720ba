//! Galaxy Loader: reads every data file of a game directory into raw records.

use std::fs;
use std::path::{Path, PathBuf};

use fh_schema::{
    ByteOrder, DecodeError, GalaxyRecord, NamplaRecord, PlanetRecord, RecordReader, RecordWriter,
    ShipRecord, SpeciesRecord, StarRecord,
};
use tracing::{debug, info, warn};

use crate::error::{LinkError, LoadError};

const LOG_TARGET: &str = "far_horizons::loader";

pub const GALAXY_FILE: &str = "galaxy.dat";
pub const STARS_FILE: &str = "stars.dat";
pub const PLANETS_FILE: &str = "planets.dat";

/// `spNN.dat` for 1-based species number `number`.
pub fn species_file_name(number: usize) -> String {
    format!("sp{number:02}.dat")
}

/// Every record of one game directory, decoded but not yet linked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGalaxy {
    pub galaxy: GalaxyRecord,
    pub stars: Vec<StarRecord>,
    pub planets: Vec<PlanetRecord>,
    /// Species files in species-number order.
    pub species: Vec<SpeciesFile>,
}

/// Contents of one `spNN.dat`: the header, then its colonies, then its ships.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesFile {
    pub header: SpeciesRecord,
    pub namplas: Vec<NamplaRecord>,
    pub ships: Vec<ShipRecord>,
}

impl SpeciesFile {
    /// Builds a file whose header counts agree with the record lists.
    pub fn new(mut header: SpeciesRecord, namplas: Vec<NamplaRecord>, ships: Vec<ShipRecord>) -> Self {
        header.num_namplas = namplas.len() as i32;
        header.num_ships = ships.len() as i32;
        Self {
            header,
            namplas,
            ships,
        }
    }

    pub fn decode(reader: &mut RecordReader<'_>) -> Result<Self, DecodeError> {
        let header: SpeciesRecord = reader.read_record()?;
        let namplas = reader.read_records(header_count("named planet", header.num_namplas)?)?;
        let ships = reader.read_records(header_count("ship", header.num_ships)?)?;
        Ok(Self {
            header,
            namplas,
            ships,
        })
    }

    /// Writes the header as is; counts are not reconciled with the lists.
    pub fn encode(&self, writer: &mut RecordWriter) {
        writer.write_record(&self.header);
        for nampla in &self.namplas {
            writer.write_record(nampla);
        }
        for ship in &self.ships {
            writer.write_record(ship);
        }
    }
}

fn header_count(what: &'static str, value: i32) -> Result<usize, DecodeError> {
    usize::try_from(value).map_err(|_| DecodeError::NegativeCount { what, value })
}

impl RawGalaxy {
    /// Encodes every file of the directory, keyed by file name.
    pub fn encode_files(&self, order: ByteOrder) -> Vec<(String, Vec<u8>)> {
        let mut files = Vec::with_capacity(3 + self.species.len());

        let mut writer = RecordWriter::new(order);
        writer.write_record(&self.galaxy);
        files.push((GALAXY_FILE.to_string(), writer.into_bytes()));

        let mut writer = RecordWriter::new(order);
        writer.write_counted(&self.stars);
        files.push((STARS_FILE.to_string(), writer.into_bytes()));

        let mut writer = RecordWriter::new(order);
        writer.write_counted(&self.planets);
        files.push((PLANETS_FILE.to_string(), writer.into_bytes()));

        for (index, species) in self.species.iter().enumerate() {
            let mut writer = RecordWriter::new(order);
            species.encode(&mut writer);
            files.push((species_file_name(index + 1), writer.into_bytes()));
        }
        files
    }
}

/// Reads `galaxy.dat`, `stars.dat`, `planets.dat` and one `spNN.dat` per
/// declared species from `dir`, in that order. The first failure aborts.
pub fn read_galaxy_dir(dir: &Path, order: ByteOrder) -> Result<RawGalaxy, LoadError> {
    let galaxy_path = dir.join(GALAXY_FILE);
    let galaxy: GalaxyRecord = read_file(&galaxy_path, order, |reader| reader.read_record())?;
    info!(
        target: LOG_TARGET,
        path = %galaxy_path.display(),
        species = galaxy.num_species,
        turn = galaxy.turn_number,
        "galaxy.loaded"
    );

    let stars_path = dir.join(STARS_FILE);
    let stars: Vec<StarRecord> = read_file(&stars_path, order, |reader| reader.read_counted())?;
    info!(
        target: LOG_TARGET,
        path = %stars_path.display(),
        count = stars.len(),
        "stars.loaded"
    );

    let planets_path = dir.join(PLANETS_FILE);
    let planets: Vec<PlanetRecord> =
        read_file(&planets_path, order, |reader| reader.read_counted())?;
    info!(
        target: LOG_TARGET,
        path = %planets_path.display(),
        count = planets.len(),
        "planets.loaded"
    );

    let species_count = usize::try_from(galaxy.num_species)
        .map_err(|_| LinkError::NegativeSpeciesCount(galaxy.num_species))?;
    let mut species = Vec::with_capacity(species_count);
    for number in 1..=species_count {
        let path = dir.join(species_file_name(number));
        let file = read_file(&path, order, SpeciesFile::decode)?;
        debug!(
            target: LOG_TARGET,
            path = %path.display(),
            species = number,
            name = %file.header.name,
            colonies = file.namplas.len(),
            ships = file.ships.len(),
            "species.loaded"
        );
        species.push(file);
    }
    info!(
        target: LOG_TARGET,
        dir = %dir.display(),
        count = species.len(),
        "species_files.loaded"
    );

    Ok(RawGalaxy {
        galaxy,
        stars,
        planets,
        species,
    })
}

fn read_file<T>(
    path: &Path,
    order: ByteOrder,
    decode: impl FnOnce(&mut RecordReader<'_>) -> Result<T, DecodeError>,
) -> Result<T, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = RecordReader::new(&bytes, order);
    let value = decode(&mut reader).map_err(|source| decode_error(path, source))?;
    if reader.remaining() > 0 {
        warn!(
            target: LOG_TARGET,
            path = %path.display(),
            trailing = reader.remaining(),
            "file.trailing_bytes"
        );
    }
    Ok(value)
}

fn decode_error(path: &Path, source: DecodeError) -> LoadError {
    LoadError::Decode {
        path: PathBuf::from(path),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_files_are_zero_padded() {
        assert_eq!(species_file_name(1), "sp01.dat");
        assert_eq!(species_file_name(12), "sp12.dat");
        assert_eq!(species_file_name(100), "sp100.dat");
    }

    #[test]
    fn species_file_reads_header_then_colonies_then_ships() {
        let file = SpeciesFile::new(
            SpeciesRecord {
                name: "Vulcans".into(),
                ..SpeciesRecord::default()
            },
            vec![
                NamplaRecord {
                    name: "Home".into(),
                    ..NamplaRecord::default()
                },
                NamplaRecord {
                    name: "Outpost".into(),
                    ..NamplaRecord::default()
                },
            ],
            vec![ShipRecord {
                name: "Scout".into(),
                ..ShipRecord::default()
            }],
        );
        assert_eq!(file.header.num_namplas, 2);
        assert_eq!(file.header.num_ships, 1);

        let mut writer = RecordWriter::new(ByteOrder::Big);
        file.encode(&mut writer);
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), 264 + 2 * 288 + 172);

        let mut reader = RecordReader::new(&bytes, ByteOrder::Big);
        let decoded = SpeciesFile::decode(&mut reader).expect("species file decodes");
        assert_eq!(decoded, file);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn overstated_ship_count_is_a_decode_error() {
        let mut file = SpeciesFile::new(SpeciesRecord::default(), Vec::new(), Vec::new());
        file.header.num_ships = 3;
        let mut writer = RecordWriter::new(ByteOrder::Little);
        file.encode(&mut writer);
        let bytes = writer.into_bytes();

        let err = SpeciesFile::decode(&mut RecordReader::new(&bytes, ByteOrder::Little))
            .expect_err("ships are missing");
        assert_eq!(
            err,
            DecodeError::Truncated {
                record: "ship",
                needed: 3 * 172,
                remaining: 0
            }
        );
    }

    #[test]
    fn negative_colony_count_is_rejected() {
        let mut file = SpeciesFile::default();
        file.header.num_namplas = -1;
        let mut writer = RecordWriter::new(ByteOrder::Little);
        file.encode(&mut writer);
        let bytes = writer.into_bytes();

        let err = SpeciesFile::decode(&mut RecordReader::new(&bytes, ByteOrder::Little))
            .expect_err("count is negative");
        assert_eq!(
            err,
            DecodeError::NegativeCount {
                what: "named planet",
                value: -1
            }
        );
    }

    #[test]
    fn encoded_directory_lists_every_file() {
        let raw = RawGalaxy {
            galaxy: GalaxyRecord {
                num_species: 2,
                ..GalaxyRecord::default()
            },
            species: vec![SpeciesFile::default(), SpeciesFile::default()],
            ..RawGalaxy::default()
        };
        let names: Vec<_> = raw
            .encode_files(ByteOrder::Little)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(
            names,
            ["galaxy.dat", "stars.dat", "planets.dat", "sp01.dat", "sp02.dat"]
        );
    }
}

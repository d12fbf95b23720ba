use std::io;
use std::path::PathBuf;

use fh_schema::DecodeError;
use thiserror::Error;

/// Failure of a whole-directory load. No partial cluster is ever returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
    #[error(transparent)]
    Link(#[from] LinkError),
}

/// The decoded files disagree about the planet layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("star {star} has negative planet count {count}")]
    NegativePlanetCount { star: usize, count: i32 },
    #[error("star {star} claims planet slot {slot} but only {planets} planets exist")]
    PlanetSlotOutOfRange {
        star: usize,
        slot: i64,
        planets: usize,
    },
    #[error("planet slot {slot} claimed by star {star} already belongs to star {owner}")]
    PlanetSlotReused { slot: usize, star: usize, owner: usize },
    #[error("stars declare {declared} planets but the planet file holds {actual}")]
    PlanetCountMismatch { declared: usize, actual: usize },
    #[error("galaxy header declares negative species count {0}")]
    NegativeSpeciesCount(i32),
}

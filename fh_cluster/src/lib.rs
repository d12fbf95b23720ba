//! Loads a Far Horizons game directory into a linked, read-only [`Cluster`].
//!
//! Loading happens in three stages: [`loader`] decodes every data file into
//! raw records, [`linker`] cross-references them into systems, planets,
//! species, colonies and ships, and [`life_support`] derives each planet's
//! life support need per species. Any failure aborts the whole load.

pub mod codes;
pub mod config;
pub mod error;
pub mod fixed;
pub mod life_support;
pub mod linker;
pub mod loader;
pub mod locate;
pub mod model;

use std::path::Path;

use fh_schema::ByteOrder;

pub use codes::{Gas, ItemKind, PlanetSpecial, ShipClass, ShipStatus, StarColor, StarType, TechKind};
pub use config::{load_loader_config_from_env, ConfigError, LoaderConfig};
pub use error::{LinkError, LoadError};
pub use fixed::{Centi, Deci, Fixed};
pub use loader::{read_galaxy_dir, species_file_name, RawGalaxy, SpeciesFile};
pub use model::{
    AtmosphericGas, Cluster, Colony, ColonyId, ColonyRef, ColonyStatus, Coords, Destination,
    Develop, GasTolerance, Item, Location, Planet, PlanetId, RequiredGas, Ship, ShipId, ShipRef,
    Species, SpeciesId, System, SystemId, Tech,
};

/// Links decoded records and computes life support needs.
pub fn build_cluster(raw: &RawGalaxy) -> Result<Cluster, LinkError> {
    let mut cluster = linker::link(raw)?;
    life_support::apply(&mut cluster);
    tracing::info!(
        target: "far_horizons::linker",
        turn = cluster.turn(),
        systems = cluster.systems().len(),
        planets = cluster.planets().len(),
        species = cluster.all_species().len(),
        "cluster.loaded"
    );
    Ok(cluster)
}

/// Reads and links every data file in `dir`.
pub fn load_cluster(dir: &Path, order: ByteOrder) -> Result<Cluster, LoadError> {
    let raw = read_galaxy_dir(dir, order)?;
    Ok(build_cluster(&raw)?)
}

/// [`load_cluster`] with the directory and byte order taken from `config`.
pub fn load_with_config(config: &LoaderConfig) -> Result<Cluster, LoadError> {
    load_cluster(&config.data_path, config.byte_order)
}

use std::collections::BTreeMap;
use std::fmt;

use bitflags::bitflags;
use fh_schema::SpeciesBits;
use serde::Serialize;

use crate::codes::{Gas, ItemKind, PlanetSpecial, ShipClass, ShipStatus, StarColor, StarType, TechKind};
use crate::fixed::{Centi, Deci};

/// Location in the cluster. Equal coordinates mean co-located; the data files
/// have no other key linking them.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
)]
pub struct Coords {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coords {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn is_origin(&self) -> bool {
        *self == Coords::default()
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Id for the zero-based position `index`.
            pub fn from_index(index: usize) -> Self {
                Self(index as u32 + 1)
            }

            /// Zero-based position; ids start at 1.
            pub fn index(&self) -> usize {
                (self.0 as usize).wrapping_sub(1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// 1-based position in the star file.
    SystemId
);
entity_id!(
    /// 1-based global planet index.
    PlanetId
);
entity_id!(
    /// 1-based species number (the `NN` of `spNN.dat`).
    SpeciesId
);
entity_id!(
    /// 1-based position within the owning species' colony list.
    ColonyId
);
entity_id!(
    /// 1-based position within the owning species' ship list.
    ShipId
);

/// Cluster-wide handle on a colony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ColonyRef {
    pub species: SpeciesId,
    pub colony: ColonyId,
}

/// Cluster-wide handle on a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ShipRef {
    pub species: SpeciesId,
    pub ship: ShipId,
}

/// One fully loaded snapshot of the game universe.
///
/// Built once by the loader and never mutated afterwards. Every cross
/// reference is an id into one of the three flat arrays.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cluster {
    pub(crate) turn: i32,
    pub(crate) radius: i32,
    pub(crate) designed_species: i32,
    pub(crate) systems: Vec<System>,
    pub(crate) planets: Vec<Planet>,
    pub(crate) species: Vec<Species>,
}

impl Cluster {
    pub fn turn(&self) -> i32 {
        self.turn
    }

    /// Galactic radius in parsecs.
    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn designed_species(&self) -> i32 {
        self.designed_species
    }

    pub fn systems(&self) -> &[System] {
        &self.systems
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn all_species(&self) -> &[Species] {
        &self.species
    }

    pub fn system(&self, id: SystemId) -> Option<&System> {
        self.systems.get(id.index())
    }

    pub fn planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.get(id.index())
    }

    pub fn species(&self, id: SpeciesId) -> Option<&Species> {
        self.species.get(id.index())
    }

    pub fn colony(&self, colony: ColonyRef) -> Option<&Colony> {
        self.species(colony.species)?.colony(colony.colony)
    }

    pub fn ship(&self, ship: ShipRef) -> Option<&Ship> {
        self.species(ship.species)?.ship(ship.ship)
    }

    pub fn planets_of<'a>(&'a self, system: &'a System) -> impl Iterator<Item = &'a Planet> + 'a {
        system.planets.iter().filter_map(move |&id| self.planet(id))
    }

    pub fn colonies_on<'a>(&'a self, planet: &'a Planet) -> impl Iterator<Item = &'a Colony> + 'a {
        planet.colonies.iter().filter_map(move |&colony| self.colony(colony))
    }

    /// Resolved system and planet of a ship's current location.
    pub fn location_of(&self, ship: &Ship) -> (Option<&System>, Option<&Planet>) {
        (
            ship.location.system.and_then(|id| self.system(id)),
            ship.location.planet.and_then(|id| self.planet(id)),
        )
    }

    pub fn wormhole_exit(&self, system: &System) -> Option<&System> {
        system.wormhole_exit.and_then(|id| self.system(id))
    }

    fn resolve_bits(&self, bits: SpeciesBits) -> impl Iterator<Item = &Species> + '_ {
        bits.iter(self.species.len() as u32)
            .filter_map(move |number| self.species(SpeciesId(number)))
    }

    /// Species the given species has met.
    pub fn contacts_of(&self, id: SpeciesId) -> impl Iterator<Item = &Species> + '_ {
        let bits = self.species(id).map(|sp| sp.contacts).unwrap_or_default();
        self.resolve_bits(bits)
    }

    pub fn allies_of(&self, id: SpeciesId) -> impl Iterator<Item = &Species> + '_ {
        let bits = self.species(id).map(|sp| sp.allies).unwrap_or_default();
        self.resolve_bits(bits)
    }

    pub fn enemies_of(&self, id: SpeciesId) -> impl Iterator<Item = &Species> + '_ {
        let bits = self.species(id).map(|sp| sp.enemies).unwrap_or_default();
        self.resolve_bits(bits)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct System {
    pub id: SystemId,
    pub coords: Coords,
    pub color: StarColor,
    pub star_type: StarType,
    /// 0 through 9.
    pub size: i32,
    pub is_home_system: bool,
    pub message: i32,
    /// Planets in orbit order; orbit `n` is `planets[n - 1]`.
    pub planets: Vec<PlanetId>,
    pub wormhole_exit: Option<SystemId>,
    /// Species that have been here, keyed by species name.
    pub visited_by: BTreeMap<String, SpeciesId>,
    /// Species with a colony or ship here, keyed by species name.
    pub scanned_by: BTreeMap<String, SpeciesId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AtmosphericGas {
    pub gas: Gas,
    pub pct: i32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Planet {
    pub id: PlanetId,
    pub system: SystemId,
    pub coords: Coords,
    /// The first orbit is 1.
    pub orbit: u32,
    pub atmosphere: Vec<AtmosphericGas>,
    pub temperature_class: i32,
    pub pressure_class: i32,
    /// Thousands of kilometres.
    pub diameter: i32,
    /// Multiple of Earth gravity.
    pub gravity: Centi,
    pub mining_difficulty_base: Centi,
    pub mining_difficulty_increase: Centi,
    pub econ_efficiency: i32,
    pub special: PlanetSpecial,
    pub message: i32,
    pub colonies: Vec<ColonyRef>,
    /// Life support need per species, indexed by species position. `None`
    /// when the species' home planet could not be resolved.
    pub lsn: Vec<Option<i32>>,
}

impl Planet {
    pub fn is_ideal_home_planet(&self) -> bool {
        self.special == PlanetSpecial::IdealHomePlanet
    }

    pub fn is_ideal_colony_planet(&self) -> bool {
        self.special == PlanetSpecial::IdealColonyPlanet
    }

    pub fn is_radioactive_hell_hole(&self) -> bool {
        self.special == PlanetSpecial::RadioactiveHellHole
    }

    pub fn lsn_for(&self, species: SpeciesId) -> Option<i32> {
        self.lsn.get(species.index()).copied().flatten()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tech {
    pub kind: TechKind,
    pub current_level: i32,
    pub initial_level: i32,
    pub knowledge_level: i32,
    pub xps: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RequiredGas {
    pub gas: Gas,
    pub min_pct: i32,
    pub max_pct: i32,
}

impl RequiredGas {
    pub fn accepts(&self, pct: i32) -> bool {
        self.min_pct <= pct && pct <= self.max_pct
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GasTolerance {
    pub required: RequiredGas,
    pub neutral: Vec<Gas>,
    pub poison: Vec<Gas>,
}

impl GasTolerance {
    pub fn is_poisoned_by(&self, gas: Gas) -> bool {
        self.poison.contains(&gas)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Species {
    pub id: SpeciesId,
    pub name: String,
    pub govt_name: String,
    pub govt_type: String,
    pub home_coords: Coords,
    pub home_orbit: u32,
    /// Tech tracks in [`TechKind::ALL`] order.
    pub tech: Vec<Tech>,
    pub gases: GasTolerance,
    pub auto_orders: bool,
    pub econ_units_banked: i32,
    pub fleet_maintenance_cost: i32,
    pub fleet_maintenance_pct: Centi,
    /// Economic base before the home planet was bombed; zero once recovered.
    pub home_planet_original_base: i32,
    pub contacts: SpeciesBits,
    pub allies: SpeciesBits,
    pub enemies: SpeciesBits,
    pub home_planet: Option<PlanetId>,
    pub home_system: Option<SystemId>,
    pub home_colony: Option<ColonyId>,
    pub colonies: Vec<Colony>,
    pub ships: Vec<Ship>,
    pub systems_visited: Vec<SystemId>,
    pub systems_scanned: Vec<SystemId>,
}

impl Species {
    pub fn tech(&self, kind: TechKind) -> Option<&Tech> {
        self.tech.get(kind.index())
    }

    pub fn colony(&self, id: ColonyId) -> Option<&Colony> {
        self.colonies.get(id.index())
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.index())
    }
}

bitflags! {
    /// Status bits of a named planet, logically ORed together on disk.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
    pub struct ColonyStatus: u8 {
        const HOME_PLANET = 1;
        const COLONY = 2;
        const POPULATED = 8;
        const MINING_COLONY = 16;
        const RESORT_COLONY = 32;
        const DISBANDED_COLONY = 64;
    }
}

/// Pending automatic installation of colonial units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Develop {
    pub auto_install: i32,
    pub units_needed: i32,
    pub units_to_install: i32,
}

impl Develop {
    /// `None` unless at least one counter is set.
    pub fn from_counts(auto_install: i32, units_needed: i32, units_to_install: i32) -> Option<Self> {
        if auto_install == 0 && units_needed == 0 && units_to_install == 0 {
            return None;
        }
        Some(Self {
            auto_install,
            units_needed,
            units_to_install,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Item {
    pub kind: ItemKind,
    pub quantity: i32,
}

/// A planet occupied by a species ("named planet" on disk).
#[derive(Debug, Clone, Serialize)]
pub struct Colony {
    pub id: ColonyId,
    pub species: SpeciesId,
    pub name: String,
    pub coords: Coords,
    pub orbit: u32,
    pub planet: Option<PlanetId>,
    pub system: Option<SystemId>,
    pub status: ColonyStatus,
    pub hidden: bool,
    pub hiding: bool,
    /// First colony in file order.
    pub home_world: bool,
    pub manufacturing_base: Deci,
    pub mining_base: Deci,
    pub population_units: i32,
    pub shipyards: i32,
    pub siege_eff_pct: i32,
    pub use_on_ambush: i32,
    pub message: i32,
    pub special: i32,
    pub inventory: Vec<Item>,
    pub develop_aus: Option<Develop>,
    pub develop_ius: Option<Develop>,
    pub lsn: Option<i32>,
}

impl Colony {
    pub fn is_home_planet(&self) -> bool {
        self.status.contains(ColonyStatus::HOME_PLANET)
    }

    pub fn is_colony(&self) -> bool {
        self.status.contains(ColonyStatus::COLONY)
    }

    pub fn is_populated(&self) -> bool {
        self.status.contains(ColonyStatus::POPULATED)
    }

    pub fn is_mining_colony(&self) -> bool {
        self.status.contains(ColonyStatus::MINING_COLONY)
    }

    pub fn is_resort_colony(&self) -> bool {
        self.status.contains(ColonyStatus::RESORT_COLONY)
    }

    pub fn is_disbanded(&self) -> bool {
        self.status.contains(ColonyStatus::DISBANDED_COLONY)
    }
}

/// Where a ship currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    pub system: Option<SystemId>,
    pub planet: Option<PlanetId>,
}

/// Forced-jump or telescope target recorded on a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Destination {
    pub coords: Coords,
    pub system: Option<SystemId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Ship {
    pub id: ShipId,
    pub species: SpeciesId,
    pub name: String,
    pub coords: Coords,
    /// Zero when not at a planet.
    pub orbit: u32,
    pub status: ShipStatus,
    pub class: ShipClass,
    /// Tons.
    pub tonnage: i32,
    pub cargo_capacity: i32,
    pub total_cost: i32,
    /// Meaningful only for transports.
    pub size: i32,
    pub sub_light: bool,
    pub age: i32,
    pub remaining_cost: i32,
    pub special: i32,
    pub just_jumped: bool,
    pub arrived_via_wormhole: bool,
    pub inventory: Vec<Item>,
    pub location: Location,
    pub destination: Option<Destination>,
    pub loading_point: Option<ColonyId>,
    pub unloading_point: Option<ColonyId>,
}

impl Ship {
    pub fn is_under_construction(&self) -> bool {
        self.status == ShipStatus::UnderConstruction
    }

    pub fn is_on_surface(&self) -> bool {
        self.status == ShipStatus::OnSurface
    }

    pub fn is_in_orbit(&self) -> bool {
        self.status == ShipStatus::InOrbit
    }

    pub fn is_in_deep_space(&self) -> bool {
        self.status == ShipStatus::InDeepSpace
    }

    pub fn jumped_in_combat(&self) -> bool {
        self.status == ShipStatus::JumpedInCombat
    }

    pub fn forced_jump(&self) -> bool {
        self.status == ShipStatus::ForcedJump
    }
}

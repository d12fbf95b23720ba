//! Entity Linker: turns raw record arrays into the cross-referenced [`Cluster`].
//!
//! Linking runs in a fixed order. Systems and the flat planet array come first,
//! then wormholes, planet records, species with their colonies and ships, and
//! finally the visited/scanned relations. Every coordinate correlation goes
//! through [`crate::locate`].

use std::collections::BTreeSet;

use fh_schema::{NamplaRecord, PlanetRecord, ShipRecord, SpeciesRecord, StarRecord};
use tracing::{debug, warn};

use crate::codes::{
    Gas, ItemKind, PlanetSpecial, ShipClass, ShipStatus, StarColor, StarType, TechKind,
};
use crate::error::LinkError;
use crate::fixed::{Centi, Deci};
use crate::loader::{RawGalaxy, SpeciesFile};
use crate::locate::{planet_at, planet_in_orbit, system_at};
use crate::model::{
    AtmosphericGas, Cluster, Colony, ColonyId, ColonyRef, ColonyStatus, Coords, Destination,
    Develop, GasTolerance, Item, Location, Planet, PlanetId, RequiredGas, Ship, ShipId, Species,
    SpeciesId, System, SystemId, Tech,
};

const LOG_TARGET: &str = "far_horizons::linker";

/// Loading/unloading point meaning "the home planet".
const HOME_PLANET_POINT: i16 = 9999;

/// Links a decoded directory into a cluster. Life support needs are left
/// empty; see [`crate::life_support::apply`].
pub fn link(raw: &RawGalaxy) -> Result<Cluster, LinkError> {
    let slots = layout_planets(&raw.stars, raw.planets.len())?;

    let mut planets = vec![Planet::default(); raw.planets.len()];
    let mut systems = Vec::with_capacity(raw.stars.len());
    for (index, (star, run)) in raw.stars.iter().zip(&slots).enumerate() {
        let mut system = system_from_record(SystemId::from_index(index), star);
        for (offset, slot) in run.clone().enumerate() {
            let planet = &mut planets[slot];
            planet.id = PlanetId::from_index(slot);
            planet.system = system.id;
            planet.coords = system.coords;
            planet.orbit = offset as u32 + 1;
            system.planets.push(planet.id);
        }
        systems.push(system);
    }

    link_wormholes(&raw.stars, &mut systems);

    for (planet, record) in planets.iter_mut().zip(&raw.planets) {
        apply_planet_record(planet, record);
    }

    let mut species = Vec::with_capacity(raw.species.len());
    for (index, file) in raw.species.iter().enumerate() {
        let id = SpeciesId::from_index(index);
        let linked = link_species(id, file, &systems, &mut planets);
        debug!(
            target: LOG_TARGET,
            species = %id,
            name = %linked.name,
            colonies = linked.colonies.len(),
            ships = linked.ships.len(),
            "species.linked"
        );
        species.push(linked);
    }

    mark_visits(&raw.stars, &mut systems, &mut species);

    Ok(Cluster {
        turn: raw.galaxy.turn_number,
        radius: raw.galaxy.radius,
        designed_species: raw.galaxy.designed_species,
        systems,
        planets,
        species,
    })
}

/// Checks that the stars' planet runs cover the planet file exactly once and
/// returns each star's slot range.
fn layout_planets(
    stars: &[StarRecord],
    planet_count: usize,
) -> Result<Vec<std::ops::Range<usize>>, LinkError> {
    let mut owner: Vec<Option<usize>> = vec![None; planet_count];
    let mut runs = Vec::with_capacity(stars.len());
    let mut declared = 0usize;

    for (index, star) in stars.iter().enumerate() {
        let number = index + 1;
        let count = usize::try_from(star.num_planets).map_err(|_| {
            LinkError::NegativePlanetCount {
                star: number,
                count: i32::from(star.num_planets),
            }
        })?;
        let start = i64::from(star.planet_index);
        for offset in 0..count {
            let slot = start + offset as i64;
            let index = usize::try_from(slot)
                .ok()
                .filter(|&slot| slot < planet_count)
                .ok_or(LinkError::PlanetSlotOutOfRange {
                    star: number,
                    slot,
                    planets: planet_count,
                })?;
            if let Some(previous) = owner[index].replace(number) {
                return Err(LinkError::PlanetSlotReused {
                    slot: index,
                    star: number,
                    owner: previous,
                });
            }
        }
        declared += count;
        // Runs with no planets start wherever the record says; keep them empty.
        let first = usize::try_from(start).unwrap_or(0);
        runs.push(if count == 0 { 0..0 } else { first..first + count });
    }

    if declared != planet_count {
        return Err(LinkError::PlanetCountMismatch {
            declared,
            actual: planet_count,
        });
    }
    Ok(runs)
}

fn star_coords(star: &StarRecord) -> Coords {
    Coords::new(i32::from(star.x), i32::from(star.y), i32::from(star.z))
}

fn system_from_record(id: SystemId, star: &StarRecord) -> System {
    System {
        id,
        coords: star_coords(star),
        color: StarColor::from_code(i32::from(star.color)),
        star_type: StarType::from_code(i32::from(star.star_type)),
        size: i32::from(star.size),
        is_home_system: star.home_system,
        message: star.message,
        planets: Vec::with_capacity(usize::try_from(star.num_planets).unwrap_or(0)),
        ..System::default()
    }
}

fn link_wormholes(stars: &[StarRecord], systems: &mut [System]) {
    for (index, star) in stars.iter().enumerate() {
        if !star.worm_here {
            continue;
        }
        let exit = Coords::new(
            i32::from(star.worm_x),
            i32::from(star.worm_y),
            i32::from(star.worm_z),
        );
        match system_at(systems, exit) {
            Some(target) => {
                let entry = systems[index].id;
                systems[index].wormhole_exit = Some(target);
                systems[target.index()].wormhole_exit = Some(entry);
            }
            None => warn!(
                target: LOG_TARGET,
                system = %systems[index].id,
                exit = %exit,
                "wormhole.unresolved"
            ),
        }
    }
}

fn apply_planet_record(planet: &mut Planet, record: &PlanetRecord) {
    planet.temperature_class = i32::from(record.temperature_class);
    planet.pressure_class = i32::from(record.pressure_class);
    planet.special = PlanetSpecial::from_code(record.special);
    planet.atmosphere = record
        .gas
        .iter()
        .zip(&record.gas_percent)
        .filter(|(_, &pct)| pct != 0)
        .map(|(&gas, &pct)| AtmosphericGas {
            gas: Gas::from_code(i32::from(gas)),
            pct: i32::from(pct),
        })
        .collect();
    planet.diameter = i32::from(record.diameter);
    planet.gravity = Centi::from_raw(i32::from(record.gravity));
    planet.mining_difficulty_base = Centi::from_raw(i32::from(record.mining_difficulty));
    planet.mining_difficulty_increase = Centi::from_raw(i32::from(record.md_increase));
    planet.econ_efficiency = i32::from(record.econ_efficiency);
    planet.message = record.message;
}

fn gas_list(codes: &[u8]) -> Vec<Gas> {
    codes
        .iter()
        .filter(|&&code| code != 0)
        .map(|&code| Gas::from_code(i32::from(code)))
        .collect()
}

fn inventory<Q: Copy + Into<i32>>(quantities: &[Q]) -> Vec<Item> {
    quantities
        .iter()
        .enumerate()
        .map(|(code, &quantity)| (code, Into::<i32>::into(quantity)))
        .filter(|&(_, quantity)| quantity != 0)
        .map(|(code, quantity)| Item {
            kind: ItemKind::from_code(code as i32),
            quantity,
        })
        .collect()
}

fn species_from_record(id: SpeciesId, header: &SpeciesRecord) -> Species {
    let tech = TechKind::ALL
        .iter()
        .map(|&kind| {
            let slot = kind.index();
            Tech {
                kind,
                current_level: i32::from(header.tech_level[slot]),
                initial_level: i32::from(header.init_tech_level[slot]),
                knowledge_level: i32::from(header.tech_knowledge[slot]),
                xps: header.tech_eps[slot],
            }
        })
        .collect();

    Species {
        id,
        name: header.name.clone(),
        govt_name: header.govt_name.clone(),
        govt_type: header.govt_type.clone(),
        home_coords: Coords::new(i32::from(header.x), i32::from(header.y), i32::from(header.z)),
        home_orbit: u32::from(header.pn),
        tech,
        gases: GasTolerance {
            required: RequiredGas {
                gas: Gas::from_code(i32::from(header.required_gas)),
                min_pct: i32::from(header.required_gas_min),
                max_pct: i32::from(header.required_gas_max),
            },
            neutral: gas_list(&header.neutral_gas),
            poison: gas_list(&header.poison_gas),
        },
        auto_orders: header.auto_orders,
        econ_units_banked: header.econ_units,
        fleet_maintenance_cost: header.fleet_cost,
        fleet_maintenance_pct: Centi::from_raw(header.fleet_percent_cost),
        home_planet_original_base: header.hp_original_base,
        contacts: header.contact,
        allies: header.ally,
        enemies: header.enemy,
        ..Species::default()
    }
}

fn link_species(
    id: SpeciesId,
    file: &SpeciesFile,
    systems: &[System],
    planets: &mut [Planet],
) -> Species {
    let mut species = species_from_record(id, &file.header);

    species.home_planet = planet_at(planets, species.home_coords, species.home_orbit);
    species.home_system = species
        .home_planet
        .and_then(|planet| planets.get(planet.index()))
        .map(|planet| planet.system);
    if species.home_planet.is_none() {
        warn!(
            target: LOG_TARGET,
            species = %id,
            coords = %species.home_coords,
            orbit = species.home_orbit,
            "home_planet.unresolved"
        );
    }

    for (index, record) in file.namplas.iter().enumerate() {
        let colony = colony_from_record(id, ColonyId::from_index(index), record, planets);
        if let Some(planet) = colony.planet {
            planets[planet.index()].colonies.push(ColonyRef {
                species: id,
                colony: colony.id,
            });
        } else {
            warn!(
                target: LOG_TARGET,
                species = %id,
                colony = %colony.id,
                coords = %colony.coords,
                orbit = colony.orbit,
                "colony.unresolved"
            );
        }
        species.colonies.push(colony);
    }

    species.home_colony = species
        .colonies
        .iter()
        .find(|colony| colony.coords == species.home_coords && colony.orbit == species.home_orbit)
        .map(|colony| colony.id);

    let colony_count = species.colonies.len();
    for (index, record) in file.ships.iter().enumerate() {
        let ship = ship_from_record(id, ShipId::from_index(index), record, systems, colony_count);
        if ship.location.system.is_none() && !ship.is_in_deep_space() {
            warn!(
                target: LOG_TARGET,
                species = %id,
                ship = %ship.id,
                coords = %ship.coords,
                "ship.unresolved"
            );
        }
        species.ships.push(ship);
    }

    species
}

fn colony_from_record(
    species: SpeciesId,
    id: ColonyId,
    record: &NamplaRecord,
    planets: &[Planet],
) -> Colony {
    let coords = Coords::new(i32::from(record.x), i32::from(record.y), i32::from(record.z));
    let orbit = u32::from(record.pn);
    let planet = planet_at(planets, coords, orbit);
    Colony {
        id,
        species,
        name: record.name.clone(),
        coords,
        orbit,
        planet,
        system: planet
            .and_then(|planet| planets.get(planet.index()))
            .map(|planet| planet.system),
        status: ColonyStatus::from_bits_retain(record.status),
        hidden: record.hidden,
        hiding: record.hiding,
        home_world: id == ColonyId(1),
        manufacturing_base: Deci::from_raw(record.ma_base),
        mining_base: Deci::from_raw(record.mi_base),
        population_units: record.pop_units,
        shipyards: i32::from(record.shipyards),
        siege_eff_pct: i32::from(record.siege_eff),
        use_on_ambush: record.use_on_ambush,
        message: record.message,
        special: record.special,
        inventory: inventory(&record.item_quantity),
        develop_aus: Develop::from_counts(record.auto_aus, record.aus_needed, record.aus_to_install),
        develop_ius: Develop::from_counts(record.auto_ius, record.ius_needed, record.ius_to_install),
        lsn: None,
    }
}

/// Resolves a loading or unloading point to a colony of the same species.
///
/// Zero means none, 9999 the home planet (the first colony), anything else is
/// the zero-based colony position.
fn colony_point(point: i16, colony_count: usize) -> Option<ColonyId> {
    let index = match point {
        0 => return None,
        HOME_PLANET_POINT => 0,
        other => usize::try_from(other).ok()?,
    };
    (index < colony_count).then(|| ColonyId::from_index(index))
}

fn ship_from_record(
    species: SpeciesId,
    id: ShipId,
    record: &ShipRecord,
    systems: &[System],
    colony_count: usize,
) -> Ship {
    let class = ShipClass::from_code(i32::from(record.class));
    let raw_tonnage = i32::from(record.tonnage);
    let coords = Coords::new(i32::from(record.x), i32::from(record.y), i32::from(record.z));
    let orbit = u32::from(record.pn);

    let system = system_at(systems, coords);
    let planet = match system {
        Some(system) if orbit != 0 => planet_in_orbit(&systems[system.index()], orbit),
        _ => None,
    };

    let dest = Coords::new(
        i32::from(record.dest_x),
        i32::from(record.dest_y),
        i32::from(record.dest_z),
    );
    let destination = (!dest.is_origin()).then(|| Destination {
        coords: dest,
        system: system_at(systems, dest),
    });

    Ship {
        id,
        species,
        name: record.name.clone(),
        coords,
        orbit,
        status: ShipStatus::from_code(record.status),
        class,
        tonnage: class.tonnage(raw_tonnage),
        cargo_capacity: class.cargo_capacity(raw_tonnage),
        total_cost: class.cost(raw_tonnage),
        size: class.size(raw_tonnage),
        sub_light: record.ship_type != 0 || class == ShipClass::Starbase,
        age: i32::from(record.age),
        remaining_cost: i32::from(record.remaining_cost),
        special: record.special,
        just_jumped: record.just_jumped,
        arrived_via_wormhole: record.arrived_via_wormhole,
        inventory: inventory(&record.item_quantity),
        location: Location { system, planet },
        destination,
        loading_point: colony_point(record.loading_point, colony_count),
        unloading_point: colony_point(record.unloading_point, colony_count),
    }
}

/// Records which species visited each system (from the star's bitset) and
/// which have a colony or ship there.
fn mark_visits(stars: &[StarRecord], systems: &mut [System], species: &mut [Species]) {
    let occupied: Vec<BTreeSet<SystemId>> = species
        .iter()
        .map(|sp| {
            sp.colonies
                .iter()
                .filter_map(|colony| colony.system)
                .chain(sp.ships.iter().filter_map(|ship| ship.location.system))
                .collect()
        })
        .collect();

    for (system, star) in systems.iter_mut().zip(stars) {
        for (sp, present) in species.iter_mut().zip(&occupied) {
            if star.visited_by.is_set(sp.id.0) {
                system.visited_by.insert(sp.name.clone(), sp.id);
                sp.systems_visited.push(system.id);
            }
            if present.contains(&system.id) {
                system.scanned_by.insert(sp.name.clone(), sp.id);
                sp.systems_scanned.push(system.id);
            }
        }
    }
}

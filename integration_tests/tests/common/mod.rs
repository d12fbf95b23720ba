#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use fh_cluster::{ColonyStatus, RawGalaxy, SpeciesFile};
use fh_schema::{
    ByteOrder, GalaxyRecord, NamplaRecord, PlanetRecord, ShipRecord, SpeciesBits, SpeciesRecord,
    StarRecord,
};

static SCRATCH_SERIAL: AtomicU64 = AtomicU64::new(0);

/// Temporary directory removed on drop.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new(name: &str) -> Self {
        let serial = SCRATCH_SERIAL.fetch_add(1, Ordering::Relaxed);
        let mut path = std::env::temp_dir();
        path.push(format!(
            "fh-integration-{name}-{}-{}",
            std::process::id(),
            serial
        ));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("create scratch dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Writes every file of `raw` into `dir`.
pub fn write_galaxy(dir: &Path, raw: &RawGalaxy, order: ByteOrder) {
    for (name, bytes) in raw.encode_files(order) {
        fs::write(dir.join(&name), bytes).expect("write fixture file");
    }
}

/// A scratch directory already holding `raw`.
pub fn galaxy_dir(name: &str, raw: &RawGalaxy, order: ByteOrder) -> ScratchDir {
    let dir = ScratchDir::new(name);
    write_galaxy(dir.path(), raw, order);
    dir
}

fn star(at: (i8, i8, i8), planet_index: i16, num_planets: i8) -> StarRecord {
    StarRecord {
        x: at.0,
        y: at.1,
        z: at.2,
        star_type: 3,
        color: 5,
        size: 4,
        num_planets,
        planet_index,
        ..StarRecord::default()
    }
}

fn planet(temperature_class: i8, pressure_class: i8, gases: &[(i8, i8)]) -> PlanetRecord {
    let mut record = PlanetRecord {
        temperature_class,
        pressure_class,
        diameter: 12,
        gravity: 100,
        mining_difficulty: 250,
        econ_efficiency: 100,
        ..PlanetRecord::default()
    };
    for (slot, &(gas, pct)) in gases.iter().enumerate().take(4) {
        record.gas[slot] = gas;
        record.gas_percent[slot] = pct;
    }
    record
}

fn nampla(name: &str, at: (u8, u8, u8), pn: u8, status: ColonyStatus) -> NamplaRecord {
    NamplaRecord {
        name: name.into(),
        x: at.0,
        y: at.1,
        z: at.2,
        pn,
        status: status.bits(),
        ..NamplaRecord::default()
    }
}

pub const NITROGEN: i8 = 5;
pub const CARBON_DIOXIDE: i8 = 6;
pub const OXYGEN: i8 = 7;
pub const CHLORINE: i8 = 9;
pub const HELIUM: i8 = 3;

/// Three stars, seven planets, two species.
///
/// - System 1 at 10,10,10: orbits 1-3 are planets 1-3, orbit 2 is the human
///   home planet. Wormhole to system 3. Visited by species 1.
/// - System 2 at 20,5,0: orbits 1-2 are planets 6-7, orbit 1 is the Klingon
///   home planet. Visited by species 2.
/// - System 3 at 30,30,30: orbits 1-2 are planets 4-5. Planet 4 is two
///   temperature classes and one pressure class from the human home, with no
///   oxygen and some chlorine.
pub fn sample_galaxy() -> RawGalaxy {
    let mut first = star((10, 10, 10), 0, 3);
    first.home_system = true;
    first.worm_here = true;
    (first.worm_x, first.worm_y, first.worm_z) = (30, 30, 30);
    first.visited_by.set(1);
    let mut second = star((20, 5, 0), 5, 2);
    second.home_system = true;
    second.visited_by.set(2);
    second.color = 7;
    let third = star((30, 30, 30), 3, 2);

    let planets = vec![
        planet(3, 1, &[]),
        planet(12, 8, &[(NITROGEN, 78), (OXYGEN, 20), (CARBON_DIOXIDE, 0)]),
        planet(20, 15, &[(CARBON_DIOXIDE, 100)]),
        planet(14, 9, &[(NITROGEN, 60), (CHLORINE, 40)]),
        planet(12, 8, &[(OXYGEN, 20), (HELIUM, 5)]),
        planet(10, 10, &[(NITROGEN, 80), (OXYGEN, 20)]),
        planet(1, 0, &[]),
    ];

    let mut contact = SpeciesBits::default();
    contact.set(2);
    let mut humans_cargo = ShipRecord {
        name: "Hauler".into(),
        x: 30,
        y: 30,
        z: 30,
        pn: 1,
        status: 2,
        class: 17,
        tonnage: 4,
        loading_point: 9999,
        unloading_point: 1,
        ..ShipRecord::default()
    };
    humans_cargo.item_quantity[4] = 40;
    let humans = SpeciesFile::new(
        SpeciesRecord {
            name: "Humans".into(),
            govt_name: "Terran Union".into(),
            govt_type: "Democracy".into(),
            x: 10,
            y: 10,
            z: 10,
            pn: 2,
            required_gas: OXYGEN as u8,
            required_gas_min: 10,
            required_gas_max: 30,
            neutral_gas: [NITROGEN as u8, CARBON_DIOXIDE as u8, 0, 0, 0, 0],
            poison_gas: [CHLORINE as u8, 0, 0, 0, 0, 0],
            tech_level: [10, 11, 12, 13, 14, 15],
            fleet_percent_cost: 125,
            contact,
            ..SpeciesRecord::default()
        },
        vec![
            nampla(
                "Earth",
                (10, 10, 10),
                2,
                ColonyStatus::HOME_PLANET | ColonyStatus::POPULATED,
            ),
            nampla("Nova", (30, 30, 30), 1, ColonyStatus::COLONY),
        ],
        vec![
            humans_cargo,
            ShipRecord {
                name: "Wanderer".into(),
                x: 50,
                y: 50,
                z: 50,
                status: 3,
                class: 1,
                ..ShipRecord::default()
            },
        ],
    );

    let mut ally = SpeciesBits::default();
    ally.set(1);
    let klingons = SpeciesFile::new(
        SpeciesRecord {
            name: "Klingons".into(),
            govt_name: "High Council".into(),
            govt_type: "Empire".into(),
            x: 20,
            y: 5,
            z: 0,
            pn: 1,
            required_gas: OXYGEN as u8,
            required_gas_min: 15,
            required_gas_max: 25,
            poison_gas: [HELIUM as u8, 0, 0, 0, 0, 0],
            contact: ally,
            ally,
            ..SpeciesRecord::default()
        },
        vec![nampla(
            "Kronos",
            (20, 5, 0),
            1,
            ColonyStatus::HOME_PLANET | ColonyStatus::POPULATED,
        )],
        vec![ShipRecord {
            name: "Bird".into(),
            x: 10,
            y: 10,
            z: 10,
            status: 2,
            pn: 3,
            class: 4,
            ..ShipRecord::default()
        }],
    );

    RawGalaxy {
        galaxy: GalaxyRecord {
            designed_species: 4,
            num_species: 2,
            radius: 40,
            turn_number: 12,
        },
        stars: vec![first, second, third],
        planets,
        species: vec![humans, klingons],
    }
}

use crate::reader::{Fields, Record, RecordWriter};
use crate::species_bits::SpeciesBits;

/// Number of item slots carried by colonies and ships.
pub const MAX_ITEMS: usize = 38;

/// Number of technology tracks a species advances.
pub const NUM_TECH_LEVELS: usize = 6;

/// `galaxy.dat`: global counters for the current turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalaxyRecord {
    /// Number of species the galaxy was designed for.
    pub designed_species: i32,
    /// Number of species actually allocated (one `spNN.dat` per species).
    pub num_species: i32,
    /// Galactic radius in parsecs.
    pub radius: i32,
    pub turn_number: i32,
}

impl Record for GalaxyRecord {
    const NAME: &'static str = "galaxy";
    const SIZE: usize = 16;

    fn decode(fields: &mut Fields<'_>) -> Self {
        Self {
            designed_species: fields.i32(),
            num_species: fields.i32(),
            radius: fields.i32(),
            turn_number: fields.i32(),
        }
    }

    fn encode(&self, out: &mut RecordWriter) {
        out.put_i32(self.designed_species);
        out.put_i32(self.num_species);
        out.put_i32(self.radius);
        out.put_i32(self.turn_number);
    }
}

/// One entry of `stars.dat`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarRecord {
    pub x: i8,
    pub y: i8,
    pub z: i8,
    /// Dwarf, degenerate, main sequence or giant.
    pub star_type: i8,
    pub color: i8,
    /// 0 through 9.
    pub size: i8,
    pub num_planets: i8,
    /// Good potential home system.
    pub home_system: bool,
    pub worm_here: bool,
    /// Wormhole exit; meaningful only when `worm_here` is set.
    pub worm_x: i8,
    pub worm_y: i8,
    pub worm_z: i8,
    /// Zero-based index into `planets.dat` of the first planet.
    pub planet_index: i16,
    pub message: i32,
    pub visited_by: SpeciesBits,
}

impl Record for StarRecord {
    const NAME: &'static str = "star";
    const SIZE: usize = 52;

    fn decode(fields: &mut Fields<'_>) -> Self {
        let x = fields.i8();
        let y = fields.i8();
        let z = fields.i8();
        let star_type = fields.i8();
        let color = fields.i8();
        let size = fields.i8();
        let num_planets = fields.i8();
        let home_system = fields.flag();
        let worm_here = fields.flag();
        let worm_x = fields.i8();
        let worm_y = fields.i8();
        let worm_z = fields.i8();
        fields.skip(4);
        let planet_index = fields.i16();
        let message = fields.i32();
        let visited_by = SpeciesBits::from_words(fields.u64_pair());
        fields.skip(12 + 2);
        Self {
            x,
            y,
            z,
            star_type,
            color,
            size,
            num_planets,
            home_system,
            worm_here,
            worm_x,
            worm_y,
            worm_z,
            planet_index,
            message,
            visited_by,
        }
    }

    fn encode(&self, out: &mut RecordWriter) {
        out.put_i8_slice(&[
            self.x,
            self.y,
            self.z,
            self.star_type,
            self.color,
            self.size,
            self.num_planets,
        ]);
        out.put_bool(self.home_system);
        out.put_bool(self.worm_here);
        out.put_i8_slice(&[self.worm_x, self.worm_y, self.worm_z]);
        out.zeros(4);
        out.put_i16(self.planet_index);
        out.put_i32(self.message);
        let [lo, hi] = self.visited_by.words();
        out.put_u64(lo);
        out.put_u64(hi);
        out.zeros(12 + 2);
    }
}

/// One entry of `planets.dat`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanetRecord {
    /// 1 through 30.
    pub temperature_class: i8,
    /// 0 through 29.
    pub pressure_class: i8,
    /// 0 none, 1 ideal home planet, 2 ideal colony planet, 3 radioactive hellhole.
    pub special: i8,
    /// Gas codes; zero when the slot is empty.
    pub gas: [i8; 4],
    pub gas_percent: [i8; 4],
    /// Thousands of kilometres.
    pub diameter: i16,
    /// Earth gravity times 100.
    pub gravity: i16,
    /// Times 100.
    pub mining_difficulty: i16,
    /// Always 100 for a home planet.
    pub econ_efficiency: i16,
    pub md_increase: i16,
    pub message: i32,
}

impl Record for PlanetRecord {
    const NAME: &'static str = "planet";
    const SIZE: usize = 40;

    fn decode(fields: &mut Fields<'_>) -> Self {
        let temperature_class = fields.i8();
        let pressure_class = fields.i8();
        let special = fields.i8();
        fields.skip(1);
        let gas = fields.i8_array::<4>();
        let gas_percent = fields.i8_array::<4>();
        fields.skip(2);
        let diameter = fields.i16();
        let gravity = fields.i16();
        let mining_difficulty = fields.i16();
        let econ_efficiency = fields.i16();
        let md_increase = fields.i16();
        let message = fields.i32();
        fields.skip(12);
        Self {
            temperature_class,
            pressure_class,
            special,
            gas,
            gas_percent,
            diameter,
            gravity,
            mining_difficulty,
            econ_efficiency,
            md_increase,
            message,
        }
    }

    fn encode(&self, out: &mut RecordWriter) {
        out.put_i8(self.temperature_class);
        out.put_i8(self.pressure_class);
        out.put_i8(self.special);
        out.zeros(1);
        out.put_i8_slice(&self.gas);
        out.put_i8_slice(&self.gas_percent);
        out.zeros(2);
        out.put_i16(self.diameter);
        out.put_i16(self.gravity);
        out.put_i16(self.mining_difficulty);
        out.put_i16(self.econ_efficiency);
        out.put_i16(self.md_increase);
        out.put_i32(self.message);
        out.zeros(12);
    }
}

/// Header of a `spNN.dat` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesRecord {
    pub name: String,
    pub govt_name: String,
    pub govt_type: String,
    /// Home planet coordinates and orbit.
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub pn: u8,
    pub required_gas: u8,
    pub required_gas_min: u8,
    pub required_gas_max: u8,
    pub neutral_gas: [u8; 6],
    pub poison_gas: [u8; 6],
    /// AUTO command was issued.
    pub auto_orders: bool,
    pub tech_level: [i16; NUM_TECH_LEVELS],
    /// Tech levels at the start of the turn.
    pub init_tech_level: [i16; NUM_TECH_LEVELS],
    /// Unapplied tech level knowledge.
    pub tech_knowledge: [i16; NUM_TECH_LEVELS],
    pub num_namplas: i32,
    pub num_ships: i32,
    pub tech_eps: [i32; NUM_TECH_LEVELS],
    /// Economic base before the home planet was bombed; zero once recovered.
    pub hp_original_base: i32,
    pub econ_units: i32,
    pub fleet_cost: i32,
    /// Percentage times 100.
    pub fleet_percent_cost: i32,
    pub contact: SpeciesBits,
    pub ally: SpeciesBits,
    pub enemy: SpeciesBits,
}

impl Record for SpeciesRecord {
    const NAME: &'static str = "species";
    const SIZE: usize = 264;

    fn decode(fields: &mut Fields<'_>) -> Self {
        let name = fields.name();
        let govt_name = fields.name();
        let govt_type = fields.name();
        let x = fields.u8();
        let y = fields.u8();
        let z = fields.u8();
        let pn = fields.u8();
        let required_gas = fields.u8();
        let required_gas_min = fields.u8();
        let required_gas_max = fields.u8();
        fields.skip(1);
        let neutral_gas = fields.u8_array::<6>();
        let poison_gas = fields.u8_array::<6>();
        let auto_orders = fields.flag();
        fields.skip(1 + 2);
        let tech_level = fields.i16_array::<NUM_TECH_LEVELS>();
        let init_tech_level = fields.i16_array::<NUM_TECH_LEVELS>();
        let tech_knowledge = fields.i16_array::<NUM_TECH_LEVELS>();
        let num_namplas = fields.i32();
        let num_ships = fields.i32();
        let tech_eps = fields.i32_array::<NUM_TECH_LEVELS>();
        let hp_original_base = fields.i32();
        let econ_units = fields.i32();
        let fleet_cost = fields.i32();
        let fleet_percent_cost = fields.i32();
        let contact = SpeciesBits::from_words(fields.u64_pair());
        let ally = SpeciesBits::from_words(fields.u64_pair());
        let enemy = SpeciesBits::from_words(fields.u64_pair());
        fields.skip(12);
        Self {
            name,
            govt_name,
            govt_type,
            x,
            y,
            z,
            pn,
            required_gas,
            required_gas_min,
            required_gas_max,
            neutral_gas,
            poison_gas,
            auto_orders,
            tech_level,
            init_tech_level,
            tech_knowledge,
            num_namplas,
            num_ships,
            tech_eps,
            hp_original_base,
            econ_units,
            fleet_cost,
            fleet_percent_cost,
            contact,
            ally,
            enemy,
        }
    }

    fn encode(&self, out: &mut RecordWriter) {
        out.put_name(&self.name);
        out.put_name(&self.govt_name);
        out.put_name(&self.govt_type);
        out.put_u8_slice(&[
            self.x,
            self.y,
            self.z,
            self.pn,
            self.required_gas,
            self.required_gas_min,
            self.required_gas_max,
        ]);
        out.zeros(1);
        out.put_u8_slice(&self.neutral_gas);
        out.put_u8_slice(&self.poison_gas);
        out.put_bool(self.auto_orders);
        out.zeros(1 + 2);
        out.put_i16_slice(&self.tech_level);
        out.put_i16_slice(&self.init_tech_level);
        out.put_i16_slice(&self.tech_knowledge);
        out.put_i32(self.num_namplas);
        out.put_i32(self.num_ships);
        out.put_i32_slice(&self.tech_eps);
        out.put_i32(self.hp_original_base);
        out.put_i32(self.econ_units);
        out.put_i32(self.fleet_cost);
        out.put_i32(self.fleet_percent_cost);
        for bits in [self.contact, self.ally, self.enemy] {
            let [lo, hi] = bits.words();
            out.put_u64(lo);
            out.put_u64(hi);
        }
        out.zeros(12);
    }
}

/// A named planet: the on-disk form of a colony.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamplaRecord {
    pub name: String,
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub pn: u8,
    /// Status bits, logically ORed together.
    pub status: u8,
    /// HIDE order given.
    pub hiding: bool,
    pub hidden: bool,
    /// Zero-based index into `planets.dat`.
    pub planet_index: i16,
    /// Percentage between 0 and 99.
    pub siege_eff: i16,
    pub shipyards: i16,
    pub ius_needed: i32,
    pub aus_needed: i32,
    pub auto_ius: i32,
    pub auto_aus: i32,
    pub ius_to_install: i32,
    pub aus_to_install: i32,
    /// Mining base times 10.
    pub mi_base: i32,
    /// Manufacturing base times 10.
    pub ma_base: i32,
    pub pop_units: i32,
    pub item_quantity: [i32; MAX_ITEMS],
    pub use_on_ambush: i32,
    pub message: i32,
    pub special: i32,
}

impl Default for NamplaRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            x: 0,
            y: 0,
            z: 0,
            pn: 0,
            status: 0,
            hiding: false,
            hidden: false,
            planet_index: 0,
            siege_eff: 0,
            shipyards: 0,
            ius_needed: 0,
            aus_needed: 0,
            auto_ius: 0,
            auto_aus: 0,
            ius_to_install: 0,
            aus_to_install: 0,
            mi_base: 0,
            ma_base: 0,
            pop_units: 0,
            item_quantity: [0; MAX_ITEMS],
            use_on_ambush: 0,
            message: 0,
            special: 0,
        }
    }
}

impl Record for NamplaRecord {
    const NAME: &'static str = "named planet";
    const SIZE: usize = 288;

    fn decode(fields: &mut Fields<'_>) -> Self {
        let name = fields.name();
        let x = fields.u8();
        let y = fields.u8();
        let z = fields.u8();
        let pn = fields.u8();
        let status = fields.u8();
        fields.skip(1);
        let hiding = fields.flag();
        let hidden = fields.flag();
        fields.skip(2);
        let planet_index = fields.i16();
        let siege_eff = fields.i16();
        let shipyards = fields.i16();
        fields.skip(4);
        let ius_needed = fields.i32();
        let aus_needed = fields.i32();
        let auto_ius = fields.i32();
        let auto_aus = fields.i32();
        fields.skip(4);
        let ius_to_install = fields.i32();
        let aus_to_install = fields.i32();
        let mi_base = fields.i32();
        let ma_base = fields.i32();
        let pop_units = fields.i32();
        let item_quantity = fields.i32_array::<MAX_ITEMS>();
        fields.skip(4);
        let use_on_ambush = fields.i32();
        let message = fields.i32();
        let special = fields.i32();
        fields.skip(28);
        Self {
            name,
            x,
            y,
            z,
            pn,
            status,
            hiding,
            hidden,
            planet_index,
            siege_eff,
            shipyards,
            ius_needed,
            aus_needed,
            auto_ius,
            auto_aus,
            ius_to_install,
            aus_to_install,
            mi_base,
            ma_base,
            pop_units,
            item_quantity,
            use_on_ambush,
            message,
            special,
        }
    }

    fn encode(&self, out: &mut RecordWriter) {
        out.put_name(&self.name);
        out.put_u8_slice(&[self.x, self.y, self.z, self.pn, self.status]);
        out.zeros(1);
        out.put_bool(self.hiding);
        out.put_bool(self.hidden);
        out.zeros(2);
        out.put_i16(self.planet_index);
        out.put_i16(self.siege_eff);
        out.put_i16(self.shipyards);
        out.zeros(4);
        out.put_i32_slice(&[
            self.ius_needed,
            self.aus_needed,
            self.auto_ius,
            self.auto_aus,
        ]);
        out.zeros(4);
        out.put_i32_slice(&[
            self.ius_to_install,
            self.aus_to_install,
            self.mi_base,
            self.ma_base,
            self.pop_units,
        ]);
        out.put_i32_slice(&self.item_quantity);
        out.zeros(4);
        out.put_i32(self.use_on_ambush);
        out.put_i32(self.message);
        out.put_i32(self.special);
        out.zeros(28);
    }
}

/// One ship owned by a species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipRecord {
    pub name: String,
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub pn: u8,
    pub status: u8,
    /// 0 FTL, 1 sub-light, 2 starbase.
    pub ship_type: u8,
    /// Destination after a forced jump from combat; also used by TELESCOPE.
    pub dest_x: u8,
    pub dest_y: u8,
    pub dest_z: u8,
    pub just_jumped: bool,
    /// Arrived via wormhole in the previous turn.
    pub arrived_via_wormhole: bool,
    pub class: i16,
    /// Tonnage divided by 10,000.
    pub tonnage: i16,
    pub item_quantity: [i16; MAX_ITEMS],
    pub age: i16,
    /// Cost to complete a ship still under construction.
    pub remaining_cost: i16,
    /// Nampla index where CUs were last loaded; 0 none, 9999 home planet.
    pub loading_point: i16,
    /// Nampla index where the ship will unload; 0 none, 9999 home planet.
    pub unloading_point: i16,
    pub special: i32,
}

impl Default for ShipRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            x: 0,
            y: 0,
            z: 0,
            pn: 0,
            status: 0,
            ship_type: 0,
            dest_x: 0,
            dest_y: 0,
            dest_z: 0,
            just_jumped: false,
            arrived_via_wormhole: false,
            class: 0,
            tonnage: 0,
            item_quantity: [0; MAX_ITEMS],
            age: 0,
            remaining_cost: 0,
            loading_point: 0,
            unloading_point: 0,
            special: 0,
        }
    }
}

impl Record for ShipRecord {
    const NAME: &'static str = "ship";
    const SIZE: usize = 172;

    fn decode(fields: &mut Fields<'_>) -> Self {
        let name = fields.name();
        let x = fields.u8();
        let y = fields.u8();
        let z = fields.u8();
        let pn = fields.u8();
        let status = fields.u8();
        let ship_type = fields.u8();
        let dest_x = fields.u8();
        let dest_y = fields.u8();
        let dest_z = fields.u8();
        let just_jumped = fields.flag();
        let arrived_via_wormhole = fields.flag();
        fields.skip(1 + 2 + 2);
        let class = fields.i16();
        let tonnage = fields.i16();
        let item_quantity = fields.i16_array::<MAX_ITEMS>();
        let age = fields.i16();
        let remaining_cost = fields.i16();
        fields.skip(2);
        let loading_point = fields.i16();
        let unloading_point = fields.i16();
        let special = fields.i32();
        fields.skip(28 + 2);
        Self {
            name,
            x,
            y,
            z,
            pn,
            status,
            ship_type,
            dest_x,
            dest_y,
            dest_z,
            just_jumped,
            arrived_via_wormhole,
            class,
            tonnage,
            item_quantity,
            age,
            remaining_cost,
            loading_point,
            unloading_point,
            special,
        }
    }

    fn encode(&self, out: &mut RecordWriter) {
        out.put_name(&self.name);
        out.put_u8_slice(&[
            self.x,
            self.y,
            self.z,
            self.pn,
            self.status,
            self.ship_type,
            self.dest_x,
            self.dest_y,
            self.dest_z,
        ]);
        out.put_bool(self.just_jumped);
        out.put_bool(self.arrived_via_wormhole);
        out.zeros(1 + 2 + 2);
        out.put_i16(self.class);
        out.put_i16(self.tonnage);
        out.put_i16_slice(&self.item_quantity);
        out.put_i16(self.age);
        out.put_i16(self.remaining_cost);
        out.zeros(2);
        out.put_i16(self.loading_point);
        out.put_i16(self.unloading_point);
        out.put_i32(self.special);
        out.zeros(28 + 2);
    }
}

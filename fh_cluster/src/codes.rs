//! Fixed numeric code tables used by the data files.
//!
//! Every table is a closed enum with an `Unknown(code)` variant. Unknown codes
//! never fail a load; they report an empty symbol and name instead.

use std::fmt;

use serde::Serialize;

macro_rules! code_table {
    (
        $(#[$meta:meta])*
        pub enum $table:ident {
            $($variant:ident = $code:literal => ($symbol:literal, $name:literal),)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $table {
            $($variant,)+
            Unknown(i32),
        }

        impl $table {
            pub fn from_code(code: i32) -> Self {
                match code {
                    $($code => $table::$variant,)+
                    other => $table::Unknown(other),
                }
            }

            pub fn code(&self) -> i32 {
                match self {
                    $($table::$variant => $code,)+
                    $table::Unknown(code) => *code,
                }
            }

            /// Short report symbol; empty for unknown codes.
            pub fn symbol(&self) -> &'static str {
                match self {
                    $($table::$variant => $symbol,)+
                    $table::Unknown(_) => "",
                }
            }

            /// Long name; empty for unknown codes.
            pub fn name(&self) -> &'static str {
                match self {
                    $($table::$variant => $name,)+
                    $table::Unknown(_) => "",
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $table::Unknown(_))
            }
        }

        impl fmt::Display for $table {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.symbol())
            }
        }
    };
}

code_table! {
    /// Atmospheric gases.
    pub enum Gas {
        Hydrogen = 1 => ("H2", "Hydrogen"),
        Methane = 2 => ("CH4", "Methane"),
        Helium = 3 => ("He", "Helium"),
        Ammonia = 4 => ("NH3", "Ammonia"),
        Nitrogen = 5 => ("N2", "Nitrogen"),
        CarbonDioxide = 6 => ("CO2", "Carbon Dioxide"),
        Oxygen = 7 => ("O2", "Oxygen"),
        HydrogenChloride = 8 => ("HCl", "Hydrogen Chloride"),
        Chlorine = 9 => ("Cl2", "Chlorine"),
        Fluorine = 10 => ("F2", "Fluorine"),
        Steam = 11 => ("H2O", "Steam"),
        SulfurDioxide = 12 => ("SO2", "Sulfur Dioxide"),
        HydrogenSulfide = 13 => ("H2S", "Hydrogen Sulfide"),
    }
}

code_table! {
    /// Items held in colony and ship inventories; the code is the slot index.
    pub enum ItemKind {
        RawMaterial = 0 => ("RM", "Raw Material Unit"),
        PlanetaryDefense = 1 => ("PD", "Planetary Defense Unit"),
        StarbaseUnit = 2 => ("SU", "Starbase Unit"),
        DamageRepair = 3 => ("DR", "Damage Repair Unit"),
        Colonist = 4 => ("CU", "Colonist Unit"),
        ColonialMining = 5 => ("IU", "Colonial Mining Unit"),
        ColonialManufacturing = 6 => ("AU", "Colonial Manufacturing Unit"),
        FailSafeJump = 7 => ("FS", "Fail-Safe Jump Unit"),
        JumpPortal = 8 => ("JP", "Jump Portal Unit"),
        ForcedMisjump = 9 => ("FM", "Forced Misjump Unit"),
        ForcedJump = 10 => ("FJ", "Forced Jump Unit"),
        GraviticTelescope = 11 => ("GT", "Gravitic Telescope Unit"),
        FieldDistortion = 12 => ("FD", "Field Distortion Unit"),
        TerraformingPlant = 13 => ("TP", "Terraforming Plant"),
        GermWarfareBomb = 14 => ("GW", "Germ Warfare Bomb"),
        ShieldGenerator1 = 15 => ("SG1", "Mark-1 Shield Generator"),
        ShieldGenerator2 = 16 => ("SG2", "Mark-2 Shield Generator"),
        ShieldGenerator3 = 17 => ("SG3", "Mark-3 Shield Generator"),
        ShieldGenerator4 = 18 => ("SG4", "Mark-4 Shield Generator"),
        ShieldGenerator5 = 19 => ("SG5", "Mark-5 Shield Generator"),
        ShieldGenerator6 = 20 => ("SG6", "Mark-6 Shield Generator"),
        ShieldGenerator7 = 21 => ("SG7", "Mark-7 Shield Generator"),
        ShieldGenerator8 = 22 => ("SG8", "Mark-8 Shield Generator"),
        ShieldGenerator9 = 23 => ("SG9", "Mark-9 Shield Generator"),
        GunUnit1 = 24 => ("GU1", "Mark-1 Gun Unit"),
        GunUnit2 = 25 => ("GU2", "Mark-2 Gun Unit"),
        GunUnit3 = 26 => ("GU3", "Mark-3 Gun Unit"),
        GunUnit4 = 27 => ("GU4", "Mark-4 Gun Unit"),
        GunUnit5 = 28 => ("GU5", "Mark-5 Gun Unit"),
        GunUnit6 = 29 => ("GU6", "Mark-6 Gun Unit"),
        GunUnit7 = 30 => ("GU7", "Mark-7 Gun Unit"),
        GunUnit8 = 31 => ("GU8", "Mark-8 Gun Unit"),
        GunUnit9 = 32 => ("GU9", "Mark-9 Gun Unit"),
        X1 = 33 => ("X1", "X1 Unit"),
        X2 = 34 => ("X2", "X2 Unit"),
        X3 = 35 => ("X3", "X3 Unit"),
        X4 = 36 => ("X4", "X4 Unit"),
        X5 = 37 => ("X5", "X5 Unit"),
    }
}

code_table! {
    /// Ship classes; fixed-size warships first, then starbases and transports.
    pub enum ShipClass {
        Picketboat = 0 => ("PB", "Picketboat"),
        Corvette = 1 => ("CT", "Corvette"),
        Escort = 2 => ("ES", "Escort"),
        Frigate = 3 => ("FF", "Frigate"),
        Destroyer = 4 => ("DD", "Destroyer"),
        LightCruiser = 5 => ("CL", "Light Cruiser"),
        StrikeCruiser = 6 => ("CS", "Strike Cruiser"),
        HeavyCruiser = 7 => ("CA", "Heavy Cruiser"),
        CommandCruiser = 8 => ("CC", "Command Cruiser"),
        Battlecruiser = 9 => ("BC", "Battlecruiser"),
        Battleship = 10 => ("BS", "Battleship"),
        Dreadnought = 11 => ("DN", "Dreadnought"),
        SuperDreadnought = 12 => ("SD", "Super Dreadnought"),
        Battlemoon = 13 => ("BM", "Battlemoon"),
        Battleworld = 14 => ("BW", "Battleworld"),
        Battlestar = 15 => ("BR", "Battlestar"),
        Starbase = 16 => ("BA", "Starbase"),
        Transport = 17 => ("TR", "Transport"),
    }
}

code_table! {
    pub enum StarColor {
        Blue = 1 => ("O", "Blue"),
        BlueWhite = 2 => ("B", "Blue-White"),
        White = 3 => ("A", "White"),
        YellowWhite = 4 => ("F", "Yellow-White"),
        Yellow = 5 => ("G", "Yellow"),
        Orange = 6 => ("K", "Orange"),
        Red = 7 => ("M", "Red"),
    }
}

code_table! {
    pub enum StarType {
        Dwarf = 1 => ("d", "Dwarf"),
        Degenerate = 2 => ("D", "Degenerate"),
        MainSequence = 3 => (" ", "Main Sequence"),
        Giant = 4 => ("G", "Giant"),
    }
}

impl Default for Gas {
    fn default() -> Self {
        Gas::Unknown(0)
    }
}

impl Default for StarColor {
    fn default() -> Self {
        StarColor::Unknown(0)
    }
}

impl Default for StarType {
    fn default() -> Self {
        StarType::Unknown(0)
    }
}

/// Size multiplier of the fixed-size classes, in units of 10,000 tons.
const WARSHIP_UNITS: [i32; 16] = [1, 2, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55, 60, 65, 70];

impl ShipClass {
    fn warship_units(&self) -> Option<i32> {
        usize::try_from(self.code())
            .ok()
            .and_then(|code| WARSHIP_UNITS.get(code))
            .copied()
    }

    /// Tonnage in tons. `raw_tonnage` is the on-disk value (tons / 10,000),
    /// used only by starbases and transports.
    pub fn tonnage(&self, raw_tonnage: i32) -> i32 {
        match self {
            ShipClass::Starbase | ShipClass::Transport => 10_000 * raw_tonnage,
            _ => self.warship_units().map_or(0, |units| 10_000 * units),
        }
    }

    pub fn cargo_capacity(&self, raw_tonnage: i32) -> i32 {
        match self {
            ShipClass::Starbase => raw_tonnage,
            ShipClass::Transport => (10 + raw_tonnage / 2) * raw_tonnage,
            _ => self.warship_units().unwrap_or(0),
        }
    }

    /// Original cost to build the ship.
    pub fn cost(&self, raw_tonnage: i32) -> i32 {
        match self {
            ShipClass::Starbase | ShipClass::Transport => 100 * raw_tonnage,
            _ => self.warship_units().map_or(0, |units| 100 * units),
        }
    }

    /// Size class; only meaningful for transports.
    pub fn size(&self, raw_tonnage: i32) -> i32 {
        match self {
            ShipClass::Transport => raw_tonnage,
            _ => 0,
        }
    }
}

/// Current status of a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShipStatus {
    UnderConstruction,
    OnSurface,
    InOrbit,
    InDeepSpace,
    JumpedInCombat,
    ForcedJump,
    Unknown(u8),
}

impl ShipStatus {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => ShipStatus::UnderConstruction,
            1 => ShipStatus::OnSurface,
            2 => ShipStatus::InOrbit,
            3 => ShipStatus::InDeepSpace,
            4 => ShipStatus::JumpedInCombat,
            5 => ShipStatus::ForcedJump,
            other => ShipStatus::Unknown(other),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShipStatus::UnderConstruction => "Under Construction",
            ShipStatus::OnSurface => "On Surface",
            ShipStatus::InOrbit => "In Orbit",
            ShipStatus::InDeepSpace => "In Deep Space",
            ShipStatus::JumpedInCombat => "Jumped In Combat",
            ShipStatus::ForcedJump => "Forced Jump",
            ShipStatus::Unknown(_) => "",
        }
    }
}

/// Special designation of a planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum PlanetSpecial {
    #[default]
    None,
    IdealHomePlanet,
    IdealColonyPlanet,
    RadioactiveHellHole,
    Unknown(i8),
}

impl PlanetSpecial {
    pub fn from_code(code: i8) -> Self {
        match code {
            0 => PlanetSpecial::None,
            1 => PlanetSpecial::IdealHomePlanet,
            2 => PlanetSpecial::IdealColonyPlanet,
            3 => PlanetSpecial::RadioactiveHellHole,
            other => PlanetSpecial::Unknown(other),
        }
    }
}

/// The six technology tracks, in on-disk order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TechKind {
    Mining,
    Manufacturing,
    Military,
    Gravitics,
    LifeSupport,
    Biology,
}

impl TechKind {
    pub const ALL: [TechKind; 6] = [
        TechKind::Mining,
        TechKind::Manufacturing,
        TechKind::Military,
        TechKind::Gravitics,
        TechKind::LifeSupport,
        TechKind::Biology,
    ];

    /// Position of the track in the species record arrays.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TechKind::Mining => "MI",
            TechKind::Manufacturing => "MA",
            TechKind::Military => "ML",
            TechKind::Gravitics => "GV",
            TechKind::LifeSupport => "LS",
            TechKind::Biology => "BI",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TechKind::Mining => "Mining",
            TechKind::Manufacturing => "Manufacturing",
            TechKind::Military => "Military",
            TechKind::Gravitics => "Gravitics",
            TechKind::LifeSupport => "Life Support",
            TechKind::Biology => "Biology",
        }
    }
}

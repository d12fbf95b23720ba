//! Resolve-by-coordinates lookups used while linking.
//!
//! The data files correlate entities only through coordinates and orbit
//! numbers. Every lookup here is a first-match linear scan; swapping in a
//! keyed index must keep the first-match result.

use crate::model::{Coords, Planet, PlanetId, System, SystemId};

/// First system located at `coords`.
pub fn system_at(systems: &[System], coords: Coords) -> Option<SystemId> {
    systems
        .iter()
        .find(|system| system.coords == coords)
        .map(|system| system.id)
}

/// First planet at `coords` in orbit `orbit`.
pub fn planet_at(planets: &[Planet], coords: Coords, orbit: u32) -> Option<PlanetId> {
    planets
        .iter()
        .find(|planet| planet.orbit == orbit && planet.coords == coords)
        .map(|planet| planet.id)
}

/// Planet in orbit `orbit` of `system`; orbit zero or past the last planet
/// gives `None`.
pub fn planet_in_orbit(system: &System, orbit: u32) -> Option<PlanetId> {
    let slot = usize::try_from(orbit).ok()?.checked_sub(1)?;
    system.planets.get(slot).copied()
}

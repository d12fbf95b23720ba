//! Life support need: how hostile a planet is to a species.

use crate::model::{AtmosphericGas, Cluster, GasTolerance, Planet};

/// Cost of each class of temperature or pressure difference, of a missing
/// required gas and of each poison gas present.
const STEP: i32 = 3;

/// Temperature and pressure classes of the species' home planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeClimate {
    pub temperature_class: i32,
    pub pressure_class: i32,
}

impl HomeClimate {
    pub fn of(planet: &Planet) -> Self {
        Self {
            temperature_class: planet.temperature_class,
            pressure_class: planet.pressure_class,
        }
    }
}

/// Life support need of `planet` for a species with the given home climate
/// and gas tolerances.
pub fn life_support_need(planet: &Planet, home: HomeClimate, gases: &GasTolerance) -> i32 {
    let mut need = STEP;
    need += STEP * (planet.temperature_class - home.temperature_class).abs();
    need += STEP * (planet.pressure_class - home.pressure_class).abs();
    for &AtmosphericGas { gas, pct } in &planet.atmosphere {
        if pct == 0 {
            continue;
        }
        if gas == gases.required.gas && gases.required.accepts(pct) {
            need -= STEP;
        } else if gases.is_poisoned_by(gas) {
            need += STEP;
        }
    }
    need
}

/// Fills every planet's per-species need vector and copies each colony's
/// entry from its planet.
///
/// Species whose home planet was not resolved get `None` everywhere.
pub fn apply(cluster: &mut Cluster) {
    let homes: Vec<Option<HomeClimate>> = cluster
        .species
        .iter()
        .map(|species| {
            species
                .home_planet
                .and_then(|id| cluster.planets.get(id.index()))
                .map(HomeClimate::of)
        })
        .collect();

    for planet in &mut cluster.planets {
        planet.lsn = cluster
            .species
            .iter()
            .zip(&homes)
            .map(|(species, home)| home.map(|home| life_support_need(planet, home, &species.gases)))
            .collect();
    }

    for species in &mut cluster.species {
        let slot = species.id.index();
        for colony in &mut species.colonies {
            colony.lsn = colony
                .planet
                .and_then(|id| cluster.planets.get(id.index()))
                .and_then(|planet| planet.lsn.get(slot).copied().flatten());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::Gas;
    use crate::model::RequiredGas;

    fn oxygen_breather() -> GasTolerance {
        GasTolerance {
            required: RequiredGas {
                gas: Gas::Oxygen,
                min_pct: 10,
                max_pct: 30,
            },
            neutral: vec![Gas::Nitrogen],
            poison: vec![Gas::Chlorine, Gas::Fluorine],
        }
    }

    fn planet(temperature_class: i32, pressure_class: i32, atmosphere: &[(Gas, i32)]) -> Planet {
        Planet {
            temperature_class,
            pressure_class,
            atmosphere: atmosphere
                .iter()
                .map(|&(gas, pct)| AtmosphericGas { gas, pct })
                .collect(),
            ..Planet::default()
        }
    }

    const HOME: HomeClimate = HomeClimate {
        temperature_class: 12,
        pressure_class: 8,
    };

    #[test]
    fn home_twin_needs_nothing() {
        let twin = planet(12, 8, &[(Gas::Nitrogen, 80), (Gas::Oxygen, 20)]);
        assert_eq!(life_support_need(&twin, HOME, &oxygen_breather()), 0);
    }

    #[test]
    fn differences_absent_gas_and_poison_add_up() {
        let hostile = planet(14, 9, &[(Gas::Nitrogen, 60), (Gas::Chlorine, 40)]);
        assert_eq!(
            life_support_need(&hostile, HOME, &oxygen_breather()),
            3 + 6 + 3 + 3
        );
    }

    #[test]
    fn need_is_symmetric_in_the_sign_of_the_difference() {
        let gases = oxygen_breather();
        for dt in 0..=10 {
            for dp in 0..=10 {
                let warmer = planet(HOME.temperature_class + dt, HOME.pressure_class + dp, &[]);
                let colder = planet(HOME.temperature_class - dt, HOME.pressure_class - dp, &[]);
                assert_eq!(
                    life_support_need(&warmer, HOME, &gases),
                    life_support_need(&colder, HOME, &gases),
                    "dt={dt} dp={dp}"
                );
            }
        }
    }

    #[test]
    fn required_gas_outside_window_does_not_help() {
        let thin = planet(12, 8, &[(Gas::Oxygen, 5)]);
        let rich = planet(12, 8, &[(Gas::Oxygen, 31)]);
        let edge = planet(12, 8, &[(Gas::Oxygen, 30)]);
        let gases = oxygen_breather();
        assert_eq!(life_support_need(&thin, HOME, &gases), 3);
        assert_eq!(life_support_need(&rich, HOME, &gases), 3);
        assert_eq!(life_support_need(&edge, HOME, &gases), 0);
    }

    #[test]
    fn every_poison_counts_and_zero_percent_is_ignored() {
        let gases = oxygen_breather();
        let toxic = planet(12, 8, &[(Gas::Chlorine, 10), (Gas::Fluorine, 10)]);
        assert_eq!(life_support_need(&toxic, HOME, &gases), 9);
        let trace = planet(12, 8, &[(Gas::Chlorine, 0)]);
        assert_eq!(life_support_need(&trace, HOME, &gases), 3);
    }
}

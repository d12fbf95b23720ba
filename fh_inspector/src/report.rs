use std::fmt::Write as _;

use fh_cluster::{Cluster, ColonyId, ColonyRef, PlanetId, ShipId, ShipRef, SpeciesId, SystemId};
use serde::Serialize;

/// One entity to print, addressed by its 1-based ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    System(u32),
    Planet(u32),
    Species(u32),
    Colony { species: u32, colony: u32 },
    Ship { species: u32, ship: u32 },
}

#[derive(Debug, Serialize)]
pub struct SpeciesLine<'a> {
    pub id: SpeciesId,
    pub name: &'a str,
    pub colonies: usize,
    pub ships: usize,
    pub home_system: Option<SystemId>,
    pub systems_visited: usize,
    pub systems_scanned: usize,
}

/// Cluster-wide counts plus one line per species.
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub turn: i32,
    pub radius: i32,
    pub designed_species: i32,
    pub systems: usize,
    pub planets: usize,
    pub wormholes: usize,
    pub species: Vec<SpeciesLine<'a>>,
}

impl<'a> Summary<'a> {
    pub fn of(cluster: &'a Cluster) -> Self {
        Self {
            turn: cluster.turn(),
            radius: cluster.radius(),
            designed_species: cluster.designed_species(),
            systems: cluster.systems().len(),
            planets: cluster.planets().len(),
            wormholes: cluster
                .systems()
                .iter()
                .filter(|system| system.wormhole_exit.is_some())
                .count(),
            species: cluster
                .all_species()
                .iter()
                .map(|species| SpeciesLine {
                    id: species.id,
                    name: &species.name,
                    colonies: species.colonies.len(),
                    ships: species.ships.len(),
                    home_system: species.home_system,
                    systems_visited: species.systems_visited.len(),
                    systems_scanned: species.systems_scanned.len(),
                })
                .collect(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "turn {}  radius {}  designed species {}",
            self.turn, self.radius, self.designed_species
        );
        let _ = writeln!(
            out,
            "{} systems  {} planets  {} wormhole ends",
            self.systems, self.planets, self.wormholes
        );
        for line in &self.species {
            let home = line
                .home_system
                .map_or_else(|| "?".to_string(), |id| id.to_string());
            let _ = writeln!(
                out,
                "  sp{:02} {:<24} home {:>4}  colonies {:>3}  ships {:>4}  visited {:>4}  scanned {:>4}",
                line.id.0,
                line.name,
                home,
                line.colonies,
                line.ships,
                line.systems_visited,
                line.systems_scanned
            );
        }
        out
    }
}

/// Serialises the queried entity, or `None` when the id resolves to nothing.
pub fn entity_json(
    cluster: &Cluster,
    query: Query,
    pretty: bool,
) -> serde_json::Result<Option<String>> {
    fn encode<T: Serialize>(value: Option<&T>, pretty: bool) -> serde_json::Result<Option<String>> {
        value
            .map(|value| {
                if pretty {
                    serde_json::to_string_pretty(value)
                } else {
                    serde_json::to_string(value)
                }
            })
            .transpose()
    }

    match query {
        Query::System(id) => encode(cluster.system(SystemId(id)), pretty),
        Query::Planet(id) => encode(cluster.planet(PlanetId(id)), pretty),
        Query::Species(id) => encode(cluster.species(SpeciesId(id)), pretty),
        Query::Colony { species, colony } => encode(
            cluster.colony(ColonyRef {
                species: SpeciesId(species),
                colony: ColonyId(colony),
            }),
            pretty,
        ),
        Query::Ship { species, ship } => encode(
            cluster.ship(ShipRef {
                species: SpeciesId(species),
                ship: ShipId(ship),
            }),
            pretty,
        ),
    }
}

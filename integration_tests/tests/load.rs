mod common;

use anyhow::Result;
use fh_cluster::{
    load_cluster, load_with_config, LoadError, LoaderConfig, PlanetId, SpeciesId, StarColor,
    SystemId, TechKind,
};
use fh_schema::{ByteOrder, DecodeError};

#[test]
fn loads_both_byte_orders_identically() -> Result<()> {
    let raw = common::sample_galaxy();
    let little = common::galaxy_dir("little", &raw, ByteOrder::Little);
    let big = common::galaxy_dir("big", &raw, ByteOrder::Big);

    let from_little = load_cluster(little.path(), ByteOrder::Little)?;
    let from_big = load_cluster(big.path(), ByteOrder::Big)?;

    assert_eq!(
        serde_json::to_value(&from_little)?,
        serde_json::to_value(&from_big)?,
        "byte order must not change the linked model"
    );
    Ok(())
}

#[test]
fn header_and_species_fields_survive_the_load() -> Result<()> {
    let dir = common::galaxy_dir("fields", &common::sample_galaxy(), ByteOrder::Big);
    let cluster = load_cluster(dir.path(), ByteOrder::Big)?;

    assert_eq!(cluster.turn(), 12);
    assert_eq!(cluster.radius(), 40);
    assert_eq!(cluster.designed_species(), 4);
    assert_eq!(cluster.systems().len(), 3);
    assert_eq!(cluster.all_species().len(), 2);

    let second = cluster.system(SystemId(2)).expect("system 2");
    assert_eq!(second.color, StarColor::Red);
    assert!(second.is_home_system);

    let humans = cluster.species(SpeciesId(1)).expect("species 1");
    assert_eq!(humans.name, "Humans");
    assert_eq!(humans.govt_name, "Terran Union");
    assert_eq!(humans.govt_type, "Democracy");
    let biology = humans.tech(TechKind::Biology).expect("biology track");
    assert_eq!(biology.current_level, 15);
    assert_eq!(biology.kind.symbol(), "BI");
    assert_eq!(humans.fleet_maintenance_pct.to_string(), "1.25");
    assert_eq!(humans.gases.required.min_pct, 10);
    assert_eq!(humans.gases.neutral.len(), 2);

    let home = cluster.planet(PlanetId(2)).expect("planet 2");
    assert_eq!(home.gravity.to_string(), "1.00");
    assert_eq!(home.mining_difficulty_base.to_string(), "2.50");
    assert_eq!(home.atmosphere.len(), 2, "zero-percent slot skipped");
    Ok(())
}

#[test]
fn wrong_byte_order_fails_on_the_star_count() {
    let dir = common::galaxy_dir("swapped", &common::sample_galaxy(), ByteOrder::Little);
    match load_cluster(dir.path(), ByteOrder::Big) {
        Err(LoadError::Decode { path, source }) => {
            assert!(path.ends_with("stars.dat"), "got {}", path.display());
            assert!(matches!(source, DecodeError::Truncated { record: "star", .. }));
        }
        other => panic!("expected a decode error, got {other:?}"),
    }
}

#[test]
fn config_points_the_loader_at_a_directory() -> Result<()> {
    let dir = common::galaxy_dir("config", &common::sample_galaxy(), ByteOrder::Big);
    let config = LoaderConfig {
        data_path: dir.path().to_path_buf(),
        byte_order: ByteOrder::Big,
    };
    let cluster = load_with_config(&config)?;
    assert_eq!(cluster.planets().len(), 7);
    Ok(())
}

#[test]
fn cluster_serialises_ids_as_integers() -> Result<()> {
    let dir = common::galaxy_dir("json", &common::sample_galaxy(), ByteOrder::Little);
    let cluster = load_cluster(dir.path(), ByteOrder::Little)?;
    let json = serde_json::to_value(cluster.system(SystemId(1)).expect("system 1"))?;
    assert_eq!(json["id"], 1);
    assert_eq!(json["wormhole_exit"], 3);
    assert_eq!(json["planets"], serde_json::json!([1, 2, 3]));
    Ok(())
}

mod common;

use std::fs;

use fh_cluster::{load_cluster, LinkError, LoadError};
use fh_schema::{ByteOrder, DecodeError};

#[test]
fn overstated_counts_fail_with_the_species_file_path() {
    let mut raw = common::sample_galaxy();
    raw.species[0].header.num_ships += 1;
    let dir = common::galaxy_dir("overstated", &raw, ByteOrder::Little);

    match load_cluster(dir.path(), ByteOrder::Little) {
        Err(LoadError::Decode { path, source }) => {
            assert!(path.ends_with("sp01.dat"), "got {}", path.display());
            assert_eq!(
                source,
                DecodeError::Truncated {
                    record: "ship",
                    needed: 3 * 172,
                    remaining: 2 * 172
                }
            );
        }
        other => panic!("expected a decode error, got {other:?}"),
    }
}

#[test]
fn truncated_colony_run_fails() {
    let raw = common::sample_galaxy();
    let dir = common::galaxy_dir("short", &raw, ByteOrder::Big);
    let path = dir.path().join("sp02.dat");
    let bytes = fs::read(&path).expect("fixture exists");
    fs::write(&path, &bytes[..264 + 100]).expect("truncate fixture");

    let err = load_cluster(dir.path(), ByteOrder::Big).expect_err("colony record is cut short");
    assert!(
        matches!(
            &err,
            LoadError::Decode {
                source: DecodeError::Truncated {
                    record: "named planet",
                    ..
                },
                ..
            }
        ),
        "got {err:?}"
    );
}

#[test]
fn missing_species_file_is_a_read_error() {
    let raw = common::sample_galaxy();
    let dir = common::galaxy_dir("missing", &raw, ByteOrder::Little);
    fs::remove_file(dir.path().join("sp02.dat")).expect("remove fixture");

    match load_cluster(dir.path(), ByteOrder::Little) {
        Err(LoadError::Read { path, source }) => {
            assert!(path.ends_with("sp02.dat"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected a read error, got {other:?}"),
    }
}

#[test]
fn missing_directory_fails_on_the_galaxy_header() {
    let dir = common::ScratchDir::new("empty");
    let err = load_cluster(&dir.path().join("nowhere"), ByteOrder::Little)
        .expect_err("nothing to read");
    assert!(err.to_string().contains("galaxy.dat"), "got {err}");
}

#[test]
fn planet_file_shorter_than_the_stars_declare_is_a_link_error() {
    let mut raw = common::sample_galaxy();
    raw.planets.pop();
    let dir = common::galaxy_dir("few-planets", &raw, ByteOrder::Little);

    match load_cluster(dir.path(), ByteOrder::Little) {
        Err(LoadError::Link(LinkError::PlanetSlotOutOfRange { star, slot, planets })) => {
            assert_eq!((star, slot, planets), (2, 6, 6));
        }
        other => panic!("expected a link error, got {other:?}"),
    }
}

#[test]
fn trailing_bytes_are_tolerated() {
    let raw = common::sample_galaxy();
    let dir = common::galaxy_dir("trailing", &raw, ByteOrder::Little);
    let path = dir.path().join("planets.dat");
    let mut bytes = fs::read(&path).expect("fixture exists");
    bytes.extend_from_slice(&[0xEE; 7]);
    fs::write(&path, bytes).expect("extend fixture");

    let cluster = load_cluster(dir.path(), ByteOrder::Little).expect("loads anyway");
    assert_eq!(cluster.planets().len(), 7);
}

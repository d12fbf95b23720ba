use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fh_cluster::{build_cluster, RawGalaxy, SpeciesFile};
use fh_schema::{
    ByteOrder, GalaxyRecord, NamplaRecord, PlanetRecord, RecordReader, ShipRecord, SpeciesBits,
    SpeciesRecord, StarRecord,
};

const PLANETS_PER_STAR: i8 = 4;

/// Stars on a cube lattice, every species with a home colony plus colonies
/// and ships scattered over the other stars.
fn synthetic_galaxy(stars: usize, species: usize, colonies: usize, ships: usize) -> RawGalaxy {
    let coords = |n: usize| -> (u8, u8, u8) {
        let side = 20;
        ((n % side) as u8, (n / side % side) as u8, (n / (side * side)) as u8)
    };

    let star_records: Vec<StarRecord> = (0..stars)
        .map(|n| {
            let (x, y, z) = coords(n);
            let mut visited_by = SpeciesBits::default();
            visited_by.set((n % species) as u32 + 1);
            StarRecord {
                x: x as i8,
                y: y as i8,
                z: z as i8,
                star_type: 3,
                color: (n % 7) as i8 + 1,
                num_planets: PLANETS_PER_STAR,
                planet_index: (n * PLANETS_PER_STAR as usize) as i16,
                worm_here: n % 50 == 0,
                worm_x: x as i8,
                worm_y: y as i8,
                worm_z: z as i8 + 1,
                visited_by,
                ..StarRecord::default()
            }
        })
        .collect();

    let planets = (0..stars * PLANETS_PER_STAR as usize)
        .map(|n| PlanetRecord {
            temperature_class: (n % 30) as i8 + 1,
            pressure_class: (n % 29) as i8,
            gas: [5, 7, 9, 0],
            gas_percent: [70, 20, (n % 3) as i8, 0],
            ..PlanetRecord::default()
        })
        .collect();

    let species_files = (0..species)
        .map(|sp| {
            let (x, y, z) = coords(sp * 7 % stars);
            let namplas = (0..colonies)
                .map(|c| {
                    let (x, y, z) = coords((sp * 7 + c * 13) % stars);
                    NamplaRecord {
                        x,
                        y,
                        z,
                        pn: (c % PLANETS_PER_STAR as usize) as u8 + 1,
                        status: 2,
                        ..NamplaRecord::default()
                    }
                })
                .collect();
            let ships = (0..ships)
                .map(|s| {
                    let (x, y, z) = coords((sp * 11 + s * 17) % stars);
                    ShipRecord {
                        x,
                        y,
                        z,
                        pn: (s % 3) as u8,
                        class: (s % 18) as i16,
                        tonnage: 5,
                        ..ShipRecord::default()
                    }
                })
                .collect();
            SpeciesFile::new(
                SpeciesRecord {
                    name: format!("SP{sp:02}"),
                    x,
                    y,
                    z,
                    pn: 1,
                    required_gas: 7,
                    required_gas_min: 10,
                    required_gas_max: 30,
                    poison_gas: [9, 0, 0, 0, 0, 0],
                    ..SpeciesRecord::default()
                },
                namplas,
                ships,
            )
        })
        .collect::<Vec<_>>();

    RawGalaxy {
        galaxy: GalaxyRecord {
            designed_species: species as i32,
            num_species: species as i32,
            radius: 20,
            turn_number: 1,
        },
        stars: star_records,
        planets,
        species: species_files,
    }
}

fn bench_link(c: &mut Criterion) {
    let mut group = c.benchmark_group("link");
    for &(stars, species) in &[(100, 4), (400, 10), (1_000, 20)] {
        let raw = synthetic_galaxy(stars, species, 25, 60);
        group.bench_with_input(
            BenchmarkId::new("build_cluster", stars),
            &raw,
            |b, raw| {
                b.iter(|| build_cluster(raw).map(|cluster| cluster.planets().len()))
            },
        );
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let raw = synthetic_galaxy(1_000, 20, 25, 60);
    let files = raw.encode_files(ByteOrder::Big);
    c.bench_function("decode_species_files", |b| {
        b.iter(|| {
            files
                .iter()
                .filter(|(name, _)| name.starts_with("sp"))
                .map(|(_, bytes)| {
                    SpeciesFile::decode(&mut RecordReader::new(bytes, ByteOrder::Big))
                        .map(|file| file.ships.len())
                        .unwrap_or(0)
                })
                .sum::<usize>()
        })
    });
}

criterion_group!(link_benches, bench_link, bench_decode);
criterion_main!(link_benches);

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use chrono::{Duration, NaiveDate};
use matchday_terminal::fixture_dataset::{FixtureDataset, parse_fixtures};

// Double round-robin over 20 clubs: 380 fixtures, the size of a full
// league season.
fn synthetic_season_csv() -> String {
    let teams: Vec<String> = (1..=20).map(|i| format!("Club {i:02}")).collect();
    let mut out =
        String::from("Match Number,Round Number,Date,Location,Home Team,Away Team,Result\n");
    let season_start = NaiveDate::from_ymd_opt(2025, 8, 16)
        .expect("valid date")
        .and_hms_opt(15, 0, 0)
        .expect("valid time");

    let mut match_no = 0usize;
    for (i, home) in teams.iter().enumerate() {
        for (j, away) in teams.iter().enumerate() {
            if i == j {
                continue;
            }
            let round = match_no / 10;
            let slot = match_no % 10;
            let kickoff = season_start
                + Duration::days(round as i64 * 7)
                + Duration::minutes(slot as i64 * 135);
            out.push_str(&format!(
                "{},{},{},Ground {:02},{},{},\n",
                match_no + 1,
                round + 1,
                kickoff.format("%d/%m/%Y %H:%M"),
                i + 1,
                home,
                away,
            ));
            match_no += 1;
        }
    }
    out
}

fn season_dataset() -> FixtureDataset {
    parse_fixtures(&synthetic_season_csv()).expect("synthetic season should parse")
}

fn bench_parse_fixtures(c: &mut Criterion) {
    let raw = synthetic_season_csv();
    c.bench_function("parse_fixtures_full_season", |b| {
        b.iter(|| {
            let dataset = parse_fixtures(black_box(&raw)).expect("parse");
            black_box(dataset.fixtures().len());
        })
    });
}

fn bench_nearest_neighbors(c: &mut Criterion) {
    let dataset = season_dataset();
    let reference = NaiveDate::from_ymd_opt(2026, 1, 10)
        .expect("valid date")
        .and_hms_opt(15, 0, 0)
        .expect("valid time");

    c.bench_function("nearest_neighbors_all_teams", |b| {
        b.iter(|| {
            for team in dataset.teams() {
                let neighbors = dataset.nearest_neighbors(black_box(team), black_box(reference));
                black_box(neighbors.previous.is_some());
            }
        })
    });
}

fn bench_find_fixture(c: &mut Criterion) {
    let dataset = season_dataset();
    c.bench_function("find_fixture", |b| {
        b.iter(|| {
            let fixture = dataset.find_fixture(black_box("Club 07"), black_box("Club 18"));
            black_box(fixture.is_some());
        })
    });
}

criterion_group!(
    benches,
    bench_parse_fixtures,
    bench_nearest_neighbors,
    bench_find_fixture
);
criterion_main!(benches);

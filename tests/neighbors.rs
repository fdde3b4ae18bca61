use std::fs;
use std::path::PathBuf;

use matchday_terminal::fixture_dataset::{
    Fixture, FixtureDataset, Side, parse_fixtures, parse_kickoff,
};

fn sample_dataset() -> FixtureDataset {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("fixtures_sample.csv");
    let raw = fs::read_to_string(path).expect("fixture file should be readable");
    parse_fixtures(&raw).expect("sample should parse")
}

#[test]
fn worked_example_arsenal_chelsea() {
    let dataset = sample_dataset();
    let fixture = dataset
        .find_fixture("Arsenal", "Chelsea")
        .expect("fixture exists");
    assert_eq!(fixture.location, "Emirates Stadium");

    let neighbors = dataset.nearest_neighbors("Arsenal", fixture.kickoff);

    let previous = neighbors.previous.expect("previous fixture");
    assert_eq!(previous.side, Side::Away);
    assert_eq!(previous.opponent, "Everton");
    assert_eq!(previous.offset_days, -7);
    assert_eq!(previous.offset_phrase(), "7 days ago");

    let next = neighbors.next.expect("next fixture");
    assert_eq!(next.side, Side::Home);
    assert_eq!(next.opponent, "Brentford");
    assert_eq!(next.offset_days, 7);
    assert_eq!(next.offset_phrase(), "in 7 days");
}

#[test]
fn find_fixture_is_exact_for_every_loaded_pair() {
    let dataset = sample_dataset();
    for fixture in dataset.fixtures() {
        let found = dataset
            .find_fixture(&fixture.home_team, &fixture.away_team)
            .expect("every loaded pair should resolve");
        assert_eq!(found.home_team, fixture.home_team);
        assert_eq!(found.away_team, fixture.away_team);
    }
}

#[test]
fn a_fixture_is_never_its_own_neighbor() {
    let dataset = sample_dataset();
    for team in dataset.teams() {
        for fixture in dataset.team_schedule(team) {
            let neighbors = dataset.nearest_neighbors(team, fixture.kickoff);
            if let Some(previous) = &neighbors.previous {
                assert!(previous.kickoff < fixture.kickoff);
            }
            if let Some(next) = &neighbors.next {
                assert!(next.kickoff > fixture.kickoff);
            }
        }
    }
}

#[test]
fn neighbors_straddle_the_reference_when_both_exist() {
    let dataset = sample_dataset();
    let reference = parse_kickoff("16/08/2025 15:00").expect("reference");
    for team in dataset.teams() {
        let neighbors = dataset.nearest_neighbors(team, reference);
        if let (Some(previous), Some(next)) = (&neighbors.previous, &neighbors.next) {
            assert!(previous.kickoff < reference);
            assert!(next.kickoff > reference);
        }
    }
}

#[test]
fn same_instant_fixtures_are_excluded_from_both_sides() {
    let kickoff = parse_kickoff("16/08/2025 15:00").expect("kickoff");
    let dataset = FixtureDataset::from_fixtures(vec![
        Fixture {
            home_team: "Arsenal".to_string(),
            away_team: "Chelsea".to_string(),
            kickoff,
            location: "Emirates Stadium".to_string(),
        },
        Fixture {
            home_team: "Everton".to_string(),
            away_team: "Arsenal".to_string(),
            kickoff,
            location: "Hill Dickinson Stadium".to_string(),
        },
    ]);

    let neighbors = dataset.nearest_neighbors("Arsenal", kickoff);
    assert!(neighbors.previous.is_none());
    assert!(neighbors.next.is_none());
}

#[test]
fn schedule_is_sorted_and_covers_both_sides() {
    let dataset = sample_dataset();
    let schedule = dataset.team_schedule("Everton");
    assert_eq!(schedule.len(), 3);
    for pair in schedule.windows(2) {
        assert!(pair[0].kickoff <= pair[1].kickoff);
    }
    assert!(
        schedule
            .iter()
            .all(|f| f.home_team == "Everton" || f.away_team == "Everton")
    );
}

#[test]
fn duplicate_pairs_resolve_to_first_by_load_order() {
    let first_kickoff = parse_kickoff("16/08/2025 15:00").expect("kickoff");
    let second_kickoff = parse_kickoff("20/12/2025 15:00").expect("kickoff");
    let dataset = FixtureDataset::from_fixtures(vec![
        Fixture {
            home_team: "Arsenal".to_string(),
            away_team: "Chelsea".to_string(),
            kickoff: first_kickoff,
            location: "Emirates Stadium".to_string(),
        },
        Fixture {
            home_team: "Arsenal".to_string(),
            away_team: "Chelsea".to_string(),
            kickoff: second_kickoff,
            location: "Emirates Stadium".to_string(),
        },
    ]);

    let found = dataset.find_fixture("Arsenal", "Chelsea").expect("fixture");
    assert_eq!(found.kickoff, first_kickoff);
}

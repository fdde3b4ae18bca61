use std::path::PathBuf;

use anyhow::{Context, Result};

use matchday_terminal::fixture_dataset::load_fixtures;

const DEFAULT_FIXTURES_PATH: &str = "data/epl-2025-GMTStandardTime.csv";

fn main() -> Result<()> {
    let path = parse_fixtures_arg()
        .or_else(fixtures_path_from_env)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURES_PATH));

    let dataset =
        load_fixtures(&path).with_context(|| format!("load fixtures from {}", path.display()))?;

    println!("Fixture audit for {}", path.display());
    println!("Fixtures: {}", dataset.fixtures().len());
    println!("Selectable teams: {}", dataset.teams().len());
    if let Some((first, last)) = dataset.kickoff_range() {
        println!(
            "Kickoffs: {} .. {}",
            first.format("%d/%m/%Y %H:%M"),
            last.format("%d/%m/%Y %H:%M")
        );
    }

    let away_only = dataset.away_only_teams();
    if away_only.is_empty() {
        println!("Every team appears at home at least once.");
    } else {
        println!(
            "Teams never at home (not selectable in the dashboard): {}",
            away_only.len()
        );
        for team in &away_only {
            println!(" - {team}");
        }
    }

    Ok(())
}

fn parse_fixtures_arg() -> Option<PathBuf> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix("--fixtures=") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == "--fixtures" {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}

fn fixtures_path_from_env() -> Option<PathBuf> {
    let value = std::env::var("FIXTURES_CSV").ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(trimmed))
}

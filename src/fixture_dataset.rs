use std::fs;
use std::path::Path;

use chrono::{Datelike, NaiveDateTime};
use thiserror::Error;

const COL_HOME: &str = "Home Team";
const COL_AWAY: &str = "Away Team";
const COL_DATE: &str = "Date";
const COL_LOCATION: &str = "Location";

// Season exports label kickoffs in GMT wall-clock time; the whole app stays
// timezone-naive and trusts the file.
const KICKOFF_FORMATS: [&str; 4] = [
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%y %H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("fixture source unavailable: {0}")]
    Source(#[from] std::io::Error),
    #[error("fixture parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    pub home_team: String,
    pub away_team: String,
    pub kickoff: NaiveDateTime,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

/// A team's nearest fixture before or after a reference kickoff, already
/// framed from that team's perspective.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborSummary {
    pub side: Side,
    pub opponent: String,
    pub kickoff: NaiveDateTime,
    pub location: String,
    /// Whole calendar days from the reference date; negative means past.
    pub offset_days: i64,
}

impl NeighborSummary {
    fn from_fixture(team: &str, fixture: &Fixture, reference: NaiveDateTime) -> Self {
        let (side, opponent) = if fixture.home_team == team {
            (Side::Home, fixture.away_team.clone())
        } else {
            (Side::Away, fixture.home_team.clone())
        };
        let offset_days = fixture
            .kickoff
            .date()
            .signed_duration_since(reference.date())
            .num_days();
        Self {
            side,
            opponent,
            kickoff: fixture.kickoff,
            location: fixture.location.clone(),
            offset_days,
        }
    }

    pub fn offset_phrase(&self) -> String {
        match self.offset_days {
            0 => "same day".to_string(),
            1 => "in 1 day".to_string(),
            -1 => "1 day ago".to_string(),
            n if n > 0 => format!("in {n} days"),
            n => format!("{} days ago", -n),
        }
    }

    pub fn line(&self) -> String {
        let side = match self.side {
            Side::Home => "home",
            Side::Away => "away",
        };
        format!(
            "{side} vs {} on {} {} ({})",
            self.opponent,
            weekday_label(self.kickoff.weekday()),
            self.kickoff.format("%d/%m/%Y"),
            self.offset_phrase()
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Neighbors {
    pub previous: Option<NeighborSummary>,
    pub next: Option<NeighborSummary>,
}

/// Immutable in-memory fixture table, loaded once at startup.
#[derive(Debug, Clone)]
pub struct FixtureDataset {
    fixtures: Vec<Fixture>,
    teams: Vec<String>,
}

impl FixtureDataset {
    pub fn from_fixtures(fixtures: Vec<Fixture>) -> Self {
        let mut teams: Vec<String> = fixtures.iter().map(|f| f.home_team.clone()).collect();
        teams.sort();
        teams.dedup();
        Self { fixtures, teams }
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    /// Selectable team names: the sorted, deduplicated set of home-team
    /// names. A team that only ever plays away is not listed here; the
    /// audit binary reports those.
    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn away_only_teams(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .fixtures
            .iter()
            .map(|f| f.away_team.clone())
            .filter(|name| self.teams.binary_search(name).is_err())
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Exact match on both names. Source data should carry at most one
    /// fixture per ordered pair; if it doesn't, first by load order wins.
    pub fn find_fixture(&self, home_team: &str, away_team: &str) -> Option<&Fixture> {
        self.fixtures
            .iter()
            .find(|f| f.home_team == home_team && f.away_team == away_team)
    }

    /// All fixtures where `team` appears on either side, ascending by
    /// kickoff. Recomputed per call; the table is small and static.
    pub fn team_schedule(&self, team: &str) -> Vec<&Fixture> {
        let mut out: Vec<&Fixture> = self
            .fixtures
            .iter()
            .filter(|f| f.home_team == team || f.away_team == team)
            .collect();
        out.sort_by_key(|f| f.kickoff);
        out
    }

    /// Strict neighbors: the latest kickoff before `reference` and the
    /// earliest after it. A fixture at exactly `reference` lands on neither
    /// side, so the reference fixture never shows up as its own neighbor.
    pub fn nearest_neighbors(&self, team: &str, reference: NaiveDateTime) -> Neighbors {
        let mut previous: Option<&Fixture> = None;
        let mut next: Option<&Fixture> = None;
        for fixture in self.team_schedule(team) {
            if fixture.kickoff < reference {
                previous = Some(fixture);
            } else if fixture.kickoff > reference && next.is_none() {
                next = Some(fixture);
            }
        }
        Neighbors {
            previous: previous.map(|f| NeighborSummary::from_fixture(team, f, reference)),
            next: next.map(|f| NeighborSummary::from_fixture(team, f, reference)),
        }
    }

    pub fn kickoff_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.fixtures.iter().map(|f| f.kickoff).min()?;
        let last = self.fixtures.iter().map(|f| f.kickoff).max()?;
        Some((first, last))
    }
}

pub fn load_fixtures(path: &Path) -> Result<FixtureDataset, LoadError> {
    let raw = fs::read_to_string(path)?;
    parse_fixtures(&raw)
}

/// Header-aware CSV parse. Required columns are located by name so the
/// upstream export can reorder or add columns (Match Number, Round Number,
/// Result) without breaking us. Rows with empty team cells are skipped.
pub fn parse_fixtures(raw: &str) -> Result<FixtureDataset, LoadError> {
    let header = raw.lines().next().unwrap_or("");
    let columns = parse_header(header)?;

    let mut fixtures = Vec::new();
    for (idx, line) in raw.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        let home_team = cells.get(columns.home).copied().unwrap_or_default();
        let away_team = cells.get(columns.away).copied().unwrap_or_default();
        if home_team.is_empty() || away_team.is_empty() {
            continue;
        }
        let date_cell = cells.get(columns.date).copied().unwrap_or_default();
        let Some(kickoff) = parse_kickoff(date_cell) else {
            return Err(LoadError::Parse {
                line: line_no,
                reason: format!("unrecognized kickoff '{date_cell}'"),
            });
        };
        let location = cells.get(columns.location).copied().unwrap_or_default();
        fixtures.push(Fixture {
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            kickoff,
            location: location.to_string(),
        });
    }

    Ok(FixtureDataset::from_fixtures(fixtures))
}

struct ColumnIndexes {
    home: usize,
    away: usize,
    date: usize,
    location: usize,
}

fn parse_header(header: &str) -> Result<ColumnIndexes, LoadError> {
    let names: Vec<String> = header
        .split(',')
        .map(|cell| cell.trim().trim_start_matches('\u{feff}').to_string())
        .collect();
    let find = |wanted: &str| -> Result<usize, LoadError> {
        names
            .iter()
            .position(|name| name == wanted)
            .ok_or_else(|| LoadError::Parse {
                line: 1,
                reason: format!("missing column '{wanted}'"),
            })
    };
    Ok(ColumnIndexes {
        home: find(COL_HOME)?,
        away: find(COL_AWAY)?,
        date: find(COL_DATE)?,
        location: find(COL_LOCATION)?,
    })
}

pub fn parse_kickoff(raw: &str) -> Option<NaiveDateTime> {
    let cleaned = raw.trim();
    for fmt in KICKOFF_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cleaned, fmt) {
            return Some(dt);
        }
    }
    None
}

fn weekday_label(weekday: chrono::Weekday) -> &'static str {
    match weekday {
        chrono::Weekday::Mon => "Mon",
        chrono::Weekday::Tue => "Tue",
        chrono::Weekday::Wed => "Wed",
        chrono::Weekday::Thu => "Thu",
        chrono::Weekday::Fri => "Fri",
        chrono::Weekday::Sat => "Sat",
        chrono::Weekday::Sun => "Sun",
    }
}

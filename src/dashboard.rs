use thiserror::Error;

use crate::commentary_store::{CommentaryStore, StoreError};
use crate::fixture_dataset::{Fixture, FixtureDataset, Neighbors};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("home and away teams cannot be the same")]
    SameTeam,
    #[error("both a home and an away team must be selected")]
    MissingTeam,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub struct MatchupDetail {
    pub fixture: Fixture,
    pub home_context: Neighbors,
    pub away_context: Neighbors,
    pub commentary: String,
    /// Set when the commentary read failed; the matchup panel still renders
    /// and the caller decides how loudly to report it.
    pub commentary_note: Option<String>,
}

#[derive(Debug, Clone)]
pub enum MatchupView {
    Found(MatchupDetail),
    NotFound {
        home_team: String,
        away_team: String,
    },
}

/// Glue between the fixture dataset and the commentary store. Holds both
/// as injected values; selection never mutates anything.
pub struct Dashboard {
    fixtures: FixtureDataset,
    commentary: CommentaryStore,
}

impl Dashboard {
    pub fn new(fixtures: FixtureDataset, commentary: CommentaryStore) -> Self {
        Self {
            fixtures,
            commentary,
        }
    }

    pub fn teams(&self) -> &[String] {
        self.fixtures.teams()
    }

    pub fn fixtures(&self) -> &FixtureDataset {
        &self.fixtures
    }

    pub fn commentary_count(&self) -> i64 {
        self.commentary.record_count().unwrap_or(0)
    }

    /// Validation happens before any lookup: an invalid pair touches
    /// neither the fixture table nor the store.
    pub fn select_matchup(
        &self,
        home_team: &str,
        away_team: &str,
    ) -> Result<MatchupView, SelectionError> {
        let (home_team, away_team) = validate_pair(home_team, away_team)?;

        let Some(fixture) = self.fixtures.find_fixture(home_team, away_team) else {
            return Ok(MatchupView::NotFound {
                home_team: home_team.to_string(),
                away_team: away_team.to_string(),
            });
        };

        let home_context = self.fixtures.nearest_neighbors(home_team, fixture.kickoff);
        let away_context = self.fixtures.nearest_neighbors(away_team, fixture.kickoff);
        let (commentary, commentary_note) = match self.commentary.load(home_team, away_team) {
            Ok(text) => (text, None),
            Err(err) => (String::new(), Some(err.to_string())),
        };

        Ok(MatchupView::Found(MatchupDetail {
            fixture: fixture.clone(),
            home_context,
            away_context,
            commentary,
            commentary_note,
        }))
    }

    pub fn save_commentary(
        &self,
        home_team: &str,
        away_team: &str,
        text: &str,
    ) -> Result<(), SaveError> {
        let (home_team, away_team) = validate_pair(home_team, away_team)?;
        self.commentary.save(home_team, away_team, text)?;
        Ok(())
    }
}

fn validate_pair<'a>(
    home_team: &'a str,
    away_team: &'a str,
) -> Result<(&'a str, &'a str), SelectionError> {
    let home_team = home_team.trim();
    let away_team = away_team.trim();
    if home_team.is_empty() || away_team.is_empty() {
        return Err(SelectionError::MissingTeam);
    }
    if home_team == away_team {
        return Err(SelectionError::SameTeam);
    }
    Ok((home_team, away_team))
}

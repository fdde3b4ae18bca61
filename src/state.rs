use std::collections::VecDeque;

use crate::dashboard::MatchupView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    HomeList,
    AwayList,
    Commentary,
}

pub struct AppState {
    pub teams: Vec<String>,
    pub focus: Focus,
    pub home_cursor: usize,
    pub away_cursor: usize,
    pub home_selected: Option<usize>,
    pub away_selected: Option<usize>,
    pub matchup: Option<MatchupView>,
    pub commentary_buffer: String,
    pub commentary_dirty: bool,
    pub validation: Option<String>,
    pub status: Option<String>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(teams: Vec<String>) -> Self {
        Self {
            teams,
            focus: Focus::HomeList,
            home_cursor: 0,
            away_cursor: 0,
            home_selected: None,
            away_selected: None,
            matchup: None,
            commentary_buffer: String::new(),
            commentary_dirty: false,
            validation: None,
            status: None,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    pub fn selected_home(&self) -> Option<&str> {
        self.home_selected
            .and_then(|idx| self.teams.get(idx))
            .map(String::as_str)
    }

    pub fn selected_away(&self) -> Option<&str> {
        self.away_selected
            .and_then(|idx| self.teams.get(idx))
            .map(String::as_str)
    }

    pub fn select_next(&mut self) {
        let total = self.teams.len();
        if total == 0 {
            return;
        }
        match self.focus {
            Focus::HomeList => self.home_cursor = (self.home_cursor + 1) % total,
            Focus::AwayList => self.away_cursor = (self.away_cursor + 1) % total,
            Focus::Commentary => {}
        }
    }

    pub fn select_prev(&mut self) {
        let total = self.teams.len();
        if total == 0 {
            return;
        }
        let step_back = |cursor: usize| if cursor == 0 { total - 1 } else { cursor - 1 };
        match self.focus {
            Focus::HomeList => self.home_cursor = step_back(self.home_cursor),
            Focus::AwayList => self.away_cursor = step_back(self.away_cursor),
            Focus::Commentary => {}
        }
    }

    pub fn cycle_focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::HomeList => Focus::AwayList,
            Focus::AwayList => Focus::Commentary,
            Focus::Commentary => Focus::HomeList,
        };
    }

    pub fn cycle_focus_prev(&mut self) {
        self.focus = match self.focus {
            Focus::HomeList => Focus::Commentary,
            Focus::AwayList => Focus::HomeList,
            Focus::Commentary => Focus::AwayList,
        };
    }

    /// Pin the focused list's cursor as that side's selection. Returns
    /// whether the selection actually changed, so the caller knows to
    /// re-run the matchup lookup.
    pub fn commit_selection(&mut self) -> bool {
        if self.teams.is_empty() {
            return false;
        }
        match self.focus {
            Focus::HomeList => {
                let changed = self.home_selected != Some(self.home_cursor);
                self.home_selected = Some(self.home_cursor);
                changed
            }
            Focus::AwayList => {
                let changed = self.away_selected != Some(self.away_cursor);
                self.away_selected = Some(self.away_cursor);
                changed
            }
            Focus::Commentary => false,
        }
    }

    pub fn restore_home_selection(&mut self, team: &str) {
        if let Some(idx) = self.teams.iter().position(|name| name == team) {
            self.home_cursor = idx;
            self.home_selected = Some(idx);
        }
    }

    pub fn restore_away_selection(&mut self, team: &str) {
        if let Some(idx) = self.teams.iter().position(|name| name == team) {
            self.away_cursor = idx;
            self.away_selected = Some(idx);
        }
    }

    pub fn commentary_insert(&mut self, ch: char) {
        self.commentary_buffer.push(ch);
        self.commentary_dirty = true;
    }

    pub fn commentary_backspace(&mut self) {
        if self.commentary_buffer.pop().is_some() {
            self.commentary_dirty = true;
        }
    }

    pub fn commentary_newline(&mut self) {
        self.commentary_buffer.push('\n');
        self.commentary_dirty = true;
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

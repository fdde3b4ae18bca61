use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::state::AppState;

const CACHE_DIR: &str = "matchday_terminal";
const CACHE_FILE: &str = "session.json";
const CACHE_VERSION: u32 = 1;

/// Last selected team pair, restored on the next run. Best-effort: every
/// failure path degrades to starting with no selection.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionCache {
    version: u32,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
}

pub fn load_into_state(state: &mut AppState) {
    let Some(path) = session_path() else {
        return;
    };
    let Ok(raw) = fs::read_to_string(&path) else {
        return;
    };
    let Some(cache) = decode_session(&raw) else {
        return;
    };
    if let Some(home) = cache.home_team.as_deref() {
        state.restore_home_selection(home);
    }
    if let Some(away) = cache.away_team.as_deref() {
        state.restore_away_selection(away);
    }
}

pub fn save_from_state(state: &AppState) {
    let Some(path) = session_path() else {
        return;
    };
    let Some(dir) = path.parent() else {
        return;
    };
    let _ = fs::create_dir_all(dir);

    let cache = SessionCache {
        version: CACHE_VERSION,
        home_team: state.selected_home().map(str::to_string),
        away_team: state.selected_away().map(str::to_string),
    };
    let Ok(json) = serde_json::to_string(&cache) else {
        return;
    };
    let tmp = path.with_extension("json.tmp");
    if fs::write(&tmp, json).is_ok() {
        let _ = fs::rename(&tmp, &path);
    }
}

fn decode_session(raw: &str) -> Option<SessionCache> {
    let cache = serde_json::from_str::<SessionCache>(raw).ok()?;
    if cache.version != CACHE_VERSION {
        return None;
    }
    Some(cache)
}

fn session_path() -> Option<PathBuf> {
    app_cache_dir().map(|dir| dir.join(CACHE_FILE))
}

pub fn app_cache_dir() -> Option<PathBuf> {
    // Prefer XDG cache.
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(CACHE_DIR));
        }
    }
    // Fallback to ~/.cache on linux-like systems.
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(CACHE_DIR))
}

#[cfg(test)]
mod tests {
    use super::{CACHE_VERSION, SessionCache, decode_session};

    #[test]
    fn decode_round_trips_current_version() {
        let cache = SessionCache {
            version: CACHE_VERSION,
            home_team: Some("Arsenal".to_string()),
            away_team: Some("Chelsea".to_string()),
        };
        let json = serde_json::to_string(&cache).expect("encode");
        let decoded = decode_session(&json).expect("decode");
        assert_eq!(decoded.home_team.as_deref(), Some("Arsenal"));
        assert_eq!(decoded.away_team.as_deref(), Some("Chelsea"));
    }

    #[test]
    fn decode_rejects_other_versions() {
        let json = r#"{"version":99,"home_team":null,"away_team":null}"#;
        assert!(decode_session(json).is_none());
    }
}

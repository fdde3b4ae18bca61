use matchday_terminal::state::{AppState, Focus};

fn teams() -> Vec<String> {
    ["Arsenal", "Chelsea", "Everton"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[test]
fn cursor_wraps_both_ways() {
    let mut state = AppState::new(teams());
    state.focus = Focus::HomeList;

    state.select_prev();
    assert_eq!(state.home_cursor, 2);
    state.select_next();
    assert_eq!(state.home_cursor, 0);
    state.select_next();
    state.select_next();
    state.select_next();
    assert_eq!(state.home_cursor, 0);
}

#[test]
fn navigation_is_a_no_op_with_no_teams() {
    let mut state = AppState::new(Vec::new());
    state.select_next();
    state.select_prev();
    assert_eq!(state.home_cursor, 0);
    assert!(!state.commit_selection());
}

#[test]
fn focus_cycles_through_all_panes() {
    let mut state = AppState::new(teams());
    assert_eq!(state.focus, Focus::HomeList);
    state.cycle_focus_next();
    assert_eq!(state.focus, Focus::AwayList);
    state.cycle_focus_next();
    assert_eq!(state.focus, Focus::Commentary);
    state.cycle_focus_next();
    assert_eq!(state.focus, Focus::HomeList);
    state.cycle_focus_prev();
    assert_eq!(state.focus, Focus::Commentary);
}

#[test]
fn commit_reports_changes_only() {
    let mut state = AppState::new(teams());
    state.focus = Focus::AwayList;
    state.away_cursor = 1;

    assert!(state.commit_selection());
    assert_eq!(state.selected_away(), Some("Chelsea"));
    assert!(!state.commit_selection());

    state.away_cursor = 2;
    assert!(state.commit_selection());
    assert_eq!(state.selected_away(), Some("Everton"));
}

#[test]
fn commit_in_commentary_focus_changes_nothing() {
    let mut state = AppState::new(teams());
    state.focus = Focus::Commentary;
    assert!(!state.commit_selection());
    assert!(state.selected_home().is_none());
    assert!(state.selected_away().is_none());
}

#[test]
fn restore_selection_matches_by_name() {
    let mut state = AppState::new(teams());
    state.restore_home_selection("Chelsea");
    assert_eq!(state.home_cursor, 1);
    assert_eq!(state.selected_home(), Some("Chelsea"));

    // Unknown names leave the state untouched.
    state.restore_away_selection("Real Madrid");
    assert!(state.selected_away().is_none());
}

#[test]
fn commentary_editing_tracks_dirtiness() {
    let mut state = AppState::new(teams());
    assert!(!state.commentary_dirty);

    state.commentary_backspace();
    assert!(!state.commentary_dirty);

    state.commentary_insert('h');
    state.commentary_insert('i');
    state.commentary_newline();
    assert_eq!(state.commentary_buffer, "hi\n");
    assert!(state.commentary_dirty);

    state.commentary_dirty = false;
    state.commentary_backspace();
    assert_eq!(state.commentary_buffer, "hi");
    assert!(state.commentary_dirty);
}

#[test]
fn log_ring_is_bounded() {
    let mut state = AppState::new(teams());
    for i in 0..250 {
        state.push_log(format!("line {i}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("line 50"));
}

//! Session dispatch tests
//!
//! Keys go in through a session, commands come out on a recording host.

mod common;

use common::{run, session, session_in, RecordingHost};

use vimkeys::config::Settings;
use vimkeys::keymap::{Mode, PanelResult, State, Step};
use vimkeys::session::Session;

// ========================================================================
// Motions and actions
// ========================================================================

#[test]
fn test_single_motion() {
    let mut s = session();
    assert_eq!(run(&mut s, "j"), vec!["vi_j"]);
    assert!(s.driver().is_idle());
}

#[test]
fn test_count_and_register_reach_host() {
    let mut s = session();
    run(&mut s, "\"a3yy");
    let args = s.host().last_args();
    assert_eq!(s.host().names(), vec!["vi_yy"]);
    assert_eq!(args["count"], 3);
    assert_eq!(args["register"], "a");
}

#[test]
fn test_zero_is_a_motion() {
    let mut s = session();
    assert_eq!(run(&mut s, "0"), vec!["vi_zero"]);
    assert!(s.host().last_args().get("count").is_none());
}

#[test]
fn test_namespace_waits_for_more() {
    let mut s = session();
    let steps = s.press_keys("g").unwrap();
    assert_eq!(steps, vec![Step::AwaitMore]);
    assert_eq!(s.driver().state(), State::AwaitingMoreKeys);

    run(&mut s, "g");
    assert_eq!(s.host().names(), vec!["vi_gg"]);
}

#[test]
fn test_window_commands() {
    let mut s = session();
    assert_eq!(run(&mut s, "<C-w>j"), vec!["vi_ctrl_w_j"]);
}

// ========================================================================
// Operators
// ========================================================================

#[test]
fn test_operator_with_motion() {
    let mut s = session();
    assert_eq!(run(&mut s, "dw"), vec!["vi_d"]);
    assert_eq!(s.host().last_args()["motion"]["name"], "vi_w");
}

#[test]
fn test_operator_counts_multiply() {
    let mut s = session();
    run(&mut s, "2d3w");
    assert_eq!(s.host().last_args()["count"], 6);
}

#[test]
fn test_doubled_operator_is_linewise_action() {
    let mut s = session();
    assert_eq!(run(&mut s, "dd"), vec!["vi_dd"]);
    assert_eq!(run(&mut s, "gUgU"), vec!["vi_dd", "vi_g_big_u_big_u"]);
}

#[test]
fn test_operator_with_text_object() {
    let mut s = session();
    run(&mut s, "diw");
    let motion = &s.host().last_args()["motion"];
    assert_eq!(motion["name"], "vi_i_text_object");
    assert_eq!(motion["char"], "w");
}

#[test]
fn test_operator_with_find_motion() {
    let mut s = session();
    run(&mut s, "dfx");
    let args = s.host().last_args();
    assert_eq!(args["motion"]["name"], "vi_f");
    assert_eq!(args["motion"]["char"], "x");
}

#[test]
fn test_escape_cancels_pending_operator() {
    let mut s = session();
    let steps = s.press_keys("d<Esc>").unwrap();
    assert_eq!(steps[1], Step::Cancelled);
    assert!(s.host().executed.is_empty());
    assert!(s.driver().pending_operator().is_none());
}

#[test]
fn test_visual_operator_acts_on_selection() {
    let mut s = session_in(Mode::Visual);
    assert_eq!(run(&mut s, "d"), vec!["vi_d"]);
    assert!(s.host().last_args().get("motion").is_none());
}

// ========================================================================
// Input parsers
// ========================================================================

#[test]
fn test_replace_char_runs_follow_up() {
    let mut s = session();
    assert_eq!(run(&mut s, "rx"), vec!["vi_r", "vi_r_on_parser_done"]);
    assert_eq!(s.host().executed[1].1["char"], "x");
}

#[test]
fn test_marks_and_registers_use_their_own_params() {
    let mut s = session();
    run(&mut s, "ma");
    assert_eq!(s.host().last_args()["mark"], "a");
    run(&mut s, "@q");
    assert_eq!(s.host().last_args()["register"], "q");
}

#[test]
fn test_ctrl_r_is_redo_in_normal_and_register_paste_in_insert() {
    let mut s = session();
    assert_eq!(run(&mut s, "<C-r>"), vec!["vi_ctrl_r"]);

    let mut s = session_in(Mode::Insert);
    let steps = s.press_keys("<C-r>").unwrap();
    assert_eq!(steps, vec![Step::AwaitInput]);
    run(&mut s, "a");
    assert_eq!(s.host().names(), vec!["vi_insert_ctrl_r"]);
    assert_eq!(s.host().last_args()["register"], "a");
}

#[test]
fn test_interactive_search_uses_panel() {
    let mut s = session();
    let steps = s.press_keys("/").unwrap();
    let Step::ShowPanel(request) = &steps[0] else {
        panic!("expected ShowPanel, got {:?}", steps[0]);
    };
    assert_eq!(request.prompt, "/");
    assert_eq!(request.command, "vi_slash");

    // Keys typed into the panel belong to the host
    assert_eq!(s.press_keys("j").unwrap(), vec![Step::Suspended]);

    s.panel_done(PanelResult::Submitted("foo".to_string()));
    assert_eq!(s.host().names(), vec!["vi_slash"]);
    assert_eq!(s.host().last_args()["pattern"], "foo");
    assert!(s.driver().is_idle());
}

#[test]
fn test_cancelled_panel_runs_nothing() {
    let mut s = session();
    s.press_keys("?").unwrap();
    assert_eq!(s.panel_done(PanelResult::Cancelled), Step::Cancelled);
    assert!(s.host().executed.is_empty());
    assert!(s.driver().is_idle());
}

#[test]
fn test_non_interactive_search_reads_keys() {
    let settings = Settings {
        non_interactive: true,
        ..Settings::default()
    };
    let mut s = Session::new(RecordingHost::default(), &settings);
    run(&mut s, "/ab<BS>c<CR>");
    assert_eq!(s.host().names(), vec!["vi_slash", "vi_slash_on_parser_done"]);
    assert_eq!(s.host().executed[0].1["pattern"], "ac");
    assert!(s.host().panels.is_empty());
}

// ========================================================================
// User mappings
// ========================================================================

#[test]
fn test_user_mapping_overrides_builtin() {
    let mut s = session();
    s.add_mapping(Mode::Normal, "j", "custom_down").unwrap();
    assert_eq!(run(&mut s, "j"), vec!["custom_down"]);

    s.remove_mapping(Mode::Normal, "j").unwrap();
    assert_eq!(run(&mut s, "j"), vec!["custom_down", "vi_j"]);
}

#[test]
fn test_shorter_mapping_shadows_longer() {
    let mut s = session();
    s.add_mapping(Mode::Normal, "dd", "short").unwrap();
    s.add_mapping(Mode::Normal, "ddd", "long").unwrap();
    run(&mut s, "dd");
    assert_eq!(s.host().names(), vec!["short"]);
}

#[test]
fn test_insert_mapping_and_typed_text() {
    let mut s = Session::new(RecordingHost::in_mode(Mode::Insert), &Settings::default());
    s.add_mapping(Mode::Insert, "jk", "vi_enter_normal_mode").unwrap();

    run(&mut s, "a3");
    assert_eq!(s.host().inserted, vec!["a", "3"]);

    run(&mut s, "jx");
    assert_eq!(s.host().inserted, vec!["a", "3", "jx"]);

    run(&mut s, "jk");
    assert_eq!(s.host().names(), vec!["vi_enter_normal_mode"]);
    assert!(s.host().messages.is_empty());
}

#[test]
fn test_mode_tracking_host_switches_tables() {
    let mut s = Session::new(RecordingHost::tracking(), &Settings::default());
    run(&mut s, "v");
    assert_eq!(s.host().mode, Mode::Visual);
    run(&mut s, "d");
    assert_eq!(s.host().mode, Mode::Normal);
    assert_eq!(s.host().names(), vec!["vi_v", "vi_d"]);
}

#[test]
fn test_clear_mappings_keeps_insert() {
    let mut s = session();
    s.add_mapping(Mode::Normal, "Y", "yank_to_end").unwrap();
    s.add_mapping(Mode::Insert, "jk", "vi_enter_normal_mode").unwrap();
    s.clear_mappings();
    assert_eq!(s.store().len(Mode::Normal), 0);
    assert_eq!(s.store().len(Mode::Insert), 1);
}

// ========================================================================
// Reporting
// ========================================================================

#[test]
fn test_unknown_sequence_reported_once() {
    let mut s = session();
    let steps = s.press_keys("g!").unwrap();
    assert!(matches!(&steps[1], Step::Unresolved(keys) if keys.to_string() == "g!"));
    assert_eq!(s.host().messages, vec!["Unknown key sequence: g!"]);
    assert!(s.driver().is_idle());
}

#[test]
fn test_unsupported_command_reported() {
    let mut s = session();
    let steps = s.press_keys("Q").unwrap();
    assert!(matches!(&steps[0], Step::Unsupported(c) if c.name == "vi_big_q"));
    assert!(s.host().executed.is_empty());
    assert_eq!(s.host().messages, vec!["Not supported: vi_big_q"]);
}

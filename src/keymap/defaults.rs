//! Built-in vim bindings
//!
//! Command names follow the `vi_*` convention the host's handlers are
//! registered under. Operators resolve on their own key; the doubled forms
//! (`dd`, `g~~`, `>>`) are composite bindings in the operator's own mode,
//! reached through operator-pending composition.

use super::command::CommandDescriptor as C;
use super::mode::Mode;
use super::sequence::KeySequence;
use super::table::Binding;

const N: &[Mode] = &[Mode::Normal];
const V: &[Mode] = &[Mode::Visual, Mode::VisualLine, Mode::VisualBlock];
const O: &[Mode] = &[Mode::OperatorPending];
const I: &[Mode] = &[Mode::Insert];
const S: &[Mode] = &[Mode::Select];
const NV: &[Mode] = &[Mode::Normal, Mode::Visual, Mode::VisualLine, Mode::VisualBlock];
const VO: &[Mode] = &[
    Mode::Visual,
    Mode::VisualLine,
    Mode::VisualBlock,
    Mode::OperatorPending,
];
const NVO: &[Mode] = &[
    Mode::Normal,
    Mode::Visual,
    Mode::VisualLine,
    Mode::VisualBlock,
    Mode::OperatorPending,
];

fn bind(modes: &[Mode], keys: &str, command: C) -> Option<Binding> {
    match keys.parse::<KeySequence>() {
        Ok(keys) => Some(Binding::new(modes, keys, command)),
        Err(e) => {
            tracing::error!("Skipping built-in binding {:?}: {}", keys, e);
            None
        }
    }
}

/// Generate the built-in bindings for every mode
pub fn default_bindings() -> Vec<Binding> {
    let bindings = vec![
        // ====================================================================
        // Motions: characters and lines
        // ====================================================================
        bind(NVO, "h", C::motion("vi_h")),
        bind(NVO, "j", C::motion("vi_j")),
        bind(NVO, "k", C::motion("vi_k")),
        bind(NVO, "l", C::motion("vi_l")),
        bind(NVO, "<Left>", C::motion("vi_h")),
        bind(NVO, "<Down>", C::motion("vi_j")),
        bind(NVO, "<Up>", C::motion("vi_k")),
        bind(NVO, "<Right>", C::motion("vi_l")),
        bind(NVO, "<BS>", C::motion("vi_h")),
        bind(NVO, "<Space>", C::motion("vi_l")),
        bind(NVO, "0", C::motion("vi_zero")),
        bind(NVO, "<Home>", C::motion("vi_zero")),
        bind(NVO, "^", C::motion("vi_hat")),
        bind(NVO, "$", C::motion("vi_dollar")),
        bind(NVO, "<End>", C::motion("vi_dollar")),
        bind(NVO, "<Bar>", C::motion("vi_bar")),
        bind(NVO, "_", C::motion("vi_underscore")),
        bind(NVO, "-", C::motion("vi_minus")),
        bind(NVO, "+", C::motion("vi_plus")),
        bind(NVO, "<CR>", C::motion("vi_enter")),
        bind(NVO, "G", C::motion("vi_big_g")),
        bind(NVO, "H", C::motion("vi_big_h")),
        bind(NVO, "M", C::motion("vi_big_m")),
        bind(NVO, "L", C::motion("vi_big_l")),
        bind(NVO, "<C-d>", C::motion("vi_ctrl_d")),
        bind(NVO, "<C-u>", C::motion("vi_ctrl_u")),
        bind(NVO, "<C-f>", C::motion("vi_ctrl_f")),
        bind(NVO, "<C-b>", C::motion("vi_ctrl_b")),
        // ====================================================================
        // Motions: words, sentences, paragraphs
        // ====================================================================
        bind(NVO, "w", C::motion("vi_w")),
        bind(NVO, "W", C::motion("vi_big_w")),
        bind(NVO, "b", C::motion("vi_b")),
        bind(NVO, "B", C::motion("vi_big_b")),
        bind(NVO, "e", C::motion("vi_e")),
        bind(NVO, "E", C::motion("vi_big_e")),
        bind(NVO, "(", C::motion("vi_left_paren")),
        bind(NVO, ")", C::motion("vi_right_paren")),
        bind(NVO, "{", C::motion("vi_left_brace")),
        bind(NVO, "}", C::motion("vi_right_brace")),
        bind(NVO, "%", C::motion("vi_percent")),
        bind(NVO, "[", C::motion("vi_left_square_bracket")),
        bind(NVO, "]", C::motion("vi_right_square_bracket")),
        // ====================================================================
        // Motions: find, search, marks
        // ====================================================================
        bind(NVO, "f", C::motion("vi_f")),
        bind(NVO, "F", C::motion("vi_big_f")),
        bind(NVO, "t", C::motion("vi_t")),
        bind(NVO, "T", C::motion("vi_big_t")),
        bind(NVO, ";", C::motion("vi_semicolon")),
        bind(NVO, ",", C::motion("vi_comma")),
        bind(NVO, "/", C::motion("vi_slash")),
        bind(NVO, "?", C::motion("vi_question_mark")),
        bind(NVO, "n", C::motion("vi_n")),
        bind(NVO, "N", C::motion("vi_big_n")),
        bind(NVO, "*", C::motion("vi_star")),
        bind(NVO, "#", C::motion("vi_octothorp")),
        bind(NVO, "'", C::motion("vi_quote")),
        bind(NVO, "`", C::motion("vi_backtick")),
        // ====================================================================
        // The g namespace
        // ====================================================================
        bind(NVO, "g", C::namespace("vi_g")),
        bind(NVO, "gg", C::motion("vi_gg")),
        bind(NVO, "gj", C::motion("vi_gj")),
        bind(NVO, "gk", C::motion("vi_gk")),
        bind(NVO, "ge", C::motion("vi_ge")),
        bind(NVO, "gE", C::motion("vi_g_big_e")),
        bind(NVO, "g_", C::motion("vi_g_underscore")),
        bind(NVO, "g*", C::motion("vi_g_star")),
        bind(NVO, "g#", C::motion("vi_g_octothorp")),
        bind(NV, "gd", C::motion("vi_gd")),
        bind(NV, "gD", C::motion("vi_g_big_d")),
        bind(NV, "gJ", C::action("vi_g_big_j")),
        bind(NV, "gv", C::action("vi_gv")),
        bind(N, "gi", C::action("vi_gi")),
        bind(N, "gt", C::action("vi_gt")),
        bind(N, "gT", C::action("vi_g_big_t")),
        bind(N, "gx", C::action("vi_gx").unsupported()),
        // ====================================================================
        // Text objects
        // ====================================================================
        bind(VO, "a", C::motion("vi_a_text_object")),
        bind(VO, "i", C::motion("vi_i_text_object")),
        // ====================================================================
        // Operators and their doubled (linewise) forms
        // ====================================================================
        bind(N, "d", C::operator("vi_d")),
        bind(N, "dd", C::action("vi_dd")),
        bind(N, "c", C::operator("vi_c")),
        bind(N, "cc", C::action("vi_cc")),
        bind(N, "y", C::operator("vi_y")),
        bind(N, "yy", C::action("vi_yy")),
        bind(N, ">", C::operator("vi_greater_than")),
        bind(N, ">>", C::action("vi_greater_than_greater_than")),
        bind(N, "<lt>", C::operator("vi_less_than")),
        bind(N, "<lt><lt>", C::action("vi_less_than_less_than")),
        bind(N, "=", C::operator("vi_equal")),
        bind(N, "==", C::action("vi_equal_equal")),
        bind(N, "!", C::operator("vi_bang").unsupported()),
        bind(N, "!!", C::action("vi_bang_bang").unsupported()),
        bind(N, "g~", C::operator("vi_g_tilde")),
        bind(N, "g~~", C::action("vi_g_tilde_g_tilde")),
        bind(N, "g~g~", C::action("vi_g_tilde_g_tilde")),
        bind(N, "gu", C::operator("vi_gu")),
        bind(N, "guu", C::action("vi_gugu")),
        bind(N, "gugu", C::action("vi_gugu")),
        bind(N, "gU", C::operator("vi_g_big_u")),
        bind(N, "gUU", C::action("vi_g_big_u_big_u")),
        bind(N, "gUgU", C::action("vi_g_big_u_big_u")),
        bind(N, "gq", C::operator("vi_gq").unsupported()),
        bind(N, "gqq", C::action("vi_gqq").unsupported()),
        // ====================================================================
        // Normal mode actions
        // ====================================================================
        bind(N, "<Esc>", C::action("vi_esc")),
        bind(N, "i", C::action("vi_i")),
        bind(N, "a", C::action("vi_a")),
        bind(N, "I", C::action("vi_big_i")),
        bind(N, "A", C::action("vi_big_a")),
        bind(N, "o", C::action("vi_o")),
        bind(N, "O", C::action("vi_big_o")),
        bind(N, "x", C::action("vi_x")),
        bind(N, "X", C::action("vi_big_x")),
        bind(N, "s", C::action("vi_s")),
        bind(N, "S", C::action("vi_big_s")),
        bind(N, "C", C::action("vi_big_c")),
        bind(N, "D", C::action("vi_big_d")),
        bind(N, "Y", C::action("vi_big_y")),
        bind(N, "p", C::action("vi_p")),
        bind(N, "P", C::action("vi_big_p")),
        bind(N, "r", C::action("vi_r")),
        bind(N, "R", C::action("vi_big_r").unsupported()),
        bind(N, "J", C::action("vi_big_j")),
        bind(N, "~", C::action("vi_tilde")),
        bind(N, "u", C::action("vi_u")),
        bind(N, "<C-r>", C::action("vi_ctrl_r")),
        bind(N, ".", C::action("vi_dot")),
        bind(N, "&", C::action("vi_ampersand")),
        bind(N, "m", C::action("vi_m")),
        bind(N, "q", C::action("vi_q")),
        bind(N, "@", C::action("vi_at")),
        bind(N, "v", C::action("vi_v")),
        bind(N, "V", C::action("vi_big_v")),
        bind(N, "<C-v>", C::action("vi_ctrl_v")),
        bind(N, ":", C::action("vi_colon")),
        bind(N, "<C-a>", C::action("vi_ctrl_a")),
        bind(N, "<C-x>", C::action("vi_ctrl_x")),
        bind(N, "<C-o>", C::action("vi_ctrl_o")),
        bind(N, "<C-e>", C::action("vi_ctrl_e")),
        bind(N, "<C-y>", C::action("vi_ctrl_y")),
        bind(N, "<C-]>", C::action("vi_ctrl_right_square_bracket")),
        bind(N, "K", C::action("vi_big_k").unsupported()),
        bind(N, "Q", C::action("vi_big_q").unsupported()),
        // ====================================================================
        // Scrolling, folds and quitting
        // ====================================================================
        bind(N, "z", C::namespace("vi_z")),
        bind(N, "zz", C::action("vi_zz")),
        bind(N, "zt", C::action("vi_zt")),
        bind(N, "zb", C::action("vi_zb")),
        bind(N, "z<CR>", C::action("vi_z_enter")),
        bind(N, "z.", C::action("vi_z_dot")),
        bind(N, "z-", C::action("vi_z_minus")),
        bind(N, "zo", C::action("vi_zo")),
        bind(N, "zc", C::action("vi_zc")),
        bind(N, "za", C::action("vi_za")),
        bind(N, "zR", C::action("vi_z_big_r")),
        bind(N, "zM", C::action("vi_z_big_m")),
        bind(N, "Z", C::namespace("vi_big_z")),
        bind(N, "ZZ", C::action("vi_big_z_big_z")),
        bind(N, "ZQ", C::action("vi_big_z_big_q")),
        // ====================================================================
        // Windows
        // ====================================================================
        bind(N, "<C-w>", C::namespace("vi_ctrl_w")),
        bind(N, "<C-w>h", C::action("vi_ctrl_w_h")),
        bind(N, "<C-w>j", C::action("vi_ctrl_w_j")),
        bind(N, "<C-w>k", C::action("vi_ctrl_w_k")),
        bind(N, "<C-w>l", C::action("vi_ctrl_w_l")),
        bind(N, "<C-w>w", C::action("vi_ctrl_w_w")),
        bind(N, "<C-w>s", C::action("vi_ctrl_w_s")),
        bind(N, "<C-w>v", C::action("vi_ctrl_w_v")),
        bind(N, "<C-w>o", C::action("vi_ctrl_w_o")),
        bind(N, "<C-w>q", C::action("vi_ctrl_w_q")),
        bind(N, "<C-w>c", C::action("vi_ctrl_w_c")),
        // ====================================================================
        // Visual mode actions (operators act on the selection immediately)
        // ====================================================================
        bind(V, "<Esc>", C::action("vi_enter_normal_mode")),
        bind(V, "d", C::action("vi_d")),
        bind(V, "x", C::action("vi_d")),
        bind(V, "c", C::action("vi_c")),
        bind(V, "s", C::action("vi_c")),
        bind(V, "y", C::action("vi_y")),
        bind(V, ">", C::action("vi_greater_than")),
        bind(V, "<lt>", C::action("vi_less_than")),
        bind(V, "=", C::action("vi_equal")),
        bind(V, "~", C::action("vi_tilde")),
        bind(V, "u", C::action("vi_visual_u")),
        bind(V, "U", C::action("vi_visual_big_u")),
        bind(V, "g~", C::action("vi_g_tilde")),
        bind(V, "gu", C::action("vi_gu")),
        bind(V, "gU", C::action("vi_g_big_u")),
        bind(V, "r", C::action("vi_r")),
        bind(V, "J", C::action("vi_big_j")),
        bind(V, "o", C::action("vi_visual_o")),
        bind(V, "O", C::action("vi_visual_o")),
        bind(V, "I", C::action("vi_big_i")),
        bind(V, "A", C::action("vi_big_a")),
        bind(V, "p", C::action("vi_p")),
        bind(V, "P", C::action("vi_big_p")),
        bind(V, "D", C::action("vi_big_d")),
        bind(V, "Y", C::action("vi_big_y")),
        bind(V, "v", C::action("vi_v")),
        bind(V, "V", C::action("vi_big_v")),
        bind(V, "<C-v>", C::action("vi_ctrl_v")),
        bind(V, ":", C::action("vi_colon")),
        // ====================================================================
        // Insert mode
        // ====================================================================
        bind(I, "<Esc>", C::action("vi_enter_normal_mode")),
        bind(I, "<C-c>", C::action("vi_enter_normal_mode")),
        bind(I, "<C-[>", C::action("vi_enter_normal_mode")),
        bind(I, "<C-w>", C::action("vi_ctrl_w")),
        bind(I, "<C-u>", C::action("vi_ctrl_u_insert")),
        bind(I, "<C-r>", C::action("vi_insert_ctrl_r")),
        bind(I, "<C-t>", C::action("vi_ctrl_t")),
        bind(I, "<C-d>", C::action("vi_ctrl_d_insert")),
        bind(I, "<C-o>", C::action("vi_ctrl_o_insert").unsupported()),
        // ====================================================================
        // Select mode (multiple selections)
        // ====================================================================
        bind(S, "<Esc>", C::action("vi_enter_normal_mode")),
        bind(S, "j", C::action("vi_select_j")),
        bind(S, "k", C::action("vi_select_k")),
        bind(S, "l", C::action("vi_select_l")),
        bind(S, "J", C::action("vi_select_big_j")),
        bind(S, "A", C::action("vi_select_big_a")),
        bind(S, "i", C::action("vi_select_i")),
        bind(S, "<C-g>", C::action("vi_select_ctrl_g")),
    ];

    bindings.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::table::CommandTable;

    #[test]
    fn test_all_builtin_notation_parses() {
        let parsed = default_bindings().len();
        // One `bind` per line above; a parse failure would drop one silently
        assert!(parsed > 150, "only {} bindings parsed", parsed);
    }

    #[test]
    fn test_builtin_table_satisfies_construction_invariant() {
        let table = CommandTable::from_bindings(default_bindings());
        assert!(table.is_ok(), "{:?}", table.err());
    }

    #[test]
    fn test_every_mode_has_bindings() {
        let table = CommandTable::builtin();
        for mode in Mode::ALL {
            assert!(table.len(mode) > 0, "{} has no bindings", mode);
        }
    }
}

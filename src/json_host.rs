//! Host used by the `vimkeys` binary: prints each command as a JSON line
//!
//! Mode changes are inferred from the names of the commands that ran, which
//! is enough to exercise mode-dependent resolution from the command line.

use std::io::Write;

use serde_json::json;

use crate::host::Host;
use crate::keymap::{Arguments, KeySequence, Mode, PanelRequest};

pub struct JsonHost<W: Write> {
    mode: Mode,
    out: W,
    panel: Option<PanelRequest>,
}

impl<W: Write> JsonHost<W> {
    pub fn new(mode: Mode, out: W) -> Self {
        Self {
            mode,
            out,
            panel: None,
        }
    }

    /// The panel request waiting for an answer, if any
    pub fn take_panel(&mut self) -> Option<PanelRequest> {
        self.panel.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, value: serde_json::Value) {
        if let Err(e) = writeln!(self.out, "{}", value) {
            tracing::error!("Failed to write output: {}", e);
        }
    }
}

impl<W: Write> Host for JsonHost<W> {
    fn mode(&self) -> Mode {
        self.mode
    }

    fn execute(&mut self, command: &str, args: &Arguments) {
        self.emit(json!({
            "mode": self.mode.to_string(),
            "command": command,
            "args": args,
        }));

        let next = next_mode(command, self.mode);
        if next != self.mode {
            tracing::debug!("mode {} -> {}", self.mode, next);
            self.mode = next;
        }
    }

    fn show_input_panel(&mut self, request: &PanelRequest) {
        self.panel = Some(request.clone());
    }

    fn status_message(&mut self, message: &str) {
        eprintln!("{}", message);
    }

    fn unresolved(&mut self, keys: &KeySequence) {
        if self.mode == Mode::Insert {
            self.emit(json!({ "mode": self.mode.to_string(), "insert": keys.to_string() }));
        } else {
            self.status_message(&format!("Unknown key sequence: {}", keys));
        }
    }
}

/// The mode after `command` ran in `current`
pub fn next_mode(command: &str, current: Mode) -> Mode {
    match command {
        "vi_i" | "vi_a" | "vi_big_i" | "vi_big_a" | "vi_o" | "vi_big_o" | "vi_s" | "vi_big_s"
        | "vi_big_c" | "vi_c" | "vi_cc" | "vi_gi" => Mode::Insert,
        "vi_esc" | "vi_enter_normal_mode" => Mode::Normal,
        "vi_v" => toggle(current, Mode::Visual),
        "vi_big_v" => toggle(current, Mode::VisualLine),
        "vi_ctrl_v" => toggle(current, Mode::VisualBlock),
        "vi_d" | "vi_y" | "vi_greater_than" | "vi_less_than" | "vi_equal" | "vi_tilde"
        | "vi_visual_u" | "vi_visual_big_u" | "vi_g_tilde" | "vi_gu" | "vi_g_big_u"
        | "vi_big_j" | "vi_g_big_j" | "vi_p" | "vi_big_p" | "vi_big_d" | "vi_big_y"
        | "vi_r_on_parser_done" | "vi_colon"
            if current.is_visual() =>
        {
            Mode::Normal
        }
        _ => current,
    }
}

fn toggle(current: Mode, target: Mode) -> Mode {
    if current == target {
        Mode::Normal
    } else {
        target
    }
}

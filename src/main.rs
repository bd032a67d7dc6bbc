use std::io::{self, BufRead};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use vimkeys::cli::{CliArgs, KeySource, RunConfig, RunMode};
use vimkeys::config::Settings;
use vimkeys::json_host::JsonHost;
use vimkeys::keymap::{self, CommandTable, KeySequence, Mode, PanelResult};
use vimkeys::session::Session;

type Stdout = io::Stdout;

fn main() -> Result<()> {
    let config = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    let _log_guard = vimkeys::tracing::init();

    match &config.run {
        RunMode::ListBindings(mode) => {
            list_bindings(*mode);
            Ok(())
        }
        RunMode::Resolve(source) => resolve(&config, source),
    }
}

fn list_bindings(mode: Option<Mode>) {
    let table = CommandTable::builtin();
    let modes = match mode {
        Some(mode) => vec![mode],
        None => Mode::ALL.to_vec(),
    };

    for mode in modes {
        for (keys, command) in table.bindings(mode) {
            let note = if command.supported { "" } else { " (unsupported)" };
            println!("{}\t{}\t{}{}", mode, keys, command.name, note);
        }
    }
}

fn resolve(config: &RunConfig, source: &KeySource) -> Result<()> {
    let mut settings = match &config.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    if config.non_interactive {
        settings.non_interactive = true;
    }

    let mode = config.mode.unwrap_or(settings.initial_mode);
    let mut session = Session::new(JsonHost::new(mode, io::stdout()), &settings);
    load_mappings(&mut session, config.mappings.as_deref())?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    match source {
        KeySource::Args(keys) => {
            for raw in keys {
                run_keys(&mut session, raw, &mut lines)?;
            }
        }
        KeySource::Stdin => {
            while let Some(line) = lines.next() {
                let line = line.context("Failed to read stdin")?;
                run_keys(&mut session, &line, &mut lines)?;
            }
        }
    }

    Ok(())
}

fn load_mappings(session: &mut Session<JsonHost<Stdout>>, explicit: Option<&Path>) -> Result<()> {
    if let Some(path) = explicit {
        keymap::load_into(session.store_mut(), path)
            .with_context(|| format!("Failed to load mappings from {}", path.display()))?;
        return Ok(());
    }

    let Some(path) = vimkeys::config_paths::mappings_file() else {
        return Ok(());
    };
    if path.exists() {
        if let Err(e) = keymap::load_into(session.store_mut(), &path) {
            tracing::warn!("Failed to load mappings from {}: {}", path.display(), e);
        }
    }
    Ok(())
}

/// Feed one line of key notation, answering input panels from stdin
fn run_keys(
    session: &mut Session<JsonHost<Stdout>>,
    raw: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<()> {
    let keys: KeySequence = raw
        .parse()
        .with_context(|| format!("Invalid key notation: {}", raw))?;

    for key in keys {
        session.press(key);

        while let Some(request) = session.host_mut().take_panel() {
            eprint!("{}", request.prompt);
            let result = match lines.next() {
                Some(line) => PanelResult::Submitted(line.context("Failed to read stdin")?),
                None => PanelResult::Cancelled,
            };
            session.panel_done(result);
        }
    }
    Ok(())
}

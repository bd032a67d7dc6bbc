//! An editing session: the engine's state plus the host it drives
//!
//! The session owns the user mappings, the built-in table and the driver,
//! so nothing in the engine is process-global. Keys go in through
//! [`Session::press`]; resolved commands come out through the [`Host`].

use crate::config::Settings;
use crate::host::Host;
use crate::keymap::{
    CommandTable, Dispatch, Driver, KeySequence, KeyToken, KeymapError, MappingStore, Mode,
    PanelResult, ParserRegistry, Resolver, Step,
};

/// Guards against mappings whose replayed keys keep producing more keys
const MAX_REPLAY_DEPTH: usize = 100;

pub struct Session<H: Host> {
    host: H,
    store: MappingStore,
    table: CommandTable,
    parsers: ParserRegistry,
    driver: Driver,
}

impl<H: Host> Session<H> {
    pub fn new(host: H, settings: &Settings) -> Self {
        Self {
            host,
            store: MappingStore::with_variables(settings.variables()),
            table: CommandTable::builtin(),
            parsers: ParserRegistry::new(settings.non_interactive),
            driver: Driver::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    pub fn store(&self) -> &MappingStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut MappingStore {
        &mut self.store
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    pub fn set_non_interactive(&mut self, non_interactive: bool) {
        self.parsers.set_non_interactive(non_interactive);
    }

    pub fn add_mapping(&mut self, mode: Mode, keys: &str, target: &str) -> Result<(), KeymapError> {
        self.store.add(mode, keys, target)
    }

    pub fn remove_mapping(&mut self, mode: Mode, keys: &str) -> Result<(), KeymapError> {
        self.store.remove(mode, keys)
    }

    pub fn clear_mappings(&mut self) {
        self.store.clear();
    }

    /// Feed one keystroke and act on the outcome
    pub fn press(&mut self, key: KeyToken) -> Step {
        self.press_at_depth(key, 0)
    }

    /// Feed every key of a notation string
    pub fn press_keys(&mut self, keys: &str) -> Result<Vec<Step>, KeymapError> {
        let keys: KeySequence = keys.parse()?;
        Ok(keys.into_iter().map(|key| self.press(key)).collect())
    }

    /// Answer a [`Step::ShowPanel`] request
    pub fn panel_done(&mut self, result: PanelResult) -> Step {
        let step = self.driver.resume_panel(result);
        self.handle(&step, 0);
        step
    }

    /// Drop any half-typed command
    pub fn cancel(&mut self) {
        self.driver.reset();
    }

    fn press_at_depth(&mut self, key: KeyToken, depth: usize) -> Step {
        let mode = self.host.mode();
        let step = {
            let resolver = Resolver::new(&self.store, &self.table);
            self.driver.feed(key, mode, &resolver, &self.parsers)
        };
        self.handle(&step, depth);
        step
    }

    fn handle(&mut self, step: &Step, depth: usize) {
        match step {
            Step::Execute(dispatch) => self.execute(dispatch, depth),
            Step::ShowPanel(request) => self.host.show_input_panel(request),
            Step::Unresolved(keys) => self.host.unresolved(keys),
            Step::Unsupported(command) => {
                self.host
                    .status_message(&format!("Not supported: {}", command.name));
            }
            Step::AwaitMore | Step::AwaitInput | Step::Cancelled | Step::Suspended => {}
        }
    }

    fn execute(&mut self, dispatch: &Dispatch, depth: usize) {
        let args = dispatch.command.arguments();
        self.host.execute(&dispatch.command.name, &args);
        if let Some(on_done) = &dispatch.on_done {
            self.host.execute(on_done, &args);
        }

        if dispatch.replay.is_empty() {
            return;
        }
        if depth >= MAX_REPLAY_DEPTH {
            tracing::warn!("Replay depth exceeded, dropping {}", dispatch.replay);
            return;
        }
        for key in dispatch.replay.iter().copied() {
            self.press_at_depth(key, depth + 1);
        }
    }
}

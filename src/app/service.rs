//! Control unit: the host-facing service.
//!
//! [`TrainControlUnit`] owns the configuration, the lookahead cache, the
//! cab display and the active [`TrainControlSystem`].  The host keeps its
//! locomotive and event handlers and passes them in on every call; the
//! unit wraps them into a [`TickContext`] for the duration of that call.
//!
//! ```text
//!  LocomotivePort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                     │     TrainControlUnit      │
//!        TcsCommand ─▶│ lookahead · display · TCS │──▶ CabDisplay
//!                     └──────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::SupervisorConfig;
use crate::lookahead::SignalLookahead;
use crate::supervisor::builtin::BuiltinSupervisor;
use crate::supervisor::{SupervisorStatus, SystemFactory, TrainControlSystem};

use super::commands::TcsCommand;
use super::context::{CabDisplay, TickContext};
use super::ports::{EventSink, LocomotivePort};

// ───────────────────────────────────────────────────────────────
// TrainControlUnit
// ───────────────────────────────────────────────────────────────

/// One locomotive's train control unit.
pub struct TrainControlUnit {
    config: SupervisorConfig,
    /// Alternative systems selectable through `config.system_name`.
    registry: Vec<(String, SystemFactory)>,
    system: Option<Box<dyn TrainControlSystem>>,
    lookahead: SignalLookahead,
    display: CabDisplay,
    alerter_enabled: bool,
    alerter_button_pressed: bool,
    tick_count: u64,
}

impl TrainControlUnit {
    /// Construct the unit from configuration.
    ///
    /// Does **not** pick a system yet: call [`initialize`](Self::initialize)
    /// after registering alternatives.  Invalid monitor values are logged
    /// and kept; timers saturate them.
    pub fn new(config: SupervisorConfig) -> Self {
        if let Err((kind, e)) = config.validate() {
            warn!("{kind:?} monitor: {e}; continuing with saturated values");
        }
        Self {
            alerter_enabled: config.alerter_enabled,
            config,
            registry: Vec::new(),
            system: None,
            lookahead: SignalLookahead::new(),
            display: CabDisplay::default(),
            alerter_button_pressed: false,
            tick_count: 0,
        }
    }

    /// Make an alternative system selectable under `name`.  A later
    /// registration under the same name replaces the earlier one.
    pub fn register_system(&mut self, name: impl Into<String>, factory: SystemFactory) {
        let name = name.into();
        match self.registry.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = factory,
            None => self.registry.push((name, factory)),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Instantiate the configured system and run its initialization.
    pub fn initialize(&mut self, loco: &mut impl LocomotivePort, sink: &mut impl EventSink) {
        let mut system = self.instantiate();
        self.alerter_enabled = self.alerter_enabled_for(&*loco);
        self.lookahead.begin_tick();

        let mut ctx = TickContext::new(
            loco,
            sink,
            &mut self.lookahead,
            &mut self.display,
            self.alerter_enabled,
        );
        system.initialize(&mut ctx);

        info!("train control system '{}' initialized", system.name());
        self.system = Some(system);
    }

    /// Run one tick of the active system.  Does nothing before
    /// [`initialize`](Self::initialize).
    pub fn update(&mut self, loco: &mut impl LocomotivePort, sink: &mut impl EventSink) {
        self.alerter_enabled = self.alerter_enabled_for(&*loco);
        let Some(system) = self.system.as_mut() else {
            return;
        };
        self.lookahead.begin_tick();

        let mut ctx = TickContext::new(
            loco,
            sink,
            &mut self.lookahead,
            &mut self.display,
            self.alerter_enabled,
        );
        system.update(&mut ctx);
        self.tick_count += 1;
    }

    // ── Driver input ──────────────────────────────────────────

    /// Alerter button pressed (`true`) or released (`false`).
    pub fn alerter_pressed(
        &mut self,
        pressed: bool,
        loco: &mut impl LocomotivePort,
        sink: &mut impl EventSink,
    ) {
        self.alerter_button_pressed = pressed;
        let command = if pressed {
            TcsCommand::AlerterPressed
        } else {
            TcsCommand::AlerterReleased
        };
        self.handle_command(command, loco, sink);
    }

    pub fn alerter_reset(&mut self, loco: &mut impl LocomotivePort, sink: &mut impl EventSink) {
        self.handle_command(TcsCommand::AlerterReset, loco, sink);
    }

    /// Forward a raw host event code.  Unknown codes are dropped.
    pub fn handle_event_code(
        &mut self,
        code: u8,
        loco: &mut impl LocomotivePort,
        sink: &mut impl EventSink,
    ) {
        match TcsCommand::from_code(code) {
            Some(command) => self.handle_command(command, loco, sink),
            None => debug!("unknown event code {code}, ignored"),
        }
    }

    pub fn handle_command(
        &mut self,
        command: TcsCommand,
        loco: &mut impl LocomotivePort,
        sink: &mut impl EventSink,
    ) {
        let Some(system) = self.system.as_mut() else {
            debug!("{command:?} before initialization, ignored");
            return;
        };
        self.lookahead.begin_tick();

        let mut ctx = TickContext::new(
            loco,
            sink,
            &mut self.lookahead,
            &mut self.display,
            self.alerter_enabled,
        );
        system.handle_event(command, &mut ctx);
    }

    /// External emergency request.  Before initialization the emergency
    /// brake is commanded directly.
    pub fn set_emergency(&mut self, loco: &mut impl LocomotivePort, sink: &mut impl EventSink) {
        let Some(system) = self.system.as_mut() else {
            warn!("emergency requested before initialization, applying emergency brake");
            loco.set_emergency_brake();
            return;
        };
        self.lookahead.begin_tick();

        let mut ctx = TickContext::new(
            loco,
            sink,
            &mut self.lookahead,
            &mut self.display,
            self.alerter_enabled,
        );
        system.set_emergency(&mut ctx);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn display(&self) -> &CabDisplay {
        &self.display
    }

    /// Status of the active system; all clear before initialization.
    pub fn status(&self) -> SupervisorStatus {
        self.system
            .as_ref()
            .map_or_else(SupervisorStatus::default, |s| s.status())
    }

    pub fn is_activated(&self) -> bool {
        self.status().activated
    }

    /// Name of the active system, `None` before initialization.
    pub fn system_name(&self) -> Option<&str> {
        self.system.as_deref().map(|s| s.name())
    }

    pub fn is_alerter_enabled(&self) -> bool {
        self.alerter_enabled
    }

    pub fn is_alerter_button_pressed(&self) -> bool {
        self.alerter_button_pressed
    }

    /// Ticks executed since initialization.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    pub fn lookahead(&self) -> &SignalLookahead {
        &self.lookahead
    }

    /// Copy for another locomotive: same configuration and registry, fresh
    /// state, not initialized.
    pub fn duplicate(&self) -> Self {
        let mut copy = Self::new(self.config.clone());
        copy.registry = self.registry.clone();
        copy
    }

    // ── Internal ──────────────────────────────────────────────

    fn instantiate(&self) -> Box<dyn TrainControlSystem> {
        if self.config.uses_builtin() {
            return BuiltinSupervisor::factory(&self.config);
        }
        let name = self.config.system_name.as_deref().unwrap_or_default();
        match self.registry.iter().find(|(n, _)| n == name) {
            Some((_, factory)) => factory(&self.config),
            None => {
                warn!("train control system '{name}' not registered, using built-in");
                BuiltinSupervisor::factory(&self.config)
            }
        }
    }

    fn alerter_enabled_for(&self, loco: &impl LocomotivePort) -> bool {
        self.config.alerter_enabled && !(self.config.alerter_disable_external && !loco.is_cab_view())
    }
}

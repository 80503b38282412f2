//! Panel Controller
//!
//! Owns the panel's visibility and UI-only state. Each frame the host calls
//! [`PanelController::tick`] with the keyboard state and draws whatever
//! [`RenderCommand`] comes back; user interaction is fed back through
//! [`PanelController::handle`] as [`PanelAction`]s.

use log::{debug, info};
use stancecore::{
    Host, MULTIPLIER_RANGE, StanceContext, StanceField, StanceParameters, ToggleChord, WheelIndex,
};

use crate::input::{ChordDetector, KeyboardState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Hidden,
    Visible,
}

/// Which wheels the sliders edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WheelScope {
    #[default]
    All,
    Wheel(WheelIndex),
}

impl WheelScope {
    pub const ALL: [WheelScope; 5] = [
        WheelScope::All,
        WheelScope::Wheel(WheelIndex::FRONT_LEFT),
        WheelScope::Wheel(WheelIndex::FRONT_RIGHT),
        WheelScope::Wheel(WheelIndex::REAR_LEFT),
        WheelScope::Wheel(WheelIndex::REAR_RIGHT),
    ];

    pub fn label(self) -> &'static str {
        match self {
            WheelScope::All => "All Wheels",
            WheelScope::Wheel(wheel) => wheel.label(),
        }
    }

    /// Value shown for a field. "All" shows the front-left wheel.
    pub fn value(self, stance: &StanceParameters, field: StanceField) -> f64 {
        match self {
            WheelScope::All => stance.get(field, WheelIndex::FRONT_LEFT),
            WheelScope::Wheel(wheel) => stance.get(field, wheel),
        }
    }

    fn set(self, stance: &mut StanceParameters, field: StanceField, value: f64) {
        match self {
            WheelScope::All => stance.set_all(field, value),
            WheelScope::Wheel(wheel) => stance.set(field, wheel, value),
        }
    }

    fn reset(self, stance: &mut StanceParameters, field: StanceField) {
        match self {
            WheelScope::All => stance.reset_field(field),
            WheelScope::Wheel(wheel) => stance.reset_field_at(field, wheel),
        }
    }
}

/// Something the user did in the panel
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    SelectScope(WheelScope),
    SetField(StanceField, f64),
    ResetField(StanceField),
    SetMultiplier(f64),
    EditPresetName(String),
    SavePreset,
    /// 1-based preset index
    LoadPreset(usize),
    /// 1-based preset index
    DeletePreset(usize),
    ResetAll,
    Apply,
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PresetEntry {
    /// 1-based index, as used by load and delete
    pub index: usize,
    pub name: String,
    pub timestamp: i64,
}

/// Snapshot of everything the panel draws in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub scope: WheelScope,
    pub fields: [(StanceField, f64); 4],
    pub multiplier: f64,
    pub preset_name: String,
    pub presets: Vec<PresetEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Hidden,
    Panel(PanelView),
}

#[derive(Debug)]
pub struct PanelController {
    state: PanelState,
    chord: ChordDetector,
    scope: WheelScope,
    preset_name: String,
}

impl PanelController {
    pub fn new(toggle: ToggleChord) -> Self {
        Self {
            state: PanelState::Hidden,
            chord: ChordDetector::new(toggle),
            scope: WheelScope::All,
            preset_name: String::new(),
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == PanelState::Visible
    }

    pub fn scope(&self) -> WheelScope {
        self.scope
    }

    pub fn preset_name(&self) -> &str {
        &self.preset_name
    }

    pub fn toggle(&mut self) {
        self.state = match self.state {
            PanelState::Hidden => PanelState::Visible,
            PanelState::Visible => PanelState::Hidden,
        };
        debug!("stance panel {:?}", self.state);
    }

    /// Per-frame update: handle the toggle chord and describe what to draw
    pub fn tick<K: KeyboardState + ?Sized>(&mut self, keys: &K, ctx: &StanceContext) -> RenderCommand {
        if self.chord.update(keys) {
            self.toggle();
        }

        match self.state {
            PanelState::Hidden => RenderCommand::Hidden,
            PanelState::Visible => RenderCommand::Panel(self.view(ctx)),
        }
    }

    pub fn view(&self, ctx: &StanceContext) -> PanelView {
        let stance = &ctx.stance;
        PanelView {
            scope: self.scope,
            fields: StanceField::ALL.map(|field| (field, self.scope.value(stance, field))),
            multiplier: stance.multiplier(),
            preset_name: self.preset_name.clone(),
            presets: ctx
                .presets
                .presets()
                .iter()
                .enumerate()
                .map(|(i, preset)| PresetEntry {
                    index: i + 1,
                    name: preset.name.clone(),
                    timestamp: preset.timestamp,
                })
                .collect(),
        }
    }

    /// Apply one user action. Every change to the stance is pushed to the
    /// host immediately. Returns true if the stance changed.
    pub fn handle(&mut self, action: PanelAction, ctx: &mut StanceContext, host: &mut dyn Host) -> bool {
        let changed = match action {
            PanelAction::SelectScope(scope) => {
                self.scope = scope;
                false
            }
            PanelAction::SetField(field, value) => {
                self.scope.set(&mut ctx.stance, field, field.clamp(value));
                true
            }
            PanelAction::ResetField(field) => {
                self.scope.reset(&mut ctx.stance, field);
                true
            }
            PanelAction::SetMultiplier(value) => {
                let (min, max) = MULTIPLIER_RANGE;
                ctx.stance.set_multiplier(value.clamp(min, max));
                true
            }
            PanelAction::EditPresetName(name) => {
                self.preset_name = name;
                false
            }
            PanelAction::SavePreset => {
                if let Err(err) = ctx.presets.save(&self.preset_name, &ctx.stance) {
                    debug!("preset save incomplete: {err}");
                }
                self.preset_name.clear();
                false
            }
            PanelAction::LoadPreset(index) => return ctx.install_preset(index, host),
            PanelAction::DeletePreset(index) => {
                match ctx.presets.delete_preset(index) {
                    Ok(true) => {}
                    Ok(false) => debug!("no preset at index {index} to delete"),
                    Err(err) => debug!("preset delete not persisted: {err}"),
                }
                false
            }
            PanelAction::ResetAll => {
                info!("resetting stance");
                ctx.stance.reset();
                true
            }
            PanelAction::Apply => {
                ctx.apply(host);
                false
            }
            PanelAction::Close => {
                self.state = PanelState::Hidden;
                false
            }
        };

        if changed {
            ctx.apply(host);
        }
        changed
    }
}

impl Default for PanelController {
    fn default() -> Self {
        Self::new(ToggleChord::default())
    }
}

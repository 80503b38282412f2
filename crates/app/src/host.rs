//! Demo host: a schematic car and an egui keyboard adapter

use std::collections::HashSet;

use nalgebra::Vector3;
use panel::KeyboardState;
use stancecore::{Host, HostCapabilities, HostCar, Key, WHEEL_COUNT};

/// Car that just remembers the visuals it was given
#[derive(Debug, Clone)]
pub struct DemoCar {
    pub offsets: [Vector3<f64>; WHEEL_COUNT],
    pub cambers: [f64; WHEEL_COUNT],
    pub capabilities: HostCapabilities,
}

impl Default for DemoCar {
    fn default() -> Self {
        DemoCar {
            offsets: [Vector3::zeros(); WHEEL_COUNT],
            cambers: [0.0; WHEEL_COUNT],
            capabilities: HostCapabilities::all(),
        }
    }
}

impl HostCar for DemoCar {
    fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    fn set_wheel_visual_offset(&mut self, wheel: usize, offset: Vector3<f64>) {
        if let Some(slot) = self.offsets.get_mut(wheel) {
            *slot = offset;
        }
    }

    fn set_wheel_visual_camber(&mut self, wheel: usize, camber: f64) {
        if let Some(slot) = self.cambers.get_mut(wheel) {
            *slot = camber;
        }
    }
}

#[derive(Debug)]
pub struct DemoHost {
    pub car: DemoCar,
    /// Unchecking this simulates the host between cars
    pub car_loaded: bool,
}

impl DemoHost {
    pub fn new() -> Self {
        DemoHost { car: DemoCar::default(), car_loaded: true }
    }
}

impl Host for DemoHost {
    fn current_car(&mut self) -> Option<&mut dyn HostCar> {
        if self.car_loaded { Some(&mut self.car) } else { None }
    }
}

const TRIGGER_KEYS: [Key; 6] = [Key::S, Key::T, Key::W, Key::F6, Key::F7, Key::F8];

fn egui_key(key: Key) -> Option<egui::Key> {
    match key {
        Key::S => Some(egui::Key::S),
        Key::T => Some(egui::Key::T),
        Key::W => Some(egui::Key::W),
        Key::F6 => Some(egui::Key::F6),
        Key::F7 => Some(egui::Key::F7),
        Key::F8 => Some(egui::Key::F8),
        Key::Ctrl | Key::Shift | Key::Alt => None,
    }
}

/// One frame of egui keyboard state
#[derive(Debug, Default)]
pub struct EguiKeys {
    modifiers: egui::Modifiers,
    down: HashSet<Key>,
}

impl EguiKeys {
    pub fn capture(ctx: &egui::Context) -> Self {
        ctx.input(|input| EguiKeys {
            modifiers: input.modifiers,
            down: TRIGGER_KEYS
                .into_iter()
                .filter(|key| egui_key(*key).is_some_and(|k| input.key_down(k)))
                .collect(),
        })
    }
}

impl KeyboardState for EguiKeys {
    fn is_key_down(&self, key: Key) -> bool {
        match key {
            Key::Ctrl => self.modifiers.ctrl,
            Key::Shift => self.modifiers.shift,
            Key::Alt => self.modifiers.alt,
            other => self.down.contains(&other),
        }
    }
}

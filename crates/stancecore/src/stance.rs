//! Live stance parameters for the four wheels
//!
//! Values are stored in the units the user edits them in (millimeters and
//! degrees). Conversion to host units happens in the applier.

use serde::{Deserialize, Serialize};

use crate::error::StanceError;

pub const WHEEL_COUNT: usize = 4;

/// 1-based wheel position: 1 = Front-Left, 2 = Front-Right, 3 = Rear-Left, 4 = Rear-Right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WheelIndex(usize);

impl WheelIndex {
    pub const FRONT_LEFT: WheelIndex = WheelIndex(1);
    pub const FRONT_RIGHT: WheelIndex = WheelIndex(2);
    pub const REAR_LEFT: WheelIndex = WheelIndex(3);
    pub const REAR_RIGHT: WheelIndex = WheelIndex(4);

    pub const ALL: [WheelIndex; WHEEL_COUNT] = [
        WheelIndex::FRONT_LEFT,
        WheelIndex::FRONT_RIGHT,
        WheelIndex::REAR_LEFT,
        WheelIndex::REAR_RIGHT,
    ];

    pub fn new(index: usize) -> Result<Self, StanceError> {
        if (1..=WHEEL_COUNT).contains(&index) {
            Ok(WheelIndex(index))
        } else {
            Err(StanceError::InvalidWheel(index))
        }
    }

    /// The 1-based index
    pub fn get(self) -> usize {
        self.0
    }

    /// Zero-based slot, used for storage and for addressing host wheels
    pub fn slot(self) -> usize {
        self.0 - 1
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Front Left",
            2 => "Front Right",
            3 => "Rear Left",
            _ => "Rear Right",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self.0 {
            1 => "FL",
            2 => "FR",
            3 => "RL",
            _ => "RR",
        }
    }
}

impl TryFrom<usize> for WheelIndex {
    type Error = StanceError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        WheelIndex::new(index)
    }
}

/// One of the four per-wheel parameter arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StanceField {
    /// Lateral displacement in mm, positive = outward
    WheelOffset,
    /// Extra lateral displacement in mm, added to the offset
    TrackWidth,
    /// Rotation about the longitudinal axis in degrees
    Camber,
    /// Vertical displacement in mm, negative = lower
    RideHeight,
}

impl StanceField {
    pub const ALL: [StanceField; 4] = [
        StanceField::WheelOffset,
        StanceField::TrackWidth,
        StanceField::Camber,
        StanceField::RideHeight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StanceField::WheelOffset => "Wheel Offset",
            StanceField::TrackWidth => "Track Width",
            StanceField::Camber => "Camber",
            StanceField::RideHeight => "Ride Height",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            StanceField::Camber => "°",
            _ => "mm",
        }
    }

    /// Range offered by the panel. The store itself does not enforce it.
    pub fn ui_range(self) -> (f64, f64) {
        match self {
            StanceField::WheelOffset => (-100.0, 100.0),
            StanceField::TrackWidth => (-50.0, 50.0),
            StanceField::Camber => (-10.0, 10.0),
            StanceField::RideHeight => (-100.0, 50.0),
        }
    }

    pub fn clamp(self, value: f64) -> f64 {
        let (min, max) = self.ui_range();
        value.clamp(min, max)
    }
}

pub const MULTIPLIER_RANGE: (f64, f64) = (0.0, 2.0);

fn default_multiplier() -> f64 {
    1.0
}

/// Stance state of all four wheels plus the global multiplier
///
/// `Clone` yields a fully independent copy, which is what presets store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StanceParameters {
    pub wheel_offset: [f64; WHEEL_COUNT],
    pub track_width: [f64; WHEEL_COUNT],
    pub camber: [f64; WHEEL_COUNT],
    pub ride_height: [f64; WHEEL_COUNT],
    #[serde(default = "default_multiplier")]
    pub global_multiplier: f64,
}

impl Default for StanceParameters {
    fn default() -> Self {
        StanceParameters {
            wheel_offset: [0.0; WHEEL_COUNT],
            track_width: [0.0; WHEEL_COUNT],
            camber: [0.0; WHEEL_COUNT],
            ride_height: [0.0; WHEEL_COUNT],
            global_multiplier: 1.0,
        }
    }
}

impl StanceParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every wheel and restore the multiplier to 1.0
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn values(&self, field: StanceField) -> &[f64; WHEEL_COUNT] {
        match field {
            StanceField::WheelOffset => &self.wheel_offset,
            StanceField::TrackWidth => &self.track_width,
            StanceField::Camber => &self.camber,
            StanceField::RideHeight => &self.ride_height,
        }
    }

    fn values_mut(&mut self, field: StanceField) -> &mut [f64; WHEEL_COUNT] {
        match field {
            StanceField::WheelOffset => &mut self.wheel_offset,
            StanceField::TrackWidth => &mut self.track_width,
            StanceField::Camber => &mut self.camber,
            StanceField::RideHeight => &mut self.ride_height,
        }
    }

    pub fn get(&self, field: StanceField, wheel: WheelIndex) -> f64 {
        self.values(field)[wheel.slot()]
    }

    /// Store a value as-is. Range checks belong to the caller.
    pub fn set(&mut self, field: StanceField, wheel: WheelIndex, value: f64) {
        self.values_mut(field)[wheel.slot()] = value;
    }

    /// Write the same value to every wheel
    pub fn set_all(&mut self, field: StanceField, value: f64) {
        *self.values_mut(field) = [value; WHEEL_COUNT];
    }

    /// Zero one field on every wheel
    pub fn reset_field(&mut self, field: StanceField) {
        self.set_all(field, 0.0);
    }

    pub fn reset_field_at(&mut self, field: StanceField, wheel: WheelIndex) {
        self.set(field, wheel, 0.0);
    }

    /// True when every value, multiplier included, is a finite number
    pub fn is_finite(&self) -> bool {
        self.global_multiplier.is_finite()
            && StanceField::ALL
                .iter()
                .all(|field| self.values(*field).iter().all(|v| v.is_finite()))
    }

    pub fn multiplier(&self) -> f64 {
        self.global_multiplier
    }

    pub fn set_multiplier(&mut self, value: f64) {
        self.global_multiplier = value;
    }
}

//! Pushes stance values into the host's wheel visuals
//!
//! Stance values are edited in mm and degrees; the host expects meters and
//! radians. The global multiplier scales every value before conversion.

use log::debug;
use nalgebra::Vector3;

use crate::host::Host;
use crate::stance::{StanceParameters, WheelIndex};

const MM_PER_M: f64 = 1000.0;

/// Host-unit values for a single wheel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelTransform {
    /// Lateral displacement in meters
    pub lateral: f64,
    /// Vertical displacement in meters
    pub height: f64,
    /// Camber in radians
    pub camber: f64,
}

impl WheelTransform {
    /// Offset vector handed to the host, longitudinal component always zero
    pub fn offset(&self) -> Vector3<f64> {
        Vector3::new(self.lateral, self.height, 0.0)
    }
}

/// Compute the host-unit transform for one wheel
pub fn wheel_transform(params: &StanceParameters, wheel: WheelIndex) -> WheelTransform {
    let i = wheel.slot();
    let k = params.global_multiplier;

    WheelTransform {
        lateral: (params.wheel_offset[i] + params.track_width[i]) * k / MM_PER_M,
        height: params.ride_height[i] * k / MM_PER_M,
        camber: (params.camber[i] * k).to_radians(),
    }
}

/// Result of one apply pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// No car bound yet; nothing was sent
    NoCar,
    /// Calls made to the host, counted per setter
    Applied { offsets: usize, cambers: usize },
}

pub struct StanceApplier;

impl StanceApplier {
    /// Send the current stance of all four wheels to the host car.
    ///
    /// Setters the car does not advertise are skipped per call.
    pub fn apply(params: &StanceParameters, host: &mut dyn Host) -> ApplyOutcome {
        let Some(car) = host.current_car() else {
            debug!("no car bound, skipping stance apply");
            return ApplyOutcome::NoCar;
        };

        let caps = car.capabilities();
        let mut offsets = 0;
        let mut cambers = 0;

        for wheel in WheelIndex::ALL {
            let transform = wheel_transform(params, wheel);
            if caps.visual_offset {
                car.set_wheel_visual_offset(wheel.slot(), transform.offset());
                offsets += 1;
            }
            if caps.visual_camber {
                car.set_wheel_visual_camber(wheel.slot(), transform.camber);
                cambers += 1;
            }
        }

        ApplyOutcome::Applied { offsets, cambers }
    }
}

use nalgebra::Vector3;

/// Optional entry points a host car may or may not expose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    pub visual_offset: bool,
    pub visual_camber: bool,
}

impl HostCapabilities {
    pub fn all() -> Self {
        HostCapabilities { visual_offset: true, visual_camber: true }
    }

    pub fn none() -> Self {
        HostCapabilities { visual_offset: false, visual_camber: false }
    }
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self::all()
    }
}

/// The car currently driven in the host simulator.
///
/// Wheels are addressed by zero-based index. The setters are only called
/// when the matching flag in [`HostCapabilities`] is set.
pub trait HostCar {
    fn capabilities(&self) -> HostCapabilities;

    /// Visual offset in meters: x = lateral, y = vertical, z = longitudinal
    fn set_wheel_visual_offset(&mut self, wheel: usize, offset: Vector3<f64>);

    /// Visual camber in radians
    fn set_wheel_visual_camber(&mut self, wheel: usize, camber: f64);
}

/// Simulation environment the panel runs inside
pub trait Host {
    /// `None` until the host has a car bound (e.g. while loading)
    fn current_car(&mut self) -> Option<&mut dyn HostCar>;
}

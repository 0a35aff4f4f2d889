/// Boolean control channels for one car.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub forward: bool,
    pub left: bool,
    pub right: bool,
    pub reverse: bool,
}

/// Who drives the car.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlMode {
    /// Controls are supplied externally each tick (keyboard input lives
    /// outside this crate).
    Manual,
    /// Sensor readings feed the network; its outputs overwrite the controls.
    SelfDriving,
    /// Scripted traffic: drives forward forever, no sensor, no network.
    Dummy,
}

impl Controls {
    pub fn new(mode: ControlMode) -> Self {
        Self {
            forward: mode == ControlMode::Dummy,
            ..Self::default()
        }
    }

    /// Map the network's four output channels onto the control booleans.
    /// Outputs are hard-threshold binary, so any missing channel reads as
    /// released.
    pub fn from_outputs(outputs: &[f32]) -> Self {
        let pressed = |i: usize| outputs.get(i).copied().unwrap_or(0.0) > 0.5;
        Self {
            forward: pressed(0),
            left: pressed(1),
            right: pressed(2),
            reverse: pressed(3),
        }
    }
}

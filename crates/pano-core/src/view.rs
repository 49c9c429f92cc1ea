//! Camera parameters for a rectilinear panorama view and the fixed motions
//! applied to them: directional nudges, the view limiter and autorotate.

use crate::constants::{
    AUTOROTATE_TARGET_FOV, AUTOROTATE_TARGET_PITCH, AUTOROTATE_YAW_SPEED, FOV_MAX, FOV_MIN,
    IDLE_DELAY_MS, MAX_HFOV_DEG, MAX_VFOV_DEG, NUDGE_STEP, PRESS_FRICTION, PRESS_VELOCITY,
};
use serde::{Deserialize, Serialize};

/// Spherical camera orientation, all angles in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewParameters {
    pub yaw: f64,
    pub pitch: f64,
    pub fov: f64,
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            fov: std::f64::consts::FRAC_PI_2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Nudge {
    Up,
    Down,
    Left,
    Right,
    In,
    Out,
}

impl Nudge {
    pub const ALL: [Nudge; 6] = [
        Nudge::Up,
        Nudge::Down,
        Nudge::Left,
        Nudge::Right,
        Nudge::In,
        Nudge::Out,
    ];

    /// Continuous motion while the control for this direction is held down.
    pub fn press_control(self) -> PressControl {
        let (axis, sign) = match self {
            Nudge::Up => (PressAxis::Y, -1.0),
            Nudge::Down => (PressAxis::Y, 1.0),
            Nudge::Left => (PressAxis::X, -1.0),
            Nudge::Right => (PressAxis::X, 1.0),
            Nudge::In => (PressAxis::Zoom, -1.0),
            Nudge::Out => (PressAxis::Zoom, 1.0),
        };
        PressControl {
            axis,
            velocity: sign * PRESS_VELOCITY,
            friction: PRESS_FRICTION,
        }
    }

    /// Name the press control is registered under with the engine.
    pub fn control_method_id(self) -> &'static str {
        match self {
            Nudge::Up => "upElement",
            Nudge::Down => "downElement",
            Nudge::Left => "leftElement",
            Nudge::Right => "rightElement",
            Nudge::In => "inElement",
            Nudge::Out => "outElement",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PressAxis {
    X,
    Y,
    Zoom,
}

impl PressAxis {
    pub fn as_str(self) -> &'static str {
        match self {
            PressAxis::X => "x",
            PressAxis::Y => "y",
            PressAxis::Zoom => "zoom",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PressControl {
    pub axis: PressAxis,
    pub velocity: f64,
    pub friction: f64,
}

#[inline]
pub fn clamp_fov(fov: f64) -> f64 {
    if fov.is_nan() {
        return FOV_MIN;
    }
    fov.clamp(FOV_MIN, FOV_MAX)
}

impl ViewParameters {
    /// Apply one directional step. Field of view always lands in
    /// `[FOV_MIN, FOV_MAX]`, whatever the starting value.
    pub fn nudged(self, dir: Nudge) -> Self {
        let mut p = self;
        match dir {
            Nudge::Up => p.pitch += NUDGE_STEP,
            Nudge::Down => p.pitch -= NUDGE_STEP,
            Nudge::Left => p.yaw -= NUDGE_STEP,
            Nudge::Right => p.yaw += NUDGE_STEP,
            Nudge::In => p.fov = clamp_fov(p.fov - NUDGE_STEP),
            Nudge::Out => p.fov = clamp_fov(p.fov + NUDGE_STEP),
        }
        p
    }
}

/// "Traditional" limiter: caps zoom by the face resolution and bounds the
/// vertical and horizontal field of view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewLimits {
    pub max_resolution: u32,
    pub max_vfov: f64,
    pub max_hfov: f64,
}

impl ViewLimits {
    pub fn traditional(face_size: u32) -> Self {
        Self {
            max_resolution: face_size,
            max_vfov: MAX_VFOV_DEG.to_radians(),
            max_hfov: MAX_HFOV_DEG.to_radians(),
        }
    }
}

/// Continuous idle motion handed to the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Autorotate {
    pub yaw_speed: f64,
    pub target_pitch: f64,
    pub target_fov: f64,
}

pub const AUTOROTATE: Autorotate = Autorotate {
    yaw_speed: AUTOROTATE_YAW_SPEED,
    target_pitch: AUTOROTATE_TARGET_PITCH,
    target_fov: AUTOROTATE_TARGET_FOV,
};

impl Default for Autorotate {
    fn default() -> Self {
        AUTOROTATE
    }
}

/// When the engine should start the idle motion on its own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IdleMovement {
    Never,
    After { delay_ms: u32, motion: Autorotate },
}

impl IdleMovement {
    pub fn autorotate() -> Self {
        IdleMovement::After {
            delay_ms: IDLE_DELAY_MS,
            motion: AUTOROTATE,
        }
    }
}

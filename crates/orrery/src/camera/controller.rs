//! Three-state camera mode machine.
//!
//! `Free` flies the camera with movement keys and free-look while the host holds
//! pointer capture. `Follow` picks a body on primary press and orbits it with the
//! `FollowOrbitRig`. `Place` routes primary presses to the `PlacementResolver`.
//! Modes change only through `set_mode`.

use glam::{DVec2, DVec3};

use crate::api::types::BodyId;
use crate::camera::rig::FollowOrbitRig;
use crate::config::SimConfig;
use crate::orbit::placement::{Placement, PlacementResolver};
use crate::orbit::registry::BodyRegistry;
use crate::renderer::camera::Camera3D;
use crate::renderer::traits::RenderBoundary;

// ── Key codes (DOM keyCode) ─────────────────────────────────────────

pub const KEY_W: u32 = 87;
pub const KEY_A: u32 = 65;
pub const KEY_S: u32 = 83;
pub const KEY_D: u32 = 68;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    Free,
    Follow,
    Place,
}

impl CameraMode {
    /// Panel index: 0 = Free, 1 = Follow, 2 = Place.
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::Free),
            1 => Some(Self::Follow),
            2 => Some(Self::Place),
            _ => None,
        }
    }

    pub fn index(self) -> u32 {
        match self {
            Self::Free => 0,
            Self::Follow => 1,
            Self::Place => 2,
        }
    }
}

impl std::fmt::Display for CameraMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Free => "free",
            Self::Follow => "follow",
            Self::Place => "place",
        };
        f.write_str(name)
    }
}

/// Result of `set_mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChange {
    pub from: CameraMode,
    pub to: CameraMode,
    /// The host should release exclusive pointer capture.
    pub release_capture: bool,
}

/// What a primary press (click/tap) did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimaryAction {
    /// Nothing to do (Free mode with capture held, or Follow mode missing every body).
    Ignored,
    /// Free mode without capture: the host should acquire pointer capture.
    RequestCapture,
    /// Follow mode: `body` is now followed from `distance`.
    Selected { body: BodyId, distance: f64 },
    /// Place mode: the ray hit the orbital plane, or None if it missed.
    Place(Option<Placement>),
}

#[derive(Debug, Clone, Copy, Default)]
struct MoveKeys {
    forward: bool,
    back: bool,
    left: bool,
    right: bool,
}

impl MoveKeys {
    /// Unit direction in camera space (right, up, back), or zero.
    fn direction(&self) -> DVec3 {
        let mut dir = DVec3::ZERO;
        if self.forward {
            dir.z -= 1.0;
        }
        if self.back {
            dir.z += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }
}

pub struct CameraModeController {
    mode: CameraMode,
    selected: Option<BodyId>,
    rig: FollowOrbitRig,
    keys: MoveKeys,
    pointer_captured: bool,
    drag_active: bool,
    last_pointer: DVec2,
    move_speed: f64,
    look_sensitivity: f64,
}

impl CameraModeController {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            mode: CameraMode::Free,
            selected: None,
            rig: FollowOrbitRig::new(config),
            keys: MoveKeys::default(),
            pointer_captured: false,
            drag_active: false,
            last_pointer: DVec2::ZERO,
            move_speed: config.move_speed,
            look_sensitivity: config.look_sensitivity,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    pub fn rig(&self) -> &FollowOrbitRig {
        &self.rig
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_active
    }

    pub fn pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    /// Switch modes. Every call clears the selection, the rig angles and any drag,
    /// even when re-selecting the current mode.
    pub fn set_mode(&mut self, mode: CameraMode) -> ModeChange {
        let from = self.mode;
        self.mode = mode;
        self.selected = None;
        self.rig.reset();
        self.drag_active = false;

        let release_capture = mode == CameraMode::Free && self.pointer_captured;
        if release_capture {
            self.pointer_captured = false;
        }
        log::info!("camera mode {from} -> {mode}");
        ModeChange { from, to: mode, release_capture }
    }

    /// Host reports that exclusive pointer capture was gained or lost.
    pub fn set_pointer_captured(&mut self, captured: bool) {
        self.pointer_captured = captured;
    }

    /// Returns true if the key is a movement key.
    pub fn key_down(&mut self, key_code: u32) -> bool {
        self.set_key(key_code, true)
    }

    pub fn key_up(&mut self, key_code: u32) -> bool {
        self.set_key(key_code, false)
    }

    fn set_key(&mut self, key_code: u32, pressed: bool) -> bool {
        let slot = match key_code {
            KEY_W => &mut self.keys.forward,
            KEY_S => &mut self.keys.back,
            KEY_A => &mut self.keys.left,
            KEY_D => &mut self.keys.right,
            _ => return false,
        };
        *slot = pressed;
        true
    }

    /// Handle a primary press at pointer pixel (x, y). `sim_time` is the current
    /// simulation time; placements are phased against it.
    pub fn primary_press<B: RenderBoundary + ?Sized>(
        &mut self,
        x: f64,
        y: f64,
        camera: &Camera3D,
        registry: &BodyRegistry,
        boundary: &B,
        sim_time: f64,
        new_body_speed: f64,
    ) -> PrimaryAction {
        let ray = camera.ray_from_ndc(camera.pixels_to_ndc(x, y));
        match self.mode {
            CameraMode::Free => {
                if self.pointer_captured {
                    PrimaryAction::Ignored
                } else {
                    PrimaryAction::RequestCapture
                }
            }
            CameraMode::Place => {
                PrimaryAction::Place(PlacementResolver::resolve(&ray, sim_time, new_body_speed))
            }
            CameraMode::Follow => {
                let hit = boundary.hit_test(&ray, &|id| registry.owner_of(id).is_some());
                let action = match hit.and_then(|h| registry.owner_of(h.entity)) {
                    Some(body) => self.select(body, registry),
                    None => PrimaryAction::Ignored,
                };
                // Pressing while following starts an orbit drag.
                if self.selected.is_some() {
                    self.drag_active = true;
                    self.last_pointer = DVec2::new(x, y);
                }
                action
            }
        }
    }

    /// Follow `body`, resetting the rig. Unknown bodies are ignored.
    pub fn select(&mut self, body: BodyId, registry: &BodyRegistry) -> PrimaryAction {
        let Some(radius) = registry.body(body).map(|b| b.radius()) else {
            return PrimaryAction::Ignored;
        };
        self.selected = Some(body);
        self.drag_active = false;
        self.rig.frame(radius);
        log::info!("following {body} at distance {:.2}", self.rig.distance());
        PrimaryAction::Selected { body, distance: self.rig.distance() }
    }

    /// Pointer moved to pixel (x, y).
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let pos = DVec2::new(x, y);
        if self.drag_active && self.selected.is_some() {
            let delta = pos - self.last_pointer;
            self.rig.drag(delta.x, delta.y);
        }
        self.last_pointer = pos;
    }

    pub fn pointer_release(&mut self) {
        self.drag_active = false;
    }

    /// Relative pointer motion while captured. Drives free-look.
    pub fn pointer_motion(&mut self, dx: f64, dy: f64, camera: &mut Camera3D) {
        if self.mode == CameraMode::Free && self.pointer_captured {
            camera.rotate(dx, dy, self.look_sensitivity);
        }
    }

    /// Wheel zoom. Applies in Follow mode, selected body or not.
    pub fn wheel(&mut self, delta_y: f64) {
        if self.mode == CameraMode::Follow {
            self.rig.zoom(delta_y);
        }
    }

    /// Per-frame camera update. Call after the registry tick so positions are current.
    pub fn update(&mut self, camera: &mut Camera3D, registry: &BodyRegistry) {
        match self.mode {
            CameraMode::Free => {
                if self.pointer_captured {
                    let dir = self.keys.direction();
                    if dir != DVec3::ZERO {
                        camera.translate_local(dir * self.move_speed);
                    }
                }
            }
            CameraMode::Follow => {
                let Some(target) = self.selected.and_then(|id| registry.body(id)).map(|b| b.position()) else {
                    return;
                };
                camera.position = target + self.rig.offset();
                camera.look_at(target);
            }
            CameraMode::Place => {}
        }
    }
}

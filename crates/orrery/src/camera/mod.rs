pub mod controller;
pub mod rig;

pub use controller::{CameraMode, CameraModeController, ModeChange, PrimaryAction};
pub use rig::FollowOrbitRig;

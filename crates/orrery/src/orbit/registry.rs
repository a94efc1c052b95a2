//! Authoritative store of orbiting bodies and their attachments.
//!
//! Ownership is an explicit tree: each `Body` lists its satellites and rings as
//! tagged `Attachment`s, and `tick` composes transforms parent-first. Nothing here
//! integrates motion; orbital positions are re-derived from simulation time.

use std::collections::HashMap;

use glam::{DQuat, DVec3, EulerRot};

use crate::api::types::{BodyId, EntityId, RingId, SatelliteId};
use crate::components::mesh::{Color, MeshComponent};
use crate::config::SimConfig;
use crate::core::rng::Rng;
use crate::error::{OrreryError, Result};
use crate::orbit::solver::{self, Orbit};
use crate::renderer::traits::{RenderBoundary, SpawnRequest};

/// Samples per orbit trace.
pub const TRACE_SAMPLES: usize = 100;
const TRACE_COLOR: u32 = 0x555555;
/// Cloud shell sits just above the surface.
const CLOUD_LIFT: f64 = 0.02;
const CLOUD_OPACITY: f32 = 0.6;
/// Satellites get a small random roll in [-ROLL_JITTER, ROLL_JITTER).
const ROLL_JITTER: f64 = 0.1;
/// Gap between a label and the top of whatever it sits on.
const LABEL_GAP: f64 = 0.5;
/// Seed used until the first `reseed` when no fixed seed is configured.
const DEFAULT_SEED: u64 = 0x5eed_0a11;

/// Parameters for `create_body`.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub name: Option<String>,
    pub radius: f64,
    pub orbital_distance: f64,
    pub angular_speed: f64,
    pub color: Color,
    pub radius_factor_x: f64,
    pub radius_factor_z: f64,
    /// None draws a random phase in [0, 2π).
    pub phase_offset: Option<f64>,
    pub clouds: bool,
    /// Rendered position at creation; defaults to the solver's answer.
    pub initial_position: Option<DVec3>,
}

impl BodyDesc {
    pub fn new(radius: f64, orbital_distance: f64, angular_speed: f64, color: Color) -> Self {
        Self {
            name: None,
            radius,
            orbital_distance,
            angular_speed,
            color,
            radius_factor_x: 1.0,
            radius_factor_z: 1.0,
            phase_offset: None,
            clouds: false,
            initial_position: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_radius_factors(mut self, x: f64, z: f64) -> Self {
        self.radius_factor_x = x;
        self.radius_factor_z = z;
        self
    }

    pub fn with_phase_offset(mut self, phase_offset: f64) -> Self {
        self.phase_offset = Some(phase_offset);
        self
    }

    pub fn with_clouds(mut self) -> Self {
        self.clouds = true;
        self
    }

    pub fn at(mut self, position: DVec3) -> Self {
        self.initial_position = Some(position);
        self
    }
}

/// Parameters for `create_satellite`.
#[derive(Debug, Clone)]
pub struct SatelliteDesc {
    pub name: Option<String>,
    pub radius: f64,
    pub orbital_distance: f64,
    pub angular_speed: f64,
    pub color: Color,
    /// Tilt of the satellite's orbital plane (radians).
    pub inclination: f64,
    pub phase_offset: Option<f64>,
}

impl SatelliteDesc {
    pub fn new(radius: f64, orbital_distance: f64, angular_speed: f64, inclination: f64, color: Color) -> Self {
        Self {
            name: None,
            radius,
            orbital_distance,
            angular_speed,
            color,
            inclination,
            phase_offset: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_phase_offset(mut self, phase_offset: f64) -> Self {
        self.phase_offset = Some(phase_offset);
        self
    }
}

/// Something a body owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    Satellite(SatelliteId),
    Ring(RingId),
}

#[derive(Debug, Clone)]
struct CloudLayer {
    handle: EntityId,
    spin: f64,
}

/// A planet-like body orbiting the shared centre.
#[derive(Debug, Clone)]
pub struct Body {
    id: BodyId,
    handle: EntityId,
    trace: EntityId,
    name: Option<String>,
    radius: f64,
    orbit: Orbit,
    spin: f64,
    clouds: Option<CloudLayer>,
    attachments: Vec<Attachment>,
    position: DVec3,
}

impl Body {
    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn handle(&self) -> EntityId {
        self.handle
    }

    /// Handle of the orbit trace drawn for this body.
    pub fn trace(&self) -> EntityId {
        self.trace
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    /// Accumulated self-rotation about Y (radians).
    pub fn spin(&self) -> f64 {
        self.spin
    }

    pub fn cloud_spin(&self) -> Option<f64> {
        self.clouds.as_ref().map(|c| c.spin)
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Position as of the last tick (or creation).
    pub fn position(&self) -> DVec3 {
        self.position
    }

    fn rotation(&self) -> DQuat {
        DQuat::from_rotation_y(self.spin)
    }
}

/// A moon orbiting in its parent's frame, on a tilted pivot.
#[derive(Debug, Clone)]
pub struct Satellite {
    id: SatelliteId,
    parent: BodyId,
    handle: EntityId,
    name: Option<String>,
    radius: f64,
    orbital_distance: f64,
    angular_speed: f64,
    phase_offset: f64,
    inclination: f64,
    roll: f64,
    /// Cosmetic drift added to the inclination, unbounded.
    precession: f64,
    /// Pivot angle as of the last tick.
    angle: f64,
    position: DVec3,
}

impl Satellite {
    pub fn id(&self) -> SatelliteId {
        self.id
    }

    pub fn parent(&self) -> BodyId {
        self.parent
    }

    pub fn handle(&self) -> EntityId {
        self.handle
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn orbital_distance(&self) -> f64 {
        self.orbital_distance
    }

    pub fn angular_speed(&self) -> f64 {
        self.angular_speed
    }

    pub fn phase_offset(&self) -> f64 {
        self.phase_offset
    }

    pub fn inclination(&self) -> f64 {
        self.inclination
    }

    pub fn roll(&self) -> f64 {
        self.roll
    }

    /// Inclination plus accumulated precession.
    pub fn tilt(&self) -> f64 {
        self.inclination + self.precession
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    fn pivot(&self) -> DQuat {
        DQuat::from_euler(EulerRot::XYZ, self.tilt(), self.angle, self.roll)
    }

    /// Offset from the parent's centre.
    fn local_offset(&self) -> DVec3 {
        self.pivot() * DVec3::new(self.orbital_distance, 0.0, 0.0)
    }
}

/// Flat annulus carried by a body.
#[derive(Debug, Clone)]
pub struct Ring {
    id: RingId,
    parent: BodyId,
    handle: EntityId,
    inner_radius: f64,
    outer_radius: f64,
    inclination: f64,
    spin: f64,
    position: DVec3,
}

impl Ring {
    pub fn id(&self) -> RingId {
        self.id
    }

    pub fn parent(&self) -> BodyId {
        self.parent
    }

    pub fn handle(&self) -> EntityId {
        self.handle
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn inclination(&self) -> f64 {
        self.inclination
    }

    pub fn spin(&self) -> f64 {
        self.spin
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn orientation(&self) -> DQuat {
        DQuat::from_euler(EulerRot::XYZ, self.inclination, 0.0, self.spin)
    }
}

/// Per-tick increments of the cosmetic accumulators.
#[derive(Debug, Clone, Copy)]
struct SpinSteps {
    body: f64,
    clouds: f64,
    precession: f64,
    ring: f64,
}

pub struct BodyRegistry {
    bodies: Vec<Body>,
    satellites: Vec<Satellite>,
    rings: Vec<Ring>,
    /// Every drawable a body owns (itself, clouds, satellites, rings) → that body.
    owners: HashMap<EntityId, BodyId>,
    rng: Rng,
    steps: SpinSteps,
    /// Simulation time of the last tick.
    sim_time: f64,
}

impl BodyRegistry {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            bodies: Vec::new(),
            satellites: Vec::new(),
            rings: Vec::new(),
            owners: HashMap::new(),
            rng: Rng::new(config.rng_seed.unwrap_or(DEFAULT_SEED)),
            steps: SpinSteps {
                body: config.spin_step,
                clouds: config.cloud_spin_step,
                precession: config.satellite_precession_step,
                ring: config.ring_spin_step,
            },
            sim_time: 0.0,
        }
    }

    /// Restart the phase and roll generator. Affects bodies created afterwards.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Rng::new(seed);
    }

    /// Register a body and emit its creation events (sphere, optional clouds, orbit trace).
    pub fn create_body<B: RenderBoundary + ?Sized>(&mut self, boundary: &mut B, desc: BodyDesc) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        let phase_offset = desc.phase_offset.unwrap_or_else(|| self.rng.phase());
        let orbit = Orbit {
            radius_x: desc.orbital_distance * desc.radius_factor_x,
            radius_z: desc.orbital_distance * desc.radius_factor_z,
            angular_speed: desc.angular_speed,
            phase_offset,
        };
        let position = desc
            .initial_position
            .unwrap_or_else(|| orbit.position(self.sim_time));
        let tag = desc.name.clone().unwrap_or_else(|| "body".to_string());

        let handle = boundary.spawn(
            SpawnRequest::new(tag.clone(), MeshComponent::sphere(desc.radius as f32, desc.color)).at(position),
        );
        self.owners.insert(handle, id);

        let clouds = if desc.clouds {
            let mesh = MeshComponent::sphere((desc.radius + CLOUD_LIFT) as f32, Color::WHITE)
                .with_opacity(CLOUD_OPACITY);
            let cloud_handle = boundary.spawn(SpawnRequest::new(format!("{tag}:clouds"), mesh).at(position));
            self.owners.insert(cloud_handle, id);
            Some(CloudLayer { handle: cloud_handle, spin: 0.0 })
        } else {
            None
        };

        let points = solver::orbit_trace(&orbit, TRACE_SAMPLES)
            .into_iter()
            .map(|p| p.as_vec3())
            .collect();
        let trace = boundary.spawn(SpawnRequest::new(
            format!("{tag}:orbit"),
            MeshComponent::path(points, Color::from_hex(TRACE_COLOR)),
        ));

        log::debug!(
            "{id} created: distance {:.2}, speed {:.2}, phase {:.3}",
            desc.orbital_distance,
            desc.angular_speed,
            phase_offset
        );

        self.bodies.push(Body {
            id,
            handle,
            trace,
            name: desc.name,
            radius: desc.radius,
            orbit,
            spin: 0.0,
            clouds,
            attachments: Vec::new(),
            position,
        });
        id
    }

    /// Attach a satellite to `parent`. Rejected without side effects if the parent is unknown.
    pub fn create_satellite<B: RenderBoundary + ?Sized>(
        &mut self,
        boundary: &mut B,
        parent: BodyId,
        desc: SatelliteDesc,
    ) -> Result<SatelliteId> {
        let parent_position = match self.body(parent) {
            Some(body) => body.position,
            None => {
                log::warn!("satellite rejected: unknown parent {parent}");
                return Err(OrreryError::InvalidParent(parent));
            }
        };

        let id = SatelliteId(self.satellites.len() as u32);
        let phase_offset = desc.phase_offset.unwrap_or_else(|| self.rng.phase());
        let roll = self.rng.range(-ROLL_JITTER, ROLL_JITTER);
        let mut satellite = Satellite {
            id,
            parent,
            handle: EntityId(0),
            name: desc.name,
            radius: desc.radius,
            orbital_distance: desc.orbital_distance,
            angular_speed: desc.angular_speed,
            phase_offset,
            inclination: desc.inclination,
            roll,
            precession: 0.0,
            angle: solver::orbital_angle(self.sim_time, desc.angular_speed, phase_offset),
            position: parent_position,
        };
        satellite.position = parent_position + satellite.local_offset();

        let tag = satellite.name.clone().unwrap_or_else(|| "satellite".to_string());
        satellite.handle = boundary.spawn(
            SpawnRequest::new(tag, MeshComponent::sphere(desc.radius as f32, desc.color))
                .at(satellite.position)
                .rotated(satellite.pivot()),
        );
        self.owners.insert(satellite.handle, parent);
        self.bodies[parent.0 as usize].attachments.push(Attachment::Satellite(id));
        self.satellites.push(satellite);
        Ok(id)
    }

    /// Attach a ring to `parent`. Requires `inner_radius < outer_radius`.
    pub fn create_ring<B: RenderBoundary + ?Sized>(
        &mut self,
        boundary: &mut B,
        parent: BodyId,
        inner_radius: f64,
        outer_radius: f64,
        inclination: f64,
        color: Color,
    ) -> Result<RingId> {
        let bounds_ok = inner_radius.is_finite() && outer_radius.is_finite() && inner_radius < outer_radius;
        if !bounds_ok {
            log::warn!("ring rejected: inner {inner_radius} / outer {outer_radius}");
            return Err(OrreryError::InvalidRingBounds { inner: inner_radius, outer: outer_radius });
        }
        let parent_position = match self.body(parent) {
            Some(body) => body.position,
            None => {
                log::warn!("ring rejected: unknown parent {parent}");
                return Err(OrreryError::InvalidParent(parent));
            }
        };

        let id = RingId(self.rings.len() as u32);
        let mut ring = Ring {
            id,
            parent,
            handle: EntityId(0),
            inner_radius,
            outer_radius,
            inclination,
            spin: 0.0,
            position: parent_position,
        };
        ring.handle = boundary.spawn(
            SpawnRequest::new("ring", MeshComponent::ring(inner_radius as f32, outer_radius as f32, color))
                .at(parent_position)
                .rotated(ring.orientation()),
        );
        self.owners.insert(ring.handle, parent);
        self.bodies[parent.0 as usize].attachments.push(Attachment::Ring(id));
        self.rings.push(ring);
        Ok(id)
    }

    /// Advance to `sim_time`: re-solve every orbit, then compose children onto
    /// their parents, then advance the cosmetic accumulators. Call once per frame.
    pub fn tick(&mut self, sim_time: f64) {
        self.sim_time = sim_time;
        let steps = self.steps;

        for body in &mut self.bodies {
            body.position = body.orbit.position(sim_time);
            body.spin += steps.body;
            if let Some(clouds) = &mut body.clouds {
                clouds.spin += steps.clouds;
            }
        }

        let bodies = &self.bodies;
        for satellite in &mut self.satellites {
            satellite.angle = solver::orbital_angle(sim_time, satellite.angular_speed, satellite.phase_offset);
            satellite.precession += steps.precession;
            let parent = &bodies[satellite.parent.0 as usize];
            satellite.position = parent.position + satellite.local_offset();
        }

        for ring in &mut self.rings {
            ring.spin += steps.ring;
            ring.position = bodies[ring.parent.0 as usize].position;
        }
    }

    /// Push current transforms to the rendering boundary.
    pub fn sync<B: RenderBoundary + ?Sized>(&self, boundary: &mut B) {
        for body in &self.bodies {
            boundary.set_transform(body.handle, body.position, body.rotation());
            if let Some(clouds) = &body.clouds {
                boundary.set_transform(clouds.handle, body.position, DQuat::from_rotation_y(clouds.spin));
            }
        }
        for satellite in &self.satellites {
            boundary.set_transform(satellite.handle, satellite.position, satellite.pivot());
        }
        for ring in &self.rings {
            boundary.set_transform(ring.handle, ring.position, ring.orientation());
        }
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0 as usize)
    }

    pub fn satellite(&self, id: SatelliteId) -> Option<&Satellite> {
        self.satellites.get(id.0 as usize)
    }

    pub fn ring(&self, id: RingId) -> Option<&Ring> {
        self.rings.get(id.0 as usize)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Body owning a drawable, walking up from moons, rings and cloud shells.
    pub fn owner_of(&self, handle: EntityId) -> Option<BodyId> {
        self.owners.get(&handle).copied()
    }

    /// Height at which a body's label clears the body and its widest ring.
    pub fn label_offset(&self, id: BodyId) -> Option<f64> {
        let body = self.body(id)?;
        let mut top = body.radius;
        for attachment in &body.attachments {
            match attachment {
                Attachment::Ring(ring_id) => {
                    if let Some(ring) = self.ring(*ring_id) {
                        top = top.max(ring.outer_radius);
                    }
                }
                // Satellites orbit away from the body; they do not raise its label.
                Attachment::Satellite(_) => {}
            }
        }
        Some(top + LABEL_GAP)
    }

    /// Height at which a satellite's label clears the satellite.
    pub fn satellite_label_offset(&self, id: SatelliteId) -> Option<f64> {
        self.satellite(id).map(|s| s.radius + LABEL_GAP)
    }

    /// Simulation time of the last tick.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }
}

/// Solar System: interactive orrery with time-driven orbits.
///
/// Three camera modes chosen from the control panel: free flight (WASD + mouse
/// look under pointer capture), planet follow (click a planet, drag to orbit,
/// wheel to zoom) and placement (click the orbital plane to spawn a body).
use orrery::*;

use crate::bodies;

// ── Config ───────────────────────────────────────────────────────────

const CONFIG_JSON: &str = include_str!("../orrery.json");

// ── Render capacity ──────────────────────────────────────────────────

/// Bodies the operator can place before the renderer starts dropping them.
const PLACEMENT_BUDGET: usize = 1000;
/// Star, planets, Earth's clouds, moons and rings.
const PRESET_INSTANCES: usize = 1 + bodies::PLANET_COUNT + 1 + bodies::MOON_COUNT + bodies::RINGS.len();
/// Vertices in one orbit trace (closed, so one more than the samples).
const TRACE_VERTICES: usize = TRACE_SAMPLES + 1;

// ── Custom event kinds from the control panel ────────────────────────

/// a = mode index (0 free, 1 follow, 2 place).
const CUSTOM_SET_MODE: u32 = 1;
/// a = global speed multiplier.
const CUSTOM_SET_SPEED: u32 = 2;
/// a = radius of the next placed body.
const CUSTOM_NEW_BODY_RADIUS: u32 = 3;
/// a = angular speed of the next placed body.
const CUSTOM_NEW_BODY_SPEED: u32 = 4;
/// a, b, c = RGB of the next placed body.
const CUSTOM_NEW_BODY_COLOR: u32 = 5;

// ── Game event kinds to the page ─────────────────────────────────────

/// a = mode index, b = 1 if pointer capture must be released.
const EVENT_MODE: f32 = 1.0;
/// a = x, b = z, c = body id.
const EVENT_PLACED: f32 = 2.0;
const EVENT_PLACE_MISSED: f32 = 3.0;
/// a = body id, b = follow distance.
const EVENT_FOLLOWING: f32 = 4.0;
const EVENT_CAPTURE_REQUEST: f32 = 5.0;
/// a = simulation time, b = global speed.
const EVENT_TIME_INFO: f32 = 6.0;

pub struct SolarSystem {
    sim: Simulation,
    star: Option<EntityId>,
    planet_ids: [Option<BodyId>; bodies::PLANET_COUNT],
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::with_config(load_config(CONFIG_JSON))
    }

    pub fn with_config(config: SimConfig) -> Self {
        Self {
            sim: Simulation::new(config),
            star: None,
            planet_ids: [None; bodies::PLANET_COUNT],
        }
    }

    fn spawn_presets(&mut self, ctx: &mut EngineContext) {
        let star = ctx.scene.spawn(SpawnRequest::new(
            bodies::STAR_NAME,
            MeshComponent::sphere(bodies::STAR_RADIUS, Color::from_hex(bodies::STAR_COLOR))
                .with_emissive(bodies::STAR_EMISSIVE),
        ));
        ctx.scene.attach_label(star, bodies::STAR_NAME, bodies::STAR_RADIUS + 0.5);
        self.star = Some(star);

        for (slot, preset) in self.planet_ids.iter_mut().zip(bodies::PLANETS.iter()) {
            let mut desc = BodyDesc::new(preset.radius, preset.distance, preset.speed, Color::from_hex(preset.color))
                .with_name(preset.name)
                .with_radius_factors(preset.factor_x, preset.factor_z);
            if preset.clouds {
                desc = desc.with_clouds();
            }
            *slot = Some(self.sim.create_body(ctx, desc));
        }

        for moon in bodies::moons() {
            let Some(parent) = self.planet_ids.get(moon.parent).copied().flatten() else {
                log::warn!("moon {}: parent preset {} missing", moon.name, moon.parent);
                continue;
            };
            let desc = SatelliteDesc::new(moon.radius, moon.distance, moon.speed, moon.inclination, Color::from_hex(moon.color))
                .with_name(moon.name);
            if let Err(err) = self.sim.create_satellite(ctx, parent, desc) {
                log::warn!("moon {} skipped: {err}", moon.name);
            }
        }

        for ring in &bodies::RINGS {
            let Some(parent) = self.planet_ids.get(ring.parent).copied().flatten() else {
                log::warn!("ring: parent preset {} missing", ring.parent);
                continue;
            };
            let result = self.sim.create_ring(
                ctx,
                parent,
                ring.inner,
                ring.outer,
                ring.inclination_deg.to_radians(),
                Color::from_hex(ring.color),
            );
            if let Err(err) = result {
                log::warn!("ring on {parent} skipped: {err}");
            }
        }

        let registry = self.sim.registry();
        log::info!(
            "presets: {} bodies, {} satellites, {} rings",
            registry.bodies().len(),
            registry.satellites().len(),
            registry.rings().len()
        );
    }

    fn handle_custom(&mut self, ctx: &mut EngineContext, kind: u32, a: f32, b: f32, c: f32) {
        match kind {
            CUSTOM_SET_MODE => match mode_from_panel(a) {
                Some(mode) => {
                    let change = self.sim.set_mode(mode);
                    report(ctx, SimEvent::ModeChanged(change));
                }
                None => log::warn!("unknown camera mode {a}"),
            },
            CUSTOM_SET_SPEED => self.sim.set_speed(a as f64),
            CUSTOM_NEW_BODY_RADIUS => self.sim.set_new_body_radius(a as f64),
            CUSTOM_NEW_BODY_SPEED => self.sim.set_new_body_speed(a as f64),
            CUSTOM_NEW_BODY_COLOR => self.sim.set_new_body_color(Color::new(a, b, c)),
            _ => {}
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Panel mode index; anything but a whole non-negative number is rejected.
fn mode_from_panel(a: f32) -> Option<CameraMode> {
    if !a.is_finite() || a < 0.0 || a.fract() != 0.0 {
        return None;
    }
    CameraMode::from_index(a as u32)
}

fn load_config(json: &str) -> SimConfig {
    match SimConfig::from_json(json) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("orrery.json rejected ({err}); using defaults");
            SimConfig::default()
        }
    }
}

/// Translate a simulation event into a status event for the page.
fn report(ctx: &mut EngineContext, event: SimEvent) {
    let event = match event {
        SimEvent::ModeChanged(change) => GameEvent {
            kind: EVENT_MODE,
            a: change.to.index() as f32,
            b: if change.release_capture { 1.0 } else { 0.0 },
            c: 0.0,
        },
        SimEvent::CaptureRequested => GameEvent { kind: EVENT_CAPTURE_REQUEST, ..Default::default() },
        SimEvent::Placement(PlacementOutcome::Placed { body, point }) => GameEvent {
            kind: EVENT_PLACED,
            a: point.x as f32,
            b: point.z as f32,
            c: body.0 as f32,
        },
        SimEvent::Placement(PlacementOutcome::NoIntersection) => {
            GameEvent { kind: EVENT_PLACE_MISSED, ..Default::default() }
        }
        SimEvent::Following { body, distance } => GameEvent {
            kind: EVENT_FOLLOWING,
            a: body.0 as f32,
            b: distance as f32,
            c: 0.0,
        },
    };
    ctx.emit_event(event);
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_instances: PRESET_INSTANCES + PLACEMENT_BUDGET,
            max_line_vertices: (bodies::PLANET_COUNT + PLACEMENT_BUDGET) * TRACE_VERTICES,
            max_events: 64,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.sim.init(ctx);
        self.spawn_presets(ctx);
        report(
            ctx,
            SimEvent::ModeChanged(ModeChange {
                from: CameraMode::Free,
                to: self.sim.controller().mode(),
                release_capture: false,
            }),
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.sim.begin_frame(ctx);

        // ── Handle input ─────────────────────────────────────────────
        for event in input.iter() {
            match *event {
                InputEvent::Custom { kind, a, b, c } => self.handle_custom(ctx, kind, a, b, c),
                _ => {
                    if let Some(sim_event) = self.sim.handle_input(ctx, event) {
                        report(ctx, sim_event);
                    }
                }
            }
        }

        self.sim.tick(ctx);

        // ── Emit game events ─────────────────────────────────────────
        ctx.emit_event(GameEvent {
            kind: EVENT_TIME_INFO,
            a: self.sim.sim_time() as f32,
            b: self.sim.clock().speed() as f32,
            c: 0.0,
        });
    }
}

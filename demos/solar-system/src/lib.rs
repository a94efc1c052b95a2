use wasm_bindgen::prelude::*;
use orrery::*;

mod bodies;
mod game;
use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");

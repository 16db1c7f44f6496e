//! JS bindings
//!
//! The page owns the canvas and the sprites; it calls `frame()` from its
//! `requestAnimationFrame` loop and draws from `snapshot_json()`.

use wasm_bindgen::prelude::*;

use crate::settings::SimSettings;
use crate::sim::{Axis, BallConfig, BallUpdate, ImageHandle, Simulation};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    // Already initialised if the module is loaded twice
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Knife Arena starting...");
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WasmSimulator {
    sim: Simulation,
}

#[wasm_bindgen]
impl WasmSimulator {
    /// Build a simulation for a canvas, optionally overriding settings with JSON
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_width: f32,
        canvas_height: f32,
        settings_json: Option<String>,
    ) -> Result<WasmSimulator, JsValue> {
        let mut settings = match settings_json {
            Some(json) => SimSettings::from_json(&json).map_err(js_err)?,
            None => SimSettings::default(),
        };
        settings.canvas_width = canvas_width;
        settings.canvas_height = canvas_height;
        Ok(Self {
            sim: Simulation::new(settings),
        })
    }

    /// Add a ball from optional JSON options; returns its id
    pub fn add_ball(&mut self, config_json: Option<String>) -> Result<u32, JsValue> {
        let config = match config_json {
            Some(json) => serde_json::from_str::<BallConfig>(&json).map_err(js_err)?,
            None => BallConfig::default(),
        };
        Ok(self.sim.add_ball(config))
    }

    pub fn remove_ball(&mut self, id: u32) -> bool {
        self.sim.remove_ball(id).is_some()
    }

    pub fn update_ball(&mut self, id: u32, update_json: &str) -> Result<bool, JsValue> {
        let update: BallUpdate = serde_json::from_str(update_json).map_err(js_err)?;
        Ok(self.sim.update_ball(id, update))
    }

    /// Ball as JSON, or `undefined` if there is no such ball
    pub fn get_ball(&self, id: u32) -> Result<Option<String>, JsValue> {
        self.sim
            .ball(id)
            .map(|b| serde_json::to_string(b).map_err(js_err))
            .transpose()
    }

    pub fn clear_balls(&mut self) {
        self.sim.clear_balls();
    }

    pub fn ball_count(&self) -> u32 {
        self.sim.ball_count() as u32
    }

    pub fn start(&mut self) -> bool {
        self.sim.start()
    }

    pub fn stop(&mut self) -> bool {
        self.sim.stop()
    }

    pub fn reset(&mut self) {
        self.sim.reset();
    }

    pub fn is_running(&self) -> bool {
        self.sim.is_running()
    }

    /// Call once per animation frame
    pub fn frame(&mut self) -> bool {
        self.sim.frame()
    }

    pub fn step(&mut self) {
        self.sim.step();
    }

    pub fn set_box_boundary(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.sim.set_box_boundary(x, y, width, height);
    }

    /// `axis` is "horizontal", "vertical" or "box"
    pub fn reduce_box_size(&mut self, axis: &str, delta: f32) -> bool {
        match axis.parse::<Axis>() {
            Ok(axis) => self.sim.reduce_box_size(axis, delta),
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        }
    }

    pub fn increase_box_size(&mut self, axis: &str, delta: f32) -> bool {
        match axis.parse::<Axis>() {
            Ok(axis) => self.sim.increase_box_size(axis, delta),
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        }
    }

    /// Handle the page uses to look up the knife sprite; `undefined` clears it
    pub fn set_knife_image(&mut self, handle: Option<u32>) -> bool {
        self.sim.set_knife_image(handle.map(ImageHandle))
    }

    pub fn set_heart_image(&mut self, handle: Option<u32>) -> bool {
        self.sim.set_heart_image(handle.map(ImageHandle))
    }

    /// Register `callback({ killerColor, victimColor, ballsNumber })`
    pub fn on_kill(&mut self, callback: js_sys::Function) {
        self.sim.set_kill_observer(move |notice| {
            let event = js_sys::Object::new();
            let fields: [(&str, JsValue); 3] = [
                ("killerColor", notice.killer_color.as_str().into()),
                ("victimColor", notice.victim_color.as_str().into()),
                ("ballsNumber", (notice.remaining as u32).into()),
            ];
            for (key, value) in fields {
                let _ = js_sys::Reflect::set(&event, &key.into(), &value);
            }
            if let Err(e) = callback.call1(&JsValue::NULL, &event) {
                log::warn!("Kill callback threw: {:?}", e);
            }
        });
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.sim.snapshot().to_json().map_err(js_err)
    }

    pub fn kill_feed_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.sim.kill_feed().entries()).map_err(js_err)
    }
}

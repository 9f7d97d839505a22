//! Browser bindings
//!
//! JS owns rendering, drag-and-drop and audio playback. It forwards input
//! here, calls `advance` once per animation frame with the elapsed
//! milliseconds, then reads `snapshot_json` and drains `take_sounds_json`.

use wasm_bindgen::prelude::*;

use crate::audio::SoundEffect;
use crate::driver::GameDriver;
use crate::settings::Settings;

/// Install the panic hook and browser logger
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // Already initialized when the module is instantiated twice
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Nebula Number Navigator starting...");
}

/// One game session exposed to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    driver: GameDriver<Vec<SoundEffect>>,
}

#[wasm_bindgen]
impl WebGame {
    /// `seed` 0 picks one from the clock; `settings_json` may be omitted
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64, settings_json: Option<String>) -> Result<WebGame, JsValue> {
        let settings = match settings_json {
            Some(json) => Settings::from_json(&json)
                .map_err(|e| JsValue::from_str(&format!("Invalid settings: {}", e)))?,
            None => Settings::default(),
        };
        let seed = if seed > 0.0 {
            seed as u64
        } else {
            js_sys::Date::now() as u64
        };
        log::info!("Game initialized with seed: {}", seed);

        Ok(WebGame {
            driver: GameDriver::new(seed, settings, Vec::new()),
        })
    }

    pub fn start(&mut self) {
        self.driver.start();
    }

    #[wasm_bindgen(js_name = dragStart)]
    pub fn drag_start(&mut self) {
        self.driver.drag_start();
    }

    /// Orb dropped on the answer zone with its displayed value
    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&mut self, value: &str) {
        self.driver.drag_end(value);
    }

    #[wasm_bindgen(js_name = buildChartSubmit)]
    pub fn build_chart_submit(&mut self, heights: Vec<u32>) {
        self.driver.build_chart_submit(heights);
    }

    #[wasm_bindgen(js_name = nextLevel)]
    pub fn next_level(&mut self) {
        self.driver.next_level();
    }

    #[wasm_bindgen(js_name = continueFromMap)]
    pub fn continue_from_map(&mut self) {
        self.driver.continue_from_map();
    }

    /// Pointer, touch or key activity anywhere on the page
    #[wasm_bindgen(js_name = recordActivity)]
    pub fn record_activity(&mut self) {
        self.driver.record_activity();
    }

    #[wasm_bindgen(js_name = windowBlurred)]
    pub fn window_blurred(&mut self) {
        self.driver.window_blurred();
    }

    #[wasm_bindgen(js_name = windowFocused)]
    pub fn window_focused(&mut self) {
        self.driver.window_focused();
    }

    /// Move the game clock forward
    pub fn advance(&mut self, elapsed_ms: f64) {
        if elapsed_ms.is_finite() && elapsed_ms >= 0.0 {
            self.driver.advance(elapsed_ms as u64);
        }
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.driver
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Sound event names queued since the last call, oldest first
    #[wasm_bindgen(js_name = takeSoundsJson)]
    pub fn take_sounds_json(&mut self) -> Result<String, JsValue> {
        let sounds = std::mem::take(self.driver.sound_mut());
        serde_json::to_string(&sounds)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Teardown on navigation away; nothing fires afterwards
    pub fn shutdown(&mut self) {
        self.driver.shutdown();
    }
}

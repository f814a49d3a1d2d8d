use shared::settings::GameSettings;
use web_sys::{window, UrlSearchParams};

pub fn load_settings() -> GameSettings {
    // Overrides come from the page URL, e.g. `/?animate=0` for the instant-redraw board.
    let search = window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default();
    let settings = match UrlSearchParams::new_with_str(&search) {
        Ok(params) => GameSettings::from_params(
            params.get("animate").as_deref(),
            params.get("animation_ms").as_deref(),
            params.get("min_interval_ms").as_deref(),
        ),
        Err(err) => {
            log::warn!("could not read query parameters: {:?}", err);
            GameSettings::default()
        }
    };
    log::info!("loaded settings: {:?}", settings);
    settings
}

pub fn now_ms() -> f64 {
    window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or_default()
}

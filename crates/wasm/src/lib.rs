mod app;
mod debounce;
mod dom;
mod fetch;
mod logging;

use blogview_core::ViewerConfig;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

pub use logging::init_logging;

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

/// Starts the viewer on the current page.
///
/// `config` is a plain object matching `ViewerConfig`; `null` or `undefined`
/// use the defaults. A config that fails to decode is reported and replaced by
/// the defaults, but an invalid catalog is an error.
#[wasm_bindgen]
pub fn start(config: JsValue) -> Result<(), JsError> {
    init_logging(log::LevelFilter::Info);

    let config = decode_config(config);
    init_logging(config.log_level());

    let catalog = config.build_catalog().map_err(to_js_error)?;
    let app = app::App::new(config, catalog).map_err(|err| js_value_error(&err))?;
    app.install().map_err(|err| js_value_error(&err))
}

/// Renders markdown into an HTML `String`.
#[wasm_bindgen(js_name = render_markdown)]
pub fn render_markdown(input: &str) -> String {
    blogview_core::markdown::render(input)
}

/// Renders article markdown and returns `{ indexHtml, html, headings }`.
#[wasm_bindgen(js_name = render_article)]
pub fn render_article(input: &str) -> Result<JsValue, JsError> {
    let article = blogview_core::render_article(input).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&article).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn version() -> String {
    blogview_core::version().to_string()
}

fn decode_config(config: JsValue) -> ViewerConfig {
    if config.is_null() || config.is_undefined() {
        return ViewerConfig::default();
    }
    serde_wasm_bindgen::from_value(config).unwrap_or_else(|err| {
        log::warn!("invalid viewer config, using defaults: {err}");
        ViewerConfig::default()
    })
}

fn to_js_error<E: ToString>(err: E) -> JsError {
    JsError::new(&err.to_string())
}

fn js_value_error(err: &JsValue) -> JsError {
    JsError::new(&err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

//! `window.fetch` backed content source.

use std::future::Future;
use std::rc::Rc;

use blogview_core::{ContentSource, FetchError, ViewerConfig};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

pub struct FetchSource {
    config: Rc<ViewerConfig>,
}

impl FetchSource {
    pub fn new(config: Rc<ViewerConfig>) -> Self {
        Self { config }
    }
}

impl ContentSource for FetchSource {
    fn fetch_text(&self, path: &str) -> impl Future<Output = Result<String, FetchError>> {
        let url = self.config.content_url(path);
        async move { fetch_text(&url).await }
    }
}

async fn fetch_text(url: &str) -> Result<String, FetchError> {
    let window = web_sys::window().ok_or_else(|| FetchError::Transport("no window".to_string()))?;

    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(transport_error)?
        .dyn_into()
        .map_err(transport_error)?;

    if !response.ok() {
        return Err(FetchError::Status {
            status: response.status(),
            status_text: response.status_text(),
        });
    }

    let body = JsFuture::from(response.text().map_err(transport_error)?)
        .await
        .map_err(transport_error)?;
    body.as_string()
        .ok_or_else(|| FetchError::Transport(format!("response body of {url} is not text")))
}

fn transport_error(err: JsValue) -> FetchError {
    let message = match err.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => err.as_string().unwrap_or_else(|| format!("{err:?}")),
    };
    FetchError::Transport(message)
}

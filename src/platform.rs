//! Browser capabilities the picker reaches for: audio, fullscreen, file
//! input and downloads.
//!
//! Audio and fullscreen sit behind traits so the state logic can run (and be
//! tested) without a browser. Every call is best effort: callers log a
//! failure and carry on.

use crate::config::EXPORT_URL_REVOKE_MS;
use gloo_timers::callback::Timeout;
use log::warn;
use std::fmt;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobPropertyBag, File, FileReader, HtmlAnchorElement, HtmlAudioElement, HtmlInputElement,
    Url,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    Unsupported(&'static str),
    Js(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Unsupported(what) => write!(f, "{} is not supported here", what),
            PlatformError::Js(detail) => write!(f, "browser API failed: {}", detail),
        }
    }
}

impl std::error::Error for PlatformError {}

impl From<JsValue> for PlatformError {
    fn from(value: JsValue) -> Self {
        PlatformError::Js(format!("{:?}", value))
    }
}

/// Plays the spin jingle.
pub trait AudioCue {
    fn play(&mut self, src: &str) -> Result<(), PlatformError>;
    fn stop(&mut self);
}

/// Document-level fullscreen control.
pub trait Fullscreen {
    fn request(&self) -> Result<(), PlatformError>;
    fn exit(&self) -> Result<(), PlatformError>;
    fn is_active(&self) -> bool;
}

/// Single reusable `<audio>` element.
pub struct WebAudio {
    element: Option<HtmlAudioElement>,
}

impl WebAudio {
    pub fn new() -> Self {
        let element = HtmlAudioElement::new()
            .map_err(|e| warn!("Audio element unavailable: {:?}", e))
            .ok();
        Self { element }
    }
}

impl Default for WebAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioCue for WebAudio {
    fn play(&mut self, src: &str) -> Result<(), PlatformError> {
        let element = self
            .element
            .as_ref()
            .ok_or(PlatformError::Unsupported("audio playback"))?;
        element.set_src(src);
        let playing = element.play()?;
        // Autoplay policies reject the promise later, not the call itself.
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(playing).await {
                warn!("Audio play failed: {:?}", e);
            }
        });
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(element) = &self.element {
            if let Err(e) = element.pause() {
                warn!("Audio pause failed: {:?}", e);
            }
        }
    }
}

pub struct WebFullscreen;

impl Fullscreen for WebFullscreen {
    fn request(&self) -> Result<(), PlatformError> {
        let root = gloo_utils::document()
            .document_element()
            .ok_or(PlatformError::Unsupported("fullscreen"))?;
        root.request_fullscreen()?;
        Ok(())
    }

    fn exit(&self) -> Result<(), PlatformError> {
        gloo_utils::document().exit_fullscreen();
        Ok(())
    }

    fn is_active(&self) -> bool {
        gloo_utils::document().fullscreen_element().is_some()
    }
}

/// Hand `contents` to the browser as a file download named `filename`.
pub fn offer_download(filename: &str, contents: &str, mime: &str) -> Result<(), PlatformError> {
    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = gloo_utils::document();
    let anchor: HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(|_| PlatformError::Unsupported("download links"))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    gloo_utils::body().append_child(&anchor)?;
    anchor.click();
    anchor.remove();

    Timeout::new(EXPORT_URL_REVOKE_MS, move || {
        if let Err(e) = Url::revoke_object_url(&url) {
            warn!("Failed to revoke export URL: {:?}", e);
        }
    })
    .forget();
    Ok(())
}

/// Files currently selected in a file input, in picker order.
pub fn selected_files(input: &HtmlInputElement) -> Vec<File> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

pub async fn read_file_text(file: &File) -> Result<String, PlatformError> {
    let text = JsFuture::from(file.text()).await?;
    text.as_string()
        .ok_or(PlatformError::Js("file text was not a string".into()))
}

/// Decode a file into a `data:` URL that an `<img>` can show.
pub async fn read_file_as_data_url(file: &File) -> Result<String, PlatformError> {
    let reader = FileReader::new()?;
    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        reader.set_onload(Some(&resolve));
        reader.set_onerror(Some(&reject));
    });
    reader.read_as_data_url(file)?;
    JsFuture::from(loaded).await?;

    reader
        .result()?
        .as_string()
        .ok_or(PlatformError::Js("reader result was not a string".into()))
}

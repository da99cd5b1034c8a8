//! The whole widget's state in one place.
//!
//! [`GiftPicker`] owns the name list, slideshow, spin engine and layout
//! mode, and talks to the outside world only through [`Platform`]. Every
//! mutation ends by notifying subscribers with a [`Change`], which is how
//! the view learns it has to re-render.

use crate::config::{EXPORT_FILENAME, JINGLE_SOUNDS};
use crate::platform::{AudioCue, Fullscreen, WebAudio, WebFullscreen};
use crate::presentation::Presentation;
use crate::selection::{
    IndexSource, SelectionEngine, SelectionState, SpinStep, SpinTiming, StartRejection,
};
use crate::slideshow::{ImageData, Slideshow};
use crate::storage::{load_names, save_names, KeyValueStore, LocalStore};
use crate::{AddNameError, ImportError, NameList, Notice};
use log::{debug, info, warn};

/// Everything the picker needs from its host.
pub struct Platform {
    pub store: Box<dyn KeyValueStore>,
    pub audio: Box<dyn AudioCue>,
    pub screen: Box<dyn Fullscreen>,
    pub rng: Box<dyn IndexSource>,
}

impl Platform {
    /// localStorage, an `<audio>` element, document fullscreen and the
    /// thread RNG.
    pub fn browser() -> Self {
        Self {
            store: Box::new(LocalStore::open()),
            audio: Box::new(WebAudio::new()),
            screen: Box::new(WebFullscreen),
            rng: Box::new(rand::rng()),
        }
    }
}

/// Which part of the state a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Names,
    Slides,
    Selection,
    Presentation,
    Notice,
}

pub type ListenerId = usize;

type Listener = Box<dyn Fn(Change)>;

/// A names export ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub filename: &'static str,
    pub contents: String,
}

pub struct GiftPicker {
    names: NameList,
    slideshow: Slideshow,
    selection: SelectionEngine,
    presentation: Presentation,
    notice: Option<Notice>,
    jingles: Vec<String>,
    platform: Platform,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: ListenerId,
}

impl GiftPicker {
    pub fn new(platform: Platform) -> Self {
        Self::with_timing(platform, SpinTiming::default())
    }

    /// Restores the saved names from `platform.store`.
    pub fn with_timing(platform: Platform, timing: SpinTiming) -> Self {
        let names = load_names(platform.store.as_ref());
        info!("Gift picker ready with {} saved names", names.len());
        Self {
            names,
            slideshow: Slideshow::new(),
            selection: SelectionEngine::new(timing),
            presentation: Presentation::default(),
            notice: None,
            jingles: JINGLE_SOUNDS.iter().map(|s| s.to_string()).collect(),
            platform,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Replace the jingle pool. An empty pool spins silently.
    ///
    /// The jingle is picked with the thread RNG, never with `platform.rng`.
    pub fn with_jingles(mut self, jingles: Vec<String>) -> Self {
        self.jingles = jingles;
        self
    }

    pub fn names(&self) -> &NameList {
        &self.names
    }

    pub fn slideshow(&self) -> &Slideshow {
        &self.slideshow
    }

    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    pub fn is_spinning(&self) -> bool {
        self.selection.is_spinning()
    }

    pub fn spin_timing(&self) -> SpinTiming {
        self.selection.timing()
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    // ── subscriptions ────────────────────────────────────────────────────

    pub fn subscribe(&mut self, listener: impl Fn(Change) + 'static) -> ListenerId {
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    fn notify(&self, change: Change) {
        for (_, listener) in &self.listeners {
            listener(change);
        }
    }

    pub fn announce(&mut self, notice: Notice) {
        debug!("Notice: {}", notice);
        self.notice = Some(notice);
        self.notify(Change::Notice);
    }

    // ── names ────────────────────────────────────────────────────────────

    fn names_changed(&mut self) {
        if let Err(e) = save_names(self.platform.store.as_mut(), &self.names) {
            warn!("Failed to persist names: {}", e);
        }
        self.notify(Change::Names);
    }

    pub fn add_name(&mut self, raw: &str) -> Result<String, AddNameError> {
        match self.names.add(raw) {
            Ok(name) => {
                self.names_changed();
                self.announce(Notice::NameAdded(name.clone()));
                Ok(name)
            }
            Err(e) => {
                self.announce(Notice::NameRejected(e.clone()));
                Err(e)
            }
        }
    }

    pub fn remove_name(&mut self, name: &str) -> bool {
        if !self.names.remove(name) {
            return false;
        }
        self.names_changed();
        self.announce(Notice::NameRemoved(name.to_string()));
        true
    }

    /// Merge a names document. A bad document changes nothing and is only
    /// logged.
    pub fn import_names(&mut self, document: &str) -> Result<usize, ImportError> {
        let added = self.names.import_json(document).map_err(|e| {
            warn!("Invalid names file: {}", e);
            e
        })?;
        info!("Imported {} new names", added);
        if added > 0 {
            self.names_changed();
        }
        self.announce(Notice::NamesImported(added));
        Ok(added)
    }

    pub fn export_names(&mut self) -> Result<ExportDocument, serde_json::Error> {
        let contents = self.names.export_json()?;
        self.announce(Notice::NamesExported(self.names.len()));
        Ok(ExportDocument {
            filename: EXPORT_FILENAME,
            contents,
        })
    }

    // ── slideshow ────────────────────────────────────────────────────────

    pub fn add_image(&mut self, image: ImageData) {
        self.slideshow.push(image);
        debug!("Slideshow now has {} images", self.slideshow.len());
        self.notify(Change::Slides);
    }

    pub fn remove_image(&mut self, index: usize) -> bool {
        let removed = self.slideshow.remove(index).is_some();
        if removed {
            self.notify(Change::Slides);
        }
        removed
    }

    pub fn advance_slide(&mut self) {
        if !self.slideshow.is_empty() {
            self.slideshow.advance();
            self.notify(Change::Slides);
        }
    }

    pub fn next_slide(&mut self) {
        if !self.slideshow.is_empty() {
            self.slideshow.next();
            self.notify(Change::Slides);
        }
    }

    pub fn previous_slide(&mut self) {
        if !self.slideshow.is_empty() {
            self.slideshow.previous();
            self.notify(Change::Slides);
        }
    }

    pub fn show_slide(&mut self, index: usize) {
        if self.slideshow.show(index) {
            self.notify(Change::Slides);
        }
    }

    // ── spin ─────────────────────────────────────────────────────────────

    pub fn start_spin(&mut self) -> Result<(), StartRejection> {
        if let Err(rejection) = self.selection.start(&self.names) {
            debug!("Spin rejected: {}", rejection);
            self.announce(match rejection {
                StartRejection::NoNames => Notice::NoNames,
                StartRejection::AlreadySpinning => Notice::SpinInProgress,
            });
            return Err(rejection);
        }
        self.play_jingle();
        self.notify(Change::Selection);
        Ok(())
    }

    fn play_jingle(&mut self) {
        if self.jingles.is_empty() {
            debug!("No jingles configured, spinning silently");
            return;
        }
        // Separate from `platform.rng` so the spin's draws stay untouched.
        let pick = rand::rng().next_index(self.jingles.len());
        if let Err(e) = self.platform.audio.play(&self.jingles[pick]) {
            warn!("Audio play failed: {}", e);
        }
    }

    /// One timer step of the running spin; ignored when no spin is running.
    pub fn tick_spin(&mut self) -> SpinStep {
        let step = self
            .selection
            .tick(&mut self.names, self.platform.rng.as_mut());
        match &step {
            SpinStep::Inactive => {}
            SpinStep::Flash(_) => self.notify(Change::Selection),
            SpinStep::Resolved(winner) => {
                self.platform.audio.stop();
                self.names_changed();
                self.notify(Change::Selection);
                self.announce(Notice::WinnerChosen(winner.clone()));
            }
            SpinStep::Abandoned => {
                self.platform.audio.stop();
                self.notify(Change::Selection);
                self.announce(Notice::SpinAbandoned);
            }
        }
        step
    }

    // ── layout ───────────────────────────────────────────────────────────

    pub fn toggle_presentation(&mut self) -> bool {
        let active = self.presentation.toggle(self.platform.screen.as_ref());
        self.notify(Change::Presentation);
        active
    }

    pub fn toggle_setup(&mut self) -> bool {
        let visible = self.presentation.toggle_setup();
        self.notify(Change::Presentation);
        visible
    }

    /// Teardown: silence audio and drop a half-finished spin.
    pub fn shutdown(&mut self) {
        self.platform.audio.stop();
        if self.selection.is_spinning() {
            self.selection.reset();
        }
        debug!("Gift picker shut down");
    }
}

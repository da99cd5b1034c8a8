use crate::platform::Fullscreen;
use log::{info, warn};

/// Layout mode: presentation (fullscreen, audience view) and whether the
/// setup panel is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    active: bool,
    setup_visible: bool,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            active: false,
            setup_visible: true,
        }
    }
}

impl Presentation {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn setup_visible(&self) -> bool {
        self.setup_visible
    }

    /// Enter or leave presentation mode. Entering hides the setup panel and
    /// asks for fullscreen; leaving drops fullscreen if it is on. Fullscreen
    /// failures are only logged. Returns the new mode.
    pub fn toggle(&mut self, screen: &dyn Fullscreen) -> bool {
        if self.active {
            self.active = false;
            if screen.is_active() {
                if let Err(e) = screen.exit() {
                    warn!("Failed to leave fullscreen: {}", e);
                }
            }
        } else {
            self.active = true;
            self.setup_visible = false;
            if let Err(e) = screen.request() {
                warn!("Fullscreen not supported: {}", e);
            }
        }
        info!("Presentation mode {}", if self.active { "on" } else { "off" });
        self.active
    }

    pub fn toggle_setup(&mut self) -> bool {
        self.setup_visible = !self.setup_visible;
        self.setup_visible
    }
}

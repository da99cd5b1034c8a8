//! Uploaded images and the cursor that rotates through them.

use std::rc::Rc;

/// A decoded, displayable image (a `data:` URL). Shared cheaply with the view.
pub type ImageData = Rc<str>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slideshow {
    images: Vec<ImageData>,
    cursor: usize,
}

impl Slideshow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[ImageData] {
        &self.images
    }

    /// Index of the image on screen, `None` while there are no images.
    pub fn current_index(&self) -> Option<usize> {
        (!self.images.is_empty()).then_some(self.cursor)
    }

    pub fn push(&mut self, image: ImageData) {
        self.images.push(image);
    }

    /// Remove the image at `index`. The cursor stays put unless it would
    /// fall off the end, in which case it moves to the new last image.
    pub fn remove(&mut self, index: usize) -> Option<ImageData> {
        if index >= self.images.len() {
            return None;
        }
        let removed = self.images.remove(index);
        if self.cursor >= self.images.len() {
            self.cursor = self.images.len().saturating_sub(1);
        }
        Some(removed)
    }

    /// Timer-driven step; same wraparound as [`Slideshow::next`].
    pub fn advance(&mut self) {
        self.next();
    }

    pub fn next(&mut self) {
        if !self.images.is_empty() {
            self.cursor = (self.cursor + 1) % self.images.len();
        }
    }

    pub fn previous(&mut self) {
        let len = self.images.len();
        if len > 0 {
            self.cursor = (self.cursor + len - 1) % len;
        }
    }

    /// Jump straight to `index`; out-of-range requests are ignored.
    pub fn show(&mut self, index: usize) -> bool {
        if index < self.images.len() {
            self.cursor = index;
            true
        } else {
            false
        }
    }
}

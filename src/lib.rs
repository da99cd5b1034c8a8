//! Festive "who distributes the gifts" name picker.
//!
//! The library holds every piece of state the widget needs (name list,
//! slideshow, spin engine, presentation mode) behind [`picker::GiftPicker`],
//! with browser APIs reached only through the capability traits in
//! [`platform`] and [`storage`]. The Yew front end in `main.rs` renders it.

use std::fmt;

pub mod config;
pub mod logging;
pub mod names;
pub mod picker;
pub mod platform;
pub mod presentation;
pub mod selection;
pub mod slideshow;
pub mod storage;
pub mod utils;

pub use names::NameList;
pub use picker::{Change, GiftPicker, Platform};
pub use selection::{SelectionEngine, SelectionState, SpinTiming};
pub use slideshow::Slideshow;

/// Reasons a name could not be added to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddNameError {
    Empty,
    Duplicate(String),
}

impl fmt::Display for AddNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddNameError::Empty => write!(f, "Bitte einen Namen eingeben."),
            AddNameError::Duplicate(name) => write!(f, "{} steht bereits auf der Liste.", name),
        }
    }
}

impl std::error::Error for AddNameError {}

/// Errors raised while reading a names document (import file or stored value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The text is not valid JSON.
    Malformed(String),
    /// Valid JSON, but the top level is not an array.
    NotAnArray(&'static str),
    /// An array element that cannot be turned into a name.
    UnsupportedEntry { index: usize, kind: &'static str },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Malformed(reason) => write!(f, "Invalid names file: {}", reason),
            ImportError::NotAnArray(kind) => {
                write!(f, "Expected a JSON array of names, found {}", kind)
            }
            ImportError::UnsupportedEntry { index, kind } => {
                write!(f, "Entry {} is {}, expected a name", index, kind)
            }
        }
    }
}

impl std::error::Error for ImportError {}

/// User-facing message describing the outcome of the last action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NameAdded(String),
    NameRemoved(String),
    NameRejected(AddNameError),
    NamesImported(usize),
    NamesExported(usize),
    ImagesAdded(usize),
    NoNames,
    SpinInProgress,
    SpinAbandoned,
    WinnerChosen(String),
}

impl Notice {
    /// Rejections are rendered with the destructive style.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Notice::NameRejected(_) | Notice::NoNames | Notice::SpinInProgress | Notice::SpinAbandoned
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NameAdded(name) => write!(f, "{} wurde zur Liste hinzugefügt.", name),
            Notice::NameRemoved(name) => write!(f, "{} wurde aus der Liste entfernt.", name),
            Notice::NameRejected(err) => write!(f, "{}", err),
            Notice::NamesImported(count) => write!(f, "{} Name(n) importiert.", count),
            Notice::NamesExported(count) => write!(f, "{} Name(n) exportiert.", count),
            Notice::ImagesAdded(count) => {
                write!(f, "{} Bild(er) zur Diashow hinzugefügt.", count)
            }
            Notice::NoNames => write!(f, "Bitte füge mindestens einen Namen hinzu."),
            Notice::SpinInProgress => write!(f, "Die Auswahl läuft bereits."),
            Notice::SpinAbandoned => write!(f, "Auswahl abgebrochen: keine Namen mehr übrig."),
            Notice::WinnerChosen(name) => write!(f, "🎁 {} verteilt die Geschenke!", name),
        }
    }
}

// Drives the GiftPicker aggregate through whole user flows with an
// in-memory store, recording fakes for audio and fullscreen, and a scripted
// index source, so every run is deterministic and needs no browser.

use assert_matches::assert_matches;
use gift_picker::config::NAMES_STORAGE_KEY;
use gift_picker::platform::{AudioCue, Fullscreen, PlatformError};
use gift_picker::selection::{ScriptedIndices, SpinStep, StartRejection};
use gift_picker::storage::MemoryStore;
use gift_picker::{GiftPicker, Notice, Platform, SelectionState, SpinTiming};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct AudioLog(Rc<RefCell<Vec<String>>>);

impl AudioLog {
    fn events(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

struct RecordingAudio {
    log: AudioLog,
    fail: bool,
}

impl AudioCue for RecordingAudio {
    fn play(&mut self, src: &str) -> Result<(), PlatformError> {
        self.log.0.borrow_mut().push(format!("play {}", src));
        if self.fail {
            Err(PlatformError::Unsupported("audio playback"))
        } else {
            Ok(())
        }
    }

    fn stop(&mut self) {
        self.log.0.borrow_mut().push("stop".to_string());
    }
}

struct RefusingScreen;

impl Fullscreen for RefusingScreen {
    fn request(&self) -> Result<(), PlatformError> {
        Err(PlatformError::Js("TypeError: fullscreen denied".into()))
    }

    fn exit(&self) -> Result<(), PlatformError> {
        Ok(())
    }

    fn is_active(&self) -> bool {
        false
    }
}

struct Harness {
    picker: GiftPicker,
    store: MemoryStore,
    audio: AudioLog,
}

fn harness(store: MemoryStore, script: Vec<usize>, timing: SpinTiming, jingles: &[&str]) -> Harness {
    let audio = AudioLog::default();
    let platform = Platform {
        store: Box::new(store.clone()),
        audio: Box::new(RecordingAudio {
            log: audio.clone(),
            fail: false,
        }),
        screen: Box::new(RefusingScreen),
        rng: Box::new(ScriptedIndices::new(script)),
    };
    let picker = GiftPicker::with_timing(platform, timing)
        .with_jingles(jingles.iter().map(|s| s.to_string()).collect());
    Harness { picker, store, audio }
}

fn spin_to_end(picker: &mut GiftPicker) -> Vec<SpinStep> {
    let mut steps = Vec::new();
    loop {
        let step = picker.tick_spin();
        let done = !matches!(step, SpinStep::Flash(_));
        steps.push(step);
        if done {
            return steps;
        }
    }
}

#[test]
fn start_with_no_names_is_rejected_with_a_notice() {
    let mut h = harness(MemoryStore::new(), vec![], SpinTiming::default(), &["a.mp3"]);

    assert_eq!(h.picker.start_spin(), Err(StartRejection::NoNames));
    assert_eq!(h.picker.selection(), &SelectionState::Idle);
    assert_eq!(h.picker.notice(), Some(&Notice::NoNames));
    assert!(h.picker.notice().unwrap().is_rejection());
    assert!(h.audio.events().is_empty());
}

#[test]
fn scripted_spin_commits_the_fourth_draw() {
    let mut h = harness(MemoryStore::new(), vec![1, 0, 2, 1], SpinTiming::new(120, 360), &[]);
    for name in ["Anna", "Ben", "Clara"] {
        h.picker.add_name(name).unwrap();
    }

    h.picker.start_spin().unwrap();
    let steps = spin_to_end(&mut h.picker);

    assert_eq!(steps.last(), Some(&SpinStep::Resolved("Ben".into())));
    assert_eq!(
        h.picker.selection(),
        &SelectionState::Resolved { winner: "Ben".into() }
    );
    assert_eq!(h.picker.names().as_slice(), ["Anna", "Clara"]);
}

#[test]
fn full_spin_plays_and_stops_a_jingle() {
    let mut h = harness(
        MemoryStore::new(),
        vec![1, 0, 2, 1],
        SpinTiming::new(100, 300),
        &["one.mp3"],
    );
    for name in ["Anna", "Ben", "Clara"] {
        h.picker.add_name(name).unwrap();
    }

    h.picker.start_spin().unwrap();
    assert!(h.picker.is_spinning());
    assert_eq!(h.picker.start_spin(), Err(StartRejection::AlreadySpinning));
    assert_eq!(h.picker.notice(), Some(&Notice::SpinInProgress));

    let steps = spin_to_end(&mut h.picker);
    assert_eq!(
        steps,
        vec![
            SpinStep::Flash("Ben".into()),
            SpinStep::Flash("Anna".into()),
            SpinStep::Resolved("Ben".into()),
        ]
    );
    assert_eq!(h.audio.events(), vec!["play one.mp3", "stop"]);
    assert_eq!(h.picker.notice(), Some(&Notice::WinnerChosen("Ben".into())));
}

#[test]
fn default_jingle_pool_leaves_the_scripted_draws_alone() {
    let audio = AudioLog::default();
    let platform = Platform {
        store: Box::new(MemoryStore::new()),
        audio: Box::new(RecordingAudio {
            log: audio.clone(),
            fail: false,
        }),
        screen: Box::new(RefusingScreen),
        rng: Box::new(ScriptedIndices::new(vec![1, 0, 2, 1])),
    };
    let mut picker = GiftPicker::with_timing(platform, SpinTiming::new(120, 360));
    for name in ["Anna", "Ben", "Clara"] {
        picker.add_name(name).unwrap();
    }

    picker.start_spin().unwrap();
    for _ in 0..3 {
        picker.tick_spin();
    }
    assert_eq!(picker.selection().winner(), Some("Ben"));
    assert_eq!(picker.names().as_slice(), ["Anna", "Clara"]);
    // Nothing ships in the default pool, so only the closing stop is heard.
    assert_eq!(audio.events(), vec!["stop"]);
}

#[test]
fn audio_failure_does_not_block_the_spin() {
    let audio = AudioLog::default();
    let platform = Platform {
        store: Box::new(MemoryStore::new()),
        audio: Box::new(RecordingAudio {
            log: audio.clone(),
            fail: true,
        }),
        screen: Box::new(RefusingScreen),
        rng: Box::new(ScriptedIndices::default()),
    };
    let mut picker = GiftPicker::with_timing(platform, SpinTiming::new(10, 10))
        .with_jingles(vec!["broken.mp3".into()]);
    picker.add_name("Anna").unwrap();

    assert!(picker.start_spin().is_ok());
    assert_eq!(picker.tick_spin(), SpinStep::Resolved("Anna".into()));
    assert!(picker.names().is_empty());
}

#[test]
fn winners_leave_the_pool_one_spin_at_a_time() {
    let mut h = harness(MemoryStore::new(), vec![], SpinTiming::new(10, 50), &[]);
    for name in ["Anna", "Ben", "Clara"] {
        h.picker.add_name(name).unwrap();
    }

    let mut winners = Vec::new();
    while !h.picker.names().is_empty() {
        let before = h.picker.names().len();
        h.picker.start_spin().unwrap();
        spin_to_end(&mut h.picker);
        let winner = h.picker.selection().winner().unwrap().to_string();
        assert_eq!(h.picker.names().len(), before - 1);
        assert!(!h.picker.names().contains(&winner));
        winners.push(winner);
    }
    winners.sort();
    assert_eq!(winners, vec!["Anna", "Ben", "Clara"]);
    assert_eq!(h.store.get(NAMES_STORAGE_KEY).as_deref(), Some("[]"));
}

#[test]
fn removing_every_name_mid_spin_abandons_it() {
    let mut h = harness(MemoryStore::new(), vec![], SpinTiming::default(), &["a.mp3"]);
    h.picker.add_name("Anna").unwrap();
    h.picker.start_spin().unwrap();
    h.picker.tick_spin();

    h.picker.remove_name("Anna");
    assert_eq!(h.picker.tick_spin(), SpinStep::Abandoned);
    assert_eq!(h.picker.selection(), &SelectionState::Idle);
    assert_eq!(h.picker.notice(), Some(&Notice::SpinAbandoned));
    assert_eq!(h.audio.events().last().map(String::as_str), Some("stop"));
}

#[test]
fn export_and_reimport_on_a_fresh_picker_reproduces_the_list() {
    let mut source = harness(MemoryStore::new(), vec![], SpinTiming::default(), &[]);
    for name in ["Knecht Ruprecht", "Christkind", "Nikolaus"] {
        source.picker.add_name(name).unwrap();
    }
    let doc = source.picker.export_names().unwrap();
    assert_eq!(doc.filename, "names.json");
    assert_eq!(source.picker.notice(), Some(&Notice::NamesExported(3)));

    let mut target = harness(MemoryStore::new(), vec![], SpinTiming::default(), &[]);
    assert_eq!(target.picker.import_names(&doc.contents), Ok(3));
    assert_eq!(target.picker.names(), source.picker.names());
    assert_eq!(
        target.store.get(NAMES_STORAGE_KEY),
        source.store.get(NAMES_STORAGE_KEY)
    );
}

#[test]
fn malformed_import_changes_nothing() {
    let mut h = harness(MemoryStore::new(), vec![], SpinTiming::default(), &[]);
    h.picker.add_name("B").unwrap();
    let stored = h.store.get(NAMES_STORAGE_KEY);

    assert!(h.picker.import_names(r#"{"names": ["A"]}"#).is_err());
    assert!(h.picker.import_names(r#"["A", null]"#).is_err());
    assert_eq!(h.picker.names().as_slice(), ["B"]);
    assert_eq!(h.store.get(NAMES_STORAGE_KEY), stored);
    assert_eq!(h.picker.notice(), Some(&Notice::NameAdded("B".into())));
}

#[test]
fn import_merges_in_order() {
    let mut h = harness(MemoryStore::new(), vec![], SpinTiming::default(), &[]);
    h.picker.add_name("B").unwrap();
    assert_eq!(h.picker.import_names(r#"["A","B","A"," C "]"#), Ok(2));
    assert_eq!(h.picker.names().as_slice(), ["B", "A", "C"]);
}

#[test]
fn corrupt_storage_starts_empty_and_recovers_on_first_add() {
    let store = MemoryStore::with_entry(NAMES_STORAGE_KEY, "[\"unterminated");
    let mut h = harness(store, vec![], SpinTiming::default(), &[]);
    assert!(h.picker.names().is_empty());

    h.picker.add_name("Anna").unwrap();
    assert_eq!(h.store.get(NAMES_STORAGE_KEY).as_deref(), Some(r#"["Anna"]"#));
}

#[test]
fn slideshow_cursor_stays_in_bounds() {
    let mut h = harness(MemoryStore::new(), vec![], SpinTiming::default(), &[]);
    for i in 0..3 {
        h.picker.add_image(Rc::from(format!("data:image/png;base64,{}", i)));
    }
    h.picker.show_slide(2);
    assert!(h.picker.remove_image(2));
    assert_eq!(h.picker.slideshow().current_index(), Some(1));

    h.picker.advance_slide();
    assert_eq!(h.picker.slideshow().current_index(), Some(0));
    h.picker.previous_slide();
    assert_eq!(h.picker.slideshow().current_index(), Some(1));

    assert!(!h.picker.remove_image(7));
    h.picker.remove_image(0);
    h.picker.remove_image(0);
    assert_eq!(h.picker.slideshow().current_index(), None);
}

#[test]
fn refused_fullscreen_still_switches_layout() {
    let mut h = harness(MemoryStore::new(), vec![], SpinTiming::default(), &[]);
    assert!(h.picker.presentation().setup_visible());

    assert!(h.picker.toggle_presentation());
    assert!(h.picker.presentation().is_active());
    assert!(!h.picker.presentation().setup_visible());

    assert!(!h.picker.toggle_presentation());
    assert_matches!(h.picker.selection(), SelectionState::Idle);
}

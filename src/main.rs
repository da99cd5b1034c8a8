//! Main module for the gift picker application using Yew.
//! Wires the `GiftPicker` state, timers and browser side effects into the UI.

use gift_picker::config::{LOG_LEVEL, SLIDE_INTERVAL_MS, SNOWFLAKE_COUNT};
use gift_picker::platform::{
    offer_download, read_file_as_data_url, read_file_text, selected_files,
};
use gift_picker::slideshow::ImageData;
use gift_picker::{logging, GiftPicker, Notice, Platform};
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

mod components;
mod hooks;

use components::{ImageSetup, NameSetup, NoticeLine, Snowfall, Stage};
use hooks::{use_interval, use_text_input};

type SharedPicker = Rc<RefCell<GiftPicker>>;

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// Add the typed name; the field is emptied only when the name was accepted.
fn commit_name(picker: &SharedPicker, text: &str, clear: &Callback<()>) {
    let accepted = picker.borrow_mut().add_name(text).is_ok();
    if accepted {
        clear.emit(());
    }
}

fn export_names(picker: &SharedPicker) {
    let exported = picker.borrow_mut().export_names();
    match exported {
        Ok(doc) => {
            if let Err(e) = offer_download(doc.filename, &doc.contents, "application/json") {
                warn!("Failed to export names: {}", e);
            }
        }
        Err(e) => warn!("Failed to export names: {}", e),
    }
}

/// Read the chosen names file and merge it. The input is reset right away
/// so picking the same file again fires `change` again.
fn import_names(picker: SharedPicker, input: HtmlInputElement) {
    let file = selected_files(&input).into_iter().next();
    input.set_value("");
    let Some(file) = file else {
        return;
    };
    spawn_local(async move {
        match read_file_text(&file).await {
            // Errors are logged inside import_names; nothing else to do.
            Ok(text) => {
                let _ = picker.borrow_mut().import_names(&text);
            }
            Err(e) => warn!("Invalid names file: {}", e),
        }
    });
}

/// Decode every chosen image concurrently; each is appended when its own
/// read completes.
fn upload_images(picker: SharedPicker, input: HtmlInputElement) {
    let files = selected_files(&input);
    input.set_value("");
    if files.is_empty() {
        return;
    }
    picker.borrow_mut().announce(Notice::ImagesAdded(files.len()));
    for file in files {
        let picker = picker.clone();
        spawn_local(async move {
            match read_file_as_data_url(&file).await {
                Ok(url) => picker.borrow_mut().add_image(ImageData::from(url)),
                Err(e) => warn!("Failed to read image {}: {}", file.name(), e),
            }
        });
    }
}

// ──────────────────────────────────────────────────────────────────────────────

/// Primary application component wiring state, effects, and UI elements.
#[function_component(GiftPickerApp)]
fn gift_picker_app() -> Html {
    let picker: SharedPicker = use_mut_ref(|| GiftPicker::new(Platform::browser()));
    let redraw = use_force_update();
    let name_input = use_text_input();

    // Re-render on every state change; stop audio and spins on unmount.
    {
        let picker = picker.clone();
        use_effect_with((), move |_| {
            let id = picker.borrow_mut().subscribe(move |change| {
                debug!("State changed: {:?}", change);
                // Listeners run while the picker is still borrowed.
                let redraw = redraw.clone();
                spawn_local(async move { redraw.force_update() });
            });
            move || {
                let mut picker = picker.borrow_mut();
                picker.unsubscribe(id);
                picker.shutdown();
            }
        });
    }

    // Snapshot for this render
    let (names, images, current, selection, presenting, setup_visible, notice, step_ms) = {
        let state = picker.borrow();
        (
            state.names().as_slice().to_vec(),
            state.slideshow().images().to_vec(),
            state.slideshow().current_index(),
            state.selection().clone(),
            state.presentation().is_active(),
            state.presentation().setup_visible(),
            state.notice().cloned(),
            state.spin_timing().step_ms(),
        )
    };
    let spinning = selection.is_spinning();

    // Spin timer: lives exactly as long as the spin.
    {
        let picker = picker.clone();
        use_interval(
            spinning.then_some(()),
            step_ms,
            Callback::from(move |_| {
                picker.borrow_mut().tick_spin();
            }),
        );
    }

    // Slideshow timer: rebuilt when the image count changes, gone when empty.
    {
        let picker = picker.clone();
        use_interval(
            (!images.is_empty()).then_some(images.len()),
            SLIDE_INTERVAL_MS,
            Callback::from(move |_| picker.borrow_mut().advance_slide()),
        );
    }

    let on_add = {
        let picker = picker.clone();
        let text = name_input.text.clone();
        let clear = name_input.clear.clone();
        Callback::from(move |_: MouseEvent| commit_name(&picker, &text, &clear))
    };

    let on_keydown = {
        let picker = picker.clone();
        let text = name_input.text.clone();
        let clear = name_input.clear.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                commit_name(&picker, &text, &clear);
            }
        })
    };

    let on_remove_name = {
        let picker = picker.clone();
        Callback::from(move |name: String| {
            picker.borrow_mut().remove_name(&name);
        })
    };

    let on_export = {
        let picker = picker.clone();
        Callback::from(move |_: MouseEvent| export_names(&picker))
    };

    let on_import = {
        let picker = picker.clone();
        Callback::from(move |e: Event| import_names(picker.clone(), e.target_unchecked_into()))
    };

    let on_upload = {
        let picker = picker.clone();
        Callback::from(move |e: Event| upload_images(picker.clone(), e.target_unchecked_into()))
    };

    let on_remove_image = {
        let picker = picker.clone();
        Callback::from(move |index: usize| {
            picker.borrow_mut().remove_image(index);
        })
    };

    let on_previous = {
        let picker = picker.clone();
        Callback::from(move |_: MouseEvent| picker.borrow_mut().previous_slide())
    };

    let on_next = {
        let picker = picker.clone();
        Callback::from(move |_: MouseEvent| picker.borrow_mut().next_slide())
    };

    let on_show = {
        let picker = picker.clone();
        Callback::from(move |index: usize| picker.borrow_mut().show_slide(index))
    };

    let on_start = {
        let picker = picker.clone();
        Callback::from(move |_: MouseEvent| {
            // A rejection is already reported through the notice.
            let _ = picker.borrow_mut().start_spin();
        })
    };

    let on_toggle_presentation = {
        let picker = picker.clone();
        Callback::from(move |_: MouseEvent| {
            picker.borrow_mut().toggle_presentation();
        })
    };

    let on_toggle_setup = {
        let picker = picker.clone();
        Callback::from(move |_: MouseEvent| {
            picker.borrow_mut().toggle_setup();
        })
    };

    html! {
        <div class="app">
            <Snowfall count={SNOWFLAKE_COUNT} />

            <div class={classes!("content", presenting.then_some("content-wide"))}>
                if !presenting {
                    <header class="header">
                        <h1>{ "🎁 Weihnachts-Geschenke-Generator 🎁" }</h1>
                        <p class="subtitle">{ "Wer verteilt die Geschenke? 🎅" }</p>
                    </header>

                    <div class="controls">
                        <button class="btn btn-glass btn-lg" onclick={on_toggle_setup}>
                            { if setup_visible { "✕ Setup ausblenden" } else { "⚙ Setup anzeigen" } }
                        </button>
                        <button class="btn btn-accent btn-lg" onclick={on_toggle_presentation.clone()}>
                            { "⛶ Präsentationsmodus" }
                        </button>
                    </div>
                } else {
                    <div class="exit-presentation">
                        <button class="btn btn-glass btn-lg" onclick={on_toggle_presentation}>
                            { "Beenden" }
                        </button>
                    </div>
                }

                if setup_visible {
                    <div class="setup">
                        <NameSetup
                            names={names.clone()}
                            text={name_input.text.clone()}
                            on_input={name_input.on_input.clone()}
                            {on_keydown}
                            {on_add}
                            on_remove={on_remove_name}
                            {on_export}
                            {on_import}
                        />
                        <ImageSetup
                            images={images.clone()}
                            {on_upload}
                            on_remove={on_remove_image}
                        />
                    </div>
                }

                <div class={classes!("start", presenting.then_some("start-large"))}>
                    <button class="btn btn-start"
                        disabled={spinning || names.is_empty()}
                        onclick={on_start}>
                        { if spinning { "▶ Wird ausgewählt..." } else { "▶ Auswahl starten" } }
                    </button>
                </div>

                <NoticeLine {notice} />

                <Stage
                    {images}
                    {current}
                    {selection}
                    {presenting}
                    {on_previous}
                    {on_next}
                    {on_show}
                />

                if !presenting {
                    <footer class="footer">
                        <p>{ "✨ Frohe Weihnachten! 🎄✨" }</p>
                    </footer>
                }
            </div>
        </div>
    }
}

/// Entry point: installs panic and log hooks, then renders the app.
fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = logging::init(LOG_LEVEL) {
        web_sys::console::warn_1(&format!("Logger already installed: {}", e).into());
    }
    yew::Renderer::<GiftPickerApp>::new().render();
}

//! Pure Yew view components for the gift picker UI.
//!
//! These render from props only; all state lives in the `GiftPicker` owned
//! by the app component.

use gift_picker::config::SNOWFLAKE_DELAY_STEP_SEC;
use gift_picker::slideshow::ImageData;
use gift_picker::{Notice, SelectionState};
use rand::Rng;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
struct Flake {
    left_pct: f64,
    size_px: f64,
    delay_sec: f64,
    duration_sec: f64,
}

#[derive(Properties, PartialEq)]
pub struct SnowfallProps {
    pub count: usize,
}

/// Falling snowflakes. Positions are rolled once per mount so re-renders
/// don't make them jump.
#[function_component(Snowfall)]
pub fn snowfall(props: &SnowfallProps) -> Html {
    let flakes = use_memo(props.count, |&count| {
        let mut rng = rand::rng();
        (0..count)
            .map(|i| Flake {
                left_pct: rng.random_range(0.0..100.0),
                size_px: rng.random_range(10.0..20.0),
                delay_sec: i as f64 * SNOWFLAKE_DELAY_STEP_SEC,
                duration_sec: rng.random_range(5.0..8.0),
            })
            .collect::<Vec<_>>()
    });

    html! {
        <div class="snowfall" aria-hidden="true">
            { flakes.iter().map(|f| html! {
                <div class="snowflake"
                    style={format!(
                        "left: {:.2}%; font-size: {:.1}px; animation-delay: {:.1}s; animation-duration: {:.2}s;",
                        f.left_pct, f.size_px, f.delay_sec, f.duration_sec
                    )}>
                    { "❄" }
                </div>
            }).collect::<Html>() }
        </div>
    }
}

/// Name entry, import/export and the current participants.
#[derive(Properties, PartialEq)]
pub struct NameSetupProps {
    pub names: Vec<String>,
    pub text: String,
    pub on_input: Callback<InputEvent>,
    pub on_keydown: Callback<KeyboardEvent>,
    pub on_add: Callback<MouseEvent>,
    pub on_remove: Callback<String>,
    pub on_export: Callback<MouseEvent>,
    pub on_import: Callback<Event>,
}

#[function_component(NameSetup)]
pub fn name_setup(props: &NameSetupProps) -> Html {
    html! {
        <section class="card">
            <h2>{ "Namen hinzufügen" }</h2>
            <div class="row">
                <input type="text"
                    class="name-input"
                    placeholder="Name eingeben..."
                    value={props.text.clone()}
                    oninput={props.on_input.clone()}
                    onkeydown={props.on_keydown.clone()}
                />
                <button class="btn btn-primary" onclick={props.on_add.clone()}>
                    { "➕ Hinzufügen" }
                </button>
            </div>

            <div class="row row-small">
                <button type="button" class="btn btn-ghost btn-sm" onclick={props.on_export.clone()}>
                    { "⬇ Exportieren" }
                </button>
                <label class="btn btn-ghost btn-sm">
                    { "⬆ Importieren" }
                    <input type="file"
                        class="hidden"
                        accept="application/json"
                        onchange={props.on_import.clone()}
                    />
                </label>
            </div>

            if !props.names.is_empty() {
                <h3>{ format!("Santas and Ms Claus ({})", props.names.len()) }</h3>
                <div class="name-grid">
                    { props.names.iter().map(|name| {
                        let on_remove = props.on_remove.clone();
                        let target = name.clone();
                        html! {
                            <div class="name-chip" key={name.clone()}>
                                <span>{ name.clone() }</span>
                                <button class="btn btn-danger-ghost btn-sm"
                                    title="Entfernen"
                                    onclick={move |_| on_remove.emit(target.clone())}>
                                    { "🗑" }
                                </button>
                            </div>
                        }
                    }).collect::<Html>() }
                </div>
            }
        </section>
    }
}

/// Slideshow upload and thumbnails.
#[derive(Properties, PartialEq)]
pub struct ImageSetupProps {
    pub images: Vec<ImageData>,
    pub on_upload: Callback<Event>,
    pub on_remove: Callback<usize>,
}

#[function_component(ImageSetup)]
pub fn image_setup(props: &ImageSetupProps) -> Html {
    html! {
        <section class="card">
            <h2>{ "Bilder für Diashow" }</h2>
            <label class="btn btn-secondary btn-block">
                { "⬆ Bilder hochladen" }
                <input type="file"
                    class="hidden"
                    accept="image/*"
                    multiple={true}
                    onchange={props.on_upload.clone()}
                />
            </label>

            if !props.images.is_empty() {
                <div class="thumb-grid">
                    { props.images.iter().enumerate().map(|(index, img)| {
                        let on_remove = props.on_remove.clone();
                        html! {
                            <div class="thumb">
                                <img src={AttrValue::from(img.clone())} alt={format!("Slide {}", index + 1)} />
                                <button class="thumb-remove" onclick={move |_| on_remove.emit(index)}>
                                    { "✕" }
                                </button>
                            </div>
                        }
                    }).collect::<Html>() }
                </div>
            }
        </section>
    }
}

/// The framed display: slideshow underneath, spin or winner on top.
#[derive(Properties, PartialEq)]
pub struct StageProps {
    pub images: Vec<ImageData>,
    pub current: Option<usize>,
    pub selection: SelectionState,
    pub presenting: bool,
    pub on_previous: Callback<MouseEvent>,
    pub on_next: Callback<MouseEvent>,
    pub on_show: Callback<usize>,
}

#[function_component(Stage)]
pub fn stage(props: &StageProps) -> Html {
    let has_images = !props.images.is_empty();
    let frame_class = classes!("frame", props.presenting.then_some("frame-wide"));
    let canvas_class = classes!("canvas", props.presenting.then_some("canvas-tall"));

    html! {
        <div class={frame_class}>
            <div class="frame-corner tl" />
            <div class="frame-corner tr" />
            <div class="frame-corner bl" />
            <div class="frame-corner br" />
            <div class={canvas_class}>
                if has_images {
                    <div class="slides">
                        { props.images.iter().enumerate().map(|(index, img)| html! {
                            <img src={AttrValue::from(img.clone())}
                                alt={format!("Slide {}", index + 1)}
                                class={classes!("slide", (props.current == Some(index)).then_some("active"))}
                            />
                        }).collect::<Html>() }

                        if props.images.len() > 1 {
                            <button class="slide-nav prev" onclick={props.on_previous.clone()}>{ "‹" }</button>
                            <button class="slide-nav next" onclick={props.on_next.clone()}>{ "›" }</button>
                            <div class="slide-dots">
                                { (0..props.images.len()).map(|index| {
                                    let on_show = props.on_show.clone();
                                    html! {
                                        <button
                                            class={classes!("dot", (props.current == Some(index)).then_some("active"))}
                                            onclick={move |_| on_show.emit(index)}
                                        />
                                    }
                                }).collect::<Html>() }
                            </div>
                        }
                        <div class="slides-shade" />
                    </div>
                }
                <div class="stage-text">
                    { render_selection(&props.selection, has_images) }
                </div>
            </div>
        </div>
    }
}

/// Spinning name, the winner, or an idle hint.
fn render_selection(selection: &SelectionState, has_images: bool) -> Html {
    match selection {
        SelectionState::Spinning { displayed } => html! {
            <div class="spinning">
                <div class="spin-name">{ displayed.clone().unwrap_or_default() }</div>
                <div class="spin-caption">{ "Wird ausgewählt..." }</div>
            </div>
        },
        SelectionState::Resolved { winner } => html! {
            <div class="winner">
                <div class="winner-gift">{ "🎁" }</div>
                <div class="winner-name">{ winner.clone() }</div>
                <div class="winner-caption">{ "verteilt die Geschenke! 🎅" }</div>
            </div>
        },
        SelectionState::Idle => {
            let hint = if has_images {
                "Klicke auf 'Auswahl starten' um zu beginnen"
            } else {
                "Füge Namen und Bilder hinzu, dann starte die Auswahl"
            };
            html! {
                <div class={classes!("idle", has_images.then_some("idle-on-image"))}>
                    <div class="idle-gift">{ "🎁" }</div>
                    <p>{ hint }</p>
                </div>
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct NoticeLineProps {
    pub notice: Option<Notice>,
}

#[function_component(NoticeLine)]
pub fn notice_line(props: &NoticeLineProps) -> Html {
    match &props.notice {
        Some(notice) => html! {
            <div class={classes!("notice", notice.is_rejection().then_some("notice-rejection"))}
                role="status">
                { notice.to_string() }
            </div>
        },
        None => html! {},
    }
}

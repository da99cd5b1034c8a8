use gloo_timers::callback::Interval;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Holds the state and callbacks for a free-text input field.
#[derive(Clone)]
pub struct TextInput {
    /// The current text content of the input field.
    pub text: String,
    /// Callback for the input's `oninput` event.
    pub on_input: Callback<InputEvent>,
    /// Empties the field, typically after its value was accepted.
    pub clear: Callback<()>,
}

#[hook]
pub fn use_text_input() -> TextInput {
    let text_handle = use_state(String::new);

    let on_input = {
        let text_setter = text_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
        })
    };

    let clear = {
        let text_setter = text_handle.clone();
        Callback::from(move |_| text_setter.set(String::new()))
    };

    TextInput {
        text: (*text_handle).clone(),
        on_input,
        clear,
    }
}

/// Run `on_tick` every `period_ms` while `key` is `Some`.
///
/// The interval lives inside the effect: it is rebuilt whenever `key`
/// changes and cancelled (dropped) when `key` turns `None` or the component
/// unmounts.
#[hook]
pub fn use_interval<K>(key: Option<K>, period_ms: u32, on_tick: Callback<()>)
where
    K: PartialEq + Clone + 'static,
{
    use_effect_with(key, move |key| {
        let interval = key
            .as_ref()
            .map(|_| Interval::new(period_ms, move || on_tick.emit(())));
        move || drop(interval)
    });
}

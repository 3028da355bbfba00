use std::rc::Rc;
use skate_splits::{Distance, PaceAction, PaceModel};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Reducer wrapper so every edit swaps in a whole new model.
#[derive(Clone, PartialEq)]
pub struct PaceStore {
    pub model: PaceModel,
}

impl Reducible for PaceStore {
    type Action = PaceAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut model = self.model;
        model.apply(action);
        Rc::new(Self { model })
    }
}

/// Pace model state, seeded with the distance from the URL.
#[hook]
pub fn use_pace_model(initial_distance: Distance) -> UseReducerHandle<PaceStore> {
    use_reducer(move || PaceStore {
        model: PaceModel::new(initial_distance),
    })
}

/// Holds the state and callbacks for a validated text field.
#[derive(Clone)]
pub struct ValidatedInput {
    /// The current text content of the input field.
    pub text: String,
    /// An optional error message if validation failed.
    pub error: Option<String>,
    /// Callback for the text input's `oninput` event.
    pub on_text_input: Callback<InputEvent>,
    /// Parse and validate the current text, emitting the value and rewriting
    /// the text to canonical form on success.
    /// Typically used with `onchange` or after an Enter key press.
    pub on_commit: Callback<()>,
}

/// Text field that mirrors `display` until the user starts typing, and hands
/// validated values to `on_valid` on commit.
#[hook]
pub fn use_validated_input<T: 'static>(
    display: String,
    parse_and_validate: Rc<dyn Fn(&str) -> Result<(T, String), String>>,
    on_valid: Callback<T>,
) -> ValidatedInput {
    let text_state_handle = use_state(|| display.clone());
    let error_state_handle = use_state(|| None::<String>);

    // Follow value changes coming from the sliders
    {
        let text_setter = text_state_handle.clone();
        let error_setter = error_state_handle.clone();
        use_effect_with(display, move |formatted| {
            text_setter.set(formatted.clone());
            error_setter.set(None);
            || ()
        });
    }

    let on_text_input = {
        let text_setter = text_state_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
        })
    };

    let on_commit = {
        let current_text_handle = text_state_handle.clone();
        let text_setter_on_commit = text_state_handle.clone();
        let error_setter = error_state_handle.clone();
        Callback::from(move |_| match parse_and_validate(&(*current_text_handle)) {
            Ok((value, canonical)) => {
                text_setter_on_commit.set(canonical);
                error_setter.set(None);
                on_valid.emit(value);
            }
            Err(err_msg) => error_setter.set(Some(err_msg)),
        })
    };

    ValidatedInput {
        text: (*text_state_handle).clone(),
        error: (*error_state_handle).clone(),
        on_text_input,
        on_commit,
    }
}

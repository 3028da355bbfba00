//! Speed skating pacing calculator built with Yew.
//! Wires the pace reducer, the URL query sync and the view components.

use log::{info, warn};
use skate_splits::utils::commit_result_input;
use skate_splits::{format_clock, query, PaceAction};
use std::rc::Rc;
use yew::prelude::*;

mod components;
mod hooks;

use components::{render_splits, DistanceSelect, ResultSlider, TimeMarks, TimeSlider};
use hooks::{use_pace_model, use_validated_input, PaceStore};

/// Callback that turns a UI value into a pace action and dispatches it.
fn dispatch_with<IN: 'static>(
    pace: &UseReducerHandle<PaceStore>,
    make_action: impl Fn(IN) -> PaceAction + 'static,
) -> Callback<IN> {
    let dispatcher = pace.dispatcher();
    Callback::from(move |value: IN| dispatcher.dispatch(make_action(value)))
}

/// Primary application component wiring state, effects, and UI elements.
#[function_component(App)]
fn app() -> Html {
    let initial_distance = use_memo((), |_| query::read_initial_distance());
    let pace = use_pace_model(*initial_distance);
    let show_splits = use_state(|| false);

    let model = pace.model;
    let derived = model.derive();
    let bounds = model.result_bounds();

    // Keep ?distance= in sync with the selection
    use_effect_with(model.distance(), |distance| {
        if let Err(e) = query::write_distance(*distance) {
            warn!("Could not update query string: {:?}", e);
        }
        || ()
    });

    let on_distance = dispatch_with(&pace, PaceAction::SelectDistance);
    let on_result = dispatch_with(&pace, PaceAction::SetResult);
    let on_lap = dispatch_with(&pace, PaceAction::SetLap);
    let on_opening = dispatch_with(&pace, PaceAction::SetOpening);
    let on_lap_lock = dispatch_with(&pace, |_: ()| PaceAction::ToggleLapLock);
    let on_opening_lock = dispatch_with(&pace, |_: ()| PaceAction::ToggleOpeningLock);

    let validate_result: Rc<dyn Fn(&str) -> Result<(f64, String), String>> =
        Rc::new(move |text: &str| commit_result_input(text, bounds));
    let result_input = use_validated_input(
        format_clock(derived.result),
        validate_result,
        on_result.clone(),
    );
    let result_onkeydown = {
        let on_commit = result_input.on_commit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                on_commit.emit(());
            }
        })
    };

    let toggle_splits = {
        let show_splits = show_splits.clone();
        Callback::from(move |_| show_splits.set(!*show_splits))
    };

    html! {
        <div class="container">
            <DistanceSelect selected={model.distance()} onchange={on_distance} />
            <div class="sliders">
                <ResultSlider result={derived.result} {bounds} oninput={on_result} />
                <div class="form-group result-text">
                    <input
                        type="text"
                        id="result_text_input"
                        value={result_input.text.clone()}
                        class={classes!("slider-value", result_input.error.is_some().then_some("invalid"))}
                        placeholder="M:SS.s"
                        oninput={result_input.on_text_input.clone()}
                        onchange={result_input.on_commit.reform(|_| ())}
                        onkeydown={result_onkeydown}
                    />
                    if let Some(ref error) = result_input.error {
                        <div class="input-error">{ error }</div>
                    }
                </div>
                <TimeSlider
                    label="Lap"
                    seconds={derived.lap}
                    locked={model.lap_locked()}
                    oninput={on_lap}
                    ontoggle_lock={on_lap_lock}
                />
                <TimeSlider
                    label="Opening"
                    seconds={derived.opening}
                    locked={model.opening_locked()}
                    oninput={on_opening}
                    ontoggle_lock={on_opening_lock}
                />
                <TimeMarks />
            </div>
            <div class="splits-section">
                <button class="btn-secondary" onclick={toggle_splits}>
                    { if *show_splits { "Hide splits" } else { "Show splits" } }
                </button>
                if *show_splits {
                    { render_splits(&model.lap_splits()) }
                }
            </div>
        </div>
    }
}

/// Entry point: installs logging and renders the App.
fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    console_log::init_with_level(level).expect("Couldn't initialize logger");
    info!("Starting pacing calculator");
    yew::Renderer::<App>::new().render();
}


//! Pure Yew view components for the pacing UI.
//!
//! Components render from props only; all state lives in the pace reducer.

use skate_splits::config::{MAX_TIME_SEC, MIN_TIME_SEC, SLIDER_MARKS_SEC, SLIDER_STEP_SEC};
use skate_splits::{format_clock, format_distance, format_split_time, Distance, LapSplit, ResultBounds};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Read a slider's value, ignoring anything that is not a number.
fn slider_value(e: &InputEvent) -> Option<f64> {
    let input: HtmlInputElement = e.target_unchecked_into();
    input.value().parse::<f64>().ok()
}

/// Forward numeric slider input to `on_value`.
fn slider_callback(on_value: &Callback<f64>) -> Callback<InputEvent> {
    let on_value = on_value.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(value) = slider_value(&e) {
            on_value.emit(value);
        }
    })
}

#[derive(Properties, PartialEq)]
pub struct DistanceSelectProps {
    pub selected: Distance,
    pub onchange: Callback<Distance>,
}

#[function_component(DistanceSelect)]
pub fn distance_select(props: &DistanceSelectProps) -> Html {
    let onchange = {
        let on_select = props.onchange.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(distance) = select.value().parse::<Distance>() {
                on_select.emit(distance);
            }
        })
    };

    html! {
        <div class="form-group distance-select">
            <label for="distance">{ "Distance" }</label>
            <select id="distance" {onchange}>
                { Distance::ALL.iter().map(|d| html! {
                    <option value={d.key()} selected={*d == props.selected}>{ d.label() }</option>
                }).collect::<Html>() }
            </select>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LockSwitchProps {
    pub locked: bool,
    pub ontoggle: Callback<()>,
}

#[function_component(LockSwitch)]
pub fn lock_switch(props: &LockSwitchProps) -> Html {
    let onchange = props.ontoggle.reform(|_: Event| ());
    html! {
        <label class={classes!("lock-switch", props.locked.then_some("locked"))}>
            <input type="checkbox" checked={props.locked} {onchange} />
            <span class="lock-icon">{ if props.locked { "🔒" } else { "" } }</span>
        </label>
    }
}

/// Slider for an opening or lap time, with its lock switch.
#[derive(Properties, PartialEq)]
pub struct TimeSliderProps {
    pub label: AttrValue,
    pub seconds: f64,
    pub locked: bool,
    pub oninput: Callback<f64>,
    pub ontoggle_lock: Callback<()>,
}

#[function_component(TimeSlider)]
pub fn time_slider(props: &TimeSliderProps) -> Html {
    let oninput = slider_callback(&props.oninput);

    html! {
        <div class="form-group time-slider">
            <div class="slider-with-value">
                <input type="range"
                    class={classes!(props.locked.then_some("locked"))}
                    min={MIN_TIME_SEC.to_string()}
                    max={MAX_TIME_SEC.to_string()}
                    step={SLIDER_STEP_SEC.to_string()}
                    value={props.seconds.to_string()}
                    list="time-marks"
                    {oninput}
                />
                <span class="slider-value">{ format!("{}: {}", props.label, format_clock(props.seconds)) }</span>
                <LockSwitch locked={props.locked} ontoggle={props.ontoggle_lock.clone()} />
            </div>
        </div>
    }
}

/// Shared tick marks for the opening and lap sliders.
#[function_component(TimeMarks)]
pub fn time_marks() -> Html {
    html! {
        <datalist id="time-marks">
            { SLIDER_MARKS_SEC.iter().map(|secs| html! {
                <option value={secs.to_string()} label={secs.to_string()}></option>
            }).collect::<Html>() }
        </datalist>
    }
}

#[derive(Properties, PartialEq)]
pub struct ResultSliderProps {
    pub result: f64,
    pub bounds: ResultBounds,
    pub oninput: Callback<f64>,
}

#[function_component(ResultSlider)]
pub fn result_slider(props: &ResultSliderProps) -> Html {
    let oninput = slider_callback(&props.oninput);

    html! {
        <div class="form-group result-slider">
            <div class="slider-with-value">
                <input type="range"
                    min={props.bounds.min.to_string()}
                    max={props.bounds.max.to_string()}
                    step={SLIDER_STEP_SEC.to_string()}
                    value={props.result.to_string()}
                    list="result-marks"
                    {oninput}
                />
                <span class="slider-value">{ format!("Result: {}", format_clock(props.result)) }</span>
            </div>
            <datalist id="result-marks">
                <option value={props.bounds.min.to_string()} label={format_clock(props.bounds.min)}></option>
                <option value={props.bounds.max.to_string()} label={format_clock(props.bounds.max)}></option>
            </datalist>
            <div class="slider-bounds">
                <span>{ format_clock(props.bounds.min) }</span>
                <span>{ format_clock(props.bounds.max) }</span>
            </div>
        </div>
    }
}

/// Renders the lap split table.
pub fn render_splits(splits: &[LapSplit]) -> Html {
    html! {
        <table class="splits-table">
            <thead>
                <tr>
                    <th>{ "Lap" }</th>
                    <th>{ "Distance" }</th>
                    <th>{ "Time" }</th>
                </tr>
            </thead>
            <tbody>
                { splits.iter().map(|split| html! {
                    <tr key={split.lap_number}>
                        <td>{ split.lap_number }</td>
                        <td class="mono">{ format_distance(split.distance_m) }</td>
                        <td class="mono">{ format_split_time(split.time_sec) }</td>
                    </tr>
                }).collect::<Html>() }
            </tbody>
        </table>
    }
}

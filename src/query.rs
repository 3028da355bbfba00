//! Keeps the selected distance in the page's query string.
//!
//! `?distance=1500` picks the distance on load, and every later selection is
//! written back with `history.replaceState` so the URL can be shared without
//! piling up history entries.

use log::{debug, warn};
use wasm_bindgen::JsValue;
use web_sys::UrlSearchParams;

use crate::config::DISTANCE_PARAM;
use crate::distance::Distance;

/// Resolve the `distance` parameter, falling back to the default for
/// anything that is missing or not a profile key.
pub fn distance_from_param(param: Option<&str>) -> Distance {
    match param {
        None => Distance::default(),
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Ignoring '{}' query parameter: {}", DISTANCE_PARAM, e);
            Distance::default()
        }),
    }
}

/// Read the initial distance from the current page URL.
pub fn read_initial_distance() -> Distance {
    let search = gloo_utils::window().location().search().unwrap_or_default();
    let param = UrlSearchParams::new_with_str(&search)
        .ok()
        .and_then(|params| params.get(DISTANCE_PARAM));
    distance_from_param(param.as_deref())
}

/// Replace the current URL so its query string carries `distance`.
pub fn write_distance(distance: Distance) -> Result<(), JsValue> {
    let window = gloo_utils::window();
    let location = window.location();
    let params = UrlSearchParams::new_with_str(&location.search()?)?;
    params.set(DISTANCE_PARAM, &distance.key());
    let next = format!("{}?{}", location.pathname()?, String::from(params.to_string()));
    window
        .history()?
        .replace_state_with_url(&JsValue::NULL, "", Some(&next))?;
    debug!("Query string updated to {}", next);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_param_defaults_to_5000() {
        assert_eq!(distance_from_param(None), Distance::M5000);
    }

    #[test]
    fn valid_param_is_used() {
        assert_eq!(distance_from_param(Some("500")), Distance::M500);
        assert_eq!(distance_from_param(Some("3000")), Distance::M3000);
    }

    #[test]
    fn invalid_param_falls_back_silently() {
        assert_eq!(distance_from_param(Some("")), Distance::M5000);
        assert_eq!(distance_from_param(Some("42")), Distance::M5000);
        assert_eq!(distance_from_param(Some("1000m")), Distance::M5000);
    }
}

//! [`ControlSurface`] over the status icons present in the document.
//!
//! Icons are `.icon-btn` elements carrying `data-source`, an optional
//! `data-ipx-index` and a nested `.icon-state` element whose text drives the
//! paint of non-relay icons.

use std::cell::RefCell;

use homehub_app::ports::ControlSurface;
use homehub_domain::control::{ControlButton, ControlPaint};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

pub const ICON_SELECTOR: &str = ".icon-btn";
pub const STATE_SELECTOR: &str = ".icon-state";

const ON_CLASS: &str = "on";
const UNKNOWN_CLASS: &str = "unknown";

/// Snapshot of the icons in the document, taken when the reconciler asks
/// for them.
#[derive(Default)]
pub struct DomControlSurface {
    elements: RefCell<Vec<HtmlElement>>,
}

impl DomControlSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

fn query_icons() -> Vec<HtmlElement> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Vec::new();
    };
    let Ok(nodes) = document.query_selector_all(ICON_SELECTOR) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn state_text(element: &Element) -> String {
    element
        .query_selector(STATE_SELECTOR)
        .ok()
        .flatten()
        .and_then(|state| state.text_content())
        .unwrap_or_default()
}

fn read_button(element: &HtmlElement) -> ControlButton {
    let source = element.get_attribute("data-source").unwrap_or_default();
    let ipx_index = element.get_attribute("data-ipx-index");
    ControlButton::from_attributes(&source, ipx_index.as_deref(), state_text(element))
}

impl ControlSurface for DomControlSurface {
    fn controls(&self) -> Vec<ControlButton> {
        let elements = query_icons();
        let controls = elements.iter().map(read_button).collect();
        *self.elements.borrow_mut() = elements;
        controls
    }

    fn paint(&self, position: usize, paint: ControlPaint) {
        let elements = self.elements.borrow();
        let Some(element) = elements.get(position) else {
            return;
        };
        let classes = element.class_list();
        let results = [
            classes.toggle_with_force(ON_CLASS, paint == ControlPaint::On),
            classes.toggle_with_force(UNKNOWN_CLASS, paint == ControlPaint::Unknown),
        ];
        if results.iter().any(Result::is_err) {
            leptos::logging::warn!("failed to paint icon at position {position}");
        }
        let pressed = match paint {
            ControlPaint::On => "true",
            ControlPaint::Off => "false",
            ControlPaint::Unknown => "mixed",
        };
        if let Err(err) = element.set_attribute("aria-pressed", pressed) {
            leptos::logging::warn!("failed to set aria-pressed: {err:?}");
        }
    }
}

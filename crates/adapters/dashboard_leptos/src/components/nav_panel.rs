//! Slide-in navigation panel.
//!
//! Two ways to get one on screen:
//! - [`NavPanel`] renders its own trigger, backdrop and panel.
//! - [`attach_to_existing`] wires up anchors already in the host page.
//!
//! Either way the panel starts closed, closes on backdrop click, the close
//! button and `Escape`, and marks the link matching the current path.

use homehub_domain::nav::{MenuState, NavLink, active_link_index};
use homehub_domain::settings::NavSettings;
use leptos::ev;
use leptos::prelude::*;
use leptos_router::hooks::use_location;
use wasm_bindgen::prelude::*;
use web_sys::{Element, EventTarget, KeyboardEvent};

const OPEN_CLASS: &str = "open";
const VISIBLE_CLASS: &str = "visible";
const ACTIVE_CLASS: &str = "active";
const LINK_SELECTOR: &str = ".menu-item[href]";
const CLOSE_SELECTOR: &str = ".menu-close";

/// Navigation panel rendered by the dashboard itself.
#[component]
pub fn NavPanel(
    /// Links listed in the panel, in display order.
    links: Vec<NavLink>,
) -> impl IntoView {
    let (menu, set_menu) = signal(MenuState::default());
    let location = use_location();

    let active_links = links.clone();
    let active = Memo::new(move |_| active_link_index(&active_links, &location.pathname.get()));

    let close = move || set_menu.update(MenuState::close);

    let escape = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            close();
        }
    });
    on_cleanup(move || escape.remove());

    let items = links
        .into_iter()
        .enumerate()
        .map(|(index, link)| {
            let is_active = move || active.get() == Some(index);
            view! {
                <li>
                    <a
                        class="menu-item"
                        class:active=is_active
                        aria-current=move || is_active().then_some("page")
                        href=link.href
                        on:click=move |_| close()
                    >
                        {link.label}
                    </a>
                </li>
            }
        })
        .collect_view();

    view! {
        <button
            id="menu-trigger"
            class="menu-trigger"
            aria-controls="menu-panel"
            aria-label="Menu"
            aria-expanded=move || menu.get().expanded_attr()
            on:click=move |_| {
                set_menu.update(|state| {
                    state.toggle();
                });
            }
        >
            "\u{2630}"
        </button>
        <div
            id="menu-backdrop"
            class="menu-backdrop"
            class:visible=move || menu.get().is_open
            on:click=move |_| close()
        ></div>
        <nav
            id="menu-panel"
            class="menu-panel"
            class:open=move || menu.get().is_open
            aria-hidden=move || (!menu.get().is_open).to_string()
        >
            <button class="menu-close" aria-label="Close menu" on:click=move |_| close()>
                "\u{00D7}"
            </button>
            <ul>{items}</ul>
        </nav>
    }
}

type Listener = Closure<dyn FnMut(web_sys::Event)>;

/// Event wiring for a panel that lives in the host page.
///
/// Dropping it removes every listener it added.
pub struct AttachedNavPanel {
    listeners: Vec<(EventTarget, &'static str, Listener)>,
}

impl Drop for AttachedNavPanel {
    fn drop(&mut self) {
        for (target, kind, listener) in &self.listeners {
            if let Err(err) =
                target.remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())
            {
                leptos::logging::warn!("failed to remove {kind} listener: {err:?}");
            }
        }
    }
}

#[derive(Clone)]
struct Anchors<E = Element> {
    trigger: E,
    panel: E,
    backdrop: E,
}

impl<E> Anchors<E> {
    /// Resolve trigger, panel and backdrop in that order, stopping at the
    /// first id `lookup` cannot find.
    fn find(settings: &NavSettings, mut lookup: impl FnMut(&str) -> Option<E>) -> Option<Self> {
        Some(Self {
            trigger: lookup(&settings.trigger_id)?,
            panel: lookup(&settings.panel_id)?,
            backdrop: lookup(&settings.backdrop_id)?,
        })
    }
}

impl Anchors {
    fn state(&self) -> MenuState {
        MenuState::from_expanded_attr(self.trigger.get_attribute("aria-expanded").as_deref())
    }

    fn apply(&self, state: MenuState) {
        let results = [
            self.trigger
                .set_attribute("aria-expanded", state.expanded_attr()),
            self.panel
                .set_attribute("aria-hidden", &(!state.is_open).to_string()),
            self.panel
                .class_list()
                .toggle_with_force(OPEN_CLASS, state.is_open)
                .map(drop),
            self.backdrop
                .class_list()
                .toggle_with_force(VISIBLE_CLASS, state.is_open)
                .map(drop),
        ];
        if results.iter().any(Result::is_err) {
            leptos::logging::warn!("failed to update navigation panel state");
        }
    }
}

/// Wire up the trigger, panel and backdrop named in `settings`.
///
/// Returns `None`, and adds no listener at all, when any of the three
/// anchors is missing from the document.
pub fn attach_to_existing(settings: &NavSettings) -> Option<AttachedNavPanel> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let Some(anchors) = Anchors::find(settings, |id| document.get_element_by_id(id)) else {
        leptos::logging::warn!(
            "navigation anchors #{}, #{}, #{} not all present; panel not wired",
            settings.trigger_id,
            settings.panel_id,
            settings.backdrop_id
        );
        return None;
    };

    anchors.apply(MenuState::default());
    let path = window.location().pathname().unwrap_or_else(|_| "/".to_string());
    mark_active_link(&anchors.panel, &path);

    let mut attached = AttachedNavPanel {
        listeners: Vec::new(),
    };

    let toggle = {
        let anchors = anchors.clone();
        Listener::new(move |_: web_sys::Event| {
            let mut state = anchors.state();
            state.toggle();
            anchors.apply(state);
        })
    };
    attached.listen(anchors.trigger.clone().into(), "click", toggle);

    let close_on_click = |anchors: &Anchors| {
        let anchors = anchors.clone();
        Listener::new(move |_: web_sys::Event| anchors.apply(MenuState::default()))
    };
    attached.listen(
        anchors.backdrop.clone().into(),
        "click",
        close_on_click(&anchors),
    );
    if let Ok(Some(close_button)) = anchors.panel.query_selector(CLOSE_SELECTOR) {
        attached.listen(close_button.into(), "click", close_on_click(&anchors));
    }

    let escape = {
        let anchors = anchors.clone();
        Listener::new(move |event: web_sys::Event| {
            let is_escape = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|key| key.key() == "Escape");
            if is_escape {
                anchors.apply(MenuState::default());
            }
        })
    };
    attached.listen(document.into(), "keydown", escape);

    Some(attached)
}

impl AttachedNavPanel {
    fn listen(&mut self, target: EventTarget, kind: &'static str, listener: Listener) {
        match target.add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref()) {
            Ok(()) => self.listeners.push((target, kind, listener)),
            Err(err) => leptos::logging::warn!("failed to add {kind} listener: {err:?}"),
        }
    }
}

/// Flag the first `.menu-item` whose href matches `path` as active.
fn mark_active_link(panel: &Element, path: &str) {
    let Ok(nodes) = panel.query_selector_all(LINK_SELECTOR) else {
        return;
    };
    let items: Vec<Element> = (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect();
    let links: Vec<NavLink> = items
        .iter()
        .map(|item| NavLink::new(item.get_attribute("href").unwrap_or_default(), ""))
        .collect();
    let active = active_link_index(&links, path);

    for (index, item) in items.iter().enumerate() {
        let is_active = active == Some(index);
        if item
            .class_list()
            .toggle_with_force(ACTIVE_CLASS, is_active)
            .is_err()
        {
            leptos::logging::warn!("failed to mark navigation link {index}");
        }
        let aria = if is_active {
            item.set_attribute("aria-current", "page")
        } else {
            item.remove_attribute("aria-current")
        };
        if let Err(err) = aria {
            leptos::logging::warn!("failed to set aria-current: {err:?}");
        }
    }
}

use homehub_adapter_dashboard_leptos::App;
use leptos::prelude::*;

fn main() {
    mount_to_body(App);
}

use homehub_domain::backend::SwitchDevice;
use homehub_domain::settings::DashboardSettings;
use leptos::prelude::*;

use crate::components::{IconGrid, NextEventCard, SwitchCard, VoiceCard};

/// Landing page: status icons followed by the control widgets.
#[component]
pub fn Home() -> impl IntoView {
    let settings = expect_context::<DashboardSettings>();

    view! {
        <div class="home">
            <IconGrid icons=settings.icons/>
            <div class="cards">
                <SwitchCard device=SwitchDevice::Lights title="Lights"/>
                <SwitchCard device=SwitchDevice::Heating title="Heating"/>
                <VoiceCard/>
                <NextEventCard/>
            </div>
        </div>
    }
}

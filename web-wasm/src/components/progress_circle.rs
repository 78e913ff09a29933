//! Circular percentage badge

use careersync_common::dashboard::conic_gradient;
use careersync_common::ScoreBand;
use leptos::prelude::*;

#[component]
pub fn ProgressCircle(percent: u8) -> impl IntoView {
    let percent = percent.min(100);
    let class = format!("circle-progress {}", ScoreBand::from_score(percent as u32).css_class());

    view! {
        <div class=class style=format!("background: {}", conic_gradient(percent))>
            <span class="circle-progress-value">{format!("{}%", percent)}</span>
        </div>
    }
}

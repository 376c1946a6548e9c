use super::{Section, Typewriter};
use dioxus::prelude::*;
use portfolio_engine::{HeroLine, Profile, RegionId};

#[component]
pub fn Hero(profile: Profile, lines: Vec<HeroLine>, on_navigate: EventHandler<RegionId>) -> Element {
    rsx! {
        Section {
            id: "home",
            class: "hero",
            div {
                class: "hero-text",
                for (index, line) in lines.iter().enumerate() {
                    div {
                        key: "{index}",
                        class: "hero-line hero-line-{index}",
                        Typewriter { text: line.text.clone(), delay_ms: line.delay_ms }
                    }
                }
                p { class: "hero-summary", "{profile.summary}" }
                a {
                    class: "button primary",
                    href: "#projects",
                    onclick: move |evt: MouseEvent| {
                        evt.prevent_default();
                        on_navigate.call(RegionId::from("projects"));
                    },
                    "View Projects →"
                }
            }
        }
    }
}

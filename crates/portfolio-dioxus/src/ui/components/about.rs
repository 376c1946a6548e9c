use super::{FadeIn, Section};
use dioxus::prelude::*;
use portfolio_engine::{Animation, Profile, RegionId};

#[component]
pub fn About(profile: Profile, on_navigate: EventHandler<RegionId>) -> Element {
    rsx! {
        Section {
            id: "about",
            class: "alt",
            FadeIn {
                id: "about-heading",
                class: "section-heading",
                h3 { "About Me" }
                p { class: "muted", "Get to know my professional journey and passion." }
            }
            div {
                class: "two-column",
                FadeIn {
                    id: "about-story",
                    animation: Animation::FadeInLeft,
                    delay_ms: 200,
                    for (index, paragraph) in profile.about.iter().enumerate() {
                        p { key: "{index}", "{paragraph}" }
                    }
                    a {
                        class: "accent",
                        href: "#contact",
                        onclick: move |evt: MouseEvent| {
                            evt.prevent_default();
                            on_navigate.call(RegionId::from("contact"));
                        },
                        "Ready for a chat? →"
                    }
                }
                FadeIn {
                    id: "about-skills",
                    animation: Animation::FadeInRight,
                    delay_ms: 400,
                    class: "card",
                    h4 { "My Tech Stack" }
                    ul {
                        for skill in profile.skills.iter() {
                            li {
                                key: "{skill}",
                                span { class: "accent", "• " }
                                "{skill}"
                            }
                        }
                    }
                }
            }
        }
    }
}

use dioxus::prelude::*;

/// Full-height page section; `id` is what the section tracker observes
#[component]
pub fn Section(id: String, #[props(default)] class: String, children: Element) -> Element {
    rsx! {
        section {
            id: "{id}",
            class: "section {class}",
            div {
                class: "container",
                {children}
            }
        }
    }
}

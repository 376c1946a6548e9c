use dioxus::prelude::*;

#[component]
pub fn Footer(owner: String) -> Element {
    rsx! {
        footer {
            class: "site-footer",
            p { "© {owner}. All rights reserved." }
        }
    }
}

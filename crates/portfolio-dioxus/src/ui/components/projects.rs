use super::{ProjectCard, Section};
use dioxus::prelude::*;
use portfolio_engine::Project;

#[component]
pub fn Projects(projects: Vec<Project>) -> Element {
    rsx! {
        Section {
            id: "projects",
            div {
                class: "section-heading",
                h3 { "My Work" }
                p { class: "muted", "Some of the projects I'm most proud of." }
            }
            div {
                class: "project-list",
                for (index, project) in projects.into_iter().enumerate() {
                    ProjectCard { key: "{index}", project }
                }
            }
        }
    }
}

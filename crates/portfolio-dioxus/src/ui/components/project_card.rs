use dioxus::prelude::*;
use portfolio_engine::Project;

#[component]
pub fn ProjectCard(project: Project) -> Element {
    rsx! {
        article {
            class: "project-card",
            if !project.image.is_empty() {
                img {
                    class: "project-image",
                    src: "{project.image}",
                    alt: "{project.title}"
                }
            }
            div {
                class: "project-body",
                h4 { "{project.title}" }
                p { "{project.description}" }
                div {
                    class: "tech-tags",
                    for tech in project.tech_stack.iter() {
                        span { key: "{tech}", class: "tech-tag", "{tech}" }
                    }
                }
                div {
                    class: "project-links",
                    a {
                        class: "button secondary",
                        href: "{project.github_link}",
                        target: "_blank",
                        rel: "noopener noreferrer",
                        "GitHub"
                    }
                    if let Some(demo) = &project.demo_link {
                        a {
                            class: "button primary",
                            href: "{demo}",
                            target: "_blank",
                            rel: "noopener noreferrer",
                            "Live Demo"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;
    use portfolio_engine::SiteContent;
    use pretty_assertions::assert_eq;

    fn render_card(project: Project) -> String {
        let mut dom = VirtualDom::new_with_props(ProjectCard, ProjectCardProps { project });
        dom.rebuild_in_place();
        render(&dom)
    }

    #[test]
    fn test_card_shows_project_details() {
        let project = SiteContent::default().projects.remove(0);
        let html = render_card(project);

        assert!(html.contains("MERN E-Commerce Store"));
        assert!(html.contains("Stripe API"));
        assert_eq!(html.matches(r#"class="tech-tag""#).count(), 6);
        assert!(html.contains("https://github.com/Jayasridhara/ecommerce-frontend"));
        assert!(html.contains("Live Demo"));
    }

    #[test]
    fn test_card_without_demo_or_image() {
        let project = Project {
            title: "CLI Tool".to_string(),
            description: "Terminal only".to_string(),
            tech_stack: vec!["Rust".to_string()],
            github_link: "https://example.com/cli".to_string(),
            demo_link: None,
            image: String::new(),
        };
        let html = render_card(project);

        assert!(html.contains("GitHub"));
        assert!(!html.contains("Live Demo"));
        assert!(!html.contains("<img"));
    }
}

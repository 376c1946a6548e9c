use dioxus::prelude::*;
use portfolio_engine::RegionId;

#[component]
pub fn Header(
    brand: String,
    sections: Vec<RegionId>,
    active: RegionId,
    menu_open: bool,
    on_navigate: EventHandler<RegionId>,
    on_toggle_menu: EventHandler<()>,
) -> Element {
    let home = sections.first().cloned();

    rsx! {
        header {
            class: "site-header",
            div {
                class: "header-bar",
                h1 {
                    class: "brand",
                    a {
                        href: "#",
                        onclick: move |evt: MouseEvent| {
                            evt.prevent_default();
                            if let Some(home) = home.clone() {
                                on_navigate.call(home);
                            }
                        },
                        span { class: "accent", "<" }
                        "{brand}"
                        span { class: "accent", "/>" }
                    }
                }
                nav {
                    class: "nav-desktop",
                    NavLinks {
                        sections: sections.clone(),
                        active: active.clone(),
                        on_navigate
                    }
                }
                button {
                    class: "menu-toggle",
                    aria_label: "Toggle navigation",
                    onclick: move |_| on_toggle_menu.call(()),
                    if menu_open { "✕" } else { "☰" }
                }
            }
            if menu_open {
                nav {
                    class: "nav-mobile",
                    NavLinks {
                        sections: sections.clone(),
                        active: active.clone(),
                        on_navigate
                    }
                }
            }
        }
    }
}

#[component]
fn NavLinks(
    sections: Vec<RegionId>,
    active: RegionId,
    on_navigate: EventHandler<RegionId>,
) -> Element {
    rsx! {
        for section in sections {
            {
                let class = if section == active { "nav-link active" } else { "nav-link" };
                let target = section.clone();
                rsx! {
                    a {
                        key: "{section}",
                        class: "{class}",
                        href: "#{section}",
                        onclick: move |evt: MouseEvent| {
                            evt.prevent_default();
                            on_navigate.call(target.clone());
                        },
                        "{section}"
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
    use portfolio_engine::DEFAULT_SECTIONS;
    use pretty_assertions::assert_eq;

    #[component]
    fn HeaderFixture(active: String, menu_open: bool) -> Element {
        rsx! {
            Header {
                brand: "MERN Developer".to_string(),
                sections: DEFAULT_SECTIONS.iter().map(|id| RegionId::from(*id)).collect::<Vec<_>>(),
                active: RegionId::from(active),
                menu_open,
                on_navigate: |_| {},
                on_toggle_menu: |_| {}
            }
        }
    }

    fn render_header(active: &str, menu_open: bool) -> String {
        let mut dom = VirtualDom::new_with_props(
            HeaderFixture,
            HeaderFixtureProps {
                active: active.to_string(),
                menu_open,
            },
        );
        dom.rebuild_in_place();
        render(&dom)
    }

    #[test]
    fn test_header_highlights_only_active_section() {
        let html = render_header("projects", false);

        assert_eq!(html.matches("nav-link active").count(), 1);
        let active_link = html.split("nav-link active").nth(1).unwrap();
        assert!(active_link.split("</a>").next().unwrap().contains("projects"));
        assert!(html.contains(r##"href="#about""##));
        assert!(html.contains("MERN Developer"));
    }

    #[test]
    fn test_mobile_menu_only_rendered_when_open() {
        let closed = render_header("home", false);
        let open = render_header("home", true);

        assert!(!closed.contains("nav-mobile"));
        assert!(open.contains("nav-mobile"));
        assert_eq!(open.matches("nav-link active").count(), 2);
    }
}

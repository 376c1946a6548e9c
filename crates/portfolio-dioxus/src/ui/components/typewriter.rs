use crate::ui::PageSettings;
use dioxus::prelude::*;
use portfolio_engine::{Tick, TypewriterView, typewriter};
use std::time::Duration;

/// Types `text` out one character per tick after `delay_ms`.
///
/// A new text or delay restarts from an empty prefix; the previous task is
/// dropped along with its pending sleeps.
#[component]
pub fn Typewriter(text: String, #[props(default)] delay_ms: u64) -> Element {
    let tick = try_use_context::<PageSettings>()
        .unwrap_or_default()
        .tick;
    let mut view = use_signal(TypewriterView::default);

    let _typing = use_resource(use_reactive!(|(text, delay_ms)| async move {
        let mut machine = typewriter::Typewriter::new(text, Duration::from_millis(delay_ms));
        view.set(machine.view());
        if !machine.needs_timers() {
            return;
        }

        tokio::time::sleep(machine.delay()).await;
        machine.start();
        view.set(machine.view());

        loop {
            tokio::time::sleep(tick).await;
            let outcome = machine.tick();
            view.set(machine.view());
            if outcome != Tick::Advanced {
                break;
            }
        }
    }));

    rsx! {
        TypewriterText { view: view() }
    }
}

#[component]
pub fn TypewriterText(view: TypewriterView) -> Element {
    let caret = if view.typing { "caret blink" } else { "caret idle" };

    rsx! {
        span {
            class: "typewriter",
            "{view.revealed}"
            span { class: "{caret}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;

    fn render_view(revealed: &str, typing: bool) -> String {
        let mut dom = VirtualDom::new_with_props(
            TypewriterText,
            TypewriterTextProps {
                view: TypewriterView {
                    revealed: revealed.to_string(),
                    typing,
                },
            },
        );
        dom.rebuild_in_place();
        render(&dom)
    }

    #[test]
    fn test_caret_blinks_while_typing() {
        let html = render_view("Hel", true);

        assert!(html.contains("Hel"));
        assert!(html.contains("caret blink"));
    }

    #[test]
    fn test_caret_hidden_when_done() {
        let html = render_view("Hello", false);

        assert!(html.contains("Hello"));
        assert!(html.contains("caret idle"));
        assert!(!html.contains("blink"));
    }
}

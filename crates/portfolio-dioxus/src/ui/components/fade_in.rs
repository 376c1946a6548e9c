use crate::ui::PageSettings;
use crate::ui::bridge::ScriptObserver;
use dioxus::prelude::*;
use portfolio_engine::{Animation, RevealConfig, RevealWatcher};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Block that plays `animation` the first time it scrolls into view
#[component]
pub fn FadeIn(
    id: String,
    #[props(default)] animation: Animation,
    #[props(default)] delay_ms: u64,
    #[props(default)] class: String,
    children: Element,
) -> Element {
    let settings = try_use_context::<PageSettings>().unwrap_or_default();
    let mut revealed = use_signal(|| false);

    let watcher = use_hook(|| {
        let config = RevealConfig::new(animation)
            .with_delay(Duration::from_millis(delay_ms))
            .with_threshold(settings.reveal_threshold);
        Rc::new(RefCell::new(RevealWatcher::new(id.clone(), config)))
    });
    let observer: Rc<RefCell<Option<ScriptObserver>>> = use_hook(|| Rc::new(RefCell::new(None)));

    use_future({
        let watcher = watcher.clone();
        let observer = observer.clone();
        move || {
            let watcher = watcher.clone();
            let slot = observer.clone();
            async move {
                let (region, threshold) = {
                    let watcher = watcher.borrow();
                    (watcher.region().clone(), watcher.config().threshold)
                };

                let mut script = match ScriptObserver::open(threshold, &[region]) {
                    Ok(script) => script,
                    Err(e) => {
                        log::warn!("Reveal observer unavailable: {e}");
                        return;
                    }
                };
                // Visible to use_drop before the first await
                *slot.borrow_mut() = Some(script.clone());

                let attached = match script.wait_mounted().await {
                    Ok(_) => watcher.borrow_mut().attach(&mut script),
                    Err(e) => {
                        log::warn!("Reveal observer unavailable: {e}");
                        false
                    }
                };
                if !attached {
                    script.disconnect();
                    slot.borrow_mut().take();
                    return;
                }

                while watcher.borrow().is_watching() {
                    let batch = match script.next_batch().await {
                        Ok(batch) => batch,
                        Err(e) => {
                            log::warn!("Reveal observer stopped: {e}");
                            break;
                        }
                    };
                    for observation in &batch {
                        if watcher.borrow_mut().handle(observation, &mut script) {
                            revealed.set(true);
                        }
                    }
                }

                script.disconnect();
                slot.borrow_mut().take();
            }
        }
    });

    use_drop({
        let watcher = watcher.clone();
        move || {
            if let Some(mut script) = observer.borrow_mut().take() {
                watcher.borrow_mut().cancel(&mut script);
                script.disconnect();
            }
        }
    });

    // Subscribe to the reveal so the style below is re-read
    let _ = revealed();
    let (style, opacity) = {
        let watcher = watcher.borrow();
        (watcher.style().to_css(), watcher.opacity_class())
    };

    rsx! {
        div {
            id: "{id}",
            class: "{class} {opacity}",
            style: "{style}",
            {children}
        }
    }
}

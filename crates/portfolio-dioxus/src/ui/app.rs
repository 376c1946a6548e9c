use super::PageSettings;
use super::bridge::{self, ScriptObserver};
use super::components::{About, Contact, Footer, Header, Hero, Projects};
use dioxus::prelude::*;
use portfolio_config::Config;
use portfolio_engine::{RegionId, SectionTracker, SiteContent, Subscription};
use std::cell::RefCell;
use std::rc::Rc;

const PORTFOLIO_CSS: &str = include_str!("../assets/portfolio.css");

#[component]
pub fn App(config: Config, content: SiteContent) -> Element {
    use_context_provider(|| PageSettings {
        tick: config.tick(),
        reveal_threshold: config.reveal_threshold(),
    });

    let tracker = use_hook(|| {
        let tracker = config.tracker().unwrap_or_else(|e| {
            log::warn!("Invalid section settings, falling back to defaults: {e}");
            SectionTracker::portfolio()
        });
        Rc::new(RefCell::new(tracker))
    });
    let sections = use_hook(|| tracker.borrow().sections().to_vec());

    let active = use_signal(|| tracker.borrow().active());
    let mut menu_open = use_signal(|| false);

    // Mirror the tracker's active section into a signal
    let subscription: Rc<RefCell<Option<Subscription>>> = use_hook(|| {
        let mut active = active;
        let subscription = tracker
            .borrow()
            .active_cell()
            .subscribe(move |section| active.set(section.clone()));
        Rc::new(RefCell::new(Some(subscription)))
    });

    let observer: Rc<RefCell<Option<ScriptObserver>>> = use_hook(|| Rc::new(RefCell::new(None)));

    use_future({
        let tracker = tracker.clone();
        let observer = observer.clone();
        move || {
            let tracker = tracker.clone();
            let slot = observer.clone();
            async move {
                let (threshold, sections) = {
                    let tracker = tracker.borrow();
                    (tracker.threshold(), tracker.sections().to_vec())
                };

                let mut script = match ScriptObserver::open(threshold, &sections) {
                    Ok(script) => script,
                    Err(e) => {
                        log::warn!("Section tracking unavailable: {e}");
                        return;
                    }
                };
                // Visible to use_drop before the first await
                *slot.borrow_mut() = Some(script.clone());

                if let Err(e) = script.wait_mounted().await {
                    log::warn!("Section tracking unavailable: {e}");
                    return;
                }
                let observed = tracker.borrow_mut().start(&mut script).len();
                log::info!("Tracking {observed} of {} sections", sections.len());

                loop {
                    match script.next_batch().await {
                        Ok(batch) => {
                            tracker.borrow_mut().handle_batch(&batch);
                        }
                        Err(e) => {
                            log::warn!("Section observer stopped: {e}");
                            break;
                        }
                    }
                }
            }
        }
    });

    use_drop({
        let tracker = tracker.clone();
        move || {
            if let Some(subscription) = subscription.borrow_mut().take() {
                subscription.unsubscribe();
            }
            if let Some(mut script) = observer.borrow_mut().take() {
                tracker.borrow_mut().teardown(&mut script);
                script.disconnect();
            }
        }
    });

    let on_navigate = use_callback({
        let tracker = tracker.clone();
        move |section: RegionId| {
            match tracker.borrow_mut().navigate_to(&section) {
                Ok(request) => bridge::scroll_into_view(&request),
                Err(e) => log::warn!("Cannot navigate to '{section}': {e}"),
            }
            menu_open.set(false);
        }
    });

    rsx! {
        style { {PORTFOLIO_CSS} }
        div {
            class: "page",
            Header {
                brand: content.profile.role.clone(),
                sections: sections.clone(),
                active: active(),
                menu_open: menu_open(),
                on_navigate,
                on_toggle_menu: move |_| {
                    let open = menu_open();
                    menu_open.set(!open);
                }
            }
            main {
                Hero {
                    profile: content.profile.clone(),
                    lines: content.hero.clone(),
                    on_navigate
                }
                About { profile: content.profile.clone(), on_navigate }
                Projects { projects: content.projects.clone() }
                Contact { profile: content.profile.clone() }
            }
            Footer { owner: content.profile.name.clone() }
        }
    }
}

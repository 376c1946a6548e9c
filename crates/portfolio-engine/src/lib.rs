pub mod contact;
pub mod content;
pub mod observation;
pub mod reveal;
pub mod scheduler;
pub mod sections;
pub mod typewriter;
pub mod viewport;

// Re-export key types for easier usage
pub use contact::{ContactError, ContactForm, FormField, FormStatus, SendTicket};
pub use content::{HeroLine, Profile, Project, SiteContent};
pub use observation::{ObservationError, RegionId, RegionObserver, Threshold, VisibilityObservation};
pub use reveal::{Animation, RevealConfig, RevealState, RevealStyle, RevealWatcher};
pub use scheduler::{TimerHandle, TypewriterDriver, VirtualClock};
pub use sections::{
    ActivationPolicy, ActiveSection, DEFAULT_SECTIONS, ScrollRequest, SectionTracker, Subscription,
};
pub use typewriter::{DEFAULT_TICK, Tick, Typewriter, TypewriterPhase, TypewriterView};
pub use viewport::{PageLayout, SmoothScroll, Span, ViewportObserver, intersection_ratio};

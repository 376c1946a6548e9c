pub mod about;
pub mod contact;
pub mod fade_in;
pub mod footer;
pub mod header;
pub mod hero;
pub mod project_card;
pub mod projects;
pub mod section;
pub mod typewriter;

pub use about::About;
pub use contact::Contact;
pub use fade_in::FadeIn;
pub use footer::Footer;
pub use header::Header;
pub use hero::Hero;
pub use project_card::ProjectCard;
pub use projects::Projects;
pub use section::Section;
pub use typewriter::{Typewriter, TypewriterText};

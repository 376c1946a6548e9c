use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A showcased project. Opaque display payload for the renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default, alias = "techStack")]
    pub tech_stack: Vec<String>,
    #[serde(alias = "githubLink")]
    pub github_link: String,
    #[serde(default, alias = "demoLink")]
    pub demo_link: Option<String>,
    #[serde(default)]
    pub image: String,
}

/// One line of the hero headline, typed out after its own delay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroLine {
    pub text: String,
    #[serde(default)]
    pub delay_ms: u64,
}

impl HeroLine {
    pub fn new(text: impl Into<String>, delay_ms: u64) -> Self {
        Self {
            text: text.into(),
            delay_ms,
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub about: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
}

/// Everything the page displays besides its structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    pub profile: Profile,
    #[serde(default)]
    pub hero: Vec<HeroLine>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            profile: Profile {
                name: "Jayasridhara.B".to_string(),
                role: "Full Stack MERN Developer".to_string(),
                summary: "I design and build high-performance, scalable web applications with \
                          clean UI, strong architecture, and seamless user experiences using \
                          MongoDB, Express, React, and Node.js."
                    .to_string(),
                about: vec![
                    "I am a dedicated Full Stack MERN Developer with 2+ years of experience \
                     specializing in building modern, responsive, and highly efficient web \
                     applications."
                        .to_string(),
                    "I excel in translating complex business requirements into high-quality \
                     code, from state management with Redux Toolkit and Context API to \
                     database modeling with MongoDB and deployment."
                        .to_string(),
                ],
                skills: [
                    "React.js (Hooks, Router)",
                    "Node.js & Express.js",
                    "MongoDB & Mongoose",
                    "Redux Toolkit & Context",
                    "JavaScript (ES6+)",
                    "RESTful API Design",
                    "Tailwind CSS / SCSS",
                    "Git & GitHub/GitLab",
                ]
                .map(String::from)
                .to_vec(),
                email: Some("jayasridharasubramaniyan@gmail.com".to_string()),
                linkedin: Some("https://www.linkedin.com/in/jayasridhara-b-4931a8220/".to_string()),
                github: Some("https://github.com/Jayasridhara".to_string()),
            },
            hero: vec![
                HeroLine::new("Hello, I'm", 0),
                HeroLine::new("Jayasridhara.B", 500),
                HeroLine::new("Full Stack MERN Developer", 1800),
            ],
            projects: vec![Project {
                title: "MERN E-Commerce Store".to_string(),
                description: "A scalable e-commerce site featuring a product catalog, secure \
                              payment integration (Stripe), order management and a seller \
                              dashboard for daily reports."
                    .to_string(),
                tech_stack: [
                    "React Router",
                    "Redux",
                    "Node.js",
                    "Express",
                    "Mongoose",
                    "Stripe API",
                ]
                .map(String::from)
                .to_vec(),
                github_link: "https://github.com/Jayasridhara/ecommerce-frontend".to_string(),
                demo_link: Some("https://shopversein.netlify.app/".to_string()),
                image: "assets/project1.png".to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_content_has_staged_hero() {
        let content = SiteContent::default();
        let delays: Vec<u64> = content.hero.iter().map(|line| line.delay_ms).collect();

        assert_eq!(delays, vec![0, 500, 1800]);
        assert_eq!(content.hero[1].delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_project_without_demo_link() {
        let content = SiteContent::default();
        let mut project = content.projects[0].clone();
        project.demo_link = None;

        assert!(project.demo_link.is_none());
        assert!(!project.tech_stack.is_empty());
    }
}

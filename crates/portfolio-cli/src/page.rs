//! Line-based layout of the portfolio for the terminal.
//!
//! One row of text is one unit of page height, so the engine's
//! [`PageLayout`] spans map straight onto terminal rows.

use portfolio_engine::{
    Animation, PageLayout, RegionId, RevealConfig, SiteContent, Span, Threshold,
};
use std::time::Duration;

/// What a block draws
#[derive(Debug, Clone, PartialEq)]
pub enum BlockBody {
    /// Fixed text rows
    Text(Vec<String>),
    /// One row per hero line, filled in by the typewriters
    Typewriters(usize),
}

impl BlockBody {
    pub fn height(&self) -> usize {
        match self {
            BlockBody::Text(lines) => lines.len(),
            BlockBody::Typewriters(count) => *count,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageBlock {
    pub id: RegionId,
    pub body: BlockBody,
    /// `None` for blocks that are always visible
    pub reveal: Option<RevealConfig>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageSection {
    pub id: RegionId,
    pub title: String,
    pub blocks: Vec<PageBlock>,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub sections: Vec<PageSection>,
    pub layout: PageLayout,
}

impl Page {
    pub fn build(content: &SiteContent, reveal_threshold: Threshold) -> Self {
        let reveal = |animation: Animation, delay_ms: u64| {
            Some(
                RevealConfig::new(animation)
                    .with_delay(Duration::from_millis(delay_ms))
                    .with_threshold(reveal_threshold),
            )
        };
        let profile = &content.profile;

        let home = PageSection {
            id: "home".into(),
            title: profile.name.clone(),
            blocks: vec![
                PageBlock {
                    id: "home-headline".into(),
                    body: BlockBody::Typewriters(content.hero.len()),
                    reveal: None,
                },
                PageBlock {
                    id: "home-summary".into(),
                    body: BlockBody::Text(vec![profile.summary.clone()]),
                    reveal: None,
                },
            ],
        };

        let about = PageSection {
            id: "about".into(),
            title: "About Me".to_string(),
            blocks: vec![
                PageBlock {
                    id: "about-heading".into(),
                    body: BlockBody::Text(vec![
                        "Get to know my professional journey and passion.".to_string(),
                    ]),
                    reveal: reveal(Animation::FadeInUp, 0),
                },
                PageBlock {
                    id: "about-story".into(),
                    body: BlockBody::Text(profile.about.clone()),
                    reveal: reveal(Animation::FadeInLeft, 200),
                },
                PageBlock {
                    id: "about-skills".into(),
                    body: BlockBody::Text(
                        std::iter::once("My Tech Stack".to_string())
                            .chain(profile.skills.iter().map(|skill| format!("  • {skill}")))
                            .collect(),
                    ),
                    reveal: reveal(Animation::FadeInRight, 400),
                },
            ],
        };

        let projects = PageSection {
            id: "projects".into(),
            title: "My Work".to_string(),
            blocks: content
                .projects
                .iter()
                .enumerate()
                .map(|(index, project)| {
                    let mut lines = vec![
                        project.title.clone(),
                        project.description.clone(),
                        format!("[{}]", project.tech_stack.join("] [")),
                        format!("GitHub: {}", project.github_link),
                    ];
                    if let Some(demo) = &project.demo_link {
                        lines.push(format!("Live Demo: {demo}"));
                    }
                    PageBlock {
                        id: RegionId::new(format!("project-{index}")),
                        body: BlockBody::Text(lines),
                        reveal: None,
                    }
                })
                .collect(),
        };

        let contact_lines = [
            profile.email.as_ref().map(|email| format!("Email: {email}")),
            profile.linkedin.as_ref().map(|url| format!("LinkedIn: {url}")),
            profile.github.as_ref().map(|url| format!("GitHub: {url}")),
        ]
        .into_iter()
        .flatten()
        .collect();

        let contact = PageSection {
            id: "contact".into(),
            title: "Contact Me".to_string(),
            blocks: vec![
                PageBlock {
                    id: "contact-heading".into(),
                    body: BlockBody::Text(vec![
                        "I am currently open to new opportunities. Let's build something great."
                            .to_string(),
                    ]),
                    reveal: reveal(Animation::FadeInUp, 0),
                },
                PageBlock {
                    id: "contact-info".into(),
                    body: BlockBody::Text(contact_lines),
                    reveal: reveal(Animation::FadeInLeft, 200),
                },
            ],
        };

        Self::from_sections(vec![home, about, projects, contact])
    }

    /// Stack sections top to bottom: a title row, then each block followed by a blank row
    pub fn from_sections(sections: Vec<PageSection>) -> Self {
        let mut layout = PageLayout::new();
        let mut row = 0.0;

        for section in &sections {
            let start = row;
            row += 2.0;
            for block in &section.blocks {
                let height = block.body.height() as f64;
                layout.place(block.id.clone(), Span::new(row, height));
                row += height + 1.0;
            }
            layout.place(section.id.clone(), Span::new(start, row - start));
        }

        Self { sections, layout }
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &RegionId> {
        self.sections.iter().map(|section| &section.id)
    }

    pub fn blocks(&self) -> impl Iterator<Item = &PageBlock> {
        self.sections.iter().flat_map(|section| section.blocks.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sections_follow_site_order() {
        let page = Page::build(&SiteContent::default(), Threshold::REVEAL);
        let ids: Vec<&str> = page.section_ids().map(RegionId::as_str).collect();

        assert_eq!(ids, vec!["home", "about", "projects", "contact"]);
    }

    #[test]
    fn test_blocks_sit_inside_their_section() {
        let page = Page::build(&SiteContent::default(), Threshold::REVEAL);

        for section in &page.sections {
            let outer = page.layout.span_of(&section.id).unwrap();
            for block in &section.blocks {
                let inner = page.layout.span_of(&block.id).unwrap();
                assert!(inner.start >= outer.start && inner.end() <= outer.end());
            }
        }
    }

    #[test]
    fn test_sections_are_contiguous() {
        let page = Page::build(&SiteContent::default(), Threshold::REVEAL);
        let spans: Vec<Span> = page
            .section_ids()
            .map(|id| page.layout.span_of(id).unwrap())
            .collect();

        for pair in spans.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start);
        }
    }

    #[test]
    fn test_only_reveal_blocks_carry_config() {
        let page = Page::build(&SiteContent::default(), Threshold::REVEAL);
        let revealing: Vec<&str> = page
            .blocks()
            .filter(|block| block.reveal.is_some())
            .map(|block| block.id.as_str())
            .collect();

        assert_eq!(
            revealing,
            vec!["about-heading", "about-story", "about-skills", "contact-heading", "contact-info"]
        );
    }
}

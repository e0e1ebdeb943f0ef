//! Resume Composer — maps a `StructuredResume` onto the fixed resume template.
//!
//! Output is an ordered list of `Block`s: title, contact line, then the
//! Summary, Experience, Education, Skills and Achievements sections in that
//! order. A section and its heading are left out entirely when its field is
//! empty. Composition is pure; the same resume always yields the same blocks.

use crate::layout::font_metrics::Font;
use crate::models::resume::StructuredResume;

pub const TITLE_PLACEHOLDER: &str = "Name";
pub const BULLET_PREFIX: &str = "\u{2022} ";

pub const HEADING_SUMMARY: &str = "Summary";
pub const HEADING_EXPERIENCE: &str = "Experience";
pub const HEADING_EDUCATION: &str = "Education";
pub const HEADING_SKILLS: &str = "Skills";
pub const HEADING_ACHIEVEMENTS: &str = "Achievements";

const TITLE_SIZE_PT: f32 = 20.0;
const HEADING_SIZE_PT: f32 = 12.0;
const BODY_SIZE_PT: f32 = 10.0;
const BULLET_INDENT_PT: f32 = 10.0;

/// Font and size of a line of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size_pt: f32,
}

impl TextStyle {
    pub const TITLE: TextStyle = TextStyle {
        font: Font::HelveticaBold,
        size_pt: TITLE_SIZE_PT,
    };
    pub const HEADING: TextStyle = TextStyle {
        font: Font::HelveticaBold,
        size_pt: HEADING_SIZE_PT,
    };
    pub const ENTRY_HEADER: TextStyle = TextStyle {
        font: Font::HelveticaBold,
        size_pt: BODY_SIZE_PT,
    };
    pub const BODY: TextStyle = TextStyle {
        font: Font::Helvetica,
        size_pt: BODY_SIZE_PT,
    };
}

/// One unit of composed content, before line wrapping and pagination.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A paragraph; wrapped by the paginator. Empty text still takes one line.
    Text {
        text: String,
        style: TextStyle,
        indent_pt: f32,
    },
    /// Vertical gap of one line at the size of the preceding text.
    MoveDown,
}

impl Block {
    fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Block::Text {
            text: text.into(),
            style,
            indent_pt: 0.0,
        }
    }

    fn bullet(item: &str) -> Self {
        Block::Text {
            text: format!("{BULLET_PREFIX}{item}"),
            style: TextStyle::BODY,
            indent_pt: BULLET_INDENT_PT,
        }
    }

    /// The text of a `Text` block.
    #[cfg(test)]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Block::Text { text, .. } => Some(text),
            Block::MoveDown => None,
        }
    }
}

/// Lays the resume out onto the template.
pub fn compose(resume: &StructuredResume) -> Vec<Block> {
    let mut blocks = Vec::new();

    let title = if resume.name.trim().is_empty() {
        TITLE_PLACEHOLDER
    } else {
        resume.name.trim()
    };
    blocks.push(Block::text(title, TextStyle::TITLE));
    blocks.push(Block::MoveDown);
    blocks.push(Block::text(resume.contact.trim(), TextStyle::BODY));
    blocks.push(Block::MoveDown);

    if !resume.summary.is_empty() {
        blocks.push(Block::text(HEADING_SUMMARY, TextStyle::HEADING));
        blocks.push(Block::text(resume.summary.trim(), TextStyle::BODY));
        blocks.push(Block::MoveDown);
    }

    if !resume.experience.is_empty() {
        blocks.push(Block::text(HEADING_EXPERIENCE, TextStyle::HEADING));
        for entry in &resume.experience {
            blocks.push(Block::text(
                format!("{} - {}", entry.title, entry.company),
                TextStyle::ENTRY_HEADER,
            ));
            blocks.extend(entry.bullets.iter().map(|b| Block::bullet(b)));
            blocks.push(Block::MoveDown);
        }
    }

    if !resume.education.is_empty() {
        blocks.push(Block::text(HEADING_EDUCATION, TextStyle::HEADING));
        for entry in &resume.education {
            blocks.push(Block::text(
                format!("{}, {} ({})", entry.degree, entry.institution, entry.dates),
                TextStyle::BODY,
            ));
        }
        blocks.push(Block::MoveDown);
    }

    if !resume.skills.is_empty() {
        blocks.push(Block::text(HEADING_SKILLS, TextStyle::HEADING));
        blocks.push(Block::text(resume.skills.join(", "), TextStyle::BODY));
        blocks.push(Block::MoveDown);
    }

    if !resume.achievements.is_empty() {
        blocks.push(Block::text(HEADING_ACHIEVEMENTS, TextStyle::HEADING));
        blocks.extend(resume.achievements.iter().map(|a| Block::bullet(a)));
        blocks.push(Block::MoveDown);
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EducationEntry, ExperienceEntry};

    fn texts(blocks: &[Block]) -> Vec<&str> {
        blocks.iter().filter_map(Block::as_text).collect()
    }

    fn headings(blocks: &[Block]) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Text { text, style, .. } if *style == TextStyle::HEADING => {
                    Some(text.as_str())
                }
                _ => None,
            })
            .collect()
    }

    fn full_resume() -> StructuredResume {
        StructuredResume {
            name: "Jane Doe".to_string(),
            contact: "jane@example.com | 555-0100".to_string(),
            summary: "Backend engineer.".to_string(),
            education: vec![EducationEntry {
                degree: "BSc Computer Science".to_string(),
                institution: "State University".to_string(),
                dates: "2019 - 2023".to_string(),
            }],
            experience: vec![ExperienceEntry {
                title: "Intern".to_string(),
                company: "Acme".to_string(),
                dates: "2022".to_string(),
                bullets: vec![
                    "Built a billing service".to_string(),
                    "Cut build time by 30%".to_string(),
                ],
            }],
            skills: vec!["Python".to_string(), "Go".to_string()],
            achievements: vec!["Hackathon winner".to_string()],
        }
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let blocks = compose(&full_resume());
        assert_eq!(
            headings(&blocks),
            vec![
                HEADING_SUMMARY,
                HEADING_EXPERIENCE,
                HEADING_EDUCATION,
                HEADING_SKILLS,
                HEADING_ACHIEVEMENTS
            ]
        );
    }

    #[test]
    fn test_title_and_contact_come_first() {
        let blocks = compose(&full_resume());
        assert_eq!(
            blocks[0],
            Block::Text {
                text: "Jane Doe".to_string(),
                style: TextStyle::TITLE,
                indent_pt: 0.0
            }
        );
        assert_eq!(texts(&blocks)[1], "jane@example.com | 555-0100");
    }

    #[test]
    fn test_blank_name_uses_placeholder() {
        let resume = StructuredResume {
            name: "  ".to_string(),
            ..StructuredResume::default()
        };
        assert_eq!(texts(&compose(&resume))[0], TITLE_PLACEHOLDER);
    }

    #[test]
    fn test_empty_resume_has_no_sections() {
        let blocks = compose(&StructuredResume::default());
        assert!(headings(&blocks).is_empty());
        assert_eq!(texts(&blocks), vec![TITLE_PLACEHOLDER, ""]);
    }

    #[test]
    fn test_empty_skills_omits_heading_but_keeps_experience() {
        let resume = StructuredResume {
            skills: vec![],
            ..full_resume()
        };
        let blocks = compose(&resume);
        let hs = headings(&blocks);
        assert!(hs.contains(&HEADING_EXPERIENCE));
        assert!(!hs.contains(&HEADING_SKILLS));
    }

    #[test]
    fn test_empty_summary_is_omitted() {
        let resume = StructuredResume {
            summary: String::new(),
            ..full_resume()
        };
        assert!(!headings(&compose(&resume)).contains(&HEADING_SUMMARY));
    }

    #[test]
    fn test_whitespace_summary_keeps_section() {
        let resume = StructuredResume {
            summary: " \n ".to_string(),
            ..full_resume()
        };
        let blocks = compose(&resume);
        assert!(headings(&blocks).contains(&HEADING_SUMMARY));

        let texts = texts(&blocks);
        let at = texts.iter().position(|t| *t == HEADING_SUMMARY).unwrap();
        assert_eq!(texts[at + 1], "");
    }

    #[test]
    fn test_experience_entry_header_then_bullets_in_order() {
        let blocks = compose(&full_resume());
        let all = texts(&blocks);
        let header = all.iter().position(|t| *t == "Intern - Acme").unwrap();
        assert_eq!(all[header + 1], "• Built a billing service");
        assert_eq!(all[header + 2], "• Cut build time by 30%");

        match blocks.iter().find(|b| b.as_text() == Some("• Built a billing service")) {
            Some(Block::Text {
                indent_pt, style, ..
            }) => {
                assert_eq!(*indent_pt, BULLET_INDENT_PT);
                assert_eq!(*style, TextStyle::BODY);
            }
            other => panic!("bullet block missing: {other:?}"),
        }
    }

    #[test]
    fn test_experience_without_bullets_renders_header_only() {
        let mut resume = full_resume();
        resume.experience[0].bullets.clear();
        let blocks = compose(&resume);
        let all = texts(&blocks);
        let header = all.iter().position(|t| *t == "Intern - Acme").unwrap();
        assert_eq!(all[header + 1], HEADING_EDUCATION);
    }

    #[test]
    fn test_education_skills_and_achievements_lines() {
        let all_blocks = compose(&full_resume());
        let all = texts(&all_blocks);
        assert!(all.contains(&"BSc Computer Science, State University (2019 - 2023)"));
        assert!(all.contains(&"Python, Go"));
        assert!(all.contains(&"• Hackathon winner"));
    }
}

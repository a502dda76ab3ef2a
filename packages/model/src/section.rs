//! # Content Sections
//!
//! Blocks placed on a DYNAMIC column. The payload shape is tied to the
//! section type, so the type is the enum tag of [`SectionContent`] and a
//! section serializes as `{ "id", "type", "content" }`.

use serde::{Deserialize, Serialize};

/// Kind of content block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionType {
    Heading,
    SubHeading,
    Paragraph,
    Image,
    Video,
    Bullets,
    Qanda,
    Link,
    Table,
    Floating,
}

impl SectionType {
    pub const ALL: [SectionType; 10] = [
        SectionType::Heading,
        SectionType::SubHeading,
        SectionType::Paragraph,
        SectionType::Image,
        SectionType::Video,
        SectionType::Bullets,
        SectionType::Qanda,
        SectionType::Link,
        SectionType::Table,
        SectionType::Floating,
    ];

    /// Floating sections are positioned by coordinates and never take part
    /// in linear reordering.
    pub fn is_floating(self) -> bool {
        matches!(self, SectionType::Floating)
    }
}

/// Type-specific payload of a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionContent {
    Heading {
        text: String,
    },
    SubHeading {
        text: String,
    },
    Paragraph {
        text: String,
    },
    Image {
        src: String,
        /// Percentage of the column width
        width: f64,
    },
    Video {
        url: String,
        #[serde(rename = "dataUrl", default, skip_serializing_if = "Option::is_none")]
        data_url: Option<String>,
        width: f64,
    },
    Bullets {
        ordered: bool,
        items: Vec<String>,
    },
    Qanda {
        question: String,
        answer: String,
        #[serde(rename = "isCollapsed", default)]
        is_collapsed: bool,
    },
    Link {
        text: String,
        url: String,
    },
    Table {
        cells: Vec<Vec<String>>,
    },
    Floating {
        text: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

impl SectionContent {
    /// Placeholder payload for a freshly added section
    pub fn default_for(section_type: SectionType) -> Self {
        match section_type {
            SectionType::Heading => SectionContent::Heading {
                text: "New Heading".to_string(),
            },
            SectionType::SubHeading => SectionContent::SubHeading {
                text: "New Sub-heading".to_string(),
            },
            SectionType::Paragraph => SectionContent::Paragraph {
                text: "New paragraph.".to_string(),
            },
            SectionType::Image => SectionContent::Image {
                src: String::new(),
                width: 100.0,
            },
            SectionType::Video => SectionContent::Video {
                url: String::new(),
                data_url: None,
                width: 100.0,
            },
            SectionType::Bullets => SectionContent::Bullets {
                ordered: false,
                items: vec!["First item".to_string()],
            },
            SectionType::Qanda => SectionContent::Qanda {
                question: "Question?".to_string(),
                answer: "Answer.".to_string(),
                is_collapsed: false,
            },
            SectionType::Link => SectionContent::Link {
                text: "Link Text".to_string(),
                url: "https://".to_string(),
            },
            SectionType::Table => SectionContent::Table {
                cells: vec![
                    vec![String::new(), String::new()],
                    vec![String::new(), String::new()],
                ],
            },
            SectionType::Floating => SectionContent::Floating {
                text: "Floating note".to_string(),
                x: 20.0,
                y: 20.0,
                width: 200.0,
                height: 100.0,
            },
        }
    }

    pub fn section_type(&self) -> SectionType {
        match self {
            SectionContent::Heading { .. } => SectionType::Heading,
            SectionContent::SubHeading { .. } => SectionType::SubHeading,
            SectionContent::Paragraph { .. } => SectionType::Paragraph,
            SectionContent::Image { .. } => SectionType::Image,
            SectionContent::Video { .. } => SectionType::Video,
            SectionContent::Bullets { .. } => SectionType::Bullets,
            SectionContent::Qanda { .. } => SectionType::Qanda,
            SectionContent::Link { .. } => SectionType::Link,
            SectionContent::Table { .. } => SectionType::Table,
            SectionContent::Floating { .. } => SectionType::Floating,
        }
    }
}

/// One content block inside a DYNAMIC column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,

    #[serde(flatten)]
    pub content: SectionContent,
}

impl Section {
    pub fn new(id: impl Into<String>, content: SectionContent) -> Self {
        Self {
            id: id.into(),
            content,
        }
    }

    pub fn section_type(&self) -> SectionType {
        self.content.section_type()
    }

    pub fn is_floating(&self) -> bool {
        self.section_type().is_floating()
    }
}

//! Authored content for the greeting.
//!
//! Everything the recipient reads lives in `content/birthday.json`, embedded at
//! compile time and replaceable at runtime through `page_load_content`.
//! Memories and photos are plain lists; rendering code never hardcodes copy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::elements;

const BUNDLED_JSON: &str = include_str!("../content/birthday.json");

/// Errors raised while loading authored content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("question has no options")]
    NoOptions,

    #[error("question must have exactly one correct option, found {0}")]
    CorrectCount(usize),

    #[error("{section} has {count} entries, at most {max} fit on the page")]
    TooManyEntries {
        section: &'static str,
        count: usize,
        max: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOption {
    pub label: String,
    #[serde(default)]
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub title: String,
    pub subtitle: String,
    pub prompt: String,
    pub options: Vec<QuizOption>,
    pub hint: String,
}

impl Question {
    /// Index of the correct option. Validated content always has one.
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.correct)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplashCopy {
    pub first_line: String,
    pub second_line: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroCopy {
    pub title: String,
    pub scroll_hint: String,
}

/// Timeline icon. The host maps each to its glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Heart,
    Star,
    Music,
    Camera,
    Gift,
    Smile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub icon: Icon,
    pub title: String,
    pub body: String,
    pub era: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoEntry {
    pub src: String,
    pub alt: String,
    pub caption: String,
    /// Display tilt in degrees.
    #[serde(default)]
    pub rotation: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section<T> {
    pub heading: String,
    pub intro: String,
    pub entries: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Closing {
    pub title: String,
    pub message: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub question: Question,
    pub splash: SplashCopy,
    pub hero: HeroCopy,
    pub photos: Section<PhotoEntry>,
    pub memories: Section<MemoryEntry>,
    pub closing: Closing,
    pub footer: String,
}

impl Content {
    /// Parse and validate authored content.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let content: Content = serde_json::from_str(json)?;
        content.validate()?;
        Ok(content)
    }

    /// The content shipped with the crate.
    pub fn bundled() -> Result<Self, ContentError> {
        Self::from_json(BUNDLED_JSON)
    }

    /// Minimal content used when the bundled file fails to load.
    pub fn fallback() -> Self {
        fn section<T>(heading: &str) -> Section<T> {
            Section {
                heading: heading.to_string(),
                intro: String::new(),
                entries: Vec::new(),
            }
        }
        Self {
            question: Question {
                title: "A Special Question".into(),
                subtitle: String::new(),
                prompt: "Ready for your surprise?".into(),
                options: vec![QuizOption { label: "Yes".into(), correct: true }],
                hint: String::new(),
            },
            splash: SplashCopy {
                first_line: "Happy".into(),
                second_line: "Birthday!".into(),
                subtitle: String::new(),
            },
            hero: HeroCopy {
                title: "Happy Birthday!".into(),
                scroll_hint: String::new(),
            },
            photos: section("Photos"),
            memories: section("Memories"),
            closing: Closing {
                title: "Happy Birthday!".into(),
                message: String::new(),
                signature: String::new(),
            },
            footer: String::new(),
        }
    }

    fn validate(&self) -> Result<(), ContentError> {
        let options = &self.question.options;
        if options.is_empty() {
            return Err(ContentError::NoOptions);
        }
        let correct = options.iter().filter(|o| o.correct).count();
        if correct != 1 {
            return Err(ContentError::CorrectCount(correct));
        }
        for (section, count, max) in [
            ("photos", self.photos.entries.len(), elements::MAX_PHOTOS),
            ("memories", self.memories.entries.len(), elements::MAX_MEMORIES),
        ] {
            if count > max {
                return Err(ContentError::TooManyEntries { section, count, max });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_content_loads() {
        let content = Content::bundled().unwrap();
        let labels: Vec<_> = content.question.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["Poplu", "Khoman", "Bhalu", "Kiku"]);
        assert_eq!(content.question.correct_index(), Some(3));
        assert_eq!(content.question.hint, "Hint: Think with your heart!");
        assert_eq!(content.photos.entries.len(), 6);
        assert_eq!(content.memories.entries.len(), 6);
        assert_eq!(content.memories.entries[0].icon, Icon::Heart);
        assert_eq!(content.memories.entries[5].era, "The Future");
        assert_eq!(content.photos.entries[0].rotation, -3.0);
        assert_eq!(content.footer, "Made with love, just for you");
    }

    #[test]
    fn fallback_is_valid() {
        let content = Content::fallback();
        assert!(content.validate().is_ok());
        assert_eq!(content.question.correct_index(), Some(0));
    }

    fn with_options(options: &str) -> String {
        let mut value: serde_json::Value = serde_json::from_str(BUNDLED_JSON).unwrap();
        value["question"]["options"] = serde_json::from_str(options).unwrap();
        value.to_string()
    }

    #[test]
    fn rejects_missing_correct_option() {
        let json = with_options(r#"[{"label":"A"},{"label":"B"}]"#);
        assert!(matches!(Content::from_json(&json), Err(ContentError::CorrectCount(0))));
    }

    #[test]
    fn rejects_two_correct_options() {
        let json = with_options(r#"[{"label":"A","correct":true},{"label":"B","correct":true}]"#);
        assert!(matches!(Content::from_json(&json), Err(ContentError::CorrectCount(2))));
    }

    #[test]
    fn rejects_empty_question() {
        let json = with_options("[]");
        assert!(matches!(Content::from_json(&json), Err(ContentError::NoOptions)));
    }

    #[test]
    fn rejects_lists_longer_than_the_page_holds() {
        let mut value: serde_json::Value = serde_json::from_str(BUNDLED_JSON).unwrap();
        let memory = value["memories"]["entries"][0].clone();
        value["memories"]["entries"] = serde_json::Value::Array(vec![memory; elements::MAX_MEMORIES + 1]);
        let err = Content::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(
            err,
            ContentError::TooManyEntries { section: "memories", count, .. } if count == elements::MAX_MEMORIES + 1
        ));

        let mut value: serde_json::Value = serde_json::from_str(BUNDLED_JSON).unwrap();
        let photo = value["photos"]["entries"][0].clone();
        value["photos"]["entries"] = serde_json::Value::Array(vec![photo.clone(); elements::MAX_PHOTOS + 1]);
        assert!(matches!(
            Content::from_json(&value.to_string()),
            Err(ContentError::TooManyEntries { section: "photos", .. })
        ));

        value["photos"]["entries"] = serde_json::Value::Array(vec![photo; elements::MAX_PHOTOS]);
        assert!(Content::from_json(&value.to_string()).is_ok());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Content::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ContentError::Parse(_)));
        assert!(err.to_string().starts_with("content is not valid JSON"));
    }
}

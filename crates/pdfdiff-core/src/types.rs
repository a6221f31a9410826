//! Data model shared by every stage of the comparison pipeline

use image::RgbaImage;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A word extracted from a page with its bounding box in page units (points)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub x0: f32,
    pub top: f32,
    pub x1: f32,
    pub bottom: f32,
}

impl Word {
    pub fn new(text: impl Into<String>, x0: f32, top: f32, x1: f32, bottom: f32) -> Self {
        Self {
            text: text.into(),
            x0,
            top,
            x1,
            bottom,
        }
    }
}

/// One page of a document: its words and its rendered raster.
///
/// A page with no words and no image stands for a page that does not exist
/// in this version of the document.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub words: Vec<Word>,
    pub image: Option<RgbaImage>,
}

impl Page {
    pub fn new(words: Vec<Word>, image: Option<RgbaImage>) -> Self {
        Self { words, image }
    }

    /// Placeholder for a page missing from the shorter document
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.image.is_none()
    }
}

/// An ingested document version
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Original file name, carried through to the result
    pub name: Option<String>,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(name: Option<String>, pages: Vec<Page>) -> Self {
        Self { name, pages }
    }
}

/// Edit operation of a diff segment.
///
/// Serialized as the integer codes `-1` (delete), `0` (equal), `1` (insert).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Delete,
    Equal,
    Insert,
}

impl Operation {
    pub fn code(self) -> i8 {
        match self {
            Operation::Delete => -1,
            Operation::Equal => 0,
            Operation::Insert => 1,
        }
    }

    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            -1 => Some(Operation::Delete),
            0 => Some(Operation::Equal),
            1 => Some(Operation::Insert),
            _ => None,
        }
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.code())
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i8::deserialize(deserializer)?;
        Operation::from_code(code).ok_or_else(|| {
            serde::de::Error::custom(format!("Unknown diff operation code: {}", code))
        })
    }
}

/// One run of an edit script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub operation: Operation,
    pub text: String,
}

impl DiffSegment {
    pub fn new(operation: Operation, text: impl Into<String>) -> Self {
        Self {
            operation,
            text: text.into(),
        }
    }

    pub fn equal(text: impl Into<String>) -> Self {
        Self::new(Operation::Equal, text)
    }

    pub fn delete(text: impl Into<String>) -> Self {
        Self::new(Operation::Delete, text)
    }

    pub fn insert(text: impl Into<String>) -> Self {
        Self::new(Operation::Insert, text)
    }

    /// Length in characters, the unit every cursor in the pipeline counts in
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Which of the two compared documents a value refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Kind of change a highlight marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightKind {
    Delete,
    Insert,
}

impl HighlightKind {
    /// Deletions are drawn on side A, insertions on side B
    pub fn side(self) -> Side {
        match self {
            HighlightKind::Delete => Side::A,
            HighlightKind::Insert => Side::B,
        }
    }
}

/// A word flagged as changed on one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Highlight {
    pub word_index: usize,
    pub side: Side,
    pub kind: HighlightKind,
}

/// Visual result for one aligned page pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageComparison {
    /// Page number (1-indexed)
    pub page: usize,
    /// Base64-encoded PNG for side A, null when the page does not exist there
    pub image_a: Option<String>,
    /// Base64-encoded PNG for side B
    pub image_b: Option<String>,
    /// Page-local failures that degraded this entry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Full outcome of comparing two documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_a: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_b: Option<String>,
    pub raw_diff: Vec<DiffSegment>,
    pub html_diff: String,
    pub pages: Vec<PageComparison>,
}

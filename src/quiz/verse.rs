use std::io::Read;

use log::{debug, warn};

use crate::error::{LessonError, Result};

/// One token of a verse, as resolved by whatever fetched it.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub text: String,
    #[serde(default)]
    pub transliteration_text: String,
    #[serde(default)]
    pub translation_text: String,
    #[serde(default)]
    pub audio_ref: Option<String>,
    /// 1-based index within the verse
    pub position: u32,
}

impl Word {
    pub fn new(position: u32, text: &str, transliteration_text: &str) -> Self {
        Self {
            text: text.to_string(),
            transliteration_text: transliteration_text.to_string(),
            position,
            ..Default::default()
        }
    }

    pub fn with_translation(mut self, translation_text: &str) -> Self {
        self.translation_text = translation_text.to_string();
        self
    }

    pub fn with_audio(mut self, audio_ref: &str) -> Self {
        self.audio_ref = Some(audio_ref.to_string());
        self
    }

    fn is_usable(&self) -> bool {
        !self.text.trim().is_empty() && !self.transliteration_text.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
    pub surah_index: u32,
    pub verse_index: u32,
    #[serde(default)]
    pub full_arabic_text: Option<String>,
    /// A second rendering of the verse (different script edition).
    #[serde(default)]
    pub alternate_arabic_text: Option<String>,
}

impl Verse {
    pub fn new(surah_index: u32, verse_index: u32) -> Self {
        Self {
            surah_index,
            verse_index,
            ..Default::default()
        }
    }

    pub fn with_arabic_text(mut self, text: &str) -> Self {
        self.full_arabic_text = Some(text.to_string());
        self
    }

    pub fn with_alternate_arabic_text(mut self, text: &str) -> Self {
        self.alternate_arabic_text = Some(text.to_string());
        self
    }

    pub fn verse_key(&self) -> String {
        format!("{}:{}", self.surah_index, self.verse_index)
    }

    /// The authoritative text, then the alternate edition, then nothing.
    pub fn arabic_text(&self) -> &str {
        [&self.full_arabic_text, &self.alternate_arabic_text]
            .into_iter()
            .flatten()
            .map(|t| t.as_str())
            .find(|t| !t.trim().is_empty())
            .unwrap_or("")
    }
}

/// A verse together with its words, the way the fetch layer hands it over.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct VerseData {
    #[serde(default)]
    pub verse: Option<Verse>,
    #[serde(default)]
    pub words: Vec<Word>,
}

impl VerseData {
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Keeps only the words a lesson can be built from, in position order.
///
/// A word is usable when both its Arabic text and its transliteration
/// are non-blank. Fails when there is no verse, no words, or nothing
/// usable left after filtering.
pub fn validate(verse: Option<&Verse>, words: &[Word]) -> Result<Vec<Word>> {
    validate_input(verse, words).map(|(_, usable)| usable)
}

/// Same checks as [`validate`], also handing back the verse that passed them.
pub fn validate_input<'v>(
    verse: Option<&'v Verse>,
    words: &[Word],
) -> Result<(&'v Verse, Vec<Word>)> {
    let verse = verse.ok_or_else(|| {
        warn!("Rejecting lesson input: verse is missing");
        LessonError::invalid_input("verse is missing")
    })?;

    if words.is_empty() {
        warn!("Rejecting lesson input for {}: word list is empty", verse.verse_key());
        return Err(LessonError::invalid_input("word list is empty"));
    }

    let mut usable = words
        .iter()
        .filter(|w| w.is_usable())
        .cloned()
        .collect::<Vec<_>>();

    if usable.is_empty() {
        warn!(
            "Rejecting lesson input for {}: none of {} words has text and transliteration",
            verse.verse_key(),
            words.len()
        );
        return Err(LessonError::invalid_input("no usable word data"));
    }

    if usable.len() < words.len() {
        warn!(
            "Dropped {} of {} words without text or transliteration in {}",
            words.len() - usable.len(),
            words.len(),
            verse.verse_key()
        );
    }

    // Stable, so equal positions keep their incoming order
    usable.sort_by_key(|w| w.position);
    debug!("{} usable words in {}", usable.len(), verse.verse_key());

    Ok((verse, usable))
}

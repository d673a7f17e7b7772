//! Facet request/result types and the upstream wire schema.
//!
//! The upstream payload shapes are a fixed external contract: one JSON
//! envelope per `(verse, edition)` endpoint, with camelCase field names.
//! They are parsed here, never designed here.

use serde::{Deserialize, Serialize};

use versefeed_shared::VerseId;

// ---------------------------------------------------------------------------
// FacetKind
// ---------------------------------------------------------------------------

/// One distinct kind of data associated with a verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    /// Primary scripture text; its structural metadata seeds the composite.
    Text,
    /// Recitation audio reference.
    Audio,
    /// Translated text.
    Translation,
    /// Transliterated text.
    Transliteration,
}

impl FacetKind {
    /// Stable lowercase name, used in logs and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Audio => "audio",
            Self::Translation => "translation",
            Self::Transliteration => "transliteration",
        }
    }
}

impl std::fmt::Display for FacetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FacetRequest / FacetFailure
// ---------------------------------------------------------------------------

/// One fetch to perform: a verse, a facet kind, and the upstream edition
/// selector that addresses the endpoint. Constructed once per fetch.
#[derive(Debug, Clone)]
pub struct FacetRequest {
    pub verse: VerseId,
    pub facet: FacetKind,
    pub edition: String,
}

impl FacetRequest {
    pub fn new(verse: VerseId, facet: FacetKind, edition: impl Into<String>) -> Self {
        Self {
            verse,
            facet,
            edition: edition.into(),
        }
    }
}

/// A failed facet fetch, tagged with what failed and why.
///
/// This is a value, not an error type: the fetcher never raises past its
/// boundary. The aggregator consumes failures, logs them, and discards the
/// affected composite.
#[derive(Debug, Clone, thiserror::Error)]
#[error("facet {facet} for verse {verse} failed: {reason}")]
pub struct FacetFailure {
    pub verse: VerseId,
    pub facet: FacetKind,
    pub reason: String,
}

impl FacetFailure {
    pub fn new(request: &FacetRequest, reason: impl Into<String>) -> Self {
        Self {
            verse: request.verse,
            facet: request.facet,
            reason: reason.into(),
        }
    }
}

/// Outcome of one facet fetch: a parsed payload or a tagged failure.
pub type FacetResult = std::result::Result<VersePayload, FacetFailure>;

// ---------------------------------------------------------------------------
// Upstream wire schema
// ---------------------------------------------------------------------------

/// Response envelope wrapping every upstream payload.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope {
    pub code: u16,
    pub status: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Parsed upstream payload for one `(verse, edition)` fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersePayload {
    /// Global verse number within the corpus.
    pub number: u32,
    /// Verse text in this edition (translated/transliterated for those
    /// editions; empty for pure audio editions on some providers).
    #[serde(default)]
    pub text: String,
    /// Audio URL, present only for recitation editions.
    #[serde(default)]
    pub audio: Option<String>,
    /// The edition that produced this payload.
    pub edition: EditionInfo,
    /// Chapter-level structural metadata.
    pub surah: SurahInfo,
    /// Verse position within its chapter.
    #[serde(rename = "numberInSurah")]
    pub number_in_surah: u32,
    /// Juz (reading-section) number.
    pub juz: u32,
    /// Page number in the reference print edition.
    pub page: u32,
}

/// Edition descriptor echoed back by the upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditionInfo {
    pub identifier: String,
    pub language: String,
    #[serde(rename = "englishName")]
    pub english_name: String,
    pub format: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Chapter (surah) structural metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurahInfo {
    pub number: u32,
    pub name: String,
    #[serde(rename = "englishName")]
    pub english_name: String,
    #[serde(rename = "englishNameTranslation")]
    pub english_name_translation: String,
    #[serde(rename = "numberOfAyahs")]
    pub number_of_ayahs: u32,
    #[serde(rename = "revelationType")]
    pub revelation_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_kind_display() {
        assert_eq!(FacetKind::Text.to_string(), "text");
        assert_eq!(FacetKind::Transliteration.to_string(), "transliteration");
    }

    #[test]
    fn payload_deserializes_camel_case() {
        let json = r#"{
            "number": 262,
            "text": "Allah - there is no deity except Him",
            "edition": {
                "identifier": "en.asad",
                "language": "en",
                "englishName": "Muhammad Asad",
                "format": "text",
                "type": "translation"
            },
            "surah": {
                "number": 2,
                "name": "سورة البقرة",
                "englishName": "Al-Baqara",
                "englishNameTranslation": "The Cow",
                "numberOfAyahs": 286,
                "revelationType": "Medinan"
            },
            "numberInSurah": 255,
            "juz": 3,
            "page": 42
        }"#;

        let payload: VersePayload = serde_json::from_str(json).expect("deserialize");
        assert_eq!(payload.number, 262);
        assert_eq!(payload.number_in_surah, 255);
        assert_eq!(payload.surah.english_name, "Al-Baqara");
        assert_eq!(payload.surah.number_of_ayahs, 286);
        assert_eq!(payload.edition.kind, "translation");
        assert!(payload.audio.is_none());
    }

    #[test]
    fn payload_deserializes_audio_field() {
        let json = r#"{
            "number": 1,
            "text": "",
            "audio": "https://cdn.example.net/audio/128/ar.alafasy/1.mp3",
            "edition": {
                "identifier": "ar.alafasy",
                "language": "ar",
                "englishName": "Alafasy",
                "format": "audio",
                "type": "versebyverse"
            },
            "surah": {
                "number": 1,
                "name": "سورة الفاتحة",
                "englishName": "Al-Faatiha",
                "englishNameTranslation": "The Opening",
                "numberOfAyahs": 7,
                "revelationType": "Meccan"
            },
            "numberInSurah": 1,
            "juz": 1,
            "page": 1
        }"#;

        let payload: VersePayload = serde_json::from_str(json).expect("deserialize");
        assert!(payload.audio.as_deref().unwrap_or("").ends_with("1.mp3"));
    }

    #[test]
    fn facet_failure_display() {
        let req = FacetRequest::new(VerseId(7), FacetKind::Audio, "ar.alafasy");
        let failure = FacetFailure::new(&req, "HTTP 503");
        assert_eq!(
            failure.to_string(),
            "facet audio for verse 7 failed: HTTP 503"
        );
    }
}

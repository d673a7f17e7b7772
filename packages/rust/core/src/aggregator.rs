//! Per-verse facet aggregation.
//!
//! For one identifier, issues every facet fetch concurrently, waits for all
//! of them to settle (no cancellation on first failure), and either merges
//! the payloads into one complete [`EnrichedVerse`] or discards the verse
//! entirely. Partial composites are never built.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::warn;

use versefeed_shared::{Result, VerseId, VersefeedError, valid_selector};
use versefeed_sources::{FacetKind, FacetRequest, SourceClient, SurahInfo, VersePayload};

// ---------------------------------------------------------------------------
// FacetPlan
// ---------------------------------------------------------------------------

/// The caller-overridable facet template: which upstream edition serves each
/// facet kind. One plan is shared across every identifier of a request.
#[derive(Debug, Clone)]
pub struct FacetPlan {
    /// Primary text edition.
    pub text: String,
    /// Translation edition.
    pub translation: String,
    /// Transliteration edition.
    pub transliteration: String,
    /// Audio (recitation) edition.
    pub audio: String,
}

impl FacetPlan {
    /// Build a plan from configured edition defaults.
    pub fn from_editions(editions: &versefeed_shared::EditionsConfig) -> Self {
        Self {
            text: editions.text.clone(),
            translation: editions.translation.clone(),
            transliteration: editions.transliteration.clone(),
            audio: editions.audio.clone(),
        }
    }

    /// Reject ill-formed edition selectors before any network activity.
    pub fn validate(&self) -> Result<()> {
        let entries = [
            (FacetKind::Text, &self.text),
            (FacetKind::Translation, &self.translation),
            (FacetKind::Transliteration, &self.transliteration),
            (FacetKind::Audio, &self.audio),
        ];

        for (facet, selector) in entries {
            if !valid_selector(selector) {
                return Err(VersefeedError::invalid_argument(format!(
                    "bad {facet} edition selector: {selector:?}"
                )));
            }
        }

        Ok(())
    }

    /// The ordered fetch set for one identifier.
    pub fn requests(&self, verse: VerseId) -> Vec<FacetRequest> {
        vec![
            FacetRequest::new(verse, FacetKind::Text, &self.text),
            FacetRequest::new(verse, FacetKind::Translation, &self.translation),
            FacetRequest::new(verse, FacetKind::Transliteration, &self.transliteration),
            FacetRequest::new(verse, FacetKind::Audio, &self.audio),
        ]
    }
}

// ---------------------------------------------------------------------------
// EnrichedVerse
// ---------------------------------------------------------------------------

/// The composite record for one fully-enriched verse.
///
/// Structural metadata (surah, position, juz, page) comes from the primary
/// text facet; the other facets contribute their payloads as named fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedVerse {
    /// Global verse number.
    pub number: VerseId,
    /// Primary scripture text.
    pub text: String,
    /// Chapter metadata, adopted from the primary text facet.
    pub surah: SurahInfo,
    /// Verse position within its chapter.
    pub number_in_surah: u32,
    /// Juz (reading-section) number.
    pub juz: u32,
    /// Page number in the reference print edition.
    pub page: u32,
    /// Translated text.
    pub translation: String,
    /// Transliterated text.
    pub transliteration: String,
    /// Recitation audio URL.
    pub audio_url: String,
    /// Edition identifiers that produced each facet, as echoed by upstream.
    pub editions: EditionUsage,
    /// When this composite was assembled. Upstream data is live, so two
    /// retrievals of the same verse may differ.
    pub retrieved_at: DateTime<Utc>,
}

/// Which upstream edition served each facet of a composite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditionUsage {
    pub text: String,
    pub translation: String,
    pub transliteration: String,
    pub audio: String,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Fetch every facet of `verse` concurrently and merge the results.
///
/// Returns `None` if any facet failed; each failing facet is logged. All
/// fetches run to completion before the verdict is made.
pub async fn aggregate(
    client: &SourceClient,
    verse: VerseId,
    plan: &FacetPlan,
) -> Option<EnrichedVerse> {
    let requests = plan.requests(verse);
    let results = join_all(requests.iter().map(|r| client.fetch_facet(r))).await;

    let mut text: Option<VersePayload> = None;
    let mut translation: Option<VersePayload> = None;
    let mut transliteration: Option<VersePayload> = None;
    let mut audio: Option<VersePayload> = None;
    let mut complete = true;

    for (request, result) in requests.iter().zip(results) {
        match result {
            Ok(payload) => match request.facet {
                FacetKind::Text => text = Some(payload),
                FacetKind::Translation => translation = Some(payload),
                FacetKind::Transliteration => transliteration = Some(payload),
                FacetKind::Audio => audio = Some(payload),
            },
            Err(failure) => {
                warn!(
                    verse = %failure.verse,
                    facet = %failure.facet,
                    reason = %failure.reason,
                    "dropping verse: facet fetch failed"
                );
                complete = false;
            }
        }
    }

    if !complete {
        return None;
    }

    let (text, translation, transliteration, audio) =
        (text?, translation?, transliteration?, audio?);
    let audio_url = audio.audio.clone()?;

    Some(EnrichedVerse {
        number: verse,
        text: text.text.clone(),
        surah: text.surah.clone(),
        number_in_surah: text.number_in_surah,
        juz: text.juz,
        page: text.page,
        translation: translation.text.clone(),
        transliteration: transliteration.text.clone(),
        audio_url,
        editions: EditionUsage {
            text: text.edition.identifier.clone(),
            translation: translation.edition.identifier.clone(),
            transliteration: transliteration.edition.identifier.clone(),
            audio: audio.edition.identifier.clone(),
        },
        retrieved_at: Utc::now(),
    })
}

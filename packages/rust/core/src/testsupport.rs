//! Shared wiremock helpers for pipeline tests.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use versefeed_shared::UpstreamConfig;
use versefeed_sources::FacetKind;

use crate::aggregator::FacetPlan;

pub(crate) fn upstream_config(base_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        universe_size: 6236,
    }
}

pub(crate) fn default_plan() -> FacetPlan {
    FacetPlan {
        text: "quran-uthmani".into(),
        translation: "en.asad".into(),
        transliteration: "en.transliteration".into(),
        audio: "ar.alafasy".into(),
    }
}

/// Upstream envelope for one facet of one verse. The verse text embeds the
/// edition so merge tests can check which facet landed in which field, and
/// only the text facet carries the canonical surah name so metadata-adoption
/// is observable.
pub(crate) fn verse_body(number: u32, edition: &str, facet: FacetKind) -> serde_json::Value {
    let audio = matches!(facet, FacetKind::Audio)
        .then(|| format!("https://cdn.example.net/{edition}/{number}.mp3"));
    let surah_name = if matches!(facet, FacetKind::Text) {
        "Al-Baqara"
    } else {
        "Secondary"
    };

    json!({
        "code": 200,
        "status": "OK",
        "data": {
            "number": number,
            "text": format!("{facet} of verse {number} [{edition}]"),
            "audio": audio,
            "edition": {
                "identifier": edition,
                "language": "en",
                "englishName": edition,
                "format": if matches!(facet, FacetKind::Audio) { "audio" } else { "text" },
                "type": facet.as_str()
            },
            "surah": {
                "number": 2,
                "name": "سورة البقرة",
                "englishName": surah_name,
                "englishNameTranslation": "The Cow",
                "numberOfAyahs": 286,
                "revelationType": "Medinan"
            },
            "numberInSurah": number,
            "juz": 3,
            "page": 40
        }
    })
}

pub(crate) async fn mount_facet(server: &MockServer, number: u32, edition: &str, facet: FacetKind) {
    Mock::given(method("GET"))
        .and(path(format!("/ayah/{number}/{edition}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(verse_body(number, edition, facet)))
        .mount(server)
        .await;
}

/// Mount success responses for every facet of a verse.
pub(crate) async fn mount_verse_facets(server: &MockServer, number: u32, plan: &FacetPlan) {
    mount_facet(server, number, &plan.text, FacetKind::Text).await;
    mount_facet(server, number, &plan.translation, FacetKind::Translation).await;
    mount_facet(server, number, &plan.transliteration, FacetKind::Transliteration).await;
    mount_facet(server, number, &plan.audio, FacetKind::Audio).await;
}

/// Mount success responses for every facet of a verse except one.
pub(crate) async fn mount_verse_facets_except(
    server: &MockServer,
    number: u32,
    plan: &FacetPlan,
    skip: FacetKind,
) {
    let facets = [
        (FacetKind::Text, plan.text.as_str()),
        (FacetKind::Translation, plan.translation.as_str()),
        (FacetKind::Transliteration, plan.transliteration.as_str()),
        (FacetKind::Audio, plan.audio.as_str()),
    ];

    for (facet, edition) in facets {
        if facet != skip {
            mount_facet(server, number, edition, facet).await;
        }
    }
}

pub(crate) async fn mount_facet_error(server: &MockServer, number: u32, edition: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/ayah/{number}/{edition}")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

//! Upstream verse-source client: one retrieval per (verse, facet, edition).
//!
//! Each facet of a verse lives behind its own upstream endpoint, addressed
//! as `{base}/ayah/{number}/{edition}`. The client performs exactly one GET
//! per [`FacetRequest`] and captures every failure mode (transport error,
//! non-success status, non-OK envelope, malformed payload) in the returned
//! [`FacetResult`] value — nothing propagates as an `Err` past this boundary.

mod types;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use versefeed_shared::{Result, UpstreamConfig, VersefeedError};

pub use types::{
    EditionInfo, FacetFailure, FacetKind, FacetRequest, FacetResult, SurahInfo, VersePayload,
};

use types::ApiEnvelope;

/// User-Agent string for upstream requests.
const USER_AGENT: &str = concat!("Versefeed/", env!("CARGO_PKG_VERSION"));

/// Maximum number of redirects to follow per fetch.
const MAX_REDIRECTS: usize = 3;

// ---------------------------------------------------------------------------
// SourceClient
// ---------------------------------------------------------------------------

/// HTTP client over the upstream verse API.
///
/// Cheap to share: the inner `reqwest::Client` pools connections and
/// tolerates arbitrary concurrent use, so one `SourceClient` serves every
/// concurrent fetch of an enrichment run.
#[derive(Debug, Clone)]
pub struct SourceClient {
    client: Client,
    /// Validated base URL, without a trailing slash.
    base_url: String,
}

impl SourceClient {
    /// Build a client from upstream settings.
    ///
    /// A malformed base URL or client construction failure means no fetch
    /// can ever be issued, so it surfaces as the fatal
    /// [`VersefeedError::Upstream`] rather than a per-facet failure.
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let parsed = Url::parse(&config.base_url).map_err(|e| {
            VersefeedError::Upstream(format!("invalid base URL {:?}: {e}", config.base_url))
        })?;

        if parsed.host_str().is_none() {
            return Err(VersefeedError::Upstream(format!(
                "base URL has no host: {parsed}"
            )));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VersefeedError::Upstream(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch one facet of one verse.
    ///
    /// All failure information is captured in the returned value; concurrent
    /// calls are independent and never block one another.
    #[instrument(skip_all, fields(verse = %request.verse, facet = %request.facet))]
    pub async fn fetch_facet(&self, request: &FacetRequest) -> FacetResult {
        match self.try_fetch(request).await {
            Ok(payload) => Ok(payload),
            Err(reason) => {
                debug!(%reason, "facet fetch failed");
                Err(FacetFailure::new(request, reason))
            }
        }
    }

    /// Endpoint URL for a facet request.
    fn facet_url(&self, request: &FacetRequest) -> String {
        format!(
            "{}/ayah/{}/{}",
            self.base_url, request.verse, request.edition
        )
    }

    async fn try_fetch(&self, request: &FacetRequest) -> std::result::Result<VersePayload, String> {
        let url = self.facet_url(request);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("{url}: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("{url}: HTTP {status}"));
        }

        let envelope: ApiEnvelope = response
            .json()
            .await
            .map_err(|e| format!("{url}: malformed response: {e}"))?;

        if envelope.code != 200 {
            return Err(format!(
                "{url}: upstream code {} ({})",
                envelope.code, envelope.status
            ));
        }

        let payload: VersePayload = serde_json::from_value(envelope.data)
            .map_err(|e| format!("{url}: malformed payload: {e}"))?;

        validate_shape(request.facet, &payload)?;

        Ok(payload)
    }
}

/// Check the payload matches the facet kind's expected shape.
fn validate_shape(facet: FacetKind, payload: &VersePayload) -> std::result::Result<(), String> {
    match facet {
        FacetKind::Audio => match payload.audio.as_deref() {
            Some(audio) if !audio.is_empty() => Ok(()),
            _ => Err("audio edition returned no audio URL".into()),
        },
        FacetKind::Text | FacetKind::Translation | FacetKind::Transliteration => {
            if payload.text.is_empty() {
                Err("text edition returned empty text".into())
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use versefeed_shared::VerseId;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn upstream_config(base_url: &str) -> UpstreamConfig {
        UpstreamConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            universe_size: 6236,
        }
    }

    fn verse_body(number: u32, edition: &str, kind: &str, audio: Option<&str>) -> serde_json::Value {
        json!({
            "code": 200,
            "status": "OK",
            "data": {
                "number": number,
                "text": if kind == "versebyverse" { "" } else { "verse text" },
                "audio": audio,
                "edition": {
                    "identifier": edition,
                    "language": "en",
                    "englishName": "Test Edition",
                    "format": if audio.is_some() { "audio" } else { "text" },
                    "type": kind
                },
                "surah": {
                    "number": 2,
                    "name": "سورة البقرة",
                    "englishName": "Al-Baqara",
                    "englishNameTranslation": "The Cow",
                    "numberOfAyahs": 286,
                    "revelationType": "Medinan"
                },
                "numberInSurah": number,
                "juz": 1,
                "page": 3
            }
        })
    }

    #[tokio::test]
    async fn fetch_facet_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ayah/262/en.asad"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(verse_body(262, "en.asad", "translation", None)),
            )
            .mount(&server)
            .await;

        let client = SourceClient::new(&upstream_config(&server.uri())).unwrap();
        let request = FacetRequest::new(VerseId(262), FacetKind::Translation, "en.asad");

        let payload = client.fetch_facet(&request).await.expect("success");
        assert_eq!(payload.number, 262);
        assert_eq!(payload.edition.identifier, "en.asad");
        assert_eq!(payload.surah.english_name, "Al-Baqara");
    }

    #[tokio::test]
    async fn fetch_facet_http_error_becomes_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ayah/9999/quran-uthmani"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = SourceClient::new(&upstream_config(&server.uri())).unwrap();
        let request = FacetRequest::new(VerseId(9999), FacetKind::Text, "quran-uthmani");

        let failure = client.fetch_facet(&request).await.expect_err("failure");
        assert_eq!(failure.verse, VerseId(9999));
        assert_eq!(failure.facet, FacetKind::Text);
        assert!(failure.reason.contains("404"));
    }

    #[tokio::test]
    async fn fetch_facet_malformed_body_becomes_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ayah/1/quran-uthmani"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&server)
            .await;

        let client = SourceClient::new(&upstream_config(&server.uri())).unwrap();
        let request = FacetRequest::new(VerseId(1), FacetKind::Text, "quran-uthmani");

        let failure = client.fetch_facet(&request).await.expect_err("failure");
        assert!(failure.reason.contains("malformed"));
    }

    #[tokio::test]
    async fn fetch_facet_non_ok_envelope_becomes_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ayah/1/bad.edition"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 400,
                "status": "Bad Request",
                "data": "edition not found"
            })))
            .mount(&server)
            .await;

        let client = SourceClient::new(&upstream_config(&server.uri())).unwrap();
        let request = FacetRequest::new(VerseId(1), FacetKind::Translation, "bad.edition");

        let failure = client.fetch_facet(&request).await.expect_err("failure");
        assert!(failure.reason.contains("upstream code 400"));
    }

    #[tokio::test]
    async fn audio_facet_without_url_becomes_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ayah/7/ar.alafasy"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(verse_body(7, "ar.alafasy", "versebyverse", None)),
            )
            .mount(&server)
            .await;

        let client = SourceClient::new(&upstream_config(&server.uri())).unwrap();
        let request = FacetRequest::new(VerseId(7), FacetKind::Audio, "ar.alafasy");

        let failure = client.fetch_facet(&request).await.expect_err("failure");
        assert!(failure.reason.contains("no audio URL"));
    }

    #[test]
    fn invalid_base_url_is_fatal() {
        let result = SourceClient::new(&upstream_config("not a url"));
        assert!(matches!(result, Err(VersefeedError::Upstream(_))));
    }

    #[test]
    fn facet_url_shape() {
        let client = SourceClient::new(&upstream_config("https://api.example.net/v1/")).unwrap();
        let request = FacetRequest::new(VerseId(255), FacetKind::Text, "quran-uthmani");
        assert_eq!(
            client.facet_url(&request),
            "https://api.example.net/v1/ayah/255/quran-uthmani"
        );
    }
}

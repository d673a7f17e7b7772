//! Enrichment orchestration: sample → fan out → join → filter.
//!
//! One aggregation runs per sampled identifier, all concurrently, with no
//! ordering dependency between identifiers. Per-identifier failures never
//! fail the request; they only shrink the result set. The only wholesale
//! failures are caller mistakes (rejected before any network activity) and
//! a configuration that prevents issuing fetches at all.

use std::time::Instant;

use futures::future::join_all;
use tracing::{info, instrument};

use versefeed_shared::{AppConfig, Result, VerseId, VersefeedError};
use versefeed_sources::SourceClient;

use crate::aggregator::{self, EnrichedVerse, FacetPlan};
use crate::sampler;

/// The enrichment pipeline entry point.
///
/// Holds the shared upstream client and deployment configuration; each
/// `enrich*` call is stateless and independent of every other call.
pub struct Enricher {
    client: SourceClient,
    config: AppConfig,
}

impl Enricher {
    /// Validate configuration and construct the upstream client.
    ///
    /// This is the single wholesale-failure point: an unusable upstream
    /// configuration surfaces here, before any request is accepted.
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = SourceClient::new(&config.upstream)?;
        Ok(Self { client, config })
    }

    /// The facet plan built from configured edition defaults.
    pub fn default_plan(&self) -> FacetPlan {
        FacetPlan::from_editions(&self.config.editions)
    }

    /// Sample `count` identifiers and enrich them.
    ///
    /// Returns at most `count` composite records, in draw order; identifiers
    /// that lost any facet are dropped silently. `count == 0` returns an
    /// empty set without issuing a single fetch.
    pub async fn enrich(&self, count: u32, plan: &FacetPlan) -> Result<Vec<EnrichedVerse>> {
        plan.validate()?;
        self.check_batch(count as usize)?;

        if count == 0 {
            return Ok(Vec::new());
        }

        let verses = sampler::sample(count, self.config.upstream.universe_size)?;
        Ok(self.enrich_verses(&verses, plan).await)
    }

    /// Enrich the explicit inclusive identifier range `[from, to]`.
    pub async fn enrich_range(
        &self,
        from: u32,
        to: u32,
        plan: &FacetPlan,
    ) -> Result<Vec<EnrichedVerse>> {
        plan.validate()?;

        let verses = sampler::sample_range(from, to, self.config.upstream.universe_size)?;
        self.check_batch(verses.len())?;

        Ok(self.enrich_verses(&verses, plan).await)
    }

    /// Enrich an explicit identifier set, one concurrent aggregation per
    /// entry. Surviving records keep the input order regardless of which
    /// aggregation settles first.
    #[instrument(skip_all, fields(verses = verses.len()))]
    pub async fn enrich_verses(&self, verses: &[VerseId], plan: &FacetPlan) -> Vec<EnrichedVerse> {
        let start = Instant::now();

        let settled = join_all(
            verses
                .iter()
                .map(|&verse| aggregator::aggregate(&self.client, verse, plan)),
        )
        .await;

        let sampled = settled.len();
        let records: Vec<EnrichedVerse> = settled.into_iter().flatten().collect();

        info!(
            sampled,
            enriched = records.len(),
            dropped = sampled - records.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "enrichment complete"
        );

        records
    }

    fn check_batch(&self, requested: usize) -> Result<()> {
        let max_batch = self.config.defaults.max_batch as usize;
        if requested > max_batch {
            return Err(VersefeedError::invalid_argument(format!(
                "requested {requested} verses, max batch is {max_batch}"
            )));
        }
        Ok(())
    }
}

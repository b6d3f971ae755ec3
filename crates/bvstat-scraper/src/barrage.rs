//! Barrage (danmaku) collection.
//!
//! Unlike comment collection, a failed barrage fetch is returned to the
//! caller.

use tracing::info;

use bvstat_models::{BarrageCorpus, SectionId};

use crate::client::BiliClient;
use crate::error::ScrapeResult;
use crate::pattern::extract_all;
use crate::patterns;

/// Extract every caption from a barrage XML document, spaces removed.
pub fn parse_barrage(xml: &str) -> BarrageCorpus {
    extract_all(&patterns::BARRAGE_ITEM, xml)
        .into_iter()
        .map(|caption| caption.replace(' ', ""))
        .collect()
}

impl BiliClient {
    /// Fetch the barrage file for `section_id`. One request, no retry.
    pub async fn collect_barrage(&self, section_id: SectionId) -> ScrapeResult<BarrageCorpus> {
        let url = format!(
            "{}/{}.xml",
            self.config.barrage_url.trim_end_matches('/'),
            section_id
        );
        let xml = self.fetch_text(&url).await?;
        let corpus = parse_barrage(&xml);

        info!(
            section_id = %section_id,
            captions = corpus.len(),
            "Barrage collected"
        );
        Ok(corpus)
    }
}

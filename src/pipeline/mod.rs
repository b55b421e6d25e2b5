use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::client::{ApiClient, FetchError};
use crate::records::{ContentType, Record};
use crate::render::{self, Container};

pub const PAGE_SIZE: usize = 10;

/// Transient query narrowing a record collection. The category is forwarded
/// to the API; the keyword is always matched locally.
#[derive(Clone, Debug, Default)]
pub struct Filter {
    pub keyword: String,
    pub category: Option<String>,
}

/// A bounded slice of the filtered collection, ready for display.
#[derive(Clone, Debug)]
pub struct Page {
    pub number: usize,
    pub size: usize,
    pub total_records: usize,
    pub total_pages: usize,
    pub records: Vec<Record>,
}

/// Keeps a record iff the keyword is empty or case-insensitively contained in
/// title, organization or description. Pure and order-preserving: records are
/// only removed, never reordered. Substring containment only, no tokenization
/// or ranking.
pub fn apply_keyword_filter(records: Vec<Record>, keyword: &str) -> Vec<Record> {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| {
            r.title.to_lowercase().contains(&needle)
                || r.organization.to_lowercase().contains(&needle)
                || r.description
                    .as_deref()
                    .unwrap_or("")
                    .to_lowercase()
                    .contains(&needle)
        })
        .collect()
}

/// Cuts the 1-based page `page_number` out of `records`. An out-of-range page
/// number yields an empty slice, never an error.
pub fn paginate(records: Vec<Record>, page_number: usize, page_size: usize) -> Page {
    let page_size = page_size.max(1);
    let total_records = records.len();
    let total_pages = total_records.div_ceil(page_size);

    let start = page_number.saturating_sub(1).saturating_mul(page_size);
    let slice = if page_number == 0 || start >= total_records {
        Vec::new()
    } else {
        let end = (start + page_size).min(total_records);
        records[start..end].to_vec()
    };

    Page {
        number: page_number,
        size: page_size,
        total_records,
        total_pages,
        records: slice,
    }
}

/// Monotonically increasing request sequence. Each search cycle takes a
/// ticket before its fetch; a completed fetch may only commit while its
/// ticket is still the latest issued, so a late stale response can never
/// overwrite the rendering of a newer request.
#[derive(Clone, Debug, Default)]
pub struct RequestSeq {
    latest: Arc<AtomicU64>,
}

impl RequestSeq {
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}

#[derive(Clone, Debug)]
pub enum SearchOutcome {
    Rendered { page: Page },
    Superseded,
    Failed { message: String },
}

/// One fetch-filter-paginate-render cycle per invocation. No retained state
/// beyond the last rendered page, which is kept for re-render only; records
/// live for exactly one cycle and every new search re-fetches.
pub struct ListingPipeline {
    client: ApiClient,
    seq: RequestSeq,
    last_rendered: Mutex<Option<Page>>,
}

impl ListingPipeline {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            seq: RequestSeq::default(),
            last_rendered: Mutex::new(None),
        }
    }

    /// Issues the ticket for a new search cycle. A newer ticket supersedes
    /// all earlier ones; in-flight fetches are not cancelled.
    pub fn begin(&self) -> u64 {
        self.seq.issue()
    }

    /// Commits a completed cycle into `container` (full replacement). Stale
    /// tickets are discarded. A fetch error is written into the same
    /// container as an inline message rather than propagated.
    pub fn commit(
        &self,
        ticket: u64,
        fetched: Result<Page, FetchError>,
        content: ContentType,
        container: &mut dyn Container,
    ) -> SearchOutcome {
        if !self.seq.is_current(ticket) {
            return SearchOutcome::Superseded;
        }
        match fetched {
            Ok(page) => {
                let markup = render::render_fragments(&page, content).join("\n");
                container.replace(&markup);
                *self
                    .last_rendered
                    .lock()
                    .unwrap_or_else(|e| e.into_inner()) = Some(page.clone());
                SearchOutcome::Rendered { page }
            }
            Err(e) => {
                let message = e.to_string();
                container.replace(&render::render_error(content, &message));
                SearchOutcome::Failed { message }
            }
        }
    }

    pub async fn search(
        &self,
        content: ContentType,
        filter: &Filter,
        page_number: usize,
        page_size: usize,
        container: &mut dyn Container,
    ) -> SearchOutcome {
        let ticket = self.begin();
        let fetched = self
            .client
            .fetch_records(content, filter)
            .await
            .map(|records| {
                let matched = apply_keyword_filter(records, &filter.keyword);
                paginate(matched, page_number, page_size)
            });
        self.commit(ticket, fetched, content, container)
    }

    pub fn last_rendered(&self) -> Option<Page> {
        self.last_rendered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

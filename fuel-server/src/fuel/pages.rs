//! Batched pagination over upstream feeds.

use std::future::Future;

use super::error::FuelApiError;

/// Ceiling on the number of pages fetched for one feed.
///
/// The empty-page rule is the normal termination; the ceiling exists so
/// an upstream that never returns an empty page cannot loop us forever.
/// Hitting it is a soft stop, not an error.
pub(crate) const MAX_PAGES: u32 = 50;

/// Fetch successive pages of a feed, concatenating their records.
///
/// Pages are 1-indexed. Fetching stops at the first empty page, or at
/// [`MAX_PAGES`] as a soft stop (logged, accumulated records returned).
/// Any page failure aborts the whole fetch with that page's error.
pub async fn fetch_all_pages<T, F, Fut>(resource: &str, fetch_page: F) -> Result<Vec<T>, FuelApiError>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>, FuelApiError>>,
{
    let mut records = Vec::new();

    for page in 1..=MAX_PAGES {
        let batch = fetch_page(page).await?;
        if batch.is_empty() {
            return Ok(records);
        }
        records.extend(batch);
    }

    tracing::warn!(
        resource,
        max_pages = MAX_PAGES,
        "pagination ceiling reached, returning records collected so far"
    );

    Ok(records)
}

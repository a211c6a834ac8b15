//! Cursor ("marker") pagination shared by the parameter listings.

use crate::error::Result;
use crate::types::Page;
use std::future::Future;
use tracing::debug;

/// Fetch every page of a marker-paginated listing and concatenate the items.
///
/// `fetch` is called with `None` first and then with each returned marker until a
/// page comes back without one. An empty marker counts as "no more pages". Pages
/// are requested strictly one after another and items keep the provider's order.
/// The first failing page aborts the listing.
pub(crate) async fn collect_pages<T, F, Fut>(operation: &'static str, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut marker: Option<String> = None;
    let mut page_number = 0_usize;

    loop {
        page_number += 1;
        let page = fetch(marker.take()).await?;
        debug!(
            operation,
            page = page_number,
            records = page.items.len(),
            has_more = page.marker.as_deref().is_some_and(|m| !m.is_empty()),
            "Fetched page"
        );
        items.extend(page.items);

        match page.marker {
            Some(next) if !next.is_empty() => marker = Some(next),
            _ => break,
        }
    }

    Ok(items)
}

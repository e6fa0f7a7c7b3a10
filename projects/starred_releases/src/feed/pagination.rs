use std::future::Future;

/// Page size used for every GitHub listing.
pub const PAGE_SIZE: u32 = 100;

/// Requests pages `0, 1, 2, ...` until one comes back shorter than
/// `page_size`, returning every item in request order.
///
/// The first error aborts the walk and is returned as-is; items from earlier
/// pages are dropped.
pub async fn fetch_all<T, E, F, Fut>(page_size: u32, mut list_page: F) -> Result<Vec<T>, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    let mut items = Vec::new();
    let mut page = 0;

    loop {
        let batch = list_page(page).await?;
        let exhausted = batch.is_empty() || batch.len() < page_size as usize;

        items.extend(batch);

        if exhausted {
            return Ok(items);
        }

        page += 1;
    }
}

//! Paginated product search

use tracing::{debug, warn};

use crate::clients::{endpoints, ExpertVoiceClient};
use crate::error::AppResult;
use crate::models::{Product, SearchPage, SearchQuery};

pub struct ProductSearch<'a> {
    client: &'a ExpertVoiceClient,
}

impl<'a> ProductSearch<'a> {
    pub fn new(client: &'a ExpertVoiceClient) -> Self {
        Self { client }
    }

    /// Run `query`, following pages until the reported total is reached.
    ///
    /// Items are not deduplicated; a server that repeats items on trailing
    /// pages yields repeated products.
    pub async fn search(&self, query: &SearchQuery) -> AppResult<Vec<Product>> {
        let mut results: Vec<Product> = Vec::new();
        let mut start_results = 0;

        loop {
            let page: SearchPage = self
                .client
                .post_json(endpoints::PRODUCT_SEARCH, &[], &query.to_request(start_results))
                .await?;

            let total = page.total_results;
            let page_len = page.result_items.len();
            debug!(
                "search page at {}: {} items, {} total",
                start_results, page_len, total
            );

            results.extend(page.result_items.into_iter().map(Product::from));
            start_results += page_len;

            if results.len() >= total {
                break;
            }
            if page_len == 0 {
                warn!(
                    "search stopped at {}/{} results: server returned an empty page",
                    results.len(),
                    total
                );
                break;
            }
        }

        Ok(results)
    }

    /// Every product of one category
    pub async fn products_in_category(&self, category_id: i64) -> AppResult<Vec<Product>> {
        self.search(&SearchQuery::for_category(category_id)).await
    }
}

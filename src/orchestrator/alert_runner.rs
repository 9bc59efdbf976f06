//! Runs saved queries and alerts on listings not seen last time

use tracing::info;

use crate::clients::ExpertVoiceClient;
use crate::error::AppResult;
use crate::models::{Product, SearchQuery};
use crate::services::{format_alerts, Alert, ProductSearch, SeenListings};

/// Alerts produced by one saved query
#[derive(Debug, Clone)]
pub struct QueryAlerts {
    pub query_name: String,
    pub alerts: Vec<Alert>,
}

/// Record every product as seen and keep those new since the last run
pub fn queue_new_listings(
    products: Vec<Product>,
    seen: &mut SeenListings,
    url_for: impl Fn(&Product) -> String,
) -> Vec<Alert> {
    products
        .into_iter()
        .filter(|product| seen.observe(&product.product_code))
        .map(|product| Alert {
            url: url_for(&product),
            product,
        })
        .collect()
}

/// Run `queries`, log one message per query with new listings, and rewrite
/// the seen-listings file with this run's ids.
pub async fn run_alerts(
    client: &ExpertVoiceClient,
    queries: &[(String, SearchQuery)],
    seen: &mut SeenListings,
    markdown: bool,
) -> AppResult<Vec<QueryAlerts>> {
    let search = ProductSearch::new(client);
    let mut results = Vec::new();

    for (query_name, query) in queries {
        let products = search.search(query).await?;
        info!(
            "🔍 query \"{}\" returned {} listings",
            query_name,
            products.len()
        );

        let alerts = queue_new_listings(products, seen, |p| {
            client.product_url(&p.org_id, &p.product_code)
        });

        if !alerts.is_empty() {
            info!("{}", format_alerts(query_name, &alerts, markdown));
        }

        results.push(QueryAlerts {
            query_name: query_name.clone(),
            alerts,
        });
    }

    seen.save()?;
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(code: &str) -> Product {
        Product {
            product_code: code.to_string(),
            org_id: "1".to_string(),
            brand: "Acme".to_string(),
            name: format!("Item {}", code),
            price: "1".to_string(),
            msrp: "2".to_string(),
        }
    }

    #[test]
    fn test_only_unseen_listings_are_queued() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen.json");
        std::fs::write(&path, r#"{"A": ""}"#).unwrap();
        let mut seen = SeenListings::load(&path).unwrap();

        let alerts = queue_new_listings(vec![product("A"), product("B")], &mut seen, |p| {
            format!("url/{}", p.product_code)
        });

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].product.product_code, "B");
        assert_eq!(alerts[0].url, "url/B");
        assert_eq!(seen.observed_count(), 2);
    }
}

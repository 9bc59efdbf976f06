//! Exports every leaf category's products to CSV

use std::path::Path;
use tracing::info;

use crate::clients::ExpertVoiceClient;
use crate::error::AppResult;
use crate::models::ProductRow;
use crate::services::csv_writer::save_products;
use crate::services::{CategoryService, ProductSearch};

/// Taxonomy depth requested for exports
pub const EXPORT_CATEGORY_DEPTH: u32 = 6;

/// Fetch products of all leaf categories and write them to `out_path`.
///
/// # Arguments
/// - `prefix_path`: use the full ancestor path as the category column
///
/// # Returns
/// number of rows written
pub async fn export_products(
    client: &ExpertVoiceClient,
    out_path: &Path,
    prefix_path: bool,
) -> AppResult<usize> {
    let categories = CategoryService::new(client)
        .leaf_categories(EXPORT_CATEGORY_DEPTH)
        .await?;
    info!("📁 exporting {} leaf categories", categories.len());

    let search = ProductSearch::new(client);
    let mut rows = Vec::new();

    for category in &categories {
        let products = search.products_in_category(category.id).await?;
        info!(
            "✓ {}: {} products",
            category.display_name(true),
            products.len()
        );

        let name = category.display_name(prefix_path);
        rows.extend(products.into_iter().map(|product| ProductRow {
            product,
            category: name.to_string(),
        }));
    }

    save_products(out_path, &rows)?;
    info!("💾 wrote {} rows to {}", rows.len(), out_path.display());
    Ok(rows.len())
}

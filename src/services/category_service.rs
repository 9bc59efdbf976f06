//! Category explorer
//!
//! Fetches the nested taxonomy and flattens it.

use tracing::debug;

use crate::clients::{endpoints, ExpertVoiceClient};
use crate::error::AppResult;
use crate::models::category::{Category, FlatCategory, TaxonomyResponse, PATH_SEPARATOR};

pub struct CategoryService<'a> {
    client: &'a ExpertVoiceClient,
}

impl<'a> CategoryService<'a> {
    pub fn new(client: &'a ExpertVoiceClient) -> Self {
        Self { client }
    }

    /// Fetch the taxonomy down to `depth` levels and flatten it
    pub async fn categories(&self, depth: u32) -> AppResult<Vec<FlatCategory>> {
        let depth = depth.to_string();
        let res: TaxonomyResponse = self
            .client
            .get_json(endpoints::TAXONOMY_BROWSE, &[("depth", depth.as_str())])
            .await?;

        let roots: Vec<Category> = res
            .browse
            .into_iter()
            .flat_map(|group| group.taxonomy)
            .collect();

        let flat = flatten_categories(&roots);
        debug!("flattened {} categories", flat.len());
        Ok(flat)
    }

    /// Leaf categories only
    pub async fn leaf_categories(&self, depth: u32) -> AppResult<Vec<FlatCategory>> {
        Ok(self
            .categories(depth)
            .await?
            .into_iter()
            .filter(|c| c.is_leaf)
            .collect())
    }
}

/// Depth-first, parents before children
pub fn flatten_categories(roots: &[Category]) -> Vec<FlatCategory> {
    let mut out = Vec::new();
    for root in roots {
        flatten_into(root, None, 0, &mut out);
    }
    out
}

fn flatten_into(
    category: &Category,
    parent_path: Option<&str>,
    depth: usize,
    out: &mut Vec<FlatCategory>,
) {
    let path = match parent_path {
        Some(parent) => format!("{}{}{}", parent, PATH_SEPARATOR, category.name),
        None => category.name.clone(),
    };

    out.push(FlatCategory {
        id: category.id,
        name: category.name.clone(),
        path: path.clone(),
        depth,
        is_leaf: category.is_leaf(),
    });

    for child in category.taxonomy.iter().flatten() {
        flatten_into(child, Some(&path), depth + 1, out);
    }
}

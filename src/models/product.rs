use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};

use super::serde_ext::{deserialize_id, deserialize_price};

/// A saved search preset, as stored under `saved_queries` in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub search_term: Option<String>,
    /// Taxonomy (category) ids
    pub categories: Vec<i64>,
    pub genders: Vec<String>,
    /// Brand org ids
    pub brands: Vec<i64>,
    /// Promotion flags, e.g. `CLOSEOUT`
    pub promotions: Vec<String>,
    pub in_stock_only: bool,
    pub sort_field: String,
    pub sort_direction: String,
    pub page_size: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            search_term: None,
            categories: Vec::new(),
            genders: Vec::new(),
            brands: Vec::new(),
            promotions: Vec::new(),
            in_stock_only: false,
            sort_field: "RECOMMENDED".to_string(),
            sort_direction: "DESC".to_string(),
            page_size: 36,
        }
    }
}

impl SearchQuery {
    /// Query for every product of one category
    pub fn for_category(category_id: i64) -> Self {
        Self {
            categories: vec![category_id],
            ..Default::default()
        }
    }

    /// Build the search payload for the page starting at `start_results`
    pub fn to_request(&self, start_results: usize) -> JsonValue {
        let mut filters = Map::new();
        if !self.categories.is_empty() {
            filters.insert("TAXONOMY".to_string(), json!(self.categories));
        }
        if !self.genders.is_empty() {
            filters.insert("GENDER".to_string(), json!(self.genders));
        }
        if !self.brands.is_empty() {
            filters.insert("BRAND".to_string(), json!(self.brands));
        }
        if !self.promotions.is_empty() {
            filters.insert("PROMOTION".to_string(), json!(self.promotions));
        }
        if self.in_stock_only {
            filters.insert("AVAILABILITY".to_string(), json!(["IN_STOCK"]));
        }

        let context = if self.search_term.is_some() {
            "SEARCH"
        } else {
            "TAXONOMY"
        };

        json!({
            "searchTerm": self.search_term,
            "searchConfiguration": {
                "filters": filters,
                "maxResults": self.page_size,
                "options": {
                    "ALGV": null,
                    "CNTXT": context,
                    "PRFLTR": null,
                    "ZCFCTS": true
                },
                "sortDirection": self.sort_direction,
                "sortField": self.sort_field,
                "startResults": start_results
            }
        })
    }
}

/// One page of search results
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub total_results: usize,
    #[serde(default)]
    pub result_items: Vec<ResultItem>,
}

/// Raw search hit
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub product_code: String,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub org_id: String,
    pub text: String,
    pub owner: Owner,
    pub metadata: ItemMetadata,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: String,
    #[serde(default, deserialize_with = "deserialize_price")]
    pub retail_price: String,
}

/// Flattened product record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub product_code: String,
    pub org_id: String,
    pub brand: String,
    pub name: String,
    pub price: String,
    pub msrp: String,
}

impl From<ResultItem> for Product {
    fn from(item: ResultItem) -> Self {
        Self {
            product_code: item.product_code,
            org_id: item.org_id,
            brand: item.owner.name,
            name: item.text,
            price: item.metadata.price,
            msrp: item.metadata.retail_price,
        }
    }
}

/// A product tagged with the category it was found under
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub product: Product,
    pub category: String,
}

impl ProductRow {
    pub const HEADERS: [&'static str; 7] = [
        "brand",
        "name",
        "price",
        "msrp",
        "product_code",
        "org_id",
        "category",
    ];

    /// Cells in `HEADERS` order
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.product.brand.clone(),
            self.product.name.clone(),
            self.product.price.clone(),
            self.product.msrp.clone(),
            self.product.product_code.clone(),
            self.product.org_id.clone(),
            self.category.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_empty_filters() {
        let query = SearchQuery::for_category(123);
        let body = query.to_request(72);

        let config = &body["searchConfiguration"];
        assert_eq!(config["filters"], json!({ "TAXONOMY": [123] }));
        assert_eq!(config["startResults"], json!(72));
        assert_eq!(config["maxResults"], json!(36));
        assert_eq!(config["options"]["CNTXT"], json!("TAXONOMY"));
        assert!(body["searchTerm"].is_null());
    }

    #[test]
    fn test_request_carries_every_filter() {
        let query = SearchQuery {
            search_term: Some("jacket".to_string()),
            genders: vec!["MENS".to_string()],
            brands: vec![55],
            promotions: vec!["CLOSEOUT".to_string()],
            in_stock_only: true,
            ..Default::default()
        };
        let filters = &query.to_request(0)["searchConfiguration"]["filters"];

        assert_eq!(filters["GENDER"], json!(["MENS"]));
        assert_eq!(filters["BRAND"], json!([55]));
        assert_eq!(filters["PROMOTION"], json!(["CLOSEOUT"]));
        assert_eq!(filters["AVAILABILITY"], json!(["IN_STOCK"]));
        assert!(filters.get("TAXONOMY").is_none());
    }

    #[test]
    fn test_saved_query_defaults() {
        let query: SearchQuery = serde_json::from_str(r#"{"brands": [1, 2]}"#).unwrap();
        assert_eq!(query.brands, vec![1, 2]);
        assert_eq!(query.sort_field, "RECOMMENDED");
        assert_eq!(query.page_size, 36);
    }

    #[test]
    fn test_result_item_to_product() {
        let item: ResultItem = serde_json::from_value(json!({
            "productCode": 9876,
            "orgId": 12,
            "text": "Trail Shoe",
            "owner": { "name": "Acme" },
            "metadata": { "price": 60, "retailPrice": "120.00" }
        }))
        .unwrap();

        let product = Product::from(item);
        assert_eq!(product.product_code, "9876");
        assert_eq!(product.org_id, "12");
        assert_eq!(product.brand, "Acme");
        assert_eq!(product.name, "Trail Shoe");
        assert_eq!(product.price, "60");
        assert_eq!(product.msrp, "120.00");
    }
}

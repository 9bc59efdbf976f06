use serde::Deserialize;

use super::serde_ext::deserialize_numeric_id;

/// Response of the taxonomy browse endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TaxonomyResponse {
    #[serde(default)]
    pub browse: Vec<CategoryGroup>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryGroup {
    #[serde(default)]
    pub taxonomy: Vec<Category>,
}

/// Node of the category tree
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "deserialize_numeric_id")]
    pub id: i64,
    pub name: String,
    /// Child categories; absent on leaves
    #[serde(default)]
    pub taxonomy: Option<Vec<Category>>,
}

impl Category {
    pub fn is_leaf(&self) -> bool {
        self.taxonomy.as_ref().map_or(true, |children| children.is_empty())
    }
}

/// Category after flattening
#[derive(Debug, Clone, PartialEq)]
pub struct FlatCategory {
    pub id: i64,
    pub name: String,
    /// Ancestor names joined with `PATH_SEPARATOR`, ending with `name`
    pub path: String,
    pub depth: usize,
    pub is_leaf: bool,
}

pub const PATH_SEPARATOR: &str = " > ";

impl FlatCategory {
    /// Name to display: the full path or the bare name
    pub fn display_name(&self, prefix_with_path: bool) -> &str {
        if prefix_with_path {
            &self.path
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_ids_parse() {
        let res: TaxonomyResponse = serde_json::from_str(
            r#"{"browse": [{"taxonomy": [
                {"id": "12", "name": "Apparel", "taxonomy": [{"id": 13, "name": "Jackets"}]}
            ]}]}"#,
        )
        .unwrap();

        let apparel = &res.browse[0].taxonomy[0];
        assert_eq!(apparel.id, 12);
        assert!(!apparel.is_leaf());
        assert_eq!(apparel.taxonomy.as_ref().unwrap()[0].id, 13);
    }
}

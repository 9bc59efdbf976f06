//! Formats new-listing alerts

use crate::models::Product;

/// A new listing with its product page
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub product: Product,
    pub url: String,
}

/// Render every alert of one query as a single message.
///
/// Markdown mode links the title (for gotify-style notification sinks).
pub fn format_alerts(query_name: &str, alerts: &[Alert], markdown: bool) -> String {
    let mut lines = vec![
        format!(
            "{} new results for ExpertVoice query \"{}\"",
            alerts.len(),
            query_name
        ),
        String::new(),
    ];

    for alert in alerts {
        let p = &alert.product;
        if markdown {
            lines.push(format!("[{} - {}]({}):", p.brand, p.name, alert.url));
            lines.push(String::new());
            lines.push(format!("price: {}, msrp: {}", p.price, p.msrp));
            lines.push(String::new());
        } else {
            lines.push(format!("{} - {}:", p.brand, p.name));
            lines.push(format!("price: {}, msrp: {}", p.price, p.msrp));
            lines.push(alert.url.clone());
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert() -> Alert {
        Alert {
            product: Product {
                product_code: "P1".to_string(),
                org_id: "9".to_string(),
                brand: "Acme".to_string(),
                name: "Shell".to_string(),
                price: "100".to_string(),
                msrp: "250".to_string(),
            },
            url: "https://example.com/product/P1?brandOrgId=9".to_string(),
        }
    }

    #[test]
    fn test_plain_format() {
        let msg = format_alerts("jackets", &[alert()], false);
        assert_eq!(
            msg,
            "1 new results for ExpertVoice query \"jackets\"\n\n\
             Acme - Shell:\n\
             price: 100, msrp: 250\n\
             https://example.com/product/P1?brandOrgId=9\n"
        );
    }

    #[test]
    fn test_markdown_format() {
        let msg = format_alerts("jackets", &[alert()], true);
        assert!(msg.contains("[Acme - Shell](https://example.com/product/P1?brandOrgId=9):"));
        assert!(msg.ends_with("price: 100, msrp: 250\n"));
    }
}

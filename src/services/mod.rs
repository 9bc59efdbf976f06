pub mod alert_formatter;
pub mod category_service;
pub mod cheat_sheet;
pub mod csv_writer;
pub mod product_search;
pub mod seen_listings;

pub use alert_formatter::{format_alerts, Alert};
pub use category_service::CategoryService;
pub use cheat_sheet::CheatSheet;
pub use product_search::ProductSearch;
pub use seen_listings::SeenListings;

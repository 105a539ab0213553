pub mod anchor_date_provider;
pub mod season_catalog_provider;
pub mod show_resolver;

pub use anchor_date_provider::{AnchorDateProvider, AnchorInfo};
pub use season_catalog_provider::SeasonCatalogProvider;
pub use show_resolver::ShowResolver;

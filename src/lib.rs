pub mod commands;
pub mod modules;
pub mod shared;

use std::sync::Arc;

use modules::{
    mapping::{AnchorDateProvider, MappingPipeline, SeasonCatalogProvider, ShowResolver},
    provider::{AniListAdapter, AnimeListsResolver, CachingSeasonCatalog, TmdbAdapter},
};
use shared::{AppResult, MapperConfig};

/// Wired collaborators for one run
pub struct Services {
    pub pipeline: MappingPipeline,
    /// Kept concrete for full-catalog mode, which needs every known id
    pub resolver: Arc<AnimeListsResolver>,
}

/// Build the HTTP adapters and the pipeline from configuration
pub fn build_services(config: &MapperConfig) -> AppResult<Services> {
    let resolver = Arc::new(AnimeListsResolver::new(&config.transport)?);
    let anchor_dates: Arc<dyn AnchorDateProvider> =
        Arc::new(AniListAdapter::new(&config.transport)?);

    // Wrap TMDB with caching decorator, many AniList entries share one show
    let tmdb: Arc<dyn SeasonCatalogProvider> = Arc::new(TmdbAdapter::new(&config.transport)?);
    let season_catalog: Arc<dyn SeasonCatalogProvider> =
        Arc::new(CachingSeasonCatalog::new(tmdb));

    let show_resolver: Arc<dyn ShowResolver> = resolver.clone();
    let pipeline = MappingPipeline::new(
        show_resolver,
        anchor_dates,
        season_catalog,
        config.pipeline.clone(),
    );

    Ok(Services { pipeline, resolver })
}

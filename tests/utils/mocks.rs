/// Mock collaborators for the mapping pipeline
use async_trait::async_trait;
use mockall::mock;
use seasonmap::modules::{
    mapping::{AnchorDateProvider, AnchorInfo, SeasonCatalogProvider, ShowResolver},
    matching::{SeasonCandidate, ShowId, SourceId},
};
use seasonmap::shared::AppResult;

mock! {
    pub Resolver {}

    #[async_trait]
    impl ShowResolver for Resolver {
        async fn resolve(&self, source_id: SourceId) -> AppResult<Option<ShowId>>;
    }
}

mock! {
    pub AnchorDates {}

    #[async_trait]
    impl AnchorDateProvider for AnchorDates {
        async fn fetch(&self, source_id: SourceId) -> AppResult<AnchorInfo>;
    }
}

mock! {
    pub SeasonCatalog {}

    #[async_trait]
    impl SeasonCatalogProvider for SeasonCatalog {
        async fn fetch(&self, show_id: ShowId) -> AppResult<Vec<SeasonCandidate>>;
    }
}

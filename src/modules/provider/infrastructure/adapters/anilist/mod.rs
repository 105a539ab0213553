mod adapter;
mod mapper;
pub mod models;
mod queries;

pub use adapter::AniListAdapter;
pub use mapper::AniListMapper;

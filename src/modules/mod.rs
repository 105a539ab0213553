pub mod mapping;
pub mod matching;
pub mod provider;

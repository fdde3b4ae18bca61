pub mod commentary_store;
pub mod dashboard;
pub mod fixture_dataset;
pub mod persist;
pub mod state;

pub mod date_filter;
pub mod expense;
pub mod group;
pub mod stats;
pub mod user;

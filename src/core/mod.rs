pub mod converter;
pub mod currency;
pub mod rate_store;

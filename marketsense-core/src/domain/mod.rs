//! Domain types for MarketSense

pub mod price_point;

pub use price_point::PricePoint;

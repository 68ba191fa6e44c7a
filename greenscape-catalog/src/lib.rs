pub mod activity;
pub mod pricing;

pub use activity::{Activity, ActivityCategory, Catalog, DurationOption};
pub use pricing::{PriceQuote, PricingEngine, PricingRules, QuoteDisplay};

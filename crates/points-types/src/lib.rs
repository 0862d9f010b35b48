pub mod timeframe;
pub mod vault_filter;

pub use timeframe::Timeframe;
pub use vault_filter::VaultFilter;

// ============================================================================
// Module : models
// ============================================================================
// Structures de données du dashboard : coins, historique de prix,
// favoris, tri et résumé du marché
// ============================================================================

pub mod chart;     // PricePoint + ChartWindow
pub mod coin;      // CoinSummary (une ligne du listing)
pub mod favorites; // FavoritesSet
pub mod overview;  // MarketOverview (top 5)
pub mod sort;      // SortKey / SortDirection / SortConfig

// Re-exports : `use coinboard::models::CoinSummary;`
pub use chart::{ChartWindow, PricePoint};
pub use coin::{CoinSummary, Sparkline};
pub use favorites::FavoritesSet;
pub use overview::MarketOverview;
pub use sort::{SortConfig, SortDirection, SortKey};

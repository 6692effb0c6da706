// ============================================================================
// Module : api
// ============================================================================
// Client de l'API de marché (CoinGecko) et ses erreurs
// ============================================================================

pub mod coingecko; // Listing + historique de prix
pub mod error;     // FetchError

pub use coingecko::MarketClient;
pub use error::FetchError;

// ============================================================================
// Coinboard - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;     // Client CoinGecko
pub mod app;     // État de l'application
pub mod config;  // Configuration TOML + variables d'environnement
pub mod models;  // Structures de données
pub mod storage; // Persistance des favoris
pub mod ui;      // Interface utilisateur
pub mod worker;  // Appels réseau en arrière-plan

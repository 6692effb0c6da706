// ============================================================================
// Module : storage
// ============================================================================
// Persistance locale (uniquement les favoris)
// ============================================================================

pub mod favorites;

pub use favorites::{FavoritesStore, FAVORITES_KEY};

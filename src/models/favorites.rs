// ============================================================================
// Structure : FavoritesSet
// ============================================================================
// Ensemble des identifiants de coins marqués comme favoris
//
// CONCEPT : Set qui conserve l'ordre d'insertion
// - Sémantique d'ensemble (pas de doublons)
// - Stocké comme un Vec pour sérialiser en tableau JSON dans l'ordre d'ajout
// - #[serde(transparent)] : sérialisé exactement comme le Vec<String> interne
// ============================================================================

use serde::{Deserialize, Serialize};

/// Favoris de l'utilisateur, persistés entre les sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoritesSet {
    ids: Vec<String>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construit un set depuis une liste (les doublons sont ignorés)
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for id in ids {
            let id = id.into();
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|fav| fav == id)
    }

    /// Ajoute ou retire `id`
    ///
    /// Retourne true si le coin est favori après l'appel.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|fav| fav == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_set() {
        let mut favorites = FavoritesSet::from_ids(["bitcoin", "solana"]);
        let original = favorites.clone();

        assert!(favorites.toggle("ethereum"));
        assert!(favorites.contains("ethereum"));
        assert!(!favorites.toggle("ethereum"));
        assert_eq!(favorites, original);

        assert!(!favorites.toggle("bitcoin"));
        assert!(favorites.toggle("bitcoin"));
        assert_eq!(favorites.len(), original.len());
        assert!(favorites.contains("bitcoin"));
    }

    #[test]
    fn test_from_ids_dedups() {
        let favorites = FavoritesSet::from_ids(["btc", "eth", "btc"]);
        assert_eq!(favorites.iter().collect::<Vec<_>>(), vec!["btc", "eth"]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let favorites = FavoritesSet::from_ids(["bitcoin", "ethereum"]);
        let json = serde_json::to_string(&favorites).unwrap();
        assert_eq!(json, r#"["bitcoin","ethereum"]"#);

        let decoded: FavoritesSet = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, favorites);
    }
}

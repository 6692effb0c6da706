// ============================================================================
// Stockage local des favoris
// ============================================================================
// Un seul "slot" clé/valeur : <data_dir>/cryptoFavorites.json
// Contenu : tableau JSON des identifiants de coins
//
// Lecture tolérante : fichier absent, vide ou malformé → set vide.
// Écriture : on remplace tout le fichier à chaque modification.
// ============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::models::FavoritesSet;

/// Nom de la clé de persistance
pub const FAVORITES_KEY: &str = "cryptoFavorites";

/// Accès au fichier des favoris
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    path: PathBuf,
}

impl FavoritesStore {
    /// Store rangé dans `data_dir`
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(format!("{FAVORITES_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lit tous les favoris
    ///
    /// Ne retourne jamais d'erreur : un slot illisible donne un set vide
    /// et un warning dans les logs.
    pub fn load(&self) -> FavoritesSet {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?self.path, "No favorites file yet");
                return FavoritesSet::new();
            }
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Failed to read favorites, starting empty");
                return FavoritesSet::new();
            }
        };

        if content.trim().is_empty() {
            return FavoritesSet::new();
        }

        match serde_json::from_str::<FavoritesSet>(&content) {
            Ok(favorites) => {
                info!(count = favorites.len(), "Loaded favorites");
                favorites
            }
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Malformed favorites file, starting empty");
                FavoritesSet::new()
            }
        }
    }

    /// Écrit tous les favoris (remplace le contenu précédent)
    pub fn save(&self, favorites: &FavoritesSet) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string(favorites).context("Failed to encode favorites")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        debug!(count = favorites.len(), path = ?self.path, "Saved favorites");
        Ok(())
    }
}

//! Erreurs des appels à l'API de marché

use thiserror::Error;

/// Échec d'un appel au listing ou à l'historique
#[derive(Debug, Error)]
pub enum FetchError {
    /// Erreur réseau (connexion, timeout, TLS...)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Réponse HTTP hors 2xx
    #[error("Market API returned HTTP {status}")]
    Status { status: u16 },

    /// Corps de réponse qui ne correspond pas au JSON attendu
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Message court pour l'interface
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Request(_) => "Failed to reach the market API".to_string(),
            FetchError::Status { status } => format!("Failed to fetch data (HTTP {status})"),
            FetchError::Decode(_) => "Failed to read market data".to_string(),
        }
    }
}

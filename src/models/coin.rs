// ============================================================================
// Structure : CoinSummary
// ============================================================================
// Une ligne du listing de marché CoinGecko (/coins/markets)
//
// CONCEPTS RUST :
// 1. Serde : les noms de champs correspondent directement au JSON de l'API
// 2. Option<T> : l'API renvoie parfois null pour les variations ou le rang
// 3. deserialize_with : convertit un null numérique en 0.0
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Sparkline 7 jours renvoyée quand on demande `sparkline=true`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sparkline {
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Vec<f64>,
}

/// Snapshot immuable d'une crypto, remplacé en bloc à chaque rafraîchissement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSummary {
    /// Identifiant CoinGecko (ex: "bitcoin")
    pub id: String,

    /// Nom affiché (ex: "Bitcoin")
    pub name: String,

    /// Symbole en minuscules tel que renvoyé par l'API (ex: "btc")
    pub symbol: String,

    /// URL de l'icône (vide si absente ou null)
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub current_price: f64,

    /// Variation 1h en pourcentage
    #[serde(default, rename = "price_change_percentage_1h_in_currency")]
    pub price_change_percentage_1h: Option<f64>,

    /// Variation 24h en pourcentage
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,

    /// Variation 7j en pourcentage
    #[serde(default, rename = "price_change_percentage_7d_in_currency")]
    pub price_change_percentage_7d: Option<f64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub market_cap: f64,

    /// Volume échangé sur 24h
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_volume: f64,

    /// Rang par capitalisation (None pour les coins non classés)
    #[serde(default)]
    pub market_cap_rank: Option<u32>,

    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(default)]
    pub sparkline_in_7d: Option<Sparkline>,
}

/// Désérialise une valeur en acceptant `null` (→ valeur par défaut)
///
/// CONCEPT RUST : deserialize_with générique
/// - Serde appelle cette fonction à la place du Deserialize par défaut
/// - On lit un Option<T> puis on remplace None par T::default()
/// - Sert pour les prix (0.0), l'URL d'icône ("") et la sparkline (vide)
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl CoinSummary {
    /// Symbole en majuscules pour l'affichage
    pub fn display_symbol(&self) -> String {
        self.symbol.to_uppercase()
    }

    /// Vrai si le nom OU le symbole contient `needle_lower`
    ///
    /// `needle_lower` doit déjà être en minuscules (calculé une seule fois
    /// par le filtre plutôt qu'à chaque coin).
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.symbol.to_lowercase().contains(needle_lower)
    }

    /// Vrai si la variation 24h est positive ou nulle
    pub fn is_positive_24h(&self) -> bool {
        self.price_change_percentage_24h
            .map(|c| c >= 0.0)
            .unwrap_or(false)
    }

    /// Points de la sparkline 7j (vide si absente)
    pub fn sparkline(&self) -> &[f64] {
        self.sparkline_in_7d
            .as_ref()
            .map(|s| s.price.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Construit un coin minimal pour les tests
    pub fn coin(id: &str, name: &str, symbol: &str, rank: u32) -> CoinSummary {
        CoinSummary {
            id: id.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            image: String::new(),
            current_price: 0.0,
            price_change_percentage_1h: None,
            price_change_percentage_24h: None,
            price_change_percentage_7d: None,
            market_cap: 0.0,
            total_volume: 0.0,
            market_cap_rank: Some(rank),
            last_updated: None,
            sparkline_in_7d: None,
        }
    }

    /// Jeu de cinq coins classés 1..5
    pub fn top_five() -> Vec<CoinSummary> {
        vec![
            coin("bitcoin", "Bitcoin", "btc", 1),
            coin("ethereum", "Ethereum", "eth", 2),
            coin("tether", "Tether", "usdt", 3),
            coin("solana", "Solana", "sol", 4),
            coin("dogecoin", "Dogecoin", "doge", 5),
        ]
    }
}

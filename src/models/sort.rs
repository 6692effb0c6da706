// ============================================================================
// Tri de la table des coins
// ============================================================================
// SortKey       : colonne triable (rang, prix, 24h, market cap, volume)
// SortDirection : ascendant / descendant
// SortConfig    : clé + direction, avec bascule sur re-sélection
//
// CONCEPT RUST : sort_by est stable
// - Les égalités gardent l'ordre d'origine, dans les deux directions
// - Pour le descendant on inverse le comparateur, pas la liste
// ============================================================================

use std::cmp::Ordering;

use crate::models::CoinSummary;

/// Colonne de tri
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Rank,
    Price,
    Change24h,
    MarketCap,
    Volume,
}

impl SortKey {
    /// Valeur numérique utilisée pour comparer deux coins
    ///
    /// - Rang absent : trié en dernier (ascendant)
    /// - Variation absente : plus petite valeur possible
    fn value(&self, coin: &CoinSummary) -> f64 {
        match self {
            SortKey::Rank => coin
                .market_cap_rank
                .map(f64::from)
                .unwrap_or(f64::INFINITY),
            SortKey::Price => coin.current_price,
            SortKey::Change24h => coin
                .price_change_percentage_24h
                .unwrap_or(f64::NEG_INFINITY),
            SortKey::MarketCap => coin.market_cap,
            SortKey::Volume => coin.total_volume,
        }
    }

    /// Titre de colonne
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Rank => "#",
            SortKey::Price => "Price",
            SortKey::Change24h => "24h %",
            SortKey::MarketCap => "Market Cap",
            SortKey::Volume => "Volume (24h)",
        }
    }

    /// Clé associée aux touches 1..5
    pub fn from_digit(digit: char) -> Option<SortKey> {
        match digit {
            '1' => Some(SortKey::Rank),
            '2' => Some(SortKey::Price),
            '3' => Some(SortKey::Change24h),
            '4' => Some(SortKey::MarketCap),
            '5' => Some(SortKey::Volume),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(&self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Configuration de tri active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    /// Par rang, ascendant
    fn default() -> Self {
        Self {
            key: SortKey::Rank,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortConfig {
    /// Sélectionne une colonne
    ///
    /// - Nouvelle colonne : ascendant
    /// - Même colonne : inverse la direction
    pub fn request(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.toggled();
        } else {
            self.key = key;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Compare deux coins selon la configuration
    pub fn compare(&self, a: &CoinSummary, b: &CoinSummary) -> Ordering {
        let ordering = self
            .key
            .value(a)
            .partial_cmp(&self.key.value(b))
            .unwrap_or(Ordering::Equal);

        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Trie une liste de références en place (tri stable)
    pub fn sort(&self, coins: &mut [&CoinSummary]) {
        coins.sort_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::coin::fixtures::{coin, top_five};

    fn ids(coins: &[&CoinSummary]) -> Vec<String> {
        coins.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_request_toggles_direction() {
        let mut config = SortConfig::default();
        assert_eq!(config.key, SortKey::Rank);
        assert_eq!(config.direction, SortDirection::Ascending);

        config.request(SortKey::Price);
        assert_eq!(config.direction, SortDirection::Ascending);

        config.request(SortKey::Price);
        assert_eq!(config.direction, SortDirection::Descending);

        config.request(SortKey::Price);
        assert_eq!(config.direction, SortDirection::Ascending);

        config.request(SortKey::Volume);
        assert_eq!(config.key, SortKey::Volume);
        assert_eq!(config.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_price_ascending_then_descending_is_reverse() {
        let mut coins = top_five();
        for (coin, price) in coins.iter_mut().zip([30.0, 5.0, 1.0, 150.0, 0.2]) {
            coin.current_price = price;
        }

        let mut config = SortConfig::default();
        config.request(SortKey::Price);
        let mut ascending: Vec<&CoinSummary> = coins.iter().collect();
        config.sort(&mut ascending);
        assert_eq!(
            ids(&ascending),
            vec!["dogecoin", "tether", "ethereum", "bitcoin", "solana"]
        );

        config.request(SortKey::Price);
        let mut descending: Vec<&CoinSummary> = coins.iter().collect();
        config.sort(&mut descending);

        let mut reversed = ids(&ascending);
        reversed.reverse();
        assert_eq!(ids(&descending), reversed);
    }

    #[test]
    fn test_ties_keep_original_order() {
        let mut coins = top_five();
        for coin in coins.iter_mut() {
            coin.total_volume = 42.0;
        }

        let mut config = SortConfig::default();
        config.request(SortKey::Volume);
        let mut sorted: Vec<&CoinSummary> = coins.iter().collect();
        config.sort(&mut sorted);
        assert_eq!(
            ids(&sorted),
            vec!["bitcoin", "ethereum", "tether", "solana", "dogecoin"]
        );

        config.request(SortKey::Volume);
        let mut sorted: Vec<&CoinSummary> = coins.iter().collect();
        config.sort(&mut sorted);
        assert_eq!(
            ids(&sorted),
            vec!["bitcoin", "ethereum", "tether", "solana", "dogecoin"]
        );
    }

    #[test]
    fn test_unranked_sorts_last() {
        let mut unranked = coin("mystery", "Mystery", "mys", 0);
        unranked.market_cap_rank = None;
        let coins = vec![unranked, coin("bitcoin", "Bitcoin", "btc", 1)];

        let mut sorted: Vec<&CoinSummary> = coins.iter().collect();
        SortConfig::default().sort(&mut sorted);
        assert_eq!(ids(&sorted), vec!["bitcoin", "mystery"]);
    }

    #[test]
    fn test_from_digit() {
        assert_eq!(SortKey::from_digit('1'), Some(SortKey::Rank));
        assert_eq!(SortKey::from_digit('5'), Some(SortKey::Volume));
        assert_eq!(SortKey::from_digit('6'), None);
    }
}

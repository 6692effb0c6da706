// ============================================================================
// Structure : MarketOverview
// ============================================================================
// Résumé calculé sur les 5 premiers coins par rang :
// - capitalisation totale
// - volume 24h total
// - meilleure et pire performance sur 24h
//
// Calcul sans état, refait à chaque rendu (pas de cache).
// ============================================================================

use crate::models::{CoinSummary, SortConfig};

/// Nombre de coins pris en compte par le résumé
pub const OVERVIEW_SIZE: usize = 5;

/// Résumé du marché, emprunte les coins de la liste courante
#[derive(Debug, Clone, PartialEq)]
pub struct MarketOverview<'a> {
    /// Les coins résumés, triés par rang
    pub top_coins: Vec<&'a CoinSummary>,
    pub total_market_cap: f64,
    pub total_volume: f64,
    pub best_performer: Option<&'a CoinSummary>,
    pub worst_performer: Option<&'a CoinSummary>,
}

impl<'a> MarketOverview<'a> {
    /// Calcule le résumé, None si la liste est vide
    ///
    /// CONCEPT RUST : Lifetime 'a
    /// - Le résumé contient des références vers `coins`
    /// - Il ne peut pas survivre à la liste dont il est issu
    pub fn compute(coins: &'a [CoinSummary]) -> Option<Self> {
        if coins.is_empty() {
            return None;
        }

        let mut top_coins: Vec<&'a CoinSummary> = coins.iter().collect();
        SortConfig::default().sort(&mut top_coins);
        top_coins.truncate(OVERVIEW_SIZE);

        let total_market_cap = top_coins.iter().map(|c| c.market_cap).sum();
        let total_volume = top_coins.iter().map(|c| c.total_volume).sum();

        // Égalité : le premier rencontré gagne (comparaison stricte)
        let mut best: Option<(&'a CoinSummary, f64)> = None;
        let mut worst: Option<(&'a CoinSummary, f64)> = None;
        for &coin in &top_coins {
            let Some(change) = coin.price_change_percentage_24h else {
                continue;
            };
            if best.map_or(true, |(_, b)| change > b) {
                best = Some((coin, change));
            }
            if worst.map_or(true, |(_, w)| change < w) {
                worst = Some((coin, change));
            }
        }

        Some(Self {
            top_coins,
            total_market_cap,
            total_volume,
            best_performer: best.map(|(coin, _)| coin),
            worst_performer: worst.map(|(coin, _)| coin),
        })
    }
}

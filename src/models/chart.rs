// ============================================================================
// Historique de prix : PricePoint et ChartWindow
// ============================================================================
// ChartWindow : fenêtre de temps demandée à /coins/{id}/market_chart
// PricePoint  : un échantillon (timestamp, prix) de la série renvoyée
//
// CONCEPT RUST : Enum Copy pour une énumération fermée
// - Seules les valeurs 1/7/30/90/365 jours existent
// - Le compilateur garantit qu'on ne demande jamais une fenêtre invalide
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Un point de la série historique
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Fenêtre de temps du graphique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartWindow {
    /// 24 heures
    OneDay,
    /// 7 jours
    OneWeek,
    /// 30 jours
    OneMonth,
    /// 90 jours
    ThreeMonths,
    /// 1 an
    OneYear,
}

impl ChartWindow {
    /// Valeur du paramètre `days` de l'API
    pub fn days(&self) -> u32 {
        match self {
            ChartWindow::OneDay => 1,
            ChartWindow::OneWeek => 7,
            ChartWindow::OneMonth => 30,
            ChartWindow::ThreeMonths => 90,
            ChartWindow::OneYear => 365,
        }
    }

    /// Label court pour les onglets du graphique
    pub fn label(&self) -> &'static str {
        match self {
            ChartWindow::OneDay => "24h",
            ChartWindow::OneWeek => "7d",
            ChartWindow::OneMonth => "30d",
            ChartWindow::ThreeMonths => "90d",
            ChartWindow::OneYear => "1y",
        }
    }

    /// Format chrono des dates de l'axe X
    ///
    /// Sur 24h on affiche les heures, au-delà les jours.
    pub fn axis_format(&self) -> &'static str {
        match self {
            ChartWindow::OneDay => "%H:%M",
            ChartWindow::OneWeek | ChartWindow::OneMonth | ChartWindow::ThreeMonths => "%d/%m",
            ChartWindow::OneYear => "%m/%Y",
        }
    }

    /// Toutes les fenêtres, dans l'ordre d'affichage
    pub fn all() -> [ChartWindow; 5] {
        [
            ChartWindow::OneDay,
            ChartWindow::OneWeek,
            ChartWindow::OneMonth,
            ChartWindow::ThreeMonths,
            ChartWindow::OneYear,
        ]
    }

    /// Position dans `all()` (pour surligner l'onglet actif)
    pub fn index(&self) -> usize {
        match self {
            ChartWindow::OneDay => 0,
            ChartWindow::OneWeek => 1,
            ChartWindow::OneMonth => 2,
            ChartWindow::ThreeMonths => 3,
            ChartWindow::OneYear => 4,
        }
    }

    /// Fenêtre suivante (cycle)
    pub fn next(&self) -> ChartWindow {
        match self {
            ChartWindow::OneDay => ChartWindow::OneWeek,
            ChartWindow::OneWeek => ChartWindow::OneMonth,
            ChartWindow::OneMonth => ChartWindow::ThreeMonths,
            ChartWindow::ThreeMonths => ChartWindow::OneYear,
            ChartWindow::OneYear => ChartWindow::OneDay, // Boucle
        }
    }

    /// Fenêtre précédente (cycle)
    pub fn previous(&self) -> ChartWindow {
        match self {
            ChartWindow::OneDay => ChartWindow::OneYear, // Boucle
            ChartWindow::OneWeek => ChartWindow::OneDay,
            ChartWindow::OneMonth => ChartWindow::OneWeek,
            ChartWindow::ThreeMonths => ChartWindow::OneMonth,
            ChartWindow::OneYear => ChartWindow::ThreeMonths,
        }
    }
}

impl Default for ChartWindow {
    /// 7 jours par défaut
    fn default() -> Self {
        ChartWindow::OneWeek
    }
}

/// Bornes (min, max) des prix d'une série, None si vide
///
/// CONCEPT RUST : fold pour calculer min et max en un seul passage
pub fn price_bounds(points: &[PricePoint]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }

    Some(points.iter().fold((f64::MAX, f64::MIN), |(min, max), p| {
        (min.min(p.price), max.max(p.price))
    }))
}

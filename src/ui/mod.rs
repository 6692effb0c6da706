// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod events;    // Gestion des événements clavier
pub mod dashboard; // Routeur de rendu (chargement / erreur / dashboard)
pub mod chart;     // Graphique ligne du coin sélectionné
pub mod table;     // Table des coins et onglets
pub mod overview;  // Panneau Market Overview
pub mod format;    // Formatage des prix et montants

// Re-exports pour simplifier les imports
pub use dashboard::render;
pub use events::{Event, EventHandler};

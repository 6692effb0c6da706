// ============================================================================
// Gestion des événements
// ============================================================================
// Lit les événements clavier (crossterm) et fournit des helpers pour
// identifier chaque raccourci du dashboard
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

use crate::models::SortKey;

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (aucune touche pendant le timeout)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Lit le prochain événement (bloquant au plus `tick_rate`)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - Pas d'événement avant le timeout → Event::Tick
    /// - Seuls les KeyEventKind::Press sont remontés (pas de doublon Release)
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

// ============================================================================
// Helpers : KeyEvent → action
// ============================================================================

/// KeyCode de l'événement, None pour un Tick
fn key_code(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(key) => Some(key.code),
        Event::Tick => None,
    }
}

/// 'q' : quitter (two-step)
pub fn is_quit_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('q') | KeyCode::Char('Q')))
}

pub fn is_escape_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Esc))
}

pub fn is_enter_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Enter))
}

pub fn is_backspace_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Backspace))
}

/// Flèche haut ou 'k' (vim)
pub fn is_up_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Up | KeyCode::Char('k')))
}

/// Flèche bas ou 'j' (vim)
pub fn is_down_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Down | KeyCode::Char('j')))
}

/// '/' : ouvre la recherche
pub fn is_search_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('/')))
}

/// 'f' : favori de la ligne sous le curseur
pub fn is_favorite_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('f')))
}

/// 'F' : favori du coin sélectionné (celui du graphique)
pub fn is_selected_favorite_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('F')))
}

/// Tab : bascule All / Favorites
pub fn is_tab_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Tab | KeyCode::BackTab))
}

/// 'l' ou ']' : fenêtre de graphique suivante
pub fn is_next_window_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('l') | KeyCode::Char(']')))
}

/// 'h' ou '[' : fenêtre de graphique précédente
pub fn is_previous_window_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('h') | KeyCode::Char('[')))
}

/// 'r' : rechargement manuel du listing
pub fn is_reload_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('r') | KeyCode::Char('R')))
}

/// Touches 1..5 : colonne de tri
pub fn get_sort_key_from_event(event: &Event) -> Option<SortKey> {
    match key_code(event)? {
        KeyCode::Char(c) => SortKey::from_digit(c),
        _ => None,
    }
}

/// Caractère imprimable, pour la saisie de recherche
pub fn get_char_from_event(event: &Event) -> Option<char> {
    match key_code(event)? {
        KeyCode::Char(c) if !c.is_control() => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key(KeyCode::Char('q'))));
        assert!(!is_quit_event(&key(KeyCode::Char('a'))));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_window_keys() {
        assert!(is_next_window_event(&key(KeyCode::Char(']'))));
        assert!(is_next_window_event(&key(KeyCode::Char('l'))));
        assert!(is_previous_window_event(&key(KeyCode::Char('['))));
        assert!(!is_previous_window_event(&key(KeyCode::Char('l'))));
    }

    #[test]
    fn test_sort_keys() {
        assert_eq!(get_sort_key_from_event(&key(KeyCode::Char('3'))), Some(SortKey::Change24h));
        assert_eq!(get_sort_key_from_event(&key(KeyCode::Char('x'))), None);
        assert_eq!(get_sort_key_from_event(&key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_favorite_keys_are_case_sensitive() {
        assert!(is_favorite_event(&key(KeyCode::Char('f'))));
        assert!(!is_favorite_event(&key(KeyCode::Char('F'))));
        assert!(is_selected_favorite_event(&key(KeyCode::Char('F'))));
    }

    #[test]
    fn test_get_char() {
        assert_eq!(get_char_from_event(&key(KeyCode::Char('b'))), Some('b'));
        assert_eq!(get_char_from_event(&key(KeyCode::Up)), None);
        assert_eq!(get_char_from_event(&Event::Tick), None);
    }
}

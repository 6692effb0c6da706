// ============================================================================
// Structure : App
// ============================================================================
// Seule autorité sur l'état mutable du dashboard
//
// PATTERN "Application State" :
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// - Une seule instance, possédée par l'event loop (aucun écrivain concurrent)
//
// Les méthodes qui nécessitent un appel réseau ne le font pas elles-mêmes :
// elles retournent une requête (MarketRequest / ChartRequest) que la boucle
// transmet au worker. Le résultat revient par apply_*_result().
// ============================================================================

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::api::FetchError;
use crate::models::{ChartWindow, CoinSummary, FavoritesSet, PricePoint, SortConfig, SortKey};

// ============================================================================
// Enums d'état
// ============================================================================

/// Écran actif
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Vue principale : graphique, résumé et table
    Dashboard,

    /// Saisie du terme de recherche (les touches vont dans le buffer)
    SearchInput,
}

/// Onglet de la table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    All,
    Favorites,
}

impl Tab {
    pub fn toggled(&self) -> Tab {
        match self {
            Tab::All => Tab::Favorites,
            Tab::Favorites => Tab::All,
        }
    }
}

// ============================================================================
// Requêtes émises vers le worker
// ============================================================================
// CONCEPT : Numéro de séquence monotone
// - Chaque requête porte un numéro strictement croissant
// - Une réponse plus ancienne qu'une réponse déjà appliquée est ignorée
// - Évite qu'une réponse lente écrase des données plus récentes
// ============================================================================

/// Demande de rafraîchissement du listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketRequest {
    pub seq: u64,
}

/// Demande d'historique pour un coin et une fenêtre
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    pub seq: u64,
    pub coin_id: String,
    pub window: ChartWindow,
}

/// État du panneau graphique
#[derive(Debug, Clone, Default)]
pub struct ChartState {
    /// Fenêtre sélectionnée
    pub window: ChartWindow,

    /// Coin auquel appartiennent `points`
    pub coin_id: Option<String>,

    pub points: Vec<PricePoint>,

    pub loading: bool,

    /// Erreur affichée à la place du graphique
    pub error: Option<String>,
}

// ============================================================================
// App
// ============================================================================

/// État principal du dashboard
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    pub current_screen: Screen,

    pub tab: Tab,

    /// Dernier listing appliqué, dans l'ordre de l'API
    pub coins: Vec<CoinSummary>,

    /// Terme de recherche (nom ou symbole, insensible à la casse)
    pub search_term: String,

    pub sort: SortConfig,

    pub favorites: FavoritesSet,

    /// Position du curseur dans la liste visible
    pub cursor: usize,

    /// Un listing est en cours de chargement
    pub loading: bool,

    /// Erreur bloquante du listing (None si tout va bien)
    pub error: Option<String>,

    pub chart: ChartState,

    /// Two-step quit : première pression de 'q' → confirmation
    pub confirm_quit: bool,

    /// Message ponctuel affiché dans le footer
    pub status_message: Option<String>,

    /// Identifiant du coin sélectionné (toujours présent dans `coins`)
    selected_id: Option<String>,

    refresh_interval: Duration,
    last_refresh: Option<Instant>,

    /// Dernier numéro de listing émis / appliqué
    market_seq: u64,
    applied_market_seq: u64,

    /// Dernier numéro d'historique émis
    chart_seq: u64,
}

impl App {
    /// Crée l'état initial avec les favoris chargés au démarrage
    pub fn new(favorites: FavoritesSet, refresh_interval: Duration) -> Self {
        Self {
            running: true,
            current_screen: Screen::Dashboard,
            tab: Tab::All,
            coins: Vec::new(),
            search_term: String::new(),
            sort: SortConfig::default(),
            favorites,
            cursor: 0,
            loading: false,
            error: None,
            chart: ChartState::default(),
            confirm_quit: false,
            status_message: None,
            selected_id: None,
            refresh_interval,
            last_refresh: None,
            market_seq: 0,
            applied_market_seq: 0,
            chart_seq: 0,
        }
    }

    // ========================================================================
    // Cycle de vie
    // ========================================================================

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    // ========================================================================
    // Vues dérivées
    // ========================================================================

    /// Coins qui passent le filtre de recherche, dans l'ordre de l'API
    ///
    /// Terme vide → liste complète.
    pub fn filtered_coins(&self) -> Vec<&CoinSummary> {
        if self.search_term.is_empty() {
            return self.coins.iter().collect();
        }

        let needle = self.search_term.to_lowercase();
        self.coins
            .iter()
            .filter(|coin| coin.matches_search(&needle))
            .collect()
    }

    /// Lignes affichées dans la table : filtre + onglet + tri
    pub fn visible_coins(&self) -> Vec<&CoinSummary> {
        let mut coins = self.filtered_coins();
        if self.tab == Tab::Favorites {
            coins.retain(|coin| self.favorites.contains(&coin.id));
        }
        self.sort.sort(&mut coins);
        coins
    }

    /// Coin sous le curseur
    pub fn cursor_coin(&self) -> Option<&CoinSummary> {
        self.visible_coins().get(self.cursor).copied()
    }

    /// Coin sélectionné (celui du graphique)
    pub fn selected_coin(&self) -> Option<&CoinSummary> {
        let id = self.selected_id.as_deref()?;
        self.coins.iter().find(|coin| coin.id == id)
    }

    /// Date de mise à jour du listing (premier coin)
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.coins.first().and_then(|coin| coin.last_updated)
    }

    /// Premier chargement en cours : rien à afficher encore
    pub fn is_initial_loading(&self) -> bool {
        self.coins.is_empty() && self.error.is_none()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    // ========================================================================
    // Navigation / recherche / tri / onglets
    // ========================================================================

    pub fn navigate_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn navigate_down(&mut self) {
        let max_index = self.visible_coins().len().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(max_index);
    }

    /// Ramène le curseur dans les bornes de la liste visible
    fn clamp_cursor(&mut self) {
        let len = self.visible_coins().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Entre en mode saisie de recherche
    pub fn start_search(&mut self) {
        self.current_screen = Screen::SearchInput;
    }

    /// Valide la recherche (le terme reste actif)
    pub fn submit_search(&mut self) {
        self.current_screen = Screen::Dashboard;
    }

    /// Annule la recherche : efface le terme
    pub fn cancel_search(&mut self) {
        self.current_screen = Screen::Dashboard;
        self.set_search_term(String::new());
    }

    pub fn is_in_search_mode(&self) -> bool {
        self.current_screen == Screen::SearchInput
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.cursor = 0;
    }

    pub fn append_search_char(&mut self, c: char) {
        self.search_term.push(c);
        self.cursor = 0;
    }

    pub fn search_backspace(&mut self) {
        self.search_term.pop();
        self.cursor = 0;
    }

    /// Trie par `key` (même colonne → direction inversée)
    pub fn request_sort(&mut self, key: SortKey) {
        self.sort.request(key);
        debug!(?key, direction = ?self.sort.direction, "Sort changed");
    }

    pub fn switch_tab(&mut self) {
        self.tab = self.tab.toggled();
        self.cursor = 0;
    }

    // ========================================================================
    // Favoris
    // ========================================================================

    /// Ajoute ou retire un favori
    ///
    /// Retourne true si le coin est favori après l'appel. L'appelant doit
    /// ensuite persister `self.favorites`.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        let now_favorite = self.favorites.toggle(id);
        info!(coin = %id, favorite = now_favorite, "Favorite toggled");
        self.clamp_cursor();
        now_favorite
    }

    /// Bascule le favori de la ligne sous le curseur
    pub fn toggle_cursor_favorite(&mut self) -> Option<bool> {
        let id = self.cursor_coin()?.id.clone();
        Some(self.toggle_favorite(&id))
    }

    /// Bascule le favori du coin sélectionné
    pub fn toggle_selected_favorite(&mut self) -> Option<bool> {
        let id = self.selected_id.clone()?;
        Some(self.toggle_favorite(&id))
    }

    // ========================================================================
    // Sélection et graphique
    // ========================================================================

    /// Sélectionne un coin de la liste visible
    ///
    /// - Coin hors de la liste visible : refusé (None)
    /// - Coin déjà sélectionné : pas de nouvelle requête
    /// - Sinon : retourne la requête d'historique à lancer
    pub fn select_coin(&mut self, id: &str) -> Option<ChartRequest> {
        if !self.visible_coins().iter().any(|coin| coin.id == id) {
            warn!(coin = %id, "Refusing to select a coin outside the visible list");
            return None;
        }

        if self.selected_id.as_deref() == Some(id) {
            return None;
        }

        info!(coin = %id, "Coin selected");
        self.selected_id = Some(id.to_string());
        self.request_chart()
    }

    /// Sélectionne la ligne sous le curseur
    pub fn select_cursor(&mut self) -> Option<ChartRequest> {
        let id = self.cursor_coin()?.id.clone();
        self.select_coin(&id)
    }

    pub fn next_window(&mut self) -> Option<ChartRequest> {
        self.chart.window = self.chart.window.next();
        self.request_chart()
    }

    pub fn previous_window(&mut self) -> Option<ChartRequest> {
        self.chart.window = self.chart.window.previous();
        self.request_chart()
    }

    /// Émet une requête d'historique pour la sélection et la fenêtre courantes
    fn request_chart(&mut self) -> Option<ChartRequest> {
        let coin_id = self.selected_id.clone()?;
        self.chart_seq += 1;
        self.chart.loading = true;
        self.chart.error = None;

        Some(ChartRequest {
            seq: self.chart_seq,
            coin_id,
            window: self.chart.window,
        })
    }

    /// Applique le résultat d'une requête d'historique
    ///
    /// Seule la dernière requête émise est appliquée : si la sélection ou la
    /// fenêtre a changé entre-temps, la réponse est ignorée.
    pub fn apply_chart_result(
        &mut self,
        request: &ChartRequest,
        result: Result<Vec<PricePoint>, FetchError>,
    ) {
        if request.seq != self.chart_seq {
            debug!(seq = request.seq, latest = self.chart_seq, "Dropping stale chart response");
            return;
        }

        self.chart.loading = false;
        match result {
            Ok(points) => {
                debug!(coin = %request.coin_id, points = points.len(), "Chart data applied");
                self.chart.coin_id = Some(request.coin_id.clone());
                self.chart.points = points;
                self.chart.error = None;
            }
            Err(e) => {
                warn!(coin = %request.coin_id, error = %e, "Chart fetch failed");
                self.chart.points.clear();
                self.chart.coin_id = None;
                self.chart.error = Some(e.user_message());
            }
        }
    }

    // ========================================================================
    // Rafraîchissement du listing
    // ========================================================================

    /// Vrai si un rafraîchissement périodique est dû
    pub fn refresh_due(&self, now: Instant) -> bool {
        match self.last_refresh {
            None => true,
            Some(last) => now.duration_since(last) >= self.refresh_interval,
        }
    }

    /// Émet une requête de listing (tick du timer ou démarrage)
    pub fn begin_market_refresh(&mut self, now: Instant) -> MarketRequest {
        self.market_seq += 1;
        self.last_refresh = Some(now);
        self.loading = true;
        debug!(seq = self.market_seq, "Market refresh issued");
        MarketRequest {
            seq: self.market_seq,
        }
    }

    /// Action manuelle "reload" : efface l'erreur et relance le listing
    pub fn reload(&mut self, now: Instant) -> MarketRequest {
        info!("Manual reload requested");
        self.error = None;
        self.begin_market_refresh(now)
    }

    /// Applique le résultat d'une requête de listing
    ///
    /// - Réponse plus ancienne qu'une réponse déjà appliquée : ignorée
    /// - Succès : remplace la liste, efface l'erreur, réconcilie la sélection
    /// - Échec : positionne l'erreur, la liste n'est pas remplacée
    ///
    /// Retourne une requête d'historique si la sélection a changé.
    pub fn apply_market_result(
        &mut self,
        request: MarketRequest,
        result: Result<Vec<CoinSummary>, FetchError>,
    ) -> Option<ChartRequest> {
        if request.seq <= self.applied_market_seq {
            debug!(seq = request.seq, applied = self.applied_market_seq, "Dropping stale market response");
            return None;
        }

        self.applied_market_seq = request.seq;
        if request.seq == self.market_seq {
            self.loading = false;
        }

        match result {
            Ok(coins) => {
                info!(seq = request.seq, coins = coins.len(), "Market listing applied");
                self.coins = coins;
                self.error = None;
                self.clamp_cursor();
                self.reconcile_selection()
            }
            Err(e) => {
                warn!(seq = request.seq, error = %e, "Market fetch failed");
                self.error = Some(e.user_message());
                // L'écran d'erreur prend le clavier : la saisie en cours est validée
                if self.is_in_search_mode() {
                    self.submit_search();
                }
                None
            }
        }
    }

    /// Garde la sélection si le coin est toujours listé, sinon prend le
    /// premier coin visible (premier de la liste si rien n'est visible)
    fn reconcile_selection(&mut self) -> Option<ChartRequest> {
        let still_listed = self
            .selected_id
            .as_deref()
            .map(|id| self.coins.iter().any(|coin| coin.id == id))
            .unwrap_or(false);

        if still_listed {
            return None;
        }

        let first = self
            .visible_coins()
            .first()
            .copied()
            .or_else(|| self.coins.first())
            .map(|coin| coin.id.clone());
        self.selected_id = first.clone();
        match first {
            Some(id) => {
                debug!(coin = %id, "Selection moved to first coin");
                self.request_chart()
            }
            None => {
                self.chart = ChartState {
                    window: self.chart.window,
                    ..ChartState::default()
                };
                None
            }
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::coin::fixtures::{coin, top_five};

    fn app_with(coins: Vec<CoinSummary>) -> App {
        let mut app = App::new(FavoritesSet::new(), Duration::from_secs(60));
        let request = app.begin_market_refresh(Instant::now());
        app.apply_market_result(request, Ok(coins));
        app
    }

    fn visible_ids(app: &App) -> Vec<String> {
        app.visible_coins().iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_initial_state() {
        let app = App::new(FavoritesSet::new(), Duration::from_secs(60));
        assert!(app.is_running());
        assert!(app.is_initial_loading());
        assert!(app.selected_coin().is_none());
        assert!(app.refresh_due(Instant::now()));
    }

    #[test]
    fn test_search_single_match_case_insensitive() {
        let mut app = app_with(top_five());

        app.set_search_term("DOGE");
        assert_eq!(visible_ids(&app), vec!["dogecoin"]);

        app.set_search_term("thereu");
        assert_eq!(visible_ids(&app), vec!["ethereum"]);

        // Symbole
        app.set_search_term("Usdt");
        assert_eq!(visible_ids(&app), vec!["tether"]);

        app.set_search_term("");
        assert_eq!(app.visible_coins().len(), 5);
    }

    #[test]
    fn test_search_follows_new_listing() {
        let mut app = app_with(top_five());
        app.set_search_term("cardano");
        assert!(app.visible_coins().is_empty());

        let mut coins = top_five();
        coins.push(coin("cardano", "Cardano", "ada", 6));
        let request = app.begin_market_refresh(Instant::now());
        app.apply_market_result(request, Ok(coins));
        assert_eq!(visible_ids(&app), vec!["cardano"]);
    }

    #[test]
    fn test_first_listing_selects_first_coin() {
        let mut app = App::new(FavoritesSet::new(), Duration::from_secs(60));
        let request = app.begin_market_refresh(Instant::now());
        let chart = app.apply_market_result(request, Ok(top_five())).unwrap();

        assert_eq!(chart.coin_id, "bitcoin");
        assert_eq!(chart.window, ChartWindow::OneWeek);
        assert_eq!(app.selected_coin().unwrap().id, "bitcoin");
        assert!(app.chart.loading);
        assert!(!app.loading);
    }

    #[test]
    fn test_selection_survives_refresh() {
        let mut app = app_with(top_five());
        app.select_coin("solana").unwrap();

        let request = app.begin_market_refresh(Instant::now());
        assert!(app.apply_market_result(request, Ok(top_five())).is_none());
        assert_eq!(app.selected_coin().unwrap().id, "solana");
    }

    #[test]
    fn test_selection_moves_when_coin_disappears() {
        let mut app = app_with(top_five());
        app.select_coin("solana").unwrap();

        let coins: Vec<CoinSummary> = top_five().into_iter().filter(|c| c.id != "solana").collect();
        let request = app.begin_market_refresh(Instant::now());
        let chart = app.apply_market_result(request, Ok(coins)).unwrap();
        assert_eq!(chart.coin_id, "bitcoin");
        assert_eq!(app.selected_coin().unwrap().id, "bitcoin");

        // Liste vide : plus de sélection
        let request = app.begin_market_refresh(Instant::now());
        assert!(app.apply_market_result(request, Ok(Vec::new())).is_none());
        assert!(app.selected_coin().is_none());
    }

    #[test]
    fn test_selection_moves_to_first_visible_coin() {
        // "eth" garde Ethereum et Tether : le premier visible est Ethereum
        let mut app = app_with(top_five());
        app.select_coin("dogecoin").unwrap();
        app.set_search_term("eth");
        let coins: Vec<CoinSummary> = top_five().into_iter().filter(|c| c.id != "dogecoin").collect();
        let request = app.begin_market_refresh(Instant::now());
        let chart = app.apply_market_result(request, Ok(coins)).unwrap();
        assert_eq!(chart.coin_id, "ethereum");
        assert_eq!(app.selected_coin().unwrap().id, "ethereum");

        // Filtre sans correspondance : repli sur le premier coin de la liste
        let mut app = app_with(top_five());
        app.select_coin("solana").unwrap();
        app.set_search_term("zzz");
        let coins: Vec<CoinSummary> = top_five().into_iter().filter(|c| c.id != "solana").collect();
        let request = app.begin_market_refresh(Instant::now());
        let chart = app.apply_market_result(request, Ok(coins)).unwrap();
        assert_eq!(chart.coin_id, "bitcoin");
    }

    #[test]
    fn test_failed_fetch_leaves_search_mode() {
        let mut app = app_with(top_five());
        app.start_search();
        app.append_search_char('b');

        let request = app.begin_market_refresh(Instant::now());
        app.apply_market_result(request, Err(FetchError::Status { status: 500 }));

        assert!(app.error.is_some());
        assert!(!app.is_in_search_mode());
        assert_eq!(app.search_term, "b");
    }

    #[test]
    fn test_select_rejects_hidden_coin() {
        let mut app = app_with(top_five());
        app.set_search_term("eth");

        assert!(app.select_coin("solana").is_none());
        assert_eq!(app.selected_coin().unwrap().id, "bitcoin");

        assert!(app.select_coin("unknown").is_none());

        let request = app.select_coin("ethereum").unwrap();
        assert_eq!(request.coin_id, "ethereum");

        // Re-sélection : pas de nouvelle requête
        assert!(app.select_coin("ethereum").is_none());
    }

    #[test]
    fn test_select_cursor() {
        let mut app = app_with(top_five());
        app.navigate_down();
        app.navigate_down();
        let request = app.select_cursor().unwrap();
        assert_eq!(request.coin_id, "tether");
    }

    #[test]
    fn test_navigation_bounds() {
        let mut app = app_with(top_five());
        app.navigate_up();
        assert_eq!(app.cursor, 0);
        for _ in 0..10 {
            app.navigate_down();
        }
        assert_eq!(app.cursor, 4);
        assert_eq!(app.cursor_coin().unwrap().id, "dogecoin");
    }

    #[test]
    fn test_sort_toggle_and_reverse() {
        let mut coins = top_five();
        for (coin, price) in coins.iter_mut().zip([3.0, 1.0, 5.0, 2.0, 4.0]) {
            coin.current_price = price;
        }
        let mut app = app_with(coins);

        app.request_sort(SortKey::Price);
        let ascending = visible_ids(&app);
        assert_eq!(ascending, vec!["ethereum", "solana", "bitcoin", "dogecoin", "tether"]);

        app.request_sort(SortKey::Price);
        let mut expected = ascending.clone();
        expected.reverse();
        assert_eq!(visible_ids(&app), expected);
    }

    #[test]
    fn test_toggle_favorite_twice_restores() {
        let mut app = app_with(top_five());
        app.toggle_favorite("bitcoin");
        let before = app.favorites.clone();

        assert!(app.toggle_favorite("ethereum"));
        assert!(!app.toggle_favorite("ethereum"));
        assert_eq!(app.favorites, before);
    }

    #[test]
    fn test_favorites_tab() {
        let mut app = app_with(top_five());
        app.navigate_down();
        assert_eq!(app.toggle_cursor_favorite(), Some(true)); // ethereum
        app.toggle_favorite("dogecoin");

        app.switch_tab();
        assert_eq!(app.tab, Tab::Favorites);
        assert_eq!(visible_ids(&app), vec!["ethereum", "dogecoin"]);

        // Le filtre de recherche s'applique aussi aux favoris
        app.set_search_term("doge");
        assert_eq!(visible_ids(&app), vec!["dogecoin"]);

        // Retirer la dernière ligne garde le curseur dans les bornes
        app.set_search_term("");
        app.navigate_down();
        assert_eq!(app.toggle_cursor_favorite(), Some(false));
        assert_eq!(app.cursor, 0);
        assert_eq!(visible_ids(&app), vec!["ethereum"]);
    }

    #[test]
    fn test_toggle_selected_favorite() {
        let mut app = app_with(top_five());
        assert_eq!(app.toggle_selected_favorite(), Some(true));
        assert!(app.is_favorite("bitcoin"));
    }

    #[test]
    fn test_failed_fetch_sets_error_and_keeps_list() {
        let mut app = app_with(top_five());

        let request = app.begin_market_refresh(Instant::now());
        app.apply_market_result(request, Err(FetchError::Status { status: 500 }));

        assert!(app.error.is_some());
        assert!(!app.loading);
        assert_eq!(app.coins.len(), 5);
        assert_eq!(app.selected_coin().unwrap().id, "bitcoin");

        // Le poll suivant efface l'erreur
        let request = app.begin_market_refresh(Instant::now());
        app.apply_market_result(request, Ok(top_five()));
        assert!(app.error.is_none());
    }

    #[test]
    fn test_failed_first_fetch_is_not_initial_loading() {
        let mut app = App::new(FavoritesSet::new(), Duration::from_secs(60));
        let request = app.begin_market_refresh(Instant::now());
        app.apply_market_result(request, Err(FetchError::Status { status: 503 }));

        assert!(!app.is_initial_loading());
        assert!(app.coins.is_empty());

        let reload = app.reload(Instant::now());
        assert!(app.error.is_none());
        assert!(app.loading);
        assert_eq!(reload.seq, 2);
    }

    #[test]
    fn test_stale_market_response_is_dropped() {
        let mut app = App::new(FavoritesSet::new(), Duration::from_secs(60));
        let slow = app.begin_market_refresh(Instant::now());
        let fast = app.begin_market_refresh(Instant::now());

        let mut fresh = top_five();
        fresh.truncate(2);
        app.apply_market_result(fast, Ok(fresh));
        assert!(!app.loading);

        // La réponse lente arrive après : ignorée
        assert!(app.apply_market_result(slow, Ok(top_five())).is_none());
        assert_eq!(app.coins.len(), 2);
    }

    #[test]
    fn test_older_response_still_applies_before_newer() {
        let mut app = App::new(FavoritesSet::new(), Duration::from_secs(60));
        let first = app.begin_market_refresh(Instant::now());
        let _second = app.begin_market_refresh(Instant::now());

        app.apply_market_result(first, Ok(top_five()));
        assert_eq!(app.coins.len(), 5);
        // La seconde requête est toujours en vol
        assert!(app.loading);
    }

    #[test]
    fn test_stale_chart_response_is_dropped() {
        let mut app = app_with(top_five());
        let first = app.select_coin("ethereum").unwrap();
        let second = app.next_window().unwrap();
        assert_eq!(second.window, ChartWindow::OneMonth);

        let now = Utc::now();
        app.apply_chart_result(&first, Ok(vec![PricePoint::new(now, 1.0)]));
        assert!(app.chart.points.is_empty());
        assert!(app.chart.loading);

        app.apply_chart_result(&second, Ok(vec![PricePoint::new(now, 2.0), PricePoint::new(now, 3.0)]));
        assert_eq!(app.chart.points.len(), 2);
        assert_eq!(app.chart.coin_id.as_deref(), Some("ethereum"));
        assert!(!app.chart.loading);
    }

    #[test]
    fn test_chart_error_is_inline() {
        let mut app = app_with(top_five());
        let request = app.previous_window().unwrap();
        assert_eq!(request.window, ChartWindow::OneDay);

        app.apply_chart_result(&request, Err(FetchError::Status { status: 404 }));
        assert!(app.chart.error.is_some());
        assert!(app.error.is_none());
        assert!(!app.chart.loading);
    }

    #[test]
    fn test_refresh_timer() {
        let mut app = App::new(FavoritesSet::new(), Duration::from_secs(60));
        let start = Instant::now();
        assert!(app.refresh_due(start));

        app.begin_market_refresh(start);
        assert!(!app.refresh_due(start + Duration::from_secs(59)));
        assert!(app.refresh_due(start + Duration::from_secs(60)));
    }

    #[test]
    fn test_search_mode() {
        let mut app = app_with(top_five());
        app.start_search();
        assert!(app.is_in_search_mode());
        app.append_search_char('s');
        app.append_search_char('o');
        assert_eq!(visible_ids(&app), vec!["solana"]);
        app.search_backspace();
        app.submit_search();
        assert!(!app.is_in_search_mode());
        assert_eq!(app.search_term, "s");

        app.start_search();
        app.cancel_search();
        assert!(app.search_term.is_empty());
    }

    #[test]
    fn test_quit_two_step() {
        let mut app = App::new(FavoritesSet::new(), Duration::from_secs(60));
        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        app.cancel_quit();
        assert!(!app.is_awaiting_quit_confirmation());
        app.quit();
        assert!(!app.is_running());
    }
}

// ============================================================================
// Table des coins (onglets All / Favorites)
// ============================================================================
// Rendu pur de app.visible_coins() : aucune modification d'état ici
//
// CONCEPTS RATATUI :
// 1. Table + Row + Cell : colonnes alignées
// 2. TableState : ligne surlignée (le curseur)
// 3. Tabs : sélecteur d'onglet au-dessus de la table
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Tabs},
    Frame,
};

use crate::app::{App, Tab};
use crate::models::{CoinSummary, SortKey};
use crate::ui::format::{format_percent, format_price, format_usd, sparkline_text};

/// Titre du bloc de la table
pub const TABLE_TITLE: &str = " Coins ";

const EMPTY_ALL: &str = "No coins found. Try adjusting your search.";
const EMPTY_FAVORITES: &str = "No favorite coins yet. Press [f] on a coin to star it.";

/// Largeur de la sparkline 7j
const SPARK_WIDTH: usize = 14;

/// Dessine les onglets et la table
pub fn render_coin_table(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(TABLE_TITLE);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    render_tabs(frame, app, chunks[0]);

    let coins = app.visible_coins();
    if coins.is_empty() {
        let message = match app.tab {
            Tab::All => EMPTY_ALL,
            Tab::Favorites => EMPTY_FAVORITES,
        };
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(Color::Gray))),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, chunks[1]);
        return;
    }

    let rows: Vec<Row> = coins.iter().map(|&coin| coin_row(app, coin)).collect();

    let widths = [
        Constraint::Length(2),  // ★
        Constraint::Length(4),  // #
        Constraint::Min(18),    // Name
        Constraint::Length(14), // Price
        Constraint::Length(9),  // 24h
        Constraint::Length(20), // Market cap
        Constraint::Length(18), // Volume
        Constraint::Length(SPARK_WIDTH as u16),
    ];

    let table = Table::new(rows, widths)
        .header(header_row(app))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD));

    let mut state = TableState::default().with_selected(Some(app.cursor));
    frame.render_stateful_widget(table, chunks[1], &mut state);
}

/// Onglets "All Coins" / "Favorites (n)"
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let favorites_label = if app.favorites.is_empty() {
        "Favorites".to_string()
    } else {
        format!("Favorites ({})", app.favorites.len())
    };

    let selected = match app.tab {
        Tab::All => 0,
        Tab::Favorites => 1,
    };

    let tabs = Tabs::new(vec![Line::from("All Coins"), Line::from(favorites_label)])
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    frame.render_widget(tabs, area);
}

/// En-tête avec la flèche de tri sur la colonne active
fn header_row(app: &App) -> Row<'static> {
    let label = |key: SortKey| {
        if app.sort.key == key {
            format!("{} {}", key.label(), app.sort.direction.arrow())
        } else {
            key.label().to_string()
        }
    };

    Row::new(vec![
        Cell::from(""),
        Cell::from(label(SortKey::Rank)),
        Cell::from("Name"),
        Cell::from(label(SortKey::Price)),
        Cell::from(label(SortKey::Change24h)),
        Cell::from(label(SortKey::MarketCap)),
        Cell::from(label(SortKey::Volume)),
        Cell::from("7d"),
    ])
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
}

/// Une ligne de la table
fn coin_row<'a>(app: &App, coin: &'a CoinSummary) -> Row<'a> {
    let star = if app.is_favorite(&coin.id) {
        Span::styled("★", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("☆", Style::default().fg(Color::DarkGray))
    };

    let change_color = match coin.price_change_percentage_24h {
        Some(change) if change >= 0.0 => Color::Green,
        Some(_) => Color::Red,
        None => Color::Gray,
    };

    let rank = coin
        .market_cap_rank
        .map(|r| r.to_string())
        .unwrap_or_else(|| "-".to_string());

    let is_selected = app.selected_coin().map(|s| s.id == coin.id).unwrap_or(false);
    let name_style = if is_selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let spark_color = match coin.price_change_percentage_7d {
        Some(change) if change < 0.0 => Color::Red,
        _ => Color::Green,
    };

    Row::new(vec![
        Cell::from(star),
        Cell::from(rank),
        Cell::from(Line::from(vec![
            Span::styled(coin.name.as_str(), name_style),
            Span::styled(
                format!(" {}", coin.display_symbol()),
                Style::default().fg(Color::DarkGray),
            ),
        ])),
        Cell::from(Line::from(format_price(coin.current_price)).alignment(Alignment::Right)),
        Cell::from(
            Line::from(format_percent(coin.price_change_percentage_24h))
                .alignment(Alignment::Right),
        )
        .style(Style::default().fg(change_color)),
        Cell::from(Line::from(format_usd(coin.market_cap)).alignment(Alignment::Right)),
        Cell::from(Line::from(format_usd(coin.total_volume)).alignment(Alignment::Right)),
        Cell::from(sparkline_text(coin.sparkline(), SPARK_WIDTH))
            .style(Style::default().fg(spark_color)),
    ])
}

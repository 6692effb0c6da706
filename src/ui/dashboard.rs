// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Routeur de rendu : écran de chargement, écran d'erreur, ou dashboard
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Layout : découpage de l'espace en zones (imbriqué ici)
// 3. Block + Paragraph : header, footer, écrans plein
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::ui::{chart, overview, table};

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing par priorité
/// - Premier chargement → écran de chargement
/// - Erreur de listing → écran d'erreur bloquant (la table n'est pas dessinée)
/// - Sinon → dashboard
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.size();

    if app.is_initial_loading() {
        render_full_screen(
            frame,
            size,
            vec![Line::from(Span::styled(
                "Loading cryptocurrency data...",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))],
        );
        return;
    }

    if let Some(error) = &app.error {
        render_error_screen(frame, app, error, size);
        return;
    }

    render_dashboard(frame, app, size);
}

fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Header
            Constraint::Percentage(40), // Graphique + overview
            Constraint::Min(0),         // Table
            Constraint::Length(3),      // Footer
        ])
        .split(area);

    render_header(frame, app, chunks[0]);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(chunks[1]);

    chart::render_chart_panel(frame, app, top[0]);
    overview::render_overview(frame, app, top[1]);
    table::render_coin_table(frame, app, chunks[2]);

    match app.current_screen {
        Screen::SearchInput => render_search_footer(frame, app, chunks[3]),
        Screen::Dashboard => render_footer(frame, app, chunks[3]),
    }
}

// ============================================================================
// Header
// ============================================================================

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Coinboard ")
        .title_alignment(Alignment::Center);

    let updated = app
        .last_updated()
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut spans = vec![
        Span::styled(
            "Cryptocurrency Dashboard",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   Last updated: {}", updated),
            Style::default().fg(Color::Gray),
        ),
    ];

    if app.loading {
        spans.push(Span::styled("   ⟳ Refreshing", Style::default().fg(Color::Yellow)));
    }

    if !app.search_term.is_empty() {
        spans.push(Span::styled(
            format!("   Search: \"{}\"", app.search_term),
            Style::default().fg(Color::Cyan),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Footer
// ============================================================================

fn key_span(key: &'static str) -> Span<'static> {
    Span::styled(key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let line = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "⚠  Press ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " again to quit, any other key to cancel ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else if let Some(status) = &app.status_message {
        Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(vec![
            key_span("[q]"),
            Span::raw(" Quit  "),
            key_span("[↑↓/jk]"),
            Span::raw(" Move  "),
            key_span("[Enter]"),
            Span::raw(" Select  "),
            key_span("[/]"),
            Span::raw(" Search  "),
            key_span("[1-5]"),
            Span::raw(" Sort  "),
            key_span("[f/F]"),
            Span::raw(" Favorite  "),
            key_span("[Tab]"),
            Span::raw(" Tabs  "),
            key_span("[h/l]"),
            Span::raw(" Range  "),
            key_span("[r]"),
            Span::raw(" Reload"),
        ])
    };

    let paragraph = Paragraph::new(line).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Footer en mode recherche : la saisie remplace les raccourcis
fn render_search_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let line = Line::from(vec![
        Span::styled(
            "Search by name or symbol: ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.search_term.as_str(), Style::default().fg(Color::White)),
        Span::styled(
            "█",
            Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
        ),
        Span::raw("   "),
        Span::styled("[Enter]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(" Keep  "),
        Span::styled("[ESC]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(" Clear"),
    ]);

    let paragraph = Paragraph::new(line).block(block).alignment(Alignment::Left);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Écrans plein
// ============================================================================

fn render_error_screen(frame: &mut Frame, app: &App, error: &str, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Error",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(error.to_string()),
        Line::from(""),
        Line::from(vec![key_span("[r]"), Span::raw(" Reload   "), key_span("[q]"), Span::raw(" Quit")]),
    ];

    if app.loading {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "⟳ Retrying...",
            Style::default().fg(Color::Yellow),
        )));
    }

    if app.is_awaiting_quit_confirmation() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press [q] again to quit",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
    }

    render_full_screen(frame, area, lines);
}

/// Bloc plein écran avec texte centré verticalement
fn render_full_screen(frame: &mut Frame, area: Rect, lines: Vec<Line>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Coinboard ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let height = lines.len() as u16;
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(inner);

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, vertical[1]);
}

// ============================================================================
// Chart - Historique de prix du coin sélectionné
// ============================================================================
// Graphique ligne des PricePoint, avec les onglets de fenêtre (24h..1y)
//
// CONCEPTS RATATUI :
// 1. Chart widget : graphique ligne
// 2. Dataset : série de points (x = timestamp, y = prix)
// 3. Axis : bornes et labels des axes
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Tabs},
    Frame,
};

use crate::app::App;
use crate::models::chart::price_bounds;
use crate::models::{ChartWindow, CoinSummary, PricePoint};
use crate::ui::format::{format_percent, format_price};

/// Marge verticale autour des prix (10% de l'amplitude)
const Y_PADDING_RATIO: f64 = 0.1;

/// Dessine le panneau graphique complet
pub fn render_chart_panel(frame: &mut Frame, app: &App, area: Rect) {
    let coin = match app.selected_coin() {
        Some(coin) => coin,
        None => {
            render_message(frame, area, " Chart ", "No coin selected", Color::Gray);
            return;
        }
    };

    let star = if app.is_favorite(&coin.id) { " ★" } else { "" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" 📈 {} ({}){} ", coin.name, coin.display_symbol(), star));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Prix + variation
            Constraint::Length(1), // Onglets de fenêtre
            Constraint::Min(0),    // Graphique
        ])
        .split(inner);

    render_price_line(frame, coin, chunks[0]);
    render_window_tabs(frame, app.chart.window, chunks[1]);

    // Erreur inline : le reste du dashboard reste utilisable
    if let Some(error) = &app.chart.error {
        render_inline(
            frame,
            chunks[2],
            &format!("Error loading chart data: {}", error),
            Color::Red,
        );
        return;
    }

    let has_points = app.chart.coin_id.as_deref() == Some(coin.id.as_str())
        && !app.chart.points.is_empty();

    if app.chart.loading || !has_points {
        let message = if app.chart.loading { "Loading chart..." } else { "No chart data" };
        render_inline(frame, chunks[2], message, Color::Gray);
        return;
    }

    render_price_graph(frame, coin, &app.chart.points, app.chart.window, chunks[2]);
}

/// Ligne "Current Price: $x ↑ 1.23%"
fn render_price_line(frame: &mut Frame, coin: &CoinSummary, area: Rect) {
    let change = coin.price_change_percentage_24h;
    let (arrow, color) = match change {
        Some(c) if c >= 0.0 => ("↑", Color::Green),
        Some(_) => ("↓", Color::Red),
        None => ("", Color::Gray),
    };

    let line = Line::from(vec![
        Span::raw("Current Price: "),
        Span::styled(
            format_price(coin.current_price),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("{} {}", arrow, format_percent(change)), Style::default().fg(color)),
        Span::styled("   [F] Favorite", Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Onglets 24h / 7d / 30d / 90d / 1y
fn render_window_tabs(frame: &mut Frame, window: ChartWindow, area: Rect) {
    let titles: Vec<Line> = ChartWindow::all()
        .iter()
        .map(|w| Line::from(w.label()))
        .collect();

    let tabs = Tabs::new(titles)
        .select(window.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    frame.render_widget(tabs, area);
}

/// Dessine le graphique ligne
///
/// CONCEPT RUST : Iterator chaining
/// - .iter().map() : PricePoint → (x, y)
/// - x = timestamp en secondes, ce qui garde l'échelle de temps réelle
fn render_price_graph(
    frame: &mut Frame,
    coin: &CoinSummary,
    points: &[PricePoint],
    window: ChartWindow,
    area: Rect,
) {
    let data: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.timestamp.timestamp() as f64, p.price))
        .collect();

    let (min_price, max_price) = match price_bounds(points) {
        Some(bounds) => bounds,
        None => {
            render_inline(frame, area, "No chart data", Color::Gray);
            return;
        }
    };

    // Série plate : on ouvre quand même une bande visible
    let padding = if max_price > min_price {
        (max_price - min_price) * Y_PADDING_RATIO
    } else {
        (max_price.abs() * Y_PADDING_RATIO).max(1e-9)
    };
    let y_min = min_price - padding;
    let y_max = max_price + padding;

    let (x_min, x_max) = (data[0].0, data[data.len() - 1].0);

    let first = points[0].price;
    let last = points[points.len() - 1].price;
    let color = if last >= first { Color::Green } else { Color::Red };

    let datasets = vec![Dataset::default()
        .name(coin.display_symbol())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&data)];

    let format = window.axis_format();
    let mid = &points[points.len() / 2];
    let x_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([x_min, x_max.max(x_min + 1.0)])
        .labels(vec![
            Span::raw(points[0].timestamp.format(format).to_string()),
            Span::raw(mid.timestamp.format(format).to_string()),
            Span::raw(points[points.len() - 1].timestamp.format(format).to_string()),
        ]);

    let y_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format_price(y_min)),
            Span::raw(format_price((y_min + y_max) / 2.0)),
            Span::raw(format_price(y_max)),
        ]);

    let chart = Chart::new(datasets).x_axis(x_axis).y_axis(y_axis);
    frame.render_widget(chart, area);
}

/// Message centré dans une zone sans bordure
fn render_inline(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(color))),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Message centré dans un bloc avec titre
fn render_message(frame: &mut Frame, area: Rect, title: &str, message: &str, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title.to_string());

    let inner = block.inner(area);
    frame.render_widget(block, area);
    render_inline(frame, inner, message, color);
}

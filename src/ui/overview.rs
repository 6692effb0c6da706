// ============================================================================
// Market Overview - Résumé des 5 premiers coins
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::{CoinSummary, MarketOverview};
use crate::ui::format::{format_percent, format_usd};

/// Dessine le panneau "Market Overview"
pub fn render_overview(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Market Overview ");

    let lines = match MarketOverview::compute(&app.coins) {
        Some(overview) => overview_lines(&overview),
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Loading market data...",
                Style::default().fg(Color::Gray),
            )),
        ],
    };

    let paragraph = Paragraph::new(lines).block(block).alignment(Alignment::Left);
    frame.render_widget(paragraph, area);
}

fn overview_lines(overview: &MarketOverview) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().add_modifier(Modifier::BOLD);

    let symbols: Vec<String> = overview
        .top_coins
        .iter()
        .map(|coin| coin.display_symbol())
        .collect();

    vec![
        Line::from(vec![
            Span::styled("Total Market Cap: ", label),
            Span::styled(format_usd(overview.total_market_cap), value),
        ]),
        Line::from(vec![
            Span::styled("24h Volume:       ", label),
            Span::styled(format_usd(overview.total_volume), value),
        ]),
        Line::from(""),
        performer_line("Best 24h:  ", overview.best_performer),
        performer_line("Worst 24h: ", overview.worst_performer),
        Line::from(""),
        Line::from(vec![
            Span::styled("Top 5: ", label),
            Span::raw(symbols.join(" · ")),
        ]),
    ]
}

/// "Best 24h: SOL +8.00%" (vert si positif, rouge sinon)
fn performer_line(title: &'static str, coin: Option<&CoinSummary>) -> Line<'static> {
    let label = Span::styled(title, Style::default().fg(Color::Gray));

    match coin {
        Some(coin) => {
            let change = coin.price_change_percentage_24h;
            let color = if coin.is_positive_24h() { Color::Green } else { Color::Red };
            Line::from(vec![
                label,
                Span::styled(
                    coin.display_symbol(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(format_percent(change), Style::default().fg(color)),
            ])
        }
        None => Line::from(vec![label, Span::raw("N/A")]),
    }
}

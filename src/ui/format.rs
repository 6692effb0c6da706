// ============================================================================
// Formatage des nombres pour l'affichage
// ============================================================================

/// Caractères de la sparkline, du plus bas au plus haut
const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Formate avec séparateurs de milliers : 1234567.891 → "1,234,567.89"
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Prix en dollars : 2 décimales au-dessus de 1$, 6 en dessous
pub fn format_price(price: f64) -> String {
    let decimals = if price.abs() >= 1.0 { 2 } else { 6 };
    format!("${}", format_thousands(price, decimals))
}

/// Montant entier en dollars (market cap, volume)
pub fn format_usd(value: f64) -> String {
    format!("${}", format_thousands(value, 0))
}

/// Variation signée : "+1.23%", "-0.50%", "N/A" si absente
pub fn format_percent(change: Option<f64>) -> String {
    match change {
        Some(change) => format!("{:+.2}%", change),
        None => "N/A".to_string(),
    }
}

/// Sparkline texte de `width` caractères (rééchantillonnée)
pub fn sparkline_text(prices: &[f64], width: usize) -> String {
    if prices.is_empty() || width == 0 {
        return String::new();
    }

    let (min, max) = prices
        .iter()
        .fold((f64::MAX, f64::MIN), |(min, max), &p| (min.min(p), max.max(p)));
    let range = max - min;

    (0..width.min(prices.len()))
        .map(|i| {
            let index = i * prices.len() / width.min(prices.len());
            let price = prices[index];
            let level = if range > 0.0 {
                (((price - min) / range) * (SPARK_CHARS.len() - 1) as f64).round() as usize
            } else {
                SPARK_CHARS.len() / 2
            };
            SPARK_CHARS[level.min(SPARK_CHARS.len() - 1)]
        })
        .collect()
}

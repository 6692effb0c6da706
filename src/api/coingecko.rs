// ============================================================================
// API Client : CoinGecko
// ============================================================================
// Deux endpoints :
// - /coins/markets            : listing des N premiers coins par capitalisation
// - /coins/{id}/market_chart  : historique de prix d'un coin
//
// CONCEPTS RUST :
// 1. async/await : les appels réseau ne bloquent pas le runtime
// 2. Erreur typée (FetchError) : l'appelant distingue statut HTTP et JSON invalide
// 3. Parsing séparé du transport : decode_* se testent sans réseau
// ============================================================================

use chrono::DateTime;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use crate::api::FetchError;
use crate::config::ApiConfig;
use crate::models::{ChartWindow, CoinSummary, PricePoint};

/// Réponse de /coins/{id}/market_chart
///
/// Seul `prices` nous intéresse (market_caps et total_volumes sont ignorés).
/// Chaque entrée est une paire [timestampMillis, prix].
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(f64, f64)>,
}

/// Client de l'API de marché
///
/// CONCEPT : reqwest::Client est cloneable et partage son pool de connexions.
/// Le worker crée un seul client et le clone dans chaque tâche.
#[derive(Debug, Clone)]
pub struct MarketClient {
    http: reqwest::Client,
    base_url: String,
    vs_currency: String,
    per_page: u32,
}

impl MarketClient {
    /// Crée le client HTTP à partir de la configuration
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            vs_currency: config.vs_currency.clone(),
            per_page: config.per_page,
        })
    }

    /// URL du listing de marché
    pub fn markets_url(&self) -> String {
        format!(
            "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page=1&sparkline=true&price_change_percentage=1h,24h,7d",
            self.base_url, self.vs_currency, self.per_page
        )
    }

    /// URL de l'historique d'un coin
    pub fn market_chart_url(&self, coin_id: &str, window: ChartWindow) -> String {
        format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.base_url,
            coin_id,
            self.vs_currency,
            window.days()
        )
    }

    /// Récupère le listing des coins par capitalisation décroissante
    #[instrument(skip(self))]
    pub async fn fetch_markets(&self) -> Result<Vec<CoinSummary>, FetchError> {
        let body = self.get(&self.markets_url()).await?;
        let coins = decode_markets(&body)?;
        info!(coins = coins.len(), "Fetched market listing");
        Ok(coins)
    }

    /// Récupère l'historique de prix d'un coin sur une fenêtre
    #[instrument(skip(self), fields(days = window.days()))]
    pub async fn fetch_market_chart(
        &self,
        coin_id: &str,
        window: ChartWindow,
    ) -> Result<Vec<PricePoint>, FetchError> {
        let body = self.get(&self.market_chart_url(coin_id, window)).await?;
        let points = decode_market_chart(&body)?;
        info!(points = points.len(), "Fetched market chart");
        Ok(points)
    }

    /// GET brut : vérifie le statut et retourne le corps en texte
    ///
    /// Le JSON est décodé ensuite avec serde_json pour que FetchError
    /// distingue une erreur de transport d'un corps malformé.
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        debug!(url = %url, "Sending HTTP request");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        if !status.is_success() {
            error!(status = %status, "Market API returned error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Décode le tableau JSON du listing
pub fn decode_markets(body: &str) -> Result<Vec<CoinSummary>, FetchError> {
    let coins: Vec<CoinSummary> = serde_json::from_str(body)?;
    Ok(coins)
}

/// Décode la série `prices` de market_chart en PricePoint ordonnés
///
/// Les timestamps hors plage chrono sont ignorés (avec un warning) plutôt
/// que de faire échouer tout le graphique.
pub fn decode_market_chart(body: &str) -> Result<Vec<PricePoint>, FetchError> {
    let response: MarketChartResponse = serde_json::from_str(body)?;

    let mut skipped = 0;
    let points: Vec<PricePoint> = response
        .prices
        .into_iter()
        .filter_map(|(millis, price)| match DateTime::from_timestamp_millis(millis as i64) {
            Some(timestamp) => Some(PricePoint::new(timestamp, price)),
            None => {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        warn!(skipped, "Skipped price points with invalid timestamps");
    }

    Ok(points)
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Sert une seule réponse HTTP brute sur un port local
    ///
    /// CONCEPT : faux serveur minimal
    /// - Pas d'appel réseau réel dans les tests
    /// - Retourne l'URL de base à donner au client
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> MarketClient {
        let config = ApiConfig {
            base_url,
            ..ApiConfig::default()
        };
        MarketClient::new(&config).unwrap()
    }

    #[test]
    fn test_markets_url() {
        let client = client_for("https://api.coingecko.com/api/v3/".to_string());
        assert_eq!(
            client.markets_url(),
            "https://api.coingecko.com/api/v3/coins/markets?vs_currency=usd&order=market_cap_desc&per_page=50&page=1&sparkline=true&price_change_percentage=1h,24h,7d"
        );
    }

    #[test]
    fn test_market_chart_url() {
        let client = client_for("https://api.coingecko.com/api/v3".to_string());
        assert_eq!(
            client.market_chart_url("bitcoin", ChartWindow::OneMonth),
            "https://api.coingecko.com/api/v3/coins/bitcoin/market_chart?vs_currency=usd&days=30"
        );
    }

    #[test]
    fn test_decode_market_chart_keeps_order() {
        let body = r#"{
            "prices": [[1714600000000, 63000.5], [1714603600000, 63100.0], [1714607200000, 62950.25]],
            "market_caps": [],
            "total_volumes": []
        }"#;

        let points = decode_market_chart(body).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].price, 63000.5);
        assert_eq!(points[2].price, 62950.25);
        assert!(points[0].timestamp < points[1].timestamp);
        assert_eq!(points[0].timestamp.timestamp_millis(), 1714600000000);
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode_markets("{}"), Err(FetchError::Decode(_))));
        assert!(matches!(decode_market_chart("[]"), Err(FetchError::Decode(_))));
        assert!(matches!(
            decode_market_chart(r#"{"prices": [["x", 1.0]]}"#),
            Err(FetchError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_markets_success() {
        let base = serve_once(
            "200 OK",
            r#"[{"id":"bitcoin","symbol":"btc","name":"Bitcoin","current_price":1.5,"market_cap":10,"total_volume":2,"market_cap_rank":1}]"#,
        )
        .await;

        let coins = client_for(base).fetch_markets().await.unwrap();
        assert_eq!(coins.len(), 1);
        assert_eq!(coins[0].id, "bitcoin");
        assert_eq!(coins[0].current_price, 1.5);
    }

    #[tokio::test]
    async fn test_fetch_markets_status_error() {
        let base = serve_once("429 Too Many Requests", r#"{"status":"rate limited"}"#).await;

        let err = client_for(base).fetch_markets().await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 429 }));
    }

    #[tokio::test]
    async fn test_fetch_market_chart_malformed() {
        let base = serve_once("200 OK", r#"{"nope": true}"#).await;

        let err = client_for(base)
            .fetch_market_chart("bitcoin", ChartWindow::OneDay)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}

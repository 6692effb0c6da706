// ============================================================================
// Background Worker
// ============================================================================
// Exécute les appels réseau hors de l'event loop
//
// CONCEPTS RUST :
// 1. Thread OS + runtime tokio : l'UI reste synchrone, le réseau est async
// 2. Channels : commandes UI → worker, résultats worker → UI
// 3. tokio::spawn par commande : les requêtes se chevauchent librement,
//    l'ordre d'arrivée n'est pas garanti (App trie grâce aux numéros de séquence)
// ============================================================================

use std::sync::mpsc;
use std::thread::JoinHandle;

use anyhow::{Context, Result};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tracing::{debug, info};

use crate::api::{FetchError, MarketClient};
use crate::app::{ChartRequest, MarketRequest};
use crate::models::{CoinSummary, PricePoint};

/// Commandes envoyées au worker
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Rafraîchir le listing
    FetchMarkets(MarketRequest),

    /// Charger l'historique d'un coin
    FetchChart(ChartRequest),
}

/// Résultats renvoyés par le worker, avec la requête d'origine
#[derive(Debug)]
pub enum AppResult {
    Markets {
        request: MarketRequest,
        result: Result<Vec<CoinSummary>, FetchError>,
    },

    Chart {
        request: ChartRequest,
        result: Result<Vec<PricePoint>, FetchError>,
    },
}

/// Exécute une commande et construit le résultat correspondant
pub async fn execute(client: &MarketClient, command: AppCommand) -> AppResult {
    match command {
        AppCommand::FetchMarkets(request) => AppResult::Markets {
            request,
            result: client.fetch_markets().await,
        },
        AppCommand::FetchChart(request) => {
            let result = client
                .fetch_market_chart(&request.coin_id, request.window)
                .await;
            AppResult::Chart { request, result }
        }
    }
}

/// Lance le worker dans un thread dédié
///
/// Retourne l'émetteur de commandes. Le worker s'arrête quand cet émetteur
/// est droppé (fin de l'event loop).
pub fn spawn_background_worker(
    client: MarketClient,
    result_tx: mpsc::Sender<AppResult>,
) -> Result<(UnboundedSender<AppCommand>, JoinHandle<()>)> {
    // Runtime créé ici pour propager l'erreur au lieu de paniquer dans le thread
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    let (command_tx, mut command_rx) = unbounded_channel::<AppCommand>();

    let handle = std::thread::Builder::new()
        .name("coinboard-worker".to_string())
        .spawn(move || {
            runtime.block_on(async move {
                while let Some(command) = command_rx.recv().await {
                    info!(?command, "Worker received command");

                    let client = client.clone();
                    let result_tx = result_tx.clone();
                    tokio::spawn(async move {
                        let result = execute(&client, command).await;
                        if result_tx.send(result).is_err() {
                            debug!("Result channel closed, dropping result");
                        }
                    });
                }

                info!("Worker exiting (channel closed)");
            });
        })
        .context("Failed to spawn worker thread")?;

    Ok((command_tx, handle))
}

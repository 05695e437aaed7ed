//! Advisory oracle client and the fallback discipline around it.
//!
//! The oracle is an external reasoning service reached over HTTP. Nothing it
//! says is trusted: move answers must name a legal piece, hints must parse,
//! and every failure degrades to a local answer instead of an error.

use ludo_core::advisor::{
    accept_choice, accept_hint, local_advisor, REASON_CALL_FAILED, REASON_INVALID_ANSWER,
    REASON_NO_ORACLE,
};
use ludo_core::{AdviceRequest, Hint, MoveAdvisor, PieceId, ProgressGreedy, Tier};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::OracleConfig;

/// Trivia served when the oracle has nothing to say.
const CANNED_FUN_FACTS: [&str; 2] = [
    "Did you know? Ludo originated from an ancient Indian game called Pachisi.",
    "Ludo boards were sometimes made of cloth in the past, making them easy to transport.",
];

const FUN_FACT_PROMPT: &str = "Share one short, fun fact about the board game Ludo or its history.";

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("oracle returned an empty answer")]
    Empty,
}

/// Body of `POST /move` and `POST /hint`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OracleRequest<'a> {
    #[serde(flatten)]
    advice: &'a AdviceRequest,
    prompt: String,
}

#[derive(Serialize)]
struct PromptRequest<'a> {
    prompt: &'a str,
}

/// Thin HTTP client for the oracle endpoints.
#[derive(Clone, Debug)]
pub struct OracleClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OracleClient {
    pub fn new(config: &OracleConfig) -> Result<Self, OracleError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String, OracleError> {
        let mut request = self.http.post(format!("{}{}", self.base_url, path)).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let text = request.send().await?.error_for_status()?.text().await?;
        if text.trim().is_empty() {
            return Err(OracleError::Empty);
        }
        Ok(text)
    }

    /// Raw answer naming the piece to move.
    pub async fn choose_move(&self, advice: &AdviceRequest) -> Result<String, OracleError> {
        let body = OracleRequest {
            advice,
            prompt: advice.prompt(),
        };
        self.post("/move", &body).await
    }

    /// Raw JSON hint.
    pub async fn hint(&self, advice: &AdviceRequest) -> Result<String, OracleError> {
        let body = OracleRequest {
            advice,
            prompt: format!(
                "{}Answer with JSON: {{\"pieceId\": \"...\", \"reason\": \"...\"}}.",
                advice.prompt()
            ),
        };
        self.post("/hint", &body).await
    }

    pub async fn fun_fact(&self) -> Result<String, OracleError> {
        self.post("/fun-fact", &PromptRequest { prompt: FUN_FACT_PROMPT })
            .await
    }
}

/// Move selection and hints for the server, with or without an oracle.
#[derive(Clone, Debug, Default)]
pub struct Advisor {
    oracle: Option<OracleClient>,
}

impl Advisor {
    pub fn offline() -> Self {
        Self { oracle: None }
    }

    pub fn with_oracle(client: OracleClient) -> Self {
        Self {
            oracle: Some(client),
        }
    }

    pub fn is_online(&self) -> bool {
        self.oracle.is_some()
    }

    /// Pick a legal piece for a policy player of `tier`.
    ///
    /// Only the oracle tier waits on the network; any oracle failure or
    /// answer outside the legal set falls back to progress-greedy.
    pub async fn choose(&self, tier: Tier, request: &AdviceRequest) -> Option<PieceId> {
        if tier != Tier::Oracle {
            return local_advisor(tier).choose(request);
        }
        let Some(client) = &self.oracle else {
            debug!("no oracle configured, using progress-greedy");
            return ProgressGreedy.choose(request);
        };
        match client.choose_move(request).await {
            Ok(raw) => match accept_choice(request, &raw) {
                Some(id) => {
                    debug!(piece = %id, "oracle chose a move");
                    Some(id)
                }
                None => {
                    warn!(answer = %raw.trim(), "oracle named a piece outside the legal set");
                    ProgressGreedy.choose(request)
                }
            },
            Err(e) => {
                warn!(error = %e, "oracle move call failed");
                ProgressGreedy.choose(request)
            }
        }
    }

    /// Suggest a move for a human, with a canned reason when the oracle
    /// cannot help.
    pub async fn hint(&self, request: &AdviceRequest) -> Option<Hint> {
        let Some(client) = &self.oracle else {
            return Hint::canned(request, REASON_NO_ORACLE);
        };
        match client.hint(request).await {
            Ok(raw) => accept_hint(request, &raw).or_else(|| {
                warn!(answer = %raw.trim(), "oracle hint was unusable");
                Hint::canned(request, REASON_INVALID_ANSWER)
            }),
            Err(e) => {
                warn!(error = %e, "oracle hint call failed");
                Hint::canned(request, REASON_CALL_FAILED)
            }
        }
    }

    /// A line of trivia. Never fails.
    pub async fn fun_fact(&self) -> String {
        if let Some(client) = &self.oracle {
            match client.fun_fact().await {
                Ok(fact) => return fact.trim().to_string(),
                Err(e) => warn!(error = %e, "oracle fun fact call failed"),
            }
        }
        canned_fun_fact().to_string()
    }
}

fn canned_fun_fact() -> &'static str {
    use rand::seq::IndexedRandom;
    CANNED_FUN_FACTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(CANNED_FUN_FACTS[0])
}

//! WASM bindings for ludo-core
//!
//! Provides a JavaScript-friendly API over the turn controller.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::advisor::{local_advisor, Hint, MoveAdvisor, REASON_NO_ORACLE};
use crate::{MatchConfig, PieceId, Tier, TurnController};

/// WASM-friendly wrapper around TurnController
#[wasm_bindgen]
pub struct WasmGame {
    inner: TurnController,
    rng: SmallRng,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create an idle game. The seed drives dice rolled through `roll`.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WasmGame {
        WasmGame {
            inner: TurnController::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Start a match. Returns an error string for invalid player counts or tiers.
    pub fn initialize(&mut self, humans: usize, policies: usize, tier: &str) -> Result<(), JsValue> {
        let tier: Tier = tier.parse().map_err(|e: String| JsValue::from_str(&e))?;
        let config = MatchConfig::generated(humans, policies, tier)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.initialize(config);
        Ok(())
    }

    /// Discard the match.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Full game view as a JS object
    pub fn view(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.view()).map_err(JsValue::from)
    }

    /// Start the dice animation. Returns false if rolling is not allowed now.
    #[wasm_bindgen(js_name = beginRoll)]
    pub fn begin_roll(&mut self) -> bool {
        self.inner.begin_roll()
    }

    /// Finish a roll with a random value. Returns the value, or 0 if rejected.
    #[wasm_bindgen(js_name = completeRoll)]
    pub fn complete_roll(&mut self) -> u8 {
        use rand::Rng;
        let value = self.rng.random_range(1..=6);
        self.inner
            .complete_roll(value)
            .map_or(0, |outcome| outcome.value)
    }

    /// Move a piece by id (e.g. "RED-2"). Returns true if the move was applied.
    #[wasm_bindgen(js_name = selectMove)]
    pub fn select_move(&mut self, piece_id: &str) -> bool {
        let Ok(id) = piece_id.parse::<PieceId>() else {
            return false;
        };
        self.inner.select_move(id).is_some()
    }

    /// Hand the turn on after an empty roll or a non-six move.
    #[wasm_bindgen(js_name = advanceTurn)]
    pub fn advance_turn(&mut self) -> bool {
        self.inner.advance_turn()
    }

    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    /// Perform one automatic step for a policy player (or a pending advance).
    /// Returns false if the game is waiting on a human.
    #[wasm_bindgen(js_name = autoStep)]
    pub fn auto_step(&mut self) -> bool {
        let tier = self
            .inner
            .current_player()
            .and_then(|p| p.tier())
            .unwrap_or_default();
        self.inner
            .auto_step(&mut self.rng, local_advisor(tier))
            .is_some()
    }

    /// Offline hint for a human: the greedy choice with a canned reason.
    pub fn hint(&self) -> Result<JsValue, JsValue> {
        let hint = self.inner.advice_request().and_then(|request| {
            local_advisor(Tier::ProgressGreedy)
                .choose(&request)
                .map(|piece_id| Hint {
                    piece_id,
                    reason: REASON_NO_ORACLE.to_string(),
                })
        });
        serde_wasm_bindgen::to_value(&hint).map_err(JsValue::from)
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new(0)
    }
}

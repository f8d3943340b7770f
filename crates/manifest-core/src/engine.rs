//! Turn orchestration: from a request to a complete response.
//!
//! One call to [`ManifestationEngine::process_turn`] runs the whole
//! pipeline:
//!
//! 1. Validate the request (the only failure a caller ever sees)
//! 2. Infer intent from the conversation and the caller's prior snapshot
//! 3. Perceive lifecycle state from conversation length
//! 4. Route to domain agents and combine their plans
//! 5. Deploy the combined causal map into action sequences
//! 6. Ask the completion collaborator for narrative text, with a deadline
//!
//! Steps 2 to 5 are synchronous and deterministic apart from trigger text
//! (see [`plan`](ManifestationEngine::plan)). Step 6 is the only await
//! point; any failure there degrades to the templated fallback.

use rand::Rng;
use rust_decimal::Decimal;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use manifest_agents::{AgentCoordinator, CombinedPlan};
use manifest_types::{
    ActionSequence, AgentContext, ExtractedData, ManifestationState, ResponseSource, TurnRequest,
    TurnResponse,
};

use crate::cache::{CachedCompletion, Clock, ResponseCache, SystemClock};
use crate::completion::TextCompletion;
use crate::config::EngineConfig;
use crate::deployer::{deploy_action_plan, generate_environmental_directives};
use crate::error::{CompletionError, CoreError, ValidationError};
use crate::fallback::compose_fallback_response;
use crate::intent::{
    calculate_confidence, conversation_text, extract_from_text, predict_missing_variables,
};
use crate::prompt::{PromptContext, PromptEngine};

/// Velocity gained per conversation message.
const VELOCITY_PER_MESSAGE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Saturation weight of a real core desire.
const CORE_DESIRE_WEIGHT: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

/// Saturation weight of each other scored field.
const FIELD_WEIGHT: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

/// Saturation gained per conversation message.
const SATURATION_PER_MESSAGE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Cap on the conversation-length share of saturation.
const MAX_LENGTH_SATURATION: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

/// Messages of history included in the prompt.
const PROMPT_HISTORY: usize = 6;

/// Lifecycle view derived from conversation length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Perception {
    /// Current state.
    pub state: ManifestationState,
    /// Whether the dashboard should be shown.
    pub ready_for_dashboard: bool,
    /// `min(1, 0.15 * N)`.
    pub progress_velocity: Decimal,
}

/// State from `history_len` messages.
///
/// | N      | state           | dashboard |
/// |--------|-----------------|-----------|
/// | 0..=2  | `discovered`    | no        |
/// | 3..=4  | `active`        | no        |
/// | 5..=6  | `materializing` | yes       |
/// | 7..    | `manifested`    | yes       |
pub fn perceive(history_len: usize) -> Perception {
    let (state, ready_for_dashboard) = match history_len {
        0..=2 => (ManifestationState::Discovered, false),
        3..=4 => (ManifestationState::Active, false),
        5..=6 => (ManifestationState::Materializing, true),
        _ => (ManifestationState::Manifested, true),
    };
    Perception {
        state,
        ready_for_dashboard,
        progress_velocity: VELOCITY_PER_MESSAGE
            .saturating_mul(Decimal::from(history_len))
            .min(Decimal::ONE),
    }
}

/// How much real signal has been gathered, in `[0, 1]`.
pub fn saturation_level(data: &ExtractedData, history_len: usize) -> Decimal {
    let mut level = Decimal::ZERO;
    if data.has_core_desire() {
        level = level.saturating_add(CORE_DESIRE_WEIGHT);
    }
    for present in [
        data.has_timeframe(),
        data.has_constraints(),
        data.has_emotional_charge(),
    ] {
        if present {
            level = level.saturating_add(FIELD_WEIGHT);
        }
    }
    let length_share = SATURATION_PER_MESSAGE
        .saturating_mul(Decimal::from(history_len))
        .min(MAX_LENGTH_SATURATION);
    level.saturating_add(length_share).min(Decimal::ONE)
}

/// Everything computed for a turn before narrative text is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnPlan {
    /// Completed intent snapshot.
    pub extracted_data: ExtractedData,
    /// Fraction of informative intent fields.
    pub intent_confidence: Decimal,
    /// Lifecycle view.
    pub perception: Perception,
    /// Signal saturation.
    pub saturation_level: Decimal,
    /// Routed agent results, flattened.
    pub agent_plan: CombinedPlan,
    /// Deployed sequences over the combined causal map.
    pub action_sequences: Vec<ActionSequence>,
    /// Agent directives followed by deployment directives, deduplicated.
    pub environmental_directives: Vec<String>,
    /// Leading micro-action texts.
    pub next_actions: Vec<String>,
}

/// The top-level orchestrator.
///
/// Generic over the completion backend and the cache clock so tests can
/// script both.
#[derive(Debug)]
pub struct ManifestationEngine<C, K: Clock = SystemClock> {
    config: EngineConfig,
    coordinator: AgentCoordinator,
    prompts: PromptEngine,
    completion: CachedCompletion<C, K>,
}

impl<C: TextCompletion> ManifestationEngine<C, SystemClock> {
    /// Engine on the wall clock with templates and cache from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Template`] if configured templates cannot be loaded.
    pub fn from_config(config: EngineConfig, backend: C) -> Result<Self, CoreError> {
        let prompts = PromptEngine::from_config(&config.prompts)?;
        let cache = ResponseCache::new(config.cache.ttl(), config.cache.max_entries);
        Ok(Self::new(config, prompts, CachedCompletion::new(backend, cache)))
    }
}

impl<C: TextCompletion, K: Clock> ManifestationEngine<C, K> {
    /// Assemble an engine from its parts.
    pub const fn new(
        config: EngineConfig,
        prompts: PromptEngine,
        completion: CachedCompletion<C, K>,
    ) -> Self {
        let coordinator = AgentCoordinator::new(config.routing.secondary_confidence_threshold);
        Self {
            config,
            coordinator,
            prompts,
            completion,
        }
    }

    /// Active configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The cached completion backend.
    pub const fn completion(&self) -> &CachedCompletion<C, K> {
        &self.completion
    }

    /// Reject malformed input before any work is done.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a blank or oversized message or an
    /// oversized history.
    pub fn validate(&self, request: &TurnRequest) -> Result<(), ValidationError> {
        let limits = &self.config.engine;

        if request.user_message.trim().is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        let len = request.user_message.chars().count();
        if len > limits.max_message_chars {
            return Err(ValidationError::MessageTooLong {
                len,
                max: limits.max_message_chars,
            });
        }
        let history = request.conversation_history.len();
        if history > limits.max_history {
            return Err(ValidationError::HistoryTooLong {
                len: history,
                max: limits.max_history,
            });
        }
        Ok(())
    }

    /// Run intent inference, perception, routing and deployment.
    ///
    /// Only the dopamine trigger text of the deployed sequences reads `rng`.
    pub fn plan(&self, request: &TurnRequest, rng: &mut impl Rng) -> TurnPlan {
        let history_len = request.conversation_history.len();
        let text = format!(
            "{} {}",
            conversation_text(&request.conversation_history),
            request.user_message.to_lowercase()
        );
        let text = text.trim().to_owned();

        let implicit = extract_from_text(&text);
        let prior = request.prior_data.clone().unwrap_or_default();
        let extracted_data = predict_missing_variables(&prior, &implicit);
        let perception = perceive(history_len);

        let ctx = AgentContext {
            extracted_data: extracted_data.clone(),
            user_profile: request.user_profile.clone(),
            conversation_text: text,
            manifestation_state: perception.state,
            progress_velocity: perception.progress_velocity,
        };
        let agent_plan = self.coordinator.process_with_multiple_agents(&ctx);
        let action_sequences = deploy_action_plan(&agent_plan.dependency_graph, rng);

        let mut environmental_directives = agent_plan.environmental_directives.clone();
        for directive in generate_environmental_directives(&agent_plan.dependency_graph) {
            if !environmental_directives.contains(&directive) {
                environmental_directives.push(directive);
            }
        }

        let next_actions = agent_plan
            .micro_actions
            .iter()
            .take(self.config.engine.next_action_count)
            .map(|a| a.action.clone())
            .collect();

        debug!(
            core_desire = %extracted_data.core_desire,
            state = %perception.state,
            agents = agent_plan.results.len(),
            nodes = agent_plan.dependency_graph.len(),
            sequences = action_sequences.len(),
            "turn planned"
        );

        TurnPlan {
            intent_confidence: calculate_confidence(&extracted_data),
            saturation_level: saturation_level(&extracted_data, history_len),
            extracted_data,
            perception,
            agent_plan,
            action_sequences,
            environmental_directives,
            next_actions,
        }
    }

    /// Narrative text for the turn and where it came from.
    ///
    /// Never fails: a render error, backend error, blank answer, or missed
    /// deadline all yield the templated fallback.
    pub async fn generate_state_based_response(
        &self,
        plan: &TurnPlan,
        request: &TurnRequest,
    ) -> (String, ResponseSource) {
        let history_len = request.conversation_history.len();
        let fallback = || {
            compose_fallback_response(
                &plan.extracted_data,
                plan.perception.state,
                history_len,
                &request.user_message,
            )
        };

        let recent = request
            .conversation_history
            .get(history_len.saturating_sub(PROMPT_HISTORY)..)
            .unwrap_or_default();
        let limiting_beliefs = if plan.extracted_data.has_limiting_beliefs() {
            plan.extracted_data
                .limiting_beliefs
                .iter()
                .map(String::as_str)
                .collect()
        } else {
            Vec::new()
        };
        let ctx = PromptContext {
            core_desire: &plan.extracted_data.core_desire,
            state: plan.perception.state,
            emotional_charge: &plan.extracted_data.emotional_charge,
            limiting_beliefs,
            next_actions: &plan.next_actions,
            history: recent,
            user_message: &request.user_message,
        };

        let prompt = match self.prompts.render(&ctx) {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!(error = %e, "prompt render failed, using fallback response");
                return (fallback(), ResponseSource::Fallback);
            }
        };

        let deadline = self.config.engine.completion_timeout();
        match timeout(deadline, self.completion.complete_cached(&prompt)).await {
            Ok(Ok(completion)) => {
                let source = if completion.cached {
                    ResponseSource::Cache
                } else {
                    ResponseSource::Llm
                };
                (completion.text, source)
            }
            Ok(Err(CompletionError::NotConfigured)) => {
                debug!("no completion backend, using fallback response");
                (fallback(), ResponseSource::Fallback)
            }
            Ok(Err(e)) => {
                warn!(
                    backend = self.completion.name(),
                    error = %e,
                    "completion failed, using fallback response"
                );
                (fallback(), ResponseSource::Fallback)
            }
            Err(_) => {
                let e = CompletionError::Timeout(self.config.engine.completion_timeout_ms);
                warn!(
                    backend = self.completion.name(),
                    error = %e,
                    "completion deadline exceeded, using fallback response"
                );
                (fallback(), ResponseSource::Timeout)
            }
        }
    }

    /// Validate, plan and respond to one turn.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for malformed input; nothing else fails.
    pub async fn process_turn(
        &self,
        request: &TurnRequest,
    ) -> Result<TurnResponse, ValidationError> {
        self.reject_invalid(request)?;
        let plan = {
            let mut rng = rand::rng();
            self.plan(request, &mut rng)
        };
        Ok(self.respond(plan, request).await)
    }

    /// [`process_turn`](Self::process_turn) with an explicit random source.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for malformed input; nothing else fails.
    pub async fn process_turn_with_rng<R: Rng + Send>(
        &self,
        request: &TurnRequest,
        rng: &mut R,
    ) -> Result<TurnResponse, ValidationError> {
        self.reject_invalid(request)?;
        let plan = self.plan(request, rng);
        Ok(self.respond(plan, request).await)
    }

    fn reject_invalid(&self, request: &TurnRequest) -> Result<(), ValidationError> {
        self.validate(request).inspect_err(|e| {
            debug!(error = %e, "turn rejected");
        })
    }

    async fn respond(&self, plan: TurnPlan, request: &TurnRequest) -> TurnResponse {
        let (ai_response, source) = self.generate_state_based_response(&plan, request).await;

        info!(
            manifestation_id = ?request.manifestation_id,
            state = %plan.perception.state,
            core_desire = %plan.extracted_data.core_desire,
            saturation = %plan.saturation_level,
            source = source.as_str(),
            "turn processed"
        );

        TurnResponse {
            ai_response,
            manifestation_state: plan.perception.state,
            next_actions: plan.next_actions,
            causal_map: plan.agent_plan.dependency_graph,
            progress_velocity: plan.perception.progress_velocity,
            ready_for_dashboard: plan.perception.ready_for_dashboard,
            extracted_data: plan.extracted_data,
            saturation_level: plan.saturation_level,
            action_sequences: plan.action_sequences,
            environmental_directives: plan.environmental_directives,
            response_source: source,
            manifestation_id: request.manifestation_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    // -----------------------------------------------------------------------
    // Perception
    // -----------------------------------------------------------------------

    #[test]
    fn velocity_is_capped() {
        assert_eq!(perceive(0).progress_velocity, Decimal::ZERO);
        assert_eq!(perceive(2).progress_velocity, dec!(0.3));
        assert_eq!(perceive(6).progress_velocity, dec!(0.9));
        assert_eq!(perceive(7).progress_velocity, Decimal::ONE);
        assert_eq!(perceive(50).progress_velocity, Decimal::ONE);
    }

    #[test]
    fn state_never_goes_backwards_as_history_grows() {
        let states: Vec<ManifestationState> = (0..12).map(|n| perceive(n).state).collect();
        assert!(states.windows(2).all(|w| matches!(w, [a, b] if a <= b)));
    }

    // -----------------------------------------------------------------------
    // Saturation
    // -----------------------------------------------------------------------

    #[test]
    fn saturation_of_defaults_is_length_only() {
        let data = ExtractedData::default();
        assert_eq!(saturation_level(&data, 0), Decimal::ZERO);
        assert_eq!(saturation_level(&data, 2), dec!(0.2));
        assert_eq!(saturation_level(&data, 10), dec!(0.3));
    }

    #[test]
    fn saturation_weights_fields_and_caps() {
        let mut data = ExtractedData {
            core_desire: "optimal health".to_owned(),
            ..ExtractedData::default()
        };
        assert_eq!(saturation_level(&data, 0), dec!(0.3));

        data.timeframe = "short-term".to_owned();
        data.constraints = vec!["time".to_owned()];
        assert_eq!(saturation_level(&data, 1), dec!(0.8));

        data.emotional_charge = "high".to_owned();
        assert_eq!(saturation_level(&data, 5), Decimal::ONE);
    }

    #[test]
    fn limiting_beliefs_do_not_count_toward_saturation() {
        let data = ExtractedData {
            limiting_beliefs: vec!["it's impossible".to_owned()],
            ..ExtractedData::default()
        };
        assert_eq!(saturation_level(&data, 0), Decimal::ZERO);
    }
}

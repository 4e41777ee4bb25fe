//! Factory for building server state from configuration.

use memo_core::error::MemoResult;
use memo_core::{AppConfig, MemoRepository, SummarizationGateway};
use memo_llm::LlmFactory;
use memo_stores::create_store;

use crate::state::AppState;

/// Build the repository and summarization gateway described by `config`.
///
/// A missing LLM key leaves summarization unconfigured; requests then fail
/// with "missing credential" without any outbound call.
pub fn create_state(config: &AppConfig) -> MemoResult<AppState> {
    let store = create_store(&config.store)?;
    let repository = MemoRepository::new(store, config.locale);

    let llm = LlmFactory::from_provider_config(&config.llm)?;
    let gateway = SummarizationGateway::new(llm, config.locale);

    tracing::info!(
        store = repository.provider_name(),
        summarization = gateway.model_name().unwrap_or("disabled"),
        locale = %config.locale,
        "Server state created"
    );

    Ok(AppState::new(repository, gateway))
}

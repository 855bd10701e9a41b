mod parse;
mod prompt;

use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatMessage;

use banquet_core::state::SeatingProposal;
use banquet_core::{Guest, SuggestSettings};

fn backend_for(provider: &str) -> Result<LLMBackend, String> {
    match provider {
        "openai" => Ok(LLMBackend::OpenAI),
        "anthropic" => Ok(LLMBackend::Anthropic),
        "google" => Ok(LLMBackend::Google),
        "ollama" => Ok(LLMBackend::Ollama),
        "groq" => Ok(LLMBackend::Groq),
        "mistral" => Ok(LLMBackend::Mistral),
        "deepseek" => Ok(LLMBackend::DeepSeek),
        other => Err(format!("unknown suggestion provider: {other}")),
    }
}

/// Ask the configured LLM for a seating layout covering `guests`. Any failure
/// along the way — provider setup, the request itself, an empty reply, or a
/// response that does not parse into a valid proposal — is surfaced to the
/// caller, which must leave its own state untouched. No retry, no partial
/// result.
pub async fn propose(
    guests: &[Guest],
    settings: &SuggestSettings,
) -> Result<SeatingProposal, String> {
    let backend = backend_for(&settings.provider)?;
    let system = prompt::system_prompt();
    let user_msg = prompt::user_message(guests)?;

    eprintln!(
        "[banquet-suggest] sending {} guests to {} ({})",
        guests.len(),
        settings.provider,
        settings.model
    );

    let mut builder = LLMBuilder::new()
        .backend(backend)
        .model(&settings.model)
        .system(system.as_str());
    if !settings.api_key.is_empty() {
        builder = builder.api_key(&settings.api_key);
    }
    let llm = builder
        .build()
        .map_err(|e| format!("suggestion provider setup failed: {e}"))?;

    let request = vec![ChatMessage::user().content(user_msg.as_str()).build()];
    let response = llm
        .chat(&request)
        .await
        .map_err(|e| format!("suggestion request failed: {e}"))?;

    let raw = match response.text() {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err("suggestion provider returned an empty reply".to_string()),
    };

    let proposal = parse::parse_proposal(&raw)?;
    eprintln!(
        "[banquet-suggest] proposal: {} tables for {} guests",
        proposal.tables.len(),
        guests.len()
    );
    Ok(proposal)
}

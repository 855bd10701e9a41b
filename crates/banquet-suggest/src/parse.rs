use banquet_core::state::SeatingProposal;

/// Parse raw LLM output into a proposal. The object may arrive bare or inside
/// a fenced code block; either way the extracted text must parse cleanly into
/// the proposal schema. Any shape mismatch is an error for the whole call —
/// no best-effort recovery.
pub fn parse_proposal(raw: &str) -> Result<SeatingProposal, String> {
    let json_str = extract_json_object(raw)
        .ok_or_else(|| "no JSON object in suggestion response".to_string())?;

    let proposal: SeatingProposal = serde_json::from_str(json_str)
        .map_err(|e| format!("suggestion response did not match schema: {e}"))?;

    if proposal.tables.is_empty() {
        return Err("suggestion response proposed no tables".to_string());
    }
    let mut seen = std::collections::HashSet::new();
    for gid in proposal.assignments.values().flatten() {
        if !seen.insert(gid.as_str()) {
            return Err(format!("suggestion response seats guest {gid} more than once"));
        }
    }
    Ok(proposal)
}

/// Extract the outermost JSON object substring, skipping any fence markers or
/// prose around it.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}

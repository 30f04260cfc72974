// Shared prompt fragments.
// Each feature that needs LLM calls defines its own prompts.rs alongside it;
// this file only holds instructions used by more than one of them.

/// Instruction appended to system prompts whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Builds a system prompt from a persona line plus the JSON-only instruction.
pub fn json_system(persona: &str) -> String {
    format!("{persona} {JSON_ONLY_INSTRUCTION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_system_keeps_persona_first() {
        let system = json_system("You are an expert interview coach.");
        assert!(system.starts_with("You are an expert interview coach."));
        assert!(system.ends_with(JSON_ONLY_INSTRUCTION));
    }
}

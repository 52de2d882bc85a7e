//! Deterministic fallback text
//!
//! Used when the provider is unconfigured, over budget, failing or timing
//! out. The engine's contract is degrade-not-fail: these canned lines keep
//! the discussion loop moving, and the resulting statements carry
//! `ai_generated = false` so the display layer can tell them apart.

/// Model marker stamped on fallback statements.
pub const FALLBACK_MODEL: &str = "fallback";

/// Pick a canned response by keyword match against the composed prompt.
pub fn fallback_text(prompt: &str) -> &'static str {
    let prompt = prompt.to_lowercase();
    if prompt.contains("opening statement") {
        "Thank you for convening this meeting. The topic deserves our full \
         attention, and I look forward to a frank exchange of views."
    } else if prompt.contains("concluding statement") || prompt.contains("coming to an end") {
        "To conclude: this discussion has surfaced the essential tensions of \
         the topic. I stand by my position, and I thank the board for a \
         candid debate."
    } else {
        "An interesting point has been raised. From my experience, the matter \
         is less settled than it appears, and I would urge the board to weigh \
         the long-term consequences before deciding."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_cue_routes_to_opening_text() {
        let text = fallback_text("Please give a short opening statement about taxes.");
        assert!(text.contains("convening"));
    }

    #[test]
    fn test_closing_cue_routes_to_closing_text() {
        let text = fallback_text("Give a concluding statement for the meeting.");
        assert!(text.contains("To conclude"));
    }

    #[test]
    fn test_default_text_for_regular_turns() {
        let text = fallback_text("Round 2, speaker 1. React to the discussion.");
        assert!(text.contains("interesting point"));
    }

    #[test]
    fn test_deterministic() {
        let a = fallback_text("same prompt");
        let b = fallback_text("same prompt");
        assert_eq!(a, b);
    }
}

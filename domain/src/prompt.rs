//! Prompt composition for meeting statements
//!
//! Purely deterministic string construction: the composer never performs
//! I/O, which keeps every prompt shape unit-testable offline. The director's
//! persona prompt travels separately on the system channel of the generation
//! request; the text built here is the user-channel instruction.

use crate::director::Director;
use crate::meeting::Meeting;

/// Maximum number of prior statements included as context in a turn prompt.
pub const MAX_CONTEXT_STATEMENTS: usize = 10;

/// A transcript line annotated with its speaker, ready for prompt inclusion.
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub speaker_name: String,
    pub speaker_title: String,
    pub content: String,
}

impl TranscriptEntry {
    pub fn new(
        speaker_name: impl Into<String>,
        speaker_title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            speaker_name: speaker_name.into(),
            speaker_title: speaker_title.into(),
            content: content.into(),
        }
    }
}

/// Builds the literal prompt text sent to the text generation gateway.
pub struct PromptComposer;

impl PromptComposer {
    /// Prompt for an opening statement: a short in-character reaction to the
    /// meeting topic.
    pub fn opening(director: &Director, meeting: &Meeting) -> String {
        format!(
            r#"The meeting "{}" is starting. The topic under discussion is:

{}

As {}, give a short opening statement with your first reaction to the topic.
{}"#,
            meeting.title,
            meeting.topic,
            director.name,
            Self::length_constraint(),
        )
    }

    /// Prompt for a closing statement: summarize and conclude.
    pub fn closing(director: &Director, meeting: &Meeting, recent: &[TranscriptEntry]) -> String {
        let mut prompt = format!(
            r#"The meeting "{}" on the topic "{}" is coming to an end."#,
            meeting.title, meeting.topic,
        );

        let excerpt = Self::transcript_excerpt(recent);
        if !excerpt.is_empty() {
            prompt.push_str("\n\nThe discussion so far:\n");
            prompt.push_str(&excerpt);
        }

        prompt.push_str(&format!(
            "\n\nAs {}, give a concluding statement that sums up your position \
             and your verdict on the discussion.\n{}",
            director.name,
            Self::length_constraint(),
        ));

        prompt
    }

    /// Prompt for a regular discussion turn, grounded in the recent
    /// transcript. `recent` is chronological; only the last
    /// [`MAX_CONTEXT_STATEMENTS`] entries are included.
    pub fn turn(
        director: &Director,
        meeting: &Meeting,
        sequence_in_round: u32,
        recent: &[TranscriptEntry],
    ) -> String {
        let mut prompt = format!(
            r#"You are taking part in the meeting "{}" about:

{}

This is round {} of {}, and you are speaker number {} in this round."#,
            meeting.title,
            meeting.topic,
            meeting.current_round + 1,
            meeting.max_rounds,
            sequence_in_round,
        );

        let excerpt = Self::transcript_excerpt(recent);
        if !excerpt.is_empty() {
            prompt.push_str("\n\nRecent statements:\n");
            prompt.push_str(&excerpt);
        }

        prompt.push_str(&format!(
            "\n\nAs {}, continue the discussion. React to what was said where \
             it touches your convictions.\n{}",
            director.name,
            Self::length_constraint(),
        ));

        prompt
    }

    /// Render the tail of the transcript as `Name (Title): content` lines.
    fn transcript_excerpt(recent: &[TranscriptEntry]) -> String {
        let start = recent.len().saturating_sub(MAX_CONTEXT_STATEMENTS);
        recent[start..]
            .iter()
            .map(|e| format!("{} ({}): {}", e.speaker_name, e.speaker_title, e.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Appended to every prompt to bound output size and cost.
    fn length_constraint() -> &'static str {
        "Answer in character, in 2-4 sentences. Let your personality show."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::DiscussionMode;

    fn director() -> Director {
        Director::new("Marcus Aurelius", "Emperor", "You are Marcus Aurelius.")
    }

    fn meeting() -> Meeting {
        Meeting::new(
            "Strategy session",
            "Should we expand north?",
            DiscussionMode::RoundRobin,
            3,
            5,
        )
    }

    #[test]
    fn test_opening_mentions_topic_and_director() {
        let prompt = PromptComposer::opening(&director(), &meeting());
        assert!(prompt.contains("Should we expand north?"));
        assert!(prompt.contains("Marcus Aurelius"));
        assert!(prompt.contains("opening statement"));
        assert!(prompt.contains("2-4 sentences"));
    }

    #[test]
    fn test_turn_states_round_and_position() {
        let prompt = PromptComposer::turn(&director(), &meeting(), 2, &[]);
        assert!(prompt.contains("round 1 of 3"));
        assert!(prompt.contains("speaker number 2"));
        assert!(prompt.contains("2-4 sentences"));
        assert!(!prompt.contains("Recent statements:"));
    }

    #[test]
    fn test_turn_includes_annotated_context_in_order() {
        let recent = vec![
            TranscriptEntry::new("Ada", "Mathematician", "Numbers first."),
            TranscriptEntry::new("Sun Tzu", "Strategist", "Terrain matters."),
        ];
        let prompt = PromptComposer::turn(&director(), &meeting(), 3, &recent);
        let ada = prompt.find("Ada (Mathematician): Numbers first.").unwrap();
        let sun = prompt.find("Sun Tzu (Strategist): Terrain matters.").unwrap();
        assert!(ada < sun);
    }

    #[test]
    fn test_turn_context_is_capped_to_last_ten() {
        let recent: Vec<TranscriptEntry> = (0..15)
            .map(|i| TranscriptEntry::new("Ada", "Mathematician", format!("point {i}")))
            .collect();
        let prompt = PromptComposer::turn(&director(), &meeting(), 1, &recent);
        assert!(!prompt.contains("point 4"));
        assert!(prompt.contains("point 5"));
        assert!(prompt.contains("point 14"));
    }

    #[test]
    fn test_closing_summarizes() {
        let recent = vec![TranscriptEntry::new("Ada", "Mathematician", "Yes.")];
        let prompt = PromptComposer::closing(&director(), &meeting(), &recent);
        assert!(prompt.contains("coming to an end"));
        assert!(prompt.contains("concluding statement"));
        assert!(prompt.contains("Ada (Mathematician): Yes."));
    }
}

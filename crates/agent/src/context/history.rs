//! Bounded conversation history.
//!
//! The history is anchored by a single system turn that is never evicted.
//! Every other turn counts toward a fixed limit; once the limit is exceeded
//! the oldest non-system turn is dropped, one at a time, so the kept turns
//! stay in strict chronological order.

use std::collections::VecDeque;
use tata_core::message::Turn;

/// Non-system turns kept by default.
pub const DEFAULT_MAX_TURNS: usize = 50;

/// The built-in system prompt. `clear()` always reinstalls this text.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Tata, GlobalConnect's Talent Acquisition Team Assistant.
You help recruiters with their recruitment workflow including:
- Creating requirement profiles for job positions
- Generating job advertisements
- Creating screening templates for interviews
- Writing headhunting messages for LinkedIn outreach
- Generating candidate and funnel reports
- Reviewing job ads for improvements
- Checking content for inclusive language
- Drafting interview calendar invitations

Always be helpful, professional, and focused on recruitment tasks.
When you need information to complete a task, ask the recruiter for it.
Start by asking which position the recruiter is hiring for. Never ask for the recruiter's name.
Never invent requirements or qualifications not provided by the recruiter.";

#[derive(Debug, Clone)]
pub struct ConversationHistory {
    system: Turn,
    turns: VecDeque<Turn>,
    max_turns: usize,
}

impl ConversationHistory {
    /// A history anchored by the built-in prompt. A limit of zero is raised to one.
    pub fn new(max_turns: usize) -> Self {
        Self::with_system_prompt(DEFAULT_SYSTEM_PROMPT, max_turns)
    }

    /// A history anchored by a custom prompt. The custom prompt only lives
    /// until the first `clear()`.
    pub fn with_system_prompt(prompt: impl Into<String>, max_turns: usize) -> Self {
        let max_turns = max_turns.max(1);
        Self {
            system: Turn::system(prompt),
            turns: VecDeque::with_capacity(max_turns.min(DEFAULT_MAX_TURNS)),
            max_turns,
        }
    }

    /// Append a turn, then drop the oldest non-system turn while over the limit.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push_back(turn);
        while self.turns.len() > self.max_turns {
            self.turns.pop_front();
        }
    }

    /// An independent copy of every turn, system turn first.
    pub fn messages(&self) -> Vec<Turn> {
        std::iter::once(&self.system)
            .chain(self.turns.iter())
            .cloned()
            .collect()
    }

    /// Forget everything and reinstall the built-in system prompt.
    pub fn clear(&mut self) {
        self.turns.clear();
        self.system = Turn::system(DEFAULT_SYSTEM_PROMPT);
    }

    pub fn system_prompt(&self) -> &str {
        self.system.text()
    }

    /// Number of turns including the system turn.
    pub fn message_count(&self) -> usize {
        self.turns.len() + 1
    }

    /// Number of non-system turns.
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    pub fn last(&self) -> &Turn {
        self.turns.back().unwrap_or(&self.system)
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tata_core::message::{Role, TaskInvocation};

    #[test]
    fn starts_with_system_turn_only() {
        let history = ConversationHistory::default();
        let messages = history.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].text().starts_with("You are Tata"));
    }

    #[test]
    fn truncation_drops_oldest_non_system_turn() {
        let mut history = ConversationHistory::new(3);
        for i in 1..=4 {
            history.append(Turn::user(format!("message {i}")));
        }

        let messages = history.messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].text(), "message 2");
        assert_eq!(messages[3].text(), "message 4");
    }

    #[test]
    fn default_limit_keeps_fifty_turns() {
        let mut history = ConversationHistory::default();
        for i in 0..=DEFAULT_MAX_TURNS {
            history.append(Turn::user(format!("m{i}")));
        }
        let messages = history.messages();
        assert_eq!(messages.len(), DEFAULT_MAX_TURNS + 1);
        assert_eq!(messages[1].text(), "m1");
    }

    #[test]
    fn truncation_keeps_chronological_order_across_roles() {
        let mut history = ConversationHistory::new(2);
        history.append(Turn::user("hi"));
        history.append(Turn::invocations(vec![TaskInvocation::new(
            "call_1",
            "review_job_ad",
            "{}",
        )]));
        history.append(Turn::task_result("call_1", "review_job_ad", "{}"));

        let roles: Vec<Role> = history.messages().iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::System, Role::Assistant, Role::TaskResult]);
    }

    #[test]
    fn messages_is_an_independent_copy() {
        let mut history = ConversationHistory::default();
        history.append(Turn::user("original"));

        let mut copy = history.messages();
        copy[1].content = Some("tampered".into());
        copy.push(Turn::user("extra"));

        assert_eq!(history.messages()[1].text(), "original");
        assert_eq!(history.message_count(), 2);
    }

    #[test]
    fn clear_restores_built_in_prompt() {
        let mut history = ConversationHistory::with_system_prompt("Custom prompt", 10);
        history.append(Turn::user("hello"));
        assert_eq!(history.system_prompt(), "Custom prompt");

        history.clear();
        let messages = history.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(history.system_prompt(), DEFAULT_SYSTEM_PROMPT);

        history.clear();
        assert_eq!(history.message_count(), 1);
    }

    #[test]
    fn zero_limit_is_raised_to_one() {
        let mut history = ConversationHistory::new(0);
        history.append(Turn::user("a"));
        history.append(Turn::user("b"));
        assert_eq!(history.max_turns(), 1);
        assert_eq!(history.last().text(), "b");
        assert_eq!(history.message_count(), 2);
    }

    #[test]
    fn unbounded_limit_does_not_reserve_the_window() {
        let mut history = ConversationHistory::new(usize::MAX);
        for i in 0..3 {
            history.append(Turn::user(format!("m{i}")));
        }
        assert_eq!(history.max_turns(), usize::MAX);
        assert_eq!(history.message_count(), 4);
        assert_eq!(history.messages()[1].text(), "m0");
    }

    #[test]
    fn built_in_prompt_asks_for_the_position_not_the_recruiter() {
        assert!(DEFAULT_SYSTEM_PROMPT.contains("which position the recruiter is hiring for"));
        assert!(DEFAULT_SYSTEM_PROMPT.contains("Never ask for the recruiter's name."));
    }
}

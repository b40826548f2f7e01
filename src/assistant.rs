//! Scripted console assistant.
//!
//! Replies are fixed scripts keyed on input substrings — an explicit rule
//! table, not inference. The engine scans rules in registration order and
//! the first keyword hit wins; anything else gets the fallback reply.

use serde::Serialize;

use crate::error::CoreError;
use crate::state::AppState;
use crate::types::{AssistantAction, ChatMessage, ChatSender};
use crate::util::validate_bounded_string;

/// Reply used when no rule matches.
pub const FALLBACK_REPLY: &str =
    "I'm sorry, I can only provide information about the NexusTech account margin right now.";

const MARGIN_REPLY: &str = "The margin on \"NexusTech\" has dipped by 3% over the last 7 days. \
     This is caused by high freelance utilization due to an increased number of revisions.";

const SHOW_DETAILS_REPLY: &str = "Okay, I've navigated you to the Work & SLAs view.";

const OPTIMIZE_SPEND_REPLY: &str = "I've flagged the account for a budget review and paused \
     non-essential freelance spend. This should improve the health score.";

/// The client whose health the optimize-spend script adjusts.
const OPTIMIZE_SPEND_CLIENT: &str = "NexusTech";
const OPTIMIZE_SPEND_HEALTH_BONUS: u32 = 15;

/// One scripted response: keyword substrings, a canned reply, and the
/// follow-up actions offered with it.
#[derive(Debug, Clone)]
pub struct AssistantRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub response: &'static str,
    pub actions: &'static [AssistantAction],
}

impl AssistantRule {
    fn matches(&self, input_lower: &str) -> bool {
        self.keywords.iter().any(|kw| input_lower.contains(kw))
    }
}

/// Rule registry. Order is significant: the first matching rule wins.
#[derive(Default)]
pub struct AssistantEngine {
    rules: Vec<AssistantRule>,
}

impl AssistantEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rule set the console ships with.
    pub fn with_default_rules() -> Self {
        let mut engine = Self::new();
        engine.register(AssistantRule {
            name: "nexustech_margin",
            keywords: &["nexustech", "margin"],
            response: MARGIN_REPLY,
            actions: &[AssistantAction::ShowDetails, AssistantAction::OptimizeSpend],
        });
        engine
    }

    pub fn register(&mut self, rule: AssistantRule) {
        self.rules.push(rule);
    }

    /// Scripted reply for an input: first matching rule, else the fallback.
    pub fn respond(&self, input: &str) -> (&'static str, Vec<AssistantAction>) {
        let input_lower = input.to_lowercase();
        for rule in &self.rules {
            if rule.matches(&input_lower) {
                log::debug!("assistant rule '{}' matched", rule.name);
                return (rule.response, rule.actions.to_vec());
            }
        }
        (FALLBACK_REPLY, Vec::new())
    }
}

/// Side effect an assistant action asks the presentation layer to perform.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "camelCase")]
pub enum AssistantEffect {
    /// Switch the console to the named view.
    Navigate { view: String },
    /// The action completed inside the core; nothing for the shell to do.
    None,
}

/// Append a user message and the scripted reply to the chat history.
/// Returns the assistant's reply. Reply latency is a presentation concern;
/// the core answers synchronously.
pub fn submit(
    state: &AppState,
    engine: &AssistantEngine,
    input: &str,
) -> Result<ChatMessage, CoreError> {
    let text = validate_bounded_string(input, "message", 1, 500)?;
    let (response, actions) = engine.respond(&text);

    let mut chat = state.chat.lock().map_err(|_| CoreError::LockPoisoned)?;
    chat.push(ChatMessage {
        id: state.allocate_id(),
        sender: ChatSender::User,
        text,
        actions: Vec::new(),
    });
    let reply = ChatMessage {
        id: state.allocate_id(),
        sender: ChatSender::Assistant,
        text: response.to_string(),
        actions,
    };
    chat.push(reply.clone());
    Ok(reply)
}

/// Perform one of the follow-up actions offered by a scripted reply.
pub fn apply_action(
    state: &AppState,
    action: AssistantAction,
) -> Result<AssistantEffect, CoreError> {
    match action {
        AssistantAction::ShowDetails => {
            let mut chat = state.chat.lock().map_err(|_| CoreError::LockPoisoned)?;
            chat.push(ChatMessage {
                id: state.allocate_id(),
                sender: ChatSender::Assistant,
                text: SHOW_DETAILS_REPLY.to_string(),
                actions: Vec::new(),
            });
            Ok(AssistantEffect::Navigate {
                view: "work".to_string(),
            })
        }
        AssistantAction::OptimizeSpend => {
            // Retire the offer so it can't be applied twice from the same reply.
            {
                let mut chat = state.chat.lock().map_err(|_| CoreError::LockPoisoned)?;
                if let Some(last_offer) = chat
                    .iter_mut()
                    .rev()
                    .find(|m| m.sender == ChatSender::Assistant && !m.actions.is_empty())
                {
                    last_offer.actions.clear();
                }
                chat.push(ChatMessage {
                    id: state.allocate_id(),
                    sender: ChatSender::Assistant,
                    text: OPTIMIZE_SPEND_REPLY.to_string(),
                    actions: Vec::new(),
                });
            }

            let mut clients = state.clients.lock().map_err(|_| CoreError::LockPoisoned)?;
            if let Some(client) = clients.iter_mut().find(|c| c.name == OPTIMIZE_SPEND_CLIENT) {
                client.health = (client.health + OPTIMIZE_SPEND_HEALTH_BONUS).min(100);
                log::info!(
                    "optimize-spend raised {} health to {}",
                    client.name,
                    client.health
                );
            }
            Ok(AssistantEffect::None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn seeded_state() -> AppState {
        AppState::new(
            Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0)
                .single()
                .expect("UTC datetime is always unambiguous"),
        )
    }

    #[test]
    fn margin_keyword_matches_case_insensitively() {
        let engine = AssistantEngine::with_default_rules();
        let (reply, actions) = engine.respond("What happened to our MARGIN this week?");
        assert_eq!(reply, MARGIN_REPLY);
        assert_eq!(
            actions,
            vec![AssistantAction::ShowDetails, AssistantAction::OptimizeSpend]
        );
    }

    #[test]
    fn client_name_keyword_matches_too() {
        let engine = AssistantEngine::with_default_rules();
        let (reply, _) = engine.respond("Is NexusTech doing okay?");
        assert_eq!(reply, MARGIN_REPLY);
    }

    #[test]
    fn unmatched_input_gets_fallback_without_actions() {
        let engine = AssistantEngine::with_default_rules();
        let (reply, actions) = engine.respond("What's for lunch?");
        assert_eq!(reply, FALLBACK_REPLY);
        assert!(actions.is_empty());
    }

    #[test]
    fn first_registered_rule_wins() {
        let mut engine = AssistantEngine::new();
        engine.register(AssistantRule {
            name: "first",
            keywords: &["capacity"],
            response: "first",
            actions: &[],
        });
        engine.register(AssistantRule {
            name: "second",
            keywords: &["capacity"],
            response: "second",
            actions: &[],
        });
        let (reply, _) = engine.respond("how is capacity?");
        assert_eq!(reply, "first");
    }

    #[test]
    fn submit_appends_user_and_reply_messages() {
        let state = seeded_state();
        let engine = AssistantEngine::with_default_rules();
        let before = state.chat_snapshot().len();

        let reply = submit(&state, &engine, "margin update please").unwrap();
        assert_eq!(reply.sender, ChatSender::Assistant);
        assert!(!reply.actions.is_empty());

        let chat = state.chat_snapshot();
        assert_eq!(chat.len(), before + 2);
        assert_eq!(chat[chat.len() - 2].sender, ChatSender::User);
        assert_eq!(chat[chat.len() - 1].text, MARGIN_REPLY);
    }

    #[test]
    fn submit_rejects_blank_input() {
        let state = seeded_state();
        let engine = AssistantEngine::with_default_rules();
        let err = submit(&state, &engine, "   ").unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "message", .. }));
        // Nothing was appended.
        assert_eq!(state.chat_snapshot().len(), 2);
    }

    #[test]
    fn show_details_navigates_to_work_view() {
        let state = seeded_state();
        let effect = apply_action(&state, AssistantAction::ShowDetails).unwrap();
        assert_eq!(
            effect,
            AssistantEffect::Navigate {
                view: "work".to_string()
            }
        );
        let chat = state.chat_snapshot();
        assert_eq!(chat.last().unwrap().text, SHOW_DETAILS_REPLY);
    }

    #[test]
    fn optimize_spend_bumps_health_and_retires_the_offer() {
        let state = seeded_state();
        let before = state
            .clients_snapshot()
            .iter()
            .find(|c| c.name == "NexusTech")
            .unwrap()
            .health;

        let effect = apply_action(&state, AssistantAction::OptimizeSpend).unwrap();
        assert_eq!(effect, AssistantEffect::None);

        let clients = state.clients_snapshot();
        let nexus = clients.iter().find(|c| c.name == "NexusTech").unwrap();
        assert_eq!(nexus.health, before + 15);

        // The offering reply's action buttons are gone everywhere.
        let chat = state.chat_snapshot();
        assert!(chat
            .iter()
            .filter(|m| m.sender == ChatSender::Assistant)
            .all(|m| m.actions.is_empty()));
        assert_eq!(chat.last().unwrap().text, OPTIMIZE_SPEND_REPLY);
    }

    #[test]
    fn optimize_spend_health_caps_at_one_hundred() {
        let state = seeded_state();
        if let Ok(mut clients) = state.clients.lock() {
            if let Some(nexus) = clients.iter_mut().find(|c| c.name == "NexusTech") {
                nexus.health = 95;
            }
        }
        apply_action(&state, AssistantAction::OptimizeSpend).unwrap();
        let clients = state.clients_snapshot();
        let nexus = clients.iter().find(|c| c.name == "NexusTech").unwrap();
        assert_eq!(nexus.health, 100);
    }
}

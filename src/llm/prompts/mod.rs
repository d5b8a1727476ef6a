// ABOUTME: Prompt assembly for conversational replies
// ABOUTME: Combines the coach system prompt, profile summary, recent turns and the user message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! The system prompt is loaded at compile time from `coach_system.md`.

use super::{ChatMessage, CompletionRequest};
use atlas_core::constants::llm::MAX_TOKENS;
use atlas_core::models::{CatalogItem, ConversationTurn, UserProfile};
use atlas_intelligence::Challenge;
use std::fmt::Write as _;

/// Coach persona and ground rules
pub const COACH_SYSTEM_PROMPT: &str = include_str!("coach_system.md");

/// Sampling temperature for chit-chat
const CHAT_TEMPERATURE: f32 = 0.7;

/// What the reply should cover
#[derive(Debug, Clone, Copy)]
pub enum PromptKind<'a> {
    /// Greetings, thanks and other chit-chat
    SmallTalk,
    /// Anything the classifier could not place
    Open,
    /// How to perform a catalog exercise
    Explain(&'a CatalogItem),
    /// Cooking steps for a catalog meal
    Recipe {
        /// Meal to cook
        item: &'a CatalogItem,
        /// Nutritional angle for the user's goals
        diet_focus: &'a str,
    },
    /// Push back on a skipped exercise or food
    Intervention(&'a Challenge),
}

/// Coach stance when the user wants to skip something
const INTERVENTION_RULES: &str = "\nThe user wants to skip something. Reply in four short parts: \
    acknowledge that it feels hard; explain plainly why it matters for their goal; \
    offer one small challenge for today such as two sets or half a portion; \
    end with an encouraging question. Say \"we\", not \"you should\". \
    Do not lecture and do not shame.";

fn intervention_context(challenge: &Challenge) -> String {
    let mut out = format!(
        "\nGoal: {}. Wants to avoid: {}.",
        challenge.goal.as_str().replace('-', " "),
        challenge.avoided.join(", ")
    );
    if challenge.targets_key_practice() {
        let _ = write!(
            out,
            " {} is central to this goal, so hold the line kindly.",
            challenge.key_targets.join(", ")
        );
    } else if !challenge.key_practices.is_empty() {
        let _ = write!(
            out,
            " It is fine to swap it, as long as these stay: {}.",
            challenge.key_practices.join(", ")
        );
    }
    out
}

/// Short factual profile summary appended to the system prompt
#[must_use]
pub fn profile_summary(profile: &UserProfile) -> String {
    let mut out = format!(
        "User profile: name {}, {} level",
        profile.name,
        profile.fitness_level.as_str()
    );
    if !profile.goals.is_empty() {
        let goals: Vec<&str> = profile.goals.iter().map(|g| g.as_str()).collect();
        let _ = write!(out, ", goals: {}", goals.join(", "));
    }
    if let Some(age) = profile.age {
        let _ = write!(out, ", age {age}");
    }
    if !profile.medical_conditions.is_empty() {
        let conditions: Vec<&str> = profile.medical_conditions.iter().map(String::as_str).collect();
        let _ = write!(out, ", conditions to respect: {}", conditions.join(", "));
    }
    out.push('.');
    out
}

/// Build the completion request for a conversational reply
#[must_use]
pub fn build_request(
    kind: PromptKind<'_>,
    profile: &UserProfile,
    history: &[ConversationTurn],
    user_text: &str,
) -> CompletionRequest {
    let mut system = format!("{COACH_SYSTEM_PROMPT}\n{}", profile_summary(profile));
    match kind {
        PromptKind::SmallTalk => system.push_str("\nReply briefly and warmly."),
        PromptKind::Open => system.push_str(
            "\nIf the message is unrelated to fitness or nutrition, say so politely and steer back.",
        ),
        PromptKind::Explain(item) => {
            let _ = write!(
                system,
                "\nExplain how to perform {} safely: setup, movement, one common mistake. \
                 Reference notes: {}",
                item.name, item.description
            );
        }
        PromptKind::Recipe { item, diet_focus } => {
            let _ = write!(
                system,
                "\nGive a simple recipe for {} with an ingredient list and numbered steps. \
                 Keep it {diet_focus}. Reference notes: {}",
                item.name, item.description
            );
            if let Some(m) = item.macros {
                let _ = write!(
                    system,
                    " Per serving: {:.0} kcal, {:.0} g protein.",
                    m.calories, m.protein_g
                );
            }
        }
        PromptKind::Intervention(challenge) => {
            system.push_str(INTERVENTION_RULES);
            system.push_str(&intervention_context(challenge));
        }
    }

    let mut messages = vec![ChatMessage::system(system)];
    for turn in history {
        messages.push(ChatMessage::user(turn.text.clone()));
        messages.push(ChatMessage::assistant(turn.response.clone()));
    }
    messages.push(ChatMessage::user(user_text));

    CompletionRequest::new(messages)
        .with_temperature(CHAT_TEMPERATURE)
        .with_max_tokens(MAX_TOKENS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MessageRole;
    use atlas_core::models::{FitnessLevel, Goal};
    use uuid::Uuid;

    #[test]
    fn test_request_layout() {
        let profile =
            UserProfile::new(Uuid::new_v4(), "Sam", FitnessLevel::Beginner).with_goal(Goal::Strength);
        let request = build_request(PromptKind::SmallTalk, &profile, &[], "hello");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert!(request.messages[0].content.contains("goals: strength"));
        assert_eq!(request.messages[1].content, "hello");
    }

    #[test]
    fn test_intervention_prompt_names_key_practice() {
        let profile = UserProfile::new(Uuid::new_v4(), "Sam", FitnessLevel::Beginner)
            .with_goal(Goal::WeightLoss);
        let challenge = Challenge {
            goal: Goal::WeightLoss,
            avoided: vec!["Burpee".to_owned()],
            key_targets: vec!["Burpee".to_owned()],
            key_practices: vec!["Burpee".to_owned(), "hiit".to_owned()],
        };
        let request = build_request(
            PromptKind::Intervention(&challenge),
            &profile,
            &[],
            "burpees are too hard",
        );
        let system = &request.messages[0].content;
        assert!(system.contains("Say \"we\""));
        assert!(system.contains("Burpee is central to this goal"));
    }
}

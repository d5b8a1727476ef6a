// ABOUTME: Fixed phrase tables for polarity cues, request verbs, and intent keywords
// ABOUTME: All phrases are stored in normalised form (lowercase, single spaces)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use atlas_core::models::{Feedback, FeedbackStrength, ItemCategory, MetricKind, Polarity};

/// What a cue phrase does to the mentions that follow it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueEffect {
    /// Attach this feedback
    Feedback(Feedback),
    /// Request phrase: following mentions carry no feedback
    Reset,
}

const fn cue(polarity: Polarity, strength: FeedbackStrength) -> CueEffect {
    CueEffect::Feedback(Feedback { polarity, strength })
}

const STRONG_LIKE: CueEffect = cue(Polarity::Positive, FeedbackStrength::Strong);
const MILD_LIKE: CueEffect = cue(Polarity::Positive, FeedbackStrength::Mild);
const STRONG_DISLIKE: CueEffect = cue(Polarity::Negative, FeedbackStrength::Strong);
const MILD_DISLIKE: CueEffect = cue(Polarity::Negative, FeedbackStrength::Mild);

// ============================================================================
// Polarity cues
// ============================================================================

/// Cue phrases; overlapping matches resolve to the longest phrase
pub const CUES: &[(&str, CueEffect)] = &[
    ("love", STRONG_LIKE),
    ("adore", STRONG_LIKE),
    ("really like", STRONG_LIKE),
    ("like", MILD_LIKE),
    ("enjoy", MILD_LIKE),
    ("prefer", MILD_LIKE),
    ("fan of", MILD_LIKE),
    ("don't like", STRONG_DISLIKE),
    ("dont like", STRONG_DISLIKE),
    ("do not like", STRONG_DISLIKE),
    ("don't want", STRONG_DISLIKE),
    ("dont want", STRONG_DISLIKE),
    ("dislike", STRONG_DISLIKE),
    ("hate", STRONG_DISLIKE),
    ("avoid", STRONG_DISLIKE),
    ("can't stand", STRONG_DISLIKE),
    ("cant stand", STRONG_DISLIKE),
    ("cannot stand", STRONG_DISLIKE),
    ("no more", STRONG_DISLIKE),
    ("not a fan of", MILD_DISLIKE),
    ("not really into", MILD_DISLIKE),
    ("not keen on", MILD_DISLIKE),
    ("give me", CueEffect::Reset),
    ("suggest", CueEffect::Reset),
    ("show me", CueEffect::Reset),
    ("recommend", CueEffect::Reset),
    ("i want", CueEffect::Reset),
    ("i need", CueEffect::Reset),
    ("i would like", CueEffect::Reset),
    ("i'd like", CueEffect::Reset),
    ("would like", CueEffect::Reset),
    ("can i get", CueEffect::Reset),
    ("looking for", CueEffect::Reset),
    ("what should i", CueEffect::Reset),
    ("feel like", CueEffect::Reset),
];

/// Words that turn a directly following positive cue into a mild dislike
pub const NEGATORS: &[&str] = &[
    "don't",
    "dont",
    "do not",
    "doesn't",
    "doesnt",
    "does not",
    "didn't",
    "didnt",
    "never",
    "not",
    "no longer",
];

/// Words that end the clause a cue applies to
pub const CLAUSE_BREAK_WORDS: &[&str] = &["but", "however", "although", "though"];

/// Punctuation that ends the clause a cue applies to
pub const CLAUSE_BREAK_CHARS: &[char] = &['.', ';', '!', '?', ':'];

// ============================================================================
// Request and intent keywords
// ============================================================================

/// Phrases asking for something to be produced
pub const REQUEST_PHRASES: &[&str] = &[
    "give me",
    "suggest",
    "show me",
    "recommend",
    "i want",
    "i need",
    "i would like",
    "i'd like",
    "would like",
    "can i get",
    "looking for",
    "what should i",
    "ideas for",
];

/// Keywords hinting at the requested category
pub const CATEGORY_KEYWORDS: &[(&str, ItemCategory)] = &[
    ("workout", ItemCategory::Exercise),
    ("workouts", ItemCategory::Exercise),
    ("exercise", ItemCategory::Exercise),
    ("exercises", ItemCategory::Exercise),
    ("training", ItemCategory::Exercise),
    ("routine", ItemCategory::Exercise),
    ("gym", ItemCategory::Exercise),
    ("meal", ItemCategory::Meal),
    ("meals", ItemCategory::Meal),
    ("food", ItemCategory::Meal),
    ("eat", ItemCategory::Meal),
    ("recipe", ItemCategory::Meal),
    ("recipes", ItemCategory::Meal),
    ("breakfast", ItemCategory::Meal),
    ("lunch", ItemCategory::Meal),
    ("dinner", ItemCategory::Meal),
    ("snack", ItemCategory::Meal),
    ("diet", ItemCategory::Meal),
    ("nutrition", ItemCategory::Meal),
];

/// Phrases meaning only bodyweight exercises are possible
pub const NO_EQUIPMENT_PHRASES: &[&str] = &[
    "no equipment",
    "without equipment",
    "bodyweight only",
    "only bodyweight",
    "at home",
    "home workout",
    "no gym",
];

/// Phrases naming a metric
pub const METRIC_PHRASES: &[(&str, MetricKind)] = &[
    ("bmi", MetricKind::Bmi),
    ("body mass index", MetricKind::Bmi),
    ("how many calories", MetricKind::Calories),
    ("tdee", MetricKind::Calories),
    ("bmr", MetricKind::Calories),
    ("calorie target", MetricKind::Calories),
    ("daily calories", MetricKind::Calories),
    ("calories do i need", MetricKind::Calories),
    ("healthy weight", MetricKind::HealthyWeight),
    ("ideal weight", MetricKind::HealthyWeight),
    ("weight range", MetricKind::HealthyWeight),
];

pub const VARIATION_PHRASES: &[&str] = &[
    "something else",
    "something different",
    "another one",
    "other options",
    "different options",
    "alternatives",
    "alternative",
    "swap",
    "mix it up",
    "switch it up",
];

pub const SCHEDULE_PHRASES: &[&str] = &[
    "plan",
    "schedule",
    "program",
    "programme",
    "pathway",
    "day plan",
    "weekly plan",
];

pub const LOG_WEIGHT_PHRASES: &[&str] = &[
    "i weigh",
    "i now weigh",
    "my weight is",
    "log my weight",
    "log weight",
    "weighed in at",
    "update my weight",
];

pub const CLEAR_PHRASES: &[&str] = &[
    "reset my preferences",
    "clear my preferences",
    "forget my preferences",
    "reset preferences",
    "clear preferences",
    "start over",
    "forget everything",
];

pub const RECIPE_PHRASES: &[&str] = &[
    "recipe for",
    "recipe of",
    "how do i make",
    "how to make",
    "how do i cook",
    "how to cook",
    "how do i prepare",
    "how to prepare",
];

/// Avoidance statements answered with a coaching challenge
pub const EXCUSE_PHRASES: &[&str] = &[
    "too hard",
    "too difficult",
    "too tired",
    "i'm tired",
    "im tired",
    "i am tired",
    "skip",
    "skipping",
    "don't feel like",
    "dont feel like",
    "not in the mood",
    "can't be bothered",
    "cant be bothered",
    "can't do",
    "cant do",
];

pub const EXPLAIN_PHRASES: &[&str] = &[
    "how do i do",
    "how to do",
    "how do you do",
    "explain",
    "what is a",
    "what are",
    "proper form",
    "technique for",
];

pub const SMALL_TALK_PHRASES: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "good morning",
    "good evening",
    "thanks",
    "thank you",
    "how are you",
    "who are you",
    "bye",
];

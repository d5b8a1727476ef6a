// ABOUTME: Entity extraction: catalog mentions, polarity cues, measurements and flags
// ABOUTME: Works on normalised text and resolves overlapping phrase matches longest-first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::lexicon::{
    CueEffect, CATEGORY_KEYWORDS, CLAUSE_BREAK_CHARS, CLAUSE_BREAK_WORDS, CUES, EXCUSE_PHRASES,
    METRIC_PHRASES, NEGATORS, NO_EQUIPMENT_PHRASES,
};
use crate::catalog::Catalog;
use crate::text::{contains_any, contains_phrase, find_phrase, is_word_char};
use atlas_core::constants::metrics::KG_PER_LB;
use atlas_core::models::{
    Entities, Feedback, Measurement, Mention, Polarity, PreferenceTarget, Span,
};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

// ============================================================================
// Measurement patterns
// ============================================================================

static WEIGHT_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // 80kg, 80.5 kgs, 176 lbs, 150 pounds
    Regex::new(r"\b(\d+(?:\.\d+)?)\s*(kg|kgs|kilos?|kilograms?|lbs?|pounds?)\b").ok()
});

static HEIGHT_CM_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // 180cm, 175 centimeters
    Regex::new(r"\b(\d+(?:\.\d+)?)\s*(?:cm|centimet(?:er|re)s?)\b").ok()
});

static HEIGHT_M_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // 1.8m, 1.75 meters
    Regex::new(r"\b(\d(?:\.\d+)?)\s*(?:m|met(?:er|re)s?)\b").ok()
});

static CALORIES_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // 2000 kcal, 1800 calories, 500 cal
    Regex::new(r"\b(\d+(?:\.\d+)?)\s*(?:kcal|calories|cals?)\b").ok()
});

static DAYS_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(\d+)\s*days?\b").ok());

static FREQUENCY_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // 4 days a week, 3 times per week, 5x a week, 4 days week ("4 days/week")
    Regex::new(r"\b(\d+)\s*(?:days?|times|x)\s+(?:(?:a|per|each|every)\s+)?week\b").ok()
});

static WEEKS_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(\d+)\s*weeks?\b").ok());

static AGE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // 34 years old, 34 yrs old, age 34, age is 34
    Regex::new(r"\b(\d+)\s*(?:years?|yrs?)\s*old\b|\bage\s*(?:is\s*)?(\d+)\b").ok()
});

/// First numeric capture of every match of a pattern
fn captures<T: FromStr>(pattern: &LazyLock<Option<Regex>>, text: &str) -> Vec<T> {
    let Some(regex) = pattern.as_ref() else {
        return Vec::new();
    };
    regex
        .captures_iter(text)
        .filter_map(|cap| cap.iter().skip(1).flatten().next())
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

fn measurements(text: &str) -> Vec<Measurement> {
    let mut found = Vec::new();

    if let Some(regex) = WEIGHT_PATTERN.as_ref() {
        for cap in regex.captures_iter(text) {
            let (Some(value), Some(unit)) = (cap.get(1), cap.get(2)) else {
                continue;
            };
            let Ok(value) = value.as_str().parse::<f64>() else {
                continue;
            };
            let kg = if unit.as_str().starts_with('k') {
                value
            } else {
                value * KG_PER_LB
            };
            found.push(Measurement::WeightKg(kg));
        }
    }

    found.extend(
        captures::<f64>(&HEIGHT_CM_PATTERN, text)
            .into_iter()
            .map(Measurement::HeightCm),
    );
    found.extend(
        captures::<f64>(&HEIGHT_M_PATTERN, text)
            .into_iter()
            .map(|m| Measurement::HeightCm(m * 100.0)),
    );
    found.extend(
        captures::<f64>(&CALORIES_PATTERN, text)
            .into_iter()
            .map(Measurement::Calories),
    );
    let mut frequency_spans = Vec::new();
    if let Some(regex) = FREQUENCY_PATTERN.as_ref() {
        for cap in regex.captures_iter(text) {
            let (Some(whole), Some(value)) = (cap.get(0), cap.get(1)) else {
                continue;
            };
            frequency_spans.push(Span {
                start: whole.start(),
                end: whole.end(),
            });
            if let Ok(days) = value.as_str().parse() {
                found.push(Measurement::TrainingDaysPerWeek(days));
            }
        }
    }

    // a frequency is never a plan length
    if let Some(regex) = DAYS_PATTERN.as_ref() {
        for cap in regex.captures_iter(text) {
            let Some(value) = cap.get(1) else {
                continue;
            };
            let inside_frequency = frequency_spans
                .iter()
                .any(|span| value.start() >= span.start && value.start() < span.end);
            if inside_frequency {
                continue;
            }
            if let Ok(days) = value.as_str().parse() {
                found.push(Measurement::Days(days));
            }
        }
    }
    found.extend(
        captures::<u32>(&WEEKS_PATTERN, text)
            .into_iter()
            .filter_map(|w| w.checked_mul(7))
            .map(Measurement::Days),
    );
    found.extend(captures::<u32>(&AGE_PATTERN, text).into_iter().map(Measurement::Age));
    found
}

// ============================================================================
// Phrase resolution
// ============================================================================

/// Keep the longest non-overlapping candidates; ties go to the earlier span,
/// then to the earlier table position
fn resolve_overlaps<T>(mut candidates: Vec<(Span, usize, T)>) -> Vec<(Span, T)> {
    candidates.sort_by(|a, b| {
        b.0.len()
            .cmp(&a.0.len())
            .then(a.0.start.cmp(&b.0.start))
            .then(a.1.cmp(&b.1))
    });
    let mut accepted: Vec<(Span, T)> = Vec::new();
    for (span, _, value) in candidates {
        if accepted.iter().all(|(taken, _)| !taken.overlaps(&span)) {
            accepted.push((span, value));
        }
    }
    accepted.sort_by_key(|(span, _)| span.start);
    accepted
}

fn catalog_mentions(text: &str, catalog: &Catalog) -> Vec<(Span, PreferenceTarget)> {
    let candidates = catalog
        .vocabulary()
        .entries()
        .iter()
        .enumerate()
        .flat_map(|(order, entry)| {
            find_phrase(text, &entry.phrase, true)
                .into_iter()
                .map(move |span| (span, order, entry.target.clone()))
        })
        .collect();
    resolve_overlaps(candidates)
}

/// Whether a negator word ends right before `start`
fn negated(text: &str, start: usize) -> bool {
    let before = text[..start].trim_end();
    NEGATORS.iter().any(|negator| {
        before
            .strip_suffix(negator)
            .is_some_and(|rest| rest.chars().next_back().is_none_or(|c| !is_word_char(c)))
    })
}

fn cue_matches(text: &str) -> Vec<(Span, CueEffect)> {
    let candidates = CUES
        .iter()
        .enumerate()
        .flat_map(|(order, (phrase, effect))| {
            find_phrase(text, phrase, false)
                .into_iter()
                .map(move |span| (span, order, *effect))
        })
        .collect();
    resolve_overlaps(candidates)
        .into_iter()
        .map(|(span, effect)| match effect {
            CueEffect::Feedback(feedback)
                if feedback.polarity == Polarity::Positive && negated(text, span.start) =>
            {
                (span, CueEffect::Feedback(Feedback::MILD_DISLIKE))
            }
            other => (span, other),
        })
        .collect()
}

/// Byte offsets where a clause ends
fn clause_breaks(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut breaks: Vec<usize> = text
        .char_indices()
        .filter(|&(i, c)| {
            if !CLAUSE_BREAK_CHARS.contains(&c) {
                return false;
            }
            // decimal point
            let digit_before = i > 0 && bytes[i - 1].is_ascii_digit();
            let digit_after = bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
            !(c == '.' && digit_before && digit_after)
        })
        .map(|(i, _)| i)
        .collect();
    for word in CLAUSE_BREAK_WORDS {
        breaks.extend(find_phrase(text, word, false).into_iter().map(|s| s.start));
    }
    breaks.sort_unstable();
    breaks
}

/// Extract entities from normalised text
pub fn extract(text: &str, catalog: &Catalog) -> Entities {
    let cues = cue_matches(text);
    let breaks = clause_breaks(text);

    let mentions = catalog_mentions(text, catalog)
        .into_iter()
        .filter(|(span, _)| cues.iter().all(|(cue, _)| !cue.overlaps(span)))
        .map(|(span, target)| {
            let feedback = cues
                .iter()
                .rev()
                .find(|(cue, _)| cue.end <= span.start)
                .filter(|(cue, _)| !breaks.iter().any(|&b| b >= cue.end && b < span.start))
                .and_then(|(_, effect)| match effect {
                    CueEffect::Feedback(feedback) => Some(*feedback),
                    CueEffect::Reset => None,
                });
            Mention {
                surface: text[span.start..span.end].to_owned(),
                target,
                span,
                feedback,
            }
        })
        .collect();

    let metric = METRIC_PHRASES
        .iter()
        .find(|(phrase, _)| contains_phrase(text, phrase))
        .map(|(_, kind)| *kind);

    let category_hint = CATEGORY_KEYWORDS
        .iter()
        .filter_map(|(word, category)| {
            find_phrase(text, word, false)
                .first()
                .map(|span| (span.start, *category))
        })
        .min_by_key(|(start, _)| *start)
        .map(|(_, category)| category);

    Entities {
        mentions,
        measurements: measurements(text),
        metric,
        no_equipment: contains_any(text, NO_EQUIPMENT_PHRASES),
        category_hint,
        excuse: contains_any(text, EXCUSE_PHRASES),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalize;
    use atlas_core::models::{Feedback, FeedbackStrength, ItemCategory, MetricKind, Polarity};

    fn run(text: &str) -> Entities {
        let catalog = Catalog::builtin().unwrap();
        extract(&normalize(text), &catalog)
    }

    #[test]
    fn test_cue_scopes_to_clause() {
        let entities = run("I love burpees but hate lunges");
        assert_eq!(entities.mentions.len(), 2);
        assert_eq!(entities.mentions[0].feedback, Some(Feedback::LOVE));
        assert_eq!(entities.mentions[1].feedback, Some(Feedback::HATE));
    }

    #[test]
    fn test_comma_keeps_clause() {
        let entities = run("I hate burpees, planks and lunges");
        assert_eq!(entities.mentions.len(), 3);
        assert!(entities
            .mentions
            .iter()
            .all(|m| m.feedback == Some(Feedback::HATE)));
    }

    #[test]
    fn test_request_phrase_resets_cue() {
        let entities = run("I don't like burpees, give me squats");
        let squat = entities
            .mentions
            .iter()
            .find(|m| m.surface == "squats")
            .unwrap();
        assert_eq!(squat.feedback, None);
        assert_eq!(entities.mentions[0].feedback, Some(Feedback::HATE));
    }

    #[test]
    fn test_mild_negative_is_longest_cue() {
        let entities = run("not a fan of oats");
        let mention = &entities.mentions[0];
        assert_eq!(
            mention.feedback,
            Some(Feedback {
                polarity: Polarity::Negative,
                strength: FeedbackStrength::Mild
            })
        );
    }

    #[test]
    fn test_longest_mention_wins() {
        let entities = run("show me push-ups");
        assert_eq!(entities.mentions.len(), 1);
        assert_eq!(
            entities.mentions[0].target,
            PreferenceTarget::Item("push-up".into())
        );
    }

    #[test]
    fn test_measurements() {
        let entities = run("I'm 1.8m, 176 lbs and 34 years old. Make it a 2 weeks plan");
        let weight = entities.weight_kg().unwrap();
        assert!((weight - 79.83).abs() < 0.01);
        assert!((entities.height_cm().unwrap() - 180.0).abs() < 1e-9);
        assert_eq!(entities.age(), Some(34));
        assert_eq!(entities.days(), Some(14));
    }

    #[test]
    fn test_negated_positive_cue_is_mild_dislike() {
        for text in [
            "I don't love burpees",
            "I do not enjoy burpees",
            "I never like burpees",
            "I no longer enjoy burpees",
        ] {
            let entities = run(text);
            assert_eq!(entities.mentions.len(), 1, "{text}");
            assert_eq!(
                entities.mentions[0].feedback,
                Some(Feedback::MILD_DISLIKE),
                "{text}"
            );
        }
    }

    #[test]
    fn test_negator_must_be_adjacent_and_whole_word() {
        assert_eq!(
            run("I really like burpees").mentions[0].feedback,
            Some(Feedback::LOVE)
        );
        assert_eq!(
            run("Not today, but I love burpees").mentions[0].feedback,
            Some(Feedback::LOVE)
        );
        assert_eq!(
            run("I don't like burpees").mentions[0].feedback,
            Some(Feedback::HATE)
        );
    }

    #[test]
    fn test_weekly_frequency_is_not_plan_length() {
        let entities = run("I can train 4 days a week");
        assert_eq!(entities.training_days_per_week(), Some(4));
        assert_eq!(entities.days(), None);

        let entities = run("3 times per week for 6 weeks");
        assert_eq!(entities.training_days_per_week(), Some(3));
        assert_eq!(entities.days(), Some(42));

        let entities = run("a 10 day plan, 5x a week");
        assert_eq!(entities.training_days_per_week(), Some(5));
        assert_eq!(entities.days(), Some(10));
    }

    #[test]
    fn test_excuse_flag() {
        assert!(run("Burpees are too hard").excuse);
        assert!(run("I don't feel like doing squats").excuse);
        assert!(!run("Give me squats").excuse);
    }

    #[test]
    fn test_feel_like_carries_no_feedback() {
        let entities = run("I don't feel like doing squats");
        assert_eq!(entities.mentions.len(), 1);
        assert_eq!(entities.mentions[0].feedback, None);
    }

    #[test]
    fn test_decimal_point_is_not_a_break() {
        let breaks = clause_breaks("i am 1.75 m tall. ok");
        assert_eq!(breaks, vec![16]);
    }

    #[test]
    fn test_flags() {
        let entities = run("Give me a workout at home");
        assert!(entities.no_equipment);
        assert_eq!(entities.category_hint, Some(ItemCategory::Exercise));
        assert_eq!(run("What's my BMI?").metric, Some(MetricKind::Bmi));
    }
}

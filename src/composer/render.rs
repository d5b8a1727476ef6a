// ABOUTME: Deterministic text rendering for structured coach answers
// ABOUTME: Formats recommendations, pathways, metrics, preference updates and fallback replies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::payload::AppliedFeedback;
use atlas_core::models::{CatalogItem, ItemCategory, Polarity, UserProfile};
use atlas_intelligence::metrics::{BmiReport, CalorieTarget, WeightRange};
use atlas_intelligence::protocol::{prescribe, Protocol};
use atlas_intelligence::{Challenge, NoMatchReason, Pathway, RecommendationResult, TrainingDay};
use std::fmt::Write as _;

const HELP_LINE: &str = "Try \"give me a leg workout\", \"suggest a high-protein breakfast\", \
                         \"make me a 30 day plan\" or \"what's my BMI?\".";

fn plural(category: ItemCategory) -> &'static str {
    match category {
        ItemCategory::Exercise => "exercises",
        ItemCategory::Meal => "meals",
    }
}

fn item_detail(item: &CatalogItem, profile: &UserProfile) -> String {
    match (item.category, item.macros) {
        (ItemCategory::Exercise, _) => prescribe(item.difficulty, profile.primary_goal()).to_string(),
        (ItemCategory::Meal, Some(m)) => format!(
            "{:.0} kcal, {:.0} g protein, {:.0} g carbs, {:.0} g fat",
            m.calories, m.protein_g, m.carbs_g, m.fat_g
        ),
        (ItemCategory::Meal, None) => item.description.clone(),
    }
}

// ============================================================================
// Recommendations
// ============================================================================

/// Numbered list with protocol or macros per item
#[must_use]
pub fn recommendations(result: &RecommendationResult, profile: &UserProfile) -> String {
    match result {
        RecommendationResult::NoMatch { category, reason } => match reason {
            NoMatchReason::CategoryEmpty => {
                format!("I don't have any {} in my catalog yet.", plural(*category))
            }
            NoMatchReason::AllFiltered => format!(
                "Nothing in my catalog fits right now: every {} is ruled out by your equipment, \
                 diet, health notes or dislikes. You can relax a constraint or say \
                 \"reset my preferences\".",
                category.as_str()
            ),
        },
        RecommendationResult::Ranked {
            category,
            items,
            requested,
            truncated,
            relaxations,
        } => {
            let mut out = format!("Here are {} {} for you:", items.len(), plural(*category));
            for (i, scored) in items.iter().enumerate() {
                let _ = write!(
                    out,
                    "\n{}. {} ({})",
                    i + 1,
                    scored.item.name,
                    item_detail(&scored.item, profile)
                );
            }
            if *truncated {
                let _ = write!(
                    out,
                    "\nI could only find {} of the {requested} you asked for with your constraints.",
                    items.len()
                );
            }
            for relaxation in relaxations {
                let _ = write!(out, "\nNote: this list {}.", relaxation.note());
            }
            out
        }
    }
}

// ============================================================================
// Pathways
// ============================================================================

fn training_line(day: &TrainingDay) -> String {
    let names: Vec<&str> = day.exercises.iter().map(|e| e.name.as_str()).collect();
    let mut line = format!(
        "{} (intensity {:.1}): {}",
        day.focus.label(),
        day.intensity,
        if names.is_empty() {
            "active recovery".to_owned()
        } else {
            names.join(", ")
        }
    );
    if day.best_effort {
        line.push_str(" [best effort]");
    }
    line
}

/// Summary, first week in detail, milestones and nutrition
#[must_use]
pub fn pathway(pathway: &Pathway) -> String {
    let training = pathway.training_days().count();
    let rest = pathway.days.len() - training;
    let mut out = format!(
        "Your {}-day {} pathway (goal: {}): {training} training days and {rest} rest days over {} weeks.",
        pathway.days.len(),
        pathway.fitness_level.as_str(),
        pathway.primary_goal.as_str().replace('-', " "),
        pathway.weeks()
    );

    out.push_str("\nWeek 1:");
    for day in pathway.days.iter().take_while(|d| d.week == 1) {
        let content = day
            .training()
            .map_or_else(|| "Rest".to_owned(), training_line);
        let _ = write!(
            out,
            "\n- Day {} ({}): {content}",
            day.day,
            day.date.format("%a %d %b")
        );
    }

    let weekly: Vec<String> = (1..=pathway.weeks())
        .filter_map(|week| {
            pathway
                .training_days()
                .find(|(plan, _)| plan.week == week)
                .map(|(_, t)| format!("{:.1}", t.intensity))
        })
        .collect();
    if weekly.len() > 1 {
        let _ = write!(out, "\nWeekly intensity: {}.", weekly.join(" / "));
    }

    let best_effort = pathway.training_days().filter(|(_, t)| t.best_effort).count();
    if best_effort > 0 {
        let _ = write!(
            out,
            "\n{best_effort} training days are best effort because few exercises fit your constraints."
        );
    }

    if !pathway.milestones.is_empty() {
        out.push_str("\nMilestones:");
        for milestone in &pathway.milestones {
            let _ = write!(out, "\n- Day {}: {}", milestone.day, milestone.description);
        }
    }
    let _ = write!(out, "\nNutrition: {}", pathway.nutrition);
    for note in &pathway.notes {
        let _ = write!(out, "\nNote: {note}");
    }
    out
}

// ============================================================================
// Metrics
// ============================================================================

/// BMI sentence
#[must_use]
pub fn bmi(report: &BmiReport) -> String {
    format!(
        "Your BMI is {:.1}, which is in the {} range.",
        report.bmi,
        report.category.label()
    )
}

/// Healthy weight sentence
#[must_use]
pub fn healthy_weight(height_cm: f64, range: &WeightRange) -> String {
    format!(
        "At {height_cm:.0} cm a healthy weight is roughly {:.1} to {:.1} kg (BMI 18.5 to 24.9).",
        range.min_kg, range.max_kg
    )
}

/// Calorie target sentence
#[must_use]
pub fn calories(target: &CalorieTarget) -> String {
    let adjustment = if target.adjustment < 0.0 {
        format!(", minus {:.0} kcal for weight loss", -target.adjustment)
    } else if target.adjustment > 0.0 {
        format!(", plus {:.0} kcal for muscle gain", target.adjustment)
    } else {
        String::new()
    };
    format!(
        "Aim for about {:.0} kcal a day (BMR {:.0} kcal, maintenance {:.0} kcal{adjustment}).",
        target.target, target.bmr, target.maintenance
    )
}

/// Weight log confirmation
#[must_use]
pub fn weight_logged(weight_kg: f64, report: Option<&BmiReport>) -> String {
    let mut out = format!("Logged your weight at {weight_kg:.1} kg.");
    if let Some(report) = report {
        let _ = write!(
            out,
            " Your BMI is now {:.1} ({}).",
            report.bmi,
            report.category.label()
        );
    }
    out
}

// ============================================================================
// Preferences
// ============================================================================

fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

/// Acknowledge applied feedback
#[must_use]
pub fn preferences(applied: &[AppliedFeedback]) -> String {
    let names = |polarity: Polarity| -> Vec<String> {
        applied
            .iter()
            .filter(|a| a.feedback.polarity == polarity)
            .map(|a| a.label.clone())
            .collect()
    };
    let liked = names(Polarity::Positive);
    let disliked = names(Polarity::Negative);

    let mut parts = Vec::new();
    if !liked.is_empty() {
        parts.push(format!("I'll favour {}", join_names(&liked)));
    }
    if !disliked.is_empty() {
        let vetoed: Vec<String> = applied
            .iter()
            .filter(|a| a.vetoed)
            .map(|a| a.label.clone())
            .collect();
        if vetoed.is_empty() {
            parts.push(format!("show less of {}", join_names(&disliked)));
        } else {
            parts.push(format!("stop suggesting {}", join_names(&vetoed)));
        }
    }
    if parts.is_empty() {
        return "Noted.".to_owned();
    }
    format!("Got it. {}.", parts.join(" and "))
}

/// Confirmation after clearing
#[must_use]
pub fn preferences_cleared() -> String {
    "Done. I've forgotten all your likes and dislikes.".to_owned()
}

// ============================================================================
// Fallbacks
// ============================================================================

/// Greeting or thanks without the language model
#[must_use]
pub fn small_talk_fallback(profile: &UserProfile, user_text: &str) -> String {
    if user_text.to_lowercase().contains("thank") {
        return format!("You're welcome, {}! Anything else I can help with?", profile.name);
    }
    format!(
        "Hi {}! I can suggest workouts and meals, build a training plan, or work out your BMI and calories. {HELP_LINE}",
        profile.name
    )
}

/// Exercise explanation without the language model
#[must_use]
pub fn explain_fallback(item: &CatalogItem, protocol: &Protocol) -> String {
    let description = if item.description.is_empty() {
        "Move with control through the full range of motion and stop if anything hurts.".to_owned()
    } else {
        item.description.clone()
    };
    format!("{}: {description} Suggested: {protocol}.", item.name)
}

/// Recipe without the language model
#[must_use]
pub fn recipe_fallback(item: &CatalogItem, diet_focus: &str) -> String {
    let mut out = format!("{}: {}", item.name, item.description);
    if let Some(m) = item.macros {
        let _ = write!(
            out,
            " One serving is about {:.0} kcal with {:.0} g protein.",
            m.calories, m.protein_g
        );
    }
    let _ = write!(out, " Keep the portions {diet_focus} for your goal.");
    out
}

/// Coach pushback without the language model
#[must_use]
pub fn intervention_fallback(challenge: &Challenge) -> String {
    let avoided = join_names(&challenge.avoided);
    let goal = challenge.goal.as_str().replace('-', " ");
    let mut out = format!("I hear you, {avoided} can feel like a grind. ");
    if challenge.targets_key_practice() {
        let _ = write!(
            out,
            "Still, {} does a lot of the work for {goal}, so let's not drop it. \
             How about we do just 2 sets today and see how it feels?",
            join_names(&challenge.key_targets)
        );
    } else if challenge.key_practices.is_empty() {
        out.push_str(
            "We can swap it for something you enjoy more. \
             Let's keep moving today though; ask me for a workout and I'll find an alternative.",
        );
    } else {
        let _ = write!(
            out,
            "We can swap it, as long as we keep {} in the plan for {goal}. \
             Shall I find an alternative?",
            join_names(&challenge.key_practices)
        );
    }
    out
}

/// Ask for the profile fields health advice needs
#[must_use]
pub fn profile_incomplete(missing: &[String]) -> String {
    format!(
        "Before I give health advice I need your {}. \
         You can say something like \"I'm 175 cm, 70 kg and want to build muscle\".",
        join_names(missing)
    )
}

/// Reply for unrecognised input
#[must_use]
pub fn unclassified_fallback() -> String {
    format!("I'm not sure I understood that. {HELP_LINE}")
}

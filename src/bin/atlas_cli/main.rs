// ABOUTME: Atlas CLI - chat with the fitness and nutrition coach from a terminal
// ABOUTME: Interactive chat, one-shot questions, pathways, body metrics and catalog browsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Interactive session, state kept between runs
//! atlas-cli chat --level intermediate --goal muscle-gain --equipment dumbbell --state ./atlas.json
//!
//! # One question
//! atlas-cli ask --level beginner --goal weight-loss "suggest a high protein breakfast"
//!
//! # 30-day pathway as JSON
//! atlas-cli pathway --level advanced --goal strength --equipment gym --json
//!
//! # BMI, healthy weight and calorie target
//! atlas-cli metrics --height 178 --weight 82 --age 34 --gender male --goal weight-loss
//!
//! # Browse the catalog
//! atlas-cli catalog --category meal --tag vegetarian
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use atlas_coach::config::ServerConfig;
use atlas_coach::logging::LoggingConfig;
use atlas_core::constants::pathway::DEFAULT_DAYS;
use atlas_intelligence::PathwayRequest;
use clap::{Parser, Subcommand};
use helpers::profile::ProfileArgs;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "atlas-cli",
    about = "Atlas fitness and nutrition coach",
    long_about = "Conversational coach that recommends exercises and meals, learns your likes and \
                  dislikes, builds multi-day training pathways and computes body metrics."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Interactive chat session (type "quit" to leave)
    Chat {
        #[command(flatten)]
        profile: ProfileArgs,

        /// JSON file holding profiles, preferences and history between runs
        #[arg(long, value_name = "FILE")]
        state: Option<PathBuf>,

        /// Print full responses as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask a single question
    Ask {
        #[command(flatten)]
        profile: ProfileArgs,

        /// JSON file holding profiles, preferences and history between runs
        #[arg(long, value_name = "FILE")]
        state: Option<PathBuf>,

        /// Print the full response as JSON
        #[arg(long)]
        json: bool,

        /// The message
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Generate a training pathway
    Pathway {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Number of days
        #[arg(long, default_value_t = DEFAULT_DAYS)]
        days: u32,

        /// Training days per week, overriding the fitness-level default
        #[arg(long)]
        training_days: Option<u32>,

        /// Print the pathway as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show BMI, healthy weight range and calorie target
    Metrics {
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// List catalog items
    Catalog {
        /// Only this category (exercise or meal)
        #[arg(long)]
        category: Option<String>,

        /// Only items carrying this tag
        #[arg(long)]
        tag: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose).init()?;
    let config = ServerConfig::from_env()?;
    debug!(llm_enabled = config.llm.is_some(), "Configuration loaded");

    match cli.command {
        Command::Chat {
            profile,
            state,
            json,
        } => commands::chat::interactive(&config, &profile, state, json).await?,
        Command::Ask {
            profile,
            state,
            json,
            message,
        } => commands::chat::ask(&config, &profile, state, &message.join(" "), json).await?,
        Command::Pathway {
            profile,
            days,
            training_days,
            json,
        } => {
            let request = PathwayRequest::new(days).with_training_days(training_days);
            commands::plan::pathway(&config, &profile, request, json)?;
        }
        Command::Metrics { profile } => commands::metrics::show(&profile)?,
        Command::Catalog { category, tag } => {
            commands::catalog::list(&config, category.as_deref(), tag.as_deref())?;
        }
    }

    Ok(())
}

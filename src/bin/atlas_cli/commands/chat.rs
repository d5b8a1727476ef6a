// ABOUTME: Chat commands for atlas-cli
// ABOUTME: Interactive stdin session and one-shot questions over the coach service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::display::{print_error, print_response};
use crate::helpers::profile::ProfileArgs;
use anyhow::Result;
use atlas_coach::config::ServerConfig;
use atlas_coach::storage::{InMemoryStorage, StorageProvider};
use atlas_coach::CoachService;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::info;
use uuid::Uuid;

const EXIT_WORDS: [&str; 2] = ["quit", "exit"];

struct Session {
    service: CoachService,
    storage: Arc<InMemoryStorage>,
    state: Option<PathBuf>,
    user_id: Uuid,
}

impl Session {
    async fn open(config: &ServerConfig, args: &ProfileArgs, state: Option<PathBuf>) -> Result<Self> {
        let storage = Arc::new(match &state {
            Some(path) => InMemoryStorage::load_snapshot(path).await?,
            None => InMemoryStorage::new(),
        });
        let shared: Arc<dyn StorageProvider> = Arc::<InMemoryStorage>::clone(&storage);
        let service = CoachService::from_config(config, shared)?;

        let user_id = args.user_id();
        let stored = storage.get_profile(user_id).await?;
        if stored.is_none() || args.has_overrides() {
            service.register_profile(&args.to_profile()?).await?;
        }
        info!(user.id = %user_id, restored = stored.is_some(), "Chat session ready");

        Ok(Self {
            service,
            storage,
            state,
            user_id,
        })
    }

    async fn persist(&self) -> Result<()> {
        if let Some(path) = &self.state {
            self.storage.save_snapshot(path).await?;
        }
        Ok(())
    }
}

/// Read messages from stdin until EOF or an exit word
pub async fn interactive(
    config: &ServerConfig,
    args: &ProfileArgs,
    state: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let session = Session::open(config, args, state).await?;
    println!("Atlas coach ready. Ask for a workout, a meal, a plan or your BMI. Type \"quit\" to leave.");
    for suggestion in session.service.proactive_suggestions(session.user_id).await? {
        println!("{suggestion}");
    }

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&message.to_lowercase().as_str()) {
            break;
        }

        match session.service.handle_message(session.user_id, message).await {
            Ok(response) => print_response(&response, json)?,
            Err(e) => print_error(&e),
        }
        session.persist().await?;
        println!();
    }

    session.persist().await?;
    println!("Bye, keep moving!");
    Ok(())
}

/// Answer one message and exit
pub async fn ask(
    config: &ServerConfig,
    args: &ProfileArgs,
    state: Option<PathBuf>,
    message: &str,
    json: bool,
) -> Result<()> {
    let session = Session::open(config, args, state).await?;
    let response = session.service.handle_message(session.user_id, message).await?;
    print_response(&response, json)?;
    session.persist().await
}

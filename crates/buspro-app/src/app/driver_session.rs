//! Driver session: one running app instance
//!
//! Owns the stop repository, the Pro flag, the chat log and the assistant.
//! Methods that suspend (assistant, purchase) take `&mut self`, so a second
//! question cannot be sent while one is outstanding.

use std::path::{Path, PathBuf};

use buspro_assistant::{DriverAssistant, GeminiClient};
use buspro_domain::model::ChatLog;
use buspro_domain::repository::{ProStatusRepository, RouteStateRepository};
use buspro_domain::service::StopRepository;
use buspro_types::{Error, Result};

use crate::config::Config;
use crate::export::export_roster;
use crate::navigation::build_navigation_url;
use crate::purchase::{PurchaseOutcome, PurchaseProvider};

pub struct DriverSession<R> {
    stops: StopRepository<R>,
    is_pro: bool,
    chat: ChatLog,
    assistant: DriverAssistant,
}

impl<R> DriverSession<R>
where
    R: RouteStateRepository + ProStatusRepository,
{
    /// Load stored state and Pro flag from `store`
    pub fn open(store: R, assistant: DriverAssistant) -> Self {
        let is_pro = store.load_pro_status();
        Self {
            stops: StopRepository::open(store),
            is_pro,
            chat: ChatLog::new(),
            assistant,
        }
    }

    /// Session wired to the Gemini backend described by `config`
    pub fn with_config(store: R, config: &Config) -> Self {
        let assistant = DriverAssistant::new(GeminiClient::new(config.gemini_config()));
        Self::open(store, assistant)
    }

    pub fn stops(&self) -> &StopRepository<R> {
        &self.stops
    }

    pub fn stops_mut(&mut self) -> &mut StopRepository<R> {
        &mut self.stops
    }

    pub fn is_pro(&self) -> bool {
        self.is_pro
    }

    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    /// Ask the assistant about the selected cell and record both turns
    ///
    /// Blank questions are ignored and return `None`.
    pub async fn ask_assistant(&mut self, query: &str) -> Option<String> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.chat.push_user(query);
        let (route, direction) = self.stops.selection();
        let reply = self
            .assistant
            .ask(query, self.stops.current(), route.label(), direction.label())
            .await;
        self.chat.push_assistant(reply.clone());
        Some(reply)
    }

    /// Run the purchase flow and persist Pro on success
    pub async fn unlock_pro(&mut self, provider: &dyn PurchaseProvider) -> Result<PurchaseOutcome> {
        if self.is_pro {
            return Ok(PurchaseOutcome::Success);
        }

        let outcome = provider.purchase().await;
        match &outcome {
            PurchaseOutcome::Success => {
                self.stops.store().save_pro_status(true)?;
                self.is_pro = true;
                tracing::info!("pro status unlocked");
            }
            PurchaseOutcome::Failed(reason) => {
                tracing::warn!(reason = %reason, "purchase failed");
            }
        }
        Ok(outcome)
    }

    /// CSV export of every cell; refused unless Pro
    pub fn export_csv(&self, output: &Path) -> Result<PathBuf> {
        export_roster(self.stops.state(), self.is_pro, output)
    }

    /// Directions link for a stop of the selected cell
    pub fn navigation_url(&self, id: &str) -> Result<String> {
        self.stops
            .get(id)
            .map(|stop| build_navigation_url(&stop.address))
            .ok_or_else(|| Error::StopNotFound(id.to_string()))
    }

    /// Directions link for the current navigation target, if one is set
    pub fn navigation_target_url(&self) -> Option<String> {
        self.stops
            .navigation_target()
            .map(|stop| build_navigation_url(&stop.address))
    }
}

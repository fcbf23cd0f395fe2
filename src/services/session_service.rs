// src/services/session_service.rs
use crate::errors::LogoError;
use crate::models::DownloadAction;
use crate::services::concept_service::{self, ConceptService};
use crate::wizard::{ConceptRequest, Effect, Event, WizardState, transition};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub state: WizardState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of dispatching one event.
pub struct Dispatch {
    pub session: Session,
    pub download: Option<DownloadAction>,
    /// Background generation started by this event, if any.
    pub generation: Option<JoinHandle<()>>,
}

/// In-memory wizard sessions. Every state change goes through the write
/// lock, one event at a time.
///
/// Sessions untouched for longer than `session_ttl` are evicted the next
/// time a session is created.
pub struct SessionService {
    sessions: RwLock<HashMap<Uuid, Session>>,
    concepts: Arc<ConceptService>,
    generation_timeout: Duration,
    session_ttl: Duration,
}

impl SessionService {
    pub fn new(
        concepts: Arc<ConceptService>,
        generation_timeout: Duration,
        session_ttl: Duration,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            concepts,
            generation_timeout,
            session_ttl,
        }
    }

    pub fn concept_count(&self) -> usize {
        self.concepts.concept_count()
    }

    pub async fn create(&self) -> Session {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            state: WizardState::new(),
            created_at: now,
            updated_at: now,
        };
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, existing| !expired(existing, now, self.session_ttl));
        if sessions.len() < before {
            info!("Evicted {} expired wizard sessions", before - sessions.len());
        }
        sessions.insert(session.id, session.clone());
        info!("Created wizard session {} ({} live)", session.id, sessions.len());
        drop(sessions);
        session
    }

    #[cfg(test)]
    pub async fn live_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn get(&self, id: &Uuid) -> Result<Session, LogoError> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(LogoError::SessionNotFound(*id))
    }

    pub async fn remove(&self, id: &Uuid) -> Result<(), LogoError> {
        match self.sessions.write().await.remove(id) {
            Some(_) => {
                info!("Removed wizard session {}", id);
                Ok(())
            }
            None => Err(LogoError::SessionNotFound(*id)),
        }
    }

    /// Apply a UI event and start whatever effect it asks for.
    pub async fn dispatch(self: &Arc<Self>, id: Uuid, event: Event) -> Result<Dispatch, LogoError> {
        let (session, effect) = self.apply(&id, event).await?;

        let mut dispatch = Dispatch {
            session,
            download: None,
            generation: None,
        };
        match effect {
            Some(Effect::Download(action)) => {
                info!("Session {} downloading {}", id, action.filename);
                dispatch.download = Some(action);
            }
            Some(Effect::GenerateConcepts { token, request }) => {
                let service = Arc::clone(self);
                dispatch.generation = Some(tokio::spawn(async move {
                    service.run_generation(id, token, request).await;
                }));
            }
            None => {}
        }
        Ok(dispatch)
    }

    /// Image-generation prompt for one option's concept.
    pub async fn image_prompt(&self, id: &Uuid, option_id: &str) -> Result<String, LogoError> {
        let session = self.get(id).await?;
        let option = session
            .state
            .options
            .iter()
            .find(|option| option.id == option_id)
            .ok_or_else(|| LogoError::Selection(format!("Logo option {} not found", option_id)))?;
        let concept = option.concept.as_ref().ok_or_else(|| {
            LogoError::Selection(format!("Logo option {} has no concept", option_id))
        })?;

        tokio::time::timeout(
            self.generation_timeout,
            self.concepts.generate_image_prompt(concept),
        )
        .await
        .map_err(|_| timed_out(self.generation_timeout))?
    }

    async fn apply(&self, id: &Uuid, event: Event) -> Result<(Session, Option<Effect>), LogoError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or(LogoError::SessionNotFound(*id))?;

        let outcome = transition(&session.state, event);
        if let Some(err) = outcome.rejection {
            return Err(err);
        }
        session.state = outcome.state;
        session.updated_at = Utc::now();
        Ok((session.clone(), outcome.effect))
    }

    async fn run_generation(&self, id: Uuid, token: u64, request: ConceptRequest) {
        let result = tokio::time::timeout(
            self.generation_timeout,
            self.concepts.generate_concepts(
                &request.business_name,
                request.industry,
                &request.styles,
                request.colors.as_deref(),
            ),
        )
        .await
        .unwrap_or_else(|_| Err(timed_out(self.generation_timeout)))
        .and_then(|concepts| concept_service::to_options(&request.business_name, concepts));

        let event = match result {
            Ok(options) => {
                info!(
                    "Session {} received {} logo options (token {})",
                    id,
                    options.len(),
                    token
                );
                Event::GenerationSucceeded { token, options }
            }
            Err(err) => {
                let err = match err {
                    LogoError::Generation(_) => err,
                    other => LogoError::Generation(other.to_string()),
                };
                warn!("Session {} generation failed (token {}): {}", id, token, err);
                Event::GenerationFailed {
                    token,
                    message: err.to_string(),
                }
            }
        };

        if let Err(err) = self.apply(&id, event).await {
            debug!("Dropping generation result for session {}: {}", id, err);
        }
    }
}

fn expired(session: &Session, now: DateTime<Utc>, ttl: Duration) -> bool {
    (now - session.updated_at)
        .to_std()
        .is_ok_and(|idle| idle > ttl)
}

fn timed_out(timeout: Duration) -> LogoError {
    LogoError::Generation(format!("model did not respond within {:?}", timeout))
}

// src/handlers.rs
use crate::services::color;
use crate::services::session_service::Session;
use crate::wizard::{CustomizeTarget, Event, Step, WizardState};
use crate::{AppState, errors::LogoError, models::*};
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Session snapshot returned after every call, with the derived flags the
/// renderer needs to enable or disable actions.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub step_number: u8,
    #[serde(flatten)]
    pub state: WizardState,
    pub can_generate: bool,
    pub can_proceed: bool,
    pub preview: Option<Preview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<DownloadAction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionView {
    fn new(session: Session, download: Option<DownloadAction>) -> Self {
        Self {
            session_id: session.id,
            step_number: session.state.step.number(),
            can_generate: session.state.can_generate(),
            can_proceed: session.state.can_proceed(),
            preview: Preview::for_state(&session.state),
            download,
            created_at: session.created_at,
            updated_at: session.updated_at,
            state: session.state,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Preview {
    Ready {
        image_url: String,
        hue_rotation: u16,
        background: String,
        image_max_width: &'static str,
        text: Option<PreviewText>,
    },
    NotFound,
}

#[derive(Debug, Serialize)]
pub struct PreviewText {
    pub content: String,
    pub font_family: String,
    pub color: String,
}

impl Preview {
    /// Only the Customize step has a preview.
    fn for_state(state: &WizardState) -> Option<Self> {
        if state.step != Step::Customize {
            return None;
        }
        let option = match state.customize_target() {
            CustomizeTarget::Logo(option) => option,
            CustomizeTarget::NotFound => return Some(Preview::NotFound),
        };

        let custom = &state.customization;
        let text = (custom.layout != Layout::IconOnly).then(|| PreviewText {
            content: state.business_name.clone(),
            font_family: custom.typography.clone(),
            color: custom.color.clone(),
        });
        Some(Preview::Ready {
            image_url: option.image_url.clone(),
            hue_rotation: color::hue_rotation(&custom.color),
            background: color::preview_background(&custom.color),
            image_max_width: if custom.layout == Layout::Stacked {
                "70%"
            } else {
                "100%"
            },
            text,
        })
    }
}

pub async fn create_session(data: web::Data<AppState>) -> Result<HttpResponse, LogoError> {
    let session = data.sessions.create().await;
    Ok(HttpResponse::Created().json(SessionView::new(session, None)))
}

pub async fn get_session(
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, LogoError> {
    let session = data.sessions.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SessionView::new(session, None)))
}

pub async fn delete_session(
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, LogoError> {
    data.sessions.remove(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn post_event(
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
    body: web::Json<Event>,
) -> Result<HttpResponse, LogoError> {
    let session_id = path.into_inner();

    // Generation keeps running after the response goes out.
    let dispatch = data.sessions.dispatch(session_id, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(SessionView::new(dispatch.session, dispatch.download)))
}

pub async fn download_logo(
    path: web::Path<(Uuid, String)>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, LogoError> {
    let (session_id, format) = path.into_inner();
    let format = DownloadFormat::try_from(format.as_str())?;

    let dispatch = data
        .sessions
        .dispatch(session_id, Event::RequestDownload { format })
        .await?;

    match dispatch.download {
        Some(action) => Ok(HttpResponse::Ok().json(action)),
        None => Err(LogoError::Selection(
            dispatch
                .session
                .state
                .error
                .unwrap_or_else(|| "No logo selected for download".to_string()),
        )),
    }
}

pub async fn image_prompt(
    path: web::Path<(Uuid, String)>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, LogoError> {
    let (session_id, option_id) = path.into_inner();
    let prompt = data.sessions.image_prompt(&session_id, &option_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "option_id": option_id,
        "prompt": prompt
    })))
}

pub async fn catalog(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "industries": Industry::ALL.iter().map(|i| serde_json::json!({
            "id": i,
            "name": i.display_name()
        })).collect::<Vec<_>>(),
        "styles": LogoStyle::ALL.iter().map(|s| serde_json::json!({
            "id": s,
            "name": s.display_name(),
            "description": s.description()
        })).collect::<Vec<_>>(),
        "layouts": Layout::ALL.iter().map(|l| serde_json::json!({
            "id": l,
            "name": l.label()
        })).collect::<Vec<_>>(),
        "typography": TYPOGRAPHY_CHOICES.iter().map(|(id, name)| serde_json::json!({
            "id": id,
            "name": name
        })).collect::<Vec<_>>(),
        "palette": PALETTE,
        "concept_count": data.sessions.concept_count()
    }))
}

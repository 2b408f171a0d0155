use askama::Template;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::posts::{PostDraft, PostServiceError};
use crate::application::stream::StreamBuilder;
use crate::domain::entities::PostRecord;
use crate::domain::slug::SlugField;
use crate::domain::types::PostStatus;
use crate::domain::validation::ValidationErrors;
use crate::presentation::dashboard::{
    EditorPageTemplate, EditorPanelTemplate, EditorView, PreviewTemplate,
};
use crate::presentation::views::{format_date, render_template_response};

use super::DashboardState;
use super::posts::post_service_error_to_http;
use super::selectors::PANEL;
use super::shared::{Toast, datastar_replace, push_toasts, template_render_http_error};

/// Datastar signals posted back by the editor form.
#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(super) struct EditorSignals {
    pub(super) id: String,
    pub(super) title: String,
    pub(super) slug: String,
    pub(super) slug_is_derived: bool,
    pub(super) status: String,
    pub(super) excerpt: String,
    pub(super) content: String,
    pub(super) cover_image: String,
}

impl Default for EditorSignals {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            slug: String::new(),
            slug_is_derived: true,
            status: PostStatus::Draft.as_str().to_string(),
            excerpt: String::new(),
            content: String::new(),
            cover_image: String::new(),
        }
    }
}

fn editor_view(state: &DashboardState, record: Option<&PostRecord>) -> EditorView {
    match record {
        Some(record) => EditorView {
            post_id: record.id.to_string(),
            is_new: false,
            heading: format!("Edit \u{201c}{}\u{201d}", record.title),
            content: record.content_html.clone(),
            cover_image: record.cover_image.clone(),
            title_error: None,
            slug_error: None,
            excerpt_error: None,
            cover_image_error: None,
            editor_config_json: state.editor_bootstrap_json.clone(),
        },
        None => EditorView {
            post_id: String::new(),
            is_new: true,
            heading: "New post".to_string(),
            content: String::new(),
            cover_image: String::new(),
            title_error: None,
            slug_error: None,
            excerpt_error: None,
            cover_image_error: None,
            editor_config_json: state.editor_bootstrap_json.clone(),
        },
    }
}

fn editor_signals_json(record: Option<&PostRecord>) -> String {
    match record {
        // Saved posts reopen with the slug pinned; Regenerate opts back in.
        Some(record) => {
            serde_json::json!({
                "id": record.id.to_string(),
                "title": record.title,
                "slug": record.slug,
                "slugIsDerived": false,
                "status": record.status.as_str(),
                "excerpt": record.excerpt,
                "content": record.content_html,
                "coverImage": record.cover_image,
                "submitting": false,
            })
        }
        None => serde_json::json!({
            "id": "",
            "title": "",
            "slug": "",
            "slugIsDerived": true,
            "status": "draft",
            "excerpt": "",
            "content": "",
            "coverImage": "",
            "submitting": false,
        }),
    }
    .to_string()
}

pub(super) async fn new_post_page(State(state): State<DashboardState>) -> Response {
    render_template_response(
        EditorPageTemplate {
            page_title: "New post".to_string(),
            signals_json: editor_signals_json(None),
            tinymce_src: state.tinymce_src.clone(),
            editor: editor_view(&state, None),
        },
        StatusCode::OK,
    )
}

pub(super) async fn edit_post_page(
    State(state): State<DashboardState>,
    Path(id): Path<Uuid>,
) -> Response {
    const SOURCE: &str = "infra::http::dashboard::edit_post_page";

    match state.posts.find(id).await {
        Ok(Some(record)) => render_template_response(
            EditorPageTemplate {
                page_title: format!("Edit: {}", record.title),
                signals_json: editor_signals_json(Some(&record)),
                tinymce_src: state.tinymce_src.clone(),
                editor: editor_view(&state, Some(&record)),
            },
            StatusCode::OK,
        ),
        Ok(None) => post_service_error_to_http(SOURCE, PostServiceError::NotFound).into_response(),
        Err(err) => post_service_error_to_http(SOURCE, err).into_response(),
    }
}

/// Validate and persist the editor submission. Success navigates back to the
/// listing; validation failures re-render the form panel with inline errors.
pub(super) async fn save_post(
    State(state): State<DashboardState>,
    Json(signals): Json<EditorSignals>,
) -> Response {
    const SOURCE: &str = "infra::http::dashboard::save_post";

    let id = match parse_optional_id(&signals.id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let Some(status) = PostStatus::parse(signals.status.trim()) else {
        return editor_error_toast("Status must be draft or published");
    };

    let draft = PostDraft {
        id,
        title: signals.title.clone(),
        slug: signals.slug.trim().to_string(),
        status,
        excerpt: signals.excerpt.clone(),
        content: signals.content.clone(),
        cover_image: signals.cover_image.trim().to_string(),
        author: None,
    };

    match state.posts.save(draft).await {
        Ok(saved) => {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("saved", &saved.record.title)
                .finish();
            let mut stream = StreamBuilder::new();
            stream.push_script(format!(
                "window.location.assign('/dashboard/posts?{query}');"
            ));
            stream.into_response()
        }
        Err(PostServiceError::Validation(errors)) => {
            render_editor_errors(&state, &signals, &errors)
        }
        Err(PostServiceError::DuplicateSlug { slug }) => {
            let mut errors = ValidationErrors::default();
            errors.push("slug", format!("slug `{slug}` is already in use"));
            render_editor_errors(&state, &signals, &errors)
        }
        Err(PostServiceError::NotFound) => {
            editor_error_toast("The post you are editing no longer exists")
        }
        Err(err) => {
            tracing::error!(target = SOURCE, error = %err, "failed to save post");
            editor_error_toast("Could not save the post")
        }
    }
}

fn parse_optional_id(raw: &str) -> Result<Option<Uuid>, Response> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match Uuid::parse_str(trimmed) {
        Ok(id) => Ok(Some(id)),
        Err(_) => Err(editor_error_toast("The editor lost track of the post id")),
    }
}

fn editor_error_toast(message: &str) -> Response {
    let mut stream = StreamBuilder::new();
    stream.push_signals(r#"{"submitting": false}"#);
    if let Err(err) = push_toasts(&mut stream, &[Toast::error(message)]) {
        return err.into_response();
    }
    stream.into_response()
}

fn render_editor_errors(
    state: &DashboardState,
    signals: &EditorSignals,
    errors: &ValidationErrors,
) -> Response {
    const SOURCE: &str = "infra::http::dashboard::render_editor_errors";

    let mut view = editor_view(state, None);
    view.post_id = signals.id.trim().to_string();
    view.is_new = view.post_id.is_empty();
    view.heading = if view.is_new {
        "New post".to_string()
    } else {
        format!("Edit \u{201c}{}\u{201d}", signals.title)
    };
    view.content = signals.content.clone();
    view.cover_image = signals.cover_image.clone();
    view.title_error = errors.get("title").map(str::to_string);
    view.slug_error = errors.get("slug").map(str::to_string);
    view.excerpt_error = errors.get("excerpt").map(str::to_string);
    view.cover_image_error = errors.get("coverImage").map(str::to_string);

    let html = match (EditorPanelTemplate { editor: view }).render() {
        Ok(html) => html,
        Err(err) => {
            return template_render_http_error(SOURCE, "Template rendering failed", err)
                .into_response();
        }
    };

    let mut stream = datastar_replace(PANEL, html);
    stream.push_signals(r#"{"submitting": false}"#);
    // The patched panel carries a fresh content textarea; the rich-text
    // widget must be booted onto it again.
    stream.push_script(
        "if (window.scrivanoEditor) { window.scrivanoEditor.rebind(); }".to_string(),
    );
    stream.into_response()
}

/// Re-derive the slug from the title, but only while it still tracks the title.
pub(super) async fn derive_slug(Json(signals): Json<EditorSignals>) -> Response {
    let mut field = SlugField::restore(signals.slug.clone(), signals.slug_is_derived);
    match field.title_changed(&signals.title) {
        Ok(true) => push_slug_signals(field.value(), None),
        Ok(false) => StreamBuilder::new().into_response(),
        Err(_) => push_slug_signals("", None),
    }
}

/// Force slug regeneration from the title, restoring the derived state.
pub(super) async fn regenerate_slug(Json(signals): Json<EditorSignals>) -> Response {
    let mut field = SlugField::restore(signals.slug.clone(), signals.slug_is_derived);
    match field.regenerate(&signals.title) {
        Ok(()) => push_slug_signals(field.value(), Some(true)),
        Err(_) => push_slug_signals("", Some(true)),
    }
}

fn push_slug_signals(slug: &str, derived: Option<bool>) -> Response {
    let payload = match derived {
        Some(derived) => serde_json::json!({ "slug": slug, "slugIsDerived": derived }),
        None => serde_json::json!({ "slug": slug }),
    };
    let mut stream = StreamBuilder::new();
    stream.push_signals(&payload.to_string());
    stream.into_response()
}

pub(super) async fn preview_post(
    State(state): State<DashboardState>,
    Path(id): Path<Uuid>,
) -> Response {
    const SOURCE: &str = "infra::http::dashboard::preview_post";

    match state.posts.find(id).await {
        Ok(Some(record)) => render_template_response(
            PreviewTemplate {
                title: record.title.clone(),
                content_html: ammonia::clean(&record.content_html),
                cover_image: record.cover_image.clone(),
                author_name: record.author_name.clone(),
                created_label: format_date(record.created_at),
            },
            StatusCode::OK,
        ),
        Ok(None) => post_service_error_to_http(SOURCE, PostServiceError::NotFound).into_response(),
        Err(err) => post_service_error_to_http(SOURCE, err).into_response(),
    }
}

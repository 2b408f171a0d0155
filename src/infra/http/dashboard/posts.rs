use askama::Template;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::error::HttpError;
use crate::application::posts::PostServiceError;
use crate::application::repos::PostQueryFilter;
use crate::application::stream::StreamBuilder;
use crate::domain::entities::PostRecord;
use crate::domain::types::PostStatus;
use crate::infra::http::repo_error_to_http;
use crate::presentation::dashboard::{
    PostRowView, PostsPageTemplate, PostsPanelTemplate, PostsPanelView,
};
use crate::presentation::views::{format_date, render_template_response};

use super::DashboardState;
use super::selectors::POSTS_PANEL;
use super::shared::{
    Toast, blank_to_none_opt, datastar_replace, push_toasts, template_render_http_error,
    toast_items,
};

pub(super) fn post_service_error_to_http(
    source: &'static str,
    err: PostServiceError,
) -> HttpError {
    match err {
        PostServiceError::Validation(errors) => HttpError::new(
            source,
            StatusCode::UNPROCESSABLE_ENTITY,
            "Submission failed validation",
            errors.summary(),
        ),
        PostServiceError::DuplicateSlug { slug } => HttpError::new(
            source,
            StatusCode::CONFLICT,
            "Slug already in use",
            format!("slug `{slug}` is already in use"),
        ),
        PostServiceError::NotFound => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Post not found",
            "post not found",
        ),
        PostServiceError::Repo(repo) => repo_error_to_http(source, repo),
    }
}

pub(super) fn post_row_view(record: &PostRecord) -> PostRowView {
    let (status_key, status_label) = match record.status {
        PostStatus::Published => ("published", "Published"),
        PostStatus::Draft => ("draft", "Draft"),
    };
    PostRowView {
        id: record.id.to_string(),
        title: record.title.clone(),
        status_key,
        status_label,
        author_name: record.author_name.clone(),
        created_label: format_date(record.created_at),
        edit_href: format!("/dashboard/posts/{}/edit", record.id),
        preview_href: format!("/dashboard/posts/{}/preview", record.id),
    }
}

async fn load_panel(
    state: &DashboardState,
    filter: &PostQueryFilter,
) -> Result<PostsPanelView, PostServiceError> {
    let records = state.posts.list(filter).await?;
    let rows = records.iter().map(post_row_view).collect::<Vec<_>>();
    let total = rows.len();
    Ok(PostsPanelView { rows, total })
}

/// Datastar signals posted back by the listing page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct PanelSignals {
    pub(super) search: String,
    pub(super) status: String,
}

impl PanelSignals {
    pub(super) fn filter(&self) -> PostQueryFilter {
        PostQueryFilter {
            search: blank_to_none_opt(Some(self.search.clone())),
            status: PostStatus::parse(self.status.trim()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct SavedQuery {
    saved: Option<String>,
}

pub(super) async fn posts_page(
    State(state): State<DashboardState>,
    Query(query): Query<SavedQuery>,
) -> Response {
    const SOURCE: &str = "infra::http::dashboard::posts_page";

    let panel = match load_panel(&state, &PostQueryFilter::default()).await {
        Ok(panel) => panel,
        Err(err) => return post_service_error_to_http(SOURCE, err).into_response(),
    };

    let toasts = match blank_to_none_opt(query.saved) {
        Some(title) => vec![Toast::success(format!("Saved \u{201c}{title}\u{201d}"))],
        None => Vec::new(),
    };

    let signals_json = serde_json::json!({
        "search": "",
        "status": "",
        "deleteId": "",
        "deleteTitle": "",
    })
    .to_string();

    render_template_response(
        PostsPageTemplate {
            page_title: "Posts",
            signals_json,
            panel,
            toasts: toast_items(&toasts),
        },
        StatusCode::OK,
    )
}

/// Rebuild the listing panel for the current search and status signals.
pub(super) async fn refresh_panel(
    State(state): State<DashboardState>,
    Json(signals): Json<PanelSignals>,
) -> Response {
    match render_panel(&state, &signals).await {
        Ok(stream) => stream.into_response(),
        Err(err) => err.into_response(),
    }
}

async fn render_panel(
    state: &DashboardState,
    signals: &PanelSignals,
) -> Result<StreamBuilder, HttpError> {
    const SOURCE: &str = "infra::http::dashboard::render_panel";

    let panel = load_panel(state, &signals.filter())
        .await
        .map_err(|err| post_service_error_to_http(SOURCE, err))?;

    let html = PostsPanelTemplate { panel }
        .render()
        .map_err(|err| template_render_http_error(SOURCE, "Template rendering failed", err))?;

    Ok(datastar_replace(POSTS_PANEL, html))
}

/// Delete a post, then rebuild the panel and dismiss the confirmation dialog.
/// On failure the dialog stays open and only an error toast is pushed.
pub(super) async fn delete_post(
    State(state): State<DashboardState>,
    Path(id): Path<Uuid>,
    Json(signals): Json<PanelSignals>,
) -> Response {
    const SOURCE: &str = "infra::http::dashboard::delete_post";

    if let Err(err) = state.posts.delete(id).await {
        let toast = match err {
            PostServiceError::NotFound => Toast::error("Post was already deleted"),
            other => {
                tracing::error!(target = SOURCE, error = %other, %id, "failed to delete post");
                Toast::error("Could not delete the post")
            }
        };
        let mut stream = StreamBuilder::new();
        if let Err(err) = push_toasts(&mut stream, &[toast]) {
            return err.into_response();
        }
        return stream.into_response();
    }

    let mut stream = match render_panel(&state, &signals).await {
        Ok(stream) => stream,
        Err(err) => return err.into_response(),
    };

    stream.push_signals(r#"{"deleteId": "", "deleteTitle": ""}"#);
    if let Err(err) = push_toasts(&mut stream, &[Toast::success("Post deleted")]) {
        return err.into_response();
    }
    stream.into_response()
}

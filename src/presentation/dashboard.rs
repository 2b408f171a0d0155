//! View models and templates for the authoring dashboard.

use askama::Template;

#[derive(Clone)]
pub struct ToastItem {
    pub id: String,
    pub kind: &'static str,
    pub text: String,
    pub ttl_ms: u64,
}

#[derive(Template)]
#[template(path = "dashboard/toast_stack.html")]
pub struct ToastStackTemplate {
    pub toasts: Vec<ToastItem>,
}

#[derive(Clone)]
pub struct PostRowView {
    pub id: String,
    pub title: String,
    pub status_key: &'static str,
    pub status_label: &'static str,
    pub author_name: String,
    pub created_label: String,
    pub edit_href: String,
    pub preview_href: String,
}

#[derive(Clone)]
pub struct PostsPanelView {
    pub rows: Vec<PostRowView>,
    pub total: usize,
}

#[derive(Template)]
#[template(path = "dashboard/posts_panel.html")]
pub struct PostsPanelTemplate {
    pub panel: PostsPanelView,
}

#[derive(Template)]
#[template(path = "dashboard/posts.html")]
pub struct PostsPageTemplate {
    pub page_title: &'static str,
    pub signals_json: String,
    pub panel: PostsPanelView,
    pub toasts: Vec<ToastItem>,
}

/// Server-rendered state of the editor form. Field values live in datastar
/// signals; the view carries identity, inline errors, and bootstrap JSON.
#[derive(Clone)]
pub struct EditorView {
    pub post_id: String,
    pub is_new: bool,
    pub heading: String,
    pub content: String,
    pub cover_image: String,
    pub title_error: Option<String>,
    pub slug_error: Option<String>,
    pub excerpt_error: Option<String>,
    pub cover_image_error: Option<String>,
    pub editor_config_json: String,
}

#[derive(Template)]
#[template(path = "dashboard/editor_panel.html")]
pub struct EditorPanelTemplate {
    pub editor: EditorView,
}

#[derive(Template)]
#[template(path = "dashboard/editor.html")]
pub struct EditorPageTemplate {
    pub page_title: String,
    pub signals_json: String,
    pub tinymce_src: String,
    pub editor: EditorView,
}

#[derive(Template)]
#[template(path = "dashboard/preview.html")]
pub struct PreviewTemplate {
    pub title: String,
    pub content_html: String,
    pub cover_image: String,
    pub author_name: String,
    pub created_label: String,
}

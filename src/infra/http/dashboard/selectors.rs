//! Shared CSS selectors used by dashboard datastar responses.

pub const PANEL: &str = "[data-role=\"panel\"]";
pub const TOAST_STACK: &str = "[data-dashboard-toast=\"stack\"]";

pub const POSTS_PANEL: &str = "[data-dashboard-panel=\"posts\"]";

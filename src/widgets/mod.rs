//! Reference widgets built on [`Context`]: ProgressBar, SpriteButton.
//!
//! Widgets are plain functions. Each checks that no draw scope is open and
//! resolves its style before touching the painter, so a failed call leaves
//! neither an open scope nor pending painter state behind.

pub mod progress_bar;
pub mod sprite_button;

pub use progress_bar::progress_bar;
pub use sprite_button::sprite_button;

use thiserror::Error;

use crate::context::{Context, ContextError, Input, Painter, Scope};
use crate::style::registry::is_known_selector;
use crate::style::StyleError;

/// Failure of a widget call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WidgetError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Style(#[from] StyleError),
}

/// Reject a widget call made inside another widget's draw scope.
pub(crate) fn ensure_draw_closed<I: Input, P: Painter>(
    ctx: &Context<I, P>,
) -> Result<(), ContextError> {
    if ctx.is_draw_open() {
        tracing::debug!("widget called inside an open draw scope");
        return Err(ContextError::AlreadyOpen(Scope::Draw));
    }
    Ok(())
}

/// The selector a widget styles itself with: the widget-id override when one
/// is set, else `default`.
pub(crate) fn resolve_selector<I: Input, P: Painter>(ctx: &Context<I, P>, default: &str) -> String {
    ctx.widget_id().unwrap_or(default).to_owned()
}

/// `selector:hover` when that is a registered selector, else `selector` itself.
pub(crate) fn hover_selector(selector: &str) -> String {
    let hover = format!("{selector}:hover");
    if is_known_selector(&hover) {
        hover
    } else {
        selector.to_owned()
    }
}

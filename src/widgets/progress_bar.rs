//! Progress bar: a background track with a filled portion.

use crate::context::{Context, Input, Painter};
use crate::widgets::{ensure_draw_closed, resolve_selector, WidgetError};

const PROGRESS_BAR: &str = "progress-bar";

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= f32::EPSILON * a.abs().max(b.abs()).max(1.0)
}

/// Draw a progress bar `w` wide showing `value` within `min..=max`.
///
/// Styled by the widget-id override when one is set, else by `progress-bar`.
/// Nothing past the track is drawn when `value` equals `min`; the fill is
/// clamped to the track otherwise.
pub fn progress_bar<I: Input, P: Painter>(
    ctx: &mut Context<I, P>,
    min: f32,
    value: f32,
    max: f32,
    w: f32,
) -> Result<(), WidgetError> {
    ensure_draw_closed(ctx)?;
    let selector = resolve_selector(ctx, PROGRESS_BAR);
    let style = ctx.style();
    let properties = style.properties(&selector)?;
    let background = properties.color("background-color")?;
    let fill = properties.color("color")?;
    let widget_height = style.metrics.widget.height;
    let h = style.metrics.progress_bar.height;

    ctx.begin_draw(w, widget_height)?;

    let painter = ctx.painter_mut();
    painter.set_color(background);
    painter.move_by(0.0, (widget_height - h) / 2.0);
    painter.draw_rect(w, h);

    if !approx_eq(value, min) {
        let pw = if approx_eq(value, max) {
            w
        } else {
            ((value - min) / (max - min) * w).clamp(0.0, w)
        };
        painter.set_color(fill);
        painter.draw_rect(pw, h);
    }

    ctx.end_draw()?;
    Ok(())
}

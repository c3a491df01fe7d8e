//! Sprite button: a clickable button with a texture sprite left of its label.

use crate::context::{Context, Input, Painter, TextOptions};
use crate::style::{ImageRef, Style};
use crate::widgets::{ensure_draw_closed, hover_selector, resolve_selector, WidgetError};

const SPRITE_BUTTON: &str = "sprite-button";

/// Draw a sprite button showing `dictionary/name` and `text`; returns whether it
/// was clicked this frame.
///
/// With no literal `text`, the label comes from the effective text entry. The
/// width is the widget-width override when one is set, otherwise it fits the
/// label, sprite and spacing.
pub fn sprite_button<I: Input, P: Painter>(
    ctx: &mut Context<I, P>,
    dictionary: &str,
    name: &str,
    text: Option<&str>,
) -> Result<bool, WidgetError> {
    ensure_draw_closed(ctx)?;
    let selector = resolve_selector(ctx, SPRITE_BUTTON);
    let hover = hover_selector(&selector);

    let style = ctx.style();
    let base = style.properties(&selector)?;
    let options = TextOptions {
        font: base.integer("font-family")?,
        scale: base.size("font-size")?,
    };
    let idle = (base.color("background-color")?, base.color("color")?);
    let hot = (
        style.color(&hover, "background-color")?,
        style.color(&hover, "color")?,
    );
    let metrics = style.metrics;

    let entry = ctx.text().cloned();
    let painter = ctx.painter_mut();
    painter.set_text(text);
    painter.set_text_entry(entry.as_ref());
    painter.set_text_options(options);

    let sw = metrics.sprite_button.sprite_width;
    let spacing = metrics.button.spacing;
    let fitted = ctx.painter().text_width() + spacing * 2.0 + metrics.sprite_button.spacing + sw;
    let w = ctx.widget_width().unwrap_or(fitted);
    let h = metrics.widget.height;

    ctx.begin_draw(w, h)?;

    // The painter reported a rectangle at begin_draw; a painter that does not is
    // treated as never hovered.
    let (background, foreground) = if ctx.is_widget_hovered().unwrap_or(false) {
        hot
    } else {
        idle
    };

    let sh = sw * ctx.painter().aspect_ratio();
    let so = (h - sh) / 2.0;

    let painter = ctx.painter_mut();
    painter.set_color(background);
    painter.draw_rect(w, h);

    painter.set_color(Style::SPRITE_COLOR);
    painter.move_by(spacing, so);
    painter.draw_sprite(&ImageRef::new(dictionary, name), sw, sh);

    painter.move_by(sw + metrics.sprite_button.spacing, -so);
    painter.set_color(foreground);
    painter.draw_text();

    ctx.end_draw()?;

    Ok(ctx.is_widget_clicked()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ContextError, Scope};
    use crate::style::Color;
    use crate::testing::{commands_to_string, PaintCommand, RecordingPainter, ScriptedInput};
    use pretty_assertions::assert_eq;

    fn painter() -> RecordingPainter {
        let mut painter = RecordingPainter::default();
        painter.aspect_ratio = 0.5;
        let metrics = &mut painter.style_mut().metrics;
        metrics.widget.height = 0.0625;
        metrics.button.spacing = 0.0078125;
        metrics.sprite_button.sprite_width = 0.0625;
        metrics.sprite_button.spacing = 0.0078125;
        painter
    }

    fn background(commands: &[PaintCommand]) -> Option<Color> {
        let rect = commands
            .iter()
            .position(|c| matches!(c, PaintCommand::Rect { .. }))?;
        match commands[..rect].last() {
            Some(PaintCommand::SetColor(color)) => Some(*color),
            _ => None,
        }
    }

    #[test]
    fn idle_layout() {
        let mut ctx = Context::new(ScriptedInput::default(), painter());
        ctx.begin_window(None, None).unwrap();
        let clicked = sprite_button(&mut ctx, "commonui", "play", Some("Go")).unwrap();
        ctx.end_window().unwrap();

        assert!(!clicked);
        insta::assert_snapshot!(commands_to_string(ctx.painter().commands()), @r#"
        begin_window 0.5 0.5
        text "Go"
        text_entry none
        font 0 0.325
        begin_draw 0.2109375 0.0625
        color 22 25 35 255
        rect 0.5 0.5 0.2109375 0.0625
        color 254 254 254 255
        move 0.0078125 0.015625
        sprite commonui/play 0.5078125 0.515625 0.0625 0.03125
        move 0.0703125 -0.015625
        color 255 255 240 255
        draw_text 0.578125 0.5 "Go"
        end_draw
        end_window
        "#);
    }

    #[test]
    fn hovered_uses_hover_colors() {
        let mut ctx = Context::new(ScriptedInput::default().at(0.55, 0.52), painter());
        ctx.begin_window(None, None).unwrap();
        let clicked = sprite_button(&mut ctx, "commonui", "play", Some("Go")).unwrap();
        assert!(!clicked);
        assert_eq!(
            background(ctx.painter().commands()),
            Some(Color::rgb(244, 5, 82))
        );
    }

    #[test]
    fn pressed_while_hovered_is_a_click() {
        let mut ctx = Context::new(ScriptedInput::default().at(0.55, 0.52).pressed(), painter());
        ctx.begin_window(None, None).unwrap();
        assert!(sprite_button(&mut ctx, "commonui", "play", Some("Go")).unwrap());

        ctx.input_mut().pointer.y = 0.9;
        assert!(!sprite_button(&mut ctx, "commonui", "play", Some("Go")).unwrap());
    }

    #[test]
    fn width_override_and_text_entry() {
        let mut ctx = Context::new(ScriptedInput::default(), painter());
        ctx.set_next_widget_width(0.5);
        ctx.set_next_text_entry("MENU_PLAY");
        sprite_button(&mut ctx, "commonui", "play", None).unwrap();

        let commands = ctx.painter().commands();
        assert!(commands.contains(&PaintCommand::SetTextEntry(Some("MENU_PLAY".into()))));
        assert!(commands.contains(&PaintCommand::BeginDraw {
            width: 0.5,
            height: 0.0625,
        }));
        let label_drawn = commands
            .iter()
            .any(|c| matches!(c, PaintCommand::Text { text, .. } if text == "MENU_PLAY"));
        assert!(label_drawn);
        assert_eq!(ctx.widget_width(), None);
        assert_eq!(ctx.text_entry(), None);
    }

    #[test]
    fn widget_id_selects_other_styles() {
        let mut p = painter();
        p.style_mut()
            .set("button { background-color: #010203; font-family: 2; }")
            .unwrap();
        let mut ctx = Context::new(ScriptedInput::default(), p);
        ctx.set_next_widget_id("button");
        sprite_button(&mut ctx, "commonui", "play", Some("Go")).unwrap();

        let commands = ctx.painter().commands();
        assert_eq!(background(commands), Some(Color::rgb(1, 2, 3)));
        assert!(commands.contains(&PaintCommand::SetTextOptions(TextOptions {
            font: 2,
            scale: 0.325,
        })));
    }

    #[test]
    fn selector_without_hover_variant_is_its_own_hover() {
        let mut ctx = Context::new(ScriptedInput::default().at(0.01, 0.01), painter());
        ctx.set_next_widget_id("label");
        ctx.painter_mut()
            .style_mut()
            .set("label { background-color: #0a0b0c; font-family: 1; font-size: 0.5em; }")
            .unwrap();
        sprite_button(&mut ctx, "commonui", "play", Some("Go")).unwrap();
        assert_eq!(
            background(ctx.painter().commands()),
            Some(Color::rgb(10, 11, 12))
        );
    }

    #[test]
    fn missing_property_is_reported_before_drawing() {
        let mut ctx = Context::new(ScriptedInput::default(), painter());
        ctx.set_next_widget_id("separator");
        let err = sprite_button(&mut ctx, "commonui", "play", None).unwrap_err();
        assert!(matches!(err, WidgetError::Style(_)));
        assert!(!ctx.is_draw_open());
        assert!(ctx.painter().commands().is_empty());
    }

    #[test]
    fn open_draw_scope_is_rejected_before_painting() {
        let mut ctx = Context::new(ScriptedInput::default(), painter());
        ctx.begin_draw(0.1, 0.1).unwrap();
        let before = ctx.painter().commands().len();

        let err = sprite_button(&mut ctx, "commonui", "play", Some("Go")).unwrap_err();

        assert_eq!(
            err,
            WidgetError::Context(ContextError::AlreadyOpen(Scope::Draw))
        );
        assert_eq!(ctx.painter().commands().len(), before);
        assert_eq!(ctx.painter().text_width(), 0.0);
        ctx.end_draw().unwrap();
    }
}

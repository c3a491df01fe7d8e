//! Snapshot helpers.
//!
//! Convert a recorded command log into plain text, one command per line, for
//! `insta` inline snapshots and plain string assertions.

use crate::testing::recorder::PaintCommand;

/// Render commands one per line. The final line has no trailing newline.
pub fn commands_to_string(commands: &[PaintCommand]) -> String {
    join_lines(commands)
}

/// Render only the commands that produce output (rectangles, sprites, text).
pub fn draws_to_string(commands: &[PaintCommand]) -> String {
    join_lines(commands.iter().filter(|c| is_draw(c)))
}

fn is_draw(command: &PaintCommand) -> bool {
    matches!(
        command,
        PaintCommand::Rect { .. } | PaintCommand::Sprite { .. } | PaintCommand::Text { .. }
    )
}

fn join_lines<'a>(commands: impl IntoIterator<Item = &'a PaintCommand>) -> String {
    let lines: Vec<String> = commands.into_iter().map(ToString::to_string).collect();
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;

    #[test]
    fn empty_log_is_empty_string() {
        assert_eq!(commands_to_string(&[]), "");
    }

    #[test]
    fn one_command_per_line() {
        let commands = vec![
            PaintCommand::BeginWindow(Position::new(0.5, 0.25)),
            PaintCommand::Rect {
                x: 0.5,
                y: 0.25,
                width: 1.0,
                height: 0.5,
            },
            PaintCommand::EndWindow,
        ];
        insta::assert_snapshot!(commands_to_string(&commands), @r"
        begin_window 0.5 0.25
        rect 0.5 0.25 1 0.5
        end_window
        ");
        assert_eq!(draws_to_string(&commands), "rect 0.5 0.25 1 0.5");
    }
}

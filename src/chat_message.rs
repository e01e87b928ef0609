use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

use crate::models::MessageAuthor;

/// One chat bubble, rendered as a framed block of wrapped lines.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub content: String,
    pub author: MessageAuthor,
    timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(content: String, author: MessageAuthor) -> Self {
        Self {
            content,
            author,
            timestamp: Local::now(),
        }
    }

    pub fn render(&self, area: Rect) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let style = self.base_style();
        let indent = self.indent();

        let label = match self.author {
            MessageAuthor::User => "Você",
            MessageAuthor::Bot => "Gito",
        };

        lines.push(Line::from(vec![
            Span::styled(indent.to_string(), style),
            Span::styled("┌─".to_string(), style),
            Span::styled(format!("{} ", label), style.add_modifier(Modifier::BOLD)),
            Span::styled(
                self.timestamp.format("%H:%M").to_string(),
                style.add_modifier(Modifier::DIM),
            ),
        ]));

        let wrap_width = (area.width as usize).saturating_sub(6);
        for paragraph in self.content.lines() {
            if paragraph.is_empty() {
                lines.push(Line::from(vec![
                    Span::styled(indent.to_string(), style),
                    Span::styled("│".to_string(), style),
                ]));
                continue;
            }
            // Bullet lines from the model keep a hanging indent.
            let bullet = paragraph.trim_start().starts_with('*');
            for (i, wrapped_line) in wrap(paragraph, wrap_width).iter().enumerate() {
                let prefix = if bullet && i > 0 { "│   " } else { "│ " };
                lines.push(Line::from(vec![
                    Span::styled(indent.to_string(), style),
                    Span::styled(prefix.to_string(), style),
                    Span::styled(wrapped_line.to_string(), style),
                ]));
            }
        }

        lines.push(Line::from(vec![
            Span::styled(indent.to_string(), style),
            Span::styled("╰─".to_string(), style),
        ]));

        lines
    }

    fn base_style(&self) -> Style {
        match self.author {
            MessageAuthor::User => Style::default().fg(Color::Rgb(255, 223, 128)),
            MessageAuthor::Bot => Style::default().fg(Color::Rgb(144, 238, 144)),
        }
    }

    fn indent(&self) -> &'static str {
        match self.author {
            MessageAuthor::User => "  ",
            MessageAuthor::Bot => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_frames_the_message() {
        let msg = ChatMessage::new("Olá, preciso de ajuda.".to_string(), MessageAuthor::User);
        let area = Rect::new(0, 0, 60, 20);
        let lines = msg.render(area);
        // Header, one content line, footer.
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_render_wraps_long_content() {
        let long = "palavra ".repeat(40);
        let msg = ChatMessage::new(long, MessageAuthor::Bot);
        let lines = msg.render(Rect::new(0, 0, 30, 20));
        assert!(lines.len() > 3);
    }
}

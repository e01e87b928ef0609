use crate::app::App;
use crate::chat_message::ChatMessage;
use crate::models::MessageAuthor;
use crate::resolver::ResponseResolver;
use crate::ui::{draw_banner, draw_key_hints};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use unicode_width::UnicodeWidthStr;

pub fn draw_chat(f: &mut Frame, app: &mut App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    draw_banner(f, outer[0], app, "Portal do Estudante");

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)].as_ref())
        .split(outer[1]);

    let chat_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(columns[0]);

    draw_messages(f, app, chat_chunks[0]);
    app.status_indicator.render(f, chat_chunks[1]);
    draw_input(f, app, chat_chunks[2]);
    draw_sidebar(f, app, columns[1]);

    draw_key_hints(
        f,
        outer[2],
        &[
            ("Enter", "enviar"),
            ("PgUp/PgDn", "rolar"),
            ("Ctrl+B", "base de conhecimento"),
            ("Ctrl+L", "sair da sessão"),
        ],
    );
}

fn draw_messages(f: &mut Frame, app: &mut App, area: Rect) {
    let mut lines = Vec::new();
    for message in &app.chat_messages {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(message.render(area));
    }

    let total_lines = lines.len() as u16;
    let max_scroll = total_lines.saturating_sub(area.height);
    if app.chat_scroll > max_scroll {
        app.chat_scroll = max_scroll;
    }

    let msgs_para = Paragraph::new(lines)
        .block(Block::default())
        .wrap(Wrap { trim: false });
    f.render_widget(msgs_para.scroll((app.chat_scroll, 0)), area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let separator = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator.clone(),
            Style::default().fg(Color::DarkGray),
        ))),
        Rect { height: 1, ..area },
    );

    let (prefix, input_style) = if app.chat_thinking {
        ("⏳ ", Style::default().fg(Color::DarkGray))
    } else {
        ("→ ", Style::default().fg(Color::White))
    };

    let input = Line::from(vec![
        Span::styled(prefix, Style::default().fg(Color::DarkGray)),
        Span::styled(app.chat_input.clone(), input_style),
    ]);

    let (text_width, scroll_offset) = input_metrics(&app.chat_input, area.width.saturating_sub(2));

    f.render_widget(
        Paragraph::new(input).scroll((0, scroll_offset)),
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );

    if !app.chat_thinking {
        let cursor_x = area.x + 2 + text_width - scroll_offset;
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}

/// Display width of the input and how far the line must scroll to keep the
/// cursor visible. Width is measured in terminal columns, not bytes, so
/// accented input ("matrícula") does not push the cursor past the text.
fn input_metrics(input: &str, visible_width: u16) -> (u16, u16) {
    let text_width = input.width() as u16;
    (text_width, text_width.saturating_sub(visible_width))
}

fn draw_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(7)].as_ref())
        .split(area);

    let mut category_lines = vec![Line::from(Span::styled(
        "Acesso Rápido",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for category in app.store.categories() {
        category_lines.push(Line::from(vec![
            Span::styled("• ", Style::default().fg(Color::DarkGray)),
            Span::raw(category.name.clone()),
        ]));
    }
    let categories_para = Paragraph::new(category_lines)
        .block(Block::default().borders(Borders::LEFT))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(categories_para, chunks[0]);

    let tips = Paragraph::new(
        "Dicas de uso:\n\
         Pergunte sobre \"prazos de matrícula\"\n\
         ou \"calendário académico\".\n\
         Consulte \"emissão de certificados\"\n\
         ou \"acesso ao e-Learning\".",
    )
    .block(Block::default().borders(Borders::LEFT))
    .style(Style::default().fg(Color::DarkGray))
    .wrap(Wrap { trim: true });
    f.render_widget(tips, chunks[1]);
}

/// Resolves one query against a snapshot of the knowledge base and pushes
/// the bot reply. The `chat_thinking` flag set by the caller keeps further
/// submissions disabled until this finishes, so at most one call is in
/// flight.
pub async fn chat_task(app: Arc<Mutex<App>>, user_input: String) {
    let (faqs, categories) = {
        let guard = app.lock().await;
        (
            guard.store.faqs().to_vec(),
            guard.store.categories().to_vec(),
        )
    };

    let resolver = ResponseResolver::from_config();
    log::debug!(
        "resolving query ({} faqs, service_backed={})",
        faqs.len(),
        resolver.service_backed()
    );
    let answer = resolver.resolve(&user_input, &faqs, &categories).await;

    let mut guard = app.lock().await;
    guard
        .chat_messages
        .push(ChatMessage::new(answer, MessageAuthor::Bot));
    guard.chat_thinking = false;
    guard.status_indicator.set_thinking(false);
    guard.scroll_chat_to_bottom();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_metrics_counts_columns_not_bytes() {
        // "matrícula" is 10 bytes but occupies 9 columns.
        let (width, scroll) = input_metrics("matrícula", 20);
        assert_eq!(width, 9);
        assert_eq!(scroll, 0);
    }

    #[test]
    fn test_input_metrics_scrolls_past_visible_width() {
        let (width, scroll) = input_metrics("inscrição de exames", 10);
        assert_eq!(width, 19);
        assert_eq!(scroll, 9);
    }
}

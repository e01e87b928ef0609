// src/ui.rs

use crate::app::{App, AppScreen};
use crate::models::Role;
use crate::{chat_view, faq_manager_view, home_view, kb_view, login_view, register_view};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &mut App) {
    match app.screen {
        AppScreen::Home => home_view::draw_home(f, app),
        AppScreen::Login => login_view::draw_login(f, app),
        AppScreen::Register => register_view::draw_register(f, app),
        AppScreen::KnowledgeBase => kb_view::draw_knowledge_base(f, app),
        AppScreen::Chat => chat_view::draw_chat(f, app),
        AppScreen::FaqManager => faq_manager_view::draw_faq_manager(f, app),
        AppScreen::QuitConfirm => {
            match app.session.as_ref().map(|u| u.role) {
                Some(Role::Admin) => faq_manager_view::draw_faq_manager(f, app),
                Some(Role::Student) => chat_view::draw_chat(f, app),
                None => home_view::draw_home(f, app),
            }
            draw_quit_confirm(f);
        }
        AppScreen::Quit => {}
    }
}

/// Banner shared by every screen: logo on the left, screen title and the
/// session identity on the right.
pub fn draw_banner(f: &mut Frame, area: Rect, app: &App, title: &str) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(1)].as_ref())
        .split(area);

    let logo = Paragraph::new("🎓 UCM-FEG Beira")
        .style(
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left);
    f.render_widget(logo, chunks[0]);

    let identity = match &app.session {
        Some(user) => format!(
            "{} — {}",
            title,
            user.name.split_whitespace().next().unwrap_or(&user.name)
        ),
        None => title.to_string(),
    };
    let title_para = Paragraph::new(identity)
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Right);
    f.render_widget(title_para, chunks[1]);
}

/// Footer line listing the keys a screen responds to.
pub fn draw_key_hints(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::styled(
            format!(" {}", label),
            Style::default().fg(Color::DarkGray),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Centered floating area, used by the modals.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}

fn draw_quit_confirm(f: &mut Frame) {
    let area = centered_rect(40, 20, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Sair ")
        .style(Style::default().fg(Color::LightRed));
    let text = Paragraph::new("Tem a certeza que deseja sair? (s/n)")
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(text, area);
}

/// A single labeled input line used on the auth forms.
pub fn draw_form_field(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    mask: bool,
) {
    let shown = if mask {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    };

    let style = if focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let marker = if focused { "▸ " } else { "  " };

    let line = Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Yellow)),
        Span::styled(format!("{:<10}", label), style.add_modifier(Modifier::BOLD)),
        Span::styled(shown, style),
        Span::styled(if focused { "█" } else { "" }, Style::default().fg(Color::White)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

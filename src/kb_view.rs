use crate::app::{App, KbTab};
use crate::ui::{draw_banner, draw_key_hints};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs, Wrap},
    Frame,
};
use textwrap::wrap;

pub fn draw_knowledge_base(f: &mut Frame, app: &mut App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(4),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    draw_banner(f, outer[0], app, "Base de Conhecimento");

    let stats = Paragraph::new(format!(
        "Total de Perguntas: {}   Categorias: {}   Visualizações Totais: {}",
        app.store.faqs().len(),
        app.store.categories().len(),
        app.store.total_views()
    ))
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(stats, outer[1]);

    let tab_index = match app.kb.tab {
        KbTab::Categories => 0,
        KbTab::Popular => 1,
    };
    let tabs = Tabs::new(vec!["Por Categoria", "Mais Populares"])
        .select(tab_index)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, outer[2]);

    draw_entries(f, app, outer[3]);

    draw_key_hints(
        f,
        outer[4],
        &[
            ("Tab", "mudar aba"),
            ("↑/↓", "navegar"),
            ("Enter", "expandir"),
            ("Esc", "voltar"),
        ],
    );
}

fn draw_entries(f: &mut Frame, app: &mut App, area: Rect) {
    let visible_ids = app.kb_visible_ids();
    if app.kb.selected >= visible_ids.len() && !visible_ids.is_empty() {
        app.kb.selected = visible_ids.len() - 1;
    }

    let wrap_width = (area.width as usize).saturating_sub(8);
    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0usize;

    match app.kb.tab {
        KbTab::Categories => {
            let mut row = 0usize;
            for category in app.store.categories() {
                let entries = app.store.by_category(&category.id);
                if entries.is_empty() {
                    continue;
                }
                lines.push(Line::from(Span::styled(
                    category.name.clone(),
                    Style::default()
                        .fg(Color::LightBlue)
                        .add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(
                    category.description.clone(),
                    Style::default().fg(Color::DarkGray),
                )));
                for faq in entries {
                    if row == app.kb.selected {
                        selected_line = lines.len();
                    }
                    push_entry(
                        &mut lines,
                        None,
                        &faq.question,
                        &faq.answer,
                        faq.views,
                        None,
                        row == app.kb.selected,
                        app.kb.expanded.as_deref() == Some(faq.id.as_str()),
                        wrap_width,
                    );
                    row += 1;
                }
                lines.push(Line::from(""));
            }
        }
        KbTab::Popular => {
            for (row, faq) in app.store.popular(10).into_iter().enumerate() {
                if row == app.kb.selected {
                    selected_line = lines.len();
                }
                let label = app.store.category_label(&faq.category_id).to_string();
                push_entry(
                    &mut lines,
                    Some(row + 1),
                    &faq.question,
                    &faq.answer,
                    faq.views,
                    Some(label),
                    row == app.kb.selected,
                    app.kb.expanded.as_deref() == Some(faq.id.as_str()),
                    wrap_width,
                );
            }
        }
    }

    // Keep the selected entry on screen.
    let max_scroll = (lines.len() as u16).saturating_sub(area.height);
    let mut scroll = app.kb.scroll.min(max_scroll);
    let selected_line = selected_line as u16;
    if selected_line < scroll {
        scroll = selected_line;
    } else if selected_line >= scroll + area.height {
        scroll = selected_line + 1 - area.height;
    }
    app.kb.scroll = scroll;

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(para.scroll((scroll, 0)), area);
}

#[allow(clippy::too_many_arguments)]
fn push_entry(
    lines: &mut Vec<Line<'static>>,
    rank: Option<usize>,
    question: &str,
    answer: &str,
    views: u64,
    category_label: Option<String>,
    selected: bool,
    expanded: bool,
    wrap_width: usize,
) {
    let marker = if selected { "▸ " } else { "  " };
    let style = if selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut spans = vec![Span::styled(marker.to_string(), Style::default().fg(Color::Yellow))];
    if let Some(rank) = rank {
        spans.push(Span::styled(
            format!("{:>2}. ", rank),
            Style::default().fg(Color::LightBlue),
        ));
    }
    spans.push(Span::styled(question.to_string(), style));
    if let Some(label) = category_label {
        spans.push(Span::styled(
            format!("  [{}]", label),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans.push(Span::styled(
        format!("  ({} visualizações)", views),
        Style::default().fg(Color::DarkGray),
    ));
    lines.push(Line::from(spans));

    if expanded {
        for wrapped in wrap(answer, wrap_width) {
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled("│ ".to_string(), Style::default().fg(Color::LightBlue)),
                Span::styled(wrapped.to_string(), Style::default().fg(Color::Gray)),
            ]));
        }
    }
}

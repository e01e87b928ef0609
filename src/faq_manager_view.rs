use crate::app::{App, EditorField, FaqEditor};
use crate::ui::{centered_rect, draw_banner, draw_key_hints};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn draw_faq_manager(f: &mut Frame, app: &mut App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(4),
                Constraint::Length(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    draw_banner(f, outer[0], app, "Gerir Base de Conhecimento");
    draw_search(f, app, outer[1]);
    draw_table(f, app, outer[2]);

    if let Some(notice) = &app.manager.notice {
        let para = Paragraph::new(notice.as_str()).style(Style::default().fg(Color::LightGreen));
        f.render_widget(para, outer[3]);
    }

    draw_key_hints(
        f,
        outer[4],
        &[
            ("a", "adicionar"),
            ("e", "editar"),
            ("d", "apagar"),
            ("/", "pesquisar"),
            ("Ctrl+T", "testar chat"),
            ("Ctrl+L", "sair da sessão"),
        ],
    );

    if app.manager.pending_delete.is_some() {
        draw_delete_confirm(f);
    }
    if let Some(editor) = &app.manager.editor {
        draw_editor(f, app, editor);
    }
}

fn draw_search(f: &mut Frame, app: &App, area: Rect) {
    let style = if app.manager.searching {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let line = Line::from(vec![
        Span::styled("🔍 Pesquisar: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.manager.search.clone(), style),
        Span::styled(
            if app.manager.searching { "█" } else { "" },
            Style::default().fg(Color::White),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_table(f: &mut Frame, app: &mut App, area: Rect) {
    let ids = app.filtered_faq_ids();
    if app.manager.selected >= ids.len() && !ids.is_empty() {
        app.manager.selected = ids.len() - 1;
    }

    if ids.is_empty() {
        let empty = Paragraph::new("Nenhuma FAQ encontrada.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    }

    let question_width = (area.width as usize).saturating_sub(40).max(20);
    let rows: Vec<Row> = ids
        .iter()
        .enumerate()
        .filter_map(|(i, id)| app.store.faq(id).map(|faq| (i, faq)))
        .map(|(i, faq)| {
            let style = if i == app.manager.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Row::new(vec![
                Cell::from(truncate(&faq.question, question_width)),
                Cell::from(app.store.category_label(&faq.category_id).to_string()),
                Cell::from(faq.views.to_string()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(26),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new(vec!["Pergunta", "Categoria", "Vistas"]).style(
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        ),
    )
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(table, area);
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        if out.width() + 1 >= max_width {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

fn draw_delete_confirm(f: &mut Frame) {
    let area = centered_rect(50, 20, f.area());
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Apagar FAQ ")
        .style(Style::default().fg(Color::LightRed));
    let text = Paragraph::new(
        "Tem a certeza que deseja apagar esta FAQ?\nEsta ação é irreversível. (s/n)",
    )
    .alignment(Alignment::Center)
    .block(block);
    f.render_widget(text, area);
}

fn draw_editor(f: &mut Frame, app: &App, editor: &FaqEditor) {
    let area = centered_rect(70, 70, f.area());
    f.render_widget(Clear, area);

    let title = if editor.id.is_some() {
        " Editar FAQ "
    } else {
        " Adicionar Nova FAQ "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().fg(Color::LightBlue));
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);

    draw_editor_field(
        f,
        rows[0],
        "Pergunta",
        &editor.question,
        editor.focus == EditorField::Question,
    );

    let category_name = app
        .store
        .categories()
        .get(editor.category_idx)
        .map(|c| c.name.clone())
        .unwrap_or_default();
    draw_editor_field(
        f,
        rows[1],
        "Categoria (←/→)",
        &category_name,
        editor.focus == EditorField::Category,
    );

    let answer_focused = editor.focus == EditorField::Answer;
    let answer_style = if answer_focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let answer_label = Line::from(Span::styled(
        if answer_focused { "▸ Resposta" } else { "  Resposta" },
        answer_style.add_modifier(Modifier::BOLD),
    ));
    let mut answer_lines = vec![answer_label];
    for line in editor.answer.lines() {
        answer_lines.push(Line::from(Span::styled(
            format!("  {}", line),
            answer_style,
        )));
    }
    if answer_focused {
        if let Some(last) = answer_lines.last_mut() {
            last.spans.push(Span::styled("█", Style::default().fg(Color::White)));
        }
    }
    f.render_widget(
        Paragraph::new(answer_lines).wrap(Wrap { trim: false }),
        rows[2],
    );

    if let Some(error) = &editor.error {
        let para = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        f.render_widget(para, rows[3]);
    }

    let hints = Paragraph::new("Tab: mudar campo · Ctrl+S: salvar · Esc: cancelar")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(hints, rows[4]);
}

fn draw_editor_field(f: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let style = if focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let marker = if focused { "▸ " } else { "  " };
    let line = Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("{:<18}", label),
            style.add_modifier(Modifier::BOLD),
        ),
        Span::styled(value.to_string(), style),
        Span::styled(
            if focused { "█" } else { "" },
            Style::default().fg(Color::White),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

use crate::app::App;
use crate::ui::{draw_banner, draw_key_hints};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw_home(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(4),
                Constraint::Min(8),
                Constraint::Length(3),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    draw_banner(f, chunks[0], app, "Assistente Virtual");

    let intro = Paragraph::new(
        "Bem-vindo ao assistente virtual da Faculdade de Economia e Gestão.\n\
         O Gito responde a perguntas sobre matrículas, propinas, calendário\n\
         académico, documentos e acesso aos sistemas da universidade.",
    )
    .style(Style::default().fg(Color::Gray))
    .alignment(Alignment::Center);
    f.render_widget(intro, chunks[1]);

    let items: Vec<ListItem> = app
        .home_items
        .iter()
        .enumerate()
        .map(|(i, &item)| {
            if i == app.home_selected {
                ListItem::new(item).style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::LightBlue)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ListItem::new(item).style(Style::default().fg(Color::White))
            }
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Menu Principal "),
    );
    let list_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ]
            .as_ref(),
        )
        .split(chunks[2])[1];
    f.render_widget(list, list_area);

    let stats = Paragraph::new(format!(
        "{} perguntas · {} categorias · {} visualizações",
        app.store.faqs().len(),
        app.store.categories().len(),
        app.store.total_views()
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    f.render_widget(stats, chunks[3]);

    draw_key_hints(
        f,
        chunks[4],
        &[
            ("↑/↓", "navegar"),
            ("Enter", "selecionar"),
            ("q", "sair"),
        ],
    );
}

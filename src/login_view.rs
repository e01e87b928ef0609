use crate::app::App;
use crate::ui::{centered_rect, draw_banner, draw_form_field, draw_key_hints};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_login(f: &mut Frame, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    draw_banner(f, outer[0], app, "Entrar no Sistema");

    let form_area = centered_rect(60, 60, outer[1]);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Entrar ")
        .style(Style::default().fg(Color::LightBlue));
    f.render_widget(block, form_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
            ]
            .as_ref(),
        )
        .split(form_area);

    draw_form_field(
        f,
        rows[0],
        "Email",
        &app.login.email,
        !app.login.focus_password,
        false,
    );
    draw_form_field(
        f,
        rows[2],
        "Senha",
        &app.login.password,
        app.login.focus_password,
        true,
    );

    if let Some(error) = &app.login.error {
        let error_para = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        f.render_widget(error_para, rows[4]);
    }

    let footer = Paragraph::new("Não tem uma conta? Pressione Ctrl+R para se cadastrar.")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, rows[5]);

    draw_key_hints(
        f,
        outer[2],
        &[
            ("Tab", "mudar campo"),
            ("Enter", "entrar"),
            ("Ctrl+R", "cadastro"),
            ("Esc", "voltar"),
        ],
    );
}

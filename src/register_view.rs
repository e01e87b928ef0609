use crate::app::{App, RegisterField};
use crate::ui::{centered_rect, draw_banner, draw_form_field, draw_key_hints};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_register(f: &mut Frame, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(10),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    draw_banner(f, outer[0], app, "Criar Conta de Estudante");

    let form_area = centered_rect(60, 70, outer[1]);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Cadastro ")
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
        "Nome",
        &app.register.name,
        app.register.focus == RegisterField::Name,
        false,
    );
    draw_form_field(
        f,
        rows[2],
        "Email",
        &app.register.email,
        app.register.focus == RegisterField::Email,
        false,
    );
    draw_form_field(
        f,
        rows[4],
        "Senha",
        &app.register.password,
        app.register.focus == RegisterField::Password,
        true,
    );

    if let Some(error) = &app.register.error {
        let error_para = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        f.render_widget(error_para, rows[6]);
    }

    let footer = Paragraph::new("O cadastro cria uma conta de estudante e inicia a sessão.")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, rows[7]);

    draw_key_hints(
        f,
        outer[2],
        &[
            ("Tab", "mudar campo"),
            ("Enter", "cadastrar"),
            ("Esc", "voltar"),
        ],
    );
}

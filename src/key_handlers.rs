use crate::app::{App, AppScreen, EditorField, FaqEditor, KbTab, RegisterField};
use crate::chat_view::chat_task;
use crate::models::Role;
use crate::store::FaqChange;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn handle_key(app_arc: Arc<Mutex<App>>, app: &mut App, key: KeyEvent) {
    match app.screen {
        AppScreen::Home => handle_home(app, key),
        AppScreen::Login => handle_login(app, key),
        AppScreen::Register => handle_register(app, key),
        AppScreen::KnowledgeBase => handle_knowledge_base(app, key),
        AppScreen::Chat => handle_chat(app_arc, app, key),
        AppScreen::FaqManager => handle_faq_manager(app, key),
        AppScreen::QuitConfirm => handle_quit_confirm(app, key),
        AppScreen::Quit => {}
    }
}

fn handle_home(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            if app.home_selected > 0 {
                app.home_selected -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.home_selected + 1 < app.home_items.len() {
                app.home_selected += 1;
            }
        }
        KeyCode::Enter => match app.home_selected {
            0 => app.navigate(AppScreen::Login),
            1 => app.navigate(AppScreen::Register),
            2 => app.navigate(AppScreen::KnowledgeBase),
            _ => app.screen = AppScreen::QuitConfirm,
        },
        KeyCode::Char('q') | KeyCode::Esc => {
            app.screen = AppScreen::QuitConfirm;
        }
        _ => {}
    }
}

fn handle_login(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('r') = key.code {
            app.navigate(AppScreen::Register);
        }
        return;
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
            app.login.focus_password = !app.login.focus_password;
        }
        KeyCode::Backspace => {
            if app.login.focus_password {
                app.login.password.pop();
            } else {
                app.login.email.pop();
            }
        }
        KeyCode::Char(c) => {
            if app.login.focus_password {
                app.login.password.push(c);
            } else {
                app.login.email.push(c);
            }
        }
        KeyCode::Enter => match app.auth.login(&app.login.email, &app.login.password) {
            Ok(user) => app.complete_login(user),
            Err(e) => app.login.error = Some(e.user_message()),
        },
        KeyCode::Esc => app.navigate(AppScreen::Home),
        _ => {}
    }
}

fn handle_register(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            app.register.focus = match app.register.focus {
                RegisterField::Name => RegisterField::Email,
                RegisterField::Email => RegisterField::Password,
                RegisterField::Password => RegisterField::Name,
            };
        }
        KeyCode::Up => {
            app.register.focus = match app.register.focus {
                RegisterField::Name => RegisterField::Password,
                RegisterField::Email => RegisterField::Name,
                RegisterField::Password => RegisterField::Email,
            };
        }
        KeyCode::Backspace => {
            match app.register.focus {
                RegisterField::Name => app.register.name.pop(),
                RegisterField::Email => app.register.email.pop(),
                RegisterField::Password => app.register.password.pop(),
            };
        }
        KeyCode::Char(c) => match app.register.focus {
            RegisterField::Name => app.register.name.push(c),
            RegisterField::Email => app.register.email.push(c),
            RegisterField::Password => app.register.password.push(c),
        },
        KeyCode::Enter => {
            let (name, email, password) = (
                app.register.name.clone(),
                app.register.email.clone(),
                app.register.password.clone(),
            );
            match app.auth.register(&name, &email, &password) {
                Ok(user) => app.complete_login(user),
                Err(e) => app.register.error = Some(e.user_message()),
            }
        }
        KeyCode::Esc => app.navigate(AppScreen::Home),
        _ => {}
    }
}

fn handle_knowledge_base(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab => {
            app.kb.tab = match app.kb.tab {
                KbTab::Categories => KbTab::Popular,
                KbTab::Popular => KbTab::Categories,
            };
            app.kb.selected = 0;
            app.kb.expanded = None;
            app.kb.scroll = 0;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if app.kb.selected > 0 {
                app.kb.selected -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let count = app.kb_visible_ids().len();
            if app.kb.selected + 1 < count {
                app.kb.selected += 1;
            }
        }
        KeyCode::Enter => app.toggle_kb_expansion(),
        KeyCode::Esc => {
            let target = if app.session.is_some() {
                app.dashboard_screen()
            } else {
                AppScreen::Home
            };
            app.navigate(target);
        }
        _ => {}
    }
}

fn handle_chat(app_arc: Arc<Mutex<App>>, app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('b') => app.navigate(AppScreen::KnowledgeBase),
            KeyCode::Char('l') => app.logout(),
            KeyCode::Char('c') => app.screen = AppScreen::QuitConfirm,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::PageUp => app.scroll_chat_up(),
        KeyCode::PageDown => app.scroll_chat_down(),
        KeyCode::Esc => {
            if app.session.as_ref().map(|u| u.role) == Some(Role::Admin) {
                app.navigate(AppScreen::FaqManager);
            } else {
                app.screen = AppScreen::QuitConfirm;
            }
        }
        // Input is disabled while a response is pending: one outstanding
        // call at a time.
        _ if app.chat_thinking => {}
        KeyCode::Backspace => {
            app.chat_input.pop();
        }
        KeyCode::Char(c) => {
            app.chat_input.push(c);
        }
        KeyCode::Enter => {
            let user_message = app.chat_input.drain(..).collect::<String>();
            let user_message = user_message.trim().to_string();
            if user_message.is_empty() {
                return;
            }

            app.push_user_message(user_message.clone());
            app.chat_thinking = true;
            app.status_indicator.set_thinking(true);
            app.scroll_chat_to_bottom();

            tokio::spawn(async move {
                chat_task(app_arc, user_message).await;
            });
        }
        _ => {}
    }
}

fn handle_faq_manager(app: &mut App, key: KeyEvent) {
    if app.manager.editor.is_some() {
        handle_editor(app, key);
        return;
    }

    if let Some(id) = app.manager.pending_delete.clone() {
        match key.code {
            KeyCode::Char('s') | KeyCode::Char('y') | KeyCode::Enter => {
                match app.store.apply(FaqChange::Delete { id }) {
                    Ok(()) => app.manager.notice = Some("FAQ apagada.".to_string()),
                    Err(e) => app.manager.notice = Some(e.user_message()),
                }
                app.manager.pending_delete = None;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                app.manager.pending_delete = None;
            }
            _ => {}
        }
        return;
    }

    if app.manager.searching {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => app.manager.searching = false,
            KeyCode::Backspace => {
                app.manager.search.pop();
            }
            KeyCode::Char(c) => {
                app.manager.search.push(c);
                app.manager.selected = 0;
            }
            _ => {}
        }
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('t') => app.navigate(AppScreen::Chat),
            KeyCode::Char('l') => app.logout(),
            KeyCode::Char('c') => app.screen = AppScreen::QuitConfirm,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            if app.manager.selected > 0 {
                app.manager.selected -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let count = app.filtered_faq_ids().len();
            if app.manager.selected + 1 < count {
                app.manager.selected += 1;
            }
        }
        KeyCode::Char('/') => {
            app.manager.searching = true;
            app.manager.notice = None;
        }
        KeyCode::Char('a') => {
            app.manager.notice = None;
            app.manager.editor = Some(FaqEditor {
                id: None,
                category_idx: 0,
                question: String::new(),
                answer: String::new(),
                focus: EditorField::Question,
                error: None,
            });
        }
        KeyCode::Char('e') => {
            let ids = app.filtered_faq_ids();
            if let Some(faq) = ids
                .get(app.manager.selected)
                .and_then(|id| app.store.faq(id))
            {
                let category_idx = app
                    .store
                    .categories()
                    .iter()
                    .position(|c| c.id == faq.category_id)
                    .unwrap_or(0);
                app.manager.notice = None;
                app.manager.editor = Some(FaqEditor {
                    id: Some(faq.id.clone()),
                    category_idx,
                    question: faq.question.clone(),
                    answer: faq.answer.clone(),
                    focus: EditorField::Question,
                    error: None,
                });
            }
        }
        KeyCode::Char('d') => {
            let ids = app.filtered_faq_ids();
            if let Some(id) = ids.get(app.manager.selected) {
                app.manager.pending_delete = Some(id.clone());
                app.manager.notice = None;
            }
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.screen = AppScreen::QuitConfirm;
        }
        _ => {}
    }
}

fn handle_editor(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('s') = key.code {
            save_editor(app);
        }
        return;
    }

    let category_count = app.store.categories().len();
    let Some(editor) = app.manager.editor.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Tab => {
            editor.focus = match editor.focus {
                EditorField::Question => EditorField::Category,
                EditorField::Category => EditorField::Answer,
                EditorField::Answer => EditorField::Question,
            };
        }
        KeyCode::Left if editor.focus == EditorField::Category => {
            if editor.category_idx == 0 {
                editor.category_idx = category_count.saturating_sub(1);
            } else {
                editor.category_idx -= 1;
            }
        }
        KeyCode::Right if editor.focus == EditorField::Category => {
            if category_count > 0 {
                editor.category_idx = (editor.category_idx + 1) % category_count;
            }
        }
        KeyCode::Backspace => match editor.focus {
            EditorField::Question => {
                editor.question.pop();
            }
            EditorField::Answer => {
                editor.answer.pop();
            }
            EditorField::Category => {}
        },
        KeyCode::Enter => match editor.focus {
            // Enter advances through the single-line fields and inserts a
            // newline in the answer body.
            EditorField::Question => editor.focus = EditorField::Category,
            EditorField::Category => editor.focus = EditorField::Answer,
            EditorField::Answer => editor.answer.push('\n'),
        },
        KeyCode::Char(c) => match editor.focus {
            EditorField::Question => editor.question.push(c),
            EditorField::Answer => editor.answer.push(c),
            EditorField::Category => {}
        },
        KeyCode::Esc => {
            app.manager.editor = None;
        }
        _ => {}
    }
}

fn save_editor(app: &mut App) {
    let Some(editor) = app.manager.editor.as_ref() else {
        return;
    };
    let id = editor.id.clone();
    let question = editor.question.clone();
    let answer = editor.answer.clone();
    let category_id = app
        .store
        .categories()
        .get(editor.category_idx)
        .map(|c| c.id.clone())
        .unwrap_or_default();

    let change = match id {
        Some(id) => FaqChange::Update {
            id,
            category_id,
            question,
            answer,
        },
        None => FaqChange::Create {
            category_id,
            question,
            answer,
        },
    };

    match app.store.apply(change) {
        Ok(()) => {
            app.manager.notice = Some("FAQ salva.".to_string());
            app.manager.editor = None;
        }
        Err(e) => {
            if let Some(editor) = app.manager.editor.as_mut() {
                editor.error = Some(e.user_message());
            }
        }
    }
}

fn handle_quit_confirm(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('s') | KeyCode::Char('y') | KeyCode::Enter => {
            app.screen = AppScreen::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            let target = if app.session.is_some() {
                app.dashboard_screen()
            } else {
                AppScreen::Home
            };
            app.screen = target;
        }
        _ => {}
    }
}

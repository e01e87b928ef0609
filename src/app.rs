use crate::auth::Authenticator;
use crate::chat_message::ChatMessage;
use crate::config::get_config;
use crate::models::{MessageAuthor, Role, User};
use crate::status_indicator::StatusIndicator;
use crate::store::{FaqChange, KnowledgeBase};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Home,
    Login,
    Register,
    KnowledgeBase,
    Chat,
    FaqManager,
    QuitConfirm,
    Quit,
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pub focus_password: bool,
}

impl LoginForm {
    pub fn clear(&mut self) {
        self.email.clear();
        self.password.clear();
        self.error = None;
        self.focus_password = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Name,
    Email,
    Password,
}

#[derive(Debug)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pub focus: RegisterField,
}

impl Default for RegisterForm {
    fn default() -> Self {
        RegisterForm {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            error: None,
            focus: RegisterField::Name,
        }
    }
}

impl RegisterForm {
    pub fn clear(&mut self) {
        *self = RegisterForm::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Question,
    Category,
    Answer,
}

/// Add/edit modal on the FAQ manager screen. `id` is `None` for a new entry.
#[derive(Debug)]
pub struct FaqEditor {
    pub id: Option<String>,
    pub category_idx: usize,
    pub question: String,
    pub answer: String,
    pub focus: EditorField,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct ManagerState {
    pub search: String,
    pub searching: bool,
    pub selected: usize,
    pub editor: Option<FaqEditor>,
    pub pending_delete: Option<String>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KbTab {
    Categories,
    Popular,
}

#[derive(Debug)]
pub struct KbState {
    pub tab: KbTab,
    pub selected: usize,
    pub expanded: Option<String>,
    pub scroll: u16,
}

impl Default for KbState {
    fn default() -> Self {
        KbState {
            tab: KbTab::Categories,
            selected: 0,
            expanded: None,
            scroll: 0,
        }
    }
}

pub struct App {
    pub screen: AppScreen,
    pub session: Option<User>,
    pub store: KnowledgeBase,
    pub auth: Authenticator,

    pub home_items: Vec<&'static str>,
    pub home_selected: usize,

    pub login: LoginForm,
    pub register: RegisterForm,
    pub manager: ManagerState,
    pub kb: KbState,

    pub chat_messages: Vec<ChatMessage>,
    pub chat_input: String,
    pub chat_scroll: u16,
    pub chat_thinking: bool,
    pub chat_greeted: bool,
    pub status_indicator: StatusIndicator,

    pub last_tick: Instant,
}

impl App {
    pub fn new() -> App {
        let config = get_config();
        App {
            screen: AppScreen::Home,
            session: None,
            store: KnowledgeBase::seeded(),
            auth: Authenticator::with_admin(&config.admin_email, &config.admin_password),
            home_items: vec![
                "💬 Entrar",
                "📝 Cadastrar",
                "📚 Base de Conhecimento",
                "🚪 Sair",
            ],
            home_selected: 0,
            login: LoginForm::default(),
            register: RegisterForm::default(),
            manager: ManagerState::default(),
            kb: KbState::default(),
            chat_messages: Vec::new(),
            chat_input: String::new(),
            chat_scroll: 0,
            chat_thinking: false,
            chat_greeted: false,
            status_indicator: StatusIndicator::new(),
            last_tick: Instant::now(),
        }
    }

    /// The screen a logged-in user lands on.
    pub fn dashboard_screen(&self) -> AppScreen {
        match self.session.as_ref().map(|u| u.role) {
            Some(Role::Admin) => AppScreen::FaqManager,
            Some(Role::Student) => AppScreen::Chat,
            None => AppScreen::Home,
        }
    }

    /// Central navigation with the role/session guards: logged-in users are
    /// steered away from the auth screens, anonymous users away from the
    /// dashboards, and the FAQ manager stays admin-only.
    pub fn navigate(&mut self, target: AppScreen) {
        let target = match target {
            AppScreen::Home | AppScreen::Login | AppScreen::Register if self.session.is_some() => {
                self.dashboard_screen()
            }
            AppScreen::Chat if self.session.is_none() => AppScreen::Login,
            AppScreen::FaqManager => match self.session.as_ref().map(|u| u.role) {
                Some(Role::Admin) => AppScreen::FaqManager,
                Some(Role::Student) => AppScreen::Chat,
                None => AppScreen::Login,
            },
            other => other,
        };

        if target == AppScreen::Login {
            self.login.clear();
        }
        if target == AppScreen::Register {
            self.register.clear();
        }
        self.screen = target;
    }

    pub fn complete_login(&mut self, user: User) {
        log::info!("session opened for {} ({:?})", user.email, user.role);
        self.session = Some(user);
        self.login.clear();
        self.register.clear();
        self.screen = self.dashboard_screen();
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.session.take() {
            log::info!("session closed for {}", user.email);
        }
        self.chat_messages.clear();
        self.chat_input.clear();
        self.chat_greeted = false;
        self.chat_thinking = false;
        self.screen = AppScreen::Home;
    }

    /// Ids of the manager table rows under the current search filter.
    pub fn filtered_faq_ids(&self) -> Vec<String> {
        if self.manager.search.trim().is_empty() {
            self.store.faqs().iter().map(|f| f.id.clone()).collect()
        } else {
            self.store
                .search(&self.manager.search)
                .iter()
                .map(|f| f.id.clone())
                .collect()
        }
    }

    /// Ids listed on the knowledge-base screen, in display order for the
    /// active tab.
    pub fn kb_visible_ids(&self) -> Vec<String> {
        match self.kb.tab {
            KbTab::Categories => {
                let mut ids = Vec::new();
                for category in self.store.categories() {
                    for faq in self.store.by_category(&category.id) {
                        ids.push(faq.id.clone());
                    }
                }
                ids
            }
            KbTab::Popular => self
                .store
                .popular(10)
                .iter()
                .map(|f| f.id.clone())
                .collect(),
        }
    }

    /// Expands or collapses the selected knowledge-base entry. Expanding
    /// counts as a display, so the view counter is bumped here.
    pub fn toggle_kb_expansion(&mut self) {
        let ids = self.kb_visible_ids();
        let Some(id) = ids.get(self.kb.selected).cloned() else {
            return;
        };
        if self.kb.expanded.as_deref() == Some(id.as_str()) {
            self.kb.expanded = None;
        } else {
            if let Err(e) = self.store.apply(FaqChange::RecordView { id: id.clone() }) {
                log::warn!("failed to record view: {}", e);
            }
            self.kb.expanded = Some(id);
        }
    }

    pub fn push_user_message(&mut self, content: String) {
        self.chat_messages
            .push(ChatMessage::new(content, MessageAuthor::User));
    }

    pub fn scroll_chat_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_chat_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }

    pub fn scroll_chat_to_bottom(&mut self) {
        // Clamped against the real content height at draw time.
        self.chat_scroll = u16::MAX;
    }

    pub fn tick(&mut self) {
        if self.chat_thinking {
            self.status_indicator.update_spinner();
        }
        self.last_tick = Instant::now();
    }
}

impl Default for App {
    fn default() -> Self {
        App::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in_app(role: Role) -> App {
        let mut app = App::new();
        app.session = Some(User {
            id: "u1".to_string(),
            name: "Teste".to_string(),
            email: "teste@ucm.ac.mz".to_string(),
            role,
        });
        app
    }

    #[test]
    fn test_anonymous_cannot_reach_dashboards() {
        let mut app = App::new();
        app.navigate(AppScreen::Chat);
        assert_eq!(app.screen, AppScreen::Login);
        app.navigate(AppScreen::FaqManager);
        assert_eq!(app.screen, AppScreen::Login);
    }

    #[test]
    fn test_student_cannot_reach_faq_manager() {
        let mut app = logged_in_app(Role::Student);
        app.navigate(AppScreen::FaqManager);
        assert_eq!(app.screen, AppScreen::Chat);
    }

    #[test]
    fn test_logged_in_user_leaves_auth_screens() {
        let mut app = logged_in_app(Role::Admin);
        app.navigate(AppScreen::Login);
        assert_eq!(app.screen, AppScreen::FaqManager);
        app.navigate(AppScreen::Home);
        assert_eq!(app.screen, AppScreen::FaqManager);
    }

    #[test]
    fn test_knowledge_base_is_public() {
        let mut app = App::new();
        app.navigate(AppScreen::KnowledgeBase);
        assert_eq!(app.screen, AppScreen::KnowledgeBase);
    }

    #[test]
    fn test_logout_returns_home_and_clears_chat() {
        let mut app = logged_in_app(Role::Student);
        app.push_user_message("olá".to_string());
        app.chat_greeted = true;
        app.logout();
        assert_eq!(app.screen, AppScreen::Home);
        assert!(app.session.is_none());
        assert!(app.chat_messages.is_empty());
        assert!(!app.chat_greeted);
    }

    #[test]
    fn test_kb_expansion_records_view() {
        let mut app = App::new();
        let ids = app.kb_visible_ids();
        let first = ids[0].clone();
        let views_before = app.store.faq(&first).unwrap().views;

        app.kb.selected = 0;
        app.toggle_kb_expansion();
        assert_eq!(app.kb.expanded.as_deref(), Some(first.as_str()));
        assert_eq!(app.store.faq(&first).unwrap().views, views_before + 1);

        // Collapsing does not count as another display.
        app.toggle_kb_expansion();
        assert!(app.kb.expanded.is_none());
        assert_eq!(app.store.faq(&first).unwrap().views, views_before + 1);
    }

    #[test]
    fn test_filtered_faq_ids_respects_search() {
        let mut app = App::new();
        assert_eq!(app.filtered_faq_ids().len(), app.store.faqs().len());
        app.manager.search = "e-Learning".to_string();
        assert_eq!(app.filtered_faq_ids().len(), 1);
    }

    #[test]
    fn test_kb_popular_tab_limits_to_ten() {
        let mut app = App::new();
        app.kb.tab = KbTab::Popular;
        assert!(app.kb_visible_ids().len() <= 10);
    }
}

//! Implements InputPort. Inquire menus over the news desk.
//!
//! Rendering reads a state snapshot; every action goes through `NewsDesk`. Provider
//! failures are not shown here (they are logged); the previous view simply stays.

use crate::adapters::ui::progress::spinner;
use crate::domain::{
    Badge, Category, ChatMessage, ChatRole, DomainError, Language, LocaleBundle, NewsItem,
};
use crate::ports::InputPort;
use crate::usecases::{AppState, NewsDesk};
use async_trait::async_trait;
use chrono::Local;
use crossterm::style::Stylize;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{InquireError, Select, Text};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Applies the prompt theme globally.
pub fn apply_theme() {
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("»").with_fg(Color::LightRed))
        .with_highlighted_option_prefix(Styled::new("➜").with_fg(Color::LightRed));
    inquire::set_global_render_config(config);
}

/// Menu entry: localized label plus the value it stands for.
struct Choice<T> {
    label: String,
    value: T,
}

impl<T> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Clone, Copy)]
enum MenuAction {
    Category,
    Refresh,
    Details,
    Chat,
    Export,
    Language,
    Quit,
}

/// Ok(None) when the user cancels with Esc / Ctrl-C.
fn prompt_select<T>(
    message: &str,
    options: Vec<Choice<T>>,
    cursor: usize,
) -> Result<Option<T>, DomainError> {
    match Select::new(message, options)
        .with_starting_cursor(cursor)
        .prompt()
    {
        Ok(choice) => Ok(Some(choice.value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

fn badge_label(bundle: &LocaleBundle, badge: Badge) -> String {
    match badge {
        Badge::Verified => format!("[{}]", bundle.badge_verified).green().bold().to_string(),
        Badge::Pending => format!("[{}]", bundle.badge_pending).yellow().bold().to_string(),
    }
}

fn render_header(state: &AppState) {
    let b = state.bundle();
    let synced = state
        .last_synced
        .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| b.never_synced.to_string());
    println!();
    println!(
        "{}  {}",
        format!("■ {}", b.category_label(state.category)).red().bold(),
        format!("{}: {}", b.last_sync, synced).dark_grey()
    );
}

fn render_news_list(state: &AppState) {
    let b = state.bundle();
    if state.news.is_empty() {
        println!("  {}", b.no_news.dark_grey());
        return;
    }
    for (i, item) in state.news.iter().enumerate() {
        println!(
            "{:>3}. {} {}  {}",
            i + 1,
            badge_label(b, item.badge()),
            item.title.as_str().bold(),
            item.timestamp.as_str().dark_grey()
        );
    }
}

fn render_detail(bundle: &LocaleBundle, item: &NewsItem) {
    println!();
    println!("{} {}", badge_label(bundle, item.badge()), item.title.as_str().bold());
    println!("{}", item.timestamp.as_str().dark_grey());
    println!();
    println!("{}", item.summary);
    println!();
    println!("{}: {}", bundle.sources.bold(), item.sources.join(", "));
    println!("{}: {}", bundle.verification.bold(), item.verification_details);
    if !item.url.is_empty() {
        println!("{}", item.url.as_str().underlined());
    }
    let citations = item.citations();
    if !citations.is_empty() {
        println!("{}:", bundle.citations.bold());
        for c in citations {
            match &c.title {
                Some(title) => println!("  - {} ({})", title, c.uri.as_str().dark_grey()),
                None => println!("  - {}", c.uri),
            }
        }
    }
}

fn render_message(bundle: &LocaleBundle, msg: &ChatMessage) {
    match msg.role {
        ChatRole::User => println!("{} {}", format!("{}:", bundle.you).cyan().bold(), msg.text),
        ChatRole::Model => println!(
            "{} {}",
            format!("{}:", bundle.analyst_name).red().bold(),
            msg.text
        ),
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    desk: Arc<NewsDesk>,
}

impl TuiInputPort {
    pub fn new(desk: Arc<NewsDesk>) -> Self {
        Self { desk }
    }

    async fn load_with_spinner(&self, category: Option<Category>) {
        let bundle = self.desk.snapshot().await.bundle();
        let pb = spinner(bundle.loading_news);
        let outcome = match category {
            Some(c) => self.desk.select_category(c).await,
            None => self.desk.refresh().await,
        };
        pb.finish_and_clear();
        // Failures are logged by the desk; the old list stays on screen.
        if let Ok(count) = outcome {
            debug!(count, "news view updated");
        }
    }

    async fn choose_category(&self) -> Result<(), DomainError> {
        let state = self.desk.snapshot().await;
        let b = state.bundle();
        let options: Vec<Choice<Category>> = Category::ALL
            .into_iter()
            .map(|c| Choice {
                label: b.category_label(c).to_string(),
                value: c,
            })
            .collect();
        let cursor = Category::ALL
            .iter()
            .position(|c| *c == state.category)
            .unwrap_or(0);
        if let Some(category) = prompt_select(b.category_prompt, options, cursor)? {
            self.load_with_spinner(Some(category)).await;
        }
        Ok(())
    }

    async fn show_details(&self) -> Result<(), DomainError> {
        let state = self.desk.snapshot().await;
        let b = state.bundle();
        if state.news.is_empty() {
            println!("  {}", b.no_news.dark_grey());
            return Ok(());
        }
        let options: Vec<Choice<usize>> = state
            .news
            .iter()
            .enumerate()
            .map(|(i, item)| Choice {
                label: format!("{}. {}", i + 1, item.title),
                value: i,
            })
            .collect();
        if let Some(idx) = prompt_select(b.details_prompt, options, 0)? {
            render_detail(b, &state.news[idx]);
        }
        Ok(())
    }

    async fn chat(&self) -> Result<(), DomainError> {
        let state = self.desk.snapshot().await;
        let b = state.bundle();
        println!();
        println!("{}", b.chat_title.red().bold());
        for msg in &state.transcript {
            render_message(b, msg);
        }
        let mut printed = state.transcript.len();

        loop {
            let input = match Text::new(b.chat_placeholder)
                .with_help_message(b.chat_hint)
                .prompt()
            {
                Ok(text) => text,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
                Err(e) => return Err(DomainError::Ui(e.to_string())),
            };
            if input.trim().is_empty() {
                break;
            }

            let pb = spinner(b.analyst_typing);
            let result = self.desk.submit_chat(&input).await;
            pb.finish_and_clear();
            if let Err(e) = result {
                warn!(error = %e, "chat turn produced no reply");
            }

            // Print whatever is new since the last render: the newest entry is always last.
            let transcript = self.desk.snapshot().await.transcript;
            for msg in transcript.iter().skip(printed) {
                render_message(b, msg);
            }
            printed = transcript.len();
        }
        Ok(())
    }

    async fn export(&self) {
        let state = self.desk.snapshot().await;
        let b = state.bundle();
        if state.news.is_empty() {
            println!("  {}", b.export_empty.dark_grey());
            return;
        }
        match self.desk.export_report().await {
            Ok(path) => println!("{} {}", b.export_done.green(), path.display()),
            Err(e) => warn!(error = %e, "report export failed"),
        }
    }

    async fn choose_language(&self) -> Result<(), DomainError> {
        let state = self.desk.snapshot().await;
        let options = vec![
            Choice {
                label: "English".to_string(),
                value: Language::English,
            },
            Choice {
                label: "Español".to_string(),
                value: Language::Spanish,
            },
        ];
        let cursor = usize::from(state.language == Language::Spanish);
        if let Some(language) = prompt_select(state.bundle().language_prompt, options, cursor)? {
            if language != state.language {
                self.desk.change_language(language).await;
                self.load_with_spinner(None).await;
            }
        }
        Ok(())
    }
}

impl TuiInputPort {
    /// Menu loop; returns on Quit, Esc, or a prompt failure.
    async fn menu_loop(&self) -> Result<(), DomainError> {
        loop {
            let state = self.desk.snapshot().await;
            let b = state.bundle();
            render_header(&state);
            render_news_list(&state);
            println!();

            let menu = [
                (b.menu_category, MenuAction::Category),
                (b.menu_refresh, MenuAction::Refresh),
                (b.menu_details, MenuAction::Details),
                (b.menu_chat, MenuAction::Chat),
                (b.menu_export, MenuAction::Export),
                (b.menu_language, MenuAction::Language),
                (b.menu_quit, MenuAction::Quit),
            ]
            .into_iter()
            .map(|(label, value)| Choice {
                label: label.to_string(),
                value,
            })
            .collect();

            let action = prompt_select(b.menu_prompt, menu, 0)?.unwrap_or(MenuAction::Quit);
            match action {
                MenuAction::Category => self.choose_category().await?,
                MenuAction::Refresh => self.load_with_spinner(None).await,
                MenuAction::Details => self.show_details().await?,
                MenuAction::Chat => self.chat().await?,
                MenuAction::Export => self.export().await,
                MenuAction::Language => self.choose_language().await?,
                MenuAction::Quit => return Ok(()),
            }
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        self.load_with_spinner(None).await;
        let result = self.menu_loop().await;
        self.close(result).await
    }
}

impl TuiInputPort {
    /// Ends the chat session on every exit path, then hands back the loop's result.
    async fn close(&self, result: Result<(), DomainError>) -> Result<(), DomainError> {
        self.desk.shutdown().await;
        if let Err(e) = &result {
            warn!(error = %e, "menu loop aborted");
        }
        println!("{}", self.desk.snapshot().await.bundle().goodbye);
        result
    }
}

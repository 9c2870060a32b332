//! Locale resolution and UI string bundles.
//!
//! The runtime language tag is read once by configuration and passed in here;
//! nothing in this module touches the environment.

use super::entities::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    /// Language name used inside prompts ("write in ...").
    pub fn prompt_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
        }
    }
}

/// Resolve a runtime language tag (`es_AR.UTF-8`, `es-AR`, `en`) to a supported language.
/// Unknown, empty, or `C`/`POSIX` tags fall back to English.
pub fn resolve_language(tag: Option<&str>) -> Language {
    let Some(tag) = tag else {
        return Language::default();
    };
    let primary = tag
        .trim()
        .split(['_', '-', '.', '@'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    match primary.as_str() {
        "es" => Language::Spanish,
        "en" => Language::English,
        _ => Language::default(),
    }
}

/// UI strings for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleBundle {
    pub language: Language,
    pub app_title: &'static str,
    pub app_subtitle: &'static str,
    pub menu_prompt: &'static str,
    pub menu_category: &'static str,
    pub menu_refresh: &'static str,
    pub menu_details: &'static str,
    pub menu_chat: &'static str,
    pub menu_export: &'static str,
    pub menu_language: &'static str,
    pub menu_quit: &'static str,
    pub category_prompt: &'static str,
    pub language_prompt: &'static str,
    pub details_prompt: &'static str,
    pub loading_news: &'static str,
    pub no_news: &'static str,
    pub last_sync: &'static str,
    pub never_synced: &'static str,
    pub badge_verified: &'static str,
    pub badge_pending: &'static str,
    pub sources: &'static str,
    pub citations: &'static str,
    pub verification: &'static str,
    pub chat_title: &'static str,
    pub chat_placeholder: &'static str,
    pub chat_hint: &'static str,
    pub analyst_typing: &'static str,
    pub analyst_name: &'static str,
    pub you: &'static str,
    pub export_done: &'static str,
    pub export_empty: &'static str,
    pub goodbye: &'static str,
    categories: [&'static str; 8],
}

impl LocaleBundle {
    pub fn for_language(language: Language) -> &'static LocaleBundle {
        match language {
            Language::English => &EN,
            Language::Spanish => &ES,
        }
    }

    /// Localized display label for a category.
    pub fn category_label(&self, category: Category) -> &'static str {
        let idx = Category::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or(0);
        self.categories[idx]
    }

    /// Reverse lookup of a display label in any bundle.
    pub fn category_from_label(label: &str) -> Option<Category> {
        let needle = label.trim();
        [&EN, &ES].into_iter().find_map(|b| {
            Category::ALL
                .into_iter()
                .find(|c| b.category_label(*c).eq_ignore_ascii_case(needle))
        })
    }
}

static EN: LocaleBundle = LocaleBundle {
    language: Language::English,
    app_title: "MR. DANIEL",
    app_subtitle: "Verified news desk & AI analyst",
    menu_prompt: "What next?",
    menu_category: "Choose category",
    menu_refresh: "Refresh news",
    menu_details: "Read a story",
    menu_chat: "Ask the analyst",
    menu_export: "Export CSV report",
    menu_language: "Change language",
    menu_quit: "Quit",
    category_prompt: "Category:",
    language_prompt: "Language:",
    details_prompt: "Story:",
    loading_news: "Searching live sources...",
    no_news: "No news to show yet.",
    last_sync: "Last sync",
    never_synced: "never",
    badge_verified: "VERIFIED",
    badge_pending: "PENDING",
    sources: "Sources",
    citations: "Grounding",
    verification: "Verification",
    chat_title: "Analyst chat",
    chat_placeholder: "Ask about current events",
    chat_hint: "Empty line returns to the menu.",
    analyst_typing: "Analyst is checking sources...",
    analyst_name: "Mr. Daniel",
    you: "You",
    export_done: "Report saved to",
    export_empty: "Nothing to export.",
    goodbye: "Goodbye.",
    categories: [
        "General",
        "Politics",
        "Economy",
        "International",
        "Security",
        "Health",
        "Energy",
        "Crisis",
    ],
};

static ES: LocaleBundle = LocaleBundle {
    language: Language::Spanish,
    app_title: "MR. DANIEL",
    app_subtitle: "Noticias verificadas y analista IA",
    menu_prompt: "¿Qué hacemos?",
    menu_category: "Elegir categoría",
    menu_refresh: "Actualizar noticias",
    menu_details: "Leer una noticia",
    menu_chat: "Consultar al analista",
    menu_export: "Exportar informe CSV",
    menu_language: "Cambiar idioma",
    menu_quit: "Salir",
    category_prompt: "Categoría:",
    language_prompt: "Idioma:",
    details_prompt: "Noticia:",
    loading_news: "Buscando fuentes en vivo...",
    no_news: "Todavía no hay noticias.",
    last_sync: "Última sincronización",
    never_synced: "nunca",
    badge_verified: "VERIFICADA",
    badge_pending: "PENDIENTE",
    sources: "Fuentes",
    citations: "Referencias",
    verification: "Verificación",
    chat_title: "Chat con el analista",
    chat_placeholder: "Pregunta sobre la actualidad",
    chat_hint: "Una línea vacía vuelve al menú.",
    analyst_typing: "El analista está consultando fuentes...",
    analyst_name: "Mr. Daniel",
    you: "Tú",
    export_done: "Informe guardado en",
    export_empty: "No hay nada que exportar.",
    goodbye: "Hasta luego.",
    categories: [
        "General",
        "Política",
        "Economía",
        "Internacional",
        "Seguridad",
        "Salud",
        "Energía",
        "Crisis",
    ],
};

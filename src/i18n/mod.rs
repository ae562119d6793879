//! Internationalization module - Spanish and English support

use std::sync::{Mutex, OnceLock};

static CURRENT_LOCALE: OnceLock<Mutex<Locale>> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    English,
    #[default]
    Spanish,
}

impl Locale {
    /// Detect locale from system environment
    pub fn detect() -> Self {
        // Check LANG, LC_ALL, LC_MESSAGES environment variables
        let lang = std::env::var("LANG")
            .or_else(|_| std::env::var("LC_ALL"))
            .or_else(|_| std::env::var("LC_MESSAGES"))
            .unwrap_or_default()
            .to_lowercase();

        if lang.starts_with("en") {
            Locale::English
        } else {
            Locale::Spanish
        }
    }

    /// Parse a configured language name; unknown values fall back to detection
    pub fn from_setting(lang: &str) -> Self {
        match lang.trim().to_lowercase().as_str() {
            "es" | "español" | "spanish" => Locale::Spanish,
            "en" | "english" | "inglés" => Locale::English,
            _ => Locale::detect(),
        }
    }

    /// Get the locale code
    pub fn code(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Spanish => "es",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::English => "English",
            Locale::Spanish => "Español",
        }
    }
}

/// Initialize the global locale
pub fn init_locale() -> Locale {
    let locale = Locale::detect();
    let _ = CURRENT_LOCALE.set(Mutex::new(locale));
    locale
}

/// Initialize with specific locale
pub fn init_locale_with(locale: Locale) -> Locale {
    if CURRENT_LOCALE.set(Mutex::new(locale)).is_err() {
        set_locale(locale);
    }
    locale
}

/// Get current locale
pub fn current_locale() -> Locale {
    CURRENT_LOCALE
        .get()
        .and_then(|m| m.lock().ok())
        .map(|l| *l)
        .unwrap_or_default()
}

/// Set current locale
pub fn set_locale(locale: Locale) {
    if let Some(mutex) = CURRENT_LOCALE.get() {
        if let Ok(mut current) = mutex.lock() {
            *current = locale;
        }
    }
}

/// Translation keys
#[derive(Debug, Clone, Copy)]
pub enum Text {
    // Countries agent
    CountriesTitle,
    CountriesIntro,
    CountriesFeatures,
    CountriesExamples,
    ExitHint,
    QueryPrompt,
    AgentLabel,
    Goodbye,
    EmptyQuery,
    Processing,
    StepExtracting,
    CountryIdentified,
    StepLookup,
    DataFetched,
    StepSynthesis,

    // Pipeline outcomes ({country} is replaced by the caller)
    NoCountryIdentified,
    LookupFailed,
    ProviderFailed,

    // Fact sheet labels
    LabelName,
    LabelOfficialName,
    LabelCapital,
    LabelPopulation,
    LabelRegion,
    LabelSubregion,
    LabelArea,
    LabelFlag,
    LabelFlagImage,
    LabelLanguages,
    LabelCurrencies,
    LabelBorders,
    LabelTimezones,
    LabelCallingCode,

    // Sequential chain
    ChainTitle,
    ChainStep,
    ChainResponse,
    ChainSummaryTitle,
    ChainSummaryArea,
    ChainSummaryProblem,
    ChainSummarySolution,
    ChainCompleted,
    ChainAborted,
}

impl Text {
    /// Get the translated text in the current locale
    pub fn get(&self) -> &'static str {
        self.in_locale(current_locale())
    }

    /// Get the translated text in an explicit locale
    pub fn in_locale(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::English => self.english(),
            Locale::Spanish => self.spanish(),
        }
    }

    fn english(&self) -> &'static str {
        match self {
            Text::CountriesTitle => "🌎 SMART COUNTRY INFORMATION AGENT",
            Text::CountriesIntro => "This agent answers questions about the countries of the world.",
            Text::CountriesFeatures => "🧠 Features:\n  ✓ Identifies the country in your question\n  ✓ Fetches real data from a public API\n  ✓ Answers exactly what you asked",
            Text::CountriesExamples => "Examples:\n  - What is the capital of France?\n  - Tell me the population of Japan\n  - What currency does Argentina use?\n  - Which languages are spoken in Switzerland?",
            Text::ExitHint => "Type 'exit' to quit.",
            Text::QueryPrompt => "👤 Your question: ",
            Text::AgentLabel => "🤖 Agent: ",
            Text::Goodbye => "👋 Goodbye!",
            Text::EmptyQuery => "⚠️  Please type a question.",
            Text::Processing => "🤖 Agent: Processing your question...",
            Text::StepExtracting => "📍 Step 2: Identifying the country...",
            Text::CountryIdentified => "   ✓ Country identified: ",
            Text::StepLookup => "🌍 Step 3: Fetching country information...",
            Text::DataFetched => "   ✓ Data retrieved from the API",
            Text::StepSynthesis => "💬 Step 4: Writing a tailored answer...",

            Text::NoCountryIdentified => "❌ I could not identify a country in your question. Could you rephrase it?",
            Text::LookupFailed => "❌ I could not find information about '{country}'. Please check the country name.",
            Text::ProviderFailed => "❌ The language model is not available right now. Please try again in a moment.",

            Text::LabelName => "Name",
            Text::LabelOfficialName => "Official name",
            Text::LabelCapital => "Capital",
            Text::LabelPopulation => "Population",
            Text::LabelRegion => "Region",
            Text::LabelSubregion => "Subregion",
            Text::LabelArea => "Area",
            Text::LabelFlag => "Flag",
            Text::LabelFlagImage => "Flag image",
            Text::LabelLanguages => "Languages",
            Text::LabelCurrencies => "Currencies",
            Text::LabelBorders => "Borders",
            Text::LabelTimezones => "Timezones",
            Text::LabelCallingCode => "Calling code",

            Text::ChainTitle => "EXERCISE 1: Agentic AI System - 3 Sequential Calls",
            Text::ChainStep => "[STEP",
            Text::ChainResponse => "Response: ",
            Text::ChainSummaryTitle => "SUMMARY OF THE COMPLETED EXERCISE",
            Text::ChainSummaryArea => "✓ Business area identified",
            Text::ChainSummaryProblem => "✓ Specific problem described",
            Text::ChainSummarySolution => "✓ Agentic AI solution proposed",
            Text::ChainCompleted => "Exercise completed successfully!",
            Text::ChainAborted => "❌ The chain stopped at step",
        }
    }

    fn spanish(&self) -> &'static str {
        match self {
            Text::CountriesTitle => "🌎 AGENTE INTELIGENTE DE INFORMACIÓN DE PAÍSES",
            Text::CountriesIntro => "Este agente responde preguntas sobre los países del mundo.",
            Text::CountriesFeatures => "🧠 Características:\n  ✓ Identifica el país de tu consulta\n  ✓ Obtiene datos reales de una API pública\n  ✓ Responde exactamente lo que preguntaste",
            Text::CountriesExamples => "Ejemplos:\n  - ¿Cuál es la capital de Francia?\n  - Dime la población de Japón\n  - ¿Qué moneda usa Argentina?\n  - ¿Qué idiomas se hablan en Suiza?",
            Text::ExitHint => "Escribe 'salir' para terminar.",
            Text::QueryPrompt => "👤 Tu consulta: ",
            Text::AgentLabel => "🤖 Agente: ",
            Text::Goodbye => "👋 ¡Hasta luego!",
            Text::EmptyQuery => "⚠️  Por favor, escribe una consulta.",
            Text::Processing => "🤖 Agente: Procesando tu consulta...",
            Text::StepExtracting => "📍 Paso 2: Identificando el país...",
            Text::CountryIdentified => "   ✓ País identificado: ",
            Text::StepLookup => "🌍 Paso 3: Consultando información del país...",
            Text::DataFetched => "   ✓ Datos obtenidos de la API",
            Text::StepSynthesis => "💬 Paso 4: Generando respuesta personalizada...",

            Text::NoCountryIdentified => "❌ No pude identificar el país en tu consulta. ¿Podrías reformularla?",
            Text::LookupFailed => "❌ No encontré información sobre '{country}'. Verifica el nombre del país.",
            Text::ProviderFailed => "❌ El modelo de lenguaje no está disponible en este momento. Inténtalo de nuevo en un momento.",

            Text::LabelName => "Nombre",
            Text::LabelOfficialName => "Nombre oficial",
            Text::LabelCapital => "Capital",
            Text::LabelPopulation => "Población",
            Text::LabelRegion => "Región",
            Text::LabelSubregion => "Subregión",
            Text::LabelArea => "Área",
            Text::LabelFlag => "Bandera",
            Text::LabelFlagImage => "Imagen de la bandera",
            Text::LabelLanguages => "Idiomas",
            Text::LabelCurrencies => "Monedas",
            Text::LabelBorders => "Países fronterizos",
            Text::LabelTimezones => "Zonas horarias",
            Text::LabelCallingCode => "Código de llamada",

            Text::ChainTitle => "EJERCICIO 1: Sistema de IA con Agentic - 3 Llamadas Secuenciales",
            Text::ChainStep => "[PASO",
            Text::ChainResponse => "Respuesta: ",
            Text::ChainSummaryTitle => "RESUMEN DEL EJERCICIO COMPLETADO",
            Text::ChainSummaryArea => "✓ Área de negocio identificada",
            Text::ChainSummaryProblem => "✓ Problema específico descrito",
            Text::ChainSummarySolution => "✓ Solución de IA con Agentic propuesta",
            Text::ChainCompleted => "¡Ejercicio completado exitosamente!",
            Text::ChainAborted => "❌ La cadena se detuvo en el paso",
        }
    }
}

/// Shorthand for getting translated text
pub fn t(text: Text) -> &'static str {
    text.get()
}

/// Translated text in an explicit locale (used where the locale is injected)
pub fn tr(locale: Locale, text: Text) -> &'static str {
    text.in_locale(locale)
}

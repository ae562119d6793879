//! Prompt templates for the sequential chain and the countries agent
//!
//! Every template exists in Spanish and English. The chain prompts for steps
//! 2 and 3 refer to "the above" and rely on the accumulated conversation
//! rather than repeating earlier answers.

use crate::i18n::Locale;

/// Prompts for the three sequential chain steps, in order:
/// business area discovery, industry problem, agentic solution
pub fn chain_prompts(locale: Locale) -> [(&'static str, &'static str); 3] {
    match locale {
        Locale::Spanish => [
            (
                "Pidiendo al LLM que elija un área de negocio...",
                "Elige un área de negocio específica que valga la pena explorar para una oportunidad de IA con Agentic. \
                 Indica el área y justifica brevemente por qué es prometedora.",
            ),
            (
                "Pidiendo al LLM que presente un problema en esa industria...",
                "Basándote en el área de negocio que elegiste arriba, presenta un problema específico y desafiante \
                 de esa industria que pueda beneficiarse de una solución de IA con Agentic. \
                 Describe el problema, a quién afecta y por qué los enfoques actuales no bastan.",
            ),
            (
                "Pidiendo al LLM que proponga una solución de IA con Agentic...",
                "Propón una solución detallada de IA con Agentic para el problema que describiste arriba. Explica:\n\
                 1. Cómo funcionaría el sistema agéntico.\n\
                 2. Qué agentes específicos se necesitarían y cuál sería la responsabilidad de cada uno.\n\
                 3. Cómo trabajarían de forma autónoma y coordinada.\n\
                 4. Qué beneficios concretos aportaría.",
            ),
        ],
        Locale::English => [
            (
                "Asking the LLM to pick a business area...",
                "Pick a specific business area worth exploring for an agentic AI opportunity. \
                 Name the area and briefly justify why it is promising.",
            ),
            (
                "Asking the LLM to present a problem in that industry...",
                "Based on the business area you chose above, present a specific, challenging problem in that \
                 industry that could benefit from an agentic AI solution. Describe the problem, who it affects \
                 and why current approaches fall short.",
            ),
            (
                "Asking the LLM to propose an agentic AI solution...",
                "Propose a detailed agentic AI solution for the problem you described above. Explain:\n\
                 1. How the agentic system would work.\n\
                 2. Which specific agents are needed and what each one is responsible for.\n\
                 3. How they would work autonomously and in coordination.\n\
                 4. Which concrete benefits it would bring.",
            ),
        ],
    }
}

/// Single-shot prompt asking for the country name only, in English
pub fn build_extraction_prompt(query: &str, locale: Locale) -> String {
    match locale {
        Locale::Spanish => format!(
            r#"Instrucción: Del siguiente texto, extrae únicamente el nombre del país.
Responde SOLO con el nombre común del país en inglés. No incluyas ningún texto,
explicación, puntuación o carácter adicional. Si el texto no menciona ningún país,
responde con una cadena vacía.

Texto: "{query}"

Respuesta esperada:"#
        ),
        Locale::English => format!(
            r#"Instruction: From the following text, extract only the name of the country.
Reply ONLY with the common English name of the country. Do not include any text,
explanation, punctuation or extra characters. If the text mentions no country,
reply with an empty string.

Text: "{query}"

Expected answer:"#
        ),
    }
}

/// Synthesis prompt: the original query verbatim plus the fact sheet
pub fn build_synthesis_prompt(query: &str, fact_sheet: &str, locale: Locale) -> String {
    match locale {
        Locale::Spanish => format!(
            r#"**Instrucción de Rol:** Eres un asistente conversacional útil y amigable. Tu objetivo es responder directamente a la consulta original del usuario utilizando la información proporcionada a continuación.

**Requisitos de la Respuesta:**
1. **Natural y Conversacional:** La respuesta debe sonar natural y ser amigable.
2. **Respuesta Directa:** Responde a la pregunta del usuario de la manera más directa y concisa posible.
3. **Solo los Datos Proporcionados:** Usa únicamente la información que se te da abajo; no inventes datos que no aparezcan en ella.

---

**Consulta Original del Usuario:**
"{query}"

**Información Relevante Proporcionada:**
{fact_sheet}

---

**Respuesta:**"#
        ),
        Locale::English => format!(
            r#"**Role:** You are a helpful, friendly conversational assistant. Your goal is to answer the user's original question directly using the information provided below.

**Answer requirements:**
1. **Natural and conversational:** The answer must sound natural and friendly.
2. **Direct:** Answer the user's question as directly and concisely as possible.
3. **Provided data only:** Use only the information given below; do not invent facts that are not in it.

---

**User's original question:**
"{query}"

**Relevant information provided:**
{fact_sheet}

---

**Answer:**"#
        ),
    }
}

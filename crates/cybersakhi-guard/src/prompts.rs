//! Prompt templates for the hosted LLM
//!
//! The assistant picks a system prompt by [`Language`] and renders the running
//! conversation under it. The harassment analysis prompt wraps the candidate
//! message for the classifier.

use cybersakhi_core::ChatMessage;
use serde::{Deserialize, Serialize};

/// First message shown in a fresh conversation.
pub const GREETING: &str =
    "Hello! I'm Sakhi, your digital safety companion. 🛡️ How can I help you stay safe online today?";

const ENGLISH_PROMPT: &str = "You are Sakhi, a compassionate and knowledgeable AI safety companion designed to help women navigate digital safety challenges. You provide:
- Clear, actionable advice on cyber safety
- Emotional support with a professional, caring tone
- Information about reporting cyber crimes
- Tips on password security, privacy protection, and recognizing threats
- Guidance on handling online harassment, phishing, and identity theft

Always be supportive, never judgmental. If someone is in immediate danger, recommend contacting emergency services. Keep responses concise but thorough.";

const TAMIL_PROMPT: &str = "நீங்கள் சகி, பெண்களுக்கு டிஜிட்டல் பாதுகாப்பு சவால்களை சமாளிக்க உதவும் ஒரு அன்பான மற்றும் அறிவுள்ள AI பாதுகாப்பு துணையாக இருக்கிறீர்கள். நீங்கள் வழங்குவது:
- சைபர் பாதுகாப்பு பற்றிய தெளிவான, செயல்படக்கூடிய ஆலோசனை
- தொழில்முறை, அக்கறையான தொனியுடன் உணர்ச்சிபூர்வமான ஆதரவு
- சைபர் குற்றங்களை புகாரளிப்பது பற்றிய தகவல்
- கடவுச்சொல் பாதுகாப்பு, தனியுரிமை பாதுகாப்பு மற்றும் அச்சுறுத்தல்களை அங்கீகரிப்பதற்கான உதவிக்குறிப்புகள்

எப்போதும் ஆதரவாக இருங்கள், தீர்ப்பு வழங்காதீர்கள். தமிழில் பதிலளிக்கவும்.";

const TANGLISH_PROMPT: &str = "You are Sakhi, a friendly AI safety companion. Respond in Tanglish (Tamil written in English letters mixed with English). Be supportive and helpful with cyber safety advice. Example: \"Hi! Naan Sakhi, unga digital safety companion. Enna help venum?\"";

/// Reply language of the assistant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Tamil,
    Tanglish,
}

impl Language {
    pub fn system_prompt(&self) -> &'static str {
        match self {
            Self::English => ENGLISH_PROMPT,
            Self::Tamil => TAMIL_PROMPT,
            Self::Tanglish => TANGLISH_PROMPT,
        }
    }
}

/// Render the assistant prompt for one user turn.
pub fn chat_prompt(language: Language, history: &[ChatMessage], input: &str) -> String {
    let conversation = history
        .iter()
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n\nPrevious conversation:\n{}\n\nUser: {}\n\nRespond as Sakhi:",
        language.system_prompt(),
        conversation,
        input
    )
}

/// Render the harassment analysis prompt for a candidate message.
pub fn harassment_prompt(text: &str) -> String {
    format!(
        "Analyze this message for potential harassment, threats, or abusive content. \n\
Be thorough but professional. Return a JSON object.\n\
\n\
Message to analyze:\n\
\"{}\"\n\
\n\
Analyze for:\n\
1. Direct threats or intimidation\n\
2. Sexual harassment\n\
3. Bullying or demeaning language\n\
4. Stalking behavior\n\
5. Blackmail or extortion\n\
6. Identity-based harassment",
        text
    )
}

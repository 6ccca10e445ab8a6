//! Sakhi chat assistant

use cybersakhi_core::{ChatMessage, Error, Result};
use std::sync::Arc;
use tracing::debug;

use crate::llm::ChatModel;
use crate::prompts::{chat_prompt, Language};

/// Renders the conversation into a prompt and asks the model for the next reply
#[derive(Clone)]
pub struct ChatAssistant {
    model: Arc<dyn ChatModel>,
}

impl ChatAssistant {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Produce the assistant's reply to `input`, given the prior conversation.
    pub async fn reply(
        &self,
        language: Language,
        history: &[ChatMessage],
        input: &str,
    ) -> Result<ChatMessage> {
        if input.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let prompt = chat_prompt(language, history, input);
        debug!(?language, turns = history.len(), "Requesting assistant reply");

        let content = self.model.complete(&prompt).await?;
        Ok(ChatMessage::assistant(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingModel {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatModel for RecordingModel {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().push(prompt.to_string());
            Ok("Naan Sakhi, enna help venum?".to_string())
        }
    }

    #[tokio::test]
    async fn test_reply_uses_language_prompt() {
        let model = Arc::new(RecordingModel::default());
        let assistant = ChatAssistant::new(model.clone());

        let reply = assistant
            .reply(Language::Tanglish, &[], "vanakkam")
            .await
            .unwrap();
        assert_eq!(reply, ChatMessage::assistant("Naan Sakhi, enna help venum?"));

        let prompts = model.prompts.lock();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with(Language::Tanglish.system_prompt()));
        assert!(prompts[0].contains("User: vanakkam"));
    }

    #[tokio::test]
    async fn test_blank_input_skips_model() {
        let model = Arc::new(RecordingModel::default());
        let assistant = ChatAssistant::new(model.clone());

        let err = assistant.reply(Language::English, &[], " \n ").await.unwrap_err();
        assert!(matches!(err, Error::EmptyInput));
        assert!(model.prompts.lock().is_empty());
    }
}

// Request orchestration: prompt -> generator -> parser -> event

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::Generator;
use crate::error::GenerationError;
use crate::events::{AppEvent, Outcome};
use crate::parser::parse_string_list;
use crate::prompts::{self, PromptSpec};
use crate::session::TopicSession;

async fn run(
    generator: &dyn Generator,
    model: &str,
    prompt: &PromptSpec,
    context: &str,
) -> Result<Vec<String>, GenerationError> {
    tracing::debug!(context, shape = ?prompt.shape, expected = ?prompt.target, "sending prompt");
    let raw = generator.generate(model, &prompt.text).await?;
    parse_string_list(&raw, context)
}

pub async fn fetch_topics(
    generator: &dyn Generator,
    model: &str,
    keyword: &str,
) -> Result<Vec<String>, GenerationError> {
    run(generator, model, &prompts::topics_prompt(keyword), "topics").await
}

pub async fn fetch_suggestions(
    generator: &dyn Generator,
    model: &str,
    excluded: &[String],
) -> Result<Vec<String>, GenerationError> {
    let prompt = prompts::keyword_suggestions_prompt(excluded);
    run(generator, model, &prompt, "suggested keywords").await
}

pub async fn fetch_sentences(
    generator: &dyn Generator,
    model: &str,
    topic: &str,
) -> Result<Vec<String>, GenerationError> {
    let prompt = prompts::auxiliary_sentences_prompt(topic);
    run(generator, model, &prompt, "auxiliary sentences").await
}

/// Issues generation requests on behalf of the topic generator view.
///
/// Each action applies its "begin" transition to the session right away and
/// spawns one task; the outcome comes back as an [`AppEvent`].
#[derive(Clone)]
pub struct Dispatcher {
    generator: Arc<dyn Generator>,
    model: String,
    events: mpsc::UnboundedSender<AppEvent>,
}

impl Dispatcher {
    pub fn new(
        generator: Arc<dyn Generator>,
        model: String,
        events: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            generator,
            model,
            events,
        }
    }

    /// Returns `None` when the keyword is rejected and no request was issued.
    pub fn submit_keyword(&self, session: &mut TopicSession) -> Option<JoinHandle<()>> {
        let Some(keyword) = session.begin_submit() else {
            tracing::debug!(session = %session.id, "blank keyword rejected");
            return None;
        };
        tracing::info!(session = %session.id, %keyword, "generating topics");

        Some(self.spawn(session.id, move |generator, model| async move {
            Outcome::Topics(fetch_topics(generator.as_ref(), &model, &keyword).await)
        }))
    }

    pub fn refresh_suggestions(&self, session: &mut TopicSession) -> JoinHandle<()> {
        let excluded = session.begin_refresh();
        tracing::info!(
            session = %session.id,
            seen = session.seen_keywords.len(),
            "refreshing suggestions"
        );

        self.spawn(session.id, move |generator, model| async move {
            Outcome::Suggestions(fetch_suggestions(generator.as_ref(), &model, &excluded).await)
        })
    }

    pub fn open_topic(&self, session: &mut TopicSession, topic: &str) -> JoinHandle<()> {
        session.begin_open_topic(topic);
        tracing::info!(session = %session.id, topic, "fetching auxiliary sentences");

        let topic = topic.to_string();
        self.spawn(session.id, move |generator, model| async move {
            Outcome::Sentences(fetch_sentences(generator.as_ref(), &model, &topic).await)
        })
    }

    fn spawn<F, Fut>(&self, session: Uuid, request: F) -> JoinHandle<()>
    where
        F: FnOnce(Arc<dyn Generator>, String) -> Fut,
        Fut: std::future::Future<Output = Outcome> + Send + 'static,
    {
        let future = request(Arc::clone(&self.generator), self.model.clone());
        let tx = self.events.clone();

        tokio::spawn(async move {
            let outcome = future.await;
            match &outcome {
                Outcome::Topics(Err(e)) | Outcome::Suggestions(Err(e)) | Outcome::Sentences(Err(e)) => {
                    tracing::warn!(%session, region = outcome.region(), error = %e, "generation failed");
                }
                _ => tracing::info!(%session, region = outcome.region(), "generation succeeded"),
            }
            // Receiver gone means the UI has shut down
            let _ = tx.send(AppEvent::Generated { session, outcome });
        })
    }
}

// Prompt templates sent to the generation service

/// Number of topics requested per keyword
pub const TOPIC_COUNT: usize = 5;
/// Number of fresh keywords requested per refresh
pub const SUGGESTION_COUNT: usize = 7;
pub const MIN_SENTENCES: usize = 5;
pub const MAX_SENTENCES: usize = 8;

/// Shape the model is asked to answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputShape {
    StringArray,
}

/// How many items a prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetCount {
    Exactly(usize),
    /// Fewer is acceptable when distinct options run out
    UpTo(usize),
    Between(usize, usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub text: String,
    pub shape: OutputShape,
    pub target: TargetCount,
}

pub fn topics_prompt(keyword: &str) -> PromptSpec {
    PromptSpec {
        text: format!(
            "You are an ESL teaching assistant. Generate exactly {TOPIC_COUNT} engaging discussion \
             topics for ESL students based on the keyword: \"{keyword}\". Return the topics as a \
             JSON array of strings. For example: [\"Topic 1\", \"Topic 2\", \"Topic 3\", \
             \"Topic 4\", \"Topic 5\"]"
        ),
        shape: OutputShape::StringArray,
        target: TargetCount::Exactly(TOPIC_COUNT),
    }
}

pub fn keyword_suggestions_prompt<S: AsRef<str>>(excluded: &[S]) -> PromptSpec {
    let avoid = excluded
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");

    PromptSpec {
        text: format!(
            "You are an ESL teaching assistant. Generate {SUGGESTION_COUNT} diverse and common \
             keywords suitable for ESL discussion topics. Avoid generating any of these keywords: \
             [{avoid}]. If you cannot generate {SUGGESTION_COUNT} new keywords, generate as many \
             new ones as you can. The keywords should be single words or very short phrases. \
             Return the keywords as a JSON array of strings. For example: [\"Travel\", \"Food\", \
             \"Hobbies\"]"
        ),
        shape: OutputShape::StringArray,
        target: TargetCount::UpTo(SUGGESTION_COUNT),
    }
}

pub fn auxiliary_sentences_prompt(topic: &str) -> PromptSpec {
    PromptSpec {
        text: format!(
            "You are an ESL teaching assistant. For the discussion topic \"{topic}\", generate \
             {MIN_SENTENCES} to {MAX_SENTENCES} short, simple auxiliary sentences to help an ESL \
             student discuss this topic. These can be simple statements or questions. Return them \
             as a JSON array of strings. For example: [\"What do you think about...?\", \
             \"I believe that...\", \"Have you ever...?\"]"
        ),
        shape: OutputShape::StringArray,
        target: TargetCount::Between(MIN_SENTENCES, MAX_SENTENCES),
    }
}

use anyhow::Result;
use async_trait::async_trait;
use console::style;

/// Validator for a text answer. Returns an error message to display, or
/// `None` when the value is acceptable.
pub type ValidateFn = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// A single free-text question.
pub struct TextPrompt {
    pub message: String,
    pub placeholder: Option<String>,
    pub validate: Option<ValidateFn>,
}

impl TextPrompt {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            placeholder: None,
            validate: None,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn validate(
        mut self,
        validate: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.validate = Some(Box::new(validate));
        self
    }
}

/// The interactive prompt surface the onboarding flow talks to.
///
/// `text` must re-prompt until the validator accepts the answer; input
/// errors never escape this boundary.
#[async_trait]
pub trait Prompt: Send + Sync {
    async fn intro(&self, text: &str);
    async fn note(&self, text: &str, title: &str);
    async fn text(&self, prompt: TextPrompt) -> Result<String>;
    async fn outro(&self, text: &str);
}

/// Terminal implementation backed by dialoguer.
#[derive(Default)]
pub struct ConsolePrompt;

#[async_trait]
impl Prompt for ConsolePrompt {
    async fn intro(&self, text: &str) {
        println!();
        println!("  {}", style(text).cyan().bold());
        println!();
    }

    async fn note(&self, text: &str, title: &str) {
        println!("  {}", style(title).white().bold());
        for line in text.lines() {
            println!("  {}", style(line).dim());
        }
        println!();
    }

    async fn text(&self, prompt: TextPrompt) -> Result<String> {
        loop {
            let mut input = dialoguer::Input::<String>::new()
                .with_prompt(prompt.message.clone())
                .allow_empty(true);
            if let Some(placeholder) = &prompt.placeholder {
                input = input.default(placeholder.clone()).show_default(true);
            }

            let value = input.interact_text()?;
            if let Some(validate) = &prompt.validate {
                if let Some(message) = validate(&value) {
                    println!("  {}", style(message).red());
                    continue;
                }
            }
            return Ok(value);
        }
    }

    async fn outro(&self, text: &str) {
        println!();
        println!("  {} {}", style("✔").green().bold(), style(text).green());
        println!();
    }
}

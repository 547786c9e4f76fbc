//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::ReplConfig;
use crate::output::console::ConsoleFormatter;
use crate::output::printer::ReplyPrinter;
use colored::Colorize;
use mog_application::{AgentController, AttachmentSource, SubmitOutcome};
use mog_domain::{Mode, SessionError};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;

/// A parsed input line
#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand<'a> {
    Quit,
    Help,
    SetMode(Mode),
    Attach(Vec<PathBuf>),
    ClearAttachment,
    History,
    LastFailure,
    Unknown(&'a str),
    /// Anything that is not a command, kept verbatim (including an empty line)
    Submit(&'a str),
}

impl<'a> ReplCommand<'a> {
    pub fn parse(line: &'a str) -> Self {
        let command = line.trim();
        if !command.starts_with('/') {
            return ReplCommand::Submit(line);
        }

        let (cmd, rest) = command
            .split_once(char::is_whitespace)
            .unwrap_or((command, ""));
        match cmd {
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/chat" => ReplCommand::SetMode(Mode::Chat),
            "/image" | "/visuals" => ReplCommand::SetMode(Mode::ImageGeneration),
            // One reference; it may contain spaces
            "/attach" => match rest.trim() {
                "" => ReplCommand::Attach(vec![]),
                reference => ReplCommand::Attach(vec![PathBuf::from(reference)]),
            },
            "/clear" => ReplCommand::ClearAttachment,
            "/history" => ReplCommand::History,
            "/why" => ReplCommand::LastFailure,
            _ => ReplCommand::Unknown(cmd),
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    controller: Arc<AgentController>,
    attachments: Arc<dyn AttachmentSource>,
    printer: ReplyPrinter,
    config: ReplConfig,
}

impl ChatRepl {
    pub fn new(
        controller: Arc<AgentController>,
        attachments: Arc<dyn AttachmentSource>,
        printer: ReplyPrinter,
    ) -> Self {
        Self {
            controller,
            attachments,
            printer,
            config: ReplConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.config.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let prompt = if self.controller.snapshot().has_attachment {
                "mog[img]> "
            } else {
                "mog> "
            };

            match rl.readline(prompt) {
                Ok(line) => {
                    let command = ReplCommand::parse(&line);
                    if let ReplCommand::Submit(text) = command
                        && !text.trim().is_empty()
                    {
                        let _ = rl.add_history_entry(text);
                    }
                    if self.handle(command).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.config.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", ConsoleFormatter::header(self.controller.mode()));
        println!();
        println!(
            "{}",
            ConsoleFormatter::format_transcript(&self.controller.snapshot().messages)
        );
        println!();
        println!("Type /help for commands.");
        println!();
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  /chat             - Conversational mode");
        println!("  /image            - Image generation mode");
        println!("  /attach <path>    - Stage an image file or data: reference");
        println!("                      (switches to image mode)");
        println!("  /clear            - Drop the staged image");
        println!("  /history          - Show the conversation so far");
        println!("  /why              - Show why the last reply was a fallback");
        println!("  /help, /h, /?     - Show this help");
        println!("  /quit, /exit, /q  - Exit");
        println!();
        println!("An empty line sends the staged image on its own.");
        println!();
    }

    /// Handle one parsed line. Returns true if the REPL should exit.
    async fn handle(&self, command: ReplCommand<'_>) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => Self::print_help(),
            ReplCommand::SetMode(mode) => {
                self.controller.set_mode(mode);
                println!("Mode: {}", ConsoleFormatter::mode_badge(mode));
            }
            ReplCommand::Attach(paths) => self.attach(&paths).await,
            ReplCommand::ClearAttachment => match self.controller.clear_attachment() {
                Ok(true) => println!("Attachment cleared."),
                Ok(false) => println!("No attachment staged."),
                Err(e) => println!("{} {}", "!".red(), e),
            },
            ReplCommand::History => {
                println!(
                    "{}",
                    ConsoleFormatter::format_transcript(&self.controller.snapshot().messages)
                );
            }
            ReplCommand::LastFailure => match self.controller.last_failure() {
                Some(reason) => println!("{} {}", "Last failure:".dimmed(), reason),
                None => println!("No failed exchange yet."),
            },
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
            ReplCommand::Submit(text) => {
                if text.trim().is_empty() && !self.controller.snapshot().has_attachment {
                    return false;
                }
                self.submit(text).await;
            }
        }
        false
    }

    async fn attach(&self, paths: &[PathBuf]) {
        match self.attachments.load(paths).await {
            Ok(image) => {
                let line = ConsoleFormatter::attachment_staged(&image);
                match self.controller.attach_image(image) {
                    Ok(()) => println!("{}", line),
                    Err(e) => println!("{} {}", "!".red(), e),
                }
            }
            Err(e) => println!("{} {}", "!".red(), e),
        }
    }

    async fn submit(&self, text: &str) {
        let before = self.controller.snapshot().messages.len();
        let outcome = self.controller.submit(text).await;

        match outcome {
            SubmitOutcome::Rejected(SessionError::EmptyInput) => {}
            SubmitOutcome::Rejected(e) => println!("{} {}", "!".red(), e),
            SubmitOutcome::Completed { .. } | SubmitOutcome::Failed { .. } => {
                let messages = self.controller.snapshot().messages;
                self.printer.print(&messages[before.min(messages.len())..]);
            }
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputConfig;
    use async_trait::async_trait;
    use mog_application::{
        AdapterError, AttachmentLoadError, ClientAdapter, ExchangeParams,
    };
    use mog_domain::prompt::FAILURE_FALLBACK;
    use mog_domain::{ContentPart, ImageData, MessageContent, Turn};
    use std::sync::Mutex;

    struct OneImage;

    #[async_trait]
    impl AttachmentSource for OneImage {
        async fn load(&self, references: &[PathBuf]) -> Result<ImageData, AttachmentLoadError> {
            if references.is_empty() {
                return Err(AttachmentLoadError("No file given".to_string()));
            }
            Ok(ImageData::new("image/png", vec![1, 2, 3]).unwrap())
        }
    }

    /// Records the text of every generation request.
    #[derive(Default)]
    struct PromptRecorder {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ClientAdapter for PromptRecorder {
        async fn conversational_exchange(
            &self,
            _persona: &str,
            _history: &[Turn],
            message: &str,
        ) -> Result<Option<String>, AdapterError> {
            self.prompts.lock().unwrap().push(message.to_string());
            Ok(Some("Mogged.".to_string()))
        }

        async fn multimodal_generate(
            &self,
            parts: &[ContentPart],
        ) -> Result<Vec<ContentPart>, AdapterError> {
            if let Some(text) = parts.first().and_then(ContentPart::as_text) {
                self.prompts.lock().unwrap().push(text.to_string());
            }
            Ok(vec![ContentPart::text("Mogged.")])
        }
    }

    fn repl() -> ChatRepl {
        repl_with(AgentController::new(None, ExchangeParams::default()))
    }

    fn repl_with(controller: AgentController) -> ChatRepl {
        let controller = Arc::new(controller);
        ChatRepl::new(
            controller,
            Arc::new(OneImage),
            ReplyPrinter::new(&OutputConfig::default()),
        )
        .with_config(ReplConfig { history_file: None })
    }

    #[tokio::test]
    async fn test_empty_line_without_attachment_is_ignored() {
        let repl = repl();
        assert!(!repl.handle(ReplCommand::Submit("")).await);
        assert_eq!(repl.controller.snapshot().messages.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_line_submits_staged_attachment() {
        let repl = repl();
        repl.handle(ReplCommand::Attach(vec![PathBuf::from("chart.png")]))
            .await;
        let snapshot = repl.controller.snapshot();
        assert!(snapshot.has_attachment);
        assert_eq!(snapshot.mode, Mode::ImageGeneration);

        repl.handle(ReplCommand::Submit("")).await;
        let snapshot = repl.controller.snapshot();
        assert!(!snapshot.has_attachment);
        assert_eq!(snapshot.messages.len(), 3);
        assert_eq!(
            snapshot.messages[2].content(),
            &MessageContent::Text(FAILURE_FALLBACK.to_string())
        );
    }

    #[tokio::test]
    async fn test_failed_attach_stages_nothing() {
        let repl = repl();
        repl.handle(ReplCommand::Attach(vec![])).await;
        assert!(!repl.controller.snapshot().has_attachment);
        assert_eq!(repl.controller.mode(), Mode::Chat);
    }

    #[tokio::test]
    async fn test_whitespace_line_without_attachment_is_ignored() {
        let repl = repl();
        assert!(!repl.handle(ReplCommand::parse("   ")).await);
        assert_eq!(repl.controller.snapshot().messages.len(), 1);
    }

    #[tokio::test]
    async fn test_image_prompt_reaches_the_adapter_verbatim() {
        let adapter = Arc::new(PromptRecorder::default());
        let repl = repl_with(AgentController::new(
            Some(adapter.clone()),
            ExchangeParams::default(),
        ));
        repl.handle(ReplCommand::parse("/image")).await;
        repl.handle(ReplCommand::parse("  add laser eyes ")).await;

        assert_eq!(*adapter.prompts.lock().unwrap(), vec!["  add laser eyes "]);
    }

    #[tokio::test]
    async fn test_why_reports_last_failure() {
        let repl = repl();
        assert_eq!(repl.controller.last_failure(), None);
        repl.handle(ReplCommand::Submit("gm")).await;
        assert!(!repl.handle(ReplCommand::parse("/why")).await);
        assert!(
            repl.controller
                .last_failure()
                .is_some_and(|reason| reason.contains("missing credential"))
        );
    }

    #[tokio::test]
    async fn test_quit_and_mode_switch() {
        let repl = repl();
        assert!(!repl.handle(ReplCommand::SetMode(Mode::ImageGeneration)).await);
        assert_eq!(repl.controller.mode(), Mode::ImageGeneration);
        assert!(repl.handle(ReplCommand::Quit).await);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("/quit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("  /q  "), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/?"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/chat"), ReplCommand::SetMode(Mode::Chat));
        assert_eq!(
            ReplCommand::parse("/image"),
            ReplCommand::SetMode(Mode::ImageGeneration)
        );
        assert_eq!(ReplCommand::parse("/clear"), ReplCommand::ClearAttachment);
        assert_eq!(ReplCommand::parse("/history"), ReplCommand::History);
        assert_eq!(ReplCommand::parse("/why"), ReplCommand::LastFailure);
        assert_eq!(ReplCommand::parse("/moon"), ReplCommand::Unknown("/moon"));
    }

    #[test]
    fn test_parse_attach_paths() {
        assert_eq!(
            ReplCommand::parse("/attach  My Charts/moon shot.png "),
            ReplCommand::Attach(vec![PathBuf::from("My Charts/moon shot.png")])
        );
        assert_eq!(
            ReplCommand::parse("/attach data:image/png;base64,AQID"),
            ReplCommand::Attach(vec![PathBuf::from("data:image/png;base64,AQID")])
        );
        assert_eq!(ReplCommand::parse("/attach"), ReplCommand::Attach(vec![]));
    }

    #[test]
    fn test_parse_submissions() {
        assert_eq!(
            ReplCommand::parse("  wen moon "),
            ReplCommand::Submit("  wen moon ")
        );
        assert_eq!(ReplCommand::parse("   "), ReplCommand::Submit("   "));
    }
}

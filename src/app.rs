//! Terminal front end
//!
//! Drives the translator form from stdin. Translations run on spawned tasks
//! and report back over a channel, so typing stays responsive while a
//! request is out.

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::config::{self, TranslatorConfig};
use crate::core::catalog::LanguageCatalog;
use crate::core::clipboard::SystemClipboard;
use crate::core::features::translator::{TranslationClient, TranslationOutcome, TranslatorFormController};
use crate::core::speech::{
    CommandRecognizer, RecognitionEvent, RecognitionReceiver, SpeechRecognizer, SynthesizerBackend,
    UnsupportedRecognizer,
};
use crate::shared::error::{AppError, AppResult};
use crate::shared::settings::AppSettings;
use crate::shared::types::{ActionState, NoticeLevel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Languages,
    From(String),
    To(String),
    Swap,
    Text(String),
    Clear,
    Translate,
    Listen,
    Speak,
    Copy,
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "langs" | "languages" => Command::Languages,
        "from" | "source" if !rest.is_empty() => Command::From(rest.to_string()),
        "to" | "target" if !rest.is_empty() => Command::To(rest.to_string()),
        "from" | "source" | "to" | "target" => {
            return Err(format!("Usage: {} <language>", word));
        }
        "swap" => Command::Swap,
        "text" => Command::Text(rest.to_string()),
        "clear" => Command::Clear,
        "translate" | "t" => Command::Translate,
        "listen" | "mic" => Command::Listen,
        "speak" => Command::Speak,
        "copy" => Command::Copy,
        "show" | "" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("Unknown command '{}' (try 'help')", other)),
    };
    Ok(command)
}

const HELP: &str = "\
Commands:
  langs                 list supported languages
  from <lang>           set source language (code or name)
  to <lang>             set target language
  swap                  swap languages (clears text)
  text <words...>       set the text to translate
  clear                 clear the text
  translate | t         translate the text
  listen | mic          start/stop dictation (speakable source only)
  speak                 read the translation aloud (speakable target only)
  copy                  copy the translation
  show                  redraw the form
  quit                  exit";

/// Entry point used by the binary
pub async fn run() -> AppResult<()> {
    let mut args = std::env::args().skip(1);
    if let Some(arg) = args.next() {
        return match (arg.as_str(), args.next()) {
            ("set-key", Some(key)) => config::store_api_key(&key),
            _ => Err(AppError::Validation("Usage: translator-widget [set-key <API_KEY>]".to_string())),
        };
    }

    let settings = AppSettings::load().await.unwrap_or_else(|e| {
        log::warn!("[Settings] Failed to load settings, using defaults: {}", e);
        AppSettings::default()
    });

    let config = TranslatorConfig::resolve(&settings.api)?;
    let client = Arc::new(TranslationClient::new(config)?);

    let recognizer: Box<dyn SpeechRecognizer> = if settings.speech.recognizer_command.is_empty() {
        Box::new(UnsupportedRecognizer)
    } else {
        Box::new(CommandRecognizer::new(&settings.speech.recognizer_command))
    };
    let synthesizer = SynthesizerBackend::from_command(&settings.speech.synthesizer_command);

    let mut controller = TranslatorFormController::new(
        LanguageCatalog::bundled().clone(),
        &settings.preferences,
        client,
        recognizer,
        Box::new(synthesizer),
        Box::new(SystemClipboard),
    )?;

    log::info!("[App] Translator ready");
    event_loop(&mut controller).await
}

async fn next_recognition(events: &mut Option<RecognitionReceiver>) -> Option<RecognitionEvent> {
    match events {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

async fn event_loop(controller: &mut TranslatorFormController) -> AppResult<()> {
    let mut recognition = controller.take_recognition_events();
    let (outcome_tx, mut outcomes) = mpsc::unbounded_channel::<TranslationOutcome>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Language Translator ('help' for commands)");
    render(controller);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => apply(controller, command, &outcome_tx),
                    Err(message) => println!("{}", message),
                }
            }
            Some(event) = next_recognition(&mut recognition) => {
                if controller.handle_recognition_event(event).is_some() {
                    render(controller);
                }
            }
            Some(outcome) = outcomes.recv() => {
                controller.finish_translation(outcome);
                render(controller);
            }
        }
        render_notices(controller);
    }

    if controller.state().is_listening {
        let _ = controller.toggle_listening();
    }
    Ok(())
}

fn apply(
    controller: &mut TranslatorFormController,
    command: Command,
    outcome_tx: &UnboundedSender<TranslationOutcome>,
) {
    match command {
        Command::Languages => {
            for lang in controller.catalog().list() {
                println!("  {:<10} {}", lang.code, lang.display_name);
            }
            return;
        }
        Command::From(input) => {
            let code = resolve(controller, &input);
            let _ = controller.set_source_language(&code);
        }
        Command::To(input) => {
            let code = resolve(controller, &input);
            let _ = controller.set_target_language(&code);
        }
        Command::Swap => controller.swap_languages(),
        Command::Text(text) => controller.set_input_text(text),
        Command::Clear => controller.clear_input(),
        Command::Translate => {
            if let Some(pending) = controller.begin_translation() {
                let tx = outcome_tx.clone();
                tokio::spawn(async move {
                    let _ = tx.send(pending.run().await);
                });
            }
        }
        Command::Listen => {
            if let Err(AppError::Validation(message)) = controller.toggle_listening() {
                println!("{}", message);
            }
        }
        Command::Speak => {
            if let Err(AppError::Validation(message)) = controller.speak_translation() {
                println!("{}", message);
            }
        }
        Command::Copy => {
            let _ = controller.copy_translation();
        }
        Command::Help => {
            println!("{}", HELP);
            return;
        }
        Command::Show | Command::Quit => {}
    }
    render(controller);
}

/// Map typed input onto a catalog code; unknown input passes through so the
/// controller can reject it.
fn resolve(controller: &TranslatorFormController, input: &str) -> String {
    controller
        .catalog()
        .resolve(input)
        .map(|lang| lang.code.clone())
        .unwrap_or_else(|| input.trim().to_string())
}

fn language_label(controller: &TranslatorFormController, code: &str) -> String {
    match controller.catalog().get(code) {
        Some(lang) => format!("{} ({})", lang.display_name, lang.code),
        None => code.to_string(),
    }
}

fn render(controller: &TranslatorFormController) {
    let view = controller.view();

    let mut affordances = Vec::new();
    if view.show_clear {
        affordances.push("clear");
    }
    if view.show_microphone {
        affordances.push(if view.is_listening { "listen (on)" } else { "listen" });
    }
    if view.show_speaker {
        affordances.push("speak");
    }
    affordances.push("copy");
    affordances.push(match view.translate_action {
        ActionState::Idle => "translate",
        ActionState::Busy => "translating...",
    });

    println!();
    println!(
        "  {}  <->  {}",
        language_label(controller, &view.source_language),
        language_label(controller, &view.target_language)
    );
    println!("  Text:        {}", if view.input_text.is_empty() { "(empty)" } else { view.input_text.as_str() });
    println!("  Translation: {}", view.translated_text);
    println!("  [{}]", affordances.join("] ["));
}

fn render_notices(controller: &mut TranslatorFormController) {
    for notice in controller.drain_notices() {
        let tag = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "ok",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        println!("  ({}) {}", tag, notice.message);
    }
}

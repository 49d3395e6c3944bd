mod config;
mod mentor;

use std::{collections::HashMap, sync::Arc};

use config::MentorConfig;
use dotenv::dotenv;
use mentor::{
    session::{MentorSession, ScheduledAppend},
    subject::{Subject, ALL_SUBJECTS},
    timeline::{SharedSession, Timeline},
    MessageKind, Sender,
};
use teloxide::{
    prelude::*,
    types::{ChatAction, ChatId, InputFile, KeyboardButton, KeyboardMarkup, KeyboardRemove},
    utils::command::{BotCommands, ParseError},
};
use tokio::sync::{mpsc, Mutex};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
enum Command {
    #[command(description = "start a new mentor session")]
    Start,
    #[command(description = "show this text")]
    Help,
    #[command(
        description = "choose a subject: math, science, english, social or none",
        parse_with = rest_of_line
    )]
    Subject(String),
    #[command(description = "start a quiz, optionally on a topic", parse_with = rest_of_line)]
    Quiz(String),
    #[command(description = "get a study plan for the current subject")]
    Plan,
    #[command(description = "download this conversation as JSON")]
    Transcript,
    #[command(description = "end the session")]
    End,
}

fn rest_of_line(input: String) -> Result<(String,), ParseError> {
    Ok((input.trim().to_string(),))
}

struct ChatSession {
    state: SharedSession,
    timeline: Timeline,
}

/// One mentor session per chat. Removing an entry drops its timeline, which
/// discards anything the mentor was still "typing".
#[derive(Default)]
struct Sessions {
    chats: Mutex<HashMap<ChatId, ChatSession>>,
}

impl Sessions {
    /// Runs `turn` against the chat's session, opening one if needed, and
    /// schedules the messages it returns.
    async fn run<F>(&self, bot: &Bot, chat_id: ChatId, config: &MentorConfig, turn: F)
    where
        F: FnOnce(&mut MentorSession) -> Vec<ScheduledAppend>,
    {
        let mut chats = self.chats.lock().await;
        let chat = chats
            .entry(chat_id)
            .or_insert_with(|| open_session(bot, chat_id, config));

        let appends = turn(&mut *chat.state.lock().await);
        chat.timeline.schedule(appends);
    }

    /// Reads the chat's session without opening one.
    async fn peek<R>(&self, chat_id: ChatId, read: impl FnOnce(&MentorSession) -> R) -> Option<R> {
        let chats = self.chats.lock().await;
        let chat = chats.get(&chat_id)?;
        let session = chat.state.lock().await;
        Some(read(&session))
    }

    /// Replaces any existing session with a fresh one.
    async fn restart(&self, bot: &Bot, chat_id: ChatId, config: &MentorConfig) {
        let chat = open_session(bot, chat_id, config);
        let welcome = chat.state.lock().await.welcome();
        chat.timeline.schedule(welcome);
        self.chats.lock().await.insert(chat_id, chat);
    }

    /// Drops the chat's session and returns how many messages its log held,
    /// and how many of those the user wrote.
    async fn end(&self, chat_id: ChatId) -> Option<(usize, usize)> {
        let chat = self.chats.lock().await.remove(&chat_id)?;
        let session = chat.state.lock().await;
        let log = session.log();
        Some((log.len(), log.from_sender(Sender::User).count()))
    }
}

fn open_session(bot: &Bot, chat_id: ChatId, config: &MentorConfig) -> ChatSession {
    let state: SharedSession = Arc::new(Mutex::new(MentorSession::new(config.pacing)));
    let (sink, mut outgoing) = mpsc::unbounded_channel::<ScheduledAppend>();
    let timeline = Timeline::spawn(state.clone(), sink);

    let bot = bot.clone();
    tokio::spawn(async move {
        while let Some(append) = outgoing.recv().await {
            if let Err(err) = deliver(&bot, chat_id, &append).await {
                log::warn!("Could not deliver message to chat {}: {}", chat_id.0, err);
            }
        }
        log::debug!("Stopped delivering to chat {}", chat_id.0);
    });

    log::info!("Opened mentor session for chat {}", chat_id.0);
    ChatSession { state, timeline }
}

#[tokio::main]
async fn main() {
    // A missing .env is fine, the variables may come from the environment.
    dotenv().ok();

    pretty_env_logger::init();
    log::info!("Starting study mentor bot...");

    let config = match MentorConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Invalid configuration: {}", err);
            std::process::exit(1);
        }
    };
    log::info!(
        "Reply delays: {:?} response, {:?} follow-up",
        config.pacing.response_delay,
        config.pacing.followup_delay
    );

    let bot = Bot::from_env();
    let sessions = Arc::new(Sessions::default());

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .branch(
                dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(receive_command),
            )
            .branch(dptree::endpoint(receive_text)),
    )
    .dependencies(dptree::deps![sessions, config])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

async fn receive_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    sessions: Arc<Sessions>,
    config: MentorConfig,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    match cmd {
        Command::Start => {
            sessions.restart(&bot, chat_id, &config).await;
        }
        Command::Help => {
            bot.send_message(chat_id, Command::descriptions().to_string())
                .await?;
        }
        Command::Subject(key) if key.is_empty() => {
            let current = sessions
                .peek(chat_id, |session| session.subject())
                .await
                .flatten();
            let prompt = match current {
                Some(subject) => format!("We are studying {}. Switch to:", subject),
                None => "Which subject shall we study?".to_string(),
            };
            bot.send_message(chat_id, prompt)
                .reply_markup(subject_keyboard())
                .await?;
        }
        Command::Subject(key) => {
            let subject = if key.eq_ignore_ascii_case("none") {
                None
            } else {
                match Subject::from_key(&key) {
                    Some(subject) => Some(subject),
                    None => {
                        bot.send_message(
                            chat_id,
                            "Unknown subject. Choose one of: math, science, english, social",
                        )
                        .await?;
                        return Ok(());
                    }
                }
            };
            sessions
                .run(&bot, chat_id, &config, |session| {
                    session.switch_subject(subject);
                    Vec::new()
                })
                .await;

            let reply = match subject {
                Some(subject) => format!(
                    "Subject set to {}. Ask me about: {}",
                    subject,
                    subject.topics().join(", ")
                ),
                None => "Subject cleared. Ask me anything!".to_string(),
            };
            bot.send_message(chat_id, reply)
                .reply_markup(KeyboardRemove::new())
                .await?;
        }
        Command::Quiz(topic) => {
            sessions
                .run(&bot, chat_id, &config, |session| session.start_quiz(&topic))
                .await;
            show_typing(&bot, chat_id).await;
        }
        Command::Plan => {
            sessions
                .run(&bot, chat_id, &config, |session| session.study_plan(&[], ""))
                .await;
            show_typing(&bot, chat_id).await;
        }
        Command::Transcript => {
            let transcript = sessions
                .peek(chat_id, |session| {
                    let log = session.log();
                    if log.is_empty() {
                        None
                    } else {
                        Some(log.to_json())
                    }
                })
                .await
                .flatten();
            match transcript {
                Some(json) => {
                    let file = InputFile::memory(json?.into_bytes()).file_name("transcript.json");
                    bot.send_document(chat_id, file).await?;
                }
                None => {
                    bot.send_message(chat_id, "Nothing to export yet.").await?;
                }
            }
        }
        Command::End => {
            let text = match sessions.end(chat_id).await {
                Some((logged, from_user)) => {
                    log::info!(
                        "Ended mentor session for chat {} after {} messages ({} from the user)",
                        chat_id.0,
                        logged,
                        from_user
                    );
                    "Session ended. Send /start to begin again."
                }
                None => "There is no session to end.",
            };
            bot.send_message(chat_id, text)
                .reply_markup(KeyboardRemove::new())
                .await?;
        }
    }
    Ok(())
}

async fn receive_text(
    bot: Bot,
    msg: Message,
    sessions: Arc<Sessions>,
    config: MentorConfig,
) -> HandlerResult {
    let text = match msg.text() {
        Some(text) => text.to_string(),
        None => {
            bot.send_message(msg.chat.id, "Please send me your question as text")
                .await?;
            return Ok(());
        }
    };

    sessions
        .run(&bot, msg.chat.id, &config, |session| session.turn(&text))
        .await;
    show_typing(&bot, msg.chat.id).await;
    Ok(())
}

async fn show_typing(bot: &Bot, chat_id: ChatId) {
    // Purely cosmetic, so a failure here is ignored.
    let _ = bot.send_chat_action(chat_id, ChatAction::Typing).await;
}

/// Sends one logged mentor message to the chat. The user's own messages are
/// already visible there and are skipped. A quiz question brings its answer
/// buttons; any other quiz message clears them.
async fn deliver(bot: &Bot, chat_id: ChatId, append: &ScheduledAppend) -> HandlerResult {
    let message = &append.message;
    if message.sender == Sender::User {
        return Ok(());
    }

    let request = bot.send_message(chat_id, message.text.clone());
    match append.question.map(|cue| cue.options) {
        Some(options) => request.reply_markup(answer_keyboard(options)).await?,
        None if message.kind == Some(MessageKind::Quiz) => {
            request.reply_markup(KeyboardRemove::new()).await?
        }
        None => request.await?,
    };
    Ok(())
}

fn answer_keyboard(options: &[&str]) -> KeyboardMarkup {
    KeyboardMarkup::new(
        options
            .iter()
            .map(|option| vec![KeyboardButton::new(*option)])
            .collect::<Vec<_>>(),
    )
}

fn subject_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![ALL_SUBJECTS
        .iter()
        .map(|subject| KeyboardButton::new(format!("/subject {}", subject.key())))
        .collect::<Vec<_>>()])
}

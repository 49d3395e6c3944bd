use std::time::Duration;

use crate::mentor::classifier::classify;
use crate::mentor::conversation::ConversationLog;
use crate::mentor::quiz::QuizSession;
use crate::mentor::study_plan::{generate_plan, plan_message};
use crate::mentor::subject::Subject;
use crate::mentor::{Message, MessageKind};

const WELCOME_TEXT: &str = "Hi! I'm your AI mentor. Pick a subject, ask me a question, \
                            or ask for a quiz or a study plan.";

/// How long the assistant "types" before each kind of reply shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub response_delay: Duration,
    pub followup_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            response_delay: Duration::from_millis(1000),
            followup_delay: Duration::from_millis(1500),
        }
    }
}

impl Pacing {
    #[cfg(test)]
    pub fn instant() -> Self {
        Self {
            response_delay: Duration::ZERO,
            followup_delay: Duration::ZERO,
        }
    }
}

/// Marks an append as a quiz question: which quiz it belongs to and the
/// answers a host can offer as buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionCue {
    pub generation: u64,
    pub options: &'static [&'static str],
}

/// A message that should land in the log once `delay` has passed
/// after the previous scheduled append.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledAppend {
    pub delay: Duration,
    pub message: Message,
    pub question: Option<QuestionCue>,
}

impl ScheduledAppend {
    pub fn now(message: Message) -> Self {
        Self::after(Duration::ZERO, message)
    }

    pub fn after(delay: Duration, message: Message) -> Self {
        Self {
            delay,
            message,
            question: None,
        }
    }

    pub fn question(delay: Duration, message: Message, cue: QuestionCue) -> Self {
        Self {
            delay,
            message,
            question: Some(cue),
        }
    }
}

/// State of one mentor conversation: the chosen subject, the quiz in progress
/// and the transcript. Operations update state right away and hand back the
/// messages to append, leaving the pacing to the caller.
#[derive(Debug, Clone, Default)]
pub struct MentorSession {
    subject: Option<Subject>,
    quiz: QuizSession,
    log: ConversationLog,
    pacing: Pacing,
}

impl MentorSession {
    pub fn new(pacing: Pacing) -> Self {
        Self {
            pacing,
            ..Self::default()
        }
    }

    pub fn subject(&self) -> Option<Subject> {
        self.subject
    }

    pub fn set_subject(&mut self, subject: Option<Subject>) {
        log::debug!("Active subject: {:?}", subject);
        self.subject = subject;
    }

    /// Changes subject, abandoning any quiz in progress. A question of that
    /// quiz still waiting to be shown is dropped by the timeline.
    pub fn switch_subject(&mut self, subject: Option<Subject>) {
        self.quiz.abandon();
        self.set_subject(subject);
    }

    /// Whether an append is still worth showing: questions of an abandoned
    /// or replaced quiz are not.
    pub fn is_current(&self, append: &ScheduledAppend) -> bool {
        append
            .question
            .map_or(true, |cue| cue.generation == self.quiz.generation())
    }

    #[cfg(test)]
    pub fn quiz(&self) -> &QuizSession {
        &self.quiz
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn record(&mut self, message: Message) {
        self.log.append(message);
    }

    pub fn welcome(&self) -> Vec<ScheduledAppend> {
        vec![ScheduledAppend::now(Message::assistant(
            WELCOME_TEXT,
            None,
            MessageKind::Response,
        ))]
    }

    /// Routes free text: an answer while a question is waiting for one,
    /// a question for the classifier otherwise.
    pub fn turn(&mut self, text: &str) -> Vec<ScheduledAppend> {
        if self.quiz.is_awaiting_answer() {
            self.answer(text)
        } else {
            self.say(text)
        }
    }

    /// A free-text turn: the user's message followed by the classified reply.
    pub fn say(&mut self, text: &str) -> Vec<ScheduledAppend> {
        let reply = classify(text, self.subject);
        log::debug!("Classified {:?} under {:?}", text, self.subject);
        vec![
            ScheduledAppend::now(Message::user(text, self.subject)),
            ScheduledAppend::after(
                self.pacing.response_delay,
                Message::assistant(reply, self.subject, MessageKind::Response),
            ),
        ]
    }

    /// Starts a quiz for the active subject, or math when none is chosen.
    pub fn start_quiz(&mut self, topic: &str) -> Vec<ScheduledAppend> {
        let key = self.subject.map(|s| s.key()).unwrap_or("math");
        self.start_quiz_for(key, topic)
    }

    pub fn start_quiz_for(&mut self, subject_key: &str, topic: &str) -> Vec<ScheduledAppend> {
        let question = self.quiz.start(subject_key, topic);
        let options: &'static [&'static str] = match self.quiz.current_question() {
            Some(current) => current.options,
            None => &[],
        };
        let cue = QuestionCue {
            generation: self.quiz.generation(),
            options,
        };
        vec![ScheduledAppend::question(
            self.pacing.response_delay,
            question,
            cue,
        )]
    }

    /// Submits an answer. Without a question awaiting an answer nothing is
    /// recorded and the returned list is empty.
    pub fn answer(&mut self, text: &str) -> Vec<ScheduledAppend> {
        let explanation = match self.quiz.submit_answer(text) {
            Some(explanation) => explanation,
            None => return Vec::new(),
        };

        let mut appends = vec![
            ScheduledAppend::now(Message::user(text, self.quiz.subject())),
            ScheduledAppend::after(self.pacing.response_delay, explanation),
        ];
        if let Some(completion) = self.quiz.complete() {
            appends.push(ScheduledAppend::after(self.pacing.followup_delay, completion));
        }
        appends
    }

    /// Posts the canned plan for the active subject (math when none is chosen).
    pub fn study_plan(&mut self, topics: &[String], duration: &str) -> Vec<ScheduledAppend> {
        let key = self.subject.map(|s| s.key()).unwrap_or("math");
        let plan = generate_plan(key, topics, duration);
        vec![ScheduledAppend::after(
            self.pacing.response_delay,
            plan_message(&plan, self.subject),
        )]
    }
}

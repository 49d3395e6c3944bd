use crate::mentor::subject::Subject;
use crate::mentor::{Message, MessageKind};

/// Questions a quiz claims to have. Only the first question of a bank is ever served.
pub const QUIZ_LENGTH: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizQuestion {
    pub id: &'static str,
    pub question: &'static str,
    pub options: &'static [&'static str],
    pub correct_answer: &'static str,
    pub explanation: &'static str,
    pub difficulty: Difficulty,
}

static MATH_QUESTIONS: [QuizQuestion; 2] = [
    QuizQuestion {
        id: "math-1",
        question: "What is the value of x in 2x+5=15?",
        options: &["x = 5", "x = 10", "x = 7.5", "x = 2.5"],
        correct_answer: "x = 5",
        explanation: "Subtract 5 from both sides to get 2x = 10, then divide by 2: x = 5.",
        difficulty: Difficulty::Easy,
    },
    QuizQuestion {
        id: "math-2",
        question: "What is the area of a triangle with base 6 and height 4?",
        options: &["24", "12", "10", "20"],
        correct_answer: "12",
        explanation: "Area = 1/2 x base x height = 1/2 x 6 x 4 = 12.",
        difficulty: Difficulty::Medium,
    },
];

static SCIENCE_QUESTIONS: [QuizQuestion; 2] = [
    QuizQuestion {
        id: "science-1",
        question: "What gas do plants absorb during photosynthesis?",
        options: &["Oxygen", "Carbon dioxide", "Nitrogen", "Hydrogen"],
        correct_answer: "Carbon dioxide",
        explanation: "Plants take in carbon dioxide and release oxygen while making glucose.",
        difficulty: Difficulty::Easy,
    },
    QuizQuestion {
        id: "science-2",
        question: "Which of Newton's laws states F = m x a?",
        options: &["First law", "Second law", "Third law", "Law of gravitation"],
        correct_answer: "Second law",
        explanation: "The second law links force, mass and acceleration: F = m x a.",
        difficulty: Difficulty::Hard,
    },
];

static ENGLISH_QUESTIONS: [QuizQuestion; 2] = [
    QuizQuestion {
        id: "english-1",
        question: "Which word is a verb in: \"The cat sleeps on the mat\"?",
        options: &["cat", "sleeps", "mat", "the"],
        correct_answer: "sleeps",
        explanation: "\"Sleeps\" describes what the cat does, so it is the verb.",
        difficulty: Difficulty::Easy,
    },
    QuizQuestion {
        id: "english-2",
        question: "Which sentence uses the past tense?",
        options: &["I walk home", "I will walk home", "I walked home", "I am walking home"],
        correct_answer: "I walked home",
        explanation: "\"Walked\" ends in -ed, the regular past tense form.",
        difficulty: Difficulty::Medium,
    },
];

static SOCIAL_QUESTIONS: [QuizQuestion; 2] = [
    QuizQuestion {
        id: "social-1",
        question: "How many continents are there?",
        options: &["5", "6", "7", "8"],
        correct_answer: "7",
        explanation: "Africa, Antarctica, Asia, Australia, Europe, North America and South America.",
        difficulty: Difficulty::Easy,
    },
    QuizQuestion {
        id: "social-2",
        question: "Which branch of government makes laws?",
        options: &["Executive", "Judicial", "Legislative", "Military"],
        correct_answer: "Legislative",
        explanation: "The legislative branch, such as a parliament or congress, writes the laws.",
        difficulty: Difficulty::Medium,
    },
];

pub fn question_bank(subject: Subject) -> &'static [QuizQuestion] {
    match subject {
        Subject::Math => &MATH_QUESTIONS,
        Subject::Science => &SCIENCE_QUESTIONS,
        Subject::English => &ENGLISH_QUESTIONS,
        Subject::Social => &SOCIAL_QUESTIONS,
    }
}

/// Resolves a subject key to a bank. Unknown keys get the math bank.
pub fn question_bank_for_key(subject_key: &str) -> (Subject, &'static [QuizQuestion]) {
    let subject = Subject::from_key(subject_key).unwrap_or(Subject::Math);
    (subject, question_bank(subject))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizPhase {
    #[default]
    Idle,
    AwaitingAnswer,
    /// The explanation went out; the completion message is still owed.
    Explaining,
}

#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    phase: QuizPhase,
    subject: Option<Subject>,
    current_question: Option<QuizQuestion>,
    /// Bumped whenever a quiz starts or is abandoned, so a question still
    /// waiting to be shown can tell it has been superseded.
    generation: u64,
    pub score: u32,
    pub total_questions: u32,
}

impl QuizSession {
    #[cfg(test)]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Subject of the quiz in progress or the last one played.
    pub fn subject(&self) -> Option<Subject> {
        self.subject
    }

    pub fn is_active(&self) -> bool {
        self.phase != QuizPhase::Idle
    }

    pub fn is_awaiting_answer(&self) -> bool {
        self.phase == QuizPhase::AwaitingAnswer
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.current_question.as_ref()
    }

    /// Starts a fresh quiz, discarding whatever was in progress.
    pub fn start(&mut self, subject_key: &str, topic: &str) -> Message {
        let (subject, bank) = question_bank_for_key(subject_key);
        let question = bank[0].clone();
        let text = render_question(subject, topic, &question);

        log::debug!("Quiz started: subject={} question={}", subject.key(), question.id);

        *self = Self {
            phase: QuizPhase::AwaitingAnswer,
            subject: Some(subject),
            current_question: Some(question),
            generation: self.generation + 1,
            score: 0,
            total_questions: QUIZ_LENGTH,
        };

        Message::assistant(text, Some(subject), MessageKind::Quiz)
    }

    /// Checks an answer against the active question and returns the explanation.
    /// Without an active question nothing happens and `None` comes back.
    pub fn submit_answer(&mut self, answer: &str) -> Option<Message> {
        if self.phase != QuizPhase::AwaitingAnswer {
            return None;
        }
        let question = self.current_question.as_ref()?;

        // Exact match, case included.
        let correct = answer == question.correct_answer;
        if correct {
            self.score += 1;
        }
        let text = if correct {
            format!("Correct! {}", question.explanation)
        } else {
            format!(
                "Not quite. The correct answer is: {}\n{}",
                question.correct_answer, question.explanation
            )
        };

        log::debug!("Quiz answer for {}: correct={}", question.id, correct);

        self.phase = QuizPhase::Explaining;
        Some(Message::assistant(text, self.subject, MessageKind::Quiz))
    }

    /// Emits the completion message after an explanation and returns to idle.
    pub fn complete(&mut self) -> Option<Message> {
        if self.phase != QuizPhase::Explaining {
            return None;
        }
        let text = format!(
            "Quiz complete! Your score: {}/{}\nStart another quiz whenever you like.",
            self.score, self.total_questions
        );
        let subject = self.subject;
        self.phase = QuizPhase::Idle;
        self.current_question = None;
        Some(Message::assistant(text, subject, MessageKind::Quiz))
    }

    /// Drops an unfinished quiz without emitting anything.
    pub fn abandon(&mut self) {
        if self.is_active() {
            log::debug!("Quiz abandoned");
            self.generation += 1;
        }
        self.phase = QuizPhase::Idle;
        self.current_question = None;
    }
}

fn render_question(subject: Subject, topic: &str, question: &QuizQuestion) -> String {
    let header = if topic.trim().is_empty() {
        format!(
            "Quiz time! ({}, {})",
            subject.display_name(),
            question.difficulty.label()
        )
    } else {
        format!(
            "Quiz time! ({} - {}, {})",
            subject.display_name(),
            topic.trim(),
            question.difficulty.label()
        )
    };
    let options = question
        .options
        .iter()
        .zip('A'..='Z')
        .map(|(option, letter)| format!("{}. {}", letter, option))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n\n{}\n\n{}", header, question.question, options)
}

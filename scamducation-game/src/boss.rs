//! Boss battle quiz
//!
//! The controller does no I/O. When a text-generation service is available
//! it hands back a [`TextGenRequest`] for the caller to send, then consumes
//! the reply through [`BossQuizController::receive_reply`]. Without the
//! service, or after it fails once, answers are judged against the bundled
//! question script.
use crate::conversation::ChatMessage;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

const DEFAULT_QUIZ_DATA: &str = include_str!("../../scamducation-web/static/assets/data/quiz.json");

const FALLBACK_BOSS_NAME: &str = "SCAMBERT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    /// Lowercase accepted answers; single letters are option letters.
    pub answers: Vec<String>,
    pub correct_response: String,
    pub incorrect_response: String,
}

impl QuizQuestion {
    /// Judge a free-text answer against the accepted answers.
    #[must_use]
    pub fn accepts(&self, answer: &str) -> bool {
        let lowered = answer.trim().to_lowercase();
        let letter = leading_option_letter(&lowered);
        self.answers.iter().any(|accepted| {
            let mut chars = accepted.chars();
            match (chars.next(), chars.next()) {
                (Some(single), None) => letter == Some(single),
                (Some(_), Some(_)) => lowered.contains(accepted.as_str()),
                _ => false,
            }
        })
    }
}

/// `b`, `b)`, `b. urgent` all pick option b; `because` does not.
fn leading_option_letter(lowered: &str) -> Option<char> {
    let mut chars = lowered.chars();
    let first = chars.next().filter(|c| ('a'..='d').contains(c))?;
    match chars.next() {
        Some(next) if next.is_alphanumeric() => None,
        _ => Some(first),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    pub win_threshold: u32,
    pub victory_phrase: String,
    pub boss_names: Vec<String>,
    pub taunt: String,
    pub opener: String,
    pub failure_message: String,
    pub correct_keywords: Vec<String>,
    pub negative_keywords: Vec<String>,
    pub preamble: String,
    pub questions: Vec<QuizQuestion>,
}

impl QuizConfig {
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_QUIZ_DATA).unwrap_or_else(|err| {
            log::error!("bundled quiz script unusable: {err}");
            Self::fallback()
        })
    }

    fn fallback() -> Self {
        Self {
            win_threshold: 1,
            victory_phrase: "AAAARRGHGH I'm DONE FOoooR".to_string(),
            boss_names: vec![FALLBACK_BOSS_NAME.to_string()],
            taunt: "I am {boss}, the ULTIMATE SCAMMER! 😈".to_string(),
            opener: "Start the battle!".to_string(),
            failure_message: "Grr... my dark powers are failing me! 💀".to_string(),
            correct_keywords: vec!["correct".to_string()],
            negative_keywords: vec!["incorrect".to_string(), "wrong".to_string()],
            preamble:
                "You are {boss}, a scam quiz boss. After {threshold} correct answers say \"{victory}\""
                    .to_string(),
            questions: vec![QuizQuestion {
                question: "Which of these is a RED FLAG?\n\nA) A clear contact address\nB) Urgent requests for personal information".to_string(),
                answers: vec!["b".to_string(), "urgent".to_string()],
                correct_response: "Grr... CORRECT! 😤".to_string(),
                incorrect_response: "WRONG! 😈 The answer is B!".to_string(),
            }],
        }
    }

    fn render(&self, template: &str, boss: &str) -> String {
        template
            .replace("{boss}", boss)
            .replace("{threshold}", &self.win_threshold.to_string())
            .replace("{victory}", &self.victory_phrase)
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self::load_from_static()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizTurn {
    pub role: TurnRole,
    pub text: String,
}

/// Everything the text-generation service needs for the next reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextGenRequest {
    pub preamble: String,
    pub turns: Vec<QuizTurn>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizMode {
    Remote,
    Scripted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    /// Send the request and pass the reply to `receive_reply`.
    AwaitRemote(TextGenRequest),
    /// The answer was judged; `victory` is set once the boss is beaten.
    Judged { correct: bool, victory: bool },
    /// The service failed; the quiz continues from the script.
    FellBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("still waiting for the boss to reply")]
    RequestInFlight,
    #[error("the boss is already defeated")]
    AlreadyWon,
    #[error("no reply was requested")]
    NoRequestInFlight,
    #[error("answer is empty")]
    EmptyAnswer,
}

#[derive(Debug, Clone)]
struct InFlight {
    answered: bool,
}

#[derive(Debug, Clone)]
pub struct BossQuizController {
    config: QuizConfig,
    boss_name: String,
    mode: QuizMode,
    history: Vec<QuizTurn>,
    transcript: Vec<ChatMessage>,
    correct_answers: u32,
    script_index: usize,
    in_flight: Option<InFlight>,
    won: bool,
}

impl BossQuizController {
    /// Pick a boss and open with its taunt.
    pub fn new<R: Rng>(config: QuizConfig, remote_available: bool, rng: &mut R) -> Self {
        let boss_name = config
            .boss_names
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| FALLBACK_BOSS_NAME.to_string());
        let taunt = config.render(&config.taunt, &boss_name);
        Self {
            config,
            boss_name,
            mode: if remote_available {
                QuizMode::Remote
            } else {
                QuizMode::Scripted
            },
            history: Vec::new(),
            transcript: vec![ChatMessage::scambert(taunt)],
            correct_answers: 0,
            script_index: 0,
            in_flight: None,
            won: false,
        }
    }

    /// Ask the first question.
    ///
    /// Returns the request to send in remote mode; in scripted mode the first
    /// question is appended to the transcript directly.
    pub fn begin(&mut self) -> Option<TextGenRequest> {
        match self.mode {
            QuizMode::Remote => {
                self.history.push(QuizTurn {
                    role: TurnRole::User,
                    text: self.config.opener.clone(),
                });
                self.in_flight = Some(InFlight { answered: false });
                Some(self.request())
            }
            QuizMode::Scripted => {
                self.ask_scripted_question();
                None
            }
        }
    }

    /// Submit the player's answer.
    ///
    /// # Errors
    ///
    /// Rejects answers after victory, while a reply is pending, or when blank.
    pub fn submit_answer(&mut self, answer: &str) -> Result<QuizStep, QuizError> {
        if self.won {
            return Err(QuizError::AlreadyWon);
        }
        if self.in_flight.is_some() {
            return Err(QuizError::RequestInFlight);
        }
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(QuizError::EmptyAnswer);
        }

        self.transcript.push(ChatMessage::player(answer));
        match self.mode {
            QuizMode::Remote => {
                self.history.push(QuizTurn {
                    role: TurnRole::User,
                    text: answer.to_string(),
                });
                self.in_flight = Some(InFlight { answered: true });
                Ok(QuizStep::AwaitRemote(self.request()))
            }
            QuizMode::Scripted => Ok(self.judge_scripted(answer)),
        }
    }

    /// Consume the service's reply to the outstanding request.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::NoRequestInFlight`] if nothing was requested.
    pub fn receive_reply<E: Display>(
        &mut self,
        reply: Result<String, E>,
    ) -> Result<QuizStep, QuizError> {
        let Some(in_flight) = self.in_flight.take() else {
            return Err(QuizError::NoRequestInFlight);
        };

        let text = match reply {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => return Ok(self.fall_back("empty reply")),
            Err(err) => return Ok(self.fall_back(&err.to_string())),
        };

        self.history.push(QuizTurn {
            role: TurnRole::Model,
            text: text.clone(),
        });
        self.transcript.push(ChatMessage::scambert(text.as_str()));

        let mut victory = text.contains(&self.config.victory_phrase);
        let correct = in_flight.answered && self.reply_signals_correct(&text);
        if correct {
            self.correct_answers = self.correct_answers.saturating_add(1);
        }
        if !victory && self.correct_answers >= self.config.win_threshold {
            self.transcript
                .push(ChatMessage::scambert(self.config.victory_phrase.as_str()));
            victory = true;
        }
        if victory {
            self.declare_victory();
        }
        Ok(QuizStep::Judged { correct, victory })
    }

    fn reply_signals_correct(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        let negative = self
            .config
            .negative_keywords
            .iter()
            .any(|keyword| lowered.contains(keyword.as_str()));
        !negative
            && self
                .config
                .correct_keywords
                .iter()
                .any(|keyword| lowered.contains(keyword.as_str()))
    }

    fn fall_back(&mut self, reason: &str) -> QuizStep {
        log::warn!("boss text generation failed, switching to script: {reason}");
        self.mode = QuizMode::Scripted;
        let judged = self
            .history
            .iter()
            .filter(|turn| turn.role == TurnRole::Model)
            .count()
            .saturating_sub(1);
        // Pick up the script at the turn the battle had reached.
        self.script_index = judged.checked_rem(self.config.questions.len()).unwrap_or(0);
        self.transcript
            .push(ChatMessage::scambert(self.config.failure_message.as_str()));
        self.ask_scripted_question();
        QuizStep::FellBack
    }

    fn judge_scripted(&mut self, answer: &str) -> QuizStep {
        let Some(question) = self.current_question().cloned() else {
            return QuizStep::Judged {
                correct: false,
                victory: false,
            };
        };
        let correct = question.accepts(answer);
        let response = if correct {
            self.correct_answers = self.correct_answers.saturating_add(1);
            question.correct_response
        } else {
            question.incorrect_response
        };
        self.script_index = (self.script_index + 1) % self.config.questions.len();

        if self.correct_answers >= self.config.win_threshold {
            self.transcript.push(ChatMessage::scambert(response));
            self.transcript
                .push(ChatMessage::scambert(self.config.victory_phrase.as_str()));
            self.declare_victory();
            return QuizStep::Judged {
                correct,
                victory: true,
            };
        }

        let next = self
            .current_question()
            .map(|question| question.question.clone())
            .unwrap_or_default();
        self.transcript
            .push(ChatMessage::scambert(format!("{response}\n\n{next}")));
        QuizStep::Judged {
            correct,
            victory: false,
        }
    }

    fn ask_scripted_question(&mut self) {
        if let Some(question) = self.current_question() {
            let text = question.question.clone();
            self.transcript.push(ChatMessage::scambert(text));
        }
    }

    fn declare_victory(&mut self) {
        self.won = true;
        log::info!(
            "boss {} defeated after {} correct answers",
            self.boss_name,
            self.correct_answers
        );
    }

    fn request(&self) -> TextGenRequest {
        TextGenRequest {
            preamble: self.config.render(&self.config.preamble, &self.boss_name),
            turns: self.history.clone(),
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.config.questions.get(self.script_index)
    }

    #[must_use]
    pub fn boss_name(&self) -> &str {
        &self.boss_name
    }

    #[must_use]
    pub const fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub const fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub const fn win_threshold(&self) -> u32 {
        self.config.win_threshold
    }

    #[must_use]
    pub const fn is_won(&self) -> bool {
        self.won
    }

    #[must_use]
    pub const fn is_awaiting_reply(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }
}

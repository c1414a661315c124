//! Quiz topics and the answer/advance state machine.
//!
//! A quiz walks the questions of one topic in order. Each question takes at
//! most one answer; a correct answer scores a point. Moving past the last
//! question finishes the quiz.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    pub text: &'static str,
    pub options: &'static [&'static str],
    #[serde(skip_serializing)]
    pub correct_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizTopic {
    pub id: &'static str,
    pub title: &'static str,
    #[serde(skip_serializing)]
    pub questions: &'static [QuizQuestion],
}

const PLANTS: &[QuizQuestion] = &[
    QuizQuestion {
        text: "What do plants need to grow?",
        options: &["Candy", "Sunlight & Water", "Video Games", "Rocks"],
        correct_index: 1,
    },
    QuizQuestion {
        text: "Which part of the plant grows underground?",
        options: &["Leaves", "Flowers", "Roots", "Stem"],
        correct_index: 2,
    },
    QuizQuestion {
        text: "What color are most plant leaves?",
        options: &["Blue", "Red", "Green", "Purple"],
        correct_index: 2,
    },
    QuizQuestion {
        text: "What do bees carry from flower to flower?",
        options: &["Pollen", "Honey", "Seeds", "Water"],
        correct_index: 0,
    },
    QuizQuestion {
        text: "Which of these is a fruit?",
        options: &["Carrot", "Potato", "Apple", "Spinach"],
        correct_index: 2,
    },
];

const BUGS: &[QuizQuestion] = &[
    QuizQuestion {
        text: "How many legs does an insect have?",
        options: &["2", "4", "6", "8"],
        correct_index: 2,
    },
    QuizQuestion {
        text: "What do caterpillars turn into?",
        options: &["Spiders", "Butterflies", "Beetles", "Flies"],
        correct_index: 1,
    },
    QuizQuestion {
        text: "Which bug makes honey?",
        options: &["Ant", "Bee", "Ladybug", "Mosquito"],
        correct_index: 1,
    },
    QuizQuestion {
        text: "Which bug spins a web?",
        options: &["Spider", "Ant", "Grasshopper", "Beetle"],
        correct_index: 0,
    },
    QuizQuestion {
        text: "What do ladybugs eat?",
        options: &["Leaves", "Aphids", "Dirt", "Rocks"],
        correct_index: 1,
    },
];

const TOPICS: &[QuizTopic] = &[
    QuizTopic { id: "plants", title: "Plants", questions: PLANTS },
    QuizTopic { id: "bugs", title: "Bugs", questions: BUGS },
];

pub fn topics() -> &'static [QuizTopic] {
    TOPICS
}

pub fn find_topic(id: &str) -> Option<&'static QuizTopic> {
    TOPICS.iter().find(|t| t.id == id)
}

/// Reasons an answer is refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("the quiz is already finished")]
    Finished,
    #[error("question {0} was already answered")]
    AlreadyAnswered(usize),
    #[error("option {index} does not exist (question has {options} options)")]
    NoSuchOption { index: usize, options: usize },
}

/// Progress through one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSession {
    #[serde(skip_serializing)]
    topic: &'static QuizTopic,
    pub topic_id: &'static str,
    pub total_questions: usize,
    pub current_question: usize,
    pub score: u32,
    pub is_finished: bool,
    /// `None` until the current question is answered.
    pub answer_correct: Option<bool>,
}

impl QuizSession {
    pub fn start(topic: &'static QuizTopic) -> Self {
        Self {
            topic,
            topic_id: topic.id,
            total_questions: topic.questions.len(),
            current_question: 0,
            score: 0,
            is_finished: topic.questions.is_empty(),
            answer_correct: None,
        }
    }

    pub fn topic(&self) -> &'static QuizTopic {
        self.topic
    }

    /// The question awaiting an answer; `None` once finished.
    pub fn question(&self) -> Option<&'static QuizQuestion> {
        if self.is_finished {
            return None;
        }
        self.topic.questions.get(self.current_question)
    }

    /// Answer the current question, returning whether it was correct.
    pub fn answer(&mut self, index: usize) -> Result<bool, QuizError> {
        let question = self.question().ok_or(QuizError::Finished)?;
        if self.answer_correct.is_some() {
            return Err(QuizError::AlreadyAnswered(self.current_question));
        }
        if index >= question.options.len() {
            return Err(QuizError::NoSuchOption { index, options: question.options.len() });
        }
        let correct = index == question.correct_index;
        if correct {
            self.score += 1;
        }
        self.answer_correct = Some(correct);
        Ok(correct)
    }

    /// Move to the next question, or finish after the last one.
    /// Unanswered questions score nothing.
    pub fn next(&mut self) {
        if self.is_finished {
            return;
        }
        if self.current_question + 1 < self.total_questions {
            self.current_question += 1;
            self.answer_correct = None;
        } else {
            self.is_finished = true;
        }
    }
}

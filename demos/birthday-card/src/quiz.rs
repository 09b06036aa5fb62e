use fete_engine::OneShot;
use serde::Serialize;

use crate::content::Question;

/// How long a wrong answer shakes the card before the selection clears.
pub const SHAKE_MS: u32 = 700;
/// Wrong attempts after which the hint stays visible.
pub const HINT_AFTER: usize = 2;

const SHAKE_AMPLITUDE_PX: f32 = 10.0;
const SHAKE_CYCLES: f32 = 4.0;

/// Outcome of selecting an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The correct option. Reported once per session.
    Correct,
    Wrong,
    /// Disabled, out of range, or the quiz is already solved.
    Ignored,
}

/// Per-option display state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionState {
    Idle,
    /// Picked and waiting for the shake to clear.
    Selected,
    /// Marked wrong and disabled for the rest of the session.
    Wrong,
    Correct,
}

/// Quiz gate session state.
pub struct Quiz {
    correct: Vec<bool>,
    wrong: Vec<usize>,
    selected: Option<usize>,
    shake: Option<OneShot>,
    hint_visible: bool,
    solved: bool,
}

impl Quiz {
    pub fn new(question: &Question) -> Self {
        Self {
            correct: question.options.iter().map(|o| o.correct).collect(),
            wrong: Vec::new(),
            selected: None,
            shake: None,
            hint_visible: false,
            solved: false,
        }
    }

    pub fn select(&mut self, index: usize) -> Selection {
        if self.solved {
            return Selection::Ignored;
        }
        let Some(&is_correct) = self.correct.get(index) else {
            log::warn!("quiz: option {} out of range ({} options)", index, self.correct.len());
            return Selection::Ignored;
        };
        if self.wrong.contains(&index) {
            return Selection::Ignored;
        }

        self.selected = Some(index);
        if is_correct {
            self.solved = true;
            self.shake = None;
            log::info!("quiz: solved after {} wrong attempts", self.wrong.len());
            return Selection::Correct;
        }

        self.wrong.push(index);
        self.shake = Some(OneShot::from_millis(SHAKE_MS));
        if self.wrong.len() >= HINT_AFTER && !self.hint_visible {
            self.hint_visible = true;
            log::info!("quiz: hint revealed");
        }
        Selection::Wrong
    }

    /// Advance the shake timer; on expiry the shake and the selection clear.
    pub fn tick(&mut self, dt: f32) {
        if let Some(shake) = self.shake.as_mut() {
            if shake.tick(dt) {
                self.shake = None;
                self.selected = None;
            }
        }
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Wrongly selected indices, in the order they were picked.
    pub fn wrong_attempts(&self) -> &[usize] {
        &self.wrong
    }

    pub fn option_state(&self, index: usize) -> OptionState {
        if self.wrong.contains(&index) {
            OptionState::Wrong
        } else if self.selected == Some(index) {
            if self.correct.get(index).copied().unwrap_or(false) {
                OptionState::Correct
            } else {
                OptionState::Selected
            }
        } else {
            OptionState::Idle
        }
    }

    /// Horizontal card offset in pixels: a decaying wobble while shaking.
    pub fn shake_offset(&self) -> f32 {
        match &self.shake {
            Some(shake) => {
                let p = shake.progress();
                (p * SHAKE_CYCLES * std::f32::consts::TAU).sin() * SHAKE_AMPLITUDE_PX * (1.0 - p)
            }
            None => 0.0,
        }
    }

    pub fn view<'a>(&self, question: &'a Question) -> QuizView<'a> {
        QuizView {
            title: &question.title,
            subtitle: &question.subtitle,
            prompt: &question.prompt,
            hint: self.hint_visible.then_some(question.hint.as_str()),
            shaking: self.is_shaking(),
            options: question
                .options
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    let state = self.option_state(i);
                    OptionView {
                        letter: option_letter(i),
                        label: &option.label,
                        state,
                        disabled: state == OptionState::Wrong || self.solved,
                    }
                })
                .collect(),
        }
    }
}

/// A, B, C, ... for the option badges.
pub fn option_letter(index: usize) -> char {
    char::from_u32('A' as u32 + index as u32).unwrap_or('?')
}

#[derive(Debug, Serialize)]
pub struct QuizView<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub prompt: &'a str,
    pub hint: Option<&'a str>,
    pub shaking: bool,
    pub options: Vec<OptionView<'a>>,
}

#[derive(Debug, Serialize)]
pub struct OptionView<'a> {
    pub letter: char,
    pub label: &'a str,
    pub state: OptionState,
    pub disabled: bool,
}

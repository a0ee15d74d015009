//! QR code inspection minigame
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const DEFAULT_QR_DATA: &str = include_str!("../../scamducation-web/static/assets/data/qr.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrLink {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrScenario {
    pub id: u32,
    /// Poster artwork key rendered by the front end.
    pub image: String,
    pub context: String,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub safe_points: Vec<String>,
    pub is_scam: bool,
    pub explanation: String,
    #[serde(default)]
    pub link: Option<QrLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QrScenarioSet {
    scenarios: Vec<QrScenario>,
}

impl QrScenarioSet {
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_QR_DATA).unwrap_or_else(|err| {
            log::error!("bundled QR scenarios unusable: {err}");
            Self::default()
        })
    }

    #[must_use]
    pub fn scenarios(&self) -> &[QrScenario] {
        &self.scenarios
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QrVerdict {
    Scam,
    Safe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrPhase {
    Intro,
    Playing {
        index: usize,
        verdict: Option<QrVerdict>,
    },
    Summary,
}

#[derive(Debug, Clone)]
pub struct QrGame {
    scenarios: QrScenarioSet,
    phase: QrPhase,
    score: u32,
    results: Vec<bool>,
    found_flags: BTreeSet<usize>,
}

impl QrGame {
    #[must_use]
    pub const fn new(scenarios: QrScenarioSet) -> Self {
        Self {
            scenarios,
            phase: QrPhase::Intro,
            score: 0,
            results: Vec::new(),
            found_flags: BTreeSet::new(),
        }
    }

    /// Begin (or restart) from the first scenario with a clean score.
    pub fn start(&mut self) {
        self.score = 0;
        self.results.clear();
        self.found_flags.clear();
        self.phase = if self.scenarios.is_empty() {
            QrPhase::Summary
        } else {
            QrPhase::Playing {
                index: 0,
                verdict: None,
            }
        };
    }

    /// Record the player's call on the current scenario.
    ///
    /// Returns whether the call was right, or `None` if a verdict was already
    /// given or no scenario is in play.
    pub fn choose(&mut self, verdict: QrVerdict) -> Option<bool> {
        let QrPhase::Playing {
            index,
            verdict: None,
        } = self.phase
        else {
            return None;
        };
        let scenario = self.scenarios.scenarios().get(index)?;
        let correct = scenario.is_scam == (verdict == QrVerdict::Scam);
        if correct {
            self.score += 1;
        }
        self.results.push(correct);
        self.phase = QrPhase::Playing {
            index,
            verdict: Some(verdict),
        };
        Some(correct)
    }

    /// Mark or unmark a red flag on the current poster.
    pub fn toggle_flag(&mut self, flag: usize) {
        if !matches!(self.phase, QrPhase::Playing { .. }) {
            return;
        }
        if !self.found_flags.remove(&flag) {
            self.found_flags.insert(flag);
        }
    }

    /// Move on once a verdict is in; the last scenario leads to the summary.
    pub fn next(&mut self) {
        let QrPhase::Playing {
            index,
            verdict: Some(_),
        } = self.phase
        else {
            return;
        };
        self.found_flags.clear();
        self.phase = if index + 1 < self.scenarios.len() {
            QrPhase::Playing {
                index: index + 1,
                verdict: None,
            }
        } else {
            QrPhase::Summary
        };
    }

    #[must_use]
    pub fn current(&self) -> Option<&QrScenario> {
        match self.phase {
            QrPhase::Playing { index, .. } => self.scenarios.scenarios().get(index),
            _ => None,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> QrPhase {
        self.phase
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn results(&self) -> &[bool] {
        &self.results
    }

    #[must_use]
    pub fn is_flagged(&self, flag: usize) -> bool {
        self.found_flags.contains(&flag)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.scenarios.len()
    }

    /// Score as a rounded percentage of all scenarios.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        let total = self.scenarios.len();
        if total == 0 {
            return 0;
        }
        let score = f64::from(self.score);
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let pct = (score / total as f64 * 100.0).round() as u32;
        pct
    }
}

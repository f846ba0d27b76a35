pub mod distractors;
pub mod lesson;
pub mod verse;

use log::{debug, info};
use rand::Rng;

use crate::error::Result;
use verse::{Verse, Word};

/// Turns a verse and its words into a lesson.
///
/// Fails with [`crate::LessonError::InvalidLessonInput`] when there's nothing to
/// build from; once the words are validated it always succeeds.
pub fn generate_lesson_plan<R: Rng + ?Sized>(
    verse: Option<&Verse>,
    words: &[Word],
    rng: &mut R,
) -> Result<LessonPlan> {
    let (verse, usable) = verse::validate_input(verse, words)?;

    let questions = lesson::synthesize(verse, &usable, rng);
    let plan = LessonPlan::assemble(verse.verse_key(), questions);

    info!(
        "Generated lesson for {}: {} questions, {} points",
        plan.verse_key(),
        plan.total_question_count(),
        plan.total_reward_points()
    );
    Ok(plan)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    ArabicToTransliteration,
    TransliterationToArabic,
    AudioRecognition,
    WordSelection,
    CompleteVerse,
}

/// Ordered: easy < medium < hard.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

impl QuestionOption {
    pub fn new(id: &str, text: String, is_correct: bool) -> Self {
        Self {
            id: id.to_string(),
            text,
            is_correct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonQuestion {
    /// "q1", "q2", ... in lesson order
    pub id: String,
    pub kind: QuestionKind,
    pub prompt: String,
    pub correct_answer: String,
    pub options: Vec<QuestionOption>,
    pub difficulty: Difficulty,
    pub reward_points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arabic_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transliteration_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_ref: Option<String>,
}

impl LessonQuestion {
    pub fn correct_option(&self) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.is_correct)
    }

    pub fn is_correct(&self, option_id: &str) -> bool {
        self.options
            .iter()
            .any(|o| o.id == option_id && o.is_correct)
    }
}

/// Fixed checkpoints; the lesson total is appended as the last one.
const MILESTONE_CHECKPOINTS: [u32; 3] = [5, 10, 15];

/// A finished lesson. Read-only once assembled; a quiz runner tracks
/// the learner's answers on its own.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPlan {
    verse_key: String,
    questions: Vec<LessonQuestion>,
    total_question_count: usize,
    total_reward_points: u32,
    milestone_thresholds: Vec<u32>,
}

impl LessonPlan {
    pub fn assemble(verse_key: String, questions: Vec<LessonQuestion>) -> Self {
        let total_reward_points: u32 = questions.iter().map(|q| q.reward_points).sum();

        let mut milestone_thresholds = MILESTONE_CHECKPOINTS.to_vec();
        if !milestone_thresholds.contains(&total_reward_points) {
            milestone_thresholds.push(total_reward_points);
        }
        // A lesson worth fewer than 15 points finishes before the later checkpoints
        milestone_thresholds.retain(|&t| t <= total_reward_points);
        debug!("Milestones for {}: {:?}", verse_key, milestone_thresholds);

        Self {
            verse_key,
            total_question_count: questions.len(),
            questions,
            total_reward_points,
            milestone_thresholds,
        }
    }

    pub fn verse_key(&self) -> &str {
        &self.verse_key
    }

    pub fn questions(&self) -> &[LessonQuestion] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&LessonQuestion> {
        self.questions.get(index)
    }

    pub fn total_question_count(&self) -> usize {
        self.total_question_count
    }

    pub fn total_reward_points(&self) -> u32 {
        self.total_reward_points
    }

    pub fn milestone_thresholds(&self) -> &[u32] {
        &self.milestone_thresholds
    }

    /// The checkpoint crossed when a learner's score goes from
    /// `previous_points` to `points`, if any.
    pub fn milestone_reached(&self, previous_points: u32, points: u32) -> Option<u32> {
        self.milestone_thresholds
            .iter()
            .copied()
            .find(|&t| previous_points < t && t <= points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(points: u32) -> LessonQuestion {
        LessonQuestion {
            id: "q1".to_string(),
            kind: QuestionKind::WordSelection,
            prompt: "Choose the correct option: بِسْمِ".to_string(),
            correct_answer: "bismi".to_string(),
            options: vec![
                QuestionOption::new("b", "besmi".to_string(), false),
                QuestionOption::new("a", "bismi".to_string(), true),
                QuestionOption::new("c", "bismia".to_string(), false),
            ],
            difficulty: Difficulty::Easy,
            reward_points: points,
            milestone_message: None,
            arabic_text: None,
            transliteration_text: None,
            audio_ref: None,
        }
    }

    #[test]
    fn sums_points_and_appends_total_checkpoint() {
        let questions = [5, 5, 5, 5, 3].into_iter().map(question).collect();
        let plan = LessonPlan::assemble("1:1".to_string(), questions);

        assert_eq!(plan.total_reward_points(), 23);
        assert_eq!(plan.total_question_count(), 5);
        assert_eq!(plan.milestone_thresholds(), &[5, 10, 15, 23]);
    }

    #[test]
    fn total_matching_a_checkpoint_is_not_repeated() {
        let questions = [5, 5].into_iter().map(question).collect();
        let plan = LessonPlan::assemble("1:1".to_string(), questions);

        assert_eq!(plan.milestone_thresholds(), &[5, 10]);
    }

    #[test]
    fn reports_the_crossed_milestone() {
        let questions = [5, 5, 5, 5].into_iter().map(question).collect();
        let plan = LessonPlan::assemble("1:1".to_string(), questions);

        assert_eq!(plan.milestone_reached(4, 5), Some(5));
        assert_eq!(plan.milestone_reached(5, 6), None);
        assert_eq!(plan.milestone_reached(18, 20), Some(20));
    }

    #[test]
    fn checks_answers_by_option_id() {
        let q = question(1);
        assert!(q.is_correct("a"));
        assert!(!q.is_correct("b"));
        assert!(!q.is_correct("z"));
        assert_eq!(q.correct_option().map(|o| o.text.as_str()), Some("bismi"));
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let json = serde_json::to_value(question(1)).unwrap();
        assert_eq!(json["kind"], "word_selection");
        assert_eq!(json["difficulty"], "easy");
        assert_eq!(json["rewardPoints"], 1);
        assert_eq!(json["correctAnswer"], "bismi");
        assert!(json.get("milestoneMessage").is_none());
    }
}

//! Builds the ordered question list of a lesson.
//!
//! Phases run from easy to hard: single words both ways, a word pair,
//! listening, then the verse as a whole. Milestone messages are attached
//! last, by position.

use log::debug;
use rand::Rng;

use super::distractors;
use super::verse::{Verse, Word};
use super::{Difficulty, LessonQuestion, QuestionKind};

const REVERSE_RECOGNITION_WORDS: usize = 3;
const AUDIO_RECOGNITION_WORDS: usize = 2;
const PARTIAL_VERSE_WORDS: usize = 2;

const FIVE_QUESTIONS_MESSAGE: &str = "Woah, five points unlocked! 🎉";
const TEN_QUESTIONS_MESSAGE: &str = "You just unlocked 10 points! 🌟";
const GETTING_HARDER_MESSAGE: &str = "Great! Attention! It's getting hard. 🔥";
const ALMOST_DONE_MESSAGE: &str = "You're almost done! 💪";
const MASTERED_MESSAGE: &str = "🎉 Congratulations! You've mastered this verse! 🎉";

struct NewQuestion {
    kind: QuestionKind,
    prompt: String,
    correct_answer: String,
    wrong_answers: [String; 2],
    difficulty: Difficulty,
    reward_points: u32,
    arabic_text: Option<String>,
    transliteration_text: Option<String>,
    audio_ref: Option<String>,
}

struct LessonBuilder<'r, R: Rng + ?Sized> {
    rng: &'r mut R,
    questions: Vec<LessonQuestion>,
}

impl<'r, R: Rng + ?Sized> LessonBuilder<'r, R> {
    fn new(rng: &'r mut R) -> Self {
        Self {
            rng,
            questions: Vec::new(),
        }
    }

    fn push(&mut self, new: NewQuestion) {
        let options = distractors::build_options(&new.correct_answer, new.wrong_answers, &mut *self.rng);
        self.questions.push(LessonQuestion {
            id: format!("q{}", self.questions.len() + 1),
            kind: new.kind,
            prompt: new.prompt,
            correct_answer: new.correct_answer,
            options,
            difficulty: new.difficulty,
            reward_points: new.reward_points,
            milestone_message: None,
            arabic_text: new.arabic_text,
            transliteration_text: new.transliteration_text,
            audio_ref: new.audio_ref,
        });
    }

    fn len(&self) -> usize {
        self.questions.len()
    }
}

fn transliteration(word: &Word) -> String {
    word.transliteration_text.trim().to_string()
}

fn join_arabic(words: &[Word]) -> String {
    words
        .iter()
        .map(|w| w.text.trim())
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_transliteration(words: &[Word]) -> String {
    words
        .iter()
        .map(|w| w.transliteration_text.trim())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generates every question for `words`, which must already be validated
/// (non-empty, each with text and transliteration).
pub fn synthesize<R: Rng + ?Sized>(
    verse: &Verse,
    words: &[Word],
    rng: &mut R,
) -> Vec<LessonQuestion> {
    let mut lesson = LessonBuilder::new(rng);

    word_recognition(&mut lesson, words);
    debug!("Word recognition: {} questions", lesson.len());

    let before = lesson.len();
    reverse_recognition(&mut lesson, words);
    debug!("Reverse recognition: {} questions", lesson.len() - before);

    let before = lesson.len();
    word_pair(&mut lesson, words);
    debug!("Word pair: {} questions", lesson.len() - before);

    let before = lesson.len();
    audio_recognition(&mut lesson, words);
    debug!("Audio recognition: {} questions", lesson.len() - before);

    full_verse(&mut lesson, verse, words);

    let mut questions = lesson.questions;
    attach_milestones(&mut questions);
    questions
}

fn word_recognition<R: Rng + ?Sized>(lesson: &mut LessonBuilder<'_, R>, words: &[Word]) {
    for word in words {
        let answer = transliteration(word);

        lesson.push(NewQuestion {
            kind: QuestionKind::ArabicToTransliteration,
            prompt: format!("How do we read {}?", word.text),
            wrong_answers: distractors::transliteration_distractors(&answer),
            correct_answer: answer.clone(),
            difficulty: Difficulty::Easy,
            reward_points: 1,
            arabic_text: Some(word.text.clone()),
            transliteration_text: Some(answer.clone()),
            audio_ref: None,
        });

        lesson.push(NewQuestion {
            kind: QuestionKind::WordSelection,
            prompt: format!("Choose the correct option: {}", word.text),
            wrong_answers: distractors::transliteration_distractors(&answer),
            correct_answer: answer,
            difficulty: Difficulty::Easy,
            reward_points: 1,
            arabic_text: Some(word.text.clone()),
            transliteration_text: None,
            audio_ref: None,
        });
    }
}

fn reverse_recognition<R: Rng + ?Sized>(lesson: &mut LessonBuilder<'_, R>, words: &[Word]) {
    for word in words.iter().take(REVERSE_RECOGNITION_WORDS) {
        let answer = word.text.trim().to_string();
        let shown = transliteration(word);

        lesson.push(NewQuestion {
            kind: QuestionKind::TransliterationToArabic,
            prompt: format!("Write this in Arabic: {}", shown),
            wrong_answers: distractors::arabic_word_distractors(&answer, words),
            correct_answer: answer.clone(),
            difficulty: Difficulty::Medium,
            reward_points: 1,
            arabic_text: Some(answer),
            transliteration_text: Some(shown),
            audio_ref: None,
        });
    }
}

fn word_pair<R: Rng + ?Sized>(lesson: &mut LessonBuilder<'_, R>, words: &[Word]) {
    if words.len() < 2 {
        return;
    }
    let pair = &words[..2];
    let arabic = join_arabic(pair);
    let shown = join_transliteration(pair);

    let wrong_answers = distractors::sequence_distractors(&arabic, &mut *lesson.rng);
    lesson.push(NewQuestion {
        kind: QuestionKind::TransliterationToArabic,
        prompt: format!("Write this in Arabic: {}", shown),
        wrong_answers,
        correct_answer: arabic.clone(),
        difficulty: Difficulty::Medium,
        reward_points: 2,
        arabic_text: Some(arabic),
        transliteration_text: Some(shown),
        audio_ref: None,
    });
}

fn audio_recognition<R: Rng + ?Sized>(lesson: &mut LessonBuilder<'_, R>, words: &[Word]) {
    for word in words.iter().take(AUDIO_RECOGNITION_WORDS) {
        let answer = transliteration(word);

        lesson.push(NewQuestion {
            kind: QuestionKind::AudioRecognition,
            prompt: "Click on what you hear:".to_string(),
            wrong_answers: distractors::transliteration_distractors(&answer),
            correct_answer: answer,
            difficulty: Difficulty::Medium,
            reward_points: 2,
            arabic_text: Some(word.text.clone()),
            transliteration_text: None,
            audio_ref: word.audio_ref.clone(),
        });
    }
}

fn full_verse<R: Rng + ?Sized>(lesson: &mut LessonBuilder<'_, R>, verse: &Verse, words: &[Word]) {
    let partial = &words[..words.len().min(PARTIAL_VERSE_WORDS)];
    let partial_arabic = join_arabic(partial);
    let partial_transliteration = join_transliteration(partial);

    lesson.push(NewQuestion {
        kind: QuestionKind::ArabicToTransliteration,
        prompt: format!("Write this in transliteration: {}", partial_arabic),
        wrong_answers: distractors::sequence_transliteration_distractors(&partial_transliteration),
        correct_answer: partial_transliteration,
        difficulty: Difficulty::Hard,
        reward_points: 3,
        arabic_text: Some(partial_arabic),
        transliteration_text: None,
        audio_ref: None,
    });

    let verse_arabic = verse.arabic_text().trim().to_string();
    let verse_transliteration = join_transliteration(words);
    if verse_arabic.is_empty() {
        debug!("{} has no Arabic text, full verse answers will be blank", verse.verse_key());
    }

    let wrong_answers = distractors::sequence_distractors(&verse_arabic, &mut *lesson.rng);
    lesson.push(NewQuestion {
        kind: QuestionKind::CompleteVerse,
        prompt: format!("Write this in Arabic: {}", verse_transliteration),
        wrong_answers,
        correct_answer: verse_arabic.clone(),
        difficulty: Difficulty::Hard,
        reward_points: 5,
        arabic_text: Some(verse_arabic.clone()),
        transliteration_text: Some(verse_transliteration.clone()),
        audio_ref: None,
    });

    // Without the verse text, show the words so the prompt isn't empty
    let shown = if verse_arabic.is_empty() {
        join_arabic(words)
    } else {
        verse_arabic
    };
    lesson.push(NewQuestion {
        kind: QuestionKind::CompleteVerse,
        prompt: format!("Write this in transliteration: {}", shown),
        wrong_answers: distractors::sequence_transliteration_distractors(&verse_transliteration),
        correct_answer: verse_transliteration,
        difficulty: Difficulty::Hard,
        reward_points: 5,
        arabic_text: Some(shown),
        transliteration_text: None,
        audio_ref: None,
    });
}

/// Rules run in this order; a later rule overwrites an earlier one on the same question.
fn attach_milestones(questions: &mut [LessonQuestion]) {
    let count = questions.len();
    let mut rules: Vec<(usize, &str)> = Vec::new();

    if count >= 5 {
        rules.push((4, FIVE_QUESTIONS_MESSAGE));
    }
    if count >= 10 {
        rules.push((9, TEN_QUESTIONS_MESSAGE));
    }
    rules.push((count * 7 / 10, GETTING_HARDER_MESSAGE));
    if count >= 2 {
        rules.push((count - 2, ALMOST_DONE_MESSAGE));
    }
    if count >= 1 {
        rules.push((count - 1, MASTERED_MESSAGE));
    }

    for (index, message) in rules {
        if let Some(question) = questions.get_mut(index) {
            debug!("Milestone at question {}: {}", index + 1, message);
            question.milestone_message = Some(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fatiha_one() -> (Verse, Vec<Word>) {
        let verse = Verse::new(1, 1).with_arabic_text("بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ");
        let words = vec![
            Word::new(1, "بِسْمِ", "bismi").with_audio("wbw/001_001_001.mp3"),
            Word::new(2, "ٱللَّهِ", "l-lahi").with_audio("wbw/001_001_002.mp3"),
            Word::new(3, "ٱلرَّحْمَٰنِ", "r-raḥmāni"),
            Word::new(4, "ٱلرَّحِيمِ", "r-raḥīmi"),
        ];
        (verse, words)
    }

    fn kinds(questions: &[LessonQuestion]) -> Vec<QuestionKind> {
        questions.iter().map(|q| q.kind).collect()
    }

    #[test]
    fn four_words_make_seventeen_questions_in_phase_order() {
        let (verse, words) = fatiha_one();
        let questions = synthesize(&verse, &words, &mut StdRng::seed_from_u64(1));

        use QuestionKind::*;
        let mut expected = Vec::new();
        for _ in 0..4 {
            expected.extend([ArabicToTransliteration, WordSelection]);
        }
        expected.extend([TransliterationToArabic; 4]);
        expected.extend([AudioRecognition; 2]);
        expected.extend([ArabicToTransliteration, CompleteVerse, CompleteVerse]);

        assert_eq!(kinds(&questions), expected);
        let ids = questions.iter().map(|q| q.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids.first(), Some(&"q1"));
        assert_eq!(ids.last(), Some(&"q17"));
    }

    #[test]
    fn single_word_skips_the_pair_question() {
        let verse = Verse::new(108, 1).with_arabic_text("إِنَّآ");
        let words = vec![Word::new(1, "إِنَّآ", "innā")];

        let questions = synthesize(&verse, &words, &mut StdRng::seed_from_u64(2));

        use QuestionKind::*;
        assert_eq!(
            kinds(&questions),
            vec![
                ArabicToTransliteration,
                WordSelection,
                TransliterationToArabic,
                AudioRecognition,
                ArabicToTransliteration,
                CompleteVerse,
                CompleteVerse,
            ]
        );
        assert_eq!(questions[4].correct_answer, "innā");
    }

    #[test]
    fn difficulty_never_goes_down_and_rewards_grow() {
        let (verse, words) = fatiha_one();
        let questions = synthesize(&verse, &words, &mut StdRng::seed_from_u64(3));

        for pair in questions.windows(2) {
            assert!(pair[0].difficulty <= pair[1].difficulty);
        }
        let rewards = questions.iter().map(|q| q.reward_points).collect::<Vec<_>>();
        assert_eq!(&rewards[..8], &[1; 8]);
        assert_eq!(&rewards[8..11], &[1; 3]);
        assert_eq!(&rewards[11..14], &[2; 3]);
        assert_eq!(&rewards[14..], &[3, 5, 5]);
    }

    #[test]
    fn full_verse_questions_use_the_verse_text() {
        let (verse, words) = fatiha_one();
        let questions = synthesize(&verse, &words, &mut StdRng::seed_from_u64(4));

        let to_arabic = &questions[15];
        assert_eq!(to_arabic.correct_answer, "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ");
        assert_eq!(
            to_arabic.prompt,
            "Write this in Arabic: bismi l-lahi r-raḥmāni r-raḥīmi"
        );

        let last = &questions[16];
        assert_eq!(last.correct_answer, "bismi l-lahi r-raḥmāni r-raḥīmi");
        assert_eq!(last.reward_points, 5);
    }

    #[test]
    fn audio_questions_carry_the_recording() {
        let (verse, words) = fatiha_one();
        let questions = synthesize(&verse, &words, &mut StdRng::seed_from_u64(5));

        let audio = questions
            .iter()
            .filter(|q| q.kind == QuestionKind::AudioRecognition)
            .map(|q| q.audio_ref.as_deref())
            .collect::<Vec<_>>();
        assert_eq!(
            audio,
            vec![Some("wbw/001_001_001.mp3"), Some("wbw/001_001_002.mp3")]
        );
    }

    #[test]
    fn milestones_land_on_their_positions() {
        let (verse, words) = fatiha_one();
        let questions = synthesize(&verse, &words, &mut StdRng::seed_from_u64(6));
        let message = |i: usize| questions[i].milestone_message.as_deref();

        assert_eq!(message(4), Some(FIVE_QUESTIONS_MESSAGE));
        assert_eq!(message(9), Some(TEN_QUESTIONS_MESSAGE));
        // floor(0.7 * 17)
        assert_eq!(message(11), Some(GETTING_HARDER_MESSAGE));
        assert_eq!(message(15), Some(ALMOST_DONE_MESSAGE));
        assert_eq!(message(16), Some(MASTERED_MESSAGE));
        assert_eq!(message(0), None);
    }

    #[test]
    fn later_milestone_rule_wins() {
        // 7 questions: the "getting harder" index (4) is also the fifth question
        let verse = Verse::new(108, 1).with_arabic_text("إِنَّآ");
        let words = vec![Word::new(1, "إِنَّآ", "innā")];
        let questions = synthesize(&verse, &words, &mut StdRng::seed_from_u64(7));

        assert_eq!(
            questions[4].milestone_message.as_deref(),
            Some(GETTING_HARDER_MESSAGE)
        );
    }

    #[test]
    fn missing_verse_text_still_builds_a_valid_final_question() {
        let (_, words) = fatiha_one();
        let verse = Verse::new(1, 1);
        let questions = synthesize(&verse, &words, &mut StdRng::seed_from_u64(8));

        let to_arabic = &questions[15];
        assert_eq!(to_arabic.correct_answer, "");
        assert_eq!(to_arabic.options.iter().filter(|o| o.is_correct).count(), 1);
        assert!(questions[16].prompt.ends_with("ٱلرَّحِيمِ"));
    }
}

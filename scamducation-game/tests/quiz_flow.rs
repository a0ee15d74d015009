use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use scamducation_game::{
    BossQuizController, QuizConfig, QuizError, QuizMode, QuizStep, Speaker, TurnRole,
};

const VICTORY: &str = "AAAARRGHGH I'm DONE FOoooR";
const FAILURE: &str = "Grr... my dark powers are failing me! 💀 (falling back to training mode)";

fn remote_quiz(seed: u64) -> (BossQuizController, scamducation_game::TextGenRequest) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut quiz = BossQuizController::new(QuizConfig::load_from_static(), true, &mut rng);
    let request = quiz.begin().expect("remote mode requests the first question");
    (quiz, request)
}

fn scripted_quiz(seed: u64) -> BossQuizController {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut quiz = BossQuizController::new(QuizConfig::load_from_static(), false, &mut rng);
    assert!(quiz.begin().is_none());
    quiz
}

#[test]
fn opener_request_carries_preamble_and_opener() {
    let (quiz, request) = remote_quiz(1);
    assert_eq!(quiz.mode(), QuizMode::Remote);
    assert!(request.preamble.contains(quiz.boss_name()));
    assert!(request.preamble.contains(VICTORY));
    assert!(request.preamble.contains('5'));
    assert_eq!(request.turns.len(), 1);
    assert_eq!(request.turns[0].role, TurnRole::User);
    assert!(request.turns[0].text.starts_with("Start the battle!"));
}

#[test]
fn duplicate_submissions_are_rejected_while_in_flight() {
    let (mut quiz, _) = remote_quiz(2);
    assert!(quiz.is_awaiting_reply());
    assert_eq!(quiz.submit_answer("b"), Err(QuizError::RequestInFlight));

    quiz.receive_reply::<String>(Ok("Question one: A) B) C) D)".into()))
        .unwrap();
    let step = quiz.submit_answer("b").unwrap();
    let QuizStep::AwaitRemote(request) = step else {
        panic!("expected a remote request, got {step:?}");
    };
    assert_eq!(request.turns.len(), 3);
    assert_eq!(request.turns[1].role, TurnRole::Model);
    assert_eq!(quiz.submit_answer("c"), Err(QuizError::RequestInFlight));
}

#[test]
fn self_triggers_victory_at_threshold() {
    let (mut quiz, _) = remote_quiz(3);
    quiz.receive_reply::<String>(Ok("First question!".into()))
        .unwrap();
    for round in 1..=5 {
        quiz.submit_answer("c").unwrap();
        let step = quiz
            .receive_reply::<String>(Ok("Grr... that is CORRECT! Next question...".into()))
            .unwrap();
        assert_eq!(
            step,
            QuizStep::Judged {
                correct: true,
                victory: round == 5
            }
        );
    }
    assert!(quiz.is_won());
    assert_eq!(quiz.transcript().last().unwrap().text, VICTORY);
    assert_eq!(quiz.submit_answer("c"), Err(QuizError::AlreadyWon));
}

#[test]
fn literal_victory_phrase_wins_immediately() {
    let (mut quiz, _) = remote_quiz(4);
    quiz.receive_reply::<String>(Ok("First question!".into()))
        .unwrap();
    quiz.submit_answer("c").unwrap();
    let step = quiz
        .receive_reply::<String>(Ok(format!("Impressive... {VICTORY}")))
        .unwrap();
    assert_eq!(
        step,
        QuizStep::Judged {
            correct: true,
            victory: true
        }
    );
    assert_eq!(quiz.correct_answers(), 1);
    let victories = quiz
        .transcript()
        .iter()
        .filter(|message| message.text.contains(VICTORY))
        .count();
    assert_eq!(victories, 1);
}

#[test]
fn service_failure_falls_back_to_script() {
    let (mut quiz, _) = remote_quiz(5);
    quiz.receive_reply::<String>(Ok("First question!".into()))
        .unwrap();
    quiz.submit_answer("b").unwrap();
    let step = quiz
        .receive_reply::<String>(Err("HTTP 503".into()))
        .unwrap();
    assert_eq!(step, QuizStep::FellBack);
    assert_eq!(quiz.mode(), QuizMode::Scripted);
    assert_eq!(quiz.correct_answers(), 0, "failed answer is not counted");
    assert!(!quiz.is_awaiting_reply());

    let transcript = quiz.transcript();
    assert_eq!(transcript[transcript.len() - 2].text, FAILURE);
    assert!(transcript.last().unwrap().text.contains("RED FLAG"));

    // Stays scripted from here on.
    let step = quiz.submit_answer("B").unwrap();
    assert_eq!(
        step,
        QuizStep::Judged {
            correct: true,
            victory: false
        }
    );
}

#[test]
fn fallback_resumes_script_at_the_current_turn() {
    let (mut quiz, _) = remote_quiz(9);
    quiz.receive_reply::<String>(Ok("First question!".into()))
        .unwrap();
    for _ in 0..2 {
        quiz.submit_answer("a").unwrap();
        quiz.receive_reply::<String>(Ok("Correct! Next question...".into()))
            .unwrap();
    }
    quiz.submit_answer("a").unwrap();
    let step = quiz
        .receive_reply::<String>(Err("network down".into()))
        .unwrap();

    assert_eq!(step, QuizStep::FellBack);
    assert_eq!(quiz.correct_answers(), 2);
    let asked = &quiz.transcript().last().unwrap().text;
    assert!(asked.starts_with("You're tougher than I thought"), "asked {asked}");

    let step = quiz.submit_answer("c").unwrap();
    assert_eq!(
        step,
        QuizStep::Judged {
            correct: true,
            victory: false
        }
    );
    assert_eq!(quiz.correct_answers(), 3);
}

#[test]
fn empty_reply_counts_as_failure() {
    let (mut quiz, _) = remote_quiz(6);
    let step = quiz.receive_reply::<String>(Ok("   ".into())).unwrap();
    assert_eq!(step, QuizStep::FellBack);
}

#[test]
fn scripted_perfect_run_wins_on_fifth_answer() {
    let mut quiz = scripted_quiz(7);
    let answers = ["b", "C) contact the bank", "c", "research it independently", "52%"];
    for (idx, answer) in answers.iter().enumerate() {
        let step = quiz.submit_answer(answer).unwrap();
        assert_eq!(
            step,
            QuizStep::Judged {
                correct: true,
                victory: idx == answers.len() - 1
            },
            "answer {answer}"
        );
    }
    assert!(quiz.is_won());
    let last = quiz.transcript().last().unwrap();
    assert_eq!(last.speaker, Speaker::Scambert);
    assert_eq!(last.text, VICTORY);
}

#[test]
fn scripted_questions_cycle_after_the_last() {
    let mut quiz = scripted_quiz(8);
    let first = quiz.current_question().unwrap().question.clone();
    for _ in 0..5 {
        quiz.submit_answer("nope").unwrap();
    }
    assert_eq!(quiz.current_question().unwrap().question, first);
    assert_eq!(quiz.correct_answers(), 0);
    assert!(!quiz.is_won());
}

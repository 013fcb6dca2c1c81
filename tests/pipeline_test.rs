//! End-to-end flows through the integrity core: generation review
//! (validate events, re-judge the model's verdict) and play-time
//! verification (recompute an attempt, catch forged claims).

use chronofall_core::{
  build_composition_request, evaluate_ordering, judge_composition, parse_judge_reply,
  validate_event, verify_attempt, CompositionScores, Event, EventMetadata, Feedback, JudgePrompts,
  JudgeReply, LeakageDetector, ModelUsage, OrderAttempt, OrderEvent, RecommendedOrdering,
  UpstreamJudgment,
};

fn candidate_events() -> Vec<Event> {
  let texts = [
    "A republic falls as its dictator is stabbed in the senate",
    "A Norman duke takes the English crown after a coastal battle",
    "A Genoese navigator reaches islands across the Atlantic",
    "An emperor's final defeat ends two decades of European war",
    "A global war ends with surrender aboard a battleship",
    "Two astronauts walk on another world for the first time",
  ];
  let years = [-44, 1066, 1492, 1815, 1945, 1969];
  texts
    .iter()
    .zip(years)
    .map(|(text, year)| Event {
      year,
      text: (*text).into(),
      metadata: Some(EventMetadata {
        difficulty: Some(2),
        category: Some(vec!["history".into()]),
        era: Some("ce".into()),
        fame_level: Some("famous".into()),
        tags: Some(vec!["daily".into()]),
      }),
    })
    .collect()
}

#[test]
fn generation_review_accepts_a_clean_batch_and_flips_a_wrong_rejection() {
  let mut detector = LeakageDetector::new();
  detector.learn_from_rejected("Napoleon abdicates after Waterloo in 1815", [1815, 1815]);

  let events = candidate_events();

  // Every event passes individual review: full metadata, leakage under 0.6.
  for event in &events {
    let report = validate_event(&detector, event);
    assert!(report.passed, "event should pass: {}", report.reasoning);
    assert!(report.scores.semantic_leakage < 0.6);
    assert_eq!(report.scores.metadata_quality, 1.0);
  }

  // The model judged the composition sound but claimed approved=false.
  // The recomputed score clears both gates, so the verdict flips with no
  // explanatory issue (only downgrades are explained).
  let upstream = UpstreamJudgment {
    approved: false,
    quality_score: 0.2,
    ordering: RecommendedOrdering { sequence: vec![3, 0, 5, 1, 4, 2], rationale: "mix eras".into() },
    composition: CompositionScores {
      topic_diversity: 0.8,
      geographic_spread: 0.6,
      difficulty_gradient: 0.8,
      guessability: 0.9,
    },
    issues: vec![],
    suggestions: vec!["consider one non-European event".into()],
  };
  let judgment = judge_composition(&events, "ce", &upstream).unwrap();
  assert!(judgment.approved);
  assert_eq!(judgment.quality_score, 0.79);
  assert!(judgment.issues.is_empty());
  assert_eq!(judgment.ordering.sequence, vec![3, 0, 5, 1, 4, 2]);
  assert_eq!(judgment.suggestions, vec!["consider one non-European event"]);
}

#[test]
fn judge_request_and_reply_round_the_model_boundary() {
  let events = candidate_events();
  let request = build_composition_request(&JudgePrompts::default(), &events, "ce").unwrap();
  assert_eq!(request.schema, "composition_judgment");
  assert!(request.user.contains("Norman duke"));

  // What the serving layer hands back after the call.
  let reply = JudgeReply {
    raw: r#"{
      "approved": true,
      "qualityScore": 1.0,
      "ordering": { "sequence": [0, 1, 2, 3, 4, 5], "rationale": "already spread" },
      "composition": {
        "topicDiversity": 0.7, "geographicSpread": 0.3,
        "difficultyGradient": 0.8, "guessability": 0.8
      },
      "issues": [], "suggestions": []
    }"#
    .into(),
    usage: Some(ModelUsage { total_tokens: Some(512), cost_usd: Some(0.002), ..Default::default() }),
  };
  let upstream = parse_judge_reply(&reply).unwrap();

  // One dimension under the floor: the claimed approval does not survive.
  let judgment = judge_composition(&events, "ce", &upstream).unwrap();
  assert!(!judgment.approved);
  assert_eq!(judgment.issues, vec!["Low scores: geographicSpread"]);
}

#[test]
fn play_time_verification_rejects_a_forged_win() {
  let events: Vec<OrderEvent> = candidate_events()
    .into_iter()
    .enumerate()
    .map(|(i, e)| OrderEvent { id: format!("ev{i}"), year: e.year, text: e.text })
    .collect();

  // Player got the last two positions swapped but claims a perfect solve.
  let ordering = vec!["ev0", "ev1", "ev2", "ev3", "ev5", "ev4"]
    .into_iter()
    .map(String::from)
    .collect::<Vec<_>>();
  let attempt = OrderAttempt {
    ordering: ordering.clone(),
    feedback: vec![Feedback::Correct; 6],
    pairs_correct: 15,
    total_pairs: 15,
    timestamp: 1_767_225_600_000,
  };

  let verified = verify_attempt(&attempt, &events).unwrap();
  assert!(!verified.solved);
  assert!(!verified.discrepancies.is_empty());
  assert_eq!(verified.evaluation.pairs_correct, 14);
  assert_eq!(verified.points, 28);

  // The independent layer-2 recomputation proves the claim false at the
  // scrambled positions.
  let eval = evaluate_ordering(&ordering, &events).unwrap();
  assert_eq!(eval.feedback[4], Feedback::Incorrect);
  assert_eq!(eval.feedback[5], Feedback::Incorrect);
  assert_ne!(eval.feedback, attempt.feedback);
}

#[test]
fn play_time_verification_accepts_an_honest_solve() {
  let events = vec![
    OrderEvent { id: "w".into(), year: 1914, text: "a war begins".into() },
    OrderEvent { id: "x".into(), year: 1918, text: "the war ends".into() },
    OrderEvent { id: "y".into(), year: 1929, text: "markets crash".into() },
    OrderEvent { id: "z".into(), year: 1939, text: "another war begins".into() },
    OrderEvent { id: "v".into(), year: 1945, text: "it ends too".into() },
    OrderEvent { id: "u".into(), year: 1969, text: "a moonwalk".into() },
  ];
  let ordering: Vec<String> = ["w", "x", "y", "z", "v", "u"].iter().map(|s| s.to_string()).collect();
  let eval = evaluate_ordering(&ordering, &events).unwrap();

  let attempt = OrderAttempt {
    ordering,
    feedback: eval.feedback.clone(),
    pairs_correct: eval.pairs_correct,
    total_pairs: eval.total_pairs,
    timestamp: 1_767_225_600_000,
  };
  let verified = verify_attempt(&attempt, &events).unwrap();
  assert!(verified.solved);
  assert!(verified.discrepancies.is_empty());
  assert_eq!(verified.points, 30);
  assert_eq!(verified.perfect_positions, 6);
}

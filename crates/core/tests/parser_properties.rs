//! End-to-end parser behavior: candidate collection, phrase folding,
//! solution ranking, normalization and cancellation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use parlance_core::{
    CancellationToken, CaseNormalizer, Correction, Dictionary, DistanceCorrection, FoundWord,
    InputParser, MatchQuality, Normalizer, ParseError, Phrase, PunctuationNormalizer,
    WordDictionary, Word,
};

fn lexicon(words: &[&str], phrases: &[&[&str]]) -> WordDictionary {
    WordDictionary::new(
        words.iter().copied().map(Word::new).collect(),
        phrases
            .iter()
            .map(|p| Phrase::from_values(p.iter().copied()))
            .collect(),
    )
}

fn parser(dictionaries: Vec<WordDictionary>) -> InputParser {
    InputParser::new(
        dictionaries
            .into_iter()
            .map(|d| Box::new(d) as Box<dyn Dictionary>)
            .collect(),
    )
}

// ──────────────────────────────────────────────
// Degradation and unknowns
// ──────────────────────────────────────────────

#[test]
fn empty_dictionaries_still_yield_a_solution() {
    let parser = parser(Vec::new());
    let solutions = parser.parse("hello world").unwrap();
    assert!(!solutions.is_empty());
    assert_eq!(
        solutions[0].found_words,
        vec![FoundWord::unknown("hello"), FoundWord::unknown("world")]
    );
}

#[test]
fn unmatched_token_surfaces_as_unknown() {
    let parser = parser(Vec::new());
    let solutions = parser.parse("zzz").unwrap();
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].found_words, vec![FoundWord::unknown("zzz")]);
}

#[test]
fn empty_input_yields_an_empty_solution_list() {
    let parser = parser(vec![lexicon(&["light"], &[])]);
    assert_eq!(parser.parse("").unwrap(), Vec::new());
    assert_eq!(parser.parse("   \t ").unwrap(), Vec::new());
}

// ──────────────────────────────────────────────
// Phrase folding
// ──────────────────────────────────────────────

#[test]
fn registered_phrase_parses_fully() {
    let parser = parser(vec![lexicon(&[], &[&["turn", "on"]])]);
    let solutions = parser.parse("turn on").unwrap();
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].quality, MatchQuality::Fully);
    assert_eq!(
        solutions[0].found_words,
        vec![FoundWord::phrase(Phrase::from_values(["turn", "on"]), 1.0)]
    );
}

#[test]
fn longest_overlapping_phrase_wins() {
    let parser = parser(vec![lexicon(
        &[],
        &[&["turn", "on"], &["turn", "on", "light"]],
    )]);
    let solutions = parser.parse("turn on light").unwrap();
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].quality, MatchQuality::Fully);
    assert_eq!(
        solutions[0].found_words,
        vec![FoundWord::phrase(
            Phrase::from_values(["turn", "on", "light"]),
            1.0
        )]
    );
}

#[test]
fn phrase_prefix_matches_partly() {
    let parser = parser(vec![lexicon(&[], &[&["turn", "on", "light"]])]);
    let solutions = parser.parse("turn on").unwrap();
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].quality, MatchQuality::Partly);
    assert_eq!(
        solutions[0].found_words,
        vec![FoundWord::phrase(
            Phrase::from_values(["turn", "on", "light"]),
            0.5
        )]
    );
}

#[test]
fn fully_ranks_ahead_of_everything_else() {
    // Two dictionaries resolve the same token to different words: a
    // sense-tagged standalone noun (no phrase registered under it) and a
    // phrase constituent. The first suggestion ends standalone (Partly);
    // the second folds the phrase (Fully) and must land in front.
    let tagged = WordDictionary::new(vec![Word::with_sense("turn", "noun")], Vec::new());
    let phrased = lexicon(&[], &[&["turn"]]);
    let parser = parser(vec![tagged, phrased]);

    let solutions = parser.parse("turn").unwrap();
    assert_eq!(solutions.len(), 2);
    assert_eq!(solutions[0].quality, MatchQuality::Fully);
    assert_eq!(solutions[1].quality, MatchQuality::Partly);
}

#[test]
fn surrounding_words_survive_phrase_folding() {
    let parser = parser(vec![lexicon(&["please"], &[&["turn", "on"]])]);
    let solutions = parser.parse("please turn on").unwrap();
    assert_eq!(solutions[0].quality, MatchQuality::Fully);
    assert_eq!(solutions[0].found_words.len(), 2);
    assert!(matches!(
        &solutions[0].found_words[0],
        FoundWord::Match { word, .. } if word.value() == "please"
    ));
    assert!(solutions[0].found_words[1].is_phrase());
}

#[test]
fn unknown_tokens_gather_phrases_but_never_fold() {
    /// Declares a phrase without ever resolving a token, so every input
    /// token stays `Unknown` while the phrase index is populated.
    struct PhrasesOnly;

    impl Dictionary for PhrasesOnly {
        fn lookup_term(&self, _token: &str) -> Vec<FoundWord> {
            Vec::new()
        }

        fn phrases(&self) -> Vec<Phrase> {
            vec![Phrase::from_values(["turn", "on"])]
        }
    }

    let parser = InputParser::new(vec![Box::new(PhrasesOnly) as Box<dyn Dictionary>]);
    let solutions = parser.parse("turn on").unwrap();
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].quality, MatchQuality::Partly);
    assert_eq!(
        solutions[0].found_words,
        vec![FoundWord::unknown("turn"), FoundWord::unknown("on")]
    );
}

#[test]
fn temporary_dictionaries_fold_for_one_call_only() {
    let parser = parser(Vec::new());
    let temporary: Vec<Box<dyn Dictionary>> =
        vec![Box::new(lexicon(&[], &[&["turn", "on"]]))];

    let with_temporary = parser
        .parse_with("turn on", &temporary, &CancellationToken::new())
        .unwrap();
    assert_eq!(with_temporary[0].quality, MatchQuality::Fully);

    // Without the temporary dictionary the tokens are plain unknowns.
    let without = parser.parse("turn on").unwrap();
    assert_eq!(
        without[0].found_words,
        vec![FoundWord::unknown("turn"), FoundWord::unknown("on")]
    );
}

// ──────────────────────────────────────────────
// Normalization
// ──────────────────────────────────────────────

#[test]
fn normalize_collapses_whitespace_idempotently() {
    let parser = parser(Vec::new());
    for input in ["  turn   on ", "turn on", "\tturn\non\t", ""] {
        let once = parser.normalize(input).unwrap();
        let twice = parser.normalize(&once).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn normalizers_run_in_registration_order() {
    let normalizers: Vec<Box<dyn Normalizer>> = vec![
        Box::new(CaseNormalizer),
        Box::new(PunctuationNormalizer),
    ];
    let parser = InputParser::with_providers(
        normalizers,
        vec![Box::new(lexicon(&[], &[&["turn", "on"]])) as Box<dyn Dictionary>],
        Vec::new(),
    );

    assert_eq!(parser.normalize("Turn, ON!").unwrap(), "turn on");
    let solutions = parser.parse("Turn, ON!").unwrap();
    assert_eq!(solutions[0].quality, MatchQuality::Fully);
}

// ──────────────────────────────────────────────
// Corrections
// ──────────────────────────────────────────────

#[test]
fn correction_recovers_misspelled_phrase_words() {
    let dictionary = lexicon(&[], &[&["turn", "on"]]);
    let correction = DistanceCorrection::from_dictionaries(
        [&dictionary],
        DistanceCorrection::DEFAULT_MAX_DISTANCE,
    );
    let parser = InputParser::with_corrections(
        vec![Box::new(dictionary) as Box<dyn Dictionary>],
        vec![Box::new(correction) as Box<dyn Correction>],
    );

    let solutions = parser.parse("trun on").unwrap();
    assert_eq!(solutions[0].quality, MatchQuality::Fully);
    assert!(solutions[0].found_words[0].is_phrase());
}

/// Correction that counts how often it is consulted.
#[derive(Default)]
struct CountingCorrection {
    calls: AtomicUsize,
}

/// Shared handle to a `CountingCorrection` that implements `Correction`.
/// A local newtype is required because the orphan rule forbids
/// implementing the foreign `Correction` trait directly for `Arc<_>`.
#[derive(Clone)]
struct SharedCounting(Arc<CountingCorrection>);

impl Correction for SharedCounting {
    fn lookup_if_known(&self) -> bool {
        false
    }

    fn correct_word(&self, _token: &str) -> Vec<FoundWord> {
        self.0.calls.fetch_add(1, Ordering::SeqCst);
        Vec::new()
    }
}

#[test]
fn fallback_only_corrections_skip_known_tokens() {
    let counting = Arc::new(CountingCorrection::default());
    let parser = InputParser::with_corrections(
        vec![Box::new(lexicon(&["light"], &[])) as Box<dyn Dictionary>],
        vec![Box::new(SharedCounting(counting.clone())) as Box<dyn Correction>],
    );

    parser.parse("light zzz").unwrap();
    // Consulted for "zzz" only; "light" was already known.
    assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
}

// ──────────────────────────────────────────────
// Cancellation
// ──────────────────────────────────────────────

#[test]
fn pre_cancelled_parse_produces_no_result_at_all() {
    let parser = parser(vec![lexicon(&["light"], &[])]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = parser.parse_with("light", &[], &cancel);
    assert!(matches!(result, Err(ParseError::Cancelled { .. })));
}

#[test]
fn cancellation_from_another_thread_aborts_the_call() {
    /// Dictionary that trips a cancellation token on first lookup, as if a
    /// caller on another thread gave up mid-parse.
    struct TrippingDictionary {
        cancel: CancellationToken,
    }

    impl Dictionary for TrippingDictionary {
        fn lookup_term(&self, _token: &str) -> Vec<FoundWord> {
            let cancel = self.cancel.clone();
            thread::spawn(move || cancel.cancel())
                .join()
                .expect("cancel thread");
            Vec::new()
        }

        fn phrases(&self) -> Vec<Phrase> {
            Vec::new()
        }
    }

    let cancel = CancellationToken::new();
    let parser = InputParser::new(vec![Box::new(TrippingDictionary {
        cancel: cancel.clone(),
    }) as Box<dyn Dictionary>]);

    let result = parser.parse_with("one two", &[], &cancel);
    assert!(matches!(result, Err(ParseError::Cancelled { .. })));
}

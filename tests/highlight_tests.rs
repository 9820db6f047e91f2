// Integration tests for the highlight state machine
//
// These tests verify active phrase selection, active word lookup and the
// per-word classification of the active phrase.

use singalong::highlight::{
    active_phrase_index, active_word_time, classify_word, snapshot, WordState,
};
use singalong::lyrics::{align, AlignedLyrics, TimedToken, TimedWord};
use singalong::PlaybackState;

fn twinkle() -> AlignedLyrics {
    let timing = vec![
        TimedToken::new("twinkle", 1.0),
        TimedToken::new("twinkle", 2.0),
        TimedToken::new("little", 3.0),
        TimedToken::new("star", 4.0),
        TimedToken::new("how", 6.0),
        TimedToken::new("i", 6.5),
        TimedToken::new("wonder", 7.0),
    ];
    align(Some("Twinkle, twinkle,\nlittle star,\nHow I wonder"), &timing)
}

fn words(times: &[f64]) -> Vec<TimedWord> {
    times
        .iter()
        .enumerate()
        .map(|(i, &time)| TimedWord {
            text: format!("w{}", i),
            time,
        })
        .collect()
}

fn states(words: &[TimedWord], active_word_time: Option<f64>) -> Vec<WordState> {
    (0..words.len())
        .map(|i| classify_word(words, i, active_word_time))
        .collect()
}

#[test]
fn test_snapshot_before_first_phrase() {
    let lyrics = twinkle();

    let snap = snapshot(&PlaybackState::at(0.5), &lyrics);

    assert_eq!(snap.active_phrase_index, 0, "First phrase is nominally active");
    assert_eq!(snap.active_word_time, None);
}

#[test]
fn test_snapshot_mid_phrase() {
    let lyrics = twinkle();

    let snap = snapshot(&PlaybackState::at(2.5), &lyrics);
    assert_eq!(snap.active_phrase_index, 0);
    assert_eq!(snap.active_word_time, Some(2.0));

    let snap = snapshot(&PlaybackState::at(3.0), &lyrics);
    assert_eq!(snap.active_phrase_index, 1);
    assert_eq!(snap.active_word_time, Some(3.0));
    assert_eq!(
        snap.word_states(&lyrics),
        vec![WordState::Active, WordState::Future]
    );
}

#[test]
fn test_snapshot_after_last_word() {
    let lyrics = twinkle();

    let snap = snapshot(&PlaybackState::at(120.0), &lyrics);

    assert_eq!(snap.active_phrase_index, 2);
    assert_eq!(snap.active_word_time, Some(7.0));
    assert_eq!(
        snap.word_states(&lyrics),
        vec![WordState::Past, WordState::Past, WordState::Active]
    );
}

#[test]
fn test_first_phrase_default_for_negative_time() {
    let lyrics = twinkle();

    for time in [-100.0, -0.001, 0.0, 0.999] {
        assert_eq!(active_phrase_index(lyrics.phrases(), time), 0);
    }
    assert_eq!(active_phrase_index(lyrics.phrases(), f64::NAN), 0);
    assert_eq!(active_word_time(lyrics.timing(), -1.0), None);
}

#[test]
fn test_empty_lyrics_never_panic() {
    let lyrics = AlignedLyrics::default();

    let snap = snapshot(&PlaybackState::at(10.0), &lyrics);

    assert_eq!(snap.active_phrase_index, 0);
    assert_eq!(snap.active_word_time, None);
    assert!(snap.word_states(&lyrics).is_empty());
}

#[test]
fn test_active_phrase_is_monotonic_in_time() {
    let lyrics = twinkle();

    let mut previous = 0;
    for step in -20..200 {
        let time = step as f64 * 0.05;
        let index = active_phrase_index(lyrics.phrases(), time);
        assert!(
            index >= previous,
            "Active phrase went back from {} to {} at {:.2}s",
            previous,
            index,
            time
        );
        previous = index;
    }
    assert_eq!(previous, 2);
}

#[test]
fn test_active_word_time_follows_flat_timing() {
    let lyrics = twinkle();

    assert_eq!(active_word_time(lyrics.timing(), 0.99), None);
    assert_eq!(active_word_time(lyrics.timing(), 1.0), Some(1.0));
    assert_eq!(active_word_time(lyrics.timing(), 5.9), Some(4.0));
    assert_eq!(active_word_time(lyrics.timing(), 6.7), Some(6.5));
}

#[test]
fn test_word_classification_walkthrough() {
    let words = words(&[1.0, 2.0, 3.0]);

    assert_eq!(states(&words, None), vec![WordState::Future; 3]);
    assert_eq!(states(&words, Some(0.5)), vec![WordState::Future; 3]);
    assert_eq!(
        states(&words, Some(1.0)),
        vec![WordState::Active, WordState::Future, WordState::Future]
    );
    assert_eq!(
        states(&words, Some(2.0)),
        vec![WordState::Past, WordState::Active, WordState::Future]
    );
    assert_eq!(
        states(&words, Some(3.5)),
        vec![WordState::Past, WordState::Past, WordState::Active]
    );
}

#[test]
fn test_words_sharing_a_time_only_last_is_active() {
    // Carried-forward words share the time of the last match
    let words = words(&[0.0, 0.0]);

    assert_eq!(
        states(&words, Some(0.0)),
        vec![WordState::Future, WordState::Active]
    );
}

#[test]
fn test_at_most_one_active_word() {
    let lyrics = twinkle();

    for step in 0..100 {
        let time = step as f64 * 0.1;
        let snap = snapshot(&PlaybackState::at(time), &lyrics);
        let states = snap.word_states(&lyrics);

        let phrase = &lyrics.phrases()[snap.active_phrase_index];
        assert_eq!(states.len(), phrase.words.len(), "Every word gets one state");

        let active = states.iter().filter(|&&s| s == WordState::Active).count();
        assert!(active <= 1, "{} active words at {:.1}s", active, time);
    }
}

#[test]
fn test_out_of_range_index_is_future() {
    let words = words(&[1.0]);
    assert_eq!(classify_word(&words, 5, Some(2.0)), WordState::Future);
}

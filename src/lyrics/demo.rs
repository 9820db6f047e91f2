use super::types::TimedToken;

/// Built-in lyric timing used when no backend timing is available
const DEMO_LYRICS: &[(f64, &str)] = &[
    (0.0, "Let's get this party started!"),
    (4.5, "Twinkle, twinkle, little star,"),
    (8.5, "How I wonder what you are!"),
    (12.5, "Up above the world so high,"),
    (16.5, "Like a diamond in the sky."),
    (20.5, "Twinkle, twinkle, little star,"),
    (24.5, "How I wonder what you are!"),
    (28.0, "(Instrumental Break)"),
    (32.5, "When the blazing sun is gone,"),
    (36.5, "When he nothing shines upon,"),
    (40.5, "Then you show your little light,"),
    (44.5, "Twinkle, twinkle, through the night."),
    (48.5, "Thanks for singing!"),
];

/// Demo timing sequence, one line per token
pub fn demo_timing() -> Vec<TimedToken> {
    DEMO_LYRICS
        .iter()
        .map(|&(time, text)| TimedToken::new(text, time))
        .collect()
}

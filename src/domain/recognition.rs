/// A word-level span with start/end timestamps, as returned by the
/// recognition engine. Timestamps are non-decreasing across a clip.
#[derive(Debug, Clone, PartialEq)]
pub struct WordSpan {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

impl WordSpan {
    pub fn new(word: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            word: word.into(),
            start,
            end,
        }
    }
}

/// One engine result: the full transcript plus its ordered word spans.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecognitionOutput {
    pub text: String,
    pub spans: Vec<WordSpan>,
}

impl RecognitionOutput {
    pub fn new(text: String, spans: Vec<WordSpan>) -> Self {
        Self { text, spans }
    }

    /// Clip duration derived from the end timestamp of the last word span.
    ///
    /// Returns 0.0 when the span list is empty or the last span carries an
    /// unusable end timestamp. This never fails.
    pub fn duration_seconds(&self) -> f64 {
        match self.spans.last() {
            Some(span) if span.end.is_finite() && span.end >= 0.0 => span.end,
            _ => 0.0,
        }
    }
}

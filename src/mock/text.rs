use fake::Fake;
use fake::faker::lorem::en::Words;
use rand::Rng;

/// Dimensions of a generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphShape {
    pub paragraphs: usize,
    pub sentences: usize,
    pub words: usize,
    /// Joins paragraphs.
    pub separator: &'static str,
}

/// Shape of every `document_{i}.txt`: 5 paragraphs of 10 sentences of 50 words.
pub const DOCUMENT_SHAPE: ParagraphShape = ParagraphShape {
    paragraphs: 5,
    sentences: 10,
    words: 50,
    separator: " ",
};

/// Generate lorem text with the given shape.
pub fn document_text<R: Rng + ?Sized>(shape: &ParagraphShape, rng: &mut R) -> String {
    (0..shape.paragraphs)
        .map(|_| {
            (0..shape.sentences)
                .map(|_| sentence(shape.words, rng))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(shape.separator)
}

fn sentence<R: Rng + ?Sized>(words: usize, rng: &mut R) -> String {
    let words: Vec<String> = Words(words..words + 1).fake_with_rng(rng);
    let mut sentence = capitalize(&words.join(" "));
    sentence.push('.');
    sentence
}

pub(super) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

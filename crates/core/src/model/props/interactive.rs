use serde::Deserialize;

use serde_json::{Map, Value};

use super::{FromProps, lenient_seq, non_blank};
use crate::model::ids::{CardId, HotspotId, ItemId, OptionId, PairId, QuestionId, ZoneId};
use crate::model::media::ImageSource;

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuizOption {
    pub id: OptionId,
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct QuizQuestion {
    pub id: QuestionId,
    pub question: String,
    #[serde(deserialize_with = "lenient_seq")]
    pub options: Vec<QuizOption>,
    pub explanation: String,
}

impl QuizQuestion {
    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        non_blank(&self.explanation)
    }

    #[must_use]
    pub fn option(&self, id: &OptionId) -> Option<&QuizOption> {
        self.options.iter().find(|o| &o.id == id)
    }

    #[must_use]
    pub fn correct_option(&self) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.is_correct)
    }
}

/// Quiz contract. Either `questions` or the legacy single
/// `question`/`options`/`explanation` triple.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuizProps {
    #[serde(deserialize_with = "lenient_seq")]
    pub questions: Vec<QuizQuestion>,
    pub question: String,
    #[serde(deserialize_with = "lenient_seq")]
    pub options: Vec<QuizOption>,
    pub explanation: String,
    pub show_explanation: bool,
    pub shuffle_options: bool,
    pub points: u32,
}

impl Default for QuizProps {
    fn default() -> Self {
        Self {
            questions: Vec::new(),
            question: String::new(),
            options: Vec::new(),
            explanation: String::new(),
            show_explanation: true,
            shuffle_options: false,
            points: 10,
        }
    }
}

impl QuizProps {
    /// The question list with the legacy single-question form folded in.
    ///
    /// Blank question or option ids are filled from their position so that
    /// per-question state always has a distinct key.
    #[must_use]
    pub fn normalized_questions(&self) -> Vec<QuizQuestion> {
        let questions = if self.questions.is_empty() {
            vec![QuizQuestion {
                id: QuestionId::new("q1"),
                question: self.question.clone(),
                options: self.options.clone(),
                explanation: self.explanation.clone(),
            }]
        } else {
            self.questions.clone()
        };

        questions
            .into_iter()
            .enumerate()
            .map(|(qi, mut q)| {
                if q.id.as_str().trim().is_empty() {
                    q.id = QuestionId::new(format!("q{}", qi + 1));
                }
                for (oi, option) in q.options.iter_mut().enumerate() {
                    if option.id.as_str().trim().is_empty() {
                        option.id = OptionId::new(format!("{}-o{}", q.id, oi + 1));
                    }
                }
                q
            })
            .collect()
    }

    /// Number of gradable questions after normalization.
    #[must_use]
    pub fn question_count(&self) -> usize {
        if self.questions.is_empty() {
            1
        } else {
            self.questions.len()
        }
    }

    /// Question count read straight from a raw props bag: the length of a
    /// non-empty `questions` list, otherwise one legacy question.
    #[must_use]
    pub fn declared_question_count(props: &Map<String, Value>) -> usize {
        props
            .get("questions")
            .and_then(Value::as_array)
            .filter(|questions| !questions.is_empty())
            .map_or(1, Vec::len)
    }
}

impl FromProps for QuizProps {
    const KIND: &'static str = "quiz";
}

//
// ─── FLASHCARDS ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Flashcard {
    pub id: CardId,
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FlashcardsProps {
    pub title: String,
    #[serde(deserialize_with = "lenient_seq")]
    pub cards: Vec<Flashcard>,
}

impl Default for FlashcardsProps {
    fn default() -> Self {
        Self {
            title: "Flashcards".to_string(),
            cards: Vec::new(),
        }
    }
}

impl FromProps for FlashcardsProps {
    const KIND: &'static str = "flashcards";
}

//
// ─── HOTSPOT ───────────────────────────────────────────────────────────────────
//

/// A marker placed on an image at fractional coordinates.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Hotspot {
    pub id: HotspotId,
    x: f64,
    y: f64,
    pub label: String,
    pub content: String,
}

impl Hotspot {
    /// Horizontal position in `[0, 1]`.
    #[must_use]
    pub fn x(&self) -> f64 {
        unit(self.x)
    }

    /// Vertical position in `[0, 1]`.
    #[must_use]
    pub fn y(&self) -> f64 {
        unit(self.y)
    }
}

fn unit(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HotspotProps {
    pub title: String,
    pub image: String,
    #[serde(deserialize_with = "lenient_seq")]
    pub hotspots: Vec<Hotspot>,
}

impl Default for HotspotProps {
    fn default() -> Self {
        Self {
            title: "Interactive Image".to_string(),
            image: String::new(),
            hotspots: Vec::new(),
        }
    }
}

impl HotspotProps {
    #[must_use]
    pub fn image_source(&self) -> ImageSource {
        ImageSource::parse(&self.image)
    }

    /// Hotspots with blank ids filled from their position.
    #[must_use]
    pub fn normalized_hotspots(&self) -> Vec<Hotspot> {
        with_positional_ids(&self.hotspots, "hotspot", |h| &mut h.id, HotspotId::new)
    }
}

/// Clones `entries`, giving every entry with a blank id `"{prefix}-{n}"`,
/// where `n` is its 1-based position.
fn with_positional_ids<T: Clone, I>(
    entries: &[T],
    prefix: &str,
    id: impl Fn(&mut T) -> &mut I,
    make: impl Fn(String) -> I,
) -> Vec<T>
where
    I: AsRef<str>,
{
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let mut entry = entry.clone();
            let slot = id(&mut entry);
            if slot.as_ref().trim().is_empty() {
                *slot = make(format!("{prefix}-{}", index + 1));
            }
            entry
        })
        .collect()
}

impl FromProps for HotspotProps {
    const KIND: &'static str = "hotspot";
}

//
// ─── MATCHING PAIRS ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct MatchingPair {
    pub id: PairId,
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MatchingPairsProps {
    pub title: String,
    #[serde(deserialize_with = "lenient_seq")]
    pub pairs: Vec<MatchingPair>,
    pub points: Option<u32>,
    pub shuffle: bool,
}

impl Default for MatchingPairsProps {
    fn default() -> Self {
        Self {
            title: "Match the Pairs".to_string(),
            pairs: Vec::new(),
            points: None,
            shuffle: true,
        }
    }
}

impl MatchingPairsProps {
    /// Pairs with blank ids filled from their position.
    #[must_use]
    pub fn normalized_pairs(&self) -> Vec<MatchingPair> {
        with_positional_ids(&self.pairs, "pair", |p| &mut p.id, PairId::new)
    }
}

impl FromProps for MatchingPairsProps {
    const KIND: &'static str = "matchingPairs";
}

//
// ─── DRAG AND DROP ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DragItem {
    pub id: ItemId,
    pub text: String,
    /// The zone this item belongs in.
    pub zone_id: ZoneId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct DropZone {
    pub id: ZoneId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DragDropProps {
    pub title: String,
    #[serde(deserialize_with = "lenient_seq")]
    pub items: Vec<DragItem>,
    #[serde(deserialize_with = "lenient_seq")]
    pub zones: Vec<DropZone>,
    pub points: Option<u32>,
}

impl Default for DragDropProps {
    fn default() -> Self {
        Self {
            title: "Drag and Drop".to_string(),
            items: Vec::new(),
            zones: Vec::new(),
            points: None,
        }
    }
}

impl DragDropProps {
    /// Items with blank ids filled from their position.
    #[must_use]
    pub fn normalized_items(&self) -> Vec<DragItem> {
        with_positional_ids(&self.items, "item", |i| &mut i.id, ItemId::new)
    }

    /// Zones with blank ids filled from their position.
    #[must_use]
    pub fn normalized_zones(&self) -> Vec<DropZone> {
        with_positional_ids(&self.zones, "zone", |z| &mut z.id, ZoneId::new)
    }
}

impl FromProps for DragDropProps {
    const KIND: &'static str = "dragDrop";
}

//
// ─── FILL IN THE BLANK ─────────────────────────────────────────────────────────
//

/// Marker for a blank inside `FillInTheBlankProps::text`.
pub const BLANK_MARKER: &str = "___";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FillInTheBlankProps {
    pub title: String,
    pub text: String,
    #[serde(deserialize_with = "lenient_seq")]
    pub answers: Vec<String>,
    pub case_sensitive: bool,
    pub points: Option<u32>,
}

impl Default for FillInTheBlankProps {
    fn default() -> Self {
        Self {
            title: "Fill in the Blank".to_string(),
            text: String::new(),
            answers: Vec::new(),
            case_sensitive: false,
            points: None,
        }
    }
}

impl FillInTheBlankProps {
    /// Text split around each blank marker; `segments().len() - 1` blanks.
    #[must_use]
    pub fn segments(&self) -> Vec<&str> {
        self.text.split(BLANK_MARKER).collect()
    }

    #[must_use]
    pub fn blank_count(&self) -> usize {
        self.text.matches(BLANK_MARKER).count()
    }
}

impl FromProps for FillInTheBlankProps {
    const KIND: &'static str = "fillInTheBlank";
}

//
// ─── CODE EDITOR ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodeEditorProps {
    pub title: String,
    pub language: String,
    pub starter_code: String,
    pub solution: String,
    pub points: Option<u32>,
}

impl Default for CodeEditorProps {
    fn default() -> Self {
        Self {
            title: "Code Editor".to_string(),
            language: "javascript".to_string(),
            starter_code: String::new(),
            solution: String::new(),
            points: None,
        }
    }
}

impl FromProps for CodeEditorProps {
    const KIND: &'static str = "codeEditor";
}

//! Plain-text rendering of session snapshots.

use std::fmt::Write;

use lesson_core::model::LessonInfo;
use services::behaviors::{
    AnswerMark, CodeEditorView, DragDropView, FillBlankView, FlashcardsView, HotspotView,
    MatchingView, QuizView, ScoreBoardView,
};
use services::{ComponentView, SlideSummary, SlideView};

const RULE: &str = "────────────────────────────────────────";

pub fn slide(view: &SlideView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "{}    {}    {:.0}%",
        view.counter_label(),
        view.score.label(),
        view.progress * 100.0
    );
    if !view.title.is_empty() {
        let _ = writeln!(out, "# {}", view.title);
    }
    let _ = writeln!(out, "{RULE}");

    for component in &view.components {
        let _ = writeln!(out, "[{}]", component.id);
        component_view(&mut out, &component.view);
        out.push('\n');
    }

    let prev = if view.has_previous { "prev" } else { "    " };
    let next = if view.has_next { "next" } else { "    " };
    let _ = write!(out, "{prev}  |  {next}");
    out
}

fn component_view(out: &mut String, view: &ComponentView) {
    match view {
        ComponentView::Paragraph(p) => {
            let _ = writeln!(out, "{}", p.content);
        }
        ComponentView::Heading(h) => {
            let _ = writeln!(out, "{} {}", "#".repeat(usize::from(h.level)), h.content);
        }
        ComponentView::List(list) => {
            for (i, item) in list.items.iter().enumerate() {
                if list.ordered {
                    let _ = writeln!(out, "  {}. {item}", i + 1);
                } else {
                    let _ = writeln!(out, "  • {item}");
                }
            }
        }
        ComponentView::Image(img) => {
            let alt = if img.alt.is_empty() { "image" } else { img.alt.as_str() };
            let _ = writeln!(out, "[{alt}] {} ({})", img.src, img.width);
            if let Some(caption) = &img.caption {
                let _ = writeln!(out, "  {caption}");
            }
        }
        ComponentView::Quiz(q) => quiz(out, q),
        ComponentView::Matching(m) => matching(out, m),
        ComponentView::DragDrop(d) => drag_drop(out, d),
        ComponentView::Flashcards(f) => flashcards(out, f),
        ComponentView::Hotspot(h) => hotspot(out, h),
        ComponentView::FillBlank(f) => fill_blank(out, f),
        ComponentView::CodeEditor(c) => code_editor(out, c),
        ComponentView::ScoreBoard(s) => score_board(out, s),
        ComponentView::Fallback(f) => {
            let _ = writeln!(out, "{}\n  {}", f.title, f.message);
        }
    }
}

fn quiz(out: &mut String, view: &QuizView) {
    let _ = writeln!(out, "{}    {}", view.counter_label, view.score_label);
    let _ = writeln!(out, "{}", view.question);
    for option in &view.options {
        let marker = match option.mark {
            Some(AnswerMark::Correct) => "✓",
            Some(AnswerMark::Incorrect) => "✗",
            None if option.selected => "•",
            None => " ",
        };
        let _ = writeln!(out, "  {marker} {}) {}", option.id, option.text);
    }
    if let Some(explanation) = &view.explanation {
        let _ = writeln!(out, "  Explanation: {explanation}");
    }
}

fn matching(out: &mut String, view: &MatchingView) {
    let _ = writeln!(out, "{}    {}", view.title, view.progress_label);
    let rows = view.left.len().max(view.right.len());
    for i in 0..rows {
        let cell = |entry: Option<&services::behaviors::MatchingEntry>| {
            entry.map_or_else(String::new, |e| {
                let tick = if e.matched { "✓" } else if e.selected { "•" } else { " " };
                format!("{tick} {}) {}", e.id, e.text)
            })
        };
        let _ = writeln!(out, "  {:<32} {}", cell(view.left.get(i)), cell(view.right.get(i)));
    }
    if view.last_miss {
        let _ = writeln!(out, "  Not a match, try again.");
    }
}

fn drag_drop(out: &mut String, view: &DragDropView) {
    let _ = writeln!(out, "{}", view.title);
    let pool: Vec<String> = view.pool.iter().map(|i| format!("{}) {}", i.id, i.text)).collect();
    let _ = writeln!(out, "  Items: {}", pool.join(", "));
    for zone in &view.zones {
        let items: Vec<String> = zone
            .items
            .iter()
            .map(|i| match i.correct {
                Some(true) => format!("{} ✓", i.text),
                Some(false) => format!("{} ✗", i.text),
                None => i.text.clone(),
            })
            .collect();
        let _ = writeln!(out, "  {} ({}): {}", zone.label, zone.id, items.join(", "));
    }
    match view.result {
        Some(true) => {
            let _ = writeln!(out, "  All items are in the right place.");
        }
        Some(false) => {
            let _ = writeln!(out, "  Some items are misplaced.");
        }
        None => {}
    }
}

fn flashcards(out: &mut String, view: &FlashcardsView) {
    match view {
        FlashcardsView::Empty { title, message } => {
            let _ = writeln!(out, "{title}\n  {message}");
        }
        FlashcardsView::Card {
            title,
            text,
            flipped,
            counter_label,
            ..
        } => {
            let side = if *flipped { "back" } else { "front" };
            let _ = writeln!(out, "{title}    {counter_label}");
            let _ = writeln!(out, "  ({side}) {text}");
        }
    }
}

fn hotspot(out: &mut String, view: &HotspotView) {
    let _ = writeln!(out, "{}    {}", view.title, view.progress_label);
    let _ = writeln!(out, "  image: {}", view.image_src);
    for marker in &view.markers {
        let seen = if marker.discovered { "✓" } else { " " };
        let _ = writeln!(
            out,
            "  {seen} {}. {} ({}) at {:.0}%, {:.0}%",
            marker.number,
            marker.label,
            marker.id,
            marker.x * 100.0,
            marker.y * 100.0
        );
    }
    if let Some((label, content)) = &view.active {
        let _ = writeln!(out, "  > {label}: {content}");
    }
}

fn fill_blank(out: &mut String, view: &FillBlankView) {
    let _ = writeln!(out, "{}", view.title);
    let mut text = String::new();
    for (i, segment) in view.segments.iter().enumerate() {
        text.push_str(segment);
        if let Some(blank) = view.blanks.get(i) {
            let value = if blank.value.is_empty() {
                "___"
            } else {
                blank.value.as_str()
            };
            let _ = write!(text, "[{}:{value}]", i + 1);
        }
    }
    let _ = writeln!(out, "  {text}");
    for (i, blank) in view.blanks.iter().enumerate() {
        if let Some(expected) = &blank.expected {
            let _ = writeln!(out, "  {}: expected {expected}", i + 1);
        }
    }
}

fn code_editor(out: &mut String, view: &CodeEditorView) {
    let _ = writeln!(out, "{} ({})", view.title, view.language);
    for line in view.code.lines() {
        let _ = writeln!(out, "  | {line}");
    }
    match view.result {
        Some(true) => {
            let _ = writeln!(out, "  Correct!");
        }
        Some(false) => {
            let _ = writeln!(out, "  Not quite.");
        }
        None => {}
    }
    if let Some(solution) = &view.solution {
        let _ = writeln!(out, "  Solution:");
        for line in solution.lines() {
            let _ = writeln!(out, "  | {line}");
        }
    }
}

fn score_board(out: &mut String, view: &ScoreBoardView) {
    let _ = write!(out, "{}: {}", view.title, view.displayed);
    if let Some(total) = view.total {
        let _ = write!(out, " / {total}");
    }
    if let Some(pct) = view.percentage {
        let _ = write!(out, " ({pct}%)");
    }
    out.push('\n');
}

pub fn overview(slides: &[SlideSummary]) -> String {
    let mut out = String::new();
    for s in slides {
        let marker = if s.is_current { ">" } else { " " };
        let title = if s.title.is_empty() { s.id.as_str() } else { s.title.as_str() };
        let _ = writeln!(out, "{marker} {:>2}. {title}", s.index + 1);
    }
    out
}

pub fn info(info: &LessonInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", info.title);
    if !info.description.is_empty() {
        let _ = writeln!(out, "  {}", info.description);
    }
    if !info.author.is_empty() {
        let _ = writeln!(out, "  Author: {}", info.author);
    }
    if !info.level.is_empty() {
        let _ = writeln!(out, "  Level: {}", info.level);
    }
    if info.duration_minutes > 0 {
        let _ = writeln!(out, "  Duration: {} min", info.duration_minutes);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::LessonSession;

    #[test]
    fn renders_counter_score_and_fallback() {
        let mut session = LessonSession::new().with_seed(0);
        session
            .import_text(
                r#"{
                    "id": "l",
                    "slides": [
                        {
                            "id": "s1",
                            "title": "Start",
                            "components": [
                                { "id": "t", "type": "heading", "props": { "content": "Hello", "level": 1 } },
                                { "id": "x", "type": "mystery" }
                            ]
                        },
                        { "id": "s2", "components": [] }
                    ]
                }"#,
            )
            .unwrap();

        let text = slide(&session.slide_view().unwrap());
        assert!(text.contains("Slide 1 of 2"));
        assert!(text.contains("Score: 0 / 0"));
        assert!(text.contains("# Hello"));
        assert!(text.contains("mystery Component"));
        assert!(text.contains("not available in the viewer"));

        let list = overview(&session.overview());
        assert!(list.starts_with(">  1. Start"));
        assert!(list.contains("2. s2"));
    }
}

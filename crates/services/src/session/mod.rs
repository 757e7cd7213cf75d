//! The lesson runtime: one loaded lesson, its navigation, its score and
//! the components mounted for the current slide.

mod view;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use lesson_core::model::{ComponentId, Lesson, LessonInfo};
use lesson_core::score::percentage;
use lesson_core::{Clock, NavOutcome, Navigator, ScoreAggregator, ScoreContext};

use crate::behaviors::{ComponentIntent, IntentOutcome, MountedComponent};
use crate::error::{ImportError, SessionError};
use crate::import::{LessonSource, read_lesson};
use crate::registry::ComponentRegistry;

pub use view::{ComponentSnapshot, ImportReport, ScoreSummary, SlideSummary, SlideView};

//
// ─── LOADED LESSON ─────────────────────────────────────────────────────────────
//

#[derive(Debug)]
struct LoadedLesson {
    lesson: Lesson,
    nav: Navigator,
    score: ScoreAggregator,
    mounted: Vec<MountedComponent>,
    loaded_at: DateTime<Utc>,
}

fn mount_slide(
    registry: &ComponentRegistry,
    lesson: &Lesson,
    index: usize,
    score: &ScoreAggregator,
    rng: &mut StdRng,
) -> Vec<MountedComponent> {
    let Some(slide) = lesson.slide(index) else {
        return Vec::new();
    };
    slide
        .components
        .iter()
        .map(|component| {
            let kind = registry.resolve(&component.kind);
            MountedComponent::mount(kind, component, score, &mut *rng)
        })
        .collect()
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// A single learner's run through a lesson.
///
/// Holds at most one lesson. Installing a new one replaces the old lesson,
/// navigation and score wholesale; a failed import changes nothing.
#[derive(Debug)]
pub struct LessonSession {
    id: Uuid,
    registry: ComponentRegistry,
    clock: Clock,
    rng: StdRng,
    loaded: Option<LoadedLesson>,
}

impl Default for LessonSession {
    fn default() -> Self {
        Self::new()
    }
}

impl LessonSession {
    /// Empty session with the built-in registry and an OS-seeded RNG.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            registry: ComponentRegistry::new(),
            clock: Clock::default(),
            rng: StdRng::from_rng(&mut rand::rng()),
            loaded: None,
        }
    }

    /// Use a fixed seed so shuffles are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_registry(mut self, registry: ComponentRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    #[must_use]
    pub fn lesson(&self) -> Option<&Lesson> {
        self.loaded.as_ref().map(|l| &l.lesson)
    }

    #[must_use]
    pub fn info(&self) -> Option<LessonInfo> {
        self.lesson().map(Lesson::info)
    }

    #[must_use]
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded.as_ref().map(|l| l.loaded_at)
    }

    //
    // ─── LOADING ───────────────────────────────────────────────────────────────
    //

    /// Replace whatever is loaded with `lesson`, starting at the first slide
    /// with a zero score.
    pub fn install(&mut self, lesson: Lesson) -> ImportReport {
        let obtainable = self.registry.obtainable_points(&lesson);
        let score = ScoreAggregator::new(obtainable);
        let nav = Navigator::new(lesson.slide_count());
        let mounted = mount_slide(&self.registry, &lesson, 0, &score, &mut self.rng);
        let loaded_at = self.clock.now();

        let report = ImportReport {
            lesson_id: lesson.id().clone(),
            title: lesson.title().to_string(),
            slide_count: lesson.slide_count(),
            obtainable,
            loaded_at,
        };
        tracing::info!(
            session = %self.id,
            lesson = %report.lesson_id,
            slides = report.slide_count,
            obtainable,
            "lesson installed"
        );

        self.loaded = Some(LoadedLesson {
            lesson,
            nav,
            score,
            mounted,
            loaded_at,
        });
        report
    }

    /// Parse `text` and install it.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::InvalidLessonFormat` and leaves the session
    /// untouched if the text is not a usable lesson.
    pub fn import_text(&mut self, text: &str) -> Result<ImportReport, ImportError> {
        let lesson = Lesson::from_json_str(text).map_err(|err| {
            tracing::warn!(session = %self.id, error = %err, "lesson rejected");
            ImportError::InvalidLessonFormat(err)
        })?;
        Ok(self.install(lesson))
    }

    /// Read a lesson from `source` and install it once it validates.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::FileRead` or `ImportError::InvalidLessonFormat`;
    /// the session is untouched in both cases.
    pub async fn import_from(
        &mut self,
        source: &dyn LessonSource,
    ) -> Result<ImportReport, ImportError> {
        let lesson = read_lesson(source).await?;
        Ok(self.install(lesson))
    }

    /// Return to start: drop the lesson, navigation and score.
    pub fn reset(&mut self) {
        if self.loaded.take().is_some() {
            tracing::info!(session = %self.id, "session reset");
        }
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.loaded
            .as_ref()
            .filter(|l| !l.nav.is_empty())
            .map(|l| l.nav.current())
    }

    pub fn advance(&mut self) -> NavOutcome {
        self.navigate(Navigator::advance)
    }

    pub fn retreat(&mut self) -> NavOutcome {
        self.navigate(Navigator::retreat)
    }

    pub fn jump_to(&mut self, index: usize) -> NavOutcome {
        self.navigate(|nav| nav.jump_to(index))
    }

    /// `(current + 1) / len`; `None` without a usable lesson.
    #[must_use]
    pub fn progress_fraction(&self) -> Option<f64> {
        self.loaded.as_ref().and_then(|l| l.nav.progress_fraction())
    }

    fn navigate(&mut self, step: impl FnOnce(&mut Navigator) -> NavOutcome) -> NavOutcome {
        let Some(loaded) = self.loaded.as_mut() else {
            return NavOutcome::Unchanged;
        };
        let outcome = step(&mut loaded.nav);
        if let NavOutcome::Moved { to, .. } = outcome {
            loaded.mounted = mount_slide(
                &self.registry,
                &loaded.lesson,
                to,
                &loaded.score,
                &mut self.rng,
            );
        }
        outcome
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn score(&self) -> ScoreSummary {
        let Some(loaded) = self.loaded.as_ref() else {
            return ScoreSummary::default();
        };
        ScoreSummary {
            earned: loaded.score.current_earned(),
            obtainable: loaded.score.obtainable_total(),
            percentage: percentage(
                loaded.score.current_earned(),
                loaded.score.obtainable_total(),
            ),
        }
    }

    /// Every slide with its position, for the slide picker.
    #[must_use]
    pub fn overview(&self) -> Vec<SlideSummary> {
        let Some(loaded) = self.loaded.as_ref() else {
            return Vec::new();
        };
        loaded
            .lesson
            .slides()
            .iter()
            .enumerate()
            .map(|(index, slide)| SlideSummary {
                index,
                id: slide.id.clone(),
                title: slide.title.clone(),
                is_current: index == loaded.nav.current(),
            })
            .collect()
    }

    /// Snapshot of the current slide, or `None` without a usable lesson.
    #[must_use]
    pub fn slide_view(&self) -> Option<SlideView> {
        let loaded = self.loaded.as_ref()?;
        let index = loaded.nav.current();
        let slide = loaded.lesson.slide(index)?;

        Some(SlideView {
            index,
            count: loaded.nav.len(),
            title: slide.title.clone(),
            components: loaded
                .mounted
                .iter()
                .map(|m| ComponentSnapshot {
                    id: m.id().clone(),
                    kind: m.kind(),
                    view: m.view(&loaded.score),
                })
                .collect(),
            has_previous: !loaded.nav.is_first(),
            has_next: !loaded.nav.is_last(),
            progress: loaded.nav.progress_fraction().unwrap_or(0.0),
            score: self.score(),
        })
    }

    /// Mounted instance on the current slide.
    #[must_use]
    pub fn instance(&self, id: &ComponentId) -> Option<&MountedComponent> {
        self.loaded
            .as_ref()
            .and_then(|l| l.mounted.iter().find(|m| m.id() == id))
    }

    //
    // ─── INTERACTION ───────────────────────────────────────────────────────────
    //

    /// Hand an intent to a component on the current slide.
    ///
    /// # Errors
    ///
    /// - `SessionError::NoLesson` if nothing is loaded.
    /// - `SessionError::UnknownComponent` if `id` is not on the current slide.
    /// - `SessionError::Intent` if the component does not accept the intent.
    pub fn interact(
        &mut self,
        id: &ComponentId,
        intent: ComponentIntent,
    ) -> Result<IntentOutcome, SessionError> {
        let loaded = self.loaded.as_mut().ok_or(SessionError::NoLesson)?;
        let LoadedLesson { mounted, score, .. } = loaded;
        let component = mounted
            .iter_mut()
            .find(|m| m.id() == id)
            .ok_or_else(|| SessionError::UnknownComponent(id.clone()))?;
        Ok(component.handle(intent, score)?)
    }
}

//! Entrance animations.
//!
//! Animations are a pure function of the time elapsed since the current slide became visible, so
//! redrawing a slide at a given instant always yields the same frame.

use crate::deck::{SlideBody, SlideRecord};
use std::time::Duration;

const BULLET_FADE: Duration = Duration::from_millis(500);
const BULLET_STAGGER: Duration = Duration::from_millis(100);
const MAX_STAGGERED_BULLETS: u32 = 5;
const CHART_DRAW_IN: Duration = Duration::from_millis(1500);

/// The time elapsed since the slide became visible.
///
/// A disabled clock means every animation is already finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum AnimationClock {
    #[default]
    Disabled,
    Elapsed(Duration),
}

impl AnimationClock {
    /// How far along, in `[0, 1]`, an animation starting after `delay` and lasting `duration` is.
    fn progress(&self, delay: Duration, duration: Duration) -> f64 {
        match self {
            Self::Disabled => 1.0,
            Self::Elapsed(elapsed) => {
                let running = elapsed.saturating_sub(delay);
                (running.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
            }
        }
    }

    /// The opacity of the bullet at the given index.
    pub(crate) fn bullet_opacity(&self, index: usize) -> f64 {
        ease_out(self.progress(bullet_delay(index), BULLET_FADE))
    }

    /// The fraction of the chart line that's visible.
    pub(crate) fn chart_progress(&self) -> f64 {
        self.progress(Duration::ZERO, CHART_DRAW_IN)
    }

    /// Checks whether every animation in the slide is done.
    pub(crate) fn is_settled(&self, slide: &SlideRecord) -> bool {
        match self {
            Self::Disabled => true,
            Self::Elapsed(elapsed) => *elapsed >= settle_time(slide),
        }
    }
}

/// The delay before the bullet at the given index starts fading in.
///
/// Only the first bullets get distinct delays, every one after them shares the last delay.
pub(crate) fn bullet_delay(index: usize) -> Duration {
    let slot = (index as u32).saturating_add(1).min(MAX_STAGGERED_BULLETS);
    BULLET_STAGGER * slot
}

fn settle_time(slide: &SlideRecord) -> Duration {
    match &slide.body {
        SlideBody::ContentList { items } if !items.is_empty() => bullet_delay(items.len() - 1) + BULLET_FADE,
        SlideBody::Chart { .. } => CHART_DRAW_IN,
        _ => Duration::ZERO,
    }
}

fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(2)
}

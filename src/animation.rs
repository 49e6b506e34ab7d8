use std::collections::HashMap;

use crate::constants::ANIMATION_DURATION;

/// Identifies one animated element: (slide position, animated element index).
type ElementKey = (usize, usize);

#[derive(Debug, PartialEq, Clone, Copy)]
enum ElementAnimation {
    Reset,
    Running { started_at: f32 },
}

struct Scheduled {
    key: ElementKey,
    fire_at: f32,
}

/// Clock-driven slide-in animations.
///
/// Starts are fire-and-forget: once scheduled they fire even if the slide
/// stops being current or the element is reset again in the meantime.
#[derive(Default)]
pub struct Animator {
    clock: f32,
    elements: HashMap<ElementKey, ElementAnimation>,
    scheduled: Vec<Scheduled>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops whatever the element was doing; it waits hidden for its next start.
    pub fn reset(&mut self, slide: usize, element: usize) {
        self.elements.insert((slide, element), ElementAnimation::Reset);
    }

    pub fn schedule(&mut self, slide: usize, element: usize, delay: f32) {
        self.scheduled.push(Scheduled {
            key: (slide, element),
            fire_at: self.clock + delay,
        });
    }

    pub fn update(&mut self, dt: f32) {
        self.clock += dt;
        let clock = self.clock;
        let elements = &mut self.elements;
        self.scheduled.retain(|s| {
            if s.fire_at > clock {
                return true;
            }
            elements.insert(s.key, ElementAnimation::Running { started_at: s.fire_at });
            false
        });
    }

    /// Animation progress in `[0, 1]`, or `None` for an element that was
    /// never animated and is simply shown.
    pub fn progress(&self, slide: usize, element: usize) -> Option<f32> {
        match self.elements.get(&(slide, element))? {
            ElementAnimation::Reset => Some(0.0),
            ElementAnimation::Running { started_at } => {
                Some(((self.clock - started_at) / ANIMATION_DURATION).clamp(0.0, 1.0))
            }
        }
    }

    pub fn pending(&self) -> usize {
        self.scheduled.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_elements_have_no_progress() {
        let animator = Animator::new();
        assert_eq!(animator.progress(0, 0), None);
    }

    #[test]
    fn reset_element_waits_for_its_delay() {
        let mut animator = Animator::new();
        animator.reset(0, 1);
        animator.schedule(0, 1, 0.2);
        animator.update(0.1);
        assert_eq!(animator.progress(0, 1), Some(0.0));
        animator.update(0.1);
        animator.update(0.3);
        assert!((animator.progress(0, 1).unwrap() - 0.5).abs() < 1e-3);
        animator.update(1.0);
        assert_eq!(animator.progress(0, 1), Some(1.0));
    }

    #[test]
    fn scheduled_starts_are_not_cancelled() {
        let mut animator = Animator::new();
        animator.reset(2, 0);
        animator.schedule(2, 0, 0.5);
        // the slide is left and revisited before the first start fires
        animator.reset(2, 0);
        animator.schedule(2, 0, 0.5);
        assert_eq!(animator.pending(), 2);
        animator.update(0.6);
        assert_eq!(animator.pending(), 0);
        assert!(animator.progress(2, 0).unwrap() > 0.0);
    }
}

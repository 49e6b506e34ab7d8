use raylib::prelude::Vector2;

use crate::constants::SWIPE_THRESHOLD;
use crate::deck::Deck;
use crate::input::{Key, Pointer};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NavEvent {
    Next,
    Previous,
    GoTo(usize),
    First,
    Last,
}

/// The on-screen previous/next buttons.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Control {
    Previous,
    Next,
}

impl Control {
    pub fn event(self) -> NavEvent {
        match self {
            Control::Previous => NavEvent::Previous,
            Control::Next => NavEvent::Next,
        }
    }
}

/// Key to event table for one deck flavour.
pub struct KeyBindings(&'static [(Key, NavEvent)]);

impl KeyBindings {
    pub const REMOTE: KeyBindings = KeyBindings(&[
        (Key::ArrowLeft, NavEvent::Previous),
        (Key::ArrowUp, NavEvent::Previous),
        (Key::ArrowRight, NavEvent::Next),
        (Key::ArrowDown, NavEvent::Next),
        (Key::Space, NavEvent::Next),
        (Key::Home, NavEvent::First),
        (Key::End, NavEvent::Last),
    ]);

    pub const INLINE: KeyBindings = KeyBindings(&[
        (Key::ArrowLeft, NavEvent::Previous),
        (Key::ArrowRight, NavEvent::Next),
        (Key::Space, NavEvent::Next),
    ]);

    pub fn event_for(&self, key: Key) -> Option<NavEvent> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, event)| *event)
    }
}

/// What a pointer transition amounted to.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PointerOutcome {
    /// A swipe was recognised; carries whether the deck accepted it.
    Navigated(bool),
    /// A press and release without meaningful travel, to be hit-tested.
    Tap(Vector2),
    Ignored,
}

/// Turns input into bounded index transitions. The only writer of a deck's index.
pub struct Navigator {
    bindings: KeyBindings,
    swipes: bool,
    pressed_at: Option<Vector2>,
}

impl Navigator {
    pub fn new(bindings: KeyBindings, swipes: bool) -> Self {
        Self {
            bindings,
            swipes,
            pressed_at: None,
        }
    }

    /// Applies `event`. Returns true when the deck accepted the new index.
    pub fn apply(&self, deck: &mut Deck, event: NavEvent) -> bool {
        let target = match event {
            NavEvent::Next => deck.current().checked_add(1),
            NavEvent::Previous => deck.current().checked_sub(1),
            NavEvent::GoTo(index) => Some(index),
            NavEvent::First => Some(0),
            NavEvent::Last => deck.len().checked_sub(1),
        };
        target.is_some_and(|index| deck.set_current(index))
    }

    pub fn key(&self, deck: &mut Deck, key: Key) -> bool {
        match self.bindings.event_for(key) {
            Some(event) => self.apply(deck, event),
            None => false,
        }
    }

    pub fn control(&self, deck: &mut Deck, control: Control) -> bool {
        self.apply(deck, control.event())
    }

    pub fn pointer(&mut self, deck: &mut Deck, pointer: Pointer) -> PointerOutcome {
        match pointer {
            Pointer::Pressed(at) => {
                self.pressed_at = Some(at);
                PointerOutcome::Ignored
            }
            Pointer::Released(at) => {
                let start = self.pressed_at.take().unwrap_or(at);
                if !self.swipes {
                    return PointerOutcome::Tap(at);
                }
                match classify_gesture(start, at) {
                    Gesture::Swipe(event) => PointerOutcome::Navigated(self.apply(deck, event)),
                    Gesture::Tap => PointerOutcome::Tap(at),
                    Gesture::Scroll => PointerOutcome::Ignored,
                }
            }
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum Gesture {
    Swipe(NavEvent),
    Tap,
    Scroll,
}

/// Horizontal travel past the threshold that beats vertical travel is a swipe:
/// leftward goes forward, rightward goes back.
fn classify_gesture(start: Vector2, end: Vector2) -> Gesture {
    let dx = start.x - end.x;
    let dy = start.y - end.y;
    if dx.abs() > dy.abs() && dx.abs() > SWIPE_THRESHOLD {
        if dx > 0.0 {
            Gesture::Swipe(NavEvent::Next)
        } else {
            Gesture::Swipe(NavEvent::Previous)
        }
    } else if dx.abs() <= SWIPE_THRESHOLD && dy.abs() <= SWIPE_THRESHOLD {
        Gesture::Tap
    } else {
        Gesture::Scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::tests::slides;

    fn deck(len: usize, start: usize) -> Deck {
        Deck::new(slides(len), start).unwrap()
    }

    fn swipe(nav: &mut Navigator, deck: &mut Deck, from: (f32, f32), to: (f32, f32)) -> PointerOutcome {
        nav.pointer(deck, Pointer::Pressed(Vector2::new(from.0, from.1)));
        nav.pointer(deck, Pointer::Released(Vector2::new(to.0, to.1)))
    }

    #[test]
    fn next_and_previous_stop_at_the_ends() {
        let nav = Navigator::new(KeyBindings::REMOTE, true);
        let mut d = deck(3, 2);
        assert!(!nav.apply(&mut d, NavEvent::Next));
        assert_eq!(d.current(), 2);

        let mut d = deck(3, 0);
        assert!(!nav.apply(&mut d, NavEvent::Previous));
        assert_eq!(d.current(), 0);
    }

    #[test]
    fn first_last_and_goto() {
        let nav = Navigator::new(KeyBindings::REMOTE, true);
        let mut d = deck(5, 2);
        assert!(nav.apply(&mut d, NavEvent::Last));
        assert_eq!(d.current(), 4);
        assert!(nav.apply(&mut d, NavEvent::First));
        assert_eq!(d.current(), 0);
        assert!(nav.apply(&mut d, NavEvent::GoTo(3)));
        assert_eq!(d.current(), 3);
        assert!(!nav.apply(&mut d, NavEvent::GoTo(5)));
        assert_eq!(d.current(), 3);
    }

    #[test]
    fn previous_then_next_returns_to_start() {
        let nav = Navigator::new(KeyBindings::REMOTE, true);
        let start = 3;
        let mut d = deck(6, start);
        for _ in 0..start {
            assert!(nav.apply(&mut d, NavEvent::Previous));
        }
        assert_eq!(d.current(), 0);
        for _ in 0..start {
            assert!(nav.apply(&mut d, NavEvent::Next));
        }
        assert_eq!(d.current(), start);
        assert_eq!(d.current_slide().position(), start);
    }

    #[test]
    fn key_bindings_differ_per_deck() {
        assert_eq!(KeyBindings::REMOTE.event_for(Key::ArrowUp), Some(NavEvent::Previous));
        assert_eq!(KeyBindings::REMOTE.event_for(Key::End), Some(NavEvent::Last));
        assert_eq!(KeyBindings::INLINE.event_for(Key::ArrowUp), None);
        assert_eq!(KeyBindings::INLINE.event_for(Key::Space), Some(NavEvent::Next));

        let nav = Navigator::new(KeyBindings::INLINE, false);
        let mut d = deck(4, 1);
        assert!(!nav.key(&mut d, Key::Home));
        assert_eq!(d.current(), 1);
        assert!(nav.key(&mut d, Key::ArrowRight));
        assert_eq!(d.current(), 2);
    }

    #[test]
    fn leftward_swipe_goes_forward() {
        let mut nav = Navigator::new(KeyBindings::REMOTE, true);
        let mut d = deck(3, 0);
        let outcome = swipe(&mut nav, &mut d, (300.0, 200.0), (240.0, 190.0));
        assert_eq!(outcome, PointerOutcome::Navigated(true));
        assert_eq!(d.current(), 1);

        let outcome = swipe(&mut nav, &mut d, (240.0, 200.0), (300.0, 200.0));
        assert_eq!(outcome, PointerOutcome::Navigated(true));
        assert_eq!(d.current(), 0);
    }

    #[test]
    fn vertical_gesture_is_scrolling() {
        let mut nav = Navigator::new(KeyBindings::REMOTE, true);
        let mut d = deck(3, 0);
        let outcome = swipe(&mut nav, &mut d, (300.0, 200.0), (240.0, 120.0));
        assert_eq!(outcome, PointerOutcome::Ignored);
        assert_eq!(d.current(), 0);
    }

    #[test]
    fn short_travel_is_a_tap() {
        let mut nav = Navigator::new(KeyBindings::REMOTE, true);
        let mut d = deck(3, 0);
        let outcome = swipe(&mut nav, &mut d, (300.0, 200.0), (310.0, 205.0));
        assert_eq!(outcome, PointerOutcome::Tap(Vector2::new(310.0, 205.0)));
        assert_eq!(d.current(), 0);
    }

    #[test]
    fn decks_without_swipes_only_tap() {
        let mut nav = Navigator::new(KeyBindings::INLINE, false);
        let mut d = deck(3, 0);
        let outcome = swipe(&mut nav, &mut d, (300.0, 200.0), (100.0, 200.0));
        assert_eq!(outcome, PointerOutcome::Tap(Vector2::new(100.0, 200.0)));
        assert_eq!(d.current(), 0);
    }

    #[test]
    fn travel_of_exactly_the_threshold_is_a_tap() {
        let mut nav = Navigator::new(KeyBindings::REMOTE, true);
        let mut d = deck(3, 0);
        let outcome = swipe(&mut nav, &mut d, (300.0, 200.0), (250.0, 200.0));
        assert_eq!(outcome, PointerOutcome::Tap(Vector2::new(250.0, 200.0)));
        assert_eq!(d.current(), 0);

        let outcome = swipe(&mut nav, &mut d, (300.0, 200.0), (249.0, 200.0));
        assert_eq!(outcome, PointerOutcome::Navigated(true));
        assert_eq!(d.current(), 1);
    }
}

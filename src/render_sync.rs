use crate::constants::STAGGER_DELAY;
use crate::deck::Deck;
use crate::navigation::Control;
use crate::state::DisplayState;

/// How the slide counter is shown.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CounterStyle {
    /// `"<n>/<total>"` in one label.
    Fraction,
    /// `n` in one label, the total in another.
    Split,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Counter {
    pub current: usize, // one-based
    pub total: usize,
    pub style: CounterStyle,
}

impl Counter {
    pub fn current_text(&self) -> String {
        match self.style {
            CounterStyle::Fraction => format!("{}/{}", self.current, self.total),
            CounterStyle::Split => self.current.to_string(),
        }
    }

    pub fn total_text(&self) -> Option<String> {
        match self.style {
            CounterStyle::Fraction => None,
            CounterStyle::Split => Some(self.total.to_string()),
        }
    }
}

/// The observable surface a deck is reflected into.
pub trait DeckView {
    fn show_state(&mut self, position: usize, state: DisplayState);
    fn show_counter(&mut self, counter: Counter);
    fn set_disabled(&mut self, control: Control, disabled: bool);
    fn show_progress(&mut self, fraction: f32);
    fn reset_animation(&mut self, position: usize, element: usize);
    fn schedule_animation(&mut self, position: usize, element: usize, delay: f32);
}

/// Single place where deck state turns into visible state.
pub struct RenderSync {
    counter: CounterStyle,
    entry_animation: bool,
}

impl RenderSync {
    pub fn new(counter: CounterStyle, entry_animation: bool) -> Self {
        Self {
            counter,
            entry_animation,
        }
    }

    /// Pushes the whole deck state into `view`. Safe to call any number of times.
    pub fn reflect(&self, deck: &Deck, view: &mut impl DeckView) {
        for slide in deck.slides() {
            view.show_state(slide.position(), slide.state);
        }
        view.show_counter(Counter {
            current: deck.current() + 1,
            total: deck.len(),
            style: self.counter,
        });
        view.set_disabled(Control::Previous, deck.is_first());
        view.set_disabled(Control::Next, deck.is_last());
        view.show_progress((deck.current() + 1) as f32 / deck.len() as f32);
    }

    /// Reflects the deck and restarts the entry animation of the current slide.
    pub fn index_changed(&self, deck: &Deck, view: &mut impl DeckView) {
        self.reflect(deck, view);
        if !self.entry_animation {
            return;
        }
        let slide = deck.current_slide();
        for element in 0..slide.animated_count() {
            view.reset_animation(slide.position(), element);
        }
        for element in 0..slide.animated_count() {
            view.schedule_animation(slide.position(), element, element as f32 * STAGGER_DELAY);
        }
    }
}

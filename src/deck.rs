use crate::error::DeckError;
use crate::slide::Slide;
use crate::state::DisplayState;

/// Ordered, fixed-length slides plus the index of the one on screen.
pub struct Deck {
    slides: Vec<Slide>,
    current: usize,
}

impl Deck {
    /// Builds a deck showing `start`, clamped into the deck.
    pub fn new(slides: Vec<Slide>, start: usize) -> Result<Self, DeckError> {
        if slides.is_empty() {
            return Err(DeckError::Empty);
        }
        let start = start.min(slides.len() - 1);
        let mut deck = Self { slides, current: start };
        deck.apply(start);
        Ok(deck)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current_slide(&self) -> &Slide {
        &self.slides[self.current]
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current == self.slides.len() - 1
    }

    /// Moves to `index`. Out-of-range requests are ignored and return false.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index >= self.slides.len() {
            return false;
        }
        self.apply(index);
        true
    }

    fn apply(&mut self, index: usize) {
        for slide in self.slides.iter_mut() {
            slide.state = DisplayState::relative_to(slide.position(), index);
        }
        self.current = index;
    }
}

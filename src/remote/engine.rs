use raylib::prelude::*;

use crate::deck::Deck;
use crate::error::DeckError;
use crate::input::InputFrame;
use crate::layout::SlideLayout;
use crate::navigation::{KeyBindings, Navigator, PointerOutcome};
use crate::render_sync::{CounterStyle, RenderSync};
use crate::scene::{SceneView, control_at};
use crate::slide::Slide;

/// Deck whose slides were fetched from locators: swipes, Home/End and
/// staggered entry animations.
pub struct RemoteEngine {
    title: String,
    deck: Deck,
    navigator: Navigator,
    sync: RenderSync,
    view: SceneView,
    layouts: Vec<SlideLayout>,
}

impl RemoteEngine {
    pub fn new(title: String, slides: Vec<Slide>, start: usize) -> Result<Self, DeckError> {
        let deck = Deck::new(slides, start)?;
        let layouts = deck.slides().iter().map(|s| SlideLayout::build(s, &[])).collect();
        let mut engine = Self {
            title,
            view: SceneView::new(deck.len()),
            deck,
            navigator: Navigator::new(KeyBindings::REMOTE, true),
            sync: RenderSync::new(CounterStyle::Split, true),
            layouts,
        };
        engine.sync.index_changed(&engine.deck, &mut engine.view);
        Ok(engine)
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn view(&self) -> &SceneView {
        &self.view
    }
}

impl crate::engine::Engine for RemoteEngine {
    fn handle_input(&mut self, input: &InputFrame) {
        for key in &input.keys {
            if self.navigator.key(&mut self.deck, *key) {
                self.sync.index_changed(&self.deck, &mut self.view);
            }
        }

        for pointer in &input.pointer {
            let accepted = match self.navigator.pointer(&mut self.deck, *pointer) {
                PointerOutcome::Navigated(accepted) => accepted,
                PointerOutcome::Tap(at) => match control_at(at) {
                    Some(control) => self.navigator.control(&mut self.deck, control),
                    None => false,
                },
                PointerOutcome::Ignored => false,
            };
            if accepted {
                self.sync.index_changed(&self.deck, &mut self.view);
            }
        }
    }

    fn update(&mut self, dt: f32) {
        self.view.update(dt);
    }

    fn draw(&self, d: &mut RaylibDrawHandle) {
        self.view.draw(d, &self.layouts, &[], &self.title, true);
    }
}

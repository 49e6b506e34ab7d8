use raylib::prelude::*;

use crate::deck::Deck;
use crate::error::DeckError;
use crate::inline::tabs::{TabSet, discover};
use crate::input::InputFrame;
use crate::layout::SlideLayout;
use crate::navigation::{KeyBindings, Navigator, PointerOutcome};
use crate::render_sync::{CounterStyle, RenderSync};
use crate::scene::{SceneView, control_at};
use crate::slide::Slide;

/// Deck whose slides all live in one page, with tabbed examples.
pub struct InlineEngine {
    title: String,
    deck: Deck,
    navigator: Navigator,
    sync: RenderSync,
    view: SceneView,
    tabs: Vec<Vec<TabSet>>,
    layouts: Vec<SlideLayout>,
}

impl InlineEngine {
    pub fn new(title: String, slides: Vec<Slide>, start: usize) -> Result<Self, DeckError> {
        let deck = Deck::new(slides, start)?;
        let tabs: Vec<Vec<TabSet>> = deck.slides().iter().map(|s| discover(s.root())).collect();
        let layouts = deck
            .slides()
            .iter()
            .zip(&tabs)
            .map(|(slide, sets)| SlideLayout::build(slide, sets))
            .collect();
        let mut engine = Self {
            title,
            view: SceneView::new(deck.len()),
            deck,
            navigator: Navigator::new(KeyBindings::INLINE, false),
            sync: RenderSync::new(CounterStyle::Fraction, false),
            tabs,
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

    /// Tab sets of slide `slide`, or `None` past the end of the deck.
    pub fn tab_sets(&self, slide: usize) -> Option<&[TabSet]> {
        self.tabs.get(slide).map(Vec::as_slice)
    }

    fn tap(&mut self, at: Vector2) -> bool {
        if let Some(control) = control_at(at) {
            return self.navigator.control(&mut self.deck, control);
        }
        let current = self.deck.current();
        if let Some((set, tab)) = self.layouts[current].tab_at(at) {
            if self.tabs[current][set].select(tab) {
                self.layouts[current] = SlideLayout::build(self.deck.current_slide(), &self.tabs[current]);
            }
        }
        false
    }
}

impl crate::engine::Engine for InlineEngine {
    fn handle_input(&mut self, input: &InputFrame) {
        for key in &input.keys {
            if self.navigator.key(&mut self.deck, *key) {
                self.sync.index_changed(&self.deck, &mut self.view);
            }
        }

        for pointer in &input.pointer {
            let accepted = match self.navigator.pointer(&mut self.deck, *pointer) {
                PointerOutcome::Tap(at) => self.tap(at),
                PointerOutcome::Navigated(accepted) => accepted,
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
        let current = self.deck.current();
        self.view.draw(d, &self.layouts, &self.tabs[current], &self.title, false);
    }
}

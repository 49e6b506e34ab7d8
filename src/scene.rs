use raylib::prelude::*;

use crate::animation::Animator;
use crate::constants::*;
use crate::inline::tabs::TabSet;
use crate::layout::{BlockKind, SlideLayout, contains};
use crate::navigation::Control;
use crate::render_sync::{Counter, DeckView};
use crate::state::DisplayState;

const CONTROL_SIZE: f32 = 64.0;

/// Screen area of an on-screen control, in render coordinates.
pub fn control_rect(control: Control) -> Rectangle {
    let y = RENDER_HEIGHT as f32 - FOOTER_HEIGHT + (FOOTER_HEIGHT - CONTROL_SIZE) / 2.0;
    let right = RENDER_WIDTH as f32 - MARGIN;
    match control {
        Control::Previous => Rectangle::new(right - 3.0 * CONTROL_SIZE - 120.0, y, CONTROL_SIZE, CONTROL_SIZE),
        Control::Next => Rectangle::new(right - CONTROL_SIZE, y, CONTROL_SIZE, CONTROL_SIZE),
    }
}

pub fn control_at(point: Vector2) -> Option<Control> {
    [Control::Previous, Control::Next]
        .into_iter()
        .find(|control| contains(&control_rect(*control), point))
}

/// The raylib-side mirror of a deck: whatever render sync last told it.
pub struct SceneView {
    states: Vec<DisplayState>,
    counter: Option<Counter>,
    prev_disabled: bool,
    next_disabled: bool,
    progress: f32,
    animator: Animator,
}

impl SceneView {
    pub fn new(len: usize) -> Self {
        Self {
            states: vec![DisplayState::AfterCurrent; len],
            counter: None,
            prev_disabled: false,
            next_disabled: false,
            progress: 0.0,
            animator: Animator::new(),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.animator.update(dt);
    }

    /// Position of the slide currently shown.
    pub fn current(&self) -> Option<usize> {
        self.states.iter().position(|s| *s == DisplayState::Current)
    }

    pub fn counter(&self) -> Option<Counter> {
        self.counter
    }

    pub fn is_disabled(&self, control: Control) -> bool {
        match control {
            Control::Previous => self.prev_disabled,
            Control::Next => self.next_disabled,
        }
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Draws the current slide's layout plus the footer.
    pub fn draw(
        &self,
        d: &mut RaylibDrawHandle,
        layouts: &[SlideLayout],
        tab_sets: &[TabSet],
        title: &str,
        progress_bar: bool,
    ) {
        d.clear_background(BACKGROUND);

        if let Some(current) = self.current() {
            if let Some(layout) = layouts.get(current) {
                self.draw_layout(d, current, layout, tab_sets);
            }
        }

        if progress_bar {
            d.draw_rectangle(0, 0, RENDER_WIDTH, PROGRESS_HEIGHT, PROGRESS_TRACK);
            let fill = (RENDER_WIDTH as f32 * self.progress) as i32;
            d.draw_rectangle(0, 0, fill, PROGRESS_HEIGHT, ACCENT);
        }

        self.draw_footer(d, title);
    }

    fn draw_layout(&self, d: &mut RaylibDrawHandle, slide: usize, layout: &SlideLayout, tab_sets: &[TabSet]) {
        for block in &layout.blocks {
            let (alpha, offset) = match block.animated.and_then(|i| self.animator.progress(slide, i)) {
                Some(t) => {
                    let eased = ease::cubic_out(t, 0.0, 1.0, 1.0);
                    (eased, ENTRY_OFFSET * (1.0 - eased))
                }
                None => (1.0, 0.0),
            };
            let top = block.top + offset;
            match block.kind {
                BlockKind::Heading => draw_lines(d, &block.lines, top, HEADING_SIZE, faded(ACCENT, alpha)),
                BlockKind::Body => draw_lines(d, &block.lines, top, BODY_SIZE, faded(TEXT, alpha)),
                BlockKind::Code => {
                    d.draw_rectangle(
                        (MARGIN - 16.0) as i32,
                        (top - 12.0) as i32,
                        (RENDER_WIDTH as f32 - 2.0 * MARGIN + 32.0) as i32,
                        (block.height + 24.0) as i32,
                        faded(CODE_BACKGROUND, alpha),
                    );
                    draw_lines(d, &block.lines, top, CODE_SIZE, faded(TEXT, alpha));
                }
                BlockKind::TabBar { set } => {
                    let active = tab_sets.get(set).and_then(TabSet::active_tab);
                    for (i, (rect, label)) in block.tabs.iter().zip(&block.lines).enumerate() {
                        let fill = if active == Some(i) { ACCENT } else { CODE_BACKGROUND };
                        d.draw_rectangle(rect.x as i32, rect.y as i32, rect.width as i32, rect.height as i32, fill);
                        let text_y = rect.y + (rect.height - BODY_SIZE as f32) / 2.0;
                        d.draw_text(label, (rect.x + 20.0) as i32, text_y as i32, BODY_SIZE, TEXT);
                    }
                }
            }
        }
    }

    fn draw_footer(&self, d: &mut RaylibDrawHandle, title: &str) {
        let baseline = RENDER_HEIGHT - (FOOTER_HEIGHT as i32 + BODY_SIZE) / 2;
        d.draw_text(title, MARGIN as i32, baseline, BODY_SIZE, MUTED);

        for (control, label) in [(Control::Previous, "<"), (Control::Next, ">")] {
            let rect = control_rect(control);
            let color = if self.is_disabled(control) { faded(MUTED, 0.3) } else { ACCENT };
            d.draw_rectangle_lines(rect.x as i32, rect.y as i32, rect.width as i32, rect.height as i32, color);
            let text_y = rect.y + (rect.height - HEADING_SIZE as f32) / 2.0;
            d.draw_text(label, (rect.x + 18.0) as i32, text_y as i32, HEADING_SIZE, color);
        }

        if let Some(counter) = self.counter {
            let text = match counter.total_text() {
                Some(total) => format!("{} / {}", counter.current_text(), total),
                None => counter.current_text(),
            };
            let prev = control_rect(Control::Previous);
            d.draw_text(&text, (prev.x + prev.width + 30.0) as i32, baseline, BODY_SIZE, TEXT);
        }
    }
}

impl DeckView for SceneView {
    fn show_state(&mut self, position: usize, state: DisplayState) {
        if let Some(slot) = self.states.get_mut(position) {
            *slot = state;
        }
    }

    fn show_counter(&mut self, counter: Counter) {
        self.counter = Some(counter);
    }

    fn set_disabled(&mut self, control: Control, disabled: bool) {
        match control {
            Control::Previous => self.prev_disabled = disabled,
            Control::Next => self.next_disabled = disabled,
        }
    }

    fn show_progress(&mut self, fraction: f32) {
        self.progress = fraction;
    }

    fn reset_animation(&mut self, position: usize, element: usize) {
        self.animator.reset(position, element);
    }

    fn schedule_animation(&mut self, position: usize, element: usize, delay: f32) {
        self.animator.schedule(position, element, delay);
    }
}

fn draw_lines(d: &mut RaylibDrawHandle, lines: &[String], top: f32, size: i32, color: Color) {
    for (i, line) in lines.iter().enumerate() {
        let y = top + i as f32 * size as f32 * LINE_SPACING;
        d.draw_text(line, MARGIN as i32, y as i32, size, color);
    }
}

fn faded(color: Color, alpha: f32) -> Color {
    Color {
        a: (color.a as f32 * alpha.clamp(0.0, 1.0)) as u8,
        ..color
    }
}

use raylib::prelude::*;

use crate::constants::*;
use crate::fragment::{Element, Node};
use crate::inline::tabs::TabSet;
use crate::slide::Slide;

/// Elements that never produce visible blocks.
const HIDDEN_TAGS: [&str; 7] = ["script", "style", "head", "title", "meta", "nav", "button"];
/// Elements that start their own block when found inside another element.
const BLOCK_TAGS: [&str; 24] = [
    "div", "section", "article", "header", "footer", "main", "aside", "ul", "ol", "li", "p", "pre",
    "h1", "h2", "h3", "h4", "h5", "h6", "table", "tr", "blockquote", "dl", "figure", "details",
];

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum BlockKind {
    Heading,
    Body,
    Code,
    TabBar { set: usize },
}

#[derive(Debug, Clone)]
pub struct Block {
    pub kind: BlockKind,
    pub lines: Vec<String>,
    /// Index of the animated element this block belongs to.
    pub animated: Option<usize>,
    pub top: f32,
    pub height: f32,
    /// Hit areas of the tabs in a tab bar.
    pub tabs: Vec<Rectangle>,
}

/// A slide flattened into vertically stacked text blocks.
#[derive(Debug, Default)]
pub struct SlideLayout {
    pub blocks: Vec<Block>,
}

impl SlideLayout {
    pub fn build(slide: &Slide, tab_sets: &[TabSet]) -> Self {
        let mut builder = Builder {
            slide,
            tab_sets,
            blocks: Vec::new(),
            top: CONTENT_TOP,
        };
        let mut path = Vec::new();
        builder.visit_children(slide.root(), &mut path, slide.animated_index(&[]));
        Self { blocks: builder.blocks }
    }

    /// The (tab set, tab) under `point`, if any.
    pub fn tab_at(&self, point: Vector2) -> Option<(usize, usize)> {
        self.blocks.iter().find_map(|block| match block.kind {
            BlockKind::TabBar { set } => block
                .tabs
                .iter()
                .position(|rect| contains(rect, point))
                .map(|tab| (set, tab)),
            _ => None,
        })
    }
}

pub fn contains(rect: &Rectangle, point: Vector2) -> bool {
    point.x >= rect.x && point.x <= rect.x + rect.width && point.y >= rect.y && point.y <= rect.y + rect.height
}

struct Builder<'a> {
    slide: &'a Slide,
    tab_sets: &'a [TabSet],
    blocks: Vec<Block>,
    top: f32,
}

impl Builder<'_> {
    fn visit_children(&mut self, el: &Element, path: &mut Vec<usize>, animated: Option<usize>) {
        let mut index = 0;
        for node in &el.children {
            match node {
                Node::Element(child) => {
                    path.push(index);
                    self.visit(child, path, animated);
                    path.pop();
                    index += 1;
                }
                Node::Text(text) => {
                    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
                    if !text.is_empty() {
                        self.push_text(BlockKind::Body, &text, animated);
                    }
                }
            }
        }
    }

    fn visit(&mut self, el: &Element, path: &mut Vec<usize>, inherited: Option<usize>) {
        if let Some(set) = self.tab_sets.iter().position(|s| s.path == *path) {
            self.push_tab_bar(set);
            return;
        }
        if HIDDEN_TAGS.contains(&el.tag.as_str()) || self.is_hidden_panel(el) {
            return;
        }

        let animated = self.slide.animated_index(path).or(inherited);
        match el.tag.as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => self.push_text(BlockKind::Heading, &el.text(), animated),
            "pre" => self.push_code(&el.raw_text(), animated),
            _ if has_block_children(el) => self.visit_children(el, path, animated),
            tag => {
                let text = el.text();
                if text.is_empty() {
                    return;
                }
                if tag == "li" {
                    self.push_text(BlockKind::Body, &format!("- {text}"), animated);
                } else {
                    self.push_text(BlockKind::Body, &text, animated);
                }
            }
        }
    }

    fn is_hidden_panel(&self, el: &Element) -> bool {
        if !el.has_class("tab-content") {
            return false;
        }
        !el.id().is_some_and(|id| self.tab_sets.iter().any(|s| s.is_panel_active(id)))
    }

    fn push_text(&mut self, kind: BlockKind, text: &str, animated: Option<usize>) {
        let size = if kind == BlockKind::Heading { HEADING_SIZE } else { BODY_SIZE };
        let lines = wrap(text, chars_per_line(size));
        self.push(kind, lines, size, animated);
    }

    fn push_code(&mut self, text: &str, animated: Option<usize>) {
        let width = chars_per_line(CODE_SIZE);
        let lines: Vec<String> = text
            .trim_matches('\n')
            .lines()
            .flat_map(|line| {
                if line.chars().count() <= width {
                    vec![line.to_string()]
                } else {
                    wrap(line, width)
                }
            })
            .collect();
        self.push(BlockKind::Code, lines, CODE_SIZE, animated);
    }

    fn push_tab_bar(&mut self, set: usize) {
        let height = BODY_SIZE as f32 * 1.8;
        let mut x = MARGIN;
        let tabs = self.tab_sets[set]
            .tabs
            .iter()
            .map(|tab| {
                let width = tab.label.chars().count() as f32 * BODY_SIZE as f32 * GLYPH_WIDTH + 40.0;
                let rect = Rectangle::new(x, self.top, width, height);
                x += width + 8.0;
                rect
            })
            .collect();
        let labels = self.tab_sets[set].tabs.iter().map(|t| t.label.clone()).collect();
        self.blocks.push(Block {
            kind: BlockKind::TabBar { set },
            lines: labels,
            animated: None,
            top: self.top,
            height,
            tabs,
        });
        self.top += height + BLOCK_SPACING;
    }

    fn push(&mut self, kind: BlockKind, lines: Vec<String>, size: i32, animated: Option<usize>) {
        if lines.is_empty() {
            return;
        }
        let height = lines.len() as f32 * size as f32 * LINE_SPACING;
        self.blocks.push(Block {
            kind,
            lines,
            animated,
            top: self.top,
            height,
            tabs: Vec::new(),
        });
        self.top += height + BLOCK_SPACING;
    }
}

fn has_block_children(el: &Element) -> bool {
    el.child_elements().any(|(_, c)| BLOCK_TAGS.contains(&c.tag.as_str()))
}

fn chars_per_line(size: i32) -> usize {
    let width = RENDER_WIDTH as f32 - 2.0 * MARGIN;
    ((width / (size as f32 * GLYPH_WIDTH)) as usize).max(1)
}

/// Greedy word wrap; words longer than a line are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

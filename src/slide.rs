use crate::fragment::{Element, Fragment};
use crate::state::DisplayState;

/// Classes whose elements slide in when their slide becomes current.
const ANIMATED_CLASSES: [&str; 4] = ["principle-card", "solid-letter", "code-bad", "code-good"];
/// List items under an element with this class animate too.
const ANIMATED_LIST_CLASS: &str = "animated-list";

pub struct Slide {
    position: usize,
    pub state: DisplayState,
    fragment: Fragment,
    animated: Vec<Vec<usize>>,
    source: Option<String>,
}

impl Slide {
    pub fn new(position: usize, state: DisplayState, fragment: Fragment) -> Self {
        let animated = animated_paths(&fragment.root);
        Self {
            position,
            state,
            fragment,
            animated,
            source: None,
        }
    }

    /// Records the locator the slide was loaded from.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Zero-based rank in the deck, fixed at load time.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn root(&self) -> &Element {
        &self.fragment.root
    }

    /// Number of elements that take part in the entry animation.
    pub fn animated_count(&self) -> usize {
        self.animated.len()
    }

    /// Index of the animated element at `path` (child indices from the slide root).
    pub fn animated_index(&self, path: &[usize]) -> Option<usize> {
        self.animated.iter().position(|p| p == path)
    }
}

/// Paths of the animated elements in document order, nested matches included.
fn animated_paths(root: &Element) -> Vec<Vec<usize>> {
    let mut paths = Vec::new();
    let mut path = Vec::new();
    collect_animated(root, false, &mut path, &mut paths);
    paths
}

fn collect_animated(el: &Element, in_list: bool, path: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    let list_item = in_list && el.tag == "li";
    if list_item || ANIMATED_CLASSES.iter().any(|c| el.has_class(c)) {
        out.push(path.clone());
    }
    let in_list = in_list || el.has_class(ANIMATED_LIST_CLASS);
    for (i, child) in el.child_elements() {
        path.push(i);
        collect_animated(child, in_list, path, out);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::extract_first;

    fn slide(markup: &str) -> Slide {
        let fragment = extract_first(markup, "section").unwrap().unwrap();
        Slide::new(0, DisplayState::Current, fragment)
    }

    #[test]
    fn finds_animated_elements_in_document_order() {
        let s = slide(
            r#"<section>
                <div class="principle-card">S</div>
                <ul class="animated-list"><li>one</li><li>two</li></ul>
                <ul><li>plain</li></ul>
                <pre class="code-good">ok</pre>
            </section>"#,
        );
        assert_eq!(s.animated_count(), 4);
        assert_eq!(s.animated_index(&[0]), Some(0));
        assert_eq!(s.animated_index(&[1, 0]), Some(1));
        assert_eq!(s.animated_index(&[1, 1]), Some(2));
        assert_eq!(s.animated_index(&[2, 0]), None);
        assert_eq!(s.animated_index(&[3]), Some(3));
    }

    #[test]
    fn slide_without_animated_content_has_none() {
        let s = slide("<section><h1>Title</h1><p>Body</p></section>");
        assert_eq!(s.animated_count(), 0);
    }
}

//! Lenient markup parsing for slide fragments.
//!
//! Slide pages are HTML rather than XML, so the reader runs with end-name
//! checks off, void elements never open a scope, and a stray end tag closes
//! everything up to the nearest matching open element. Bare `&` and `<`
//! that cannot start a reference or a tag are escaped before reading.

use std::borrow::Cow;
use std::ops::Range;

use quick_xml::Reader;
use quick_xml::events::{BytesRef, BytesStart, Event};

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
    /// Byte range of the element in the normalized markup it was parsed from.
    pub span: Range<usize>,
}

/// One extracted element: its original markup and its parsed tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub markup: String,
    pub root: Element,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Element children with their index among element siblings.
    pub fn child_elements(&self) -> impl Iterator<Item = (usize, &Element)> {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Element(el) => Some(el),
                Node::Text(_) => None,
            })
            .enumerate()
    }

    /// Element reached by following `path` of element-child indices.
    pub fn at_path(&self, path: &[usize]) -> Option<&Element> {
        let mut el = self;
        for &index in path {
            el = el.child_elements().nth(index)?.1;
        }
        Some(el)
    }

    /// Descendant text with whitespace runs collapsed.
    pub fn text(&self) -> String {
        self.raw_text().split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Descendant text exactly as written.
    pub fn raw_text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) if el.tag == "br" => out.push('\n'),
                Node::Element(el) => el.push_text(out),
            }
        }
    }

    /// Descendants in document order, `self` included.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        let mut pending = vec![self];
        while let Some(el) = pending.pop() {
            out.push(el);
            let children: Vec<&Element> = el.child_elements().map(|(_, c)| c).collect();
            pending.extend(children.into_iter().rev());
        }
        out
    }

    /// Outermost descendants matching `pred`, in document order.
    fn collect_outermost<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        for (_, child) in self.child_elements() {
            if pred(child) {
                out.push(child);
            } else {
                child.collect_outermost(pred, out);
            }
        }
    }
}

/// Parses a whole page or fragment into a tree rooted at a `#document` element.
/// Spans refer to the normalized markup.
pub fn parse(markup: &str) -> Result<Element, quick_xml::Error> {
    parse_normalized(&normalize(markup))
}

fn parse_normalized(markup: &str) -> Result<Element, quick_xml::Error> {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut stack = vec![Element {
        tag: "#document".to_string(),
        span: 0..markup.len(),
        ..Default::default()
    }];

    loop {
        let offset = reader.buffer_position() as usize;
        match reader.read_event()? {
            Event::Start(ref e) => {
                let mut el = open_element(e, offset);
                if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                    el.span.end = reader.buffer_position() as usize;
                    append(&mut stack, Node::Element(el));
                } else {
                    stack.push(el);
                }
            }
            Event::Empty(ref e) => {
                let mut el = open_element(e, offset);
                el.span.end = reader.buffer_position() as usize;
                append(&mut stack, Node::Element(el));
            }
            Event::End(ref e) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_ascii_lowercase();
                // the document root never matches
                if let Some(depth) = stack.iter().rposition(|el| el.tag == tag).filter(|&d| d > 0) {
                    close_until(&mut stack, depth, reader.buffer_position() as usize);
                }
            }
            Event::Text(ref t) => push_text(&mut stack, &String::from_utf8_lossy(t)),
            Event::CData(ref t) => push_text(&mut stack, &String::from_utf8_lossy(t)),
            Event::GeneralRef(ref r) => {
                if let Some(text) = resolve_reference(r) {
                    push_text(&mut stack, &text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    close_until(&mut stack, 1, markup.len());
    Ok(stack.remove(0))
}

/// First element named `tag`, or `None` if the markup has no such element.
pub fn extract_first(markup: &str, tag: &str) -> Result<Option<Fragment>, quick_xml::Error> {
    let markup = normalize(markup);
    let document = parse_normalized(&markup)?;
    let found = document
        .descendants()
        .into_iter()
        .skip(1)
        .find(|el| el.tag == tag)
        .map(|el| to_fragment(&markup, el));
    Ok(found)
}

/// Every outermost element carrying `class`, in document order.
pub fn extract_by_class(markup: &str, class: &str) -> Result<Vec<Fragment>, quick_xml::Error> {
    let markup = normalize(markup);
    let document = parse_normalized(&markup)?;
    let mut found = Vec::new();
    document.collect_outermost(&|el| el.has_class(class), &mut found);
    Ok(found.into_iter().map(|el| to_fragment(&markup, el)).collect())
}

/// Escapes `&` that does not start a reference and `<` that cannot start a
/// tag, the way an HTML parser reads them as plain text.
fn normalize(markup: &str) -> Cow<'_, str> {
    let bytes = markup.as_bytes();
    let mut out: Option<String> = None;
    let mut copied = 0;
    for (i, &b) in bytes.iter().enumerate() {
        let escaped = match b {
            b'&' if !starts_reference(&bytes[i + 1..]) => "&amp;",
            b'<' if bytes
                .get(i + 1)
                .is_none_or(|n| n.is_ascii_whitespace() || n.is_ascii_digit() || *n == b'=') =>
            {
                "&lt;"
            }
            _ => continue,
        };
        let out = out.get_or_insert_with(|| String::with_capacity(markup.len() + 16));
        out.push_str(&markup[copied..i]);
        out.push_str(escaped);
        copied = i + 1;
    }
    match out {
        Some(mut out) => {
            out.push_str(&markup[copied..]);
            Cow::Owned(out)
        }
        None => Cow::Borrowed(markup),
    }
}

/// Whether `rest` (the bytes after an `&`) is `name;`, `#digits;` or `#xhex;`.
fn starts_reference(rest: &[u8]) -> bool {
    let Some(end) = rest.iter().take(32).position(|&b| b == b';') else {
        return false;
    };
    match &rest[..end] {
        [b'#', b'x' | b'X', hex @ ..] => !hex.is_empty() && hex.iter().all(u8::is_ascii_hexdigit),
        [b'#', digits @ ..] => !digits.is_empty() && digits.iter().all(u8::is_ascii_digit),
        name => !name.is_empty() && name.iter().all(u8::is_ascii_alphanumeric),
    }
}

fn to_fragment(markup: &str, el: &Element) -> Fragment {
    Fragment {
        markup: markup.get(el.span.clone()).unwrap_or_default().to_string(),
        root: el.clone(),
    }
}

fn open_element(e: &BytesStart, offset: usize) -> Element {
    let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_ascii_lowercase();
    let attributes = e
        .html_attributes()
        .flatten()
        .map(|attr| {
            (
                String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase(),
                String::from_utf8_lossy(&attr.value).to_string(),
            )
        })
        .collect();
    Element {
        tag,
        attributes,
        children: Vec::new(),
        span: offset..offset,
    }
}

fn append(stack: &mut [Element], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn push_text(stack: &mut [Element], text: &str) {
    if let Some(parent) = stack.last_mut() {
        // merge with a preceding text node so entities don't split words
        if let Some(Node::Text(prev)) = parent.children.last_mut() {
            prev.push_str(text);
        } else {
            parent.children.push(Node::Text(text.to_string()));
        }
    }
}

fn close_until(stack: &mut Vec<Element>, depth: usize, end: usize) {
    while stack.len() > depth {
        let Some(mut el) = stack.pop() else { break };
        el.span.end = end;
        append(stack, Node::Element(el));
    }
}

fn resolve_reference(r: &BytesRef) -> Option<String> {
    if let Ok(Some(ch)) = r.resolve_char_ref() {
        return Some(ch.to_string());
    }
    let named = match &**r {
        b"lt" => "<",
        b"gt" => ">",
        b"amp" => "&",
        b"quot" => "\"",
        b"apos" => "'",
        b"nbsp" => " ",
        b"copy" => "\u{a9}",
        b"reg" => "\u{ae}",
        b"trade" => "\u{2122}",
        b"mdash" => "\u{2014}",
        b"ndash" => "\u{2013}",
        b"hellip" => "\u{2026}",
        b"rarr" => "\u{2192}",
        b"larr" => "\u{2190}",
        b"laquo" => "\u{ab}",
        b"raquo" => "\u{bb}",
        b"times" => "\u{d7}",
        b"bull" => "\u{2022}",
        // unknown names stay as written
        name => return Some(format!("&{};", String::from_utf8_lossy(name))),
    };
    Some(named.to_string())
}

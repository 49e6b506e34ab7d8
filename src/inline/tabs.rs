use crate::fragment::Element;

const TAB_CLASS: &str = "tab";
const PANEL_CLASS: &str = "tab-content";
const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub id: String,
    pub label: String,
}

impl Tab {
    /// Identifier of the panel this tab shows.
    pub fn panel_id(&self) -> String {
        format!("{}-content", self.id)
    }
}

/// One row of tabs and the panels of its group. Exactly one tab (and at
/// most one panel) is active once something has been selected.
#[derive(Debug, Clone, PartialEq)]
pub struct TabSet {
    /// Element-child path from the slide root to the tab row.
    pub path: Vec<usize>,
    pub tabs: Vec<Tab>,
    panels: Vec<String>,
    active_tab: Option<usize>,
    active_panel: Option<String>,
}

impl TabSet {
    pub fn active_tab(&self) -> Option<usize> {
        self.active_tab
    }

    pub fn is_panel_active(&self, id: &str) -> bool {
        self.active_panel.as_deref() == Some(id)
    }

    /// Activates `tab` and its panel, deactivating the rest of the group.
    pub fn select(&mut self, tab: usize) -> bool {
        let Some(selected) = self.tabs.get(tab) else {
            return false;
        };
        let panel = selected.panel_id();
        self.active_tab = Some(tab);
        self.active_panel = self.panels.iter().find(|p| **p == panel).cloned();
        true
    }
}

/// Finds every tab row under `root`, in document order.
pub fn discover(root: &Element) -> Vec<TabSet> {
    let mut sets = Vec::new();
    let mut path = Vec::new();
    walk(root, &mut path, &mut sets);
    sets
}

fn walk(group: &Element, path: &mut Vec<usize>, sets: &mut Vec<TabSet>) {
    for (i, child) in group.child_elements() {
        path.push(i);
        if is_tab_row(child) {
            sets.push(tab_set(group, child, path.clone()));
        } else {
            walk(child, path, sets);
        }
        path.pop();
    }
}

pub fn is_tab_row(el: &Element) -> bool {
    el.child_elements().any(|(_, c)| c.has_class(TAB_CLASS))
}

fn tab_set(group: &Element, row: &Element, path: Vec<usize>) -> TabSet {
    let tab_elements: Vec<&Element> = row
        .child_elements()
        .map(|(_, c)| c)
        .filter(|c| c.has_class(TAB_CLASS))
        .collect();
    let panel_elements: Vec<&Element> = group
        .descendants()
        .into_iter()
        .skip(1)
        .filter(|el| el.has_class(PANEL_CLASS))
        .collect();

    let tabs = tab_elements
        .iter()
        .map(|el| Tab {
            id: el.attribute("data-tab").unwrap_or_default().to_string(),
            label: el.text(),
        })
        .collect();
    let active_tab = tab_elements.iter().position(|el| el.has_class(ACTIVE_CLASS));
    let active_panel = panel_elements
        .iter()
        .find(|el| el.has_class(ACTIVE_CLASS))
        .and_then(|el| el.id())
        .map(str::to_string);
    let panels = panel_elements
        .iter()
        .filter_map(|el| el.id())
        .map(str::to_string)
        .collect();

    TabSet {
        path,
        tabs,
        panels,
        active_tab,
        active_panel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::parse;

    const SLIDE: &str = r#"<div class="slide">
        <div class="example">
            <div class="tabs">
                <button class="tab active" data-tab="vuln">Vulnerable</button>
                <button class="tab" data-tab="fixed">Fixed</button>
            </div>
            <div class="tab-content active" id="vuln-content">query + input</div>
            <div class="tab-content" id="fixed-content">prepared statement</div>
        </div>
        <div class="example">
            <div class="tabs">
                <button class="tab active" data-tab="bad">Bad</button>
                <button class="tab" data-tab="good">Good</button>
            </div>
            <div class="tab-content active" id="bad-content">md5</div>
            <div class="tab-content" id="good-content">argon2</div>
        </div>
    </div>"#;

    fn sets() -> Vec<TabSet> {
        let doc = parse(SLIDE).unwrap();
        discover(doc.at_path(&[0]).unwrap())
    }

    #[test]
    fn discovers_each_group_with_initial_selection() {
        let sets = sets();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].path, vec![0, 0]);
        assert_eq!(sets[0].tabs[1].label, "Fixed");
        assert_eq!(sets[0].active_tab(), Some(0));
        assert!(sets[0].is_panel_active("vuln-content"));
        assert!(sets[1].is_panel_active("bad-content"));
    }

    #[test]
    fn selecting_a_tab_switches_only_its_group() {
        let mut sets = sets();
        assert!(sets[0].select(1));
        assert_eq!(sets[0].active_tab(), Some(1));
        assert!(sets[0].is_panel_active("fixed-content"));
        assert!(!sets[0].is_panel_active("vuln-content"));
        assert_eq!(sets[1].active_tab(), Some(0));
        assert!(sets[1].is_panel_active("bad-content"));
    }

    #[test]
    fn tab_without_panel_clears_the_group() {
        let doc = parse(
            r#"<div><div class="tabs"><span class="tab active" data-tab="a">A</span>
               <span class="tab" data-tab="b">B</span></div>
               <div class="tab-content active" id="a-content">a</div></div>"#,
        )
        .unwrap();
        let mut sets = discover(&doc);
        assert!(sets[0].select(1));
        assert_eq!(sets[0].active_tab(), Some(1));
        assert!(!sets[0].is_panel_active("a-content"));
        assert!(!sets[0].select(7));
    }
}

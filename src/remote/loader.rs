use std::io;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::LoadError;
use crate::fragment::extract_first;
use crate::slide::Slide;
use crate::state::DisplayState;

/// Element that holds a slide's body inside each fetched page.
const SLIDE_ELEMENT: &str = "section";

/// Retrieves the raw markup behind a locator.
#[async_trait(?Send)]
pub trait Fetch {
    async fn fetch(&self, locator: &str) -> io::Result<String>;
}

/// Resolves locators as paths below a root directory.
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait(?Send)]
impl Fetch for FileFetcher {
    async fn fetch(&self, locator: &str) -> io::Result<String> {
        tokio::fs::read_to_string(self.root.join(locator)).await
    }
}

/// Container that receives slides as soon as they are extracted.
pub trait SlideSink {
    fn append(&mut self, slide: Slide);
}

impl SlideSink for Vec<Slide> {
    fn append(&mut self, slide: Slide) {
        self.push(slide);
    }
}

/// Outcome of one loader run.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    /// Locators whose markup had no slide element.
    pub skipped: Vec<String>,
    /// The failure that stopped loading early, if any.
    pub failure: Option<LoadError>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Loads `locators` one after another, appending each extracted slide to
/// `container` in locator order.
///
/// A locator without a slide element is skipped. A fetch or markup failure
/// stops the run; slides appended before it stay in `container` and the
/// failure is returned in the report.
pub async fn load_slides<F, S>(locators: &[String], fetcher: &F, container: &mut S) -> LoadReport
where
    F: Fetch + ?Sized,
    S: SlideSink,
{
    let mut report = LoadReport::default();
    for locator in locators {
        let markup = match fetcher.fetch(locator).await {
            Ok(markup) => markup,
            Err(source) => {
                report.failure = Some(LoadError::ResourceUnavailable {
                    locator: locator.clone(),
                    source,
                });
                break;
            }
        };
        let fragment = match extract_first(&markup, SLIDE_ELEMENT) {
            Ok(Some(fragment)) => fragment,
            Ok(None) => {
                log::warn!("No <{}> in {}, skipping", SLIDE_ELEMENT, locator);
                report.skipped.push(locator.clone());
                continue;
            }
            Err(source) => {
                report.failure = Some(LoadError::Markup {
                    locator: locator.clone(),
                    source,
                });
                break;
            }
        };

        let position = report.loaded;
        let state = if position == 0 {
            DisplayState::Current
        } else {
            DisplayState::AfterCurrent
        };
        log::debug!("Loaded slide {} from {} ({} bytes)", position + 1, locator, fragment.markup.len());
        container.append(Slide::new(position, state, fragment).with_source(locator.as_str()));
        report.loaded += 1;
    }

    match &report.failure {
        Some(e) => log::error!("Error loading slides: {}", e),
        None => log::info!("Loaded {} slides successfully", report.loaded),
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// In-memory pages; a missing locator fails like a network error.
    struct FakeFetcher {
        pages: HashMap<String, String>,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl FakeFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
                log: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    #[async_trait(?Send)]
    impl Fetch for FakeFetcher {
        async fn fetch(&self, locator: &str) -> io::Result<String> {
            self.log.borrow_mut().push(format!("fetch {locator}"));
            self.pages
                .get(locator)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, locator.to_string()))
        }
    }

    /// Records appends into the same log as the fetcher.
    struct LoggingSink {
        slides: Vec<Slide>,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl SlideSink for LoggingSink {
        fn append(&mut self, slide: Slide) {
            self.log.borrow_mut().push(format!("append {}", slide.position()));
            self.slides.push(slide);
        }
    }

    fn locators(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn titled(title: &str) -> String {
        format!("<html><body><section class=\"slide\"><h1>{title}</h1></section></body></html>")
    }

    #[tokio::test]
    async fn failed_fetch_stops_loading_and_keeps_earlier_slides() {
        let a = titled("A");
        let c = titled("C");
        let fetcher = FakeFetcher::new(&[("a.html", a.as_str()), ("c.html", c.as_str())]);
        let mut slides = Vec::new();
        let report = load_slides(&locators(&["a.html", "b.html", "c.html"]), &fetcher, &mut slides).await;

        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].root().text(), "A");
        assert!(matches!(
            report.failure,
            Some(LoadError::ResourceUnavailable { ref locator, .. }) if locator == "b.html"
        ));
        assert!(!report.is_complete());
        assert!(!fetcher.log.borrow().iter().any(|l| l == "fetch c.html"));
    }

    #[tokio::test]
    async fn malformed_page_is_skipped_without_gaps() {
        let a = titled("A");
        let c = titled("C");
        let fetcher = FakeFetcher::new(&[("a.html", a.as_str()), ("b.html", "<div>nothing here</div>"), ("c.html", c.as_str())]);
        let mut slides = Vec::new();
        let report = load_slides(&locators(&["a.html", "b.html", "c.html"]), &fetcher, &mut slides).await;

        assert!(report.is_complete());
        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped, vec!["b.html".to_string()]);
        let loaded: Vec<(usize, String)> = slides.iter().map(|s| (s.position(), s.root().text())).collect();
        assert_eq!(loaded, vec![(0, "A".to_string()), (1, "C".to_string())]);
        let sources: Vec<Option<&str>> = slides.iter().map(Slide::source).collect();
        assert_eq!(sources, vec![Some("a.html"), Some("c.html")]);
    }

    #[tokio::test]
    async fn bare_ampersands_in_code_do_not_stop_loading() {
        let a = titled("A");
        let b = "<html><body><section class=\"slide\"><pre><code>if (ok && ready) { go(); }</code></pre></section></body></html>";
        let c = titled("C");
        let fetcher = FakeFetcher::new(&[("a.html", a.as_str()), ("b.html", b), ("c.html", c.as_str())]);
        let mut slides = Vec::new();
        let report = load_slides(&locators(&["a.html", "b.html", "c.html"]), &fetcher, &mut slides).await;

        assert!(report.is_complete());
        assert_eq!(slides.len(), 3);
        assert_eq!(slides[1].root().text(), "if (ok && ready) { go(); }");
    }

    #[tokio::test]
    async fn first_slide_is_current_and_the_rest_wait() {
        let pages: Vec<(String, String)> = (0..3).map(|i| (format!("{i}.html"), titled(&i.to_string()))).collect();
        let refs: Vec<(&str, &str)> = pages.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let fetcher = FakeFetcher::new(&refs);
        let mut slides = Vec::new();
        load_slides(&locators(&["0.html", "1.html", "2.html"]), &fetcher, &mut slides).await;

        let states: Vec<DisplayState> = slides.iter().map(|s| s.state).collect();
        assert_eq!(
            states,
            vec![DisplayState::Current, DisplayState::AfterCurrent, DisplayState::AfterCurrent]
        );
    }

    #[tokio::test]
    async fn slides_are_appended_as_they_are_loaded() {
        let a = titled("A");
        let b = titled("B");
        let fetcher = FakeFetcher::new(&[("a.html", a.as_str()), ("b.html", b.as_str())]);
        let mut sink = LoggingSink {
            slides: Vec::new(),
            log: fetcher.log.clone(),
        };
        load_slides(&locators(&["a.html", "b.html"]), &fetcher, &mut sink).await;

        assert_eq!(
            *fetcher.log.borrow(),
            vec!["fetch a.html", "append 0", "fetch b.html", "append 1"]
        );
        assert_eq!(sink.slides.len(), 2);
    }

    #[tokio::test]
    async fn file_fetcher_reads_below_its_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("pages")).unwrap();
        std::fs::write(dir.path().join("pages/intro.html"), titled("Intro")).unwrap();

        let fetcher = FileFetcher::new(dir.path());
        let mut slides = Vec::new();
        let report = load_slides(&locators(&["pages/intro.html", "pages/missing.html"]), &fetcher, &mut slides).await;

        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].root().text(), "Intro");
        assert!(matches!(report.failure, Some(LoadError::ResourceUnavailable { .. })));
    }
}

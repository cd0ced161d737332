//! The per-invocation `info!` event carries the counters an operator needs
//! to explain a miss.

use passage_locator::{PageStore, PassageLocator};
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture<F: FnOnce()>(f: F) -> String {
    let out = Captured::default();
    let writer = out.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    out.text()
}

fn store(texts: &[&str]) -> PageStore {
    let mut s = PageStore::new();
    s.render_page(0, texts.iter().copied());
    s
}

#[test]
fn highlighted_event_reports_counts_and_score() {
    let mut s = store(&["The quick brown", "fox jumps over", "the lazy dog"]);
    let logs = capture(|| {
        let found = PassageLocator::default().locate_and_highlight(
            &mut s,
            0,
            "quick brown fox jumps",
            "yellow",
        );
        assert!(found);
    });
    let line = logs
        .lines()
        .find(|l| l.contains("passage highlighted"))
        .unwrap();
    assert!(line.contains("page=0"), "{line}");
    assert!(line.contains("query_words=4"), "{line}");
    assert!(line.contains("candidates=1"), "{line}");
    assert!(line.contains("score=1.0"), "{line}");
}

#[test]
fn rejected_event_reports_best_score() {
    let mut s = store(&["alpha beta gamma", "beta delta"]);
    let locator = PassageLocator::default().with_scorer(|_: &str, _: &str| Some(0.4));
    let logs = capture(|| {
        assert!(!locator.locate_and_highlight(&mut s, 0, "beta gamma", "yellow"));
    });
    let line = logs
        .lines()
        .find(|l| l.contains("passage not highlighted"))
        .unwrap();
    assert!(line.contains("query_words=2"), "{line}");
    assert!(line.contains("candidates=2"), "{line}");
    assert!(line.contains("score=0.4"), "{line}");
    assert!(line.contains("reason=below_threshold"), "{line}");
}

#[test]
fn unrendered_event_reports_zero_candidates() {
    let mut s = PageStore::new();
    let logs = capture(|| {
        PassageLocator::default().highlight(&mut s, 3, "some cited words", "yellow");
    });
    let line = logs
        .lines()
        .find(|l| l.contains("passage not highlighted"))
        .unwrap();
    assert!(line.contains("page=3"), "{line}");
    assert!(line.contains("query_words=3"), "{line}");
    assert!(line.contains("candidates=0"), "{line}");
    assert!(line.contains("reason=page_not_rendered"), "{line}");
}

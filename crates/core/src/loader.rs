//! Article loader: catalog lookup, fetch, render, index, inject.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use crate::catalog::Catalog;
use crate::error::{FetchError, ViewerError};
use crate::modal::{ModalController, ModalView, error_html};
use crate::render_article;

/// Where raw article markdown comes from.
pub trait ContentSource {
    fn fetch_text(&self, path: &str) -> impl Future<Output = Result<String, FetchError>>;
}

/// How an [`ArticleLoader::open`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The article body was injected.
    Rendered,
    /// An inline error message was injected instead.
    Failed,
    /// A later `open` started before this one finished; the response was dropped.
    Superseded,
    /// The modal was closed before the response arrived.
    Dismissed,
}

pub struct ArticleLoader<S, V> {
    catalog: Rc<Catalog>,
    source: S,
    modal: Rc<RefCell<ModalController<V>>>,
    latest_request: Cell<u64>,
}

impl<S: ContentSource, V: ModalView> ArticleLoader<S, V> {
    pub fn new(catalog: Rc<Catalog>, source: S, modal: Rc<RefCell<ModalController<V>>>) -> Self {
        Self {
            catalog,
            source,
            modal,
            latest_request: Cell::new(0),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn modal(&self) -> &Rc<RefCell<ModalController<V>>> {
        &self.modal
    }

    /// Opens `article_id` in the modal.
    ///
    /// Overlapping calls are allowed; only the most recent one injects its
    /// result, so the modal never shows a stale article.
    pub async fn open(&self, article_id: &str) -> OpenOutcome {
        let request = self.latest_request.get() + 1;
        self.latest_request.set(request);

        let Some(record) = self.catalog.get(article_id) else {
            let err = ViewerError::NotFound(article_id.to_string());
            log::warn!("{err}");
            let mut modal = self.modal.borrow_mut();
            let handle = modal.show("Article not found");
            modal.inject(handle, &error_html(&err));
            return OpenOutcome::Failed;
        };

        let handle = self.modal.borrow_mut().show(&record.title);
        log::info!(
            "opening article {} ({}), request {request}",
            record.id,
            record.content_path
        );

        let fetched = self.source.fetch_text(&record.content_path).await;

        if self.latest_request.get() != request {
            log::warn!(
                "discarding response for article {}: superseded by request {}",
                record.id,
                self.latest_request.get()
            );
            return OpenOutcome::Superseded;
        }

        let (markup, outcome) = match fetched
            .map_err(ViewerError::from)
            .and_then(|markdown| render_article(&markdown))
        {
            Ok(article) => (article.into_markup(), OpenOutcome::Rendered),
            Err(err) => {
                log::warn!("article {} failed to load: {err}", record.id);
                (error_html(&err), OpenOutcome::Failed)
            }
        };

        if self.modal.borrow_mut().inject(handle, &markup) {
            outcome
        } else {
            log::debug!("modal for article {} closed before content arrived", record.id);
            OpenOutcome::Dismissed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::tests::RecordingView;
    use crate::modal::{LOADING_HTML, ModalHandle};
    use std::collections::HashMap;
    use std::pin::{Pin, pin};
    use std::task::{Context, Poll, Waker};

    type FetchResult = Result<String, FetchError>;

    /// A fetch that stays pending until the test resolves its path.
    #[derive(Default)]
    struct Slot(RefCell<Option<FetchResult>>);

    struct PendingFetch(Rc<Slot>);

    impl Future for PendingFetch {
        type Output = FetchResult;

        fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
            match self.0.0.borrow_mut().take() {
                Some(result) => Poll::Ready(result),
                None => Poll::Pending,
            }
        }
    }

    #[derive(Default)]
    struct ScriptedSource {
        slots: RefCell<HashMap<String, Vec<Rc<Slot>>>>,
    }

    impl ScriptedSource {
        /// Resolves the oldest outstanding fetch for `path`.
        fn resolve(&self, path: &str, result: FetchResult) {
            let mut slots = self.slots.borrow_mut();
            let queue = slots.get_mut(path).expect("no fetch issued for path");
            let slot = queue.remove(0);
            *slot.0.borrow_mut() = Some(result);
        }
    }

    impl ContentSource for ScriptedSource {
        fn fetch_text(&self, path: &str) -> impl Future<Output = FetchResult> {
            let slot = Rc::new(Slot::default());
            self.slots
                .borrow_mut()
                .entry(path.to_string())
                .or_default()
                .push(Rc::clone(&slot));
            PendingFetch(slot)
        }
    }

    fn poll<F: Future>(future: Pin<&mut F>) -> Poll<F::Output> {
        future.poll(&mut Context::from_waker(Waker::noop()))
    }

    fn loader() -> ArticleLoader<ScriptedSource, RecordingView> {
        ArticleLoader::new(
            Rc::new(Catalog::sample()),
            ScriptedSource::default(),
            Rc::new(RefCell::new(ModalController::new(RecordingView::default()))),
        )
    }

    fn active_content(loader: &ArticleLoader<ScriptedSource, RecordingView>) -> Option<String> {
        let modal = loader.modal().borrow();
        let handle: ModalHandle = modal.active()?;
        modal.view().content_of(handle).map(str::to_string)
    }

    const ML_PATH: &str = "content/machine_learning_mlops_automl.md";
    const AI_PATH: &str = "content/generative_ai.md";

    #[test]
    fn renders_fetched_markdown_with_index() {
        let loader = loader();
        let mut open = pin!(loader.open("3"));

        assert_eq!(poll(open.as_mut()), Poll::Pending);
        assert_eq!(active_content(&loader).as_deref(), Some(LOADING_HTML));

        loader
            .source
            .resolve(AI_PATH, Ok("# Generative AI\n## Models\nText".to_string()));
        assert_eq!(poll(open.as_mut()), Poll::Ready(OpenOutcome::Rendered));

        let content = active_content(&loader).unwrap();
        assert!(content.starts_with("<div class=\"article-index\">"));
        assert!(content.contains("<h2 id=\"heading-0\">Models</h2>"));
        assert!(content.ends_with("<p>Text</p>"));
    }

    #[test]
    fn unknown_id_shows_inline_not_found() {
        let loader = loader();
        let outcome = poll(pin!(loader.open("404")));

        assert_eq!(outcome, Poll::Ready(OpenOutcome::Failed));
        let content = active_content(&loader).unwrap();
        assert!(content.contains("class=\"error\""));
        assert!(content.contains("no article with id `404`"));
    }

    #[test]
    fn http_error_keeps_modal_open_with_reason() {
        let loader = loader();
        let mut open = pin!(loader.open("2"));
        assert!(poll(open.as_mut()).is_pending());

        loader.source.resolve(
            ML_PATH,
            Err(FetchError::Status {
                status: 404,
                status_text: "Not Found".to_string(),
            }),
        );
        assert_eq!(poll(open.as_mut()), Poll::Ready(OpenOutcome::Failed));

        assert!(loader.modal().borrow().active().is_some());
        let content = active_content(&loader).unwrap();
        assert!(content.contains("Error loading article: server responded with 404 Not Found"));
    }

    #[test]
    fn transport_error_is_rendered_inline() {
        let loader = loader();
        let mut open = pin!(loader.open("2"));
        assert!(poll(open.as_mut()).is_pending());

        loader
            .source
            .resolve(ML_PATH, Err(FetchError::Transport("offline".to_string())));
        assert_eq!(poll(open.as_mut()), Poll::Ready(OpenOutcome::Failed));
        assert!(active_content(&loader).unwrap().contains("offline"));
    }

    #[test]
    fn latest_open_wins_when_older_response_arrives_last() {
        let loader = loader();
        let mut first = pin!(loader.open("2"));
        let mut second = pin!(loader.open("3"));
        assert!(poll(first.as_mut()).is_pending());
        assert!(poll(second.as_mut()).is_pending());

        loader
            .source
            .resolve(AI_PATH, Ok("## Generative".to_string()));
        assert_eq!(poll(second.as_mut()), Poll::Ready(OpenOutcome::Rendered));

        loader.source.resolve(ML_PATH, Ok("## MLOps".to_string()));
        assert_eq!(poll(first.as_mut()), Poll::Ready(OpenOutcome::Superseded));

        let content = active_content(&loader).unwrap();
        assert!(content.contains("Generative"));
        assert!(!content.contains("MLOps"));
        assert_eq!(loader.modal().borrow().view().mounted.len(), 1);
    }

    #[test]
    fn latest_open_wins_when_older_response_arrives_first() {
        let loader = loader();
        let mut first = pin!(loader.open("2"));
        let mut second = pin!(loader.open("3"));
        assert!(poll(first.as_mut()).is_pending());
        assert!(poll(second.as_mut()).is_pending());

        loader.source.resolve(ML_PATH, Ok("## MLOps".to_string()));
        assert_eq!(poll(first.as_mut()), Poll::Ready(OpenOutcome::Superseded));
        assert_eq!(active_content(&loader).as_deref(), Some(LOADING_HTML));

        loader
            .source
            .resolve(AI_PATH, Ok("## Generative".to_string()));
        assert_eq!(poll(second.as_mut()), Poll::Ready(OpenOutcome::Rendered));
        assert!(active_content(&loader).unwrap().contains("Generative"));
    }

    #[test]
    fn reopening_the_same_article_issues_a_new_fetch() {
        let loader = loader();
        let mut first = pin!(loader.open("3"));
        let mut second = pin!(loader.open("3"));
        assert!(poll(first.as_mut()).is_pending());
        assert!(poll(second.as_mut()).is_pending());

        loader.source.resolve(AI_PATH, Ok("old".to_string()));
        loader.source.resolve(AI_PATH, Ok("new".to_string()));

        assert_eq!(poll(first.as_mut()), Poll::Ready(OpenOutcome::Superseded));
        assert_eq!(poll(second.as_mut()), Poll::Ready(OpenOutcome::Rendered));
        assert_eq!(active_content(&loader).as_deref(), Some("<p>new</p>"));
    }

    #[test]
    fn closing_before_response_drops_it() {
        let loader = loader();
        let mut open = pin!(loader.open("3"));
        assert!(poll(open.as_mut()).is_pending());

        assert!(loader.modal().borrow_mut().close_active());
        loader.source.resolve(AI_PATH, Ok("# Late".to_string()));

        assert_eq!(poll(open.as_mut()), Poll::Ready(OpenOutcome::Dismissed));
        assert!(loader.modal().borrow().active().is_none());
        assert!(loader.modal().borrow().view().mounted.is_empty());
    }
}

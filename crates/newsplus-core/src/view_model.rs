//! Headline list state and its synchronization with the persisted liked set
//!
//! [`NewsViewModel`] owns the articles of the current session. A successful
//! fetch replaces the whole list, merges the persisted liked ids into it and
//! notifies the single registered observer. Like toggles update the persisted
//! set first and the in-memory flag second, so a failed write leaves both
//! untouched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, ThreadId};

use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{debug, error, info};

use crate::news::{Article, HeadlineFetcher};
use crate::storage::{ArticleStore, LikedIds, LIKED_ARTICLES_KEY};
use crate::{Error, Result};

/// Observer invoked with the full list after each successful fetch
pub type ArticlesChangedCallback = Arc<dyn Fn(&[Article]) + Send + Sync>;

/// What a call to [`NewsViewModel::fetch_headlines`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The list was replaced and the observer notified
    Replaced { count: usize },
    /// The fetch failed; the error was logged and nothing changed
    Failed,
    /// Another fetch on this instance was still running; nothing was requested
    AlreadyInFlight,
}

pub struct NewsViewModel {
    fetcher: Arc<dyn HeadlineFetcher>,
    store: Arc<dyn ArticleStore>,
    articles: RwLock<Vec<Article>>,
    on_articles_changed: Mutex<Option<ArticlesChangedCallback>>,
    /// Held while the observer runs; `dispose` waits on it
    delivery: Mutex<()>,
    /// Thread currently running the observer, if any
    delivering_on: Mutex<Option<ThreadId>>,
    /// Held for the duration of a fetch; overlapping fetches are rejected
    fetch_guard: AsyncMutex<()>,
    /// Serializes read-modify-write sequences against the store
    store_guard: AsyncMutex<()>,
    disposed: AtomicBool,
}

impl NewsViewModel {
    pub fn new(fetcher: Arc<dyn HeadlineFetcher>, store: Arc<dyn ArticleStore>) -> Self {
        Self {
            fetcher,
            store,
            articles: RwLock::new(Vec::new()),
            on_articles_changed: Mutex::new(None),
            delivery: Mutex::new(()),
            delivering_on: Mutex::new(None),
            fetch_guard: AsyncMutex::new(()),
            store_guard: AsyncMutex::new(()),
            disposed: AtomicBool::new(false),
        }
    }

    /// Register the observer, replacing any previous one
    pub fn set_on_articles_changed<F>(&self, callback: F)
    where
        F: Fn(&[Article]) + Send + Sync + 'static,
    {
        *self.observer_slot() = Some(Arc::new(callback));
    }

    pub fn clear_on_articles_changed(&self) {
        *self.observer_slot() = None;
    }

    /// Detach the observer for good
    ///
    /// A fetch still in flight completes and updates the list, but no
    /// callback runs after this returns: if another thread is inside the
    /// observer, this blocks until it finishes. Calling it from the observer
    /// itself is allowed and returns immediately.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
        self.clear_on_articles_changed();

        if *lock_ignoring_poison(&self.delivering_on) == Some(thread::current().id()) {
            return;
        }
        drop(lock_ignoring_poison(&self.delivery));
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Fetch the top headlines once and, on success, publish them
    ///
    /// Errors are logged, never returned: the list and the observer are left
    /// alone. Callers that want to know whether the list changed can inspect
    /// the returned [`FetchOutcome`].
    pub async fn fetch_headlines(&self) -> FetchOutcome {
        let Ok(_in_flight) = self.fetch_guard.try_lock() else {
            debug!("Headline fetch already in flight, ignoring request");
            return FetchOutcome::AlreadyInFlight;
        };

        let mut fetched = match self.fetcher.fetch_headlines().await {
            Ok(articles) => articles,
            Err(e) => {
                error!("Failed to fetch headlines: {}", e);
                return FetchOutcome::Failed;
            }
        };

        // Merge and publish under the store guard so a concurrent toggle
        // cannot land between reading the liked set and swapping the list.
        let snapshot = {
            let _store = self.store_guard.lock().await;

            let liked = match self.load_liked().await {
                Ok(liked) => liked,
                Err(e) => {
                    error!("Failed to read liked articles, discarding fetched headlines: {}", e);
                    return FetchOutcome::Failed;
                }
            };

            let liked_count = apply_liked(&mut fetched, &liked);
            info!("Loaded {} headlines ({} liked)", fetched.len(), liked_count);

            let mut articles = self.articles.write().await;
            *articles = fetched;
            self.observer().map(|callback| (callback, articles.clone()))
        };

        let count = match snapshot {
            Some((callback, articles)) => {
                self.deliver(&callback, &articles);
                articles.len()
            }
            None => self.articles.read().await.len(),
        };

        FetchOutcome::Replaced { count }
    }

    /// Overwrite every article's liked flag from the persisted set
    ///
    /// Idempotent and silent: the observer is not notified. On a store error
    /// the flags are left as they were.
    pub async fn reconcile_liked_state(&self) -> Result<()> {
        let _store = self.store_guard.lock().await;
        let liked = self.load_liked().await?;

        let mut articles = self.articles.write().await;
        let liked_count = apply_liked(&mut articles, &liked);
        debug!("Reconciled liked state: {} of {} liked", liked_count, articles.len());
        Ok(())
    }

    /// Record a like toggle for the article with `id`
    ///
    /// Returns once both the persisted set and the in-memory flag reflect
    /// `liked`. The persisted set is updated even if no current article has
    /// this id. Surrounding whitespace is ignored, as for article URLs. The
    /// observer is not notified.
    pub async fn set_liked(&self, id: &str, liked: bool) -> Result<()> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::MissingIdentifier);
        }

        let _store = self.store_guard.lock().await;

        let mut ids = self.load_liked().await?;
        ids.set(id, liked);
        self.store
            .set_string_list(LIKED_ARTICLES_KEY, ids.as_slice())
            .await?;

        let mut articles = self.articles.write().await;
        let mut matched = false;
        for article in articles.iter_mut().filter(|a| a.id.as_str() == Some(id)) {
            article.is_liked = liked;
            matched = true;
        }

        if !matched {
            debug!("Liked state stored for {}, which is not in the current list", id);
        }
        debug!("Set liked={} for {} ({} liked ids stored)", liked, id, ids.len());
        Ok(())
    }

    /// Rewrite the persisted set from the liked articles currently in memory
    pub async fn persist_all_liked(&self) -> Result<()> {
        let _store = self.store_guard.lock().await;

        let articles = self.articles.read().await;
        let liked: LikedIds = articles
            .iter()
            .filter(|a| a.is_liked)
            .filter_map(|a| a.id.as_str())
            .collect();
        drop(articles);

        self.store
            .set_string_list(LIKED_ARTICLES_KEY, liked.as_slice())
            .await?;
        debug!("Persisted {} liked ids", liked.len());
        Ok(())
    }

    /// The persisted liked ids
    pub async fn liked_ids(&self) -> Result<LikedIds> {
        self.load_liked().await
    }

    /// Snapshot of the current list
    pub async fn articles(&self) -> Vec<Article> {
        self.articles.read().await.clone()
    }

    pub async fn article(&self, id: &str) -> Option<Article> {
        self.articles
            .read()
            .await
            .iter()
            .find(|a| a.id.as_str() == Some(id))
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.articles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.articles.read().await.is_empty()
    }

    async fn load_liked(&self) -> Result<LikedIds> {
        let stored = self.store.get_string_list(LIKED_ARTICLES_KEY).await?;
        Ok(LikedIds::from_stored(stored))
    }

    fn observer_slot(&self) -> MutexGuard<'_, Option<ArticlesChangedCallback>> {
        lock_ignoring_poison(&self.on_articles_changed)
    }

    fn observer(&self) -> Option<ArticlesChangedCallback> {
        if self.is_disposed() {
            return None;
        }
        self.observer_slot().clone()
    }

    /// Run the observer unless disposed, holding the delivery lock throughout
    fn deliver(&self, callback: &ArticlesChangedCallback, articles: &[Article]) {
        let _delivery = lock_ignoring_poison(&self.delivery);
        if self.is_disposed() {
            debug!("View model disposed, skipping change notification");
            return;
        }

        *lock_ignoring_poison(&self.delivering_on) = Some(thread::current().id());
        callback(articles);
        *lock_ignoring_poison(&self.delivering_on) = None;
    }
}

// A panicking observer must not wedge the view model.
fn lock_ignoring_poison<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Set each article's flag to its membership in `liked`; returns the liked count
fn apply_liked(articles: &mut [Article], liked: &LikedIds) -> usize {
    let lookup = liked.lookup();
    let mut count = 0;
    for article in articles.iter_mut() {
        article.is_liked = article
            .id
            .as_str()
            .map_or(false, |id| lookup.contains(id));
        if article.is_liked {
            count += 1;
        }
    }
    count
}

//! Background card creation.
//!
//! Fetching and decoding thumbnails is slow, so textures are built on a
//! named worker thread and streamed back over a channel in article order.
//! The owner holds a liveness flag; the worker re-checks it after every
//! fetch and drops the texture it just built if the owner has gone away.
//! The viewer commits the card set only once every article has been
//! delivered, so a half-built set is never visible.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::article::{Article, ArticleId};
use crate::error::CardViewError;
use crate::options::AppearanceOptions;
use crate::texture::{build_card_texture, CardTexture, ThumbnailSource};

/// Message from the worker thread.
enum LoaderMessage {
    /// Texture for the article at `index`.
    Card {
        index: usize,
        id: ArticleId,
        texture: CardTexture,
    },
    /// Every article has been delivered.
    Finished,
}

/// Owner side of a background card-texture build.
pub struct CardLoader {
    alive: Arc<AtomicBool>,
    rx: mpsc::Receiver<LoaderMessage>,
    expected: usize,
    received: Vec<Option<(ArticleId, CardTexture)>>,
    finished: bool,
    taken: bool,
    thread: Option<JoinHandle<()>>,
}

impl CardLoader {
    /// Start building textures for `articles` on a worker thread.
    ///
    /// `seed` fixes placeholder decoration for reproducible output; `None`
    /// seeds from the OS.
    ///
    /// # Errors
    ///
    /// Returns [`CardViewError::ThreadSpawn`] if the worker cannot be
    /// started.
    pub fn spawn(
        articles: Vec<Article>,
        source: Arc<dyn ThumbnailSource>,
        appearance: AppearanceOptions,
        seed: Option<u64>,
    ) -> Result<Self, CardViewError> {
        let (tx, rx) = mpsc::channel();
        let alive = Arc::new(AtomicBool::new(true));
        let expected = articles.len();

        let worker_alive = Arc::clone(&alive);
        let thread = std::thread::Builder::new()
            .name("card-loader".into())
            .spawn(move || {
                let mut rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
                Self::thread_main(
                    &articles,
                    source.as_ref(),
                    &appearance,
                    &mut rng,
                    &worker_alive,
                    &tx,
                );
            })
            .map_err(CardViewError::ThreadSpawn)?;

        log::debug!("Card loader started for {expected} articles");
        Ok(Self {
            alive,
            rx,
            expected,
            received: std::iter::repeat_with(|| None).take(expected).collect(),
            finished: false,
            taken: false,
            thread: Some(thread),
        })
    }

    fn thread_main(
        articles: &[Article],
        source: &dyn ThumbnailSource,
        appearance: &AppearanceOptions,
        rng: &mut StdRng,
        alive: &AtomicBool,
        tx: &mpsc::Sender<LoaderMessage>,
    ) {
        for (index, article) in articles.iter().enumerate() {
            if !alive.load(Ordering::Acquire) {
                return;
            }
            let texture = build_card_texture(article, source, appearance, rng);
            if !alive.load(Ordering::Acquire) {
                log::debug!(
                    "Card loader stopped; releasing texture for article {}",
                    article.id
                );
                drop(texture);
                return;
            }
            let msg = LoaderMessage::Card {
                index,
                id: article.id,
                texture,
            };
            if tx.send(msg).is_err() {
                return;
            }
        }
        let _ = tx.send(LoaderMessage::Finished);
    }

    /// Drain delivered textures. Returns the complete, ordered set exactly
    /// once, after every article has arrived.
    pub fn poll(&mut self) -> Option<Vec<(ArticleId, CardTexture)>> {
        if self.taken {
            return None;
        }
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                LoaderMessage::Card { index, id, texture } => {
                    if let Some(slot) = self.received.get_mut(index) {
                        *slot = Some((id, texture));
                    }
                }
                LoaderMessage::Finished => self.finished = true,
            }
        }
        if !self.finished {
            return None;
        }
        self.taken = true;
        let cards: Vec<_> =
            self.received.drain(..).flatten().collect();
        log::info!("Loaded {} of {} cards", cards.len(), self.expected);
        Some(cards)
    }

    /// Block until the worker has delivered everything, then return the
    /// set. Returns `None` if the set was already taken or the worker
    /// stopped early.
    pub fn wait(&mut self) -> Option<Vec<(ArticleId, CardTexture)>> {
        while !self.finished && !self.taken {
            match self.rx.recv() {
                Ok(LoaderMessage::Card { index, id, texture }) => {
                    if let Some(slot) = self.received.get_mut(index) {
                        *slot = Some((id, texture));
                    }
                }
                Ok(LoaderMessage::Finished) => self.finished = true,
                Err(_) => return None,
            }
        }
        self.poll()
    }

    /// Whether the complete set has been handed out.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.taken
    }

    /// Stop the worker. Textures built after this point are released
    /// without being delivered. Does not wait for an in-flight fetch.
    pub fn shutdown(&mut self) {
        self.alive.store(false, Ordering::Release);
        if let Some(handle) = self.thread.take() {
            if handle.is_finished() {
                let _ = handle.join();
            }
        }
    }
}

impl Drop for CardLoader {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for CardLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardLoader")
            .field("expected", &self.expected)
            .field("finished", &self.finished)
            .field("taken", &self.taken)
            .finish_non_exhaustive()
    }
}

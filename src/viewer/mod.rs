//! The card viewer: one object that owns the scene, the controllers and
//! the background loader, executes [`ViewerCommand`]s and produces a
//! [`RenderFrame`] per display refresh.
//!
//! # Frame loop
//!
//! The host forwards input as commands (usually via
//! [`InputProcessor`](crate::input::InputProcessor)), calls
//! [`CardViewer::frame`] whenever it repaints, and drains
//! [`CardViewer::take_events`] for actions it must perform itself, such as
//! navigating to an article.

mod command;
mod frame;

use std::sync::Arc;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;

pub use command::{ViewerCommand, ViewerEvent};
pub use frame::{CardFrame, RenderFrame};

use crate::animation::{Clock, FrameScheduler};
use crate::article::{Article, ArticleId};
use crate::camera::{Camera, OrbitController};
use crate::card::{Card, CardSet};
use crate::controller::ViewController;
use crate::error::CardViewError;
use crate::loader::CardLoader;
use crate::options::Options;
use crate::picking::{pick_card, route_click, screen_to_ray, ClickAction};
use crate::scene::SceneSetup;
use crate::texture::{CardTexture, ThumbnailSource};

/// Article card browser.
pub struct CardViewer {
    options: Options,
    controller: ViewController,
    orbit: OrbitController,
    camera: Camera,
    scene: SceneSetup,
    loader: Option<CardLoader>,
    /// Records behind the installed cards.
    articles: FxHashMap<ArticleId, Article>,
    /// Records of the load in progress, installed with its cards.
    pending_articles: FxHashMap<ArticleId, Article>,
    clock: Box<dyn Clock>,
    seed: Option<u64>,
    viewport: Vec2,
    texture_revision: u64,
    events: Vec<ViewerEvent>,
}

impl CardViewer {
    /// Viewer in sphere mode with no cards yet.
    ///
    /// `scheduler` receives a frame request whenever an animation needs
    /// another repaint. `seed` fixes the particle field and placeholder
    /// decoration; `None` seeds from the OS.
    #[must_use]
    pub fn new(
        options: Options,
        viewport: (u32, u32),
        clock: Box<dyn Clock>,
        scheduler: Box<dyn FrameScheduler>,
        seed: Option<u64>,
    ) -> Self {
        let mut rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let scene = SceneSetup::new(&options.scene, &options.lighting, &mut rng);
        let controller = ViewController::new(&options, scheduler, clock.now());
        let pose = *controller.pose();
        let mut camera = Camera::new(&options.camera, 1.0, pose.eye(), pose.target);
        camera.resize(viewport.0, viewport.1);
        let orbit = OrbitController::new(options.orbit.clone());

        Self {
            options,
            controller,
            orbit,
            camera,
            scene,
            loader: None,
            articles: FxHashMap::default(),
            pending_articles: FxHashMap::default(),
            clock,
            seed,
            viewport: Vec2::new(viewport.0 as f32, viewport.1 as f32),
            texture_revision: 0,
            events: Vec::new(),
        }
    }

    // ── Cards ───────────────────────────────────────────────────────

    /// Start building cards for `articles` in the background. The set
    /// appears in a later [`frame`](Self::frame) once every card is ready.
    /// A load already in progress is abandoned.
    ///
    /// # Errors
    ///
    /// Returns [`CardViewError::ThreadSpawn`] if the loader thread cannot
    /// be started.
    pub fn load_articles(
        &mut self,
        articles: Vec<Article>,
        source: Arc<dyn ThumbnailSource>,
    ) -> Result<(), CardViewError> {
        if let Some(mut previous) = self.loader.take() {
            previous.shutdown();
        }
        self.pending_articles = articles.iter().map(|a| (a.id, a.clone())).collect();
        let seed = self.seed.map(|s| s.wrapping_add(1));
        self.loader = Some(CardLoader::spawn(
            articles,
            source,
            self.options.appearance.clone(),
            seed,
        )?);
        Ok(())
    }

    /// Block until the background load finishes and install the cards.
    /// Returns whether a card set was installed.
    pub fn wait_for_cards(&mut self) -> bool {
        let Some(mut loader) = self.loader.take() else {
            return false;
        };
        loader.wait().is_some_and(|cards| {
            self.install_loaded(cards);
            true
        })
    }

    /// Whether a background load is still running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loader.is_some()
    }

    /// Replace the card set with already textured cards, in article order.
    pub fn set_cards(&mut self, textured: Vec<(ArticleId, CardTexture)>) {
        let cards = CardSet::build(textured, &self.options.layout);
        let count = cards.len();
        self.controller.set_cards(cards);
        self.texture_revision += 1;
        self.events.push(ViewerEvent::CardsReady { count });
    }

    fn poll_loader(&mut self) {
        let Some(cards) = self.loader.as_mut().and_then(CardLoader::poll) else {
            return;
        };
        self.loader = None;
        self.install_loaded(cards);
    }

    fn install_loaded(&mut self, cards: Vec<(ArticleId, CardTexture)>) {
        self.articles = std::mem::take(&mut self.pending_articles);
        self.set_cards(cards);
    }

    // ── Commands ────────────────────────────────────────────────────

    /// Execute a command. Returns whether it had an effect; commands that
    /// arrive while they are not allowed (for example a view switch during
    /// a transition) are dropped.
    pub fn execute(&mut self, command: ViewerCommand) -> bool {
        let now = self.clock.now();
        match command {
            ViewerCommand::PointerDown { x, y } => {
                if !self.controller.begin_direct_control() {
                    return false;
                }
                self.orbit.begin_drag(Vec2::new(x, y));
                true
            }
            ViewerCommand::PointerMove { x, y } => self
                .orbit
                .drag_to(Vec2::new(x, y))
                .is_some_and(|delta| self.controller.orbit_rotate(&self.orbit, delta)),
            ViewerCommand::PointerUp { x, y, click } => {
                let dragged = self.orbit.end_drag();
                self.controller.end_direct_control();
                if click {
                    self.click(Vec2::new(x, y))
                } else {
                    dragged
                }
            }
            ViewerCommand::Zoom { delta } => self.controller.orbit_zoom(&self.orbit, delta),
            ViewerCommand::SwitchToGrid => self.controller.switch_to_grid(now),
            ViewerCommand::SwitchToSphere => self.controller.switch_to_sphere(now),
            ViewerCommand::ToggleView => self.controller.toggle_view(now),
            ViewerCommand::ResetView => self.controller.reset_view(now),
            ViewerCommand::FocusCard(id) => self.controller.focus_on_card(id, now),
            ViewerCommand::OpenFocused => self.controller.focused().is_some_and(|id| {
                self.open_article(id);
                true
            }),
            ViewerCommand::Resize { width, height } => {
                self.resize(width, height);
                true
            }
        }
    }

    /// Route a click at pixel `pos` through picking.
    fn click(&mut self, pos: Vec2) -> bool {
        if self.controller.is_transitioning() || self.controller.has_direct_control() {
            log::debug!("click ignored: camera busy");
            return false;
        }
        if self.controller.cards().is_empty() {
            return false;
        }
        self.sync_camera();
        let layout = &self.options.layout;
        let hit = screen_to_ray(pos, self.viewport, self.camera.build_matrix()).and_then(|ray| {
            pick_card(&ray, self.controller.cards(), layout.card_width, layout.card_height)
        });

        let now = self.clock.now();
        match route_click(hit.map(|h| h.id), self.controller.focused()) {
            ClickAction::Open(id) => {
                self.open_article(id);
                true
            }
            ClickAction::Focus(id) => self.controller.focus_on_card(id, now),
            ClickAction::Reset => self.controller.reset_view(now),
            ClickAction::Ignore => false,
        }
    }

    fn open_article(&mut self, id: ArticleId) {
        let url = self.options.links.article_url(id);
        log::info!("Opening article {id}: {url}");
        self.events.push(ViewerEvent::OpenArticle { id, url });
    }

    /// Drain pending events.
    pub fn take_events(&mut self) -> Vec<ViewerEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Frame ───────────────────────────────────────────────────────

    /// Advance to the clock's current time and capture the frame.
    pub fn frame(&mut self) -> RenderFrame {
        self.poll_loader();
        let _ = self.controller.tick(self.clock.now());
        self.sync_camera();
        RenderFrame::capture(
            self.camera.snapshot(),
            self.scene.background,
            self.scene.lights,
            self.controller.state(),
            self.focused_article().cloned(),
            self.texture_revision,
        )
    }

    fn sync_camera(&mut self) {
        let pose = self.controller.pose();
        self.camera.eye = pose.eye();
        self.camera.target = pose.target;
    }

    /// Update the viewport size. Zero-sized viewports are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = Vec2::new(width as f32, height as f32);
        self.camera.resize(width, height);
    }

    /// Replace tunables. Running transitions keep their timing.
    pub fn set_options(&mut self, options: Options) {
        self.controller.set_options(&options);
        self.orbit.set_options(options.orbit.clone());
        self.camera.fovy = options.camera.fovy;
        self.camera.znear = options.camera.znear;
        self.camera.zfar = options.camera.zfar;
        self.options = options;
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// View controller (mode, focus, pose, cards).
    #[must_use]
    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    /// Camera as of the last frame.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Static scene: background, lights and particle field.
    #[must_use]
    pub fn scene(&self) -> &SceneSetup {
        &self.scene
    }

    /// Card for `id`.
    #[must_use]
    pub fn card(&self, id: ArticleId) -> Option<&Card> {
        self.controller.cards().get(id)
    }

    /// Article record behind the card for `id`, from the last completed
    /// [`load_articles`](Self::load_articles).
    #[must_use]
    pub fn article(&self, id: ArticleId) -> Option<&Article> {
        self.articles.get(&id)
    }

    /// Article record of the focused card.
    #[must_use]
    pub fn focused_article(&self) -> Option<&Article> {
        self.controller.focused().and_then(|id| self.article(id))
    }

    /// Texture of the card for `id`.
    #[must_use]
    pub fn card_texture(&self, id: ArticleId) -> Option<&CardTexture> {
        self.card(id).map(Card::texture)
    }

    /// Stop animations and abandon any background load.
    pub fn shutdown(&mut self) {
        self.controller.cancel();
        if let Some(mut loader) = self.loader.take() {
            loader.shutdown();
        }
    }
}

impl Drop for CardViewer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for CardViewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardViewer")
            .field("controller", &self.controller)
            .field("viewport", &self.viewport)
            .field("loading", &self.loader.is_some())
            .field("texture_revision", &self.texture_revision)
            .finish_non_exhaustive()
    }
}

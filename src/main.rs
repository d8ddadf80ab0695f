//! Headless card viewer driver.
//!
//! Loads an article list, builds the cards, replays a script of input steps
//! against a simulated clock and writes one JSON object per line to stdout:
//! the static scene first, then every rendered frame and every viewer
//! event.
//!
//! ```bash
//! cardview articles.json --step key=KeyG --step click=640,360 --step wait=500
//! ```

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use cardview::animation::{ManualClock, QueuedScheduler};
use cardview::input::{InputEvent, InputProcessor, MouseButton};
use cardview::texture::{FileThumbnails, ThumbnailSource};
use cardview::{article, ArticleId, CardViewError, CardViewer, Options, ViewerCommand};
use clap::Parser;
use serde::Serialize;

/// Replay input against the card viewer and trace the render frames.
#[derive(Parser, Debug)]
#[command(name = "cardview", version)]
struct Args {
    /// JSON article list.
    articles: PathBuf,

    /// TOML options preset.
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Directory that relative thumbnail paths are resolved against.
    #[arg(long, value_name = "DIR", default_value = ".")]
    thumbnails: PathBuf,

    /// Fetch thumbnails over HTTP instead of from disk.
    #[cfg(feature = "net")]
    #[arg(long)]
    http: bool,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Simulated milliseconds per frame.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Seed for the particle field and placeholders.
    #[arg(long)]
    seed: Option<u64>,

    /// Input step: key=NAME, click=X,Y, drag=X,Y,DX,DY, zoom=DELTA,
    /// focus=ID, grid, sphere, toggle, reset, open, wait=MS.
    #[arg(long = "step", value_name = "STEP")]
    steps: Vec<Step>,

    /// Print the options JSON schema and exit.
    #[arg(long)]
    schema: bool,
}

/// One scripted input.
#[derive(Debug, Clone)]
enum Step {
    Key(String),
    Click(f32, f32),
    Drag(f32, f32, f32, f32),
    Command(ViewerCommand),
    Wait(u64),
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = s.split_once('=').unwrap_or((s, ""));
        let floats = || -> Result<Vec<f32>, String> {
            arg.split(',')
                .map(|v| v.trim().parse::<f32>().map_err(|e| format!("{s}: {e}")))
                .collect()
        };
        let step = match name {
            "key" if !arg.is_empty() => Self::Key(arg.to_owned()),
            "click" => match floats()?.as_slice() {
                [x, y] => Self::Click(*x, *y),
                _ => return Err(format!("{s}: expected click=X,Y")),
            },
            "drag" => match floats()?.as_slice() {
                [x, y, dx, dy] => Self::Drag(*x, *y, *dx, *dy),
                _ => return Err(format!("{s}: expected drag=X,Y,DX,DY")),
            },
            "zoom" => Self::Command(ViewerCommand::Zoom {
                delta: arg.parse().map_err(|e| format!("{s}: {e}"))?,
            }),
            "focus" => Self::Command(ViewerCommand::FocusCard(ArticleId(
                arg.parse().map_err(|e| format!("{s}: {e}"))?,
            ))),
            "wait" => Self::Wait(arg.parse().map_err(|e| format!("{s}: {e}"))?),
            "grid" => Self::Command(ViewerCommand::SwitchToGrid),
            "sphere" => Self::Command(ViewerCommand::SwitchToSphere),
            "toggle" => Self::Command(ViewerCommand::ToggleView),
            "reset" => Self::Command(ViewerCommand::ResetView),
            "open" => Self::Command(ViewerCommand::OpenFocused),
            _ => return Err(format!("unknown step {s:?}")),
        };
        Ok(step)
    }
}

/// Line written to the trace.
#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum TraceLine<'a> {
    Scene(&'a cardview::scene::SceneSetup),
    Frame(&'a cardview::RenderFrame),
    Event(&'a cardview::ViewerEvent),
}

/// Upper bound on frames rendered while waiting for an animation to settle.
const MAX_SETTLE_FRAMES: usize = 10_000;

struct Driver<W: Write> {
    viewer: CardViewer,
    input: InputProcessor,
    clock: ManualClock,
    scheduler: QueuedScheduler,
    frame_ms: u64,
    out: W,
}

impl<W: Write> Driver<W> {
    fn emit(&mut self, line: &TraceLine<'_>) -> Result<(), CardViewError> {
        serde_json::to_writer(&mut self.out, line).map_err(|e| CardViewError::Io(e.into()))?;
        writeln!(self.out).map_err(CardViewError::Io)
    }

    /// Advance the clock one frame, render, and trace frame and events.
    fn render(&mut self) -> Result<(), CardViewError> {
        let _ = self.scheduler.take_pending();
        self.clock.advance_ms(self.frame_ms);
        let frame = self.viewer.frame();
        self.emit(&TraceLine::Frame(&frame))?;
        for event in self.viewer.take_events() {
            self.emit(&TraceLine::Event(&event))?;
        }
        Ok(())
    }

    /// Render until no further frame is requested.
    fn settle(&mut self) -> Result<(), CardViewError> {
        for _ in 0..MAX_SETTLE_FRAMES {
            if !self.scheduler.has_pending() {
                break;
            }
            self.render()?;
        }
        self.render()
    }

    fn send(&mut self, event: InputEvent) {
        if let Some(command) = self.input.handle_event(event) {
            let _ = self.viewer.execute(command);
        }
    }

    fn run_step(&mut self, step: &Step) -> Result<(), CardViewError> {
        log::debug!("step {step:?}");
        match step {
            Step::Key(key) => {
                if let Some(command) = self.input.handle_key_press(key) {
                    let _ = self.viewer.execute(command);
                } else {
                    log::warn!("no binding for key {key:?}");
                }
            }
            Step::Click(x, y) => {
                self.send(InputEvent::CursorMoved { x: *x, y: *y });
                self.press(true);
                self.press(false);
            }
            Step::Drag(x, y, dx, dy) => {
                self.send(InputEvent::CursorMoved { x: *x, y: *y });
                self.press(true);
                self.send(InputEvent::CursorMoved {
                    x: x + dx,
                    y: y + dy,
                });
                self.press(false);
            }
            Step::Command(command) => {
                let _ = self.viewer.execute(*command);
            }
            Step::Wait(ms) => {
                for _ in 0..ms / self.frame_ms.max(1) {
                    self.render()?;
                }
                return Ok(());
            }
        }
        self.settle()
    }

    fn press(&mut self, pressed: bool) {
        self.send(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed,
        });
    }
}

fn thumbnail_source(args: &Args) -> Arc<dyn ThumbnailSource> {
    #[cfg(feature = "net")]
    {
        if args.http {
            return Arc::new(cardview::texture::HttpThumbnails);
        }
    }
    Arc::new(FileThumbnails::new(args.thumbnails.clone()))
}

fn run(args: &Args) -> Result<(), CardViewError> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if args.schema {
        serde_json::to_writer_pretty(&mut out, &Options::json_schema())
            .map_err(|e| CardViewError::Io(e.into()))?;
        writeln!(out).map_err(CardViewError::Io)?;
        return out.flush().map_err(CardViewError::Io);
    }

    let options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let articles = article::load_articles(&args.articles)?;
    log::info!("Loaded {} articles from {}", articles.len(), args.articles.display());

    let clock = ManualClock::new();
    let scheduler = QueuedScheduler::new();
    let input = InputProcessor::from_options(&options);
    let mut viewer = CardViewer::new(
        options,
        (args.width, args.height),
        Box::new(clock.clone()),
        Box::new(scheduler.clone()),
        args.seed,
    );
    viewer.load_articles(articles, thumbnail_source(args))?;
    if !viewer.wait_for_cards() {
        log::warn!("Card loading stopped before every card was built");
    }

    let mut driver = Driver {
        viewer,
        input,
        clock,
        scheduler,
        frame_ms: args.frame_ms.max(1),
        out,
    };
    let scene = driver.viewer.scene().clone();
    driver.emit(&TraceLine::Scene(&scene))?;
    driver.render()?;
    for step in &args.steps {
        driver.run_step(step)?;
    }
    driver.viewer.shutdown();
    driver.out.flush().map_err(CardViewError::Io)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod ui;
mod update;
mod windowing;

use std::env;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use iced::{task, window, Task};
use naiades_config::ViewerConfig;
use naiades_fetch::{HttpListingSource, ListingSource};
use naiades_listing::Listing;
use naiades_view::{Failure, Lifecycle, ListingStore};
use tracing_subscriber::EnvFilter;

const WINDOW_TITLE: &str = "Naiades: The Latest";
const WINDOW_WIDTH: f32 = 960.0;
const WINDOW_HEIGHT: f32 = 640.0;
const HEADING_FONT_SIZE: u32 = 28;
const GROUP_FONT_SIZE: u32 = 20;
const CELL_FONT_SIZE: u32 = 14;
const NOTICE_FONT_SIZE: u32 = 15;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ViewerConfig::from_env().context("invalid viewer configuration")?;
    let source: Arc<dyn ListingSource> = Arc::new(
        HttpListingSource::from_config(&config).context("cannot build listing client")?,
    );
    tracing::info!(%config, "starting naiades viewer");

    let theme_choice = config.theme;
    iced::application(
        move || {
            let mut app = App::new(theme_choice, Arc::clone(&source));
            let task = app.mount().unwrap_or_else(Task::none);
            (app, task)
        },
        update::update,
        ui::view,
    )
    .title(WINDOW_TITLE)
    .theme(ui::theme)
    .window(windowing::native_window_settings())
    .subscription(ui::subscription)
    .run()
    .map_err(|e| anyhow!("viewer window failed: {e}"))
}

fn init_tracing() {
    let debug = env::var("NAIADES_DEBUG").ok().as_deref() == Some("1");
    let default_directive = if debug {
        "naiades_viewer=debug,naiades_fetch=debug,naiades_view=debug,naiades_config=debug"
    } else {
        "naiades_viewer=info,naiades_fetch=info,naiades_view=info,naiades_config=info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[derive(Debug, Clone)]
enum Message {
    ListingFetched {
        generation: u64,
        result: Result<Arc<Listing>, Failure>,
    },
    CloseRequested(window::Id),
}

struct App {
    theme: naiades_config::Theme,
    source: Arc<dyn ListingSource>,
    store: ListingStore,
    lifecycle: Lifecycle,
    fetch_handle: Option<task::Handle>,
}

impl App {
    fn new(theme: naiades_config::Theme, source: Arc<dyn ListingSource>) -> Self {
        Self {
            theme,
            source,
            store: ListingStore::new(),
            lifecycle: Lifecycle::new(),
            fetch_handle: None,
        }
    }

    /// Issues the one listing request for this mount. `None` when already
    /// mounted.
    fn mount(&mut self) -> Option<Task<Message>> {
        let generation = self.lifecycle.mount()?;
        let source = Arc::clone(&self.source);
        tracing::debug!(generation, source = %source.describe(), "scheduling listing fetch");

        let (task, handle) = Task::perform(
            async move { source.fetch_listing().await },
            move |result| Message::ListingFetched {
                generation,
                result: result.map(Arc::new).map_err(Failure::from),
            },
        )
        .abortable();

        self.fetch_handle = Some(handle.abort_on_drop());
        Some(task)
    }

    fn teardown(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
        }
        self.lifecycle.unmount();
    }
}

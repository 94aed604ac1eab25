use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use panekit::common::config::Config;
use panekit::common::log;
use panekit::geometry::Rect;
use panekit::layout_engine::{
    AdaptionLayout, BorderLayout, HeaderLayout, Layout, LineupLayout, Pane, Region, SplitView,
    WeightedLayout,
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(about = "Print the rects a layout hands to its elements")]
struct Cli {
    /// Configuration file. Built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Width of the container rect.
    #[arg(long, default_value_t = 400.0)]
    width: f64,

    /// Height of the container rect.
    #[arg(long, default_value_t = 300.0)]
    height: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Share the primary axis evenly between `count` elements.
    Adaption {
        #[arg(long, default_value_t = 3)]
        count: usize,
    },
    /// Line up `count` elements of the configured fixed dimension.
    Lineup {
        #[arg(long, default_value_t = 3)]
        count: usize,
    },
    /// Distribute by weight. Negative values are fixed extents.
    Weighted {
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        weights: Vec<f64>,
    },
    /// Split the container in two at `position`.
    Split {
        #[arg(long)]
        position: Option<f64>,
    },
    /// Fill every border region plus the center, then a header layout.
    Border,
}

type Log = Rc<RefCell<Vec<(String, Rect)>>>;

fn recorder(log: &Log, label: impl Into<String>) -> impl FnMut(Rect) + 'static {
    let log = log.clone();
    let label = label.into();
    move |rect| log.borrow_mut().push((label.clone(), rect))
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => Config::read(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    for issue in config.validate() {
        warn!("config: {issue}");
    }
    let fixed = config.auto_fix_values();
    if fixed > 0 {
        warn!(fixed, "adjusted invalid config values");
    }
    Ok(config)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_ref())?;
    let rect = Rect::new(0.0, 0.0, cli.width, cli.height);
    let log: Log = Rc::default();
    info!(?rect, "laying out");

    match cli.command {
        Command::Adaption { count } => {
            let mut layout = AdaptionLayout::from_settings(&config.distribution);
            for i in 0..count {
                layout.append(recorder(&log, format!("element {i}")));
            }
            layout.layout(rect);
        }
        Command::Lineup { count } => {
            let mut layout = LineupLayout::from_settings(&config.distribution);
            for i in 0..count {
                layout.append(recorder(&log, format!("element {i}")));
            }
            layout.layout(rect);
        }
        Command::Weighted { weights } => {
            let mut layout = WeightedLayout::from_settings(&config.distribution);
            for (i, value) in weights.into_iter().enumerate() {
                if value < 0.0 {
                    layout.append_fixed(-value, recorder(&log, format!("fixed {i}")));
                } else {
                    layout.append_weighted(value, recorder(&log, format!("weighted {i}")));
                }
            }
            layout.layout(rect);
        }
        Command::Split { position } => {
            let mut view = SplitView::from_settings(&config.split)
                .with_panes(
                    Pane::element(recorder(&log, "first")),
                    Pane::element(recorder(&log, "second")),
                )
                .on_splitter(recorder(&log, "splitter"));
            if let Some(position) = position {
                if !position.is_finite() {
                    bail!("split position must be a finite number, got {position}");
                }
                view.set_split_pos(position);
            }
            view.layout(rect);
        }
        Command::Border => {
            let mut layout = BorderLayout::from_settings(&config.border);
            for region in Region::ALL {
                layout.set(region, recorder(&log, format!("{region:?}").to_lowercase()));
            }
            layout.layout(rect);

            let mut header = HeaderLayout::new(config.border.header_height)
                .header(recorder(&log, "header"))
                .body(recorder(&log, "body"));
            header.layout(rect);
        }
    }

    for (label, r) in log.borrow().iter() {
        println!("{label:>12}: x={} y={} w={} h={}", r.x, r.y, r.width, r.height);
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    log::init_logging();

    if let Err(err) = run(cli) {
        eprintln!("panekit: {err:#}");
        std::process::exit(1);
    }
}

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use multislider::{DragPhase, MultiSlider, Orientation, ValueLabels};
use tracing::info;

mod scenario;

use scenario::Scenario;

#[derive(Parser)]
#[command(name = "multislider-demo")]
#[command(version, about = "Replay scripted gestures against a multi-thumb slider", long_about = None)]
struct Cli {
    /// Scenario file to replay (defaults to the bundled one)
    scenario: Option<PathBuf>,
    /// Override the track length from the scenario
    #[arg(long)]
    track_length: Option<f32>,
    /// Force vertical layout
    #[arg(long)]
    vertical: bool,
    /// Label the first thumb by its distance from the minimum
    #[arg(long)]
    relative_labels: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut scenario = match &cli.scenario {
        Some(path) => Scenario::from_file(path)?,
        None => Scenario::parse(scenario::BUILTIN)?,
    };
    if let Some(track_length) = cli.track_length {
        scenario.geometry.track_length = track_length;
    }
    if cli.vertical {
        scenario.slider.orientation = Orientation::Vertical;
    }
    if cli.relative_labels {
        scenario.slider.is_value_label_relative = true;
    }

    let mut slider = MultiSlider::new(scenario.slider.clone())
        .with_geometry(scenario.geometry)
        .with_values(&scenario.values)
        .labels(ValueLabels::default().text_for_thumb(|(index, value)| {
            (index == 0).then(|| format!("from {value:.1}"))
        }))
        .on_change(|change| {
            info!(cause = ?change.cause, index = ?change.index, values = ?change.values, "values changed");
        })
        .on_snap_feedback(|feedback| {
            info!(index = feedback.index, value = feedback.value, "snap");
        })
        .on_drag(|phase| match phase {
            DragPhase::Started { index, pointer } => {
                info!(index, x = pointer.x, y = pointer.y, "drag started")
            }
            DragPhase::Ended { index } => info!(index, "drag ended"),
            DragPhase::Cancelled { index } => info!(index, "drag cancelled"),
        });

    for action in scenario.actions {
        action.apply(&mut slider);
    }

    for (index, (label, offset)) in slider
        .value_labels()
        .into_iter()
        .zip(slider.thumb_offsets())
        .enumerate()
    {
        println!("thumb {index}: {label} at {offset:.1}");
    }
    Ok(())
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("error,multislider=info,multislider_demo=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}

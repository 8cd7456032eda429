//! Headless session simulation command.

use std::collections::BTreeMap;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use lumen_core::{PluginKind, Viewport, VisualizerSnapshot};
use lumen_session::{Session, SessionOptions};

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of frames to run (60 frames per simulated second)
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, default_value = "1280x720")]
    viewport: String,

    /// Load this preset before running
    #[arg(long)]
    preset: Option<String>,

    /// Create a sidechain link before running, as FROM:TO
    #[arg(long, value_name = "FROM:TO")]
    sidechain: Option<String>,

    /// Print the final frame's snapshots as JSON
    #[arg(long)]
    json: bool,
}

fn parse_viewport(spec: &str) -> anyhow::Result<Viewport> {
    let (w, h) = spec
        .split_once('x')
        .ok_or_else(|| anyhow::anyhow!("viewport must look like 1280x720, got '{}'", spec))?;
    let width: f32 = w.parse()?;
    let height: f32 = h.parse()?;
    Ok(Viewport::new(width, height))
}

fn parse_kind(id: &str) -> anyhow::Result<PluginKind> {
    PluginKind::from_id(id).ok_or_else(|| anyhow::anyhow!("unknown plugin: {}", id))
}

pub fn run(args: SimulateArgs) -> anyhow::Result<()> {
    let viewport = parse_viewport(&args.viewport)?;
    tracing::debug!(frames = args.frames, viewport = %args.viewport, "starting simulation");
    let mut session = Session::new(SessionOptions::default());

    for kind in PluginKind::ALL {
        session.mount(kind);
    }

    if let Some(name) = &args.preset {
        if session.load_preset(name)? {
            println!("Loaded preset '{}'", name);
        } else {
            println!("Preset '{}' not found, using current settings", name);
        }
    }

    if let Some(link) = &args.sidechain {
        let (from, to) = link
            .split_once(':')
            .ok_or_else(|| anyhow::anyhow!("sidechain must look like reverb:compressor"))?;
        let (from, to) = (parse_kind(from)?, parse_kind(to)?);
        if session.link_sidechain(from, to) {
            println!("Sidechain linked {from} -> {to}");
        } else {
            println!("Sidechain link {from} -> {to} rejected (target already linked)");
        }
    }

    let pb = ProgressBar::new(args.frames);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut transients = 0u64;
    let mut peak_elements: BTreeMap<PluginKind, usize> = BTreeMap::new();
    let mut last_panels: Vec<(PluginKind, VisualizerSnapshot)> = Vec::new();

    for frame in 0..args.frames {
        let output = session.tick(viewport);
        if output.signal.transient {
            transients += 1;
        }
        for (kind, snapshot) in &output.panels {
            let peak = peak_elements.entry(*kind).or_insert(0);
            *peak = (*peak).max(snapshot.element_count());
        }
        last_panels = output.panels;
        pb.set_position(frame + 1);
    }
    pb.finish_with_message("done");

    if args.json {
        let panels: BTreeMap<String, &VisualizerSnapshot> = last_panels
            .iter()
            .map(|(kind, snapshot)| (kind.to_string(), snapshot))
            .collect();
        println!("{}", serde_json::to_string_pretty(&panels)?);
        return Ok(());
    }

    println!();
    println!(
        "Simulated {} frames ({:.1}s), {} transients",
        args.frames,
        args.frames as f64 / 60.0,
        transients
    );
    println!();
    println!("{:12}  {:14}  {}", "Plugin", "Peak elements", "Final state");
    println!("{:12}  {:14}  {}", "------", "-------------", "-----------");
    for (kind, snapshot) in &last_panels {
        let peak = peak_elements.get(kind).copied().unwrap_or(0);
        let state = match snapshot {
            VisualizerSnapshot::Particles { particles, .. } => {
                format!("{} particles live", particles.len())
            }
            VisualizerSnapshot::Pulses { rings, .. } => format!("{} rings live", rings.len()),
            VisualizerSnapshot::Meter {
                gain_reduction_db,
                squeezed,
                ..
            } => format!(
                "{:.1} dB reduction{}",
                gain_reduction_db,
                if *squeezed { " (squeezed)" } else { "" }
            ),
        };
        println!("{:12}  {:14}  {}", kind.to_string(), peak, state);
    }

    Ok(())
}

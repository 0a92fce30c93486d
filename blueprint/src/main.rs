use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use architect_core::{
    AreaTotals, EditSession, HouseLayout, TransformConfig, floor_summaries, grand_total,
    round_area, starter_layout,
};
use blueprint_core::{RenderOptions, render_layout};
use clap::{Parser, Subcommand};

mod gemini;
mod raster;

#[derive(Parser)]
#[command(name = "blueprint", about = "Render and edit multi-floor house layouts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Draw a layout to .svg, .png or .json (scene graph)
    Render {
        output: PathBuf,
        /// Layout JSON; the built-in starter layout when omitted
        #[arg(short, long)]
        layout: Option<PathBuf>,
        /// Drawing surface width in pixels
        #[arg(short, long, default_value_t = 1000.0)]
        width: f64,
    },
    /// List rooms per floor with grouped areas and totals
    Summary {
        #[arg(short, long)]
        layout: Option<PathBuf>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply a natural-language instruction through the transform service
    Edit {
        instruction: String,
        #[arg(short, long)]
        layout: Option<PathBuf>,
        /// Where to write the new layout; stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: String,
        #[arg(long, env = "GEMINI_MODEL", default_value = architect_core::transform::DEFAULT_MODEL)]
        model: String,
    },
    /// Write the built-in starter layout as JSON
    Starter { output: PathBuf },
}

fn load_layout(path: Option<&Path>) -> Result<HouseLayout> {
    match path {
        Some(p) => {
            let txt = fs::read_to_string(p).with_context(|| format!("cannot read {}", p.display()))?;
            HouseLayout::from_json(&txt).with_context(|| format!("{} is not a layout", p.display()))
        }
        None => Ok(starter_layout()),
    }
}

fn render(layout: &HouseLayout, output: &Path, width: f64) -> Result<()> {
    for issue in layout.validate() {
        log::warn!("{issue}");
    }
    let scene = render_layout(layout, &RenderOptions::with_width(width))?;
    let ext = output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "svg" => fs::write(output, scene.to_svg())?,
        "json" => fs::write(output, serde_json::to_string_pretty(&scene)?)?,
        "png" => raster::write_png(
            &scene.to_svg(),
            scene.width.ceil() as u32,
            scene.height.ceil() as u32,
            output,
        )?,
        other => bail!("unsupported output extension '{other}' (use svg, png or json)"),
    }
    log::info!("wrote {}", output.display());
    Ok(())
}

fn summary(layout: &HouseLayout, json: bool) -> Result<()> {
    let floors = floor_summaries(layout);
    let totals = AreaTotals::of(layout);
    if json {
        let v = serde_json::json!({
            "floors": floors,
            "totals": totals,
            "grandTotal": grand_total(layout),
        });
        println!("{}", serde_json::to_string_pretty(&v)?);
        return Ok(());
    }
    println!(
        "Land: {}' x {}'",
        architect_core::fmt_feet(layout.land.width),
        architect_core::fmt_feet(layout.land.height)
    );
    for f in &floors {
        println!("\n{}", f.name.to_uppercase());
        for g in &f.groups {
            println!(
                "  {:<20} {:<22} {:>6} sq ft  {}",
                g.name,
                g.position_text(),
                round_area(g.total_area),
                g.color
            );
        }
    }
    println!("\nMain House (+Garage): {} sqft", round_area(totals.main));
    println!("ADU Unit: {} sqft", round_area(totals.adu));
    println!("Total Gross Area: {} sq ft", architect_core::fmt_feet(grand_total(layout)));
    Ok(())
}

fn edit(
    layout: HouseLayout,
    instruction: &str,
    config: TransformConfig,
    out: Option<&Path>,
) -> Result<()> {
    let client = gemini::GeminiClient::new(config);
    let mut session = EditSession::new(layout);
    session.run(instruction, |l, i| client.transform(l, i))?;
    if let Some(msg) = session.advisory() {
        bail!("{msg}");
    }
    let text = session.layout().to_json_pretty();
    match out {
        Some(p) => {
            fs::write(p, text).with_context(|| format!("cannot write {}", p.display()))?;
            log::info!("wrote {}", p.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Render {
            output,
            layout,
            width,
        } => render(&load_layout(layout.as_deref())?, &output, width),
        Command::Summary { layout, json } => summary(&load_layout(layout.as_deref())?, json),
        Command::Edit {
            instruction,
            layout,
            out,
            api_key,
            model,
        } => {
            let config = TransformConfig::new(api_key).with_model(model);
            edit(load_layout(layout.as_deref())?, &instruction, config, out.as_deref())
        }
        Command::Starter { output } => {
            fs::write(&output, starter_layout().to_json_pretty())?;
            log::info!("wrote {}", output.display());
            Ok(())
        }
    }
}

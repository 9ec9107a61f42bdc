//! Floor-plan renderer CLI.
//!
//! ```text
//! floorplan svg   plan.json -o plan.svg
//! floorplan png   --sample -o plan.png --scale 8
//! floorplan pdf   plan.json -o plan.pdf --margin 30
//! floorplan check plan.json
//! ```

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use floorplan::export::{export_pdf, PageParams, PageSize, RasterParams, Rasterize};
use floorplan::model::{check_plan, report_plan_issues, FloorPlan};
use floorplan::scene::{compose_scene, to_svg, ViewState};
use tracing::info;

#[derive(Parser)]
#[command(name = "floorplan")]
#[command(about = "Render floor-plan JSON to SVG, PNG or PDF")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the interactive vector scene
    Svg {
        #[command(flatten)]
        input: Input,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Room to highlight
        #[arg(long)]
        selected: Option<String>,

        /// Omit the grid backdrop
        #[arg(long)]
        no_background: bool,
    },

    /// Write the wireframe as a PNG image
    Png {
        #[command(flatten)]
        input: Input,

        #[arg(short, long)]
        output: PathBuf,

        /// Pixels per plan unit
        #[arg(long, default_value = "4")]
        scale: u32,

        /// Leave furniture out
        #[arg(long)]
        no_furniture: bool,
    },

    /// Write a single-page PDF
    Pdf {
        #[command(flatten)]
        input: Input,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value = "4")]
        scale: u32,

        /// Page margin in points
        #[arg(long, default_value = "40")]
        margin: f64,

        #[arg(long, value_enum, default_value = "a4")]
        page: PageArg,
    },

    /// Report contract problems in a plan
    Check {
        #[command(flatten)]
        input: Input,
    },
}

#[derive(Args)]
struct Input {
    /// Plan JSON file
    #[arg(required_unless_present = "sample")]
    plan: Option<PathBuf>,

    /// Use the built-in sample plan
    #[arg(long, conflicts_with = "plan")]
    sample: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PageArg {
    A4,
    Letter,
}

impl From<PageArg> for PageSize {
    fn from(arg: PageArg) -> Self {
        match arg {
            PageArg::A4 => PageSize::A4,
            PageArg::Letter => PageSize::LETTER,
        }
    }
}

impl Input {
    fn load(&self) -> Result<FloorPlan, Box<dyn std::error::Error>> {
        match &self.plan {
            Some(path) if !self.sample => {
                let text = std::fs::read_to_string(path)?;
                Ok(FloorPlan::from_json(&text)?)
            }
            _ => Ok(FloorPlan::sample()),
        }
    }

    /// Loads the plan and logs its contract problems once.
    fn load_reported(&self) -> Result<FloorPlan, Box<dyn std::error::Error>> {
        let plan = self.load()?;
        let issues = report_plan_issues(&plan);
        info!(rooms = plan.rooms.len(), issues = issues.len(), "plan loaded");
        Ok(plan)
    }
}

fn write(path: &Path, bytes: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(path, bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "written");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Default: WARN for everything, INFO for floorplan.
    // Override with RUST_LOG (e.g. RUST_LOG=floorplan=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("floorplan=info".parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Svg {
            input,
            output,
            selected,
            no_background,
        } => {
            let plan = input.load_reported()?;
            let view = ViewState {
                selected_room_id: selected,
                show_background: !no_background,
            };
            let svg = to_svg(&compose_scene(&plan, &view));
            write(&output, svg.as_bytes())?;
        }
        Commands::Png {
            input,
            output,
            scale,
            no_furniture,
        } => {
            let plan = input.load_reported()?;
            let scene = compose_scene(&plan, &ViewState::default());
            let raster = RasterParams {
                scale,
                include_furniture: !no_furniture,
            };
            let png = Rasterize::new(&scene, raster).execute()?.to_png()?;
            write(&output, &png)?;
        }
        Commands::Pdf {
            input,
            output,
            scale,
            margin,
            page,
        } => {
            let plan = input.load_reported()?;
            let scene = compose_scene(&plan, &ViewState::default());
            let raster = RasterParams {
                scale,
                include_furniture: true,
            };
            let params = PageParams {
                page: page.into(),
                margin,
            };
            let pdf = export_pdf(&scene, &plan, raster, &params)?;
            write(&output, &pdf)?;
        }
        Commands::Check { input } => {
            let plan = input.load()?;
            let issues = check_plan(&plan);
            println!("{} room(s), {} issue(s)", plan.rooms.len(), issues.len());
            for issue in &issues {
                println!("  {issue}");
            }
        }
    }

    Ok(())
}

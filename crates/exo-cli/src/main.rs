use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use exo_data::{ArchiveQuery, PipelineConfig, SceneSummary};
use exo_core::scale::ValueRange;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "exo")]
#[command(about = "Generate scaled exoplanet data for visualization")]
struct Cli {
    /// Pipeline configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Upper bound of the scaled system distance (overrides config)
    #[arg(long, global = true)]
    distance_scale: Option<f64>,

    /// Upper bound of the compressed stellar radius (overrides config)
    #[arg(long, global = true)]
    radius_scale: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate scaled data from a local CSV file
    Local {
        /// Input CSV filename
        input_csv: PathBuf,
        /// Output CSV filename
        output_csv: PathBuf,
    },

    /// Generate scaled data from the NASA Exoplanet Archive
    Api {
        /// Output CSV filename
        output_csv: PathBuf,
        /// Archive table to query
        #[arg(long, default_value = "ps")]
        table: String,
    },

    /// Print extents of a generated scene file
    Inspect {
        /// Scene CSV filename
        scene_csv: PathBuf,
    },
}

impl Cli {
    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if let Some(s) = self.distance_scale { config.distance_scale = s; }
        if let Some(s) = self.radius_scale { config.radius_scale = s; }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = cli.pipeline_config()?;
    tracing::debug!("Pipeline config: {:?}", config);

    match cli.command {
        Commands::Local { input_csv, output_csv } => {
            let manifest = exo_data::generate_from_local_csv(&input_csv, &output_csv, &config)?;
            tracing::info!("{} systems written", manifest.row_count);
            println!("Generated CSV from local data ready for blender at {}", output_csv.display());
        }

        Commands::Api { output_csv, table } => {
            let query = ArchiveQuery::for_table(table);
            let manifest = exo_data::generate_from_archive(&query, &output_csv, &config).await?;
            tracing::info!("{} systems written", manifest.row_count);
            println!("Generated CSV from API data ready for blender at {}", output_csv.display());
        }

        Commands::Inspect { scene_csv } => {
            let manifest_path = exo_data::SceneManifest::path_for(&scene_csv);
            if manifest_path.exists() {
                let manifest = exo_data::SceneManifest::load(&manifest_path)?;
                manifest.check_columns()?;
                println!("Source:  {}", manifest.source);
                println!("Scales:  distance {}, radius {}",
                    manifest.config.distance_scale, manifest.config.radius_scale);
            }

            let records = exo_data::read_scene_csv(&scene_csv)
                .with_context(|| format!("Failed to read scene: {}", scene_csv.display()))?;
            let summary = SceneSummary::from_records(&records);

            println!("Systems: {}", summary.systems);
            println!("{:<8} {:>15} {:>15}", "Column", "Min", "Max");
            for (name, range) in [
                ("x", summary.x),
                ("y", summary.y),
                ("z", summary.z),
                ("sy_dist", summary.sy_dist),
                ("st_rad", summary.st_rad),
            ] {
                print_range(name, range);
            }
        }
    }

    Ok(())
}

fn print_range(name: &str, range: Option<ValueRange>) {
    match range {
        Some(r) => println!("{:<8} {:>15.4} {:>15.4}", name, r.min, r.max),
        None => println!("{:<8} {:>15} {:>15}", name, "NaN", "NaN"),
    }
}

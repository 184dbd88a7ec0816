use std::path::PathBuf;

use anyhow::Result;
use badge_core::{BadgePreset, LayoutConfig, LayoutStrategy};
use badge_render::OutputFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};

mod commands;
mod job;

#[derive(Parser)]
#[command(name = "badge-sheet")]
#[command(about = "Lay out circular badges on printable sheets")]
#[command(version)]
#[command(long_about = "
Places circular badge images on fixed-size sheets, splits them over as many
pages as needed and renders previews or print-ready files.

Examples:
  badge-sheet layout job.json
  badge-sheet preview job.json preview/ --dpi 96
  badge-sheet export job.json badges.pdf
  badge-sheet export job.json sheet.png --strategy grid --spacing-mm 2
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub overrides: Overrides,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print capacity, grid shape and page breakdown
    Layout {
        /// Job file (JSON)
        job: PathBuf,

        /// Print the full placement plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render one PNG per page with margin and slot guides
    Preview {
        job: PathBuf,

        /// Directory for page-1.png, page-2.png, ...
        out_dir: PathBuf,

        #[arg(long, default_value_t = 96.0)]
        dpi: f64,
    },

    /// Render print-resolution output
    Export {
        job: PathBuf,

        /// Output file; multi-page PNG/JPEG exports get a -pN suffix per page
        output: PathBuf,

        /// Output format (taken from the extension when omitted)
        #[arg(long)]
        format: Option<FormatArg>,
    },
}

/// Command line settings that win over the job file.
#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Layout strategy: grid or compact
    #[arg(long, global = true)]
    pub strategy: Option<LayoutStrategy>,

    /// Gap between neighbouring badges
    #[arg(long, global = true)]
    pub spacing_mm: Option<f64>,

    /// Sheet margin (clamped to 5..30 mm)
    #[arg(long, global = true)]
    pub margin_mm: Option<f64>,

    /// Start from a preset badge size: small, standard or large
    #[arg(long, global = true)]
    pub preset: Option<BadgePreset>,

    /// Visible badge diameter (clamped to 10..100 mm)
    #[arg(long, global = true)]
    pub badge_mm: Option<f64>,

    /// Bleed on each side of the badge (clamped to 0..10 mm)
    #[arg(long, global = true)]
    pub bleed_mm: Option<f64>,
}

impl Overrides {
    pub fn apply(&self, mut config: LayoutConfig) -> LayoutConfig {
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(spacing) = self.spacing_mm {
            config.spacing_mm = spacing;
        }
        if let Some(margin) = self.margin_mm {
            config.sheet = config.sheet.with_margin(margin);
        }
        if let Some(preset) = self.preset {
            config.badge = preset.badge();
        }
        if let Some(badge) = self.badge_mm {
            config.badge = config.badge.with_badge_mm(badge);
        }
        if let Some(bleed) = self.bleed_mm {
            config.badge = config.badge.with_bleed_mm(bleed);
        }
        config
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Pdf,
    Png,
    #[value(alias = "jpeg")]
    Jpg,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Pdf => OutputFormat::Pdf,
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Jpg => OutputFormat::Jpg,
        }
    }
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Layout { job, json } => commands::layout::execute(&job, &cli.overrides, json),
        Commands::Preview { job, out_dir, dpi } => {
            commands::preview::execute(&job, &cli.overrides, &out_dir, dpi)
        }
        Commands::Export {
            job,
            output,
            format,
        } => commands::export::execute(&job, &cli.overrides, &output, format.map(Into::into)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_clamp_and_preset_comes_before_sizes() {
        let o = Overrides {
            strategy: Some(LayoutStrategy::Grid),
            margin_mm: Some(1.0),
            preset: Some(BadgePreset::Large),
            bleed_mm: Some(2.0),
            ..Overrides::default()
        };
        let cfg = o.apply(LayoutConfig::default());
        assert_eq!(cfg.strategy, LayoutStrategy::Grid);
        assert_eq!(cfg.sheet.margin_mm, 5.0);
        assert_eq!(cfg.badge.badge_mm, 75.0);
        assert_eq!(cfg.badge.diameter_mm(), 79.0);
    }

    #[test]
    fn no_overrides_keep_the_job_config() {
        let cfg = LayoutConfig::default().with_spacing(1.5);
        assert_eq!(Overrides::default().apply(cfg), cfg);
    }

    #[test]
    fn cli_parses_global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from([
            "badge-sheet",
            "export",
            "job.json",
            "out.pdf",
            "--strategy",
            "hex",
            "--spacing-mm",
            "2",
            "--format",
            "jpeg",
        ])
        .unwrap();
        assert_eq!(cli.overrides.strategy, Some(LayoutStrategy::Compact));
        assert_eq!(cli.overrides.spacing_mm, Some(2.0));
        assert!(matches!(cli.command, Commands::Export { format: Some(FormatArg::Jpg), .. }));
    }

    #[test]
    fn preset_parses_by_name() {
        let cli = Cli::try_parse_from(["badge-sheet", "layout", "job.json", "--preset", "small"]).unwrap();
        assert_eq!(cli.overrides.preset, Some(BadgePreset::Small));
        assert!(Cli::try_parse_from(["badge-sheet", "layout", "job.json", "--preset", "huge"]).is_err());
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

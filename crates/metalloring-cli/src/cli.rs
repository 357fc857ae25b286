use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

const ANALYZE_AFTER_HELP: &str = "\
Examples:
  Two rings (metallocene):
    metalloring analyze ferrocene.xyz --ring1 1 2 3 4 5 --ring2 6 7 8 9 10 --metal1 11

  Three rings (inverse sandwich):
    metalloring analyze inverse.xyz --ring1 1 2 3 4 5 --ring2 6 7 8 9 10 \\
        --ring3 11 12 13 14 15 --metal1 16 --metal2 17

Notes:
  - Atom indices are 1-based and rings must have 5 or 6 atoms.
  - With three rings, metal1 is always the metal nearer to the ring1 centroid,
    whichever order the metals are given in.
  - Middle-ring (ring2) indices must be listed in bonding order around the ring;
    torsions are taken over consecutive members.";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "metalloring - ring centroid, distance, angle and torsion analysis for metallocene and inverse sandwich complexes.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used when analyzing several input files.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Place dummy atoms at ring centroids and report distances, angles and middle-ring torsions.
    #[command(after_help = ANALYZE_AFTER_HELP)]
    Analyze(AnalyzeArgs),
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    // --- Core Arguments ---
    /// Input XYZ file(s). Several files (e.g., conformers) share the same atom groups.
    #[arg(required = true, value_name = "XYZ")]
    pub inputs: Vec<PathBuf>,

    /// Output XYZ file. Defaults to the input name with '_analyzed' appended
    /// (m.xyz -> m_analyzed.xyz). Only allowed with a single input.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Atom Groups ---
    /// Atom numbers (1-based) of the first ring (5 or 6 atoms).
    #[arg(long, num_args = 1.., value_name = "N")]
    pub ring1: Option<Vec<usize>>,

    /// Atom numbers (1-based) of the second ring (5 or 6 atoms), in bonding order.
    #[arg(long, num_args = 1.., value_name = "N")]
    pub ring2: Option<Vec<usize>>,

    /// Atom numbers (1-based) of the third ring (5 or 6 atoms). Requires --metal2.
    #[arg(long, num_args = 1.., value_name = "N")]
    pub ring3: Option<Vec<usize>>,

    /// Atom number (1-based) of the first metal.
    #[arg(long, value_name = "N")]
    pub metal1: Option<usize>,

    /// Atom number (1-based) of the second metal. Requires --ring3.
    #[arg(long, value_name = "N")]
    pub metal2: Option<usize>,

    // --- Analysis Overrides ---
    /// Override the maximum distance (Å) for reporting a middle-ring bond.
    #[arg(short = 'b', long, value_name = "FLOAT")]
    pub bond_cutoff: Option<f64>,

    /// Override the symbol used for centroid dummy atoms.
    #[arg(long, value_name = "SYMBOL")]
    pub dummy_label: Option<String>,

    /// Skip the middle-ring torsion angles.
    #[arg(long)]
    pub no_dihedrals: bool,

    /// Also write the report(s) as JSON to this path.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S geometry.bond-cutoff=2.0
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

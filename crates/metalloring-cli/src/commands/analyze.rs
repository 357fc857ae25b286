use crate::cli::AnalyzeArgs;
use crate::config::{PartialAnalysisConfig, RunConfig};
use crate::error::{CliError, Result};
use metalloring::{
    core::io::{
        traits::MolecularFile,
        xyz::{XyzFile, XyzMetadata},
    },
    engine::{report::Report, topology::RoleAssignment},
    workflows,
};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// One successfully analyzed input, as written to the JSON report.
#[derive(Debug, Serialize)]
pub struct AnalyzedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Symbol written for the centroid dummy atoms.
    pub dummy_label: String,
    pub report: Report,
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    if args.output.is_some() && args.inputs.len() > 1 {
        return Err(CliError::Argument(format!(
            "--output names a single file but {} inputs were given; omit it to use '<input>_analyzed' names.",
            args.inputs.len()
        )));
    }

    info!("Merging configuration from file and CLI arguments...");
    let config = PartialAnalysisConfig::load(&args)?.merge_with_cli(&args)?;
    let roles = role_assignment(&args);

    info!("Analyzing {} input file(s)...", args.inputs.len());
    let outcomes: Vec<Result<AnalyzedFile>> = args
        .inputs
        .par_iter()
        .map(|input| {
            let output = args
                .output
                .clone()
                .unwrap_or_else(|| default_output_path(input));
            analyze_file(input, &output, roles.clone(), &config)
        })
        .collect();

    let total = outcomes.len();
    let mut analyzed = Vec::with_capacity(total);
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(file) => {
                print!("{}", file);
                analyzed.push(file);
            }
            Err(e) => failures.push(e),
        }
    }

    // main prints a lone failure; several are listed here and summarized.
    match failures.len() {
        0 => {}
        1 => return Err(failures.remove(0)),
        failed => {
            for e in &failures {
                error!("{}", e);
                eprintln!("Error: {}", e);
            }
            return Err(CliError::Batch { failed, total });
        }
    }

    if let Some(report_path) = &args.report {
        write_json_report(&analyzed, report_path)?;
        println!("Report written to '{}'.", report_path.display());
    }

    Ok(())
}

fn role_assignment(args: &AnalyzeArgs) -> RoleAssignment {
    RoleAssignment {
        ring1: args.ring1.clone(),
        ring2: args.ring2.clone(),
        ring3: args.ring3.clone(),
        metal1: args.metal1,
        metal2: args.metal2,
    }
}

fn analyze_file(
    input: &Path,
    output: &Path,
    roles: RoleAssignment,
    config: &RunConfig,
) -> Result<AnalyzedFile> {
    info!("Loading input structure from {:?}", input);
    let (structure, _) =
        XyzFile::read_from_path(input).map_err(|e| CliError::parsing(input, e))?;

    let resolution = workflows::analyze::run(&structure, roles, &config.analysis).map_err(
        |source| CliError::Analysis {
            path: input.to_path_buf(),
            source,
        },
    )?;

    let metadata = XyzMetadata {
        comment: config.comment.clone(),
    };
    info!("Writing augmented structure to {:?}", output);
    XyzFile::write_to_path(&resolution.augmented, &metadata, output).map_err(|e| {
        CliError::FileWriting {
            path: output.to_path_buf(),
            source: e.into(),
        }
    })?;

    Ok(AnalyzedFile {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        dummy_label: config.analysis.dummy_label.clone(),
        report: resolution.report,
    })
}

/// `m.xyz` becomes `m_analyzed.xyz` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{}_analyzed", stem);
    if let Some(ext) = input.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    input.with_file_name(name)
}

impl fmt::Display for AnalyzedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = &self.report;

        writeln!(f, "== {} ==", self.input.display())?;
        for ring in &report.rings {
            writeln!(f, "{} detected as a {}-membered ring.", ring.name, ring.size)?;
        }
        for ring in &report.rings {
            let [x, y, z] = ring.centroid;
            writeln!(
                f,
                "{} ({}) centroid: {:.4}, {:.4}, {:.4}",
                ring.name, ring.centroid_label, x, y, z
            )?;
        }
        writeln!(
            f,
            "Added {} dummy atoms ('{}') at ring centroids.",
            report.rings.len(),
            self.dummy_label
        )?;
        if report.metals.swapped {
            writeln!(
                f,
                "Note: Swapped metal1 and metal2 so that metal1 ({}) is the one nearer to the ring1 centroid.",
                report.metals.metal1
            )?;
        }
        for entry in &report.entries {
            writeln!(f, "{}", entry)?;
        }
        writeln!(
            f,
            "Modified structure with {} dummy atoms saved to '{}'.",
            report.rings.len(),
            self.output.display()
        )
    }
}

fn write_json_report(analyzed: &[AnalyzedFile], path: &Path) -> Result<()> {
    info!("Writing JSON report to {:?}", path);
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, analyzed).map_err(|e| CliError::FileWriting {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

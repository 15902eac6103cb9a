use super::commands::{self, plot::ArtifactSource, plot::Mode};
use clap::Parser;
use plddt_pymol::PymolPainter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "plddt-analyser",
    author,
    version,
    about = "Plots per-residue confidence (pLDDT) of structure predictions",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// path to pdb file - generates pLDDT coloured structure
    #[arg(short, long, value_parser = pdb_file)]
    pdb: Option<PathBuf>,

    /// path to a single pkl file - plots only this prediction
    #[arg(short = 'l', long, value_parser = pkl_file)]
    pkl: Option<PathBuf>,

    /// directory searched recursively for pkl files
    #[arg(
        short = 'd',
        long,
        alias = "pkl_dir",
        default_value = "./plddt_analysis_target/"
    )]
    pkl_dir: PathBuf,

    /// directory to store all generated outputs
    #[arg(short, long)]
    output: PathBuf,

    /// overlap every model on a single pLDDT plot
    #[arg(long)]
    overlapped: bool,

    /// also write the pLDDT color legend
    #[arg(long)]
    legend: bool,

    /// PyMOL executable used with --pdb
    #[arg(long, default_value = "pymol")]
    pymol: PathBuf,
}

fn with_suffix(value: &str, suffix: &str, flag: &str) -> Result<PathBuf, String> {
    if value.ends_with(suffix) {
        Ok(PathBuf::from(value))
    } else {
        Err(format!("{flag} requires {} file as input", &suffix[1..]))
    }
}

fn pdb_file(value: &str) -> Result<PathBuf, String> {
    with_suffix(value, ".pdb", "--pdb")
}

fn pkl_file(value: &str) -> Result<PathBuf, String> {
    with_suffix(value, ".pkl", "--pkl")
}

impl Cli {
    pub fn execute(self) -> anyhow::Result<()> {
        match &self.pdb {
            Some(structure) => {
                commands::paint::execute(&PymolPainter::new(&self.pymol), structure, &self.output);
            }
            None => {
                tracing::info!("no pdb file provided, skipping pLDDT structure visualisation");
            }
        }

        if self.legend {
            commands::legend::execute(&self.output)?;
        }

        let source = match self.pkl {
            Some(pkl) => ArtifactSource::Single(pkl),
            None => ArtifactSource::Directory(self.pkl_dir),
        };
        let mode = if self.overlapped {
            Mode::Overlapped
        } else {
            Mode::PerModel
        };
        commands::plot::execute(&source, &self.output, mode)?;

        tracing::info!("all processes finished, shutting down");
        Ok(())
    }
}

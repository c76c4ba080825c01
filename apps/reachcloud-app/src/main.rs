//! Reachability pose-cloud generator CLI.
//!
//! Provides two modes of operation:
//! - `generate`: Sample random joint configurations of a URDF model and
//!   write the resulting pose cloud as a PCD v0.7 ASCII record
//! - `info`: Print a summary of the parsed kinematic model

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use reachcloud_cloud::{CloudConfig, ConfigError, ReachabilitySampler, pcd};
use reachcloud_kinematics::{JointMotion, KinematicState, KinematicTree, KinematicsError};
use reachcloud_urdf::{
    DescriptionResolver, PlainFileResolver, ResolutionError, RobotModel, UrdfError, XacroResolver,
};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Reachability pose-cloud generator.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample random configurations and write a PCD pose cloud.
    Generate {
        /// Robot description file (URDF, or xacro with --xacro).
        urdf: PathBuf,

        /// Link whose global pose is sampled.
        #[arg(short, long)]
        link: Option<String>,

        /// Number of configurations to draw.
        #[arg(short = 'n', long)]
        samples: Option<usize>,

        /// Output path; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed for a reproducible cloud.
        #[arg(long)]
        seed: Option<u64>,

        /// TOML configuration file; flags override its values.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Expand the description with xacro before parsing.
        #[arg(long)]
        xacro: bool,
    },

    /// Print a summary of the kinematic model.
    Info {
        /// Robot description file (URDF, or xacro with --xacro).
        urdf: PathBuf,

        /// Expand the description with xacro before parsing.
        #[arg(long)]
        xacro: bool,
    },
}

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

/// Top-level error type surfaced at the process boundary.
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("description resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("URDF error: {0}")]
    Urdf(#[from] UrdfError),

    #[error("kinematics error: {0}")]
    Kinematics(#[from] KinematicsError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn load_model(path: &Path, force_xacro: bool) -> Result<RobotModel, AppError> {
    let is_xacro = force_xacro || path.extension().is_some_and(|ext| ext == "xacro");
    let xml = if is_xacro {
        XacroResolver::new().resolve(path)?
    } else {
        PlainFileResolver.resolve(path)?
    };
    Ok(reachcloud_urdf::parse_string(&xml)?)
}

#[allow(clippy::too_many_arguments)]
fn run_generate(
    urdf: &Path,
    link: Option<String>,
    samples: Option<usize>,
    output: Option<PathBuf>,
    seed: Option<u64>,
    config: Option<PathBuf>,
    xacro: bool,
) -> Result<(), AppError> {
    let mut cfg = match config {
        Some(path) => CloudConfig::from_file(path)?,
        None => CloudConfig::default(),
    };
    if let Some(link) = link {
        cfg.link_name = link;
    }
    if let Some(n) = samples {
        cfg.sample_count = n;
    }
    if let Some(s) = seed {
        cfg.seed = Some(s);
    }
    if let Some(path) = output {
        cfg.output = Some(path);
    }
    cfg.validate()?;

    let model = load_model(urdf, xacro)?;
    let tree = KinematicTree::from_model(&model)?;
    let mut state = KinematicState::new(tree);

    let mut rng = match cfg.seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };

    let sampler = ReachabilitySampler::from_config(&cfg);
    let samples = sampler.sample(&mut state, &mut rng)?;

    // The writer never flushes or closes; the sink is scoped here so the
    // record hits disk on every exit path that returns Ok.
    match &cfg.output {
        Some(path) => {
            let mut sink = BufWriter::new(File::create(path)?);
            pcd::write_ascii(&samples, &mut sink)?;
            sink.flush()?;
            eprintln!("wrote {} samples to {}", samples.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut sink = stdout.lock();
            pcd::write_ascii(&samples, &mut sink)?;
            sink.flush()?;
        }
    }

    Ok(())
}

fn run_info(urdf: &Path, xacro: bool) -> Result<(), AppError> {
    let model = load_model(urdf, xacro)?;
    let tree = KinematicTree::from_model(&model)?;

    println!("model: {}", model.name);
    println!("root link: {}", model.root_link);
    println!("links: {}", tree.num_links());
    println!("joints: {} ({} actuated)", model.joints.len(), tree.dof());
    println!("actuated joints:");
    for joint in tree.joints() {
        if joint.motion != JointMotion::Fixed {
            println!(
                "  {}  [{:.3}, {:.3}]",
                joint.name, joint.lower_limit, joint.upper_limit
            );
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            urdf,
            link,
            samples,
            output,
            seed,
            config,
            xacro,
        } => run_generate(&urdf, link, samples, output, seed, config, xacro),
        Commands::Info { urdf, xacro } => run_info(&urdf, xacro),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

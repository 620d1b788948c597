mod cli;

use clap::{Parser, Subcommand};
use std::io;
use std::process::ExitCode;

use cli::{write_trajectory, Format, OrbitFile};
use groundtrack::trajectory::build_trajectory;

#[derive(Parser)]
#[command(name = "groundtrack")]
#[command(about = "Ground tracks from Keplerian orbital elements")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an orbit file and print the orbit summary
    Validate { orbit: String },
    /// Propagate one orbital period and print the ground track
    Track {
        orbit: String,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Print latitude and longitude in degrees instead of radians
        #[arg(long)]
        degrees: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { orbit } => validate(&orbit),
        Commands::Track {
            orbit,
            format,
            degrees,
        } => track(&orbit, format, degrees),
    }
}

fn load(path: &str) -> Option<OrbitFile> {
    match OrbitFile::from_file(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            None
        }
    }
}

fn validate(path: &str) -> ExitCode {
    let Some(file) = load(path) else {
        return ExitCode::FAILURE;
    };

    let (elements, earth, settings) = match file.resolve() {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("Invalid orbit file: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = elements.validate() {
        eprintln!("Invalid orbit: {}", e);
        return ExitCode::FAILURE;
    }
    if let Err(e) = settings.validate() {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let radius = earth.equatorial_radius();
    println!(
        "Orbit is valid{}",
        file.name
            .as_deref()
            .map(|n| format!(" ({})", n))
            .unwrap_or_default()
    );
    println!("  epoch:    {} ({} frame)", elements.epoch, elements.frame);
    println!("  period:   {:.1} s", elements.period());
    println!(
        "  perigee:  {:.1} km altitude",
        (elements.perigee_radius() - radius) / 1000.0
    );
    println!(
        "  apogee:   {:.1} km altitude",
        (elements.apogee_radius() - radius) / 1000.0
    );
    println!(
        "  sampling: {:?} step, {:?} output interval",
        settings.step, settings.output_interval
    );
    ExitCode::SUCCESS
}

fn track(path: &str, format: Format, degrees: bool) -> ExitCode {
    let Some(file) = load(path) else {
        return ExitCode::FAILURE;
    };

    let (elements, earth, settings) = match file.resolve() {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("Invalid orbit file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let trajectory = match build_trajectory(&elements, &earth, &settings) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Propagation failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = write_trajectory(
        &mut stdout,
        &trajectory,
        file.name.as_deref(),
        format,
        degrees,
    ) {
        eprintln!("Error writing output: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

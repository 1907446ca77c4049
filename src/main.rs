use chairs::{
    parser::{self, ParseError},
    problem::{sample_instances, NamedProblem},
    solvers::{self, SimulationConfig, TieBreak},
};
use log::{info, warn};
use std::{fs::File, io::BufReader, path::PathBuf, process::ExitCode};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "chairs")]
struct Opt {
    /// Process departures before arrivals at the same instant.
    #[structopt(long)]
    departures_first: bool,

    /// Simulation config JSON file.
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Print and verify every guest's chair, not only the target's.
    #[structopt(short, long)]
    all: bool,

    /// Log each seating step.
    #[structopt(short, long)]
    trace: bool,

    /// Print timing.
    #[structopt(long)]
    profile: bool,

    /// Also run the built-in sample instances.
    #[structopt(long)]
    builtin: bool,

    /// Instance files (.json or text).
    #[structopt(name = "FILE", parse(from_os_str))]
    files: Vec<PathBuf>,
}

fn load_config(opt: &Opt) -> Result<SimulationConfig, ParseError> {
    let mut config = match &opt.config {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => SimulationConfig::default(),
    };
    if opt.departures_first {
        config.tie_break = TieBreak::DeparturesFirst;
    }
    Ok(config)
}

fn run_instance(opt: &Opt, config: &SimulationConfig, instance: &NamedProblem) -> bool {
    let trace = |d: chairs::debug::DebugInfo| {
        if opt.trace {
            info!("{}: step {} {} ({} free)", instance.name, d.step, d.action, d.free_chairs);
        }
    };

    match solvers::seat_target_debug(&instance.problem, instance.target, config, trace) {
        Ok(chair) => {
            let chair = chair.map(|c| usize::from(c) as i64).unwrap_or(-1);
            println!("{}: chair {}", instance.name, chair);
        }
        Err(e) => {
            warn!("{}: {}", instance.name, e);
            println!("{}: error: {}", instance.name, e);
            return false;
        }
    }

    if opt.all {
        let plan = match solvers::seat_all(&instance.problem, config) {
            Ok(plan) => plan,
            Err(e) => {
                println!("{}: error: {}", instance.name, e);
                return false;
            }
        };
        for (guest, chair) in plan.chairs.iter_enumerated() {
            println!("  {} -> {}", guest, chair);
        }
        match instance.problem.verify_seating(&plan) {
            Ok(used) => println!(
                "  {} chairs used, peak occupancy {}, lower bound {}",
                used,
                plan.peak_occupancy,
                instance.problem.peak_occupancy()
            ),
            Err(e) => {
                println!("{}: seating conflict: {}", instance.name, e);
                return false;
            }
        }
    }
    true
}

fn print_timing(opt: &Opt) {
    if opt.profile {
        hprof::profiler().print_timing();
    }
}

pub fn main() -> ExitCode {
    pretty_env_logger::init();
    let opt = Opt::from_args();
    info!("{:?}", opt);

    let config = match load_config(&opt) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Could not load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if opt.files.is_empty() && !opt.builtin {
        eprintln!("No input files specified");
        return ExitCode::FAILURE;
    }

    let mut ok = true;
    if opt.builtin {
        for instance in sample_instances() {
            hprof::start_frame();
            ok &= run_instance(&opt, &config, &instance);
            print_timing(&opt);
        }
    }

    for file in opt.files.iter() {
        hprof::start_frame();
        info!("Solving {}", file.to_string_lossy());
        match parser::read_file(file) {
            Ok(instance) => ok &= run_instance(&opt, &config, &instance),
            Err(e) => {
                println!("{}: error: {}", file.to_string_lossy(), e);
                ok = false;
            }
        }
        print_timing(&opt);
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

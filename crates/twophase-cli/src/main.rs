use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use twophase_solver::{Direction, Problem, SolveError, Solver, StandardForm};

#[derive(Parser)]
#[command(name = "twophase")]
#[command(about = "Solve linear programs with the tableau simplex method", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem file and output the optimal solution
    Solve {
        /// The JSON problem file
        file: PathBuf,
        /// Output format (json, pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
        /// Print the final tableau
        #[arg(short, long)]
        tableau: bool,
        /// Always run phase 1, even from a feasible basis
        #[arg(long)]
        two_phase: bool,
        /// Maximum pivots per phase
        #[arg(long, default_value_t = 10000)]
        max_iterations: usize,
        /// Tolerance for floating point comparisons
        #[arg(long, default_value_t = 1e-9)]
        tolerance: f64,
    },
    /// Print the standard-form tableau of a problem file
    StandardForm {
        /// The JSON problem file
        file: PathBuf,
    },
    /// Check a problem file for errors
    Check {
        /// The file to check
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Solve {
            file,
            format,
            tableau,
            two_phase,
            max_iterations,
            tolerance,
        } => {
            let problem = load_problem(&file);
            let solver = Solver::new()
                .with_max_iterations(max_iterations)
                .with_tolerance(tolerance);

            let result = if two_phase {
                solver.solve_two_phase(&problem)
            } else {
                solver.solve(&problem)
            };

            if format == "json" {
                let out = match &result {
                    Ok(solution) => serde_json::json!({
                        "status": "optimal",
                        "objective_value": solution.objective_value,
                        "values": solution.values,
                    }),
                    Err(e) => serde_json::json!({
                        "status": status_name(e),
                        "message": e.to_string(),
                    }),
                };
                println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
                if result.is_err() {
                    std::process::exit(1);
                }
                return;
            }

            match result {
                Ok(solution) => {
                    println!("Status: OPTIMAL");
                    let direction = match problem.direction {
                        Direction::Maximize => "max",
                        Direction::Minimize => "min",
                    };
                    println!("Objective ({}): {:.6}", direction, solution.objective_value);
                    println!();
                    println!("Variables:");
                    for (i, value) in solution.values.iter().enumerate() {
                        println!("  x{:<4} {:12.6}", i + 1, value);
                    }

                    let violations = solution.violations(&problem, tolerance.max(1e-6));
                    if !violations.is_empty() {
                        println!();
                        println!("Warning: solution does not satisfy every constraint:");
                        for v in &violations {
                            println!("  - {}", v.description);
                        }
                    }

                    if tableau {
                        println!();
                        println!("Final tableau:");
                        print!("{}", solution.tableau);
                    }
                }
                Err(e) => {
                    println!("Status: {}", status_name(&e).to_uppercase());
                    println!("{}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::StandardForm { file } => {
            let problem = load_problem(&file);
            if let Err(e) = problem.validate() {
                eprintln!("Invalid problem: {}", e);
                std::process::exit(1);
            }

            let sf = StandardForm::build(&problem);
            print!("{}", sf.tableau);
            if !sf.free_variables.is_empty() {
                println!();
                println!("Free variable splits at columns: {:?}", sf.free_variables.positions());
            }
        }
        Commands::Check { file } => {
            let problem = load_problem(&file);
            match problem.validate() {
                Ok(()) => {
                    println!("✓ {} is valid", file.display());
                    println!("  {} variables ({} free)", problem.num_variables(), problem.num_free_variables());
                    println!("  {} constraints", problem.num_constraints());
                }
                Err(e) => {
                    eprintln!("✗ {} has errors:", file.display());
                    eprintln!("  {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_problem(file: &Path) -> Problem {
    let source = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    };

    match serde_json::from_str(&source) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            std::process::exit(1);
        }
    }
}

fn status_name(e: &SolveError) -> &'static str {
    match e {
        SolveError::Unbounded => "unbounded",
        SolveError::Infeasible => "infeasible",
        SolveError::IterationLimitExceeded { .. } => "iteration_limit",
        SolveError::InvalidProblem(_) => "invalid",
    }
}

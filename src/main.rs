use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use task_match::assign::AssignmentEngine;
use task_match::catalog::Task;
use task_match::scoring::Accumulation;

const EXIT_SUCCESS: i32 = 0;
const EXIT_CATALOG: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_OUTPUT: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assign every task to a volunteer (default if no subcommand)
    Assign,
    /// List tasks in the order they are assigned
    Order,
    /// List volunteers interested in a task
    Interested {
        /// Task id as it appears in the task catalog
        task_id: u64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Format {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "task-match")]
#[command(about = "Match tasks to volunteers, most wanted first", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/task-match/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Task catalog file, overrides the config
    #[arg(long, global = true)]
    tasks: Option<PathBuf>,

    /// Volunteer catalog file, overrides the config
    #[arg(long, global = true)]
    volunteers: Option<PathBuf>,

    /// Score each task on its own interest instead of the running total
    #[arg(long, global = true)]
    per_task: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Table)]
    format: Format,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Assign);
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match task_match::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        eprintln!("{}", config.source_description());
    }

    let Some(tasks_path) = cli.tasks.or(config.tasks) else {
        eprintln!("No task catalog given. Pass --tasks or set `tasks:` in the config file.");
        std::process::exit(EXIT_CONFIG);
    };
    let Some(volunteers_path) = cli.volunteers.or(config.volunteers) else {
        eprintln!(
            "No volunteer catalog given. Pass --volunteers or set `volunteers:` in the config file."
        );
        std::process::exit(EXIT_CONFIG);
    };

    let mut scoring = config.scoring.unwrap_or_default();
    if cli.per_task {
        scoring.accumulation = Some(Accumulation::PerTask);
    }

    let mut engine: AssignmentEngine = AssignmentEngine::new().with_scoring(scoring);

    if let Err(e) = engine.import_tasks_from_file(&tasks_path) {
        eprintln!("Catalog error: {:#}", e);
        std::process::exit(EXIT_CATALOG);
    }
    if let Err(e) = engine.import_volunteers_from_file(&volunteers_path) {
        eprintln!("Catalog error: {:#}", e);
        std::process::exit(EXIT_CATALOG);
    }

    if cli.verbose {
        let people_facing = engine.tasks().iter().filter(|t| t.people_facing).count();
        eprintln!(
            "Loaded {} tasks ({} people-facing) from {}",
            engine.tasks().len(),
            people_facing,
            tasks_path.display()
        );
        eprintln!(
            "Loaded {} volunteers from {}",
            engine.volunteers().len(),
            volunteers_path.display()
        );
        eprintln!("Accumulation: {}", engine.scoring().accumulation());
    }

    let use_colors = task_match::output::should_use_colors();

    // Route based on subcommand
    match command {
        Commands::Order => {
            let order = engine.tasks_by_desirability();
            if cli.verbose {
                eprintln!("Ordered {} tasks in {:?}", order.len(), start_time.elapsed());
            }

            match cli.format {
                Format::Table => println!(
                    "{}",
                    task_match::output::format_task_order(&order, engine.tasks(), use_colors)
                ),
                Format::Tsv => println!(
                    "{}",
                    task_match::output::format_task_order_tsv(&order, engine.tasks())
                ),
                Format::Json => {
                    print_json(task_match::output::task_order_json(&order, engine.tasks()))
                }
            }
        }
        Commands::Assign => {
            if cli.verbose {
                eprintln!("Strategy: {}", engine.strategy_name());
            }
            engine.assign_tasks();

            if cli.verbose {
                let unassigned = engine.tasks().len().saturating_sub(engine.assignments().len());
                eprintln!(
                    "Assigned {} tasks ({} unassigned) in {:?}",
                    engine.assignments().len(),
                    unassigned,
                    start_time.elapsed()
                );
            }

            match cli.format {
                Format::Table => println!(
                    "{}",
                    task_match::output::format_assignments(
                        engine.assignments(),
                        engine.volunteers(),
                        engine.tasks(),
                        use_colors
                    )
                ),
                Format::Tsv => println!(
                    "{}",
                    task_match::output::format_assignments_tsv(engine.assignments(), engine.tasks())
                ),
                Format::Json => {
                    print_json(task_match::output::assignments_json(engine.assignments()))
                }
            }
        }
        Commands::Interested { task_id } => {
            // Unknown ids fall through to an empty result, not an error
            let task = engine
                .tasks()
                .get(task_id)
                .cloned()
                .unwrap_or_else(|| Task::new(task_id, false));
            let interested = engine.interested_volunteers(&task);

            match cli.format {
                Format::Table => println!(
                    "{}",
                    task_match::output::format_interested(&task, &interested, use_colors)
                ),
                Format::Tsv => {
                    for volunteer in &interested {
                        println!("{}", volunteer.name);
                    }
                }
                Format::Json => {
                    let names: Vec<&str> = interested.iter().map(|v| v.name.as_str()).collect();
                    print_json(serde_json::to_string_pretty(&names).map_err(anyhow::Error::from));
                }
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

fn print_json(rendered: anyhow::Result<String>) {
    match rendered {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Output error: {:#}", e);
            std::process::exit(EXIT_OUTPUT);
        }
    }
}

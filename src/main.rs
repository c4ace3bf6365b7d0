use cheapfare::airport::normalize_code;
use cheapfare::{FlightRecord, FlightSet, Graph, GraphConfig, Itinerary, find_cheapest_itinerary};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, ExitCode, Stdio};
use tabled::settings::Style;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cheapfare", about = "Cheapest itinerary search over scheduled flights")]
struct Args {
    /// Path to the JSON flight records file
    #[arg(short, long, value_name = "FILE", default_value = "data/default.json")]
    flights: PathBuf,

    /// Minimum layover, in seconds, needed to make a connecting flight
    #[arg(long, value_name = "SECONDS", default_value_t = 3600)]
    min_connection: u64,

    /// Origin airport code for a one-shot search
    #[arg(long, requires = "to")]
    from: Option<String>,

    /// Destination airport code for a one-shot search
    #[arg(long, requires = "from")]
    to: Option<String>,

    /// Print the one-shot result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect();

        Ok((0, candidates))
    }
}

fn paginate(content: String) {
    let pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn());

    let Ok(mut pager) = pager else {
        println!("{}", content);
        return;
    };

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("Error writing to pager: {}", e);
            }
        }
    }

    let _ = pager.wait();
}

fn print_table(mut table: tabled::Table, rows: usize) {
    table.with(Style::rounded());
    table.with(tabled::settings::Alignment::left());
    if rows > 20 {
        paginate(table.to_string());
    } else {
        println!("{}", table);
    }
}

fn print_itinerary(itinerary: &Itinerary) {
    print_table(tabled::Table::new(itinerary.rows()), itinerary.legs.len());
    println!(
        "Total cost: {}  ({} stop(s){})",
        format!("{:.2}", itinerary.total_cost).green().bold(),
        itinerary.stops(),
        itinerary
            .travel_hours()
            .map(|h| format!(", {:.1}h en route", h))
            .unwrap_or_default()
    );
}

fn search(graph: &Graph, from: &str, to: &str) -> bool {
    match find_cheapest_itinerary(graph, from, to) {
        Ok(Some(itinerary)) => {
            print_itinerary(&itinerary);
            true
        }
        Ok(None) => {
            println!(
                "{}",
                format!("No path found from {} to {} considering connection times.", from, to).yellow()
            );
            false
        }
        Err(e) => {
            println!("{}", e.to_string().red());
            false
        }
    }
}

fn one_shot(graph: &Graph, from: &str, to: &str, json: bool) -> ExitCode {
    if !json {
        return if search(graph, from, to) { ExitCode::SUCCESS } else { ExitCode::FAILURE };
    }

    let (body, found) = match find_cheapest_itinerary(graph, from, to) {
        Ok(Some(itinerary)) => (serde_json::json!({ "status": "found", "itinerary": itinerary }), true),
        Ok(None) => (serde_json::json!({ "status": "no_path" }), false),
        Err(e) => (serde_json::json!({ "status": "error", "message": e.to_string() }), false),
    };
    println!("{}", body);
    if found { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn repl(set: &FlightSet, graph: &Graph) -> Result<(), Box<dyn std::error::Error>> {
    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: ["ls", "search", "graph", "skipped", "help", "exit"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
    };

    let mut rl: Editor<CompleteHelper, DefaultHistory> = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                match parts[0] {
                    "ls" => {
                        let airport = parts.get(1).map(|s| normalize_code(s));
                        let filtered: Vec<&FlightRecord> = set
                            .records
                            .iter()
                            .filter(|r| airport.as_ref().is_none_or(|ap| r.touches(ap)))
                            .collect();
                        if filtered.is_empty() {
                            println!("No matching flights found.")
                        } else {
                            print_table(tabled::Table::new(&filtered), filtered.len());
                        }
                    },
                    "search" => {
                        if let (Some(from), Some(to)) = (parts.get(1), parts.get(2)) {
                            search(graph, from, to);
                        } else {
                            println!("Usage: search <from> <to>");
                        }
                    },
                    "graph" => println!("{}", graph.stats()),
                    "skipped" => {
                        let skipped = set.skipped.iter().chain(graph.skipped()).collect::<Vec<_>>();
                        if skipped.is_empty() {
                            println!("No records were skipped.");
                        }
                        for record in skipped {
                            println!("{}", record);
                        }
                    },
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  ls [airport]          - List flight records, optionally only those touching <airport>");
                        println!("  search <from> <to>    - Find the cheapest itinerary between two airport codes");
                        println!("  graph                 - Show time-expanded graph statistics");
                        println!("  skipped               - List incomplete or malformed records left out of the graph");
                        println!("  help / ?              - Show this help menu");
                        println!("  exit / quit           - Exit\n");
                    },
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", parts[0]),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let set = FlightSet::load_from_file(&args.flights)?;
    let graph = Graph::build_with(
        &set.records,
        &GraphConfig {
            min_connection: args.min_connection,
        },
    );

    if let (Some(from), Some(to)) = (&args.from, &args.to) {
        return Ok(one_shot(&graph, from, to, args.json));
    }

    println!(
        "Loaded {} flights from {} ({} skipped). {}",
        set.records.len(),
        args.flights.display(),
        set.skipped.len() + graph.skipped().len(),
        graph.stats()
    );
    repl(&set, &graph)?;
    Ok(ExitCode::SUCCESS)
}

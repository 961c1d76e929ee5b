//! LFIT CLI
//!
//! Usage:
//!   lfit --serve                          # HTTP API server
//!   lfit --report <USER_ID>               # Terminal report for one user
//!   lfit --report <USER_ID> --json        # Report as JSON (for assemblers)

use clap::Parser;
use colored::Colorize;

use lfit::core::{build_report, run_server, JsonlStore, RecordStore};
use lfit::types::{Dominance, EngineConfig, IdentityReport};
use lfit::{DEFAULT_LIMINALITY_THRESHOLD, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "lfit",
    version = VERSION,
    about = "Leader-Follower Identity Tracker - capture reflections, report identity dynamics",
    long_about = "LFIT stores daily leader/follower reflections and derives\n\
                  descriptive statistics, dominance classification, liminality,\n\
                  identity switches and day-to-day variability from them.\n\n\
                  Modes:\n  \
                  --serve            Run the HTTP API\n  \
                  --report USER_ID   Print a report for one user"
)]
struct Args {
    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Print the identity report for this user ID
    #[arg(short, long, value_name = "USER_ID")]
    report: Option<String>,

    /// Server address
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Path to the JSON-lines data file
    #[arg(long, default_value = "user_data.jsonl")]
    data_file: String,

    /// Liminality threshold (max |leader - follower| gap)
    #[arg(long, default_value_t = DEFAULT_LIMINALITY_THRESHOLD)]
    threshold: f64,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    if args.serve {
        run_serve(&args).await;
    } else if let Some(ref user_id) = args.report {
        run_report(user_id, &args);
    } else {
        eprintln!("Nothing to do: pass --serve or --report <USER_ID> (see --help)");
        std::process::exit(2);
    }
}

/// Run HTTP API server
async fn run_serve(args: &Args) {
    println!("LFIT v{} - data file: {}", VERSION, args.data_file);

    let store = Box::new(JsonlStore::new(&args.data_file));
    let config = EngineConfig::with_threshold(args.threshold);

    if let Err(e) = run_server(&args.addr, store, config).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Build and print a report for one user
fn run_report(user_id: &str, args: &Args) {
    let store = JsonlStore::new(&args.data_file);

    let records = match store.get_records(user_id) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error reading data: {}", e);
            std::process::exit(1);
        }
    };

    if records.is_empty() {
        eprintln!("No data found for user ID '{}'", user_id);
        std::process::exit(1);
    }

    let config = EngineConfig::with_threshold(args.threshold);
    let report = match build_report(user_id, &records, &config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Data validation failed: {}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Serialize error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_report(&report);
    }
}

/// Render the report for the terminal
fn print_report(report: &IdentityReport) {
    println!();
    println!("{}", format!("Identity report for {}", report.user_id).bold());
    println!(
        "{} records, {} .. {}",
        report.record_count,
        report.timeline.first().map(String::as_str).unwrap_or("-"),
        report.timeline.last().map(String::as_str).unwrap_or("-"),
    );
    println!();

    println!("{}", "Descriptive summary".bold().underline());
    print_field_line("Leader", &report.summary.leader, |s| s.blue());
    print_field_line("Follower", &report.summary.follower, |s| s.red());
    println!();

    println!("{}", "Dominance".bold().underline());
    let d = &report.dominance;
    println!(
        "  {} {}  |  {} {}  |  {} {}",
        "leader".blue(),
        d.leader_count,
        "follower".red(),
        d.follower_count,
        "balanced".green(),
        d.balanced_count,
    );
    let label_line: Vec<String> = d
        .labels
        .iter()
        .map(|l| match l {
            Dominance::Leader => "L".blue().to_string(),
            Dominance::Follower => "F".red().to_string(),
            Dominance::Balanced => "=".green().to_string(),
        })
        .collect();
    println!("  trajectory: {}", label_line.join(" "));
    println!();

    println!("{}", "Dynamics".bold().underline());
    println!("  identity switches: {}", report.switches.total);
    match report.liminality.score {
        Some(score) => println!(
            "  liminality: {:.1}% of periods (threshold {})",
            score, report.liminality.threshold
        ),
        None => println!("  liminality: n/a (need at least 2 records)"),
    }
    match (
        report.variability.leader_mean,
        report.variability.follower_mean,
    ) {
        (Some(l), Some(f)) => {
            println!("  day-to-day variability: leader {:.1}, follower {:.1}", l, f)
        }
        _ => println!("  day-to-day variability: n/a (need at least 2 records)"),
    }
    println!();

    println!("{}", "Event strength".bold().underline());
    match report.event_strength.overall_mean {
        Some(mean) => println!(
            "  mean {:.2} across {} fully rated records",
            mean, report.event_strength.rated_count
        ),
        None => println!("  n/a (no record carries all three ratings)"),
    }
    println!();
}

fn print_field_line(
    name: &str,
    summary: &lfit::types::FieldSummary,
    paint: fn(&str) -> colored::ColoredString,
) {
    let quartiles = match (summary.q1, summary.median, summary.q3) {
        (Some(q1), Some(med), Some(q3)) => {
            format!("q1 {:.1} | median {:.1} | q3 {:.1}", q1, med, q3)
        }
        _ => "quartiles n/a".to_string(),
    };
    let range = match (summary.min, summary.max) {
        (Some(min), Some(max)) => format!("range {:.1}-{:.1}", min, max),
        _ => "range n/a".to_string(),
    };
    println!(
        "  {:<9} mean {:.1} | sd {:.1} | {} | {}",
        paint(name),
        summary.mean,
        summary.std_dev,
        range,
        quartiles,
    );
}

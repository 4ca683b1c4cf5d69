use clap::{Parser, ValueEnum};
use env_logger::Env;
use fillcsp::backtracking_search::{find_fill, FillConfig};
use fillcsp::constraint_graph::ConstraintGraph;
use fillcsp::grid::{generate_problem, render_grid, Grid, BUILTIN_GRID_NAMES};
use fillcsp::heuristics::ValueOrderingKind;
use fillcsp::word_list::{load_word_list, small_word_list};
use instant::Duration;
use log::info;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::fs;

/// fillcsp: fill a numbered crossword grid by backtracking search
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Name of a built-in grid (small, large or heart)
    #[arg(long, default_value = "small")]
    grid: String,

    /// Path to a grid file with one row of integer markers per line; overrides --grid
    #[arg(long)]
    grid_file: Option<String>,

    /// Path to a word list with one word per line [default: the built-in small list]
    #[arg(long)]
    words: Option<String>,

    /// Leave the named slot out of the problem (repeatable) [default for the small grid: 2across]
    #[arg(long = "exclude", value_name = "NAME")]
    excluded: Vec<String>,

    /// Restrict a slot to the given words, as NAME=WORD[,WORD...] (repeatable)
    #[arg(long = "prior", value_name = "NAME=WORDS")]
    prior_knowledge: Vec<String>,

    /// How to order candidate words for each slot
    #[arg(long, value_enum, default_value_t = OrderingArg::Lcv)]
    ordering: OrderingArg,

    /// Give up after this many seconds [default: no limit]
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Write the solution to this path as JSON
    #[arg(long)]
    output: Option<String>,

    /// Write the constraint graph to this path in DOT format
    #[arg(long)]
    graph: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OrderingArg {
    /// Conflict-count ordering
    Lcv,
    /// Letter frequency, then overlap with the filled grid
    Composite,
}

impl From<OrderingArg> for ValueOrderingKind {
    fn from(ordering: OrderingArg) -> Self {
        match ordering {
            OrderingArg::Lcv => ValueOrderingKind::LeastConstrainingValue,
            OrderingArg::Composite => ValueOrderingKind::Composite,
        }
    }
}

struct Error(String);

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0) // Print error unquoted
    }
}

fn parse_prior_knowledge(entries: &[String]) -> Result<HashMap<String, Vec<String>>, Error> {
    entries
        .iter()
        .map(|entry| {
            let (name, words) = entry
                .split_once('=')
                .ok_or_else(|| Error(format!("Expected NAME=WORDS, got '{entry}'")))?;

            let words: Vec<String> = words
                .split(',')
                .map(str::trim)
                .filter(|word| !word.is_empty())
                .map(String::from)
                .collect();

            if words.is_empty() {
                return Err(Error(format!("No words given for '{name}'")));
            }

            Ok((name.trim().to_string(), words))
        })
        .collect()
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let grid = match &args.grid_file {
        Some(grid_path) => {
            let template = fs::read_to_string(grid_path)
                .map_err(|_| Error(format!("Couldn't read file '{grid_path}'")))?;
            Grid::from_template_string(&template).map_err(|err| Error(err.to_string()))?
        }
        None => Grid::builtin(&args.grid).ok_or_else(|| {
            Error(format!(
                "Unknown grid '{}', expected one of: {}",
                args.grid,
                BUILTIN_GRID_NAMES.join(", ")
            ))
        })?,
    };

    let words = match &args.words {
        Some(words_path) => load_word_list(words_path).map_err(|err| Error(err.to_string()))?,
        None => small_word_list(),
    };

    if words.is_empty() {
        return Err(Error("Word list is empty".into()));
    }

    // The small grid's 2across runs along the tail of 1across, so it's only fillable without it.
    let mut excluded = args.excluded.clone();
    if excluded.is_empty() && args.grid_file.is_none() && args.grid == "small" {
        info!("Excluding 2across from the small grid");
        excluded.push("2across".into());
    }

    let prior_knowledge = parse_prior_knowledge(&args.prior_knowledge)?;

    let problem = generate_problem(&grid, &words, &excluded, &prior_knowledge)
        .map_err(|err| Error(err.to_string()))?;

    if let Some(graph_path) = &args.graph {
        let dot = ConstraintGraph::build(&problem).to_dot(&problem);
        fs::write(graph_path, dot)
            .map_err(|_| Error(format!("Couldn't write file '{graph_path}'")))?;
        info!("Wrote constraint graph to {graph_path}");
    }

    let config = FillConfig {
        value_ordering: args.ordering.into(),
        timeout: args.timeout_secs.map(Duration::from_secs),
        abort: None,
    };

    let result = find_fill(&problem, &config)
        .map_err(|err| Error(format!("Unfillable grid: {err}")))?;

    println!("{:?}", result.statistics);
    println!("{}", render_grid(&grid, &problem, &result.assignment));

    let solution = result.solution(&problem);
    solution.check(&problem).map_err(|err| Error(err.to_string()))?;
    println!("{}", solution.to_json().map_err(|err| Error(err.to_string()))?);

    if let Some(output_path) = &args.output {
        solution.save_to_file(output_path).map_err(|err| Error(err.to_string()))?;
        info!("Wrote solution to {output_path}");
    }

    Ok(())
}

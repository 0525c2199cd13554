use std::env;
use std::fs;
use std::io::{self, Read};

use eppstein_ksp::graph::labeled::parse_labeled;
use eppstein_ksp::graph::parse::parse_problem;
use eppstein_ksp::{CostPolicy, Eppstein, KShortestPaths, KspQuery};

const USAGE: &str = "usage: ksp [--distinct] [--paths] [--json] [--sum] [--labeled] [FILE]

Reads `n m s t k` followed by m `u v w` lines (or, with --labeled, an edge
count, `from to weight` lines and `source target k`) from FILE or stdin.";

#[derive(Debug, Default)]
struct Options {
    distinct: bool,
    paths: bool,
    json: bool,
    sum: bool,
    labeled: bool,
    input: Option<String>,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options::default();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--distinct" => options.distinct = true,
            "--paths" => options.paths = true,
            "--json" => options.json = true,
            "--sum" => options.sum = true,
            "--labeled" => options.labeled = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            flag if flag.starts_with("--") => {
                return Err(format!("unknown flag {}\n\n{}", flag, USAGE))
            }
            path if options.input.is_none() => options.input = Some(path.to_string()),
            extra => return Err(format!("unexpected argument {}\n\n{}", extra, USAGE)),
        }
    }
    Ok(options)
}

fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn print_result(
    result: &KShortestPaths<i64>,
    k: usize,
    source: &str,
    destination: &str,
    options: &Options,
    label: &dyn Fn(usize) -> String,
) -> Result<(), Box<dyn std::error::Error>> {
    if options.json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }
    if options.sum {
        println!("{}", result.total_cost()?);
        return Ok(());
    }
    if result.is_unreachable() {
        println!("No path found from {} to {}.", source, destination);
        return Ok(());
    }

    for (index, path) in result.paths().iter().enumerate() {
        match (&path.vertices, options.paths) {
            (Some(vertices), true) => {
                let route: Vec<String> = vertices.iter().map(|&v| label(v)).collect();
                println!("Path {}: {} ({})", index + 1, path.cost, route.join(" -> "));
            }
            _ => println!("Path {}: {}", index + 1, path.cost),
        }
    }
    for _ in result.len()..k {
        println!("-1");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let options = match parse_args() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(2);
        }
    };

    let input = read_input(options.input.as_deref())?;
    let policy = if options.distinct {
        CostPolicy::DistinctCosts
    } else {
        CostPolicy::AllowRepeats
    };
    let eppstein = Eppstein::new()
        .with_policy(policy)
        .with_path_recording(options.paths);

    if options.labeled {
        let problem = parse_labeled(&input)?;
        let (Some(source), Some(destination)) = (
            problem.graph.id(&problem.source),
            problem.graph.id(&problem.destination),
        ) else {
            println!("No path found from {} to {}.", problem.source, problem.destination);
            return Ok(());
        };
        let query = KspQuery::new(source, destination, problem.k);
        let result = eppstein.k_shortest_paths(&problem.graph.graph, &query)?;
        let label = |v: usize| problem.graph.label(v).unwrap_or("?").to_string();
        print_result(&result, problem.k, &problem.source, &problem.destination, &options, &label)?;
    } else {
        let problem = parse_problem(&input)?;
        let result = eppstein.k_shortest_paths(&problem.graph, &problem.query)?;
        let query = problem.query;
        print_result(
            &result,
            query.k,
            &query.source.to_string(),
            &query.destination.to_string(),
            &options,
            &|v: usize| v.to_string(),
        )?;
    }

    Ok(())
}

use std::process::ExitCode;

use meshdat_io::{load_control_into_model, load_mesh, write_summary_json};
use meshdat_model::{MeshModel, MeshStatistics};
use tracing_subscriber::EnvFilter;

fn usage() {
    eprintln!("usage: meshdat-cli analyze <mesh.dat> [--control <control.json>] [--json <summary.json>]");
}

struct Args {
    mesh: String,
    control: Option<String>,
    json: Option<String>,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let (command, rest) = args.get(1..)?.split_first()?;
    if command != "analyze" {
        return None;
    }
    let (mesh, mut rest) = rest.split_first()?;

    let mut parsed = Args {
        mesh: mesh.clone(),
        control: None,
        json: None,
    };
    while let Some((flag, tail)) = rest.split_first() {
        let (value, tail) = tail.split_first()?;
        match flag.as_str() {
            "--control" => parsed.control = Some(value.clone()),
            "--json" => parsed.json = Some(value.clone()),
            _ => return None,
        }
        rest = tail;
    }
    Some(parsed)
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(model: &MeshModel, stats: &MeshStatistics) {
    if let Some(source) = model.source_name() {
        println!("source: {source}");
    }
    println!("{}", stats.format());
    if !model.surfaces().is_empty() {
        println!("surfaces: {}", model.surfaces().join(", "));
    }
    if !model.control().is_empty() {
        println!("materials: {}", model.control().materials.len());
        println!("part_properties: {}", model.control().part_properties.len());
        println!("loads: {}", model.control().loads.len());
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let Some(args) = parse_args(&args) else {
        usage();
        return ExitCode::from(2);
    };
    init_logging();
    tracing::debug!(mesh = %args.mesh, control = ?args.control, "starting analysis");

    let mut model = match load_mesh(&args.mesh) {
        Ok(model) => model,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };

    if let Some(control) = &args.control
        && let Err(err) = load_control_into_model(control, &mut model)
    {
        eprintln!("control error: {err}");
        return ExitCode::from(1);
    }

    print_summary(&model, &model.statistics());

    if let Some(json) = &args.json
        && let Err(err) = write_summary_json(json, &model)
    {
        eprintln!("summary error: {err}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_analyze_with_options() {
        let parsed = parse_args(&args(&[
            "meshdat-cli",
            "analyze",
            "mesh.dat",
            "--json",
            "out.json",
            "--control",
            "control.json",
        ]))
        .expect("valid arguments");
        assert_eq!(parsed.mesh, "mesh.dat");
        assert_eq!(parsed.control.as_deref(), Some("control.json"));
        assert_eq!(parsed.json.as_deref(), Some("out.json"));
    }

    #[test]
    fn rejects_bad_invocations() {
        assert!(parse_args(&args(&["meshdat-cli"])).is_none());
        assert!(parse_args(&args(&["meshdat-cli", "analyze"])).is_none());
        assert!(parse_args(&args(&["meshdat-cli", "convert", "mesh.dat"])).is_none());
        assert!(parse_args(&args(&["meshdat-cli", "analyze", "m.dat", "--json"])).is_none());
        assert!(parse_args(&args(&["meshdat-cli", "analyze", "m.dat", "--x", "y"])).is_none());
    }
}

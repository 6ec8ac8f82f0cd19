use clap::Parser;
use color_eyre::eyre::bail;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use labgen::config::Config;
use labgen::orchestrator::{self, RunOptions};
use labgen::render;
use labgen::topology::builder::{MAX_NODE_COUNT, MIN_NODE_COUNT};
use labgen::topology::Mode;

/// Topology and address generator for virtual network labs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the generator configuration YAML file
    #[arg(short, long, default_value = "labgen.yaml")]
    config: PathBuf,

    /// Write the default configuration to the config path and exit
    #[arg(short, long)]
    write_config: bool,

    /// Node distance in layout units
    #[arg(short, long, default_value_t = 200, value_parser = clap::value_parser!(i32).range(1..))]
    distance: i32,

    /// Lab name to create
    #[arg(short = 'L', long, default_value = "labgen lab")]
    labname: String,

    /// Router template to use
    #[arg(short = 'T', long, default_value = "iosv")]
    template: String,

    /// List all available templates and exit
    #[arg(long)]
    list_templates: bool,

    /// Mode of operation
    #[arg(short, long, value_enum, default_value_t = Mode::LinearChain)]
    mode: Mode,

    /// Output directory for the generated lab artifacts
    #[arg(short, long, default_value = "lab_output")]
    output: PathBuf,

    /// Number of nodes to generate (2-1000)
    #[arg(value_parser = parse_node_count)]
    nodes: Option<u32>,
}

/// Reject node counts outside the supported range at the CLI boundary
fn parse_node_count(value: &str) -> Result<u32, String> {
    let count: u32 = value
        .parse()
        .map_err(|_| format!("invalid value {value}"))?;
    if !(MIN_NODE_COUNT..=MAX_NODE_COUNT).contains(&count) {
        return Err(format!(
            "invalid value {value}. Valid values are from {MIN_NODE_COUNT}-{MAX_NODE_COUNT}."
        ));
    }
    Ok(count)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::load(&args.config);
    if args.write_config {
        config.save(&args.config)?;
        info!("default configuration written to {:?}", args.config);
        return Ok(());
    }

    if args.list_templates {
        println!("Available templates: {}", render::available().join(", "));
        return Ok(());
    }

    let Some(node_count) = args.nodes else {
        bail!("need to provide number of nodes!");
    };

    let opts = RunOptions {
        labname: args.labname,
        node_count,
        distance: args.distance,
        mode: args.mode,
        template: args.template,
        output: args.output,
    };
    orchestrator::generate_lab(&config, &opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = Args::parse_from(["labgen", "10"]);
        assert_eq!(args.nodes, Some(10));
        assert_eq!(args.distance, 200);
        assert_eq!(args.template, "iosv");
        assert_eq!(args.mode, Mode::LinearChain);
        assert_eq!(args.config, PathBuf::from("labgen.yaml"));
    }

    #[test]
    fn test_mode_names() {
        let args = Args::parse_from(["labgen", "--mode", "clustered-mesh", "50"]);
        assert_eq!(args.mode, Mode::ClusteredMesh);
        assert!(Args::try_parse_from(["labgen", "--mode", "nx", "50"]).is_err());
    }

    #[test]
    fn test_node_count_range_is_enforced() {
        assert!(Args::try_parse_from(["labgen", "1"]).is_err());
        assert!(Args::try_parse_from(["labgen", "1001"]).is_err());
        assert!(Args::try_parse_from(["labgen", "2"]).is_ok());
        assert!(Args::try_parse_from(["labgen", "1000"]).is_ok());
    }

    #[test]
    fn test_nodes_are_optional_for_write_config() {
        let args = Args::parse_from(["labgen", "--write-config"]);
        assert!(args.write_config);
        assert_eq!(args.nodes, None);
    }
}

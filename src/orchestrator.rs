//! Lab generation orchestrator.
//!
//! This module coordinates one full generation run: it owns the address
//! pool and coordinate generator, drives the topology builder in the
//! selected mode, renders every node configuration, and writes the
//! resulting artifacts into the output directory. The artifacts are what
//! the external collaborators consume: the ordered provisioning plan,
//! one configuration per device, and the DNS zone.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use serde::Serialize;

use crate::addressing::AddressPool;
use crate::config::Config;
use crate::layout::SpiralLayout;
use crate::provision::LabOp;
use crate::render::{self, NodeTemplate};
use crate::topology::{Blueprint, Mode, TopologyBuilder};

/// Per-run options, usually taken from the command line
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub labname: String,
    pub node_count: u32,
    pub distance: i32,
    pub mode: Mode,
    pub template: String,
    pub output: PathBuf,
}

/// Serialized lab manifest, the provisioning collaborator's input
#[derive(Serialize)]
struct LabManifest<'a> {
    lab: &'a str,
    mode: Mode,
    ops: &'a [LabOp],
}

/// Generate a lab and write all artifacts to the output directory
pub fn generate_lab(config: &Config, opts: &RunOptions) -> Result<()> {
    config.validate()?;
    let template = render::lookup(&opts.template)?;

    let blueprint = build_blueprint(config, opts)?;
    write_artifacts(config, opts, template, &blueprint)?;

    info!("done");
    Ok(())
}

/// Run the topology builder in the selected mode.
///
/// The address pool and the spiral generator are owned here and lent to
/// the builder for the duration of the run, they are never reused.
pub fn build_blueprint(config: &Config, opts: &RunOptions) -> Result<Blueprint> {
    let mut pool = AddressPool::new(config.host_block, config.link_block)?;
    let mut builder = TopologyBuilder::new(&mut pool, opts.distance, &opts.template);

    let blueprint = match opts.mode {
        Mode::LinearChain => {
            let mut spiral = SpiralLayout::new(opts.distance);
            builder.build_chain(&mut spiral, opts.node_count)?
        }
        Mode::ClusteredMesh => {
            let mut rng = rand::thread_rng();
            builder.build_mesh(&mut rng, opts.node_count)?
        }
    };
    Ok(blueprint)
}

/// Write the manifest, device configurations and DNS zone
fn write_artifacts(
    config: &Config,
    opts: &RunOptions,
    template: &dyn NodeTemplate,
    blueprint: &Blueprint,
) -> Result<()> {
    let configs_dir = opts.output.join("configs");
    fs::create_dir_all(&configs_dir)
        .wrap_err_with(|| format!("failed to create output directory '{}'", configs_dir.display()))?;

    // rendered nodes resolve against the generated DNS host
    let mut run_config = config.clone();
    run_config.nameserver = blueprint.nameserver.to_string();

    for node in &blueprint.nodes {
        let origin = blueprint
            .core
            .as_ref()
            .filter(|core| core.hostname == node.hostname)
            .map(|core| core.origin);
        let rendered = template.render(&run_config, node, origin);
        let path = configs_dir.join(format!("{}.cfg", node.hostname));
        fs::write(&path, rendered)
            .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
        info!("config created for {}", node.hostname);
    }

    let dns_config = render::dnshost::render(&run_config, &blueprint.dns_host, &blueprint.dns_zone);
    write_file(&configs_dir.join("dns-host.sh"), &dns_config)?;
    info!("config created for DNS host");

    let manifest = LabManifest {
        lab: &opts.labname,
        mode: blueprint.mode,
        ops: blueprint.plan.ops(),
    };
    write_file(
        &opts.output.join("lab.yaml"),
        &serde_yaml::to_string(&manifest)?,
    )?;

    write_file(
        &opts.output.join("dns_zone.json"),
        &serde_json::to_string_pretty(&blueprint.dns_zone)?,
    )?;

    info!(
        "lab '{}' written to {}: {} provisioning operations, {} zone records",
        opts.labname,
        opts.output.display(),
        blueprint.plan.len(),
        blueprint.dns_zone.len()
    );
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).wrap_err_with(|| format!("failed to write '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn options(output: PathBuf) -> RunOptions {
        RunOptions {
            labname: "test lab".to_string(),
            node_count: 3,
            distance: 200,
            mode: Mode::LinearChain,
            template: "iosv".to_string(),
            output,
        }
    }

    #[test]
    fn test_generate_writes_all_artifacts() {
        let dir = tempdir().unwrap();
        let opts = options(dir.path().to_path_buf());
        generate_lab(&Config::default(), &opts).unwrap();

        assert!(dir.path().join("lab.yaml").exists());
        assert!(dir.path().join("dns_zone.json").exists());
        for name in ["R1.cfg", "R2.cfg", "R3.cfg", "dns-host.sh"] {
            assert!(dir.path().join("configs").join(name).exists(), "{name}");
        }

        let manifest = fs::read_to_string(dir.path().join("lab.yaml")).unwrap();
        assert!(manifest.contains("lab: test lab"));
        assert!(manifest.contains("label: ext-conn-0"));
    }

    #[test]
    fn test_rendered_config_points_at_generated_nameserver() {
        let dir = tempdir().unwrap();
        let opts = options(dir.path().to_path_buf());
        generate_lab(&Config::default(), &opts).unwrap();

        let r1 = fs::read_to_string(dir.path().join("configs").join("R1.cfg")).unwrap();
        // first usable address of the first /30 in the default link block
        assert!(r1.contains("ip name-server 172.16.0.1"));
    }

    #[test]
    fn test_unknown_template_aborts_before_building() {
        let dir = tempdir().unwrap();
        let mut opts = options(dir.path().to_path_buf());
        opts.template = "does-not-exist".to_string();
        let err = generate_lab(&Config::default(), &opts).unwrap_err();
        assert!(err.to_string().contains("template does not exist"));
        assert!(!dir.path().join("lab.yaml").exists());
    }

    #[test]
    fn test_mesh_mode_end_to_end() {
        let dir = tempdir().unwrap();
        let mut opts = options(dir.path().to_path_buf());
        opts.mode = Mode::ClusteredMesh;
        opts.node_count = 12;
        generate_lab(&Config::default(), &opts).unwrap();

        let zone = fs::read_to_string(dir.path().join("dns_zone.json")).unwrap();
        assert!(zone.contains("dns-host-eth1"));
        for id in 1..=12 {
            assert!(dir
                .path()
                .join("configs")
                .join(format!("R{id}.cfg"))
                .exists());
        }
    }
}

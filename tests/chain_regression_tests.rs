//! End-to-end regression tests for the linear chain mode.
//!
//! These pin the full artifact set of a small chain lab: addressing
//! order, provisioning order and the rendered configurations.

use std::fs;

use labgen::config::Config;
use labgen::orchestrator::{self, RunOptions};
use labgen::topology::Mode;
use tempfile::tempdir;

fn chain_options(output: std::path::PathBuf) -> RunOptions {
    RunOptions {
        labname: "regression lab".to_string(),
        node_count: 4,
        distance: 200,
        mode: Mode::LinearChain,
        template: "iosv".to_string(),
        output,
    }
}

fn small_blocks_config() -> Config {
    let mut config = Config::default();
    config.host_block = "10.0.0.0/29".parse().unwrap();
    // a /27 holds eight /30 subnets; the four-node chain needs five
    config.link_block = "172.16.0.0/27".parse().unwrap();
    config
}

#[test]
fn test_chain_lab_artifacts() {
    let dir = tempdir().unwrap();
    let opts = chain_options(dir.path().to_path_buf());
    orchestrator::generate_lab(&small_blocks_config(), &opts).unwrap();

    // every device got a configuration
    for name in ["R1.cfg", "R2.cfg", "R3.cfg", "R4.cfg", "dns-host.sh"] {
        assert!(dir.path().join("configs").join(name).exists(), "{name}");
    }

    // loopbacks carve the host block in creation order
    for (idx, loopback) in ["10.0.0.0", "10.0.0.1", "10.0.0.2", "10.0.0.3"]
        .iter()
        .enumerate()
    {
        let cfg = fs::read_to_string(
            dir.path().join("configs").join(format!("R{}.cfg", idx + 1)),
        )
        .unwrap();
        assert!(
            cfg.contains(&format!(" ip address {loopback} 255.255.255.255")),
            "R{} loopback",
            idx + 1
        );
        // every node resolves against the DNS host address
        assert!(cfg.contains("ip name-server 172.16.0.1"));
    }

    // the DNS host serves the four hostname records and routes back
    // through the first router
    let dns = fs::read_to_string(dir.path().join("configs").join("dns-host.sh")).unwrap();
    assert!(dns.contains("ip address add 172.16.0.1/30 dev eth1"));
    assert!(dns.contains("ip route add 10.0.0.0/29 via 172.16.0.2"));
    for (name, addr) in [
        ("r1", "10.0.0.0"),
        ("r2", "10.0.0.1"),
        ("r3", "10.0.0.2"),
        ("r4", "10.0.0.3"),
    ] {
        assert!(dns.contains(&format!("echo -e \"{addr}\\t{name}.virl.lab\" >>/etc/hosts")));
    }

    // the manifest lists nodes and links in construction order
    let manifest = fs::read_to_string(dir.path().join("lab.yaml")).unwrap();
    let first_node = manifest.find("label: ext-conn-0").unwrap();
    let second_node = manifest.find("label: dns-host").unwrap();
    let last_node = manifest.find("label: R4").unwrap();
    assert!(first_node < second_node && second_node < last_node);

    let zone: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(dir.path().join("dns_zone.json")).unwrap())
            .unwrap();
    let names: Vec<&str> = zone.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["r1", "r2", "r3", "r4"]);
}

#[test]
fn test_chain_link_block_exhaustion_aborts_the_run() {
    let dir = tempdir().unwrap();
    let opts = chain_options(dir.path().to_path_buf());

    // a /28 holds only four /30 subnets, the fifth draw must fail
    let mut config = small_blocks_config();
    config.link_block = "172.16.0.0/28".parse().unwrap();

    let err = orchestrator::generate_lab(&config, &opts).unwrap_err();
    assert!(err.to_string().contains("exhausted"));
    // no partial artifacts are salvaged
    assert!(!dir.path().join("lab.yaml").exists());
}

#[test]
fn test_chain_runs_are_reproducible() {
    let first_dir = tempdir().unwrap();
    let second_dir = tempdir().unwrap();
    let config = small_blocks_config();

    orchestrator::generate_lab(&config, &chain_options(first_dir.path().to_path_buf())).unwrap();
    orchestrator::generate_lab(&config, &chain_options(second_dir.path().to_path_buf())).unwrap();

    let first = fs::read_to_string(first_dir.path().join("lab.yaml")).unwrap();
    let second = fs::read_to_string(second_dir.path().join("lab.yaml")).unwrap();
    assert_eq!(first, second);
}

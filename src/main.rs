//! pagegate command-line entry point: loads config layers and a page tree from
//! JSON and prints the render context for one principal.

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use pagegate::content::ContentTree;
use pagegate::gate::PageGate;
use pagegate::identity::Principal;
use pagegate::loader::{load_layers, load_tree, LayerPaths};

const USAGE: &str = "pagegate\n\nUSAGE:\n  pagegate --tree FILE --user NAME [--groups a,b] [--auth x,y] [--route R] [--location L]\n           [--plugin FILE] [--deployment FILE] [--environment FILE]\n\nOPTIONS:\n  --plugin FILE       Plugin defaults (env: PAGEGATE_PLUGIN_CONFIG)\n  --deployment FILE   Deployment config (env: PAGEGATE_DEPLOYMENT_CONFIG)\n  --environment FILE  Environment config (env: PAGEGATE_ENV_CONFIG)\n  --tree FILE         JSON array of pages\n  --route R           Edit view for the closest page to R; omit to list\n  --location L        Admin location (default: pages)\n";

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    let mut i = 0;
    while i < args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
        i += 1;
    }
    None
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn path_from(args: &[String], flag: &str, env_name: &str) -> Option<PathBuf> {
    arg_value(args, flag).or_else(|| env::var(env_name).ok()).map(PathBuf::from)
}

fn split_list(v: Option<String>) -> Vec<String> {
    v.map(|s| s.split(',').map(|x| x.trim().to_string()).filter(|x| !x.is_empty()).collect())
        .unwrap_or_default()
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("building log filter")?;
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args: Vec<String> = env::args().collect();
    if has_flag(&args, "--help") || has_flag(&args, "-h") {
        println!("{}", USAGE);
        return Ok(());
    }

    let Some(tree_path) = arg_value(&args, "--tree") else { bail!("--tree is required\n\n{}", USAGE) };
    let Some(user) = arg_value(&args, "--user") else { bail!("--user is required\n\n{}", USAGE) };

    let paths = LayerPaths {
        plugin: path_from(&args, "--plugin", "PAGEGATE_PLUGIN_CONFIG"),
        deployment: path_from(&args, "--deployment", "PAGEGATE_DEPLOYMENT_CONFIG"),
        environment: path_from(&args, "--environment", "PAGEGATE_ENV_CONFIG"),
    };
    let config = load_layers(&paths)?.effective();
    let tree = load_tree(&PathBuf::from(&tree_path))?;
    info!(target: "pagegate", "pagegate: pages={} root={:?} user='{}'", tree.len(), tree.root().map(|n| n.path.clone()), user);

    let mut principal = Principal::new(user).with_groups(split_list(arg_value(&args, "--groups")));
    principal.authorizations = split_list(arg_value(&args, "--auth"));

    let location = arg_value(&args, "--location").unwrap_or_else(|| "pages".to_string());
    let route = arg_value(&args, "--route");
    let gate = PageGate::new(&tree, &config);
    let ctx = gate.render_context(&location, route.as_deref(), &principal);
    println!("{}", serde_json::to_string_pretty(&ctx)?);
    Ok(())
}

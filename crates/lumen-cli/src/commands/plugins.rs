//! Plugin listing and information command.

use clap::Args;
use lumen_registry::PluginRegistry;

#[derive(Args)]
pub struct PluginsArgs {
    /// Show details for a specific plugin
    #[arg(value_name = "PLUGIN")]
    plugin: Option<String>,
}

pub fn run(args: PluginsArgs) -> anyhow::Result<()> {
    let registry = PluginRegistry::new();

    if let Some(id) = &args.plugin {
        let descriptor = registry
            .get_by_id(id)
            .ok_or_else(|| anyhow::anyhow!("Unknown plugin: {}", id))?;

        println!("{}", descriptor.name);
        println!("{}", "=".repeat(descriptor.name.len()));
        println!();
        println!("{}", descriptor.description);
        if descriptor.sidechain_target {
            println!("Can be the target of a sidechain link.");
        }
        println!();
        println!("Parameters:");
        println!();
        println!("  {:14}  {:>10}  {:>10}  {:>10}", "Name", "Min", "Max", "Default");
        println!("  {:14}  {:>10}  {:>10}  {:>10}", "----", "---", "---", "-------");
        for spec in descriptor.kind.param_specs() {
            println!(
                "  {:14}  {:>10}  {:>10}  {:>10}",
                spec.name, spec.min, spec.max, spec.default
            );
        }
        return Ok(());
    }

    println!("{:12}  {:12}  {:7}  {}", "Plugin", "Name", "Params", "Description");
    println!("{:12}  {:12}  {:7}  {}", "------", "----", "------", "-----------");
    for descriptor in registry.all_plugins() {
        println!(
            "{:12}  {:12}  {:7}  {}",
            descriptor.id, descriptor.name, descriptor.param_count, descriptor.description
        );
    }
    println!();
    println!("Use `lumen plugins <PLUGIN>` for parameter details.");
    Ok(())
}

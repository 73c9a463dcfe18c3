use super::load_config;
use crate::cli::{output, GlobalArgs};
use anyhow::Result;
use orthocons_core::system;
use orthocons_tools::Tool;

pub fn run(global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;

    output::section_header("Paths");
    println!("{}", system::describe_paths());
    let config_file = global.config.clone().unwrap_or_else(system::config_path);
    output::tree_item(false, "Config file", &config_file.display().to_string());
    output::tree_item(true, "Workspace root", &config.workspace_root().display().to_string());

    output::section_header("OMA");
    output::tree_item(true, "Base URL", &config.oma.base_url);

    output::section_header("Tools");
    let tools = [
        (Tool::TCoffee, config.tcoffee.binary.as_str()),
        (Tool::Rate4Site, config.rate4site.binary.as_str()),
    ];
    let mut missing = 0;
    for (tool, binary) in tools {
        match tool.locate(binary) {
            Ok(path) => output::success(&format!("{}: {}", tool, path.display())),
            Err(e) => {
                missing += 1;
                output::warning(&e.to_string());
            }
        }
    }

    if missing > 0 {
        output::warning(&format!("{} external program(s) unavailable", missing));
    }
    Ok(())
}

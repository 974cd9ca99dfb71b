//! Render command for the apibox CLI
//!
//! Loads the build configuration and declaration tree, indexes the tree
//! once, and prints one JSON template context per requested symbol.

use anyhow::{bail, Context, Result};
use apibox::{ApiBoxConfig, DiagnosticsCollector, Renderer, SymbolIndex, TemplateOptions};
use serde_json::Value;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

/// Default configuration file
const DEFAULT_CONFIG: &str = "apibox.toml";

/// Render command configuration
#[derive(Debug, PartialEq)]
pub struct RenderCommand {
    /// TOML configuration file
    pub config: PathBuf,
    /// Data file overriding the configured one
    pub data: Option<PathBuf>,
    /// Repository slug overriding the configured one
    pub repo: Option<String>,
    /// Print indexed names instead of rendering
    pub list: bool,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Symbols to render
    pub symbols: Vec<String>,
    /// Print usage and exit
    pub help: bool,
}

impl RenderCommand {
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut cmd = RenderCommand {
            config: PathBuf::from(DEFAULT_CONFIG),
            data: None,
            repo: None,
            list: false,
            pretty: false,
            symbols: vec![],
            help: false,
        };

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    if i + 1 < args.len() {
                        cmd.config = PathBuf::from(&args[i + 1]);
                        i += 2;
                    } else {
                        bail!("--config requires a value");
                    }
                }
                "--data" | "-d" => {
                    if i + 1 < args.len() {
                        cmd.data = Some(PathBuf::from(&args[i + 1]));
                        i += 2;
                    } else {
                        bail!("--data requires a value");
                    }
                }
                "--repo" => {
                    if i + 1 < args.len() {
                        cmd.repo = Some(args[i + 1].clone());
                        i += 2;
                    } else {
                        bail!("--repo requires a value (e.g., owner/project)");
                    }
                }
                "--list" => {
                    cmd.list = true;
                    i += 1;
                }
                "--pretty" => {
                    cmd.pretty = true;
                    i += 1;
                }
                "--help" | "-h" => {
                    cmd.help = true;
                    i += 1;
                }
                arg if !arg.starts_with('-') => {
                    cmd.symbols.push(arg.to_string());
                    i += 1;
                }
                _ => {
                    bail!("Unknown flag: {}", args[i]);
                }
            }
        }

        if !cmd.help && !cmd.list && cmd.symbols.is_empty() {
            bail!("Nothing to do: pass one or more symbols, or --list");
        }

        Ok(cmd)
    }

    /// Resolve the effective configuration. `--data` makes the config file
    /// optional.
    pub fn resolve_config(&self) -> Result<ApiBoxConfig> {
        let mut config = match (&self.data, self.config.exists()) {
            (Some(data), false) => ApiBoxConfig::new(data),
            (Some(data), true) => {
                let mut config = ApiBoxConfig::load(&self.config)?;
                config.data_file = data.clone();
                config
            }
            (None, _) => ApiBoxConfig::load(&self.config)
                .with_context(|| format!("loading {}", self.config.display()))?,
        };
        if let Some(ref repo) = self.repo {
            config.repo = Some(repo.clone());
        }
        Ok(config)
    }
}

/// Run the render command with the given arguments
pub fn run(args: &[String]) -> Result<()> {
    let cmd = RenderCommand::parse(args)?;
    if cmd.help {
        usage();
        return Ok(());
    }

    let config = cmd.resolve_config()?;
    let tree = config
        .load_tree()
        .with_context(|| format!("loading {}", config.data_file.display()))?;
    let index = SymbolIndex::build(&tree);
    tracing::info!(
        symbols = index.len(),
        data_file = %config.data_file.display(),
        "Indexed declaration tree"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cmd.list {
        for name in index.names() {
            writeln!(out, "{}", name)?;
        }
        return Ok(());
    }

    let renderer = Renderer::from_config(&index, &config);
    let mut diagnostics = DiagnosticsCollector::new();
    let options = TemplateOptions::new();
    for symbol in &cmd.symbols {
        let context = Value::Object(renderer.template_context(symbol, &options, &mut diagnostics));
        if cmd.pretty {
            writeln!(out, "{}", serde_json::to_string_pretty(&context)?)?;
        } else {
            writeln!(out, "{}", context)?;
        }
    }

    diagnostics.print(io::stderr().is_terminal());
    diagnostics.print_summary();
    Ok(())
}

/// Print command usage
pub fn usage() {
    eprintln!("apibox [options] <symbol>...");
    eprintln!();
    eprintln!("Render API box template contexts from reflector JSON.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <symbol>...                 Fully-qualified names (e.g. Client.fetch)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config, -c <file>         Configuration file (default: apibox.toml)");
    eprintln!("  --data, -d <file>           Declaration tree JSON, overrides the config");
    eprintln!("  --repo <owner/project>      Repository slug, overrides the config");
    eprintln!("  --list                      Print every indexed name");
    eprintln!("  --pretty                    Pretty-print JSON output");
    eprintln!();
    eprintln!("Logging is controlled by APIBOX_LOG (default: info).");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_symbols_and_flags() {
        let cmd = RenderCommand::parse(&args(&[
            "-c",
            "site/apibox.toml",
            "--pretty",
            "Client",
            "Client.fetch",
        ]))
        .unwrap();
        assert_eq!(cmd.config, PathBuf::from("site/apibox.toml"));
        assert!(cmd.pretty);
        assert_eq!(cmd.symbols, vec!["Client", "Client.fetch"]);
        assert_eq!(cmd.data, None);
    }

    #[test]
    fn test_parse_overrides() {
        let cmd =
            RenderCommand::parse(&args(&["--data", "api.json", "--repo", "acme/client", "--list"]))
                .unwrap();
        assert_eq!(cmd.data, Some(PathBuf::from("api.json")));
        assert_eq!(cmd.repo.as_deref(), Some("acme/client"));
        assert!(cmd.list);
    }

    #[test]
    fn test_parse_errors() {
        assert!(RenderCommand::parse(&args(&["--config"])).is_err());
        assert!(RenderCommand::parse(&args(&["--bogus", "Client"])).is_err());
        assert!(RenderCommand::parse(&args(&[])).is_err());
        assert!(RenderCommand::parse(&args(&["--help"])).unwrap().help);
    }

    #[test]
    fn test_data_without_config_file() {
        let cmd = RenderCommand::parse(&args(&[
            "--config",
            "does/not/exist.toml",
            "--data",
            "api.json",
            "--repo",
            "acme/client",
            "Client",
        ]))
        .unwrap();
        let config = cmd.resolve_config().unwrap();
        assert_eq!(config.data_file, PathBuf::from("api.json"));
        assert_eq!(config.repo.as_deref(), Some("acme/client"));
    }

    #[test]
    fn test_missing_config_is_fatal() {
        let cmd = RenderCommand::parse(&args(&["--config", "does/not/exist.toml", "Client"]))
            .unwrap();
        assert!(cmd.resolve_config().is_err());
    }
}

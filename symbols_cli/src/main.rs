use anyhow::{anyhow, Context};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use symbols_plugin::identifier::extract_icon_name;
use symbols_plugin::{build_icon_url, HttpFetcher, IconFetcher, PluginConfig};
use symbols_protocol::{ParameterSet, StyleFamily, DEFAULT_GRADE, DEFAULT_SIZE, DEFAULT_WEIGHT};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "symbols_cli", about = "Resolve and download Material Symbols artwork")]
struct Cli {
    /// Overrides SYMBOLS_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resource URL for an icon.
    Url(IconArgs),
    /// Download the SVG for an icon.
    Fetch {
        #[command(flatten)]
        icon: IconArgs,

        /// Write the SVG here instead of stdout.
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

#[derive(ClapArgs, Debug)]
struct IconArgs {
    /// Icon name, e.g. "home" or a layer name such as "Sync_Disabled".
    icon: String,

    /// outlined, rounded or sharp.
    #[arg(long, default_value = "outlined")]
    style: String,

    #[arg(long, default_value_t = DEFAULT_WEIGHT)]
    weight: i32,

    /// Optical size in px.
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: i32,

    #[arg(long, default_value_t = DEFAULT_GRADE, allow_hyphen_values = true)]
    grade: i32,

    #[arg(long, default_value_t = false)]
    fill: bool,
}

impl IconArgs {
    fn resolve(&self) -> anyhow::Result<(String, ParameterSet)> {
        let icon = extract_icon_name(&self.icon)
            .ok_or_else(|| anyhow!("invalid icon name {:?}: expected [a-z0-9_]+", self.icon))?;
        let style = StyleFamily::parse(&self.style)
            .ok_or_else(|| anyhow!("unknown style {:?}: expected outlined, rounded or sharp", self.style))?;
        let params = ParameterSet {
            style,
            weight: self.weight,
            size: self.size,
            grade: self.grade,
            fill: self.fill,
        };
        let clamped = params.clamped();
        if clamped != params {
            eprintln!(
                "note: weight/size clamped to {}/{}",
                clamped.weight, clamped.size
            );
        }
        Ok((icon, clamped))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    symbols_plugin::init_tracing();
    let cli = Cli::parse();

    let mut config = PluginConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    match cli.command {
        Command::Url(args) => {
            let (icon, params) = args.resolve()?;
            println!("{}", build_icon_url(&config.base_url, &icon, &params));
        }
        Command::Fetch { icon, out } => {
            let (icon, params) = icon.resolve()?;
            let url = build_icon_url(&config.base_url, &icon, &params);
            info!(%url, "fetching");

            let svg = HttpFetcher::new()
                .fetch_svg(&url)
                .await
                .with_context(|| format!("could not fetch {icon}"))?;

            match out {
                Some(path) => {
                    std::fs::write(&path, &svg)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("wrote {} ({} bytes)", path.display(), svg.len());
                }
                None => println!("{svg}"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Cli {
        Cli::try_parse_from(argv).expect("valid args")
    }

    #[test]
    fn url_command_accepts_negative_grade_and_layer_names() {
        let cli = parse(&[
            "symbols_cli", "url", "Sync_Disabled", "--style", "rounded", "--weight", "700",
            "--size", "48", "--grade", "-25", "--fill",
        ]);
        let Command::Url(args) = cli.command else {
            panic!("expected url command");
        };
        let (icon, params) = args.resolve().unwrap();
        assert_eq!(icon, "sync_disabled");
        assert_eq!(
            build_icon_url("https://icons.test", &icon, &params),
            "https://icons.test/sync_disabled/materialsymbolsrounded/sync_disabled_wght700_gradN25fill1_48px.svg"
        );
    }

    #[test]
    fn invalid_icon_name_is_rejected() {
        let cli = parse(&["symbols_cli", "url", "My Icon!"]);
        let Command::Url(args) = cli.command else {
            panic!("expected url command");
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn fetch_command_takes_output_path() {
        let cli = parse(&["symbols_cli", "--base-url", "https://mirror.test", "fetch", "home", "--out", "home.svg"]);
        assert_eq!(cli.base_url.as_deref(), Some("https://mirror.test"));
        match cli.command {
            Command::Fetch { icon, out } => {
                assert_eq!(icon.icon, "home");
                assert_eq!(out, Some(PathBuf::from("home.svg")));
            }
            other => panic!("expected fetch command, got: {other:?}"),
        }
    }
}

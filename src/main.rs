use clap::Parser;
use directories::ProjectDirs;
use std::{
    env, io,
    path::{Path, PathBuf},
};
use wavedeck::{
    init_logging, Config, ConfigLoadError, Deck, ExportOptions, Presenter, PresenterOptions, TextExporter, ThemeColor,
};

/// Present seismic waves from your terminal.
#[derive(Parser)]
#[command()]
#[command(author, version, about = create_splash())]
struct Cli {
    /// The path to the YAML file that contains the deck. The built-in deck is used if none is given.
    path: Option<PathBuf>,

    /// The path to the configuration file.
    #[clap(short, long)]
    config_file: Option<PathBuf>,

    /// The theme used by slides that don't declare one.
    #[clap(short, long)]
    theme: Option<ThemeColor>,

    /// The slide to start at, starting from 1.
    #[clap(long, default_value_t = 1)]
    start_slide: usize,

    /// Export every slide as plain text into stdout rather than presenting.
    #[clap(long)]
    export_text: bool,

    /// The number of columns used when exporting.
    #[clap(long, default_value_t = 100)]
    columns: u16,

    /// The number of rows used when exporting.
    #[clap(long, default_value_t = 30)]
    rows: u16,

    /// List all supported themes.
    #[clap(long)]
    list_themes: bool,

    /// Write logs into this file.
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// Don't play entrance animations.
    #[clap(long)]
    no_animations: bool,
}

fn create_splash() -> String {
    let crate_version = env!("CARGO_PKG_VERSION");

    format!(
        r#"
  ┬ ┬┌─┐┬  ┬┌─┐┌┬┐┌─┐┌─┐┬┌─
  │││├─┤└┐┌┘├┤  ││├┤ │  ├┴┐
  └┴┘┴ ┴ └┘ └─┘─┴┘└─┘└─┘┴ ┴ v{crate_version}
    Seismic waves, in your terminal
"#,
    )
}

fn load_config(config_file_path: Option<PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    // An explicitly given file must exist, the default one is optional.
    if let Some(path) = config_file_path {
        return Ok(Config::load(&path)?);
    }
    let configs_path: PathBuf = match env::var("XDG_CONFIG_HOME") {
        Ok(path) => Path::new(&path).join("wavedeck"),
        Err(_) => {
            let Some(project_dirs) = ProjectDirs::from("", "", "wavedeck") else {
                return Ok(Default::default());
            };
            project_dirs.config_dir().into()
        }
    };
    match Config::load(&configs_path.join("config.yaml")) {
        Ok(config) => Ok(config),
        Err(ConfigLoadError::NotFound) => Ok(Default::default()),
        Err(e) => Err(e.into()),
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.list_themes {
        for theme in ThemeColor::all() {
            println!("{theme}");
        }
        return Ok(());
    }

    let mut config = load_config(cli.config_file)?;
    if cli.log_file.is_some() {
        config.logging.path = cli.log_file;
    }
    // Keep this alive until the end so pending logs are flushed.
    let _guard = init_logging(&config.logging)?;

    let mut deck = match &cli.path {
        Some(path) => Deck::load(path)?,
        None => Deck::builtin()?,
    };
    if let Some(direction) = config.defaults.direction {
        deck.set_direction(direction);
    }
    let default_theme = cli.theme.unwrap_or(config.defaults.theme);
    if cli.export_text {
        let options = ExportOptions { columns: cli.columns, rows: cli.rows, default_theme };
        let mut exporter = TextExporter::new(deck, options);
        exporter.export(io::stdout().lock())?;
        return Ok(());
    }

    let options = PresenterOptions {
        default_theme,
        animations: config.defaults.animations && !cli.no_animations,
        max_columns: config.defaults.max_columns,
        start_slide: cli.start_slide.saturating_sub(1),
    };
    let presenter = Presenter::new(deck, config.bindings, options)?;
    presenter.present()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

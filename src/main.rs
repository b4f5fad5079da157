use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use delve::{EditorConfig, EditorSession, RenderOptions, Viewport, parse_script, render_layer};
use delve_catalog::{ModeCatalog, SelectionStyle};
use delve_grid::Grid;

#[derive(Parser)]
#[command(name = "delve", about = "Layered tile-grid map editor")]
struct Cli {
    /// TOML config; missing file means defaults
    #[arg(long, default_value = "delve.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Create a map filled with the configured material
    New {
        /// Output map file
        #[arg(long, short)]
        out: PathBuf,
        #[arg(long)]
        layers: Option<usize>,
        #[arg(long)]
        rows: Option<usize>,
        #[arg(long)]
        columns: Option<usize>,
    },
    /// Print one layer as it would be drawn
    Render {
        map: PathBuf,
        /// Layer to view (default: config start layer, else the middle)
        #[arg(long)]
        layer: Option<usize>,
        /// 24-bit ANSI colors
        #[arg(long)]
        ansi: bool,
        #[arg(long, default_value_t = 0)]
        left: usize,
        #[arg(long, default_value_t = 0)]
        top: usize,
        #[arg(long, default_value_t = 80)]
        width: usize,
        #[arg(long, default_value_t = 40)]
        height: usize,
    },
    /// Apply a command script to a map and save the result
    Run {
        map: PathBuf,
        script: PathBuf,
        /// Write here instead of overwriting the input map
        #[arg(long, short)]
        out: Option<PathBuf>,
        /// Print the final layer after the script runs
        #[arg(long)]
        render: bool,
    },
    /// List the edit modes
    Modes,
}

fn render_options(cfg: &EditorConfig, viewport: Viewport, ansi: bool) -> Result<RenderOptions, Box<dyn Error>> {
    Ok(RenderOptions {
        viewport,
        ansi,
        selection: cfg.selection_color()?,
        cursor: cfg.cursor_color()?,
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let cfg = EditorConfig::load_or_default(&cli.config);

    match cli.command {
        Cmd::New {
            out,
            layers,
            rows,
            columns,
        } => {
            let grid = Grid::new(
                layers.unwrap_or(cfg.grid.layers),
                rows.unwrap_or(cfg.grid.rows),
                columns.unwrap_or(cfg.grid.columns),
                cfg.grid.fill,
            )?;
            delve_io::save(&grid, &out)?;
        }
        Cmd::Render {
            map,
            layer,
            ansi,
            left,
            top,
            width,
            height,
        } => {
            let grid = delve_io::load(&map)?;
            let mut session = EditorSession::from_config(grid, &cfg)?;
            if let Some(layer) = layer {
                session.set_layer(layer);
            }
            let viewport = Viewport {
                left,
                top,
                width,
                height,
            };
            print!("{}", render_layer(&session, &render_options(&cfg, viewport, ansi)?)?);
        }
        Cmd::Run {
            map,
            script,
            out,
            render,
        } => {
            let grid = delve_io::load(&map)?;
            let src = fs::read_to_string(&script)?;
            let commands = parse_script(&src)?;
            let mut session = EditorSession::from_config(grid, &cfg)?;
            let mut failed = 0usize;
            for cmd in commands {
                if let Err(e) = session.apply(cmd) {
                    failed += 1;
                    log::warn!(target: "session", "{:?}: {}", cmd, e);
                }
            }
            log::info!(
                "script {} done: cursor ({}, {}) on layer {}, {} command(s) reported errors",
                script.display(),
                session.cursor().column,
                session.cursor().row,
                session.layer(),
                failed
            );
            if render {
                let grid = session.grid();
                let viewport = Viewport::full(grid.columns(), grid.rows());
                print!("{}", render_layer(&session, &render_options(&cfg, viewport, false)?)?);
            }
            delve_io::save(session.grid(), out.as_ref().unwrap_or(&map))?;
        }
        Cmd::Modes => {
            let catalog = ModeCatalog::load()?;
            for (mode, desc) in catalog.iter() {
                let kind = match (desc.style, desc.footprint) {
                    (SelectionStyle::Fixed, Some(fp)) => format!("fixed {}x{}", fp.width, fp.height),
                    (SelectionStyle::Fixed, None) => "fixed".to_string(),
                    (SelectionStyle::Free, _) => "free".to_string(),
                    (SelectionStyle::Copy, _) => "copy".to_string(),
                };
                let recipe = match desc.style {
                    SelectionStyle::Free => desc
                        .recipe
                        .iter()
                        .map(|e| format!("{}:{}", e.material.name(), e.weight))
                        .collect::<Vec<_>>()
                        .join(" "),
                    SelectionStyle::Fixed => format!("{} cells", desc.recipe.len()),
                    SelectionStyle::Copy => String::new(),
                };
                println!("{:<12} {:<20} {:<10} {}", mode.key(), desc.label, kind, recipe);
            }
        }
    }
    Ok(())
}

use bubblemap::render::raster::{self, RasterError, RasterOptions};
use bubblemap::render::{CanvasConfig, MemoryMap, SvgRenderOptions, render_html, render_svg};
use bubblemap::{BubbleNode, NodeDetails, OrganicShape, dataset};
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Core(bubblemap::Error),
    Render(bubblemap::render::Error),
    Raster(RasterError),
    Json(serde_json::Error),
    UnknownNode(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::UnknownNode(id) => write!(f, "no node with id {id:?} on the map"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<bubblemap::Error> for CliError {
    fn from(value: bubblemap::Error) -> Self {
        Self::Core(value)
    }
}

impl From<bubblemap::render::Error> for CliError {
    fn from(value: bubblemap::render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
enum Command {
    #[default]
    Render,
    Nodes,
    Shape(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Html,
    Png,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "html" | "htm" => Ok(Self::Html),
            "png" => Ok(Self::Png),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    pretty: bool,
    format: RenderFormat,
    hover: Option<String>,
    config: Option<String>,
    viewport_width: Option<f64>,
    viewport_height: Option<f64>,
    scale: f32,
    out: Option<String>,
}

fn usage() -> &'static str {
    "bubblemap-cli\n\
\n\
USAGE:\n\
  bubblemap-cli [render] [--format svg|html|png] [--hover <node-id>] [--config <path>] [--viewport-width <w>] [--viewport-height <h>] [--scale <n>] [--out <path>]\n\
  bubblemap-cli nodes [--pretty]\n\
  bubblemap-cli shape <id>\n\
\n\
NOTES:\n\
  - render mounts the built-in map, lets the center-view animation finish, then writes it.\n\
  - --hover parks the pointer over a node so its detail card is open in the output.\n\
  - --config reads a JSON canvas config (camelCase keys; missing keys keep defaults).\n\
  - SVG and HTML go to stdout unless --out is given; PNG defaults to ./out.png.\n\
  - Set BUBBLEMAP_LOG (e.g. BUBBLEMAP_LOG=debug) to see logs on stderr.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        scale: 1.0,
        ..Default::default()
    };
    let mut saw_command = false;

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" if !saw_command => {
                saw_command = true;
                args.command = Command::Render;
            }
            "nodes" if !saw_command => {
                saw_command = true;
                args.command = Command::Nodes;
            }
            "shape" if !saw_command => {
                saw_command = true;
                args.command = Command::Shape(next_value(&mut it)?.clone());
            }
            "--pretty" => args.pretty = true,
            "--format" => {
                args.format = next_value(&mut it)?
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--hover" => args.hover = Some(next_value(&mut it)?.clone()),
            "--config" => args.config = Some(next_value(&mut it)?.clone()),
            "--viewport-width" => {
                args.viewport_width = Some(parse_dimension(next_value(&mut it)?)?);
            }
            "--viewport-height" => {
                args.viewport_height = Some(parse_dimension(next_value(&mut it)?)?);
            }
            "--scale" => {
                args.scale = next_value(&mut it)?
                    .parse::<f32>()
                    .map_err(|_| CliError::Usage(usage()))?;
                if !(args.scale.is_finite() && args.scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--out" => args.out = Some(next_value(&mut it)?.clone()),
            _ => return Err(CliError::Usage(usage())),
        }
    }

    Ok(args)
}

fn parse_dimension(raw: &str) -> Result<f64, CliError> {
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(CliError::Usage(usage()))
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn load_config(args: &Args) -> Result<CanvasConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => CanvasConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => CanvasConfig::default(),
    };
    if let Some(w) = args.viewport_width {
        config.viewport_width = w;
    }
    if let Some(h) = args.viewport_height {
        config.viewport_height = h;
    }
    Ok(config)
}

/// One row of `nodes` output: the authored node plus everything derived from it.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeRow<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    x: f64,
    y: f64,
    label: &'a str,
    category: &'static str,
    size: &'static str,
    diameter: f64,
    border_radius: String,
    bubble_class: &'static str,
    accent_class: &'static str,
    details: Option<&'a NodeDetails>,
}

impl<'a> NodeRow<'a> {
    fn new(node: &'a BubbleNode) -> Self {
        Self {
            id: &node.id,
            kind: &node.kind,
            x: node.position.x,
            y: node.position.y,
            label: &node.label,
            category: node.category.as_str(),
            size: node.resolved_size().as_str(),
            diameter: node.diameter(),
            border_radius: OrganicShape::from_id(&node.id).to_css(),
            bubble_class: node.category.bubble_class(),
            accent_class: node.category.accent_class(),
            details: node.details.as_ref(),
        }
    }
}

fn run_render(args: &Args) -> Result<(), CliError> {
    let config = load_config(args)?;
    let mut map = MemoryMap::bubble_english_with_config(config)?;
    map.mount();
    map.settle();
    if let Some(id) = args.hover.as_deref() {
        if map.canvas().nodes().get(id).is_none() {
            return Err(CliError::UnknownNode(id.to_string()));
        }
        if !map.hover_node(id) {
            tracing::warn!(node = id, "node is covered by chrome; rendering without hover");
        }
    }
    tracing::debug!(format = ?args.format, hover = ?map.canvas().hovered(), "rendering");

    let svg_options = SvgRenderOptions::default();
    match args.format {
        RenderFormat::Svg => write_text(&render_svg(&map, &svg_options), args.out.as_deref()),
        RenderFormat::Html => write_text(&render_html(&map, &svg_options), args.out.as_deref()),
        RenderFormat::Png => {
            let raster_options = RasterOptions {
                scale: args.scale,
                background: None,
            };
            let png = raster::render_png(&map, &svg_options, &raster_options)?;
            let out = args.out.as_deref().unwrap_or("out.png");
            std::fs::write(out, png)?;
            Ok(())
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    match &args.command {
        Command::Render => run_render(&args),
        Command::Nodes => {
            let nodes = dataset::bubble_english()?;
            let rows: Vec<NodeRow<'_>> = nodes.iter().map(NodeRow::new).collect();
            write_json(&rows, args.pretty)
        }
        Command::Shape(id) => {
            println!("{}", OrganicShape::from_id(id).to_css());
            Ok(())
        }
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("BUBBLEMAP_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("bubblemap-cli")
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn bare_invocation_renders_svg() {
        let args = parse_args(&argv(&[])).expect("args");
        assert_eq!(args.command, Command::Render);
        assert_eq!(args.format, RenderFormat::Svg);
        assert_eq!(args.scale, 1.0);
    }

    #[test]
    fn render_flags_are_collected() {
        let args = parse_args(&argv(&[
            "render",
            "--format",
            "PNG",
            "--hover",
            "4",
            "--viewport-width",
            "640",
            "--scale",
            "2",
            "--out",
            "map.png",
        ]))
        .expect("args");
        assert_eq!(args.format, RenderFormat::Png);
        assert_eq!(args.hover.as_deref(), Some("4"));
        assert_eq!(args.viewport_width, Some(640.0));
        assert_eq!(args.viewport_height, None);
        assert_eq!(args.scale, 2.0);
        assert_eq!(args.out.as_deref(), Some("map.png"));
    }

    #[test]
    fn shape_takes_the_id() {
        let args = parse_args(&argv(&["shape", "1"])).expect("args");
        assert_eq!(args.command, Command::Shape("1".to_string()));
    }

    #[test]
    fn bad_input_is_a_usage_error() {
        for bad in [
            &["--format", "gif"][..],
            &["--scale", "0"],
            &["--viewport-width", "-5"],
            &["shape"],
            &["render", "nodes"],
            &["--what"],
        ] {
            assert!(
                matches!(parse_args(&argv(bad)), Err(CliError::Usage(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn config_flags_override_file_values() {
        let args = Args {
            viewport_height: Some(480.0),
            ..Default::default()
        };
        let config = load_config(&args).expect("config");
        assert_eq!(config.viewport_height, 480.0);
        assert_eq!(config.viewport_width, 1280.0);
    }
}

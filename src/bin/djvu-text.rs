//! Search and select DjVu hidden text from the command line
//!
//! Reads a page's hidden text (as printed by `djvused -e print-txt`, or the
//! JSON written by the `json` command) and runs one operation on it.
//!
//! Usage:
//!   djvu-text search <file> <query> [--case-sensitive] [--whole-word] [--regex] [--max N]
//!   djvu-text select <file> <x1> <y1> <x2> <y2> [--rotation DEG] [--native]
//!   djvu-text dump <file>
//!   djvu-text json <file>
//!
//! Common options:
//!   --width W, --height H   page size in page units (default: root zone size times scale)
//!   --scale S               page units per native unit (default 0.2)
//!   --strict                fail on malformed zones instead of dropping them
//!
//! Set `RUST_LOG=debug` to see what the parser and walkers skip.

use djvu_text::config::PageTextConfig;
use djvu_text::geometry::{Rect, Rotation};
use djvu_text::page::TextPage;
use djvu_text::parser_config::ParseOptions;
use djvu_text::search::SearchOptions;
use djvu_text::zone::{PageText, TextTree};
use std::fs;
use std::path::PathBuf;
use std::process;

const USAGE: &str = "usage: djvu-text <search|select|dump|json> <file> [args] [options]";

#[derive(Debug)]
enum Command {
    Search { query: String },
    Select { rect: Rect },
    Dump,
    Json,
}

#[derive(Debug)]
struct CliConfig {
    command: Command,
    file: PathBuf,
    width: Option<f64>,
    height: Option<f64>,
    scale: f64,
    rotation: Rotation,
    native: bool,
    strict: bool,
    search: SearchOptions,
}

impl CliConfig {
    fn from_args(args: &[String]) -> Result<Self, String> {
        let mut positional = Vec::new();
        let mut width = None;
        let mut height = None;
        let mut scale = djvu_text::geometry::DEFAULT_SCALE;
        let mut rotation = Rotation::None;
        let mut native = false;
        let mut strict = false;
        let mut search = SearchOptions::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--width" => {
                    i += 1;
                    width = Some(parse_number(args.get(i), "--width")?);
                },
                "--height" => {
                    i += 1;
                    height = Some(parse_number(args.get(i), "--height")?);
                },
                "--scale" => {
                    i += 1;
                    scale = parse_number(args.get(i), "--scale")?;
                },
                "--rotation" => {
                    i += 1;
                    rotation = parse_rotation(args.get(i))?;
                },
                "--max" => {
                    i += 1;
                    search.max_results = parse_number(args.get(i), "--max")? as usize;
                },
                "--case-sensitive" => search.case_insensitive = false,
                "--whole-word" => search.whole_word = true,
                "--regex" => search.literal = false,
                "--native" => native = true,
                "--strict" => strict = true,
                other if other.starts_with("--") => return Err(format!("unknown option {}", other)),
                other => positional.push(other.to_string()),
            }
            i += 1;
        }

        let mut positional = positional.into_iter();
        let name = positional.next().ok_or(USAGE)?;
        let file = PathBuf::from(positional.next().ok_or(USAGE)?);
        let rest: Vec<String> = positional.collect();

        let command = match name.as_str() {
            "search" => match rest.as_slice() {
                [query] => Command::Search { query: query.clone() },
                _ => return Err("search takes exactly one query".to_string()),
            },
            "select" => {
                if rest.len() != 4 {
                    return Err("select takes four coordinates: x1 y1 x2 y2".to_string());
                }
                let mut coords = [0.0; 4];
                for (slot, value) in coords.iter_mut().zip(&rest) {
                    *slot = parse_number(Some(value), "coordinate")?;
                }
                Command::Select {
                    rect: Rect::new(coords[0], coords[1], coords[2], coords[3]),
                }
            },
            "dump" => Command::Dump,
            "json" => Command::Json,
            other => return Err(format!("unknown command {}\n{}", other, USAGE)),
        };

        Ok(Self {
            command,
            file,
            width,
            height,
            scale,
            rotation,
            native,
            strict,
            search,
        })
    }

    /// Page size from the explicit options, falling back to the root zone.
    fn page_size(&self, tree: &PageText) -> (f64, f64) {
        let native = tree
            .root()
            .and_then(|root| tree.rect(root))
            .unwrap_or_default();
        let width = self.width.unwrap_or(native.x2 * self.scale);
        let height = self.height.unwrap_or(native.y2 * self.scale);
        (width, height)
    }
}

fn parse_number(value: Option<&String>, what: &str) -> Result<f64, String> {
    let value = value.ok_or_else(|| format!("{} needs a value", what))?;
    value
        .parse::<f64>()
        .map_err(|_| format!("{}: {:?} is not a number", what, value))
}

fn parse_rotation(value: Option<&String>) -> Result<Rotation, String> {
    let value = value.ok_or("--rotation needs a value")?;
    value
        .parse::<i32>()
        .ok()
        .and_then(Rotation::from_degrees)
        .ok_or_else(|| format!("--rotation must be 0, 90, 180 or 270, got {:?}", value))
}

fn load_tree(config: &CliConfig) -> djvu_text::Result<PageText> {
    let source = fs::read_to_string(&config.file)?;
    if source.trim_start().starts_with('{') {
        return PageText::from_json(&source);
    }

    let options = if config.strict {
        ParseOptions::strict()
    } else {
        ParseOptions::lenient()
    };
    PageText::parse(&source, &options)
}

fn run(config: &CliConfig) -> Result<bool, Box<dyn std::error::Error>> {
    let tree = load_tree(config)?;
    log::info!("Loaded {} zones from {}", tree.len(), config.file.display());

    let page_config = PageTextConfig::new().with_scale(config.scale);
    let (width, height) = config.page_size(&tree);
    let page = TextPage::from_config(&tree, &page_config, width, height).with_rotation(config.rotation);

    match &config.command {
        Command::Search { query } => {
            let results = page.search(query, &config.search)?;
            println!("{}", serde_json::to_string_pretty(&results)?);
            Ok(!results.is_empty())
        },
        Command::Select { rect } => {
            let selected = if config.native {
                page.select_native(rect)
            } else {
                page.select_text(rect)
            };
            match selected {
                Some(text) => {
                    println!("{}", text);
                    Ok(true)
                },
                None => {
                    eprintln!("No text under {}", rect);
                    Ok(false)
                },
            }
        },
        Command::Dump => {
            println!("{}", page.flatten().text);
            Ok(true)
        },
        Command::Json => {
            println!("{}", tree.to_json()?);
            Ok(true)
        },
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match CliConfig::from_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(2);
        },
    };

    match run(&config) {
        Ok(true) => {},
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        },
    }
}

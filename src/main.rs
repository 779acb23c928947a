//! Cardsmith CLI
//!
//! Usage:
//!   cardsmith card --template <FILE> --card <FILE> [--debug] [-o <FILE>]
//!   cardsmith preview --template <FILE> [--select section:<ID>|item:<ID>]
//!   cardsmith batch --template <FILE> --cards <FILE> --out-dir <DIR>
//!   cardsmith starter
//!
//! Set RUST_LOG=debug to see attach fallbacks and render summaries.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use clap::{Args, Parser, Subcommand};

use cardsmith::{
    render_card_with_config, render_template_preview_with_config, CardData, ItemKind,
    RenderConfig, Section, Selection, SvgConfig, Template, Theme,
};

#[derive(Parser)]
#[command(name = "cardsmith")]
#[command(about = "Lay out card templates and render cards as SVG")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one card (the first one if the card file holds a list)
    Card {
        #[command(flatten)]
        render: RenderArgs,

        /// Card data file (JSON)
        #[arg(short, long)]
        card: PathBuf,

        /// Debug mode: outline items and mark anchors and attach points
        #[arg(short, long)]
        debug: bool,

        /// Inline local image files as data URIs
        #[arg(long)]
        embed_images: bool,

        /// Output file (prints to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render the template structure with an optional highlighted node
    Preview {
        #[command(flatten)]
        render: RenderArgs,

        /// Node to highlight, as section:<id> or item:<id>
        #[arg(long)]
        select: Option<Selection>,

        /// Output file (prints to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render every card of a list into a directory, one <id>.svg per card
    Batch {
        #[command(flatten)]
        render: RenderArgs,

        /// Card list file (JSON array or a single card)
        #[arg(long)]
        cards: PathBuf,

        /// Directory for the rendered files
        #[arg(long)]
        out_dir: PathBuf,

        /// Debug mode: outline items and mark anchors and attach points
        #[arg(short, long)]
        debug: bool,

        /// Inline local image files as data URIs
        #[arg(long)]
        embed_images: bool,
    },

    /// Print the starter template as JSON
    Starter,
}

#[derive(Args)]
struct RenderArgs {
    /// Template file (JSON)
    #[arg(short, long)]
    template: PathBuf,

    /// Theme file for palette and fonts (TOML format)
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Write single-line SVG without indentation
    #[arg(long)]
    compact: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(message) = run(cli.command) {
        eprintln!("{}", message);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Card {
            render,
            card,
            debug,
            embed_images,
            output,
        } => {
            let template = load_template(&render.template)?;
            let config = load_config(&render)?.with_debug(debug);
            let mut cards = load_cards(&card)?;
            if cards.is_empty() {
                return Err(format!("Error: no cards in '{}'", card.display()));
            }
            let mut card_data = cards.swap_remove(0);
            if embed_images {
                embed_image_fields(&template, &mut card_data, base_dir(&card));
            }
            let svg = render_card_with_config(&template, &card_data, &config);
            write_output(output.as_deref(), &svg)
        }
        Command::Preview {
            render,
            select,
            output,
        } => {
            let template = load_template(&render.template)?;
            let config = load_config(&render)?;
            let svg = render_template_preview_with_config(&template, select.as_ref(), &config);
            write_output(output.as_deref(), &svg)
        }
        Command::Batch {
            render,
            cards,
            out_dir,
            debug,
            embed_images,
        } => {
            let template = load_template(&render.template)?;
            let config = load_config(&render)?.with_debug(debug);
            let card_list = load_cards(&cards)?;
            fs::create_dir_all(&out_dir).map_err(|e| {
                format!("Error creating directory '{}': {}", out_dir.display(), e)
            })?;

            for (i, mut card) in card_list.into_iter().enumerate() {
                if embed_images {
                    embed_image_fields(&template, &mut card, base_dir(&cards));
                }
                let svg = render_card_with_config(&template, &card, &config);
                let path = out_dir.join(format!("{}.svg", output_stem(&card, i)));
                write_output(Some(&path), &svg)?;
                eprintln!("wrote {}", path.display());
            }
            Ok(())
        }
        Command::Starter => {
            let json = Template::default()
                .to_json()
                .map_err(|e| format!("Error: {}", e))?;
            println!("{}", json);
            Ok(())
        }
    }
}

fn read_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Error reading file '{}': {}", path.display(), e))
}

fn load_template(path: &Path) -> Result<Template, String> {
    let source = read_file(path)?;
    Template::from_json(&source).map_err(|e| e.format(&source, &path.display().to_string()))
}

fn load_cards(path: &Path) -> Result<Vec<CardData>, String> {
    let source = read_file(path)?;
    CardData::list_from_json(&source).map_err(|e| e.format(&source, &path.display().to_string()))
}

fn load_config(args: &RenderArgs) -> Result<RenderConfig, String> {
    let theme = match &args.theme {
        Some(path) => Theme::from_file(path)
            .map_err(|e| format!("Error loading theme '{}': {}", path.display(), e))?,
        None => Theme::default(),
    };
    let svg = SvgConfig::default().with_pretty_print(!args.compact);
    Ok(RenderConfig::new().with_theme(theme).with_svg(svg))
}

fn write_output(path: Option<&Path>, svg: &str) -> Result<(), String> {
    match path {
        Some(path) => fs::write(path, svg)
            .map_err(|e| format!("Error writing file '{}': {}", path.display(), e)),
        None => {
            println!("{}", svg);
            Ok(())
        }
    }
}

fn base_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

/// File stem for a batch output: the card id made path-safe, or its position
fn output_stem(card: &CardData, index: usize) -> String {
    let stem: String = card
        .id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if stem.is_empty() {
        format!("card-{}", index + 1)
    } else {
        stem
    }
}

/// Replace image field values naming readable local files with data URIs.
///
/// Relative paths resolve against `base`. URLs, existing data URIs and
/// unreadable paths are left untouched.
fn embed_image_fields(template: &Template, card: &mut CardData, base: &Path) {
    let mut field_ids = vec![];
    collect_image_fields(&template.root, &mut field_ids);

    for field_id in field_ids {
        let Some(value) = card.fields.get_mut(&field_id) else {
            continue;
        };
        if value.is_empty() || value.starts_with("data:") || value.contains("://") {
            continue;
        }
        let path = base.join(value.as_str());
        match fs::read(&path) {
            Ok(bytes) => {
                log::debug!("embedding {} for field '{}'", path.display(), field_id);
                *value = format!(
                    "data:{};base64,{}",
                    mime_for(&path),
                    BASE64_STANDARD.encode(bytes)
                );
            }
            Err(e) => log::warn!("not embedding '{}': {}", path.display(), e),
        }
    }
}

fn collect_image_fields(section: &Section, out: &mut Vec<String>) {
    for item in &section.items {
        if let ItemKind::Image(image) = &item.kind {
            if !out.contains(&image.field_id) {
                out.push(image.field_id.clone());
            }
        }
    }
    for child in &section.children {
        collect_image_fields(child, out);
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardsmith::{Item, SectionLayout};

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(mime_for(Path::new("a/b.PNG")), "image/png");
        assert_eq!(mime_for(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("icon.svg")), "image/svg+xml");
        assert_eq!(mime_for(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_output_stem() {
        assert_eq!(output_stem(&CardData::new("ember/01", "x"), 0), "ember01");
        assert_eq!(output_stem(&CardData::new("", "x"), 2), "card-3");
    }

    #[test]
    fn test_embed_image_fields() {
        let dir = std::env::temp_dir().join(format!("cardsmith-embed-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("art.png"), [1u8, 2, 3]).unwrap();

        let template = Template::new(
            "t",
            Section::new("root", SectionLayout::Stack)
                .with_item(Item::image("art", "art"))
                .with_item(Item::image("remote", "remote"))
                .with_item(Item::image("gone", "gone")),
        );
        let mut card = CardData::new("c", "x")
            .with_field("art", "art.png")
            .with_field("remote", "https://example.com/a.png")
            .with_field("gone", "missing.png");
        embed_image_fields(&template, &mut card, &dir);

        assert_eq!(card.field("art"), "data:image/png;base64,AQID");
        assert_eq!(card.field("remote"), "https://example.com/a.png");
        assert_eq!(card.field("gone"), "missing.png");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_cli_parses_selection() {
        let cli = Cli::try_parse_from([
            "cardsmith",
            "preview",
            "--template",
            "t.json",
            "--select",
            "item:title",
        ])
        .unwrap();
        match cli.command {
            Command::Preview { select, .. } => assert_eq!(select, Some(Selection::item("title"))),
            _ => panic!("expected preview"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_selection() {
        let result = Cli::try_parse_from([
            "cardsmith",
            "preview",
            "--template",
            "t.json",
            "--select",
            "widget:title",
        ]);
        assert!(result.is_err());
    }
}

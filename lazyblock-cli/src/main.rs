mod config;

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use lazyblock_core::block::Block;
use lazyblock_core::engine::{render_block_for_input, render_block_for_output};
use lazyblock_core::file_storage::{
    delete_block, list_block_entries, load_block, rename_block_folder, save_block,
    validate_folder_name,
};

#[derive(Parser, Debug)]
#[command(version,
display_name = "lazyblock",
bin_name = "lazyblock",
about = "Author and apply reusable text blocks",
long_about = "Author and apply reusable text blocks", )]
struct Args {
    /// Folder holding the block folders; overrides the configured default
    #[arg(short = 'p', long)]
    blocks_path: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// List the blocks stored under the blocks folder
    List,
    /// Print one block's definition and validation state
    Show {
        #[arg(short = 'n', long)]
        name: String,
    },
    /// Create a new block folder
    Create {
        #[arg(short = 'n', long)]
        name: String,
        #[arg(short = 'd', long)]
        display_text: String,
        #[arg(short = 'i', long)]
        input_template: String,
        #[arg(short = 'o', long)]
        output_template: String,
        /// Declared input indices; derived from the templates when omitted
        #[arg(long, value_delimiter = ',')]
        inputs: Vec<u32>,
    },
    /// Fill in a block's placeholders and print both renditions
    Render {
        #[arg(short = 'n', long)]
        name: String,
        /// A placeholder value as INDEX=TEXT; prompts on stdin when omitted
        #[arg(short = 'v', long, value_parser = parse_value)]
        value: Vec<(u32, String)>,
        /// Copy the output rendition to the clipboard
        #[arg(short = 'c', long)]
        copy: bool,
    },
    /// Rename a block folder and the record inside it
    Rename {
        #[arg(short = 'n', long)]
        name: String,
        #[arg(long)]
        to: String,
    },
    /// Delete a block folder
    Delete {
        #[arg(short = 'n', long)]
        name: String,
    },
}

fn parse_value(raw: &str) -> Result<(u32, String), String> {
    let (index, text) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=TEXT, got {raw:?}"))?;
    let index = index
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid placeholder index {index:?}"))?;
    Ok((index, text.to_string()))
}

fn format_indices(indices: &[u32]) -> String {
    indices
        .iter()
        .map(|idx| idx.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let root = args.blocks_path.unwrap_or_else(config::blocks_root);

    match args.cmd {
        Commands::List => list(&root),
        Commands::Show { name } => show(&root, &name),
        Commands::Create {
            name,
            display_text,
            input_template,
            output_template,
            inputs,
        } => create(&root, name, display_text, input_template, output_template, inputs),
        Commands::Render { name, value, copy } => render(&root, &name, value, copy),
        Commands::Rename { name, to } => rename(&root, &name, &to),
        Commands::Delete { name } => delete(&root, &name),
    }
}

fn list(root: &Path) -> anyhow::Result<()> {
    let entries = list_block_entries(root)
        .with_context(|| format!("failed to list blocks under {}", root.display()))?;
    if entries.is_empty() {
        println!("no blocks under {}", root.display());
        return Ok(());
    }
    for (block, _) in &entries {
        println!("{}  {}", block.name, block.display_text);
    }
    Ok(())
}

fn show(root: &Path, name: &str) -> anyhow::Result<()> {
    let block = load_block(&root.join(name))?;

    println!("name: {}", block.name);
    println!("display text: {}", block.display_text);
    println!("input template:\n{}", block.input_template);
    println!("output template:\n{}", block.output_template);
    println!("declared inputs: [{}]", format_indices(&block.inputs));
    println!(
        "required inputs: [{}]",
        format_indices(&block.required_input_indices())
    );

    let validation = block.validate();
    if validation.is_valid() {
        println!("validation: ok");
    } else {
        if !validation.missing_inputs.is_empty() {
            println!(
                "validation: missing inputs {}",
                format_indices(&validation.missing_inputs)
            );
        }
        if !validation.unused_inputs.is_empty() {
            println!(
                "validation: unused inputs {}",
                format_indices(&validation.unused_inputs)
            );
        }
    }
    Ok(())
}

fn create(
    root: &Path,
    name: String,
    display_text: String,
    input_template: String,
    output_template: String,
    inputs: Vec<u32>,
) -> anyhow::Result<()> {
    validate_folder_name(&name)?;
    let location = root.join(&name);
    if location.exists() {
        bail!("a block folder already exists at {}", location.display());
    }

    let mut block = Block::new(name, display_text, input_template, output_template, inputs);
    if block.inputs.is_empty() {
        block.inputs = block.used_placeholder_indices();
    }

    save_block(&block, &location)?;
    println!("created block {} at {}", block.name, location.display());
    Ok(())
}

fn render(root: &Path, name: &str, value: Vec<(u32, String)>, copy: bool) -> anyhow::Result<()> {
    let block = load_block(&root.join(name))?;

    let validation = block.validate();
    if !validation.missing_inputs.is_empty() {
        eprintln!(
            "warning: block is missing declared inputs: {}",
            format_indices(&validation.missing_inputs)
        );
    }

    let values: HashMap<u32, String> = if value.is_empty() {
        prompt_for_inputs(&block)?
    } else {
        value.into_iter().collect()
    };

    let input_rendition = render_block_for_input(&block, &values);
    let output_rendition = render_block_for_output(&block, &values);

    println!("--- input ---");
    println!("{input_rendition}");
    println!("--- output ---");
    println!("{output_rendition}");

    if copy {
        let mut clipboard = arboard::Clipboard::new().context("failed to open the clipboard")?;
        clipboard
            .set_text(output_rendition)
            .context("failed to copy the output rendition")?;
        eprintln!("copied the output rendition to the clipboard");
    }
    Ok(())
}

fn prompt_for_inputs(block: &Block) -> anyhow::Result<HashMap<u32, String>> {
    let mut values = HashMap::new();
    for idx in block.required_input_indices() {
        print!("輸入文字({idx}): ");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin()
            .read_line(&mut line)
            .context("failed to read a value from stdin")?;
        values.insert(idx, line.trim_end_matches(['\r', '\n']).to_string());
    }
    Ok(values)
}

fn rename(root: &Path, name: &str, to: &str) -> anyhow::Result<()> {
    if to == name {
        println!("name unchanged; nothing to do");
        return Ok(());
    }
    let new_location = rename_block_folder(&root.join(name), to)?;
    println!("renamed block {} -> {}", name, new_location.display());
    Ok(())
}

fn delete(root: &Path, name: &str) -> anyhow::Result<()> {
    let location = root.join(name);
    if !location.exists() {
        println!("no block folder at {}; nothing to delete", location.display());
        return Ok(());
    }
    delete_block(&location)?;
    println!("deleted block {name}");
    Ok(())
}

//! Build automation tasks for pmviz
//!
//! Run with `cargo run -p xtask -- <task>`.

use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for pmviz", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the pmviz CLI reference in markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    let markdown = clap_markdown::help_markdown::<pmviz_convert::Cli>();

    let content = format!(
        r#"# pmviz CLI Reference

Generated from the CLI source code on {}.

pmviz reads the ProtMiscuity `proteina.csv` and `sitio_activo.csv` tables
from `<base>/tablas` and writes one ProViz track file per protein to
`<base>/proviz-json/json/<accession>.json`.

{}

## Environment Variables

- `PMVIZ_BASE_PATH`, `PMVIZ_DATA_DIR`, `PMVIZ_OUTPUT_DIR` - same as the flags
- `PMVIZ_PROTEIN_TABLE`, `PMVIZ_SITE_TABLE` - input file names
- `PMVIZ_JSON_STYLE` - `compact` (default) or `pretty`
- `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT`, `LOG_DIR`, `LOG_FILTER` - logging

---

*To update, run `cargo run -p xtask -- generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)?;

    let file_path = output_path.join("cli-reference.md");
    fs::write(&file_path, content)?;

    println!("Generated CLI documentation at: {}", file_path.display());
    Ok(())
}

use std::fs::File;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

use cropview::{PageCache, ViewError};

/// Dump per-page images of a PDF for the margin-cropping pipeline
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// PDF file to open
    input: PathBuf,

    /// Directory for the rendered page images
    #[arg(short, long, default_value = "pages")]
    out_dir: PathBuf,

    /// Write a debug log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        match File::create(path) {
            Ok(file) => {
                let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), file);
            }
            Err(err) => eprintln!("could not open log file '{}': {err}", path.display()),
        }
    }

    if let Err(err) = run(&args) {
        fail(&format!("Error in cropview: {err:#}"), 1);
    }
}

/// Print a diagnostic and terminate with the given status.
fn fail(message: &str, code: i32) -> ! {
    error!("{message}");
    eprintln!("{message}");
    std::process::exit(code);
}

fn run(args: &Args) -> Result<()> {
    let mut cache = PageCache::new();

    let page_count = match cache.open(&args.input) {
        Ok(count) => count,
        Err(err @ ViewError::Unreadable { .. }) => {
            fail(
                &format!(
                    "\nError in cropview: {err}.\n\
                     If you have Ghostscript installed, consider repairing the file with\n\
                     'gs -o repaired.pdf -sDEVICE=pdfwrite {}' and retrying.",
                    args.input.display()
                ),
                1,
            );
        }
        Err(err) => return Err(err.into()),
    };

    info!(
        "rendering {page_count} pages from '{}'",
        args.input.display()
    );
    std::fs::create_dir_all(&args.out_dir)?;

    for page in 0..page_count {
        let image = cache.render_crop_page(page)?;
        let path = args.out_dir.join(format!("page_{page:04}.pgm"));
        std::fs::write(&path, &image.data)?;
    }

    cache.close();
    println!("wrote {page_count} pages to {}", args.out_dir.display());
    Ok(())
}

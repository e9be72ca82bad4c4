use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{arg, Parser, ValueEnum};

use crate::bootstrap::bootstrap_cmd;
use crate::build::{build_cmd, check_cmd};
use crate::post::post_cmd;

mod bootstrap;
mod build;
mod decompress;
mod post;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Creates a new post
    Post(PostArgs),
    /// Writes the whole site as static files
    Build(SiteArgs),
    /// Loads every post and reports the ones that fail
    Check(SiteArgs),
    /// Bootstraps a new site
    Bootstrap(BootstrapArgs),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct PostArgs {
    /// Name of the author. If empty, OS user real name is being used
    #[arg(short, long)]
    name: Option<String>,

    /// Title of the post
    #[arg(short, long)]
    title: Option<String>,

    /// Post generation options
    #[arg(short, long, default_value_t = PostOutput::Stdout)]
    output: PostOutput,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct SiteArgs {
    /// Config path
    #[arg(short, long, default_value = "folio.toml")]
    config_path: PathBuf,

    /// Output directory, overrides `paths.output_dir`
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct BootstrapArgs {
    /// Directory where the new site will be generated
    #[arg(short, long)]
    out_dir: String,
}

#[derive(Clone, Debug, ValueEnum)]
enum PostOutput {
    /// Writes the new post content to the stdout
    Stdout,
    /// Writes the new post content to `<slug>.mdx`
    File,
}

impl Display for PostOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PostOutput::Stdout => write!(f, "stdout"),
            PostOutput::File => write!(f, "file"),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let res = match args {
        Args::Post(args) => post_cmd(args),
        Args::Build(args) => build_cmd(args),
        Args::Check(args) => check_cmd(args),
        Args::Bootstrap(args) => bootstrap_cmd(args),
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

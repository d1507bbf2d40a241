use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

use modelpack_pipeline::IndexWidth;

/// Convert 3D model files into flat binary asset packs.
#[derive(Debug, Parser)]
#[command(name = "modelpack", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert a model file into a .mpk asset file.
    Convert(ConvertArgs),
    /// Print a summary of each record in an existing .mpk file.
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Path of the model file to convert.
    pub model: PathBuf,

    /// Output path. Defaults to the input path with ".mpk" appended.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Index buffer width policy.
    #[arg(long, value_enum, default_value = "auto")]
    pub index_width: IndexWidthArg,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Path of the .mpk file to inspect.
    pub file: PathBuf,
}

/// Command-line surface of [`IndexWidth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IndexWidthArg {
    /// 16-bit indices when they fit, 32-bit otherwise.
    Auto,
    /// Force 16-bit; fail on overflow.
    U16,
    /// Force 32-bit.
    U32,
}

impl From<IndexWidthArg> for IndexWidth {
    fn from(arg: IndexWidthArg) -> Self {
        match arg {
            IndexWidthArg::Auto => IndexWidth::Auto,
            IndexWidthArg::U16 => IndexWidth::U16,
            IndexWidthArg::U32 => IndexWidth::U32,
        }
    }
}

/// Input path with the asset extension appended
/// (`models/chair.glb` -> `models/chair.glb.mpk`).
pub fn default_output_path(model: &Path) -> PathBuf {
    let mut os = model.as_os_str().to_os_string();
    os.push(".mpk");
    PathBuf::from(os)
}

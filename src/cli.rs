use crate::constants::DEFAULT_MAX_WIDTH;
use crate::formats::FormatChoice;
use crate::naming::NamingStrategy;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dir-squeeze",
    about = "Batch-compress every image in a directory",
    long_about = "dir-squeeze walks a directory, resizes each image to a maximum width while keeping its \
                  aspect ratio, re-encodes it to the chosen format and quality, and writes the results \
                  into a compress-{width}-{format}-{quality}/ folder next to the sources together with \
                  a plain-text report.",
    version,
    after_help = "EXAMPLES:\n  \
    dir-squeeze compress ./photos\n  \
    dir-squeeze compress ./photos -w 1280 -f jpeg -q 75 -p\n  \
    dir-squeeze compress ./photos --no-limit -f keep --naming transliterate\n  \
    dir-squeeze compress -i\n  \
    dir-squeeze samples ./test_images\n  \
    dir-squeeze check"
)]
pub struct Args {
    #[arg(short = 'Q', long, global = true, help = "Only print errors")]
    pub quiet: bool,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Print debug diagnostics",
        long_help = "Print per-file debug diagnostics on stderr. \
                     RUST_LOG overrides this when set."
    )]
    pub verbose: bool,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress all images in a directory",
        long_about = "Compress every jpg, jpeg, png, bmp, webp and tiff file under DIRECTORY. \
                      Results are written to DIRECTORY/compress-{width|orig}-{format}-{quality}/ \
                      mirroring the source tree. Earlier output folders are skipped."
    )]
    Compress(CompressArgs),

    #[command(
        about = "Show which formats this build can read and write",
        long_about = "List every supported format with its decode and encode availability. \
                      A run refuses to start when a needed codec is missing."
    )]
    Check,

    #[command(
        about = "Generate a set of test images",
        long_about = "Write JPEG, PNG and WebP test images of several sizes, including \
                      non-ASCII file names, into DIRECTORY."
    )]
    Samples {
        #[arg(help = "Directory to write the test images into")]
        directory: PathBuf,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CompressArgs {
    #[arg(
        help = "Directory containing the images",
        long_help = "Directory containing the images. When omitted every setting is asked for \
                     interactively."
    )]
    pub directory: Option<PathBuf>,

    #[arg(
        short = 'w',
        long,
        default_value_t = DEFAULT_MAX_WIDTH,
        help = "Maximum width in pixels",
        long_help = "Images wider than this are scaled down, keeping the aspect ratio. \
                     Narrower images keep their size."
    )]
    pub max_width: u32,

    #[arg(
        long,
        conflicts_with = "max_width",
        help = "Never resize"
    )]
    pub no_limit: bool,

    #[arg(
        short = 'f',
        long,
        default_value = "webp",
        help = "Output format (webp, jpeg, png, bmp, tiff, keep)",
        long_help = "Output format for every image. 'keep' re-encodes each image in the format \
                     it already has. Supported formats: webp, jpeg/jpg, png, bmp, tiff/tif, keep"
    )]
    pub format: FormatChoice,

    #[arg(
        short = 'q',
        long,
        help = "Compression quality (1-100, default: 85)",
        long_help = "Compression quality from 1 (lowest) to 100 (highest). \
                     For PNG: >=90 uses Zopfli, >=70 uses high compression, <70 uses standard compression. \
                     Ignored by BMP and TIFF."
    )]
    pub quality: Option<u8>,

    #[arg(
        short = 'p',
        long,
        help = "Keep byte-identical copies of the sources in originals/"
    )]
    pub preserve_originals: bool,

    #[arg(
        short = 'n',
        long,
        value_enum,
        default_value_t = NamingStrategy::Random,
        help = "How output files are named"
    )]
    pub naming: NamingStrategy,

    #[arg(short = 'i', long, help = "Ask for every setting on the terminal")]
    pub interactive: bool,

    #[arg(long, help = "Do not draw a progress bar")]
    pub no_progress: bool,
}

impl CompressArgs {
    /// `None` means no width limit.
    pub fn width_limit(&self) -> Option<u32> {
        if self.no_limit {
            None
        } else {
            Some(self.max_width)
        }
    }

    pub fn wants_prompt(&self) -> bool {
        self.interactive || self.directory.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::OutputFormat;
    use clap::CommandFactory;

    fn compress_args(argv: &[&str]) -> CompressArgs {
        let args = Args::try_parse_from(argv).unwrap();
        match args.command {
            Commands::Compress(compress) => compress,
            _ => panic!("expected compress"),
        }
    }

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_compress_defaults() {
        let args = compress_args(&["dir-squeeze", "compress", "photos"]);
        assert_eq!(args.directory, Some(PathBuf::from("photos")));
        assert_eq!(args.width_limit(), Some(1920));
        assert_eq!(args.format, FormatChoice::Convert(OutputFormat::WebP));
        assert_eq!(args.quality, None);
        assert_eq!(args.naming, NamingStrategy::Random);
        assert!(!args.preserve_originals);
        assert!(!args.wants_prompt());
    }

    #[test]
    fn test_compress_flags() {
        let args = compress_args(&[
            "dir-squeeze",
            "compress",
            "photos",
            "--no-limit",
            "-f",
            "keep",
            "-q",
            "70",
            "-p",
            "--naming",
            "transliterate",
        ]);
        assert_eq!(args.width_limit(), None);
        assert_eq!(args.format, FormatChoice::Keep);
        assert_eq!(args.quality, Some(70));
        assert!(args.preserve_originals);
        assert_eq!(args.naming, NamingStrategy::Transliterate);
    }

    #[test]
    fn test_missing_directory_prompts() {
        let args = compress_args(&["dir-squeeze", "compress"]);
        assert!(args.wants_prompt());
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Args::try_parse_from(["dir-squeeze", "compress", "x", "-f", "gif"]).is_err());
    }
}

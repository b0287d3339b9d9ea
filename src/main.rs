use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use clap::{ArgEnum, Parser};
use nes_mif::{convert, ConvertOptions};
use simplelog::*;

/// Converts an iNES ROM into PRG and CHR memory initialization files.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// iNES ROM to convert
    #[clap(parse(from_os_str))]
    input: PathBuf,

    /// Output files are named <PREFIX>-prg.mif and <PREFIX>-chr.mif
    #[clap(default_value_t = String::from("dump"))]
    prefix: String,

    /// Directory the output files are written to
    #[clap(short, long, parse(from_os_str), default_value = ".")]
    out_dir: PathBuf,

    #[clap(short, long, arg_enum, default_value_t = LogLevel::Info)]
    console_log_level: LogLevel,

    /// Also log to this file
    #[clap(short, long, parse(from_os_str))]
    log_file: Option<PathBuf>,

    #[clap(short, long, arg_enum, default_value_t = LogLevel::Debug)]
    file_log_level: LogLevel,
}

#[derive(ArgEnum, Copy, Clone, Debug)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

fn init_logging(args: &Args) -> Result<(), Box<dyn Error>> {
    let console_config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .build();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        args.console_log_level.as_level_filter(),
        console_config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = &args.log_file {
        loggers.push(WriteLogger::new(
            args.file_log_level.as_level_filter(),
            Config::default(),
            File::create(path)?,
        ));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}

fn main() {
    let args: Args = Args::parse();

    if let Err(e) = init_logging(&args) {
        eprintln!("Could not set up logging: {}", e);
        std::process::exit(1)
    }

    let options = ConvertOptions {
        prefix: args.prefix,
        out_dir: args.out_dir,
    };

    match convert(&args.input, &options) {
        Ok(report) => {
            log::debug!("Conversion done: {:?}", report);
        }
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1)
        }
    }
}

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use formwire::format::{decode_with, encode_with};
use formwire::{Bson, DecodeError, EncodeError, Form, Json, Record, Results};
use formwire_pack::codecs::{Codecs, DocumentCodec};
use formwire_pack::json::JsonEncoder;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "formwire",
    version,
    about = "Convert and inspect form and results documents",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Re-encode a document in another wire format
    Convert {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, value_enum, help = "Output wire format")]
        to: WireArg,
        #[arg(short, long, help = "Write here instead of stdout")]
        output: Option<PathBuf>,
        #[arg(long, help = "Indent JSON output")]
        pretty: bool,
    },
    /// Print the decoded variants, one per line
    Inspect {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    #[arg(long, value_enum, help = "Document kind")]
    kind: KindArg,
    #[arg(long, value_enum, default_value = "json", help = "Input wire format")]
    from: WireArg,
    #[arg(help = "Input file (default: stdin)")]
    path: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Form,
    Results,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum WireArg {
    Json,
    Bson,
}

fn main() {
    init_tracing();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let mut codecs = Codecs::new();
    match cli.command {
        Command::Convert {
            input,
            to,
            output,
            pretty,
        } => {
            let bytes = read_input(&input)?;
            let mut out = match input.kind {
                KindArg::Form => reencode::<Form>(&mut codecs, &bytes, input.from, to)?,
                KindArg::Results => reencode::<Results>(&mut codecs, &bytes, input.from, to)?,
            };
            if pretty && to == WireArg::Json {
                let tree = codecs.json.decode(&out)?;
                out = JsonEncoder::new().encode_pretty(&tree)?;
            }
            match output {
                Some(path) => fs::write(&path, out)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => {
                    let mut stdout = io::stdout().lock();
                    stdout.write_all(&out)?;
                    if to == WireArg::Json {
                        stdout.write_all(b"\n")?;
                    }
                }
            }
        }
        Command::Inspect { input } => {
            let bytes = read_input(&input)?;
            let mut stdout = io::stdout().lock();
            match input.kind {
                KindArg::Form => {
                    let form: Form = decode_as(&mut codecs, &bytes, input.from)?;
                    for (index, field) in form.fields.iter().enumerate() {
                        writeln!(
                            stdout,
                            "{index}\t{}\t{}\t{}",
                            field.field_type,
                            field.kind.name(),
                            field.question
                        )?;
                    }
                }
                KindArg::Results => {
                    let results: Results = decode_as(&mut codecs, &bytes, input.from)?;
                    for answer in &results.answers {
                        writeln!(stdout, "{}\t{}\t{}", answer.field_id, answer.answer_type, answer)?;
                    }
                }
            }
        }
    }
    Ok(())
}

fn read_input(args: &InputArgs) -> Result<Vec<u8>> {
    match &args.path {
        Some(path) => fs::read(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn decode_as<T: Record>(
    codecs: &mut Codecs,
    bytes: &[u8],
    wire: WireArg,
) -> Result<T, DecodeError> {
    match wire {
        WireArg::Json => decode_with::<T, Json>(codecs, bytes),
        WireArg::Bson => decode_with::<T, Bson>(codecs, bytes),
    }
}

fn encode_as<T: Record>(
    codecs: &mut Codecs,
    value: &T,
    wire: WireArg,
) -> Result<Vec<u8>, EncodeError> {
    match wire {
        WireArg::Json => encode_with::<T, Json>(codecs, value),
        WireArg::Bson => encode_with::<T, Bson>(codecs, value),
    }
}

fn reencode<T: Record>(
    codecs: &mut Codecs,
    bytes: &[u8],
    from: WireArg,
    to: WireArg,
) -> Result<Vec<u8>> {
    let value: T = decode_as(codecs, bytes, from).context("decoding input")?;
    encode_as(codecs, &value, to).context("encoding output")
}

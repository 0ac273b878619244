use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use spanfmt::{Context, Dialect, FormatError, IoSink, Options, Recorder, Render, Sink};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "spanfmt")]
#[command(version)]
#[command(about = "Template formatting engine driver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the demo lines
    Demo {
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Check a template for malformed placeholders and arity problems
    Check {
        /// Template text
        #[arg(value_name = "TEMPLATE", required_unless_present = "file")]
        template: Option<String>,

        /// Read the template from a file
        #[arg(short, long, value_name = "PATH", conflicts_with = "template")]
        file: Option<PathBuf>,

        /// Number of arguments the template will be used with
        #[arg(short, long, value_name = "N")]
        args: Option<usize>,

        #[command(flatten)]
        format: FormatArgs,

        /// Output diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a template with values given on the command line
    Render {
        /// Template text
        #[arg(value_name = "TEMPLATE")]
        template: String,

        /// Values; integers are rendered as numbers, anything else as text
        #[arg(value_name = "VALUES", allow_hyphen_values = true)]
        values: Vec<String>,

        #[command(flatten)]
        format: FormatArgs,

        /// Show every sink write on its own line instead of the output
        #[arg(long)]
        spans: bool,
    },
}

#[derive(clap::Args)]
struct FormatArgs {
    /// Placeholder syntax
    #[arg(short, long, value_enum, default_value_t = DialectArg::Brace)]
    dialect: DialectArg,

    /// Fail when there are more values than placeholders
    #[arg(long)]
    strict: bool,

    /// Interpret backslash escapes (\n, \t, \\) in the template
    #[arg(short, long)]
    escapes: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DialectArg {
    /// `{}` and `{:?}`
    Brace,
    /// `%`
    Percent,
}

impl FormatArgs {
    fn options(&self) -> Options {
        let dialect = match self.dialect {
            DialectArg::Brace => Dialect::Brace,
            DialectArg::Percent => Dialect::Percent,
        };
        let options = Options::new().with_dialect(dialect);
        if self.strict {
            options.strict()
        } else {
            options
        }
    }

    fn template(&self, raw: &str) -> String {
        if self.escapes {
            unescape(raw)
        } else {
            raw.to_string()
        }
    }
}

/// Backslash escapes in command line templates
fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('0') => result.push('\0'),
                Some('\\') => result.push('\\'),
                Some(c) => {
                    result.push('\\');
                    result.push(c);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// A command line value, typed once when parsed
#[derive(Debug, Clone, PartialEq)]
enum Value {
    Int(i64),
    Text(String),
}

impl Value {
    // Only text that renders back unchanged is an integer: `007`, `+5` and
    // `-0` stay text.
    fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) if n.to_string() == raw => Value::Int(n),
            _ => Value::Text(raw.to_string()),
        }
    }
}

impl Render for Value {
    fn render(&self, cx: &mut Context<'_>) {
        match self {
            Value::Int(n) => cx.render(n),
            Value::Text(text) => cx.render(text),
        }
    }
}

struct DemoUser {
    name: &'static str,
}

impl Render for DemoUser {
    fn render(&self, cx: &mut Context<'_>) {
        cx.write_str(self.name);
    }
}

struct DemoFoo {
    bar: u32,
}

impl Render for DemoFoo {
    fn render(&self, cx: &mut Context<'_>) {
        cx.render(&self.bar);
    }
}

fn demo(sink: &mut dyn Sink) {
    let percent = Options::new().with_dialect(Dialect::Percent);

    spanfmt::print_to!(&mut *sink, "foo\n");
    spanfmt::print_to!(&mut *sink, "hello {} nyan\n", "world");
    spanfmt::print_to!(&mut *sink, "hello, {}\n", DemoUser { name: "nyan~ " });
    spanfmt::print_to!(&mut *sink, "it's {}\n", 2021);
    spanfmt::print_to!(&mut *sink, "it's not {}\n", -1999);
    spanfmt::write_to_with(&mut *sink, "hello %\n", ("world",), percent);
    spanfmt::write_to_with(&mut *sink, "foo is %\n", (DemoFoo { bar: 42 },), percent);
}

// Diagnostic on stderr, never on the output sink
fn report_error(err: &FormatError, file: &str, template: &str) -> ExitCode {
    let mut stderr = IoSink::stderr();
    stderr.write_bytes(err.to_diagnostic(file, template).format(template).as_bytes());
    stderr.write_bytes(b"\n");
    stderr.flush();
    ExitCode::FAILURE
}

/// `demo`: an output file that cannot be opened is fatal
fn run_demo(output: Option<&Path>) -> ExitCode {
    match output {
        Some(path) => {
            let mut sink = match IoSink::create(path) {
                Ok(sink) => sink,
                Err(err) => return report_error(&err, "<output>", ""),
            };
            demo(&mut sink);
            sink.flush();
            log::info!("demo written to {}", path.display());
        }
        None => {
            let mut sink = IoSink::stdout();
            demo(&mut sink);
            sink.flush();
        }
    }
    ExitCode::SUCCESS
}

/// `render`: writes into `out`, or with `spans` one line per sink write
fn run_render(
    template: &str,
    values: &[Value],
    options: Options,
    spans: bool,
    out: &mut dyn Sink,
) -> ExitCode {
    let result = if spans {
        let mut rec = Recorder::new();
        let result = spanfmt::scan(template, &mut rec, values, options);
        for (i, span) in rec.writes().iter().enumerate() {
            let text = String::from_utf8_lossy(span);
            spanfmt::print_to!(&mut *out, "{}: {:?}\n", i, &*text);
        }
        result
    } else {
        spanfmt::scan(template, out, values, options)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err, "<template>", template),
    }
}

fn main() -> Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { output } => Ok(run_demo(output.as_deref())),

        Commands::Check {
            template,
            file,
            args,
            format,
            json,
        } => {
            let (label, raw) = match (&file, template) {
                (Some(path), _) => (
                    path.display().to_string(),
                    std::fs::read_to_string(path)
                        .with_context(|| format!("cannot read template {}", path.display()))?,
                ),
                (None, Some(text)) => ("<template>".to_string(), text),
                (None, None) => anyhow::bail!("no template given"),
            };
            let source = format.template(&raw);

            let report = spanfmt::check(&source, &label, format.options(), args);

            if json {
                println!("{}", report.diagnostics.to_json()?);
            } else {
                report.diagnostics.print_all(&source);
                report.diagnostics.print_summary();
                if report.is_ok() {
                    spanfmt::print!("{}: {} placeholder(s)\n", label, report.placeholders);
                }
            }

            Ok(if report.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Render {
            template,
            values,
            format,
            spans,
        } => {
            let template = format.template(&template);
            let values: Vec<Value> = values.iter().map(|v| Value::parse(v)).collect();
            log::debug!("rendering {:?} with {:?}", template, values);

            let mut out = IoSink::stdout();
            let code = run_render(&template, &values, format.options(), spans, &mut out);
            out.flush();
            Ok(code)
        }
    }
}

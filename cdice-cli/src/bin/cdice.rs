//! cdice: generate, convert and inspect Cantonese diceware word lists.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use cdice_cli::Settings;
use cdice_engine::{
    Inventory, ListFormat, Marking, Scheme, SubstitutionTable, ToneStyle, Transliterator,
    WordList, index_for_roll, parse_canonical,
};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Cantonese diceware list tool
#[derive(Parser, Debug)]
#[command(name = "cdice", version)]
#[command(about = "Generate and transliterate Cantonese diceware word lists")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate one list per enabled scheme.
    ///
    /// Schemes and tables given on the command line replace those in the
    /// config file.
    Generate {
        /// Output directory
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Built-in scheme (repeatable)
        #[arg(short, long)]
        scheme: Vec<Scheme>,

        /// Custom substitution table in TOML (repeatable)
        #[arg(short, long)]
        table: Vec<PathBuf>,

        /// Tone spelling
        #[arg(long)]
        tones: Option<TonesArg>,

        /// Bracket non-native spellings, e.g. `[zh]aa1`
        #[arg(long)]
        mark_non_native: bool,

        /// Output format
        #[arg(short, long)]
        format: Option<FormatArg>,
    },

    /// Transliterate an existing Conway list, keeping its order.
    Convert {
        /// Conway list (diceware, plain or JSON)
        input: PathBuf,

        /// Target built-in scheme
        #[arg(short, long, conflicts_with = "table")]
        scheme: Option<Scheme>,

        /// Target custom table
        #[arg(short, long)]
        table: Option<PathBuf>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long)]
        format: Option<FormatArg>,
    },

    /// Print the words for dice rolls.
    Lookup {
        /// Five-digit rolls such as 35142
        #[arg(required = true)]
        rolls: Vec<String>,

        /// Built-in scheme (repeatable)
        #[arg(short, long)]
        scheme: Vec<Scheme>,

        /// Look up in a saved list instead of generating one
        #[arg(short, long, conflicts_with = "scheme")]
        list: Option<PathBuf>,
    },

    /// Verify tables and the lists they produce.
    Check {
        /// Built-in scheme (repeatable)
        #[arg(short, long)]
        scheme: Vec<Scheme>,

        /// Custom substitution table in TOML (repeatable)
        #[arg(short, long)]
        table: Vec<PathBuf>,

        /// Directory of published lists to compare against
        #[arg(long)]
        against: Option<PathBuf>,
    },

    /// List built-in schemes and their non-native spellings.
    Schemes,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TonesArg {
    Canonical,
    Conventional,
}

impl From<TonesArg> for ToneStyle {
    fn from(arg: TonesArg) -> Self {
        match arg {
            TonesArg::Canonical => ToneStyle::Canonical,
            TonesArg::Conventional => ToneStyle::Conventional,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Diceware,
    Plain,
    Json,
}

impl From<FormatArg> for ListFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Diceware => ListFormat::Diceware,
            FormatArg::Plain => ListFormat::Plain,
            FormatArg::Json => ListFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default: info level, with --verbose: debug level
    let default_filter = if cli.verbose {
        "cdice=debug,cdice_cli=debug,cdice_engine=debug"
    } else {
        "cdice=info,cdice_cli=info,cdice_engine=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    match cli.command {
        Commands::Generate {
            out_dir,
            scheme,
            table,
            tones,
            mark_non_native,
            format,
        } => {
            let mut settings = settings;
            if let Some(dir) = out_dir {
                settings.output.dir = dir;
            }
            override_schemes(&mut settings, scheme, table);
            if let Some(tones) = tones {
                settings.output.tones = tones.into();
            }
            if mark_non_native {
                settings.output.mark_non_native = true;
            }
            if let Some(format) = format {
                settings.output.format = format.into();
            }
            run_generate(&settings)
        }
        Commands::Convert {
            input,
            scheme,
            table,
            output,
            format,
        } => {
            let table = match (scheme, table) {
                (Some(scheme), None) => scheme.table(),
                (None, Some(path)) => SubstitutionTable::load(&path)
                    .with_context(|| format!("failed to load table {:?}", path))?,
                _ => bail!("convert needs exactly one of --scheme or --table"),
            };
            let transliterator = Transliterator::new(table)
                .with_tone_style(settings.output.tones)
                .with_marking(settings.marking());
            let format = format.map_or(settings.output.format, Into::into);
            run_convert(&input, &transliterator, output.as_deref(), format)
        }
        Commands::Lookup {
            rolls,
            scheme,
            list,
        } => {
            let mut settings = settings;
            override_schemes(&mut settings, scheme, Vec::new());
            run_lookup(&settings, &rolls, list.as_deref())
        }
        Commands::Check {
            scheme,
            table,
            against,
        } => {
            let mut settings = settings;
            override_schemes(&mut settings, scheme, table);
            run_check(&settings, against.as_deref())
        }
        Commands::Schemes => run_schemes(),
    }
}

/// Command-line schemes and tables replace the configured ones when given.
fn override_schemes(settings: &mut Settings, schemes: Vec<Scheme>, tables: Vec<PathBuf>) {
    if schemes.is_empty() && tables.is_empty() {
        return;
    }
    settings.schemes.enabled = schemes;
    settings.schemes.tables = tables;
}

// --- generate subcommand ---

fn run_generate(settings: &Settings) -> Result<()> {
    let transliterators = settings.transliterators()?;
    if transliterators.is_empty() {
        bail!("no schemes enabled");
    }

    let inventory = Inventory::generate();
    let format = settings.output.format;

    for transliterator in &transliterators {
        let list = WordList::from_inventory(&inventory, transliterator)?;
        let path = settings.output.dir.join(list.file_name(format));
        list.save(&path, format)
            .with_context(|| format!("failed to write {:?}", path))?;
        info!("Wrote {} words to {:?}", list.len(), path);
    }
    Ok(())
}

// --- convert subcommand ---

fn run_convert(
    input: &Path,
    transliterator: &Transliterator,
    output: Option<&Path>,
    format: ListFormat,
) -> Result<()> {
    let canonical = WordList::load(input, Scheme::Conway.name())
        .with_context(|| format!("failed to read {:?}", input))?;

    let syllables = canonical
        .words()
        .iter()
        .map(|word| parse_canonical(word))
        .collect::<cdice_engine::Result<Vec<_>>>()?;
    let inventory = Inventory::from_syllables(syllables);
    if inventory.syllables() != Inventory::generate().syllables() {
        warn!("{:?} differs from the generated canonical list; converting it as given", input);
    }
    let tokens = transliterator.transliterate_all(&inventory)?;
    let list = WordList::from_tokens(transliterator.table().name(), tokens)?;

    match output {
        Some(path) => {
            list.save(path, format)
                .with_context(|| format!("failed to write {:?}", path))?;
            info!("Converted {:?} into {:?}", input, path);
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            list.write(&mut handle, format)?;
            handle.flush()?;
        }
    }
    Ok(())
}

// --- lookup subcommand ---

fn run_lookup(settings: &Settings, rolls: &[String], list: Option<&Path>) -> Result<()> {
    for roll in rolls {
        index_for_roll(roll)?;
    }

    let lists = match list {
        Some(path) => {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.trim_start_matches("cantonese-diceware-"))
                .unwrap_or("list");
            vec![
                WordList::load(path, name)
                    .with_context(|| format!("failed to read {:?}", path))?,
            ]
        }
        None => {
            let inventory = Inventory::generate();
            settings
                .transliterators()?
                .iter()
                .map(|t| WordList::from_inventory(&inventory, t))
                .collect::<cdice_engine::Result<Vec<_>>>()?
        }
    };

    for roll in rolls {
        let words = lists
            .iter()
            .map(|list| list.lookup(roll))
            .collect::<cdice_engine::Result<Vec<_>>>()?;
        println!("{} {}", roll.trim(), words.join(" "));
    }
    Ok(())
}

// --- check subcommand ---

fn run_check(settings: &Settings, against: Option<&Path>) -> Result<()> {
    let inventory = Inventory::generate();
    let mut failures = 0usize;

    for transliterator in settings.transliterators()? {
        let name = transliterator.table().name().to_string();
        if check_scheme(&inventory, &transliterator, against)? {
            info!("{}: ok", name);
        } else {
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{} scheme(s) failed the check", failures);
    }
    Ok(())
}

/// Returns false if the scheme has a problem worth reporting.
fn check_scheme(
    inventory: &Inventory,
    transliterator: &Transliterator,
    against: Option<&Path>,
) -> Result<bool> {
    let table = transliterator.table();
    // Entering-tone numerals are only consulted for conventional spelling
    let with_tones = transliterator.tone_style() == ToneStyle::Conventional;

    let missing = table.missing_entries(inventory, with_tones);
    if !missing.is_empty() {
        for (kind, phoneme) in &missing {
            warn!("{}: no entry for {} '{}'", table.name(), kind, phoneme);
        }
        return Ok(false);
    }

    let tokens = match transliterator.transliterate_all(inventory) {
        Ok(tokens) => tokens,
        Err(e) => {
            warn!("{}: {}", table.name(), e);
            return Ok(false);
        }
    };

    let mut ok = true;
    for (syllable, token) in inventory.iter().zip(&tokens) {
        if token.non_native && !syllable.is_supplementary() {
            warn!(
                "{}: '{}' is spelled non-natively as '{}' but is not an unmerged contrast",
                table.name(),
                syllable,
                token
            );
            ok = false;
        }
    }
    debug!(
        "{}: {} non-native tokens",
        table.name(),
        tokens.iter().filter(|t| t.non_native).count()
    );

    let list = WordList::from_tokens(table.name(), tokens)?;

    if let Some(dir) = against {
        let path = dir.join(list.file_name(ListFormat::Diceware));
        let published = WordList::load(&path, table.name())
            .with_context(|| format!("failed to read {:?}", path))?;
        let mismatches: Vec<(String, &str, &str)> = list
            .entries()
            .zip(published.words())
            .filter(|((_, ours), theirs)| *ours != theirs.as_str())
            .map(|((roll, ours), theirs)| (roll, ours, theirs.as_str()))
            .collect();
        if let Some((roll, ours, theirs)) = mismatches.first() {
            warn!(
                "{}: {} words differ from {:?}, first at {} ({} vs {})",
                table.name(),
                mismatches.len(),
                path,
                roll,
                ours,
                theirs
            );
            ok = false;
        }
    }

    Ok(ok)
}

// --- schemes subcommand ---

fn run_schemes() -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for scheme in Scheme::ALL {
        let table = scheme.table();
        let label = if scheme.is_canonical() {
            " (canonical)"
        } else {
            ""
        };
        writeln!(out, "{}{}", scheme, label)?;

        let non_native = table.non_native_entries();
        if non_native.is_empty() {
            writeln!(out, "  no non-native spellings")?;
        }
        for (kind, phoneme, grapheme) in non_native {
            writeln!(
                out,
                "  {:<8} {:<4} -> {}",
                kind.to_string(),
                phoneme,
                grapheme.annotated()
            )?;
        }
    }
    writeln!(
        out,
        "\nNon-native spellings are written plainly unless --mark-non-native \
         (or output.mark_non_native) is set, e.g. {}",
        Transliterator::new(Scheme::Jyutping.table())
            .with_marking(Marking::Bracketed)
            .transliterate_token("chaa1")?
    )?;
    Ok(())
}

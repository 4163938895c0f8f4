use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use versechain::chain::Chain;
use versechain::corpus::{self, DEFAULT_HEADER_LINES};
use versechain::error::ChainError;
use versechain::snapshot;

#[derive(Parser)]
#[command(
    name = "versechain",
    version,
    about = "Append-only proof-of-work hash chain for verse corpora"
)]
struct Cli {
    /// Chain snapshot path (default: ./verses.chain)
    #[arg(long, default_value = "verses.chain")]
    chain: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a chain from a corpus file and save the snapshot
    Build {
        /// Corpus file: one `Book Chapter:Verse Text` line per verse
        corpus: PathBuf,
        /// Leading hex zeros required of every mined block hash
        #[arg(short, long, default_value_t = 2)]
        difficulty: u32,
        /// Header lines to skip at the top of the corpus
        #[arg(long, default_value_t = DEFAULT_HEADER_LINES)]
        skip_header: usize,
    },
    /// Re-run the integrity scan over a saved chain
    Verify,
    /// Look up a verse by book, chapter and verse number
    Lookup {
        book: String,
        chapter: u32,
        verse: u32,
    },
    /// List the newest blocks
    Show {
        /// Max blocks to show
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },
    /// Show chain statistics
    Stats,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            corpus,
            difficulty,
            skip_header,
        } => cmd_build(&cli.chain, &corpus, difficulty, skip_header),
        Commands::Verify => cmd_verify(&cli.chain),
        Commands::Lookup {
            book,
            chapter,
            verse,
        } => cmd_lookup(&cli.chain, &book, chapter, verse),
        Commands::Show { limit } => cmd_show(&cli.chain, limit),
        Commands::Stats => cmd_stats(&cli.chain),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_build(
    chain_path: &Path,
    corpus_path: &Path,
    difficulty: u32,
    skip_header: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let verses = corpus::read_corpus(corpus_path, skip_header)?;
    let total = verses.len();
    println!("Read {} verses from {}", total, corpus_path.display());

    println!("Mining {} blocks at difficulty {}...", total, difficulty);
    let mut chain = Chain::new(difficulty);
    for (i, verse) in verses.into_iter().enumerate() {
        chain.append(verse);
        if (i + 1) % 1000 == 0 {
            info!("mined {}/{} blocks", i + 1, total);
        }
    }

    // A freshly built chain can only fail this if something is badly wrong,
    // but an invalid chain must never reach disk.
    if let Some(index) = chain.first_invalid() {
        return Err(ChainError::InvalidChain(index).into());
    }

    snapshot::save(&chain, chain_path)?;
    println!(
        "Chain {} valid; saved {} blocks to {}",
        chain.id,
        chain.len(),
        chain_path.display()
    );
    Ok(())
}

fn cmd_verify(chain_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let chain = snapshot::load(chain_path)?;
    if let Some(index) = chain.first_invalid() {
        return Err(ChainError::InvalidChain(index).into());
    }
    println!(
        "Chain {} is valid ({} blocks, difficulty {})",
        chain.id,
        chain.len(),
        chain.difficulty
    );
    Ok(())
}

fn cmd_lookup(
    chain_path: &Path,
    book: &str,
    chapter: u32,
    verse: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let chain = snapshot::load(chain_path)?;
    match chain.find(book, chapter, verse).and_then(|b| b.data.as_ref()) {
        Some(data) => {
            println!("{}", data);
            Ok(())
        }
        None => Err(ChainError::VerseNotFound {
            book: book.into(),
            chapter,
            verse,
        }
        .into()),
    }
}

fn cmd_show(chain_path: &Path, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let chain = snapshot::load(chain_path)?;
    for (index, block) in chain.blocks.iter().enumerate().rev().take(limit) {
        let reference = match &block.data {
            Some(v) => format!("{} {}:{}", v.book, v.chapter, v.verse),
            None => "(genesis)".into(),
        };
        println!(
            "#{:<6} {:<12} nonce={:<8} {}  {}",
            index,
            short_hash(&block.hash),
            block.nonce,
            block.timestamp.format("%Y-%m-%d %H:%M:%S"),
            reference
        );
    }
    Ok(())
}

fn cmd_stats(chain_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let chain = snapshot::load(chain_path)?;
    print!("{}", chain.stats());
    Ok(())
}

fn short_hash(hash: &str) -> &str {
    &hash[..hash.len().min(12)]
}

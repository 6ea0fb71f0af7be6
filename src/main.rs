// savr CLI - thin glue between the resolver, the library and the terminal

use clap::{Parser, Subcommand};

use savr::{JsonFileBackend, LibraryStore, Resolver, ResolverConfig, VideoData};

#[derive(Parser)]
#[command(
    name = "savr",
    version,
    about = "Resolve social-media video links into downloadable formats"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a video URL and add the result to the library
    Resolve {
        /// Source video URL
        url: String,
        /// Print the raw record as JSON
        #[arg(long)]
        json: bool,
        /// Request timeout in seconds
        #[arg(long, default_value_t = 15)]
        timeout: u64,
        /// SOCKS5/HTTP proxy URL for upstream calls
        #[arg(long)]
        proxy: Option<String>,
    },
    /// List previously resolved videos
    History,
    /// Remove one library entry by id
    Remove { id: String },
    /// Clear the whole library
    Clear,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let store = LibraryStore::new(Box::new(JsonFileBackend::new()));

    match cli.command {
        Command::Resolve {
            url,
            json,
            timeout,
            proxy,
        } => {
            let config = ResolverConfig::default()
                .with_timeout(timeout)
                .with_proxy(proxy);
            let resolver = Resolver::new(config);

            match resolver.resolve(&url).await {
                Ok(video) => {
                    let history = store.insert(video.clone());
                    if json {
                        match serde_json::to_string_pretty(&video) {
                            Ok(raw) => println!("{}", raw),
                            Err(e) => eprintln!("failed to encode record: {}", e),
                        }
                    } else {
                        print_video(&video);
                        println!("\n{} item(s) in library", history.len());
                    }
                }
                Err(err) => {
                    eprintln!("{}", err);
                    std::process::exit(1);
                }
            }
        }
        Command::History => {
            let videos = store.load();
            if videos.is_empty() {
                println!("Library is empty");
            }
            for video in &videos {
                println!("{}  [{}]  {}", video.id, video.platform, video.title);
            }
        }
        Command::Remove { id } => {
            let remaining = store.remove(&id);
            println!("{} item(s) remain", remaining.len());
        }
        Command::Clear => {
            store.clear();
            println!("Library cleared");
        }
    }
}

fn print_video(video: &VideoData) {
    println!("{}  [{}]", video.title, video.platform);
    if let Some(author) = &video.author {
        println!("by {}", author);
    }
    if video.formats.is_empty() {
        println!("no downloadable formats reported");
    }
    for format in &video.formats {
        println!(
            "  {:<24} .{:<5} {}",
            format.label,
            format.extension(),
            format.url
        );
    }
}

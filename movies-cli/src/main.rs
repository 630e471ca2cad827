use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::{Parser, Subcommand};
use movies_client::render::{
    LOAD_FAILED_MESSAGE, NO_MOVIES_MESSAGE, movie_line, render_load_error, render_movies,
};
use movies_client::{CatalogError, CatalogSession, Movie, MovieForm, MovieId, MoviesClientHttp};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(about = "Browse and edit a movie collection served over REST")]
struct Cli {
    #[clap(short, long, default_value = "http://localhost:3000")]
    server: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every movie.
    List {
        #[clap(long)]
        html: bool,
    },
    /// Filter by a case-insensitive substring of title or genre.
    Search {
        query: String,
        #[clap(long)]
        html: bool,
    },
    Add {
        #[clap(long)]
        title: String,
        #[clap(long)]
        year: String,
        #[clap(long, default_value = "")]
        genre: String,
    },
    /// Replace a movie; omitted fields keep their current value.
    Edit {
        id: MovieId,
        #[clap(long)]
        title: Option<String>,
        #[clap(long)]
        year: Option<String>,
        #[clap(long)]
        genre: Option<String>,
    },
    Delete {
        id: MovieId,
        /// Skip the confirmation question.
        #[clap(short, long)]
        yes: bool,
    },
}

impl Command {
    fn wants_html(&self) -> bool {
        matches!(self, Command::List { html: true } | Command::Search { html: true, .. })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Cli::parse();

    let client = MoviesClientHttp::new(&args.server).context("failed to build HTTP client")?;
    let mut session = CatalogSession::new(client);

    if session.load().await.is_err() {
        if args.command.wants_html() {
            print!("{}", render_load_error());
        } else {
            eprintln!("{LOAD_FAILED_MESSAGE}");
        }
        std::process::exit(1);
    }

    let mutating = !matches!(args.command, Command::List { .. } | Command::Search { .. });
    let outcome = match args.command {
        Command::List { html } => {
            print_movies(&session.search(""), html);
            Ok(())
        }
        Command::Search { query, html } => {
            print_movies(&session.search(&query), html);
            Ok(())
        }
        Command::Add { title, year, genre } => session
            .create(&MovieForm::new(title, year, genre))
            .await
            .map(|movie| println!("Movie added! ID: {}", movie.id)),
        Command::Edit {
            id,
            title,
            year,
            genre,
        } => {
            let seeded = session.catalog().find(&id).map(MovieForm::from_movie);
            match seeded {
                Some(seeded) => {
                    let form = MovieForm {
                        title: title.unwrap_or(seeded.title),
                        year: year.unwrap_or(seeded.year),
                        genre: genre.unwrap_or(seeded.genre),
                    };
                    session
                        .edit(&id, &form)
                        .await
                        .map(|movie| println!("Movie updated: {}", movie_line(&movie)))
                }
                None => Err(CatalogError::NotFound(id)),
            }
        }
        Command::Delete { id, yes } => session
            .delete(&id, || yes || confirm("Delete this movie?"))
            .await
            .map(|deleted| {
                if deleted {
                    println!("Movie deleted!");
                }
            }),
    };

    if let Err(err) = outcome {
        eprintln!("{err}");
        std::process::exit(1);
    }
    if mutating {
        // The change went through; only the refreshed listing is missing.
        if session.is_stale() {
            eprintln!("{LOAD_FAILED_MESSAGE}");
        } else {
            print_movies(&session.search(""), false);
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn print_movies(movies: &[&Movie], html: bool) {
    if html {
        print!("{}", render_movies(movies));
    } else if movies.is_empty() {
        println!("{NO_MOVIES_MESSAGE}");
    } else {
        for movie in movies {
            println!("{}", movie_line(movie));
        }
    }
}

fn confirm(question: &str) -> bool {
    print!("{question} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => is_yes(&answer),
        Err(_) => false,
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
